//! Command surface over the simulation
//!
//! `Engine` owns the state, config, and RNG and is meant to be driven from a
//! single execution context. Multi-threaded hosts must put it behind a mutex.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::snapshot::Snapshot;
use super::state::{Direction, SimEvent, SimPhase, SimState};
use super::tick;
use crate::config::SimConfig;

pub struct Engine<R = Pcg32> {
    state: SimState,
    config: SimConfig,
    rng: R,
    events: Vec<SimEvent>,
}

impl Engine<Pcg32> {
    /// Engine with default tuning and a seeded PCG stream
    pub fn new(seed: u64) -> Self {
        Self::with_rng(SimConfig::default(), Pcg32::seed_from_u64(seed))
    }

    pub fn with_config(config: SimConfig, seed: u64) -> Self {
        Self::with_rng(config, Pcg32::seed_from_u64(seed))
    }
}

impl<R: Rng> Engine<R> {
    /// Engine with an injected random source
    pub fn with_rng(config: SimConfig, rng: R) -> Self {
        Self {
            state: SimState::new(&config),
            config,
            rng,
            events: Vec::new(),
        }
    }

    /// Begin (or restart) a run from any phase
    pub fn start(&mut self) {
        self.state.reset_run(&self.config);
        self.events.push(SimEvent::Started);
        log::info!("Training run started");
    }

    pub fn apply_directional_input(&mut self, direction: Direction) {
        tick::apply_input(&mut self.state, direction, &self.config);
    }

    /// Advance by `elapsed_ms`; returns the phase after the step
    pub fn tick(&mut self, elapsed_ms: f32) -> SimPhase {
        if let Some(event) = tick::tick(&mut self.state, elapsed_ms, &self.config) {
            self.events.push(event);
        }
        self.state.phase
    }

    pub fn spawn_obstacle(&mut self) -> Option<u32> {
        let id = tick::spawn_obstacle(&mut self.state, &mut self.rng, &self.config)?;
        self.events.push(SimEvent::Spawned { id });
        Some(id)
    }

    /// Force `Idle` from any phase; the field is cleared, the frozen score stays visible
    pub fn abort(&mut self) {
        if self.state.phase != SimPhase::Idle {
            log::info!(
                "Training run aborted in {:?} (score {})",
                self.state.phase,
                self.display_score()
            );
        }
        self.state.phase = SimPhase::Idle;
        self.state.obstacles.clear();
        self.events.push(SimEvent::Aborted);
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state, &self.config)
    }

    /// Take all events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn phase(&self) -> SimPhase {
        self.state.phase
    }

    pub fn raw_score(&self) -> u64 {
        self.state.raw_score
    }

    pub fn display_score(&self) -> u64 {
        self.config.display_score(self.state.raw_score)
    }

    pub fn state(&self) -> &SimState {
        &self.state
    }

    /// Mutable access for scripted scenarios
    pub fn state_mut(&mut self) -> &mut SimState {
        &mut self.state
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }
}
