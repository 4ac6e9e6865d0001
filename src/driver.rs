//! Host loop glue
//!
//! Serializes the render loop, the spawn timer, and keyboard input onto one
//! `Engine`. The host calls `frame` from its animation callback with a
//! monotonic timestamp and forwards key presses to `key_down`; when the phase
//! leaves `Running` it can stop scheduling frames until the next start.

use rand::Rng;
use rand_pcg::Pcg32;

use crate::config::SimConfig;
use crate::highscores::HighScores;
use crate::sim::{Direction, Engine, SimEvent, SimPhase, Snapshot};

pub struct Driver<R = Pcg32> {
    engine: Engine<R>,
    /// Timestamp of the previous frame (ms); `None` until the first start
    last_frame_ms: Option<f64>,
    /// Time banked toward the next obstacle spawn
    spawn_accumulator_ms: f32,
    high_scores: HighScores,
}

impl Driver<Pcg32> {
    pub fn new(seed: u64) -> Self {
        Self::from_engine(Engine::new(seed))
    }

    pub fn with_config(config: SimConfig, seed: u64) -> Self {
        Self::from_engine(Engine::with_config(config, seed))
    }
}

impl<R: Rng> Driver<R> {
    pub fn from_engine(engine: Engine<R>) -> Self {
        Self {
            engine,
            last_frame_ms: None,
            spawn_accumulator_ms: 0.0,
            high_scores: HighScores::new(),
        }
    }

    /// Start a run, resetting the frame and spawn clocks to `now_ms`
    pub fn start(&mut self, now_ms: f64) {
        self.last_frame_ms = Some(now_ms);
        self.spawn_accumulator_ms = 0.0;
        self.engine.start();
    }

    pub fn abort(&mut self) {
        self.engine.abort();
    }

    /// Advance to `now_ms`: catch up spawns, then tick once
    ///
    /// Returns the events produced since the previous call.
    pub fn frame(&mut self, now_ms: f64) -> Vec<SimEvent> {
        if self.engine.phase() == SimPhase::Running {
            let dt = self.frame_delta(now_ms);
            let config = self.engine.config();
            let interval = config.spawn_interval_ms;
            let max_spawns = config.max_spawns_per_frame;

            self.spawn_accumulator_ms += dt;
            let mut spawns = 0;
            while self.spawn_accumulator_ms >= interval && spawns < max_spawns {
                self.engine.spawn_obstacle();
                self.spawn_accumulator_ms -= interval;
                spawns += 1;
            }
            // Drop the backlog a capped catch-up could not spawn
            if self.spawn_accumulator_ms >= interval {
                self.spawn_accumulator_ms %= interval;
            }

            self.engine.tick(dt);
        }
        self.last_frame_ms = Some(now_ms);

        let events = self.engine.drain_events();
        for event in &events {
            if let SimEvent::Collision { raw_score, .. } = *event {
                self.record_run(raw_score, now_ms);
            }
        }
        events
    }

    /// Map a DOM-style key name to a command; returns whether it was handled
    pub fn key_down(&mut self, key: &str, now_ms: f64) -> bool {
        match key {
            "ArrowUp" => self.engine.apply_directional_input(Direction::Up),
            "ArrowDown" => self.engine.apply_directional_input(Direction::Down),
            " " => {
                if self.engine.phase() != SimPhase::Running {
                    self.start(now_ms);
                }
            }
            "Escape" => self.abort(),
            _ => return false,
        }
        true
    }

    /// Elapsed ms since the previous frame, clamped to `[0, max_frame_ms]`
    fn frame_delta(&self, now_ms: f64) -> f32 {
        let Some(last) = self.last_frame_ms else {
            return 0.0;
        };
        let dt = (now_ms - last) as f32;
        if !dt.is_finite() {
            log::warn!("Non-finite frame delta ({now_ms} - {last}), skipping");
            return 0.0;
        }
        dt.clamp(0.0, self.engine.config().max_frame_ms)
    }

    fn record_run(&mut self, raw_score: u64, now_ms: f64) {
        let score = self.engine.config().display_score(raw_score);
        let ticks = self.engine.state().ticks;
        if let Some(rank) = self.high_scores.add_score(score, ticks, now_ms) {
            log::info!("Final score {score} ranked #{rank}");
        } else {
            log::info!("Final score {score}");
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        self.engine.snapshot()
    }

    pub fn phase(&self) -> SimPhase {
        self.engine.phase()
    }

    pub fn engine(&self) -> &Engine<R> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut Engine<R> {
        &mut self.engine
    }

    pub fn high_scores(&self) -> &HighScores {
        &self.high_scores
    }

    pub fn set_high_scores(&mut self, high_scores: HighScores) {
        self.high_scores = high_scores;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Obstacle;
    use glam::Vec2;

    /// Frames at 60 Hz starting after `start`
    fn run_frames(driver: &mut Driver, start_ms: f64, frames: u32) -> f64 {
        let mut now = start_ms;
        for _ in 0..frames {
            now += 1000.0 / 60.0;
            driver.frame(now);
        }
        now
    }

    #[test]
    fn test_idle_frames_do_nothing() {
        let mut driver = Driver::new(1);
        assert!(driver.frame(16.0).is_empty());
        assert_eq!(driver.phase(), SimPhase::Idle);
        assert_eq!(driver.snapshot().raw_score, 0);
    }

    #[test]
    fn test_spawn_cadence() {
        let mut driver = Driver::new(1);
        driver.start(0.0);

        // 1400 ms: no spawn yet; 1500 ms: first spawn
        let mut spawned = Vec::new();
        for now in (100..=1400).step_by(100) {
            spawned.extend(driver.frame(now as f64));
        }
        assert!(!spawned.iter().any(|e| matches!(e, SimEvent::Spawned { .. })));

        let events = driver.frame(1500.0);
        assert!(events.contains(&SimEvent::Spawned { id: 0 }));
    }

    #[test]
    fn test_capped_catch_up_drops_backlog() {
        let config = SimConfig {
            spawn_interval_ms: 10.0,
            max_spawns_per_frame: 2,
            ..Default::default()
        };
        let mut driver = Driver::with_config(config, 1);
        driver.start(0.0);

        // Each 100 ms frame owes 10 spawns but only 2 happen
        for frame in 1..=20 {
            driver.frame(frame as f64 * 100.0);
            assert!(driver.spawn_accumulator_ms < 10.0);
        }
        assert!(driver.snapshot().obstacles.len() <= 40);
    }

    #[test]
    fn test_one_tick_per_frame() {
        let mut driver = Driver::new(1);
        driver.start(0.0);
        run_frames(&mut driver, 0.0, 30);
        assert_eq!(driver.snapshot().raw_score, 30);
    }

    #[test]
    fn test_long_frame_is_clamped() {
        let mut driver = Driver::new(1);
        driver.start(0.0);
        driver.engine_mut().state_mut().obstacles.push(Obstacle::new(
            100,
            Vec2::new(100.0, 90.0),
            10.0,
        ));

        // A 5 second stall moves obstacles by at most max_frame_ms * speed
        driver.frame(5000.0);
        let snap = driver.snapshot();
        let moved = snap.obstacles.iter().find(|o| o.id == 100).map(|o| o.x);
        assert_eq!(moved, Some(90.0));
    }

    #[test]
    fn test_backwards_clock_is_zero_delta() {
        let mut driver = Driver::new(1);
        driver.start(1000.0);
        driver.engine_mut().state_mut().obstacles.push(Obstacle::new(
            100,
            Vec2::new(80.0, 90.0),
            10.0,
        ));
        driver.frame(900.0);
        assert_eq!(driver.snapshot().obstacles[0].x, 80.0);
    }

    #[test]
    fn test_keys() {
        let mut driver = Driver::new(1);
        // Arrows are ignored while idle, space starts
        assert!(driver.key_down("ArrowUp", 0.0));
        assert_eq!(driver.snapshot().player.y, 50.0);
        assert!(driver.key_down(" ", 0.0));
        assert_eq!(driver.phase(), SimPhase::Running);

        driver.key_down("ArrowUp", 10.0);
        driver.key_down("ArrowUp", 20.0);
        assert_eq!(driver.snapshot().player.y, 34.0);
        driver.key_down("ArrowDown", 30.0);
        assert_eq!(driver.snapshot().player.y, 42.0);

        // Space does not restart a live run
        driver.key_down(" ", 40.0);
        assert_eq!(driver.snapshot().player.y, 42.0);

        assert!(driver.key_down("Escape", 50.0));
        assert_eq!(driver.phase(), SimPhase::Idle);
        assert!(!driver.key_down("a", 60.0));
    }

    #[test]
    fn test_collision_records_high_score() {
        let mut driver = Driver::new(1);
        driver.start(0.0);
        let now = run_frames(&mut driver, 0.0, 25);
        driver.engine_mut().state_mut().obstacles.push(Obstacle::new(
            100,
            Vec2::new(10.0, 50.0),
            20.0,
        ));

        let events = driver.frame(now + 16.0);
        assert!(events.iter().any(|e| matches!(
            e,
            SimEvent::Collision {
                obstacle_id: 100,
                raw_score: 25
            }
        )));
        assert_eq!(driver.phase(), SimPhase::GameOver);
        assert_eq!(driver.high_scores().top_score(), Some(2));

        // Restart via space
        driver.key_down(" ", now + 100.0);
        assert_eq!(driver.phase(), SimPhase::Running);
        assert_eq!(driver.snapshot().raw_score, 0);
    }
}
