//! Evasion training headless runner
//!
//! Drives the simulation at a fixed frame rate without a display, either with
//! the demo autopilot or with no input at all, and reports final scores.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;

    use anyhow::Result;
    use clap::Parser;

    use evasion_sim::sim::autopilot;
    use evasion_sim::{Driver, HighScores, SimConfig, SimEvent, SimPhase};

    #[derive(Parser, Debug)]
    #[command(name = "evasion-sim")]
    #[command(about = "Run headless evasion training simulations")]
    struct Cli {
        /// RNG seed for the first run (each following run adds 1)
        #[arg(long, default_value_t = 1)]
        seed: u64,

        /// Number of runs
        #[arg(long, default_value_t = 1)]
        runs: u32,

        /// Stop a run that survives this many frames
        #[arg(long, default_value_t = 36_000)]
        max_frames: u32,

        /// Frame duration in milliseconds
        #[arg(long, default_value_t = 1000.0 / 60.0)]
        frame_ms: f64,

        /// JSON file overriding gameplay tunables
        #[arg(long)]
        config: Option<PathBuf>,

        /// JSON leaderboard to load and update
        #[arg(long)]
        scores: Option<PathBuf>,

        /// Disable the autopilot (the craft never moves)
        #[arg(long)]
        manual: bool,
    }

    pub fn run() -> Result<()> {
        let default = "info,evasion_sim=info";
        let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
            .format_timestamp_secs()
            .try_init();

        let cli = Cli::parse();
        let config = match &cli.config {
            Some(path) => SimConfig::load(path)?,
            None => SimConfig::default(),
        };
        let mut high_scores = match &cli.scores {
            Some(path) => HighScores::load(path)?,
            None => HighScores::new(),
        };

        for run in 0..cli.runs {
            let seed = cli.seed.wrapping_add(run as u64);
            let mut driver = Driver::with_config(config.clone(), seed);
            driver.set_high_scores(high_scores);

            let outcome = play(&mut driver, &cli);
            let snap = driver.snapshot();
            println!(
                "run {:>3} seed {:<6} {:<24} score {:>5} ({} ticks)",
                run + 1,
                seed,
                outcome,
                snap.display_score,
                driver.engine().state().ticks
            );
            high_scores = driver.high_scores().clone();
        }

        if !high_scores.is_empty() {
            println!("\nleaderboard:");
            for (i, entry) in high_scores.entries.iter().enumerate() {
                println!("{:>3}. {:>5} ({} ticks)", i + 1, entry.score, entry.ticks);
            }
        }
        if let Some(path) = &cli.scores {
            high_scores.save(path)?;
        }
        Ok(())
    }

    /// Play one run to collision or the frame limit; returns a short outcome label
    fn play(driver: &mut Driver, cli: &Cli) -> String {
        let mut now = 0.0;
        driver.start(now);

        for _ in 0..cli.max_frames {
            if !cli.manual {
                let engine = driver.engine_mut();
                if let Some(direction) = autopilot::steer(engine.state(), engine.config()) {
                    engine.apply_directional_input(direction);
                }
            }

            now += cli.frame_ms;
            for event in driver.frame(now) {
                match event {
                    SimEvent::Collision { obstacle_id, .. } => {
                        return format!("hit obstacle {obstacle_id}");
                    }
                    SimEvent::Spawned { id } => log::debug!("obstacle {id} spawned"),
                    _ => {}
                }
            }
        }

        if driver.phase() == SimPhase::Running {
            driver.abort();
        }
        "survived (frame limit)".to_string()
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is web::init, this is just to satisfy the compiler
}
