//! Invariants that must hold for any input sequence

use evasion_sim::{Direction, Engine, SimConfig, SimPhase};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Command {
    Input(Direction),
    Tick(f32),
    Spawn,
}

fn direction() -> impl Strategy<Value = Direction> {
    prop_oneof![Just(Direction::Up), Just(Direction::Down)]
}

fn command() -> impl Strategy<Value = Command> {
    prop_oneof![
        direction().prop_map(Command::Input),
        (0.0f32..50.0).prop_map(Command::Tick),
        Just(Command::Spawn),
    ]
}

fn apply(engine: &mut Engine, command: &Command) {
    match *command {
        Command::Input(direction) => engine.apply_directional_input(direction),
        Command::Tick(ms) => {
            engine.tick(ms);
        }
        Command::Spawn => {
            engine.spawn_obstacle();
        }
    }
}

proptest! {
    #[test]
    fn player_stays_in_bounds(inputs in prop::collection::vec(direction(), 0..200)) {
        let mut engine = Engine::new(0);
        engine.start();
        for direction in inputs {
            engine.apply_directional_input(direction);
            let y = engine.snapshot().player.y;
            prop_assert!((5.0..=95.0).contains(&y));
        }
    }

    #[test]
    fn survivors_are_right_of_despawn(
        seed in any::<u64>(),
        commands in prop::collection::vec(command(), 0..300),
    ) {
        let mut engine = Engine::new(seed);
        engine.start();
        for command in &commands {
            apply(&mut engine, command);
            if let Command::Tick(_) = command {
                prop_assert!(engine.snapshot().obstacles.iter().all(|o| o.x > -20.0));
            }
        }
    }

    #[test]
    fn ids_increase_in_spawn_order(
        seed in any::<u64>(),
        commands in prop::collection::vec(command(), 0..300),
    ) {
        let mut engine = Engine::new(seed);
        engine.start();
        let mut spawned = Vec::new();
        for command in &commands {
            if let Command::Spawn = command {
                if let Some(id) = engine.spawn_obstacle() {
                    spawned.push(id);
                }
            } else {
                apply(&mut engine, command);
            }
            let ids: Vec<u32> = engine.snapshot().obstacles.iter().map(|o| o.id).collect();
            prop_assert!(ids.windows(2).all(|w| w[0] < w[1]));
        }
        prop_assert!(spawned.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn score_counts_collision_free_ticks(
        deltas in prop::collection::vec(0.0f32..50.0, 0..200),
    ) {
        // Nothing spawned, so nothing can collide
        let mut engine = Engine::new(0);
        engine.start();
        let before = engine.raw_score();
        for ms in &deltas {
            prop_assert_eq!(engine.tick(*ms), SimPhase::Running);
        }
        prop_assert_eq!(engine.raw_score(), before + deltas.len() as u64);
    }

    #[test]
    fn game_over_is_frozen(
        seed in any::<u64>(),
        commands in prop::collection::vec(command(), 0..100),
    ) {
        let mut engine = Engine::new(seed);
        engine.start();
        let state = engine.state_mut();
        let id = state.next_obstacle_id();
        state.obstacles.push(evasion_sim::sim::Obstacle::new(
            id,
            glam::Vec2::new(10.0, 50.0),
            20.0,
        ));
        prop_assert_eq!(engine.tick(0.0), SimPhase::GameOver);

        let frozen = engine.snapshot();
        for command in &commands {
            apply(&mut engine, command);
        }
        prop_assert_eq!(engine.snapshot(), frozen);
    }

    #[test]
    fn display_score_is_tenths(raw in any::<u64>()) {
        prop_assert_eq!(SimConfig::default().display_score(raw), raw / 10);
    }
}
