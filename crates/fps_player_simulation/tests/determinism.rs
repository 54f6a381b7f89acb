//! Тесты детерминизма
//!
//! Одинаковый scripted input (seeded RNG) → идентичные snapshots

use fps_player_simulation::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

#[test]
fn test_determinism_same_seed() {
    const SEED: u64 = 12345;
    const TICK_COUNT: usize = 1000;

    let snapshot1 = run_session(SEED, TICK_COUNT);
    let snapshot2 = run_session(SEED, TICK_COUNT);

    assert_eq!(
        snapshot1, snapshot2,
        "Сессия с одинаковым seed ({}) дала разные результаты!",
        SEED
    );
}

#[test]
fn test_determinism_multiple_runs() {
    const SEED: u64 = 42;
    const TICK_COUNT: usize = 600;

    let snapshots: Vec<_> = (0..3).map(|_| run_session(SEED, TICK_COUNT)).collect();

    for (i, snapshot) in snapshots.iter().enumerate().skip(1) {
        assert_eq!(
            snapshots[0], *snapshot,
            "Прогон {} дал результат отличный от прогона 0",
            i
        );
    }
}

#[test]
fn test_different_input_diverges() {
    assert_ne!(run_session(1, 300), run_session(2, 300));
}

/// Случайный (но seeded) input script, возвращает snapshot мира
fn run_session(seed: u64, tick_count: usize) -> String {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut app = create_headless_app();
    spawn_player(app.world_mut(), MovementConfig::default()).expect("valid config");

    for _ in 0..tick_count {
        let mut actions = ActionState::default();
        for action in InputAction::ALL {
            let chance = if action.is_edge() { 0.02 } else { 0.3 };
            actions.set(action, rng.gen_bool(chance));
        }
        app.world_mut().send_event(PlayerInputEvent { actions });

        if rng.gen_bool(0.5) {
            app.world_mut().send_event(MouseLookEvent {
                delta_x: rng.gen_range(-50.0..50.0),
                delta_y: rng.gen_range(-50.0..50.0),
            });
        }

        app.update();
    }

    simulation_snapshot(app.world_mut())
}
