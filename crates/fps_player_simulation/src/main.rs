//! Headless сессия FPS player controller
//!
//! Scripted driver: идёт вперёд, поворачивает, прыгает, стреляет, отпускает курсор.
//! Опционально: путь к RON конфигу первым аргументом.

use bevy::prelude::*;
use fps_player_simulation::*;

fn main() {
    let config = match std::env::args().nth(1) {
        Some(path) => match MovementConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to load config {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => MovementConfig::default(),
    };

    println!("Starting FPS player headless session");

    let mut app = create_headless_app();
    if let Err(e) = spawn_player(app.world_mut(), config) {
        eprintln!("Invalid player config: {}", e);
        std::process::exit(1);
    }

    // 10 секунд симуляции
    for tick in 0..600u32 {
        let mut actions = ActionState::default();
        if tick < 240 {
            actions.set(InputAction::Forward, true);
        }
        actions.set(InputAction::Jump, tick == 60);
        actions.set(InputAction::Shoot, tick == 120 || tick == 180);
        actions.set(InputAction::UiCancel, tick == 200);

        app.world_mut().send_event(PlayerInputEvent { actions });
        if (90..120).contains(&tick) {
            app.world_mut().send_event(MouseLookEvent {
                delta_x: 10.0,
                delta_y: -2.0,
            });
        }

        app.update();

        if tick % 60 == 0 {
            let host = app.world().resource::<HeadlessHost>();
            println!(
                "Tick {}: position {:?}, on floor: {}, projectiles: {}, pointer: {:?}",
                tick,
                host.position,
                host.is_on_floor(),
                host.projectile_count(),
                host.pointer_mode
            );
        }
    }

    let host = app.world().resource::<HeadlessHost>();
    println!(
        "Session complete! spawned {}, destroyed {}, pointer {:?}",
        host.spawned_total, host.destroyed_total, host.pointer_mode
    );
}
