//! First-person player controller — simulation core
//!
//! Архитектура:
//! - Core = controller logic (look, movement integration, shooting, pointer capture)
//! - Host = engine layer (floor detection, slide-move, spawn/destroy, pointer)
//!   через узкий trait `PlayerHost`
//!
//! Host'ы:
//! - `HeadlessHost` + `PlayerControllerPlugin` — headless Bevy loop (тесты, бинарь)
//! - Godot `CharacterBody3D` — crate `fps_player_godot`

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use std::time::Duration;

pub mod camera;
pub mod config;
pub mod host;
pub mod input;
pub mod logger;
pub mod movement;
pub mod player;
pub mod plugin;
pub mod pointer;
pub mod shooting;

pub use config::{ConfigError, MovementConfig};
pub use host::{HeadlessHost, PlayerHost, PointerMode, ProjectileId};
pub use input::{ActionState, InputAction, MouseLookEvent, PlayerInputEvent};
pub use logger::{
    init_logger, log, log_error, log_info, log_warning, set_log_level, set_logger,
    set_logger_if_needed, LogLevel, LogPrinter,
};
pub use player::{ControllerState, MovementController, Player, GROUND_STICK_VELOCITY};
pub use plugin::{spawn_player, PendingActions, PlayerControllerPlugin, PHYSICS_HZ};

/// Создаёт minimal Bevy App для headless симуляции
///
/// Время двигается вручную: каждый `app.update()` = один physics step (1/60 s),
/// поэтому прогон не зависит от реальных часов.
/// Первый `update()` имеет delta 0 (Bevy так инициализирует часы).
pub fn create_headless_app() -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
            1.0 / PHYSICS_HZ,
        )))
        .add_plugins(PlayerControllerPlugin);

    app
}

/// Snapshot player state + host для сравнения детерминизма
pub fn simulation_snapshot(world: &mut World) -> String {
    let mut snapshot = String::new();

    let mut query = world.query_filtered::<(Entity, &MovementController), With<Player>>();
    let mut players: Vec<_> = query
        .iter(world)
        .map(|(entity, controller)| (entity.index(), *controller.state()))
        .collect();

    // Сортируем по Entity ID для детерминизма
    players.sort_by_key(|(index, _)| *index);

    for (index, state) in players {
        snapshot.push_str(&format!("{}:{:?};", index, state));
    }

    if let Some(host) = world.get_resource::<HeadlessHost>() {
        snapshot.push_str(&format!(
            "body:{:?};pointer:{:?};spawned:{};destroyed:{}",
            host.position, host.pointer_mode, host.spawned_total, host.destroyed_total
        ));
        for id in host.projectile_ids() {
            if let Some(projectile) = host.projectile(id) {
                snapshot.push_str(&format!(";{:?}:{:?}", id, projectile.pose.translation));
            }
        }
    }

    snapshot
}
