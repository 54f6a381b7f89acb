//! PlayerControllerPlugin — headless simulation loop на Bevy ECS
//!
//! Фазы (в порядке Bevy Main schedule):
//!
//! ```text
//! PreUpdate   (input-sample):  player_mouse_look → collect_player_input → player_cancel_input
//! FixedUpdate (60 Hz step):    player_physics_step → step_headless_projectiles → expire_projectiles
//! ```
//!
//! Host = `HeadlessHost` resource, контроллер = `MovementController` component
//! на entity с marker `Player`.

pub mod systems;

pub use systems::*;

use bevy::prelude::*;

use crate::config::{ConfigError, MovementConfig};
use crate::host::HeadlessHost;
use crate::input::{MouseLookEvent, PlayerInputEvent};
use crate::player::{MovementController, Player};

/// Частота physics step
pub const PHYSICS_HZ: f64 = 60.0;

pub struct PlayerControllerPlugin;

impl Plugin for PlayerControllerPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(Time::<Fixed>::from_hz(PHYSICS_HZ))
            .init_resource::<HeadlessHost>()
            .init_resource::<PendingActions>()
            .add_event::<PlayerInputEvent>()
            .add_event::<MouseLookEvent>();

        app.add_systems(
            PreUpdate,
            (player_mouse_look, collect_player_input, player_cancel_input).chain(),
        );

        app.add_systems(
            FixedUpdate,
            (
                player_physics_step,
                step_headless_projectiles,
                expire_projectiles,
            )
                .chain(),
        );
    }
}

/// Spawn player entity + host ready (capture курсора)
///
/// Требует `HeadlessHost` resource (его ставит plugin).
pub fn spawn_player(world: &mut World, config: MovementConfig) -> Result<Entity, ConfigError> {
    let mut controller = MovementController::new(config)?;

    if let Some(mut host) = world.get_resource_mut::<HeadlessHost>() {
        controller.ready(&mut *host);
    } else {
        crate::log_warning("⚠️ spawn_player: HeadlessHost missing, ready() skipped");
    }

    let entity = world.spawn((Player, controller)).id();
    crate::log_info(&format!("✅ Player spawned (entity: {:?})", entity));

    Ok(entity)
}
