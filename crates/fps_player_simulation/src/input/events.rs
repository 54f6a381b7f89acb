//! Player input events
//!
//! Генерируются host'ом (или scripted driver в headless режиме),
//! обрабатываются системами `PlayerControllerPlugin`.

use bevy::prelude::{Event, Vec2};

use super::ActionState;

/// Snapshot actions за frame
///
/// Edges (jump/shoot) латчатся до ближайшего FixedUpdate шага,
/// cancel обрабатывается сразу (frame phase).
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct PlayerInputEvent {
    pub actions: ActionState,
}

/// Сырой pointer delta (pixels)
///
/// - `delta_x > 0` → поворот вправо (yaw уменьшается)
/// - `delta_y > 0` → взгляд вниз (pitch уменьшается)
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct MouseLookEvent {
    pub delta_x: f32,
    pub delta_y: f32,
}

impl MouseLookEvent {
    pub fn relative(&self) -> Vec2 {
        Vec2::new(self.delta_x, self.delta_y)
    }
}
