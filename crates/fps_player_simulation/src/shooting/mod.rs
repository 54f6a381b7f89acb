//! Shooting domain — spawn projectile + impulse + отложенное удаление
//!
//! Содержит:
//! - shot_impulse (импульс = -up точки спавна * shoot_power + скорость стрелка)
//! - RemovalQueue (deadline queue для удаления через projectile_lifetime)

pub mod removal;

pub use removal::RemovalQueue;

use bevy::prelude::{Transform, Vec3};

/// Импульс выстрела
///
/// Projectile летит вдоль -Y базиса точки спавна (с учётом её scale),
/// плюс скорость стрелка на момент выстрела.
pub fn shot_impulse(spawn_pose: &Transform, shoot_power: f32, shooter_velocity: Vec3) -> Vec3 {
    let up = spawn_pose.rotation * (Vec3::Y * spawn_pose.scale.y);
    -up * shoot_power + shooter_velocity
}
