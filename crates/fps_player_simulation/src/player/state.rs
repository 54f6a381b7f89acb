//! Controller state + player marker

use bevy::prelude::{Component, Quat, Vec3};

/// Вертикальная скорость на земле: небольшая сила вниз держит body прижатым к полу
pub const GROUND_STICK_VELOCITY: f32 = -0.01;

/// Marker component для player-controlled entity
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Player;

/// Состояние контроллера (принадлежит только контроллеру)
///
/// - `velocity`: последняя скорость, возвращённая host slide-move (с учётом коллизий)
/// - `vertical_velocity`: собственный интегратор гравитации (не синхронизируется с host)
/// - `yaw`, `pitch`: градусы (body yaw / camera pivot pitch)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ControllerState {
    pub velocity: Vec3,
    pub vertical_velocity: f32,
    pub yaw: f32,
    pub pitch: f32,
}

impl ControllerState {
    /// Ориентация body (только yaw, вокруг +Y)
    pub fn body_orientation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw.to_radians())
    }

    pub fn horizontal_speed(&self) -> f32 {
        Vec3::new(self.velocity.x, 0.0, self.velocity.z).length()
    }
}
