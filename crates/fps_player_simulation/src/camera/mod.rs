//! Mouse look (yaw body + pitch camera pivot)
//!
//! # Rotation
//! - Horizontal (yaw Y) → body, без ограничений (хранится в (-180, 180])
//! - Vertical (pitch X) → camera pivot, clamp [min_pitch, max_pitch]
//!
//! Всё в градусах, sensitivity — градусы за pixel.

use bevy::prelude::Vec2;

use crate::config::MovementConfig;
use crate::player::ControllerState;

/// Применяет pointer delta к yaw/pitch
///
/// Pitch clamp выполняется на каждом событии, поэтому инвариант
/// `min_pitch <= pitch <= max_pitch` держится после любой последовательности.
pub fn apply_mouse_motion(state: &mut ControllerState, relative: Vec2, config: &MovementConfig) {
    state.yaw = wrap_degrees(state.yaw - relative.x * config.mouse_sensitivity);
    state.pitch = (state.pitch - relative.y * config.mouse_sensitivity)
        .clamp(config.min_pitch, config.max_pitch);
}

/// Нормализует угол в (-180, 180]
pub fn wrap_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    if wrapped > 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}
