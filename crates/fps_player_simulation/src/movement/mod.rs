//! Movement domain — интеграция скорости за physics step
//!
//! Содержит:
//! - wish_direction (WASD → world direction по ориентации body)
//! - blend_horizontal (экспоненциальное сближение с target скоростью)
//! - next_vertical_velocity (gravity / ground stick / jump)
//! - integrate_velocity (всё вместе → скорость для host slide-move)

pub mod integrator;

pub use integrator::*;
