//! Movement integrator (чистые функции, без host)
//!
//! Порядок за один physics step:
//! 1. direction = сумма активных направлений в базисе body, normalized
//! 2. rate = acceleration (на земле) / air_acceleration (в воздухе)
//! 3. horizontal = lerp(velocity, direction * speed, clamp(rate * delta, 0, 1))
//! 4. vertical = GROUND_STICK_VELOCITY на земле, иначе (prev - gravity) с clamp по terminal
//! 5. jump edge на земле → vertical = jump_power
//!
//! Результат отдаётся host'у в slide-move, его ответ становится новой скоростью.

use bevy::prelude::{Quat, Vec3};

use crate::config::MovementConfig;
use crate::input::ActionState;
use crate::player::GROUND_STICK_VELOCITY;

/// Желаемое горизонтальное направление (unit или ZERO)
///
/// Godot convention: forward = -Z basis, right = +X basis.
/// Противоположные клавиши гасят друг друга → ZERO.
pub fn wish_direction(orientation: Quat, actions: &ActionState) -> Vec3 {
    let basis_x = orientation * Vec3::X;
    let basis_z = orientation * Vec3::Z;

    let mut direction = Vec3::ZERO;

    if actions.forward {
        direction -= basis_z;
    }
    if actions.backward {
        direction += basis_z;
    }
    if actions.left {
        direction -= basis_x;
    }
    if actions.right {
        direction += basis_x;
    }

    direction.normalize_or_zero()
}

/// Сближение текущей скорости с target
///
/// Вес `rate * delta` clamp'ится в [0, 1]; при весе >= 1 возвращается ровно target
/// (без погрешности `a + (b - a) * 1`).
pub fn blend_horizontal(current: Vec3, target: Vec3, rate: f32, delta: f32) -> Vec3 {
    let weight = (rate * delta).clamp(0.0, 1.0);

    if weight >= 1.0 {
        return target;
    }

    current.lerp(target, weight)
}

/// Вертикальная скорость для следующего шага
///
/// Gravity вычитается за шаг (не масштабируется delta).
/// Jump не clamp'ится: `jump_power <= max_terminal_velocity` гарантирует `MovementConfig::validate`.
pub fn next_vertical_velocity(
    previous: f32,
    grounded: bool,
    jump_pressed: bool,
    config: &MovementConfig,
) -> f32 {
    let mut vertical = if grounded {
        GROUND_STICK_VELOCITY
    } else {
        (previous - config.gravity).clamp(
            -config.max_terminal_velocity,
            config.max_terminal_velocity,
        )
    };

    if jump_pressed && grounded {
        vertical = config.jump_power;
    }

    vertical
}

/// Результат интеграции одного шага (до host slide-move)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntegratedVelocity {
    /// Скорость, которую надо отдать host'у
    pub velocity: Vec3,
    /// Новое значение вертикального интегратора
    pub vertical_velocity: f32,
}

/// Полный шаг интеграции
///
/// `delta < 0` трактуется как 0 (host не должен так делать, но вес не уйдёт в минус).
pub fn integrate_velocity(
    current_velocity: Vec3,
    previous_vertical: f32,
    orientation: Quat,
    actions: &ActionState,
    grounded: bool,
    delta: f32,
    config: &MovementConfig,
) -> IntegratedVelocity {
    let direction = wish_direction(orientation, actions);

    let rate = if grounded {
        config.acceleration
    } else {
        config.air_acceleration
    };

    let mut velocity = blend_horizontal(
        current_velocity,
        direction * config.speed,
        rate,
        delta.max(0.0),
    );

    let vertical_velocity = next_vertical_velocity(previous_vertical, grounded, actions.jump, config);
    velocity.y = vertical_velocity;

    IntegratedVelocity {
        velocity,
        vertical_velocity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InputAction;

    const EPS: f32 = 1e-5;

    #[test]
    fn test_forward_is_negative_z() {
        let actions = ActionState::default().with(InputAction::Forward);
        let dir = wish_direction(Quat::IDENTITY, &actions);

        assert!((dir - Vec3::NEG_Z).length() < EPS, "dir = {:?}", dir);
    }

    #[test]
    fn test_direction_follows_yaw() {
        // yaw +90° (поворот влево): forward смотрит в -X
        let orientation = Quat::from_rotation_y(90f32.to_radians());
        let actions = ActionState::default().with(InputAction::Forward);
        let dir = wish_direction(orientation, &actions);

        assert!((dir - Vec3::NEG_X).length() < EPS, "dir = {:?}", dir);
    }

    #[test]
    fn test_diagonal_normalized() {
        let actions = ActionState::default()
            .with(InputAction::Forward)
            .with(InputAction::Right);
        let dir = wish_direction(Quat::IDENTITY, &actions);

        assert!((dir.length() - 1.0).abs() < EPS);
        assert!(dir.x > 0.0 && dir.z < 0.0);
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let actions = ActionState::default()
            .with(InputAction::Left)
            .with(InputAction::Right);

        assert_eq!(wish_direction(Quat::IDENTITY, &actions), Vec3::ZERO);
    }

    #[test]
    fn test_blend_snaps_when_weight_reaches_one() {
        let current = Vec3::new(0.1, 0.0, 0.3);
        let target = Vec3::new(-20.0, 0.0, 0.0);

        // rate 15 * delta 1 = 15 ≥ 1 → ровно target
        assert_eq!(blend_horizontal(current, target, 15.0, 1.0), target);
    }

    #[test]
    fn test_blend_partial() {
        let blended = blend_horizontal(Vec3::ZERO, Vec3::new(0.0, 0.0, -20.0), 15.0, 1.0 / 60.0);

        // weight = 0.25 → -5
        assert!((blended.z + 5.0).abs() < 1e-4, "blended = {:?}", blended);
    }

    #[test]
    fn test_blend_zero_delta_keeps_velocity() {
        let current = Vec3::new(3.0, 0.0, 4.0);
        assert_eq!(blend_horizontal(current, Vec3::ZERO, 15.0, 0.0), current);
    }

    #[test]
    fn test_decay_without_input_never_overshoots() {
        let config = MovementConfig::default();
        let mut velocity = Vec3::new(12.0, 0.0, -7.0);

        for _ in 0..240 {
            let next = integrate_velocity(
                velocity,
                GROUND_STICK_VELOCITY,
                Quat::IDENTITY,
                &ActionState::default(),
                true,
                1.0 / 60.0,
                &config,
            )
            .velocity;

            // Каждая компонента монотонно идёт к нулю и не меняет знак
            assert!(next.x >= 0.0 && next.x <= velocity.x);
            assert!(next.z <= 0.0 && next.z >= velocity.z);
            velocity = Vec3::new(next.x, 0.0, next.z);
        }

        assert!(velocity.length() < 1e-3, "velocity = {:?}", velocity);
    }

    #[test]
    fn test_grounded_vertical_pinned() {
        let config = MovementConfig::default();

        for previous in [-54.0, -3.0, 0.0, 5.0, 20.0] {
            assert_eq!(
                next_vertical_velocity(previous, true, false, &config),
                GROUND_STICK_VELOCITY
            );
        }
    }

    #[test]
    fn test_airborne_gravity_per_step_and_terminal_clamp() {
        let config = MovementConfig::default();
        let mut vertical = 0.0;

        for _ in 0..200 {
            let next = next_vertical_velocity(vertical, false, false, &config);
            assert!(next <= vertical);
            assert!(next >= -config.max_terminal_velocity);

            if next > -config.max_terminal_velocity {
                assert!((vertical - next - config.gravity).abs() < 1e-4);
            }
            vertical = next;
        }

        assert_eq!(vertical, -config.max_terminal_velocity);
    }

    #[test]
    fn test_jump_only_on_ground() {
        let config = MovementConfig::default();

        assert_eq!(next_vertical_velocity(GROUND_STICK_VELOCITY, true, true, &config), config.jump_power);

        let airborne = next_vertical_velocity(-2.0, false, true, &config);
        assert!((airborne - (-2.0 - config.gravity)).abs() < EPS);
    }

    #[test]
    fn test_integrate_combines_components() {
        let config = MovementConfig::default();
        let actions = ActionState::default().with(InputAction::Forward);

        let step = integrate_velocity(Vec3::ZERO, 0.0, Quat::IDENTITY, &actions, false, 1.0, &config);

        // air rate 5 * delta 1 ≥ 1 → snap к -Z * speed
        assert_eq!(step.velocity.x, 0.0);
        assert_eq!(step.velocity.z, -config.speed);
        assert_eq!(step.velocity.y, step.vertical_velocity);
        assert!((step.vertical_velocity + config.gravity).abs() < EPS);
    }
}
