//! MovementController — first-person player controller
//!
//! # Lifecycle (вызывается host'ом)
//!
//! | host callback      | метод                  | что делает                                  |
//! |--------------------|------------------------|---------------------------------------------|
//! | ready              | `ready`                | capture курсора, начальный look             |
//! | raw input (motion) | `handle_mouse_motion`  | yaw/pitch                                   |
//! | frame process      | `process`              | ui_cancel → release курсора                 |
//! | physics step       | `physics_step`         | выстрел (если был edge) + интеграция        |
//! | physics step       | `expire_projectiles`   | удаление истёкших projectiles + re-capture |
//!
//! Время (`now`) передаётся снаружи — контроллер не читает часы сам,
//! поэтому headless loop и тесты управляют им детерминированно.

use bevy::prelude::{Component, Vec2, Vec3};
use std::time::Duration;

use crate::camera::apply_mouse_motion;
use crate::config::{ConfigError, MovementConfig};
use crate::host::{PlayerHost, PointerMode, ProjectileId};
use crate::input::ActionState;
use crate::movement::integrate_velocity;
use crate::player::ControllerState;
use crate::pointer::{recapture_pointer, release_pointer};
use crate::shooting::{shot_impulse, RemovalQueue};

#[derive(Component, Debug, Clone)]
pub struct MovementController {
    config: MovementConfig,
    state: ControllerState,
    removals: RemovalQueue,
}

impl MovementController {
    /// Создаёт контроллер (конфиг валидируется)
    pub fn new(config: MovementConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            config,
            state: ControllerState::default(),
            removals: RemovalQueue::new(),
        })
    }

    /// Начальная ориентация (например, из rotation узлов сцены)
    ///
    /// Pitch сразу clamp'ится в [min_pitch, max_pitch].
    pub fn with_look(mut self, yaw: f32, pitch: f32) -> Self {
        self.state.yaw = yaw;
        self.state.pitch = pitch.clamp(self.config.min_pitch, self.config.max_pitch);
        self
    }

    pub fn config(&self) -> &MovementConfig {
        &self.config
    }

    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    pub fn pending_removals(&self) -> usize {
        self.removals.len()
    }

    pub fn next_removal_deadline(&self) -> Option<Duration> {
        self.removals.next_deadline()
    }

    /// Host ready: захват курсора + синхронизация transform nodes
    pub fn ready<H: PlayerHost>(&mut self, host: &mut H) {
        host.set_pointer_mode(PointerMode::Captured);
        host.apply_look(self.state.yaw, self.state.pitch);

        crate::log_info(&format!(
            "Player controller ready (yaw {:.1}°, pitch {:.1}°)",
            self.state.yaw, self.state.pitch
        ));
    }

    /// Raw pointer motion → yaw body / pitch camera pivot
    pub fn handle_mouse_motion<H: PlayerHost>(&mut self, host: &mut H, relative: Vec2) {
        apply_mouse_motion(&mut self.state, relative, &self.config);
        host.apply_look(self.state.yaw, self.state.pitch);
    }

    /// Frame phase: только ui_cancel
    pub fn process<H: PlayerHost>(&mut self, host: &mut H, actions: &ActionState) {
        if actions.cancel && release_pointer(host) {
            crate::log_info("🖱️ Pointer released (ui_cancel)");
        }
    }

    /// Physics phase: выстрел + интеграция движения
    ///
    /// Выстрел обрабатывается ДО интеграции: в projectile уходит скорость,
    /// сохранённая предыдущим шагом.
    ///
    /// Возвращает id projectile, если в этом шаге был выстрел.
    pub fn physics_step<H: PlayerHost>(
        &mut self,
        host: &mut H,
        actions: &ActionState,
        delta: f32,
        now: Duration,
    ) -> Option<ProjectileId> {
        let fired = if actions.shoot {
            self.shoot(host, now)
        } else {
            None
        };

        let grounded = host.is_on_floor();
        let step = integrate_velocity(
            self.state.velocity,
            self.state.vertical_velocity,
            self.state.body_orientation(),
            actions,
            grounded,
            delta,
            &self.config,
        );

        self.state.vertical_velocity = step.vertical_velocity;
        self.state.velocity = host.move_and_slide(step.velocity, Vec3::Y, delta);

        fired
    }

    /// Удаляет projectiles с истёкшим lifetime
    ///
    /// После каждого удаления курсор захватывается снова, если был отпущен.
    /// Возвращает количество обработанных записей (включая уже удалённые снаружи).
    pub fn expire_projectiles<H: PlayerHost>(&mut self, host: &mut H, now: Duration) -> usize {
        if self.removals.is_empty() {
            return 0;
        }

        let expired = self.removals.pop_expired(now);

        for projectile in &expired {
            if !host.destroy_projectile(*projectile) {
                crate::log(&format!(
                    "Projectile {:?} already gone before its lifetime ended",
                    projectile
                ));
            }

            if recapture_pointer(host) {
                crate::log_info("🖱️ Pointer captured again after projectile removal");
            }
        }

        expired.len()
    }

    fn shoot<H: PlayerHost>(&mut self, host: &mut H, now: Duration) -> Option<ProjectileId> {
        let pose = host.spawn_point_pose();

        let Some(projectile) = host.spawn_projectile(pose) else {
            crate::log_warning("⚠️ Host failed to spawn projectile, shot skipped");
            return None;
        };

        let impulse = shot_impulse(&pose, self.config.shoot_power, self.state.velocity);
        host.apply_impulse(projectile, impulse);

        let deadline = now.saturating_add(self.config.projectile_lifetime());
        self.removals.schedule(projectile, deadline);

        crate::log(&format!(
            "🎯 Projectile {:?} fired: impulse {:?}, removal at {:.3}s",
            projectile,
            impulse,
            deadline.as_secs_f32()
        ));

        Some(projectile)
    }
}
