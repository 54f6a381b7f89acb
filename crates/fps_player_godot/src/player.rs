//! FpsPlayer — Godot node first-person игрока
//!
//! Hierarchy (player сцена):
//!   FpsPlayer (CharacterBody3D)
//!   ├─ CameraPivot (pitch)
//!   │  └─ CameraBoom
//!   │     └─ Camera
//!   └─ Shooter
//!      └─ BulletSpawnPoint
//!
//! Flow:
//! 1. ready() — exported свойства → MovementConfig, кэш nodes, capture курсора
//! 2. input() — mouse motion → yaw/pitch
//! 3. process() — ui_cancel
//! 4. physics_process() — shoot + движение + удаление истёкших projectiles

use std::time::Duration;

use bevy::prelude::Vec2;
use godot::classes::{
    CharacterBody3D, ICharacterBody3D, Input, InputEvent, InputEventMouseMotion, Node3D,
    PackedScene, ResourceLoader,
};
use godot::prelude::*;

use fps_player_simulation::{
    log_error, set_logger, ActionState, InputAction, MovementConfig, MovementController,
};

use crate::host::{GodotHost, PlayerNodes};
use crate::logger::GodotLogger;

#[derive(GodotClass)]
#[class(base=CharacterBody3D)]
pub struct FpsPlayer {
    base: Base<CharacterBody3D>,

    #[export]
    speed: f32,
    #[export]
    acceleration: f32,
    #[export]
    air_acceleration: f32,
    /// Вычитается из вертикальной скорости каждый physics step
    #[export]
    gravity: f32,
    #[export]
    max_terminal_velocity: f32,
    #[export]
    jump_power: f32,
    #[export]
    shoot_power: f32,
    #[export(range = (0.1, 1.0))]
    mouse_sensitivity: f32,
    #[export(range = (-90.0, 0.0))]
    min_pitch: f32,
    #[export(range = (0.0, 90.0))]
    max_pitch: f32,
    #[export]
    projectile_lifetime_secs: f32,
    #[export(file = "*.tscn")]
    bullet_scene: GString,

    // Runtime (заполняется в ready)
    controller: Option<MovementController>,
    nodes: Option<PlayerNodes>,
    /// Накопленное physics время (часы для lifetime projectiles)
    elapsed: Duration,
}

#[godot_api]
impl ICharacterBody3D for FpsPlayer {
    fn init(base: Base<CharacterBody3D>) -> Self {
        let defaults = MovementConfig::default();

        Self {
            base,
            speed: defaults.speed,
            acceleration: defaults.acceleration,
            air_acceleration: defaults.air_acceleration,
            gravity: defaults.gravity,
            max_terminal_velocity: defaults.max_terminal_velocity,
            jump_power: defaults.jump_power,
            shoot_power: defaults.shoot_power,
            mouse_sensitivity: defaults.mouse_sensitivity,
            min_pitch: defaults.min_pitch,
            max_pitch: defaults.max_pitch,
            projectile_lifetime_secs: defaults.projectile_lifetime_secs,
            bullet_scene: GString::from(defaults.projectile_template.as_str()),
            controller: None,
            nodes: None,
            elapsed: Duration::ZERO,
        }
    }

    fn ready(&mut self) {
        set_logger(Box::new(GodotLogger));

        let controller = match MovementController::new(self.movement_config()) {
            Ok(controller) => controller,
            Err(e) => {
                log_error(&format!("❌ FpsPlayer: invalid config: {}", e));
                return;
            }
        };

        let Some(camera_pivot) = self.base().try_get_node_as::<Node3D>("CameraPivot") else {
            log_error("❌ FpsPlayer: CameraPivot not found");
            return;
        };
        let Some(spawn_point) = self
            .base()
            .try_get_node_as::<Node3D>("Shooter/BulletSpawnPoint")
        else {
            log_error("❌ FpsPlayer: Shooter/BulletSpawnPoint not found");
            return;
        };

        let bullet_scene = self.load_bullet_scene();

        // Начальный look = rotation узлов в сцене
        let yaw = self.base().get_rotation_degrees().y;
        let pitch = camera_pivot.get_rotation_degrees().x;

        self.controller = Some(controller.with_look(yaw, pitch));
        self.nodes = Some(PlayerNodes::new(camera_pivot, spawn_point, bullet_scene));

        self.with_host(|controller, host| controller.ready(host));
    }

    fn input(&mut self, event: Gd<InputEvent>) {
        let Ok(motion) = event.try_cast::<InputEventMouseMotion>() else {
            return;
        };

        let relative = motion.get_relative();
        self.with_host(|controller, host| {
            controller.handle_mouse_motion(host, Vec2::new(relative.x, relative.y))
        });
    }

    fn process(&mut self, _delta: f64) {
        let actions = sample_actions();
        self.with_host(|controller, host| controller.process(host, &actions));
    }

    fn physics_process(&mut self, delta: f64) {
        self.elapsed += Duration::from_secs_f64(delta.max(0.0));
        let now = self.elapsed;
        let actions = sample_actions();

        self.with_host(|controller, host| {
            controller.physics_step(host, &actions, delta as f32, now);
            controller.expire_projectiles(host, now);
        });
    }
}

impl FpsPlayer {
    fn movement_config(&self) -> MovementConfig {
        MovementConfig {
            speed: self.speed,
            acceleration: self.acceleration,
            air_acceleration: self.air_acceleration,
            gravity: self.gravity,
            max_terminal_velocity: self.max_terminal_velocity,
            jump_power: self.jump_power,
            shoot_power: self.shoot_power,
            mouse_sensitivity: self.mouse_sensitivity,
            min_pitch: self.min_pitch,
            max_pitch: self.max_pitch,
            projectile_lifetime_secs: self.projectile_lifetime_secs,
            projectile_template: self.bullet_scene.to_string(),
        }
    }

    fn load_bullet_scene(&self) -> Option<Gd<PackedScene>> {
        let mut loader = ResourceLoader::singleton();
        let Some(resource) = loader.load_ex(&self.bullet_scene).done() else {
            log_error(&format!("❌ Failed to load bullet scene: {}", self.bullet_scene));
            return None;
        };

        match resource.try_cast::<PackedScene>() {
            Ok(scene) => Some(scene),
            Err(_) => {
                log_error(&format!("❌ Not a PackedScene: {}", self.bullet_scene));
                None
            }
        }
    }

    /// Controller + host на время callback'а (None до успешного ready)
    fn with_host<R>(
        &mut self,
        f: impl FnOnce(&mut MovementController, &mut GodotHost<'_>) -> R,
    ) -> Option<R> {
        let body: Gd<CharacterBody3D> = self.base().clone();
        let (Some(controller), Some(nodes)) = (self.controller.as_mut(), self.nodes.as_mut()) else {
            return None;
        };

        let mut host = GodotHost { body, nodes };
        Some(f(controller, &mut host))
    }
}

/// Snapshot input map: held для движения, just_pressed для edges
fn sample_actions() -> ActionState {
    let input = Input::singleton();
    let mut actions = ActionState::default();

    for action in InputAction::ALL {
        let active = if action.is_edge() {
            input.is_action_just_pressed(action.name())
        } else {
            input.is_action_pressed(action.name())
        };
        actions.set(action, active);
    }

    actions
}
