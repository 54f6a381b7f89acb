//! GodotHost — PlayerHost поверх CharacterBody3D + scene tree
//!
//! Projectiles = RigidBody3D instances шаблона (Bullet.tscn), добавляются в root сцены.
//! Registry ProjectileId → Gd<RigidBody3D> живёт в `PlayerNodes`.

use std::collections::HashMap;

use bevy::prelude::{Transform, Vec3};
use godot::classes::{input, CharacterBody3D, Input, Node, Node3D, PackedScene, RigidBody3D};
use godot::prelude::*;

use fps_player_simulation::{log_error, PlayerHost, PointerMode, ProjectileId};

use crate::convert::{from_godot_transform, from_godot_vec, to_godot_transform, to_godot_vec};

/// Кэш nodes player сцены (заполняется в ready)
pub struct PlayerNodes {
    pub camera_pivot: Gd<Node3D>,
    pub spawn_point: Gd<Node3D>,
    /// None → шаблон не загрузился, выстрелы ничего не спавнят
    pub bullet_scene: Option<Gd<PackedScene>>,
    pub projectiles: HashMap<ProjectileId, Gd<RigidBody3D>>,
    pub next_id: u64,
}

impl PlayerNodes {
    pub fn new(
        camera_pivot: Gd<Node3D>,
        spawn_point: Gd<Node3D>,
        bullet_scene: Option<Gd<PackedScene>>,
    ) -> Self {
        Self {
            camera_pivot,
            spawn_point,
            bullet_scene,
            projectiles: HashMap::new(),
            next_id: 1,
        }
    }
}

/// Host на время одного callback'а (body + borrowed nodes)
pub struct GodotHost<'a> {
    pub body: Gd<CharacterBody3D>,
    pub nodes: &'a mut PlayerNodes,
}

impl PlayerHost for GodotHost<'_> {
    fn is_on_floor(&self) -> bool {
        self.body.is_on_floor()
    }

    fn move_and_slide(&mut self, velocity: Vec3, up: Vec3, _delta: f32) -> Vec3 {
        // CharacterBody3D сам берёт physics delta
        self.body.set_up_direction(to_godot_vec(up));
        self.body.set_velocity(to_godot_vec(velocity));
        self.body.move_and_slide();
        from_godot_vec(self.body.get_velocity())
    }

    fn apply_look(&mut self, yaw: f32, pitch: f32) {
        let mut body_rotation = self.body.get_rotation_degrees();
        body_rotation.y = yaw;
        self.body.set_rotation_degrees(body_rotation);

        let pivot = &mut self.nodes.camera_pivot;
        let mut pivot_rotation = pivot.get_rotation_degrees();
        pivot_rotation.x = pitch;
        pivot.set_rotation_degrees(pivot_rotation);
    }

    fn spawn_point_pose(&self) -> Transform {
        from_godot_transform(self.nodes.spawn_point.get_global_transform())
    }

    fn spawn_projectile(&mut self, pose: Transform) -> Option<ProjectileId> {
        let scene = self.nodes.bullet_scene.as_ref()?;

        let Some(instance) = scene.instantiate() else {
            log_error("❌ Failed to instantiate bullet scene");
            return None;
        };

        let mut bullet = match instance.try_cast::<RigidBody3D>() {
            Ok(bullet) => bullet,
            Err(mut node) => {
                log_error("❌ Bullet scene root is not a RigidBody3D");
                node.queue_free();
                return None;
            }
        };

        let Some(mut root) = self.body.get_tree().and_then(|tree| tree.get_root()) else {
            log_error("❌ Scene root not found, bullet dropped");
            bullet.queue_free();
            return None;
        };

        root.add_child(&bullet.clone().upcast::<Node>());
        bullet.set_global_transform(to_godot_transform(&pose));

        let id = ProjectileId(self.nodes.next_id);
        self.nodes.next_id += 1;
        self.nodes.projectiles.insert(id, bullet);

        Some(id)
    }

    fn apply_impulse(&mut self, projectile: ProjectileId, impulse: Vec3) {
        if let Some(bullet) = self.nodes.projectiles.get_mut(&projectile) {
            if bullet.is_instance_valid() {
                bullet.apply_impulse(to_godot_vec(impulse));
            }
        }
    }

    fn destroy_projectile(&mut self, projectile: ProjectileId) -> bool {
        let Some(mut bullet) = self.nodes.projectiles.remove(&projectile) else {
            return false;
        };

        // Мог быть уже удалён сценой (столкновение, смена уровня)
        if !bullet.is_instance_valid() {
            return false;
        }

        bullet.queue_free();
        true
    }

    fn pointer_mode(&self) -> PointerMode {
        if Input::singleton().get_mouse_mode() == input::MouseMode::CAPTURED {
            PointerMode::Captured
        } else {
            PointerMode::Visible
        }
    }

    fn set_pointer_mode(&mut self, mode: PointerMode) {
        let mouse_mode = match mode {
            PointerMode::Captured => input::MouseMode::CAPTURED,
            PointerMode::Visible => input::MouseMode::VISIBLE,
        };
        Input::singleton().set_mouse_mode(mouse_mode);
    }
}
