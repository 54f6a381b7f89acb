//! HeadlessHost — host без движка (плоский пол, баллистика projectiles)
//!
//! Используется в тестах и headless ECS loop.
//!
//! # Модель
//! - Пол: плоскость `position.dot(up) == floor_height`
//! - Slide-move: position += velocity * delta, на контакте с полом
//!   составляющая скорости "в пол" обнуляется
//! - Projectiles: velocity = impulse / mass, гравитация по `projectile_gravity`

use bevy::prelude::{Quat, Resource, Transform, Vec3};
use std::collections::BTreeMap;

use super::{PlayerHost, PointerMode, ProjectileId};

/// Допуск контакта с полом (метры)
const FLOOR_SNAP_DISTANCE: f32 = 1e-3;

/// Projectile в headless сцене
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessProjectile {
    pub pose: Transform,
    pub velocity: Vec3,
}

#[derive(Resource, Debug, Clone)]
pub struct HeadlessHost {
    /// Позиция body (мир)
    pub position: Vec3,
    /// Высота пола вдоль `up`
    pub floor_height: f32,
    pub(crate) on_floor: bool,

    /// Последние значения, выставленные через apply_look (градусы)
    pub body_yaw: f32,
    pub pivot_pitch: f32,

    /// Точка спавна в локальных координатах body
    pub spawn_point_offset: Vec3,
    /// Локальный поворот точки спавна (её -Y смотрит вперёд body)
    pub spawn_point_rotation: Quat,

    pub projectile_mass: f32,
    pub projectile_gravity: Vec3,
    pub(crate) projectiles: BTreeMap<ProjectileId, HeadlessProjectile>,
    pub(crate) next_projectile_id: u64,

    pub pointer_mode: PointerMode,

    /// Счётчики для тестов/отчёта
    pub spawned_total: usize,
    pub destroyed_total: usize,
}

impl Default for HeadlessHost {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            floor_height: 0.0,
            on_floor: true,
            body_yaw: 0.0,
            pivot_pitch: 0.0,
            spawn_point_offset: Vec3::new(0.0, 1.5, -1.0),
            // Поворот +90° вокруг X: local +Y → +Z, значит -Y смотрит в -Z (вперёд)
            spawn_point_rotation: Quat::from_rotation_x(std::f32::consts::FRAC_PI_2),
            projectile_mass: 1.0,
            projectile_gravity: Vec3::new(0.0, -9.8, 0.0),
            projectiles: BTreeMap::new(),
            next_projectile_id: 1,
            pointer_mode: PointerMode::Visible,
            spawned_total: 0,
            destroyed_total: 0,
        }
    }
}

impl HeadlessHost {
    /// Host с body в `position` (on_floor определяется по высоте)
    pub fn at(position: Vec3) -> Self {
        let mut host = Self {
            position,
            ..Self::default()
        };
        host.on_floor = host.height_above_floor(Vec3::Y) <= FLOOR_SNAP_DISTANCE;
        host
    }

    pub fn projectile(&self, id: ProjectileId) -> Option<&HeadlessProjectile> {
        self.projectiles.get(&id)
    }

    pub fn projectile_count(&self) -> usize {
        self.projectiles.len()
    }

    pub fn projectile_ids(&self) -> impl Iterator<Item = ProjectileId> + '_ {
        self.projectiles.keys().copied()
    }

    /// Удаление "снаружи" (например, projectile во что-то попал)
    pub fn remove_externally(&mut self, id: ProjectileId) -> bool {
        self.projectiles.remove(&id).is_some()
    }

    /// Баллистика всех projectiles за шаг
    pub fn step_projectiles(&mut self, delta: f32) {
        let gravity = self.projectile_gravity;
        for projectile in self.projectiles.values_mut() {
            projectile.velocity += gravity * delta;
            projectile.pose.translation += projectile.velocity * delta;
        }
    }

    fn body_rotation(&self) -> Quat {
        Quat::from_rotation_y(self.body_yaw.to_radians())
    }

    fn height_above_floor(&self, up: Vec3) -> f32 {
        self.position.dot(up) - self.floor_height
    }
}

impl PlayerHost for HeadlessHost {
    fn is_on_floor(&self) -> bool {
        self.on_floor
    }

    fn move_and_slide(&mut self, velocity: Vec3, up: Vec3, delta: f32) -> Vec3 {
        let up = up.normalize_or_zero();
        let mut velocity = velocity;

        self.position += velocity * delta.max(0.0);

        let height = self.height_above_floor(up);
        if height <= FLOOR_SNAP_DISTANCE {
            // Вытолкнуть на пол и погасить движение в пол
            self.position -= up * height;
            let into_floor = velocity.dot(up);
            if into_floor < 0.0 {
                velocity -= up * into_floor;
            }
            self.on_floor = true;
        } else {
            self.on_floor = false;
        }

        velocity
    }

    fn apply_look(&mut self, yaw: f32, pitch: f32) {
        self.body_yaw = yaw;
        self.pivot_pitch = pitch;
    }

    fn spawn_point_pose(&self) -> Transform {
        let body_rotation = self.body_rotation();
        Transform {
            translation: self.position + body_rotation * self.spawn_point_offset,
            rotation: body_rotation * self.spawn_point_rotation,
            scale: Vec3::ONE,
        }
    }

    fn spawn_projectile(&mut self, pose: Transform) -> Option<ProjectileId> {
        let id = ProjectileId(self.next_projectile_id);
        self.next_projectile_id += 1;

        self.projectiles.insert(
            id,
            HeadlessProjectile {
                pose,
                velocity: Vec3::ZERO,
            },
        );
        self.spawned_total += 1;

        Some(id)
    }

    fn apply_impulse(&mut self, projectile: ProjectileId, impulse: Vec3) {
        let mass = self.projectile_mass;
        if let Some(projectile) = self.projectiles.get_mut(&projectile) {
            projectile.velocity += impulse / mass;
        }
    }

    fn destroy_projectile(&mut self, projectile: ProjectileId) -> bool {
        let existed = self.projectiles.remove(&projectile).is_some();
        if existed {
            self.destroyed_total += 1;
        }
        existed
    }

    fn pointer_mode(&self) -> PointerMode {
        self.pointer_mode
    }

    fn set_pointer_mode(&mut self, mode: PointerMode) {
        self.pointer_mode = mode;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slide_keeps_body_on_floor() {
        let mut host = HeadlessHost::default();

        let velocity = host.move_and_slide(Vec3::new(3.0, -0.01, 0.0), Vec3::Y, 0.5);

        assert!(host.is_on_floor());
        assert_eq!(host.position.y, 0.0);
        assert!((host.position.x - 1.5).abs() < 1e-6);
        // Движение в пол погашено, горизонталь сохранена
        assert_eq!(velocity, Vec3::new(3.0, 0.0, 0.0));
    }

    #[test]
    fn test_leaves_floor_when_moving_up() {
        let mut host = HeadlessHost::default();

        let velocity = host.move_and_slide(Vec3::new(0.0, 20.0, 0.0), Vec3::Y, 1.0 / 60.0);

        assert!(!host.is_on_floor());
        assert_eq!(velocity.y, 20.0);
        assert!(host.position.y > 0.0);
    }

    #[test]
    fn test_at_detects_airborne_start() {
        assert!(!HeadlessHost::at(Vec3::new(0.0, 5.0, 0.0)).is_on_floor());
        assert!(HeadlessHost::at(Vec3::ZERO).is_on_floor());
    }

    #[test]
    fn test_spawn_point_faces_body_forward() {
        let host = HeadlessHost::default();
        let pose = host.spawn_point_pose();

        let shot_direction = -(pose.rotation * Vec3::Y);
        assert!((shot_direction - Vec3::NEG_Z).length() < 1e-5, "dir = {:?}", shot_direction);
    }

    #[test]
    fn test_destroy_is_idempotent() {
        let mut host = HeadlessHost::default();
        let id = host.spawn_projectile(Transform::IDENTITY).unwrap();

        assert!(host.destroy_projectile(id));
        assert!(!host.destroy_projectile(id));
        assert_eq!(host.destroyed_total, 1);
        assert_eq!(host.projectile_count(), 0);
    }

    #[test]
    fn test_impulse_on_destroyed_projectile_is_noop() {
        let mut host = HeadlessHost::default();
        let id = host.spawn_projectile(Transform::IDENTITY).unwrap();
        host.remove_externally(id);

        host.apply_impulse(id, Vec3::X * 10.0);
        assert!(host.projectile(id).is_none());
    }

    #[test]
    fn test_projectile_ballistics() {
        let mut host = HeadlessHost {
            projectile_mass: 2.0,
            ..HeadlessHost::default()
        };
        let id = host.spawn_projectile(Transform::IDENTITY).unwrap();
        host.apply_impulse(id, Vec3::new(0.0, 0.0, -40.0));

        host.step_projectiles(0.5);

        let projectile = host.projectile(id).unwrap();
        assert_eq!(projectile.velocity.z, -20.0);
        assert!(projectile.pose.translation.z < 0.0);
        assert!(projectile.pose.translation.y < 0.0);
    }
}
