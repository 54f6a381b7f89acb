//! Host interface — всё, что контроллер просит у движка
//!
//! # Архитектура
//!
//! Контроллер (strategic) не владеет scene graph, физикой и input state.
//! Host (tactical: Godot CharacterBody3D или headless симуляция) даёт узкий интерфейс:
//! floor detection, slide-move, transform nodes для look, spawn/impulse/destroy
//! projectiles, pointer capture.
//!
//! Реализации:
//! - `HeadlessHost` — плоский пол + баллистика projectiles (тесты, headless loop)
//! - `GodotHost` — в crate `fps_player_godot`

pub mod headless;

pub use headless::{HeadlessHost, HeadlessProjectile};

use bevy::prelude::{Transform, Vec3};

/// Opaque handle projectile, выданный host'ом
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProjectileId(pub u64);

/// Режим курсора
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerMode {
    /// Курсор скрыт и захвачен окном (mouse look активен)
    #[default]
    Captured,
    /// Курсор виден и свободен
    Visible,
}

/// Возможности host'а, которые использует `MovementController`
pub trait PlayerHost {
    /// Стоит ли body на полу (по результату последнего slide-move)
    fn is_on_floor(&self) -> bool;

    /// Двигает body со скоростью `velocity`, скользя вдоль поверхностей
    ///
    /// `up` — нормаль пола. `delta` нужен host'ам без собственного physics clock
    /// (Godot берёт delta сам и игнорирует аргумент).
    /// Возвращает скорость после коллизий.
    fn move_and_slide(&mut self, velocity: Vec3, up: Vec3, delta: f32) -> Vec3;

    /// Выставляет yaw body и pitch camera pivot (градусы)
    fn apply_look(&mut self, yaw: f32, pitch: f32);

    /// Мировой pose точки спавна projectile
    fn spawn_point_pose(&self) -> Transform;

    /// Инстанцирует projectile из шаблона в корне сцены с заданным pose
    ///
    /// `None` — host не смог создать entity (ошибка логируется host'ом).
    fn spawn_projectile(&mut self, pose: Transform) -> Option<ProjectileId>;

    /// Мгновенный impulse (no-op для уже удалённого projectile)
    fn apply_impulse(&mut self, projectile: ProjectileId, impulse: Vec3);

    /// Удаляет projectile
    ///
    /// Идемпотентно: повторный вызов (или удалённый снаружи projectile) — no-op.
    /// Возвращает `true`, если projectile был жив.
    fn destroy_projectile(&mut self, projectile: ProjectileId) -> bool;

    fn pointer_mode(&self) -> PointerMode;

    fn set_pointer_mode(&mut self, mode: PointerMode);
}
