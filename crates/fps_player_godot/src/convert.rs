//! Конвертация bevy math ↔ Godot builtins
//!
//! Обе стороны: right-handed, +Y вверх, forward = -Z, поэтому только перепаковка.

use bevy::prelude::{Mat4, Transform, Vec3};
use godot::prelude::{Basis, Transform3D, Vector3};

pub fn to_godot_vec(v: Vec3) -> Vector3 {
    Vector3::new(v.x, v.y, v.z)
}

pub fn from_godot_vec(v: Vector3) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

/// Godot Transform3D (basis columns = local axes) → bevy Transform
pub fn from_godot_transform(transform: Transform3D) -> Transform {
    let basis = transform.basis;
    let matrix = Mat4::from_cols(
        from_godot_vec(basis.col_a()).extend(0.0),
        from_godot_vec(basis.col_b()).extend(0.0),
        from_godot_vec(basis.col_c()).extend(0.0),
        from_godot_vec(transform.origin).extend(1.0),
    );
    Transform::from_matrix(matrix)
}

pub fn to_godot_transform(transform: &Transform) -> Transform3D {
    let matrix = transform.compute_matrix();
    let basis = Basis::from_cols(
        to_godot_vec(matrix.x_axis.truncate()),
        to_godot_vec(matrix.y_axis.truncate()),
        to_godot_vec(matrix.z_axis.truncate()),
    );
    Transform3D::new(basis, to_godot_vec(transform.translation))
}
