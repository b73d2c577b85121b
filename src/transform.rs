//! # Transform Algebra
//!
//! Pure constructors for the 4x4 homogeneous matrices everything else in the
//! crate composes: translation, non-uniform scale, axis-angle rotation,
//! pivot rotation, look-at view matrices and perspective projection, plus the
//! inverse-transpose normal matrix used by the lighting model.
//!
//! All functions are stateless and return plain [`cgmath::Matrix4`] values.
//! The composition convention throughout the crate is right-multiplication:
//! `world = parent_world * local`, and a point in local space maps to world
//! space via `world * point`. The innermost transform of a product is applied
//! first.

use cgmath::{InnerSpace, Matrix, Matrix3, Matrix4, Point3, Rad, SquareMatrix, Vector3};

/// Builds a translation matrix.
pub fn translate(x: f32, y: f32, z: f32) -> Matrix4<f32> {
    Matrix4::from_translation(Vector3::new(x, y, z))
}

/// Builds a non-uniform scale matrix.
pub fn scale(sx: f32, sy: f32, sz: f32) -> Matrix4<f32> {
    Matrix4::from_nonuniform_scale(sx, sy, sz)
}

/// Builds a uniform scale matrix.
pub fn uniform_scale(s: f32) -> Matrix4<f32> {
    Matrix4::from_scale(s)
}

/// Builds a rotation of `angle` around an arbitrary `axis`.
///
/// The axis does not need to be normalized. A zero-length axis yields the
/// identity matrix rather than an error: in a real-time loop a momentarily
/// degenerate input must not halt the caller mid-frame.
pub fn rotate<A: Into<Rad<f32>>>(angle: A, axis: Vector3<f32>) -> Matrix4<f32> {
    let len2 = axis.magnitude2();
    if len2 <= f32::EPSILON {
        return Matrix4::identity();
    }
    Matrix4::from_axis_angle(axis / len2.sqrt(), angle)
}

/// Builds a rotation of `angle` around `axis` through an arbitrary `pivot`
/// point instead of the local origin.
///
/// Composed as `T(pivot) * R * T(-pivot)`, so the pivot itself is a fixed
/// point of the result. This is how geometry with an asset-dependent origin
/// (wheels, door panels) is hinged at the right place.
pub fn rotate_about<A: Into<Rad<f32>>>(
    angle: A,
    axis: Vector3<f32>,
    pivot: Point3<f32>,
) -> Matrix4<f32> {
    let offset = Vector3::new(pivot.x, pivot.y, pivot.z);
    Matrix4::from_translation(offset) * rotate(angle, axis) * Matrix4::from_translation(-offset)
}

/// Builds a right-handed view matrix looking from `eye` toward `target`.
///
/// The camera basis is forward = normalize(target - eye),
/// right = normalize(forward x up), true-up = right x forward; the result is
/// that rotation combined with a translation by `-eye`.
///
/// Degenerate when forward is parallel to `up` - the result is undefined and
/// callers must avoid that configuration (the free-fly camera clamps pitch
/// for exactly this reason).
pub fn look_at(eye: Point3<f32>, target: Point3<f32>, up: Vector3<f32>) -> Matrix4<f32> {
    let f = (target - eye).normalize();
    let s = f.cross(up.normalize()).normalize();
    let u = s.cross(f);

    let eye_v = Vector3::new(eye.x, eye.y, eye.z);
    #[rustfmt::skip]
    let m = Matrix4::new(
        s.x, u.x, -f.x, 0.0,
        s.y, u.y, -f.y, 0.0,
        s.z, u.z, -f.z, 0.0,
        -s.dot(eye_v), -u.dot(eye_v), f.dot(eye_v), 1.0,
    );
    m
}

/// Builds a symmetric-frustum perspective projection.
///
/// Maps the view frustum to OpenGL-style clip space (z in [-1, 1] after the
/// perspective divide). No validation is performed: callers must supply
/// `0 < znear < zfar` and `aspect > 0`, otherwise the result is
/// non-invertible or NaN-laden. Validating every frame would cost more than
/// the guarantee is worth, so the contract lives with the caller.
pub fn perspective<A: Into<Rad<f32>>>(fovy: A, aspect: f32, znear: f32, zfar: f32) -> Matrix4<f32> {
    let f = 1.0 / (fovy.into().0 / 2.0).tan();
    #[rustfmt::skip]
    let m = Matrix4::new(
        f / aspect, 0.0, 0.0, 0.0,
        0.0, f, 0.0, 0.0,
        0.0, 0.0, (zfar + znear) / (znear - zfar), -1.0,
        0.0, 0.0, (2.0 * zfar * znear) / (znear - zfar), 0.0,
    );
    m
}

/// Computes the normal matrix of `m`: the inverse-transpose of its upper-left
/// 3x3 block.
///
/// Transforming normals by this matrix keeps them perpendicular to surfaces
/// under non-uniform scale, where the plain upper-left block would skew them.
/// Returns `None` when the block is singular; node local transforms are
/// required to keep it invertible, so `None` here means the caller broke that
/// invariant.
pub fn normal_matrix(m: &Matrix4<f32>) -> Option<Matrix3<f32>> {
    let upper = Matrix3::from_cols(m.x.truncate(), m.y.truncate(), m.z.truncate());
    upper.invert().map(|inv| inv.transpose())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{Deg, Transform, Vector4};

    const EPS: f32 = 1e-5;

    fn assert_mat4_near(a: &Matrix4<f32>, b: &Matrix4<f32>) {
        for c in 0..4 {
            for r in 0..4 {
                assert!(
                    (a[c][r] - b[c][r]).abs() < EPS,
                    "matrices differ at [{}][{}]: {} vs {}",
                    c,
                    r,
                    a[c][r],
                    b[c][r]
                );
            }
        }
    }

    fn assert_point_near(a: Point3<f32>, b: Point3<f32>) {
        assert!(
            (a.x - b.x).abs() < EPS && (a.y - b.y).abs() < EPS && (a.z - b.z).abs() < EPS,
            "points differ: {:?} vs {:?}",
            a,
            b
        );
    }

    #[test]
    fn test_translate_entries() {
        let m = translate(1.0, 2.0, 3.0);
        assert_eq!(m.w.truncate(), Vector3::new(1.0, 2.0, 3.0));
        assert_point_near(
            m.transform_point(Point3::new(0.0, 0.0, 0.0)),
            Point3::new(1.0, 2.0, 3.0),
        );
    }

    #[test]
    fn test_scale_entries() {
        let m = scale(2.0, 3.0, 4.0);
        assert_point_near(
            m.transform_point(Point3::new(1.0, 1.0, 1.0)),
            Point3::new(2.0, 3.0, 4.0),
        );
    }

    #[test]
    fn test_rotate_then_unrotate_is_identity() {
        let axis = Vector3::new(0.3, 1.0, -0.2);
        let m = rotate(Deg(73.0), axis) * rotate(Deg(-73.0), axis);
        assert_mat4_near(&m, &Matrix4::identity());
    }

    #[test]
    fn test_rotate_zero_axis_falls_back_to_identity() {
        let m = rotate(Deg(45.0), Vector3::new(0.0, 0.0, 0.0));
        assert_eq!(m, Matrix4::identity());
    }

    #[test]
    fn test_rotate_accepts_unnormalized_axis() {
        let a = rotate(Deg(30.0), Vector3::new(0.0, 10.0, 0.0));
        let b = rotate(Deg(30.0), Vector3::new(0.0, 1.0, 0.0));
        assert_mat4_near(&a, &b);
    }

    #[test]
    fn test_pivot_rotation_fixes_the_pivot() {
        let pivot = Point3::new(1.5, -2.0, 4.0);
        for angle in [0.0, 30.0, 90.0, 123.0, 280.0] {
            let m = rotate_about(Deg(angle), Vector3::new(0.2, 1.0, 0.7), pivot);
            assert_point_near(m.transform_point(pivot), pivot);
        }
    }

    #[test]
    fn test_look_at_maps_eye_to_origin() {
        let eye = Point3::new(3.0, 4.0, 5.0);
        let view = look_at(eye, Point3::new(0.0, 0.0, 0.0), Vector3::unit_y());
        assert_point_near(view.transform_point(eye), Point3::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn test_look_at_puts_target_on_negative_z() {
        let view = look_at(
            Point3::new(0.0, 0.0, 5.0),
            Point3::new(0.0, 0.0, 0.0),
            Vector3::unit_y(),
        );
        assert_point_near(
            view.transform_point(Point3::new(0.0, 0.0, 0.0)),
            Point3::new(0.0, 0.0, -5.0),
        );
    }

    #[test]
    fn test_perspective_maps_near_and_far_planes() {
        let proj = perspective(Deg(60.0), 16.0 / 9.0, 0.1, 100.0);

        let near = proj * Vector4::new(0.0, 0.0, -0.1, 1.0);
        assert!((near.z / near.w - -1.0).abs() < EPS);

        let far = proj * Vector4::new(0.0, 0.0, -100.0, 1.0);
        assert!((far.z / far.w - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_normal_matrix_counters_nonuniform_scale() {
        let n = normal_matrix(&scale(2.0, 1.0, 1.0)).unwrap();
        let transformed = n * Vector3::new(1.0, 0.0, 0.0);
        assert!((transformed.x - 0.5).abs() < EPS);
        assert!((transformed.y).abs() < EPS);
        assert!((transformed.z).abs() < EPS);
    }

    #[test]
    fn test_normal_matrix_rejects_singular_block() {
        assert!(normal_matrix(&scale(0.0, 1.0, 1.0)).is_none());
    }

    #[test]
    fn test_composition_applies_innermost_first() {
        // rotate in the local frame first, then translate.
        let m = translate(5.0, 0.0, 0.0) * rotate(Deg(90.0), Vector3::unit_y());
        assert_point_near(
            m.transform_point(Point3::new(1.0, 0.0, 0.0)),
            Point3::new(5.0, 0.0, -1.0),
        );
    }
}
