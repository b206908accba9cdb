// Matrix builders for COLLADA transform elements
//
// glam covers translate, scale and axis-angle rotation directly. The remaining
// element kinds (<matrix>, <lookat>, <skew>) need their own constructors.

use glam::{Mat3, Mat4, Vec3, Vec4};

/// Extension trait for Mat4 with the COLLADA-specific constructors.
pub trait Mat4Ext {
    /// Build a matrix from 16 values in row-major order, as `<matrix>` stores them.
    fn from_row_major(values: &[f32; 16]) -> Self;

    /// Build the frame of a camera at `eye` looking at `center`.
    ///
    /// The columns are (right, up, -forward, eye), so the matrix maps camera
    /// space into the parent space. `up` is re-orthogonalized against the
    /// viewing direction.
    fn look_at_frame(eye: Vec3, center: Vec3, up: Vec3) -> Self;

    /// Build a RenderMan-style skew.
    ///
    /// Points are displaced along `translation_axis` by `tan(angle) * (p · rotation_axis)`.
    /// Both axes are normalized first; a zero axis yields the identity.
    fn skew(angle_degrees: f32, rotation_axis: Vec3, translation_axis: Vec3) -> Self;
}

impl Mat4Ext for Mat4 {
    fn from_row_major(values: &[f32; 16]) -> Self {
        Mat4::from_cols_array(values).transpose()
    }

    fn look_at_frame(eye: Vec3, center: Vec3, up: Vec3) -> Self {
        let forward = (center - eye).normalize_or_zero();
        if forward == Vec3::ZERO {
            return Mat4::from_translation(eye);
        }

        let mut right = forward.cross(up).normalize_or_zero();
        if right == Vec3::ZERO {
            // up is parallel to the viewing direction
            right = forward.any_orthonormal_vector();
        }
        let true_up = right.cross(forward);

        Mat4::from_cols(
            right.extend(0.0),
            true_up.extend(0.0),
            (-forward).extend(0.0),
            Vec4::new(eye.x, eye.y, eye.z, 1.0),
        )
    }

    fn skew(angle_degrees: f32, rotation_axis: Vec3, translation_axis: Vec3) -> Self {
        let a = rotation_axis.normalize_or_zero();
        let t = translation_axis.normalize_or_zero();
        let s = angle_degrees.to_radians().tan();

        let shear = Mat3::from_cols(
            Vec3::X + t * (s * a.x),
            Vec3::Y + t * (s * a.y),
            Vec3::Z + t * (s * a.z),
        );
        Mat4::from_mat3(shear)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_row_major_translation() {
        // Translation lives in the last column of a row-major matrix
        let values = [
            1.0, 0.0, 0.0, 5.0, //
            0.0, 1.0, 0.0, 6.0, //
            0.0, 0.0, 1.0, 7.0, //
            0.0, 0.0, 0.0, 1.0,
        ];
        let mat = Mat4::from_row_major(&values);

        assert_eq!(mat.transform_point3(Vec3::ZERO), Vec3::new(5.0, 6.0, 7.0));
        assert_eq!(mat, Mat4::from_translation(Vec3::new(5.0, 6.0, 7.0)));
    }

    #[test]
    fn test_look_at_frame_places_eye() {
        let eye = Vec3::new(0.0, 0.0, 10.0);
        let mat = Mat4::look_at_frame(eye, Vec3::ZERO, Vec3::Y);

        // Camera origin maps to the eye position
        assert!((mat.transform_point3(Vec3::ZERO) - eye).length() < 0.001);

        // Camera -Z points at the target
        let forward = mat.transform_vector3(-Vec3::Z);
        assert!((forward - Vec3::new(0.0, 0.0, -1.0)).length() < 0.001);
    }

    #[test]
    fn test_look_at_frame_matches_glam_view_inverse() {
        let eye = Vec3::new(3.0, 4.0, 5.0);
        let center = Vec3::new(-1.0, 0.5, 2.0);
        let frame = Mat4::look_at_frame(eye, center, Vec3::Y);
        let view = Mat4::look_at_rh(eye, center, Vec3::Y);

        assert!(frame.abs_diff_eq(view.inverse(), 0.001));
    }

    #[test]
    fn test_look_at_frame_parallel_up() {
        let mat = Mat4::look_at_frame(Vec3::ZERO, Vec3::Y, Vec3::Y);
        assert!(mat.is_finite());
    }

    #[test]
    fn test_skew_shears_along_translation_axis() {
        let mat = Mat4::skew(45.0, Vec3::Y, Vec3::X);
        let p = mat.transform_point3(Vec3::new(0.0, 1.0, 0.0));

        assert!((p - Vec3::new(1.0, 1.0, 0.0)).length() < 0.001);

        // Points with no component along the rotation axis stay put
        let q = mat.transform_point3(Vec3::new(0.0, 0.0, 2.0));
        assert!((q - Vec3::new(0.0, 0.0, 2.0)).length() < 0.001);
    }

    #[test]
    fn test_skew_zero_axis_is_identity() {
        let mat = Mat4::skew(30.0, Vec3::ZERO, Vec3::X);
        assert!(mat.abs_diff_eq(Mat4::IDENTITY, 0.0001));
    }
}
