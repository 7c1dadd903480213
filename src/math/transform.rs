use glam::{Mat3, Mat4, Vec3};
use nalgebra::DMatrix;

/// Rigid frame helpers shared by joints and the arm.
pub struct Frame;

impl Frame {
    /// Translation by a body's length along the local x-axis.
    pub fn body_translation(length: f32) -> Mat4 {
        Mat4::from_translation(Vec3::new(length, 0.0, 0.0))
    }

    /// The vector a body of `length` spans in its joint's frame.
    pub fn body_vector(length: f32) -> Vec3 {
        Vec3::new(length, 0.0, 0.0)
    }

    /// Upper-left 3x3 block of a homogeneous transform.
    pub fn rotation_part(transform: &Mat4) -> Mat3 {
        Mat3::from_mat4(*transform)
    }

    /// Applies `transform` to the homogeneous origin and drops the w component.
    pub fn origin(transform: &Mat4) -> Vec3 {
        (*transform * Vec3::ZERO.extend(1.0)).truncate()
    }

    /// Writes `column` into `matrix` at `index`.
    pub fn write_column(matrix: &mut DMatrix<f32>, index: usize, column: Vec3) {
        matrix[(0, index)] = column.x;
        matrix[(1, index)] = column.y;
        matrix[(2, index)] = column.z;
    }
}

/// Pulls `target` onto the sphere of radius `reach` around the origin when it
/// lies outside it. Points inside the sphere are returned untouched.
pub fn clamp_to_reach(target: Vec3, reach: f32) -> Vec3 {
    let distance = target.length();
    if distance > reach && distance > 0.0 {
        target * (reach / distance)
    } else {
        target
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn clamp_lands_on_sphere() {
        let clamped = clamp_to_reach(Vec3::new(3.0, 4.0, 0.0), 2.0);
        assert_abs_diff_eq!(clamped.length(), 2.0, epsilon = 1e-5);
        assert_abs_diff_eq!(clamped.x / clamped.y, 0.75, epsilon = 1e-5);
    }

    #[test]
    fn clamp_is_idempotent() {
        let once = clamp_to_reach(Vec3::new(-5.0, 1.0, 2.5), 1.5);
        let twice = clamp_to_reach(once, 1.5);
        assert_abs_diff_eq!(once.distance(twice), 0.0, epsilon = 1e-5);
        assert_abs_diff_eq!(twice.length(), 1.5, epsilon = 1e-5);
    }

    #[test]
    fn clamp_leaves_reachable_points() {
        let p = Vec3::new(0.3, -0.2, 0.1);
        assert_eq!(clamp_to_reach(p, 1.0), p);
    }

    #[test]
    fn origin_of_body_translation_is_length() {
        let m = Frame::body_translation(0.7) * Frame::body_translation(0.3);
        assert_abs_diff_eq!(Frame::origin(&m).x, 1.0, epsilon = 1e-6);
    }
}
