/// Viewer rotation state and rotation matrices
use nalgebra::{Matrix3, Point3};

/// Rotation of the model in degrees. Pitch turns about the X axis, yaw
/// about the Y axis. Angles are never clamped or wrapped.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RotationState {
    pub pitch: f64,
    pub yaw: f64,
}

impl RotationState {
    pub fn new(pitch: f64, yaw: f64) -> Self {
        Self { pitch, yaw }
    }

    pub fn zero() -> Self {
        Self::default()
    }

    /// Apply a pointer drag. Vertical motion pitches, horizontal motion yaws.
    pub fn drag(&mut self, dx: f64, dy: f64, sensitivity: f64) {
        self.pitch += dy * sensitivity;
        self.yaw += dx * sensitivity;
    }

    pub fn reset(&mut self) {
        *self = Self::zero();
    }
}

/// Rotation matrix builders
pub struct Transform;

impl Transform {
    /// Rotation about Y taking +x toward +z for positive yaw
    pub fn yaw_matrix(yaw_deg: f64) -> Matrix3<f64> {
        let (s, c) = yaw_deg.to_radians().sin_cos();
        Matrix3::new(
            c, 0.0, -s, //
            0.0, 1.0, 0.0, //
            s, 0.0, c,
        )
    }

    /// Rotation about X taking +y toward +z for positive pitch
    pub fn pitch_matrix(pitch_deg: f64) -> Matrix3<f64> {
        let (s, c) = pitch_deg.to_radians().sin_cos();
        Matrix3::new(
            1.0, 0.0, 0.0, //
            0.0, c, -s, //
            0.0, s, c,
        )
    }

    /// Yaw first, then pitch
    pub fn rotation_matrix(rotation: &RotationState) -> Matrix3<f64> {
        Self::pitch_matrix(rotation.pitch) * Self::yaw_matrix(rotation.yaw)
    }

    pub fn rotate(point: &Point3<f64>, rotation: &RotationState) -> Point3<f64> {
        Self::rotation_matrix(rotation) * point
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drag_scaling() {
        let mut state = RotationState::zero();
        state.drag(10.0, -4.0, 0.5);
        assert!((state.yaw - 5.0).abs() < 1e-12);
        assert!((state.pitch + 2.0).abs() < 1e-12);

        state.drag(1000.0, 0.0, 0.5);
        assert!((state.yaw - 505.0).abs() < 1e-9);

        state.reset();
        assert_eq!(state, RotationState::zero());
    }

    #[test]
    fn test_identity_rotation() {
        let matrix = Transform::rotation_matrix(&RotationState::zero());
        assert!((matrix - Matrix3::identity()).norm() < 1e-12);
    }

    #[test]
    fn test_yaw_quarter_turn() {
        let p = Transform::rotate(&Point3::new(1.0, 0.0, 0.0), &RotationState::new(0.0, 90.0));
        assert!(p.x.abs() < 1e-12);
        assert!((p.z - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_pitch_after_yaw() {
        // (0, 0, 1) yawed 90 lands on -x; pitch must leave it there
        let p = Transform::rotate(&Point3::new(0.0, 0.0, 1.0), &RotationState::new(45.0, 90.0));
        assert!((p.x + 1.0).abs() < 1e-12);
        assert!(p.y.abs() < 1e-12);
        assert!(p.z.abs() < 1e-12);
    }
}
