//! Free-fly camera: position plus yaw/pitch with a derived basis.

use cgmath::{Angle, Deg, InnerSpace, Matrix4, Point3, Vector3};

use super::Camera;
use crate::transform;

/// Pitch bound keeping the look vector away from the world up axis, where
/// the view basis degenerates.
const PITCH_LIMIT: Deg<f32> = Deg(89.0);

/// First-person camera with yaw/pitch orientation.
///
/// Yaw 0 looks along +X; positive yaw turns toward +Z. Pitch is clamped to
/// (-89, 89) degrees - at exactly +/-90 the forward vector is parallel to
/// the up vector and the view matrix is undefined.
#[derive(Debug, Clone, Copy)]
pub struct FreeCamera {
    pub position: Point3<f32>,
    yaw: Deg<f32>,
    pitch: Deg<f32>,
}

impl FreeCamera {
    pub fn new(position: Point3<f32>) -> Self {
        Self {
            position,
            yaw: Deg(0.0),
            pitch: Deg(0.0),
        }
    }

    pub fn yaw(&self) -> Deg<f32> {
        self.yaw
    }

    pub fn pitch(&self) -> Deg<f32> {
        self.pitch
    }

    /// Turns the view. Pitch is clamped; yaw wraps freely.
    pub fn look(&mut self, delta_yaw: Deg<f32>, delta_pitch: Deg<f32>) {
        self.yaw += delta_yaw;
        self.pitch = Deg((self.pitch + delta_pitch).0.clamp(-PITCH_LIMIT.0, PITCH_LIMIT.0));
    }

    /// Unit vector the camera looks along.
    pub fn front(&self) -> Vector3<f32> {
        Vector3::new(
            self.yaw.cos() * self.pitch.cos(),
            self.pitch.sin(),
            self.yaw.sin() * self.pitch.cos(),
        )
    }

    /// Unit vector to the camera's right, horizontal by construction.
    pub fn right(&self) -> Vector3<f32> {
        self.front().cross(Vector3::unit_y()).normalize()
    }

    /// Camera-relative up (right x front).
    pub fn up(&self) -> Vector3<f32> {
        self.right().cross(self.front())
    }

    /// Walks along the horizontal projection of the view direction -
    /// ground movement ignores pitch, as in the maze demo.
    pub fn advance(&mut self, distance: f32) {
        let planar = Vector3::new(self.yaw.cos(), 0.0, self.yaw.sin());
        self.position += planar * distance;
    }

    /// Strafes along the right vector.
    pub fn strafe(&mut self, distance: f32) {
        self.position += self.right() * distance;
    }
}

impl Camera for FreeCamera {
    fn eye(&self) -> Point3<f32> {
        self.position
    }

    fn view_matrix(&self) -> Matrix4<f32> {
        transform::look_at(self.position, self.position + self.front(), Vector3::unit_y())
    }
}
