//! Orbit camera: circles a center point at a fixed radius and height.

use cgmath::{Angle, Deg, Matrix4, Point3, Vector3};

use super::Camera;
use crate::transform;

/// Camera orbiting a center point.
///
/// The eye sits on a circle of `radius` around `center`, lifted by
/// `height`, at azimuth `angle`. Updating `center` every frame makes the
/// camera follow a moving target.
#[derive(Debug, Clone, Copy)]
pub struct OrbitCamera {
    pub center: Point3<f32>,
    pub radius: f32,
    pub height: f32,
    pub angle: Deg<f32>,
    pub up: Vector3<f32>,
}

impl OrbitCamera {
    pub fn new(radius: f32, height: f32) -> Self {
        Self {
            center: Point3::new(0.0, 0.0, 0.0),
            radius,
            height,
            angle: Deg(0.0),
            up: Vector3::unit_y(),
        }
    }

    /// Advances the azimuth angle.
    pub fn rotate(&mut self, delta: Deg<f32>) {
        self.angle += delta;
    }

    /// Scales the orbit radius, clamped to [1, 100] so the camera can
    /// neither enter the target nor drift out of the scene.
    pub fn zoom(&mut self, factor: f32) {
        self.radius = (self.radius * factor).clamp(1.0, 100.0);
    }
}

impl Camera for OrbitCamera {
    fn eye(&self) -> Point3<f32> {
        Point3::new(
            self.center.x + self.radius * self.angle.sin(),
            self.center.y + self.height,
            self.center.z + self.radius * self.angle.cos(),
        )
    }

    fn view_matrix(&self) -> Matrix4<f32> {
        transform::look_at(self.eye(), self.center, self.up)
    }
}
