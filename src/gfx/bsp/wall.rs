//! Wall segments and their splitting planes.

use cgmath::{InnerSpace, Matrix4, Rad, Vector2, Vector3};

use crate::gfx::scene::Material;
use crate::transform;

/// Rotates a 2D vector 90 degrees clockwise.
fn perp_right(v: Vector2<f32>) -> Vector2<f32> {
    Vector2::new(v.y, -v.x)
}

fn normalize_or_zero(v: Vector2<f32>) -> Vector2<f32> {
    let len = v.magnitude();
    if len > 1e-8 {
        v / len
    } else {
        Vector2::new(0.0, 0.0)
    }
}

/// An infinite splitting line in the XZ plane: a point on the line and its
/// unit normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitPlane {
    pub point: Vector2<f32>,
    pub normal: Vector2<f32>,
}

impl SplitPlane {
    /// Signed distance of `p` from the plane: positive on the normal's
    /// side, negative behind, zero on the line.
    pub fn side_of(&self, p: Vector2<f32>) -> f32 {
        (p - self.point).dot(self.normal)
    }
}

/// A 2D wall segment, extruded to a fixed-height panel at render time.
///
/// Coordinates are (x, z); the panel stands on the ground plane y = 0.
#[derive(Debug, Clone, PartialEq)]
pub struct Wall {
    pub name: String,
    pub p1: Vector2<f32>,
    pub p2: Vector2<f32>,
    pub height: f32,
    pub thickness: f32,
    pub material: Material,
}

impl Wall {
    pub fn new(name: &str, p1: (f32, f32), p2: (f32, f32)) -> Self {
        Self {
            name: name.to_string(),
            p1: Vector2::new(p1.0, p1.1),
            p2: Vector2::new(p2.0, p2.1),
            height: 2.5,
            thickness: 0.15,
            material: Material::default(),
        }
    }

    /// Builder pattern: Set the panel height
    pub fn with_height(mut self, height: f32) -> Self {
        self.height = height;
        self
    }

    /// Builder pattern: Set the panel thickness
    pub fn with_thickness(mut self, thickness: f32) -> Self {
        self.thickness = thickness;
        self
    }

    /// Builder pattern: Set the panel material
    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    pub fn midpoint(&self) -> Vector2<f32> {
        (self.p1 + self.p2) * 0.5
    }

    pub fn length(&self) -> f32 {
        (self.p2 - self.p1).magnitude()
    }

    /// The infinite splitting plane through this wall: point at the segment
    /// midpoint, normal the segment direction rotated 90 degrees.
    ///
    /// Well-defined only when the endpoints are distinct; a degenerate
    /// segment yields a zero normal, which classifies everything as a tie.
    pub fn plane(&self) -> SplitPlane {
        SplitPlane {
            point: self.midpoint(),
            normal: normalize_or_zero(perp_right(self.p2 - self.p1)),
        }
    }

    /// World transform placing a unit panel of this wall's dimensions: the
    /// panel is centered on the segment, rotated to its direction, and
    /// lifted so its base sits on the ground.
    pub fn panel_transform(&self) -> Matrix4<f32> {
        let mid = self.midpoint();
        let d = self.p2 - self.p1;
        let angle = d.y.atan2(d.x);
        transform::translate(mid.x, self.height * 0.5, mid.y)
            * transform::rotate(Rad(angle), Vector3::unit_y())
    }
}

/// The reference maze: an outer rectangle plus inner corridor walls.
///
/// `outer_alpha`/`inner_alpha` control translucency of the two wall groups,
/// which is what makes BSP draw ordering visible in the first place.
pub fn sample_maze(outer_alpha: f32, inner_alpha: f32) -> Vec<Wall> {
    const R: f32 = 4.0;

    let tinted = |r: f32, g: f32, b: f32, alpha: f32| {
        Material::colored(r, g, b).with_alpha(alpha)
    };

    let mut walls = vec![
        Wall::new("Outer_North", (-R, -R), (R, -R))
            .with_material(tinted(0.90, 0.30, 0.30, outer_alpha)),
        Wall::new("Outer_South", (-R, R), (R, R))
            .with_material(tinted(0.90, 0.30, 0.30, outer_alpha)),
        Wall::new("Outer_West", (-R, -R), (-R, R))
            .with_material(tinted(0.30, 0.90, 0.30, outer_alpha)),
        Wall::new("Outer_East", (R, -R), (R, R))
            .with_material(tinted(0.30, 0.90, 0.30, outer_alpha)),
    ];

    walls.extend([
        Wall::new("A", (-3.0, -3.0), (1.0, -3.0))
            .with_material(tinted(0.30, 0.60, 0.95, inner_alpha)),
        Wall::new("B", (1.0, -3.0), (1.0, -1.0))
            .with_material(tinted(0.95, 0.60, 0.25, inner_alpha)),
        Wall::new("C", (-3.0, -1.0), (1.0, -1.0))
            .with_material(tinted(0.30, 0.90, 0.30, inner_alpha)),
        Wall::new("D", (-3.0, 1.0), (-1.0, 1.0))
            .with_material(tinted(0.85, 0.40, 0.85, inner_alpha)),
        Wall::new("E", (-1.0, 1.0), (-1.0, 3.0))
            .with_material(tinted(0.20, 0.85, 0.85, inner_alpha)),
        Wall::new("F", (-1.0, 3.0), (3.0, 3.0))
            .with_material(tinted(0.95, 0.80, 0.25, inner_alpha)),
        Wall::new("G", (3.0, -1.5), (3.0, 3.0))
            .with_material(tinted(0.95, 0.60, 0.25, inner_alpha)),
        Wall::new("H", (1.0, -1.5), (3.0, -1.5))
            .with_material(tinted(0.70, 0.55, 0.95, inner_alpha)),
    ]);

    walls
}
