//! Per-point light accumulation.
//!
//! [`shade`] is the reference implementation of the lighting equation the
//! shading stage evaluates - at each vertex for flat/Gouraud interpolation,
//! at each fragment for Phong/Blinn-Phong. Keeping it on the CPU makes the
//! model testable without a GPU and pins down the exact formulas each mode
//! uses.

use cgmath::{InnerSpace, Point3, Vector3};

use crate::gfx::lighting::LightSet;
use crate::gfx::scene::Material;

/// Shading interpolation mode.
///
/// Flat and Gouraud evaluate the lighting equation per vertex (flat shading
/// additionally requires per-face normals, which comes from geometry
/// duplication, not from the equation); Phong and Blinn-Phong evaluate it
/// per fragment. Phong and Blinn-Phong also differ in the specular formula
/// itself - reflect-vector dot view-vector versus half-vector dot normal -
/// and the two are not interchangeable: for the same shininess exponent
/// Blinn-Phong highlights are visibly wider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShadingMode {
    Flat,
    Gouraud,
    #[default]
    Phong,
    BlinnPhong,
}

impl ShadingMode {
    /// Whether the lighting equation runs per fragment rather than per
    /// vertex.
    pub fn is_per_fragment(&self) -> bool {
        matches!(self, ShadingMode::Phong | ShadingMode::BlinnPhong)
    }
}

fn mul3(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [a[0] * b[0], a[1] * b[1], a[2] * b[2]]
}

fn add_scaled(acc: &mut [f32; 3], color: [f32; 3], factor: f32) {
    acc[0] += color[0] * factor;
    acc[1] += color[1] * factor;
    acc[2] += color[2] * factor;
}

fn reflect(incident: Vector3<f32>, normal: Vector3<f32>) -> Vector3<f32> {
    incident - normal * (2.0 * incident.dot(normal))
}

/// Accumulates the contribution of every light in `lights` at one shaded
/// point.
///
/// Per light: ambient is unconditional; diffuse is
/// `max(N.L, 0) * light_diffuse * albedo`; specular is
/// `pow(max(R.V, 0), shininess)` for Phong-family modes or
/// `pow(max(N.H, 0), shininess)` for Blinn-Phong, times
/// `light_specular * material_specular`. A spotlight contributes no diffuse
/// or specular outside its hard cutoff cone - there is no soft-edge
/// falloff. Material emission is added once, independent of lights.
///
/// `normal` need not be unit length; positions are world-space. The result
/// is not clamped - the backend's output stage owns that.
pub fn shade(
    point: Point3<f32>,
    normal: Vector3<f32>,
    eye: Point3<f32>,
    material: &Material,
    lights: &LightSet,
    mode: ShadingMode,
) -> [f32; 3] {
    let n = normal.normalize();
    let view_dir = (eye - point).normalize();

    let mut result = material.emission;

    for light in lights.iter() {
        add_scaled(&mut result, mul3(light.ambient, material.ambient), 1.0);

        let light_dir = (light.position - point).normalize();

        if light.is_spot() {
            // Hard cutoff: compare the light-to-surface direction against
            // the cone axis.
            let to_surface = -light_dir;
            if to_surface.dot(light.direction.normalize()) < light.cutoff_cos {
                continue;
            }
        }

        let diff = n.dot(light_dir).max(0.0);
        add_scaled(&mut result, mul3(light.diffuse, material.diffuse), diff);

        let spec = match mode {
            ShadingMode::BlinnPhong => {
                let half = (light_dir + view_dir).normalize();
                n.dot(half).max(0.0).powf(material.shininess)
            }
            _ => {
                let reflect_dir = reflect(-light_dir, n);
                view_dir.dot(reflect_dir).max(0.0).powf(material.shininess)
            }
        };
        add_scaled(&mut result, mul3(light.specular, material.specular), spec);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::lighting::Light;
    use cgmath::Deg;

    const EPS: f32 = 1e-5;

    fn matte(diffuse: [f32; 3]) -> Material {
        Material::default()
            .with_diffuse(diffuse[0], diffuse[1], diffuse[2])
            .with_ambient(0.0, 0.0, 0.0)
            .with_specular(0.0, 0.0, 0.0)
    }

    fn one_light(light: Light) -> LightSet {
        let mut set = LightSet::new();
        set.set(0, light);
        set
    }

    #[test]
    fn test_diffuse_is_full_at_normal_incidence() {
        let lights = one_light(Light::point(
            Point3::new(0.0, 10.0, 0.0),
            [0.0; 3],
            [1.0; 3],
            [0.0; 3],
        ));
        let color = shade(
            Point3::new(0.0, 0.0, 0.0),
            Vector3::unit_y(),
            Point3::new(0.0, 5.0, 5.0),
            &matte([0.8, 0.4, 0.2]),
            &lights,
            ShadingMode::Gouraud,
        );
        assert!((color[0] - 0.8).abs() < EPS);
        assert!((color[1] - 0.4).abs() < EPS);
        assert!((color[2] - 0.2).abs() < EPS);
    }

    #[test]
    fn test_diffuse_clamps_below_horizon() {
        // Light below the surface: no negative lighting.
        let lights = one_light(Light::point(
            Point3::new(0.0, -10.0, 0.0),
            [0.0; 3],
            [1.0; 3],
            [0.0; 3],
        ));
        let color = shade(
            Point3::new(0.0, 0.0, 0.0),
            Vector3::unit_y(),
            Point3::new(0.0, 5.0, 0.0),
            &matte([1.0; 3]),
            &lights,
            ShadingMode::Gouraud,
        );
        assert_eq!(color, [0.0; 3]);
    }

    #[test]
    fn test_phong_and_blinn_use_different_specular_formulas() {
        let glossy = Material::default()
            .with_diffuse(0.0, 0.0, 0.0)
            .with_ambient(0.0, 0.0, 0.0)
            .with_specular(1.0, 1.0, 1.0)
            .with_shininess(1.0);
        let lights = one_light(Light::point(
            Point3::new(10.0, 10.0, 0.0),
            [0.0; 3],
            [0.0; 3],
            [1.0; 3],
        ));

        // View straight down the normal, light at 45 degrees: R.V and N.H
        // disagree, so the two modes must produce different intensities.
        let point = Point3::new(0.0, 0.0, 0.0);
        let eye = Point3::new(0.0, 10.0, 0.0);
        let phong = shade(point, Vector3::unit_y(), eye, &glossy, &lights, ShadingMode::Phong);
        let blinn = shade(
            point,
            Vector3::unit_y(),
            eye,
            &glossy,
            &lights,
            ShadingMode::BlinnPhong,
        );

        assert!((phong[0] - blinn[0]).abs() > 0.05);
        assert!(blinn[0] > phong[0]); // Blinn highlights are wider
    }

    #[test]
    fn test_spot_cutoff_is_hard() {
        let material = Material::default().with_ambient(1.0, 1.0, 1.0);
        let point = Point3::new(0.0, 0.0, 0.0);
        let eye = Point3::new(0.0, 5.0, 5.0);

        // Cone points along +X while the surface is straight below the
        // light: outside the cutoff only the ambient term survives.
        let askew = Light::spot(
            Point3::new(0.0, 10.0, 0.0),
            Vector3::unit_x(),
            Deg(20.0),
            [0.1, 0.1, 0.1],
            [1.0; 3],
            [1.0; 3],
        );
        let dark = shade(
            point,
            Vector3::unit_y(),
            eye,
            &material,
            &one_light(askew),
            ShadingMode::Phong,
        );
        assert_eq!(dark, [0.1, 0.1, 0.1]);

        // Aim the cone at the surface and the directional terms come back.
        let aimed = Light::spot(
            Point3::new(0.0, 10.0, 0.0),
            -Vector3::unit_y(),
            Deg(20.0),
            [0.1, 0.1, 0.1],
            [1.0; 3],
            [1.0; 3],
        );
        let lit = shade(
            point,
            Vector3::unit_y(),
            eye,
            &material,
            &one_light(aimed),
            ShadingMode::Phong,
        );
        assert!(lit[0] > dark[0]);
    }

    #[test]
    fn test_lights_accumulate_additively() {
        let light = Light::point(Point3::new(0.0, 10.0, 0.0), [0.0; 3], [0.5; 3], [0.0; 3]);
        let one = one_light(light);
        let mut two = one;
        two.set(1, light);

        let point = Point3::new(0.0, 0.0, 0.0);
        let eye = Point3::new(0.0, 5.0, 0.0);
        let material = matte([1.0; 3]);
        let a = shade(point, Vector3::unit_y(), eye, &material, &one, ShadingMode::Phong);
        let b = shade(point, Vector3::unit_y(), eye, &material, &two, ShadingMode::Phong);
        assert!((b[0] - 2.0 * a[0]).abs() < EPS);
    }
}
