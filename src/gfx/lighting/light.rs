//! Light sources and the per-frame light slot set.

use cgmath::{Angle, Deg, Point3, Vector3};

/// Number of light slots submitted to the shading stage.
pub const MAX_LIGHTS: usize = 4;

/// Cutoff-cosine sentinel: at or below this value a light is treated as an
/// omnidirectional point light rather than a spotlight. A real spotlight
/// cone this wide (more than ~154 degrees half-angle) is indistinguishable
/// from a point light anyway.
pub const OMNI_CUTOFF_COS: f32 = -0.9;

/// A point or spot light.
///
/// The variant is encoded in `cutoff_cos`: values above
/// [`OMNI_CUTOFF_COS`] make the light a hard-edged spotlight facing
/// `direction`; values at or below it make it omnidirectional and
/// `direction` is ignored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub position: Point3<f32>,
    pub direction: Vector3<f32>,
    /// Cosine of the spot half-angle, or the omni sentinel.
    pub cutoff_cos: f32,
    pub ambient: [f32; 3],
    pub diffuse: [f32; 3],
    pub specular: [f32; 3],
}

impl Light {
    /// Creates an omnidirectional point light.
    pub fn point(
        position: Point3<f32>,
        ambient: [f32; 3],
        diffuse: [f32; 3],
        specular: [f32; 3],
    ) -> Self {
        Self {
            position,
            direction: -Vector3::unit_y(),
            cutoff_cos: -1.0,
            ambient,
            diffuse,
            specular,
        }
    }

    /// Creates a hard-edged spotlight with the given cone half-angle.
    pub fn spot(
        position: Point3<f32>,
        direction: Vector3<f32>,
        cutoff: Deg<f32>,
        ambient: [f32; 3],
        diffuse: [f32; 3],
        specular: [f32; 3],
    ) -> Self {
        Self {
            position,
            direction,
            cutoff_cos: cutoff.cos(),
            ambient,
            diffuse,
            specular,
        }
    }

    /// Whether this light restricts its contribution to a cone.
    pub fn is_spot(&self) -> bool {
        self.cutoff_cos > OMNI_CUTOFF_COS
    }

    /// Packs the light into its GPU uniform layout.
    pub fn to_uniform(&self) -> LightUniform {
        LightUniform {
            position: [self.position.x, self.position.y, self.position.z, 1.0],
            direction: [
                self.direction.x,
                self.direction.y,
                self.direction.z,
                self.cutoff_cos,
            ],
            ambient: [self.ambient[0], self.ambient[1], self.ambient[2], 0.0],
            diffuse: [self.diffuse[0], self.diffuse[1], self.diffuse[2], 0.0],
            specular: [self.specular[0], self.specular[1], self.specular[2], 0.0],
        }
    }
}

/// The fixed, ordered set of light slots for a frame.
///
/// Slots are re-packed in full by [`LightSet::to_uniform`] every frame -
/// there are no partial updates, so the shading stage always sees a
/// consistent complete set.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LightSet {
    slots: [Option<Light>; MAX_LIGHTS],
}

impl LightSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assigns a light to a slot. Slots beyond [`MAX_LIGHTS`] do not exist;
    /// assigning one is ignored with a warning rather than growing the set.
    pub fn set(&mut self, slot: usize, light: Light) {
        match self.slots.get_mut(slot) {
            Some(entry) => *entry = Some(light),
            None => log::warn!("light slot {slot} out of range (max {MAX_LIGHTS}), ignored"),
        }
    }

    /// Empties a slot.
    pub fn unset(&mut self, slot: usize) {
        if let Some(entry) = self.slots.get_mut(slot) {
            *entry = None;
        }
    }

    pub fn get(&self, slot: usize) -> Option<&Light> {
        self.slots.get(slot).and_then(|s| s.as_ref())
    }

    /// Occupied slots, in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &Light> {
        self.slots.iter().filter_map(|s| s.as_ref())
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Packs all slots into the GPU uniform layout. Empty slots are zeroed;
    /// `count` tells the shading stage how many leading entries are live.
    pub fn to_uniform(&self) -> LightsUniform {
        let mut uniform = LightsUniform::zeroed();
        let mut count = 0u32;
        for light in self.iter() {
            uniform.lights[count as usize] = light.to_uniform();
            count += 1;
        }
        uniform.count = count;
        uniform
    }
}

/// GPU uniform layout for a single light slot.
///
/// The fourth lane of `direction` carries the cutoff cosine; positions are
/// homogeneous to satisfy 16-byte alignment.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightUniform {
    pub position: [f32; 4],
    pub direction: [f32; 4],
    pub ambient: [f32; 4],
    pub diffuse: [f32; 4],
    pub specular: [f32; 4],
}

/// GPU uniform layout for the whole light set.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightsUniform {
    pub lights: [LightUniform; MAX_LIGHTS],
    pub count: u32,
    pub _padding: [u32; 3],
}

impl LightsUniform {
    fn zeroed() -> Self {
        bytemuck::Zeroable::zeroed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn white_point(x: f32, y: f32, z: f32) -> Light {
        Light::point(
            Point3::new(x, y, z),
            [0.1; 3],
            [1.0; 3],
            [1.0; 3],
        )
    }

    #[test]
    fn test_cutoff_sentinel_selects_point_light() {
        let mut light = white_point(0.0, 5.0, 0.0);
        assert!(!light.is_spot());

        light.cutoff_cos = Deg(30.0f32).cos();
        assert!(light.is_spot());

        // At the sentinel boundary the light degrades to omnidirectional.
        light.cutoff_cos = OMNI_CUTOFF_COS;
        assert!(!light.is_spot());
    }

    #[test]
    fn test_slot_set_is_fixed_size() {
        let mut set = LightSet::new();
        set.set(0, white_point(1.0, 0.0, 0.0));
        set.set(3, white_point(0.0, 1.0, 0.0));
        set.set(9, white_point(0.0, 0.0, 1.0)); // out of range, ignored

        assert_eq!(set.len(), 2);
        assert!(set.get(9).is_none());
    }

    #[test]
    fn test_uniform_repacks_all_slots() {
        let mut set = LightSet::new();
        set.set(1, white_point(2.0, 4.0, 6.0));

        let uniform = set.to_uniform();
        assert_eq!(uniform.count, 1);
        assert_eq!(uniform.lights[0].position, [2.0, 4.0, 6.0, 1.0]);
        // Remaining slots are zeroed, not stale.
        assert_eq!(uniform.lights[1].diffuse, [0.0; 4]);
    }
}
