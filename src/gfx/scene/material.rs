//! Material system for the forward lighting model
//!
//! Provides the classic ambient/diffuse/specular material description used
//! by every drawable node, plus the GPU-layout uniform packing handed to the
//! renderer backend with each draw call.

use crate::gfx::rendering::TextureHandle;

/// Surface description submitted with each draw call.
///
/// Colors are linear RGB triples. `alpha` below 1.0 marks the surface as
/// translucent, which the caller must pair with a draw order that blends
/// correctly (see [`crate::gfx::bsp`]).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub ambient: [f32; 3],
    pub diffuse: [f32; 3],
    pub specular: [f32; 3],
    pub emission: [f32; 3],
    pub shininess: f32,
    pub alpha: f32,
    /// Texture bound to the diffuse channel, if any. The core never
    /// inspects texture contents, only whether one is bound.
    pub texture: Option<TextureHandle>,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            ambient: [0.2, 0.2, 0.2],
            diffuse: [0.8, 0.8, 0.8],
            specular: [1.0, 1.0, 1.0],
            emission: [0.0, 0.0, 0.0],
            shininess: 32.0,
            alpha: 1.0,
            texture: None,
        }
    }
}

impl Material {
    /// Creates the default grey material.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a material with the given diffuse color and default
    /// everything else.
    pub fn colored(r: f32, g: f32, b: f32) -> Self {
        Self::default().with_diffuse(r, g, b)
    }

    /// Builder pattern: Set the diffuse color
    pub fn with_diffuse(mut self, r: f32, g: f32, b: f32) -> Self {
        self.diffuse = [r, g, b];
        self
    }

    /// Builder pattern: Set the ambient color
    pub fn with_ambient(mut self, r: f32, g: f32, b: f32) -> Self {
        self.ambient = [r, g, b];
        self
    }

    /// Builder pattern: Set the specular color
    pub fn with_specular(mut self, r: f32, g: f32, b: f32) -> Self {
        self.specular = [r, g, b];
        self
    }

    /// Builder pattern: Set the emission color
    pub fn with_emission(mut self, r: f32, g: f32, b: f32) -> Self {
        self.emission = [r, g, b];
        self
    }

    /// Builder pattern: Set the specular exponent
    pub fn with_shininess(mut self, shininess: f32) -> Self {
        self.shininess = shininess.max(0.0);
        self
    }

    /// Builder pattern: Set alpha transparency
    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha.clamp(0.0, 1.0);
        self
    }

    /// Builder pattern: Bind a texture to the diffuse channel
    pub fn with_texture(mut self, texture: TextureHandle) -> Self {
        self.texture = Some(texture);
        self
    }

    /// Whether this material needs alpha blending.
    pub fn is_translucent(&self) -> bool {
        self.alpha < 1.0
    }

    /// Packs the material into its GPU uniform layout.
    pub fn to_uniform(&self) -> MaterialUniform {
        MaterialUniform {
            ambient: [self.ambient[0], self.ambient[1], self.ambient[2], 0.0],
            diffuse: [self.diffuse[0], self.diffuse[1], self.diffuse[2], self.alpha],
            specular: [
                self.specular[0],
                self.specular[1],
                self.specular[2],
                self.shininess,
            ],
            emission: [
                self.emission[0],
                self.emission[1],
                self.emission[2],
                if self.texture.is_some() { 1.0 } else { 0.0 },
            ],
        }
    }
}

/// GPU uniform layout for [`Material`].
///
/// The fourth lane of each color carries the scalar parameters: alpha rides
/// with diffuse, shininess with specular, and the textured flag with
/// emission. 16-byte aligned throughout.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MaterialUniform {
    pub ambient: [f32; 4],
    pub diffuse: [f32; 4],
    pub specular: [f32; 4],
    pub emission: [f32; 4],
}
