//! # Asset Loading
//!
//! Builds scene-graph subtrees from OBJ/MTL files. Parsing itself is
//! delegated to [`tobj`]; this module's job is the mapping into the scene
//! model: one child node per material batch, MTL colors folded into
//! [`Material`], geometry uploaded through whatever [`MeshProvider`] the
//! caller supplies.
//!
//! A failed load never takes the frame loop down: [`load_or_placeholder`]
//! degrades the affected subtree to an empty named node and the rest of the
//! scene keeps rendering.

use std::path::Path;

use thiserror::Error;

use crate::gfx::rendering::{MeshProvider, TextureProvider};
use crate::gfx::scene::{Material, Node, Vertex3D};

/// Errors from the asset loading seam.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to load OBJ model: {0}")]
    Obj(#[from] tobj::LoadError),
}

/// Loads an OBJ file into a node subtree.
///
/// The returned root carries no geometry of its own; each model in the
/// file becomes one named child holding its mesh handle and material. Node
/// names come from the OBJ object names, which is what lets controllers
/// find their parts (chassis, wheels, doors) in the loaded subtree.
///
/// Materials referenced by the OBJ have their diffuse/ambient/specular
/// colors, shininess and dissolve (alpha) mapped over; a `map_Kd` texture
/// is resolved through `textures`, and an absent texture file simply
/// leaves the material untextured.
pub fn load_obj_subtree(
    path: &Path,
    meshes: &mut impl MeshProvider,
    textures: &mut impl TextureProvider,
) -> Result<Node, AssetError> {
    let (models, materials) = tobj::load_obj(
        path,
        &tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..Default::default()
        },
    )?;

    let materials = materials.unwrap_or_else(|error| {
        log::warn!("no usable MTL for {}: {error}", path.display());
        Vec::new()
    });

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "OBJRoot".to_string());
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));

    let mut root = Node::new(&stem);

    for (index, model) in models.iter().enumerate() {
        let mesh = &model.mesh;
        if mesh.positions.is_empty() {
            continue;
        }

        let normals = if mesh.normals.len() == mesh.positions.len() {
            mesh.normals.clone()
        } else {
            average_normals(&mesh.positions, &mesh.indices)
        };

        let vertex_count = mesh.positions.len() / 3;
        let vertices: Vec<Vertex3D> = (0..vertex_count)
            .map(|i| Vertex3D {
                position: [
                    mesh.positions[i * 3],
                    mesh.positions[i * 3 + 1],
                    mesh.positions[i * 3 + 2],
                ],
                normal: [normals[i * 3], normals[i * 3 + 1], normals[i * 3 + 2]],
                tex_coord: if mesh.texcoords.len() == vertex_count * 2 {
                    [mesh.texcoords[i * 2], mesh.texcoords[i * 2 + 1]]
                } else {
                    [0.0, 0.0]
                },
            })
            .collect();

        let handle = meshes.create_mesh(&vertices, &mesh.indices);

        let material = mesh
            .material_id
            .and_then(|id| materials.get(id))
            .map(|mtl| convert_material(mtl, base_dir, textures))
            .unwrap_or_default();

        let name = if model.name.is_empty() {
            format!("{stem}_{index}")
        } else {
            model.name.clone()
        };

        root.add(Node::new(&name).with_mesh(handle).with_material(material));
    }

    if root.children.is_empty() {
        log::warn!("{} contained no drawable geometry", path.display());
    }

    Ok(root)
}

/// Loads an OBJ subtree, degrading to an empty placeholder node on any
/// failure so the caller's scene keeps animating and rendering.
pub fn load_or_placeholder(
    path: &Path,
    meshes: &mut impl MeshProvider,
    textures: &mut impl TextureProvider,
) -> Node {
    match load_obj_subtree(path, meshes, textures) {
        Ok(subtree) => subtree,
        Err(error) => {
            log::warn!(
                "asset {} failed to load ({error}), substituting empty node",
                path.display()
            );
            let stem = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "OBJRoot".to_string());
            Node::new(&stem)
        }
    }
}

fn convert_material(
    mtl: &tobj::Material,
    base_dir: &Path,
    textures: &mut impl TextureProvider,
) -> Material {
    let [ar, ag, ab] = mtl.ambient.unwrap_or([0.2, 0.2, 0.2]);
    let [dr, dg, db] = mtl.diffuse.unwrap_or([0.8, 0.8, 0.8]);
    let [sr, sg, sb] = mtl.specular.unwrap_or([1.0, 1.0, 1.0]);

    let mut material = Material::default()
        .with_ambient(ar, ag, ab)
        .with_diffuse(dr, dg, db)
        .with_specular(sr, sg, sb)
        .with_shininess(mtl.shininess.unwrap_or(32.0))
        .with_alpha(mtl.dissolve.unwrap_or(1.0));

    if let Some(texture_name) = &mtl.diffuse_texture {
        if let Some(handle) = textures.load_texture(&base_dir.join(texture_name)) {
            material = material.with_texture(handle);
        }
    }

    material
}

/// Smoothed vertex normals for meshes that ship without them: face normals
/// accumulated onto each vertex, then normalized.
fn average_normals(positions: &[f32], indices: &[u32]) -> Vec<f32> {
    let mut normals = vec![0.0f32; positions.len()];

    for triangle in indices.chunks_exact(3) {
        let [i0, i1, i2] = [
            triangle[0] as usize,
            triangle[1] as usize,
            triangle[2] as usize,
        ];
        let vertex = |i: usize| [positions[i * 3], positions[i * 3 + 1], positions[i * 3 + 2]];
        let (v0, v1, v2) = (vertex(i0), vertex(i1), vertex(i2));

        let edge1 = [v1[0] - v0[0], v1[1] - v0[1], v1[2] - v0[2]];
        let edge2 = [v2[0] - v0[0], v2[1] - v0[1], v2[2] - v0[2]];
        let face = [
            edge1[1] * edge2[2] - edge1[2] * edge2[1],
            edge1[2] * edge2[0] - edge1[0] * edge2[2],
            edge1[0] * edge2[1] - edge1[1] * edge2[0],
        ];

        for &i in &[i0, i1, i2] {
            normals[i * 3] += face[0];
            normals[i * 3 + 1] += face[1];
            normals[i * 3 + 2] += face[2];
        }
    }

    for normal in normals.chunks_exact_mut(3) {
        let len = (normal[0] * normal[0] + normal[1] * normal[1] + normal[2] * normal[2]).sqrt();
        if len > 0.0 {
            normal[0] /= len;
            normal[1] /= len;
            normal[2] /= len;
        }
    }

    normals
}
