//! Primitive shape generators.
//!
//! All shapes are centered at the origin and emit outward normals and UV
//! coordinates. Winding is counter-clockwise.

use super::GeometryData;
use std::f32::consts::PI;

/// Generates an axis-aligned box with the given full extents.
///
/// Each face uses its own 4 vertices (24 total) so faces carry flat,
/// per-face normals.
pub fn generate_box(width: f32, height: f32, depth: f32) -> GeometryData {
    let mut data = GeometryData::new();

    let (x, y, z) = (width * 0.5, height * 0.5, depth * 0.5);

    #[rustfmt::skip]
    let positions = [
        // Front face (+Z)
        [-x, -y,  z], [ x, -y,  z], [ x,  y,  z], [-x,  y,  z],
        // Back face (-Z)
        [ x, -y, -z], [-x, -y, -z], [-x,  y, -z], [ x,  y, -z],
        // Top face (+Y)
        [-x,  y,  z], [ x,  y,  z], [ x,  y, -z], [-x,  y, -z],
        // Bottom face (-Y)
        [-x, -y, -z], [ x, -y, -z], [ x, -y,  z], [-x, -y,  z],
        // Right face (+X)
        [ x, -y,  z], [ x, -y, -z], [ x,  y, -z], [ x,  y,  z],
        // Left face (-X)
        [-x, -y, -z], [-x, -y,  z], [-x,  y,  z], [-x,  y, -z],
    ];

    #[rustfmt::skip]
    let face_normals = [
        [0.0, 0.0, 1.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0],
        [0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [-1.0, 0.0, 0.0],
    ];

    data.positions = positions.to_vec();
    for normal in face_normals {
        for _ in 0..4 {
            data.normals.push(normal);
        }
    }
    for _ in 0..6 {
        data.tex_coords
            .extend([[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]);
    }

    for face in 0..6u32 {
        let base = face * 4;
        data.indices
            .extend([base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    data
}

/// Generates a cube with the given edge length.
pub fn generate_cube(size: f32) -> GeometryData {
    generate_box(size, size, size)
}

/// Generates the extruded panel for a wall segment: `length` along X,
/// `height` along Y, `thickness` along Z, centered at the origin.
///
/// Positioned in the world by the wall's panel transform, which lifts the
/// panel so its base sits on the ground plane.
pub fn generate_wall_panel(length: f32, height: f32, thickness: f32) -> GeometryData {
    generate_box(length, height, thickness)
}

/// Generates a flat ground grid of `tiles` x `tiles` quads spanning
/// `size` x `size` in the XZ plane at y = 0, normals up.
///
/// UV coordinates run one unit per tile so a repeating-wrap texture tiles
/// once per quad.
pub fn generate_grid(size: f32, tiles: u32) -> GeometryData {
    let mut data = GeometryData::new();

    let tiles = tiles.max(1);
    let step = size / tiles as f32;
    let half = size * 0.5;

    for i in 0..tiles {
        for j in 0..tiles {
            let x0 = -half + i as f32 * step;
            let z0 = -half + j as f32 * step;
            let (x1, z1) = (x0 + step, z0 + step);
            let (u0, v0) = (i as f32, j as f32);
            let (u1, v1) = (u0 + 1.0, v0 + 1.0);

            let base = data.positions.len() as u32;
            data.positions
                .extend([[x0, 0.0, z0], [x0, 0.0, z1], [x1, 0.0, z1], [x1, 0.0, z0]]);
            for _ in 0..4 {
                data.normals.push([0.0, 1.0, 0.0]);
            }
            data.tex_coords
                .extend([[u0, v0], [u0, v1], [u1, v1], [u1, v0]]);
            data.indices
                .extend([base, base + 1, base + 3, base + 3, base + 1, base + 2]);
        }
    }

    data
}

/// Generates a UV sphere of the given radius.
///
/// `stacks` are horizontal bands from pole to pole, `slices` vertical wedges
/// around the Y axis. Normals equal normalized positions.
pub fn generate_sphere(radius: f32, stacks: u32, slices: u32) -> GeometryData {
    let mut data = GeometryData::new();

    let stacks = stacks.max(2);
    let slices = slices.max(3);

    for i in 0..=stacks {
        let phi = PI * i as f32 / stacks as f32;
        for j in 0..=slices {
            let theta = 2.0 * PI * j as f32 / slices as f32;

            let x = radius * phi.sin() * theta.cos();
            let y = radius * phi.cos();
            let z = radius * phi.sin() * theta.sin();

            data.positions.push([x, y, z]);
            data.normals.push([x / radius, y / radius, z / radius]);
            data.tex_coords
                .push([j as f32 / slices as f32, i as f32 / stacks as f32]);
        }
    }

    for i in 0..stacks {
        for j in 0..slices {
            let first = i * (slices + 1) + j;
            let second = first + slices + 1;

            data.indices.extend([first, second, first + 1]);
            data.indices.extend([second, second + 1, first + 1]);
        }
    }

    data
}

/// Generates a cylinder of the given radius and height along the Z axis,
/// centered at the origin, with capped ends.
pub fn generate_cylinder(radius: f32, height: f32, segments: u32) -> GeometryData {
    let mut data = GeometryData::new();

    let segments = segments.max(3);
    let half = height * 0.5;

    // Side wall
    for i in 0..=segments {
        let angle = 2.0 * PI * i as f32 / segments as f32;
        let (sin_a, cos_a) = angle.sin_cos();
        let (x, y) = (radius * cos_a, radius * sin_a);
        let u = i as f32 / segments as f32;

        data.positions.push([x, y, -half]);
        data.normals.push([cos_a, sin_a, 0.0]);
        data.tex_coords.push([u, 0.0]);

        data.positions.push([x, y, half]);
        data.normals.push([cos_a, sin_a, 0.0]);
        data.tex_coords.push([u, 1.0]);
    }

    for i in 0..segments {
        let bottom = i * 2;
        let top = bottom + 1;
        let next_bottom = bottom + 2;
        let next_top = bottom + 3;

        data.indices.extend([bottom, next_bottom, top]);
        data.indices.extend([top, next_bottom, next_top]);
    }

    // Caps: center vertex plus a rim of duplicated vertices so the caps get
    // their own flat normals.
    for (sign, normal) in [(-1.0f32, [0.0, 0.0, -1.0f32]), (1.0, [0.0, 0.0, 1.0])] {
        let center = data.positions.len() as u32;
        data.positions.push([0.0, 0.0, sign * half]);
        data.normals.push(normal);
        data.tex_coords.push([0.5, 0.5]);

        let rim_start = data.positions.len() as u32;
        for i in 0..=segments {
            let angle = 2.0 * PI * i as f32 / segments as f32;
            let (sin_a, cos_a) = angle.sin_cos();
            data.positions
                .push([radius * cos_a, radius * sin_a, sign * half]);
            data.normals.push(normal);
            data.tex_coords
                .push([0.5 + 0.5 * cos_a, 0.5 + 0.5 * sin_a]);
        }
        for i in 0..segments {
            let current = rim_start + i;
            let next = rim_start + i + 1;
            if sign < 0.0 {
                data.indices.extend([center, next, current]);
            } else {
                data.indices.extend([center, current, next]);
            }
        }
    }

    data
}
