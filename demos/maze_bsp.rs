//! Translucent maze demo, headless.
//!
//! Builds the BSP over the sample maze, walks a free-fly camera through it,
//! and prints the back-to-front draw order every time it changes - the same
//! diagnostic the windowed version of this exercise scrolls to its console.
//! The final frame is also pushed through the renderer seam so the emitted
//! draw calls can be inspected.

use anyhow::Result;
use cgmath::{Deg, Matrix4, Point3, SquareMatrix, Vector2};
use log::info;

use bothy::gfx::bsp::{sample_maze, BspTree};
use bothy::gfx::geometry::{generate_grid, generate_wall_panel};
use bothy::gfx::rendering::DrawCall;
use bothy::{
    DrawList, FrameContext, FreeCamera, Light, LightSet, Material, MeshLibrary, Renderer,
    ShadingMode,
};

const DT: f32 = 1.0 / 60.0;

fn main() -> Result<()> {
    env_logger::init();

    let walls = sample_maze(1.0, 0.5);
    let tree = BspTree::build(walls.clone());
    info!("bsp over {} walls, depth {}", tree.len(), tree.depth());

    // One panel mesh per wall, since lengths differ.
    let mut meshes = MeshLibrary::new();
    let panels: Vec<_> = walls
        .iter()
        .map(|wall| meshes.upload(&generate_wall_panel(wall.length(), wall.height, wall.thickness)))
        .collect();
    let floor = meshes.upload(&generate_grid(20.0, 20));

    let mut camera = FreeCamera::new(Point3::new(-3.5, 0.15, -3.5));
    camera.look(Deg(45.0), Deg(0.0));

    let mut previous_order: Vec<String> = Vec::new();

    for step in 0..600 {
        // Walk diagonally across the maze, then circle in place.
        if step < 240 {
            camera.advance(2.0 * DT);
        } else {
            camera.look(Deg(90.0 * DT), Deg(0.0));
            camera.advance(0.5 * DT);
        }

        let camera_xz = Vector2::new(camera.position.x, camera.position.z);
        let mut order = Vec::new();
        tree.traverse_back_to_front(camera_xz, &mut |wall| order.push(wall.name.clone()));

        if order != previous_order {
            println!("step {step:3}: {}", order.join(" > "));
            previous_order = order;
        }
    }

    // Submit the final frame through the renderer seam, back to front.
    let mut lights = LightSet::new();
    lights.set(
        0,
        Light::point(
            Point3::new(0.4, 10.0, 0.6),
            [0.18, 0.18, 0.22],
            [1.0, 1.0, 1.0],
            [1.0, 1.0, 1.0],
        ),
    );
    let projection = bothy::transform::perspective(Deg(60.0), 4.0 / 3.0, 0.05, 100.0);
    let frame = FrameContext::from_camera(&camera, projection)
        .with_lights(lights)
        .with_shading(ShadingMode::Gouraud);

    let camera_xz = Vector2::new(camera.position.x, camera.position.z);
    let mut draw_list = DrawList::new();

    // Opaque floor first, then the walls in painter order.
    draw_list.submit(DrawCall {
        world: Matrix4::identity(),
        view_proj: frame.view_proj,
        material: Material::colored(0.15, 0.15, 0.18),
        mesh: floor,
    });
    tree.traverse_back_to_front(camera_xz, &mut |wall| {
        let index = walls.iter().position(|w| w.name == wall.name).unwrap();
        draw_list.submit(DrawCall {
            world: wall.panel_transform(),
            view_proj: frame.view_proj,
            material: wall.material,
            mesh: panels[index],
        });
    });

    println!(
        "final frame: {} draw calls, {} translucent",
        draw_list.len(),
        draw_list
            .calls()
            .iter()
            .filter(|c| c.material.is_translucent())
            .count()
    );

    Ok(())
}
