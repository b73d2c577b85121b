//! Car-in-a-garage demo, headless.
//!
//! Assembles the car and garage from procedural primitives, runs a scripted
//! drive through the vehicle and garage controllers, and renders each frame
//! into a recording draw list instead of a window. Run with
//! `RUST_LOG=debug` to watch the controllers work.

use anyhow::{Context, Result};
use cgmath::{Deg, Matrix4, Point3, SquareMatrix, Vector3};
use log::info;

use bothy::gfx::geometry::{generate_box, generate_cube, generate_cylinder, generate_grid};
use bothy::transform::{rotate, scale, translate};
use bothy::{
    Animator, ControlInput, DrawList, FrameContext, GarageController, Light, LightSet, Material,
    MeshLibrary, Node, OrbitCamera, ShadingMode, VehicleConfig, VehicleController,
};

const DT: f32 = 1.0 / 60.0;

fn build_car(meshes: &mut MeshLibrary) -> Node {
    let cube = meshes.upload(&generate_cube(1.0));
    let front_wheel = meshes.upload(&generate_cylinder(0.4, 0.3, 16));
    let rear_wheel = meshes.upload(&generate_cylinder(0.6, 0.36, 16));

    let mut car = Node::new("CarRoot");

    car.add(
        Node::new("Chassis")
            .with_local(scale(2.0, 0.5, 4.0))
            .with_mesh(cube)
            .with_material(Material::colored(0.8, 0.2, 0.2)),
    );
    car.add(
        Node::new("Cabin")
            .with_local(translate(0.0, 0.5, -0.5) * scale(1.8, 0.6, 2.0))
            .with_mesh(cube)
            .with_material(Material::colored(0.2, 0.2, 0.8).with_alpha(0.8)),
    );

    // Wheel mounts carry the offsets; the wheel nodes carry the animators.
    // The cylinders are generated along Z, so the rest pose turns their
    // axles sideways.
    let axle = rotate(Deg(90.0), Vector3::unit_y());
    let dark = Material::colored(0.1, 0.1, 0.1).with_shininess(8.0);
    let wheels = [
        ("FL", front_wheel, 1.1, 0.0, 1.5),
        ("FR", front_wheel, -1.1, 0.0, 1.5),
        ("RL", rear_wheel, 1.1, 0.2, -1.5),
        ("RR", rear_wheel, -1.1, 0.2, -1.5),
    ];
    for (tag, mesh, x, y, z) in wheels {
        let mut mount = Node::new(&format!("{tag}_Mount")).with_local(translate(x, y, z));
        mount.add(
            Node::new(&format!("{tag}_Wheel"))
                .with_mesh(mesh)
                .with_material(dark)
                .with_animator(
                    Animator::wheel(Point3::new(0.0, 0.0, 0.0)).with_rest(axle),
                ),
        );
        car.add(mount);
    }

    let mut column_mount = Node::new("SW_Mount").with_local(translate(-0.5, 0.6, 0.0));
    column_mount.add(
        Node::new("SteeringWheel")
            .with_mesh(cube)
            .with_material(Material::colored(0.3, 0.3, 0.3))
            .with_animator(
                Animator::steering_column().with_rest(scale(0.3, 0.3, 0.05)),
            ),
    );
    car.add(column_mount);

    // The hinge node swings; its child carries the panel geometry offset so
    // the pivot sits on the door's leading edge. The pivot point equals the
    // rest placement, keeping the hinge line fixed at the mount.
    let mut hinge = Node::new("LeftDoor_Hinge")
        .with_local(translate(1.0, 0.5, 0.0))
        .with_animator(
            Animator::hinge(
                Deg(45.0),
                2.0,
                Vector3::unit_y(),
                Point3::new(1.0, 0.5, 0.0),
            )
            .with_rest(translate(1.0, 0.5, 0.0)),
        );
    hinge.add(
        Node::new("LeftDoor")
            .with_local(translate(0.0, 0.0, 0.5) * scale(0.1, 0.5, 1.0))
            .with_mesh(cube)
            .with_material(Material::colored(0.8, 0.25, 0.25)),
    );
    car.add(hinge);

    car
}

fn build_garage(meshes: &mut MeshLibrary) -> Node {
    let shell = meshes.upload(&generate_box(6.0, 3.0, 6.0));
    let gate_panel = meshes.upload(&generate_box(4.0, 2.5, 0.2));

    let mut garage = Node::new("Garage").with_local(translate(10.0, 0.0, 10.0));
    garage.add(
        Node::new("GWalls")
            .with_local(translate(0.0, 1.5, 0.0))
            .with_mesh(shell)
            .with_material(Material::colored(0.6, 0.6, 0.6)),
    );

    let mut gate_mount = Node::new("GDoorMount").with_local(translate(0.0, 0.0, 3.0));
    gate_mount.add(
        Node::new("GDoor")
            .with_local(translate(0.0, 1.25, 0.0))
            .with_mesh(gate_panel)
            .with_material(Material::colored(0.4, 0.2, 0.0))
            .with_animator(
                Animator::slide(2.5, 2.0, Vector3::unit_y())
                    .with_rest(translate(0.0, 1.25, 0.0)),
            ),
    );
    garage.add(gate_mount);

    garage
}

fn frame_lights() -> LightSet {
    let mut lights = LightSet::new();
    lights.set(
        0,
        Light::point(
            Point3::new(10.0, 20.0, 10.0),
            [0.2, 0.2, 0.2],
            [1.0, 1.0, 1.0],
            [1.0, 1.0, 1.0],
        ),
    );
    lights.set(
        1,
        Light::point(
            Point3::new(-10.0, 10.0, -10.0),
            [0.1, 0.1, 0.1],
            [0.5, 0.5, 0.8],
            [0.5, 0.5, 0.5],
        ),
    );
    // Hard-edged work light over the garage gate.
    lights.set(
        2,
        Light::spot(
            Point3::new(10.0, 4.0, 13.5),
            -Vector3::unit_y(),
            Deg(35.0),
            [0.0, 0.0, 0.0],
            [0.9, 0.9, 0.7],
            [0.9, 0.9, 0.7],
        ),
    );
    lights
}

fn main() -> Result<()> {
    env_logger::init();

    let mut meshes = MeshLibrary::new();
    let grid = meshes.upload(&generate_grid(100.0, 20));

    let mut root = Node::new("Root");
    root.add(
        Node::new("Floor")
            .with_mesh(grid)
            .with_material(Material::colored(0.8, 0.8, 0.8)),
    );
    root.add(build_car(&mut meshes));
    root.add(build_garage(&mut meshes));

    let mut vehicle = VehicleController::new(VehicleConfig::default(), Point3::new(0.0, 0.5, 0.0))
        .with_front_wheels(&["FL_Wheel", "FR_Wheel"])
        .with_rear_wheels(&["RL_Wheel", "RR_Wheel"])
        .with_steering_wheel("SteeringWheel")
        .with_doors(&["LeftDoor_Hinge"]);
    let mut garage = GarageController::new("GDoor");

    let mut camera = OrbitCamera::new(15.0, 8.0);
    let projection = bothy::transform::perspective(Deg(60.0), 16.0 / 9.0, 0.1, 1000.0);
    let lights = frame_lights();

    // Scripted drive: accelerate toward the garage, ease into a left turn,
    // then release everything and coast to a stop.
    let script = [
        (120, ControlInput::released().with_forward()),
        (90, ControlInput::released().with_forward().with_steer_left()),
        (90, ControlInput::released().with_forward()),
        (300, ControlInput::released()),
    ];

    let mut draw_list = DrawList::new();
    let mut frame_number = 0u32;

    for (frames, input) in script {
        for _ in 0..frames {
            if frame_number == 60 {
                garage.toggle();
                info!("garage gate toggled open");
            }
            if frame_number == 150 {
                vehicle.toggle_doors();
                info!("car door toggled open");
            }

            let car = root.find_mut("CarRoot").context("car root missing")?;
            vehicle.update(DT, &input, car);
            let shed = root.find_mut("Garage").context("garage root missing")?;
            garage.update(shed);
            root.update(DT);

            camera.center = vehicle.position();

            let frame = FrameContext::from_camera(&camera, projection)
                .with_lights(lights)
                .with_shading(ShadingMode::BlinnPhong);
            draw_list.clear();
            root.draw(&mut draw_list, Matrix4::identity(), &frame);

            frame_number += 1;
        }
    }

    let pos = vehicle.position();
    println!("simulated {frame_number} frames over {} nodes", root.node_count());
    println!(
        "car came to rest at ({:.2}, {:.2}, {:.2}), heading {:.1} deg, speed {:.2}",
        pos.x,
        pos.y,
        pos.z,
        vehicle.yaw().0.to_degrees(),
        vehicle.speed()
    );
    println!(
        "final frame submitted {} draw calls ({} translucent)",
        draw_list.len(),
        draw_list
            .calls()
            .iter()
            .filter(|c| c.material.is_translucent())
            .count()
    );

    Ok(())
}
