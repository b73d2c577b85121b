//! Vehicle kinematics controller.
//!
//! Drives a car subtree: integrates speed and heading from held-key input,
//! replaces the car root's local transform every frame, and feeds steering
//! and roll state to the wheel animators, the steering column and the door
//! hinges by node name.

use cgmath::{Deg, Point3, Rad, Vector3};

use crate::gfx::scene::Node;
use crate::simulation::input::ControlInput;
use crate::transform;

/// Tuning parameters, fixed at construction.
#[derive(Debug, Clone, Copy)]
pub struct VehicleConfig {
    /// Top forward speed in world units per second.
    pub max_speed: f32,
    /// Reverse speed floor (negative).
    pub reverse_limit: f32,
    /// Throttle acceleration in units per second squared.
    pub acceleration: f32,
    /// Linear speed decay applied when no throttle input is held.
    pub friction: f32,
    /// Below this absolute speed the car snaps to a stop instead of
    /// decaying forever.
    pub stop_threshold: f32,
    /// First-order steering filter gain (per second).
    pub steering_gain: f32,
    /// Maximum steering deflection.
    pub max_steer: Deg<f32>,
    /// Scales how fast heading changes at full deflection and full speed.
    pub turn_rate: f32,
    /// Degrees of wheel roll per world unit traveled.
    pub wheel_spin_rate: f32,
    /// Roll multiplier for the larger rear wheels.
    pub rear_radius_factor: f32,
    /// Visual gearing between steering deflection and the steering column.
    pub steering_wheel_ratio: f32,
}

impl Default for VehicleConfig {
    fn default() -> Self {
        Self {
            max_speed: 10.0,
            reverse_limit: -5.0,
            acceleration: 5.0,
            friction: 2.0,
            stop_threshold: 0.1,
            steering_gain: 5.0,
            max_steer: Deg(30.0),
            turn_rate: 2.0,
            wheel_spin_rate: 20.0,
            rear_radius_factor: 0.66,
            steering_wheel_ratio: 3.0,
        }
    }
}

/// Stateful controller for one vehicle subtree.
///
/// The controller addresses its parts by node name inside the subtree it is
/// given each update. A missing part is skipped: a vehicle whose asset
/// failed to load keeps driving as a bare root rather than taking the
/// frame loop down.
#[derive(Debug, Clone)]
pub struct VehicleController {
    config: VehicleConfig,

    position: Point3<f32>,
    /// Heading around +Y, radians.
    yaw: f32,
    speed: f32,
    /// Current steering deflection, degrees.
    steering: f32,
    doors_open: bool,

    front_wheels: Vec<String>,
    rear_wheels: Vec<String>,
    steering_wheel: Option<String>,
    doors: Vec<String>,
}

impl VehicleController {
    pub fn new(config: VehicleConfig, position: Point3<f32>) -> Self {
        Self {
            config,
            position,
            yaw: 0.0,
            speed: 0.0,
            steering: 0.0,
            doors_open: false,
            front_wheels: Vec::new(),
            rear_wheels: Vec::new(),
            steering_wheel: None,
            doors: Vec::new(),
        }
    }

    /// Names of the steerable front wheel nodes.
    pub fn with_front_wheels(mut self, names: &[&str]) -> Self {
        self.front_wheels = names.iter().map(|n| n.to_string()).collect();
        self
    }

    /// Names of the fixed rear wheel nodes.
    pub fn with_rear_wheels(mut self, names: &[&str]) -> Self {
        self.rear_wheels = names.iter().map(|n| n.to_string()).collect();
        self
    }

    /// Name of the steering column node.
    pub fn with_steering_wheel(mut self, name: &str) -> Self {
        self.steering_wheel = Some(name.to_string());
        self
    }

    /// Names of the hinged door nodes.
    pub fn with_doors(mut self, names: &[&str]) -> Self {
        self.doors = names.iter().map(|n| n.to_string()).collect();
        self
    }

    pub fn position(&self) -> Point3<f32> {
        self.position
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn yaw(&self) -> Rad<f32> {
        Rad(self.yaw)
    }

    pub fn steering_angle(&self) -> Deg<f32> {
        Deg(self.steering)
    }

    pub fn doors_open(&self) -> bool {
        self.doors_open
    }

    pub fn toggle_doors(&mut self) {
        self.doors_open = !self.doors_open;
    }

    /// Advances the kinematic state by `dt` seconds and writes the results
    /// into the `car` subtree.
    pub fn update(&mut self, dt: f32, input: &ControlInput, car: &mut Node) {
        let cfg = &self.config;

        // Throttle, or friction decay toward a dead stop. The decay is a
        // clamp-then-subtract approximation: close enough to zero the speed
        // snaps to exactly zero so it can never flip sign.
        if input.forward {
            self.speed += cfg.acceleration * dt;
        } else if input.reverse {
            self.speed -= cfg.acceleration * dt;
        } else if self.speed.abs() < cfg.stop_threshold {
            self.speed = 0.0;
        } else {
            self.speed -= self.speed.signum() * cfg.friction * dt;
        }
        self.speed = self.speed.clamp(cfg.reverse_limit, cfg.max_speed);

        // Steering eases toward the held direction instead of snapping.
        let target_steer = if input.steer_left {
            cfg.max_steer.0
        } else if input.steer_right {
            -cfg.max_steer.0
        } else {
            0.0
        };
        self.steering += (target_steer - self.steering) * cfg.steering_gain * dt;

        // Heading turns with both steering deflection and speed fraction: a
        // stationary car cannot turn. Position integrates from heading.
        if self.speed.abs() > cfg.stop_threshold {
            self.yaw +=
                self.steering.to_radians() * (self.speed / cfg.max_speed) * cfg.turn_rate * dt;
            self.position.x += self.yaw.sin() * self.speed * dt;
            self.position.z += self.yaw.cos() * self.speed * dt;
        }

        car.local = transform::translate(self.position.x, self.position.y, self.position.z)
            * transform::rotate(Rad(self.yaw), Vector3::unit_y());

        // Wheel roll accumulates with distance traveled; the rear pair is
        // larger and rolls proportionally slower.
        let roll = Deg(self.speed * cfg.wheel_spin_rate * dt);
        let steer = Deg(self.steering);
        for name in &self.front_wheels {
            Self::drive_part(car, name, |animator| {
                animator.add_roll(roll);
                animator.set_steer(steer);
            });
        }
        let rear_roll = Deg(roll.0 * cfg.rear_radius_factor);
        for name in &self.rear_wheels {
            Self::drive_part(car, name, |animator| animator.add_roll(rear_roll));
        }

        if let Some(name) = &self.steering_wheel {
            let column_angle = Deg(self.steering * cfg.steering_wheel_ratio);
            Self::drive_part(car, name, |animator| animator.set_steer(column_angle));
        }

        let open = self.doors_open;
        for name in &self.doors {
            Self::drive_part(car, name, |animator| animator.set_open(open));
        }
    }

    fn drive_part(car: &mut Node, name: &str, apply: impl FnOnce(&mut crate::simulation::Animator)) {
        match car.find_mut(name) {
            Some(node) => {
                if let Some(animator) = node.animator.as_mut() {
                    apply(animator);
                }
            }
            None => log::debug!("vehicle part '{name}' not found in subtree, skipping"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::Animator;

    const DT: f32 = 1.0 / 60.0;

    fn bare_car() -> Node {
        Node::new("CarRoot")
    }

    fn drive(controller: &mut VehicleController, car: &mut Node, input: ControlInput, steps: u32) {
        for _ in 0..steps {
            controller.update(DT, &input, car);
        }
    }

    #[test]
    fn test_releasing_throttle_decays_speed_to_zero_without_overshoot() {
        let mut car = bare_car();
        let mut ctrl =
            VehicleController::new(VehicleConfig::default(), Point3::new(0.0, 0.5, 0.0));

        drive(&mut ctrl, &mut car, ControlInput::released().with_forward(), 120);
        assert!(ctrl.speed() > 5.0);

        let mut previous = ctrl.speed();
        for _ in 0..1200 {
            ctrl.update(DT, &ControlInput::released(), &mut car);
            assert!(ctrl.speed() >= 0.0); // never flips into reverse
            assert!(ctrl.speed() <= previous); // monotone decay
            previous = ctrl.speed();
        }
        assert_eq!(ctrl.speed(), 0.0);
    }

    #[test]
    fn test_speed_clamps_at_both_limits() {
        let mut car = bare_car();
        let mut ctrl =
            VehicleController::new(VehicleConfig::default(), Point3::new(0.0, 0.5, 0.0));

        drive(&mut ctrl, &mut car, ControlInput::released().with_forward(), 2000);
        assert_eq!(ctrl.speed(), 10.0);

        drive(&mut ctrl, &mut car, ControlInput::released().with_reverse(), 4000);
        assert_eq!(ctrl.speed(), -5.0);
    }

    #[test]
    fn test_steering_never_exceeds_max_deflection() {
        let mut car = bare_car();
        let mut ctrl =
            VehicleController::new(VehicleConfig::default(), Point3::new(0.0, 0.5, 0.0));

        let input = ControlInput::released().with_steer_left();
        for _ in 0..2000 {
            ctrl.update(DT, &input, &mut car);
            assert!(ctrl.steering_angle().0.abs() <= 30.0 + 1e-3);
        }
        // Asymptotic approach: close to the limit but driven by the filter.
        assert!(ctrl.steering_angle().0 > 29.0);
    }

    #[test]
    fn test_stationary_vehicle_cannot_turn() {
        let mut car = bare_car();
        let mut ctrl =
            VehicleController::new(VehicleConfig::default(), Point3::new(0.0, 0.5, 0.0));

        drive(&mut ctrl, &mut car, ControlInput::released().with_steer_left(), 600);
        assert_eq!(ctrl.yaw().0, 0.0);
        assert_eq!(ctrl.position(), Point3::new(0.0, 0.5, 0.0));
    }

    #[test]
    fn test_straight_drive_moves_along_heading() {
        let mut car = bare_car();
        let mut ctrl =
            VehicleController::new(VehicleConfig::default(), Point3::new(0.0, 0.5, 0.0));

        drive(&mut ctrl, &mut car, ControlInput::released().with_forward(), 300);
        let pos = ctrl.position();
        assert_eq!(pos.x, 0.0); // yaw 0 -> +Z
        assert!(pos.z > 5.0);

        // The root transform carries the integrated position.
        use cgmath::Transform;
        let origin = car.local.transform_point(Point3::new(0.0, 0.0, 0.0));
        assert_eq!(origin, pos);
    }

    #[test]
    fn test_missing_parts_degrade_to_noop() {
        let mut car = bare_car();
        let mut ctrl = VehicleController::new(VehicleConfig::default(), Point3::new(0.0, 0.5, 0.0))
            .with_front_wheels(&["FL_Wheel", "FR_Wheel"])
            .with_steering_wheel("SteeringWheel")
            .with_doors(&["LeftDoor"]);

        // No such children exist; the update must simply skip them.
        drive(&mut ctrl, &mut car, ControlInput::released().with_forward(), 60);
        assert!(ctrl.speed() > 0.0);
    }

    #[test]
    fn test_wheels_receive_roll_and_steer() {
        let mut car = bare_car();
        let mut wheel = Node::new("FL_Wheel");
        wheel.animator = Some(Animator::wheel(Point3::new(0.0, 0.0, 0.0)));
        car.add(wheel);

        let mut ctrl = VehicleController::new(VehicleConfig::default(), Point3::new(0.0, 0.5, 0.0))
            .with_front_wheels(&["FL_Wheel"]);

        let input = ControlInput::released().with_forward().with_steer_left();
        drive(&mut ctrl, &mut car, input, 120);

        let animator = car.find("FL_Wheel").unwrap().animator.as_ref().unwrap();
        match animator {
            Animator::RollSteer { roll, steer, .. } => {
                assert!(roll.0 != 0.0);
                assert!(steer.0 > 0.0);
            }
            _ => unreachable!(),
        }
    }
}
