//! Per-node animators.
//!
//! An [`Animator`] owns the animation state of exactly one node and
//! recomposes that node's local transform from scratch every tick - the
//! transform is replaced wholesale, never incrementally multiplied, so
//! floating-point drift cannot accumulate across frames.
//!
//! The animator kinds form a closed set: a spinning orbit, a steerable
//! rolling wheel, a swinging hinge and a sliding panel. Each variant holds
//! its own typed state, fixed at construction. The `rest` matrix is the
//! node's static placement (offset/scale in the parent frame, captured when
//! the scene is built); animation composes in front of it, so a scaled
//! wheel stays scaled while it rolls.

use cgmath::{Deg, Matrix4, Point3, SquareMatrix, Vector3};

use crate::transform;

/// Procedural animation state for one node.
#[derive(Debug, Clone, Copy)]
pub enum Animator {
    /// Continuous spin around an axis: `angle = (angle + speed * dt) mod
    /// 360`. Deterministic, and reversible by negating the speed.
    Orbit {
        angle: Deg<f32>,
        /// Degrees per second.
        speed: Deg<f32>,
        axis: Vector3<f32>,
        rest: Matrix4<f32>,
    },
    /// A wheel: steered around `steer_axis`, rolled around `roll_axis`,
    /// both about `pivot`. The owning controller feeds `steer` and `roll`;
    /// the animator only recomposes the transform.
    RollSteer {
        roll: Deg<f32>,
        steer: Deg<f32>,
        roll_axis: Vector3<f32>,
        steer_axis: Vector3<f32>,
        pivot: Point3<f32>,
        rest: Matrix4<f32>,
    },
    /// A door on a hinge: the angle eases toward `target` and stays within
    /// [0, swing].
    Hinge {
        angle: Deg<f32>,
        target: Deg<f32>,
        swing: Deg<f32>,
        /// First-order filter gain (per second).
        rate: f32,
        axis: Vector3<f32>,
        pivot: Point3<f32>,
        rest: Matrix4<f32>,
    },
    /// A panel sliding along a direction: the offset eases toward `target`
    /// and stays within [0, travel].
    Slide {
        offset: f32,
        target: f32,
        travel: f32,
        rate: f32,
        direction: Vector3<f32>,
        rest: Matrix4<f32>,
    },
}

impl Animator {
    /// A spin of `speed` degrees per second around `axis`.
    pub fn orbit(speed: Deg<f32>, axis: Vector3<f32>) -> Self {
        Animator::Orbit {
            angle: Deg(0.0),
            speed,
            axis,
            rest: Matrix4::identity(),
        }
    }

    /// A road wheel pivoting at `pivot`: steering around Y, rolling
    /// around X.
    pub fn wheel(pivot: Point3<f32>) -> Self {
        Animator::RollSteer {
            roll: Deg(0.0),
            steer: Deg(0.0),
            roll_axis: Vector3::unit_x(),
            steer_axis: Vector3::unit_y(),
            pivot,
            rest: Matrix4::identity(),
        }
    }

    /// A steering-wheel column: turned around Z, no roll.
    pub fn steering_column() -> Self {
        Animator::RollSteer {
            roll: Deg(0.0),
            steer: Deg(0.0),
            roll_axis: Vector3::unit_x(),
            steer_axis: Vector3::unit_z(),
            pivot: Point3::new(0.0, 0.0, 0.0),
            rest: Matrix4::identity(),
        }
    }

    /// A hinged door swinging up to `swing` around `axis` at `pivot`.
    pub fn hinge(swing: Deg<f32>, rate: f32, axis: Vector3<f32>, pivot: Point3<f32>) -> Self {
        Animator::Hinge {
            angle: Deg(0.0),
            target: Deg(0.0),
            swing,
            rate,
            axis,
            pivot,
            rest: Matrix4::identity(),
        }
    }

    /// A panel sliding `travel` units along `direction`.
    pub fn slide(travel: f32, rate: f32, direction: Vector3<f32>) -> Self {
        Animator::Slide {
            offset: 0.0,
            target: 0.0,
            travel,
            rate,
            direction,
            rest: Matrix4::identity(),
        }
    }

    /// Sets the static placement composed behind the animated transform.
    pub fn with_rest(mut self, rest_transform: Matrix4<f32>) -> Self {
        match &mut self {
            Animator::Orbit { rest, .. }
            | Animator::RollSteer { rest, .. }
            | Animator::Hinge { rest, .. }
            | Animator::Slide { rest, .. } => *rest = rest_transform,
        }
        self
    }

    /// Drives a hinge or slide toward its open or closed position. No-op
    /// for the other kinds.
    pub fn set_open(&mut self, open: bool) {
        match self {
            Animator::Hinge { target, swing, .. } => {
                *target = if open { *swing } else { Deg(0.0) };
            }
            Animator::Slide { target, travel, .. } => {
                *target = if open { *travel } else { 0.0 };
            }
            _ => {}
        }
    }

    /// Sets the steering deflection of a wheel or column. No-op for the
    /// other kinds.
    pub fn set_steer(&mut self, angle: Deg<f32>) {
        if let Animator::RollSteer { steer, .. } = self {
            *steer = angle;
        }
    }

    /// Accumulates rolling rotation on a wheel, wrapping at 360 degrees.
    /// No-op for the other kinds.
    pub fn add_roll(&mut self, delta: Deg<f32>) {
        if let Animator::RollSteer { roll, .. } = self {
            *roll = Deg((roll.0 + delta.0).rem_euclid(360.0));
        }
    }

    /// Advances internal state by `dt` seconds and returns the node's new
    /// local transform.
    pub fn advance(&mut self, dt: f32) -> Matrix4<f32> {
        match self {
            Animator::Orbit {
                angle,
                speed,
                axis,
                rest,
            } => {
                *angle = Deg((angle.0 + speed.0 * dt).rem_euclid(360.0));
                transform::rotate(*angle, *axis) * *rest
            }
            Animator::RollSteer {
                roll,
                steer,
                roll_axis,
                steer_axis,
                pivot,
                rest,
            } => {
                let offset = Vector3::new(pivot.x, pivot.y, pivot.z);
                Matrix4::from_translation(offset)
                    * transform::rotate(*steer, *steer_axis)
                    * transform::rotate(*roll, *roll_axis)
                    * Matrix4::from_translation(-offset)
                    * *rest
            }
            Animator::Hinge {
                angle,
                target,
                swing,
                rate,
                axis,
                pivot,
                rest,
            } => {
                let next = angle.0 + (target.0 - angle.0) * *rate * dt;
                *angle = Deg(next.clamp(0.0, swing.0));
                transform::rotate_about(*angle, *axis, *pivot) * *rest
            }
            Animator::Slide {
                offset,
                target,
                travel,
                rate,
                direction,
                rest,
            } => {
                let next = *offset + (*target - *offset) * *rate * dt;
                *offset = next.clamp(0.0, *travel);
                Matrix4::from_translation(*direction * *offset) * *rest
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Transform;

    #[test]
    fn test_orbit_wraps_at_full_turn() {
        let mut spin = Animator::orbit(Deg(90.0), Vector3::unit_y());
        for _ in 0..5 {
            spin.advance(1.0);
        }
        if let Animator::Orbit { angle, .. } = spin {
            assert!((angle.0 - 90.0).abs() < 1e-3); // 450 mod 360
        } else {
            unreachable!();
        }
    }

    #[test]
    fn test_orbit_is_reversible_by_negating_speed() {
        let mut forward = Animator::orbit(Deg(45.0), Vector3::unit_y());
        let mut backward = Animator::orbit(Deg(-45.0), Vector3::unit_y());
        forward.advance(1.0);
        backward.advance(1.0);

        let (a, b) = match (forward, backward) {
            (Animator::Orbit { angle: a, .. }, Animator::Orbit { angle: b, .. }) => (a, b),
            _ => unreachable!(),
        };
        assert!((a.0 + b.0 - 360.0).abs() < 1e-3 || (a.0 + b.0).abs() < 1e-3);
    }

    #[test]
    fn test_wheel_pivot_stays_fixed_while_rolling() {
        let pivot = Point3::new(1.1, 0.3, 1.5);
        let mut wheel = Animator::wheel(pivot);
        wheel.set_steer(Deg(25.0));
        wheel.add_roll(Deg(117.0));

        let local = wheel.advance(0.016);
        let mapped = local.transform_point(pivot);
        assert!((mapped.x - pivot.x).abs() < 1e-4);
        assert!((mapped.y - pivot.y).abs() < 1e-4);
        assert!((mapped.z - pivot.z).abs() < 1e-4);
    }

    #[test]
    fn test_wheel_roll_wraps() {
        let mut wheel = Animator::wheel(Point3::new(0.0, 0.0, 0.0));
        wheel.add_roll(Deg(350.0));
        wheel.add_roll(Deg(20.0));
        if let Animator::RollSteer { roll, .. } = wheel {
            assert!((roll.0 - 10.0).abs() < 1e-3);
        } else {
            unreachable!();
        }
    }

    #[test]
    fn test_rest_transform_survives_animation() {
        // A wheel scaled in its rest pose must stay scaled as it turns.
        let rest = transform::scale(0.5, 1.2, 1.2);
        let mut wheel =
            Animator::wheel(Point3::new(0.0, 0.0, 0.0)).with_rest(rest);
        wheel.add_roll(Deg(90.0));
        let local = wheel.advance(0.016);

        // The X half-extent is unaffected by a roll around X.
        let tip = local.transform_point(Point3::new(1.0, 0.0, 0.0));
        assert!((tip.x - 0.5).abs() < 1e-4);
    }

    #[test]
    fn test_hinge_angle_stays_bounded_under_mid_flight_toggles() {
        let mut door = Animator::hinge(
            Deg(45.0),
            2.0,
            Vector3::unit_y(),
            Point3::new(0.0, 0.0, 0.0),
        );

        door.set_open(true);
        for step in 0..200 {
            if step == 10 {
                door.set_open(false); // toggle well before convergence
            }
            if step == 14 {
                door.set_open(true);
            }
            door.advance(0.016);
            if let Animator::Hinge { angle, swing, .. } = door {
                assert!(angle.0 >= 0.0 && angle.0 <= swing.0);
            }
        }
    }

    #[test]
    fn test_hinge_converges_toward_target_without_overshoot() {
        let mut door = Animator::hinge(
            Deg(45.0),
            2.0,
            Vector3::unit_y(),
            Point3::new(0.0, 0.0, 0.0),
        );
        door.set_open(true);

        let mut previous = 0.0;
        for _ in 0..600 {
            door.advance(0.016);
            if let Animator::Hinge { angle, .. } = door {
                assert!(angle.0 >= previous); // monotone while opening
                previous = angle.0;
            }
        }
        assert!(previous > 44.0 && previous <= 45.0);
    }

    #[test]
    fn test_slide_eases_toward_travel_and_back() {
        let mut gate = Animator::slide(2.5, 2.0, Vector3::unit_y());
        gate.set_open(true);
        for _ in 0..600 {
            gate.advance(0.016);
        }
        let raised = match gate {
            Animator::Slide { offset, .. } => offset,
            _ => unreachable!(),
        };
        assert!(raised > 2.4 && raised <= 2.5);

        gate.set_open(false);
        for _ in 0..600 {
            gate.advance(0.016);
        }
        if let Animator::Slide { offset, .. } = gate {
            assert!(offset < 0.1);
        }
    }
}
