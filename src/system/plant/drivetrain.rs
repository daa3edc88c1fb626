//! Differential drive, velocity states only.
//!
//! States: `[left velocity, right velocity]`. Inputs: `[left voltage, right voltage]`.
//! Outputs: `[left velocity, right velocity]`.

use nalgebra as na;

use crate::error::{require_nonzero, require_positive, ModelError};
use crate::system::linear_system::LinearSystem;
use crate::system::plant::dc_motor::DcMotor;
use crate::units::{KilogramSquareMeters, Kilograms, Meters};

/// Build the drivetrain velocity model.
///
/// `motor` is the gearbox on one side. `track_half_width` is the distance
/// from the robot center to each wheel.
pub fn drivetrain_velocity_system(
    motor: &DcMotor,
    mass: Kilograms,
    wheel_radius: Meters,
    track_half_width: Meters,
    moment_of_inertia: KilogramSquareMeters,
    gear_ratio: f64,
) -> Result<LinearSystem, ModelError> {
    let m = require_positive("mass", mass.value())?;
    let radius = require_positive("wheel_radius", wheel_radius.value())?;
    let rb = require_positive("track_half_width", track_half_width.value())?;
    let j = require_positive("moment_of_inertia", moment_of_inertia.value())?;
    let g = require_nonzero("gear_ratio", gear_ratio)?;
    let r = motor.resistance().value();

    let c1 = -g * g * motor.kt() * motor.kb() / (r * radius * radius);
    let c2 = g * motor.kt() / (r * radius);
    let c3 = 1.0 / m + rb * rb / j;
    let c4 = 1.0 / m - rb * rb / j;

    tracing::debug!(m, radius, rb, j, g, "drivetrain velocity model");

    LinearSystem::new(
        2,
        2,
        2,
        na::dmatrix![c3 * c1, c4 * c1; c4 * c1, c3 * c1],
        na::dmatrix![c3 * c2, c4 * c2; c4 * c2, c3 * c2],
        na::DMatrix::identity(2, 2),
        na::DMatrix::zeros(2, 2),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::plant::dc_motor::MotorPreset;
    use approx::assert_relative_eq;

    fn sys() -> LinearSystem {
        let motor = DcMotor::preset(MotorPreset::Cim, 2).unwrap();
        drivetrain_velocity_system(
            &motor,
            Kilograms::new(60.0),
            Meters::new(0.0762),
            Meters::new(0.35),
            KilogramSquareMeters::new(6.0),
            10.71,
        )
        .unwrap()
    }

    #[test]
    fn matrices_are_symmetric_between_sides() {
        let sys = sys();
        assert_relative_eq!(sys.a_at(0, 0), sys.a_at(1, 1));
        assert_relative_eq!(sys.a_at(0, 1), sys.a_at(1, 0));
        assert_relative_eq!(sys.b_at(0, 0), sys.b_at(1, 1));
        assert_relative_eq!(sys.b_at(0, 1), sys.b_at(1, 0));
    }

    #[test]
    fn same_side_voltage_accelerates_forward() {
        let sys = sys();
        assert!(sys.a_at(0, 0) < 0.0);
        assert!(sys.b_at(0, 0) > 0.0);
        assert_eq!(sys.c(), &na::DMatrix::<f64>::identity(2, 2));
        assert_eq!(sys.d(), &na::DMatrix::<f64>::zeros(2, 2));
    }

    #[test]
    fn rejects_zero_track_width() {
        let motor = DcMotor::preset(MotorPreset::Cim, 2).unwrap();
        let err = drivetrain_velocity_system(
            &motor,
            Kilograms::new(60.0),
            Meters::new(0.0762),
            Meters::new(0.0),
            KilogramSquareMeters::new(6.0),
            10.71,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ModelError::InvalidParameter { name: "track_half_width", .. }
        ));
    }

    #[test]
    fn rejects_overflowing_gear_ratio() {
        let motor = DcMotor::preset(MotorPreset::Cim, 2).unwrap();
        let err = drivetrain_velocity_system(
            &motor,
            Kilograms::new(60.0),
            Meters::new(0.0762),
            Meters::new(0.35),
            KilogramSquareMeters::new(6.0),
            1e200,
        )
        .unwrap_err();
        assert!(matches!(err, ModelError::InvalidParameter { name: "A", .. }));
    }
}
