//! Single jointed arm, gravity neglected.
//!
//! States: `[angle, angular velocity]`. Inputs: `[voltage]`. Outputs: `[angle]`.

use nalgebra as na;

use crate::error::{require_nonzero, require_positive, ModelError};
use crate::system::linear_system::LinearSystem;
use crate::system::plant::dc_motor::DcMotor;
use crate::units::KilogramSquareMeters;

pub fn single_jointed_arm_system(
    motor: &DcMotor,
    moment_of_inertia: KilogramSquareMeters,
    gear_ratio: f64,
) -> Result<LinearSystem, ModelError> {
    let j = require_positive("moment_of_inertia", moment_of_inertia.value())?;
    let g = require_nonzero("gear_ratio", gear_ratio)?;
    let r = motor.resistance().value();

    let damping = -g * g * motor.kt() * motor.kb() / (r * j);
    let gain = g * motor.kt() / (r * j);

    tracing::debug!(j, g, damping, gain, "single jointed arm model");

    LinearSystem::new(
        2,
        1,
        1,
        na::dmatrix![0.0, 1.0; 0.0, damping],
        na::dmatrix![0.0; gain],
        na::dmatrix![1.0, 0.0],
        na::dmatrix![0.0],
    )
}
