//! Elevator carriage lifted by a motor-driven drum.
//!
//! States: `[position, velocity]`. Inputs: `[voltage]`. Outputs: `[position]`.

use nalgebra as na;

use crate::error::{require_nonzero, require_positive, ModelError};
use crate::system::linear_system::LinearSystem;
use crate::system::plant::dc_motor::DcMotor;
use crate::units::{Kilograms, Meters};

/// Build the elevator model. `gear_ratio` is motor turns per drum turn.
pub fn elevator_system(
    motor: &DcMotor,
    mass: Kilograms,
    drum_radius: Meters,
    gear_ratio: f64,
) -> Result<LinearSystem, ModelError> {
    let m = require_positive("mass", mass.value())?;
    let radius = require_positive("drum_radius", drum_radius.value())?;
    let g = require_nonzero("gear_ratio", gear_ratio)?;
    let r = motor.resistance().value();

    let damping = -g * g * motor.kt() * motor.kb() / (r * radius * radius * m);
    let gain = g * motor.kt() / (r * radius * m);

    tracing::debug!(m, radius, g, damping, gain, "elevator model");

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
