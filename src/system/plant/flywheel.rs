//! Flywheel driven by a DC motor through a gearbox.
//!
//! States: `[angular velocity]`. Inputs: `[voltage]`. Outputs: `[angular velocity]`.
//!
//! With `ω_motor = G·ω` and `τ = G·(Kt/R)·(V - Kb·ω_motor)`:
//!
//! ```text
//! ω' = -(G²·Kt·Kb / (R·J))·ω + (G·Kt / (R·J))·V
//! ```

use nalgebra as na;

use crate::error::{require_nonzero, require_positive, ModelError};
use crate::system::linear_system::LinearSystem;
use crate::system::plant::dc_motor::DcMotor;
use crate::units::KilogramSquareMeters;

/// Build the flywheel state-space model.
///
/// `moment_of_inertia` must be positive. `gear_ratio` is motor turns per
/// flywheel turn and must be non-zero; a negative ratio models reversed
/// gearing and flips the sign of B.
pub fn flywheel_system(
    motor: &DcMotor,
    moment_of_inertia: KilogramSquareMeters,
    gear_ratio: f64,
) -> Result<LinearSystem, ModelError> {
    let j = require_positive("moment_of_inertia", moment_of_inertia.value())?;
    let g = require_nonzero("gear_ratio", gear_ratio)?;
    let r = motor.resistance().value();

    let a = -g * g * motor.kt() * motor.kb() / (r * j);
    let b = g * motor.kt() / (r * j);

    tracing::debug!(j, g, a, b, "flywheel model");

    LinearSystem::new(
        1,
        1,
        1,
        na::dmatrix![a],
        na::dmatrix![b],
        na::dmatrix![1.0],
        na::dmatrix![0.0],
    )
}
