//! Plants identified from feedforward gains.
//!
//! `kv` is volts per (unit/s), `ka` is volts per (unit/s²), as produced by a
//! characterization run: `V = kv·v + ka·a`.

use nalgebra as na;

use crate::error::{require_positive, ModelError};
use crate::system::linear_system::LinearSystem;

fn require_non_negative(name: &'static str, value: f64) -> Result<f64, ModelError> {
    if !value.is_finite() {
        return Err(ModelError::invalid(name, value, "must be finite"));
    }
    if value < 0.0 {
        return Err(ModelError::invalid(name, value, "must be >= 0"));
    }
    Ok(value)
}

/// States: `[velocity]`. Inputs: `[voltage]`. Outputs: `[velocity]`.
pub fn identify_velocity_system(kv: f64, ka: f64) -> Result<LinearSystem, ModelError> {
    let kv = require_non_negative("kv", kv)?;
    let ka = require_positive("ka", ka)?;

    LinearSystem::new(
        1,
        1,
        1,
        na::dmatrix![-kv / ka],
        na::dmatrix![1.0 / ka],
        na::dmatrix![1.0],
        na::dmatrix![0.0],
    )
}

/// States: `[position, velocity]`. Inputs: `[voltage]`. Outputs: `[position]`.
pub fn identify_position_system(kv: f64, ka: f64) -> Result<LinearSystem, ModelError> {
    let kv = require_non_negative("kv", kv)?;
    let ka = require_positive("ka", ka)?;

    LinearSystem::new(
        2,
        1,
        1,
        na::dmatrix![0.0, 1.0; 0.0, -kv / ka],
        na::dmatrix![0.0; 1.0 / ka],
        na::dmatrix![1.0, 0.0],
        na::dmatrix![0.0],
    )
}

/// Differential drive from linear and angular gains.
///
/// States: `[left velocity, right velocity]`. Inputs: `[left voltage, right voltage]`.
/// Outputs: `[left velocity, right velocity]`.
pub fn identify_drivetrain_system(
    kv_linear: f64,
    ka_linear: f64,
    kv_angular: f64,
    ka_angular: f64,
) -> Result<LinearSystem, ModelError> {
    let kv_linear = require_non_negative("kv_linear", kv_linear)?;
    let ka_linear = require_positive("ka_linear", ka_linear)?;
    let kv_angular = require_non_negative("kv_angular", kv_angular)?;
    let ka_angular = require_positive("ka_angular", ka_angular)?;

    let c = 0.5 / (ka_linear * ka_angular);
    let a1 = c * (-ka_linear * kv_angular - kv_linear * ka_angular);
    let a2 = c * (ka_linear * kv_angular - kv_linear * ka_angular);
    let b1 = c * (ka_linear + ka_angular);
    let b2 = c * (ka_angular - ka_linear);

    tracing::debug!(a1, a2, b1, b2, "identified drivetrain model");

    LinearSystem::new(
        2,
        2,
        2,
        na::dmatrix![a1, a2; a2, a1],
        na::dmatrix![b1, b2; b2, b1],
        na::DMatrix::identity(2, 2),
        na::DMatrix::zeros(2, 2),
    )
}
