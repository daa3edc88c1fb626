use std::fmt;

use nalgebra as na;

use crate::error::{require_positive, ModelError};
use crate::system::model::StateSpaceModel;

/// Continuous-time linear time-invariant system.
///
/// ```text
/// x' = A x + B u
/// y  = C x + D u
/// ```
///
/// Dimensions are checked once in [`LinearSystem::new`]; the matrices are
/// never mutated afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct LinearSystem {
    states: usize,
    inputs: usize,
    outputs: usize,
    mat_a: na::DMatrix<f64>,
    mat_b: na::DMatrix<f64>,
    mat_c: na::DMatrix<f64>,
    mat_d: na::DMatrix<f64>,
    max_input: Option<f64>,
}

fn check_shape(
    matrix: &'static str,
    mat: &na::DMatrix<f64>,
    expected: (usize, usize),
) -> Result<(), ModelError> {
    let found = mat.shape();
    if found != expected {
        return Err(ModelError::DimensionMismatch {
            matrix,
            expected,
            found,
        });
    }
    Ok(())
}

fn check_finite(matrix: &'static str, mat: &na::DMatrix<f64>) -> Result<(), ModelError> {
    match mat.iter().find(|v| !v.is_finite()) {
        Some(&value) => Err(ModelError::invalid(matrix, value, "entries must be finite")),
        None => Ok(()),
    }
}

fn matrices_close(lhs: &na::DMatrix<f64>, rhs: &na::DMatrix<f64>, epsilon: f64) -> bool {
    lhs.shape() == rhs.shape()
        && lhs
            .iter()
            .zip(rhs.iter())
            .all(|(&l, &r)| approx::relative_eq!(l, r, epsilon = epsilon, max_relative = epsilon))
}

impl LinearSystem {
    /// Build a system from its four matrices.
    ///
    /// `a` must be `states x states`, `b` `states x inputs`, `c`
    /// `outputs x states` and `d` `outputs x inputs`. Every entry must be
    /// finite.
    pub fn new(
        states: usize,
        inputs: usize,
        outputs: usize,
        mat_a: na::DMatrix<f64>,
        mat_b: na::DMatrix<f64>,
        mat_c: na::DMatrix<f64>,
        mat_d: na::DMatrix<f64>,
    ) -> Result<LinearSystem, ModelError> {
        check_shape("A", &mat_a, (states, states))?;
        check_shape("B", &mat_b, (states, inputs))?;
        check_shape("C", &mat_c, (outputs, states))?;
        check_shape("D", &mat_d, (outputs, inputs))?;
        check_finite("A", &mat_a)?;
        check_finite("B", &mat_b)?;
        check_finite("C", &mat_c)?;
        check_finite("D", &mat_d)?;

        tracing::debug!(states, inputs, outputs, "linear system constructed");

        Ok(LinearSystem {
            states,
            inputs,
            outputs,
            mat_a,
            mat_b,
            mat_c,
            mat_d,
            max_input: None,
        })
    }

    /// Returns a copy of this system whose inputs are limited to `max_magnitude`.
    pub fn with_input_limit(self, max_magnitude: f64) -> Result<LinearSystem, ModelError> {
        let max_magnitude = require_positive("max_input", max_magnitude)?;
        Ok(LinearSystem {
            max_input: Some(max_magnitude),
            ..self
        })
    }

    pub fn states(&self) -> usize {
        self.states
    }

    pub fn inputs(&self) -> usize {
        self.inputs
    }

    pub fn outputs(&self) -> usize {
        self.outputs
    }

    /// System matrix.
    pub fn a(&self) -> &na::DMatrix<f64> {
        &self.mat_a
    }

    /// Input matrix.
    pub fn b(&self) -> &na::DMatrix<f64> {
        &self.mat_b
    }

    /// Output matrix.
    pub fn c(&self) -> &na::DMatrix<f64> {
        &self.mat_c
    }

    /// Feedthrough matrix.
    pub fn d(&self) -> &na::DMatrix<f64> {
        &self.mat_d
    }

    /// Element of A. Panics when out of bounds.
    pub fn a_at(&self, row: usize, col: usize) -> f64 {
        self.mat_a[(row, col)]
    }

    pub fn b_at(&self, row: usize, col: usize) -> f64 {
        self.mat_b[(row, col)]
    }

    pub fn c_at(&self, row: usize, col: usize) -> f64 {
        self.mat_c[(row, col)]
    }

    pub fn d_at(&self, row: usize, col: usize) -> f64 {
        self.mat_d[(row, col)]
    }

    pub fn max_input(&self) -> Option<f64> {
        self.max_input
    }

    /// Scale `u` down so its largest element sits at the input limit.
    ///
    /// The direction of `u` is preserved. Without a limit, or when `u` is
    /// already within it, `u` is returned unchanged.
    pub fn clamp_input(&self, u: &na::DVector<f64>) -> na::DVector<f64> {
        match self.max_input {
            Some(limit) => {
                let max_value = u.amax();
                if max_value > limit {
                    u.scale(limit / max_value)
                } else {
                    u.clone()
                }
            }
            None => u.clone(),
        }
    }

    /// Output equation `y = C x + D clamp(u)`.
    pub fn calculate_y(
        &self,
        x: &na::DVector<f64>,
        u: &na::DVector<f64>,
    ) -> Result<na::DVector<f64>, ModelError> {
        if x.len() != self.states {
            return Err(ModelError::DimensionMismatch {
                matrix: "x",
                expected: (self.states, 1),
                found: x.shape(),
            });
        }
        if u.len() != self.inputs {
            return Err(ModelError::DimensionMismatch {
                matrix: "u",
                expected: (self.inputs, 1),
                found: u.shape(),
            });
        }

        Ok(&self.mat_c * x + &self.mat_d * self.clamp_input(u))
    }

    /// Element-wise comparison of all four matrices within `epsilon`
    /// (absolute or relative, whichever is looser).
    pub fn approx_eq(&self, other: &LinearSystem, epsilon: f64) -> bool {
        self.states == other.states
            && self.inputs == other.inputs
            && self.outputs == other.outputs
            && matrices_close(&self.mat_a, &other.mat_a, epsilon)
            && matrices_close(&self.mat_b, &other.mat_b, epsilon)
            && matrices_close(&self.mat_c, &other.mat_c, epsilon)
            && matrices_close(&self.mat_d, &other.mat_d, epsilon)
    }
}

impl StateSpaceModel for LinearSystem {
    fn get_mat_a(&self) -> &na::DMatrix<f64> {
        &self.mat_a
    }

    fn get_mat_b(&self) -> &na::DMatrix<f64> {
        &self.mat_b
    }

    fn get_mat_c(&self) -> &na::DMatrix<f64> {
        &self.mat_c
    }

    fn get_mat_d(&self) -> &na::DMatrix<f64> {
        &self.mat_d
    }

    fn num_states(&self) -> usize {
        self.states
    }

    fn num_inputs(&self) -> usize {
        self.inputs
    }

    fn num_outputs(&self) -> usize {
        self.outputs
    }

    fn max_input(&self) -> Option<f64> {
        self.max_input
    }
}

impl fmt::Display for LinearSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Linear System:\nA:{}\nB:{}\nC:{}\nD:{}",
            self.mat_a, self.mat_b, self.mat_c, self.mat_d
        )
    }
}
