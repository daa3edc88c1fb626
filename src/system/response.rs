use crate::error::ModelError;
use crate::system::model::StateSpaceModel;

/// Closed-form step response of a stable single-state SISO model.
///
/// For `x' = a·x + b·u`, `y = c·x + d·u` starting from rest with a constant
/// input `u`:
///
/// ```text
/// y(t) = (-c·b/a)·(1 - e^(a·t))·u + d·u
/// ```
///
/// Inputs beyond the model's input limit are clamped to it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FirstOrderResponse {
    a: f64,
    b: f64,
    c: f64,
    d: f64,
    max_input: Option<f64>,
}

impl FirstOrderResponse {
    pub fn from_model(model: &impl StateSpaceModel) -> Result<FirstOrderResponse, ModelError> {
        let b_shape = (model.num_states(), model.num_inputs());
        if b_shape != (1, 1) {
            return Err(ModelError::DimensionMismatch {
                matrix: "B",
                expected: (1, 1),
                found: b_shape,
            });
        }
        if model.num_outputs() != 1 {
            return Err(ModelError::DimensionMismatch {
                matrix: "C",
                expected: (1, 1),
                found: (model.num_outputs(), model.num_states()),
            });
        }

        let a = model.get_mat_a()[(0, 0)];
        if a.is_nan() || a >= 0.0 {
            return Err(ModelError::invalid("A", a, "must be < 0 for a stable response"));
        }

        Ok(FirstOrderResponse {
            a,
            b: model.get_mat_b()[(0, 0)],
            c: model.get_mat_c()[(0, 0)],
            d: model.get_mat_d()[(0, 0)],
            max_input: model.max_input(),
        })
    }

    /// `input` clamped to the input limit, sign preserved.
    pub fn clamp_input(&self, input: f64) -> f64 {
        match self.max_input {
            Some(limit) if input.abs() > limit => limit.copysign(input),
            _ => input,
        }
    }

    /// Seconds to reach ~63% of the final value.
    pub fn time_constant(&self) -> f64 {
        -1.0 / self.a
    }

    /// Steady-state output per unit input.
    pub fn dc_gain(&self) -> f64 {
        -self.c * self.b / self.a + self.d
    }

    pub fn steady_state(&self, input: f64) -> f64 {
        self.dc_gain() * self.clamp_input(input)
    }

    /// Output `t` seconds after applying a constant `input` from rest.
    pub fn output_at(&self, t: f64, input: f64) -> f64 {
        let transient = -self.c * self.b / self.a * (1.0 - (self.a * t).exp());
        (transient + self.d) * self.clamp_input(input)
    }
}
