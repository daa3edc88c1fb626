use nalgebra as na;

/// Read access to a continuous-time state-space model `x' = Ax + Bu`, `y = Cx + Du`.
pub trait StateSpaceModel {
    fn get_mat_a(&self) -> &na::DMatrix<f64>;
    fn get_mat_b(&self) -> &na::DMatrix<f64>;
    fn get_mat_c(&self) -> &na::DMatrix<f64>;
    fn get_mat_d(&self) -> &na::DMatrix<f64>;

    fn num_states(&self) -> usize {
        self.get_mat_a().nrows()
    }

    fn num_inputs(&self) -> usize {
        self.get_mat_b().ncols()
    }

    fn num_outputs(&self) -> usize {
        self.get_mat_c().nrows()
    }

    /// Largest input magnitude the plant accepts, if limited.
    fn max_input(&self) -> Option<f64> {
        None
    }
}
