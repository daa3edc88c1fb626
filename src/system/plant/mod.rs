//! Physical plant models built from DC motor constants or identified gains.

pub mod arm;
pub mod dc_motor;
pub mod drivetrain;
pub mod elevator;
pub mod flywheel;
pub mod identification;
