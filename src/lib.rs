//! Continuous-time state-space plant models for motor-driven mechanisms.
//!
//! ```
//! use flywheel_plant::system::plant::dc_motor::DcMotor;
//! use flywheel_plant::system::plant::flywheel::flywheel_system;
//! use flywheel_plant::units::{KilogramSquareMeters, Ohms};
//!
//! let motor = DcMotor::from_constants(Ohms::new(0.5), 0.02, 0.02).unwrap();
//! let model = flywheel_system(&motor, KilogramSquareMeters::new(0.001), 1.0).unwrap();
//! assert!((model.a_at(0, 0) + 0.8).abs() < 1e-9);
//! assert!((model.b_at(0, 0) - 40.0).abs() < 1e-9);
//! ```

pub mod config;
pub mod error;
pub mod system;
pub mod units;
