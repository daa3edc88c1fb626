//! Brushed DC motor characterization.
//!
//! Electrical model (steady state, inductance neglected):
//!
//! ```text
//! V = I·R + ω/Kv        τ = Kt·I
//! ```
//!
//! `Kb = 1/Kv` is the back-EMF constant in V·s/rad.

use serde::{Deserialize, Serialize};

use crate::error::{require_positive, ModelError};
use crate::units::{
    Amperes, NewtonMeters, Ohms, RadiansPerSecond, RevolutionsPerMinute, Volts,
};

/// Electromechanical constants of one or more identical DC motors in a gearbox.
///
/// Only the constructors can produce a value, so every motor carries positive
/// resistance and constants:
///
/// ```compile_fail
/// use flywheel_plant::system::plant::dc_motor::DcMotor;
/// use flywheel_plant::units::Ohms;
///
/// let good = DcMotor::from_constants(Ohms::new(0.5), 0.02, 0.02).unwrap();
/// let bad = DcMotor { resistance: Ohms::new(0.0), ..good };
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DcMotor {
    nominal_voltage: Volts,
    stall_torque: NewtonMeters,
    stall_current: Amperes,
    free_current: Amperes,
    free_speed: RadiansPerSecond,
    resistance: Ohms,
    kt: f64,
    kb: f64,
}

impl DcMotor {
    /// Derive motor constants from datasheet values.
    ///
    /// Stall torque, stall current and free current scale with `num_motors`.
    pub fn new(
        nominal_voltage: Volts,
        stall_torque: NewtonMeters,
        stall_current: Amperes,
        free_current: Amperes,
        free_speed: RadiansPerSecond,
        num_motors: u32,
    ) -> Result<DcMotor, ModelError> {
        if num_motors == 0 {
            return Err(ModelError::invalid("num_motors", 0.0, "must be >= 1"));
        }
        let n = f64::from(num_motors);

        let voltage = require_positive("nominal_voltage", nominal_voltage.value())?;
        let stall_torque = require_positive("stall_torque", stall_torque.value())? * n;
        let stall_current = require_positive("stall_current", stall_current.value())? * n;
        let free_current = require_positive("free_current", free_current.value())? * n;
        let free_speed = require_positive("free_speed", free_speed.value())?;

        let resistance = voltage / stall_current;
        let back_emf_voltage = voltage - resistance * free_current;
        if back_emf_voltage <= 0.0 {
            return Err(ModelError::invalid(
                "free_current",
                free_current,
                "must be below stall current",
            ));
        }
        let kv = free_speed / back_emf_voltage;
        let kt = stall_torque / stall_current;

        Ok(DcMotor {
            nominal_voltage: Volts::new(voltage),
            stall_torque: NewtonMeters::new(stall_torque),
            stall_current: Amperes::new(stall_current),
            free_current: Amperes::new(free_current),
            free_speed: RadiansPerSecond::new(free_speed),
            resistance: Ohms::new(resistance),
            kt,
            kb: 1.0 / kv,
        })
    }

    /// Build a motor directly from its electrical constants.
    ///
    /// Datasheet quantities are filled in for a 12 V supply with zero free
    /// current.
    pub fn from_constants(resistance: Ohms, kt: f64, kb: f64) -> Result<DcMotor, ModelError> {
        let r = require_positive("resistance", resistance.value())?;
        let kt = require_positive("kt", kt)?;
        let kb = require_positive("kb", kb)?;

        let voltage = 12.0;
        let stall_current = voltage / r;

        Ok(DcMotor {
            nominal_voltage: Volts::new(voltage),
            stall_torque: NewtonMeters::new(kt * stall_current),
            stall_current: Amperes::new(stall_current),
            free_current: Amperes::new(0.0),
            free_speed: RadiansPerSecond::new(voltage / kb),
            resistance: Ohms::new(r),
            kt,
            kb,
        })
    }

    /// Motor from a known catalog part.
    pub fn preset(preset: MotorPreset, num_motors: u32) -> Result<DcMotor, ModelError> {
        let (stall_torque, stall_current, free_current, free_rpm) = preset.datasheet();
        DcMotor::new(
            Volts::new(12.0),
            NewtonMeters::new(stall_torque),
            Amperes::new(stall_current),
            Amperes::new(free_current),
            RevolutionsPerMinute::new(free_rpm).into(),
            num_motors,
        )
    }

    /// Voltage at which the datasheet values were measured.
    pub fn nominal_voltage(&self) -> Volts {
        self.nominal_voltage
    }

    pub fn stall_torque(&self) -> NewtonMeters {
        self.stall_torque
    }

    pub fn stall_current(&self) -> Amperes {
        self.stall_current
    }

    pub fn free_current(&self) -> Amperes {
        self.free_current
    }

    pub fn free_speed(&self) -> RadiansPerSecond {
        self.free_speed
    }

    /// Winding resistance.
    pub fn resistance(&self) -> Ohms {
        self.resistance
    }

    /// Torque constant (N·m/A).
    pub fn kt(&self) -> f64 {
        self.kt
    }

    /// Back-EMF constant (V·s/rad).
    pub fn kb(&self) -> f64 {
        self.kb
    }

    /// Velocity constant (rad/s per volt).
    pub fn kv(&self) -> f64 {
        1.0 / self.kb
    }

    /// Current drawn at `speed` with `voltage` applied.
    pub fn current(&self, speed: RadiansPerSecond, voltage: Volts) -> Amperes {
        let r = self.resistance.value();
        Amperes::new(voltage.value() / r - speed.value() * self.kb / r)
    }

    /// Shaft torque produced by `current`.
    pub fn torque(&self, current: Amperes) -> NewtonMeters {
        NewtonMeters::new(self.kt * current.value())
    }
}

/// Catalog motors with published 12 V datasheet values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MotorPreset {
    Cim,
    MiniCim,
    Bag,
    Vex775Pro,
    Neo,
    Neo550,
    Falcon500,
}

impl MotorPreset {
    /// (stall torque N·m, stall current A, free current A, free speed rpm)
    const fn datasheet(self) -> (f64, f64, f64, f64) {
        match self {
            Self::Cim => (2.42, 133.0, 2.7, 5310.0),
            Self::MiniCim => (1.41, 89.0, 3.0, 5840.0),
            Self::Bag => (0.43, 53.0, 1.8, 13180.0),
            Self::Vex775Pro => (0.71, 134.0, 0.7, 18730.0),
            Self::Neo => (2.6, 105.0, 1.8, 5676.0),
            Self::Neo550 => (0.97, 100.0, 1.4, 11000.0),
            Self::Falcon500 => (4.69, 257.0, 1.5, 6380.0),
        }
    }
}
