use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ModelError};
use crate::system::linear_system::LinearSystem;
use crate::system::plant::dc_motor::{DcMotor, MotorPreset};
use crate::system::plant::flywheel::flywheel_system;
use crate::units::{
    Amperes, KilogramSquareMeters, NewtonMeters, Ohms, RevolutionsPerMinute, Volts,
};

// ---------------------------------------------------------------------------
// Serde default functions
// ---------------------------------------------------------------------------

const fn default_count() -> u32 {
    1
}
const fn default_voltage() -> f64 {
    12.0
}
const fn default_duration() -> f64 {
    1.0
}
const fn default_samples() -> usize {
    200
}

// ---------------------------------------------------------------------------
// MotorConfig
// ---------------------------------------------------------------------------

/// How the flywheel motor is described.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MotorConfig {
    /// Catalog motor, `count` of them in one gearbox.
    Preset {
        name: MotorPreset,
        #[serde(default = "default_count")]
        count: u32,
    },
    /// Raw datasheet values.
    Datasheet {
        nominal_voltage: Volts,
        stall_torque: NewtonMeters,
        stall_current: Amperes,
        free_current: Amperes,
        free_speed: RevolutionsPerMinute,
        #[serde(default = "default_count")]
        count: u32,
    },
    /// Electrical constants measured directly.
    Constants { resistance: Ohms, kt: f64, kb: f64 },
}

impl MotorConfig {
    pub fn build(&self) -> Result<DcMotor, ModelError> {
        match *self {
            Self::Preset { name, count } => DcMotor::preset(name, count),
            Self::Datasheet {
                nominal_voltage,
                stall_torque,
                stall_current,
                free_current,
                free_speed,
                count,
            } => DcMotor::new(
                nominal_voltage,
                stall_torque,
                stall_current,
                free_current,
                free_speed.into(),
                count,
            ),
            Self::Constants { resistance, kt, kb } => DcMotor::from_constants(resistance, kt, kb),
        }
    }
}

// ---------------------------------------------------------------------------
// PlotConfig
// ---------------------------------------------------------------------------

/// Step response plot settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotConfig {
    /// Step input voltage (default: 12 V).
    #[serde(default = "default_voltage")]
    pub voltage: f64,
    /// Plotted time span in seconds (default: 1.0).
    #[serde(default = "default_duration")]
    pub duration: f64,
    /// Number of points (default: 200).
    #[serde(default = "default_samples")]
    pub samples: usize,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            voltage: default_voltage(),
            duration: default_duration(),
            samples: default_samples(),
        }
    }
}

// ---------------------------------------------------------------------------
// FlywheelConfig
// ---------------------------------------------------------------------------

/// Flywheel plant description loaded by the `flywheel` binary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlywheelConfig {
    pub moment_of_inertia: KilogramSquareMeters,
    pub gear_ratio: f64,
    /// Input limit applied to the model, if any.
    #[serde(default)]
    pub max_voltage: Option<f64>,
    pub motor: MotorConfig,
    #[serde(default)]
    pub plot: PlotConfig,
}

impl Default for FlywheelConfig {
    fn default() -> Self {
        Self {
            moment_of_inertia: KilogramSquareMeters::new(0.002),
            gear_ratio: 1.0,
            max_voltage: Some(12.0),
            motor: MotorConfig::Preset {
                name: MotorPreset::Neo,
                count: 1,
            },
            plot: PlotConfig::default(),
        }
    }
}

impl FlywheelConfig {
    /// Validate plot settings. Physical parameters are checked by [`Self::build_model`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.plot.duration.is_finite() && self.plot.duration > 0.0) {
            return Err(ConfigError::InvalidValue {
                field: "plot.duration".into(),
                message: format!("{} (must be > 0)", self.plot.duration),
            });
        }
        if self.plot.samples < 2 {
            return Err(ConfigError::InvalidValue {
                field: "plot.samples".into(),
                message: format!("{} (must be >= 2)", self.plot.samples),
            });
        }
        if !self.plot.voltage.is_finite() {
            return Err(ConfigError::InvalidValue {
                field: "plot.voltage".into(),
                message: "must be finite".into(),
            });
        }
        if let Some(limit) = self.max_voltage {
            if self.plot.voltage.abs() > limit {
                return Err(ConfigError::InvalidValue {
                    field: "plot.voltage".into(),
                    message: format!("{} exceeds max_voltage {limit}", self.plot.voltage),
                });
            }
        }
        Ok(())
    }

    /// Parse from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from TOML file.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn build_model(&self) -> Result<LinearSystem, ModelError> {
        let motor = self.motor.build()?;
        let model = flywheel_system(&motor, self.moment_of_inertia, self.gear_ratio)?;
        match self.max_voltage {
            Some(limit) => model.with_input_limit(limit),
            None => Ok(model),
        }
    }
}
