//! SI unit wrappers for plant parameters.
//!
//! Each quantity is a distinct type so a mass cannot be passed where a
//! moment of inertia is expected. Values cross into the model math through
//! [`value`](Ohms::value); speeds convert between rpm and rad/s with `From`.

use serde::{Deserialize, Serialize};

macro_rules! unit {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(f64);

        impl $name {
            pub const fn new(value: f64) -> Self {
                Self(value)
            }

            /// Raw value in SI units.
            pub const fn value(self) -> f64 {
                self.0
            }
        }
    };
}

unit!(
    /// Electrical resistance.
    Ohms
);
unit!(
    /// Electric potential.
    Volts
);
unit!(
    /// Electric current.
    Amperes
);
unit!(
    /// Torque.
    NewtonMeters
);
unit!(
    /// Angular velocity.
    RadiansPerSecond
);
unit!(RevolutionsPerMinute);
unit!(
    /// Moment of inertia.
    KilogramSquareMeters
);
unit!(Kilograms);
unit!(Meters);

impl From<RevolutionsPerMinute> for RadiansPerSecond {
    fn from(rpm: RevolutionsPerMinute) -> Self {
        Self(rpm.0 * std::f64::consts::TAU / 60.0)
    }
}

impl From<RadiansPerSecond> for RevolutionsPerMinute {
    fn from(speed: RadiansPerSecond) -> Self {
        Self(speed.0 * 60.0 / std::f64::consts::TAU)
    }
}
