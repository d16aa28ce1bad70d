//! Energy usage summary.

use serde::{Deserialize, Serialize};

/// Household consumption shown under the weather panel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnergyUsage {
    pub kilowatt_hours: f64,
}

impl EnergyUsage {
    /// Fixed demo figure; no metering backend exists.
    #[must_use]
    pub fn mock() -> Self {
        Self {
            kilowatt_hours: 2.3,
        }
    }
}

impl std::fmt::Display for EnergyUsage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1} kWh", self.kilowatt_hours)
    }
}
