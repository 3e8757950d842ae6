//! One-step-ahead forecast state derived from current conditions

use serde::{Deserialize, Serialize};

use super::{TrafficLevel, WeatherCondition};

/// Predicted traffic and weather for a single location.
///
/// Ephemeral: produced per planning request from the current snapshot and
/// discarded after the result is formatted. Never persisted.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct ForecastState {
    /// Predicted traffic level
    pub traffic: TrafficLevel,
    /// Predicted weather condition
    pub weather: WeatherCondition,
}

impl ForecastState {
    #[must_use]
    pub fn new(traffic: TrafficLevel, weather: WeatherCondition) -> Self {
        Self { traffic, weather }
    }
}
