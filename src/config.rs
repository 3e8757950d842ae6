//! Configuration surface for the planning core.
//!
//! A plain serializable settings struct with per-field defaults and a
//! validation pass. Loading from files or the environment belongs to the
//! embedding application; the core performs no I/O.

use serde::{Deserialize, Serialize};

use crate::error::RoutecastError;
use crate::planner::AvoidancePolicy;
use crate::Result;

/// Settings for graph construction, forecasting, and avoidance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutecastConfig {
    /// Maximum great-circle distance for two locations to be connected, km
    #[serde(default = "default_proximity_threshold_km")]
    pub proximity_threshold_km: f64,
    /// Seed for the forecast generator; `None` means the caller seeds from
    /// entropy and runs are not reproducible
    #[serde(default)]
    pub forecast_seed: Option<u64>,
    /// How the alternative-path query selects locations to avoid
    #[serde(default)]
    pub avoidance: AvoidancePolicy,
}

fn default_proximity_threshold_km() -> f64 {
    5.0
}

impl Default for RoutecastConfig {
    fn default() -> Self {
        Self {
            proximity_threshold_km: default_proximity_threshold_km(),
            forecast_seed: None,
            avoidance: AvoidancePolicy::default(),
        }
    }
}

impl RoutecastConfig {
    /// Validate all settings.
    pub fn validate(&self) -> Result<()> {
        if !self.proximity_threshold_km.is_finite() {
            return Err(RoutecastError::config(
                "Proximity threshold must be a finite number",
            ));
        }
        if self.proximity_threshold_km <= 0.0 {
            return Err(RoutecastError::config(format!(
                "Proximity threshold must be positive, got {}",
                self.proximity_threshold_km
            )));
        }
        if self.proximity_threshold_km > 500.0 {
            return Err(RoutecastError::config(
                "Proximity threshold cannot exceed 500 km",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RoutecastConfig::default();
        assert_eq!(config.proximity_threshold_km, 5.0);
        assert!(config.forecast_seed.is_none());
        assert_eq!(config.avoidance, AvoidancePolicy::HighTraffic);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let config: RoutecastConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, RoutecastConfig::default());

        let config: RoutecastConfig =
            serde_json::from_str(r#"{"proximity_threshold_km": 2.5, "forecast_seed": 7}"#)
                .unwrap();
        assert_eq!(config.proximity_threshold_km, 2.5);
        assert_eq!(config.forecast_seed, Some(7));
    }

    #[test]
    fn test_validation_rejects_bad_thresholds() {
        let mut config = RoutecastConfig::default();

        config.proximity_threshold_km = 0.0;
        assert!(config.validate().is_err());

        config.proximity_threshold_km = -1.0;
        assert!(config.validate().is_err());

        config.proximity_threshold_km = f64::NAN;
        assert!(config.validate().is_err());

        config.proximity_threshold_km = 501.0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("cannot exceed"));
    }
}
