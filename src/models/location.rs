//! Location model for geographic coordinates and monitored conditions

use serde::{Deserialize, Serialize};
use std::fmt;

/// Traffic density level reported for a location
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TrafficLevel {
    Low,
    Medium,
    High,
}

impl TrafficLevel {
    /// All levels, in increasing severity
    pub const ALL: [TrafficLevel; 3] = [TrafficLevel::Low, TrafficLevel::Medium, TrafficLevel::High];

    /// Map marker color for this level
    #[must_use]
    pub fn marker_color(self) -> &'static str {
        match self {
            TrafficLevel::Low => "green",
            TrafficLevel::Medium => "orange",
            TrafficLevel::High => "red",
        }
    }
}

impl fmt::Display for TrafficLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TrafficLevel::Low => "Low",
            TrafficLevel::Medium => "Medium",
            TrafficLevel::High => "High",
        };
        write!(f, "{name}")
    }
}

/// Weather condition reported for a location
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WeatherCondition {
    Sunny,
    Cloudy,
    Rainy,
    Foggy,
    Stormy,
}

impl WeatherCondition {
    /// All supported conditions
    pub const ALL: [WeatherCondition; 5] = [
        WeatherCondition::Sunny,
        WeatherCondition::Cloudy,
        WeatherCondition::Rainy,
        WeatherCondition::Foggy,
        WeatherCondition::Stormy,
    ];
}

impl fmt::Display for WeatherCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WeatherCondition::Sunny => "Sunny",
            WeatherCondition::Cloudy => "Cloudy",
            WeatherCondition::Rainy => "Rainy",
            WeatherCondition::Foggy => "Foggy",
            WeatherCondition::Stormy => "Stormy",
        };
        write!(f, "{name}")
    }
}

/// A monitored location with its current traffic and weather snapshot
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Location {
    /// Unique location name (junction, neighborhood, etc.)
    pub name: String,
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// Current traffic density
    pub traffic: TrafficLevel,
    /// Current weather condition
    pub weather: WeatherCondition,
    /// Temperature in Celsius
    pub temperature_c: f64,
    /// Estimated delay in minutes
    pub delay_minutes: f64,
    /// Whether an alternate route is known to exist
    pub alternate_route_available: bool,
}

impl Location {
    /// Create a new location with default conditions (low traffic, sunny)
    #[must_use]
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            latitude,
            longitude,
            traffic: TrafficLevel::Low,
            weather: WeatherCondition::Sunny,
            temperature_c: 0.0,
            delay_minutes: 0.0,
            alternate_route_available: false,
        }
    }

    /// Set the traffic level, builder-style
    #[must_use]
    pub fn with_traffic(mut self, traffic: TrafficLevel) -> Self {
        self.traffic = traffic;
        self
    }

    /// Set the weather condition, builder-style
    #[must_use]
    pub fn with_weather(mut self, weather: WeatherCondition) -> Self {
        self.weather = weather;
        self
    }

    /// Set temperature and estimated delay, builder-style
    #[must_use]
    pub fn with_conditions(mut self, temperature_c: f64, delay_minutes: f64) -> Self {
        self.temperature_c = temperature_c;
        self.delay_minutes = delay_minutes;
        self
    }

    /// Format location as coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}
