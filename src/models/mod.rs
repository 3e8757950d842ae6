//! Data models for locations, conditions, and forecasts

mod forecast;
mod location;

pub use forecast::ForecastState;
pub use location::{Location, TrafficLevel, WeatherCondition};
