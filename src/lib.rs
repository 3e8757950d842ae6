//! `Routecast` - Route planning core for city traffic and weather monitoring
//!
//! This library builds a proximity graph over monitored locations, plans
//! primary and traffic-avoiding routes between them, and simulates a
//! short-term traffic/weather forecast for the result display. Data
//! ingestion and map rendering live in the surrounding application.

pub mod config;
pub mod error;
pub mod forecast;
pub mod formatter;
pub mod graph;
pub mod models;
pub mod planner;
pub mod store;

// Re-export core types for public API
pub use config::RoutecastConfig;
pub use error::RoutecastError;
pub use forecast::{predicted_high_traffic, ForecastSimulator};
pub use formatter::{format_route, RouteStop, RouteSummary};
pub use graph::{great_circle_km, Edge, Graph, ProximityGraphBuilder};
pub use models::{ForecastState, Location, TrafficLevel, WeatherCondition};
pub use planner::{alternative_path, primary_path, AvoidancePolicy, PathKind, PathResult};
pub use store::LocationStore;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, RoutecastError>;
