//! Renderer-facing route summaries.
//!
//! Converts a [`PathResult`] into an ordered list of display records with
//! the full current and predicted snapshot per stop. The output is plain
//! serializable data; the external map renderer receives coordinates, names,
//! and attributes but no graph internals.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{ForecastState, TrafficLevel, WeatherCondition};
use crate::planner::{PathKind, PathResult};
use crate::store::LocationStore;
use crate::Result;

/// One location on a formatted route, with its attribute snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteStop {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Current traffic level
    pub traffic: TrafficLevel,
    /// Marker color derived from the traffic level
    pub marker_color: String,
    /// Current weather condition
    pub weather: WeatherCondition,
    pub temperature_c: f64,
    pub delay_minutes: f64,
    pub alternate_route_available: bool,
    /// Predicted traffic, when a forecast was supplied for this stop
    pub predicted_traffic: Option<TrafficLevel>,
    /// Predicted weather, when a forecast was supplied for this stop
    pub predicted_weather: Option<WeatherCondition>,
}

/// A formatted route: metadata plus ordered stops.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteSummary {
    pub kind: PathKind,
    pub fell_back: bool,
    pub total_km: f64,
    /// When this summary was produced
    pub generated_at: DateTime<Utc>,
    pub stops: Vec<RouteStop>,
}

/// Map each location on the path to its full attribute snapshot.
///
/// Locations missing a forecast get `None` prediction fields. Fails with
/// `NotFound` if a path name is absent from the store, which only happens
/// when a path is formatted against a different snapshot than it was
/// planned on.
pub fn format_route(
    path: &PathResult,
    store: &LocationStore,
    forecasts: &BTreeMap<String, ForecastState>,
) -> Result<RouteSummary> {
    let mut stops = Vec::with_capacity(path.locations.len());

    for name in &path.locations {
        let location = store.get(name)?;
        let forecast = forecasts.get(name);

        stops.push(RouteStop {
            name: location.name.clone(),
            latitude: location.latitude,
            longitude: location.longitude,
            traffic: location.traffic,
            marker_color: location.traffic.marker_color().to_string(),
            weather: location.weather,
            temperature_c: location.temperature_c,
            delay_minutes: location.delay_minutes,
            alternate_route_available: location.alternate_route_available,
            predicted_traffic: forecast.map(|state| state.traffic),
            predicted_weather: forecast.map(|state| state.weather),
        });
    }

    Ok(RouteSummary {
        kind: path.kind,
        fell_back: path.fell_back,
        total_km: path.total_km,
        generated_at: Utc::now(),
        stops,
    })
}
