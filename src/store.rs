//! Validated, immutable store of location records.
//!
//! The store is the single owner of all [`Location`] data. Graphs and path
//! results borrow from it or refer to it by name, so one loaded snapshot can
//! serve any number of concurrent planning queries.

use std::collections::HashMap;

use crate::error::RoutecastError;
use crate::models::{Location, TrafficLevel, WeatherCondition};
use crate::Result;

/// Immutable collection of validated location records, kept in load order.
#[derive(Debug, Clone)]
pub struct LocationStore {
    records: Vec<Location>,
    index: HashMap<String, usize>,
}

impl LocationStore {
    /// Load and validate a batch of location records.
    ///
    /// Fails on the first malformed record with a `Validation` error naming
    /// the record and field, or with `DuplicateLocation` if two records share
    /// a name. The input is expected to be already typed by the surrounding
    /// ingestion layer; this pass enforces the invariants the planner relies
    /// on.
    pub fn load(records: Vec<Location>) -> Result<Self> {
        let mut index = HashMap::with_capacity(records.len());

        for (position, record) in records.iter().enumerate() {
            validate_record(record)?;
            if index.insert(record.name.clone(), position).is_some() {
                return Err(RoutecastError::duplicate(&record.name));
            }
        }

        tracing::debug!(count = records.len(), "loaded location store");
        Ok(Self { records, index })
    }

    /// Look up a location by name.
    pub fn get(&self, name: &str) -> Result<&Location> {
        self.index
            .get(name)
            .map(|&position| &self.records[position])
            .ok_or_else(|| RoutecastError::not_found(name))
    }

    /// Iterate over all locations in load order.
    ///
    /// The iterator is lazy and restartable; call again for a fresh pass.
    pub fn all(&self) -> impl Iterator<Item = &Location> {
        self.records.iter()
    }

    /// Locations matching any of the given traffic levels AND any of the
    /// given weather conditions, in load order. An empty slice matches
    /// everything, mirroring an unfiltered dashboard view.
    pub fn filter(
        &self,
        traffic_levels: &[TrafficLevel],
        weather_conditions: &[WeatherCondition],
    ) -> Vec<&Location> {
        self.records
            .iter()
            .filter(|location| {
                (traffic_levels.is_empty() || traffic_levels.contains(&location.traffic))
                    && (weather_conditions.is_empty()
                        || weather_conditions.contains(&location.weather))
            })
            .collect()
    }

    /// Position of a named location in load order, if present.
    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Location at a load-order position.
    ///
    /// # Panics
    /// Panics if `position` is out of bounds; positions must come from this
    /// store.
    #[must_use]
    pub fn by_index(&self, position: usize) -> &Location {
        &self.records[position]
    }

    /// Number of locations in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no locations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn validate_record(record: &Location) -> Result<()> {
    if record.name.trim().is_empty() {
        return Err(RoutecastError::validation(
            &record.name,
            "name",
            "name must not be empty",
        ));
    }
    if !record.latitude.is_finite() || !(-90.0..=90.0).contains(&record.latitude) {
        return Err(RoutecastError::validation(
            &record.name,
            "latitude",
            format!("{} is outside -90..90", record.latitude),
        ));
    }
    if !record.longitude.is_finite() || !(-180.0..=180.0).contains(&record.longitude) {
        return Err(RoutecastError::validation(
            &record.name,
            "longitude",
            format!("{} is outside -180..180", record.longitude),
        ));
    }
    if !record.temperature_c.is_finite() {
        return Err(RoutecastError::validation(
            &record.name,
            "temperature_c",
            "temperature must be finite",
        ));
    }
    if !record.delay_minutes.is_finite() || record.delay_minutes < 0.0 {
        return Err(RoutecastError::validation(
            &record.name,
            "delay_minutes",
            format!("{} must be a non-negative number", record.delay_minutes),
        ));
    }
    Ok(())
}
