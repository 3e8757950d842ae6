//! Error types and handling for the `Routecast` planning core

use thiserror::Error;

/// Main error type for the `Routecast` library
#[derive(Error, Debug)]
pub enum RoutecastError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// A location record failed validation
    #[error("Invalid record '{name}': {field}: {message}")]
    Validation {
        name: String,
        field: &'static str,
        message: String,
    },

    /// Two records share the same location name
    #[error("Duplicate location name '{name}'")]
    DuplicateLocation { name: String },

    /// A requested location name is unknown
    #[error("Location '{name}' not found")]
    NotFound { name: String },

    /// Fewer than two locations were supplied to the graph builder
    #[error("Cannot build graph from {count} location(s), need at least 2")]
    EmptyGraph { count: usize },

    /// Start and destination are not connected, even ignoring traffic
    #[error("No path between '{start}' and '{destination}'")]
    NoPath { start: String, destination: String },
}

impl RoutecastError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new validation error for a named record and field
    pub fn validation<N, M>(name: N, field: &'static str, message: M) -> Self
    where
        N: Into<String>,
        M: Into<String>,
    {
        Self::Validation {
            name: name.into(),
            field,
            message: message.into(),
        }
    }

    /// Create a new duplicate-location error
    pub fn duplicate<S: Into<String>>(name: S) -> Self {
        Self::DuplicateLocation { name: name.into() }
    }

    /// Create a new not-found error
    pub fn not_found<S: Into<String>>(name: S) -> Self {
        Self::NotFound { name: name.into() }
    }

    /// Create a new no-path error
    pub fn no_path<S: Into<String>, D: Into<String>>(start: S, destination: D) -> Self {
        Self::NoPath {
            start: start.into(),
            destination: destination.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            RoutecastError::Config { .. } => {
                "Configuration error. Please check the planner settings.".to_string()
            }
            RoutecastError::Validation { name, field, .. } => {
                format!("Location record '{name}' has an invalid value for {field}.")
            }
            RoutecastError::DuplicateLocation { name } => {
                format!("Location '{name}' appears more than once in the input data.")
            }
            RoutecastError::NotFound { name } => {
                format!("Unknown location '{name}'. Check the spelling against the loaded data.")
            }
            RoutecastError::EmptyGraph { .. } => {
                "Not enough locations to plan a route. At least two are required.".to_string()
            }
            RoutecastError::NoPath { start, destination } => {
                format!(
                    "No route exists between '{start}' and '{destination}'. \
                     Try a larger proximity threshold."
                )
            }
        }
    }
}
