//! Short-term traffic and weather forecast simulation.
//!
//! The transition model is declared, not learned: only High traffic is
//! volatile (redrawn uniformly over all levels), anything calmer is assumed
//! to persist for the next step. Predicted weather is drawn uniformly and
//! independently of the current condition.
//!
//! All entropy comes from the generator passed by the caller, so a fixed
//! seed reproduces the exact forecast set.

use std::collections::{BTreeMap, BTreeSet};

use rand::RngExt;

use crate::models::{ForecastState, Location, TrafficLevel, WeatherCondition};
use crate::store::LocationStore;

/// Produces one-step-ahead [`ForecastState`] values for locations.
#[derive(Debug, Clone, Copy, Default)]
pub struct ForecastSimulator;

impl ForecastSimulator {
    /// Predict the next traffic and weather state for one location.
    pub fn predict(&self, location: &Location, rng: &mut impl RngExt) -> ForecastState {
        let traffic = match location.traffic {
            TrafficLevel::High => {
                TrafficLevel::ALL[rng.random_range(0..TrafficLevel::ALL.len())]
            }
            stable => stable,
        };
        let weather = WeatherCondition::ALL[rng.random_range(0..WeatherCondition::ALL.len())];

        ForecastState::new(traffic, weather)
    }

    /// Predict the next state for every location in the store.
    ///
    /// Locations are visited in name order, so the entropy each one consumes
    /// is independent of load order and a fixed seed yields a fixed map.
    pub fn predict_all(
        &self,
        store: &LocationStore,
        rng: &mut impl RngExt,
    ) -> BTreeMap<String, ForecastState> {
        let mut locations: Vec<&Location> = store.all().collect();
        locations.sort_by(|a, b| a.name.cmp(&b.name));

        locations
            .into_iter()
            .map(|location| (location.name.clone(), self.predict(location, rng)))
            .collect()
    }
}

/// Names whose predicted traffic is High, for feeding an explicit avoidance
/// set from a forecast rather than from current conditions.
#[must_use]
pub fn predicted_high_traffic(forecasts: &BTreeMap<String, ForecastState>) -> BTreeSet<String> {
    forecasts
        .iter()
        .filter(|(_, state)| state.traffic == TrafficLevel::High)
        .map(|(name, _)| name.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn high_traffic_location() -> Location {
        Location::new("Koyambedu", 13.0694, 80.1948).with_traffic(TrafficLevel::High)
    }

    #[test]
    fn test_fixed_seed_reproduces_prediction() {
        let simulator = ForecastSimulator;
        let location = high_traffic_location();

        let mut rng = StdRng::seed_from_u64(42);
        let first = simulator.predict(&location, &mut rng);

        let mut rng = StdRng::seed_from_u64(42);
        let second = simulator.predict(&location, &mut rng);

        assert_eq!(first, second);
    }

    #[test]
    fn test_calm_traffic_predicts_itself() {
        let simulator = ForecastSimulator;
        let low = Location::new("Besant Nagar", 13.0003, 80.2666);
        let medium = low.clone().with_traffic(TrafficLevel::Medium);

        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            assert_eq!(simulator.predict(&low, &mut rng).traffic, TrafficLevel::Low);

            let mut rng = StdRng::seed_from_u64(seed);
            assert_eq!(
                simulator.predict(&medium, &mut rng).traffic,
                TrafficLevel::Medium
            );
        }
    }

    #[test]
    fn test_high_traffic_is_volatile_across_seeds() {
        let simulator = ForecastSimulator;
        let location = high_traffic_location();

        let mut seen = BTreeSet::new();
        for seed in 0..64 {
            let mut rng = StdRng::seed_from_u64(seed);
            seen.insert(simulator.predict(&location, &mut rng).traffic);
        }
        // Uniform over three levels: 64 seeds landing on one value is not credible
        assert!(seen.len() > 1, "expected divergent predictions, got {seen:?}");
    }

    #[test]
    fn test_weather_drawn_independently_of_current() {
        let simulator = ForecastSimulator;
        let location = high_traffic_location().with_weather(WeatherCondition::Stormy);

        let mut seen = BTreeSet::new();
        for seed in 0..64 {
            let mut rng = StdRng::seed_from_u64(seed);
            seen.insert(simulator.predict(&location, &mut rng).weather);
        }
        assert!(seen.len() > 1, "expected varied weather, got {seen:?}");
    }

    #[test]
    fn test_predict_all_ignores_load_order() {
        let simulator = ForecastSimulator;
        let records = vec![
            Location::new("A", 13.00, 80.20).with_traffic(TrafficLevel::High),
            Location::new("B", 13.01, 80.21).with_traffic(TrafficLevel::High),
            Location::new("C", 13.02, 80.22),
        ];
        let mut reversed = records.clone();
        reversed.reverse();

        let forward = LocationStore::load(records).unwrap();
        let backward = LocationStore::load(reversed).unwrap();

        let mut rng = StdRng::seed_from_u64(7);
        let first = simulator.predict_all(&forward, &mut rng);
        let mut rng = StdRng::seed_from_u64(7);
        let second = simulator.predict_all(&backward, &mut rng);

        assert_eq!(first, second);
    }

    #[test]
    fn test_predicted_high_traffic_extraction() {
        let mut forecasts = BTreeMap::new();
        forecasts.insert(
            "A".to_string(),
            ForecastState::new(TrafficLevel::High, WeatherCondition::Sunny),
        );
        forecasts.insert(
            "B".to_string(),
            ForecastState::new(TrafficLevel::Low, WeatherCondition::Rainy),
        );
        forecasts.insert(
            "C".to_string(),
            ForecastState::new(TrafficLevel::High, WeatherCondition::Foggy),
        );

        let high = predicted_high_traffic(&forecasts);
        assert_eq!(high.into_iter().collect::<Vec<_>>(), ["A", "C"]);
    }
}
