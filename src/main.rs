use anyhow::{Context, Result};
use rand::{rngs::StdRng, SeedableRng};
use tracing_subscriber::EnvFilter;

use routecast::{
    alternative_path, format_route, primary_path, ForecastSimulator, Location, LocationStore,
    ProximityGraphBuilder, RoutecastConfig, TrafficLevel, WeatherCondition,
};

/// Small inline snapshot of monitored junctions; the real application feeds
/// records from its CSV ingestion layer.
fn sample_records() -> Vec<Location> {
    vec![
        Location::new("Guindy", 13.0067, 80.2206)
            .with_weather(WeatherCondition::Cloudy)
            .with_conditions(30.5, 5.0),
        Location::new("Saidapet", 13.0213, 80.2231)
            .with_traffic(TrafficLevel::High)
            .with_weather(WeatherCondition::Rainy)
            .with_conditions(29.8, 18.0),
        Location::new("Nandanam", 13.0298, 80.2343)
            .with_traffic(TrafficLevel::Medium)
            .with_conditions(30.9, 7.5),
        Location::new("Teynampet", 13.0390, 80.2439)
            .with_traffic(TrafficLevel::High)
            .with_weather(WeatherCondition::Stormy)
            .with_conditions(29.2, 22.0),
        Location::new("Adyar", 13.0064, 80.2575)
            .with_conditions(31.1, 3.0),
        Location::new("Mylapore", 13.0339, 80.2687)
            .with_weather(WeatherCondition::Sunny)
            .with_conditions(31.4, 6.0),
    ]
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = RoutecastConfig::default();
    config.validate().context("Invalid configuration")?;

    let store = LocationStore::load(sample_records()).context("Failed to load locations")?;
    let graph = ProximityGraphBuilder::build(&store, config.proximity_threshold_km)
        .context("Failed to build proximity graph")?;

    println!(
        "Connected {} locations with {} edges (threshold {:.1} km)",
        graph.node_count(),
        graph.edge_count(),
        graph.threshold_km()
    );

    let mut rng = match config.forecast_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    };
    let forecasts = ForecastSimulator.predict_all(&store, &mut rng);

    let (start, destination) = ("Guindy", "Mylapore");
    let primary = primary_path(&graph, start, destination)?;
    let alternative = alternative_path(&graph, start, destination, &config.avoidance)?;

    println!(
        "\nPrimary route {} -> {} ({:.2} km): {}",
        start,
        destination,
        primary.total_km,
        primary.locations.join(" -> ")
    );
    if alternative.fell_back {
        println!("No traffic-avoiding route exists; reusing the primary route");
    } else {
        println!(
            "Avoiding route ({:.2} km): {}",
            alternative.total_km,
            alternative.locations.join(" -> ")
        );
    }

    let summary = format_route(&alternative, &store, &forecasts)?;
    for stop in &summary.stops {
        println!(
            "  {} [{}] {} - {:.1}C, {:.0} min delay",
            stop.name, stop.marker_color, stop.weather, stop.temperature_c, stop.delay_minutes
        );
    }

    let payload =
        serde_json::to_string_pretty(&summary).context("Failed to serialize route summary")?;
    println!("\nRenderer payload:\n{payload}");

    Ok(())
}
