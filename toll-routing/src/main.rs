use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use toll_routing::directions::{DirectionsClient, DirectionsConfig, RouteDistanceService};
use toll_routing::domain::{Coordinate, RouteOptions, Waypoint};
use toll_routing::geometry::{
    CompassDirection, DistanceUnit, bearing, bounding_box, centroid, route_length,
};
use toll_routing::normalize::{format_coordinate, parse_free_text};
use toll_routing::quota::{QuotaConfig, QuotaGovernor};
use toll_routing::toll::{encode_route_options, encode_waypoints};

/// Padding around the printed bounding box.
const BOX_PADDING_KM: f64 = 5.0;

/// Reads one `lat,lon` pair per line from stdin and prints route analytics
/// plus the toll service payloads for the resulting stops.
///
/// The quota counters live in this process only, so the daily and monthly
/// ceilings apply within one run and start from zero on the next. Enforcing
/// them across invocations needs a persistent [`CounterStore`] passed to
/// [`QuotaGovernor::with_parts`].
///
/// [`CounterStore`]: toll_routing::quota::CounterStore
#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let points = match read_points().await {
        Ok(points) => points,
        Err(e) => {
            eprintln!("Failed to read stdin: {e}");
            std::process::exit(1);
        }
    };
    if points.is_empty() {
        eprintln!("No valid coordinates on stdin (expected one \"lat,lon\" per line)");
        std::process::exit(1);
    }
    info!(points = points.len(), "read route");

    let km = route_length(&points, DistanceUnit::Kilometers);
    println!("Points:        {}", points.len());
    println!("Length:        {km} km");

    let bbox = bounding_box(&points, BOX_PADDING_KM);
    println!(
        "Bounding box:  [{}, {}] .. [{}, {}]",
        bbox.min_lat, bbox.min_lon, bbox.max_lat, bbox.max_lon
    );
    let center = centroid(&points);
    println!(
        "Centroid:      {}",
        format_coordinate(center.lat(), center.lon(), 6)
    );

    for (i, leg) in points.windows(2).enumerate() {
        let heading = bearing(&leg[0], &leg[1]);
        println!(
            "Leg {:>3}:       {:>7.2} deg {}",
            i + 1,
            heading,
            CompassDirection::from_bearing(heading)
        );
    }

    if let Ok(api_key) = std::env::var("MAPS_API_KEY") {
        road_distance(api_key, &points).await;
    }

    let waypoints: Vec<Waypoint> = points
        .iter()
        .enumerate()
        .map(|(i, point)| Waypoint {
            ibge_code: None,
            description: Some(format!("Stop {}", i + 1)),
            coordinate: Some(*point),
        })
        .collect();

    println!();
    println!("{}", encode_waypoints(&waypoints));
    println!("{}", encode_route_options(&RouteOptions::default()));
}

async fn read_points() -> std::io::Result<Vec<Coordinate>> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut points = Vec::new();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match parse_free_text(line) {
            Some(point) => points.push(point),
            None => warn!(line, "skipping unparsable coordinate"),
        }
    }

    Ok(points)
}

/// Print the road distance, degrading to straight line as the governor decides.
async fn road_distance(api_key: String, points: &[Coordinate]) {
    let quota = match QuotaConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid quota configuration: {e}");
            std::process::exit(1);
        }
    };
    let client = match DirectionsClient::new(DirectionsConfig::new(api_key)) {
        Ok(client) => client,
        Err(e) => {
            warn!(error = %e, "directions client unavailable");
            return;
        }
    };

    let service = RouteDistanceService::new(client, QuotaGovernor::new(quota));
    let result = service.distance(points).await;
    match result.duration_secs {
        Some(secs) => println!(
            "Road distance: {} km, {} min ({:?})",
            result.distance_km,
            secs / 60,
            result.source
        ),
        None => println!(
            "Road distance: {} km ({:?})",
            result.distance_km, result.source
        ),
    }
}
