//! Example: Generate and save an icosphere planet
//!
//! Usage: `cargo run --example generate_planet -- [subdivisions] [name]`
//!
//! Log output goes through `tracing-subscriber`; set `RUST_LOG=debug` for
//! per-stage samples.

use icosphere_planet::*;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true).with_level(true))
        .init();
}

fn main() -> Result<()> {
    init_logging();

    let mut args = std::env::args().skip(1);
    let subdivisions = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(config::DEFAULT_SUBDIVISIONS);
    let name = args.next().unwrap_or_else(|| config::DEFAULT_PLANET_NAME.to_string());

    let config = PlanetConfigBuilder::new()
        .name(name)
        .seed(42)
        .subdivisions(subdivisions)?
        .build()?;

    println!("Configuration:");
    println!("  Name: {}", config.name);
    println!("  Seed: {}", config.seed);
    println!("  Radius: {} km", config.radius);
    println!("  Subdivisions: {}", config.subdivisions);
    if let Some(faces) = config.face_count() {
        println!("  Expected faces: {}", faces);
    }
    println!();

    let planet = Planet::generate(&config)?;

    let report = validate_mesh(&planet.mesh, config.vertex_tolerance);
    println!("Validation:");
    println!("  Off-sphere vertices: {}", report.distances.off_sphere);
    println!("  Max deviation: {:e} km", report.distances.max_deviation);
    println!("  Closed manifold: {}", report.edges.is_closed_manifold());
    println!("  Pentagon vertices valid: {}", report.pentagons_valid);
    println!();

    let directory = std::path::Path::new("gamedata/planets").join(&planet.name);
    planet.save(&directory)?;
    println!("Saved to {}", directory.display());

    Ok(())
}
