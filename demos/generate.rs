//! Generates a track and prints it as CSV.
//!
//! Usage:
//! ```text
//! cargo run --example generate                              # defaults, seed 42
//! cargo run --example generate -- track.yaml                # configured run mode
//! cargo run --example generate -- track.yaml 7              # with seed
//! RUST_LOG=trackgen=debug cargo run --example generate      # stage logging
//! ```
//!
//! Output columns: `cx,cy,lx,ly,rx,ry` (centerline, left and right border).

use std::path::Path;
use std::process::ExitCode;

use rand::rngs::StdRng;
use rand::SeedableRng;
use trackgen::{TrackBuilder, TrackConfig};

fn main() -> ExitCode {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("trackgen=info".parse().unwrap_or_default());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = match args.first() {
        Some(path) => match TrackConfig::load(Path::new(path)) {
            Ok(config) => config,
            Err(e) => {
                tracing::error!(error = %e, "could not load configuration");
                return ExitCode::FAILURE;
            }
        },
        None => TrackConfig::default(),
    };
    let seed = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(42);

    let mut rng = StdRng::seed_from_u64(seed);
    let track = match TrackBuilder::new(config).build_configured(&mut rng) {
        Ok(track) => track,
        Err(e) => {
            tracing::error!(error = %e, "track generation failed");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(
        points = track.centerline.len(),
        length = track.length(),
        closed = track.closed,
        "generated track"
    );
    println!("cx,cy,lx,ly,rx,ry");
    for ((c, l), r) in track
        .centerline
        .iter()
        .zip(&track.borders.left)
        .zip(&track.borders.right)
    {
        println!("{},{},{},{},{},{}", c.x, c.y, l.x, l.y, r.x, r.y);
    }
    ExitCode::SUCCESS
}
