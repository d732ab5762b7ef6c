//! Breach cutout demo: punches successive cavities into a flat wall and
//! triangulates the result after every impact.
//!
//! Usage:
//! ```text
//! cargo run --example cutout                     # default (5 impacts)
//! cargo run --example cutout -- 12               # 12 impacts
//! RUST_LOG=breach=trace cargo run --example cutout
//! ```

use std::f64::consts::TAU;

use breach::math::Point2;
use breach::{BreachError, Polygon};

/// Vertices per cavity outline.
const CAVITY_STEPS: u32 = 10;

fn main() -> Result<(), BreachError> {
    // Default: WARN for everything, INFO for breach.
    // Override with RUST_LOG env var (e.g. RUST_LOG=breach=debug).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("cutout=info".parse().unwrap_or_default())
        .add_directive("breach=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let impacts: u32 = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(5);

    // Clockwise wall, so cavities are wound counter-clockwise.
    let mut wall = Polygon::new(vec![
        Point2::new(0.0, 0.0),
        Point2::new(0.0, 3.0),
        Point2::new(4.0, 3.0),
        Point2::new(4.0, 0.0),
    ]);

    for shot in 0..impacts {
        let hit = impact_point(shot);
        wall.add_hole(cavity(hit, shot));

        let mesh = wall.triangulate()?;
        tracing::info!(
            shot,
            x = hit.x,
            y = hit.y,
            vertices = mesh.vertices().len(),
            triangles = mesh.triangle_count(),
            area = mesh.area(),
            expected = wall.area(),
            "wall re-triangulated"
        );
    }

    Ok(())
}

/// Spreads impacts over the wall on a coarse grid so cavities never overlap.
fn impact_point(shot: u32) -> Point2 {
    let column = f64::from(shot % 6);
    let row = f64::from(shot / 6 % 4);
    Point2::new(0.5 + 0.6 * column, 0.45 + 0.7 * row)
}

/// A ragged, roughly circular cavity around `hit`, counter-clockwise.
fn cavity(hit: Point2, shot: u32) -> Vec<Point2> {
    (0..CAVITY_STEPS)
        .map(|i| {
            let angle = TAU * f64::from(i) / f64::from(CAVITY_STEPS);
            let jitter = (f64::from(i * 7 + shot * 13)).sin().abs();
            let radius = 0.08 + 0.06 * jitter;
            Point2::new(hit.x + radius * angle.cos(), hit.y + radius * angle.sin())
        })
        .collect()
}
