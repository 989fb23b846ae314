//! areadrag-app: replays a draw-and-drag scenario through the area-preserving
//! transform and prints what happened at every step.
//!
//! # Usage
//!
//! ```text
//! cargo run -p areadrag-app -- [OPTIONS] <SCENARIO_PATH>
//! ```
//!
//! The scenario is JSON with Leaflet-style `[lat, lng]` pairs:
//!
//! ```text
//! { "vertices": [[0, 0], [0, 0.01], [0.01, 0.01], [0.01, 0]],
//!   "deltas":   [[5, 5], [0.5, -0.25]] }
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use areadrag::prelude::*;
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

/// Replay a polygon drag and report how its area is held.
#[derive(Parser)]
#[command(name = "areadrag-app", version)]
struct Cli {
    /// Path to the scenario JSON file.
    scenario_path: PathBuf,

    /// Transform config as a JSON file; missing fields keep their defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Unit used for the area label.
    #[arg(long, value_enum, default_value_t = Units::Metric)]
    units: Units,

    /// Decimal places on the area label.
    #[arg(long, default_value_t = 2)]
    precision: usize,

    /// Pretty-print the JSON report.
    #[arg(long)]
    pretty: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Units {
    /// Square kilometers.
    Metric,
    /// Square miles.
    Imperial,
    /// Square nautical miles.
    Nautical,
}

impl From<Units> for UnitSystem {
    fn from(units: Units) -> Self {
        match units {
            Units::Metric => UnitSystem::Metric,
            Units::Imperial => UnitSystem::Imperial,
            Units::Nautical => UnitSystem::Nautical,
        }
    }
}

#[derive(Deserialize)]
struct Scenario {
    vertices: Vec<[f64; 2]>,
    #[serde(default)]
    deltas: Vec<[f64; 2]>,
}

#[derive(Serialize)]
struct StepReport {
    delta: [f64; 2],
    #[serde(skip_serializing_if = "Option::is_none")]
    zone: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    measured_area_m2: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    scale_factor: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Serialize)]
struct Report {
    zone: i32,
    original_area_m2: f64,
    geodesic_area_m2: f64,
    label: String,
    steps: Vec<StepReport>,
    final_zone: i32,
    final_area_m2: f64,
    relative_error: f64,
    final_ring: Vec<[f64; 2]>,
}

fn load_config(path: Option<&PathBuf>) -> Result<TransformConfig> {
    let Some(path) = path else {
        return Ok(TransformConfig::default());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    TransformConfig::from_json(&json).with_context(|| format!("parsing config {}", path.display()))
}

fn run(cli: &Cli) -> Result<Report> {
    let json = std::fs::read_to_string(&cli.scenario_path)
        .with_context(|| format!("reading scenario {}", cli.scenario_path.display()))?;
    let scenario: Scenario = serde_json::from_str(&json).context("parsing scenario")?;

    let transform = AreaPreservingTransform::new(load_config(cli.config.as_ref())?);
    let vertices = scenario.vertices.iter().copied().map(LatLng::from).collect();
    let mut polygon = transform
        .create_from_vertices(vertices)
        .context("creating polygon")?;
    let (zone, _) = transform.measure(polygon.ring())?;
    let geodesic_area_m2 = geodesic_area(polygon.ring())?;
    log::info!("{} created in zone {zone}", polygon.id());

    let mut steps = Vec::with_capacity(scenario.deltas.len());
    for delta in &scenario.deltas {
        // A failed step leaves the polygon where it was; keep replaying.
        let report = match transform.commit_drag(&mut polygon, LatLngDelta::from(*delta)) {
            Ok(step) => StepReport {
                delta: *delta,
                zone: Some(step.zone.code()),
                measured_area_m2: Some(step.measured_area),
                scale_factor: Some(step.scale_factor),
                error: None,
            },
            Err(err) => {
                log::warn!("step {delta:?} rejected: {err}");
                StepReport {
                    delta: *delta,
                    zone: None,
                    measured_area_m2: None,
                    scale_factor: None,
                    error: Some(err.to_string()),
                }
            }
        };
        steps.push(report);
    }

    let (final_zone, final_area_m2) = transform.measure(polygon.ring())?;
    let original_area_m2 = polygon.original_area();
    let label = AreaLabel::new(original_area_m2, cli.units.into(), cli.precision);

    Ok(Report {
        zone: zone.code(),
        original_area_m2,
        geodesic_area_m2,
        label: label.display_text,
        steps,
        final_zone: final_zone.code(),
        final_area_m2,
        relative_error: (final_area_m2 - original_area_m2).abs() / original_area_m2,
        final_ring: polygon.ring().iter().map(|p| [p.lat, p.lng]).collect(),
    })
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let report = run(&cli)?;

    let out = if cli.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{out}");
    Ok(())
}
