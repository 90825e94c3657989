mod app;
mod chart;
mod color;
mod data;
mod reactive;
mod state;
mod ui;

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use eframe::egui;
use thiserror::Error;

use app::LaunchDashApp;
use data::filter::{PayloadRange, RangeError, SiteSelection};
use data::model::Dataset;
use reactive::Inputs;
use state::{AppState, default_range, slider_for};

/// SpaceX launch records dashboard.
#[derive(Parser, Debug)]
#[command(name = "launch-dash", version, about)]
struct Cli {
    /// Launch records file (.csv, .json or .parquet)
    #[arg(default_value = "spacex_launch_dash.csv")]
    data: PathBuf,

    /// Print the chart specs as JSON and exit instead of opening the window
    #[arg(long)]
    json: bool,

    /// Initial launch site, or ALL
    #[arg(long, default_value = SiteSelection::ALL)]
    site: String,

    /// Initial lower payload bound in kg (defaults to the lightest payload)
    #[arg(long)]
    payload_min: Option<f64>,

    /// Initial upper payload bound in kg (defaults to the heaviest payload)
    #[arg(long)]
    payload_max: Option<f64>,
}

#[derive(Debug, Error)]
#[error("unknown launch site '{site}', expected ALL or one of {known:?}")]
struct SelectionError {
    site: String,
    known: Vec<String>,
}

/// Turn the CLI flags into validated initial inputs for `dataset`.
fn initial_inputs(cli: &Cli, dataset: &Dataset) -> Result<Inputs> {
    let site = SiteSelection::from(cli.site.as_str());
    if let SiteSelection::Site(name) = &site {
        if !dataset.contains_site(name) {
            return Err(SelectionError {
                site: name.clone(),
                known: dataset.sites().to_vec(),
            }
            .into());
        }
    }

    let observed = default_range(dataset);
    let track = slider_for(dataset);

    // Supplied bounds are checked and clamped on their own first, so a lone
    // bound past the data never collides with a defaulted one.
    let clamp_bound = |name: &str, value: Option<f64>| -> Result<Option<f64>> {
        let Some(v) = value else { return Ok(None) };
        if !v.is_finite() || v < 0.0 {
            return Err(RangeError::OutOfDomain { low: v, high: v })
                .with_context(|| format!("invalid --{name}"));
        }
        let clamped = v.clamp(track.min, track.max);
        if clamped != v {
            log::warn!("--{name} {v} clamped to {clamped}");
        }
        Ok(Some(clamped))
    };
    let low = clamp_bound("payload-min", cli.payload_min)?;
    let high = clamp_bound("payload-max", cli.payload_max)?;

    let (low, high) = match (low, high) {
        (Some(l), Some(h)) => (l, h),
        (Some(l), None) => (l, observed.high().max(l)),
        (None, Some(h)) => (observed.low().min(h), h),
        (None, None) => (observed.low(), observed.high()),
    };
    let payload = PayloadRange::new(low, high).context("invalid payload range")?;

    Ok(Inputs { site, payload })
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let dataset = data::loader::load_file(&cli.data)
        .with_context(|| format!("loading {}", cli.data.display()))?;
    if dataset.is_empty() {
        bail!("{} contains no launch records", cli.data.display());
    }
    log::info!(
        "Loaded {} launches with sites {:?}",
        dataset.len(),
        dataset.sites()
    );

    let inputs = initial_inputs(&cli, &dataset)?;
    let state = AppState::with_inputs(dataset, inputs);

    if cli.json {
        let charts: Vec<_> = state.charts.values().collect();
        println!("{}", serde_json::to_string_pretty(&charts)?);
        return Ok(());
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 900.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "SpaceX Launch Records Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(LaunchDashApp::new(state)))),
    )
    .map_err(|e| anyhow!("{e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::LaunchRecord;

    fn dataset() -> Dataset {
        Dataset::from_records(vec![
            LaunchRecord::new("A", 500.0, "FT", 1).unwrap(),
            LaunchRecord::new("B", 7000.0, "B4", 0).unwrap(),
        ])
    }

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("launch-dash").chain(args.iter().copied()))
    }

    #[test]
    fn defaults_to_all_sites_and_observed_range() {
        let inputs = initial_inputs(&cli(&[]), &dataset()).unwrap();
        assert_eq!(inputs.site, SiteSelection::All);
        assert_eq!(inputs.payload, PayloadRange::new(500.0, 7000.0).unwrap());
    }

    #[test]
    fn accepts_known_site_and_explicit_range() {
        let c = cli(&["data.csv", "--site", "B", "--payload-min", "1000", "--payload-max", "5000"]);
        let inputs = initial_inputs(&c, &dataset()).unwrap();
        assert_eq!(inputs.site, SiteSelection::from("B"));
        assert_eq!(inputs.payload, PayloadRange::new(1000.0, 5000.0).unwrap());
    }

    #[test]
    fn rejects_unknown_site() {
        let err = initial_inputs(&cli(&["--site", "Z"]), &dataset()).unwrap_err();
        assert!(err.to_string().contains("unknown launch site 'Z'"));
    }

    #[test]
    fn clamps_range_to_slider_track() {
        let c = cli(&["--payload-max", "20000"]);
        let inputs = initial_inputs(&c, &dataset()).unwrap();
        assert_eq!(inputs.payload, PayloadRange::new(500.0, 7000.0).unwrap());
    }

    #[test]
    fn lone_bound_past_the_data_is_not_inverted() {
        let above = initial_inputs(&cli(&["--payload-min", "9000"]), &dataset()).unwrap();
        assert_eq!(above.payload, PayloadRange::new(7000.0, 7000.0).unwrap());

        let below = initial_inputs(&cli(&["--payload-max", "100"]), &dataset()).unwrap();
        assert_eq!(below.payload, PayloadRange::new(100.0, 100.0).unwrap());
    }

    #[test]
    fn rejects_negative_bound() {
        let err = initial_inputs(&cli(&["--payload-min=-5"]), &dataset()).unwrap_err();
        assert!(format!("{err:#}").contains("--payload-min"), "{err:#}");
    }

    #[test]
    fn rejects_inverted_range() {
        let c = cli(&["--payload-min", "5000", "--payload-max", "1000"]);
        assert!(initial_inputs(&c, &dataset()).is_err());
    }
}
