//! TAXDEED-COSTS — command-line estimator.
//!
//! Reads one `CostInputs` JSON document from a file (or stdin), runs the
//! cost engine and prints the breakdown plus profit analysis as JSON.

use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Read;
use tracing::info;

use taxdeed_costs::config::AppConfig;
use taxdeed_costs::{CostBreakdown, CostEngine, CostInputs, ProfitAnalysis};

const DEFAULT_CONFIG_PATH: &str = "taxdeed.toml";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Report {
    breakdown: CostBreakdown,
    profit: ProfitAnalysis,
}

fn main() -> Result<()> {
    // Load .env file if present (non-fatal if missing)
    let _ = dotenv::dotenv();

    let config_path =
        std::env::var("TAXDEED_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let cfg = AppConfig::load_or_default(&config_path)?;

    init_logging(&cfg);

    let input_path = std::env::args().nth(1);
    let raw = read_input(input_path.as_deref())?;
    let inputs: CostInputs = serde_json::from_str(&raw).context("Failed to parse cost inputs")?;

    let engine = CostEngine::new(cfg)?;
    info!(
        config = %config_path,
        reference_year = engine.reference_year(),
        "Estimating costs"
    );

    let (breakdown, profit) = engine.analyze(&inputs)?;
    let report = Report { breakdown, profit };
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}

/// Read the whole input from `path`, or stdin when no path (or `-`) is given.
fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(p) if p != "-" => std::fs::read_to_string(p)
            .with_context(|| format!("Failed to read input file: {p}")),
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read input from stdin")?;
            Ok(buf)
        }
    }
}

/// Initialise the `tracing` subscriber. Logs go to stderr so stdout stays
/// valid JSON.
fn init_logging(cfg: &AppConfig) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_filter = cfg
        .logging
        .filter
        .clone()
        .unwrap_or_else(|| "taxdeed_costs=info".to_string());
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let json_logging = cfg.logging.json || std::env::var("TAXDEED_LOG_JSON").is_ok();

    if json_logging {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    } else {
        fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    }
}
