pub mod density;
pub mod income;
pub mod rank;
pub mod summary;
pub mod tract;

use std::path::{Path, PathBuf};

use anyhow::Result;
use thirdplace::{format_number, Aggregation, Config, TractSet};
use tracing::info;

use crate::cli::Cli;

/// Load `--config` if given, otherwise the built-in defaults.
pub(crate) fn load_config(cli: &Cli) -> Result<Config> {
    match &cli.config {
        Some(path) => {
            info!("[config] reading {}", path.display());
            Config::from_toml_file(path)
        }
        None => Ok(Config::default()),
    }
}

/// Read tracts from `path`, or from the configured data path.
pub(crate) fn load_tracts(path: Option<&PathBuf>, config: &Config) -> Result<TractSet> {
    let path: &Path = path.unwrap_or(&config.data.tracts);
    TractSet::from_geojson_file(path)
}

/// Print an aggregate table, or write it as CSV when `output` is set.
pub(crate) fn emit_aggregation(aggregation: &Aggregation, heading: &str, output: Option<&PathBuf>) -> Result<()> {
    if let Some(path) = output {
        let mut df = aggregation.to_dataframe()?;
        thirdplace::write_csv(&mut df, path)?;
        println!("wrote {} rows to {}", aggregation.buckets.len(), path.display());
        return Ok(())
    }

    println!("{:<16} {:>7} {:>12} {:>10} {:>10} {:>10} {:>8}",
        heading, "tracts", "avg places", "trad", "comm", "modern", "TPI");
    for bucket in &aggregation.buckets {
        println!("{:<16} {:>7} {:>12} {:>10} {:>10} {:>10} {:>8.3}",
            bucket.label,
            bucket.count,
            format_number(Some(bucket.total_places_avg), 1),
            format_number(Some(bucket.traditional_avg), 1),
            format_number(Some(bucket.community_avg), 1),
            format_number(Some(bucket.modern_avg), 1),
            bucket.overall_index_avg,
        );
    }
    if aggregation.unclassified > 0 {
        println!("({} tracts unclassified)", aggregation.unclassified);
    }
    Ok(())
}
