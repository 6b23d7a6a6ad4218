use std::path::PathBuf;

/// Third Place Index analysis CLI
#[derive(clap::Parser, Debug)]
#[command(name = "thirdplace", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// TOML configuration file; built-in defaults apply when omitted
    #[arg(short, long, global = true, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Rank tracts by overall index, highest first
    Rank(RankArgs),

    /// Show the detail panel for one tract
    Tract(TractArgs),

    /// Aggregate tracts by density category
    Density(TableArgs),

    /// Aggregate tracts by income bracket
    Income(TableArgs),

    /// Summary statistics and income correlations
    Summary(SummaryArgs),
}

#[derive(clap::Args, Debug)]
pub struct RankArgs {
    /// Tracts GeoJSON, defaults to the configured path
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub tracts: Option<PathBuf>,

    /// Only print the first N tracts
    #[arg(short, long)]
    pub top: Option<usize>,

    /// Write the full ranking to a CSV file
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
pub struct TractArgs {
    /// Tracts GeoJSON
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub tracts: PathBuf,

    /// Tract GEOID, e.g. 48201311500
    pub geo_id: String,

    /// Places GeoJSON, enables the place-type breakdown
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub places: Option<PathBuf>,

    /// Index layer for the distribution chart (overall, traditional, community, modern)
    #[arg(short, long, default_value = "overall")]
    pub layer: String,
}

#[derive(clap::Args, Debug)]
pub struct TableArgs {
    /// Tracts GeoJSON, defaults to the configured path
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub tracts: Option<PathBuf>,

    /// Write the table to a CSV file instead of printing it
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
pub struct SummaryArgs {
    /// Tracts GeoJSON, defaults to the configured path
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub tracts: Option<PathBuf>,
}
