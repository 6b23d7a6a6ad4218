#![doc = "Third Place Index analysis public API"]
mod analysis;
mod common;
mod config;
mod map;
mod state;
mod stats;

#[doc(inline)]
pub use map::{GeoId, IndexLayer, LegendEntry, Metric, Place, PlaceCategory, PlaceSet, Tract, TractSet};

#[doc(inline)]
pub use stats::{
    aggregate_by, allocate, fallback_split, pearson, round_half_up, Aggregation, AllocatedType, Allocation,
    CategoryAggregate, Direction, Distributions, Histogram, HistogramBin, Ranking, RankingEntry,
    Strength, SummaryStats, TractSummary,
};

#[doc(inline)]
pub use analysis::{
    category_share, correlation_table, demographic_items, density_table, display_name,
    income_correlations, income_table, metric_summaries, place_types, places_breakdown,
    places_in_tract, CorrelationRow, DemographicItem, DistributionView, IncomeBracket,
    MetricSummary, PlaceTypeBreakdown, PlaceTypeEntry, TractDetails,
};

#[doc(inline)]
pub use config::{AnalysisConfig, ColorScales, Config, DataPaths, MapView};

#[doc(inline)]
pub use state::{Action, AppState, Change, Store};

#[doc(inline)]
pub use common::{format_currency, format_density, format_number, format_percent, write_csv, write_csv_string};
