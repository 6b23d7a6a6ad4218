mod density;
mod details;
mod income;
mod place_types;
mod spatial;

pub use density::density_table;
pub use details::{demographic_items, DemographicItem, DistributionView, TractDetails};
pub use income::{correlation_table, income_correlations, income_table, CorrelationRow, IncomeBracket};
pub use place_types::{display_name, place_types, places_breakdown, places_in_tract, PlaceTypeBreakdown, PlaceTypeEntry};
pub use spatial::{category_share, metric_summaries, MetricSummary};
