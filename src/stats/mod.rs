mod aggregate;
mod allocate;
mod correlation;
mod histogram;
mod ranking;
mod summary;

pub use aggregate::{aggregate_by, Aggregation, CategoryAggregate, TractSummary};
pub use allocate::{allocate, fallback_split, round_half_up, AllocatedType, Allocation};
pub use correlation::{pearson, Direction, Strength};
pub use histogram::{Histogram, HistogramBin};
pub use ranking::{Distributions, Ranking, RankingEntry};
pub use summary::SummaryStats;
