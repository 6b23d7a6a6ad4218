use tracing::debug;

use crate::{map::TractSet, stats::{aggregate_by, Aggregation}};

/// Aggregate tracts by density category, in the given label order.
/// Tracts with a missing or unlisted category are counted as unclassified.
pub fn density_table<L: AsRef<str>>(tracts: &TractSet, labels: &[L]) -> Aggregation {
    let aggregation = aggregate_by(tracts, labels, |tract| {
        let category = tract.density_category.as_deref()?;
        labels.iter().position(|label| label.as_ref() == category)
    });

    if aggregation.unclassified > 0 {
        debug!("[analysis::density_table] {} tracts have no recognized density category", aggregation.unclassified);
    }
    aggregation
}
