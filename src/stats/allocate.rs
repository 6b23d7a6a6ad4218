//! Proportional allocation of sampled sub-type counts to an official total.

use serde::Serialize;
use tracing::warn;

use crate::map::PlaceCategory;

/// Round to the nearest integer, ties toward +∞ (0.5 → 1, 2.5 → 3, -2.5 → -2).
#[inline]
pub fn round_half_up(x: f64) -> f64 { (x + 0.5).floor() }

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AllocatedType {
    pub label: String,
    pub count: u32,
}

/// Result of scaling a sample to an official total.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Allocation {
    /// Non-zero counts, in sample order.
    pub entries: Vec<AllocatedType>,
    /// Deficit units that could not be removed without taking a sub-type below 1.
    pub unapplied: u32,
}

impl Allocation {
    pub fn total(&self) -> u32 { self.entries.iter().map(|e| e.count).sum() }

    pub fn get(&self, label: &str) -> Option<u32> {
        self.entries.iter().find(|e| e.label == label).map(|e| e.count)
    }
}

struct Share {
    order: usize,
    exact: f64,
    rounded: i64,
}

impl Share {
    #[inline] fn diff(&self) -> f64 { self.exact - self.rounded as f64 }
}

/// Scale observed sub-type counts so that they sum to `official_total`, using
/// largest-remainder correction on top of half-up rounding.
///
/// When the total is overshot, units are taken from the largest overshoots first,
/// but no sub-type is reduced below 1; such units are reported in `unapplied`.
/// An empty sample or a zero total yields no entries.
pub fn allocate<S: AsRef<str>>(samples: &[(S, u32)], official_total: u32) -> Allocation {
    let sample_total: u64 = samples.iter().map(|(_, c)| *c as u64).sum();
    if sample_total == 0 || official_total == 0 {
        return Allocation::default();
    }

    let mut shares: Vec<Share> = samples.iter().enumerate()
        .map(|(order, (_, count))| {
            let exact = *count as f64 / sample_total as f64 * official_total as f64;
            Share { order, exact, rounded: round_half_up(exact) as i64 }
        })
        .collect();

    let rounded_total: i64 = shares.iter().map(|s| s.rounded).sum();
    let delta = official_total as i64 - rounded_total;
    let mut unapplied = 0u32;

    if delta > 0 {
        // Largest shortfall first; sort_by is stable so ties keep sample order.
        shares.sort_by(|a, b| b.diff().total_cmp(&a.diff()));
        for share in shares.iter_mut().take(delta as usize) {
            share.rounded += 1;
        }
    } else if delta < 0 {
        // Largest overshoot first.
        shares.sort_by(|a, b| a.diff().total_cmp(&b.diff()));
        let deficit = delta.unsigned_abs() as usize;
        for share in shares.iter_mut().take(deficit) {
            if share.rounded > 1 {
                share.rounded -= 1;
            } else {
                unapplied += 1;
            }
        }
        unapplied += deficit.saturating_sub(shares.len()) as u32;
    }

    if unapplied > 0 {
        warn!("[stats::allocate] {unapplied} unit(s) left unapplied; allocation exceeds official total {official_total}");
    }

    shares.sort_by_key(|s| s.order);
    let entries = shares.into_iter()
        .filter(|s| s.rounded > 0)
        .map(|s| AllocatedType { label: samples[s.order].0.as_ref().to_string(), count: s.rounded as u32 })
        .collect();

    Allocation { entries, unapplied }
}

/// Heuristic sub-type split used when no sampled places exist for a tract.
/// Each share is rounded on its own, so the parts need not sum to `count`.
pub fn fallback_split(category: PlaceCategory, count: u32) -> Vec<AllocatedType> {
    let shares: &[(&str, f64)] = match category {
        PlaceCategory::Traditional => &[("Restaurants", 0.6), ("Cafes", 0.3), ("Bars", 0.1)],
        PlaceCategory::Community => &[("Places of Worship", 0.5), ("Community Centers", 0.3), ("Libraries", 0.2)],
        PlaceCategory::Modern => &[("Coworking Spaces", 0.5), ("Marketplaces", 0.5)],
    };

    shares.iter()
        .map(|&(label, share)| AllocatedType {
            label: label.to_string(),
            count: round_half_up(count as f64 * share) as u32,
        })
        .filter(|entry| entry.count > 0)
        .collect()
}
