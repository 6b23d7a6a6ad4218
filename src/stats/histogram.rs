use serde::Serialize;

/// A half-open bin `[x0, x1)`; the last bin also holds its upper edge.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub x0: f64,
    pub x1: f64,
    pub count: usize,
}

/// Equal-width histogram over the index domain [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    bins: Vec<HistogramBin>,
    outside: usize, // values outside [0, 1] or non-finite
}

impl Histogram {
    pub const DEFAULT_BINS: usize = 20;

    pub fn build(values: &[f64], bins: usize) -> Self {
        let bins = bins.max(1);
        let mut out: Vec<HistogramBin> = (0..bins)
            .map(|i| HistogramBin {
                x0: i as f64 / bins as f64,
                x1: (i + 1) as f64 / bins as f64,
                count: 0,
            })
            .collect();

        let mut outside = 0;
        for &value in values {
            match bin_index(value, bins) {
                Some(i) => out[i].count += 1,
                None => outside += 1,
            }
        }

        Self { bins: out, outside }
    }

    #[inline] pub fn bins(&self) -> &[HistogramBin] { &self.bins }

    #[inline] pub fn outside(&self) -> usize { self.outside }

    /// Index of the bin holding `value`, if it is inside the domain.
    #[inline] pub fn bin_of(&self, value: f64) -> Option<usize> { bin_index(value, self.bins.len()) }

    pub fn max_count(&self) -> usize {
        self.bins.iter().map(|bin| bin.count).max().unwrap_or(0)
    }
}

fn bin_index(value: f64, bins: usize) -> Option<usize> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) { return None }
    Some(((value * bins as f64).floor() as usize).min(bins - 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twenty_bins_of_width_005() {
        let hist = Histogram::build(&[], Histogram::DEFAULT_BINS);
        assert_eq!(hist.bins().len(), 20);
        assert!((hist.bins()[1].x0 - 0.05).abs() < 1e-12);
        assert_eq!(hist.bins()[19].x1, 1.0);
        assert_eq!(hist.max_count(), 0);
    }

    #[test]
    fn counts_and_edges() {
        let hist = Histogram::build(&[0.0, 0.04, 0.05, 0.51, 1.0, 1.2, -0.1, f64::NAN], 20);
        assert_eq!(hist.bins()[0].count, 2);
        assert_eq!(hist.bins()[1].count, 1);
        assert_eq!(hist.bins()[10].count, 1);
        assert_eq!(hist.bins()[19].count, 1);
        assert_eq!(hist.outside(), 3);
        assert_eq!(hist.max_count(), 2);

        let total: usize = hist.bins().iter().map(|b| b.count).sum();
        assert_eq!(total + hist.outside(), 8);
    }

    #[test]
    fn selected_bin_lookup() {
        let hist = Histogram::build(&[0.3], 20);
        assert_eq!(hist.bin_of(0.33), Some(6));
        assert_eq!(hist.bin_of(1.0), Some(19));
        assert_eq!(hist.bin_of(1.5), None);
    }
}
