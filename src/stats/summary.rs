//! Summary statistics for a metric across tracts.

use serde::Serialize;

/// Summary statistics for a numeric dataset
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryStats {
    /// Number of finite values
    pub count: usize,
    /// Number of missing/NaN values
    pub missing: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    /// Population variance
    pub variance: f64,
    pub std_dev: f64,
    /// Median (50th percentile)
    pub median: f64,
}

impl SummaryStats {
    /// Compute summary statistics from data. Empty input reports zeros rather than NaN.
    pub fn from_data(data: &[f64]) -> Self {
        let mut finite: Vec<f64> = data.iter().copied().filter(|x| x.is_finite()).collect();
        let missing = data.len() - finite.len();

        if finite.is_empty() {
            return Self::empty(missing);
        }

        let count = finite.len();
        let mean = finite.iter().sum::<f64>() / count as f64;
        let variance = finite.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / count as f64;

        finite.sort_by(f64::total_cmp);
        let median = if count % 2 == 0 {
            (finite[count / 2 - 1] + finite[count / 2]) / 2.0
        } else {
            finite[count / 2]
        };

        Self {
            count,
            missing,
            min: finite[0],
            max: finite[count - 1],
            mean,
            variance,
            std_dev: variance.sqrt(),
            median,
        }
    }

    fn empty(missing: usize) -> Self {
        Self { count: 0, missing, min: 0.0, max: 0.0, mean: 0.0, variance: 0.0, std_dev: 0.0, median: 0.0 }
    }

    /// Get the range (max - min)
    pub fn range(&self) -> f64 { self.max - self.min }

    /// Coefficient of variation (std_dev / |mean|), zero when the mean is zero.
    pub fn cv(&self) -> f64 {
        if self.mean == 0.0 { 0.0 } else { self.std_dev / self.mean.abs() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_moments() {
        let stats = SummaryStats::from_data(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert_eq!(stats.count, 8);
        assert_eq!(stats.mean, 5.0);
        assert_eq!(stats.variance, 4.0);
        assert_eq!(stats.std_dev, 2.0);
        assert_eq!(stats.median, 4.5);
        assert_eq!(stats.range(), 7.0);
        assert!((stats.cv() - 0.4).abs() < 1e-12);
    }

    #[test]
    fn empty_and_missing() {
        let stats = SummaryStats::from_data(&[f64::NAN]);
        assert_eq!(stats.count, 0);
        assert_eq!(stats.missing, 1);
        assert_eq!(stats.mean, 0.0);
        assert_eq!(stats.cv(), 0.0);
    }
}
