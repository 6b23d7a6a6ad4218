use std::fmt;

use anyhow::{ensure, Result};
use serde::Serialize;

/// Pearson correlation coefficient via the sums formula:
/// r = (nΣxy − ΣxΣy) / sqrt((nΣx² − (Σx)²)(nΣy² − (Σy)²)).
///
/// Returns 0 when either series has no variance or fewer than two points,
/// and an error when the series lengths differ.
pub fn pearson(x: &[f64], y: &[f64]) -> Result<f64> {
    ensure!(
        x.len() == y.len(),
        "[stats::pearson] series lengths differ ({} vs {})", x.len(), y.len()
    );

    let n = x.len() as f64;
    if x.len() < 2 { return Ok(0.0) }

    let (mut sx, mut sy, mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0, 0.0, 0.0);
    for (&a, &b) in x.iter().zip(y) {
        sx += a;
        sy += b;
        sxy += a * b;
        sxx += a * a;
        syy += b * b;
    }

    let numerator = n * sxy - sx * sy;
    let denominator = ((n * sxx - sx * sx) * (n * syy - sy * sy)).sqrt();

    if denominator == 0.0 || !denominator.is_finite() { return Ok(0.0) }

    // Clamp floating drift just outside [-1, 1].
    Ok((numerator / denominator).clamp(-1.0, 1.0))
}

/// Magnitude band of a correlation coefficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Strength {
    Negligible, // |r| < 0.1
    Weak,       // |r| < 0.3
    Moderate,   // |r| < 0.5
    Strong,     // |r| < 0.7
    VeryStrong,
}

impl Strength {
    pub fn classify(r: f64) -> Self {
        match r.abs() {
            a if a < 0.1 => Strength::Negligible,
            a if a < 0.3 => Strength::Weak,
            a if a < 0.5 => Strength::Moderate,
            a if a < 0.7 => Strength::Strong,
            _ => Strength::VeryStrong,
        }
    }
}

impl fmt::Display for Strength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Strength::Negligible => "Negligible",
            Strength::Weak => "Weak",
            Strength::Moderate => "Moderate",
            Strength::Strong => "Strong",
            Strength::VeryStrong => "Very Strong",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Positive,
    Negative,
    None,
}

impl Direction {
    pub fn of(r: f64) -> Self {
        if r > 0.0 { Direction::Positive } else if r < 0.0 { Direction::Negative } else { Direction::None }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Direction::Positive => "positive",
            Direction::Negative => "negative",
            Direction::None => "none",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const X: [f64; 6] = [32_000.0, 45_500.0, 51_000.0, 78_250.0, 99_000.0, 140_000.0];
    const Y: [f64; 6] = [0.61, 0.44, 0.52, 0.38, 0.27, 0.31];

    #[test]
    fn self_correlation_is_one() {
        assert!((pearson(&X, &X).unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn constant_series_is_zero() {
        assert_eq!(pearson(&X, &[0.5; 6]).unwrap(), 0.0);
        assert_eq!(pearson(&[1.0], &[2.0]).unwrap(), 0.0);
        assert_eq!(pearson(&[], &[]).unwrap(), 0.0);
    }

    #[test]
    fn symmetric_and_bounded() {
        let xy = pearson(&X, &Y).unwrap();
        let yx = pearson(&Y, &X).unwrap();
        assert!((xy - yx).abs() < 1e-12);
        assert!((-1.0..=1.0).contains(&xy));
        assert!(xy < 0.0);
    }

    #[test]
    fn perfect_negative() {
        let r = pearson(&[1.0, 2.0, 3.0], &[6.0, 4.0, 2.0]).unwrap();
        assert!((r + 1.0).abs() < 1e-12);
        assert_eq!(Direction::of(r), Direction::Negative);
    }

    #[test]
    fn mismatched_lengths_fail() {
        assert!(pearson(&[1.0, 2.0], &[1.0]).is_err());
    }

    #[test]
    fn strength_bands() {
        assert_eq!(Strength::classify(0.05), Strength::Negligible);
        assert_eq!(Strength::classify(-0.2), Strength::Weak);
        assert_eq!(Strength::classify(0.3), Strength::Moderate);
        assert_eq!(Strength::classify(-0.69), Strength::Strong);
        assert_eq!(Strength::classify(0.7), Strength::VeryStrong);
        assert_eq!(Strength::VeryStrong.to_string(), "Very Strong");
    }
}
