//! Bound-pair to plot-point reduction

use log::warn;

use crate::error::{PlotError, PlotResult};
use crate::workload::WorkloadEntry;

/// Geometric mean of a bound pair.
/// Square roots are taken first so extreme magnitudes do not overflow.
pub fn geometric_mean(lo: f64, hi: f64) -> f64 {
    lo.sqrt() * hi.sqrt()
}

/// A single axis of a plot point, with asymmetric errors
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisEstimate {
    pub value: f64,
    pub err_lo: f64,
    pub err_hi: f64,
}

impl AxisEstimate {
    /// Reduces a bound pair to its geometric mean and the distances
    /// to both bounds. `quantity` only names the axis in error messages.
    pub fn from_bounds(
        workload: &str,
        quantity: &str,
        lo: f64,
        hi: f64,
    ) -> PlotResult<Self> {
        for (which, bound) in [("lower", lo), ("upper", hi)] {
            if !bound.is_finite() || bound <= 0.0 {
                return Err(PlotError::invalid_input(
                    workload,
                    format!(
                        "{} {} bound must be positive, got {}",
                        which, quantity, bound
                    ),
                ));
            }
        }

        let (lo, hi) = if lo > hi {
            warn!(
                "{}: {} bounds reversed ({} > {}), swapping",
                workload, quantity, lo, hi
            );
            (hi, lo)
        } else {
            (lo, hi)
        };

        // Clamp rounding noise so a degenerate pair yields zero-length bars
        let value = geometric_mean(lo, hi).clamp(lo, hi);
        Ok(Self {
            value,
            err_lo: value - lo,
            err_hi: hi - value,
        })
    }

    pub fn lo(&self) -> f64 {
        self.value - self.err_lo
    }

    pub fn hi(&self) -> f64 {
        self.value + self.err_hi
    }
}

/// Representative point of a workload: latency on x, bandwidth on y
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotPoint {
    pub x: AxisEstimate,
    pub y: AxisEstimate,
}

/// Derives the plot point of a single workload
pub fn estimate(entry: &WorkloadEntry) -> PlotResult<PlotPoint> {
    let y = AxisEstimate::from_bounds(
        &entry.name,
        "bandwidth",
        entry.bandwidth_lo,
        entry.bandwidth_hi,
    )?;
    let x = AxisEstimate::from_bounds(
        &entry.name,
        "latency",
        entry.latency_lo,
        entry.latency_hi,
    )?;
    Ok(PlotPoint { x, y })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn entry(bw: (f64, f64), lat: (f64, f64)) -> WorkloadEntry {
        WorkloadEntry {
            name: "test".to_string(),
            bandwidth_lo: bw.0,
            bandwidth_hi: bw.1,
            latency_lo: lat.0,
            latency_hi: lat.1,
            color: None,
        }
    }

    #[test]
    fn test_mean_within_bounds() {
        let pairs = [(1.0, 2.0), (1e-9, 1e5), (3e3, 3e6), (0.5, 0.5000001)];
        for (lo, hi) in pairs {
            let est = AxisEstimate::from_bounds("w", "q", lo, hi).unwrap();
            assert!(est.value >= lo && est.value <= hi);
            assert!(est.err_lo >= 0.0);
            assert!(est.err_hi >= 0.0);
        }
    }

    #[test]
    fn test_commutative() {
        for (a, b) in [(9e9, 25e9), (1e-6, 7e-6), (2.0, 8.0)] {
            assert_eq!(geometric_mean(a, b), geometric_mean(b, a));
        }
    }

    #[test]
    fn test_degenerate_bounds() {
        for x in [2e9, 100e-9, 1.0, 4.5e4] {
            let est = AxisEstimate::from_bounds("w", "q", x, x).unwrap();
            assert_relative_eq!(est.value, x, max_relative = 1e-12);
            assert_eq!(est.err_lo, 0.0);
            assert_eq!(est.err_hi, 0.0);
        }
    }

    #[test]
    fn test_beam_control_example() {
        let point = estimate(&entry((9e9, 25e9), (1e-6, 7e-6))).unwrap();
        assert_relative_eq!(point.y.value, 1.5e10, max_relative = 1e-9);
        assert_relative_eq!(point.y.err_lo, 6e9, max_relative = 1e-9);
        assert_relative_eq!(point.y.err_hi, 1e10, max_relative = 1e-9);
        assert_relative_eq!(point.x.value, 7e-12f64.sqrt(), max_relative = 1e-9);
        assert_relative_eq!(point.x.value, 2.6458e-6, max_relative = 1e-4);
        assert_relative_eq!(point.x.lo(), 1e-6, max_relative = 1e-9);
        assert_relative_eq!(point.x.hi(), 7e-6, max_relative = 1e-9);
    }

    #[test]
    fn test_non_positive_rejected() {
        let err = estimate(&entry((0.0, 25e9), (1e-6, 7e-6))).unwrap_err();
        assert!(matches!(err, PlotError::InvalidInput { .. }));

        let err = estimate(&entry((9e9, 25e9), (-1e-6, 7e-6))).unwrap_err();
        assert!(matches!(err, PlotError::InvalidInput { .. }));

        let err = estimate(&entry((9e9, f64::NAN), (1e-6, 7e-6))).unwrap_err();
        assert!(matches!(err, PlotError::InvalidInput { .. }));
    }

    #[test]
    fn test_extreme_magnitudes() {
        let est = AxisEstimate::from_bounds("w", "q", 1e160, 4e160).unwrap();
        assert_relative_eq!(est.value, 2e160, max_relative = 1e-12);
        assert_relative_eq!(est.err_lo, 1e160, max_relative = 1e-12);
        assert_relative_eq!(est.err_hi, 2e160, max_relative = 1e-12);

        let est = AxisEstimate::from_bounds("w", "q", 1e-170, 4e-170).unwrap();
        assert_relative_eq!(est.value, 2e-170, max_relative = 1e-12);
        assert_relative_eq!(est.err_lo, 1e-170, max_relative = 1e-12);
        assert_relative_eq!(est.err_hi, 2e-170, max_relative = 1e-12);
    }

    #[test]
    fn test_reversed_bounds_swapped() {
        let est = AxisEstimate::from_bounds("w", "q", 8.0, 2.0).unwrap();
        assert_relative_eq!(est.value, 4.0);
        assert_relative_eq!(est.err_lo, 2.0);
        assert_relative_eq!(est.err_hi, 4.0);
    }
}
