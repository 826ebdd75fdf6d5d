//! Logarithmic Reynolds-number sampling.
//!
//! The lookup table needs test points distributed evenly on a log scale,
//! because aerodynamic coefficients vary with the order of magnitude of the
//! Reynolds number rather than with its absolute value. The sampler always
//! emits the range endpoints and every integer power of 10 strictly between
//! them; the remaining points are spread log-uniformly at roughly
//! `points_per_decade` per decade.

use crate::errors::TableError;

/// Tolerance in log10 space for classifying a value onto a decade boundary.
const DECADE_EPS: f64 = 1e-3;

/// Reynolds sweep configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReynoldsRange {
    pub min: f64,
    pub max: f64,
    pub points_per_decade: u32,
}

impl ReynoldsRange {
    /// Generate the sorted Reynolds test points.
    ///
    /// Fails with a configuration error when the bounds are not positive,
    /// `min` exceeds `max`, or `points_per_decade` is zero. `min == max`
    /// yields a single point.
    pub fn values(&self) -> Result<Vec<f64>, TableError> {
        if self.min <= 0.0 || self.max <= 0.0 {
            return Err(TableError::Config(
                "Reynolds bounds must be positive".to_string(),
            ));
        }
        if self.min > self.max {
            return Err(TableError::Config(format!(
                "Reynolds min {} exceeds max {}",
                self.min, self.max
            )));
        }
        if self.points_per_decade == 0 {
            return Err(TableError::Config(
                "points_per_decade must be positive".to_string(),
            ));
        }
        if self.min == self.max {
            return Ok(vec![self.min]);
        }

        let log_min = self.min.log10();
        let log_max = self.max.log10();
        let min_decade_bottom = (log_min + DECADE_EPS).floor() as i32;
        let max_decade_top = (log_max - DECADE_EPS).ceil() as i32;

        // Both bounds collapse onto one decade boundary sliver.
        if min_decade_bottom >= max_decade_top {
            return Ok(vec![self.min, self.max]);
        }

        // Bounds share a single decade span.
        if min_decade_bottom + 1 == max_decade_top {
            return Ok(self.single_decade());
        }

        // Far case: partial first decade, full middle decades, partial last.
        let mut result = self.first_decade();

        let last_decade_bottom = (log_max + DECADE_EPS).floor() as i32;
        let last_log_delta = log_max - f64::from(last_decade_bottom);
        result.extend(self.mid_decades(min_decade_bottom + 1, last_decade_bottom));

        if last_log_delta < DECADE_EPS {
            // max sits on a power of 10; the final decade span is empty and
            // the decade below it was generated as a full middle decade.
            result.push(self.max);
        } else {
            result.extend(self.last_decade(last_decade_bottom, last_log_delta));
            if (result.last().copied().unwrap_or(f64::NAN) - self.max).abs() >= DECADE_EPS {
                result.push(self.max);
            }
        }

        Ok(result)
    }

    /// min and max within one decade span: log-uniform steps between them.
    fn single_decade(&self) -> Vec<f64> {
        let log_min = self.min.log10();
        let log_max = self.max.log10();
        let log_delta = log_max - log_min;

        let count = ((f64::from(self.points_per_decade) * log_delta).round() as usize).max(1);

        let mut result = Vec::with_capacity(count + 1);
        for i in 0..count {
            result.push(self.min * 10f64.powf(i as f64 / count as f64 * log_delta));
        }
        result.push(self.max);
        result
    }

    /// Log-uniform points from `min` up to (excluding) the next power of 10.
    fn first_decade(&self) -> Vec<f64> {
        let log_min = self.min.log10();
        let decade_top = (log_min + DECADE_EPS).ceil();
        let log_delta = decade_top - log_min;

        let count = ((f64::from(self.points_per_decade) * log_delta).round() as usize).max(1);

        (0..count)
            .map(|i| self.min * 10f64.powf(i as f64 / count as f64 * log_delta))
            .collect()
    }

    /// Full decades `[first, last)`, each starting exactly on its power of
    /// 10 with `points_per_decade` log-uniform steps.
    fn mid_decades(&self, first: i32, last: i32) -> Vec<f64> {
        let per_decade = self.points_per_decade as usize;
        let mut result = Vec::new();
        for decade in first..last {
            for i in 0..per_decade {
                result.push(10f64.powf(f64::from(decade) + i as f64 / per_decade as f64));
            }
        }
        result
    }

    /// Log-uniform points from the last power of 10 up to (excluding) `max`.
    fn last_decade(&self, decade_bottom: i32, log_delta: f64) -> Vec<f64> {
        let count = ((f64::from(self.points_per_decade) * log_delta).round() as usize).max(1);

        (0..count)
            .map(|i| 10f64.powf(f64::from(decade_bottom) + i as f64 / count as f64 * log_delta))
            .collect()
    }
}
