//! Local gap repair for a selected coefficient row.
//!
//! A solver run occasionally fails to converge at an isolated angle,
//! leaving a one-point hole between good samples. Such holes are filled
//! with a 4-point cubic interpolation; anything without two Present
//! neighbors on each side is left Missing.

use crate::polar::{PolarPoint, PolarRow};

/// Cubic interpolation over four equally spaced samples
/// `before_2, before_1, (interpolated), after_1, after_2`.
pub fn cubic_interpolation(before_2: f64, before_1: f64, after_1: f64, after_2: f64) -> f64 {
    (-before_2 + 9.0 * before_1 + 9.0 * after_1 - after_2) / 16.0
}

/// Interpolate a full sample from its four neighbors.
///
/// Only angle, CL, and CD are interpolated; the pressure-drag, moment, and
/// transition fields are unreliable at a repaired point and are zeroed.
fn interpolate_point(
    before_2: &PolarPoint,
    before_1: &PolarPoint,
    after_1: &PolarPoint,
    after_2: &PolarPoint,
) -> PolarPoint {
    PolarPoint {
        alpha_deg: cubic_interpolation(
            before_2.alpha_deg,
            before_1.alpha_deg,
            after_1.alpha_deg,
            after_2.alpha_deg,
        ),
        cl: cubic_interpolation(before_2.cl, before_1.cl, after_1.cl, after_2.cl),
        cd: cubic_interpolation(before_2.cd, before_1.cd, after_1.cd, after_2.cd),
        cdp: 0.0,
        cm: 0.0,
        top_xtr: 0.0,
        bot_xtr: 0.0,
    }
}

/// Produce a repaired copy of a row.
///
/// Every Missing sample whose neighbors at i−2, i−1, i+1, i+2 are all
/// Present in the *input* row is filled; fills never use other filled
/// values, so adjacent gaps stay Missing.
pub fn repair_row(row: &PolarRow) -> PolarRow {
    let mut repaired = row.clone();

    for index in 0..row.samples.len() {
        if row.samples[index].is_some() {
            continue;
        }
        if index < 2 || index + 2 >= row.samples.len() {
            continue;
        }

        let neighbors = (
            row.samples[index - 2].as_ref(),
            row.samples[index - 1].as_ref(),
            row.samples[index + 1].as_ref(),
            row.samples[index + 2].as_ref(),
        );
        if let (Some(b2), Some(b1), Some(a1), Some(a2)) = neighbors {
            repaired.samples[index] = Some(interpolate_point(b2, b1, a1, a2));
        }
    }

    repaired
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sweep::AoaSweep;

    fn sample(alpha: f64, cl: f64) -> Option<PolarPoint> {
        Some(PolarPoint {
            alpha_deg: alpha,
            cl,
            cd: 0.02,
            cdp: 0.015,
            cm: -0.05,
            top_xtr: 1.0,
            bot_xtr: 1.0,
        })
    }

    fn row_with_samples(samples: Vec<Option<PolarPoint>>) -> PolarRow {
        let sweep = AoaSweep::new(0.0, (samples.len() - 1) as f64, 1.0).unwrap();
        PolarRow {
            reynolds_number: 100_000.0,
            alphas: sweep.angles(),
            samples,
            sweep,
        }
    }

    #[test]
    fn test_constant_preservation() {
        assert_eq!(cubic_interpolation(0.0, 0.0, 0.0, 0.0), 0.0);
        assert_eq!(cubic_interpolation(1.0, 1.0, 1.0, 1.0), 1.0);
        assert_eq!(cubic_interpolation(-1.0, -1.0, -1.0, -1.0), -1.0);
    }

    #[test]
    fn test_linear_run_midpoint() {
        assert_eq!(cubic_interpolation(1.0, 2.0, 4.0, 5.0), 3.0);
        assert_eq!(cubic_interpolation(-5.0, -4.0, -2.0, -1.0), -3.0);
    }

    #[test]
    fn test_quadratic_run_close() {
        let interpolated = cubic_interpolation(4.0, 9.0, 25.0, 36.0);
        assert!((interpolated - 16.0).abs() < 2.0);
    }

    #[test]
    fn test_overshoot_at_flat_peak() {
        let interpolated = cubic_interpolation(4.0, 5.0, 5.0, 4.0);
        assert!(interpolated > 5.0);
        assert!(interpolated < 6.0);
    }

    #[test]
    fn test_isolated_gap_is_filled() {
        let row = row_with_samples(vec![
            sample(0.0, 0.0),
            sample(1.0, 0.1),
            None,
            sample(3.0, 0.3),
            sample(4.0, 0.4),
        ]);

        let repaired = repair_row(&row);
        let filled = repaired.samples[2].expect("gap should be filled");
        assert!((filled.alpha_deg - 2.0).abs() < 1e-9);
        assert!((filled.cl - 0.2).abs() < 1e-9);
        // Unreliable fields are zeroed at repaired points.
        assert_eq!(filled.cm, 0.0);
        assert_eq!(filled.cdp, 0.0);
        assert_eq!(filled.top_xtr, 0.0);
    }

    #[test]
    fn test_adjacent_gaps_stay_missing() {
        let row = row_with_samples(vec![
            sample(0.0, 0.0),
            sample(1.0, 0.1),
            None,
            None,
            sample(4.0, 0.4),
            sample(5.0, 0.5),
        ]);

        let repaired = repair_row(&row);
        assert!(repaired.samples[2].is_none());
        assert!(repaired.samples[3].is_none());
    }

    #[test]
    fn test_edge_gap_stays_missing() {
        let row = row_with_samples(vec![
            None,
            sample(1.0, 0.1),
            sample(2.0, 0.2),
            sample(3.0, 0.3),
            sample(4.0, 0.4),
        ]);

        let repaired = repair_row(&row);
        assert!(repaired.samples[0].is_none());
    }

    #[test]
    fn test_input_row_is_untouched() {
        let row = row_with_samples(vec![
            sample(0.0, 0.0),
            sample(1.0, 0.1),
            None,
            sample(3.0, 0.3),
            sample(4.0, 0.4),
        ]);

        let _ = repair_row(&row);
        assert!(row.samples[2].is_none());
    }
}
