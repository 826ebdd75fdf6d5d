//! Stall detection from a coefficient row.
//!
//! The stall angle is the first strict local extremum of the lift
//! coefficient on one side of 0°: the first peak for positive angles, the
//! first trough for negative angles. Secondary extrema at higher angles are
//! deliberately ignored; they come from separated-flow artifacts, not from
//! the stall itself.

use crate::polar::PolarPoint;

/// Which side of 0° to search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StallSide {
    Positive,
    Negative,
}

/// Coefficient data at a detected stall angle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StallPoint {
    pub alpha_deg: f64,
    pub cl: f64,
    pub cd: f64,
    pub cm: f64,
}

impl StallPoint {
    fn from_sample(alpha_deg: f64, point: &PolarPoint) -> StallPoint {
        StallPoint {
            alpha_deg,
            cl: point.cl,
            cd: point.cd,
            cm: point.cm,
        }
    }
}

/// Detect the stall point on one side of a row.
///
/// Scans the Present samples with the requested angle sign in ascending
/// angle order and returns the first strict local maximum (positive side)
/// or minimum (negative side) of CL. If no turning point exists, falls back
/// to the global extremum on that side. Returns `None` when fewer than 3
/// Present samples exist on the side.
pub fn detect_stall(
    alphas: &[f64],
    samples: &[Option<PolarPoint>],
    side: StallSide,
) -> Option<StallPoint> {
    let mut valid: Vec<(f64, &PolarPoint)> = alphas
        .iter()
        .zip(samples.iter())
        .filter_map(|(&alpha, sample)| sample.as_ref().map(|point| (alpha, point)))
        .filter(|(alpha, _)| match side {
            StallSide::Positive => *alpha > 0.0,
            StallSide::Negative => *alpha < 0.0,
        })
        .collect();

    if valid.len() < 3 {
        return None;
    }

    valid.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

    // First strict turning point in ascending angle order.
    for i in 1..valid.len() - 1 {
        let prev_cl = valid[i - 1].1.cl;
        let curr_cl = valid[i].1.cl;
        let next_cl = valid[i + 1].1.cl;

        let is_turning_point = match side {
            StallSide::Positive => prev_cl < curr_cl && curr_cl > next_cl,
            StallSide::Negative => prev_cl > curr_cl && curr_cl < next_cl,
        };
        if is_turning_point {
            return Some(StallPoint::from_sample(valid[i].0, valid[i].1));
        }
    }

    // No turning point: fall back to the global extremum on this side.
    let extremum = match side {
        StallSide::Positive => valid
            .iter()
            .fold(&valid[0], |best, item| if item.1.cl > best.1.cl { item } else { best }),
        StallSide::Negative => valid
            .iter()
            .fold(&valid[0], |best, item| if item.1.cl < best.1.cl { item } else { best }),
    };
    Some(StallPoint::from_sample(extremum.0, extremum.1))
}
