//! Candidate row scoring and selection.
//!
//! Several perturbed-Reynolds runs produce candidate rows for the same
//! target; the solver is noisy enough that their stall angles scatter. The
//! selector keeps the row whose stall angles sit closest to the batch
//! medians, penalized by how many repairable gaps it carries between its
//! stall points. Rows with a gap that cannot be repaired are rejected
//! outright.

use crate::polar::PolarRow;
use crate::stall::{detect_stall, StallSide};

/// Weight of the gap fraction relative to the squared stall deviations.
const GAP_PENALTY_WEIGHT: f64 = 40.0;

/// Angle tolerance when locating a stall angle on the row grid.
const STALL_INDEX_TOLERANCE: f64 = 0.01;

/// Positive stall angle of a row, if defined.
pub fn positive_stall_angle(row: &PolarRow) -> Option<f64> {
    detect_stall(&row.alphas, &row.samples, StallSide::Positive).map(|s| s.alpha_deg)
}

/// Negative stall angle of a row, if defined.
pub fn negative_stall_angle(row: &PolarRow) -> Option<f64> {
    detect_stall(&row.alphas, &row.samples, StallSide::Negative).map(|s| s.alpha_deg)
}

fn median(values: &mut [f64]) -> f64 {
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = values.len() / 2;
    if values.len() % 2 == 1 {
        values[mid]
    } else {
        (values[mid - 1] + values[mid]) / 2.0
    }
}

fn index_of_angle(alphas: &[f64], target: f64) -> Option<usize> {
    alphas
        .iter()
        .position(|&alpha| (alpha - target).abs() < STALL_INDEX_TOLERANCE)
}

/// Score a candidate against the batch stall-angle medians.
///
/// Lower is better. The score is infinite when the row has no defined
/// stall on either side, or when any Missing sample between its stall
/// points lacks two Present neighbors on both sides (an unrepairable gap).
pub fn rate_row_error(
    row: &PolarRow,
    median_positive_stall: f64,
    median_negative_stall: f64,
) -> f64 {
    let (Some(positive_stall), Some(negative_stall)) =
        (positive_stall_angle(row), negative_stall_angle(row))
    else {
        return f64::INFINITY;
    };

    let positive_relative_error =
        ((positive_stall - median_positive_stall) / median_positive_stall).abs();
    let negative_relative_error =
        ((negative_stall - median_negative_stall) / median_negative_stall).abs();

    let (Some(positive_index), Some(negative_index)) = (
        index_of_angle(&row.alphas, positive_stall),
        index_of_angle(&row.alphas, negative_stall),
    ) else {
        return f64::INFINITY;
    };

    // Only gaps between the stall points matter; everything outside gets
    // replaced by extrapolation later anyway.
    let window = &row.samples[negative_index..=positive_index];

    let mut gap_count = 0usize;
    for (index, sample) in window.iter().enumerate() {
        if sample.is_some() {
            continue;
        }

        // A gap is repairable only with two Present neighbors on each side.
        if index < 2 || window[index - 1].is_none() || window[index - 2].is_none() {
            return f64::INFINITY;
        }
        if index + 2 >= window.len()
            || window[index + 1].is_none()
            || window[index + 2].is_none()
        {
            return f64::INFINITY;
        }

        gap_count += 1;
    }

    let gap_fraction = gap_count as f64 / window.len() as f64;

    GAP_PENALTY_WEIGHT * gap_fraction
        + positive_relative_error * positive_relative_error
        + negative_relative_error * negative_relative_error
}

/// Pick the best candidate row for one target Reynolds number.
///
/// Returns `None` when no candidate earned a finite score; that target
/// Reynolds number then produces no row. Ties resolve to the earliest
/// candidate.
pub fn pick_best_candidate(rows: Vec<PolarRow>) -> Option<PolarRow> {
    if rows.is_empty() {
        return None;
    }

    // Medians over candidates with a defined stall on both sides.
    let mut positive_stalls = Vec::new();
    let mut negative_stalls = Vec::new();
    for row in &rows {
        if let (Some(positive), Some(negative)) =
            (positive_stall_angle(row), negative_stall_angle(row))
        {
            positive_stalls.push(positive);
            negative_stalls.push(negative);
        }
    }
    if positive_stalls.is_empty() {
        return None;
    }

    let median_positive = median(&mut positive_stalls);
    let median_negative = median(&mut negative_stalls);

    let mut best_index = None;
    let mut best_error = f64::INFINITY;
    for (index, row) in rows.iter().enumerate() {
        let error = rate_row_error(row, median_positive, median_negative);
        if error < best_error {
            best_error = error;
            best_index = Some(index);
        }
    }

    let mut rows = rows;
    best_index.map(move |index| rows.swap_remove(index))
}
