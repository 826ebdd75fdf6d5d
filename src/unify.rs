//! Grid unification across Reynolds numbers.
//!
//! Every per-Reynolds row arrives on its own solver sweep grid and only
//! covers the pre-stall band reliably. The unifier builds one shared angle
//! grid spanning −90° to +90° — solver resolution inside the widest stall
//! envelope seen across rows, 1° steps just past stall, 4° steps out to
//! ±90° — and remaps every row onto it, extrapolating with the row's own
//! stall points wherever measured data is absent or untrustworthy.

use std::collections::{BTreeSet, HashMap};

use tracing::{debug, warn};

use crate::polar::{PolarPoint, PolarRow, Table};
use crate::stall::{detect_stall, StallSide};
use crate::viterna::extrapolate_sample;

/// Angles are keyed in micro-degrees: 6-decimal rounding makes grid
/// matching exact instead of float-fuzzy.
const GRID_SCALE: f64 = 1e6;

fn grid_key(alpha: f64) -> i64 {
    (alpha * GRID_SCALE).round() as i64
}

/// Build the shared angle grid from the widest stall envelope.
///
/// Original sweep angles are kept inside `[negative_stall, positive_stall]`;
/// outside, 1° steps run out to stall ± 30%·|stall| and 4° steps continue
/// to ±90°. The grid always contains exactly −90.0 and +90.0 and is sorted
/// and deduplicated after rounding to 6 decimals.
pub fn generate_unified_grid(
    negative_stall_deg: f64,
    positive_stall_deg: f64,
    sweep_alphas: &[f64],
) -> Vec<f64> {
    let mut keys: BTreeSet<i64> = BTreeSet::new();

    // Solver-resolution angles inside the stall envelope.
    for &alpha in sweep_alphas {
        if alpha >= negative_stall_deg && alpha <= positive_stall_deg {
            keys.insert(grid_key(alpha));
        }
    }

    // Negative side: 1° steps from stall to stall + 30% of its magnitude.
    let negative_transition = negative_stall_deg - negative_stall_deg.abs() * 0.3;
    let mut alpha = negative_stall_deg - 1.0;
    while alpha >= negative_transition && alpha >= -90.0 {
        keys.insert(grid_key(alpha));
        alpha -= 1.0;
    }
    // Then 4° steps from the nearest multiple of 4 down to −90°.
    let mut alpha = (negative_transition / 4.0).floor() * 4.0;
    while alpha >= -90.0 {
        keys.insert(grid_key(alpha));
        alpha -= 4.0;
    }
    keys.insert(grid_key(-90.0));

    // Positive side, mirrored.
    let positive_transition = positive_stall_deg + positive_stall_deg.abs() * 0.3;
    let mut alpha = positive_stall_deg + 1.0;
    while alpha <= positive_transition && alpha <= 90.0 {
        keys.insert(grid_key(alpha));
        alpha += 1.0;
    }
    let mut alpha = (positive_transition / 4.0).ceil() * 4.0;
    while alpha <= 90.0 {
        keys.insert(grid_key(alpha));
        alpha += 4.0;
    }
    keys.insert(grid_key(90.0));

    keys.into_iter().map(|key| key as f64 / GRID_SCALE).collect()
}

/// Remap one row onto the shared grid using its own stall points.
///
/// Inside the row's stall band a measured Present sample at the grid angle
/// is used when one exists; everywhere else the Viterna model fills in. A
/// row whose stall detection failed becomes all-Missing on the grid — it
/// stays in the table to preserve per-Reynolds alignment.
fn remap_row(row: &PolarRow, grid: &[f64], cd_max: f64) -> PolarRow {
    let positive_stall = detect_stall(&row.alphas, &row.samples, StallSide::Positive);
    let negative_stall = detect_stall(&row.alphas, &row.samples, StallSide::Negative);

    let (Some(positive_stall), Some(negative_stall)) = (positive_stall, negative_stall) else {
        warn!(
            reynolds = row.reynolds_number,
            "stall detection failed; row kept as all-missing"
        );
        return PolarRow {
            reynolds_number: row.reynolds_number,
            alphas: grid.to_vec(),
            samples: vec![None; grid.len()],
            sweep: row.sweep,
        };
    };

    debug!(
        reynolds = row.reynolds_number,
        positive_stall = positive_stall.alpha_deg,
        negative_stall = negative_stall.alpha_deg,
        "remapping row onto unified grid"
    );

    let measured: HashMap<i64, &PolarPoint> = row
        .alphas
        .iter()
        .zip(row.samples.iter())
        .filter_map(|(&alpha, sample)| sample.as_ref().map(|point| (grid_key(alpha), point)))
        .collect();

    let samples = grid
        .iter()
        .map(|&alpha| {
            let post_stall =
                alpha > positive_stall.alpha_deg || alpha < negative_stall.alpha_deg;
            if !post_stall {
                if let Some(point) = measured.get(&grid_key(alpha)) {
                    return Some(**point);
                }
            }
            // Post-stall, or pre-stall with no measured sample at this
            // grid angle.
            Some(extrapolate_sample(
                alpha,
                &positive_stall,
                &negative_stall,
                cd_max,
            ))
        })
        .collect();

    PolarRow {
        reynolds_number: row.reynolds_number,
        alphas: grid.to_vec(),
        samples,
        sweep: row.sweep,
    }
}

/// Unify a batch of per-Reynolds rows onto one shared grid.
///
/// Pass 1 finds the widest stall envelope across rows with successful
/// detection and builds the grid from it; pass 2 remaps every row with its
/// own stall points.
pub fn unify_rows(rows: Vec<PolarRow>, cd_max: f64) -> Table {
    if rows.is_empty() {
        return Table {
            alphas: Vec::new(),
            rows: Vec::new(),
        };
    }

    let mut most_negative_stall = 0.0f64;
    let mut most_positive_stall = 0.0f64;
    for row in &rows {
        let positive = detect_stall(&row.alphas, &row.samples, StallSide::Positive);
        let negative = detect_stall(&row.alphas, &row.samples, StallSide::Negative);
        if let (Some(positive), Some(negative)) = (positive, negative) {
            most_negative_stall = most_negative_stall.min(negative.alpha_deg);
            most_positive_stall = most_positive_stall.max(positive.alpha_deg);
        }
    }

    // Union of all rows' sweep angles seeds the in-envelope grid section.
    let sweep_alphas: Vec<f64> = {
        let keys: BTreeSet<i64> = rows
            .iter()
            .flat_map(|row| row.alphas.iter().map(|&alpha| grid_key(alpha)))
            .collect();
        keys.into_iter().map(|key| key as f64 / GRID_SCALE).collect()
    };

    let grid = generate_unified_grid(most_negative_stall, most_positive_stall, &sweep_alphas);
    debug!(
        points = grid.len(),
        negative_stall = most_negative_stall,
        positive_stall = most_positive_stall,
        "unified grid built"
    );

    let unified = rows.iter().map(|row| remap_row(row, &grid, cd_max)).collect();

    Table {
        alphas: grid,
        rows: unified,
    }
}
