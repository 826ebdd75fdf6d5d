//! Full-table assembly: Reynolds sweep → candidate runs → selection →
//! repair → grid unification.
//!
//! Every failure mode below the configuration level degrades the table
//! instead of aborting it: a failed candidate branch drops one candidate, a
//! failed selection skips one Reynolds number, a failed stall detection
//! leaves one all-Missing row.

use std::path::Path;

use serde::Serialize;
use tracing::{info, warn};

use crate::candidates::{compute_best_candidate, DEFAULT_CANDIDATE_RADIUS};
use crate::errors::TableError;
use crate::polar::{PolarRow, Table};
use crate::reynolds_sampling::ReynoldsRange;
use crate::solver::{InputScriptGenerator, PolarSolver};
use crate::sweep::AoaSweep;
use crate::unify::unify_rows;
use crate::viterna::DEFAULT_CD_MAX;

/// Tunable parameters of a table computation.
#[derive(Debug, Clone, Copy)]
pub struct TableConfig {
    /// Reynolds sweep bounds and log-scale density.
    pub reynolds: ReynoldsRange,
    /// Angle-of-attack sweep for the solver runs.
    pub sweep: AoaSweep,
    /// Candidate radius K: 2K perturbed runs per target.
    pub candidate_radius: u32,
    /// Maximum drag coefficient of the Viterna model.
    pub cd_max: f64,
}

impl TableConfig {
    pub fn new(reynolds: ReynoldsRange, sweep: AoaSweep) -> Self {
        TableConfig {
            reynolds,
            sweep,
            candidate_radius: DEFAULT_CANDIDATE_RADIUS,
            cd_max: DEFAULT_CD_MAX,
        }
    }

    /// Validate everything that must hold before any solver work starts.
    pub fn validate(&self) -> Result<(), TableError> {
        self.reynolds.values()?;
        if self.sweep.step <= 0.0 {
            return Err(TableError::Config(
                "angle sweep step must be positive".to_string(),
            ));
        }
        if self.sweep.min > 0.0 || self.sweep.max < 0.0 {
            return Err(TableError::Config(format!(
                "angle sweep [{}, {}] must straddle 0°",
                self.sweep.min, self.sweep.max
            )));
        }
        if self.candidate_radius == 0 {
            return Err(TableError::Config(
                "candidate radius must be positive".to_string(),
            ));
        }
        if !(self.cd_max > 0.0) {
            return Err(TableError::Config(format!(
                "cd_max must be positive, got {}",
                self.cd_max
            )));
        }
        Ok(())
    }
}

/// Data completeness between the stall boundaries, for observability only.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CoverageSummary {
    pub total_points: usize,
    pub present_points: usize,
    pub missing_points: usize,
    pub present_fraction: f64,
}

/// Contiguous span of indices around 0° bounded by the first Missing
/// sample on each side.
fn contiguous_valid_span(row: &PolarRow) -> (usize, usize) {
    // Index of the angle closest to 0°, preferring the later of ties.
    let mut smallest_index = 0;
    let mut smallest_abs = f64::INFINITY;
    for (index, &alpha) in row.alphas.iter().enumerate() {
        if alpha.abs() <= smallest_abs {
            smallest_abs = alpha.abs();
            smallest_index = index;
        }
    }

    let mut negative_bound = smallest_index;
    while negative_bound >= 1 {
        if row.samples[negative_bound - 1].is_none() {
            break;
        }
        negative_bound -= 1;
    }

    let mut positive_bound = smallest_index;
    while positive_bound + 1 < row.samples.len() {
        if row.samples[positive_bound + 1].is_none() {
            break;
        }
        positive_bound += 1;
    }

    (negative_bound, positive_bound)
}

/// Summarize data completeness over every row's valid span.
pub fn coverage_summary(table: &Table) -> CoverageSummary {
    let mut total_points = 0;
    let mut missing_points = 0;

    for row in &table.rows {
        if row.samples.is_empty() {
            continue;
        }
        let (negative_bound, positive_bound) = contiguous_valid_span(row);
        for index in negative_bound..=positive_bound {
            total_points += 1;
            if row.samples[index].is_none() {
                missing_points += 1;
            }
        }
    }

    let present_points = total_points - missing_points;
    let present_fraction = if total_points > 0 {
        present_points as f64 / total_points as f64
    } else {
        0.0
    };

    CoverageSummary {
        total_points,
        present_points,
        missing_points,
        present_fraction,
    }
}

/// Compute the full coefficient table over a Reynolds sweep.
///
/// Targets whose candidate batch produces no usable row are skipped with a
/// warning; only invalid configuration aborts the run.
pub fn compute_table<S, G>(
    solver: &S,
    generator: &G,
    config: &TableConfig,
    work_dir: &Path,
) -> Result<Table, TableError>
where
    S: PolarSolver + Sync,
    G: InputScriptGenerator + Sync,
{
    config.validate()?;

    let reynolds_values = config.reynolds.values()?;
    info!(
        airfoil = generator.airfoil_name(),
        targets = reynolds_values.len(),
        "starting table computation"
    );

    let mut rows: Vec<PolarRow> = Vec::with_capacity(reynolds_values.len());
    for reynolds_number in reynolds_values {
        let target = reynolds_number.trunc();
        info!(reynolds = target, "computing coefficients");

        let best = compute_best_candidate(
            solver,
            generator,
            target,
            &config.sweep,
            config.candidate_radius,
            work_dir,
        )?;

        match best {
            Some(row) => rows.push(row),
            None => {
                warn!(reynolds = target, "no usable candidate; target skipped");
            }
        }
    }

    let table = unify_rows(rows, config.cd_max);

    let coverage = coverage_summary(&table);
    info!(
        rows = table.rows.len(),
        grid_points = table.alphas.len(),
        present = coverage.present_points,
        missing = coverage.missing_points,
        present_fraction = coverage.present_fraction,
        "table complete"
    );

    Ok(table)
}
