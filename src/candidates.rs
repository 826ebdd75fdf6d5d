//! Candidate orchestration for one target Reynolds number.
//!
//! The solver is numerically touchy: a run at the exact target Reynolds
//! number can diverge while a run one unit away converges cleanly. So each
//! target is attempted at 2K perturbed Reynolds values, every attempt made
//! of two independent sweep branches (0° up, 0° down), and the best
//! surviving row is selected afterwards. Branch failures drop their
//! candidate and nothing else.

use std::path::Path;

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::errors::TableError;
use crate::polar::PolarRow;
use crate::repair::repair_row;
use crate::selection::pick_best_candidate;
use crate::solver::{InputScriptGenerator, PolarSolver};
use crate::sweep::AoaSweep;

/// Default candidate radius K: each target gets 2K perturbed attempts.
pub const DEFAULT_CANDIDATE_RADIUS: u32 = 10;

/// Build the perturbed Reynolds values for one target.
///
/// The target is rounded to the nearest integer first; the candidates are
/// R±1, R∓1, R±2, … out to the radius, interleaved so the closest values
/// come first. The target must exceed the radius, otherwise the low-side
/// candidates would go non-positive.
pub fn build_candidate_reynolds(
    reynolds_number: f64,
    radius: u32,
) -> Result<Vec<f64>, TableError> {
    if radius == 0 {
        return Err(TableError::Config(
            "candidate radius must be positive".to_string(),
        ));
    }
    let rounded = reynolds_number.round();
    if rounded <= f64::from(radius) {
        return Err(TableError::Config(format!(
            "Reynolds number {rounded} must exceed the candidate radius {radius}"
        )));
    }

    let mut candidates = Vec::with_capacity(2 * radius as usize);
    for offset in 1..=radius {
        candidates.push(rounded + f64::from(offset));
        candidates.push(rounded - f64::from(offset));
    }
    Ok(candidates)
}

/// Run both sweep branches for one candidate Reynolds value and merge them
/// into a single ascending row.
///
/// The negative branch runs 0° down to `sweep.min`, the positive branch 0°
/// up to `sweep.max`; the merged row is the reversed negative branch
/// (without its duplicate 0° entry) followed by the positive branch. A
/// failure of either branch drops the whole candidate.
pub fn compute_candidate<S, G>(
    solver: &S,
    generator: &G,
    reynolds_number: f64,
    sweep: &AoaSweep,
    work_dir: &Path,
) -> Option<PolarRow>
where
    S: PolarSolver + Sync,
    G: InputScriptGenerator + Sync,
{
    let positive_sweep = sweep.positive_branch();
    let positive_name = format!("{reynolds_number:.0}_positive");
    let positive_data = match solver.run_sweep(
        generator,
        reynolds_number,
        &positive_sweep,
        work_dir,
        &positive_name,
    ) {
        Ok(data) => data,
        Err(err) => {
            warn!(reynolds = reynolds_number, branch = "positive", %err, "candidate branch failed");
            return None;
        }
    };

    let negative_sweep = sweep.negative_branch();
    let negative_name = format!("{reynolds_number:.0}_negative");
    let negative_data = match solver.run_sweep(
        generator,
        reynolds_number,
        &negative_sweep,
        work_dir,
        &negative_name,
    ) {
        Ok(data) => data,
        Err(err) => {
            warn!(reynolds = reynolds_number, branch = "negative", %err, "candidate branch failed");
            return None;
        }
    };

    let positive_row = PolarRow::from_polar_data(&positive_data, &positive_sweep);
    let negative_row = PolarRow::from_polar_data(&negative_data, &negative_sweep);

    // Reversed negative branch (dropping its duplicate 0° sample), then
    // the positive branch: one strictly ascending row.
    let mut alphas = Vec::with_capacity(negative_row.alphas.len() + positive_row.alphas.len() - 1);
    let mut samples = Vec::with_capacity(alphas.capacity());
    alphas.extend(negative_row.alphas.iter().skip(1).rev());
    samples.extend(negative_row.samples.iter().skip(1).rev().cloned());
    alphas.extend(positive_row.alphas.iter());
    samples.extend(positive_row.samples.iter().cloned());

    Some(PolarRow {
        reynolds_number,
        alphas,
        samples,
        sweep: *sweep,
    })
}

/// Compute the best repaired row for one target Reynolds number.
///
/// All candidate branches run concurrently on the rayon pool; the collect
/// is the join barrier, after which selection runs single-threaded over
/// the surviving rows. Returns `Ok(None)` when no candidate earned a
/// finite score — that target is skipped, the batch continues.
pub fn compute_best_candidate<S, G>(
    solver: &S,
    generator: &G,
    reynolds_number: f64,
    sweep: &AoaSweep,
    radius: u32,
    work_dir: &Path,
) -> Result<Option<PolarRow>, TableError>
where
    S: PolarSolver + Sync,
    G: InputScriptGenerator + Sync,
{
    let target = reynolds_number.round();
    let candidate_values = build_candidate_reynolds(target, radius)?;

    let surviving: Vec<PolarRow> = candidate_values
        .par_iter()
        .map(|&candidate| compute_candidate(solver, generator, candidate, sweep, work_dir))
        .collect::<Vec<Option<PolarRow>>>()
        .into_iter()
        .flatten()
        .collect();

    debug!(
        reynolds = target,
        attempted = candidate_values.len(),
        survived = surviving.len(),
        "candidate batch complete"
    );

    Ok(pick_best_candidate(surviving).map(|best| {
        let mut repaired = repair_row(&best);
        // The selected row represents the target, not the perturbed value
        // it was computed at.
        repaired.reynolds_number = target;
        repaired
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polar::{PolarData, PolarPoint};
    use crate::solver::SolverError;

    #[test]
    fn test_candidates_are_interleaved_integers() {
        let candidates = build_candidate_reynolds(100_000.2, 3).unwrap();
        assert_eq!(
            candidates,
            vec![100_001.0, 99_999.0, 100_002.0, 99_998.0, 100_003.0, 99_997.0]
        );
        for value in &candidates {
            assert_eq!(value.fract(), 0.0);
        }
    }

    #[test]
    fn test_small_reynolds_rejected() {
        assert!(build_candidate_reynolds(5.0, 10).is_err());
        assert!(build_candidate_reynolds(100.0, 0).is_err());
    }

    /// Solver returning an analytic polar, failing entirely for Reynolds
    /// values divisible by the given modulus.
    struct FakeSolver {
        fail_modulus: i64,
    }

    impl PolarSolver for FakeSolver {
        fn run_sweep(
            &self,
            _generator: &dyn InputScriptGenerator,
            reynolds_number: f64,
            sweep: &AoaSweep,
            _work_dir: &Path,
            base_name: &str,
        ) -> Result<PolarData, SolverError> {
            if self.fail_modulus > 0 && (reynolds_number as i64) % self.fail_modulus == 0 {
                return Err(SolverError::MissingOutput(base_name.into()));
            }
            let points = sweep
                .angles()
                .iter()
                .map(|&alpha| PolarPoint {
                    alpha_deg: alpha,
                    cl: 0.1 * alpha,
                    cd: 0.02,
                    cdp: 0.015,
                    cm: -0.05,
                    top_xtr: 1.0,
                    bot_xtr: 1.0,
                })
                .collect();
            Ok(PolarData {
                airfoil_name: "FAKE".to_string(),
                reynolds_number,
                mach_number: 0.0,
                ncrit: 5.0,
                xtrf_top: 1.0,
                xtrf_bottom: 1.0,
                points,
            })
        }
    }

    struct FakeGenerator;

    impl InputScriptGenerator for FakeGenerator {
        fn airfoil_name(&self) -> &str {
            "FAKE"
        }
        fn script(&self, _pol: &str, _re: f64, _sweep: &AoaSweep) -> String {
            String::new()
        }
    }

    #[test]
    fn test_merged_row_is_ascending_without_duplicate_zero() {
        let solver = FakeSolver { fail_modulus: 0 };
        let sweep = AoaSweep::new(-2.0, 3.0, 1.0).unwrap();

        let row = compute_candidate(&solver, &FakeGenerator, 50_000.0, &sweep, Path::new("."))
            .expect("candidate should survive");

        assert_eq!(row.alphas, vec![-2.0, -1.0, 0.0, 1.0, 2.0, 3.0]);
        let zero_count = row.alphas.iter().filter(|&&a| a == 0.0).count();
        assert_eq!(zero_count, 1);
        assert_eq!(row.samples.len(), row.alphas.len());
    }

    #[test]
    fn test_failed_branch_drops_candidate() {
        let solver = FakeSolver { fail_modulus: 1 }; // every run fails
        let sweep = AoaSweep::new(-2.0, 3.0, 1.0).unwrap();

        let row = compute_candidate(&solver, &FakeGenerator, 50_000.0, &sweep, Path::new("."));
        assert!(row.is_none());
    }

    #[test]
    fn test_sibling_failures_do_not_abort_batch() {
        // Half the candidates fail; the batch must still produce a row.
        let solver = FakeSolver { fail_modulus: 2 };
        let sweep = AoaSweep::new(-15.0, 25.0, 1.0).unwrap();

        let best = compute_best_candidate(
            &solver,
            &FakeGenerator,
            50_000.0,
            &sweep,
            5,
            Path::new("."),
        )
        .unwrap();
        let best = best.expect("odd candidates should survive");
        assert_eq!(best.reynolds_number, 50_000.0);
    }
}
