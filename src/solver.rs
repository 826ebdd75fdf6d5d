//! Capability interfaces for the external aerodynamic solver.
//!
//! The numerical pipeline never talks to a process directly; it goes
//! through [`PolarSolver`], which either returns a structured polar result
//! or a typed failure. Per-airfoil solver input scripts come from
//! [`InputScriptGenerator`] implementations.

use std::error::Error;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::polar::PolarData;
use crate::sweep::AoaSweep;

/// Failure of a single solver invocation.
///
/// These are never fatal to a batch: the candidate branch that hit the
/// failure is dropped and its siblings continue.
#[derive(Debug)]
pub enum SolverError {
    /// The solver process could not be started, or a run artifact could
    /// not be written.
    Io(io::Error),
    /// The solver exceeded its execution budget and was killed.
    Timeout(Duration),
    /// The solver exited but never produced its output artifact.
    MissingOutput(PathBuf),
    /// The output artifact exists but could not be parsed.
    Unparseable(PathBuf),
}

impl fmt::Display for SolverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolverError::Io(err) => write!(f, "solver i/o failure: {err}"),
            SolverError::Timeout(limit) => {
                write!(f, "solver timed out after {:.1}s", limit.as_secs_f64())
            }
            SolverError::MissingOutput(path) => {
                write!(f, "solver produced no output at {}", path.display())
            }
            SolverError::Unparseable(path) => {
                write!(f, "solver output at {} could not be parsed", path.display())
            }
        }
    }
}

impl Error for SolverError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SolverError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for SolverError {
    fn from(err: io::Error) -> Self {
        SolverError::Io(err)
    }
}

/// Generates the solver input script for one airfoil.
///
/// One implementation per airfoil; the script embeds the airfoil
/// designation, the viscous-solution parameters, the polar output file
/// name, and the requested sweep.
pub trait InputScriptGenerator {
    /// Human-readable airfoil designation, e.g. "NACA 2412".
    fn airfoil_name(&self) -> &str;

    /// Full solver input script for one sweep run.
    fn script(&self, polar_file_name: &str, reynolds_number: f64, sweep: &AoaSweep) -> String;
}

/// Runs one solver sweep and returns the structured polar result.
///
/// Implementations own the whole process lifecycle, including the
/// execution timeout and killing the solver when it expires. Each
/// invocation must be side-effect isolated (its own scratch files under
/// `work_dir`, keyed by `base_name`) so invocations can run concurrently.
pub trait PolarSolver {
    fn run_sweep(
        &self,
        generator: &dyn InputScriptGenerator,
        reynolds_number: f64,
        sweep: &AoaSweep,
        work_dir: &Path,
        base_name: &str,
    ) -> Result<PolarData, SolverError>;
}
