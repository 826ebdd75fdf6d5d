//! # Aero Table
//!
//! Turns raw, noisy, per-run aerodynamic-coefficient sweeps (CL/CD/CM vs.
//! angle of attack, at many Reynolds numbers) into a validated, gap-free
//! lookup table spanning ±90°, for use by downstream aerodynamic
//! simulators.
//!
//! The pipeline: log-scale Reynolds sampling → per-target perturbed
//! candidate runs against the external solver (in parallel) →
//! median-stall candidate selection → local gap repair → stall detection →
//! Viterna-Corrigan post-stall extrapolation with a grid unified across
//! Reynolds numbers.

// Re-export the main types and functions
pub use candidates::{compute_best_candidate, DEFAULT_CANDIDATE_RADIUS};
pub use errors::TableError;
pub use polar::{PolarData, PolarPoint, PolarRow, Table};
pub use reynolds_sampling::ReynoldsRange;
pub use solver::{InputScriptGenerator, PolarSolver, SolverError};
pub use stall::{detect_stall, StallPoint, StallSide};
pub use sweep::AoaSweep;
pub use table::{compute_table, coverage_summary, CoverageSummary, TableConfig};
pub use viterna::DEFAULT_CD_MAX;
pub use xfoil::XfoilRunner;

// Module declarations
pub mod airfoils;
pub mod candidates;
pub mod csv_export;
pub mod errors;
pub mod pol_file;
pub mod polar;
pub mod repair;
pub mod reynolds_sampling;
pub mod selection;
pub mod solver;
pub mod stall;
pub mod stopwatch;
pub mod sweep;
pub mod table;
pub mod unify;
pub mod viterna;
pub mod xfoil;
