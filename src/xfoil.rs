//! XFOIL process adapter.
//!
//! Runs the external XFOIL binary with a generated command script on
//! stdin, enforces a hard execution timeout, and parses the polar file the
//! run leaves behind. Every invocation works in its own files under a
//! shared `temp` directory, keyed by the caller's base name, so concurrent
//! invocations never collide.

use std::fs::{self, File};
use std::path::Path;
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::pol_file::parse_pol_file;
use crate::polar::PolarData;
use crate::solver::{InputScriptGenerator, PolarSolver, SolverError};
use crate::sweep::AoaSweep;

/// Poll interval while waiting for the solver process.
const WAIT_POLL: Duration = Duration::from_millis(50);

/// External XFOIL solver runner.
#[derive(Debug, Clone)]
pub struct XfoilRunner {
    /// Command used to launch the solver.
    pub command: String,
    /// Hard execution budget per invocation.
    pub timeout: Duration,
}

impl Default for XfoilRunner {
    fn default() -> Self {
        XfoilRunner {
            command: "xfoil".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl XfoilRunner {
    pub fn new(command: impl Into<String>, timeout: Duration) -> Self {
        XfoilRunner {
            command: command.into(),
            timeout,
        }
    }
}

impl PolarSolver for XfoilRunner {
    fn run_sweep(
        &self,
        generator: &dyn InputScriptGenerator,
        reynolds_number: f64,
        sweep: &AoaSweep,
        work_dir: &Path,
        base_name: &str,
    ) -> Result<PolarData, SolverError> {
        let temp_dir = work_dir.join("temp");
        fs::create_dir_all(&temp_dir)?;

        let input_path = temp_dir.join(format!("{base_name}_input.txt"));
        let pol_file_name = format!("{base_name}_output.pol");

        let script = generator.script(&pol_file_name, reynolds_number, sweep);
        fs::write(&input_path, script)?;

        debug!(
            command = %self.command,
            reynolds = reynolds_number,
            base = base_name,
            "launching solver"
        );

        // XFOIL reads its commands from stdin; no shell needed.
        let mut child = Command::new(&self.command)
            .current_dir(&temp_dir)
            .stdin(Stdio::from(File::open(&input_path)?))
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;

        // Poll until exit or the budget runs out; on expiry the process is
        // killed so a hung solver cannot stall the batch.
        let started = Instant::now();
        loop {
            match child.try_wait()? {
                Some(_status) => break,
                None => {
                    if started.elapsed() >= self.timeout {
                        child.kill()?;
                        child.wait()?;
                        return Err(SolverError::Timeout(self.timeout));
                    }
                    thread::sleep(WAIT_POLL);
                }
            }
        }

        let pol_path = temp_dir.join(&pol_file_name);
        if !pol_path.is_file() {
            return Err(SolverError::MissingOutput(pol_path));
        }

        parse_pol_file(&pol_path)
    }
}
