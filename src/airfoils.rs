//! Per-airfoil solver input-script generators.
//!
//! Each airfoil supplies the full XFOIL command script for one sweep run:
//! airfoil designation, paneling, viscous setup with the run's Reynolds
//! number, polar accumulation into the requested output file, and the
//! angle sequence. The critical amplification factor Ncrit differs per
//! airfoil (lower values model a dirtier test environment).

use crate::solver::InputScriptGenerator;
use crate::sweep::AoaSweep;

/// NACA 2412, Ncrit = 5.
pub struct Naca2412;

impl InputScriptGenerator for Naca2412 {
    fn airfoil_name(&self) -> &str {
        "NACA 2412"
    }

    fn script(&self, polar_file_name: &str, reynolds_number: f64, sweep: &AoaSweep) -> String {
        format!(
            "\nNACA 2412\nPANE\n\nPLOP\nG\n\nOPER\nVISC {reynolds_number}\nVPAR\nN 5\nITER 200\n\nPACC\n{polar_file_name}\n\nASEQ {} {} {}\nPACC\n\nQUIT\n",
            sweep.min, sweep.max, sweep.step
        )
    }
}

/// NACA 4410, Ncrit = 7.
pub struct Naca4410;

impl InputScriptGenerator for Naca4410 {
    fn airfoil_name(&self) -> &str {
        "NACA 4410"
    }

    fn script(&self, polar_file_name: &str, reynolds_number: f64, sweep: &AoaSweep) -> String {
        format!(
            "\nNACA 4410\nPANE\n\nPLOP\nG\n\nOPER\nVISC {reynolds_number}\nVPAR\nN 7\nITER 200\n\nPACC\n{polar_file_name}\n\nASEQ {} {} {}\nPACC\n\nQUIT\n",
            sweep.min, sweep.max, sweep.step
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_embeds_run_parameters() {
        let sweep = AoaSweep::new(0.0, 25.0, 0.5).unwrap();
        let script = Naca2412.script("out.pol", 123456.0, &sweep);

        assert!(script.contains("NACA 2412"));
        assert!(script.contains("VISC 123456"));
        assert!(script.contains("out.pol"));
        assert!(script.contains("ASEQ 0 25 0.5"));
        assert!(script.contains("QUIT"));
    }

    #[test]
    fn test_airfoils_differ_in_ncrit() {
        let sweep = AoaSweep::new(0.0, 10.0, 1.0).unwrap();
        assert!(Naca2412.script("p.pol", 1e5, &sweep).contains("N 5"));
        assert!(Naca4410.script("p.pol", 1e5, &sweep).contains("N 7"));
    }
}
