//! Polar data model: per-angle coefficient samples, per-Reynolds rows, and
//! the final unified table.
//!
//! A missing sample is always an explicit `None`, never a sentinel value,
//! so gap detection can never mistake a placeholder for real data.

use crate::sweep::AoaSweep;

/// One coefficient sample at a single angle of attack.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolarPoint {
    /// Angle of attack (degrees).
    pub alpha_deg: f64,
    /// Lift coefficient.
    pub cl: f64,
    /// Drag coefficient.
    pub cd: f64,
    /// Pressure drag coefficient.
    pub cdp: f64,
    /// Moment coefficient.
    pub cm: f64,
    /// Top-surface transition location (x/c).
    pub top_xtr: f64,
    /// Bottom-surface transition location (x/c).
    pub bot_xtr: f64,
}

/// Structured result of one solver run: metadata plus the ordered samples
/// the solver converged on (possibly a subset of the requested sweep).
#[derive(Debug, Clone)]
pub struct PolarData {
    pub airfoil_name: String,
    pub reynolds_number: f64,
    pub mach_number: f64,
    pub ncrit: f64,
    pub xtrf_top: f64,
    pub xtrf_bottom: f64,
    pub points: Vec<PolarPoint>,
}

/// Coefficient row at one Reynolds number: an ordered angle sequence with
/// one aligned sample slot per angle.
#[derive(Debug, Clone)]
pub struct PolarRow {
    pub reynolds_number: f64,
    /// Angle grid, ascending.
    pub alphas: Vec<f64>,
    /// One sample per angle; `None` where the solver did not converge.
    pub samples: Vec<Option<PolarPoint>>,
    /// Sweep configuration the row originated from.
    pub sweep: AoaSweep,
}

impl PolarRow {
    /// Align raw solver output onto the sweep's angle grid.
    ///
    /// Every sweep angle gets a slot; angles the solver skipped stay
    /// `None`. Solver angles are matched exactly (within 1e-9).
    pub fn from_polar_data(data: &PolarData, sweep: &AoaSweep) -> PolarRow {
        let alphas = sweep.angles();
        let mut samples: Vec<Option<PolarPoint>> = vec![None; alphas.len()];

        for (index, &alpha) in alphas.iter().enumerate() {
            let found = data
                .points
                .iter()
                .find(|point| (point.alpha_deg - alpha).abs() < 1e-9);
            if let Some(point) = found {
                samples[index] = Some(PolarPoint {
                    alpha_deg: alpha,
                    ..*point
                });
            }
        }

        PolarRow {
            reynolds_number: data.reynolds_number,
            alphas,
            samples,
            sweep: *sweep,
        }
    }

    /// Number of non-missing samples.
    pub fn present_count(&self) -> usize {
        self.samples.iter().filter(|s| s.is_some()).count()
    }
}

/// The final product: one shared angle grid and one row per Reynolds
/// number, each row fully aligned to the grid.
#[derive(Debug, Clone)]
pub struct Table {
    /// Shared angle grid, ascending, spanning −90° to +90°.
    pub alphas: Vec<f64>,
    /// One unified row per Reynolds number, in Reynolds order.
    pub rows: Vec<PolarRow>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(alpha: f64, cl: f64) -> PolarPoint {
        PolarPoint {
            alpha_deg: alpha,
            cl,
            cd: 0.02,
            cdp: 0.015,
            cm: -0.05,
            top_xtr: 1.0,
            bot_xtr: 1.0,
        }
    }

    #[test]
    fn test_alignment_fills_gaps_with_none() {
        let sweep = AoaSweep::new(0.0, 2.0, 0.5).unwrap();
        let data = PolarData {
            airfoil_name: "TEST".to_string(),
            reynolds_number: 50_000.0,
            mach_number: 0.0,
            ncrit: 5.0,
            xtrf_top: 1.0,
            xtrf_bottom: 1.0,
            // 1.0° is missing from the solver output
            points: vec![point(0.0, 0.0), point(0.5, 0.05), point(1.5, 0.15), point(2.0, 0.2)],
        };

        let row = PolarRow::from_polar_data(&data, &sweep);
        assert_eq!(row.alphas.len(), 5);
        assert!(row.samples[0].is_some());
        assert!(row.samples[1].is_some());
        assert!(row.samples[2].is_none());
        assert!(row.samples[3].is_some());
        assert!(row.samples[4].is_some());
        assert_eq!(row.present_count(), 4);
    }

    #[test]
    fn test_alignment_ignores_off_grid_points() {
        let sweep = AoaSweep::new(0.0, 1.0, 0.5).unwrap();
        let data = PolarData {
            airfoil_name: "TEST".to_string(),
            reynolds_number: 50_000.0,
            mach_number: 0.0,
            ncrit: 5.0,
            xtrf_top: 1.0,
            xtrf_bottom: 1.0,
            points: vec![point(0.25, 0.02)],
        };

        let row = PolarRow::from_polar_data(&data, &sweep);
        assert_eq!(row.present_count(), 0);
    }
}
