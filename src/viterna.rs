//! Viterna-Corrigan post-stall extrapolation.
//!
//! Extends airfoil lift, drag, and moment coefficients beyond stall out to
//! ±180° from a single stall point and an assumed maximum drag coefficient.
//!
//! Reference: Viterna, L.A. and Corrigan, R.D. (1981), "Fixed Pitch Rotor
//! Performance of Large Horizontal Axis Wind Turbines", DOE/NASA Workshop,
//! Cleveland, OH.

use crate::polar::PolarPoint;
use crate::stall::StallPoint;

/// Default maximum drag coefficient; typical for airfoils is 1.8-2.0.
pub const DEFAULT_CD_MAX: f64 = 1.8;

/// Lower bound applied to the extrapolated drag coefficient.
const CD_FLOOR: f64 = 0.01;

/// Coefficients of the Viterna extrapolation model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViternaCoefficients {
    /// CL coefficient of the sin(2α) term.
    pub a1: f64,
    /// CL coefficient of the cos²(α)/sin(α) term.
    pub a2: f64,
    /// CD coefficient of the sin²(α) term.
    pub b1: f64,
    /// CD coefficient of the cos(α) term.
    pub b2: f64,
    /// Constant moment coefficient carried from the stall point.
    pub cm_constant: f64,
}

/// Compute the Viterna coefficients from a stall point.
pub fn compute_coefficients(stall: &StallPoint, cd_max: f64) -> ViternaCoefficients {
    let alpha_rad = stall.alpha_deg.to_radians();
    let sin_alpha = alpha_rad.sin();
    let cos_alpha = alpha_rad.cos();

    let a1 = cd_max / 2.0;

    // cos(α) → 0 near ±90°; the A2 term degenerates there.
    let a2 = if cos_alpha.abs() < 1e-6 {
        0.0
    } else {
        (stall.cl - cd_max * sin_alpha * cos_alpha) * sin_alpha / (cos_alpha * cos_alpha)
    };

    let b1 = cd_max;
    let b2 = stall.cd - cd_max * sin_alpha * sin_alpha;

    ViternaCoefficients {
        a1,
        a2,
        b1,
        b2,
        cm_constant: stall.cm,
    }
}

/// Evaluate the model at an angle of attack.
///
/// The angle is normalized into (−180°, 180°] first, which makes the
/// result exactly periodic in 360°.
///
/// # Returns
/// Tuple of (CL, CD, CM).
pub fn extrapolate(alpha_deg: f64, coeffs: &ViternaCoefficients) -> (f64, f64, f64) {
    let mut alpha = alpha_deg;
    while alpha > 180.0 {
        alpha -= 360.0;
    }
    while alpha < -180.0 {
        alpha += 360.0;
    }

    let alpha_rad = alpha.to_radians();
    let sin_alpha = alpha_rad.sin();
    let cos_alpha = alpha_rad.cos();
    let sin_2alpha = (2.0 * alpha_rad).sin();

    // CL = A1·sin(2α) + A2·cos²(α)/sin(α), dropping the singular term at
    // α = 0 and ±180°.
    let cl = if sin_alpha.abs() < 1e-6 {
        coeffs.a1 * sin_2alpha
    } else {
        coeffs.a1 * sin_2alpha + coeffs.a2 * cos_alpha * cos_alpha / sin_alpha
    };

    // CD = B1·sin²(α) + B2·cos(α), floored to stay physical.
    let cd = (coeffs.b1 * sin_alpha * sin_alpha + coeffs.b2 * cos_alpha).max(CD_FLOOR);

    (cl, cd, coeffs.cm_constant)
}

/// Build a full extrapolated sample at an angle of attack.
///
/// Angles ≥ 0° use the positive-stall coefficient set, angles < 0° the
/// negative set. Post-stall all drag is pressure drag, and the transition
/// locations carry no meaning, so they are zeroed.
pub fn extrapolate_sample(
    alpha_deg: f64,
    positive_stall: &StallPoint,
    negative_stall: &StallPoint,
    cd_max: f64,
) -> PolarPoint {
    let stall = if alpha_deg >= 0.0 {
        positive_stall
    } else {
        negative_stall
    };

    let coeffs = compute_coefficients(stall, cd_max);
    let (cl, cd, cm) = extrapolate(alpha_deg, &coeffs);

    PolarPoint {
        alpha_deg,
        cl,
        cd,
        cdp: cd,
        cm,
        top_xtr: 0.0,
        bot_xtr: 0.0,
    }
}
