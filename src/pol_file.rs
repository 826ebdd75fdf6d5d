//! Parser for XFOIL polar (.pol) output files.
//!
//! A polar file carries a free-text header (airfoil name, trip locations,
//! Mach / Reynolds / Ncrit line) followed by a dashed separator and one
//! whitespace-separated data line per converged angle of attack.

use std::fs;
use std::path::Path;

use crate::polar::{PolarData, PolarPoint};
use crate::solver::SolverError;

/// Parse a polar file from disk.
pub fn parse_pol_file(path: &Path) -> Result<PolarData, SolverError> {
    let text = fs::read_to_string(path)?;
    parse_pol_text(&text).ok_or_else(|| SolverError::Unparseable(path.to_path_buf()))
}

/// Parse polar file text. Returns `None` when the header separator is
/// absent or no data line could be read.
pub fn parse_pol_text(text: &str) -> Option<PolarData> {
    let lines: Vec<&str> = text.lines().collect();

    let mut airfoil_name = String::new();
    let mut reynolds_number = 0.0;
    let mut mach_number = 0.0;
    let mut ncrit = 0.0;
    let mut xtrf_top = 0.0;
    let mut xtrf_bottom = 0.0;

    let mut data_start = None;
    for (index, line) in lines.iter().enumerate() {
        if let Some(rest) = line.split("Calculated polar for:").nth(1) {
            airfoil_name = rest.trim().to_string();
        }

        if line.contains("xtrf =") {
            // " xtrf =   1.000 (top)        1.000 (bottom)"
            let numbers: Vec<f64> = line
                .split_whitespace()
                .filter_map(|token| token.parse::<f64>().ok())
                .collect();
            if numbers.len() >= 2 {
                xtrf_top = numbers[0];
                xtrf_bottom = numbers[1];
            }
        }

        if line.contains("Mach =") && line.contains("Re =") {
            // " Mach =   0.000     Re =     0.501 e 6     Ncrit =   7.000"
            let tokens: Vec<&str> = line.split_whitespace().collect();
            for (i, token) in tokens.iter().enumerate() {
                match *token {
                    "Mach" => {
                        if let Some(value) = parse_after_equals(&tokens, i) {
                            mach_number = value;
                        }
                    }
                    "Re" => {
                        if let Some(mantissa) = parse_after_equals(&tokens, i) {
                            // The exponent follows as "e <digits>".
                            if tokens.get(i + 3) == Some(&"e") {
                                if let Some(exponent) =
                                    tokens.get(i + 4).and_then(|t| t.parse::<i32>().ok())
                                {
                                    reynolds_number = mantissa * 10f64.powi(exponent);
                                }
                            }
                        }
                    }
                    "Ncrit" => {
                        if let Some(value) = parse_after_equals(&tokens, i) {
                            ncrit = value;
                        }
                    }
                    _ => {}
                }
            }
        }

        if line.trim().starts_with("------") {
            data_start = Some(index + 1);
            break;
        }
    }

    let data_start = data_start?;

    let mut points = Vec::new();
    for line in &lines[data_start..] {
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() < 7 {
            continue;
        }
        let values: Vec<f64> = parts[..7]
            .iter()
            .filter_map(|part| part.parse::<f64>().ok())
            .collect();
        if values.len() < 7 {
            // Skip lines that are not pure data (stray text, units).
            continue;
        }
        points.push(PolarPoint {
            alpha_deg: values[0],
            cl: values[1],
            cd: values[2],
            cdp: values[3],
            cm: values[4],
            top_xtr: values[5],
            bot_xtr: values[6],
        });
    }

    if points.is_empty() {
        return None;
    }

    Some(PolarData {
        airfoil_name,
        reynolds_number,
        mach_number,
        ncrit,
        xtrf_top,
        xtrf_bottom,
        points,
    })
}

/// Value of the token after `tokens[key_index] =`, if it parses.
fn parse_after_equals(tokens: &[&str], key_index: usize) -> Option<f64> {
    if tokens.get(key_index + 1) != Some(&"=") {
        return None;
    }
    tokens.get(key_index + 2)?.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_POL: &str = "\
       XFOIL         Version 6.99

 Calculated polar for: NACA 2412

 1 1 Reynolds number fixed          Mach number fixed

 xtrf =   1.000 (top)        1.000 (bottom)
 Mach =   0.000     Re =     0.501 e 6     Ncrit =   5.000

   alpha    CL        CD       CDp       CM     Top_Xtr  Bot_Xtr
  ------ -------- --------- --------- -------- -------- --------
   0.000   0.2543   0.00589   0.00097  -0.0533   0.6304   1.0000
   0.500   0.3100   0.00601   0.00103  -0.0531   0.6102   1.0000
   1.000   0.3658   0.00617   0.00112  -0.0529   0.5889   1.0000
";

    #[test]
    fn test_parse_header_metadata() {
        let data = parse_pol_text(SAMPLE_POL).unwrap();
        assert_eq!(data.airfoil_name, "NACA 2412");
        assert!((data.reynolds_number - 501_000.0).abs() < 1.0);
        assert_eq!(data.mach_number, 0.0);
        assert!((data.ncrit - 5.0).abs() < 1e-9);
        assert!((data.xtrf_top - 1.0).abs() < 1e-9);
        assert!((data.xtrf_bottom - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_parse_data_points() {
        let data = parse_pol_text(SAMPLE_POL).unwrap();
        assert_eq!(data.points.len(), 3);
        let first = &data.points[0];
        assert_eq!(first.alpha_deg, 0.0);
        assert!((first.cl - 0.2543).abs() < 1e-9);
        assert!((first.cd - 0.00589).abs() < 1e-9);
        assert!((first.cdp - 0.00097).abs() < 1e-9);
        assert!((first.cm - (-0.0533)).abs() < 1e-9);
        assert!((first.top_xtr - 0.6304).abs() < 1e-9);
        assert!((first.bot_xtr - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_missing_separator_fails() {
        assert!(parse_pol_text("no separator in sight\n").is_none());
    }

    #[test]
    fn test_no_data_lines_fails() {
        let truncated = "\
 Calculated polar for: NACA 2412
 Mach =   0.000     Re =     0.501 e 6     Ncrit =   5.000
  ------ -------- ---------
";
        assert!(parse_pol_text(truncated).is_none());
    }
}
