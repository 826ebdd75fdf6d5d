//! Row-oriented CSV persistence of the final table.
//!
//! Header: `Reynolds,Coefficient,AOA_<a1>,AOA_<a2>,…` over the shared
//! grid; then three data rows per Reynolds number, one each for CL, CD,
//! and CM. A Missing sample serializes as an empty field.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::errors::TableError;
use crate::polar::{PolarRow, Table};

/// Write the whole table to a CSV file, overwriting any existing file.
pub fn write_table_csv(path: &Path, table: &Table) -> Result<(), TableError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    write_header(&mut writer, &table.alphas)?;
    for row in &table.rows {
        write_row(&mut writer, row)?;
    }
    writer.flush()?;
    Ok(())
}

fn write_header(writer: &mut impl Write, alphas: &[f64]) -> Result<(), TableError> {
    write!(writer, "Reynolds,Coefficient")?;
    for alpha in alphas {
        write!(writer, ",AOA_{alpha}")?;
    }
    writeln!(writer)?;
    Ok(())
}

fn write_row(writer: &mut impl Write, row: &PolarRow) -> Result<(), TableError> {
    write_coefficient_line(writer, row, "CL", |point| point.cl)?;
    write_coefficient_line(writer, row, "CD", |point| point.cd)?;
    write_coefficient_line(writer, row, "CM", |point| point.cm)?;
    Ok(())
}

fn write_coefficient_line(
    writer: &mut impl Write,
    row: &PolarRow,
    label: &str,
    extract: impl Fn(&crate::polar::PolarPoint) -> f64,
) -> Result<(), TableError> {
    write!(writer, "{},{label}", row.reynolds_number)?;
    for sample in &row.samples {
        match sample {
            Some(point) => write!(writer, ",{}", extract(point))?,
            None => write!(writer, ",")?,
        }
    }
    writeln!(writer)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polar::PolarPoint;
    use crate::sweep::AoaSweep;
    use std::fs;

    fn sample(alpha: f64) -> Option<PolarPoint> {
        Some(PolarPoint {
            alpha_deg: alpha,
            cl: 0.5,
            cd: 0.02,
            cdp: 0.015,
            cm: -0.05,
            top_xtr: 1.0,
            bot_xtr: 1.0,
        })
    }

    fn test_table() -> Table {
        let alphas = vec![-1.0, 0.0, 1.0];
        let sweep = AoaSweep::new(-1.0, 1.0, 1.0).unwrap();
        let row = PolarRow {
            reynolds_number: 50_000.0,
            alphas: alphas.clone(),
            samples: vec![sample(-1.0), None, sample(1.0)],
            sweep,
        };
        Table {
            alphas,
            rows: vec![row],
        }
    }

    #[test]
    fn test_csv_layout() {
        let path = std::env::temp_dir().join("aero_table_csv_test.csv");
        write_table_csv(&path, &test_table()).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "Reynolds,Coefficient,AOA_-1,AOA_0,AOA_1");
        assert!(lines[1].starts_with("50000,CL,"));
        assert!(lines[2].starts_with("50000,CD,"));
        assert!(lines[3].starts_with("50000,CM,"));

        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_missing_serializes_as_empty_field() {
        let path = std::env::temp_dir().join("aero_table_csv_missing_test.csv");
        write_table_csv(&path, &test_table()).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        let cl_line = text.lines().nth(1).unwrap();

        // -1.0° present, 0.0° missing, 1.0° present.
        assert_eq!(cl_line, "50000,CL,0.5,,0.5");

        fs::remove_file(&path).ok();
    }
}
