//! Per-structure value tables: `label v1 v2 ...` per line.

use std::io::{BufRead, Write};

use log::debug;

use crate::assemble::StructureRow;
use crate::error::{ReportError, Result};

/// A parsed value table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    /// Rows in file order.
    pub rows: Vec<StructureRow>,
}

impl Table {
    /// Parse a table, skipping blank lines.
    pub fn parse<R: BufRead>(reader: R) -> Result<Self> {
        let mut rows = Vec::new();
        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let mut tokens = line.split_whitespace();
            let Some(label) = tokens.next() else {
                continue;
            };
            let values = tokens
                .map(|tok| {
                    tok.parse::<f64>()
                        .map_err(|_| ReportError::parse(idx + 1, format!("not a number: {tok:?}")))
                })
                .collect::<Result<Vec<_>>>()?;
            rows.push(StructureRow {
                label: label.to_string(),
                values,
            });
        }
        Ok(Self { rows })
    }

    /// All numeric values, row by row.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.rows.iter().flat_map(|row| row.values.iter().copied())
    }

    /// Write rows with a fixed number of decimals.
    pub fn write_fixed<W: Write>(&self, mut out: W, decimals: usize) -> Result<()> {
        for row in &self.rows {
            write!(out, "{}", row.label)?;
            for v in &row.values {
                write!(out, " {:.*}", decimals, v)?;
            }
            writeln!(out)?;
        }
        Ok(())
    }
}

/// Join two tables line by line.
///
/// Each output line is the line of `a` followed by the line of `b` minus
/// its label. Stops at the end of the shorter input and returns the number
/// of lines written.
pub fn merge_tables<A: BufRead, B: BufRead, W: Write>(a: A, b: B, mut out: W) -> Result<usize> {
    let mut written = 0;
    for (left, right) in a.lines().zip(b.lines()) {
        let (left, right) = (left?, right?);
        let mut tokens: Vec<&str> = left.split_whitespace().collect();
        tokens.extend(right.split_whitespace().skip(1));
        writeln!(out, "{}", tokens.join(" "))?;
        written += 1;
    }
    debug!("merged {} lines", written);
    Ok(written)
}

/// Divide every value by the population standard deviation of all values.
pub fn normalize(table: &Table) -> Result<Table> {
    let count = table.values().count();
    let mean = table.values().sum::<f64>() / count as f64;
    let variance = table.values().map(|v| (v - mean).powi(2)).sum::<f64>() / count as f64;
    let std = variance.sqrt();
    if !(std.is_finite() && std > 0.0) {
        return Err(ReportError::DegenerateScale(std));
    }
    debug!("normalizing {} values, std {}", count, std);

    let rows = table
        .rows
        .iter()
        .map(|row| StructureRow {
            label: row.label.clone(),
            values: row.values.iter().map(|v| v / std).collect(),
        })
        .collect();
    Ok(Table { rows })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_parse_skips_blank_lines() {
        let table = Table::parse("a 1.0 2.0\n\n  \nb 3 4\n".as_bytes()).unwrap();
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[1].label, "b");
        assert_eq!(table.rows[1].values, vec![3.0, 4.0]);
    }

    #[test]
    fn test_parse_rejects_text_values() {
        let err = Table::parse("a 1.0\nb x\n".as_bytes()).unwrap_err();
        assert!(matches!(err, ReportError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_merge_stops_at_shorter_input() {
        let a = "f1 1.0 2.0\nf2 3.0 4.0\nf3 5.0 6.0\n";
        let b = "f1 -0.5 0.1\nf2 0.0 0.2\n";
        let mut out = Vec::new();
        let n = merge_tables(a.as_bytes(), b.as_bytes(), &mut out).unwrap();
        assert_eq!(n, 2);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "f1 1.0 2.0 -0.5 0.1\nf2 3.0 4.0 0.0 0.2\n"
        );
    }

    #[test]
    fn test_normalize_population_std() {
        // values 2 4 4 4 5 5 7 9: mean 5, population std 2
        let table = Table::parse("a 2 4 4 4\nb 5 5 7 9\n".as_bytes()).unwrap();
        let scaled = normalize(&table).unwrap();
        assert_relative_eq!(scaled.rows[0].values[0], 1.0);
        assert_relative_eq!(scaled.rows[1].values[3], 4.5);

        let mut out = Vec::new();
        scaled.write_fixed(&mut out, 6).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text.lines().next().unwrap(),
            "a 1.000000 2.000000 2.000000 2.000000"
        );
    }

    #[test]
    fn test_normalize_constant_values() {
        let table = Table::parse("a 3 3\nb 3 3\n".as_bytes()).unwrap();
        assert!(matches!(
            normalize(&table),
            Err(ReportError::DegenerateScale(s)) if s == 0.0
        ));
    }

    #[test]
    fn test_normalize_empty_table() {
        assert!(matches!(
            normalize(&Table::default()),
            Err(ReportError::DegenerateScale(_))
        ));
    }
}
