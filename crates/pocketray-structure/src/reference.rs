//! Reference property table: charge and radius per (residue, atom).
//!
//! One record per line, four whitespace-separated fields:
//!
//! ```text
//! OD1  ASP  -0.8014  1.6612
//! ```
//!
//! Lookups ignore case. Lines with any other field count are skipped.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::{debug, warn};

use crate::error::Result;

/// Charge and radius of one atom type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AtomParams {
    /// Partial charge (e).
    pub charge: f64,
    /// Radius (Å).
    pub radius: f64,
}

/// Table of atom parameters keyed by upper-case (residue, atom).
#[derive(Debug, Clone, Default)]
pub struct ReferenceTable {
    entries: HashMap<(String, String), AtomParams>,
}

impl ReferenceTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a table. Later records override earlier ones with the same key.
    pub fn parse<R: BufRead>(reader: R) -> Result<Self> {
        let mut table = Self::new();
        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.is_empty() {
                continue;
            }
            if fields.len() != 4 {
                debug!("reference line {}: {} fields, skipped", idx + 1, fields.len());
                continue;
            }
            let (Ok(charge), Ok(radius)) = (fields[2].parse::<f64>(), fields[3].parse::<f64>())
            else {
                warn!("reference line {}: unreadable charge or radius, skipped", idx + 1);
                continue;
            };
            table.insert(fields[1], fields[0], AtomParams { charge, radius });
        }
        Ok(table)
    }

    /// Read a table from a file.
    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        Self::parse(BufReader::new(File::open(path)?))
    }

    /// Insert or replace an entry.
    pub fn insert(&mut self, residue: &str, atom: &str, params: AtomParams) {
        self.entries.insert(key(residue, atom), params);
    }

    /// Look up an atom type, ignoring case.
    pub fn get(&self, residue: &str, atom: &str) -> Option<AtomParams> {
        self.entries.get(&key(residue, atom)).copied()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn key(residue: &str, atom: &str) -> (String, String) {
    (residue.to_ascii_uppercase(), atom.to_ascii_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = "\
OD1 ASP -0.8014 1.6612
od2 asp -0.8014 1.6612

NE2 HIS -0.5727 1.8240 extra
CA  GLY
OG  SER -0.6546 1.7210
CB  SER  none   1.9080
OG  SER -0.6000 1.7000
";

    #[test]
    fn test_parse_and_lookup_case_insensitive() {
        let table = ReferenceTable::parse(TABLE.as_bytes()).unwrap();
        let od1 = table.get("asp", "od1").unwrap();
        assert_eq!(od1.charge, -0.8014);
        assert_eq!(od1.radius, 1.6612);
        assert!(table.get("ASP", "OD2").is_some());
    }

    #[test]
    fn test_malformed_lines_skipped() {
        let table = ReferenceTable::parse(TABLE.as_bytes()).unwrap();
        assert!(table.get("HIS", "NE2").is_none());
        assert!(table.get("GLY", "CA").is_none());
        assert!(table.get("SER", "CB").is_none());
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_later_record_wins() {
        let table = ReferenceTable::parse(TABLE.as_bytes()).unwrap();
        assert_eq!(table.get("SER", "OG").unwrap().charge, -0.6);
    }

    #[test]
    fn test_empty_table() {
        let table = ReferenceTable::parse("".as_bytes()).unwrap();
        assert!(table.is_empty());
    }
}
