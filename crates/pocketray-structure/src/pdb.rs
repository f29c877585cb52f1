//! PDB text records.
//!
//! Only the handful of fields the cavity cast needs are read: the
//! record type, atom and residue names, and the fixed x/y/z columns.

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::ops::Range;
use std::path::{Path, PathBuf};

use pocketray_math::Point3;

use crate::error::{Result, StructureError};

const X_COLUMNS: Range<usize> = 30..38;
const Y_COLUMNS: Range<usize> = 38..46;
const Z_COLUMNS: Range<usize> = 46..54;

/// One ATOM or HETATM record.
#[derive(Debug, Clone, PartialEq)]
pub struct AtomRecord {
    /// Atom name (third whitespace-separated token).
    pub atom_name: String,
    /// Residue name (fourth whitespace-separated token).
    pub residue_name: String,
    /// Atom position.
    pub position: Point3,
    /// True for HETATM records.
    pub hetero: bool,
}

/// Anything that can produce the atom records of one structure.
pub trait AtomSource {
    /// Label written in front of this structure's output line.
    fn label(&self) -> String;

    /// Load the structure's ATOM records.
    fn load_atoms(&self) -> Result<Vec<AtomRecord>>;
}

/// A structure stored as a PDB file on disk.
#[derive(Debug, Clone)]
pub struct PdbFile {
    path: PathBuf,
}

impl PdbFile {
    /// Wrap a path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AtomSource for PdbFile {
    fn label(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    fn load_atoms(&self) -> Result<Vec<AtomRecord>> {
        let file = File::open(&self.path)?;
        parse_atoms(BufReader::new(file), false)
    }
}

/// Record type of a line: `Some(false)` for ATOM, `Some(true)` for HETATM.
pub(crate) fn record_kind(line: &str) -> Option<bool> {
    if line.starts_with("ATOM") {
        Some(false)
    } else if line.starts_with("HETATM") {
        Some(true)
    } else {
        None
    }
}

/// Parse one fixed-width coordinate column. A field cut short by the end
/// of the line is read as far as it goes.
fn parse_column(line: &str, columns: Range<usize>, line_no: usize, axis: char) -> Result<f64> {
    let end = columns.end.min(line.len());
    let field = line
        .get(columns.start..end)
        .ok_or_else(|| StructureError::parse(line_no, format!("missing {} coordinate", axis)))?;
    field.trim().parse::<f64>().map_err(|_| {
        StructureError::parse(
            line_no,
            format!("invalid {} coordinate {:?}", axis, field.trim()),
        )
    })
}

/// Parse the x/y/z columns of a coordinate record.
pub(crate) fn parse_position(line: &str, line_no: usize) -> Result<Point3> {
    Ok(Point3::new(
        parse_column(line, X_COLUMNS, line_no, 'x')?,
        parse_column(line, Y_COLUMNS, line_no, 'y')?,
        parse_column(line, Z_COLUMNS, line_no, 'z')?,
    ))
}

fn parse_atom_line(line: &str, line_no: usize, hetero: bool) -> Result<AtomRecord> {
    let mut tokens = line.split_whitespace().skip(2);
    let atom_name = tokens
        .next()
        .ok_or_else(|| StructureError::parse(line_no, "missing atom name"))?;
    let residue_name = tokens
        .next()
        .ok_or_else(|| StructureError::parse(line_no, "missing residue name"))?;
    Ok(AtomRecord {
        atom_name: atom_name.to_string(),
        residue_name: residue_name.to_string(),
        position: parse_position(line, line_no)?,
        hetero,
    })
}

/// Parse ATOM records (and HETATM records when `include_hetero` is set).
pub fn parse_atoms<R: BufRead>(reader: R, include_hetero: bool) -> Result<Vec<AtomRecord>> {
    let mut atoms = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        match record_kind(&line) {
            Some(false) => atoms.push(parse_atom_line(&line, idx + 1, false)?),
            Some(true) if include_hetero => atoms.push(parse_atom_line(&line, idx + 1, true)?),
            _ => {}
        }
    }
    Ok(atoms)
}

/// Parse the coordinates of every ATOM and HETATM record, in file order.
pub fn parse_points<R: BufRead>(reader: R) -> Result<Vec<Point3>> {
    let mut points = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if record_kind(&line).is_some() {
            points.push(parse_position(&line, idx + 1)?);
        }
    }
    Ok(points)
}

/// Read sampling points from a PDB file. An empty file is an error.
pub fn read_points(path: impl AsRef<Path>) -> Result<Vec<Point3>> {
    let path = path.as_ref();
    let points = parse_points(BufReader::new(File::open(path)?))?;
    if points.is_empty() {
        return Err(StructureError::NoPoints(path.to_path_buf()));
    }
    Ok(points)
}

/// Naming used when writing bare points as PDB atoms.
#[derive(Debug, Clone)]
pub struct PointStyle {
    /// Atom name.
    pub atom_name: &'static str,
    /// Residue name.
    pub residue_name: &'static str,
    /// Chain identifier.
    pub chain: char,
    /// Element symbol.
    pub element: &'static str,
    /// Optional REMARK written before the atoms.
    pub remark: Option<String>,
}

impl PointStyle {
    /// Sampling-sphere lattice points: carbon atoms of residue `SPH`.
    pub fn lattice() -> Self {
        Self {
            atom_name: "C",
            residue_name: "SPH",
            chain: 'A',
            element: "C",
            remark: Some("Generated PDB of triangular lattice points on a sphere".into()),
        }
    }

    /// Ray hit points: hydrogen probes of residue `XXX`.
    pub fn probe() -> Self {
        Self {
            atom_name: "H",
            residue_name: "XXX",
            chain: ' ',
            element: "H",
            remark: None,
        }
    }
}

/// Format one point as an ATOM record.
pub fn format_point(serial: usize, point: &Point3, style: &PointStyle) -> String {
    format!(
        "ATOM  {:5}  {:<4}{:>3} {}   1    {:8.3}{:8.3}{:8.3}  1.00  0.00          {:>2}",
        serial,
        style.atom_name,
        style.residue_name,
        style.chain,
        point.x,
        point.y,
        point.z,
        style.element
    )
}

/// Write points as a PDB file: optional REMARK, ATOM records numbered
/// from 1, then `TER` and `END`.
pub fn write_points<W: Write>(mut out: W, points: &[Point3], style: &PointStyle) -> Result<()> {
    if let Some(remark) = &style.remark {
        writeln!(out, "REMARK   {}", remark)?;
    }
    for (i, p) in points.iter().enumerate() {
        writeln!(out, "{}", format_point(i + 1, p, style))?;
    }
    writeln!(out, "TER")?;
    writeln!(out, "END")?;
    Ok(())
}
