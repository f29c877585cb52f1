#![warn(missing_docs)]

//! Sampling points on a sphere for pocketray.
//!
//! Builds a near-uniform triangular lattice by subdividing the 20 faces
//! of a regular icosahedron and projecting every lattice point onto the
//! sphere. With `n` subdivisions the full sphere carries `10n² + 2`
//! distinct points.
//!
//! # Example
//!
//! ```
//! use pocketray_lattice::{generate, LatticeSettings};
//!
//! let points = generate(&LatticeSettings::new(10.0, 2)).unwrap();
//! assert_eq!(points.len(), 42);
//! ```

use std::io::Write;

use log::info;
use pocketray_math::{round_to, Point3, Tolerance, Vec3};
use pocketray_structure::{write_points, PointStyle, StructureError};
use thiserror::Error;

/// Errors from lattice generation.
#[derive(Debug, Error)]
pub enum LatticeError {
    /// Radius is not a positive finite number.
    #[error("invalid sphere radius: {0}")]
    InvalidRadius(f64),

    /// At least one subdivision per face edge is required.
    #[error("subdivisions must be at least 1")]
    NoSubdivisions,

    /// Subdivision count above [`MAX_SUBDIVISIONS`].
    #[error("subdivisions must be at most 1000, got {0}")]
    TooManySubdivisions(u32),

    /// Writing the PDB output failed.
    #[error(transparent)]
    Output(#[from] StructureError),
}

/// Result type for lattice operations.
pub type Result<T> = std::result::Result<T, LatticeError>;

/// Largest accepted subdivision count (about ten million points).
pub const MAX_SUBDIVISIONS: u32 = 1000;

/// Lattice parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatticeSettings {
    /// Sphere radius (Å).
    pub radius: f64,
    /// Subdivisions per icosahedron face edge.
    pub subdivisions: u32,
    /// Keep only the upper hemisphere (`z >= 0`).
    pub hemisphere: bool,
}

impl LatticeSettings {
    /// Full-sphere lattice.
    pub fn new(radius: f64, subdivisions: u32) -> Self {
        Self {
            radius,
            subdivisions,
            hemisphere: false,
        }
    }

    /// Restrict to the upper hemisphere.
    pub fn hemisphere(mut self, hemisphere: bool) -> Self {
        self.hemisphere = hemisphere;
        self
    }

    fn validate(&self) -> Result<()> {
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(LatticeError::InvalidRadius(self.radius));
        }
        if self.subdivisions == 0 {
            return Err(LatticeError::NoSubdivisions);
        }
        if self.subdivisions > MAX_SUBDIVISIONS {
            return Err(LatticeError::TooManySubdivisions(self.subdivisions));
        }
        Ok(())
    }
}

/// Vertices of a regular icosahedron on the unit sphere.
pub fn icosahedron_vertices() -> [Vec3; 12] {
    let phi = (1.0 + 5f64.sqrt()) / 2.0;
    let raw = [
        [-1.0, phi, 0.0],
        [1.0, phi, 0.0],
        [-1.0, -phi, 0.0],
        [1.0, -phi, 0.0],
        [0.0, -1.0, phi],
        [0.0, 1.0, phi],
        [0.0, -1.0, -phi],
        [0.0, 1.0, -phi],
        [phi, 0.0, -1.0],
        [phi, 0.0, 1.0],
        [-phi, 0.0, -1.0],
        [-phi, 0.0, 1.0],
    ];
    let norm = Vec3::from(raw[0]).norm();
    raw.map(|v| Vec3::from(v) / norm)
}

/// Faces of the icosahedron as vertex index triples.
pub const ICOSAHEDRON_FACES: [[usize; 3]; 20] = [
    [0, 11, 5],
    [0, 5, 1],
    [0, 1, 7],
    [0, 7, 10],
    [0, 10, 11],
    [1, 5, 9],
    [5, 11, 4],
    [11, 10, 2],
    [10, 7, 6],
    [7, 1, 8],
    [3, 9, 4],
    [3, 4, 2],
    [3, 2, 6],
    [3, 6, 8],
    [3, 8, 9],
    [4, 9, 5],
    [2, 4, 11],
    [6, 2, 10],
    [8, 6, 7],
    [9, 8, 1],
];

/// Barycentric lattice over one triangle, projected onto the unit sphere.
pub fn subdivide_triangle(a: &Vec3, b: &Vec3, c: &Vec3, n: u32) -> Vec<Vec3> {
    let steps = n as f64;
    let rows = n as usize + 1;
    let mut points = Vec::with_capacity(rows * (rows + 1) / 2);
    for i in 0..=n {
        for j in 0..=(n - i) {
            let u = i as f64 / steps;
            let v = j as f64 / steps;
            let w = 1.0 - u - v;
            let p = a * u + b * v + c * w;
            points.push(p / p.norm());
        }
    }
    points
}

/// Distinct lattice points scaled to the sphere radius.
///
/// Points are merged after rounding to 8 decimals on the unit sphere and
/// come out sorted by (x, y, z).
pub fn lattice_points(settings: &LatticeSettings) -> Result<Vec<Point3>> {
    settings.validate()?;
    let vertices = icosahedron_vertices();

    let mut unit: Vec<[f64; 3]> = ICOSAHEDRON_FACES
        .iter()
        .flat_map(|f| {
            subdivide_triangle(&vertices[f[0]], &vertices[f[1]], &vertices[f[2]], settings.subdivisions)
        })
        // adding 0.0 folds -0.0 so equal points sort together
        .map(|p| [0, 1, 2].map(|k| round_to(p[k], 8) + 0.0))
        .collect();
    unit.sort_by(|p, q| {
        p[0].total_cmp(&q[0])
            .then(p[1].total_cmp(&q[1]))
            .then(p[2].total_cmp(&q[2]))
    });
    unit.dedup();

    Ok(unit
        .into_iter()
        .filter(|p| !settings.hemisphere || p[2] >= 0.0)
        .map(|p| Point3::new(p[0], p[1], p[2]) * settings.radius)
        .collect())
}

/// Drop points that print identically at PDB precision (3 decimals),
/// keeping the first. Near-zero coordinates are snapped to `0.0`.
pub fn dedupe_printed(points: &[Point3]) -> Vec<Point3> {
    let tol = Tolerance::DEFAULT;
    let mut seen = std::collections::HashSet::new();
    let mut kept = Vec::with_capacity(points.len());
    for p in points {
        let printed = [p.x, p.y, p.z].map(|v| {
            let shown: f64 = format!("{:.3}", v).parse().unwrap_or(v);
            tol.snap_zero(shown).to_bits()
        });
        if seen.insert(printed) {
            kept.push(Point3::new(tol.snap_zero(p.x), tol.snap_zero(p.y), tol.snap_zero(p.z)));
        }
    }
    kept
}

/// Generate the sampling lattice ready for output.
pub fn generate(settings: &LatticeSettings) -> Result<Vec<Point3>> {
    let points = dedupe_printed(&lattice_points(settings)?);
    info!(
        "lattice: radius {}, {} subdivisions, hemisphere {}, {} points",
        settings.radius,
        settings.subdivisions,
        settings.hemisphere,
        points.len()
    );
    Ok(points)
}

/// Write lattice points as a PDB of `SPH` carbon atoms.
pub fn write_lattice<W: Write>(out: W, points: &[Point3]) -> Result<()> {
    write_points(out, points, &PointStyle::lattice())?;
    Ok(())
}
