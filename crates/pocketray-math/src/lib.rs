#![warn(missing_docs)]

//! Math types for pocketray.
//!
//! Thin wrappers around nalgebra providing the point and vector types
//! shared by the structure readers, the lattice generator and the cavity
//! ray-caster, plus an affine transform, tolerance constants and decimal
//! rounding.

use nalgebra::{Matrix4, Vector3, Vector4};

/// A point in 3D space (Ångström).
pub type Point3 = nalgebra::Point3<f64>;

/// A vector in 3D space.
pub type Vec3 = Vector3<f64>;

/// A 4x4 affine transformation matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// The underlying 4x4 matrix.
    pub matrix: Matrix4<f64>,
}

impl Transform {
    /// Translation by `(dx, dy, dz)`.
    pub fn translation(dx: f64, dy: f64, dz: f64) -> Self {
        let mut m = Matrix4::identity();
        m[(0, 3)] = dx;
        m[(1, 3)] = dy;
        m[(2, 3)] = dz;
        Self { matrix: m }
    }

    /// Translation that moves `anchor` onto the origin.
    pub fn centering(anchor: &Point3) -> Self {
        Self::translation(-anchor.x, -anchor.y, -anchor.z)
    }

    /// Transform a point.
    pub fn apply_point(&self, p: &Point3) -> Point3 {
        let v = self.matrix * Vector4::new(p.x, p.y, p.z, 1.0);
        Point3::new(v.x, v.y, v.z)
    }
}

/// Tolerance constants for coordinate comparisons.
#[derive(Debug, Clone, Copy)]
pub struct Tolerance {
    /// Linear distance tolerance in Ångström.
    pub linear: f64,
}

impl Tolerance {
    /// Default tolerance (1e-6 Å), below the 3-decimal resolution of PDB columns.
    pub const DEFAULT: Self = Self { linear: 1e-6 };

    /// Check if a scalar distance is effectively zero.
    pub fn is_zero(&self, d: f64) -> bool {
        d.abs() < self.linear
    }

    /// Snap values that are effectively zero to exactly `0.0`.
    ///
    /// Folds `-0.0` and tiny residues so that formatted output never
    /// shows `-0.000`.
    pub fn snap_zero(&self, d: f64) -> f64 {
        if self.is_zero(d) {
            0.0
        } else {
            d
        }
    }

    /// Pull values just outside `[0, 1]` back onto the nearest bound.
    ///
    /// Cosines computed from exactly aligned vectors can land a few ulps
    /// past 1.0. Values further out are returned unchanged.
    pub fn snap_unit_interval(&self, v: f64) -> f64 {
        if v > 1.0 && v - 1.0 < self.linear {
            1.0
        } else if v < 0.0 && -v < self.linear {
            0.0
        } else {
            v
        }
    }
}

/// Round `value` to `decimals` decimal places, ties to even.
///
/// Matches the rounding used when distances and charges are written out.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    (value * scale).round_ties_even() / scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translation() {
        let t = Transform::translation(10.0, 20.0, 30.0);
        let p = Point3::new(1.0, 2.0, 3.0);
        let result = t.apply_point(&p);
        assert!((result.x - 11.0).abs() < 1e-12);
        assert!((result.y - 22.0).abs() < 1e-12);
        assert!((result.z - 33.0).abs() < 1e-12);
    }

    #[test]
    fn test_centering_moves_anchor_to_origin() {
        let fe = Point3::new(12.5, -3.25, 7.0);
        let t = Transform::centering(&fe);
        let moved = t.apply_point(&fe);
        assert!(moved.coords.norm() < 1e-12);

        let other = t.apply_point(&Point3::new(13.5, -3.25, 7.0));
        assert!((other.x - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_tolerance() {
        let tol = Tolerance::DEFAULT;
        assert!(tol.is_zero(5e-7));
        assert!(!tol.is_zero(1e-3));
        assert_eq!(tol.snap_zero(-1e-9), 0.0);
        assert!(tol.snap_zero(-1e-9).is_sign_positive());
        assert_eq!(tol.snap_zero(0.5), 0.5);
    }

    #[test]
    fn test_snap_unit_interval() {
        let tol = Tolerance::DEFAULT;
        assert_eq!(tol.snap_unit_interval(1.0000000000000002), 1.0);
        assert_eq!(tol.snap_unit_interval(-1e-12), 0.0);
        assert_eq!(tol.snap_unit_interval(0.25), 0.25);
        assert_eq!(tol.snap_unit_interval(1.5), 1.5);
        assert_eq!(tol.snap_unit_interval(-0.1), -0.1);
        assert!(tol.snap_unit_interval(f64::NAN).is_nan());
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(2.34567, 3), 2.346);
        assert_eq!(round_to(10.0, 3), 10.0);
        assert_eq!(round_to(-0.12345, 4), -0.1234);
        assert_eq!(round_to(0.5, 0), 0.0);
        assert_eq!(round_to(1.5, 0), 2.0);
    }
}
