//! Atom-centered spheres used as ray targets.

use pocketray_math::Point3;

use crate::error::{RaytraceError, Result};

/// Physical and chemical properties carried by a sphere.
#[derive(Debug, Clone, PartialEq)]
pub struct AtomProps {
    /// Partial charge (e).
    pub charge: f64,
    /// Atom name, upper case.
    pub atom_name: String,
    /// Residue name, upper case.
    pub residue_name: String,
}

impl AtomProps {
    /// Create a property bag. Names are stored upper case.
    pub fn new(charge: f64, atom_name: impl AsRef<str>, residue_name: impl AsRef<str>) -> Self {
        Self {
            charge,
            atom_name: atom_name.as_ref().to_ascii_uppercase(),
            residue_name: residue_name.as_ref().to_ascii_uppercase(),
        }
    }
}

/// An atom modeled as a sphere around its position.
///
/// Positions are relative to the cast origin.
#[derive(Debug, Clone, PartialEq)]
pub struct Sphere {
    /// Atom position.
    pub center: Point3,
    /// Van der Waals or charge radius (Å).
    pub radius: f64,
    /// Properties attached to a hit on this sphere.
    pub props: AtomProps,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: Point3, radius: f64, props: AtomProps) -> Self {
        Self {
            center,
            radius,
            props,
        }
    }

    /// Distance of the sphere center from the origin.
    #[inline]
    pub fn distance_from_origin(&self) -> f64 {
        self.center.coords.norm()
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.radius.is_finite() && self.radius >= 0.0 {
            Ok(())
        } else {
            Err(RaytraceError::InvalidRadius {
                radius: self.radius,
                atom: self.props.atom_name.clone(),
                residue: self.props.residue_name.clone(),
            })
        }
    }
}

/// Pre-filter test: is `center` strictly closer to the origin than `limit`?
#[inline]
pub fn within_reach(center: &Point3, limit: f64) -> bool {
    center.coords.norm() < limit
}
