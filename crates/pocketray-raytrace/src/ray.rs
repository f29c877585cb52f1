//! Sampling rays and cast results.

use pocketray_math::{Point3, Vec3};

use crate::error::{RaytraceError, Result};
use crate::sphere::Sphere;

/// Name reported for rays that resolved to no sphere.
pub const UNRESOLVED: &str = "UNK";

/// A probe direction from the origin towards a sampling-sphere point.
#[derive(Debug, Clone, Copy)]
pub struct SampleRay {
    /// Direction as given (not normalized).
    direction: Vec3,
    /// Length of `direction`, always positive.
    norm: f64,
}

impl SampleRay {
    /// Create a ray towards `direction`.
    ///
    /// Fails if the direction has zero or non-finite length.
    pub fn new(direction: Vec3) -> Result<Self> {
        let norm = direction.norm();
        if !(norm.is_finite() && norm > 0.0) {
            return Err(RaytraceError::ZeroDirection(
                direction.x,
                direction.y,
                direction.z,
            ));
        }
        Ok(Self { direction, norm })
    }

    /// Ray towards a sampling point.
    pub fn towards(point: &Point3) -> Result<Self> {
        Self::new(point.coords)
    }

    /// The direction as given.
    #[inline]
    pub fn direction(&self) -> &Vec3 {
        &self.direction
    }

    /// Length of the given direction.
    #[inline]
    pub fn norm(&self) -> f64 {
        self.norm
    }

    /// Point at distance `t` from the origin along the ray.
    #[inline]
    pub fn at(&self, t: f64) -> Point3 {
        Point3::from(self.direction / self.norm * t)
    }
}

/// Result of casting one ray against a sphere set.
#[derive(Debug, Clone, Copy)]
pub struct RayHit<'a> {
    /// Hit distance, clamped to `[0, max_radius]` and rounded for output.
    pub distance: f64,
    /// Hit point: the ray direction scaled to the (unrounded) hit distance.
    pub point: Point3,
    /// Intersected sphere, `None` when the ray was truncated.
    pub sphere: Option<&'a Sphere>,
}

impl<'a> RayHit<'a> {
    /// A ray that reached `max_radius` without resolving a sphere.
    pub fn truncated(ray: &SampleRay, max_radius: f64) -> Self {
        Self {
            distance: max_radius,
            point: ray.at(max_radius),
            sphere: None,
        }
    }

    /// Whether the ray resolved to a sphere.
    #[inline]
    pub fn is_resolved(&self) -> bool {
        self.sphere.is_some()
    }

    /// Charge of the hit atom, `0.0` when unresolved.
    pub fn charge(&self) -> f64 {
        self.sphere.map_or(0.0, |s| s.props.charge)
    }

    /// Atom name of the hit atom, `UNK` when unresolved.
    pub fn atom_name(&self) -> &'a str {
        self.sphere.map_or(UNRESOLVED, |s| s.props.atom_name.as_str())
    }

    /// Residue name of the hit atom, `UNK` when unresolved.
    pub fn residue_name(&self) -> &'a str {
        self.sphere
            .map_or(UNRESOLVED, |s| s.props.residue_name.as_str())
    }
}
