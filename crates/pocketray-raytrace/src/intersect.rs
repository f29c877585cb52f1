//! Ray/sphere intersection from the cast origin.
//!
//! The ray starts at the origin, so the geometry reduces to the angle
//! between the ray and the sphere-center vector: the perpendicular offset
//! `y` of the center from the ray decides between a secant, a tangent and
//! a miss, and the near intersection lies a half-chord before the
//! projection of the center onto the ray.

use pocketray_math::Tolerance;

use crate::ray::SampleRay;
use crate::sphere::Sphere;

/// How a ray meets a sphere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// The sampling point coincides with the sphere center.
    Center,
    /// The ray passes through the sphere interior.
    Secant,
    /// The ray grazes the sphere surface.
    Tangent,
}

/// Near intersection of a ray with one sphere (before clamping).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereHit {
    /// Along-ray distance from the origin to the near surface point.
    /// Negative when the origin lies inside the sphere.
    pub t: f64,
    /// Which case produced the hit.
    pub contact: Contact,
}

/// Intersect a ray cast from the origin with a sphere.
///
/// Returns `None` when the sphere lies behind the origin, more than 90°
/// off the ray, or too far from the ray line to be touched. A sphere
/// centered exactly on the origin has no defined angle and is a miss.
pub fn intersect_sphere(ray: &SampleRay, sphere: &Sphere) -> Option<SphereHit> {
    let c = &sphere.center.coords;
    let v = ray.direction();
    let r = sphere.radius;
    let d = c.norm();

    if c == v {
        return Some(SphereHit {
            t: d - r,
            contact: Contact::Center,
        });
    }

    let dot = c.dot(v);
    let cos_alpha = Tolerance::DEFAULT.snap_unit_interval(dot / (d * ray.norm()));
    // NaN (center on the origin) fails this test too
    if !(0.0..=1.0).contains(&cos_alpha) {
        return None;
    }

    let y = d * (1.0 - cos_alpha * cos_alpha).sqrt();
    if y < r {
        let x = (r * r - y * y).sqrt();
        Some(SphereHit {
            t: dot.abs() / ray.norm() - x,
            contact: Contact::Secant,
        })
    } else if y == r {
        Some(SphereHit {
            t: dot / ray.norm(),
            contact: Contact::Tangent,
        })
    } else {
        None
    }
}
