#![warn(missing_docs)]

//! Cavity ray casting for pocketray.
//!
//! Rays are cast from a fixed origin (the heme iron, already translated
//! to `(0, 0, 0)`) towards the points of a sampling sphere. Every ray
//! reports the first surface it meets among a set of atom-centered
//! spheres, or is truncated at the maximum radius when nothing is hit.
//!
//! # Architecture
//!
//! - [`SampleRay`] - Validated probe direction from the origin
//! - [`Sphere`] - Atom position, radius and property bag
//! - [`intersect`] - Ray/sphere kernel returning the near along-ray distance
//! - [`CavityCaster`] - Pre-filter, best-hit selection and clamping
//! - [`CastSettings`] - Maximum radius, pre-filter margin, output rounding
//!
//! # Example
//!
//! ```
//! use pocketray_math::{Point3, Vec3};
//! use pocketray_raytrace::{AtomProps, CastSettings, CavityCaster, SampleRay, Sphere};
//!
//! let spheres = vec![Sphere::new(
//!     Point3::new(0.0, 0.0, 5.0),
//!     2.0,
//!     AtomProps::new(-0.5, "OD1", "ASP"),
//! )];
//! let settings = CastSettings::with_max_radius(10.0);
//! let caster = CavityCaster::new(spheres, &settings).unwrap();
//!
//! let ray = SampleRay::new(Vec3::new(0.0, 0.0, 1.0)).unwrap();
//! let hit = caster.cast(&ray);
//! assert_eq!(hit.distance, 3.0);
//! assert_eq!(hit.residue_name(), "ASP");
//! ```

mod caster;
mod error;
pub mod intersect;
mod ray;
mod settings;
mod sphere;

pub use caster::CavityCaster;
pub use error::{RaytraceError, Result};
pub use ray::{RayHit, SampleRay, UNRESOLVED};
pub use settings::CastSettings;
pub use sphere::{within_reach, AtomProps, Sphere};
