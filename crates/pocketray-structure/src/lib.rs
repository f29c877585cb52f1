#![warn(missing_docs)]

//! Structure I/O for pocketray.
//!
//! Reads the plain-text inputs of a cavity cast and turns them into the
//! ray-caster's primitives:
//!
//! - [`pdb`] - ATOM/HETATM records, sampling points, PDB point output
//! - [`reference`] - per-(residue, atom) charge and radius table
//! - [`builder`] - Sphere-set construction with the distance pre-filter
//! - [`center`] - translation of a structure onto its heme iron
//!
//! Loading is abstracted behind [`AtomSource`], so the ray-caster never
//! depends on where atom records come from.

pub mod builder;
pub mod center;
mod error;
pub mod pdb;
pub mod reference;

pub use builder::{build_spheres, sample_rays};
pub use center::{center_on_iron, find_iron};
pub use error::{Result, StructureError};
pub use pdb::{read_points, write_points, AtomRecord, AtomSource, PdbFile, PointStyle};
pub use reference::{AtomParams, ReferenceTable};
