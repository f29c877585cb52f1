//! Sphere-set and ray-set construction.

use log::debug;
use pocketray_math::Point3;
use pocketray_raytrace::{within_reach, AtomProps, SampleRay, Sphere};

use crate::error::Result;
use crate::pdb::AtomRecord;
use crate::reference::ReferenceTable;

/// Build the sphere set of one structure.
///
/// Keeps ATOM records whose (residue, atom) pair is in `table` and whose
/// position lies strictly within `reach` of the origin, in input order.
/// The result may be empty; callers then report unresolved rays.
pub fn build_spheres(atoms: &[AtomRecord], table: &ReferenceTable, reach: f64) -> Vec<Sphere> {
    let spheres: Vec<Sphere> = atoms
        .iter()
        .filter(|atom| !atom.hetero)
        .filter_map(|atom| {
            let params = table.get(&atom.residue_name, &atom.atom_name)?;
            within_reach(&atom.position, reach).then(|| {
                Sphere::new(
                    atom.position,
                    params.radius,
                    AtomProps::new(params.charge, &atom.atom_name, &atom.residue_name),
                )
            })
        })
        .collect();
    debug!("{} of {} atoms kept as spheres", spheres.len(), atoms.len());
    spheres
}

/// One ray per sampling point, in input order.
///
/// Fails on the first point at the origin.
pub fn sample_rays(points: &[Point3]) -> Result<Vec<SampleRay>> {
    points
        .iter()
        .map(|p| SampleRay::towards(p).map_err(Into::into))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::AtomParams;
    use crate::StructureError;
    use pocketray_raytrace::RaytraceError;

    fn atom(name: &str, residue: &str, x: f64, y: f64, z: f64) -> AtomRecord {
        AtomRecord {
            atom_name: name.into(),
            residue_name: residue.into(),
            position: Point3::new(x, y, z),
            hetero: false,
        }
    }

    fn table() -> ReferenceTable {
        let mut t = ReferenceTable::new();
        t.insert("ASP", "OD1", AtomParams { charge: -0.8, radius: 1.66 });
        t.insert("SER", "OG", AtomParams { charge: -0.65, radius: 1.72 });
        t
    }

    #[test]
    fn test_keeps_known_atoms_within_reach() {
        let atoms = vec![
            atom("OD1", "ASP", 0.0, 0.0, 5.0),
            atom("CA", "ASP", 0.0, 0.0, 4.0),
            atom("og", "ser", 3.0, 0.0, 0.0),
            atom("OD1", "ASP", 0.0, 0.0, 12.5),
        ];
        let spheres = build_spheres(&atoms, &table(), 12.0);
        assert_eq!(spheres.len(), 2);
        assert_eq!(spheres[0].props.atom_name, "OD1");
        assert_eq!(spheres[0].radius, 1.66);
        assert_eq!(spheres[1].props.residue_name, "SER");
        assert_eq!(spheres[1].props.charge, -0.65);
    }

    #[test]
    fn test_hetero_atoms_ignored() {
        let mut fe = atom("OD1", "ASP", 0.0, 1.0, 0.0);
        fe.hetero = true;
        assert!(build_spheres(&[fe], &table(), 12.0).is_empty());
    }

    #[test]
    fn test_no_match_gives_empty_set() {
        let atoms = vec![atom("CB", "ALA", 1.0, 1.0, 1.0)];
        assert!(build_spheres(&atoms, &table(), 12.0).is_empty());
    }

    #[test]
    fn test_sample_rays_rejects_origin() {
        let points = vec![Point3::new(0.0, 0.0, 10.0), Point3::origin()];
        assert!(matches!(
            sample_rays(&points),
            Err(StructureError::Raytrace(RaytraceError::ZeroDirection(..)))
        ));
        assert_eq!(sample_rays(&points[..1]).unwrap().len(), 1);
    }
}
