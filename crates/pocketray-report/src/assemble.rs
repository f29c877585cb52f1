//! Per-structure result lines.

use std::io::Write;

use pocketray_math::round_to;
use pocketray_raytrace::{CastSettings, RayHit};

use crate::error::Result;

/// Which hit field a result line carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Hit distance per ray.
    Distance,
    /// Charge of the hit atom per ray (`0.0` when unresolved).
    Charge,
}

/// One structure's output: its label and one value per sampling ray.
#[derive(Debug, Clone, PartialEq)]
pub struct StructureRow {
    /// Structure label (file stem).
    pub label: String,
    /// Values in sampling-ray order.
    pub values: Vec<f64>,
}

impl StructureRow {
    /// Build a row from the hits of one cast.
    pub fn from_hits(
        label: impl Into<String>,
        hits: &[RayHit<'_>],
        mode: OutputMode,
        settings: &CastSettings,
    ) -> Self {
        let values = hits
            .iter()
            .map(|hit| match mode {
                OutputMode::Distance => hit.distance,
                OutputMode::Charge => round_to(hit.charge(), settings.charge_decimals),
            })
            .collect();
        Self {
            label: label.into(),
            values,
        }
    }

    /// Format as `label v1 v2 ...`.
    pub fn to_line(&self) -> String {
        let mut line = self.label.clone();
        for v in &self.values {
            line.push(' ');
            line.push_str(&format_value(*v));
        }
        line
    }

    /// Write the row followed by a newline.
    pub fn write_to<W: Write>(&self, mut out: W) -> Result<()> {
        writeln!(out, "{}", self.to_line())?;
        Ok(())
    }
}

/// Shortest round-trip rendering that always keeps a decimal point
/// (`3.0`, `10.0`, `2.345`).
pub fn format_value(value: f64) -> String {
    format!("{:?}", value)
}

/// Write one audit line per ray:
/// `label ray distance charge atom residue`, rays numbered from 1.
pub fn write_details<W: Write>(mut out: W, label: &str, hits: &[RayHit<'_>]) -> Result<()> {
    for (i, hit) in hits.iter().enumerate() {
        writeln!(
            out,
            "{} {} {} {} {} {}",
            label,
            i + 1,
            format_value(hit.distance),
            format_value(hit.charge()),
            hit.atom_name(),
            hit.residue_name()
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pocketray_math::{Point3, Vec3};
    use pocketray_raytrace::{AtomProps, CavityCaster, SampleRay, Sphere};

    fn cast_example() -> (CavityCaster, Vec<SampleRay>) {
        let spheres = vec![Sphere::new(
            Point3::new(0.0, 0.0, 5.0),
            2.0,
            AtomProps::new(-0.80145, "OD1", "ASP"),
        )];
        let caster = CavityCaster::new(spheres, &CastSettings::with_max_radius(10.0)).unwrap();
        let rays = vec![
            SampleRay::new(Vec3::new(0.0, 0.0, 1.0)).unwrap(),
            SampleRay::new(Vec3::new(0.0, 1.0, 0.0)).unwrap(),
        ];
        (caster, rays)
    }

    #[test]
    fn test_distance_line() {
        let (caster, rays) = cast_example();
        let hits = caster.cast_all(&rays);
        let row = StructureRow::from_hits(
            "frame_1",
            &hits,
            OutputMode::Distance,
            &CastSettings::with_max_radius(10.0),
        );
        assert_eq!(row.to_line(), "frame_1 3.0 10.0");
    }

    #[test]
    fn test_charge_line_rounds_to_four_decimals() {
        let (caster, rays) = cast_example();
        let hits = caster.cast_all(&rays);
        let row = StructureRow::from_hits(
            "frame_1",
            &hits,
            OutputMode::Charge,
            &CastSettings::with_max_radius(10.0),
        );
        assert_eq!(row.to_line(), "frame_1 -0.8014 0.0");
    }

    #[test]
    fn test_empty_sphere_set_still_gives_a_line() {
        let settings = CastSettings::with_max_radius(12.0);
        let caster = CavityCaster::new(Vec::new(), &settings).unwrap();
        let (_, rays) = cast_example();
        let hits = caster.cast_all(&rays);
        let d = StructureRow::from_hits("empty", &hits, OutputMode::Distance, &settings);
        assert_eq!(d.to_line(), "empty 12.0 12.0");
        let q = StructureRow::from_hits("empty", &hits, OutputMode::Charge, &settings);
        assert_eq!(q.to_line(), "empty 0.0 0.0");
    }

    struct FullDisk;

    impl Write for FullDisk {
        fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "disk full"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_details_report_write_failure() {
        let (caster, rays) = cast_example();
        let hits = caster.cast_all(&rays);
        let err = write_details(FullDisk, "frame_1", &hits).unwrap_err();
        assert!(matches!(err, crate::ReportError::Io(_)));
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(3.0), "3.0");
        assert_eq!(format_value(2.345), "2.345");
        assert_eq!(format_value(-0.5727), "-0.5727");
    }

    #[test]
    fn test_details() {
        let (caster, rays) = cast_example();
        let hits = caster.cast_all(&rays);
        let mut buf = Vec::new();
        write_details(&mut buf, "frame_1", &hits).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text,
            "frame_1 1 3.0 -0.80145 OD1 ASP\nframe_1 2 10.0 0.0 UNK UNK\n"
        );
    }
}
