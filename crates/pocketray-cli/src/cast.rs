//! Batch ray casting over many structures.

use anyhow::{Context, Result};
use log::{info, warn};
use rayon::prelude::*;
use std::fs;
use std::io::Write;
use std::path::Path;

use pocketray_math::Point3;
use pocketray_raytrace::{CastSettings, CavityCaster, SampleRay};
use pocketray_report::{write_details, OutputMode, StructureRow};
use pocketray_structure::{
    build_spheres, read_points, sample_rays, write_points, AtomSource, PdbFile, PointStyle,
    ReferenceTable,
};

use crate::{create, CastArgs};

/// Everything one structure contributes to the outputs.
struct StructureResult {
    row: StructureRow,
    points: Vec<Point3>,
    detail: Vec<u8>,
}

/// Resolve settings: config file first, then command-line overrides.
fn load_settings(args: &CastArgs) -> Result<CastSettings> {
    let mut settings = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            CastSettings::from_toml_str(&text)
                .with_context(|| format!("parsing {}", path.display()))?
        }
        None => CastSettings::default(),
    };
    if let Some(radius) = args.radius {
        settings.max_radius = radius;
    }
    settings.validate()?;
    Ok(settings)
}

fn cast_structure(
    source: &dyn AtomSource,
    table: &ReferenceTable,
    rays: &[SampleRay],
    settings: &CastSettings,
    mode: OutputMode,
    with_detail: bool,
) -> Result<StructureResult> {
    let label = source.label();
    let atoms = source.load_atoms()?;
    let spheres = build_spheres(&atoms, table, settings.reach());
    if spheres.is_empty() {
        warn!("{}: no atoms matched within reach, all rays unresolved", label);
    }

    let caster = CavityCaster::new(spheres, settings)?;
    let hits = caster.cast_all(rays);

    let mut detail = Vec::new();
    if with_detail {
        write_details(&mut detail, &label, &hits)?;
    }
    Ok(StructureResult {
        points: hits.iter().map(|h| h.point).collect(),
        row: StructureRow::from_hits(label, &hits, mode, settings),
        detail,
    })
}

/// Run a `distance` or `charge` batch.
pub(crate) fn run(args: &CastArgs, mode: OutputMode) -> Result<()> {
    let settings = load_settings(args)?;
    let table = ReferenceTable::read(&args.reference)
        .with_context(|| format!("reading {}", args.reference.display()))?;
    let points = read_points(&args.pdb)
        .with_context(|| format!("reading {}", args.pdb.display()))?;
    let rays = sample_rays(&points)?;
    info!(
        "{} structures, {} rays, {} reference entries, max radius {}",
        args.name.len(),
        rays.len(),
        table.len(),
        settings.max_radius
    );

    let with_detail = args.detail.is_some();
    let results: Vec<(String, Result<StructureResult>)> = args
        .name
        .par_iter()
        .map(|path| {
            let source = PdbFile::new(path);
            let result = cast_structure(&source, &table, &rays, &settings, mode, with_detail);
            (source.label(), result)
        })
        .collect();

    if let Some(dir) = &args.points {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }

    let mut out = create(&args.output)?;
    let mut detail_out = args.detail.as_deref().map(create).transpose()?;
    let mut written = 0;
    for (label, result) in results {
        let result = match result {
            Ok(r) => r,
            Err(e) => {
                warn!("{}: skipped: {:#}", label, e);
                continue;
            }
        };
        result.row.write_to(&mut out)?;
        if let Some(detail_out) = detail_out.as_mut() {
            detail_out.write_all(&result.detail)?;
        }
        if let Some(dir) = &args.points {
            write_hit_points(dir, &label, &result.points)?;
        }
        written += 1;
    }
    out.flush()?;
    if let Some(mut detail_out) = detail_out {
        detail_out.flush()?;
    }

    info!(
        "wrote {} of {} structures to {}",
        written,
        args.name.len(),
        args.output.display()
    );
    Ok(())
}

fn write_hit_points(dir: &Path, label: &str, points: &[Point3]) -> Result<()> {
    let path = dir.join(format!("{}.pdb", label));
    let mut out = create(&path)?;
    write_points(&mut out, points, &PointStyle::probe())?;
    out.flush()?;
    Ok(())
}
