//! Translate a structure so that its heme iron sits on the origin.

use pocketray_math::{Point3, Transform};

use crate::error::{Result, StructureError};
use crate::pdb::{parse_position, record_kind};

/// Position of the first `FE` atom in a residue named `HEM*`.
///
/// Matches HEM, HEMO, HEMOA and similar, ignoring case.
pub fn find_iron(text: &str) -> Result<Option<Point3>> {
    for (idx, line) in text.lines().enumerate() {
        if record_kind(line).is_none() {
            continue;
        }
        let mut tokens = line.split_whitespace().skip(2);
        let (Some(atom), Some(residue)) = (tokens.next(), tokens.next()) else {
            continue;
        };
        if atom.eq_ignore_ascii_case("FE") && residue.to_ascii_uppercase().starts_with("HEM") {
            return parse_position(line, idx + 1).map(Some);
        }
    }
    Ok(None)
}

/// Rewrite every coordinate record of a PDB text so the heme iron moves
/// to the origin. Other lines are kept verbatim.
pub fn center_on_iron(text: &str) -> Result<String> {
    let iron = find_iron(text)?.ok_or(StructureError::MissingAnchor)?;
    let transform = Transform::centering(&iron);

    let mut out = String::with_capacity(text.len());
    for (idx, line) in text.lines().enumerate() {
        if record_kind(line).is_some() {
            let moved = transform.apply_point(&parse_position(line, idx + 1)?);
            out.push_str(&line[..30]);
            out.push_str(&format!("{:8.3}{:8.3}{:8.3}", moved.x, moved.y, moved.z));
            out.push_str(line.get(54..).unwrap_or(""));
        } else {
            out.push_str(line);
        }
        out.push('\n');
    }
    Ok(out)
}
