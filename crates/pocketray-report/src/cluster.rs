//! Centroid extraction from clustering reports.
//!
//! A report lists one block per cluster:
//!
//! ```text
//! Cluster 0:
//!   Centroid Structure Index: frame_12
//!   Number of Structures: 48
//!   Vectors lengths for centroid structure: [3.2, 10.0, 4.75,
//!    6.125]
//! ```
//!
//! The bracketed list may wrap over several lines.

use std::io::{BufRead, Write};

use log::debug;

use crate::error::{ReportError, Result};

const INDEX_KEY: &str = "  Centroid Structure Index: ";
const SIZE_KEY: &str = "  Number of Structures:";
const VECTOR_KEY: &str = "Vectors lengths for centroid structure:";

/// One cluster centroid.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterCentroid {
    /// Label of the centroid structure.
    pub structure_index: String,
    /// Number of structures in the cluster.
    pub size: usize,
    /// Feature vector of the centroid structure.
    pub vector: Vec<f64>,
}

impl ClusterCentroid {
    /// Format as `index report size v1 v2 ...` with 3-decimal values.
    pub fn to_line(&self, report_name: &str) -> String {
        let mut line = format!("{} {} {}", self.structure_index, report_name, self.size);
        for v in &self.vector {
            line.push_str(&format!(" {:.3}", v));
        }
        line
    }
}

/// Parse a bracketed list of numbers such as `[1.0, -2.5, 3e-1]`.
///
/// Whitespace and a trailing comma are allowed; anything else is rejected.
pub fn parse_number_list(text: &str) -> std::result::Result<Vec<f64>, String> {
    let inner = text
        .trim()
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .ok_or_else(|| format!("expected a bracketed list, got {:?}", text.trim()))?;
    let inner = inner.trim();
    if inner.is_empty() {
        return Ok(Vec::new());
    }
    let inner = inner.strip_suffix(',').unwrap_or(inner);
    inner
        .split(',')
        .map(|item| {
            let item = item.trim();
            item.parse::<f64>()
                .map_err(|_| format!("not a number: {:?}", item))
        })
        .collect()
}

/// Read every centroid of a report, in order.
///
/// The three fields of each block are paired by position; a report with
/// unequal field counts is a parse error.
pub fn read_cluster_report<R: BufRead>(reader: R) -> Result<Vec<ClusterCentroid>> {
    let mut indices = Vec::new();
    let mut sizes = Vec::new();
    let mut vectors = Vec::new();

    let mut lines = reader.lines().enumerate();
    while let Some((idx, line)) = lines.next() {
        let line = line?;
        let line_no = idx + 1;
        if let Some(rest) = line.strip_prefix(INDEX_KEY) {
            indices.push(rest.trim().to_string());
        } else if let Some(rest) = line.strip_prefix(SIZE_KEY) {
            let size = rest
                .trim()
                .parse::<usize>()
                .map_err(|_| ReportError::parse(line_no, format!("bad cluster size: {:?}", rest.trim())))?;
            sizes.push(size);
        } else if let Some(rest) = line.trim().strip_prefix(VECTOR_KEY) {
            let mut list = rest.trim().to_string();
            while !list.ends_with(']') {
                let Some((_, next)) = lines.next() else {
                    return Err(ReportError::parse(line_no, "unterminated vector list"));
                };
                list.push(' ');
                list.push_str(next?.trim());
            }
            let vector = parse_number_list(&list).map_err(|e| ReportError::parse(line_no, e))?;
            vectors.push(vector);
        }
    }

    if indices.len() != sizes.len() || indices.len() != vectors.len() {
        return Err(ReportError::parse(
            0,
            format!(
                "{} centroids, {} sizes, {} vectors",
                indices.len(),
                sizes.len(),
                vectors.len()
            ),
        ));
    }
    debug!("{} centroids read", indices.len());

    Ok(indices
        .into_iter()
        .zip(sizes)
        .zip(vectors)
        .map(|((structure_index, size), vector)| ClusterCentroid {
            structure_index,
            size,
            vector,
        })
        .collect())
}

/// Write centroid lines for one report.
pub fn write_centroids<W: Write>(
    mut out: W,
    report_name: &str,
    centroids: &[ClusterCentroid],
) -> Result<()> {
    for c in centroids {
        writeln!(out, "{}", c.to_line(report_name))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPORT: &str = "\
Total clusters found: 2

Cluster 0:
  Centroid Structure Index: frame_12
  Number of Structures: 48
  Vectors lengths for centroid structure: [3.2, 10.0, 4.75]

Cluster 1:
  Centroid Structure Index: frame_7
  Number of Structures: 3
  Vectors lengths for centroid structure: [1.0, 2.0,
   3.0005, -0.5]

";

    #[test]
    fn test_parse_number_list() {
        assert_eq!(parse_number_list("[1.0, -2.5, 3e-1]").unwrap(), vec![1.0, -2.5, 0.3]);
        assert_eq!(parse_number_list(" [ ] ").unwrap(), Vec::<f64>::new());
        assert_eq!(parse_number_list("[4.0,]").unwrap(), vec![4.0]);
    }

    #[test]
    fn test_parse_number_list_rejects_expressions() {
        assert!(parse_number_list("[1.0, __import__('os')]").is_err());
        assert!(parse_number_list("1.0, 2.0").is_err());
        assert!(parse_number_list("[1.0,, 2.0]").is_err());
    }

    #[test]
    fn test_read_report_with_wrapped_vector() {
        let centroids = read_cluster_report(REPORT.as_bytes()).unwrap();
        assert_eq!(centroids.len(), 2);
        assert_eq!(centroids[0].structure_index, "frame_12");
        assert_eq!(centroids[0].size, 48);
        assert_eq!(centroids[1].vector, vec![1.0, 2.0, 3.0005, -0.5]);
    }

    #[test]
    fn test_centroid_lines() {
        let centroids = read_cluster_report(REPORT.as_bytes()).unwrap();
        let mut out = Vec::new();
        write_centroids(&mut out, "clusters_3a4.txt", &centroids).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "frame_12 clusters_3a4.txt 48 3.200 10.000 4.750\n\
             frame_7 clusters_3a4.txt 3 1.000 2.000 3.001 -0.500\n"
        );
    }

    #[test]
    fn test_unterminated_list() {
        let text = "  Centroid Structure Index: 1\n  Number of Structures: 2\n  Vectors lengths for centroid structure: [1.0, 2.0\n";
        assert!(matches!(
            read_cluster_report(text.as_bytes()),
            Err(ReportError::Parse { line: 3, .. })
        ));
    }

    #[test]
    fn test_field_count_mismatch() {
        let text = "  Centroid Structure Index: 1\n  Vectors lengths for centroid structure: [1.0]\n";
        assert!(read_cluster_report(text.as_bytes()).is_err());
    }
}
