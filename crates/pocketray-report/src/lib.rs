#![warn(missing_docs)]

//! Output side of pocketray.
//!
//! - [`assemble`] - one line per structure from its ray hits
//! - [`table`] - merging and normalizing per-structure value tables
//! - [`cluster`] - centroid extraction from clustering reports
//!
//! All tables share one text layout: a label token followed by
//! whitespace-separated numbers.

pub mod assemble;
pub mod cluster;
mod error;
pub mod table;

pub use assemble::{format_value, write_details, OutputMode, StructureRow};
pub use cluster::{parse_number_list, read_cluster_report, write_centroids, ClusterCentroid};
pub use error::{ReportError, Result};
pub use table::{merge_tables, normalize, Table};
