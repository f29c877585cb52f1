//! pocketray CLI - heme pocket shape descriptors by ray casting
//!
//! Every pipeline step is a subcommand: centering frames on the heme iron,
//! generating the sampling sphere, casting rays, and post-processing the
//! resulting tables.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::info;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use pocketray_lattice::{generate, write_lattice, LatticeSettings};
use pocketray_report::{
    merge_tables, normalize, read_cluster_report, write_centroids, OutputMode, Table,
};
use pocketray_structure::center_on_iron;

mod cast;

#[derive(Parser)]
#[command(name = "pocketray")]
#[command(about = "Ray-cast heme pocket shape and charge descriptors", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Hit distance per sampling ray, one line per structure
    Distance(CastArgs),
    /// Hit atom charge per sampling ray, one line per structure
    Charge(CastArgs),
    /// Generate the sampling sphere as a PDB of lattice points
    Lattice {
        /// Sphere radius (Å)
        #[arg(short, long, default_value_t = 10.0)]
        radius: f64,
        /// Subdivisions per icosahedron edge
        #[arg(short, long, default_value_t = 10)]
        subdivisions: u32,
        /// Output PDB file
        #[arg(short, long)]
        output: PathBuf,
        /// Keep only the upper hemisphere
        #[arg(long)]
        hemisphere: bool,
    },
    /// Translate a structure so the heme iron sits on the origin
    Center {
        /// Input PDB file
        input: PathBuf,
        /// Output PDB file
        output: PathBuf,
    },
    /// Join two tables line by line, dropping the second label
    Merge {
        /// First table
        first: PathBuf,
        /// Second table
        second: PathBuf,
        /// Output table
        output: PathBuf,
    },
    /// Divide every table value by the population standard deviation
    Normalize {
        /// Input table
        input: PathBuf,
        /// Output table
        output: PathBuf,
    },
    /// Collect centroid vectors from clustering reports
    Centroids {
        /// Cluster report files
        #[arg(required = true)]
        reports: Vec<PathBuf>,
        /// Output table
        #[arg(short, long)]
        output: PathBuf,
    },
}

/// Options shared by the `distance` and `charge` commands.
#[derive(Args)]
pub(crate) struct CastArgs {
    /// Structure PDB file(s), centered on the heme iron
    #[arg(short, long, num_args = 1.., required = true)]
    pub name: Vec<PathBuf>,
    /// PDB file with sampling points
    #[arg(long)]
    pub pdb: PathBuf,
    /// Maximum ray length (Å); overrides the config file
    #[arg(short, long)]
    pub radius: Option<f64>,
    /// Reference table with charges and radii
    #[arg(long = "ref")]
    pub reference: PathBuf,
    /// Output table
    #[arg(short, long)]
    pub output: PathBuf,
    /// TOML file with cast settings
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Directory for per-structure hit point PDB files
    #[arg(long)]
    pub points: Option<PathBuf>,
    /// File for the per-ray audit table
    #[arg(long)]
    pub detail: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Distance(args) => cast::run(&args, OutputMode::Distance)?,
        Commands::Charge(args) => cast::run(&args, OutputMode::Charge)?,
        Commands::Lattice {
            radius,
            subdivisions,
            output,
            hemisphere,
        } => {
            let settings = LatticeSettings::new(radius, subdivisions).hemisphere(hemisphere);
            write_sphere(&settings, &output)?;
        }
        Commands::Center { input, output } => {
            center_file(&input, &output)?;
        }
        Commands::Merge {
            first,
            second,
            output,
        } => {
            let a = BufReader::new(open(&first)?);
            let b = BufReader::new(open(&second)?);
            let lines = merge_tables(a, b, create(&output)?)?;
            info!("merged {} lines into {}", lines, output.display());
        }
        Commands::Normalize { input, output } => {
            let table = Table::parse(BufReader::new(open(&input)?))
                .with_context(|| format!("reading {}", input.display()))?;
            normalize(&table)?.write_fixed(create(&output)?, 6)?;
            info!("normalized {} rows into {}", table.rows.len(), output.display());
        }
        Commands::Centroids { reports, output } => {
            collect_centroids(&reports, &output)?;
        }
    }

    Ok(())
}

fn write_sphere(settings: &LatticeSettings, output: &Path) -> Result<()> {
    let points = generate(settings)?;
    let mut out = create(output)?;
    write_lattice(&mut out, &points)?;
    out.flush()?;
    info!("wrote {} sampling points to {}", points.len(), output.display());
    Ok(())
}

fn center_file(input: &Path, output: &Path) -> Result<()> {
    let text =
        fs::read_to_string(input).with_context(|| format!("reading {}", input.display()))?;
    let centered =
        center_on_iron(&text).with_context(|| format!("centering {}", input.display()))?;
    fs::write(output, centered).with_context(|| format!("writing {}", output.display()))?;
    info!("centered {} into {}", input.display(), output.display());
    Ok(())
}

fn collect_centroids(reports: &[PathBuf], output: &Path) -> Result<()> {
    let mut out = create(output)?;
    for report in reports {
        let centroids = read_cluster_report(BufReader::new(open(report)?))
            .with_context(|| format!("reading {}", report.display()))?;
        let name = report
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| report.display().to_string());
        write_centroids(&mut out, &name, &centroids)?;
        info!("{}: {} centroids", name, centroids.len());
    }
    out.flush()?;
    Ok(())
}

pub(crate) fn open(path: &Path) -> Result<File> {
    File::open(path).with_context(|| format!("opening {}", path.display()))
}

pub(crate) fn create(path: &Path) -> Result<BufWriter<File>> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    Ok(BufWriter::new(file))
}
