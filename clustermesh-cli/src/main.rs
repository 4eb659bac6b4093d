//! clustermesh - uniform grid vertex clustering for PLY meshes
//!
//! `info` dumps basic facts about a mesh; `simplify` writes one simplified
//! mesh per requested grid size.

mod util;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use clustermesh_core::TriangleMesh;
use clustermesh_io::{PlyFormat, PlyWriteOptions};
use clustermesh_simplification::{simplify_levels, GridClusteringSimplifier, SimplificationReport};
use util::Timed;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum CliPlyFormat {
    #[value(name = "ascii")]
    Ascii,
    #[value(name = "binary-le")]
    BinaryLe,
    #[value(name = "binary-be")]
    BinaryBe,
}

impl From<CliPlyFormat> for PlyFormat {
    fn from(value: CliPlyFormat) -> Self {
        match value {
            CliPlyFormat::Ascii => PlyFormat::Ascii,
            CliPlyFormat::BinaryLe => PlyFormat::BinaryLittleEndian,
            CliPlyFormat::BinaryBe => PlyFormat::BinaryBigEndian,
        }
    }
}

/// Simplify triangle meshes by clustering vertices on a uniform grid
#[derive(Parser, Debug)]
#[command(name = "clustermesh", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print counts, bounds and the first vertex and triangle of a mesh
    Info {
        /// Input .ply file
        input: PathBuf,
    },
    /// Simplify a mesh at one or more grid sizes
    Simplify {
        /// Input .ply file
        input: PathBuf,

        /// Grid cells per axis; repeat to produce several levels (default 16)
        #[arg(
            short = 'g',
            long = "grid-size",
            value_name = "N",
            value_parser = clap::value_parser!(u32).range(1..=i32::MAX as i64)
        )]
        grid_sizes: Vec<u32>,

        /// Output file for a single level, or directory for several
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,

        /// Center the mesh and scale its largest side to 1 before simplifying
        #[arg(long)]
        normalize: bool,

        /// PLY encoding of the written files
        #[arg(long, value_enum, default_value_t = CliPlyFormat::Ascii)]
        format: CliPlyFormat,

        /// Store per-face normals in the written files
        #[arg(long)]
        normals: bool,
    },
}

struct SimplifyArgs {
    input: PathBuf,
    grid_sizes: Vec<u32>,
    output: Option<PathBuf>,
    normalize: bool,
    format: PlyFormat,
    normals: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Info { input } => show_info(&input),
        Commands::Simplify {
            input,
            grid_sizes,
            output,
            normalize,
            format,
            normals,
        } => {
            let written = run_simplify(SimplifyArgs {
                input,
                grid_sizes,
                output,
                normalize,
                format: format.into(),
                normals,
            })?;
            for path in written {
                println!("{}", path.display());
            }
            Ok(())
        }
    }
}

fn load(input: &Path) -> Result<TriangleMesh> {
    let _t = Timed::debug(format!("Reading {}", input.display()));
    clustermesh_io::read_mesh(input).with_context(|| format!("failed to read {}", input.display()))
}

fn show_info(input: &Path) -> Result<()> {
    let mesh = load(input)?;

    println!("{}", input.display());
    println!("  vertices:  {}", mesh.vertex_count());
    println!("  triangles: {}", mesh.triangle_count());
    match mesh.bounding_box() {
        Some(bounds) => {
            println!("  bounds min: {}", bounds.min);
            println!("  bounds max: {}", bounds.max);
        }
        None => println!("  bounds:    none"),
    }
    if let Some(vertex) = mesh.vertices().first() {
        println!("  first vertex:   {}", vertex);
    }
    if let Some(tri) = mesh.triangles().first() {
        println!("  first triangle: {:?} normal {}", tri.indices, tri.normal);
    }
    Ok(())
}

/// Output file names for each grid size.
///
/// A single level goes to `output` when given. Otherwise files are named
/// `<stem>_g<N>.ply` and placed in `output` (treated as a directory) or
/// next to the input.
fn output_paths(input: &Path, output: Option<&Path>, grid_sizes: &[u32]) -> Vec<PathBuf> {
    if let (Some(output), [_]) = (output, grid_sizes) {
        return vec![output.to_path_buf()];
    }

    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "mesh".to_string());
    let dir = match output {
        Some(dir) => dir.to_path_buf(),
        None => input.parent().map(Path::to_path_buf).unwrap_or_default(),
    };

    grid_sizes
        .iter()
        .map(|g| dir.join(format!("{}_g{}.ply", stem, g)))
        .collect()
}

fn run_simplify(args: SimplifyArgs) -> Result<Vec<PathBuf>> {
    let _t = Timed::info("Simplify");

    let grid_sizes = if args.grid_sizes.is_empty() {
        vec![GridClusteringSimplifier::DEFAULT_GRID_SIZE]
    } else {
        args.grid_sizes
    };

    let mut mesh = load(&args.input)?;
    if args.normalize {
        if let Some((center, scale)) = mesh.normalize_to_unit_box() {
            log::info!("normalized around {} with scale {}", center, scale);
        }
    }

    let levels = {
        let _t = Timed::debug(format!("Clustering at {} grid size(s)", grid_sizes.len()));
        simplify_levels(&mesh, &grid_sizes)
            .with_context(|| format!("failed to simplify {}", args.input.display()))?
    };

    let paths = output_paths(&args.input, args.output.as_deref(), &grid_sizes);
    if grid_sizes.len() > 1 {
        if let Some(dir) = &args.output {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("failed to create {}", dir.display()))?;
        }
    }

    for ((level, &grid_size), path) in levels.into_iter().zip(&grid_sizes).zip(&paths) {
        let level = level.with_normals();
        log::info!(
            "grid size {}: {}",
            grid_size,
            SimplificationReport::from_meshes(&mesh, &level)
        );

        let options = PlyWriteOptions {
            format: args.format,
            include_normals: args.normals,
            comments: vec![format!("clustermesh grid size {}", grid_size)],
        };
        clustermesh_io::write_mesh_with_options(&level, path, &options)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }

    Ok(paths)
}
