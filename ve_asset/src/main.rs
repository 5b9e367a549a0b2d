use anyhow::{Context, Result};
use log::{debug, warn};
use std::path::Path;
use structopt::StructOpt;
use walkdir::WalkDir;

use ve_asset::{mesh::obj::ObjModel, utils, Loader, ObjMeta};

// Cli arguments
#[derive(StructOpt, Debug)]
#[structopt(name = "ve_asset")]
struct CliArgs {
    /// Specify the input file or folder
    input: String,
    /// Output debug info
    #[structopt(short = "v", long = "verbose")]
    verbose: bool,
}

/// Happens during setup
#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error("Input path does not exist: {0}")]
    InputNonExistant(String),
}

fn main() -> Result<()> {
    let args = CliArgs::from_args();

    if !args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    } else {
        env_logger::Builder::new()
            .filter(None, log::LevelFilter::Debug)
            .init();
    }

    prepare(args)
}

fn prepare(args: CliArgs) -> Result<()> {
    let input_path = Path::new(&args.input);
    if !input_path.exists() {
        return Err(CliError::InputNonExistant(input_path.display().to_string()).into());
    }

    for entry in WalkDir::new(input_path) {
        let path = match &entry {
            Err(err) => {
                warn!("Error parsing path: {}", err);
                continue;
            }
            Ok(entry) => entry.path(),
        };

        if path.is_dir() {
            continue;
        }

        // check extension
        if utils::has_extension(path, "obj") {
            process(path)?;
        } else if utils::has_extension(path, "mtl") || utils::has_extension(path, "toml") {
            debug!("Ignored side-car file: {}", path.display());
        } else {
            warn!("Could not handle path: {}", path.display());
        }
    }

    Ok(())
}

fn process(path: &Path) -> Result<()> {
    let meta = ObjMeta::lookup(path)?;
    debug!("Using {:?} for {}", meta, path.display());

    let mut loader = Loader::with_options(meta);
    loader
        .load_file(path)
        .with_context(|| format!("Could not decode {}", path.display()))?;

    report(path, loader.model());
    Ok(())
}

fn report(path: &Path, model: &ObjModel) {
    println!(
        "{}: {} meshes, {} vertices, {} triangles, {} materials",
        path.display(),
        model.meshes.len(),
        model.vertices.len(),
        model.indices.len() / 3,
        model.materials.len()
    );

    for mesh in &model.meshes {
        println!(
            "  {:<24} {:>8} vertices {:>8} triangles  material: {}",
            mesh.name,
            mesh.vertices.len(),
            mesh.triangle_count(),
            mesh.material.as_ref().map_or("-", |m| m.name.as_str())
        );
    }
}
