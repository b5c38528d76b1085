//! knottube CLI - generate and export torus-knot tube meshes
//!
//! Builds the swept tube for a set of curve parameters and either
//! summarizes it or writes it out as OBJ in one of the draw modes.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use knottube_sweep::{write_obj, DrawMode, TubeMesh};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod summary;

use config::{resolve, Config, CurveArgs};
use summary::MeshInfo;

#[derive(Parser)]
#[command(name = "knottube")]
#[command(about = "Torus-knot tube mesh generator", long_about = None)]
struct Cli {
    /// TOML file with curve parameters
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(flatten)]
    curve: CurveArgs,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the mesh and print a summary
    Info {
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// Generate the mesh and write it as Wavefront OBJ
    Export {
        /// Output file
        #[arg(short, long)]
        output: PathBuf,
        /// What to write: spine, wireframe or solid
        #[arg(long, default_value_t = DrawMode::Solid)]
        mode: DrawMode,
        /// Replace the output file if it exists
        #[arg(long)]
        force: bool,
    },
    /// Print the resolved parameters as TOML
    Params,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = resolve(cli.config.as_deref(), &cli.curve)?;

    match cli.command {
        Commands::Info { json } => show_info(&config, json)?,
        Commands::Export {
            output,
            mode,
            force,
        } => export_file(&config, &output, mode, force)?,
        Commands::Params => {
            print!("{}", toml::to_string(&config).context("serializing parameters")?);
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn generate(config: &Config) -> Result<TubeMesh> {
    TubeMesh::generate_with(&config.curve, &config.sweep_options())
        .context("generating tube mesh")
}

fn show_info(config: &Config, json: bool) -> Result<()> {
    let mesh = generate(config)?;
    let summary = MeshInfo::new(config.curve, &mesh);
    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{}", summary.render_text());
    }
    Ok(())
}

fn export_file(config: &Config, output: &Path, mode: DrawMode, force: bool) -> Result<()> {
    if output.exists() && !force {
        bail!(
            "refusing to overwrite existing file {} (use --force)",
            output.display()
        );
    }

    let mesh = generate(config)?;
    let name = output
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("knottube");

    let file =
        File::create(output).with_context(|| format!("creating {}", output.display()))?;
    write_obj(&mesh, mode, name, BufWriter::new(file))
        .with_context(|| format!("writing {}", output.display()))?;

    info!(path = %output.display(), %mode, "exported mesh");
    println!("Exported {} ({mode}) to {}", name, output.display());
    Ok(())
}
