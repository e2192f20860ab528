//! trajplot - RMSD, RMSF and PCA projection plots from the command line.

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use log::LevelFilter;
use std::path::{Path, PathBuf};
use trajplot::{
    export, io, plots, render, Figure, LengthUnit, PcaModel, PlotConfig, PlotError,
    RemainderPolicy, Trajectory,
};

/// Plot RMSD, RMSF and PCA projections of molecular dynamics trajectories
#[derive(Parser, Debug)]
#[command(name = "trajplot")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON plot configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Silence log output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct OutputArgs {
    /// SVG file to write
    #[arg(short, long)]
    out: PathBuf,

    /// Also write the figure as a JSON record
    #[arg(long)]
    json: Option<PathBuf>,

    /// Also write the plotted points as CSV
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Length unit of the coordinates in the input files
    #[arg(long, value_enum, default_value = "nm")]
    input_unit: LengthUnit,

    /// Length unit to report distances in (overrides the config file)
    #[arg(long, value_enum)]
    unit: Option<LengthUnit>,

    /// Drop trailing frames that do not divide evenly between datasets
    #[arg(long)]
    truncate: bool,

    /// Chart caption
    #[arg(long)]
    title: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// RMSD over time, one line per dataset
    Rmsd {
        /// Trajectory files (.xyz or JSON Lines). A single file holds every
        /// dataset back to back; several files are one dataset each
        #[arg(required = true)]
        trajectories: Vec<PathBuf>,

        /// Dataset label, repeated once per dataset (defaults to file names)
        #[arg(short, long = "label")]
        labels: Vec<String>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Per-atom RMSF of one trajectory
    Rmsf {
        /// Trajectory file (.xyz or JSON Lines)
        trajectory: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Dataset paths in the PC1/PC2 plane
    Pca {
        /// Trajectory files to fit the PCA on, joined in order
        trajectories: Vec<PathBuf>,

        /// Dataset label, repeated once per dataset (defaults to file names)
        #[arg(short, long = "label")]
        labels: Vec<String>,

        /// Precomputed projections as JSON instead of fitting
        #[arg(short, long)]
        model: Option<PathBuf>,

        /// Index of the dataset to draw in red over the others
        #[arg(long)]
        highlight: Option<usize>,

        #[command(flatten)]
        output: OutputArgs,
    },
}

fn log_builder(verbose: u8, quiet: bool) -> env_logger::Builder {
    let level = if quiet {
        LevelFilter::Off
    } else {
        match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };
    let mut builder = env_logger::Builder::new();
    builder.filter_level(level).format_target(false);
    // -q wins over RUST_LOG
    if !quiet {
        builder.parse_env("RUST_LOG");
    }
    builder
}

fn resolve_config(path: Option<&Path>, output: &OutputArgs) -> Result<PlotConfig> {
    let mut config = match path {
        Some(p) => PlotConfig::load(p)
            .with_context(|| format!("Failed to load config file: {}", p.display()))?,
        None => PlotConfig::default(),
    };
    if let Some(unit) = output.unit {
        config.length_unit = unit;
    }
    if output.truncate {
        config.remainder = RemainderPolicy::Truncate;
    }
    if let Some(title) = &output.title {
        config.title = Some(title.clone());
    }
    Ok(config)
}

fn load_trajectories(paths: &[PathBuf], unit: LengthUnit) -> Result<Vec<Trajectory>> {
    paths
        .iter()
        .map(|p| {
            io::read_trajectory(p, unit)
                .with_context(|| format!("Failed to read trajectory: {}", p.display()))
        })
        .collect()
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Explicit labels win; otherwise one label per file
fn dataset_labels(labels: Vec<String>, paths: &[PathBuf]) -> Vec<String> {
    if labels.is_empty() {
        paths.iter().map(|p| file_stem(p)).collect()
    } else {
        labels
    }
}

/// Several files are one dataset each, so explicit labels must match them
fn check_file_labels(labels: &[String], paths: &[PathBuf]) -> Result<()> {
    if paths.len() > 1 && !labels.is_empty() && labels.len() != paths.len() {
        bail!(PlotError::LabelCountMismatch {
            expected: paths.len(),
            actual: labels.len(),
        });
    }
    Ok(())
}

fn write_outputs(figure: &Figure, output: &OutputArgs, config: &PlotConfig) -> Result<Vec<String>> {
    let mut generated = Vec::new();

    render::render_svg(figure, &output.out, config)
        .with_context(|| format!("Failed to render plot: {}", output.out.display()))?;
    generated.push(output.out.display().to_string());

    if let Some(path) = &output.json {
        export::write_json(figure, path)
            .with_context(|| format!("Failed to write JSON: {}", path.display()))?;
        generated.push(path.display().to_string());
    }
    if let Some(path) = &output.csv {
        export::write_csv(figure, path)
            .with_context(|| format!("Failed to write CSV: {}", path.display()))?;
        generated.push(path.display().to_string());
    }
    Ok(generated)
}

fn run(cli: Cli) -> Result<Vec<String>> {
    let config_path = cli.config.as_deref();
    let mut figure = Figure::new();

    match cli.command {
        Command::Rmsd {
            trajectories,
            labels,
            output,
        } => {
            let config = resolve_config(config_path, &output)?;
            let loaded = load_trajectories(&trajectories, output.input_unit)?;
            let labels = dataset_labels(labels, &trajectories);
            if let [combined] = loaded.as_slice() {
                eprintln!(
                    "Splitting {} frames into {} datasets",
                    combined.n_frames(),
                    labels.len()
                );
                plots::plot_rmsd(&mut figure, combined, &labels, &config)?;
            } else {
                plots::plot_rmsd_each(&mut figure, &loaded, &labels, &config)?;
            }
            write_outputs(&figure, &output, &config)
        }
        Command::Rmsf { trajectory, output } => {
            let config = resolve_config(config_path, &output)?;
            let traj = io::read_trajectory(&trajectory, output.input_unit)
                .with_context(|| format!("Failed to read trajectory: {}", trajectory.display()))?;
            plots::plot_rmsf(&mut figure, &traj, &config)?;
            write_outputs(&figure, &output, &config)
        }
        Command::Pca {
            trajectories,
            labels,
            model,
            highlight,
            output,
        } => {
            let config = resolve_config(config_path, &output)?;
            let model = match model {
                Some(path) => PcaModel::load_json(&path)
                    .with_context(|| format!("Failed to load PCA model: {}", path.display()))?,
                None => {
                    if trajectories.is_empty() {
                        bail!("pca needs trajectory files or --model");
                    }
                    let loaded = load_trajectories(&trajectories, output.input_unit)?;
                    check_file_labels(&labels, &trajectories)?;
                    eprintln!(
                        "Fitting PCA on {} frames from {} files",
                        loaded.iter().map(Trajectory::n_frames).sum::<usize>(),
                        loaded.len()
                    );
                    PcaModel::fit_datasets(&loaded, 2)?
                }
            };
            if labels.is_empty() && trajectories.is_empty() {
                bail!("pca with --model needs at least one --label");
            }
            let labels = dataset_labels(labels, &trajectories);
            plots::plot_pca(&mut figure, &model, &labels, highlight, &config)?;
            write_outputs(&figure, &output, &config)
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    log_builder(cli.verbose, cli.quiet).init();

    let generated = run(cli)?;
    eprintln!("Generated {} files:", generated.len());
    for path in generated {
        eprintln!("  • {}", path);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_ignores_rust_log() {
        std::env::set_var("RUST_LOG", "debug");
        assert_eq!(log_builder(0, true).build().filter(), LevelFilter::Off);
        assert_eq!(log_builder(0, false).build().filter(), LevelFilter::Debug);
        std::env::remove_var("RUST_LOG");
        assert_eq!(log_builder(2, false).build().filter(), LevelFilter::Debug);
    }

    #[test]
    fn file_labels_must_match_file_count() {
        let paths = vec![PathBuf::from("a.xyz"), PathBuf::from("b.xyz")];
        assert!(check_file_labels(&[], &paths).is_ok());
        assert!(check_file_labels(&["x".into(), "y".into()], &paths).is_ok());
        assert!(check_file_labels(&["x".into()], &paths).is_err());
        // one file may hold several datasets back to back
        let single = vec![PathBuf::from("all.xyz")];
        assert!(check_file_labels(&["x".into(), "y".into()], &single).is_ok());
    }

    #[test]
    fn dataset_labels_default_to_file_stems() {
        let paths = vec![PathBuf::from("runs/rep1.jsonl"), PathBuf::from("rep2.xyz")];
        assert_eq!(dataset_labels(Vec::new(), &paths), vec!["rep1", "rep2"]);
        assert_eq!(dataset_labels(vec!["a".into()], &paths), vec!["a"]);
    }
}
