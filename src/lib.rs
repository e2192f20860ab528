//! RMSD, RMSF and PCA projection plots for molecular dynamics trajectories.
//!
//! Plotters draw into an explicit [`Figure`]; [`render::render_svg`] writes it
//! out afterwards.
//!
//! ```no_run
//! use trajplot::{io, plots, render, Figure, LengthUnit, PlotConfig};
//!
//! # fn main() -> trajplot::Result<()> {
//! let traj = io::read_trajectory("replicas.xyz", LengthUnit::Angstroms)?;
//! let config = PlotConfig::default();
//! let mut figure = Figure::new();
//! plots::plot_rmsd(&mut figure, &traj, &["rep1", "rep2"], &config)?;
//! render::render_svg(&figure, "rmsd.svg", &config)?;
//! # Ok(())
//! # }
//! ```

pub mod analysis;
pub mod config;
pub mod datasets;
pub mod error;
pub mod export;
pub mod figure;
pub mod io;
pub mod pca;
pub mod plots;
pub mod render;
pub mod superpose;
pub mod trajectory;

pub use config::{LengthUnit, PlotConfig, RemainderPolicy};
pub use datasets::DatasetSplit;
pub use error::{PlotError, Result};
pub use figure::{Figure, LegendPosition, SeriesColor, SeriesStyle};
pub use pca::PcaModel;
pub use trajectory::Trajectory;
