//! Error type shared by the library modules.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PlotError>;

#[derive(Debug, Error)]
pub enum PlotError {
    #[error("no dataset labels were given")]
    NoDatasets,

    #[error(
        "{total_frames} frames cannot be split evenly into {datasets} datasets \
         ({remainder} frames left over)"
    )]
    UnevenDatasets {
        total_frames: usize,
        datasets: usize,
        remainder: usize,
    },

    #[error("dataset {index} has {actual} frames, expected {expected} like dataset 0")]
    DatasetLengthMismatch {
        index: usize,
        expected: usize,
        actual: usize,
    },

    #[error("{total_frames} frames are too few for {datasets} datasets")]
    EmptyDatasets { total_frames: usize, datasets: usize },

    #[error("dataset index {index} is out of range for {datasets} datasets")]
    HighlightOutOfRange { index: usize, datasets: usize },

    #[error("expected {expected} labels, got {actual}")]
    LabelCountMismatch { expected: usize, actual: usize },

    #[error("atom count mismatch: expected {expected}, got {actual}")]
    AtomCountMismatch { expected: usize, actual: usize },

    #[error("length unit mismatch while joining trajectories")]
    UnitMismatch,

    #[error("trajectory has no frames")]
    EmptyTrajectory,

    #[error("trajectory has no atoms")]
    NoAtoms,

    #[error("frame range {start}..{end} is out of bounds for {frames} frames")]
    FrameRange {
        start: usize,
        end: usize,
        frames: usize,
    },

    #[error("PCA model needs at least two projections, found {0}")]
    TooFewProjections(usize),

    #[error("projection {index} has {actual} values, expected {expected}")]
    ProjectionLength {
        index: usize,
        expected: usize,
        actual: usize,
    },

    #[error("superposition failed: {0}")]
    Superposition(String),

    #[error("PCA fit failed: {0}")]
    Pca(String),

    #[error("Failed to parse '{path}' at line {line}: {message}", path = path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("figure has nothing to draw")]
    EmptyFigure,

    #[error("render error: {0}")]
    Render(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
