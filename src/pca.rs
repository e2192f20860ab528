//! Principal component projections of trajectory frames.

use crate::error::{PlotError, Result};
use crate::trajectory::Trajectory;
use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Per-frame projections onto the leading principal components
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PcaModel {
    projections: Vec<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    eigenvalues: Vec<f64>,
}

impl PcaModel {
    /// Wrap precomputed projections, one sequence per component
    pub fn new(projections: Vec<Vec<f64>>) -> Result<Self> {
        Self::with_eigenvalues(projections, Vec::new())
    }

    pub fn with_eigenvalues(projections: Vec<Vec<f64>>, eigenvalues: Vec<f64>) -> Result<Self> {
        let model = Self {
            projections,
            eigenvalues,
        };
        model.validate()?;
        Ok(model)
    }

    fn validate(&self) -> Result<()> {
        if self.projections.len() < 2 {
            return Err(PlotError::TooFewProjections(self.projections.len()));
        }
        let expected = self.projections[0].len();
        for (index, p) in self.projections.iter().enumerate() {
            if p.len() != expected {
                return Err(PlotError::ProjectionLength {
                    index,
                    expected,
                    actual: p.len(),
                });
            }
        }
        Ok(())
    }

    /// Read `{"projections": [[...], [...]], "eigenvalues": [...]}`
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let model: PcaModel = serde_json::from_str(&content)?;
        model.validate()?;
        Ok(model)
    }

    /// Fit on equal-length datasets joined in order, after superposing every
    /// frame on the first frame of dataset 0.
    ///
    /// Dataset boundaries are only kept by position, so every dataset must
    /// hold the same number of frames.
    pub fn fit_datasets(datasets: &[Trajectory], n_components: usize) -> Result<Self> {
        let first = datasets.first().ok_or(PlotError::NoDatasets)?;
        let expected = first.n_frames();
        for (index, dataset) in datasets.iter().enumerate().skip(1) {
            if dataset.n_frames() != expected {
                return Err(PlotError::DatasetLengthMismatch {
                    index,
                    expected,
                    actual: dataset.n_frames(),
                });
            }
        }
        let joined = Trajectory::concat(datasets)?.superposed_to_frame(0)?;
        log::debug!(
            "joined {} datasets of {} frames for PCA",
            datasets.len(),
            expected
        );
        Self::fit(&joined, n_components)
    }

    /// Fit on the flattened 3N coordinates of every frame and keep the
    /// `n_components` largest-variance components (at least two).
    ///
    /// Frames are used as given; superpose them first to remove rigid-body
    /// motion.
    pub fn fit(trajectory: &Trajectory, n_components: usize) -> Result<Self> {
        let n_frames = trajectory.n_frames();
        let dim = trajectory.n_atoms() * 3;
        let n_components = n_components.max(2);
        if n_components > dim {
            return Err(PlotError::Pca(format!(
                "{} components requested but only {} coordinates per frame",
                n_components, dim
            )));
        }

        let flat: Vec<f64> = trajectory.xyz().iter().flatten().copied().collect();
        let mut data = DMatrix::from_row_slice(n_frames, dim, &flat);
        let mean = data.row_mean();
        for (j, m) in mean.iter().enumerate() {
            for i in 0..n_frames {
                data[(i, j)] -= m;
            }
        }

        let denom = n_frames.saturating_sub(1).max(1) as f64;
        let svd = data.clone().svd(false, true);
        let v_t = svd
            .v_t
            .ok_or_else(|| PlotError::Pca("SVD returned no right singular vectors".into()))?;
        let sigma = &svd.singular_values;

        let mut order: Vec<usize> = (0..sigma.len()).collect();
        order.sort_by(|&a, &b| sigma[b].total_cmp(&sigma[a]));

        let mut projections = Vec::with_capacity(n_components);
        let mut eigenvalues = Vec::with_capacity(n_components);
        for rank in 0..n_components {
            match order.get(rank) {
                Some(&k) => {
                    let axis = v_t.row(k).transpose();
                    let proj = &data * axis;
                    projections.push(proj.iter().copied().collect());
                    eigenvalues.push(sigma[k] * sigma[k] / denom);
                }
                // centred data has no variance beyond min(frames, 3N) axes
                None => {
                    projections.push(vec![0.0; n_frames]);
                    eigenvalues.push(0.0);
                }
            }
        }
        log::info!(
            "fitted PCA on {} frames x {} coordinates, leading eigenvalue {:.4}",
            n_frames,
            dim,
            eigenvalues[0]
        );
        Self::with_eigenvalues(projections, eigenvalues)
    }

    pub fn n_components(&self) -> usize {
        self.projections.len()
    }

    /// Number of frames covered by each projection
    pub fn len(&self) -> usize {
        self.projections.first().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn projection(&self, component: usize) -> Option<&[f64]> {
        self.projections.get(component).map(Vec::as_slice)
    }

    pub fn eigenvalues(&self) -> &[f64] {
        &self.eigenvalues
    }
}
