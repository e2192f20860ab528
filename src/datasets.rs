//! Equal-length split of a frame sequence into labelled datasets.

use crate::config::RemainderPolicy;
use crate::error::{PlotError, Result};
use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatasetSplit {
    total_frames: usize,
    datasets: usize,
    frames_per_set: usize,
}

impl DatasetSplit {
    pub fn new(total_frames: usize, datasets: usize, policy: RemainderPolicy) -> Result<Self> {
        if datasets == 0 {
            return Err(PlotError::NoDatasets);
        }
        let frames_per_set = total_frames / datasets;
        if frames_per_set == 0 {
            return Err(PlotError::EmptyDatasets {
                total_frames,
                datasets,
            });
        }
        let remainder = total_frames % datasets;
        if remainder != 0 {
            match policy {
                RemainderPolicy::Reject => {
                    return Err(PlotError::UnevenDatasets {
                        total_frames,
                        datasets,
                        remainder,
                    })
                }
                RemainderPolicy::Truncate => log::warn!(
                    "{} frames do not split evenly into {} datasets, dropping the last {}",
                    total_frames,
                    datasets,
                    remainder
                ),
            }
        }
        Ok(Self {
            total_frames,
            datasets,
            frames_per_set,
        })
    }

    pub fn datasets(&self) -> usize {
        self.datasets
    }

    pub fn frames_per_set(&self) -> usize {
        self.frames_per_set
    }

    /// Frames left unused at the end of the sequence
    pub fn remainder(&self) -> usize {
        self.total_frames - self.datasets * self.frames_per_set
    }

    /// Half-open frame range of dataset `index`
    pub fn range(&self, index: usize) -> Option<Range<usize>> {
        (index < self.datasets)
            .then(|| index * self.frames_per_set..(index + 1) * self.frames_per_set)
    }

    pub fn ranges(&self) -> impl Iterator<Item = Range<usize>> + '_ {
        (0..self.datasets).map(move |i| i * self.frames_per_set..(i + 1) * self.frames_per_set)
    }
}
