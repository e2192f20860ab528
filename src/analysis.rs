//! RMSD and RMSF reductions over trajectory coordinates.

use crate::error::{PlotError, Result};
use crate::superpose;
use crate::trajectory::Trajectory;
use std::ops::Range;

fn squared_distance(a: &[f64; 3], b: &[f64; 3]) -> f64 {
    (0..3).map(|k| (a[k] - b[k]).powi(2)).sum()
}

/// RMSD between two frames as they stand, without fitting
pub fn frame_rmsd(frame: &[[f64; 3]], reference: &[[f64; 3]]) -> Result<f64> {
    if frame.len() != reference.len() {
        return Err(PlotError::AtomCountMismatch {
            expected: reference.len(),
            actual: frame.len(),
        });
    }
    if frame.is_empty() {
        return Err(PlotError::NoAtoms);
    }
    let sum: f64 = frame
        .iter()
        .zip(reference)
        .map(|(a, b)| squared_distance(a, b))
        .sum();
    Ok((sum / frame.len() as f64).sqrt())
}

/// Per-frame RMSD of the frames in `range` against `reference`
pub fn rmsd_to_reference(
    trajectory: &Trajectory,
    range: Range<usize>,
    reference: &[[f64; 3]],
) -> Result<Vec<f64>> {
    let frames = trajectory.n_frames();
    if range.end > frames || range.start > range.end {
        return Err(PlotError::FrameRange {
            start: range.start,
            end: range.end,
            frames,
        });
    }
    trajectory
        .frames()
        .skip(range.start)
        .take(range.len())
        .map(|frame| frame_rmsd(frame, reference))
        .collect()
}

/// RMSD of every frame against frame `reference_index` after superposing each
/// frame onto it
pub fn superposed_rmsd(trajectory: &Trajectory, reference_index: usize) -> Result<Vec<f64>> {
    let reference = trajectory
        .frame(reference_index)
        .ok_or_else(|| PlotError::FrameRange {
            start: reference_index,
            end: reference_index.saturating_add(1),
            frames: trajectory.n_frames(),
        })?;
    trajectory
        .frames()
        .enumerate()
        .map(|(i, frame)| {
            if i == reference_index {
                return Ok(0.0);
            }
            let aligned = superpose::superpose_frame(frame, reference)?;
            frame_rmsd(&aligned, reference)
        })
        .collect()
}

/// Root-mean-square fluctuation of each atom about its mean position.
///
/// No fitting is done here; superpose the trajectory first if rigid-body
/// motion should be removed. Positions are taken relative to the first frame
/// before averaging, so a motionless atom comes out as exactly zero.
pub fn rmsf(trajectory: &Trajectory) -> Vec<f64> {
    let n_atoms = trajectory.n_atoms();
    let origin = trajectory.xyz()[..n_atoms].to_vec();
    let shift = |p: &[f64; 3], o: &[f64; 3]| [p[0] - o[0], p[1] - o[1], p[2] - o[2]];

    let mut mean = vec![[0.0f64; 3]; n_atoms];
    for frame in trajectory.frames() {
        for ((m, p), o) in mean.iter_mut().zip(frame).zip(&origin) {
            let d = shift(p, o);
            for k in 0..3 {
                m[k] += d[k];
            }
        }
    }
    let n = trajectory.n_frames() as f64;
    for m in &mut mean {
        for v in m.iter_mut() {
            *v /= n;
        }
    }

    let mut sum_sq = vec![0.0f64; n_atoms];
    for frame in trajectory.frames() {
        for (((acc, p), o), m) in sum_sq.iter_mut().zip(frame).zip(&origin).zip(&mean) {
            *acc += squared_distance(&shift(p, o), m);
        }
    }
    sum_sq.into_iter().map(|s| (s / n).sqrt()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LengthUnit;

    fn traj(frames: Vec<Vec<[f64; 3]>>) -> Trajectory {
        Trajectory::new(frames, LengthUnit::Nanometers).unwrap()
    }

    #[test]
    fn rmsd_of_frame_against_itself_is_zero() {
        let t = traj(vec![vec![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]; 3]);
        let values = rmsd_to_reference(&t, 0..3, t.frame(0).unwrap()).unwrap();
        assert_eq!(values, vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn rmsd_matches_closed_form() {
        let t = traj(vec![
            vec![[0.0, 0.0, 0.0], [0.0, 0.0, 0.0]],
            vec![[3.0, 0.0, 0.0], [0.0, 4.0, 0.0]],
        ]);
        let values = rmsd_to_reference(&t, 1..2, t.frame(0).unwrap()).unwrap();
        // sqrt((9 + 16) / 2)
        assert!((values[0] - (12.5f64).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn rmsd_range_is_checked() {
        let t = traj(vec![vec![[0.0; 3]]; 2]);
        assert!(matches!(
            rmsd_to_reference(&t, 1..3, t.frame(0).unwrap()),
            Err(PlotError::FrameRange { .. })
        ));
    }

    #[test]
    fn superposed_rmsd_ignores_rigid_motion() {
        let base = vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 2.0, 0.0]];
        let moved: Vec<[f64; 3]> = base.iter().map(|p| [-p[1] + 1.0, p[0], p[2] + 3.0]).collect();
        let t = traj(vec![base, moved]);
        let values = superposed_rmsd(&t, 0).unwrap();
        assert_eq!(values[0], 0.0);
        assert!(values[1] < 1e-9);
    }

    #[test]
    fn superposed_rmsd_reference_out_of_range() {
        let t = traj(vec![vec![[0.0; 3]]; 2]);
        assert!(matches!(
            superposed_rmsd(&t, 2),
            Err(PlotError::FrameRange { start: 2, end: 3, frames: 2 })
        ));
        assert!(matches!(
            superposed_rmsd(&t, usize::MAX),
            Err(PlotError::FrameRange { end: usize::MAX, .. })
        ));
    }

    #[test]
    fn rmsf_of_identical_frames_is_zero() {
        let frame = vec![[0.3, -1.2, 7.0], [2.0, 2.0, 2.0]];
        let t = traj(vec![frame; 4]);
        assert_eq!(rmsf(&t), vec![0.0, 0.0]);
    }

    #[test]
    fn rmsf_of_two_offset_frames_is_half_delta() {
        let delta = 0.8;
        let t = traj(vec![
            vec![[0.0, 0.0, 0.0], [1.0, 1.0, 1.0]],
            vec![[0.0, 0.0, 0.0], [1.0, 1.0 + delta, 1.0]],
        ]);
        let values = rmsf(&t);
        assert_eq!(values[0], 0.0);
        assert!((values[1] - delta / 2.0).abs() < 1e-12);
    }

    #[test]
    fn single_frame_rmsf_is_zero() {
        let t = traj(vec![vec![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]]);
        assert_eq!(rmsf(&t), vec![0.0, 0.0]);
    }
}
