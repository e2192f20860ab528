//! In-memory trajectory: frames × atoms × 3 coordinates.

use crate::config::LengthUnit;
use crate::error::{PlotError, Result};
use crate::superpose;
use std::ops::Range;

#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    n_atoms: usize,
    coords: Vec<[f64; 3]>,
    unit: LengthUnit,
}

impl Trajectory {
    /// Build from one coordinate list per frame
    pub fn new(frames: Vec<Vec<[f64; 3]>>, unit: LengthUnit) -> Result<Self> {
        let n_atoms = frames.first().ok_or(PlotError::EmptyTrajectory)?.len();
        let mut coords = Vec::with_capacity(n_atoms * frames.len());
        for frame in frames {
            if frame.len() != n_atoms {
                return Err(PlotError::AtomCountMismatch {
                    expected: n_atoms,
                    actual: frame.len(),
                });
            }
            coords.extend(frame);
        }
        Self::from_flat(n_atoms, coords, unit)
    }

    /// Build from frame-major flat coordinates
    pub fn from_flat(n_atoms: usize, coords: Vec<[f64; 3]>, unit: LengthUnit) -> Result<Self> {
        if n_atoms == 0 {
            return Err(PlotError::NoAtoms);
        }
        if coords.is_empty() {
            return Err(PlotError::EmptyTrajectory);
        }
        if coords.len() % n_atoms != 0 {
            return Err(PlotError::AtomCountMismatch {
                expected: n_atoms,
                actual: coords.len() % n_atoms,
            });
        }
        Ok(Self {
            n_atoms,
            coords,
            unit,
        })
    }

    /// Join trajectories end to end, in order
    pub fn concat(parts: &[Trajectory]) -> Result<Self> {
        let first = parts.first().ok_or(PlotError::EmptyTrajectory)?;
        let mut coords = Vec::with_capacity(parts.iter().map(|t| t.coords.len()).sum());
        for part in parts {
            if part.n_atoms != first.n_atoms {
                return Err(PlotError::AtomCountMismatch {
                    expected: first.n_atoms,
                    actual: part.n_atoms,
                });
            }
            if part.unit != first.unit {
                return Err(PlotError::UnitMismatch);
            }
            coords.extend_from_slice(&part.coords);
        }
        Self::from_flat(first.n_atoms, coords, first.unit)
    }

    pub fn n_frames(&self) -> usize {
        self.coords.len() / self.n_atoms
    }

    pub fn n_atoms(&self) -> usize {
        self.n_atoms
    }

    pub fn unit(&self) -> LengthUnit {
        self.unit
    }

    /// Raw frame-major coordinates (frames × atoms)
    pub fn xyz(&self) -> &[[f64; 3]] {
        &self.coords
    }

    pub fn frame(&self, index: usize) -> Option<&[[f64; 3]]> {
        let start = index.checked_mul(self.n_atoms)?;
        self.coords.get(start..start.checked_add(self.n_atoms)?)
    }

    pub fn frames(&self) -> impl Iterator<Item = &[[f64; 3]]> + '_ {
        self.coords.chunks_exact(self.n_atoms)
    }

    /// Copy of the frames in `range`
    pub fn slice(&self, range: Range<usize>) -> Result<Self> {
        let frames = self.n_frames();
        if range.start >= range.end || range.end > frames {
            return Err(PlotError::FrameRange {
                start: range.start,
                end: range.end,
                frames,
            });
        }
        let coords = self.coords[range.start * self.n_atoms..range.end * self.n_atoms].to_vec();
        Self::from_flat(self.n_atoms, coords, self.unit)
    }

    /// Copy with coordinates expressed in `unit`
    pub fn to_unit(&self, unit: LengthUnit) -> Self {
        let coords = self
            .coords
            .iter()
            .map(|p| p.map(|v| self.unit.convert(v, unit)))
            .collect();
        Self {
            n_atoms: self.n_atoms,
            coords,
            unit,
        }
    }

    /// Copy with every frame superposed on `reference`; `self` is untouched
    pub fn superposed_to(&self, reference: &[[f64; 3]]) -> Result<Self> {
        if reference.len() != self.n_atoms {
            return Err(PlotError::AtomCountMismatch {
                expected: self.n_atoms,
                actual: reference.len(),
            });
        }
        let mut coords = Vec::with_capacity(self.coords.len());
        for frame in self.frames() {
            coords.extend(superpose::superpose_frame(frame, reference)?);
        }
        log::debug!(
            "superposed {} frames of {} atoms",
            self.n_frames(),
            self.n_atoms
        );
        Self::from_flat(self.n_atoms, coords, self.unit)
    }

    /// Copy with every frame superposed on frame `index` of this trajectory.
    ///
    /// The reference frame itself is copied unchanged.
    pub fn superposed_to_frame(&self, index: usize) -> Result<Self> {
        let reference = self.frame(index).ok_or_else(|| PlotError::FrameRange {
            start: index,
            end: index.saturating_add(1),
            frames: self.n_frames(),
        })?;
        let mut aligned = self.superposed_to(reference)?;
        let start = index * self.n_atoms;
        aligned.coords[start..start + self.n_atoms].copy_from_slice(reference);
        Ok(aligned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_atom(frames: usize) -> Trajectory {
        let frames = (0..frames)
            .map(|i| vec![[i as f64, 0.0, 0.0], [i as f64, 1.0, 0.0]])
            .collect();
        Trajectory::new(frames, LengthUnit::Nanometers).unwrap()
    }

    #[test]
    fn shape_accessors() {
        let traj = two_atom(5);
        assert_eq!(traj.n_frames(), 5);
        assert_eq!(traj.n_atoms(), 2);
        assert_eq!(traj.xyz().len(), 10);
        assert_eq!(traj.frame(3).unwrap()[1], [3.0, 1.0, 0.0]);
        assert!(traj.frame(5).is_none());
        assert!(traj.frame(usize::MAX).is_none());
        assert!(traj.frame(usize::MAX / 2).is_none());
        assert_eq!(traj.frames().count(), 5);
    }

    #[test]
    fn rejects_ragged_and_empty_input() {
        let ragged = vec![vec![[0.0; 3]; 2], vec![[0.0; 3]; 3]];
        assert!(matches!(
            Trajectory::new(ragged, LengthUnit::Nanometers),
            Err(PlotError::AtomCountMismatch { expected: 2, actual: 3 })
        ));
        assert!(matches!(
            Trajectory::new(vec![], LengthUnit::Nanometers),
            Err(PlotError::EmptyTrajectory)
        ));
        assert!(matches!(
            Trajectory::new(vec![vec![]], LengthUnit::Nanometers),
            Err(PlotError::NoAtoms)
        ));
    }

    #[test]
    fn slice_copies_frame_range() {
        let traj = two_atom(6);
        let part = traj.slice(2..4).unwrap();
        assert_eq!(part.n_frames(), 2);
        assert_eq!(part.frame(0).unwrap()[0], [2.0, 0.0, 0.0]);
        assert!(matches!(
            traj.slice(4..7),
            Err(PlotError::FrameRange { start: 4, end: 7, frames: 6 })
        ));
        assert!(traj.slice(3..3).is_err());
        assert!(matches!(
            traj.superposed_to_frame(usize::MAX),
            Err(PlotError::FrameRange { end: usize::MAX, .. })
        ));
    }

    #[test]
    fn concat_joins_in_order() {
        let joined = Trajectory::concat(&[two_atom(2), two_atom(3)]).unwrap();
        assert_eq!(joined.n_frames(), 5);
        assert_eq!(joined.frame(2).unwrap()[0], [0.0, 0.0, 0.0]);

        let angstrom = two_atom(1).to_unit(LengthUnit::Angstroms);
        assert!(matches!(
            Trajectory::concat(&[two_atom(1), angstrom]),
            Err(PlotError::UnitMismatch)
        ));
    }

    #[test]
    fn superposition_leaves_original_untouched() {
        let frames = vec![
            vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            vec![[5.0, 5.0, 5.0], [5.0, 6.0, 5.0], [4.0, 5.0, 5.0]],
        ];
        let traj = Trajectory::new(frames, LengthUnit::Nanometers).unwrap();
        let before = traj.clone();
        let aligned = traj.superposed_to_frame(0).unwrap();
        assert_eq!(traj, before);
        assert_eq!(aligned.frame(0), traj.frame(0));
        for (a, b) in aligned.frame(1).unwrap().iter().zip(traj.frame(0).unwrap()) {
            for k in 0..3 {
                assert!((a[k] - b[k]).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn unit_conversion_scales_coordinates() {
        let traj = two_atom(2).to_unit(LengthUnit::Angstroms);
        assert_eq!(traj.unit(), LengthUnit::Angstroms);
        assert!((traj.frame(1).unwrap()[1][1] - 10.0).abs() < 1e-12);
    }
}
