//! Trajectory readers: multi-frame XYZ and JSON Lines.

use crate::config::LengthUnit;
use crate::error::{PlotError, Result};
use crate::trajectory::Trajectory;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

fn parse_error(path: &Path, line: usize, message: impl Into<String>) -> PlotError {
    PlotError::Parse {
        path: path.to_path_buf(),
        line,
        message: message.into(),
    }
}

/// Read by extension: `.xyz` as XYZ, anything else as JSON Lines
pub fn read_trajectory<P: AsRef<Path>>(path: P, unit: LengthUnit) -> Result<Trajectory> {
    let path = path.as_ref();
    let is_xyz = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("xyz"));
    if is_xyz {
        read_xyz(path, unit)
    } else {
        read_json_lines(path, unit)
    }
}

/// Read a multi-frame XYZ file.
///
/// Each frame is an atom count line, a comment line and one
/// `element x y z` row per atom. All frames must have the same atom count.
pub fn read_xyz<P: AsRef<Path>>(path: P, unit: LengthUnit) -> Result<Trajectory> {
    let path = path.as_ref();
    let reader = BufReader::new(File::open(path)?);
    let mut lines = reader.lines().enumerate();
    let mut frames: Vec<Vec<[f64; 3]>> = Vec::new();

    while let Some((idx, line)) = lines.next() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let n_atoms: usize = line
            .trim()
            .parse()
            .map_err(|_| parse_error(path, idx + 1, "invalid xyz atom count"))?;
        // comment line
        if lines.next().is_none() {
            return Err(parse_error(path, idx + 2, "missing xyz comment line"));
        }
        let mut last_line = idx + 2;
        let mut frame = Vec::with_capacity(n_atoms);
        for _ in 0..n_atoms {
            let (idx, line) = lines.next().ok_or_else(|| {
                parse_error(path, last_line + 1, "truncated xyz frame")
            })?;
            last_line = idx + 1;
            let line = line?;
            let parts: Vec<&str> = line.split_whitespace().collect();
            if parts.len() < 4 {
                return Err(parse_error(path, idx + 1, "expected `element x y z`"));
            }
            let mut xyz = [0.0f64; 3];
            for (k, value) in parts[1..4].iter().enumerate() {
                xyz[k] = value
                    .parse()
                    .map_err(|_| parse_error(path, idx + 1, format!("bad coordinate '{}'", value)))?;
            }
            frame.push(xyz);
        }
        frames.push(frame);
    }

    if frames.is_empty() {
        return Err(parse_error(path, 1, "no frames found in xyz"));
    }
    log::debug!("read {} xyz frames from {}", frames.len(), path.display());
    Trajectory::new(frames, unit)
}

/// Read one JSON array of `[x, y, z]` coordinates per line.
///
/// Blank lines and lines starting with `#` are skipped.
pub fn read_json_lines<P: AsRef<Path>>(path: P, unit: LengthUnit) -> Result<Trajectory> {
    let path = path.as_ref();
    let reader = BufReader::new(File::open(path)?);
    let mut frames: Vec<Vec<[f64; 3]>> = Vec::new();

    for (line_num, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let frame: Vec<[f64; 3]> = serde_json::from_str(trimmed)
            .map_err(|e| parse_error(path, line_num + 1, e.to_string()))?;
        frames.push(frame);
    }

    if frames.is_empty() {
        return Err(parse_error(path, 1, "no frames found"));
    }
    log::debug!("read {} frames from {}", frames.len(), path.display());
    Trajectory::new(frames, unit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn reads_multi_frame_xyz() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("water.xyz");
        fs::write(
            &path,
            "3\nframe 0\nO 0.0 0.0 0.0\nH 0.1 0.0 0.0\nH 0.0 0.1 0.0\n\
             3\nframe 1\nO 0.0 0.0 0.1\nH 0.1 0.0 0.1\nH 0.0 0.1 0.1\n",
        )
        .unwrap();
        let traj = read_trajectory(&path, LengthUnit::Nanometers).unwrap();
        assert_eq!(traj.n_frames(), 2);
        assert_eq!(traj.n_atoms(), 3);
        assert_eq!(traj.frame(1).unwrap()[2], [0.0, 0.1, 0.1]);
    }

    #[test]
    fn xyz_errors_carry_line_numbers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.xyz");
        fs::write(&path, "2\ncomment\nC 0 0 0\nC 1 x 0\n").unwrap();
        match read_xyz(&path, LengthUnit::Angstroms) {
            Err(PlotError::Parse { line, .. }) => assert_eq!(line, 4),
            other => panic!("unexpected result: {:?}", other),
        }

        // the second atom is missing where line 4 should be
        fs::write(&path, "3\ncomment\nC 0 0 0\n").unwrap();
        match read_xyz(&path, LengthUnit::Angstroms) {
            Err(PlotError::Parse { line, .. }) => assert_eq!(line, 4),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn xyz_frames_must_agree_on_atom_count() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ragged.xyz");
        fs::write(&path, "1\na\nC 0 0 0\n2\nb\nC 0 0 0\nC 1 1 1\n").unwrap();
        assert!(matches!(
            read_xyz(&path, LengthUnit::Nanometers),
            Err(PlotError::AtomCountMismatch { expected: 1, actual: 2 })
        ));
    }

    #[test]
    fn reads_json_lines_skipping_comments() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("traj.jsonl");
        fs::write(
            &path,
            "# two atoms\n[[0, 0, 0], [1, 0, 0]]\n\n[[0, 0, 1], [1, 0, 1]]\n",
        )
        .unwrap();
        let traj = read_trajectory(&path, LengthUnit::Angstroms).unwrap();
        assert_eq!(traj.n_frames(), 2);
        assert_eq!(traj.unit(), LengthUnit::Angstroms);
        assert_eq!(traj.frame(1).unwrap()[1], [1.0, 0.0, 1.0]);
    }

    #[test]
    fn json_lines_reports_bad_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("traj.jsonl");
        fs::write(&path, "[[0, 0, 0]]\n[[0, 0]]\n").unwrap();
        match read_json_lines(&path, LengthUnit::Nanometers) {
            Err(PlotError::Parse { line, .. }) => assert_eq!(line, 2),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
