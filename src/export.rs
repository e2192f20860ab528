//! Machine-readable figure export (JSON record, CSV table).

use crate::error::Result;
use crate::figure::Figure;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// A figure together with the time it was written
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FigureRecord {
    pub generated_at: DateTime<Utc>,
    pub figure: Figure,
}

pub fn write_json<P: AsRef<Path>>(figure: &Figure, path: P) -> Result<()> {
    let record = FigureRecord {
        generated_at: Utc::now(),
        figure: figure.clone(),
    };
    let mut writer = BufWriter::new(File::create(path.as_ref())?);
    serde_json::to_writer_pretty(&mut writer, &record)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

/// Write every series point as a `series,label,x,y` row
pub fn write_csv<P: AsRef<Path>>(figure: &Figure, path: P) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path.as_ref())?);
    writeln!(writer, "series,label,x,y")?;
    for (index, series) in figure.series().iter().enumerate() {
        // Escape quotes in labels
        let label = series
            .label
            .as_ref()
            .map(|l| format!("\"{}\"", l.replace('"', "\"\"")))
            .unwrap_or_default();
        for (x, y) in &series.points {
            writeln!(writer, "{},{},{},{}", index, label, x, y)?;
        }
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::figure::{ColorChoice, SeriesStyle};
    use std::fs;

    fn sample_figure() -> Figure {
        let mut fig = Figure::new();
        fig.plot([(0.0, 0.1), (1.0, 0.2)], SeriesStyle::labeled("say \"hi\""));
        fig.plot([(0.0, 0.5)], SeriesStyle::default().color(ColorChoice::Grey));
        fig.text(0.0, 0.1, "start");
        fig.set_x_label("Frame number");
        fig
    }

    #[test]
    fn json_record_round_trips_figure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fig.json");
        let fig = sample_figure();
        write_json(&fig, &path).unwrap();

        let record: FigureRecord = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(record.figure, fig);
        assert!(record.generated_at <= Utc::now());
    }

    #[test]
    fn csv_rows_per_point() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fig.csv");
        write_csv(&sample_figure(), &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(
            lines,
            vec![
                "series,label,x,y",
                "0,\"say \"\"hi\"\"\",0,0.1",
                "0,\"say \"\"hi\"\"\",1,0.2",
                "1,,0,0.5",
            ]
        );
    }
}
