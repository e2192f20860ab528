//! RMSD, RMSF and PCA projection plotters.
//!
//! Each plotter draws into a caller-owned [`Figure`]. Trajectories are never
//! modified: alignment works on a copy, converted to the configured unit.

use crate::analysis;
use crate::config::PlotConfig;
use crate::datasets::DatasetSplit;
use crate::error::{PlotError, Result};
use crate::figure::{ColorChoice, Figure, LegendPosition, SeriesStyle};
use crate::pca::PcaModel;
use crate::trajectory::Trajectory;

fn indexed(values: &[f64]) -> impl Iterator<Item = (f64, f64)> + '_ {
    values.iter().enumerate().map(|(i, v)| (i as f64, *v))
}

fn apply_title(figure: &mut Figure, config: &PlotConfig) {
    if let Some(title) = &config.title {
        figure.set_title(title.clone());
    }
}

fn set_rmsd_axes(figure: &mut Figure, config: &PlotConfig) {
    figure.set_x_label("Frame number");
    figure.set_y_label(format!("RMSD ({})", config.length_unit.suffix()));
    figure.legend(LegendPosition::LowerRight);
    apply_title(figure, config);
}

/// RMSD over time for one combined trajectory holding every dataset back to
/// back.
///
/// All frames are superposed on frame 0 of the whole trajectory, and each
/// dataset's frames are measured against that same frame.
pub fn plot_rmsd<S: AsRef<str>>(
    figure: &mut Figure,
    trajectory: &Trajectory,
    labels: &[S],
    config: &PlotConfig,
) -> Result<()> {
    let split = DatasetSplit::new(trajectory.n_frames(), labels.len(), config.remainder)?;
    let aligned = trajectory
        .to_unit(config.length_unit)
        .superposed_to_frame(0)?;
    let reference = aligned.frame(0).ok_or(PlotError::EmptyTrajectory)?;

    for (label, range) in labels.iter().zip(split.ranges()) {
        let rmsd = analysis::rmsd_to_reference(&aligned, range, reference)?;
        log::debug!("{}: {} RMSD values", label.as_ref(), rmsd.len());
        figure.plot(indexed(&rmsd), SeriesStyle::labeled(label.as_ref()));
    }
    set_rmsd_axes(figure, config);
    Ok(())
}

/// RMSD over time for separate trajectories, each measured against its own
/// first frame after superposing every frame onto it.
pub fn plot_rmsd_each<S: AsRef<str>>(
    figure: &mut Figure,
    trajectories: &[Trajectory],
    labels: &[S],
    config: &PlotConfig,
) -> Result<()> {
    if labels.is_empty() {
        return Err(PlotError::NoDatasets);
    }
    if labels.len() != trajectories.len() {
        return Err(PlotError::LabelCountMismatch {
            expected: trajectories.len(),
            actual: labels.len(),
        });
    }

    let mut curves = Vec::with_capacity(trajectories.len());
    for trajectory in trajectories {
        let converted = trajectory.to_unit(config.length_unit);
        curves.push(analysis::superposed_rmsd(&converted, 0)?);
    }
    for (label, rmsd) in labels.iter().zip(&curves) {
        figure.plot(indexed(rmsd), SeriesStyle::labeled(label.as_ref()));
    }
    set_rmsd_axes(figure, config);
    Ok(())
}

/// Per-atom RMSF after superposing every frame on frame 0
pub fn plot_rmsf(figure: &mut Figure, trajectory: &Trajectory, config: &PlotConfig) -> Result<()> {
    let aligned = trajectory
        .to_unit(config.length_unit)
        .superposed_to_frame(0)?;
    let rmsf = analysis::rmsf(&aligned);
    figure.plot(indexed(&rmsf), SeriesStyle::default());
    figure.set_x_label("Atom number");
    figure.set_y_label(format!("RMSF ({})", config.length_unit.suffix()));
    apply_title(figure, config);
    Ok(())
}

fn draw_dataset_path(figure: &mut Figure, p1: &[f64], p2: &[f64], style: SeriesStyle) {
    let annotate = style.label.is_some();
    figure.plot(p1.iter().copied().zip(p2.iter().copied()), style);
    if annotate {
        if let (Some(x), Some(y)) = (p1.first(), p2.first()) {
            figure.text(*x, *y, "start");
        }
        if let (Some(x), Some(y)) = (p1.last(), p2.last()) {
            figure.text(*x, *y, "end");
        }
    }
}

/// Path of each dataset in the PC1/PC2 plane.
///
/// Without `highlight` every dataset gets its own colour, a legend entry and
/// "start"/"end" markers. With `highlight = Some(i)` the other datasets are
/// drawn grey and unlabelled, and dataset `i` is drawn last in red with its
/// label and markers.
pub fn plot_pca<S: AsRef<str>>(
    figure: &mut Figure,
    model: &PcaModel,
    labels: &[S],
    highlight: Option<usize>,
    config: &PlotConfig,
) -> Result<()> {
    let (p1, p2) = match (model.projection(0), model.projection(1)) {
        (Some(p1), Some(p2)) => (p1, p2),
        _ => return Err(PlotError::TooFewProjections(model.n_components())),
    };
    if p1.len() != p2.len() {
        return Err(PlotError::ProjectionLength {
            index: 1,
            expected: p1.len(),
            actual: p2.len(),
        });
    }
    let split = DatasetSplit::new(p1.len(), labels.len(), config.remainder)?;
    if let Some(index) = highlight {
        if index >= labels.len() {
            return Err(PlotError::HighlightOutOfRange {
                index,
                datasets: labels.len(),
            });
        }
    }

    for (i, (label, range)) in labels.iter().zip(split.ranges()).enumerate() {
        let style = match highlight {
            None => SeriesStyle::labeled(label.as_ref()),
            Some(h) if h == i => continue,
            Some(_) => SeriesStyle::default().color(ColorChoice::Grey),
        };
        draw_dataset_path(figure, &p1[range.clone()], &p2[range], style);
    }
    if let Some(h) = highlight {
        if let Some(range) = split.range(h) {
            let style = SeriesStyle::labeled(labels[h].as_ref()).color(ColorChoice::Red);
            draw_dataset_path(figure, &p1[range.clone()], &p2[range], style);
        }
    }

    figure.set_x_label("PC1");
    figure.set_y_label("PC2");
    figure.legend(LegendPosition::UpperLeft);
    apply_title(figure, config);
    Ok(())
}
