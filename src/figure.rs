//! Plot context that collects series, annotations and axis settings.
//!
//! A `Figure` is an ordinary value owned by the caller. Plotters draw into a
//! `&mut Figure` and the renderer turns it into an image afterwards.

use serde::{Deserialize, Serialize};

/// Number of colours in the automatic palette
pub const PALETTE_LEN: usize = 10;

/// Colour assigned to a series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesColor {
    /// Entry of the automatic palette
    Palette(usize),
    Grey,
    Red,
}

/// Colour requested when adding a series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorChoice {
    /// Next colour of the palette cycle
    #[default]
    Auto,
    Grey,
    Red,
}

#[derive(Debug, Clone, Default)]
pub struct SeriesStyle {
    pub label: Option<String>,
    pub color: ColorChoice,
}

impl SeriesStyle {
    pub fn labeled(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            color: ColorChoice::Auto,
        }
    }

    pub fn color(mut self, color: ColorChoice) -> Self {
        self.color = color;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub points: Vec<(f64, f64)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub color: SeriesColor,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub x: f64,
    pub y: f64,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegendPosition {
    UpperLeft,
    UpperRight,
    LowerLeft,
    LowerRight,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    series: Vec<Series>,
    annotations: Vec<Annotation>,
    x_label: Option<String>,
    y_label: Option<String>,
    title: Option<String>,
    legend: Option<LegendPosition>,
    next_color: usize,
}

impl Figure {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a line through `points`
    pub fn plot<I>(&mut self, points: I, style: SeriesStyle)
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let color = match style.color {
            ColorChoice::Auto => {
                let c = SeriesColor::Palette(self.next_color % PALETTE_LEN);
                self.next_color += 1;
                c
            }
            ColorChoice::Grey => SeriesColor::Grey,
            ColorChoice::Red => SeriesColor::Red,
        };
        self.series.push(Series {
            points: points.into_iter().collect(),
            label: style.label,
            color,
        });
    }

    /// Add a text annotation anchored at `(x, y)`
    pub fn text(&mut self, x: f64, y: f64, text: impl Into<String>) {
        self.annotations.push(Annotation {
            x,
            y,
            text: text.into(),
        });
    }

    pub fn set_x_label(&mut self, label: impl Into<String>) {
        self.x_label = Some(label.into());
    }

    pub fn set_y_label(&mut self, label: impl Into<String>) {
        self.y_label = Some(label.into());
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    pub fn legend(&mut self, position: LegendPosition) {
        self.legend = Some(position);
    }

    pub fn series(&self) -> &[Series] {
        &self.series
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn labeled_series(&self) -> impl Iterator<Item = &Series> {
        self.series.iter().filter(|s| s.label.is_some())
    }

    pub fn x_label(&self) -> Option<&str> {
        self.x_label.as_deref()
    }

    pub fn y_label(&self) -> Option<&str> {
        self.y_label.as_deref()
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn legend_position(&self) -> Option<LegendPosition> {
        self.legend
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty() && self.annotations.is_empty()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
