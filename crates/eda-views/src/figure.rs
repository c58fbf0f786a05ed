//! Backend-neutral artifact model
//!
//! Every render branch produces one [`Artifact`]. Charts are described as a
//! [`Figure`]: a grid of panels holding marks in data coordinates. The same
//! description is drawn interactively with egui_plot and exported as SVG
//! with plotters, so both outputs always agree.

use itertools::{Itertools, MinMaxResult};

use crate::colors::Rgb;

/// The single result of one render call
#[derive(Debug, Clone, PartialEq)]
pub enum Artifact {
    Overview(OverviewReport),
    Summary(DescribeTable),
    Figure(Figure),
}

impl Artifact {
    pub fn as_figure(&self) -> Option<&Figure> {
        match self {
            Artifact::Figure(figure) => Some(figure),
            _ => None,
        }
    }

    /// Short name for logs
    pub fn kind_name(&self) -> &'static str {
        match self {
            Artifact::Overview(_) => "overview",
            Artifact::Summary(_) => "summary",
            Artifact::Figure(_) => "figure",
        }
    }
}

/// Preview table, headline metrics and column listing
#[derive(Debug, Clone, PartialEq)]
pub struct OverviewReport {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub row_count: usize,
    pub column_count: usize,
    pub missing_values: usize,
    /// Column name and dtype label
    pub dtypes: Vec<(String, String)>,
}

impl OverviewReport {
    /// The three headline metrics in display order
    pub fn metrics(&self) -> [(&'static str, usize); 3] {
        [
            ("Rows", self.row_count),
            ("Columns", self.column_count),
            ("Missing Values", self.missing_values),
        ]
    }
}

/// Descriptive statistics, one value column per numeric field
#[derive(Debug, Clone, PartialEq)]
pub struct DescribeTable {
    pub columns: Vec<String>,
    /// Statistic label and one value per column
    pub rows: Vec<(String, Vec<f64>)>,
}

impl DescribeTable {
    pub fn value(&self, statistic: &str, column: &str) -> Option<f64> {
        let col = self.columns.iter().position(|c| c == column)?;
        self.rows
            .iter()
            .find(|(label, _)| label == statistic)
            .and_then(|(_, values)| values.get(col).copied())
    }
}

/// A chart: a grid of panels plus an optional legend
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub title: String,
    pub rows: usize,
    pub cols: usize,
    /// Relative heights of the grid rows
    pub row_weights: Vec<f32>,
    /// Relative widths of the grid columns
    pub col_weights: Vec<f32>,
    /// Row-major cells, `None` leaves the cell empty
    pub cells: Vec<Option<Panel>>,
    pub legend: Vec<LegendEntry>,
    /// Number of dataset rows the figure draws
    pub observations: usize,
}

impl Figure {
    /// One panel filling the whole figure
    pub fn single(title: impl Into<String>, panel: Panel, observations: usize) -> Self {
        Self {
            title: title.into(),
            rows: 1,
            cols: 1,
            row_weights: vec![1.0],
            col_weights: vec![1.0],
            cells: vec![Some(panel)],
            legend: Vec::new(),
            observations,
        }
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&Panel> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.cells.get(row * self.cols + col).and_then(Option::as_ref)
    }

    pub fn panels(&self) -> impl Iterator<Item = &Panel> {
        self.cells.iter().flatten()
    }

    pub fn marks(&self) -> impl Iterator<Item = &Mark> {
        self.panels().flat_map(|panel| panel.marks.iter())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub label: String,
    pub color: Rgb,
}

/// One set of axes and the marks drawn on it
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub x: Axis,
    pub y: Axis,
    pub marks: Vec<Mark>,
}

impl Panel {
    pub fn new(x: Axis, y: Axis) -> Self {
        Self {
            x,
            y,
            marks: Vec::new(),
        }
    }

    pub fn with_mark(mut self, mark: Mark) -> Self {
        self.marks.push(mark);
        self
    }

    pub fn push(&mut self, mark: Mark) {
        self.marks.push(mark);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    pub label: String,
    pub range: [f64; 2],
    /// Tick labels at 0, 1, 2.. when the axis is categorical
    pub categories: Option<Vec<String>>,
}

impl Axis {
    pub fn continuous(label: impl Into<String>, range: [f64; 2]) -> Self {
        Self {
            label: label.into(),
            range,
            categories: None,
        }
    }

    /// Category `i` sits at coordinate `i`
    pub fn categorical(label: impl Into<String>, categories: Vec<String>) -> Self {
        let upper = categories.len().max(1) as f64 - 0.5;
        Self {
            label: label.into(),
            range: [-0.5, upper],
            categories: Some(categories),
        }
    }

    /// Axis without a title, used for marginal panels
    pub fn unlabeled(range: [f64; 2]) -> Self {
        Self::continuous(String::new(), range)
    }

    pub fn is_categorical(&self) -> bool {
        self.categories.is_some()
    }
}

/// A bar along the base axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarSpec {
    pub center: f64,
    pub width: f64,
    pub height: f64,
}

/// Axis-aligned filled rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub min: [f64; 2],
    pub max: [f64; 2],
    pub color: Rgb,
}

/// Drawable primitives, all in data coordinates
#[derive(Debug, Clone, PartialEq)]
pub enum Mark {
    /// Bars rising from zero; `horizontal` bars extend along x
    Bars {
        bars: Vec<BarSpec>,
        color: Rgb,
        horizontal: bool,
    },
    Line {
        points: Vec<[f64; 2]>,
        color: Rgb,
        width: f32,
    },
    Points {
        points: Vec<[f64; 2]>,
        color: Rgb,
        radius: f32,
    },
    Polygon {
        vertices: Vec<[f64; 2]>,
        fill: Rgb,
        opacity: f32,
        stroke: Option<Rgb>,
    },
    Cells {
        cells: Vec<Cell>,
    },
    /// Filled ellipses of `size` (x and y diameters) in data units, so they
    /// scale with the axes and keep the spacing they were laid out with
    Markers {
        centers: Vec<[f64; 2]>,
        size: [f64; 2],
        color: Rgb,
    },
}

/// Segments approximating a marker outline
const MARKER_SEGMENTS: usize = 16;

/// Outline of an ellipse marker around `center`
pub fn marker_outline(center: [f64; 2], size: [f64; 2]) -> Vec<[f64; 2]> {
    let (rx, ry) = (size[0] / 2.0, size[1] / 2.0);
    (0..MARKER_SEGMENTS)
        .map(|i| {
            let angle = std::f64::consts::TAU * i as f64 / MARKER_SEGMENTS as f64;
            [center[0] + rx * angle.cos(), center[1] + ry * angle.sin()]
        })
        .collect()
}

/// Data range widened by `fraction` of its span on each side
pub fn padded_range(values: impl IntoIterator<Item = f64>, fraction: f64) -> [f64; 2] {
    match values.into_iter().filter(|v| v.is_finite()).minmax() {
        MinMaxResult::NoElements => [0.0, 1.0],
        MinMaxResult::OneElement(v) => [v - 0.5, v + 0.5],
        MinMaxResult::MinMax(lo, hi) if hi == lo => [lo - 0.5, hi + 0.5],
        MinMaxResult::MinMax(lo, hi) => {
            let span = hi - lo;
            [lo - span * fraction, hi + span * fraction]
        }
    }
}
