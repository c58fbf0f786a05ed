//! Selection resolution
//!
//! The UI keeps a [`RawInput`] between frames (the state of every picker,
//! whether or not the current mode shows it). Each interaction cycle turns it
//! into a fresh [`Selection`] carrying only what the chosen mode uses.

use std::fmt;

use crate::{EdaError, Mode};

/// One of the four numeric measurement columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NumericColumn {
    SepalLength,
    SepalWidth,
    PetalLength,
    PetalWidth,
}

impl NumericColumn {
    /// All numeric columns in schema order
    pub const ALL: [NumericColumn; 4] = [
        NumericColumn::SepalLength,
        NumericColumn::SepalWidth,
        NumericColumn::PetalLength,
        NumericColumn::PetalWidth,
    ];

    /// Column name in the dataset schema
    pub fn name(&self) -> &'static str {
        match self {
            NumericColumn::SepalLength => "sepal_length",
            NumericColumn::SepalWidth => "sepal_width",
            NumericColumn::PetalLength => "petal_length",
            NumericColumn::PetalWidth => "petal_width",
        }
    }

    /// Position in the schema
    pub fn index(&self) -> usize {
        match self {
            NumericColumn::SepalLength => 0,
            NumericColumn::SepalWidth => 1,
            NumericColumn::PetalLength => 2,
            NumericColumn::PetalWidth => 3,
        }
    }

    pub fn from_name(name: &str) -> Result<Self, EdaError> {
        NumericColumn::ALL
            .iter()
            .copied()
            .find(|column| column.name() == name.trim())
            .ok_or_else(|| {
                EdaError::InvalidSelection(format!(
                    "'{}' is not a numeric column (expected one of sepal_length, sepal_width, petal_length, petal_width)",
                    name
                ))
            })
    }
}

impl fmt::Display for NumericColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Relationship drawn in the main panel of a joint plot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum JointKind {
    #[default]
    Scatter,
    Reg,
    Hex,
    Kde,
}

impl JointKind {
    pub const ALL: [JointKind; 4] = [JointKind::Scatter, JointKind::Reg, JointKind::Hex, JointKind::Kde];

    pub fn name(&self) -> &'static str {
        match self {
            JointKind::Scatter => "scatter",
            JointKind::Reg => "reg",
            JointKind::Hex => "hex",
            JointKind::Kde => "kde",
        }
    }

    pub fn from_name(name: &str) -> Result<Self, EdaError> {
        JointKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.name() == name.trim())
            .ok_or_else(|| {
                EdaError::InvalidSelection(format!(
                    "unknown joint plot kind '{}' (expected scatter, reg, hex or kde)",
                    name
                ))
            })
    }
}

impl fmt::Display for JointKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Widget state as the user left it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawInput {
    pub mode: Mode,
    pub column: NumericColumn,
    pub x_column: NumericColumn,
    pub y_column: NumericColumn,
    pub kind: JointKind,
}

impl Default for RawInput {
    fn default() -> Self {
        Self {
            mode: Mode::Overview,
            column: NumericColumn::ALL[0],
            x_column: NumericColumn::ALL[0],
            // Index 1 so x and y start on different columns
            y_column: NumericColumn::ALL[1],
            kind: JointKind::Scatter,
        }
    }
}

/// Resolved parameters for one render call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Selection {
    Overview,
    StatisticalSummary,
    Distribution {
        column: NumericColumn,
    },
    JointPlot {
        x: NumericColumn,
        y: NumericColumn,
        kind: JointKind,
    },
    PairPlot,
    BoxenPlot {
        x: NumericColumn,
        y: NumericColumn,
    },
    StripPlot {
        x: NumericColumn,
        y: NumericColumn,
    },
    SwarmPlot {
        x: NumericColumn,
        y: NumericColumn,
    },
}

impl Selection {
    /// The mode this selection belongs to
    pub fn mode(&self) -> Mode {
        match self {
            Selection::Overview => Mode::Overview,
            Selection::StatisticalSummary => Mode::StatisticalSummary,
            Selection::Distribution { .. } => Mode::Distribution,
            Selection::JointPlot { .. } => Mode::JointPlot,
            Selection::PairPlot => Mode::PairPlot,
            Selection::BoxenPlot { .. } => Mode::BoxenPlot,
            Selection::StripPlot { .. } => Mode::StripPlot,
            Selection::SwarmPlot { .. } => Mode::SwarmPlot,
        }
    }

    /// Column pair for the grouped categorical modes
    pub fn xy(&self) -> Option<(NumericColumn, NumericColumn)> {
        match *self {
            Selection::JointPlot { x, y, .. }
            | Selection::BoxenPlot { x, y }
            | Selection::StripPlot { x, y }
            | Selection::SwarmPlot { x, y } => Some((x, y)),
            _ => None,
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::Distribution { column } => write!(f, "{} ({})", self.mode(), column),
            Selection::JointPlot { x, y, kind } => write!(f, "{} ({} vs {}, {})", self.mode(), x, y, kind),
            Selection::BoxenPlot { x, y } | Selection::StripPlot { x, y } | Selection::SwarmPlot { x, y } => {
                write!(f, "{} ({} by {})", self.mode(), y, x)
            }
            _ => write!(f, "{}", self.mode()),
        }
    }
}

/// Build the selection for `mode` from the current widget state
pub fn resolve_selection(mode: Mode, raw: &RawInput) -> Selection {
    match mode {
        Mode::Overview => Selection::Overview,
        Mode::StatisticalSummary => Selection::StatisticalSummary,
        Mode::Distribution => Selection::Distribution { column: raw.column },
        Mode::JointPlot => Selection::JointPlot {
            x: raw.x_column,
            y: raw.y_column,
            kind: raw.kind,
        },
        Mode::PairPlot => Selection::PairPlot,
        Mode::BoxenPlot => Selection::BoxenPlot {
            x: raw.x_column,
            y: raw.y_column,
        },
        Mode::StripPlot => Selection::StripPlot {
            x: raw.x_column,
            y: raw.y_column,
        },
        Mode::SwarmPlot => Selection::SwarmPlot {
            x: raw.x_column,
            y: raw.y_column,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_axes_are_distinct() {
        let raw = RawInput::default();
        assert_eq!(raw.x_column, NumericColumn::SepalLength);
        assert_eq!(raw.y_column, NumericColumn::SepalWidth);
        assert_eq!(raw.kind, JointKind::Scatter);
    }

    #[test]
    fn test_resolve_matches_mode() {
        let raw = RawInput::default();
        for mode in Mode::ALL {
            assert_eq!(resolve_selection(mode, &raw).mode(), mode);
        }
    }

    #[test]
    fn test_resolve_carries_only_used_fields() {
        let raw = RawInput {
            mode: Mode::JointPlot,
            column: NumericColumn::PetalLength,
            x_column: NumericColumn::PetalWidth,
            y_column: NumericColumn::PetalWidth,
            kind: JointKind::Hex,
        };
        assert_eq!(
            resolve_selection(Mode::Distribution, &raw),
            Selection::Distribution { column: NumericColumn::PetalLength }
        );
        assert_eq!(
            resolve_selection(Mode::JointPlot, &raw),
            Selection::JointPlot {
                x: NumericColumn::PetalWidth,
                y: NumericColumn::PetalWidth,
                kind: JointKind::Hex,
            }
        );
        assert_eq!(resolve_selection(Mode::PairPlot, &raw), Selection::PairPlot);
    }

    #[test]
    fn test_column_names_are_closed() {
        for column in NumericColumn::ALL {
            assert_eq!(NumericColumn::from_name(column.name()).unwrap(), column);
        }
        let err = NumericColumn::from_name("species").unwrap_err();
        assert!(err.to_string().contains("'species'"));
    }

    #[test]
    fn test_kind_names_are_closed() {
        let names: Vec<_> = JointKind::ALL.iter().map(|k| k.name()).collect();
        assert_eq!(names, vec!["scatter", "reg", "hex", "kde"]);
        assert!(JointKind::from_name("violin").is_err());
    }
}
