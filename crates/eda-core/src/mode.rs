//! Analysis modes offered by the primary selector

use std::fmt;
use std::str::FromStr;

use crate::EdaError;

/// The analysis mode picked from the side panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    #[default]
    Overview,
    StatisticalSummary,
    Distribution,
    JointPlot,
    PairPlot,
    BoxenPlot,
    StripPlot,
    SwarmPlot,
}

/// Secondary control shown for a mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// Single numeric column picker
    Column,
    /// X axis numeric column picker
    XColumn,
    /// Y axis numeric column picker
    YColumn,
    /// Joint plot kind picker
    Kind,
}

impl Mode {
    /// All modes in menu order
    pub const ALL: [Mode; 8] = [
        Mode::Overview,
        Mode::StatisticalSummary,
        Mode::Distribution,
        Mode::JointPlot,
        Mode::PairPlot,
        Mode::BoxenPlot,
        Mode::StripPlot,
        Mode::SwarmPlot,
    ];

    /// Menu label
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Overview => "Dataset Overview",
            Mode::StatisticalSummary => "Statistical Summary",
            Mode::Distribution => "Distribution Plot",
            Mode::JointPlot => "Joint Plot",
            Mode::PairPlot => "Pair Plot",
            Mode::BoxenPlot => "Boxen Plot",
            Mode::StripPlot => "Strip Plot",
            Mode::SwarmPlot => "Swarm Plot",
        }
    }

    /// Section heading shown above the artifact
    pub fn heading(&self) -> &'static str {
        match self {
            Mode::Overview => "📄 Dataset Preview",
            Mode::StatisticalSummary => "📊 Descriptive Statistics",
            Mode::Distribution => "📈 Distribution Plot",
            Mode::JointPlot => "🔗 Joint Plot",
            Mode::PairPlot => "🔀 Pair Plot (Feature Relationships)",
            Mode::BoxenPlot => "📦 Boxen Plot",
            Mode::StripPlot => "📌 Strip Plot",
            Mode::SwarmPlot => "🐝 Swarm Plot",
        }
    }

    /// Short name used on the command line and for export file names
    pub fn slug(&self) -> &'static str {
        match self {
            Mode::Overview => "overview",
            Mode::StatisticalSummary => "summary",
            Mode::Distribution => "distribution",
            Mode::JointPlot => "joint",
            Mode::PairPlot => "pair",
            Mode::BoxenPlot => "boxen",
            Mode::StripPlot => "strip",
            Mode::SwarmPlot => "swarm",
        }
    }

    /// Parse a slug or a menu label
    pub fn from_name(name: &str) -> Result<Self, EdaError> {
        let wanted = name.trim();
        Mode::ALL
            .iter()
            .copied()
            .find(|mode| mode.slug() == wanted || mode.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| EdaError::InvalidSelection(format!("unknown analysis mode '{}'", name)))
    }

    /// Secondary controls presented for this mode, in display order
    pub fn controls(&self) -> &'static [Control] {
        match self {
            Mode::Overview | Mode::StatisticalSummary | Mode::PairPlot => &[],
            Mode::Distribution => &[Control::Column],
            Mode::JointPlot => &[Control::XColumn, Control::YColumn, Control::Kind],
            Mode::BoxenPlot | Mode::StripPlot | Mode::SwarmPlot => {
                &[Control::XColumn, Control::YColumn]
            }
        }
    }

    /// Whether the artifact is a chart rather than a table
    pub fn is_chart(&self) -> bool {
        !matches!(self, Mode::Overview | Mode::StatisticalSummary)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Mode {
    type Err = EdaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mode::from_name(s)
    }
}
