//! Command line surface

use std::path::PathBuf;

use clap::Parser;
use eda_core::{EdaError, JointKind, Mode, NumericColumn, RawInput};

/// Exploratory data analysis of the Iris dataset
#[derive(Parser, Debug)]
#[command(name = "eda-dashboard", version, about)]
pub struct Args {
    /// Initial analysis mode (overview, summary, distribution, joint, pair, boxen, strip, swarm)
    #[arg(long)]
    pub mode: Option<String>,

    /// Column for the distribution plot
    #[arg(long)]
    pub column: Option<String>,

    /// X axis column
    #[arg(long)]
    pub x: Option<String>,

    /// Y axis column
    #[arg(long)]
    pub y: Option<String>,

    /// Joint plot kind (scatter, reg, hex, kde)
    #[arg(long)]
    pub kind: Option<String>,

    /// JSON settings file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write artifacts into this directory and exit without opening a window
    #[arg(long)]
    pub export: Option<PathBuf>,
}

impl Args {
    /// Widget state the dashboard starts with
    pub fn initial_input(&self) -> Result<RawInput, EdaError> {
        let mut raw = RawInput::default();
        if let Some(mode) = &self.mode {
            raw.mode = Mode::from_name(mode)?;
        }
        if let Some(column) = &self.column {
            raw.column = NumericColumn::from_name(column)?;
        }
        if let Some(x) = &self.x {
            raw.x_column = NumericColumn::from_name(x)?;
        }
        if let Some(y) = &self.y {
            raw.y_column = NumericColumn::from_name(y)?;
        }
        if let Some(kind) = &self.kind {
            raw.kind = JointKind::from_name(kind)?;
        }
        Ok(raw)
    }

    /// Modes rendered by headless export: the chosen one, or all of them
    pub fn export_modes(&self) -> Result<Vec<Mode>, EdaError> {
        match &self.mode {
            Some(mode) => Ok(vec![Mode::from_name(mode)?]),
            None => Ok(Mode::ALL.to_vec()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_flags() {
        let args = Args::try_parse_from(["eda-dashboard"]).unwrap();
        assert_eq!(args.initial_input().unwrap(), RawInput::default());
        assert_eq!(args.export_modes().unwrap(), Mode::ALL.to_vec());
    }

    #[test]
    fn test_flags_set_initial_state() {
        let args = Args::try_parse_from([
            "eda-dashboard",
            "--mode",
            "joint",
            "--x",
            "petal_length",
            "--y",
            "petal_width",
            "--kind",
            "hex",
        ])
        .unwrap();
        let raw = args.initial_input().unwrap();
        assert_eq!(raw.mode, Mode::JointPlot);
        assert_eq!(raw.x_column, NumericColumn::PetalLength);
        assert_eq!(raw.y_column, NumericColumn::PetalWidth);
        assert_eq!(raw.kind, JointKind::Hex);
        assert_eq!(args.export_modes().unwrap(), vec![Mode::JointPlot]);
    }

    #[test]
    fn test_unknown_names_are_rejected_verbatim() {
        let args = Args::try_parse_from(["eda-dashboard", "--column", "petal_area"]).unwrap();
        let err = args.initial_input().unwrap_err();
        assert!(matches!(err, EdaError::InvalidSelection(ref text) if text.contains("petal_area")));

        let args = Args::try_parse_from(["eda-dashboard", "--kind", "violin"]).unwrap();
        assert!(args.initial_input().is_err());
    }
}
