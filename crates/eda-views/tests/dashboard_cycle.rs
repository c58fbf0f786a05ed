//! End-to-end cycles through provider, selection and renderer

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use arrow::record_batch::RecordBatch;
use eda_core::{resolve_selection, EdaError, JointKind, Mode, NumericColumn, RawInput, Selection};
use eda_data::{DataError, DatasetProvider, DatasetSource, EmbeddedIris};
use eda_views::{figure_to_svg, render, run_cycle, Artifact, ExportOptions, Figure, Mark};

fn figure(artifact: Artifact) -> Figure {
    match artifact {
        Artifact::Figure(figure) => figure,
        other => panic!("expected a figure, got {}", other.kind_name()),
    }
}

fn raw(mode: Mode) -> RawInput {
    RawInput {
        mode,
        ..RawInput::default()
    }
}

#[test]
fn test_render_is_idempotent_for_every_mode() {
    let provider = DatasetProvider::iris();
    let data = provider.load().unwrap();
    for mode in Mode::ALL {
        let selection = resolve_selection(mode, &raw(mode));
        let first = render(mode, &selection, &data).unwrap();
        let second = render(mode, &selection, &data).unwrap();
        assert_eq!(first, second, "{mode}");
    }
}

#[test]
fn test_overview_metrics() {
    let Artifact::Overview(report) = run_cycle(&DatasetProvider::iris(), &raw(Mode::Overview)).unwrap() else {
        panic!("expected an overview");
    };
    assert_eq!(report.row_count, 150);
    assert_eq!(report.column_count, 5);
    assert_eq!(report.missing_values, 0);
    assert_eq!(report.dtypes.len(), 5);
}

#[test]
fn test_statistical_summary_values() {
    let artifact = run_cycle(&DatasetProvider::iris(), &raw(Mode::StatisticalSummary)).unwrap();
    let Artifact::Summary(table) = artifact else {
        panic!("expected a summary");
    };
    assert_eq!(table.rows.len(), 8);
    assert_eq!(table.columns.len(), 4);

    let labels: Vec<&str> = table.rows.iter().map(|(label, _)| label.as_str()).collect();
    assert_eq!(labels, ["count", "mean", "std", "min", "25%", "50%", "75%", "max"]);

    let close = |stat: &str, col: &str, expected: f64| {
        let value = table.value(stat, col).unwrap();
        assert!((value - expected).abs() < 1e-4, "{stat} {col}: {value}");
    };
    close("count", "sepal_length", 150.0);
    close("mean", "sepal_length", 5.843333);
    close("std", "sepal_length", 0.828066);
    close("50%", "sepal_length", 5.8);
    close("mean", "petal_length", 3.758);
    close("25%", "petal_width", 0.3);
}

#[test]
fn test_every_joint_kind_renders() {
    let provider = DatasetProvider::iris();
    for kind in JointKind::ALL {
        let input = RawInput {
            mode: Mode::JointPlot,
            x_column: NumericColumn::SepalLength,
            y_column: NumericColumn::PetalLength,
            kind,
            ..RawInput::default()
        };
        let figure = figure(run_cycle(&provider, &input).unwrap());
        assert_eq!((figure.rows, figure.cols), (2, 2), "{kind}");
        assert!(figure.cell(1, 0).is_some_and(|main| !main.marks.is_empty()), "{kind}");
    }
}

#[test]
fn test_joint_plot_with_same_axes() {
    let input = RawInput {
        mode: Mode::JointPlot,
        x_column: NumericColumn::PetalWidth,
        y_column: NumericColumn::PetalWidth,
        kind: JointKind::Kde,
        ..RawInput::default()
    };
    assert!(run_cycle(&DatasetProvider::iris(), &input).is_ok());
}

struct CountingSource {
    reads: Arc<AtomicUsize>,
}

impl DatasetSource for CountingSource {
    fn name(&self) -> &str {
        "counting"
    }

    fn read(&self) -> Result<RecordBatch, DataError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        EmbeddedIris::new().read()
    }
}

struct BrokenSource;

impl DatasetSource for BrokenSource {
    fn name(&self) -> &str {
        "broken"
    }

    fn read(&self) -> Result<RecordBatch, DataError> {
        Err(DataError::Csv("truncated record".to_string()))
    }
}

#[test]
fn test_provider_reads_once_across_cycles() {
    let reads = Arc::new(AtomicUsize::new(0));
    let provider = DatasetProvider::new(CountingSource {
        reads: Arc::clone(&reads),
    });
    let first = provider.load().unwrap();
    for mode in Mode::ALL {
        run_cycle(&provider, &raw(mode)).unwrap();
    }
    let second = provider.load().unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(reads.load(Ordering::SeqCst), 1);
    assert_eq!(provider.source_name(), "counting");
}

#[test]
fn test_failing_source_surfaces_data_unavailable() {
    let provider = DatasetProvider::new(BrokenSource);
    for mode in Mode::ALL {
        let err = run_cycle(&provider, &raw(mode)).unwrap_err();
        assert!(matches!(err, EdaError::DataUnavailable { .. }), "{mode}: {err}");
    }
    assert!(!provider.is_loaded());
}

#[test]
fn test_unknown_column_name_is_rejected() {
    let err = NumericColumn::from_name("species").unwrap_err();
    assert!(matches!(err, EdaError::InvalidSelection(ref text) if text.contains("species")));
}

#[test]
fn test_petal_length_distribution() {
    let input = RawInput {
        mode: Mode::Distribution,
        column: NumericColumn::PetalLength,
        ..RawInput::default()
    };
    let figure = figure(run_cycle(&DatasetProvider::iris(), &input).unwrap());

    let total: f64 = figure
        .marks()
        .filter_map(|mark| match mark {
            Mark::Bars { bars, .. } => Some(bars.iter().map(|bar| bar.height).sum::<f64>()),
            _ => None,
        })
        .sum();
    assert_eq!(total, 150.0);
    assert!(figure.marks().any(|mark| matches!(mark, Mark::Line { .. })));
}

#[test]
fn test_boxen_draws_every_row() {
    let input = RawInput {
        mode: Mode::BoxenPlot,
        x_column: NumericColumn::SepalLength,
        y_column: NumericColumn::PetalWidth,
        ..RawInput::default()
    };
    let figure = figure(run_cycle(&DatasetProvider::iris(), &input).unwrap());
    assert_eq!(figure.observations, 150);
    assert!(figure.marks().any(|mark| matches!(mark, Mark::Polygon { .. })));
}

#[test]
fn test_swarm_markers_do_not_overlap_as_drawn() {
    let provider = DatasetProvider::iris();
    for (x, y) in [
        (NumericColumn::SepalLength, NumericColumn::SepalWidth),
        (NumericColumn::PetalWidth, NumericColumn::PetalLength),
    ] {
        let input = RawInput {
            mode: Mode::SwarmPlot,
            x_column: x,
            y_column: y,
            ..RawInput::default()
        };
        let figure = figure(run_cycle(&provider, &input).unwrap());
        let panel = figure.cell(0, 0).unwrap();
        let Some(Mark::Markers { centers, size, .. }) = panel.marks.first() else {
            panic!("expected markers");
        };
        assert_eq!(centers.len(), 150);

        // Ellipses of equal size are disjoint when their centers are at
        // least one diameter apart once each axis is scaled by its diameter
        for (i, a) in centers.iter().enumerate() {
            for b in &centers[i + 1..] {
                let dx = (a[0] - b[0]) / size[0];
                let dy = (a[1] - b[1]) / size[1];
                assert!(dx.hypot(dy) >= 1.0 - 1e-9, "{x} by {y}: {a:?} and {b:?} overlap");
            }
        }

        let categories = panel.x.categories.as_ref().unwrap().len();
        assert!(centers.iter().all(|c| c[0] > -0.5 && c[0] < categories as f64 - 0.5));
    }
}

#[test]
fn test_strip_jitter_is_bounded_and_repeatable() {
    let data = DatasetProvider::iris().load().unwrap();
    let selection = Selection::StripPlot {
        x: NumericColumn::PetalWidth,
        y: NumericColumn::SepalLength,
    };
    let first = figure(render(Mode::StripPlot, &selection, &data).unwrap());
    let second = figure(render(Mode::StripPlot, &selection, &data).unwrap());
    assert_eq!(first, second);

    let Some(Mark::Points { points, .. }) = first.marks().next() else {
        panic!("expected points");
    };
    for point in points {
        assert!((point[0] - point[0].round()).abs() <= 0.1 + 1e-12);
    }
}

#[test]
fn test_svg_export_for_every_chart_mode() {
    let provider = DatasetProvider::iris();
    for mode in Mode::ALL.into_iter().filter(Mode::is_chart) {
        let figure = figure(run_cycle(&provider, &raw(mode)).unwrap());
        let svg = figure_to_svg(&figure, ExportOptions::default()).unwrap();
        assert!(svg.contains("<svg"), "{mode}");
        assert!(svg.trim_end().ends_with("</svg>"), "{mode}");
    }
}
