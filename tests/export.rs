use scibench::data::export::{export_figure, render_svg, save_png, ExportFormat};
use scibench::data::figure::FigureData;
use scibench::error::BenchError;

fn small_figure() -> FigureData {
    let mut fig = FigureData::new(3);
    for (i, v) in [1.0, 4.0, 2.0].iter().enumerate() {
        fig.ingest(&scibench::sink::Sample {
            trace: "ch1".into(),
            timestamp_micros: (i as i64) * 1_000_000,
            value: *v,
        });
    }
    fig.ingest(&scibench::sink::Sample {
        trace: "ch2".into(),
        timestamp_micros: 0,
        value: 0.5,
    });
    fig.x_axis.bounds = (0.0, 2.0);
    fig.y_axis.bounds = (0.0, 5.0);
    fig
}

#[test]
fn format_detection_follows_extension() {
    use std::path::Path;
    assert_eq!(
        ExportFormat::from_path(Path::new("a/fig.CSV")).unwrap(),
        ExportFormat::Csv
    );
    assert_eq!(
        ExportFormat::from_path(Path::new("fig.svg")).unwrap(),
        ExportFormat::Svg
    );
    assert!(matches!(
        ExportFormat::from_path(Path::new("fig.pdf")),
        Err(BenchError::UnsupportedFormat(_))
    ));
    assert!(ExportFormat::from_path(Path::new("noext")).is_err());
}

#[test]
fn csv_contains_every_point_with_offset_applied() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fig.csv");

    let mut fig = small_figure();
    fig.traces.get_mut("ch1").unwrap().offset = 10.0;
    export_figure(&fig, &path).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines[0], "trace,timestamp,value");
    assert_eq!(lines.len(), 5);
    assert_eq!(lines[1], "ch1,0.000000000,11");
    assert_eq!(lines[2], "ch1,1.000000000,14");
    assert_eq!(lines[4], "ch2,0.000000000,0.5");
}

#[test]
fn svg_renders_polylines_and_legend() {
    let fig = small_figure();
    let svg = render_svg(&fig, 800, 500);

    assert!(svg.starts_with("<svg"));
    assert!(svg.ends_with("</svg>"));
    assert_eq!(svg.matches("<polyline").count(), 2);
    assert!(svg.contains("Figure 3"));
    // legend entries
    assert!(svg.contains(">ch1</text>"));
    assert!(svg.contains(">ch2</text>"));
    // trace 0 uses the first palette color
    assert!(svg.contains("#1f77b4"));
}

#[test]
fn hidden_traces_are_not_rendered() {
    let mut fig = small_figure();
    fig.traces.get_mut("ch2").unwrap().look.visible = false;
    let svg = render_svg(&fig, 800, 500);
    assert_eq!(svg.matches("<polyline").count(), 1);
    assert!(!svg.contains(">ch2</text>"));
}

#[test]
fn png_has_the_requested_dimensions() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fig.png");

    let fig = small_figure();
    save_png(&fig, &path, 320, 200).unwrap();

    let img = image::open(&path).unwrap();
    assert_eq!(img.width(), 320);
    assert_eq!(img.height(), 200);
}

#[test]
fn degenerate_bounds_still_render() {
    let mut fig = FigureData::new(1);
    fig.ingest(&scibench::sink::Sample {
        trace: "flat".into(),
        timestamp_micros: 0,
        value: 1.0,
    });
    // bounds never fitted: (0,1) defaults are fine, but force a degenerate pair
    fig.x_axis.bounds = (5.0, 5.0);
    fig.y_axis.bounds = (1.0, 1.0);
    let svg = render_svg(&fig, 400, 300);
    assert!(svg.contains("<polyline"));
}
