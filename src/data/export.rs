//! Figure export: CSV, SVG, PNG (rasterized from the SVG), optional Parquet.
//!
//! The SVG renderer draws the figure the way the save dialog advertises it:
//! axes frame, ticks, and one polyline per visible trace in its configured
//! color and width. PNG export parses that SVG back through usvg and renders
//! it with resvg onto a tiny-skia pixmap.

use std::fmt::Write as _;
use std::io::Write as _;
use std::path::Path;

use crate::data::axis_format::{NumericFormatter, TimestampFormatter};
use crate::data::figure::FigureData;
use crate::error::{BenchError, BenchResult};

/// Supported figure export formats, detected from the target file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Svg,
    Png,
    #[cfg(feature = "parquet")]
    Parquet,
}

impl ExportFormat {
    /// Detect the format from a path's extension (case-insensitive).
    pub fn from_path(path: &Path) -> BenchResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "svg" => Ok(ExportFormat::Svg),
            "png" => Ok(ExportFormat::Png),
            #[cfg(feature = "parquet")]
            "parquet" => Ok(ExportFormat::Parquet),
            other => Err(BenchError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Default pixel size for rendered figure exports.
pub const DEFAULT_RENDER_SIZE: (u32, u32) = (800, 500);

/// Export `fig` to `path`, choosing the format from the extension.
pub fn export_figure(fig: &FigureData, path: &Path) -> BenchResult<()> {
    match ExportFormat::from_path(path)? {
        ExportFormat::Csv => save_csv(fig, path),
        ExportFormat::Svg => save_svg(fig, path),
        ExportFormat::Png => {
            let (w, h) = DEFAULT_RENDER_SIZE;
            save_png(fig, path, w, h)
        }
        #[cfg(feature = "parquet")]
        ExportFormat::Parquet => {
            save_parquet(fig, path).map_err(|e| BenchError::Export(e.to_string()))
        }
    }
}

/// Write the figure's displayed points as `trace,timestamp,value` rows.
/// Trace offsets are baked into the written values.
pub fn save_csv(fig: &FigureData, path: &Path) -> BenchResult<()> {
    let mut f = std::fs::File::create(path)?;
    writeln!(f, "trace,timestamp,value")?;
    for name in &fig.trace_order {
        if let Some(tr) = fig.traces.get(name) {
            for p in tr.display(fig.paused).iter() {
                writeln!(f, "{},{:.9},{}", name, p[0], p[1] + tr.offset)?;
            }
        }
    }
    Ok(())
}

/// Write the figure as a standalone SVG document.
pub fn save_svg(fig: &FigureData, path: &Path) -> BenchResult<()> {
    let (w, h) = DEFAULT_RENDER_SIZE;
    std::fs::write(path, render_svg(fig, w, h))?;
    Ok(())
}

/// Rasterize the figure's SVG rendering and save it as PNG.
pub fn save_png(fig: &FigureData, path: &Path, width: u32, height: u32) -> BenchResult<()> {
    let svg = render_svg(fig, width, height);
    let opt = usvg::Options::default();
    let tree = usvg::Tree::from_data(svg.as_bytes(), &opt)
        .map_err(|e| BenchError::Render(e.to_string()))?;
    let mut pixmap = tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| BenchError::Render("zero-sized pixmap".to_string()))?;
    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

    let mut out = image::RgbaImage::new(width, height);
    for (i, px) in pixmap.pixels().iter().enumerate() {
        let x = (i as u32) % width;
        let y = (i as u32) / width;
        let c = px.demultiply();
        out.put_pixel(x, y, image::Rgba([c.red(), c.green(), c.blue(), c.alpha()]));
    }
    out.save(path)
        .map_err(|e| BenchError::Export(e.to_string()))?;
    Ok(())
}

/// Render the figure to SVG markup at the given pixel size.
pub fn render_svg(fig: &FigureData, width: u32, height: u32) -> String {
    const MARGIN_L: f64 = 60.0;
    const MARGIN_R: f64 = 20.0;
    const MARGIN_T: f64 = 30.0;
    const MARGIN_B: f64 = 40.0;

    let plot_w = width as f64 - MARGIN_L - MARGIN_R;
    let plot_h = height as f64 - MARGIN_T - MARGIN_B;

    let (x0, x1) = non_degenerate(fig.x_axis.bounds);
    let (y0, y1) = non_degenerate(fig.y_axis.bounds);

    let to_px = |p: [f64; 2]| -> (f64, f64) {
        let px = MARGIN_L + (p[0] - x0) / (x1 - x0) * plot_w;
        let py = MARGIN_T + (1.0 - (p[1] - y0) / (y1 - y0)) * plot_h;
        (px, py)
    };

    let mut svg = String::new();
    let _ = write!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = width,
        h = height
    );
    let _ = write!(
        svg,
        r#"<rect x="0" y="0" width="{}" height="{}" fill="white"/>"#,
        width, height
    );
    // title
    let _ = write!(
        svg,
        r#"<text x="{:.1}" y="20" font-family="sans-serif" font-size="14" text-anchor="middle">{}</text>"#,
        MARGIN_L + plot_w / 2.0,
        xml_escape(&fig.title)
    );
    // axes frame
    let _ = write!(
        svg,
        r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="none" stroke="black" stroke-width="1"/>"#,
        MARGIN_L, MARGIN_T, plot_w, plot_h
    );

    // ticks
    let ts_fmt = TimestampFormatter::default();
    let num_fmt = NumericFormatter::default();
    const TICKS: usize = 5;
    for i in 0..=TICKS {
        let frac = i as f64 / TICKS as f64;

        let xv = x0 + frac * (x1 - x0);
        let (px, _) = to_px([xv, y0]);
        let _ = write!(
            svg,
            r#"<line x1="{px:.1}" y1="{y1:.1}" x2="{px:.1}" y2="{y2:.1}" stroke="black"/>"#,
            px = px,
            y1 = MARGIN_T + plot_h,
            y2 = MARGIN_T + plot_h + 5.0
        );
        let _ = write!(
            svg,
            r#"<text x="{:.1}" y="{:.1}" font-family="sans-serif" font-size="10" text-anchor="middle">{}</text>"#,
            px,
            MARGIN_T + plot_h + 18.0,
            xml_escape(&ts_fmt.format(xv, (x0, x1)))
        );

        let yv = y0 + frac * (y1 - y0);
        let (_, py) = to_px([x0, yv]);
        let _ = write!(
            svg,
            r#"<line x1="{x1:.1}" y1="{py:.1}" x2="{x2:.1}" y2="{py:.1}" stroke="black"/>"#,
            x1 = MARGIN_L - 5.0,
            py = py,
            x2 = MARGIN_L
        );
        let _ = write!(
            svg,
            r#"<text x="{:.1}" y="{:.1}" font-family="sans-serif" font-size="10" text-anchor="end">{}</text>"#,
            MARGIN_L - 8.0,
            py + 3.0,
            xml_escape(&num_fmt.format(yv, 2, (y1 - y0) / TICKS as f64))
        );
    }

    // trace polylines, clipped to the frame
    let _ = write!(
        svg,
        r#"<clipPath id="plotclip"><rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}"/></clipPath>"#,
        MARGIN_L, MARGIN_T, plot_w, plot_h
    );
    for name in &fig.trace_order {
        let Some(tr) = fig.traces.get(name) else {
            continue;
        };
        if !tr.look.visible {
            continue;
        }
        let mut points = String::new();
        for p in tr.display(fig.paused).iter() {
            let (px, py) = to_px([p[0], p[1] + tr.offset]);
            let _ = write!(points, "{:.2},{:.2} ", px, py);
        }
        if points.is_empty() {
            continue;
        }
        let c = tr.look.color;
        let _ = write!(
            svg,
            r##"<polyline points="{}" fill="none" stroke="#{:02x}{:02x}{:02x}" stroke-width="{:.1}" clip-path="url(#plotclip)"/>"##,
            points.trim_end(),
            c.r(),
            c.g(),
            c.b(),
            tr.look.width
        );
    }

    // legend
    if fig.show_legend {
        let mut ly = MARGIN_T + 14.0;
        for name in &fig.trace_order {
            let Some(tr) = fig.traces.get(name) else {
                continue;
            };
            if !tr.look.visible {
                continue;
            }
            let c = tr.look.color;
            let _ = write!(
                svg,
                r##"<line x1="{x1:.1}" y1="{y:.1}" x2="{x2:.1}" y2="{y:.1}" stroke="#{r:02x}{g:02x}{b:02x}" stroke-width="2"/>"##,
                x1 = MARGIN_L + 8.0,
                x2 = MARGIN_L + 28.0,
                y = ly - 3.0,
                r = c.r(),
                g = c.g(),
                b = c.b()
            );
            let _ = write!(
                svg,
                r#"<text x="{:.1}" y="{:.1}" font-family="sans-serif" font-size="11">{}</text>"#,
                MARGIN_L + 34.0,
                ly,
                xml_escape(name)
            );
            ly += 14.0;
        }
    }

    svg.push_str("</svg>");
    svg
}

fn non_degenerate(bounds: (f64, f64)) -> (f64, f64) {
    if bounds.1 > bounds.0 && bounds.0.is_finite() && bounds.1.is_finite() {
        bounds
    } else {
        (0.0, 1.0)
    }
}

fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

#[cfg(feature = "parquet")]
pub fn save_parquet(fig: &FigureData, path: &Path) -> parquet::errors::Result<()> {
    use arrow_array::{Float64Array, RecordBatch, StringArray};
    use arrow_schema::{DataType, Field, Schema};
    use parquet::arrow::arrow_writer::ArrowWriter;
    use parquet::file::properties::WriterProperties;

    let mut trace_col: Vec<String> = Vec::new();
    let mut ts_col: Vec<f64> = Vec::new();
    let mut val_col: Vec<f64> = Vec::new();
    for name in &fig.trace_order {
        if let Some(tr) = fig.traces.get(name) {
            for p in tr.display(fig.paused).iter() {
                trace_col.push(name.clone());
                ts_col.push(p[0]);
                val_col.push(p[1] + tr.offset);
            }
        }
    }
    let schema = Schema::new(vec![
        Field::new("trace", DataType::Utf8, false),
        Field::new("timestamp", DataType::Float64, false),
        Field::new("value", DataType::Float64, false),
    ]);
    let batch = RecordBatch::try_new(
        std::sync::Arc::new(schema.clone()),
        vec![
            std::sync::Arc::new(StringArray::from(trace_col)) as _,
            std::sync::Arc::new(Float64Array::from(ts_col)) as _,
            std::sync::Arc::new(Float64Array::from(val_col)) as _,
        ],
    )
    .expect("schema/column mismatch");
    let file = std::fs::File::create(path)?;
    let props = WriterProperties::builder().build();
    let mut writer = ArrowWriter::try_new(file, std::sync::Arc::new(schema), Some(props))?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}
