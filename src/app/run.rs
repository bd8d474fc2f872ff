//! Top-level entry point for running the dashboard as a native window.
//!
//! [`run_bench`] is the primary public API: it accepts a feed channel
//! receiver, a sink clone (for script hooks and console data injection) and a
//! configuration object, wires up controllers, and enters the eframe event
//! loop. The call blocks until the window is closed.

use eframe::egui;

use crate::config::BenchConfig;
use crate::persistence::AppStateSerde;
use crate::sink::{BenchSink, FeedCommand};

use super::main_app::MainApp;

/// Launch the workbench dashboard in a native window.
pub fn run_bench(
    rx: std::sync::mpsc::Receiver<FeedCommand>,
    sink: BenchSink,
    cfg: BenchConfig,
) -> eframe::Result<()> {
    run_bench_with_state(rx, sink, cfg, None)
}

/// Like [`run_bench`], restoring a previously saved dashboard state first.
pub fn run_bench_with_state(
    rx: std::sync::mpsc::Receiver<FeedCommand>,
    sink: BenchSink,
    mut cfg: BenchConfig,
    state: Option<AppStateSerde>,
) -> eframe::Result<()> {
    let title = cfg.title.clone();
    let mut opts = cfg
        .native_options
        .take()
        .unwrap_or_else(eframe::NativeOptions::default);

    if opts.viewport.icon.is_none() {
        if let Some(icon) = load_app_icon_svg() {
            opts.viewport = opts.viewport.clone().with_icon(icon);
        }
    }
    if opts.viewport.inner_size.is_none() {
        opts.viewport = opts
            .viewport
            .clone()
            .with_inner_size(egui::vec2(1400.0, 900.0));
    }

    let mut app = MainApp::new(rx, sink, cfg);
    if let Some(state) = state {
        app.apply_state(&state);
    }

    eframe::run_native(
        &title,
        opts,
        Box::new(|cc| {
            // Install the Phosphor icon font before creating the app.
            let mut fonts = egui::FontDefinitions::default();
            egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
            cc.egui_ctx.set_fonts(fonts);
            Ok(Box::new(app))
        }),
    )
}

/// Attempt to load the project's `icon.svg` as an [`egui::IconData`].
///
/// Returns `None` if the file does not exist or cannot be parsed/rendered.
fn load_app_icon_svg() -> Option<egui::IconData> {
    let svg_path = concat!(env!("CARGO_MANIFEST_DIR"), "/icon.svg");
    let data = std::fs::read(svg_path).ok()?;

    let opt = usvg::Options::default();
    let tree = usvg::Tree::from_data(&data, &opt).ok()?;
    let size = tree.size().to_int_size();
    if size.width() == 0 || size.height() == 0 {
        return None;
    }
    let mut pixmap = tiny_skia::Pixmap::new(size.width(), size.height())?;
    let mut canvas = pixmap.as_mut();
    resvg::render(&tree, tiny_skia::Transform::default(), &mut canvas);
    let rgba = pixmap.take();
    Some(egui::IconData {
        rgba,
        width: size.width(),
        height: size.height(),
    })
}
