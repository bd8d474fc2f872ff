//! The dashboard application: shared frame context, the eframe app and the
//! run entry points.

pub mod main_app;
pub mod plot;
pub mod run;

pub use main_app::MainApp;
pub use run::{run_bench, run_bench_with_state};

use crate::console::ConsoleState;
use crate::data::figures::FigureRegistry;
use crate::script::ScriptRegistry;
use crate::sink::BenchSink;
use crate::theme::ColorTheme;

/// Side-effect requests panels hand back to the app layer, consumed once per
/// frame after panel rendering.
#[derive(Default)]
pub struct PendingRequests {
    /// Open a save dialog for this figure.
    pub save_figure_dialog: Option<usize>,
    /// Figures whose detached windows should open.
    pub detach_figures: Vec<usize>,
    /// Persist the script registry to disk.
    pub save_scripts: bool,
    /// Persist the dashboard layout to the default state file.
    pub save_layout: bool,
    /// Take a window screenshot (interactive save).
    pub screenshot: bool,
    /// Run this script with an empty batch.
    pub run_script: Option<String>,
}

/// Everything a panel may touch during one frame.
pub struct BenchContext<'a> {
    pub figures: &'a mut FigureRegistry,
    pub scripts: &'a mut ScriptRegistry,
    pub console: &'a mut ConsoleState,
    pub sink: &'a BenchSink,
    pub theme: ColorTheme,
    pub requests: &'a mut PendingRequests,
}
