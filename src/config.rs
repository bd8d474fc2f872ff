//! Configuration types for the dashboard.

use crate::controllers::{FigureController, UiActionController, WindowController};
use crate::data::hotkeys::Hotkeys;
use crate::theme::ColorTheme;

/// Toggle individual UI features on or off.
///
/// All features default to `true`. Disable features to create a minimal,
/// focused dashboard for an embedded bench display.
#[derive(Clone, Debug)]
pub struct FeatureFlags {
    /// Show the top menu bar.
    pub top_bar: bool,
    /// Enable the Figure Manager panel.
    pub figures: bool,
    /// Enable the Traces (plot editing) panel.
    pub traces: bool,
    /// Enable the command console panel.
    pub console: bool,
    /// Enable the Scripts panel.
    pub scripts: bool,
    /// Enable the Export panel.
    pub export: bool,
    /// Show the plot legend.
    pub legend: bool,
    /// Show the plot grid.
    pub grid: bool,
    /// Show the pause/resume button.
    pub pause_resume: bool,
    /// Show the clear-all button.
    pub clear_all: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            top_bar: true,
            figures: true,
            traces: true,
            console: true,
            scripts: true,
            export: true,
            legend: true,
            grid: true,
            pause_resume: true,
            clear_all: true,
        }
    }
}

/// Configuration for automatic axis fitting behaviour.
#[derive(Clone, Debug)]
pub struct AutoFitConfig {
    /// When `true`, the Y axis follows the data each frame. Manual zoom
    /// disables it; the `fit` command or button re-enables it.
    pub auto_fit_to_view: bool,
}

impl Default for AutoFitConfig {
    fn default() -> Self {
        Self {
            auto_fit_to_view: true,
        }
    }
}

/// Optional programmatic controllers attached to the dashboard.
#[derive(Clone, Default)]
pub struct Controllers {
    pub window: Option<WindowController>,
    pub ui_action: Option<UiActionController>,
    pub figures: Option<FigureController>,
}

/// Top-level configuration for the workbench dashboard.
#[derive(Clone)]
pub struct BenchConfig {
    // ── data ─────────────────────────────────────────────────────────────────
    /// Rolling time window in seconds.
    pub time_window_secs: f64,
    /// Maximum number of points retained per trace.
    pub max_points: usize,
    /// Optional unit label for the Y axis (e.g. "V", "°C").
    pub y_unit: Option<String>,
    /// Show the Y axis in log10 scale.
    pub y_log: bool,

    // ── window / chrome ──────────────────────────────────────────────────────
    /// Native window title.
    pub title: String,
    /// Optional eframe native-window options.
    pub native_options: Option<eframe::NativeOptions>,

    // ── appearance / behavior ────────────────────────────────────────────────
    pub features: FeatureFlags,
    pub theme: ColorTheme,
    pub auto_fit: AutoFitConfig,

    /// Optional hotkeys override; `None` loads the saved bindings (or the
    /// defaults).
    pub hotkeys: Option<Hotkeys>,

    /// External controllers for programmatic interaction.
    pub controllers: Controllers,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            time_window_secs: 10.0,
            max_points: 10_000,
            y_unit: None,
            y_log: false,

            title: "scibench".to_string(),
            native_options: None,

            features: FeatureFlags::default(),
            theme: ColorTheme::default(),
            auto_fit: AutoFitConfig::default(),

            hotkeys: None,
            controllers: Controllers::default(),
        }
    }
}
