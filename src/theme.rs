//! Visual themes for the dashboard and console.

use eframe::egui::{Color32, Context, Visuals};
use once_cell::sync::Lazy;
use std::sync::Mutex;

// Global palette used for trace color allocation. Updated whenever a theme is
// applied; TraceLook::alloc_color consults it.
static GLOBAL_PALETTE: Lazy<Mutex<Vec<Color32>>> =
    Lazy::new(|| Mutex::new(ColorTheme::Dark.trace_colors()));

/// Get a copy of the current global trace color palette.
pub fn global_palette() -> Vec<Color32> {
    GLOBAL_PALETTE.lock().unwrap().clone()
}

pub(crate) fn set_global_palette(new: Vec<Color32>) {
    *GLOBAL_PALETTE.lock().unwrap() = new;
}

/// Console text colors for a theme.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConsoleColors {
    pub background: Color32,
    pub foreground: Color32,
    pub error: Color32,
    pub system: Color32,
}

/// Visual theme for the whole UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorTheme {
    Dark,
    Light,
}

impl Default for ColorTheme {
    fn default() -> Self {
        ColorTheme::Dark
    }
}

impl ColorTheme {
    /// Trace colors allocated to new traces, in order.
    pub fn trace_colors(&self) -> Vec<Color32> {
        // the familiar ten-color plotting palette reads well on both themes
        vec![
            Color32::from_rgb(31, 119, 180),
            Color32::from_rgb(255, 127, 14),
            Color32::from_rgb(44, 160, 44),
            Color32::from_rgb(214, 39, 40),
            Color32::from_rgb(148, 103, 189),
            Color32::from_rgb(140, 86, 75),
            Color32::from_rgb(227, 119, 194),
            Color32::from_rgb(127, 127, 127),
            Color32::from_rgb(188, 189, 34),
            Color32::from_rgb(23, 190, 207),
        ]
    }

    pub fn console_colors(&self) -> ConsoleColors {
        match self {
            ColorTheme::Dark => ConsoleColors {
                background: Color32::from_rgb(0x1e, 0x1e, 0x1e),
                foreground: Color32::from_rgb(0xdc, 0xdc, 0xdc),
                error: Color32::from_rgb(0xd1, 0x69, 0x69),
                system: Color32::from_rgb(0x88, 0x88, 0x88),
            },
            ColorTheme::Light => ConsoleColors {
                background: Color32::WHITE,
                foreground: Color32::BLACK,
                error: Color32::from_rgb(0xa3, 0x15, 0x15),
                system: Color32::from_rgb(0x66, 0x66, 0x66),
            },
        }
    }

    /// Apply the theme to the egui context and refresh the global palette.
    pub fn apply(&self, ctx: &Context) {
        match self {
            ColorTheme::Dark => ctx.set_visuals(Visuals::dark()),
            ColorTheme::Light => ctx.set_visuals(Visuals::light()),
        }
        set_global_palette(self.trace_colors());
    }
}
