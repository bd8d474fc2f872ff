//! State persistence: save and load dashboard state to/from JSON files.
//!
//! egui types (Color32, LineStyle, MarkerShape) cannot derive serde directly,
//! so serializable mirror types are defined here and converted at the edges.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::data::figure::{AxisSettings, FigureData};
use crate::data::figures::FigureRegistry;
use crate::data::trace_look::TraceLook;
use crate::error::BenchResult;

// ---------- Serializable mirror types ----------

/// Serializable version of AxisSettings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AxisSettingsSerde {
    pub unit: Option<String>,
    pub log_scale: bool,
    pub name: Option<String>,
    pub bounds: [f64; 2],
    pub auto_fit: bool,
}

impl From<&AxisSettings> for AxisSettingsSerde {
    fn from(a: &AxisSettings) -> Self {
        Self {
            unit: a.unit.clone(),
            log_scale: a.log_scale,
            name: a.name.clone(),
            bounds: [a.bounds.0, a.bounds.1],
            auto_fit: a.auto_fit,
        }
    }
}

impl AxisSettingsSerde {
    pub fn apply_to(self, a: &mut AxisSettings) {
        a.unit = self.unit;
        a.log_scale = self.log_scale;
        a.name = self.name;
        a.bounds = (self.bounds[0], self.bounds[1]);
        a.auto_fit = self.auto_fit;
    }
}

/// Serializable version of egui_plot::LineStyle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SerLineStyle {
    Solid,
    Dashed { length: f32 },
    Dotted { spacing: f32 },
}

/// Serializable version of egui_plot::MarkerShape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SerMarkerShape {
    Circle,
    Square,
    Diamond,
    Cross,
    Plus,
    Asterisk,
    Up,
    Down,
    Left,
    Right,
}

/// Serializable version of TraceLook.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceLookSerde {
    pub color_rgba: [u8; 4],
    pub visible: bool,
    pub width: f32,
    pub show_points: bool,
    pub style: SerLineStyle,
    pub point_size: f32,
    pub marker: SerMarkerShape,
}

impl From<&TraceLook> for TraceLookSerde {
    fn from(l: &TraceLook) -> Self {
        use egui_plot::{LineStyle, MarkerShape};
        let style = match l.style {
            LineStyle::Solid => SerLineStyle::Solid,
            LineStyle::Dashed { length } => SerLineStyle::Dashed { length },
            LineStyle::Dotted { spacing } => SerLineStyle::Dotted { spacing },
        };
        let marker = match l.marker {
            MarkerShape::Circle => SerMarkerShape::Circle,
            MarkerShape::Square => SerMarkerShape::Square,
            MarkerShape::Diamond => SerMarkerShape::Diamond,
            MarkerShape::Cross => SerMarkerShape::Cross,
            MarkerShape::Plus => SerMarkerShape::Plus,
            MarkerShape::Asterisk => SerMarkerShape::Asterisk,
            MarkerShape::Up => SerMarkerShape::Up,
            MarkerShape::Down => SerMarkerShape::Down,
            MarkerShape::Left => SerMarkerShape::Left,
            MarkerShape::Right => SerMarkerShape::Right,
        };
        Self {
            color_rgba: [l.color.r(), l.color.g(), l.color.b(), l.color.a()],
            visible: l.visible,
            width: l.width,
            show_points: l.show_points,
            style,
            point_size: l.point_size,
            marker,
        }
    }
}

impl TraceLookSerde {
    pub fn into_look(self) -> TraceLook {
        use egui::Color32;
        use egui_plot::{LineStyle, MarkerShape};
        let style = match self.style {
            SerLineStyle::Solid => LineStyle::Solid,
            SerLineStyle::Dashed { length } => LineStyle::Dashed { length },
            SerLineStyle::Dotted { spacing } => LineStyle::Dotted { spacing },
        };
        let marker = match self.marker {
            SerMarkerShape::Circle => MarkerShape::Circle,
            SerMarkerShape::Square => MarkerShape::Square,
            SerMarkerShape::Diamond => MarkerShape::Diamond,
            SerMarkerShape::Cross => MarkerShape::Cross,
            SerMarkerShape::Plus => MarkerShape::Plus,
            SerMarkerShape::Asterisk => MarkerShape::Asterisk,
            SerMarkerShape::Up => MarkerShape::Up,
            SerMarkerShape::Down => MarkerShape::Down,
            SerMarkerShape::Left => MarkerShape::Left,
            SerMarkerShape::Right => MarkerShape::Right,
        };
        TraceLook {
            color: Color32::from_rgba_unmultiplied(
                self.color_rgba[0],
                self.color_rgba[1],
                self.color_rgba[2],
                self.color_rgba[3],
            ),
            visible: self.visible,
            width: self.width,
            show_points: self.show_points,
            style,
            point_size: self.point_size,
            marker,
        }
    }
}

/// Serializable trace style entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceStyleSerde {
    pub name: String,
    pub look: TraceLookSerde,
    pub offset: f64,
}

/// Serializable per-figure state (no sample data).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FigureStateSerde {
    pub number: usize,
    pub title: String,
    pub closed: bool,
    pub x_axis: AxisSettingsSerde,
    pub y_axis: AxisSettingsSerde,
    pub time_window: f64,
    pub max_points: usize,
    pub show_legend: bool,
    pub show_info_in_legend: bool,
    pub traces_style: Vec<TraceStyleSerde>,
}

impl FigureStateSerde {
    pub fn from_figure(fig: &FigureData, closed: bool) -> Self {
        Self {
            number: fig.number,
            title: fig.title.clone(),
            closed,
            x_axis: AxisSettingsSerde::from(&fig.x_axis),
            y_axis: AxisSettingsSerde::from(&fig.y_axis),
            time_window: fig.time_window,
            max_points: fig.max_points,
            show_legend: fig.show_legend,
            show_info_in_legend: fig.show_info_in_legend,
            traces_style: fig
                .trace_order
                .iter()
                .filter_map(|name| {
                    fig.traces.get(name).map(|tr| TraceStyleSerde {
                        name: name.clone(),
                        look: TraceLookSerde::from(&tr.look),
                        offset: tr.offset,
                    })
                })
                .collect(),
        }
    }

    /// Apply stored settings to a FigureData instance (data stays untouched).
    pub fn apply_to(self, fig: &mut FigureData) {
        fig.title = self.title;
        self.x_axis.apply_to(&mut fig.x_axis);
        self.y_axis.apply_to(&mut fig.y_axis);
        fig.time_window = self.time_window;
        fig.max_points = self.max_points;
        fig.show_legend = self.show_legend;
        fig.show_info_in_legend = self.show_info_in_legend;
        for style in self.traces_style {
            let tr = fig.ensure_trace(&style.name);
            tr.look = style.look.into_look();
            tr.offset = style.offset;
        }
    }
}

/// Panel visibility state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PanelVisSerde {
    pub title: String,
    pub visible: bool,
    pub detached: bool,
}

/// Full application state (for save/load).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppStateSerde {
    pub window_size: Option<[f32; 2]>,
    pub window_pos: Option<[f32; 2]>,
    pub active_figure: Option<usize>,
    pub figures: Vec<FigureStateSerde>,
    pub panels: Vec<PanelVisSerde>,
}

impl AppStateSerde {
    /// Capture the registry's figures (settings and styles, not data).
    pub fn capture_figures(&mut self, registry: &FigureRegistry) {
        self.active_figure = registry.active_number();
        self.figures = registry
            .numbers()
            .into_iter()
            .filter_map(|n| {
                registry
                    .figure(n)
                    .map(|fig| FigureStateSerde::from_figure(fig, registry.is_closed(n)))
            })
            .collect();
    }

    /// Recreate figures in a registry from the stored state.
    pub fn restore_figures(&self, registry: &mut FigureRegistry) {
        for state in &self.figures {
            let number = state.number;
            let closed = state.closed;
            state.clone().apply_to(registry.ensure_figure(number));
            if closed {
                registry.mark_closed(number);
            }
        }
        if let Some(active) = self.active_figure {
            registry.select(active);
        }
    }
}

// ---------- Public API ----------

/// Serialize the application state as pretty JSON.
pub fn state_to_json(state: &AppStateSerde) -> BenchResult<String> {
    Ok(serde_json::to_string_pretty(state)?)
}

/// Deserialize application state from JSON.
pub fn state_from_json(json: &str) -> BenchResult<AppStateSerde> {
    Ok(serde_json::from_str(json)?)
}

/// Save the application state to a JSON file at the given path.
pub fn save_state_to_path(state: &AppStateSerde, path: &Path) -> BenchResult<()> {
    std::fs::write(path, state_to_json(state)?)?;
    Ok(())
}

/// Load the application state from a JSON file at the given path.
pub fn load_state_from_path(path: &Path) -> BenchResult<AppStateSerde> {
    let txt = std::fs::read_to_string(path)?;
    state_from_json(&txt)
}
