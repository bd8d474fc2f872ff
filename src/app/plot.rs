//! Rendering a figure into an egui_plot widget; shared by the central panel
//! and detached figure windows.

use egui_plot::{Legend, Line, Plot, PlotBounds, PlotPoints, Points};

use crate::config::FeatureFlags;
use crate::data::axis_format::{NumericFormatter, TimestampFormatter};
use crate::data::figure::FigureData;

/// Draw `fig` into `ui`. While live, the view is pinned to the figure's
/// rolling window; while paused the user may pan and zoom freely.
pub fn figure_plot(ui: &mut egui::Ui, fig: &mut FigureData, features: &FeatureFlags, id: &str) {
    let ts_fmt = TimestampFormatter::default();
    let x_bounds = fig.x_axis.bounds;
    let y_log = fig.y_axis.log_scale;

    let y_label = match (&fig.y_axis.unit, y_log) {
        (Some(u), false) => format!("Value ({u})"),
        (Some(u), true) => format!("log10(Value) ({u})"),
        (None, true) => "log10(Value)".to_string(),
        (None, false) => "Value".to_string(),
    };

    let mut plot = Plot::new(id.to_string())
        .allow_scroll(false)
        .allow_zoom(true)
        .allow_boxed_zoom(true)
        .show_grid(features.grid)
        .x_axis_formatter(move |x, _range| ts_fmt.format(x.value, x_bounds))
        .y_axis_formatter(|y, _range| NumericFormatter::default().format(y.value, 2, y.step_size))
        .y_axis_label(y_label)
        .x_axis_label(fig.x_axis.name.clone().unwrap_or_default());

    if features.legend && fig.show_legend {
        plot = plot.legend(Legend::default());
    }

    let paused = fig.paused;
    plot.show(ui, |plot_ui| {
        if !paused {
            let (x0, x1) = fig.x_axis.bounds;
            let (y0, y1) = fig.y_axis.bounds;
            plot_ui.set_plot_bounds(PlotBounds::from_min_max(
                [x0, map_y_bound(y0, y_log)],
                [x1, map_y_bound(y1, y_log)],
            ));
        }

        for name in &fig.trace_order {
            let Some(tr) = fig.traces.get(name) else {
                continue;
            };
            if !tr.look.visible {
                continue;
            }
            let data: Vec<[f64; 2]> = tr
                .display(paused)
                .iter()
                .filter_map(|p| {
                    let y = p[1] + tr.offset;
                    if y_log && y <= 0.0 {
                        return None;
                    }
                    Some([p[0], map_y(y, y_log)])
                })
                .collect();
            if data.is_empty() {
                continue;
            }

            let legend_name = if fig.show_info_in_legend && !tr.info.is_empty() {
                format!("{} ({})", name, tr.info)
            } else {
                name.clone()
            };
            let points: PlotPoints = data.clone().into();
            plot_ui.line(
                Line::new(legend_name, points)
                    .color(tr.look.color)
                    .width(tr.look.width)
                    .style(tr.look.style),
            );
            if tr.look.show_points {
                plot_ui.points(
                    Points::new("", data)
                        .radius(tr.look.point_size)
                        .shape(tr.look.marker)
                        .color(tr.look.color),
                );
            }
        }
    });
}

fn map_y(y: f64, log: bool) -> f64 {
    if log {
        y.log10()
    } else {
        y
    }
}

// Bounds must stay finite; clamp instead of dropping like data points do.
fn map_y_bound(y: f64, log: bool) -> f64 {
    if log {
        y.max(1e-12).log10()
    } else {
        y
    }
}
