//! TraceLook: visual styling for plot traces.

use eframe::egui;
use egui_plot::{LineStyle, MarkerShape};

/// The visual presentation of a trace (color, visibility, line style, markers).
#[derive(Debug, Clone)]
pub struct TraceLook {
    pub color: egui::Color32,
    pub visible: bool,
    pub width: f32,
    pub show_points: bool,
    pub style: LineStyle,
    pub point_size: f32,
    pub marker: MarkerShape,
}

impl Default for TraceLook {
    fn default() -> Self {
        Self {
            color: egui::Color32::GRAY,
            visible: true,
            width: 1.5,
            show_points: false,
            style: LineStyle::Solid,
            point_size: 4.0,
            marker: MarkerShape::Circle,
        }
    }
}

impl TraceLook {
    /// Create a new TraceLook with a color allocated based on the trace index.
    pub fn new(index: usize) -> Self {
        Self {
            color: Self::alloc_color(index),
            ..Default::default()
        }
    }

    /// Allocate a distinct color for the given trace index from the theme's
    /// global palette.
    pub fn alloc_color(index: usize) -> egui::Color32 {
        let palette = crate::theme::global_palette();
        if palette.is_empty() {
            return egui::Color32::GRAY;
        }
        palette[index % palette.len()]
    }

    /// Render an inline editor for this look. This is the per-trace half of the
    /// plot-editing GUI; the figure-level half lives in the Figures panel.
    pub(crate) fn render_editor(&mut self, ui: &mut egui::Ui, allow_points: bool) {
        ui.horizontal(|ui| {
            ui.label("Color");
            let mut c = self.color;
            if ui.color_edit_button_srgba(&mut c).changed() {
                self.color = c;
            }
            ui.label("Width");
            ui.add(
                egui::DragValue::new(&mut self.width)
                    .range(0.1..=10.0)
                    .speed(0.1),
            );
            ui.checkbox(&mut self.visible, "Visible");
        });

        egui::ComboBox::from_label("Line style")
            .selected_text(match self.style {
                LineStyle::Solid => "Solid",
                LineStyle::Dashed { .. } => "Dashed",
                LineStyle::Dotted { .. } => "Dotted",
            })
            .show_ui(ui, |ui| {
                if ui
                    .selectable_label(matches!(self.style, LineStyle::Solid), "Solid")
                    .clicked()
                {
                    self.style = LineStyle::Solid;
                }
                if ui
                    .selectable_label(matches!(self.style, LineStyle::Dashed { .. }), "Dashed")
                    .clicked()
                {
                    self.style = LineStyle::Dashed { length: 6.0 };
                }
                if ui
                    .selectable_label(matches!(self.style, LineStyle::Dotted { .. }), "Dotted")
                    .clicked()
                {
                    self.style = LineStyle::Dotted { spacing: 4.0 };
                }
            });

        match &mut self.style {
            LineStyle::Dashed { length } => {
                ui.horizontal(|ui| {
                    ui.label("Dash length");
                    ui.add(egui::DragValue::new(length).range(0.5..=200.0).speed(0.5));
                });
            }
            LineStyle::Dotted { spacing } => {
                ui.horizontal(|ui| {
                    ui.label("Dot spacing");
                    ui.add(egui::DragValue::new(spacing).range(0.5..=200.0).speed(0.5));
                });
            }
            LineStyle::Solid => {}
        }

        if allow_points {
            ui.horizontal(|ui| {
                ui.checkbox(&mut self.show_points, "Points");
                ui.add_enabled(
                    self.show_points,
                    egui::DragValue::new(&mut self.point_size)
                        .range(0.5..=10.0)
                        .speed(0.1),
                );
                ui.add_enabled_ui(self.show_points, |ui| {
                    egui::ComboBox::from_id_salt("marker_shape")
                        .selected_text(match self.marker {
                            MarkerShape::Circle => "Circle",
                            MarkerShape::Square => "Square",
                            MarkerShape::Diamond => "Diamond",
                            MarkerShape::Cross => "Cross",
                            MarkerShape::Plus => "Plus",
                            _ => "Other",
                        })
                        .show_ui(ui, |ui| {
                            for (shape, label) in [
                                (MarkerShape::Circle, "Circle"),
                                (MarkerShape::Square, "Square"),
                                (MarkerShape::Diamond, "Diamond"),
                                (MarkerShape::Cross, "Cross"),
                                (MarkerShape::Plus, "Plus"),
                            ] {
                                if ui
                                    .selectable_label(self.marker == shape, label)
                                    .clicked()
                                {
                                    self.marker = shape;
                                }
                            }
                        });
                });
            });
        }
    }
}
