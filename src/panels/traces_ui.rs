//! The Traces panel: per-trace plot editing for the active figure.

use egui::Ui;

use crate::app::BenchContext;

use super::panel_trait::{Panel, PanelState};

#[derive(Default)]
pub struct TracesPanel {
    state: PanelState,
}

impl TracesPanel {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Panel for TracesPanel {
    fn title(&self) -> &'static str {
        "Traces"
    }

    fn state(&self) -> &PanelState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut PanelState {
        &mut self.state
    }

    fn render(&mut self, ui: &mut Ui, bench: &mut BenchContext<'_>) {
        let fig = bench.figures.active_mut();
        if fig.trace_order.is_empty() {
            ui.weak("The active figure has no traces yet.");
            return;
        }

        let names: Vec<String> = fig.trace_order.clone();
        let mut cleared: Option<String> = None;
        for name in &names {
            let Some(tr) = fig.traces.get_mut(name) else {
                continue;
            };
            egui::CollapsingHeader::new(name)
                .id_salt(("trace_editor", name))
                .show(ui, |ui| {
                    if !tr.info.is_empty() {
                        ui.weak(&tr.info);
                    }
                    tr.look.render_editor(ui, true);
                    ui.horizontal(|ui| {
                        ui.label("Y offset");
                        ui.add(
                            egui::DragValue::new(&mut tr.offset)
                                .speed(0.1)
                                .range(-1e9..=1e9),
                        );
                        if ui.button("Clear data").clicked() {
                            cleared = Some(name.clone());
                        }
                    });
                });
        }
        if let Some(name) = cleared {
            fig.clear_trace(&name);
            bench.console.push_line(
                crate::console::LineKind::System,
                format!("# cleared trace {name}"),
            );
        }
    }
}
