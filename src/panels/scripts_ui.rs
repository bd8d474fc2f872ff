//! The Scripts panel: registry listing, trigger display, enable toggles and
//! manual runs.

use egui::{RichText, Ui};

use crate::app::BenchContext;
use crate::script::HookTrigger;

use super::panel_trait::{Panel, PanelState};

#[derive(Default)]
pub struct ScriptsPanel {
    state: PanelState,
}

impl ScriptsPanel {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Panel for ScriptsPanel {
    fn title(&self) -> &'static str {
        "Scripts"
    }

    fn state(&self) -> &PanelState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut PanelState {
        &mut self.state
    }

    fn render(&mut self, ui: &mut Ui, bench: &mut BenchContext<'_>) {
        if bench.scripts.is_empty() {
            ui.weak("No scripts registered.");
            ui.weak("Register one with: scibench script add <path>");
            return;
        }

        let mut removed: Option<String> = None;
        let mut toggled = false;
        for entry in bench.scripts.iter_mut() {
            ui.horizontal(|ui| {
                if ui.checkbox(&mut entry.enabled, "").changed() {
                    toggled = true;
                }
                ui.label(RichText::new(&entry.name).strong());
                ui.weak(format!("[{}]", entry.trigger));
                if ui.button("Run now").clicked() {
                    bench.requests.run_script = Some(entry.name.clone());
                }
                if ui.button("Remove").clicked() {
                    removed = Some(entry.name.clone());
                }
            });
            ui.weak(entry.path.display().to_string());
            if let HookTrigger::OnBatch { every } = entry.trigger {
                ui.weak(format!("runs after every {every} sample batches"));
            }
            ui.separator();
        }

        if let Some(name) = removed {
            if bench.scripts.remove(&name).is_ok() {
                bench.console.push_line(
                    crate::console::LineKind::System,
                    format!("# removed script {name}"),
                );
                bench.requests.save_scripts = true;
            }
        }
        if toggled {
            bench.requests.save_scripts = true;
        }
    }
}
