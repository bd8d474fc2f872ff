//! The Figure Manager panel: list of figures with status and active marker,
//! an info readout for the selection, and per-figure context actions.

use egui::{Color32, RichText, Ui};

use crate::app::BenchContext;
use crate::data::figures::SelectOutcome;

use super::panel_trait::{Panel, PanelState};

pub struct FiguresPanel {
    state: PanelState,
    selected: Option<usize>,
}

impl FiguresPanel {
    pub fn new() -> Self {
        Self {
            state: PanelState::default(),
            selected: None,
        }
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }
}

impl Default for FiguresPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Panel for FiguresPanel {
    fn title(&self) -> &'static str {
        "Figures"
    }

    fn state(&self) -> &PanelState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut PanelState {
        &mut self.state
    }

    fn render(&mut self, ui: &mut Ui, bench: &mut BenchContext<'_>) {
        if ui.button("New figure").clicked() {
            let n = bench.figures.new_figure();
            self.selected = Some(n);
        }
        ui.separator();

        let numbers = bench.figures.numbers();
        if numbers.is_empty() {
            ui.weak("No figures yet; they appear when data arrives.");
            return;
        }

        for n in numbers {
            let closed = bench.figures.is_closed(n);
            let label = bench.figures.label(n);
            let color = if closed {
                Color32::from_rgb(0xd1, 0x69, 0x69)
            } else {
                Color32::from_rgb(0x4e, 0xc9, 0x4e)
            };
            let response = ui.selectable_label(
                self.selected == Some(n),
                RichText::new(label).color(color),
            );

            if response.clicked() {
                self.selected = Some(n);
                match bench.figures.select(n) {
                    SelectOutcome::ClosedSelected(n) => {
                        bench.console.push_line(
                            crate::console::LineKind::System,
                            format!("# warning: figure {n} is closed"),
                        );
                    }
                    SelectOutcome::Activated(n) => {
                        bench.console.push_line(
                            crate::console::LineKind::System,
                            format!("# switched to figure {n}"),
                        );
                    }
                    SelectOutcome::Unknown(_) => {}
                }
            }
            if response.double_clicked() {
                bench.requests.detach_figures.push(n);
            }
            response.context_menu(|ui| {
                if closed {
                    if ui.button("Reopen Figure").clicked() {
                        bench.figures.reopen(n);
                        ui.close();
                    }
                } else if ui.button("Close Figure").clicked() {
                    bench.figures.mark_closed(n);
                    ui.close();
                }
                if ui.button("Save Figure").clicked() {
                    bench.requests.save_figure_dialog = Some(n);
                    ui.close();
                }
                if ui.button("Open Window").clicked() {
                    bench.requests.detach_figures.push(n);
                    ui.close();
                }
            });
        }

        ui.separator();
        match self.selected.and_then(|n| bench.figures.info_text(n)) {
            Some(info) => {
                ui.label(RichText::new(info).monospace());
            }
            None => {
                ui.weak("Select a figure for details.");
            }
        }
    }
}
