//! The console panel: scrollback styled by line kind, a prompt input, and
//! Up/Down history navigation with prefix matching.

use egui::{Color32, Key, RichText, ScrollArea, TextEdit, Ui};

use crate::app::BenchContext;
use crate::console::LineKind;

use super::panel_trait::{Panel, PanelState};

#[derive(Default)]
pub struct ConsolePanel {
    state: PanelState,
    /// Keep the view pinned to the newest line after a submit.
    stick_to_bottom: bool,
}

impl ConsolePanel {
    pub fn new() -> Self {
        Self {
            state: PanelState::default(),
            stick_to_bottom: true,
        }
    }

    fn line_color(kind: LineKind, colors: &crate::theme::ConsoleColors) -> Color32 {
        match kind {
            LineKind::Input => colors.foreground,
            LineKind::Output => colors.foreground,
            LineKind::Error => colors.error,
            LineKind::System => colors.system,
        }
    }
}

impl Panel for ConsolePanel {
    fn title(&self) -> &'static str {
        "Console"
    }

    fn state(&self) -> &PanelState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut PanelState {
        &mut self.state
    }

    fn render(&mut self, ui: &mut Ui, bench: &mut BenchContext<'_>) {
        let colors = bench.theme.console_colors();

        egui::Frame::default()
            .fill(colors.background)
            .inner_margin(egui::Margin::same(4))
            .show(ui, |ui| {
                ScrollArea::vertical()
                    .id_salt("console_scrollback")
                    .max_height(ui.available_height() - 28.0)
                    .stick_to_bottom(self.stick_to_bottom)
                    .show(ui, |ui| {
                        for line in &bench.console.scrollback {
                            ui.label(
                                RichText::new(&line.text)
                                    .monospace()
                                    .color(Self::line_color(line.kind, &colors)),
                            );
                        }
                    });
            });

        ui.horizontal(|ui| {
            ui.label(RichText::new(&bench.console.prompt).monospace());
            let response = ui.add(
                TextEdit::singleline(&mut bench.console.input)
                    .id_salt("console_input")
                    .font(egui::TextStyle::Monospace)
                    .desired_width(f32::INFINITY)
                    .hint_text("help"),
            );

            if response.has_focus() {
                // History walk; replaces the input text in place.
                if ui.input(|i| i.key_pressed(Key::ArrowUp)) {
                    let current = bench.console.input.clone();
                    if let Some(text) = bench.console.history.up(&current) {
                        bench.console.input = text;
                    }
                }
                if ui.input(|i| i.key_pressed(Key::ArrowDown)) {
                    if let Some(text) = bench.console.history.down() {
                        bench.console.input = text;
                    }
                }
            }

            if response.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter)) {
                bench
                    .console
                    .submit(bench.figures, bench.scripts, bench.sink);
                self.stick_to_bottom = true;
                response.request_focus();
            }
        });
    }
}
