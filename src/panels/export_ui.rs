//! The Export panel: save the active figure's data or rendering.

use std::path::PathBuf;

use egui::Ui;

use crate::app::BenchContext;
use crate::data::export;

use super::panel_trait::{Panel, PanelState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Choice {
    Csv,
    Svg,
    Png,
    #[cfg(feature = "parquet")]
    Parquet,
}

impl Choice {
    fn label(&self) -> &'static str {
        match self {
            Choice::Csv => "CSV (data)",
            Choice::Svg => "SVG (vector)",
            Choice::Png => "PNG (raster)",
            #[cfg(feature = "parquet")]
            Choice::Parquet => "Parquet (columnar)",
        }
    }

    fn extension(&self) -> &'static str {
        match self {
            Choice::Csv => "csv",
            Choice::Svg => "svg",
            Choice::Png => "png",
            #[cfg(feature = "parquet")]
            Choice::Parquet => "parquet",
        }
    }

    fn all() -> Vec<Choice> {
        let mut all = vec![Choice::Csv, Choice::Svg, Choice::Png];
        #[cfg(feature = "parquet")]
        all.push(Choice::Parquet);
        all
    }
}

pub struct ExportPanel {
    state: PanelState,
    choice: Choice,
    last_result: Option<Result<PathBuf, String>>,
}

impl ExportPanel {
    pub fn new() -> Self {
        Self {
            state: PanelState::default(),
            choice: Choice::Csv,
            last_result: None,
        }
    }
}

impl Default for ExportPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Panel for ExportPanel {
    fn title(&self) -> &'static str {
        "Export"
    }

    fn state(&self) -> &PanelState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut PanelState {
        &mut self.state
    }

    fn render(&mut self, ui: &mut Ui, bench: &mut BenchContext<'_>) {
        egui::ComboBox::from_label("Format")
            .selected_text(self.choice.label())
            .show_ui(ui, |ui| {
                for c in Choice::all() {
                    ui.selectable_value(&mut self.choice, c, c.label());
                }
            });

        if ui.button("Export active figure…").clicked() {
            let fig = bench.figures.active_mut();
            let default_name = format!("figure_{}.{}", fig.number, self.choice.extension());
            if let Some(path) = rfd::FileDialog::new()
                .set_file_name(&default_name)
                .add_filter(self.choice.label(), &[self.choice.extension()])
                .save_file()
            {
                self.last_result = Some(
                    export::export_figure(fig, &path)
                        .map(|_| path.clone())
                        .map_err(|e| e.to_string()),
                );
            }
        }

        if ui.button("Save window PNG").clicked() {
            bench.requests.screenshot = true;
        }

        match &self.last_result {
            Some(Ok(path)) => {
                ui.weak(format!("Saved {}", path.display()));
            }
            Some(Err(e)) => {
                ui.colored_label(egui::Color32::RED, format!("Export failed: {e}"));
            }
            None => {}
        }
    }
}
