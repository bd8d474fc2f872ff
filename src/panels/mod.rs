pub mod console_ui;
pub mod export_ui;
pub mod figures_ui;
pub mod panel_trait;
pub mod scripts_ui;
pub mod traces_ui;

pub use console_ui::ConsolePanel;
pub use export_ui::ExportPanel;
pub use figures_ui::FiguresPanel;
pub use panel_trait::{Panel, PanelState};
pub use scripts_ui::ScriptsPanel;
pub use traces_ui::TracesPanel;
