use downcast_rs::{impl_downcast, Downcast};
use egui::Ui;

use crate::app::BenchContext;

#[derive(Debug, Clone, Copy, Default)]
pub struct PanelState {
    pub visible: bool,
    pub detached: bool,
}

/// A dockable tool panel. Panels render either inside the right side strip or
/// as a floating window when detached; the app toggles them by concrete type
/// via downcasting.
pub trait Panel: Downcast {
    fn title(&self) -> &'static str;
    fn state(&self) -> &PanelState;
    fn state_mut(&mut self) -> &mut PanelState;

    fn render(&mut self, ui: &mut Ui, bench: &mut BenchContext<'_>);
}
impl_downcast!(Panel);
