//! The eframe application driving the whole dashboard.

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::mpsc::{Receiver, Sender};
use std::time::Duration;

use eframe::egui;
use egui::ViewportCommand;
use image::{Rgba, RgbaImage};
use tracing::{error, info, warn};

use crate::config::BenchConfig;
use crate::console::{ConsoleState, LineKind};
use crate::controllers::{
    FigureController, FigureListInfo, FigureRequest, UiActionController, WindowController,
    WindowInfo,
};
use crate::data::export;
use crate::data::figures::{FigureDefaults, FigureRegistry};
use crate::data::hotkeys::{detect_hotkey_actions, HotkeyAction, Hotkeys};
use crate::panels::{
    ConsolePanel, ExportPanel, FiguresPanel, Panel, ScriptsPanel, TracesPanel,
};
use crate::persistence::{AppStateSerde, PanelVisSerde};
use crate::script::{run_hook, ScriptEntry, ScriptRegistry, DEFAULT_TIMEOUT};
use crate::sink::{BenchSink, FeedCommand, Sample};

use super::plot::figure_plot;
use super::{BenchContext, PendingRequests};

/// Messages coming back from hook worker threads.
enum HookEvent {
    Log { script: String, message: String },
    Error { script: String, message: String },
}

pub struct MainApp {
    rx: Receiver<FeedCommand>,
    /// Clone of the feed sender so hooks and console commands can inject data.
    sink: BenchSink,

    figures: FigureRegistry,
    scripts: ScriptRegistry,
    console: ConsoleState,
    panels: Vec<Box<dyn Panel>>,
    hotkeys: Hotkeys,
    config: BenchConfig,
    requests: PendingRequests,

    /// Figures shown in their own floating windows.
    detached: BTreeSet<usize>,

    /// Counts frames that ingested samples; drives OnBatch hook scheduling.
    batch_index: u64,
    pending_batch: Vec<Sample>,

    hook_tx: Sender<HookEvent>,
    hook_rx: Receiver<HookEvent>,

    window_ctrl: Option<WindowController>,
    ui_ctrl: Option<UiActionController>,
    figure_ctrl: Option<FigureController>,
    last_figure_info: Option<FigureListInfo>,

    /// Non-interactive screenshot target, if one was requested.
    screenshot_to: Option<PathBuf>,
    started: bool,
}

impl MainApp {
    pub fn new(rx: Receiver<FeedCommand>, sink: BenchSink, mut config: BenchConfig) -> Self {
        let scripts = match ScriptRegistry::load_or_default() {
            Ok(reg) => reg,
            Err(e) => {
                warn!(error = %e, "could not load script registry, starting empty");
                ScriptRegistry::default()
            }
        };
        let hotkeys = config
            .hotkeys
            .take()
            .or_else(|| Hotkeys::load_from_default_path().ok())
            .unwrap_or_default();

        let window_ctrl = config.controllers.window.take();
        let ui_ctrl = config.controllers.ui_action.take();
        let figure_ctrl = config.controllers.figures.take();

        let mut panels: Vec<Box<dyn Panel>> = vec![
            Box::new(FiguresPanel::new()),
            Box::new(TracesPanel::new()),
            Box::new(ConsolePanel::new()),
            Box::new(ScriptsPanel::new()),
            Box::new(ExportPanel::new()),
        ];
        // the console and figure manager start visible, tools stay hidden
        for p in panels.iter_mut() {
            let visible = match p.title() {
                "Console" => config.features.console,
                "Figures" => config.features.figures,
                _ => false,
            };
            p.state_mut().visible = visible;
        }

        let (hook_tx, hook_rx) = std::sync::mpsc::channel();

        let figures = FigureRegistry::with_defaults(FigureDefaults {
            time_window: config.time_window_secs,
            max_points: config.max_points,
            y_unit: config.y_unit.clone(),
            y_log: config.y_log,
            y_auto_fit: config.auto_fit.auto_fit_to_view,
        });

        Self {
            rx,
            sink,
            figures,
            scripts,
            console: ConsoleState::default(),
            panels,
            hotkeys,
            config,
            requests: PendingRequests::default(),
            detached: BTreeSet::new(),
            batch_index: 0,
            pending_batch: Vec::new(),
            hook_tx,
            hook_rx,
            window_ctrl,
            ui_ctrl,
            figure_ctrl,
            last_figure_info: None,
            screenshot_to: None,
            started: false,
        }
    }

    // ── state persistence ────────────────────────────────────────────────────

    pub fn capture_state(&self) -> AppStateSerde {
        let mut state = AppStateSerde::default();
        state.capture_figures(&self.figures);
        state.panels = self
            .panels
            .iter()
            .map(|p| PanelVisSerde {
                title: p.title().to_string(),
                visible: p.state().visible,
                detached: p.state().detached,
            })
            .collect();
        state
    }

    pub fn apply_state(&mut self, state: &AppStateSerde) {
        state.restore_figures(&mut self.figures);
        for vis in &state.panels {
            if let Some(p) = self.panels.iter_mut().find(|p| p.title() == vis.title) {
                p.state_mut().visible = vis.visible;
                p.state_mut().detached = vis.detached;
            }
        }
    }

    // ── panel helpers ────────────────────────────────────────────────────────

    fn toggle_panel<T: 'static + Panel>(&mut self) {
        for p in self.panels.iter_mut() {
            if p.downcast_ref::<T>().is_some() {
                p.state_mut().visible = !p.state().visible;
            }
        }
    }

    // ── data flow ────────────────────────────────────────────────────────────

    fn drain_feed(&mut self) {
        let mut saw_samples = false;
        while let Ok(cmd) = self.rx.try_recv() {
            match &cmd {
                FeedCommand::Sample(s) => {
                    saw_samples = true;
                    self.pending_batch.push(s.clone());
                }
                FeedCommand::Samples(batch) => {
                    saw_samples = true;
                    self.pending_batch.extend(batch.iter().cloned());
                }
                _ => {}
            }
            self.figures.apply(cmd);
        }

        if saw_samples {
            self.batch_index += 1;
            let due: Vec<ScriptEntry> = self
                .scripts
                .due_on_batch(self.batch_index)
                .into_iter()
                .cloned()
                .collect();
            if !due.is_empty() {
                let batch = std::mem::take(&mut self.pending_batch);
                for entry in due {
                    self.spawn_hook(entry, batch.clone());
                }
            } else if self.pending_batch.len() > self.config.max_points {
                // nobody is consuming the batch buffer; don't let it grow
                let excess = self.pending_batch.len() - self.config.max_points;
                self.pending_batch.drain(..excess);
            }
        }
    }

    fn spawn_hook(&self, entry: ScriptEntry, batch: Vec<Sample>) {
        let sink = self.sink.clone();
        let tx = self.hook_tx.clone();
        std::thread::spawn(move || {
            let name = entry.name.clone();
            match run_hook(&entry, &batch, &sink, DEFAULT_TIMEOUT) {
                Ok(outcome) => {
                    for message in outcome.logs {
                        let _ = tx.send(HookEvent::Log {
                            script: name.clone(),
                            message,
                        });
                    }
                    for message in outcome.errors {
                        let _ = tx.send(HookEvent::Error {
                            script: name.clone(),
                            message,
                        });
                    }
                    if !outcome.exit_ok {
                        let _ = tx.send(HookEvent::Error {
                            script: name,
                            message: "exited with failure".to_string(),
                        });
                    }
                }
                Err(e) => {
                    let _ = tx.send(HookEvent::Error {
                        script: name,
                        message: e.to_string(),
                    });
                }
            }
        });
    }

    fn drain_hook_events(&mut self) {
        while let Ok(ev) = self.hook_rx.try_recv() {
            match ev {
                HookEvent::Log { script, message } => {
                    self.console
                        .push_line(LineKind::System, format!("# {script}: {message}"));
                }
                HookEvent::Error { script, message } => {
                    self.console
                        .push_line(LineKind::Error, format!("{script}: {message}"));
                }
            }
        }
    }

    // ── controllers ──────────────────────────────────────────────────────────

    fn handle_controllers(&mut self, ctx: &egui::Context) {
        if let Some(ctrl) = &self.window_ctrl {
            let mut inner = ctrl.inner.lock().unwrap();
            let rect = ctx.input(|i| i.screen_rect());
            let ppp = ctx.pixels_per_point();
            inner.current_size = Some([rect.width() * ppp, rect.height() * ppp]);
            if let Some(size) = inner.request_set_size.take() {
                ctx.send_viewport_cmd(ViewportCommand::InnerSize(egui::vec2(
                    size[0] / ppp,
                    size[1] / ppp,
                )));
            }
            if let Some(pos) = inner.request_set_pos.take() {
                ctx.send_viewport_cmd(ViewportCommand::OuterPosition(egui::pos2(
                    pos[0] / ppp,
                    pos[1] / ppp,
                )));
            }
            let info = WindowInfo {
                current_size: inner.current_size,
                requested_size: None,
                requested_pos: None,
            };
            inner.listeners.retain(|l| l.send(info.clone()).is_ok());
        }

        if let Some(ctrl) = &self.ui_ctrl {
            let (pause, screenshot, screenshot_to, export_dialog, export_to, clear_all) = {
                let mut inner = ctrl.inner.lock().unwrap();
                (
                    inner.request_pause.take(),
                    std::mem::take(&mut inner.request_screenshot),
                    inner.request_screenshot_to.take(),
                    std::mem::take(&mut inner.request_export_dialog),
                    inner.request_export_to.take(),
                    std::mem::take(&mut inner.request_clear_all),
                )
            };
            if let Some(pause) = pause {
                let fig = self.figures.active_mut();
                if pause {
                    fig.pause();
                } else {
                    fig.resume();
                }
            }
            if screenshot {
                self.requests.screenshot = true;
            }
            if let Some(path) = screenshot_to {
                self.screenshot_to = Some(path);
                ctx.send_viewport_cmd(ViewportCommand::Screenshot(Default::default()));
            }
            if export_dialog {
                let n = self.figures.active_mut().number;
                self.requests.save_figure_dialog = Some(n);
            }
            if let Some(path) = export_to {
                let fig = self.figures.active_mut();
                if let Err(e) = export::export_figure(fig, &path) {
                    error!(error = %e, path = %path.display(), "controller export failed");
                }
            }
            if clear_all {
                self.figures.active_mut().clear_all();
            }
        }

        if let Some(ctrl) = &self.figure_ctrl {
            let requests: Vec<FigureRequest> =
                std::mem::take(&mut ctrl.inner.lock().unwrap().requests);
            for req in requests {
                match req {
                    FigureRequest::Activate(n) => {
                        self.figures.select(n);
                    }
                    FigureRequest::Close(n) => {
                        self.figures.mark_closed(n);
                    }
                    FigureRequest::Reopen(n) => {
                        self.figures.reopen(n);
                    }
                    FigureRequest::New => {
                        self.figures.new_figure();
                    }
                }
            }

            let info = FigureListInfo {
                numbers: self.figures.numbers(),
                closed: self
                    .figures
                    .numbers()
                    .into_iter()
                    .filter(|&n| self.figures.is_closed(n))
                    .collect(),
                active: self.figures.active_number(),
            };
            if self.last_figure_info.as_ref() != Some(&info) {
                let mut inner = ctrl.inner.lock().unwrap();
                inner.last_info = Some(info.clone());
                inner.listeners.retain(|l| l.send(info.clone()).is_ok());
                self.last_figure_info = Some(info);
            }
        }
    }

    // ── hotkeys ──────────────────────────────────────────────────────────────

    fn handle_hotkeys(&mut self, ctx: &egui::Context) {
        for action in detect_hotkey_actions(&self.hotkeys, ctx) {
            match action {
                HotkeyAction::Pause => {
                    let fig = self.figures.active_mut();
                    if fig.paused {
                        fig.resume();
                    } else {
                        fig.pause();
                    }
                }
                HotkeyAction::FitView => self.figures.active_mut().fit_bounds(),
                HotkeyAction::FitY => self.figures.active_mut().fit_y_bounds(),
                HotkeyAction::FiguresPanel => self.toggle_panel::<FiguresPanel>(),
                HotkeyAction::TracesPanel => self.toggle_panel::<TracesPanel>(),
                HotkeyAction::ConsolePanel => self.toggle_panel::<ConsolePanel>(),
                HotkeyAction::ScriptsPanel => self.toggle_panel::<ScriptsPanel>(),
                HotkeyAction::ExportPanel => self.toggle_panel::<ExportPanel>(),
                HotkeyAction::SavePng => self.requests.screenshot = true,
                HotkeyAction::ClearAll => self.figures.active_mut().clear_all(),
            }
        }
    }

    // ── chrome ───────────────────────────────────────────────────────────────

    fn top_bar(&mut self, ctx: &egui::Context) {
        if !self.config.features.top_bar {
            return;
        }
        egui::TopBottomPanel::top("bench_top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.strong(&self.config.title);
                ui.separator();

                let mut toggles: Vec<(&'static str, bool)> = Vec::new();
                for p in self.panels.iter() {
                    let enabled = match p.title() {
                        "Figures" => self.config.features.figures,
                        "Traces" => self.config.features.traces,
                        "Console" => self.config.features.console,
                        "Scripts" => self.config.features.scripts,
                        "Export" => self.config.features.export,
                        _ => true,
                    };
                    if enabled {
                        toggles.push((p.title(), p.state().visible));
                    }
                }
                for (title, visible) in toggles {
                    if ui.selectable_label(visible, title).clicked() {
                        if let Some(p) = self.panels.iter_mut().find(|p| p.title() == title) {
                            p.state_mut().visible = !p.state().visible;
                        }
                    }
                }

                ui.separator();
                let paused = self.figures.active_mut().paused;
                if self.config.features.pause_resume {
                    let icon = if paused {
                        egui_phosphor::regular::PLAY
                    } else {
                        egui_phosphor::regular::PAUSE
                    };
                    if ui
                        .button(icon)
                        .on_hover_text(if paused { "Resume" } else { "Pause" })
                        .clicked()
                    {
                        let fig = self.figures.active_mut();
                        if paused {
                            fig.resume();
                        } else {
                            fig.pause();
                        }
                    }
                }
                if ui
                    .button(egui_phosphor::regular::ARROWS_OUT)
                    .on_hover_text("Fit axes to data")
                    .clicked()
                {
                    self.figures.active_mut().fit_bounds();
                }
                if self.config.features.clear_all
                    && ui
                        .button(egui_phosphor::regular::BROOM)
                        .on_hover_text("Clear the active figure")
                        .clicked()
                {
                    self.figures.active_mut().clear_all();
                }
                if ui
                    .button(egui_phosphor::regular::FLOPPY_DISK)
                    .on_hover_text("Save the dashboard layout")
                    .clicked()
                {
                    self.requests.save_layout = true;
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if let Some(n) = self.figures.active_number() {
                        ui.weak(format!("active: figure {n}"));
                    } else {
                        ui.weak("no active figure");
                    }
                });
            });
        });
    }

    fn draw_panels(&mut self, ctx: &egui::Context) {
        let mut panels = std::mem::take(&mut self.panels);
        {
            let mut bench = BenchContext {
                figures: &mut self.figures,
                scripts: &mut self.scripts,
                console: &mut self.console,
                sink: &self.sink,
                theme: self.config.theme,
                requests: &mut self.requests,
            };

            for p in panels.iter_mut() {
                if !p.state().visible {
                    continue;
                }
                let mut open = true;
                egui::Window::new(p.title())
                    .open(&mut open)
                    .default_width(340.0)
                    .vscroll(true)
                    .show(ctx, |ui| {
                        p.render(ui, &mut bench);
                    });
                if !open {
                    p.state_mut().visible = false;
                }
            }
        }
        self.panels = panels;
    }

    fn draw_central(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            match self.figures.active_number() {
                Some(n) if !self.figures.is_closed(n) => {
                    let features = self.config.features.clone();
                    if let Some(fig) = self.figures.figure_mut(n) {
                        figure_plot(ui, fig, &features, "central_plot");
                    }
                }
                _ => {
                    ui.centered_and_justified(|ui| {
                        ui.weak("No active figure. Waiting for data, or pick one in Figures.");
                    });
                }
            }
        });
    }

    fn draw_detached_figures(&mut self, ctx: &egui::Context) {
        for n in std::mem::take(&mut self.requests.detach_figures) {
            self.detached.insert(n);
        }
        let detached: Vec<usize> = self.detached.iter().copied().collect();
        for n in detached {
            let Some(fig) = self.figures.figure_mut(n) else {
                self.detached.remove(&n);
                continue;
            };
            let mut open = true;
            let title = fig.title.clone();
            let features = self.config.features.clone();
            egui::Window::new(title)
                .id(egui::Id::new(("figure_window", n)))
                .open(&mut open)
                .default_size([600.0, 400.0])
                .show(ctx, |ui| {
                    figure_plot(ui, fig, &features, &format!("figure_plot_{n}"));
                });
            if !open {
                self.detached.remove(&n);
            }
        }
    }

    // ── requests & screenshots ───────────────────────────────────────────────

    fn handle_requests(&mut self, ctx: &egui::Context) {
        if let Some(n) = self.requests.save_figure_dialog.take() {
            if let Some(fig) = self.figures.figure(n) {
                let default_name = format!("figure_{n}.svg");
                if let Some(path) = rfd::FileDialog::new()
                    .set_file_name(&default_name)
                    .add_filter("Figure exports", &["csv", "svg", "png"])
                    .save_file()
                {
                    match export::export_figure(fig, &path) {
                        Ok(()) => self.console.push_line(
                            LineKind::System,
                            format!("# saved figure {n} to {}", path.display()),
                        ),
                        Err(e) => self
                            .console
                            .push_line(LineKind::Error, format!("save failed: {e}")),
                    }
                }
            }
        }

        if let Some(name) = self.requests.run_script.take() {
            if let Some(entry) = self.scripts.get(&name).cloned() {
                self.spawn_hook(entry, Vec::new());
            }
        }

        if std::mem::take(&mut self.requests.save_scripts) {
            if let Err(e) = self.scripts.save_default() {
                warn!(error = %e, "could not persist script registry");
            }
        }

        if std::mem::take(&mut self.requests.save_layout) {
            let state = self.capture_state();
            let saved = crate::paths::ensure_config_dir()
                .and_then(|_| crate::paths::state_file())
                .and_then(|path| {
                    crate::persistence::save_state_to_path(&state, &path).map(|_| path)
                });
            match saved {
                Ok(path) => self.console.push_line(
                    LineKind::System,
                    format!("# saved layout to {}", path.display()),
                ),
                Err(e) => self
                    .console
                    .push_line(LineKind::Error, format!("layout save failed: {e}")),
            }
        }

        if std::mem::take(&mut self.requests.screenshot) {
            ctx.send_viewport_cmd(ViewportCommand::Screenshot(Default::default()));
        }
    }

    fn handle_screenshot_events(&mut self, ctx: &egui::Context) {
        let image = ctx.input(|i| {
            i.events.iter().rev().find_map(|e| {
                if let egui::Event::Screenshot { image, .. } = e {
                    Some(image.clone())
                } else {
                    None
                }
            })
        });
        let Some(image) = image else { return };

        let path = match self.screenshot_to.take() {
            Some(path) => Some(path),
            None => {
                let default_name =
                    format!("scibench_{}.png", chrono::Local::now().format("%Y%m%d_%H%M%S"));
                rfd::FileDialog::new().set_file_name(&default_name).save_file()
            }
        };
        let Some(path) = path else { return };

        let [w, h] = image.size;
        let mut out = RgbaImage::new(w as u32, h as u32);
        for y in 0..h {
            for x in 0..w {
                let p = image.pixels[y * w + x];
                out.put_pixel(x as u32, y as u32, Rgba([p.r(), p.g(), p.b(), p.a()]));
            }
        }
        match out.save(&path) {
            Ok(()) => {
                info!(path = %path.display(), "saved window screenshot");
                self.console.push_line(
                    LineKind::System,
                    format!("# saved screenshot to {}", path.display()),
                );
            }
            Err(e) => {
                error!(error = %e, "failed to save screenshot");
                self.console
                    .push_line(LineKind::Error, format!("screenshot failed: {e}"));
            }
        }
    }

    fn first_frame(&mut self, ctx: &egui::Context) {
        if self.started {
            return;
        }
        self.started = true;
        self.config.theme.apply(ctx);

        let on_start: Vec<ScriptEntry> =
            self.scripts.on_start().into_iter().cloned().collect();
        for entry in on_start {
            self.console
                .push_line(LineKind::System, format!("# running {} (on-start)", entry.name));
            self.spawn_hook(entry, Vec::new());
        }
    }
}

impl eframe::App for MainApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.first_frame(ctx);

        self.drain_feed();
        self.figures.update_all();
        self.drain_hook_events();
        self.handle_controllers(ctx);
        self.handle_hotkeys(ctx);

        self.top_bar(ctx);
        self.draw_central(ctx);
        self.draw_panels(ctx);
        self.draw_detached_figures(ctx);

        self.handle_requests(ctx);
        self.handle_screenshot_events(ctx);

        // keep the live feel
        ctx.request_repaint_after(Duration::from_millis(16));
    }
}
