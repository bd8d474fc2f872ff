//! Controllers for driving the dashboard from external code.
//!
//! These are the automation hooks: lightweight shared-state handles that let
//! non-UI code observe window/figure state and push requests (pause, export,
//! screenshot, figure switching) without touching egui. The UI consumes the
//! pending requests once per frame and publishes updates to subscribers.

use std::path::PathBuf;
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex};

/// Current window information (physical pixels).
#[derive(Debug, Clone)]
pub struct WindowInfo {
    /// Last observed size of the entire window.
    pub current_size: Option<[f32; 2]>,
    /// Requested size (if any) set via controller.
    pub requested_size: Option<[f32; 2]>,
    /// Requested window position (if any).
    pub requested_pos: Option<[f32; 2]>,
}

/// Controller to get/set window info and subscribe to updates.
#[derive(Clone, Default)]
pub struct WindowController {
    pub(crate) inner: Arc<Mutex<WindowCtrlInner>>, // crate-visible for the UI
}

#[derive(Default)]
pub(crate) struct WindowCtrlInner {
    pub(crate) current_size: Option<[f32; 2]>,
    pub(crate) request_set_size: Option<[f32; 2]>,
    pub(crate) request_set_pos: Option<[f32; 2]>,
    pub(crate) listeners: Vec<Sender<WindowInfo>>,
}

impl WindowController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last observed window size in physical pixels (if known).
    pub fn get_current_size(&self) -> Option<[f32; 2]> {
        self.inner.lock().unwrap().current_size
    }

    /// Request a window size change. Whether the runtime honors it depends on
    /// the backend.
    pub fn request_set_size(&self, size_px: [f32; 2]) {
        self.inner.lock().unwrap().request_set_size = Some(size_px);
    }

    /// Request a window position change.
    pub fn request_set_pos(&self, pos_px: [f32; 2]) {
        self.inner.lock().unwrap().request_set_pos = Some(pos_px);
    }

    /// Subscribe to window info updates published by the UI.
    pub fn subscribe(&self) -> std::sync::mpsc::Receiver<WindowInfo> {
        let (tx, rx) = std::sync::mpsc::channel();
        self.inner.lock().unwrap().listeners.push(tx);
        rx
    }
}

/// Controller for high-level UI actions: pause/resume, screenshots and data
/// export, interactive (dialog) or direct-to-path.
#[derive(Clone, Default)]
pub struct UiActionController {
    pub(crate) inner: Arc<Mutex<UiActionInner>>, // crate-visible for the UI
}

#[derive(Default)]
pub(crate) struct UiActionInner {
    pub(crate) request_pause: Option<bool>,
    pub(crate) request_screenshot: bool,
    pub(crate) request_screenshot_to: Option<PathBuf>,
    pub(crate) request_export_dialog: bool,
    pub(crate) request_export_to: Option<PathBuf>,
    pub(crate) request_clear_all: bool,
}

impl UiActionController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Freeze the active figure's display.
    pub fn pause(&self) {
        self.inner.lock().unwrap().request_pause = Some(true);
    }

    /// Resume live updates on the active figure.
    pub fn resume(&self) {
        self.inner.lock().unwrap().request_pause = Some(false);
    }

    /// Take a window screenshot, prompting for the file name.
    pub fn request_save_png(&self) {
        self.inner.lock().unwrap().request_screenshot = true;
    }

    /// Take a window screenshot straight to `path` (non-interactive).
    pub fn request_save_png_to_path<P: Into<PathBuf>>(&self, path: P) {
        self.inner.lock().unwrap().request_screenshot_to = Some(path.into());
    }

    /// Export the active figure, prompting for the file name.
    pub fn request_export(&self) {
        self.inner.lock().unwrap().request_export_dialog = true;
    }

    /// Export the active figure straight to `path`; the format follows the
    /// extension.
    pub fn request_export_to_path<P: Into<PathBuf>>(&self, path: P) {
        self.inner.lock().unwrap().request_export_to = Some(path.into());
    }

    /// Clear all data of the active figure.
    pub fn request_clear_all(&self) {
        self.inner.lock().unwrap().request_clear_all = true;
    }
}

/// Snapshot of the figure list, published on every change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FigureListInfo {
    pub numbers: Vec<usize>,
    pub closed: Vec<usize>,
    pub active: Option<usize>,
}

/// Pending figure operations requested from outside the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum FigureRequest {
    Activate(usize),
    Close(usize),
    Reopen(usize),
    New,
}

/// Controller to drive and observe the figure registry.
#[derive(Clone, Default)]
pub struct FigureController {
    pub(crate) inner: Arc<Mutex<FigureCtrlInner>>, // crate-visible for the UI
}

#[derive(Default)]
pub(crate) struct FigureCtrlInner {
    pub(crate) requests: Vec<FigureRequest>,
    pub(crate) last_info: Option<FigureListInfo>,
    pub(crate) listeners: Vec<Sender<FigureListInfo>>,
}

impl FigureController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make figure `n` the active target.
    pub fn activate(&self, n: usize) {
        self.push(FigureRequest::Activate(n));
    }

    /// Close figure `n` (data is kept).
    pub fn close(&self, n: usize) {
        self.push(FigureRequest::Close(n));
    }

    /// Reopen a closed figure and make it active.
    pub fn reopen(&self, n: usize) {
        self.push(FigureRequest::Reopen(n));
    }

    /// Create a fresh figure and make it active.
    pub fn new_figure(&self) {
        self.push(FigureRequest::New);
    }

    fn push(&self, req: FigureRequest) {
        self.inner.lock().unwrap().requests.push(req);
    }

    /// The figure list as last published by the UI.
    pub fn figure_list(&self) -> Option<FigureListInfo> {
        self.inner.lock().unwrap().last_info.clone()
    }

    /// Subscribe to figure-list updates.
    pub fn subscribe(&self) -> std::sync::mpsc::Receiver<FigureListInfo> {
        let (tx, rx) = std::sync::mpsc::channel();
        self.inner.lock().unwrap().listeners.push(tx);
        rx
    }
}
