#![allow(clippy::match_same_arms)]

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::str::FromStr;

use eframe::egui;

use crate::error::BenchResult;
use crate::paths;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Modifier {
    None,
    Ctrl,
    Alt,
    Shift,
    CtrlAlt,
    CtrlShift,
    AltShift,
    CtrlAltShift,
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Modifier::None => "",
            Modifier::Ctrl => "Ctrl",
            Modifier::Alt => "Alt",
            Modifier::Shift => "Shift",
            Modifier::CtrlAlt => "Ctrl+Alt",
            Modifier::CtrlShift => "Ctrl+Shift",
            Modifier::AltShift => "Alt+Shift",
            Modifier::CtrlAltShift => "Ctrl+Alt+Shift",
        };
        write!(f, "{}", s)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hotkey {
    pub modifier: Modifier,
    pub key: char,
}

impl fmt::Display for Hotkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = match self.key {
            ' ' => "Space".to_string(),
            other => other.to_string(),
        };

        if self.modifier == Modifier::None {
            write!(f, "{}", key)
        } else {
            write!(f, "{}+{}", self.modifier, key)
        }
    }
}

impl FromStr for Hotkey {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err("empty hotkey".to_string());
        }
        let parts: Vec<&str> = s.split('+').map(|p| p.trim()).collect();
        let last = parts.last().unwrap();
        let ch = match last.to_lowercase().as_str() {
            "space" => ' ',
            _ => last
                .chars()
                .next()
                .ok_or_else(|| "no key char".to_string())?,
        };
        let mods = &parts[..parts.len().saturating_sub(1)];
        let mut ctrl = false;
        let mut alt = false;
        let mut shift = false;
        for m in mods {
            match m.to_lowercase().as_str() {
                "ctrl" | "control" => ctrl = true,
                "alt" => alt = true,
                "shift" => shift = true,
                other => return Err(format!("unknown modifier '{}'", other)),
            }
        }
        let modifier = match (ctrl, alt, shift) {
            (false, false, false) => Modifier::None,
            (true, false, false) => Modifier::Ctrl,
            (false, true, false) => Modifier::Alt,
            (false, false, true) => Modifier::Shift,
            (true, true, false) => Modifier::CtrlAlt,
            (true, false, true) => Modifier::CtrlShift,
            (false, true, true) => Modifier::AltShift,
            (true, true, true) => Modifier::CtrlAltShift,
        };
        Ok(Hotkey {
            modifier,
            key: ch.to_ascii_uppercase(),
        })
    }
}

impl Hotkey {
    pub fn new(modifier: Modifier, key: char) -> Self {
        Self { modifier, key }
    }
}

/// Configurable key bindings for the dashboard.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Hotkeys {
    pub pause: Option<Hotkey>,
    pub fit_view: Option<Hotkey>,
    pub fit_y: Option<Hotkey>,
    pub figures: Option<Hotkey>,
    pub traces: Option<Hotkey>,
    pub console: Option<Hotkey>,
    pub scripts: Option<Hotkey>,
    pub export: Option<Hotkey>,
    pub save_png: Option<Hotkey>,
    pub clear_all: Option<Hotkey>,
}

impl Default for Hotkeys {
    fn default() -> Self {
        Self {
            pause: Some(Hotkey::new(Modifier::None, 'P')),
            fit_view: Some(Hotkey::new(Modifier::None, 'F')),
            fit_y: Some(Hotkey::new(Modifier::None, 'Y')),
            figures: Some(Hotkey::new(Modifier::None, 'G')),
            traces: Some(Hotkey::new(Modifier::None, 'T')),
            console: Some(Hotkey::new(Modifier::None, 'C')),
            scripts: Some(Hotkey::new(Modifier::None, 'R')),
            export: Some(Hotkey::new(Modifier::None, 'E')),
            save_png: Some(Hotkey::new(Modifier::None, 'S')),
            clear_all: Some(Hotkey::new(Modifier::Ctrl, 'X')),
        }
    }
}

impl Hotkeys {
    pub fn reset_defaults(&mut self) {
        *self = Hotkeys::default();
    }

    pub fn save_to_default_path(&self) -> BenchResult<()> {
        paths::ensure_config_dir()?;
        let path = paths::hotkeys_file()?;
        let s = serde_yaml::to_string(self)?;
        fs::write(path, s)?;
        Ok(())
    }

    pub fn load_from_default_path() -> BenchResult<Hotkeys> {
        let path = paths::hotkeys_file()?;
        let s = fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&s)?)
    }
}

/// Actions a hotkey press can trigger.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HotkeyAction {
    Pause,
    FitView,
    FitY,
    FiguresPanel,
    TracesPanel,
    ConsolePanel,
    ScriptsPanel,
    ExportPanel,
    SavePng,
    ClearAll,
}

fn key_from_char(c: char) -> Option<egui::Key> {
    match c.to_ascii_uppercase() {
        'A'..='Z' => egui::Key::from_name(&c.to_ascii_uppercase().to_string()),
        '0'..='9' => egui::Key::from_name(&c.to_string()),
        ' ' => Some(egui::Key::Space),
        _ => None,
    }
}

fn modifiers_match(mods: &egui::Modifiers, modifier: Modifier) -> bool {
    let ctrl = mods.ctrl || mods.command;
    let alt = mods.alt;
    let shift = mods.shift;
    match modifier {
        Modifier::None => !ctrl && !alt,
        Modifier::Ctrl => ctrl && !alt,
        Modifier::Alt => alt && !ctrl,
        Modifier::Shift => shift && !ctrl && !alt,
        Modifier::CtrlAlt => ctrl && alt,
        Modifier::CtrlShift => ctrl && shift && !alt,
        Modifier::AltShift => alt && shift && !ctrl,
        Modifier::CtrlAltShift => ctrl && alt && shift,
    }
}

fn is_hotkey_pressed(hk: Option<&Hotkey>, input: &egui::InputState) -> bool {
    let Some(hk) = hk else { return false };
    let Some(key) = key_from_char(hk.key) else {
        return false;
    };
    if !modifiers_match(&input.modifiers, hk.modifier) {
        return false;
    }
    input.key_pressed(key)
}

/// Detect hotkey actions for this frame. Suppressed entirely while a text
/// widget (notably the console input) wants the keyboard.
pub fn detect_hotkey_actions(cfg: &Hotkeys, ctx: &egui::Context) -> Vec<HotkeyAction> {
    let mut actions: Vec<HotkeyAction> = Vec::new();
    if ctx.wants_keyboard_input() {
        return actions;
    }
    let input = ctx.input(|i| i.clone());

    let mut push = |pressed: bool, act: HotkeyAction| {
        if pressed && !actions.contains(&act) {
            actions.push(act);
        }
    };

    // Space always toggles pause, alongside the configured binding.
    let space = Hotkey::new(Modifier::None, ' ');
    push(
        is_hotkey_pressed(cfg.pause.as_ref(), &input) || is_hotkey_pressed(Some(&space), &input),
        HotkeyAction::Pause,
    );
    push(
        is_hotkey_pressed(cfg.fit_view.as_ref(), &input),
        HotkeyAction::FitView,
    );
    push(
        is_hotkey_pressed(cfg.fit_y.as_ref(), &input),
        HotkeyAction::FitY,
    );
    push(
        is_hotkey_pressed(cfg.figures.as_ref(), &input),
        HotkeyAction::FiguresPanel,
    );
    push(
        is_hotkey_pressed(cfg.traces.as_ref(), &input),
        HotkeyAction::TracesPanel,
    );
    push(
        is_hotkey_pressed(cfg.console.as_ref(), &input),
        HotkeyAction::ConsolePanel,
    );
    push(
        is_hotkey_pressed(cfg.scripts.as_ref(), &input),
        HotkeyAction::ScriptsPanel,
    );
    push(
        is_hotkey_pressed(cfg.export.as_ref(), &input),
        HotkeyAction::ExportPanel,
    );
    push(
        is_hotkey_pressed(cfg.save_png.as_ref(), &input),
        HotkeyAction::SavePng,
    );
    push(
        is_hotkey_pressed(cfg.clear_all.as_ref(), &input),
        HotkeyAction::ClearAll,
    );

    actions
}
