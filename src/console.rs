//! The command console: scrollback, prefix-matching history, and the command
//! language that drives the workbench.
//!
//! The console mirrors a lab notebook shell: Enter executes, Up/Down walk the
//! history filtered by whatever prefix is already typed, and replies land in
//! the scrollback styled by kind. Parsing and dispatch are plain functions so
//! the whole language is testable without a UI.

use std::path::PathBuf;

use crate::data::export;
use crate::data::figures::{FigureRegistry, SelectOutcome};
use crate::script::{run_hook, ScriptRegistry, DEFAULT_TIMEOUT};
use crate::sink::BenchSink;

// ─────────────────────────────────────────────────────────────────────────────
// History
// ─────────────────────────────────────────────────────────────────────────────

/// Command history with prefix-filtered navigation.
///
/// Entering history mode (first Up press) pins the currently typed text; only
/// entries starting with that text are offered. Walking Down past the newest
/// match restores the pinned text and leaves history mode.
#[derive(Default)]
pub struct History {
    entries: Vec<String>,
    cursor: Option<usize>,
    pending: String,
}

impl History {
    pub fn push(&mut self, cmd: &str) {
        if !cmd.trim().is_empty() {
            self.entries.push(cmd.to_string());
        }
        self.reset();
    }

    pub fn reset(&mut self) {
        self.cursor = None;
        self.pending.clear();
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    fn matches(&self) -> Vec<usize> {
        let prefix = self.pending.trim();
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.starts_with(prefix))
            .map(|(i, _)| i)
            .collect()
    }

    /// Navigate backwards. Returns the text to display, or `None` if nothing
    /// matches the typed prefix.
    pub fn up(&mut self, current: &str) -> Option<String> {
        if self.cursor.is_none() {
            self.pending = current.to_string();
        }
        let matches = self.matches();
        if matches.is_empty() {
            return None;
        }
        let next = match self.cursor {
            None => matches.len() - 1,
            Some(0) => 0,
            Some(i) => i - 1,
        };
        self.cursor = Some(next);
        Some(self.entries[matches[next]].clone())
    }

    /// Navigate forwards; walking past the newest match restores the pinned
    /// input and exits history mode.
    pub fn down(&mut self) -> Option<String> {
        let matches = self.matches();
        match self.cursor {
            None => None,
            Some(i) if i + 1 >= matches.len() => {
                let restored = self.pending.clone();
                self.reset();
                Some(restored)
            }
            Some(i) => {
                self.cursor = Some(i + 1);
                Some(self.entries[matches[i + 1]].clone())
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Command language
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleCommand {
    Help,
    Figures,
    Figure(usize),
    NewFigure,
    Close(usize),
    Open(usize),
    Pause,
    Resume,
    Clear(Option<String>),
    Fit,
    Save { figure: usize, path: PathBuf },
    Export(PathBuf),
    Traces,
    ScriptList,
    ScriptRun(String),
}

const HELP_TEXT: &str = "\
figures                 list figures with status
figure <n>              switch the active figure
figure new              create a fresh figure
open <n> / close <n>    reopen or close a figure
pause / resume          freeze or resume the active figure
clear [trace]           clear one trace or the whole active figure
fit                     fit the active figure's axes to its data
save <n> <path>         export figure n (csv/svg/png by extension)
export <path>           export the active figure
traces                  list traces of the active figure
script list             list registered scripts
script run <name>       run a registered script now
help                    this text";

/// Parse one console input line.
pub fn parse_command(line: &str) -> Result<ConsoleCommand, String> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let usage = |msg: &str| Err(format!("usage: {msg}"));
    match words.as_slice() {
        [] => Err("empty command".to_string()),
        ["help"] => Ok(ConsoleCommand::Help),
        ["figures"] => Ok(ConsoleCommand::Figures),
        ["figure", "new"] => Ok(ConsoleCommand::NewFigure),
        ["figure", n] => match n.parse() {
            Ok(n) => Ok(ConsoleCommand::Figure(n)),
            Err(_) => Err(format!("not a figure number: {n}")),
        },
        ["figure", ..] => usage("figure <n> | figure new"),
        ["close", n] => n
            .parse()
            .map(ConsoleCommand::Close)
            .map_err(|_| format!("not a figure number: {n}")),
        ["open", n] => n
            .parse()
            .map(ConsoleCommand::Open)
            .map_err(|_| format!("not a figure number: {n}")),
        ["pause"] => Ok(ConsoleCommand::Pause),
        ["resume"] => Ok(ConsoleCommand::Resume),
        ["clear"] => Ok(ConsoleCommand::Clear(None)),
        ["clear", trace] => Ok(ConsoleCommand::Clear(Some((*trace).to_string()))),
        ["fit"] => Ok(ConsoleCommand::Fit),
        ["save", n, path] => match n.parse() {
            Ok(n) => Ok(ConsoleCommand::Save {
                figure: n,
                path: PathBuf::from(*path),
            }),
            Err(_) => Err(format!("not a figure number: {n}")),
        },
        ["save", ..] => usage("save <n> <path>"),
        ["export", path] => Ok(ConsoleCommand::Export(PathBuf::from(*path))),
        ["export", ..] => usage("export <path>"),
        ["traces"] => Ok(ConsoleCommand::Traces),
        ["script", "list"] => Ok(ConsoleCommand::ScriptList),
        ["script", "run", name] => Ok(ConsoleCommand::ScriptRun((*name).to_string())),
        ["script", ..] => usage("script list | script run <name>"),
        [verb, ..] => Err(format!("unknown command '{verb}' (try 'help')")),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Console state & dispatch
// ─────────────────────────────────────────────────────────────────────────────

/// Styling class of a scrollback line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Echoed user input, prompt included.
    Input,
    /// Normal command output.
    Output,
    /// Error output.
    Error,
    /// Messages from the system (hook logs, figure switches).
    System,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConsoleLine {
    pub kind: LineKind,
    pub text: String,
}

pub struct ConsoleState {
    pub prompt: String,
    pub input: String,
    pub history: History,
    pub scrollback: Vec<ConsoleLine>,
    /// Cap on retained scrollback lines.
    pub max_lines: usize,
}

impl Default for ConsoleState {
    fn default() -> Self {
        let mut s = Self {
            prompt: ">>> ".to_string(),
            input: String::new(),
            history: History::default(),
            scrollback: Vec::new(),
            max_lines: 2_000,
        };
        s.push_line(LineKind::System, "# scibench console, type 'help'");
        s
    }
}

impl ConsoleState {
    pub fn push_line<S: Into<String>>(&mut self, kind: LineKind, text: S) {
        for part in text.into().split('\n') {
            self.scrollback.push(ConsoleLine {
                kind,
                text: part.to_string(),
            });
        }
        if self.scrollback.len() > self.max_lines {
            let excess = self.scrollback.len() - self.max_lines;
            self.scrollback.drain(..excess);
        }
    }

    /// Execute the current input line against the workbench state.
    pub fn submit(
        &mut self,
        figures: &mut FigureRegistry,
        scripts: &ScriptRegistry,
        sink: &BenchSink,
    ) {
        let line = std::mem::take(&mut self.input);
        let echo = format!("{}{}", self.prompt, line);
        self.push_line(LineKind::Input, echo);
        if line.trim().is_empty() {
            return;
        }
        self.history.push(&line);

        match parse_command(&line) {
            Err(e) => self.push_line(LineKind::Error, e),
            Ok(cmd) => {
                let replies = dispatch(cmd, figures, scripts, sink);
                for r in replies {
                    self.push_line(r.kind, r.text);
                }
            }
        }
    }
}

fn reply(kind: LineKind, text: impl Into<String>) -> ConsoleLine {
    ConsoleLine {
        kind,
        text: text.into(),
    }
}

/// Apply one parsed command, returning the scrollback replies.
pub fn dispatch(
    cmd: ConsoleCommand,
    figures: &mut FigureRegistry,
    scripts: &ScriptRegistry,
    sink: &BenchSink,
) -> Vec<ConsoleLine> {
    match cmd {
        ConsoleCommand::Help => vec![reply(LineKind::Output, HELP_TEXT)],
        ConsoleCommand::Figures => {
            let numbers = figures.numbers();
            if numbers.is_empty() {
                return vec![reply(LineKind::Output, "no figures yet")];
            }
            numbers
                .into_iter()
                .map(|n| reply(LineKind::Output, figures.label(n)))
                .collect()
        }
        ConsoleCommand::Figure(n) => match figures.select(n) {
            SelectOutcome::Activated(n) => {
                vec![reply(LineKind::System, format!("# switched to figure {n}"))]
            }
            SelectOutcome::ClosedSelected(n) => vec![reply(
                LineKind::Error,
                format!("figure {n} is closed (use 'open {n}')"),
            )],
            SelectOutcome::Unknown(n) => {
                vec![reply(LineKind::Error, format!("unknown figure: {n}"))]
            }
        },
        ConsoleCommand::NewFigure => {
            let n = figures.new_figure();
            vec![reply(LineKind::System, format!("# created figure {n}"))]
        }
        ConsoleCommand::Close(n) => {
            if figures.mark_closed(n) {
                vec![reply(LineKind::System, format!("# closed figure {n}"))]
            } else {
                vec![reply(LineKind::Error, format!("unknown figure: {n}"))]
            }
        }
        ConsoleCommand::Open(n) => {
            if figures.reopen(n) {
                vec![reply(LineKind::System, format!("# reopened figure {n}"))]
            } else {
                vec![reply(LineKind::Error, format!("unknown figure: {n}"))]
            }
        }
        ConsoleCommand::Pause => {
            figures.active_mut().pause();
            vec![reply(LineKind::System, "# paused")]
        }
        ConsoleCommand::Resume => {
            figures.active_mut().resume();
            vec![reply(LineKind::System, "# resumed")]
        }
        ConsoleCommand::Clear(None) => {
            figures.active_mut().clear_all();
            vec![reply(LineKind::System, "# cleared active figure")]
        }
        ConsoleCommand::Clear(Some(trace)) => {
            if figures.active_mut().clear_trace(&trace) {
                vec![reply(LineKind::System, format!("# cleared trace {trace}"))]
            } else {
                vec![reply(LineKind::Error, format!("unknown trace: {trace}"))]
            }
        }
        ConsoleCommand::Fit => {
            figures.active_mut().fit_bounds();
            vec![reply(LineKind::System, "# fitted axes to data")]
        }
        ConsoleCommand::Save { figure, path } => match figures.figure(figure) {
            None => vec![reply(LineKind::Error, format!("unknown figure: {figure}"))],
            Some(fig) => match export::export_figure(fig, &path) {
                Ok(()) => vec![reply(
                    LineKind::System,
                    format!("# saved figure {figure} to {}", path.display()),
                )],
                Err(e) => vec![reply(LineKind::Error, format!("save failed: {e}"))],
            },
        },
        ConsoleCommand::Export(path) => {
            let fig = figures.active_mut();
            let number = fig.number;
            match export::export_figure(fig, &path) {
                Ok(()) => vec![reply(
                    LineKind::System,
                    format!("# exported figure {number} to {}", path.display()),
                )],
                Err(e) => vec![reply(LineKind::Error, format!("export failed: {e}"))],
            }
        }
        ConsoleCommand::Traces => {
            let fig = figures.active_mut();
            if fig.trace_order.is_empty() {
                return vec![reply(LineKind::Output, "no traces in the active figure")];
            }
            fig.trace_order
                .iter()
                .map(|name| {
                    let tr = &fig.traces[name];
                    reply(
                        LineKind::Output,
                        format!(
                            "{}  points={}  offset={}  {}",
                            name,
                            tr.live.len(),
                            tr.offset,
                            if tr.look.visible { "shown" } else { "hidden" }
                        ),
                    )
                })
                .collect()
        }
        ConsoleCommand::ScriptList => {
            if scripts.is_empty() {
                return vec![reply(LineKind::Output, "no scripts registered")];
            }
            scripts
                .iter()
                .map(|s| {
                    reply(
                        LineKind::Output,
                        format!(
                            "{}  {}  [{}]{}",
                            s.name,
                            s.path.display(),
                            s.trigger,
                            if s.enabled { "" } else { "  (disabled)" }
                        ),
                    )
                })
                .collect()
        }
        ConsoleCommand::ScriptRun(name) => match scripts.get(&name) {
            None => vec![reply(LineKind::Error, format!("unknown script: {name}"))],
            Some(entry) => match run_hook(entry, &[], sink, DEFAULT_TIMEOUT) {
                Ok(outcome) => {
                    let mut out: Vec<ConsoleLine> = outcome
                        .logs
                        .iter()
                        .map(|l| reply(LineKind::System, format!("# {name}: {l}")))
                        .collect();
                    for e in &outcome.errors {
                        out.push(reply(LineKind::Error, format!("{name}: {e}")));
                    }
                    out.push(reply(
                        LineKind::System,
                        format!(
                            "# {name}: {} directive(s) applied, exit {}",
                            outcome.applied,
                            if outcome.exit_ok { "ok" } else { "failure" }
                        ),
                    ));
                    out
                }
                Err(e) => vec![reply(LineKind::Error, format!("{name}: {e}"))],
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::channel_feed;

    #[test]
    fn history_prefix_navigation_pins_and_restores() {
        let mut h = History::default();
        h.push("figures");
        h.push("fit");
        h.push("pause");
        h.push("figure 2");

        // typed prefix "fi" only offers fi* entries, newest first
        assert_eq!(h.up("fi").as_deref(), Some("figure 2"));
        assert_eq!(h.up("fi").as_deref(), Some("fit"));
        assert_eq!(h.up("fi").as_deref(), Some("figures"));
        // pinned at the oldest match
        assert_eq!(h.up("fi").as_deref(), Some("figures"));
        // walking forward again, then past the newest restores the pin
        assert_eq!(h.down().as_deref(), Some("fit"));
        assert_eq!(h.down().as_deref(), Some("figure 2"));
        assert_eq!(h.down().as_deref(), Some("fi"));
        // history mode exited: Down does nothing now
        assert_eq!(h.down(), None);
    }

    #[test]
    fn history_with_no_match_stays_put() {
        let mut h = History::default();
        h.push("pause");
        assert_eq!(h.up("zzz"), None);
    }

    #[test]
    fn parse_accepts_the_language() {
        assert_eq!(parse_command("pause").unwrap(), ConsoleCommand::Pause);
        assert_eq!(
            parse_command("figure 3").unwrap(),
            ConsoleCommand::Figure(3)
        );
        assert_eq!(
            parse_command("clear noise").unwrap(),
            ConsoleCommand::Clear(Some("noise".into()))
        );
        assert_eq!(
            parse_command("save 2 /tmp/fig.svg").unwrap(),
            ConsoleCommand::Save {
                figure: 2,
                path: PathBuf::from("/tmp/fig.svg")
            }
        );
        assert_eq!(
            parse_command("script run mean").unwrap(),
            ConsoleCommand::ScriptRun("mean".into())
        );
    }

    #[test]
    fn parse_rejects_junk_with_usable_messages() {
        assert!(parse_command("figure two").unwrap_err().contains("two"));
        assert!(parse_command("save 1").unwrap_err().starts_with("usage:"));
        assert!(parse_command("warp 9").unwrap_err().contains("warp"));
    }

    #[test]
    fn dispatch_switches_and_reports_closed_figures() {
        let mut figures = FigureRegistry::default();
        let scripts = ScriptRegistry::default();
        let (sink, _rx) = channel_feed();
        let n = figures.new_figure();

        let out = dispatch(ConsoleCommand::Figure(n), &mut figures, &scripts, &sink);
        assert_eq!(out[0].kind, LineKind::System);

        figures.mark_closed(n);
        let out = dispatch(ConsoleCommand::Figure(n), &mut figures, &scripts, &sink);
        assert_eq!(out[0].kind, LineKind::Error);
        assert!(out[0].text.contains("closed"));
    }

    #[test]
    fn dispatch_unknown_script_is_an_error() {
        let mut figures = FigureRegistry::default();
        let scripts = ScriptRegistry::default();
        let (sink, _rx) = channel_feed();
        let out = dispatch(
            ConsoleCommand::ScriptRun("ghost".into()),
            &mut figures,
            &scripts,
            &sink,
        );
        assert_eq!(out[0].kind, LineKind::Error);
        assert!(out[0].text.contains("ghost"));
    }

    #[test]
    fn submit_echoes_input_and_keeps_history() {
        let mut console = ConsoleState::default();
        let mut figures = FigureRegistry::default();
        let scripts = ScriptRegistry::default();
        let (sink, _rx) = channel_feed();

        console.input = "pause".to_string();
        console.submit(&mut figures, &scripts, &sink);

        assert!(console
            .scrollback
            .iter()
            .any(|l| l.kind == LineKind::Input && l.text == ">>> pause"));
        assert_eq!(console.history.entries(), ["pause"]);
        assert!(figures.figure(1).unwrap().paused);
    }
}
