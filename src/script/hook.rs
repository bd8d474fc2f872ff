//! Hook triggers and the directive protocol scripts speak back to the bench.
//!
//! A script receives the pending sample batch as CSV on stdin
//! (`trace,timestamp,value`, timestamps in float seconds) and may emit
//! directives on stdout, one per line:
//!
//! ```text
//! point <trace> <x> <y>     # inject a derived sample
//! clear <trace>             # drop a trace's data
//! log <message...>          # surface a message in the console
//! ```
//!
//! Blank lines and `#` comments are ignored. Anything else is reported as a
//! malformed directive but does not abort the run.

use serde::{Deserialize, Serialize};

/// When a registered script runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HookTrigger {
    /// Only via `script run` or the Scripts panel.
    Manual,
    /// Once when the dashboard starts.
    OnStart,
    /// After every `every`-th ingested sample batch.
    OnBatch { every: usize },
}

impl Default for HookTrigger {
    fn default() -> Self {
        HookTrigger::Manual
    }
}

impl std::fmt::Display for HookTrigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HookTrigger::Manual => write!(f, "manual"),
            HookTrigger::OnStart => write!(f, "on-start"),
            HookTrigger::OnBatch { every } => write!(f, "on-batch/{}", every),
        }
    }
}

/// One parsed stdout directive.
#[derive(Debug, Clone, PartialEq)]
pub enum Directive {
    Point { trace: String, x: f64, y: f64 },
    Clear { trace: String },
    Log(String),
}

/// Parse one stdout line. `Ok(None)` means blank/comment.
pub fn parse_directive(line: &str) -> Result<Option<Directive>, String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let mut parts = line.splitn(2, char::is_whitespace);
    let verb = parts.next().unwrap_or_default();
    let rest = parts.next().unwrap_or("").trim();
    match verb {
        "point" => {
            let fields: Vec<&str> = rest.split_whitespace().collect();
            let [trace, x, y] = fields.as_slice() else {
                return Err(format!("point needs <trace> <x> <y>: {line}"));
            };
            let (Ok(x), Ok(y)) = (x.parse::<f64>(), y.parse::<f64>()) else {
                return Err(format!("point coordinates must be numbers: {line}"));
            };
            Ok(Some(Directive::Point {
                trace: (*trace).to_string(),
                x,
                y,
            }))
        }
        "clear" => {
            if rest.is_empty() || rest.contains(char::is_whitespace) {
                return Err(format!("clear needs exactly one trace name: {line}"));
            }
            Ok(Some(Directive::Clear {
                trace: rest.to_string(),
            }))
        }
        "log" => Ok(Some(Directive::Log(rest.to_string()))),
        other => Err(format!("unknown directive '{other}'")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_each_directive() {
        assert_eq!(
            parse_directive("point mean 1.5 2.5").unwrap(),
            Some(Directive::Point {
                trace: "mean".into(),
                x: 1.5,
                y: 2.5
            })
        );
        assert_eq!(
            parse_directive("clear noise").unwrap(),
            Some(Directive::Clear {
                trace: "noise".into()
            })
        );
        assert_eq!(
            parse_directive("log fit converged").unwrap(),
            Some(Directive::Log("fit converged".into()))
        );
    }

    #[test]
    fn blank_and_comment_lines_are_skipped() {
        assert_eq!(parse_directive("").unwrap(), None);
        assert_eq!(parse_directive("  # note").unwrap(), None);
    }

    #[test]
    fn malformed_directives_are_errors() {
        assert!(parse_directive("point mean 1.5").is_err());
        assert!(parse_directive("point mean a b").is_err());
        assert!(parse_directive("clear a b").is_err());
        assert!(parse_directive("shout hello").is_err());
    }
}
