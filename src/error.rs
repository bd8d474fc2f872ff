//! Library-level error type shared by the acquisition, script and export layers.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BenchError {
    #[error("config directory not found")]
    ConfigDirNotFound,
    #[error("invalid device spec: {0}")]
    InvalidDeviceSpec(String),
    #[error("device not found: {0}")]
    DeviceNotFound(PathBuf),
    #[error("unknown figure: {0}")]
    UnknownFigure(usize),
    #[error("unknown trace: {0}")]
    UnknownTrace(String),
    #[error("unknown script: {0}")]
    UnknownScript(String),
    #[error("invalid script path: {0}")]
    InvalidScriptPath(PathBuf),
    #[error("script not found: {0}")]
    ScriptNotFound(PathBuf),
    #[error("script already registered: {0}")]
    DuplicateScript(String),
    #[error("script produced no usable output: {0}")]
    ScriptOutput(String),
    #[error("script timed out after {0} s")]
    ScriptTimeout(u64),
    #[error("unsupported export format: {0}")]
    UnsupportedFormat(String),
    #[error("figure render failed: {0}")]
    Render(String),
    #[error("export failed: {0}")]
    Export(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type BenchResult<T> = Result<T, BenchError>;
