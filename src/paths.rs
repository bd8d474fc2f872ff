//! Filesystem locations for persistent workbench state.
//!
//! All state lives under one directory: the platform config dir plus
//! `scibench`, overridable with `SCIBENCH_CONFIG_DIR` (used by the tests and
//! by deployments that pin state next to the instrument).

use std::path::PathBuf;

use crate::error::{BenchError, BenchResult};

/// The workbench state directory, not necessarily existing yet.
pub fn config_dir() -> BenchResult<PathBuf> {
    if let Ok(dir) = std::env::var("SCIBENCH_CONFIG_DIR") {
        return Ok(PathBuf::from(dir));
    }
    dirs::config_dir()
        .map(|d| d.join("scibench"))
        .ok_or(BenchError::ConfigDirNotFound)
}

/// The state directory, created if missing.
pub fn ensure_config_dir() -> BenchResult<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

pub fn scripts_file() -> BenchResult<PathBuf> {
    Ok(config_dir()?.join("scripts.yaml"))
}

pub fn hotkeys_file() -> BenchResult<PathBuf> {
    Ok(config_dir()?.join("hotkeys.yaml"))
}

pub fn state_file() -> BenchResult<PathBuf> {
    Ok(config_dir()?.join("state.json"))
}
