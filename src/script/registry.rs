//! The persistent script registry behind `scibench script ...` and the
//! Scripts panel. Stored as YAML in the workbench config dir.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{BenchError, BenchResult};
use crate::paths;

use super::hook::HookTrigger;

/// One registered user script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptEntry {
    pub name: String,
    pub path: PathBuf,
    #[serde(default)]
    pub trigger: HookTrigger,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScriptRegistry {
    scripts: Vec<ScriptEntry>,
}

impl ScriptRegistry {
    /// Register a script. The name defaults to the file stem; duplicate names
    /// are rejected so `script run <name>` stays unambiguous.
    pub fn add(
        &mut self,
        path: &Path,
        name: Option<String>,
        trigger: HookTrigger,
    ) -> BenchResult<&ScriptEntry> {
        let name = match name {
            Some(n) => n,
            None => path
                .file_stem()
                .and_then(|s| s.to_str())
                .map(|s| s.to_string())
                .ok_or_else(|| BenchError::InvalidScriptPath(path.to_path_buf()))?,
        };
        if self.scripts.iter().any(|s| s.name == name) {
            return Err(BenchError::DuplicateScript(name));
        }
        self.scripts.push(ScriptEntry {
            name,
            path: path.to_path_buf(),
            trigger,
            enabled: true,
        });
        Ok(self.scripts.last().unwrap())
    }

    pub fn remove(&mut self, name: &str) -> BenchResult<ScriptEntry> {
        match self.scripts.iter().position(|s| s.name == name) {
            Some(idx) => Ok(self.scripts.remove(idx)),
            None => Err(BenchError::UnknownScript(name.to_string())),
        }
    }

    pub fn get(&self, name: &str) -> Option<&ScriptEntry> {
        self.scripts.iter().find(|s| s.name == name)
    }

    pub fn set_enabled(&mut self, name: &str, enabled: bool) -> BenchResult<()> {
        match self.scripts.iter_mut().find(|s| s.name == name) {
            Some(s) => {
                s.enabled = enabled;
                Ok(())
            }
            None => Err(BenchError::UnknownScript(name.to_string())),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScriptEntry> {
        self.scripts.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut ScriptEntry> {
        self.scripts.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.scripts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scripts.is_empty()
    }

    /// Scripts that should fire for batch number `batch_index`.
    pub fn due_on_batch(&self, batch_index: u64) -> Vec<&ScriptEntry> {
        self.scripts
            .iter()
            .filter(|s| s.enabled)
            .filter(|s| match s.trigger {
                HookTrigger::OnBatch { every } if every > 0 => batch_index % every as u64 == 0,
                _ => false,
            })
            .collect()
    }

    /// Enabled scripts with the `OnStart` trigger.
    pub fn on_start(&self) -> Vec<&ScriptEntry> {
        self.scripts
            .iter()
            .filter(|s| s.enabled && s.trigger == HookTrigger::OnStart)
            .collect()
    }

    // ── persistence ─────────────────────────────────────────────────────────

    pub fn load_from(path: &Path) -> BenchResult<Self> {
        let s = fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&s)?)
    }

    pub fn save_to(&self, path: &Path) -> BenchResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_yaml::to_string(self)?)?;
        Ok(())
    }

    /// Load the registry from the default location, starting empty when no
    /// registry file exists yet.
    pub fn load_or_default() -> BenchResult<Self> {
        let path = paths::scripts_file()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    pub fn save_default(&self) -> BenchResult<()> {
        self.save_to(&paths::scripts_file()?)
    }
}
