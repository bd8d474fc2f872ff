use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;

use scibench::script::{HookTrigger, ScriptRegistry};

/// Manages the user-script hook registry.
#[derive(Debug, Parser)]
pub struct ScriptSubcommand {
    #[clap(subcommand)]
    pub action: ScriptAction,
}

#[derive(Debug, Parser)]
pub enum ScriptAction {
    Add(AddScript),
    Remove(RemoveScript),
    List(ListScripts),
}

/// Registers a user script. By default scripts only run on demand; pass a
/// trigger flag to hook them into the acquisition pipeline.
#[derive(Debug, Parser)]
pub struct AddScript {
    /// Path to the executable script.
    pub path: PathBuf,

    /// Registry name (defaults to the file stem).
    #[clap(long)]
    pub name: Option<String>,

    /// Run automatically after every N ingested sample batches.
    #[clap(long, value_name = "N", conflicts_with = "on_start")]
    pub on_batch: Option<usize>,

    /// Run once when the dashboard starts.
    #[clap(long, conflicts_with = "on_batch")]
    pub on_start: bool,
}

/// Removes a script from the registry.
#[derive(Debug, Parser)]
pub struct RemoveScript {
    /// Registry name of the script.
    pub name: String,
}

/// Lists all registered scripts.
#[derive(Debug, Parser)]
pub struct ListScripts {}

impl ScriptSubcommand {
    pub fn run(self) -> Result<()> {
        let mut registry =
            ScriptRegistry::load_or_default().context("Failed to load the script registry")?;

        match self.action {
            ScriptAction::Add(cmd) => {
                if !cmd.path.exists() {
                    bail!("Script not found: {}", cmd.path.display());
                }
                let path = cmd
                    .path
                    .canonicalize()
                    .with_context(|| format!("Failed to resolve {}", cmd.path.display()))?;
                let trigger = match (cmd.on_batch, cmd.on_start) {
                    (Some(every), _) => HookTrigger::OnBatch { every },
                    (None, true) => HookTrigger::OnStart,
                    (None, false) => HookTrigger::Manual,
                };
                let entry = registry.add(&path, cmd.name, trigger)?;
                info!("Registered script '{}' [{}]", entry.name, entry.trigger);
                registry.save_default()?;
            }
            ScriptAction::Remove(cmd) => {
                let entry = registry.remove(&cmd.name)?;
                info!("Removed script '{}' ({})", entry.name, entry.path.display());
                registry.save_default()?;
            }
            ScriptAction::List(_) => {
                if registry.is_empty() {
                    info!("No scripts registered.");
                } else {
                    let mut lines = vec![String::from("Registered scripts:\n")];
                    for s in registry.iter() {
                        lines.push(format!(
                            "{}  [{}]{}",
                            s.name,
                            s.trigger,
                            if s.enabled { "" } else { "  (disabled)" }
                        ));
                        lines.push(format!("  {}", s.path.display()));
                    }
                    info!("{}", lines.join("\n"));
                }
            }
        }

        Ok(())
    }
}
