use anyhow::Result;
use clap::Parser;

mod acquire;
mod script;
mod visualize;

use self::acquire::AcquireSubcommand;
use self::script::ScriptSubcommand;
use self::visualize::VisualizeSubcommand;

#[derive(Debug, Parser)]
#[clap(author, version, about)]
pub struct Args {
    #[clap(subcommand)]
    pub subcommand: Subcommand,
}

impl Args {
    pub fn run(self) -> Result<()> {
        self.subcommand.run()
    }
}

#[derive(Debug, Parser)]
pub enum Subcommand {
    Acquire(AcquireSubcommand),
    Visualize(VisualizeSubcommand),
    Script(ScriptSubcommand),
}

impl Subcommand {
    pub fn run(self) -> Result<()> {
        match self {
            Self::Acquire(cmd) => cmd.run(),
            Self::Visualize(cmd) => cmd.run(),
            Self::Script(cmd) => cmd.run(),
        }
    }
}
