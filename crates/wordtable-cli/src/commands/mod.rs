use crate::commands::{build::BuildArgs, inspect::InspectArgs};

pub mod build;
pub mod inspect;

/// Subcommands for wordtable.
#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Build a vocabulary and embedding table from a vector file.
    Build(BuildArgs),

    /// Inspect a saved embedding.
    Inspect(InspectArgs),
}

impl Commands {
    /// Run the subcommand.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        match self {
            Commands::Build(cmd) => cmd.run(),
            Commands::Inspect(cmd) => cmd.run(),
        }
    }
}
