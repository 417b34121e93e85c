mod commands;
mod logging;
mod progress;

use clap::Parser;
use commands::Commands;
pub use logging::LogArgs;

/// wordtable: build vocabularies and embedding tables from word-vector files.
#[derive(clap::Parser, Debug)]
pub struct Args {
    /// Subcommand to run.
    #[clap(subcommand)]
    pub command: Commands,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    args.command.run()
}
