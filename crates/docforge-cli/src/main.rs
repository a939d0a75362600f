//! docforge CLI - synthetic financial document generation and verification.

use clap::{Parser, Subcommand};

mod commands;
mod output;

use commands::gen::{self, GenArgs};
use commands::verify;

#[derive(Parser)]
#[command(name = "docforge")]
#[command(about = "Synthetic financial document fabrication with exact ground truth")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a batch of documents with ground-truth exports
    Gen(GenArgs),
    /// Re-verify consistency invariants of emitted document files
    Verify {
        /// Directory holding emitted document JSON files
        dir: String,
        /// Exit with an error code if any document fails verification
        #[arg(long)]
        strict: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Gen(args) => gen::run(args),
        Commands::Verify { dir, strict, json } => verify::run(dir, strict, json),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
