use clap::{Parser, Subcommand};
use std::process;

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about = "PIN guessability from keystroke timings", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fit the timing model from a keystroke log and report per-class parameters
    Fit(cmd::fit::FitArgs),
    /// Rank recorded attempts against a model fit from a keystroke log
    Infer(cmd::infer::InferArgs),
}

fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Fit(args) => cmd::fit::run(args),
        Commands::Infer(args) => cmd::infer::run(args),
    };

    if let Err(e) = result {
        eprintln!("\n❌ {}", e);
        process::exit(1);
    }
}
