//! standup - Todoist companion that writes your daily standup summary.

use clap::Parser;
use std::process::ExitCode;

use standup_cli::{logging, Commands};

#[tokio::main]
async fn main() -> ExitCode {
    // A .env next to the binary's working directory may carry the LLM key.
    let _ = dotenvy::dotenv();

    // Keep the guard alive so buffered log lines are flushed on exit.
    let _guard = match logging::init() {
        Ok((guard, _)) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let args = Commands::parse();

    match args.run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
