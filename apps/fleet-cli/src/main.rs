//! # fleet
//!
//! Entry point for the `fleet` console application. Setup and command
//! handling live in `lib.rs` for testability.
//!
//! ## Exit Status
//! - `0` success
//! - `2` usage error (reported by clap)
//! - `1`, `3`..`8` see `fleet_cli::error::ErrorCode`

use clap::Parser;
use std::process::ExitCode;

use fleet_cli::commands::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match fleet_cli::run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            err.exit_code()
        }
    }
}
