//! Skiff - a small object-storage style CLI.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use skiff::cli::output;
use skiff::cli::{execute, Cli, Globals};
use skiff::error::{ClientError, EncryptError, Error};

fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber with env-filter support
    let filter = EnvFilter::try_from_env("SKIFF_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("skiff=debug")
        } else {
            EnvFilter::new("skiff=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).without_time())
        .init();

    let globals = Globals {
        json: cli.json,
        config_dir: cli.config_dir.clone(),
    };

    if let Err(e) = execute(cli.command, globals) {
        // Format error with suggestion if available
        let suggestion = match &e {
            Error::Encrypt(EncryptError::MalformedKeySpec { .. }) => {
                Some("format: --encrypt-key \"alias/prefix=key ...\" with 32-byte keys")
            }
            Error::Client(ClientError::UnsupportedScheme { .. }) => {
                Some("point the alias at a local root: skiff alias set NAME file:///path")
            }
            _ => None,
        };

        output::error(&e.to_string());
        if let Some(hint) = suggestion {
            output::hint(hint);
        }
        std::process::exit(1);
    }
}
