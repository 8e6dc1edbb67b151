//! Command-line interface.

pub mod alias;
pub mod output;
pub mod pipe;
pub mod share;
pub mod stat;

use std::io;
use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

/// Skiff - move data to and from storage targets.
#[derive(Parser)]
#[command(
    name = "skiff",
    about = "Pipe, stat and share storage targets with per-prefix encryption key routing",
    version
)]
pub struct Cli {
    /// Print machine-readable JSON messages
    #[arg(long, global = true)]
    pub json: bool,

    /// Directory holding the alias config and share database
    #[arg(long, global = true, value_name = "DIR")]
    pub config_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Redirect stdin to a target, or to stdout
    Pipe {
        /// Target to write to; omit to copy stdin through to stdout
        target: Option<String>,

        /// Encryption keys: space-separated `alias/prefix=key` fields with
        /// 32-byte keys
        #[arg(long, env = "SKIFF_ENCRYPT_KEY", value_name = "SPEC")]
        encrypt_key: Option<String>,
    },

    /// Stat contents of objects and folders
    Stat {
        /// Targets to stat
        #[arg(required = true)]
        targets: Vec<String>,

        /// Stat folder contents recursively
        #[arg(short, long)]
        recursive: bool,

        /// Encryption keys: space-separated `alias/prefix=key` fields with
        /// 32-byte keys
        #[arg(long, env = "SKIFF_ENCRYPT_KEY", value_name = "SPEC")]
        encrypt_key: Option<String>,
    },

    /// Share access to targets
    Share {
        #[command(subcommand)]
        action: ShareAction,
    },

    /// Manage storage aliases
    Alias {
        #[command(subcommand)]
        action: AliasAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Share subcommands.
#[derive(Subcommand)]
pub enum ShareAction {
    /// Generate a curl command to upload objects without access keys
    Upload {
        /// Targets to share upload access for
        #[arg(required = true)]
        targets: Vec<String>,

        /// Allow uploads for any object under the prefix
        #[arg(short, long)]
        recursive: bool,

        /// Share expiry, e.g. 2h, 120h, 7d (default 7d)
        #[arg(long, value_name = "DURATION")]
        expire: Option<String>,

        /// Restrict uploads to a content type
        #[arg(long, value_name = "TYPE")]
        content_type: Option<String>,
    },
}

/// Alias subcommands.
#[derive(Subcommand)]
pub enum AliasAction {
    /// Add or replace an alias
    Set {
        /// Alias name
        name: String,
        /// Endpoint URL (file:// roots are served by the built-in backend)
        url: String,
        #[arg(long)]
        access_key: Option<String>,
        #[arg(long)]
        secret_key: Option<String>,
        /// Signature API variant, e.g. s3v4
        #[arg(long)]
        api: Option<String>,
        /// Bucket lookup style: dns, path or auto
        #[arg(long)]
        lookup: Option<String>,
    },

    /// List configured aliases
    List,

    /// Remove an alias
    Rm {
        /// Alias name
        name: String,
    },
}

/// Global options shared by every command.
pub struct Globals {
    pub json: bool,
    pub config_dir: Option<PathBuf>,
}

/// Execute a command.
pub fn execute(command: Command, globals: Globals) -> crate::error::Result<()> {
    use Command::*;

    match command {
        Pipe {
            target,
            encrypt_key,
        } => pipe::execute(target.as_deref(), encrypt_key.as_deref(), &globals),
        Stat {
            targets,
            recursive,
            encrypt_key,
        } => stat::execute(&targets, recursive, encrypt_key.as_deref(), &globals),
        Share { action } => match action {
            ShareAction::Upload {
                targets,
                recursive,
                expire,
                content_type,
            } => share::upload(
                &targets,
                recursive,
                expire.as_deref(),
                content_type.as_deref(),
                &globals,
            ),
        },
        Alias { action } => match action {
            AliasAction::Set {
                name,
                url,
                access_key,
                secret_key,
                api,
                lookup,
            } => alias::set(
                &name,
                &url,
                access_key,
                secret_key,
                api,
                lookup.as_deref(),
                &globals,
            ),
            AliasAction::List => alias::list(&globals),
            AliasAction::Rm { name } => alias::rm(&name, &globals),
        },
        Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "skiff", &mut io::stdout());
            Ok(())
        }
    }
}
