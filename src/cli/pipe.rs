//! Pipe command.
//!
//! Streams stdin to a target, selecting a server-side encryption key for it
//! from the `--encrypt-key` specification. With no target, stdin is copied
//! through to stdout.

use std::io;

use tracing::debug;

use crate::cli::Globals;
use crate::core::client;
use crate::core::config::Config;
use crate::core::encrypt::KeyRegistry;
use crate::core::target;
use crate::error::{Error, Result};

/// Stream stdin to `target`, or to stdout when no target is given.
pub fn execute(target: Option<&str>, encrypt_key: Option<&str>, globals: &Globals) -> Result<()> {
    let Some(target) = target else {
        return copy_to_stdout();
    };

    let registry = KeyRegistry::parse(encrypt_key.unwrap_or_default())?;
    debug!(entries = registry.len(), "encryption key registry built");

    let dir = Config::dir(globals.config_dir.as_deref())?;
    let config = Config::load_or_default(&dir)?;
    let client = client::new_client(target, &config)?;

    let (alias, _) = target::split_alias(target);
    let sse_key = registry.resolve(alias, target);
    if sse_key.is_some() {
        debug!(target, "resolved encryption key for target");
    }

    let mut stdin = io::stdin().lock();
    match client.put(&mut stdin, -1, sse_key) {
        // Stdin closed by the user mid-stream. Gracefully exit.
        Err(Error::Io(e)) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        Err(e) => Err(e),
        Ok(written) => {
            debug!(written, "pipe complete");
            Ok(())
        }
    }
}

fn copy_to_stdout() -> Result<()> {
    let mut stdin = io::stdin().lock();
    let mut stdout = io::stdout().lock();
    match io::copy(&mut stdin, &mut stdout) {
        Ok(_) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        Err(e) => Err(e.into()),
    }
}
