//! Stat command.
//!
//! Stats objects and folders, resolving a server-side encryption key per
//! target the same way `pipe` does.

use crate::cli::{output, Globals};
use crate::core::client::{self, ObjectInfo};
use crate::core::config::Config;
use crate::core::encrypt::KeyRegistry;
use crate::core::target;
use crate::error::{Error, Result};

/// Stat each target, descending into folders when `recursive` is set.
pub fn execute(
    targets: &[String],
    recursive: bool,
    encrypt_key: Option<&str>,
    globals: &Globals,
) -> Result<()> {
    for target in targets {
        if target.trim().is_empty() {
            return Err(Error::Other("unable to validate empty argument".to_string()));
        }
    }

    let registry = KeyRegistry::parse(encrypt_key.unwrap_or_default())?;
    let dir = Config::dir(globals.config_dir.as_deref())?;
    let config = Config::load_or_default(&dir)?;

    for target in targets {
        let client = client::new_client(target, &config)?;

        let (alias, _) = target::split_alias(target);
        let sse_key = registry.resolve(alias, target);

        let info = client.stat(sse_key)?;
        if info.is_dir && recursive {
            for entry in client.list(true)? {
                print_stat(&entry, globals.json)?;
            }
        } else {
            print_stat(&info, globals.json)?;
        }
    }

    Ok(())
}

fn print_stat(info: &ObjectInfo, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(info)?);
        return Ok(());
    }

    output::section(&info.key);
    output::kv("date", info.modified.format("%Y-%m-%d %H:%M:%S UTC"));
    output::kv("size", format!("{} B", info.size));
    output::kv("type", if info.is_dir { "folder" } else { "file" });
    if let Some(etag) = &info.etag {
        output::kv("etag", etag);
    }
    if let Some(content_type) = &info.content_type {
        output::kv("content-type", content_type);
    }
    Ok(())
}
