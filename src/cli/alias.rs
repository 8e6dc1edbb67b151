//! Alias management commands.

use crate::cli::{output, Globals};
use crate::core::config::{AliasEntry, Config, Lookup};
use crate::error::{ConfigError, Error, Result};

/// Add or replace a storage alias.
pub fn set(
    name: &str,
    url: &str,
    access_key: Option<String>,
    secret_key: Option<String>,
    api: Option<String>,
    lookup: Option<&str>,
    globals: &Globals,
) -> Result<()> {
    let supported = ["file://", "http://", "https://"];
    if !supported.iter().any(|scheme| url.starts_with(scheme)) {
        return Err(Error::Other(format!(
            "alias URL must start with file://, http:// or https://: `{url}`"
        )));
    }

    let dir = Config::dir(globals.config_dir.as_deref())?;
    let mut config = Config::load_or_default(&dir)?;

    let previous = config.aliases.insert(
        name.to_string(),
        AliasEntry {
            url: url.to_string(),
            access_key,
            secret_key,
            api,
            lookup: lookup.map(Lookup::from_flag).unwrap_or_default(),
        },
    );
    config.save(&dir)?;

    if let Some(previous) = previous {
        output::warn(&format!("replaced existing alias `{name}` ({})", previous.url));
    }

    output::success(&format!("alias `{name}` set to {url}"));
    Ok(())
}

/// List configured aliases.
pub fn list(globals: &Globals) -> Result<()> {
    let dir = Config::dir(globals.config_dir.as_deref())?;
    let config = Config::load_or_default(&dir)?;

    if globals.json {
        println!("{}", serde_json::to_string_pretty(&config.aliases)?);
        return Ok(());
    }

    if config.aliases.is_empty() {
        output::dimmed("no aliases configured");
        output::hint(&format!(
            "add one with {}",
            output::cmd("skiff alias set NAME file:///path")
        ));
        return Ok(());
    }

    for (name, entry) in &config.aliases {
        output::kv(name, &entry.url);
    }
    Ok(())
}

/// Remove a storage alias.
pub fn rm(name: &str, globals: &Globals) -> Result<()> {
    let dir = Config::dir(globals.config_dir.as_deref())?;
    let mut config = Config::load_or_default(&dir)?;

    if config.aliases.remove(name).is_none() {
        return Err(ConfigError::AliasNotFound(name.to_string()).into());
    }
    config.save(&dir)?;

    output::success(&format!("alias `{name}` removed"));
    Ok(())
}
