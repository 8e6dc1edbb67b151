//! Share upload command.
//!
//! Generates `curl` commands that allow uploads to a target without handing
//! out credentials, and records each generated share.

use chrono::Utc;
use serde::Serialize;
use tracing::debug;

use crate::cli::{output, Globals};
use crate::core::client;
use crate::core::config::Config;
use crate::core::share::{self, ShareDb, ShareRecord};
use crate::error::{Result, ShareError};

/// Message printed for each generated upload share.
#[derive(Debug, Serialize)]
struct ShareMessage {
    object_url: String,
    share: String,
    expiry_secs: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    content_type: Option<String>,
}

/// Generate upload access for each target and persist the records.
pub fn upload(
    targets: &[String],
    recursive: bool,
    expire: Option<&str>,
    content_type: Option<&str>,
    globals: &Globals,
) -> Result<()> {
    let expiry = match expire {
        Some(raw) => share::parse_expiry(raw)?,
        None => share::default_expiry(),
    };
    share::validate_expiry(expiry)?;

    for target in targets {
        if target.ends_with('/') && !recursive {
            return Err(ShareError::PrefixNeedsRecursive {
                target: target.clone(),
            }
            .into());
        }
    }

    let dir = Config::dir(globals.config_dir.as_deref())?;
    let config = Config::load_or_default(&dir)?;
    let mut db = ShareDb::load(&dir)?;

    for target in targets {
        let client = client::new_client(target, &config)?;
        let upload = client.share_upload(recursive, expiry, content_type)?;
        let curl = share::curl_command(&upload, recursive);
        debug!(target, "generated upload share");

        let message = ShareMessage {
            object_url: target.clone(),
            share: curl.clone(),
            expiry_secs: expiry.as_secs(),
            content_type: content_type.map(String::from),
        };
        print_share(&message, globals.json)?;

        db.set(ShareRecord {
            object_url: target.clone(),
            share_url: curl,
            date: Utc::now(),
            expiry_secs: expiry.as_secs(),
            content_type: content_type.map(String::from),
        });
    }

    db.save(&dir)
}

fn print_share(message: &ShareMessage, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(message)?);
        return Ok(());
    }

    output::section(&message.object_url);
    output::kv(
        "expire",
        share::format_expiry(std::time::Duration::from_secs(message.expiry_secs)),
    );
    if let Some(content_type) = &message.content_type {
        output::kv("content-type", content_type);
    }
    output::kv("share", &message.share);
    Ok(())
}
