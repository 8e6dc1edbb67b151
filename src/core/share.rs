//! Upload sharing.
//!
//! Turns pre-signed upload access into a ready-to-run `curl` command and
//! keeps a record of generated shares in `<config-dir>/share/uploads.json`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::client::UploadInfo;
use crate::error::{Result, ShareError};

/// Upper bound on share expiry: 7 days, the longest a pre-signed request
/// stays valid.
pub const MAX_EXPIRY_SECS: u64 = 604_800;

/// Directory under the config dir holding share records.
pub const SHARE_DIR: &str = "share";

/// File name of the upload-share database.
pub const UPLOADS_FILE: &str = "uploads.json";

/// Default expiry applied when `--expire` is absent.
pub fn default_expiry() -> Duration {
    Duration::from_secs(MAX_EXPIRY_SECS)
}

/// Parse a compact duration such as `90s`, `15m`, `2h`, `7d` or `1h30m`.
pub fn parse_expiry(input: &str) -> Result<Duration> {
    let invalid = || ShareError::InvalidExpiry(input.to_string());

    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(invalid().into());
    }

    let mut total: u64 = 0;
    let mut digits = String::new();
    let mut saw_segment = false;

    for ch in trimmed.chars() {
        if ch.is_ascii_digit() {
            digits.push(ch);
            continue;
        }
        let value: u64 = digits.parse().map_err(|_| invalid())?;
        let unit: u64 = match ch {
            's' => 1,
            'm' => 60,
            'h' => 3600,
            'd' => 86_400,
            _ => return Err(invalid().into()),
        };
        total = total.saturating_add(value.saturating_mul(unit));
        digits.clear();
        saw_segment = true;
    }

    // A trailing number without a unit is not a duration.
    if !digits.is_empty() || !saw_segment {
        return Err(invalid().into());
    }

    Ok(Duration::from_secs(total))
}

/// Render a duration compactly, e.g. `7d`, `2h30m`, `45s`.
pub fn format_expiry(expiry: Duration) -> String {
    let mut secs = expiry.as_secs();
    if secs == 0 {
        return "0s".to_string();
    }

    let mut out = String::new();
    for (unit, label) in [(86_400, "d"), (3600, "h"), (60, "m"), (1, "s")] {
        let count = secs / unit;
        if count > 0 {
            out.push_str(&format!("{count}{label}"));
            secs %= unit;
        }
    }
    out
}

/// Validate that an expiry sits inside the allowed window.
pub fn validate_expiry(expiry: Duration) -> Result<()> {
    if expiry < Duration::from_secs(1) {
        return Err(ShareError::ExpiryTooShort.into());
    }
    if expiry > Duration::from_secs(MAX_EXPIRY_SECS) {
        return Err(ShareError::ExpiryTooLong.into());
    }
    Ok(())
}

/// Render the `curl` command for pre-signed upload access.
///
/// Form fields are emitted in deterministic order. The `key` field is held
/// back until the end so the object name sits next to the file argument;
/// recursive shares append the `<NAME>` placeholder the user substitutes per
/// object.
pub fn curl_command(upload: &UploadInfo, recursive: bool) -> String {
    let mut cmd = format!("curl {}", upload.url);
    let mut object_key = "";

    for (field, value) in &upload.form_data {
        if field == "key" {
            object_key = value;
            continue;
        }
        cmd.push_str(&format!(" -F {field}={value}"));
    }

    if recursive {
        cmd.push_str(&format!(" -F key={object_key}<NAME>"));
    } else {
        cmd.push_str(&format!(" -F key={object_key}"));
    }
    cmd.push_str(" -F file=@<FILE>");
    cmd
}

/// One generated upload share.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareRecord {
    pub object_url: String,
    /// The rendered `curl` command.
    pub share_url: String,
    pub date: DateTime<Utc>,
    pub expiry_secs: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

impl ShareRecord {
    /// Whether the share has expired as of `now`.
    pub fn expired(&self, now: DateTime<Utc>) -> bool {
        let deadline = self.date + chrono::Duration::seconds(self.expiry_secs as i64);
        now >= deadline
    }
}

/// The persisted collection of upload shares.
#[derive(Debug, Serialize, Deserialize)]
pub struct ShareDb {
    pub version: String,
    #[serde(default)]
    pub shares: Vec<ShareRecord>,
}

impl ShareDb {
    pub fn new() -> Self {
        Self {
            version: "1".to_string(),
            shares: Vec::new(),
        }
    }

    /// Path of the database file under `config_dir`.
    pub fn path(config_dir: &Path) -> PathBuf {
        config_dir.join(SHARE_DIR).join(UPLOADS_FILE)
    }

    /// Load the database, treating a missing file as empty.
    pub fn load(config_dir: &Path) -> Result<Self> {
        let path = Self::path(config_dir);
        if !path.exists() {
            return Ok(Self::new());
        }
        let contents = std::fs::read_to_string(&path)?;
        let db: Self = serde_json::from_str(&contents).map_err(ShareError::DbParse)?;
        debug!(shares = db.shares.len(), "share db loaded");
        Ok(db)
    }

    /// Insert a record, replacing any existing share for the same object.
    pub fn set(&mut self, record: ShareRecord) {
        self.shares.retain(|r| r.object_url != record.object_url);
        self.shares.push(record);
    }

    /// Drop records whose expiry has passed as of `now`.
    pub fn prune_expired(&mut self, now: DateTime<Utc>) {
        self.shares.retain(|r| !r.expired(now));
    }

    /// Prune expired records and write the database.
    ///
    /// The file carries live upload URLs, so permissions are restricted to
    /// the owner on Unix.
    pub fn save(&mut self, config_dir: &Path) -> Result<()> {
        self.prune_expired(Utc::now());

        let path = Self::path(config_dir);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o600))?;
        }

        debug!(path = %path.display(), shares = self.shares.len(), "share db saved");
        Ok(())
    }
}

impl Default for ShareDb {
    fn default() -> Self {
        Self::new()
    }
}
