//! Storage client abstraction.
//!
//! Commands address a target through the [`Client`] trait and never care
//! which backend serves it. The built-in backend is the filesystem; remote
//! object-storage transports plug in behind the same trait.
//!
//! ## Adding a New Backend
//!
//! 1. Implement the `Client` trait
//! 2. Teach [`new_client`] to construct it from the alias entry
//!
//! ## Example
//!
//! ```ignore
//! struct S3 { /* ... */ }
//!
//! impl Client for S3 {
//!     fn put(&self, reader: &mut dyn Read, size: i64, sse_key: Option<&SseKey>) -> Result<u64> {
//!         // Stream to the endpoint, passing the key with the request
//!     }
//!     // ...
//! }
//! ```

use std::collections::BTreeMap;
use std::io::Read;
use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::core::config::Config;
use crate::core::encrypt::SseKey;
use crate::core::target;
use crate::error::{ClientError, Result};

mod fs;

pub use fs::Filesystem;

/// Metadata for a single object or directory.
#[derive(Debug, Clone, Serialize)]
pub struct ObjectInfo {
    /// Target expression the entry answers for.
    pub key: String,
    pub size: u64,
    pub modified: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    pub is_dir: bool,
}

/// Pre-signed upload access for a target: the URL to post to and the form
/// fields that must accompany the file.
#[derive(Debug, Clone)]
pub struct UploadInfo {
    pub url: String,
    pub form_data: BTreeMap<String, String>,
}

/// A storage backend serving one target.
pub trait Client: std::fmt::Debug {
    /// The target expression this client addresses.
    fn target(&self) -> &str;

    /// Stream `reader` into the target. A negative `size` means the length
    /// is unknown (e.g. stdin). The key, when present, is passed to the
    /// server unchanged; backends without a server side ignore it.
    ///
    /// Returns the number of bytes written.
    fn put(&self, reader: &mut dyn Read, size: i64, sse_key: Option<&SseKey>) -> Result<u64>;

    /// Stat the target.
    fn stat(&self, sse_key: Option<&SseKey>) -> Result<ObjectInfo>;

    /// List entries under the target. Non-recursive listing returns the
    /// immediate children; recursive listing returns every object below it.
    fn list(&self, recursive: bool) -> Result<Vec<ObjectInfo>>;

    /// Generate pre-signed upload access for the target.
    fn share_upload(
        &self,
        recursive: bool,
        expiry: Duration,
        content_type: Option<&str>,
    ) -> Result<UploadInfo>;
}

/// Construct the client serving `target`.
///
/// A target under a configured alias is addressed relative to the alias URL;
/// anything else is a plain filesystem path.
///
/// # Errors
///
/// `ClientError::UnsupportedScheme` when the alias points at a remote
/// endpoint no built-in backend serves.
pub fn new_client(target: &str, config: &Config) -> Result<Box<dyn Client>> {
    let (alias, rest) = target::split_alias(target);

    if let Some(entry) = config.alias(alias) {
        return match entry.file_root() {
            Some(root) => Ok(Box::new(Filesystem::new(target, root.join(rest)))),
            None => Err(ClientError::UnsupportedScheme {
                alias: alias.to_string(),
                url: entry.url.clone(),
            }
            .into()),
        };
    }

    Ok(Box::new(Filesystem::new(target, PathBuf::from(target))))
}
