//! Filesystem storage backend.
//!
//! Serves plain paths and `file://` alias roots. The filesystem has no
//! server side, so encryption keys and pre-signed uploads have nothing to
//! attach to: keys are accepted and ignored, sharing is declined.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::debug;

use super::{Client, ObjectInfo, UploadInfo};
use crate::core::encrypt::SseKey;
use crate::error::{ClientError, Result};

/// Filesystem-backed client for one target.
#[derive(Debug)]
pub struct Filesystem {
    target: String,
    path: PathBuf,
}

impl Filesystem {
    pub fn new(target: impl Into<String>, path: PathBuf) -> Self {
        Self {
            target: target.into(),
            path,
        }
    }

    fn metadata(&self, path: &Path) -> Result<fs::Metadata> {
        fs::metadata(path).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                ClientError::NotFound {
                    target: self.target.clone(),
                }
                .into()
            } else {
                e.into()
            }
        })
    }

    fn info(&self, key: String, meta: &fs::Metadata) -> Result<ObjectInfo> {
        let modified = meta.modified().map(DateTime::<Utc>::from)?;
        Ok(ObjectInfo {
            key,
            size: meta.len(),
            modified,
            etag: None,
            content_type: None,
            is_dir: meta.is_dir(),
        })
    }

    fn walk(&self, dir: &Path, key_prefix: &str, recursive: bool, out: &mut Vec<ObjectInfo>) -> Result<()> {
        let mut entries: Vec<fs::DirEntry> = fs::read_dir(dir)?.collect::<io::Result<_>>()?;
        entries.sort_by_key(|e| e.file_name());

        for entry in entries {
            let name = entry.file_name().to_string_lossy().into_owned();
            let key = if key_prefix.is_empty() {
                name
            } else {
                format!("{}/{}", key_prefix.trim_end_matches('/'), name)
            };
            let meta = entry.metadata()?;

            if meta.is_dir() {
                if recursive {
                    self.walk(&entry.path(), &key, recursive, out)?;
                } else {
                    out.push(self.info(format!("{key}/"), &meta)?);
                }
            } else {
                out.push(self.info(key, &meta)?);
            }
        }
        Ok(())
    }
}

impl Client for Filesystem {
    fn target(&self) -> &str {
        &self.target
    }

    fn put(&self, reader: &mut dyn Read, _size: i64, sse_key: Option<&SseKey>) -> Result<u64> {
        if sse_key.is_some() {
            debug!(target = %self.target, "filesystem target has no server side; ignoring encryption key");
        }

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut file = fs::File::create(&self.path)?;
        let written = io::copy(reader, &mut file)?;
        debug!(path = %self.path.display(), written, "put complete");
        Ok(written)
    }

    fn stat(&self, _sse_key: Option<&SseKey>) -> Result<ObjectInfo> {
        let meta = self.metadata(&self.path)?;
        self.info(self.target.clone(), &meta)
    }

    fn list(&self, recursive: bool) -> Result<Vec<ObjectInfo>> {
        let meta = self.metadata(&self.path)?;
        if !meta.is_dir() {
            return Ok(vec![self.info(self.target.clone(), &meta)?]);
        }

        let mut out = Vec::new();
        self.walk(&self.path, self.target.trim_end_matches('/'), recursive, &mut out)?;
        Ok(out)
    }

    fn share_upload(
        &self,
        _recursive: bool,
        _expiry: Duration,
        _content_type: Option<&str>,
    ) -> Result<UploadInfo> {
        Err(ClientError::ShareUnsupported {
            target: self.target.clone(),
        }
        .into())
    }
}
