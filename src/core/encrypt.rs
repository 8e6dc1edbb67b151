//! Per-alias, prefix-scoped SSE-C key registry.
//!
//! A key specification is a whitespace-separated list of
//! `alias/prefix=secret` fields, sourced from `--encrypt-key` or the
//! `SKIFF_ENCRYPT_KEY` environment variable. The registry groups entries by
//! alias and answers "which key covers this target?" with longest-prefix
//! semantics: the most specific registered prefix wins.

use std::collections::HashMap;
use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::core::target;
use crate::error::{EncryptError, Result};

/// Required length of SSE-C key material, in bytes.
pub const SSE_KEY_LEN: usize = 32;

/// Customer-provided encryption key material.
///
/// The raw bytes are handed unchanged to the storage client; nothing in this
/// crate ever derives from or inspects them beyond the length check at parse
/// time. Wiped on drop and redacted from debug output.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SseKey(String);

impl SseKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SseKey(<redacted>)")
    }
}

/// A registered prefix and the key that covers it.
#[derive(Debug, Clone)]
pub struct PrefixKeyPair {
    prefix: String,
    key: SseKey,
}

impl PrefixKeyPair {
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn key(&self) -> &SseKey {
        &self.key
    }
}

/// Immutable mapping from alias to its prefix/key entries.
///
/// Built once per command invocation and then only read; per-alias entries
/// are kept sorted by descending prefix length so resolution can stop at the
/// first match.
#[derive(Debug, Default)]
pub struct KeyRegistry {
    entries: HashMap<String, Vec<PrefixKeyPair>>,
}

impl KeyRegistry {
    /// Parse a key specification into a registry.
    ///
    /// An empty (or all-whitespace) specification is valid and yields an
    /// empty registry: absence of encryption keys is the normal case.
    ///
    /// # Errors
    ///
    /// `EncryptError::MalformedKeySpec` when a field does not contain exactly
    /// one `=`, `EncryptError::InvalidKeyLength` when the secret portion is
    /// not exactly [`SSE_KEY_LEN`] bytes. Either failure rejects the whole
    /// specification.
    pub fn parse(spec: &str) -> Result<Self> {
        let mut entries: HashMap<String, Vec<PrefixKeyPair>> = HashMap::new();

        for field in spec.split_whitespace() {
            let (prefix, secret) = match field.split_once('=') {
                Some((p, s)) if !s.contains('=') => (p, s),
                _ => {
                    return Err(EncryptError::MalformedKeySpec {
                        field: field.to_string(),
                    }
                    .into())
                }
            };

            if secret.len() != SSE_KEY_LEN {
                return Err(EncryptError::InvalidKeyLength {
                    field: field.to_string(),
                    length: secret.len(),
                }
                .into());
            }

            // The alias segment groups the entry; the prefix itself stays
            // undecomposed and is compared against full target expressions.
            let (alias, _) = target::split_alias(prefix);
            entries.entry(alias.to_string()).or_default().push(PrefixKeyPair {
                prefix: prefix.to_string(),
                key: SseKey(secret.to_string()),
            });
        }

        for pairs in entries.values_mut() {
            // Stable sort: equal-length prefixes keep their input order.
            pairs.sort_by(|a, b| b.prefix.len().cmp(&a.prefix.len()));
        }

        Ok(Self { entries })
    }

    /// Return the key of the longest registered prefix of `resource` under
    /// `alias`, or `None` when the alias is unknown or nothing matches.
    pub fn resolve(&self, alias: &str, resource: &str) -> Option<&SseKey> {
        self.entries
            .get(alias)?
            .iter()
            .find(|pair| resource.starts_with(pair.prefix.as_str()))
            .map(|pair| &pair.key)
    }

    /// Entries registered under `alias`, longest prefix first.
    pub fn entries(&self, alias: &str) -> &[PrefixKeyPair] {
        self.entries.get(alias).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Total number of registered entries across all aliases.
    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
