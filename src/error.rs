use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error wrapping the per-domain error kinds.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Encrypt(#[from] EncryptError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Share(#[from] ShareError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

/// Failures while parsing an encryption-key specification.
///
/// Both kinds reject the whole specification; a partially built registry is
/// never handed back.
#[derive(Error, Debug)]
pub enum EncryptError {
    #[error("encryption key spec must be of the form alias/prefix=key: `{field}`")]
    MalformedKeySpec { field: String },

    #[error("encryption key must be exactly 32 bytes, got {length}: `{field}`")]
    InvalidKeyLength { field: String, length: usize },
}

/// Alias configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("unable to determine home directory")]
    NoHomeDir,

    #[error("unable to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("unable to write config file: {0}")]
    WriteFile(#[source] std::io::Error),

    #[error("config parse error: {0}")]
    Parse(#[source] toml::de::Error),

    #[error("config serialize error: {0}")]
    Serialize(#[source] toml::ser::Error),

    #[error("alias not found: {0}")]
    AliasNotFound(String),
}

/// Storage-client errors.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("target not found: `{target}`")]
    NotFound { target: String },

    #[error("alias `{alias}` points at `{url}`: remote transports are not built in")]
    UnsupportedScheme { alias: String, url: String },

    #[error("unable to share a non object-storage target: `{target}`")]
    ShareUnsupported { target: String },
}

/// Share-upload errors.
#[derive(Error, Debug)]
pub enum ShareError {
    #[error("unable to parse expiry: `{0}`")]
    InvalidExpiry(String),

    #[error("expiry cannot be less than 1 second")]
    ExpiryTooShort,

    #[error("expiry cannot be larger than 7 days")]
    ExpiryTooLong,

    #[error("use --recursive to generate an upload command for the prefix `{target}`")]
    PrefixNeedsRecursive { target: String },

    #[error("share database is corrupt: {0}")]
    DbParse(#[source] serde_json::Error),
}
