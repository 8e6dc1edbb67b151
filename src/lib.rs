//! Skiff - a small object-storage style CLI.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── pipe          # Stream stdin to a target
//! │   ├── stat          # Stat objects and folders
//! │   ├── share         # Generate credential-free upload commands
//! │   ├── alias         # Manage storage aliases
//! │   └── output        # Terminal output helpers
//! └── core/             # Core library components
//!     ├── encrypt       # Per-prefix SSE-C key registry
//!     ├── target        # Target expression handling
//!     ├── config        # Alias table (config.toml)
//!     ├── client/       # Storage backends
//!     │   ├── mod       # Client trait
//!     │   └── fs        # Filesystem backend
//!     └── share         # Expiry rules, curl rendering, share records
//! ```
//!
//! # Features
//!
//! - Longest-prefix routing of customer-provided encryption keys (SSE-C)
//! - Alias-addressed targets with a pluggable storage-client seam
//! - Shareable `curl` upload commands with bounded expiry
//! - Streaming pipe from stdin to any target

pub mod cli;
pub mod core;
pub mod error;
