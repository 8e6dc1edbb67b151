//! Core library components.
//!
//! Reusable logic for encryption-key routing, target handling, alias
//! configuration, and storage clients.

pub mod client;
pub mod config;
pub mod encrypt;
pub mod share;
pub mod target;
