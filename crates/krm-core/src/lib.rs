//! # krm-core
//!
//! Shared building blocks for the krm exec plugins:
//! - YAML document stream decoding and encoding
//! - Resource selector matching
//! - Recursive `${env:NAME}` placeholder replacement
//! - SHA256 checksum validation
//! - Config file loading and tracing setup

pub mod checksum;
pub mod config;
pub mod document;
pub mod error;
pub mod logging;
pub mod placeholder;
pub mod selector;

pub use document::Document;
pub use error::{Error, Result};
