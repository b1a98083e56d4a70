//! # krm-remote-resources
//!
//! Kustomize exec generator that downloads YAML resource streams from the
//! URLs in its config, optionally verifies their SHA256 digest, and emits
//! every document they contain.

pub mod config;
pub mod fetcher;
pub mod generator;

pub use config::{RemoteConfig, RemoteResource};
pub use fetcher::{ResourceFetcher, UrlFetcher};
pub use generator::RemoteResourceGenerator;
