//! # krm-env-placeholder
//!
//! Kustomize exec transformer replacing `${env:NAME}` placeholders in the
//! resources matched by its `resourceSelectors`. Secret `data` and `tls`
//! values are base64-decoded before substitution and re-encoded after.

pub mod config;
pub mod transformer;

pub use config::PlaceholderConfig;
pub use transformer::PlaceholderTransformer;
