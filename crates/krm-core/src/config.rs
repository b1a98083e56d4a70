//! Plugin configuration file loading

use crate::error::{Error, Result};
use camino::Utf8Path;
use serde::de::DeserializeOwned;
use std::fs;
use tracing::debug;

/// Read a YAML config file and deserialize it into `T`.
///
/// A missing file maps to [`Error::ConfigNotFound`]. An empty file is read
/// as an empty mapping so that every optional setting takes its default.
pub fn load_yaml_file<T: DeserializeOwned>(path: &Utf8Path) -> Result<T> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::config_not_found(path.as_str())
        } else {
            Error::Io(e)
        }
    })?;
    debug!("Loaded plugin config from {}", path);

    let content = if content.trim().is_empty() {
        "{}"
    } else {
        content.as_str()
    };
    Ok(serde_yaml_ng::from_str(content)?)
}
