//! Remote resources plugin configuration

use camino::Utf8Path;
use krm_core::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One remote location to generate resources from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteResource {
    /// Where to fetch the YAML stream from (`http`, `https` or `file`)
    pub url: String,

    /// Expected lowercase hex SHA256 of the fetched bytes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha256: Option<String>,
}

/// Validated plugin configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteConfig {
    /// Fetch targets, in output order; never empty
    pub resources: Vec<RemoteResource>,
}

/// Config file as written, before validation
#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    #[serde(default)]
    resources: Vec<RawResource>,
}

#[derive(Debug, Deserialize)]
struct RawResource {
    url: Option<String>,
    sha256: Option<String>,
}

impl RemoteConfig {
    /// Load and validate the plugin config from `path`
    pub fn load(path: &Utf8Path) -> Result<Self> {
        let raw: RawConfig = krm_core::config::load_yaml_file(path)?;
        Self::validate(raw)
    }

    /// Parse and validate a config document
    pub fn from_yaml(content: &str) -> Result<Self> {
        let raw: RawConfig = serde_yaml_ng::from_str(content)?;
        Self::validate(raw)
    }

    fn validate(raw: RawConfig) -> Result<Self> {
        if raw.resources.is_empty() {
            return Err(Error::invalid_config("resources is required"));
        }

        let resources = raw
            .resources
            .into_iter()
            .map(|r| match r.url {
                Some(url) => Ok(RemoteResource {
                    url,
                    sha256: r.sha256,
                }),
                None => Err(Error::invalid_config("resources.url is required")),
            })
            .collect::<Result<Vec<_>>>()?;

        debug!("Loaded {} remote resource(s)", resources.len());
        Ok(Self { resources })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_config() {
        let yaml = r#"
apiVersion: badjware/v1
kind: RemoteResources
metadata:
  name: upstream
resources:
  - url: https://example.com/a.yaml
    sha256: abc123
  - url: https://example.com/b.yaml
"#;
        let config = RemoteConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.resources.len(), 2);
        assert_eq!(config.resources[0].sha256.as_deref(), Some("abc123"));
        assert_eq!(config.resources[1].url, "https://example.com/b.yaml");
        assert!(config.resources[1].sha256.is_none());
    }

    #[test]
    fn test_empty_resources_rejected() {
        let err = RemoteConfig::from_yaml("resources: []\n").unwrap_err();
        assert_eq!(err.to_string(), "Invalid configuration: resources is required");
    }

    #[test]
    fn test_missing_resources_rejected() {
        let err = RemoteConfig::from_yaml("kind: RemoteResources\n").unwrap_err();
        assert!(matches!(err, Error::InvalidConfig { .. }));
    }

    #[test]
    fn test_missing_url_rejected() {
        let yaml = "resources:\n  - url: https://example.com/a.yaml\n  - sha256: abc\n";
        let err = RemoteConfig::from_yaml(yaml).unwrap_err();
        assert_eq!(err.to_string(), "Invalid configuration: resources.url is required");
    }
}
