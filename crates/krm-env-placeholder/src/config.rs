//! Placeholder plugin configuration

use camino::Utf8Path;
use krm_core::selector::ResourceSelector;
use serde::{Deserialize, Serialize};

/// Plugin config file, e.g.
///
/// ```yaml
/// apiVersion: badjware/v1
/// kind: EnvironmentPlaceholderTransformer
/// metadata:
///   name: env
/// resourceSelectors:
///   - kind: Secret
/// ```
///
/// Keys other than `resourceSelectors` belong to the kustomize plugin
/// manifest and are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceholderConfig {
    /// Resources to transform; empty means every resource
    #[serde(default)]
    pub resource_selectors: Vec<ResourceSelector>,
}

impl PlaceholderConfig {
    /// Load the plugin config from `path`
    pub fn load(path: &Utf8Path) -> krm_core::Result<Self> {
        let config: Self = krm_core::config::load_yaml_file(path)?;
        tracing::debug!(
            "Loaded {} resource selector(s)",
            config.resource_selectors.len()
        );
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_no_selectors() {
        let config: PlaceholderConfig =
            serde_yaml_ng::from_str("apiVersion: badjware/v1\nkind: EnvironmentPlaceholderTransformer\n")
                .unwrap();
        assert!(config.resource_selectors.is_empty());
    }

    #[test]
    fn test_parses_selectors() {
        let yaml = r#"
resourceSelectors:
  - kind: Secret
  - kind: ConfigMap
    namespace: prod
"#;
        let config: PlaceholderConfig = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(config.resource_selectors.len(), 2);
        assert_eq!(config.resource_selectors[1].namespace.as_deref(), Some("prod"));
    }
}
