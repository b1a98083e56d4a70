//! Resource selector matching
//!
//! A selector constrains any of `kind`, `apiVersion`, `namespace` and `name`.
//! Fields left out of a selector match anything; a list of selectors is
//! satisfied when any one of them matches.

use crate::document::{str_field, Document};
use serde::{Deserialize, Serialize};

/// Filter describing which resources a transformation applies to
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ResourceSelector {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Identity of a resource, read from its top-level fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceMetadata {
    pub kind: String,
    pub api_version: String,
    pub name: String,
    pub namespace: String,
}

impl ResourceMetadata {
    /// Derive metadata from a document; absent fields become empty strings
    pub fn from_document(document: &Document) -> Self {
        let metadata = document.get("metadata");
        let meta_field = |key: &str| {
            metadata
                .and_then(|m| m.get(key))
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string()
        };

        Self {
            kind: str_field(document, "kind").unwrap_or_default().to_string(),
            api_version: str_field(document, "apiVersion")
                .unwrap_or_default()
                .to_string(),
            name: meta_field("name"),
            namespace: meta_field("namespace"),
        }
    }
}

impl ResourceSelector {
    /// Check whether every field this selector sets equals the resource's
    pub fn matches(&self, metadata: &ResourceMetadata) -> bool {
        fn field_matches(expected: &Option<String>, actual: &str) -> bool {
            expected.as_deref().is_none_or(|e| e == actual)
        }

        field_matches(&self.kind, &metadata.kind)
            && field_matches(&self.api_version, &metadata.api_version)
            && field_matches(&self.namespace, &metadata.namespace)
            && field_matches(&self.name, &metadata.name)
    }
}

/// Match a document against a list of selectors.
///
/// Non-mapping documents never match. An empty selector list matches every
/// mapping document. The derived metadata is returned either way.
pub fn matches(document: &Document, selectors: &[ResourceSelector]) -> (bool, ResourceMetadata) {
    if !document.is_mapping() {
        return (false, ResourceMetadata::default());
    }

    let metadata = ResourceMetadata::from_document(document);
    if selectors.is_empty() {
        return (true, metadata);
    }

    let matched = selectors.iter().any(|s| s.matches(&metadata));
    (matched, metadata)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(yaml: &str) -> Document {
        serde_yaml_ng::from_str(yaml).unwrap()
    }

    fn kind(kind: &str) -> ResourceSelector {
        ResourceSelector {
            kind: Some(kind.to_string()),
            ..Default::default()
        }
    }

    const DEPLOYMENT: &str = r#"
apiVersion: apps/v1
kind: Deployment
metadata:
  name: web
  namespace: prod
spec: {}
"#;

    #[test]
    fn test_metadata_from_document() {
        let meta = ResourceMetadata::from_document(&doc(DEPLOYMENT));
        assert_eq!(meta.kind, "Deployment");
        assert_eq!(meta.api_version, "apps/v1");
        assert_eq!(meta.name, "web");
        assert_eq!(meta.namespace, "prod");
    }

    #[test]
    fn test_metadata_defaults_to_empty() {
        let meta = ResourceMetadata::from_document(&doc("kind: ConfigMap\n"));
        assert_eq!(meta.kind, "ConfigMap");
        assert!(meta.api_version.is_empty());
        assert!(meta.name.is_empty());
        assert!(meta.namespace.is_empty());
    }

    #[test]
    fn test_empty_selectors_match_everything() {
        let (matched, meta) = matches(&doc(DEPLOYMENT), &[]);
        assert!(matched);
        assert_eq!(meta.name, "web");

        let (matched, _) = matches(&doc("foo: bar\n"), &[]);
        assert!(matched);
    }

    #[test]
    fn test_non_mapping_never_matches() {
        let (matched, meta) = matches(&doc("- a\n- b\n"), &[]);
        assert!(!matched);
        assert_eq!(meta, ResourceMetadata::default());
    }

    #[test]
    fn test_kind_selector() {
        let d = doc(DEPLOYMENT);
        assert!(matches(&d, &[kind("Deployment")]).0);
        assert!(!matches(&d, &[kind("Secret")]).0);
    }

    #[test]
    fn test_all_specified_fields_must_match() {
        let d = doc(DEPLOYMENT);
        let mut selector = kind("Deployment");
        selector.namespace = Some("prod".to_string());
        selector.name = Some("web".to_string());
        selector.api_version = Some("apps/v1".to_string());
        assert!(matches(&d, &[selector.clone()]).0);

        selector.name = Some("api".to_string());
        assert!(!matches(&d, &[selector]).0);
    }

    #[test]
    fn test_any_selector_matches() {
        let d = doc(DEPLOYMENT);
        assert!(matches(&d, &[kind("Secret"), kind("Deployment")]).0);
        assert!(!matches(&d, &[kind("Secret"), kind("ConfigMap")]).0);
    }

    #[test]
    fn test_selector_on_missing_namespace() {
        let d = doc("kind: ConfigMap\nmetadata:\n  name: cm\n");
        let selector = ResourceSelector {
            namespace: Some("prod".to_string()),
            ..Default::default()
        };
        assert!(!matches(&d, &[selector]).0);
    }

    #[test]
    fn test_selector_deserialize() {
        let selector: ResourceSelector =
            serde_yaml_ng::from_str("kind: Secret\napiVersion: v1\nname: creds\n").unwrap();
        assert_eq!(selector.kind.as_deref(), Some("Secret"));
        assert_eq!(selector.api_version.as_deref(), Some("v1"));
        assert_eq!(selector.name.as_deref(), Some("creds"));
        assert!(selector.namespace.is_none());
    }

    #[test]
    fn test_selector_rejects_unknown_fields() {
        let result: std::result::Result<ResourceSelector, _> =
            serde_yaml_ng::from_str("knd: Secret\n");
        assert!(result.is_err());
    }
}
