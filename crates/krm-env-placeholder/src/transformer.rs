//! Environment placeholder transformation of a resource stream

use crate::config::PlaceholderConfig;
use krm_core::document::{decode_stream, Document};
use krm_core::placeholder::{replace, Lookup, PLACEHOLDER_RE};
use krm_core::selector;
use krm_core::Result;
use serde_yaml_ng::Value;
use tracing::{debug, info};

/// Top-level fields that identify a resource and are never rewritten
const IDENTITY_FIELDS: &[&str] = &["apiVersion", "kind", "metadata"];

/// Secret fields holding base64-encoded values.
///
/// `stringData` holds plain text but is deliberately not processed.
const SECRET_BASE64_FIELDS: &[&str] = &["data", "tls"];

/// Replaces `${env:NAME}` placeholders in the resources its selectors match
pub struct PlaceholderTransformer<'a> {
    config: &'a PlaceholderConfig,
    lookup: &'a dyn Lookup,
}

impl<'a> PlaceholderTransformer<'a> {
    pub fn new(config: &'a PlaceholderConfig, lookup: &'a dyn Lookup) -> Self {
        Self { config, lookup }
    }

    /// Transform one document, passing non-matching documents through untouched
    pub fn transform(&self, document: Document) -> Result<Document> {
        let (matched, metadata) = selector::matches(&document, &self.config.resource_selectors);
        if !matched {
            debug!(
                "Skipping {} {}: no selector matches",
                metadata.kind, metadata.name
            );
            return Ok(document);
        }

        let mut mapping = match document {
            Value::Mapping(mapping) => mapping,
            other => return Ok(other),
        };

        if metadata.kind == "Secret" {
            for field in SECRET_BASE64_FIELDS {
                if let Some(value) = mapping.get_mut(*field) {
                    let taken = std::mem::take(value);
                    *value = replace(taken, &PLACEHOLDER_RE, self.lookup, true)?;
                }
            }
        } else {
            for (key, value) in mapping.iter_mut() {
                if key.as_str().is_some_and(|k| IDENTITY_FIELDS.contains(&k)) {
                    continue;
                }
                let taken = std::mem::take(value);
                *value = replace(taken, &PLACEHOLDER_RE, self.lookup, false)?;
            }
        }

        info!("Replaced placeholders in {} {}", metadata.kind, metadata.name);
        Ok(Value::Mapping(mapping))
    }

    /// Transform every document of a YAML stream, keeping stream order
    pub fn transform_stream(&self, input: &str) -> Result<Vec<Document>> {
        decode_stream("stdin", input)?
            .into_iter()
            .map(|document| self.transform(document))
            .collect()
    }
}
