//! Recursive `${env:NAME}` placeholder replacement
//!
//! The replacer walks a document value and substitutes every placeholder in
//! every string it finds. Names are resolved through a [`Lookup`]; a name the
//! lookup cannot resolve aborts the whole traversal.

use crate::error::{Error, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use regex::Regex;
use serde_yaml_ng::Value;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Placeholder syntax: `${env:NAME}`, whitespace allowed inside the braces
pub static PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{\s*env:([a-zA-Z0-9_]+)\s*\}").expect("placeholder regex is valid")
});

/// Source of placeholder values
pub trait Lookup {
    /// Resolve `name`, failing with [`Error::MissingVariable`] if unknown
    fn lookup(&self, name: &str) -> Result<String>;
}

impl<F> Lookup for F
where
    F: Fn(&str) -> Result<String>,
{
    fn lookup(&self, name: &str) -> Result<String> {
        self(name)
    }
}

/// Snapshot of environment variables taken once per run
#[derive(Debug, Clone, Default)]
pub struct Environment {
    vars: HashMap<String, String>,
}

impl Environment {
    /// Capture the current process environment.
    ///
    /// Variables whose name or value is not valid unicode are skipped.
    pub fn capture() -> Self {
        Self {
            vars: std::env::vars_os()
                .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
                .collect(),
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Environment {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

impl Lookup for Environment {
    fn lookup(&self, name: &str) -> Result<String> {
        self.vars
            .get(name)
            .cloned()
            .ok_or_else(|| Error::missing_variable(name))
    }
}

/// Substitute every placeholder occurrence in `text`.
pub fn substitute(text: &str, pattern: &Regex, lookup: &dyn Lookup) -> Result<String> {
    let mut output = String::with_capacity(text.len());
    let mut last = 0;

    for caps in pattern.captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        output.push_str(&text[last..whole.start()]);
        let name = caps.get(1).map_or("", |m| m.as_str());
        output.push_str(&lookup.lookup(name)?);
        last = whole.end();
    }

    output.push_str(&text[last..]);
    Ok(output)
}

/// Substitute placeholders inside a base64-encoded string
fn substitute_base64(encoded: &str, pattern: &Regex, lookup: &dyn Lookup) -> Result<String> {
    let bytes = STANDARD
        .decode(encoded.trim())
        .map_err(|e| Error::base64(e.to_string()))?;
    let text = String::from_utf8(bytes)
        .map_err(|e| Error::base64(format!("decoded value is not UTF-8 text: {e}")))?;
    let replaced = substitute(&text, pattern, lookup)?;
    Ok(STANDARD.encode(replaced))
}

/// Recursively replace placeholders in `value`.
///
/// Mappings and sequences are rebuilt in their original order; strings are
/// substituted; every other scalar is returned unchanged. With `is_base64`
/// each string is treated as base64, decoded, substituted and re-encoded.
pub fn replace(value: Value, pattern: &Regex, lookup: &dyn Lookup, is_base64: bool) -> Result<Value> {
    match value {
        Value::Mapping(mapping) => mapping
            .into_iter()
            .map(|(k, v)| Ok((k, replace(v, pattern, lookup, is_base64)?)))
            .collect::<Result<serde_yaml_ng::Mapping>>()
            .map(Value::Mapping),
        Value::Sequence(items) => items
            .into_iter()
            .map(|v| replace(v, pattern, lookup, is_base64))
            .collect::<Result<Vec<_>>>()
            .map(Value::Sequence),
        Value::String(s) if is_base64 => substitute_base64(&s, pattern, lookup).map(Value::String),
        Value::String(s) => substitute(&s, pattern, lookup).map(Value::String),
        Value::Tagged(mut tagged) => {
            tagged.value = replace(tagged.value, pattern, lookup, is_base64)?;
            Ok(Value::Tagged(tagged))
        }
        other => Ok(other),
    }
}
