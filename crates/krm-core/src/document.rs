//! YAML document streams
//!
//! Plugins exchange resources as multi-document YAML streams. Each document
//! decodes into a schema-less [`Document`] tree whose mappings keep their
//! insertion order, so a pass-through document is re-encoded with its keys
//! in the original order.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_yaml_ng::Value;
use std::io::Write;

/// One decoded resource
pub type Document = Value;

/// Decode every document of a YAML stream.
///
/// `origin` names the stream in error messages (a URL, `stdin`, ...).
/// Empty input and explicitly empty documents (`---` with no content)
/// contribute nothing to the result.
pub fn decode_stream(origin: &str, input: &str) -> Result<Vec<Document>> {
    if input.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut documents = Vec::new();
    for de in serde_yaml_ng::Deserializer::from_str(input) {
        let document = Value::deserialize(de).map_err(|e| Error::decode(origin, &e))?;
        if !document.is_null() {
            documents.push(document);
        }
    }
    Ok(documents)
}

/// Decode a stream given as raw bytes, rejecting non-UTF-8 payloads.
pub fn decode_stream_bytes(origin: &str, input: &[u8]) -> Result<Vec<Document>> {
    let text = std::str::from_utf8(input).map_err(|e| Error::Decode {
        origin: origin.to_string(),
        message: format!("payload is not valid UTF-8: {e}"),
        location: None,
    })?;
    decode_stream(origin, text)
}

/// Encode documents as one block-style YAML stream separated by `---`.
pub fn encode_stream(documents: &[Document]) -> Result<String> {
    let mut buffer = Vec::new();
    write_stream(&mut buffer, documents)?;
    String::from_utf8(buffer).map_err(|e| Error::Io(std::io::Error::other(e)))
}

/// Write documents as one YAML stream to `writer`.
pub fn write_stream<W: Write>(writer: W, documents: &[Document]) -> Result<()> {
    let mut serializer = serde_yaml_ng::Serializer::new(writer);
    for document in documents {
        document.serialize(&mut serializer)?;
    }
    Ok(())
}

/// Look up a top-level string field, if present.
pub fn str_field<'a>(document: &'a Document, key: &str) -> Option<&'a str> {
    document.get(key).and_then(Value::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Location;

    #[test]
    fn test_decode_empty_stream() {
        assert!(decode_stream("stdin", "").unwrap().is_empty());
        assert!(decode_stream("stdin", "  \n\n").unwrap().is_empty());
    }

    #[test]
    fn test_decode_multi_document_stream() {
        let input = "kind: A\n---\nkind: B\n---\nkind: C\n";
        let docs = decode_stream("stdin", input).unwrap();
        let kinds: Vec<_> = docs.iter().map(|d| str_field(d, "kind").unwrap()).collect();
        assert_eq!(kinds, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_decode_skips_empty_documents() {
        let input = "---\nkind: A\n---\n---\nkind: B\n";
        let docs = decode_stream("stdin", input).unwrap();
        assert_eq!(docs.len(), 2);
    }

    #[test]
    fn test_decode_error_names_origin() {
        let err = decode_stream("http://x/a.yaml", "kind: [unclosed\n").unwrap_err();
        match err {
            Error::Decode { origin, .. } => assert_eq!(origin, "http://x/a.yaml"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_decode_error_reports_location() {
        let err = decode_stream("stdin", "a: 1\n---\nkind: [unclosed\n").unwrap_err();
        assert!(
            matches!(
                err,
                Error::Decode {
                    location: Some(Location { line: 4, .. }),
                    ..
                }
            ),
            "unexpected error: {err:?}"
        );
    }

    #[test]
    fn test_decode_bytes_rejects_invalid_utf8() {
        let err = decode_stream_bytes("blob", &[0xff, 0xfe, 0x00]).unwrap_err();
        assert!(err.to_string().contains("not valid UTF-8"));
    }

    #[test]
    fn test_encode_separates_documents() {
        let docs = decode_stream("stdin", "a: 1\n---\nb: 2\n").unwrap();
        let out = encode_stream(&docs).unwrap();
        assert_eq!(out, "a: 1\n---\nb: 2\n");
    }

    #[test]
    fn test_encode_empty_list() {
        assert_eq!(encode_stream(&[]).unwrap(), "");
    }

    #[test]
    fn test_encode_preserves_key_order() {
        let input = "kind: ConfigMap\napiVersion: v1\nzeta: 1\nalpha: 2\n";
        let docs = decode_stream("stdin", input).unwrap();
        assert_eq!(encode_stream(&docs).unwrap(), input);
    }
}
