//! Request envelope decoding.
//!
//! A request is a JSON object carrying the module binary and the ordered
//! parameters for the call:
//!
//! ```json
//! { "bytes": "AGFzbQEAAAA...", "params": [{ "value": 40, "type": "I32" }] }
//! ```

use std::fmt;

use base64::{Engine as _, engine::general_purpose};
use serde::de::{self, Deserializer, SeqAccess, Visitor};
use serde::{Deserialize, Serialize, Serializer};

use crate::error::Result;
use crate::logging::debug;

/// A decoded invocation request.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Request {
    /// WebAssembly module binary. Validated by the engine, not here.
    pub bytes: ModuleBytes,
    /// Parameters in call order.
    #[serde(default)]
    pub params: Vec<Parameter>,
}

impl Request {
    /// Decode a request from raw JSON bytes.
    pub fn from_slice(input: &[u8]) -> Result<Self> {
        let request: Request = serde_json::from_slice(input)?;
        debug!(
            module_len = request.bytes.len(),
            params = request.params.len(),
            "decoded request"
        );
        Ok(request)
    }
}

/// A single positional parameter.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Parameter {
    /// The loosely-typed value as decoded from JSON.
    #[serde(default)]
    pub value: serde_json::Value,
    /// Declared type tag.
    #[serde(rename = "type", default)]
    pub kind: ParamType,
}

impl Parameter {
    /// Create a parameter from a value and a type tag.
    pub fn new(value: impl Into<serde_json::Value>, kind: ParamType) -> Self {
        Self {
            value: value.into(),
            kind,
        }
    }
}

/// Declared type of a parameter.
///
/// Only the exact tags `"I32"`, `"I64"`, `"F32"` and `"F64"` select a numeric
/// kind; any other string, an empty string, `null` or a missing tag leave the
/// value untyped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ParamType {
    I32,
    I64,
    F32,
    F64,
    #[default]
    Untyped,
}

impl ParamType {
    /// Map a JSON tag to a type.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "I32" => Self::I32,
            "I64" => Self::I64,
            "F32" => Self::F32,
            "F64" => Self::F64,
            _ => Self::Untyped,
        }
    }

    /// The JSON tag for this type (empty for [`ParamType::Untyped`]).
    pub fn as_tag(&self) -> &'static str {
        match self {
            Self::I32 => "I32",
            Self::I64 => "I64",
            Self::F32 => "F32",
            Self::F64 => "F64",
            Self::Untyped => "",
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Untyped => f.write_str("untyped"),
            other => f.write_str(other.as_tag()),
        }
    }
}

impl<'de> Deserialize<'de> for ParamType {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let tag: Option<String> = Option::deserialize(deserializer)?;
        Ok(tag.as_deref().map(Self::from_tag).unwrap_or_default())
    }
}

impl Serialize for ParamType {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_tag())
    }
}

/// Module binary, accepted as a base64 string or an array of byte values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleBytes(pub Vec<u8>);

impl ModuleBytes {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for ModuleBytes {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for ModuleBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

struct ModuleBytesVisitor;

impl<'de> Visitor<'de> for ModuleBytesVisitor {
    type Value = ModuleBytes;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a base64 string or an array of bytes")
    }

    fn visit_str<E: de::Error>(self, s: &str) -> std::result::Result<ModuleBytes, E> {
        general_purpose::STANDARD
            .decode(s)
            .map(ModuleBytes)
            .map_err(de::Error::custom)
    }

    fn visit_seq<A>(self, mut seq: A) -> std::result::Result<ModuleBytes, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut bytes = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(b) = seq.next_element::<u8>()? {
            bytes.push(b);
        }
        Ok(ModuleBytes(bytes))
    }
}

impl<'de> Deserialize<'de> for ModuleBytes {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(ModuleBytesVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_base64_bytes() {
        let input = br#"{"bytes":"AGFzbQEAAAA=","params":[]}"#;
        let request = Request::from_slice(input).unwrap();
        assert_eq!(
            request.bytes.as_slice(),
            &[0x00, 0x61, 0x73, 0x6d, 0x01, 0x00, 0x00, 0x00]
        );
        assert!(request.params.is_empty());
    }

    #[test]
    fn test_decode_byte_array() {
        let input = br#"{"bytes":[0,97,115,109],"params":[{"value":1,"type":"I64"}]}"#;
        let request = Request::from_slice(input).unwrap();
        assert_eq!(request.bytes.as_slice(), b"\0asm");
        assert_eq!(request.params, vec![Parameter::new(1, ParamType::I64)]);
    }

    #[test]
    fn test_params_default_to_empty() {
        let request = Request::from_slice(br#"{"bytes":""}"#).unwrap();
        assert!(request.bytes.is_empty());
        assert!(request.params.is_empty());
    }

    #[test]
    fn test_type_tags() {
        let input = json!({
            "bytes": [],
            "params": [
                {"value": 1, "type": "I32"},
                {"value": 2, "type": "I64"},
                {"value": 3, "type": "F32"},
                {"value": 4, "type": "F64"},
                {"value": 5, "type": ""},
                {"value": 6, "type": "i32"},
                {"value": 7, "type": null},
                {"value": 8}
            ]
        });
        let request = Request::from_slice(input.to_string().as_bytes()).unwrap();
        let kinds: Vec<ParamType> = request.params.iter().map(|p| p.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ParamType::I32,
                ParamType::I64,
                ParamType::F32,
                ParamType::F64,
                ParamType::Untyped,
                ParamType::Untyped,
                ParamType::Untyped,
                ParamType::Untyped,
            ]
        );
    }

    #[test]
    fn test_non_json_is_parse_error() {
        let err = Request::from_slice(b"not json at all").unwrap_err();
        assert!(err.is_parse());
    }

    #[test]
    fn test_wrong_shape_is_parse_error() {
        for input in [
            r#"{"params":[]}"#,
            r#"{"bytes":42}"#,
            r#"{"bytes":[256]}"#,
            r#"{"bytes":"***"}"#,
            r#"{"bytes":[],"params":{"value":1}}"#,
            r#"{"bytes":[],"params":[{"value":1,"type":5}]}"#,
        ] {
            let err = Request::from_slice(input.as_bytes()).unwrap_err();
            assert!(err.is_parse(), "expected parse error for {input}");
        }
    }

    #[test]
    fn test_param_type_tag_roundtrip_through_serde() {
        let json = serde_json::to_string(&ParamType::F32).unwrap();
        assert_eq!(json, "\"F32\"");
        assert_eq!(ParamType::Untyped.to_string(), "untyped");
    }
}
