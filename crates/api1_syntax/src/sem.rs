//! Semantic comment values.
//!
//! A semantic comment (`@key value`, `@key:json value`, `@key:yaml |` + indented block) decodes
//! into a [`SemValue`]. Raw values stay strings; `json` and `yaml`/`yml` values go through
//! `serde_json` / `serde_yml` into the same tagged representation.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A decoded semantic comment value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SemValue {
    Null,
    Bool(bool),
    Number(f64),
    Str(String),
    List(Vec<SemValue>),
    Map(IndexMap<String, SemValue>),
}

impl SemValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            SemValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[SemValue]> {
        match self {
            SemValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&IndexMap<String, SemValue>> {
        match self {
            SemValue::Map(map) => Some(map),
            _ => None,
        }
    }
}

/// Encoding of a semantic comment value, taken from the `@key:format` suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SemFormat {
    Raw,
    Json,
    Yaml,
}

impl SemFormat {
    /// Parse the suffix after `@key:`; no suffix means [`SemFormat::Raw`].
    pub fn from_suffix(suffix: Option<&str>) -> Option<Self> {
        match suffix {
            None | Some("") => Some(SemFormat::Raw),
            Some("json") => Some(SemFormat::Json),
            Some("yaml") | Some("yml") => Some(SemFormat::Yaml),
            Some(_) => None,
        }
    }
}

impl fmt::Display for SemFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SemFormat::Raw => "raw",
            SemFormat::Json => "json",
            SemFormat::Yaml => "yaml",
        };
        f.write_str(s)
    }
}

/// Decode a semantic comment value.
///
/// ## Errors
/// Returns the decoder's message when `raw` is not valid JSON/YAML for the given format.
pub fn decode(format: SemFormat, raw: &str) -> Result<SemValue, String> {
    match format {
        SemFormat::Raw => Ok(SemValue::Str(raw.to_string())),
        SemFormat::Json => serde_json::from_str(raw).map_err(|e| e.to_string()),
        SemFormat::Yaml => serde_yml::from_str(raw).map_err(|e| e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_is_string() {
        assert_eq!(decode(SemFormat::Raw, "a b c").unwrap(), SemValue::Str("a b c".into()));
        assert_eq!(decode(SemFormat::Raw, "").unwrap(), SemValue::Str(String::new()));
    }

    #[test]
    fn test_json_object() {
        let v = decode(SemFormat::Json, r#"{"a": "b", "n": 2, "ok": true, "none": null}"#).unwrap();
        let map = v.as_map().unwrap();
        assert_eq!(map["a"], SemValue::Str("b".into()));
        assert_eq!(map["n"], SemValue::Number(2.0));
        assert_eq!(map["ok"], SemValue::Bool(true));
        assert_eq!(map["none"], SemValue::Null);
    }

    #[test]
    fn test_json_array() {
        let v = decode(SemFormat::Json, r#"["abc"]"#).unwrap();
        assert_eq!(v, SemValue::List(vec![SemValue::Str("abc".into())]));
    }

    #[test]
    fn test_yaml_nested_mapping() {
        let v = decode(SemFormat::Yaml, "a:\n  b: 1\n  c: 2").unwrap();
        let inner = v.as_map().unwrap()["a"].as_map().unwrap();
        assert_eq!(inner["b"], SemValue::Number(1.0));
        assert_eq!(inner["c"], SemValue::Number(2.0));
    }

    #[test]
    fn test_yaml_plain_scalar_is_string() {
        assert_eq!(decode(SemFormat::Yaml, "asome comment").unwrap(), SemValue::Str("asome comment".into()));
    }

    #[test]
    fn test_invalid_json_is_error() {
        assert!(decode(SemFormat::Json, "{not json").is_err());
    }

    #[test]
    fn test_format_suffix() {
        assert_eq!(SemFormat::from_suffix(None), Some(SemFormat::Raw));
        assert_eq!(SemFormat::from_suffix(Some("yml")), Some(SemFormat::Yaml));
        assert_eq!(SemFormat::from_suffix(Some("toml")), None);
    }
}
