//! HTTP method vocabulary for `@route` annotations.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::lang::registry::LangItemInfo;

/// Stable identifier for supported HTTP methods.
///
/// Serialized in lower case (`"get"`, `"post"`, ...), which is the spelling route tables and
/// OpenAPI path items use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpMethodId {
    Get,
    Put,
    Post,
    Delete,
    Options,
    Head,
    Patch,
    Trace,
}

/// Metadata entry for an HTTP method.
pub type HttpMethodInfo = LangItemInfo<HttpMethodId>;

/// Registry of supported HTTP methods.
pub const HTTP_METHODS: &[HttpMethodInfo] = &[
    info(HttpMethodId::Get, "GET", &["get"], "HTTP GET"),
    info(HttpMethodId::Put, "PUT", &["put"], "HTTP PUT"),
    info(HttpMethodId::Post, "POST", &["post"], "HTTP POST"),
    info(HttpMethodId::Delete, "DELETE", &["delete"], "HTTP DELETE"),
    info(HttpMethodId::Options, "OPTIONS", &["options"], "HTTP OPTIONS"),
    info(HttpMethodId::Head, "HEAD", &["head"], "HTTP HEAD"),
    info(HttpMethodId::Patch, "PATCH", &["patch"], "HTTP PATCH"),
    info(HttpMethodId::Trace, "TRACE", &["trace"], "HTTP TRACE"),
];

/// Resolve a method name to its stable id (case-insensitive).
pub fn from_str(name: &str) -> Option<HttpMethodId> {
    let name = name.trim();
    HTTP_METHODS.iter().find(|m| m.matches(name, true)).map(|m| m.id)
}

/// Return the canonical spelling for a method.
pub fn as_str(id: HttpMethodId) -> &'static str {
    info_for(id).canonical
}

/// Return the metadata entry for a method.
pub fn info_for(id: HttpMethodId) -> &'static HttpMethodInfo {
    HTTP_METHODS
        .iter()
        .find(|m| m.id == id)
        .expect("INVARIANT: every http method id has a registry entry")
}

impl fmt::Display for HttpMethodId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(as_str(*self))
    }
}

const fn info(
    id: HttpMethodId,
    canonical: &'static str,
    aliases: &'static [&'static str],
    description: &'static str,
) -> HttpMethodInfo {
    LangItemInfo {
        id,
        canonical,
        aliases,
        description,
    }
}
