//! Schema data model produced by the line parser.
//!
//! A [`Schema`] owns everything: groups own their declarations, declarations own their comments.
//! The parser builds one [`Group`] per source unit; the compiler passes then merge, validate and
//! decorate the tree (route information on functions) before handing it to renderers read-only.
//!
//! ## Serialization
//!
//! Every type serializes to JSON with lower-camel-case keys. Empty collections, empty strings and
//! absent optional values are omitted so dumps stay small and diff-friendly.

use std::collections::BTreeSet;
use std::fmt;

use api1_core::lang::http::HttpMethodId;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::sem::SemValue;

// ============================================================================
// Comments
// ============================================================================

/// Documentation attached to a declaration.
///
/// - `comments` precede the declaration.
/// - `post_comments` trail it (same-line comments, or leftovers before a block's closing brace).
/// - `sem_comments` are decoded `@key value` annotations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HasComments {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub post_comments: Vec<String>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub sem_comments: IndexMap<String, SemValue>,
    /// Keys whose value is a list built by repetition (as opposed to a decoded list value).
    ///
    /// Serialized so a schema read back from a dump keeps accumulating flat.
    #[serde(default, rename = "repeatedSemKeys", skip_serializing_if = "BTreeSet::is_empty")]
    repeated: BTreeSet<String>,
}

impl HasComments {
    /// Record a semantic comment value.
    ///
    /// The first occurrence of a key is stored as is. A second occurrence turns the stored value
    /// into a two-element list, and every further occurrence is appended to that list.
    pub fn add_sem_comment(&mut self, key: impl Into<String>, value: SemValue) {
        let key = key.into();
        match self.sem_comments.get_mut(&key) {
            None => {
                self.sem_comments.insert(key, value);
            }
            Some(SemValue::List(items)) if self.repeated.contains(&key) => items.push(value),
            Some(existing) => {
                let first = std::mem::replace(existing, SemValue::Null);
                *existing = SemValue::List(vec![first, value]);
                self.repeated.insert(key);
            }
        }
    }

    /// Look up a semantic comment by key.
    pub fn sem_comment(&self, key: &str) -> Option<&SemValue> {
        self.sem_comments.get(key)
    }

    /// Append another declaration's comments to this one.
    ///
    /// Semantic comments go through [`add_sem_comment`](Self::add_sem_comment); values that
    /// `other` accumulated by repetition are re-added one by one so the result stays flat.
    pub fn absorb(&mut self, other: HasComments) {
        let HasComments {
            comments,
            post_comments,
            sem_comments,
            repeated,
        } = other;
        self.comments.extend(comments);
        self.post_comments.extend(post_comments);
        for (key, value) in sem_comments {
            match value {
                SemValue::List(items) if repeated.contains(&key) => {
                    for item in items {
                        self.add_sem_comment(key.clone(), item);
                    }
                }
                value => self.add_sem_comment(key, value),
            }
        }
    }

    /// Split into the leading part (comments + semantic comments) and the trailing post-comments.
    pub fn split_post(mut self) -> (HasComments, Vec<String>) {
        let post = std::mem::take(&mut self.post_comments);
        (self, post)
    }

    pub fn is_empty(&self) -> bool {
        self.comments.is_empty() && self.post_comments.is_empty() && self.sem_comments.is_empty()
    }
}

// ============================================================================
// Type references
// ============================================================================

/// A reference to a type: a named (builtin or declared) type, or an array of another reference.
///
/// Nullability belongs to the level it was written on: in `[int?]?` both the array and the item
/// are nullable, in `[int]?` only the array is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypeRef {
    Named {
        name: String,
        nullable: bool,
    },
    Array {
        #[serde(rename = "itemType")]
        item: Box<TypeRef>,
        nullable: bool,
    },
}

impl TypeRef {
    pub fn named(name: impl Into<String>) -> Self {
        TypeRef::Named {
            name: name.into(),
            nullable: false,
        }
    }

    pub fn array(item: TypeRef) -> Self {
        TypeRef::Array {
            item: Box::new(item),
            nullable: false,
        }
    }

    /// Return the same reference with nullability set at this level.
    pub fn with_nullable(mut self, value: bool) -> Self {
        match &mut self {
            TypeRef::Named { nullable, .. } | TypeRef::Array { nullable, .. } => *nullable = value,
        }
        self
    }

    pub fn nullable(&self) -> bool {
        match self {
            TypeRef::Named { nullable, .. } | TypeRef::Array { nullable, .. } => *nullable,
        }
    }

    /// The referenced name, for named references.
    pub fn name(&self) -> Option<&str> {
        match self {
            TypeRef::Named { name, .. } => Some(name),
            TypeRef::Array { .. } => None,
        }
    }

    /// The item type, for array references.
    pub fn item(&self) -> Option<&TypeRef> {
        match self {
            TypeRef::Array { item, .. } => Some(item),
            TypeRef::Named { .. } => None,
        }
    }

    /// The name at the bottom of any array nesting (`[[User]]` → `User`).
    pub fn innermost_name(&self) -> &str {
        let mut ty = self;
        loop {
            match ty {
                TypeRef::Named { name, .. } => return name,
                TypeRef::Array { item, .. } => ty = item,
            }
        }
    }
}

impl fmt::Display for TypeRef {
    // Render back in source syntax
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Named { name, .. } => write!(f, "{name}")?,
            TypeRef::Array { item, .. } => write!(f, "[{item}]")?,
        }
        if self.nullable() {
            write!(f, "?")?;
        }
        Ok(())
    }
}

// ============================================================================
// Declarations
// ============================================================================

/// An opaque named type whose mapping is supplied through semantic comments.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScalarType {
    pub name: String,
    #[serde(flatten)]
    pub comments: HasComments,
}

/// Explicit value of an enum option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EnumValue {
    Int(i64),
    Str(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumOption {
    pub name: String,
    #[serde(flatten)]
    pub comments: HasComments,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<EnumValue>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumType {
    pub name: String,
    #[serde(flatten)]
    pub comments: HasComments,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<EnumOption>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructField {
    pub name: String,
    #[serde(flatten)]
    pub comments: HasComments,
    #[serde(rename = "type")]
    pub ty: TypeRef,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructType {
    pub name: String,
    #[serde(flatten)]
    pub comments: HasComments,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<StructField>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Param {
    pub name: String,
    #[serde(flatten)]
    pub comments: HasComments,
    #[serde(rename = "type")]
    pub ty: TypeRef,
    /// Raw default text from `name: Type = default`; recorded, never interpreted.
    #[serde(default, rename = "default", skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fun {
    pub name: String,
    #[serde(flatten)]
    pub comments: HasComments,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<Param>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_type: Option<TypeRef>,
    /// Filled in by route compilation for functions carrying a `@route` annotation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route: Option<RouteInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Iface {
    pub name: String,
    #[serde(flatten)]
    pub comments: HasComments,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub funs: Vec<Fun>,
}

/// A named namespace label. Type names are unique schema-wide, not per group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub name: String,
    #[serde(flatten)]
    pub comments: HasComments,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scalar_types: Vec<ScalarType>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub enum_types: Vec<EnumType>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub struct_types: Vec<StructType>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ifaces: Vec<Iface>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<Group>,
}

impl Schema {
    /// Iterate over every function of every interface, with the owning interface.
    pub fn funs(&self) -> impl Iterator<Item = (&Iface, &Fun)> {
        self.groups
            .iter()
            .flat_map(|g| g.ifaces.iter())
            .flat_map(|iface| iface.funs.iter().map(move |fun| (iface, fun)))
    }
}

// ============================================================================
// Routes
// ============================================================================

/// Where a routed parameter travels in an HTTP request.
///
/// Only `Path`, `Query` and `Body` are ever derived by route compilation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Path,
    Query,
    Body,
    Header,
    Cookie,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Position::Path => "path",
            Position::Query => "query",
            Position::Body => "body",
            Position::Header => "header",
            Position::Cookie => "cookie",
        };
        f.write_str(s)
    }
}

/// Spelling of path placeholders in a rendered route path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathStyle {
    /// `/users/:id` (router registration)
    #[default]
    Colon,
    /// `/users/{id}` (OpenAPI)
    Brace,
}

impl PathStyle {
    /// Render a placeholder for `name` in this style.
    pub fn placeholder(self, name: &str) -> String {
        match self {
            PathStyle::Colon => format!(":{name}"),
            PathStyle::Brace => format!("{{{name}}}"),
        }
    }
}

/// HTTP binding of a routed function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteInfo {
    pub method: HttpMethodId,
    pub path: String,
    /// Position of every parameter, in declaration order.
    pub params_in: IndexMap<String, Position>,
}

impl RouteInfo {
    /// Re-render the compiled path with placeholders in `style`.
    pub fn path_as(&self, style: PathStyle) -> String {
        self.path
            .split('/')
            .map(|segment| match placeholder_name(segment) {
                Some(name) => style.placeholder(name),
                None => segment.to_string(),
            })
            .collect::<Vec<_>>()
            .join("/")
    }
}

/// Extract the parameter name from a `:name` or `{name}` path segment.
pub fn placeholder_name(segment: &str) -> Option<&str> {
    let name = segment
        .strip_prefix(':')
        .or_else(|| segment.strip_prefix('{').and_then(|s| s.strip_suffix('}')))?;
    let mut chars = name.chars();
    let starts_alpha = chars.next().is_some_and(|c| c.is_ascii_alphabetic());
    (starts_alpha && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')).then_some(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sem_comment_accumulates_flat() {
        let mut c = HasComments::default();
        c.add_sem_comment("tag", SemValue::Str("value1".into()));
        c.add_sem_comment("tag", SemValue::Str("value2".into()));
        c.add_sem_comment("tag", SemValue::Str("value3".into()));
        assert_eq!(
            c.sem_comment("tag"),
            Some(&SemValue::List(vec![
                SemValue::Str("value1".into()),
                SemValue::Str("value2".into()),
                SemValue::Str("value3".into()),
            ]))
        );
    }

    #[test]
    fn test_sem_comment_decoded_list_is_wrapped_on_repeat() {
        let mut c = HasComments::default();
        c.add_sem_comment("e", SemValue::List(vec![SemValue::Str("abc".into())]));
        c.add_sem_comment("e", SemValue::Str("x".into()));
        assert_eq!(
            c.sem_comment("e"),
            Some(&SemValue::List(vec![
                SemValue::List(vec![SemValue::Str("abc".into())]),
                SemValue::Str("x".into()),
            ]))
        );
    }

    #[test]
    fn test_absorb_keeps_repetition_flat() {
        let mut a = HasComments::default();
        a.add_sem_comment("k", SemValue::Str("1".into()));
        let mut b = HasComments::default();
        b.add_sem_comment("k", SemValue::Str("2".into()));
        b.add_sem_comment("k", SemValue::Str("3".into()));
        a.absorb(b);
        assert_eq!(
            a.sem_comment("k"),
            Some(&SemValue::List(vec![
                SemValue::Str("1".into()),
                SemValue::Str("2".into()),
                SemValue::Str("3".into()),
            ]))
        );
    }

    #[test]
    fn test_repetition_survives_json_round_trip() {
        let mut c = HasComments::default();
        c.add_sem_comment("k", SemValue::Str("1".into()));
        c.add_sem_comment("k", SemValue::Str("2".into()));

        let json = serde_json::to_value(&c).unwrap();
        assert_eq!(json["repeatedSemKeys"], serde_json::json!(["k"]));
        let mut back: HasComments = serde_json::from_value(json).unwrap();
        back.add_sem_comment("k", SemValue::Str("3".into()));
        assert_eq!(
            back.sem_comment("k"),
            Some(&SemValue::List(vec![
                SemValue::Str("1".into()),
                SemValue::Str("2".into()),
                SemValue::Str("3".into()),
            ]))
        );
    }

    #[test]
    fn test_type_ref_display() {
        let t = TypeRef::array(TypeRef::named("int").with_nullable(true)).with_nullable(true);
        assert_eq!(t.to_string(), "[int?]?");
        assert_eq!(t.innermost_name(), "int");
    }

    #[test]
    fn test_type_ref_json_shape() {
        let t = TypeRef::array(TypeRef::named("User"));
        let json = serde_json::to_value(&t).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"itemType": {"name": "User", "nullable": false}, "nullable": false})
        );
        let back: TypeRef = serde_json::from_value(json).unwrap();
        assert_eq!(back, t);
    }

    #[test]
    fn test_empty_collections_are_omitted() {
        let s = StructType {
            name: "Empty".into(),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&s).unwrap(), serde_json::json!({"name": "Empty"}));
    }

    #[test]
    fn test_route_path_as_alternate_style() {
        let route = RouteInfo {
            method: HttpMethodId::Get,
            path: "/users/:id/posts/:postId".into(),
            params_in: IndexMap::new(),
        };
        assert_eq!(route.path_as(PathStyle::Brace), "/users/{id}/posts/{postId}");
        assert_eq!(route.path_as(PathStyle::Colon), "/users/:id/posts/:postId");
    }

    #[test]
    fn test_placeholder_name() {
        assert_eq!(placeholder_name(":id"), Some("id"));
        assert_eq!(placeholder_name("{user_id}"), Some("user_id"));
        assert_eq!(placeholder_name("*rest"), None);
        assert_eq!(placeholder_name("{1x}"), None);
        assert_eq!(placeholder_name("users"), None);
    }
}
