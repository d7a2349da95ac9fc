//! Builtin schema type vocabulary.
//!
//! These six names are implicitly declared in every schema: they resolve without a `scalar`
//! declaration and they collide with any user declaration of the same name.
//!
//! ## Notes
//! - Each entry records where a parameter of that type is placed when a function is routed
//!   ([`Placement`]). User-declared types get their placement from the compiler, not from here.

use crate::lang::registry::LangItemInfo;

/// Stable identifier for a builtin schema type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinTypeId {
    Int,
    Float,
    String,
    Boolean,
    Object,
    Any,
}

/// Where a routed parameter of a builtin type lands in an HTTP request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placement {
    /// Simple values travel in the query string.
    Query,
    /// Free-form values travel in the request body.
    Body,
}

/// Metadata entry for a builtin type.
#[derive(Debug, Clone, Copy)]
pub struct BuiltinTypeInfo {
    pub item: LangItemInfo<BuiltinTypeId>,
    pub placement: Placement,
}

/// Registry of builtin types, in the order they are pre-registered.
pub const BUILTIN_TYPES: &[BuiltinTypeInfo] = &[
    info(BuiltinTypeId::Int, "int", "Signed integer.", Placement::Query),
    info(BuiltinTypeId::Float, "float", "Floating point number.", Placement::Query),
    info(BuiltinTypeId::String, "string", "UTF-8 text.", Placement::Query),
    info(BuiltinTypeId::Boolean, "boolean", "true / false.", Placement::Query),
    info(BuiltinTypeId::Object, "object", "Free-form key/value object.", Placement::Body),
    info(BuiltinTypeId::Any, "any", "Any JSON value.", Placement::Body),
];

/// Resolve a type name to its builtin id, if it is one.
pub fn from_str(name: &str) -> Option<BuiltinTypeId> {
    BUILTIN_TYPES
        .iter()
        .find(|t| t.item.matches(name, false))
        .map(|t| t.item.id)
}

/// Return the canonical spelling for a builtin type.
pub fn as_str(id: BuiltinTypeId) -> &'static str {
    info_for(id).item.canonical
}

/// Return the route placement for a builtin type.
pub fn placement(id: BuiltinTypeId) -> Placement {
    info_for(id).placement
}

/// Return the metadata entry for a builtin type.
pub fn info_for(id: BuiltinTypeId) -> &'static BuiltinTypeInfo {
    BUILTIN_TYPES
        .iter()
        .find(|t| t.item.id == id)
        .expect("INVARIANT: every builtin type id has a registry entry")
}

const fn info(
    id: BuiltinTypeId,
    canonical: &'static str,
    description: &'static str,
    placement: Placement,
) -> BuiltinTypeInfo {
    BuiltinTypeInfo {
        item: LangItemInfo {
            id,
            canonical,
            aliases: &[],
            description,
        },
        placement,
    }
}
