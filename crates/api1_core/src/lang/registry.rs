//! Shareable metadata for `api1_core::lang` registries.
//!
//! The `api1_core::lang` module is a set of **registry-first** vocabularies: builtin types and HTTP
//! verbs. This submodule provides the small, dependency-free metadata type reused by both.
//!
//! ## Notes
//! - These types are intentionally lightweight and `Copy`-friendly so registries can live in
//!   `const` tables.
//! - Metadata is meant for tooling/docs/diagnostics; enforcement of syntax rules still lives
//!   in the line parser.

/// Shared metadata shape for “registry-first” vocabulary items.
///
/// Every registry entry carries:
/// - stable identity (`id`)
/// - accepted spellings (`canonical` + `aliases`)
/// - documentation (`description`)
///
/// Registries that need extra per-item data (e.g. the route placement of a builtin type) wrap this
/// struct in an “extension” info type.
#[derive(Debug, Clone, Copy)]
pub struct LangItemInfo<Id> {
    pub id: Id,
    pub canonical: &'static str,
    pub aliases: &'static [&'static str],
    pub description: &'static str,
}

impl<Id: Copy> LangItemInfo<Id> {
    /// Check whether `name` is one of this item's spellings.
    ///
    /// ## Parameters
    /// - `name`: the spelling to test.
    /// - `ignore_case`: compare ASCII case-insensitively (HTTP verbs) or exactly (type names).
    pub fn matches(&self, name: &str, ignore_case: bool) -> bool {
        let eq = |a: &str| {
            if ignore_case {
                a.eq_ignore_ascii_case(name)
            } else {
                a == name
            }
        };
        eq(self.canonical) || self.aliases.iter().any(|a| eq(a))
    }
}
