//! api1 language vocabulary registries.
//!
//! This module is the “front door” for language-level vocabulary: builtin type names and the HTTP
//! verbs accepted by `@route` annotations.
//!
//! The design goal is to avoid stringly-typed checks scattered across the compiler/tooling.
//! Instead, callers work with **stable IDs** (e.g. `BuiltinTypeId`, `HttpMethodId`) and look up
//! spellings/metadata via registry tables.
//!
//! ## Notes
//! - Registries are intentionally **pure**: no AST types, no IO, no side effects.
//! - The line parser enforces syntax; registries provide spellings and metadata for shared use
//!   (validation, route classification, rendering).
//!
//! ## Examples
//! ```rust
//! use api1_core::lang::types::{self, BuiltinTypeId};
//!
//! assert_eq!(types::from_str("int"), Some(BuiltinTypeId::Int));
//! assert_eq!(types::as_str(BuiltinTypeId::Boolean), "boolean");
//! ```

pub mod http;
pub mod registry;
pub mod types;
