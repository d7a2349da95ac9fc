//! Shared syntax frontend for api1 schemas: comment accumulator, line parser, AST, diagnostics.
//!
//! This crate is dependency-light and intended for reuse by the compiler passes and by renderers
//! that only need the data model.
//!
//! ## Notes
//! - This crate is intentionally “syntax-only”: it does not merge interfaces, resolve type names,
//!   or compile routes. Those passes live in the `api1` crate.
//! - Builtin type names and HTTP verbs come from `api1_core::lang` registries.
//!
//! ## Examples
//! ```rust
//! use api1_syntax::parser;
//!
//! let schema = parser::parse_unit("pets.api", "group pets\nscalar PetId\n").unwrap();
//! assert_eq!(schema.groups[0].scalar_types[0].name, "PetId");
//! ```
//!
//! ## See also
//! - `api1_core::lang` for registry-backed vocabulary (builtin types, HTTP methods).

pub mod ast;
pub mod comments;
pub mod diagnostics;
pub mod parser;
pub mod sem;
pub mod types;
