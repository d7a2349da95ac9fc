//! Provide the canonical vocabulary shared by the api1 schema compiler and its renderers.
//!
//! This crate is intentionally small and dependency-light. It contains registry tables that both:
//! - the compiler uses to seed type resolution and classify route parameters, and
//! - downstream renderers (Go code, OpenAPI documents) use to map builtin names and HTTP verbs.
//!
//! ## Notes
//!
//! - This is a “vocabulary” crate: **no IO**, no global state, and no AST types.
//! - Current scope: builtin schema types (with their default route placement) and HTTP verbs.

pub mod lang;
