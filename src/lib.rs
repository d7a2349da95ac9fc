#![forbid(unsafe_code)]
//! api1 Schema Compiler
//!
//! api1 is a small interface definition language: groups of scalar, enum and struct types plus
//! RPC-style interfaces whose functions can be bound to HTTP routes. This crate provides the
//! compiler front end (parsing, merging, validation, route compilation) and the `api1` CLI. The
//! resulting [`Schema`](frontend::ast::Schema) is the input of code and OpenAPI renderers.
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module enforces
//!   `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! - **True invariants**: If a panic represents a compiler bug (logic error), use `.expect("INVARIANT: reason")` with a
//!   clear explanation.

pub mod cli;
pub mod config;
pub mod frontend;
pub mod version;

pub use frontend::ast;
pub use frontend::check;
pub use frontend::diagnostics;
pub use frontend::parser;
pub use frontend::route;
pub use frontend::sem;
pub use frontend::types;

pub use config::CompileConfig;
pub use frontend::pipeline::{SourceUnit, compile_sources};
pub use frontend::resolver::{compile_files, discover_sources};
