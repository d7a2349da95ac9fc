//! api1 Compiler Frontend
//!
//! This module contains all frontend components:
//! - `comments`: comment accumulation and semantic comment decoding
//! - `parser`: line parser producing one group per source unit
//! - `ast`: schema data model
//! - `merge`: group coalescing and interface merging
//! - `check`: naming, reference and enum value validation
//! - `route`: `@route` compilation and parameter classification
//! - `pipeline`: the multi-unit compile driver
//! - `resolver`: source file discovery for multi-file schemas

// Syntax components are provided by the shared api1_syntax crate.
pub use api1_syntax::{ast, comments, diagnostics, parser, sem, types};

// Compiler passes remain local.
pub mod check;
pub mod merge;
pub mod pipeline;
pub mod resolver;
pub mod route;
