//! Line parser for api1 schema sources.
//!
//! A source unit is parsed line by line by a small state machine:
//!
//! ```text
//! SeekGroup -> SeekBlock <-> InBlock{Enum|Struct|Iface} <-> InFunSignature
//! ```
//!
//! Each unit yields a [`Schema`] holding exactly one [`Group`]. All transient state (pending
//! comments, the open block) lives in a [`ParseSession`] created per unit, so nothing leaks from
//! one unit into the next.
//!
//! ## Examples
//!
//! ```rust
//! use api1_syntax::parser;
//!
//! let source = "group user\n\nstruct User {\n  name: string\n}\n";
//! let schema = parser::parse_unit("user.api", source).unwrap();
//! assert_eq!(schema.groups[0].struct_types[0].fields[0].name, "name");
//! ```

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::ast::*;
use crate::comments::CommentAccumulator;
use crate::diagnostics::CompileError;
use crate::types::{MAX_TYPE_DEPTH, brackets_balanced, nesting_depth, parse_type};

// NOTE: This module is split across multiple files using `include!` to keep the session methods
// in the same Rust module (privacy + call patterns) while keeping each file focused.

include!("parser/patterns.rs");
include!("parser/core.rs");
include!("parser/decl.rs");
include!("parser/params.rs");
include!("parser/api.rs");
include!("parser/tests.rs");
