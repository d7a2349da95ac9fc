//! api1 compiler version information.
//!
//! This module exposes the compiler version as a single constant so the CLI and anything that
//! stamps generated output agree on the same value.
//!
//! ## Notes
//!
//! - The value is taken from Cargo metadata (`CARGO_PKG_VERSION`) at compile time.
//! - Prefer this constant over repeating `env!("CARGO_PKG_VERSION")` in multiple places.

/// The api1 compiler version string (for example, `0.3.0`).
pub const API1_VERSION: &str = env!("CARGO_PKG_VERSION");
