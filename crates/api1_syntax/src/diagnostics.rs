//! Diagnostics and error reporting for api1 schemas.
//!
//! Every pass of the compiler fails fast with a single [`CompileError`]. Errors carry enough
//! context (source unit and line, or the qualified entity name) to be actionable without a stack
//! trace, and each kind has a stable diagnostic code so tooling can match on it.

use miette::Diagnostic;
use thiserror::Error;

/// What kind of name collided in a [`CompileError::DuplicateDefinition`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DuplicateKind {
    /// Scalar/enum/struct names (schema-wide, builtins included).
    Type,
    /// Interface names (schema-wide, after merging).
    Interface,
    EnumOption { enum_name: String },
    StructField { struct_name: String },
    Function { iface: String },
    Param { iface: String, fun: String },
}

/// Why a route annotation could not be compiled.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteErrorKind {
    #[error("invalid route [{0}]")]
    InvalidRoute(String),

    #[error("route annotation must be a single string")]
    NotAString,

    #[error("nullable path param [{0}]")]
    NullablePathParam(String),

    #[error("more than one body param [{}]", .0.join(", "))]
    MultipleBody(Vec<String>),

    #[error("undefined path params [{}]", .0.join(", "))]
    UndefinedPathParams(Vec<String>),
}

/// A compile-time error. The first one encountered aborts the compile.
#[derive(Debug, Clone, PartialEq, Error, Diagnostic)]
pub enum CompileError {
    /// A source file could not be discovered or read.
    #[error("cannot read [{path}]: {message}")]
    #[diagnostic(code(api1::io))]
    Io { path: String, message: String },

    /// A malformed line for the current parse state.
    #[error("{unit}:{line}: {message}")]
    #[diagnostic(code(api1::syntax))]
    Syntax { unit: String, line: usize, message: String },

    /// A `@key:json` / `@key:yaml` value that does not decode.
    #[error("{unit}:{line}: invalid {format} string for `@{key}`: [{raw}]: {reason}")]
    #[diagnostic(code(api1::semantic_decode), help("check the annotation's indentation and syntax"))]
    SemanticDecode {
        unit: String,
        line: usize,
        key: String,
        format: String,
        raw: String,
        reason: String,
    },

    #[error("{}", describe_duplicate(.kind, .names))]
    #[diagnostic(code(api1::duplicate))]
    DuplicateDefinition { kind: DuplicateKind, names: Vec<String> },

    #[error("Type [{name}] cannot be found (used by {context})")]
    #[diagnostic(
        code(api1::unresolved_type),
        help("declare it with `scalar`, `enum` or `struct`, or use a builtin type")
    )]
    UnresolvedType { name: String, context: String },

    #[error("Enum [{enum_name}] has mixed value types")]
    #[diagnostic(
        code(api1::enum_value_type),
        help("use integer values on every option, or only string values and bare options")
    )]
    EnumValueType { enum_name: String },

    #[error("Function [{iface}.{fun}] has {kind}")]
    #[diagnostic(code(api1::route))]
    Route {
        iface: String,
        fun: String,
        kind: RouteErrorKind,
    },
}

impl CompileError {
    pub fn syntax(unit: &str, line: usize, message: impl Into<String>) -> Self {
        CompileError::Syntax {
            unit: unit.to_string(),
            line,
            message: message.into(),
        }
    }

    pub fn io(path: impl Into<String>, message: impl Into<String>) -> Self {
        CompileError::Io {
            path: path.into(),
            message: message.into(),
        }
    }
}

fn describe_duplicate(kind: &DuplicateKind, names: &[String]) -> String {
    let names = names.join(", ");
    match kind {
        DuplicateKind::Type => format!("Type [{names}] defined more than once"),
        DuplicateKind::Interface => format!("Interface [{names}] defined more than once"),
        DuplicateKind::EnumOption { enum_name } => format!("Enum [{enum_name}] has duplicated options [{names}]"),
        DuplicateKind::StructField { struct_name } => {
            format!("Struct [{struct_name}] has duplicated fields [{names}]")
        }
        DuplicateKind::Function { iface } => format!("Interface [{iface}] has duplicated functions [{names}]"),
        DuplicateKind::Param { iface, fun } => format!("Function [{iface}.{fun}] has duplicated params [{names}]"),
    }
}
