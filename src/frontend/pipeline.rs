//! Multi-unit compile pipeline
//!
//! ```text
//! units --parse_unit--> one group each --concat--> merge --> check --> compile_routes --> Schema
//! ```
//!
//! Every unit is parsed by its own session. The first error from any stage aborts the compile;
//! no partially compiled schema is ever returned.

use crate::config::CompileConfig;
use crate::frontend::ast::Schema;
use crate::frontend::diagnostics::CompileError;
use crate::frontend::{check, merge, parser, route};

/// One source unit: a name for error locations and its full text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceUnit {
    pub name: String,
    pub text: String,
}

impl SourceUnit {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

/// Compile source units into one validated, route-annotated schema.
///
/// ## Parameters
/// - `units`: Source units, in the order their groups should appear.
/// - `config`: Compile options; only `path_style` matters here.
///
/// ## Errors
/// Returns the first error of the first failing stage.
#[tracing::instrument(skip_all, fields(units = units.len()))]
pub fn compile_sources(units: &[SourceUnit], config: &CompileConfig) -> Result<Schema, CompileError> {
    let mut schema = Schema::default();
    for unit in units {
        let parsed = parser::parse_unit(&unit.name, &unit.text)?;
        schema.groups.extend(parsed.groups);
    }

    merge::merge_group_ifaces(&mut schema);
    check::check(&schema)?;
    route::compile_routes(&mut schema, config.path_style)?;

    tracing::info!(groups = schema.groups.len(), "schema compiled");
    Ok(schema)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::ast::{PathStyle, Position};

    #[test]
    fn test_interfaces_merge_across_units() {
        let units = [
            SourceUnit::new("a.api", "group g\ninterface Foo {\n  f1(): int\n}\n"),
            SourceUnit::new("b.api", "group g\ninterface Foo {\n  f2(): string\n}\n"),
        ];
        let schema = compile_sources(&units, &CompileConfig::default()).unwrap();
        assert_eq!(schema.groups.len(), 1);
        let funs: Vec<_> = schema.groups[0].ifaces[0].funs.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(funs, ["f1", "f2"]);
    }

    #[test]
    fn test_types_from_other_units_resolve() {
        let units = [
            SourceUnit::new("types.api", "group types\nstruct User {\n  name: string\n}\n"),
            SourceUnit::new(
                "api.api",
                "group api\ninterface Users {\n  # @route post /users/{id}\n  save(id: int, u: User)\n}\n",
            ),
        ];
        let config = CompileConfig::new().with_path_style(PathStyle::Brace);
        let schema = compile_sources(&units, &config).unwrap();
        let (_, save) = schema.funs().next().unwrap();
        let route = save.route.as_ref().unwrap();
        assert_eq!(route.path, "/users/{id}");
        assert_eq!(route.params_in["u"], Position::Body);
    }

    #[test]
    fn test_global_uniqueness_spans_groups() {
        let units = [
            SourceUnit::new("a.api", "group A\nstruct T {\n}\n"),
            SourceUnit::new("b.api", "group B\nscalar T\n"),
        ];
        let err = compile_sources(&units, &CompileConfig::default()).unwrap_err();
        assert_eq!(err.to_string(), "Type [T] defined more than once");
    }

    #[test]
    fn test_parse_error_names_the_unit() {
        let units = [
            SourceUnit::new("ok.api", "group ok\n"),
            SourceUnit::new("broken.api", "group broken\nstruct S\n"),
        ];
        let err = compile_sources(&units, &CompileConfig::default()).unwrap_err();
        assert_eq!(err.to_string(), "broken.api:2: invalid line [struct S] for parsing");
    }
}
