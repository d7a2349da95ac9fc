//! CLI command implementations
//!
//! All commands return `CliResult<ExitCode>` instead of calling `process::exit`.
//! This makes them testable and allows proper error propagation.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::CompileConfig;
use crate::frontend::ast::{Group, Schema};
use crate::frontend::diagnostics::CompileError;
use crate::frontend::resolver;
use crate::frontend::route::RouteCompiler;

use super::{CliError, CliResult, ExitCode};

/// Render a compile error for the terminal.
fn report(err: CompileError) -> CliError {
    CliError::failure(format!("{:?}", miette::Report::new(err)))
}

/// Discover, read and compile every source under `paths`.
pub fn compile_paths(paths: &[PathBuf], config: &CompileConfig) -> CliResult<Schema> {
    let files = resolver::discover_sources(paths, config).map_err(report)?;
    if files.is_empty() {
        return Err(CliError::failure(format!(
            "No .{} source files found",
            config.source_extension
        )));
    }
    tracing::debug!(files = files.len(), "compiling sources");
    resolver::compile_files(&files, config).map_err(report)
}

// ============================================================================
// check
// ============================================================================

/// Compile and print one summary line per group.
pub fn check(paths: &[PathBuf], config: &CompileConfig) -> CliResult<ExitCode> {
    let schema = compile_paths(paths, config)?;
    for group in &schema.groups {
        println!("{}", group_summary(group));
    }
    Ok(ExitCode::SUCCESS)
}

/// `group user: 1 scalars, 2 enums, 3 structs, 1 interfaces, 4 routes`
pub fn group_summary(group: &Group) -> String {
    let routes = group
        .ifaces
        .iter()
        .flat_map(|iface| iface.funs.iter())
        .filter(|fun| fun.route.is_some())
        .count();
    format!(
        "group {}: {} scalars, {} enums, {} structs, {} interfaces, {} routes",
        group.name,
        group.scalar_types.len(),
        group.enum_types.len(),
        group.struct_types.len(),
        group.ifaces.len(),
        routes
    )
}

// ============================================================================
// dump
// ============================================================================

/// Compile and write the schema as pretty JSON to `out`, or stdout.
pub fn dump(paths: &[PathBuf], out: Option<&Path>, config: &CompileConfig) -> CliResult<ExitCode> {
    let schema = compile_paths(paths, config)?;
    let json = serde_json::to_string_pretty(&schema)
        .map_err(|e| CliError::failure(format!("Error serializing schema: {}", e)))?;

    match out {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).map_err(|e| {
                    CliError::failure(format!("Error creating directory '{}': {}", parent.display(), e))
                })?;
            }
            fs::write(path, json + "\n")
                .map_err(|e| CliError::failure(format!("Error writing '{}': {}", path.display(), e)))?;
            tracing::info!("wrote schema to {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// routes
// ============================================================================

/// Compile and print the route table.
pub fn routes(paths: &[PathBuf], config: &CompileConfig) -> CliResult<ExitCode> {
    let schema = compile_paths(paths, config)?;
    print!("{}", route_table(&schema));
    Ok(ExitCode::SUCCESS)
}

/// One line per routed function: `METHOD path  Iface.fun  (param:position, ...)`.
pub fn route_table(schema: &Schema) -> String {
    let mut out = String::new();
    for (iface, fun) in schema.funs() {
        let Some(route) = &fun.route else {
            continue;
        };
        let params = RouteCompiler::route_params(fun)
            .into_iter()
            .map(|(param, position)| format!("{}:{}", param.name, position))
            .collect::<Vec<_>>()
            .join(", ");
        let _ = writeln!(
            out,
            "{:<7} {}  {}.{}  ({})",
            route.method.to_string(),
            route.path,
            iface.name,
            fun.name,
            params
        );
    }
    out
}
