//! Source discovery for multi-file schemas
//!
//! Expands the paths given on the command line into an ordered list of source files and reads
//! them into [`SourceUnit`]s.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//! use api1::config::CompileConfig;
//! use api1::frontend::resolver;
//!
//! let config = CompileConfig::default();
//! let files = resolver::discover_sources(&[PathBuf::from("schema/")], &config).unwrap();
//! let schema = resolver::compile_files(&files, &config).unwrap();
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::CompileConfig;
use crate::frontend::ast::Schema;
use crate::frontend::diagnostics::CompileError;
use crate::frontend::pipeline::{SourceUnit, compile_sources};

/// Expand `paths` into source files.
///
/// Directories are searched recursively for files with the configured extension, and each
/// directory's files are sorted so the result is stable. Explicit file paths are kept as given,
/// whatever their extension.
///
/// ## Errors
/// Returns [`CompileError::Io`] for a path that does not exist or a directory that cannot be
/// listed.
pub fn discover_sources(paths: &[PathBuf], config: &CompileConfig) -> Result<Vec<PathBuf>, CompileError> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            let mut found = Vec::new();
            walk_dir(path, &config.source_extension, &mut found)?;
            found.sort();
            if found.is_empty() {
                tracing::warn!("no .{} files found under {}", config.source_extension, path.display());
            }
            files.extend(found);
        } else if path.is_file() {
            files.push(path.clone());
        } else {
            return Err(CompileError::io(path.display().to_string(), "no such file or directory"));
        }
    }
    Ok(files)
}

fn walk_dir(dir: &Path, ext: &str, out: &mut Vec<PathBuf>) -> Result<(), CompileError> {
    let entries = fs::read_dir(dir).map_err(|e| CompileError::io(dir.display().to_string(), e.to_string()))?;
    for entry in entries {
        let entry = entry.map_err(|e| CompileError::io(dir.display().to_string(), e.to_string()))?;
        let path = entry.path();
        if path.is_dir() {
            walk_dir(&path, ext, out)?;
        } else if path.extension().is_some_and(|e| e == ext) {
            out.push(path);
        }
    }
    Ok(())
}

/// Read a source file, refusing files larger than `config.max_source_size`.
///
/// ## Errors
/// Returns [`CompileError::Io`] if the file cannot be accessed, is too large, or is not UTF-8.
pub fn read_source(path: &Path, config: &CompileConfig) -> Result<String, CompileError> {
    let display = path.display().to_string();
    let metadata = fs::metadata(path).map_err(|e| CompileError::io(&display, e.to_string()))?;

    if metadata.len() > config.max_source_size {
        return Err(CompileError::io(
            &display,
            format!(
                "file is too large ({} bytes, max {} bytes)",
                metadata.len(),
                config.max_source_size
            ),
        ));
    }

    fs::read_to_string(path).map_err(|e| CompileError::io(&display, e.to_string()))
}

/// Read every file fully into memory, then compile them as one schema.
///
/// Units are named by their path, so syntax errors point at the offending file.
pub fn compile_files(files: &[PathBuf], config: &CompileConfig) -> Result<Schema, CompileError> {
    let units = files
        .iter()
        .map(|path| read_source(path, config).map(|text| SourceUnit::new(path.display().to_string(), text)))
        .collect::<Result<Vec<_>, _>>()?;
    compile_sources(&units, config)
}
