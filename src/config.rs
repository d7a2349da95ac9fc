//! Compile configuration for api1 schemas

use crate::frontend::ast::PathStyle;

/// Default cap on a single source file (10 MiB)
pub const DEFAULT_MAX_SOURCE_SIZE: u64 = 10 * 1024 * 1024;

/// Compile configuration
#[derive(Debug, Clone)]
pub struct CompileConfig {
    /// Placeholder spelling of compiled route paths
    pub path_style: PathStyle,
    /// Extension of source files discovered inside directories (without the dot)
    pub source_extension: String,
    /// Source files larger than this are rejected before reading
    pub max_source_size: u64,
}

impl Default for CompileConfig {
    fn default() -> Self {
        Self {
            path_style: PathStyle::Colon,
            source_extension: "api".to_string(),
            max_source_size: DEFAULT_MAX_SOURCE_SIZE,
        }
    }
}

impl CompileConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the route path style
    pub fn with_path_style(mut self, style: PathStyle) -> Self {
        self.path_style = style;
        self
    }

    /// Set the source file extension; a leading dot is ignored
    pub fn with_source_extension(mut self, ext: impl Into<String>) -> Self {
        let ext: String = ext.into();
        self.source_extension = ext.trim_start_matches('.').to_string();
        self
    }

    /// Set the maximum source file size in bytes
    pub fn with_max_source_size(mut self, bytes: u64) -> Self {
        self.max_source_size = bytes;
        self
    }
}
