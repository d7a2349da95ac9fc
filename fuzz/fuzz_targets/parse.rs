#![no_main]

use api1::{CompileConfig, SourceUnit, compile_sources, parser};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Convert bytes to UTF-8 string (ignore invalid UTF-8)
    if let Ok(s) = std::str::from_utf8(data) {
        // Fuzz the line parser
        if parser::parse_unit("fuzz.api", s).is_ok() {
            // If parsing succeeds, fuzz the later passes too
            let _ = compile_sources(&[SourceUnit::new("fuzz.api", s)], &CompileConfig::default());
        }
    }
});
