/// Parse one schema source unit into a single-group [`Schema`].
///
/// This is the main public entrypoint for parsing.
///
/// ## Parameters
/// - `name`: Unit name used in error locations (usually the file path).
/// - `text`: Full source text of the unit.
///
/// ## Errors
/// Returns the first [`CompileError::Syntax`] or [`CompileError::SemanticDecode`] encountered.
#[tracing::instrument(skip_all, fields(unit = %name, bytes = text.len()))]
pub fn parse_unit(name: &str, text: &str) -> Result<Schema, CompileError> {
    let mut session = ParseSession::new(name);
    for line in text.split('\n') {
        session.feed_line(line)?;
    }
    let schema = session.finish()?;

    if let Some(group) = schema.groups.first() {
        tracing::debug!(
            group = %group.name,
            scalars = group.scalar_types.len(),
            enums = group.enum_types.len(),
            structs = group.struct_types.len(),
            ifaces = group.ifaces.len(),
            "parsed unit"
        );
    }
    Ok(schema)
}
