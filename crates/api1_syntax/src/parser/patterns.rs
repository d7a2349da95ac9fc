// ============================================================================
// Line patterns
// ============================================================================

/// Identifier grammar shared by every declaration kind.
const ID: &str = "[A-Za-z][0-9A-Za-z_]*?";
/// Loose type-string grammar; the structure is checked by [`parse_type`] and the validator.
const TYPE: &str = r"[A-Za-z\[][0-9A-Za-z_\[\]\?]*?";

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("INVARIANT: parser line patterns are valid regexes")
}

static COMMENT: LazyLock<Regex> = LazyLock::new(|| compile(r"^([^#]*?)\s*(#.*)$"));
static GROUP: LazyLock<Regex> = LazyLock::new(|| compile(&format!(r"^group\s+({ID})$")));
static SCALAR: LazyLock<Regex> = LazyLock::new(|| compile(&format!(r"^scalar\s+({ID})$")));
static BLOCK_START: LazyLock<Regex> =
    LazyLock::new(|| compile(&format!(r"^(enum|struct|interface)\s+({ID})\s*\{{$")));
static ENUM_OPTION: LazyLock<Regex> =
    LazyLock::new(|| compile(&format!(r#"^({ID})(?:\s*=\s*(?:(-?\d+)|"([^"]*)"))?$"#)));
static STRUCT_FIELD: LazyLock<Regex> = LazyLock::new(|| compile(&format!(r"^({ID})\s*:\s*({TYPE})$")));
static FUN_INLINE: LazyLock<Regex> =
    LazyLock::new(|| compile(&format!(r"^({ID})\s*\((.*?)\)(?:\s*:\s*({TYPE}))?$")));
static FUN_START: LazyLock<Regex> = LazyLock::new(|| compile(&format!(r"^({ID})\s*\(\s*(.*?)$")));
static FUN_END: LazyLock<Regex> = LazyLock::new(|| compile(&format!(r"^(.*?)\s*\)(?:\s*:\s*({TYPE}))?$")));
static PARAM: LazyLock<Regex> =
    LazyLock::new(|| compile(&format!(r"^({ID})\s*:\s*({TYPE})(?:\s*=\s*(.+?))?$")));
static COMMA: LazyLock<Regex> = LazyLock::new(|| compile(r"\s*,\s*"));
