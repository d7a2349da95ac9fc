// ============================================================================
// Session state
// ============================================================================

/// Kind of a `{ ... }` block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Enum,
    Struct,
    Interface,
}

impl BlockKind {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "enum" => Some(BlockKind::Enum),
            "struct" => Some(BlockKind::Struct),
            "interface" => Some(BlockKind::Interface),
            _ => None,
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            BlockKind::Enum => "enum",
            BlockKind::Struct => "struct",
            BlockKind::Interface => "interface",
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// The declaration whose block is currently open.
#[derive(Debug)]
enum Block {
    Enum(EnumType),
    Struct(StructType),
    Iface(Iface),
}

impl Block {
    fn open(kind: BlockKind, name: String, comments: HasComments) -> Self {
        match kind {
            BlockKind::Enum => Block::Enum(EnumType {
                name,
                comments,
                ..Default::default()
            }),
            BlockKind::Struct => Block::Struct(StructType {
                name,
                comments,
                ..Default::default()
            }),
            BlockKind::Interface => Block::Iface(Iface {
                name,
                comments,
                ..Default::default()
            }),
        }
    }

    fn kind(&self) -> BlockKind {
        match self {
            Block::Enum(_) => BlockKind::Enum,
            Block::Struct(_) => BlockKind::Struct,
            Block::Iface(_) => BlockKind::Interface,
        }
    }

    fn name(&self) -> &str {
        match self {
            Block::Enum(e) => &e.name,
            Block::Struct(s) => &s.name,
            Block::Iface(i) => &i.name,
        }
    }

    fn comments_mut(&mut self) -> &mut HasComments {
        match self {
            Block::Enum(e) => &mut e.comments,
            Block::Struct(s) => &mut s.comments,
            Block::Iface(i) => &mut i.comments,
        }
    }

    /// Append the finished declaration to its group.
    fn close_into(self, group: &mut Group) {
        match self {
            Block::Enum(e) => group.enum_types.push(e),
            Block::Struct(s) => group.struct_types.push(s),
            Block::Iface(i) => group.ifaces.push(i),
        }
    }
}

#[derive(Debug)]
enum State {
    /// Nothing but comments seen so far.
    SeekGroup,
    /// Between top-level declarations.
    SeekBlock,
    InBlock(Block),
    /// Inside a function signature spanning several lines.
    InFunSignature { iface: Iface, fun: Fun },
}

/// Parser state for a single source unit.
///
/// ## Notes
/// - A session is consumed by [`ParseSession::finish`]; parse the next unit with a fresh one.
/// - Line numbers are 1-based and count every physical line, including blank ones.
#[derive(Debug)]
pub struct ParseSession<'a> {
    unit: &'a str,
    line_no: usize,
    comments: CommentAccumulator,
    group: Group,
    state: State,
}

impl<'a> ParseSession<'a> {
    pub fn new(unit: &'a str) -> Self {
        Self {
            unit,
            line_no: 0,
            comments: CommentAccumulator::new(),
            group: Group::default(),
            state: State::SeekGroup,
        }
    }

    /// Feed the next physical line of the unit.
    pub fn feed_line(&mut self, raw: &str) -> Result<(), CompileError> {
        self.line_no += 1;

        let mut line = raw.trim();
        if let Some(caps) = COMMENT.captures(line) {
            let code = caps.get(1).map_or("", |m| m.as_str());
            let comment = caps.get(2).map_or("", |m| m.as_str());
            if code.is_empty() {
                self.comments.add_comment(comment);
            } else {
                self.comments.add_post_comment(comment);
            }
            line = code;
        }
        if line.is_empty() {
            return Ok(());
        }

        let state = std::mem::replace(&mut self.state, State::SeekBlock);
        self.state = match state {
            State::SeekGroup => self.seek_group(line)?,
            State::SeekBlock => self.seek_block(line)?,
            State::InBlock(block) => self.in_block(block, line)?,
            State::InFunSignature { iface, fun } => self.in_fun_signature(iface, fun, line)?,
        };
        Ok(())
    }

    /// Finish the unit and return its single-group schema.
    ///
    /// ## Errors
    /// Fails if no `group` line was seen, or if a block or a function signature is still open.
    pub fn finish(mut self) -> Result<Schema, CompileError> {
        let state = std::mem::replace(&mut self.state, State::SeekBlock);
        match state {
            State::SeekGroup => Err(self.error("missing group declaration")),
            State::InBlock(block) => Err(self.error(format!(
                "unterminated block: {} [{}] needs a closing brace",
                block.kind(),
                block.name()
            ))),
            State::InFunSignature { fun, .. } => {
                Err(self.error(format!("unterminated function signature [{}]", fun.name)))
            }
            State::SeekBlock => {
                self.comments.flush_post_comments_to(&mut self.group.comments);
                Ok(Schema {
                    groups: vec![self.group],
                })
            }
        }
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    fn error(&self, message: impl Into<String>) -> CompileError {
        CompileError::syntax(self.unit, self.line_no, message)
    }

    /// Parse a type string, rejecting nesting deeper than [`MAX_TYPE_DEPTH`].
    fn type_ref(&self, text: &str) -> Result<TypeRef, CompileError> {
        let depth = nesting_depth(text);
        if depth > MAX_TYPE_DEPTH {
            return Err(self.error(format!(
                "type nests {depth} array levels, at most {MAX_TYPE_DEPTH} are allowed"
            )));
        }
        Ok(parse_type(text))
    }

    /// Parse an optional `: Type` suffix of a signature.
    fn return_type(&self, m: Option<regex::Match<'_>>) -> Result<Option<TypeRef>, CompileError> {
        match m.map(|m| m.as_str()).filter(|s| !s.is_empty()) {
            Some(text) => self.type_ref(text).map(Some),
            None => Ok(None),
        }
    }

    /// Drain pending comments for the declaration on the current line.
    fn flush(&mut self) -> Result<HasComments, CompileError> {
        self.comments.flush().map_err(|e| e.at(self.unit, self.line_no))
    }
}
