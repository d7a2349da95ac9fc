// ============================================================================
// Declarations
// ============================================================================

impl<'a> ParseSession<'a> {
    fn seek_group(&mut self, line: &str) -> Result<State, CompileError> {
        let caps = GROUP
            .captures(line)
            .ok_or_else(|| self.error(format!("first line must be group, invalid line [{line}]")))?;
        self.group.name = caps[1].to_string();
        self.group.comments = self.flush()?;
        Ok(State::SeekBlock)
    }

    fn seek_block(&mut self, line: &str) -> Result<State, CompileError> {
        if let Some(caps) = SCALAR.captures(line) {
            let comments = self.flush()?;
            self.group.scalar_types.push(ScalarType {
                name: caps[1].to_string(),
                comments,
            });
            return Ok(State::SeekBlock);
        }
        if let Some(caps) = BLOCK_START.captures(line) {
            let kind = BlockKind::from_keyword(&caps[1])
                .ok_or_else(|| self.error(format!("unknown block kind [{}]", &caps[1])))?;
            let comments = self.flush()?;
            return Ok(State::InBlock(Block::open(kind, caps[2].to_string(), comments)));
        }
        Err(self.error(format!("invalid line [{line}] for parsing")))
    }

    fn in_block(&mut self, mut block: Block, line: &str) -> Result<State, CompileError> {
        if line == "}" {
            self.comments.flush_post_comments_to(block.comments_mut());
            block.close_into(&mut self.group);
            return Ok(State::SeekBlock);
        }
        match block {
            Block::Enum(mut enum_type) => {
                let option = self.enum_option(line)?;
                enum_type.options.push(option);
                Ok(State::InBlock(Block::Enum(enum_type)))
            }
            Block::Struct(mut struct_type) => {
                let field = self.struct_field(line)?;
                struct_type.fields.push(field);
                Ok(State::InBlock(Block::Struct(struct_type)))
            }
            Block::Iface(iface) => self.fun_line(iface, line),
        }
    }

    fn enum_option(&mut self, line: &str) -> Result<EnumOption, CompileError> {
        let caps = ENUM_OPTION
            .captures(line)
            .ok_or_else(|| self.error(format!("invalid line [{line}] for enum option")))?;
        let value = match (caps.get(2), caps.get(3)) {
            (Some(int), _) => {
                let n = int
                    .as_str()
                    .parse::<i64>()
                    .map_err(|e| self.error(format!("invalid enum value [{}]: {e}", int.as_str())))?;
                Some(EnumValue::Int(n))
            }
            (None, Some(s)) => Some(EnumValue::Str(s.as_str().to_string())),
            (None, None) => None,
        };
        Ok(EnumOption {
            name: caps[1].to_string(),
            comments: self.flush()?,
            value,
        })
    }

    fn struct_field(&mut self, line: &str) -> Result<StructField, CompileError> {
        let caps = STRUCT_FIELD
            .captures(line)
            .ok_or_else(|| self.error(format!("invalid line [{line}] for struct field")))?;
        Ok(StructField {
            name: caps[1].to_string(),
            comments: self.flush()?,
            ty: self.type_ref(&caps[2])?,
        })
    }

    /// A line inside an interface block: a whole signature, or the start of a multi-line one.
    fn fun_line(&mut self, mut iface: Iface, line: &str) -> Result<State, CompileError> {
        if let Some(caps) = FUN_INLINE.captures(line) {
            let comments = self.flush()?;
            let params = self.parse_params(caps.get(2).map_or("", |m| m.as_str()))?;
            iface.funs.push(Fun {
                name: caps[1].to_string(),
                comments,
                params,
                return_type: self.return_type(caps.get(3))?,
                route: None,
            });
            return Ok(State::InBlock(Block::Iface(iface)));
        }

        if let Some(caps) = FUN_START.captures(line) {
            let comments = self.flush()?;
            let mut fun = Fun {
                name: caps[1].to_string(),
                ..Default::default()
            };
            let mut params = self.parse_params(caps.get(2).map_or("", |m| m.as_str()))?;
            match params.last_mut() {
                // A comment trailing the opening line belongs to its last parameter
                Some(last) => {
                    let (lead, post) = comments.split_post();
                    fun.comments = lead;
                    last.comments.post_comments = post;
                }
                None => fun.comments = comments,
            }
            fun.params = params;
            return Ok(State::InFunSignature { iface, fun });
        }

        Err(self.error(format!("invalid line [{line}] for parsing")))
    }

    fn in_fun_signature(&mut self, mut iface: Iface, mut fun: Fun, line: &str) -> Result<State, CompileError> {
        if line == "}" {
            return Err(self.error(format!("unterminated function signature [{}.{}]", iface.name, fun.name)));
        }

        if let Some(caps) = FUN_END.captures(line) {
            let mut params = self.parse_params(caps.get(1).map_or("", |m| m.as_str()))?;
            match params.last_mut() {
                Some(last) => {
                    let post = std::mem::take(&mut last.comments.post_comments);
                    fun.comments.post_comments.extend(post);
                }
                None => self.comments.flush_post_comments_to(&mut fun.comments),
            }
            fun.params.extend(params);
            fun.return_type = self.return_type(caps.get(2))?;
            iface.funs.push(fun);
            return Ok(State::InBlock(Block::Iface(iface)));
        }

        let params = self.parse_params(line)?;
        fun.params.extend(params);
        Ok(State::InFunSignature { iface, fun })
    }
}
