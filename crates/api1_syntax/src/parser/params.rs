// ============================================================================
// Parameter lists
// ============================================================================

impl<'a> ParseSession<'a> {
    /// Parse a comma-separated parameter fragment (`a: int, b: [User]? = null`).
    ///
    /// ## Notes
    /// - Empty pieces are skipped, so trailing commas are allowed.
    /// - The type grammar never contains commas; a piece with unbalanced brackets means a comma
    ///   split a type expression and is rejected.
    /// - Pending leading comments go to the first parameter of the fragment, pending post comments
    ///   to the last one. An empty fragment leaves the pending comments alone.
    fn parse_params(&mut self, fragment: &str) -> Result<Vec<Param>, CompileError> {
        let mut params = Vec::new();
        if fragment.is_empty() {
            return Ok(params);
        }

        for piece in COMMA.split(fragment) {
            if piece.is_empty() {
                continue;
            }
            if !brackets_balanced(piece) {
                return Err(self.error(format!("comma inside type expression [{fragment}]")));
            }
            let caps = PARAM
                .captures(piece)
                .ok_or_else(|| self.error(format!("invalid string [{fragment}] for params")))?;
            params.push(Param {
                name: caps[1].to_string(),
                comments: HasComments::default(),
                ty: self.type_ref(&caps[2])?,
                default_value: caps.get(3).map(|m| m.as_str().to_string()),
            });
        }

        if !params.is_empty() {
            let (lead, post) = self.flush()?.split_post();
            params[0].comments = lead;
            if let Some(last) = params.last_mut() {
                last.comments.post_comments = post;
            }
        }
        Ok(params)
    }
}
