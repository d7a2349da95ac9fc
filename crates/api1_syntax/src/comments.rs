//! Comment accumulation and semantic comment decoding.
//!
//! The line parser feeds every `#` comment it meets into a [`CommentAccumulator`]: comments on
//! otherwise blank lines are *leading* comments for the next declaration, comments trailing code
//! are *post* comments for the entity on that line. When a declaration is created it drains the
//! accumulator with [`CommentAccumulator::flush`], which also decodes `@key` annotations.
//!
//! ## Semantic comment syntax
//!
//! ```text
//! # @key value            raw string
//! # @key:json {"a": 1}    JSON
//! # @key:yaml |           multi-line: following lines indented by one or two spaces
//! #   a:
//! #     b: 1
//! ```

use std::sync::LazyLock;

use regex::Regex;

use crate::ast::HasComments;
use crate::diagnostics::CompileError;
use crate::sem::{self, SemFormat};

/// Comment marker of the schema language.
pub const COMMENT_SIGN: char = '#';
/// Prefix distinguishing semantic comments from documentation.
pub const SEM_SIGN: char = '@';

static SEM_COMMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^\s*{SEM_SIGN}([0-9A-Za-z_.]+?)(?::(json|ya?ml))?(?:\s*(\|)|\s+([^|].*?))?\s*$"
    ))
    .expect("INVARIANT: semantic comment pattern is valid")
});

/// A semantic comment that failed to decode. Converted into
/// [`CompileError::SemanticDecode`] once the parser knows where it happened.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodeFailure {
    pub key: String,
    pub format: SemFormat,
    pub raw: String,
    pub reason: String,
}

impl DecodeFailure {
    pub fn at(self, unit: &str, line: usize) -> CompileError {
        CompileError::SemanticDecode {
            unit: unit.to_string(),
            line,
            key: self.key,
            format: self.format.to_string(),
            raw: self.raw,
            reason: self.reason,
        }
    }
}

/// Pending comments of one parse session.
///
/// ## Notes
/// - Owned by a single parse session; never shared between source units.
/// - Every declaration drains it, so comments never leak onto a later declaration.
#[derive(Debug, Default)]
pub struct CommentAccumulator {
    comments: Vec<String>,
    post_comments: Vec<String>,
}

impl CommentAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a comment found on an otherwise blank line.
    pub fn add_comment(&mut self, raw: &str) {
        self.comments.push(strip_marker(raw).to_string());
    }

    /// Queue a comment trailing code on the same line.
    pub fn add_post_comment(&mut self, raw: &str) {
        self.post_comments.push(strip_marker(raw).to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.comments.is_empty() && self.post_comments.is_empty()
    }

    /// Drain the pending comments into a [`HasComments`] for a new declaration.
    ///
    /// Leading lines matching the semantic comment pattern become `sem_comments`, the rest become
    /// `comments`; pending post comments become `post_comments`.
    ///
    /// ## Errors
    /// Returns a [`DecodeFailure`] if a `json`/`yaml` annotation does not decode. The accumulator
    /// is emptied either way.
    pub fn flush(&mut self) -> Result<HasComments, DecodeFailure> {
        let lines = std::mem::take(&mut self.comments);
        let post_comments = std::mem::take(&mut self.post_comments);

        let mut out = HasComments::default();
        let mut pending: Option<PendingSem> = None;

        for line in lines {
            if let Some(sem) = pending.as_mut() {
                if sem.multi_line {
                    if let Some(continued) = strip_block_indent(&line) {
                        sem.push_line(continued);
                        continue;
                    }
                }
                if let Some(sem) = pending.take() {
                    sem.commit(&mut out)?;
                }
            }

            if let Some(caps) = SEM_COMMENT.captures(&line) {
                let key = caps[1].to_string();
                let format = SemFormat::from_suffix(caps.get(2).map(|m| m.as_str())).unwrap_or(SemFormat::Raw);
                let multi_line = caps.get(3).is_some();
                let value = caps.get(4).map(|m| m.as_str().to_string()).unwrap_or_default();
                let sem = PendingSem {
                    key,
                    format,
                    value,
                    multi_line,
                };
                if multi_line {
                    pending = Some(sem);
                } else {
                    sem.commit(&mut out)?;
                }
                continue;
            }

            out.comments.push(line);
        }

        if let Some(sem) = pending.take() {
            sem.commit(&mut out)?;
        }
        out.post_comments = post_comments;
        Ok(out)
    }

    /// Append every pending comment, undecoded, to `target`'s post comments.
    ///
    /// Used when a block or a signature closes: whatever is still pending trails the entity
    /// being closed.
    pub fn flush_post_comments_to(&mut self, target: &mut HasComments) {
        target.post_comments.append(&mut self.comments);
        target.post_comments.append(&mut self.post_comments);
    }
}

/// A semantic comment being collected.
struct PendingSem {
    key: String,
    format: SemFormat,
    value: String,
    multi_line: bool,
}

impl PendingSem {
    fn push_line(&mut self, line: &str) {
        if !self.value.is_empty() {
            self.value.push('\n');
        }
        self.value.push_str(line);
    }

    fn commit(self, out: &mut HasComments) -> Result<(), DecodeFailure> {
        match sem::decode(self.format, &self.value) {
            Ok(value) => {
                out.add_sem_comment(self.key, value);
                Ok(())
            }
            Err(reason) => Err(DecodeFailure {
                key: self.key,
                format: self.format,
                raw: self.value,
                reason,
            }),
        }
    }
}

/// Remove the comment marker and one following space.
fn strip_marker(raw: &str) -> &str {
    let s = raw.strip_prefix(COMMENT_SIGN).unwrap_or(raw);
    s.strip_prefix(' ').unwrap_or(s)
}

/// Continuation lines of a multi-line annotation are indented by two spaces, or one.
fn strip_block_indent(line: &str) -> Option<&str> {
    line.strip_prefix("  ").or_else(|| line.strip_prefix(' '))
}
