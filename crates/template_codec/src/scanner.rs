//! Placeholder scanner - locates interpolation tags in one template line
//!
//! The tokenizer follows mustache tag rules: an opening delimiter, an
//! optional type sigil, the tag body and a closing delimiter. Only plain
//! name tags outside of any section count as placeholders. A line that does
//! not tokenize is kept as literal text.

use crate::{Result, TemplateCodecError};
use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::ops::Range;
use thiserror::Error;

/// Byte range of a placeholder within its line
pub type Span = Range<usize>;

/// Opening and closing tag delimiters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delimiters {
    pub open: String,
    pub close: String,
}

impl Delimiters {
    /// Validated delimiters: both non-empty and free of whitespace
    pub fn new(open: impl Into<String>, close: impl Into<String>) -> Result<Self> {
        let delimiters = Self {
            open: open.into(),
            close: close.into(),
        };
        delimiters.validate()?;
        Ok(delimiters)
    }

    pub fn validate(&self) -> Result<()> {
        for d in [&self.open, &self.close] {
            if d.is_empty() || d.chars().any(char::is_whitespace) {
                return Err(TemplateCodecError::InvalidDelimiters(format!(
                    "{:?} {:?}",
                    self.open, self.close
                )));
            }
        }
        Ok(())
    }

    /// Parse the body of a `{{=<% %>=}}` tag; words after the second are ignored
    fn from_set_tag(body: &str) -> std::result::Result<Self, ScanError> {
        let mut parts = body.split_whitespace();
        match (parts.next(), parts.next()) {
            (Some(open), Some(close)) => Ok(Self {
                open: open.to_string(),
                close: close.to_string(),
            }),
            _ => Err(ScanError::InvalidTags(body.to_string())),
        }
    }
}

impl Default for Delimiters {
    fn default() -> Self {
        Self {
            open: "{{".to_string(),
            close: "}}".to_string(),
        }
    }
}

/// Why a line failed to tokenize
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ScanError {
    #[error("Unclosed tag at {0}")]
    UnclosedTag(usize),

    #[error("Unopened section \"{name}\" at {position}")]
    UnopenedSection { name: String, position: usize },

    #[error("Unclosed section \"{name}\" at {position}")]
    UnclosedSection { name: String, position: usize },

    #[error("Invalid tags: {0}")]
    InvalidTags(String),
}

/// Tag kinds, by type sigil
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    /// `{{ name }}`
    Name,
    /// `{{{ name }}}` or `{{& name }}`
    Unescaped,
    /// `{{# name }}`
    Section,
    /// `{{^ name }}`
    Inverted,
    /// `{{/ name }}`
    Close,
    /// `{{> name }}`
    Partial,
    /// `{{! comment }}`
    Comment,
    /// `{{=<% %>=}}`
    SetDelimiters,
}

impl TagKind {
    fn from_sigil(sigil: &str) -> Self {
        match sigil {
            "#" => TagKind::Section,
            "^" => TagKind::Inverted,
            "/" => TagKind::Close,
            ">" => TagKind::Partial,
            "{" | "&" => TagKind::Unescaped,
            "=" => TagKind::SetDelimiters,
            "!" => TagKind::Comment,
            _ => TagKind::Name,
        }
    }
}

/// One tag found in a line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub kind: TagKind,
    /// The tag body with surrounding whitespace removed
    pub value: String,
    /// From the first byte of the opening delimiter to the end of the closing one
    pub span: Span,
    /// Number of sections enclosing the tag
    pub depth: usize,
}

#[derive(Debug, Clone)]
struct TagPatterns {
    opening: Regex,
    closing: Regex,
    closing_curly: Regex,
    sigil: Regex,
    white: Regex,
    equals: Regex,
    curly: Regex,
}

impl TagPatterns {
    fn compile(delimiters: &Delimiters) -> std::result::Result<Self, ScanError> {
        let open = regex_lite::escape(&delimiters.open);
        let close = regex_lite::escape(&delimiters.close);
        let curly_close = regex_lite::escape(&format!("}}{}", delimiters.close));
        let re = |pattern: String| {
            Regex::new(&pattern).map_err(|e| ScanError::InvalidTags(e.to_string()))
        };
        Ok(Self {
            opening: re(format!(r"{open}\s*"))?,
            closing: re(format!(r"\s*{close}"))?,
            closing_curly: re(format!(r"\s*{curly_close}"))?,
            sigil: re(r"[#^/>{&=!]".to_string())?,
            white: re(r"\s*".to_string())?,
            equals: re(r"\s*=".to_string())?,
            curly: re(r"\s*\}".to_string())?,
        })
    }
}

/// Cursor over a line, matching patterns anchored at the current position
struct Cursor<'a> {
    line: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(line: &'a str) -> Self {
        Self { line, pos: 0 }
    }

    fn eos(&self) -> bool {
        self.pos >= self.line.len()
    }

    fn tail(&self) -> &'a str {
        &self.line[self.pos..]
    }

    /// Consume a match of `re` if it starts exactly at the cursor
    fn scan(&mut self, re: &Regex) -> Option<&'a str> {
        let tail = self.tail();
        let m = re.find(tail).filter(|m| m.start() == 0)?;
        self.pos += m.end();
        Some(&tail[..m.end()])
    }

    /// Consume everything up to the next match of `re`, or to the end
    fn scan_until(&mut self, re: &Regex) -> &'a str {
        let tail = self.tail();
        let len = re.find(tail).map_or(tail.len(), |m| m.start());
        self.pos += len;
        &tail[..len]
    }
}

/// Finds placeholder spans in template lines
#[derive(Debug, Clone)]
pub struct PlaceholderScanner {
    delimiters: Delimiters,
    /// Patterns for `delimiters`, compiled once
    patterns: std::result::Result<TagPatterns, ScanError>,
}

impl Default for PlaceholderScanner {
    fn default() -> Self {
        Self::new(Delimiters::default())
    }
}

impl PlaceholderScanner {
    pub fn new(delimiters: Delimiters) -> Self {
        let patterns = TagPatterns::compile(&delimiters);
        Self {
            delimiters,
            patterns,
        }
    }

    pub fn delimiters(&self) -> &Delimiters {
        &self.delimiters
    }

    /// Tokenize one line into its tags
    pub fn tokenize(&self, line: &str) -> std::result::Result<Vec<Tag>, ScanError> {
        let mut patterns = match &self.patterns {
            Ok(patterns) => Cow::Borrowed(patterns),
            Err(e) => return Err(e.clone()),
        };
        let mut cursor = Cursor::new(line);
        let mut sections: Vec<(String, usize)> = Vec::new();
        let mut tags = Vec::new();

        while !cursor.eos() {
            cursor.scan_until(&patterns.opening);
            let start = cursor.pos;
            if cursor.scan(&patterns.opening).is_none() {
                break;
            }

            let sigil = cursor.scan(&patterns.sigil);
            let kind = sigil.map_or(TagKind::Name, TagKind::from_sigil);
            cursor.scan(&patterns.white);

            let value = match (kind, sigil) {
                (TagKind::SetDelimiters, _) => {
                    let value = cursor.scan_until(&patterns.equals);
                    cursor.scan(&patterns.equals);
                    cursor.scan_until(&patterns.closing);
                    value
                }
                (TagKind::Unescaped, Some("{")) => {
                    let value = cursor.scan_until(&patterns.closing_curly);
                    cursor.scan(&patterns.curly);
                    cursor.scan_until(&patterns.closing);
                    value
                }
                _ => cursor.scan_until(&patterns.closing),
            };

            if cursor.scan(&patterns.closing).is_none() {
                return Err(ScanError::UnclosedTag(cursor.pos));
            }

            let mut depth = sections.len();
            match kind {
                TagKind::Section | TagKind::Inverted => {
                    sections.push((value.to_string(), start));
                }
                TagKind::Close => {
                    let (open, _) = sections.pop().ok_or_else(|| ScanError::UnopenedSection {
                        name: value.to_string(),
                        position: start,
                    })?;
                    if open != value {
                        return Err(ScanError::UnclosedSection {
                            name: open,
                            position: start,
                        });
                    }
                    depth = sections.len();
                }
                TagKind::SetDelimiters => {
                    patterns = Cow::Owned(TagPatterns::compile(&Delimiters::from_set_tag(value)?)?);
                }
                _ => {}
            }

            tags.push(Tag {
                kind,
                value: value.to_string(),
                span: start..cursor.pos,
                depth,
            });
        }

        if let Some((name, position)) = sections.pop() {
            return Err(ScanError::UnclosedSection { name, position });
        }

        Ok(tags)
    }

    /// Spans of the placeholders in a line, left to right.
    ///
    /// Never fails: a line that does not tokenize has no placeholders.
    pub fn scan(&self, line: &str) -> Vec<Span> {
        match self.tokenize(line) {
            Ok(tags) => tags
                .into_iter()
                .filter(|tag| tag.kind == TagKind::Name && tag.depth == 0)
                .map(|tag| tag.span)
                .collect(),
            Err(e) => {
                tracing::debug!(error = %e, "line is not a valid template; keeping it as text");
                Vec::new()
            }
        }
    }
}
