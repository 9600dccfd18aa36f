// Licensed under the Apache-2.0 license

//! `enum NAME { ... };` and `typedef enum TAG { ... } ALIAS;`.
//!
//! The construct is read in three phases: the header up to `{`, the body up
//! to the matching `}`, and the tail up to `;`. Any of them may span lines.
//! Enumerators without an explicit value get the C implicit value when the
//! previous value is known.

use std::collections::HashMap;

use super::{Feed, ParseContext, Recognizer, TreeEdit};
use crate::text::{is_ident, is_ident_char, strip_keyword};
use crate::tree::NodeKind;
use crate::value::parse_literal;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum Phase {
    #[default]
    Header,
    Body,
    Tail,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EnumState {
    phase: Phase,
    keyword_seen: bool,
    typedef: bool,
    tag: Option<String>,
    node_name: Option<String>,
    header: String,
    entry: String,
    declarators: String,
    paren_depth: usize,
    in_comment: bool,
    next_implicit: Option<i128>,
    known: HashMap<String, i128>,
}

fn typedef_body(fragment: &str) -> Option<&str> {
    strip_keyword(fragment, "typedef")
}

impl Recognizer for EnumState {
    fn matches(fragment: &str) -> bool {
        let fragment = typedef_body(fragment)
            .map(str::trim_start)
            .unwrap_or(fragment);
        strip_keyword(fragment, "enum").is_some()
    }

    fn feed<'a>(&mut self, fragment: &'a str, ctx: &mut ParseContext) -> Feed<'a> {
        let mut edits = Vec::new();
        let mut rest = fragment;
        loop {
            match self.phase {
                Phase::Header => {
                    if !self.keyword_seen {
                        self.keyword_seen = true;
                        if let Some(body) = typedef_body(rest.trim_start()) {
                            self.typedef = true;
                            rest = body;
                        }
                        rest = strip_keyword(rest.trim_start(), "enum").unwrap_or(rest);
                    }
                    let stop = scan_code(rest, &mut self.in_comment, &mut self.header, |c| {
                        c == '{' || c == ';'
                    });
                    match stop {
                        None => return Feed::pending(edits),
                        Some(i) if rest[i..].starts_with(';') => {
                            // Forward declaration.
                            return Feed::done(edits, &rest[i + 1..]);
                        }
                        Some(i) => {
                            self.read_header();
                            let name = match &self.tag {
                                Some(tag) => tag.clone(),
                                None => ctx.next_anonymous_enum(),
                            };
                            edits.push(TreeEdit::Enter {
                                name: name.clone(),
                                kind: NodeKind::Enum,
                            });
                            self.node_name = Some(name);
                            self.next_implicit = Some(0);
                            self.phase = Phase::Body;
                            rest = &rest[i + 1..];
                        }
                    }
                }
                Phase::Body => match self.scan_body(rest, &mut edits) {
                    Some(end) => {
                        edits.push(TreeEdit::Leave);
                        self.phase = Phase::Tail;
                        rest = &rest[end..];
                    }
                    None => return Feed::pending(edits),
                },
                Phase::Tail => return self.finish_tail(rest, edits, ctx),
            }
        }
    }
}

impl EnumState {
    /// Picks the tag out of header text such as ` class ESetting : int `.
    fn read_header(&mut self) {
        let header = std::mem::take(&mut self.header);
        let text = header.split(':').next().unwrap_or_default();
        self.tag = text
            .split_whitespace()
            .find(|word| !matches!(*word, "class" | "struct") && is_ident(word))
            .map(str::to_string);
    }

    /// Scans body text, emitting completed enumerators. Returns the byte
    /// offset just past the closing `}` if the body ends in `text`.
    fn scan_body(&mut self, text: &str, edits: &mut Vec<TreeEdit>) -> Option<usize> {
        let mut chars = text.char_indices().peekable();
        while let Some((i, c)) = chars.next() {
            let next = chars.peek().map(|&(_, n)| n);
            if self.in_comment {
                if c == '*' && next == Some('/') {
                    chars.next();
                    self.in_comment = false;
                }
                continue;
            }
            match c {
                '/' if next == Some('/') => break,
                '/' if next == Some('*') => {
                    chars.next();
                    self.in_comment = true;
                }
                '(' => {
                    self.paren_depth += 1;
                    self.entry.push(c);
                }
                ')' => {
                    self.paren_depth = self.paren_depth.saturating_sub(1);
                    self.entry.push(c);
                }
                ',' if self.paren_depth == 0 => self.finish_entry(edits),
                '}' if self.paren_depth == 0 => {
                    self.finish_entry(edits);
                    return Some(i + 1);
                }
                _ => self.entry.push(c),
            }
        }
        if !self.entry.trim().is_empty() {
            self.entry.push(' ');
        }
        None
    }

    fn finish_entry(&mut self, edits: &mut Vec<TreeEdit>) {
        let entry = std::mem::take(&mut self.entry);
        let entry = entry.trim();
        if entry.is_empty() {
            return;
        }
        let (name, explicit) = match entry.split_once('=') {
            Some((name, value)) => (name.trim(), Some(value.trim())),
            None => (entry, None),
        };
        if !is_ident(name) {
            log::trace!("skipping malformed enumerator `{entry}`");
            return;
        }

        let value = match explicit {
            Some(value) => value.to_string(),
            None => self
                .next_implicit
                .map(|v| v.to_string())
                .unwrap_or_default(),
        };
        let numeric = parse_literal(&value)
            .and_then(|v| v.as_i128())
            .or_else(|| self.known.get(value.as_str()).copied());
        if let Some(n) = numeric {
            self.known.insert(name.to_string(), n);
        }
        self.next_implicit = numeric.and_then(|n| n.checked_add(1));

        edits.push(TreeEdit::Append {
            name: name.to_string(),
            kind: NodeKind::EnumValue { value },
        });
    }

    /// Reads declarators after `}` until `;`. Text that cannot belong to the
    /// tail ends the construct without being consumed.
    fn finish_tail<'a>(
        &mut self,
        text: &'a str,
        edits: Vec<TreeEdit>,
        ctx: &mut ParseContext,
    ) -> Feed<'a> {
        let end = scan_code(text, &mut self.in_comment, &mut self.declarators, |c| {
            !(is_ident_char(c) || c.is_whitespace() || c == ',' || c == '*')
        });
        let Some(i) = end else {
            return Feed::pending(edits);
        };
        if self.typedef {
            let alias = self
                .declarators
                .split(|c: char| c == ',' || c == '*' || c.is_whitespace())
                .find(|word| is_ident(word));
            if let (Some(alias), Some(name)) = (alias, &self.node_name) {
                ctx.record_alias(alias, name);
            }
        }
        let remainder = &text[i..];
        Feed::done(edits, remainder.strip_prefix(';').unwrap_or(remainder))
    }
}

/// Copies the code in `text` to `out`, dropping comments, until a character
/// accepted by `is_stop` shows up outside a comment. Returns its byte offset.
/// `in_comment` carries an open block comment from one line to the next.
fn scan_code(
    text: &str,
    in_comment: &mut bool,
    out: &mut String,
    is_stop: impl Fn(char) -> bool,
) -> Option<usize> {
    let mut chars = text.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        let next = chars.peek().map(|&(_, n)| n);
        if *in_comment {
            if c == '*' && next == Some('/') {
                chars.next();
                *in_comment = false;
            }
            continue;
        }
        match c {
            '/' if next == Some('/') => break,
            '/' if next == Some('*') => {
                chars.next();
                *in_comment = true;
                out.push(' ');
            }
            c if is_stop(c) => return Some(i),
            c => out.push(c),
        }
    }
    out.push(' ');
    None
}
