// Licensed under the Apache-2.0 license

//! `#define NAME VALUE`, including `\` line continuations.
//!
//! Function-like macros are consumed but produce no node.

use super::{Feed, ParseContext, Recognizer, TreeEdit};
use crate::text::{open_block_comment, strip_comments, strip_keyword, take_ident};
use crate::tree::NodeKind;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DefineState {
    started: bool,
    name: Option<String>,
    value: String,
    skip: bool,
}

fn directive_body(fragment: &str) -> Option<&str> {
    let rest = fragment.strip_prefix('#')?.trim_start();
    strip_keyword(rest, "define")
}

impl Recognizer for DefineState {
    fn matches(fragment: &str) -> bool {
        directive_body(fragment).is_some()
    }

    fn feed<'a>(&mut self, fragment: &'a str, _ctx: &mut ParseContext) -> Feed<'a> {
        let text = if self.started {
            fragment
        } else {
            self.started = true;
            let body = directive_body(fragment).unwrap_or_default().trim_start();
            match take_ident(body) {
                Some((name, rest)) => {
                    self.name = Some(name.to_string());
                    self.skip = rest.starts_with('(');
                    rest
                }
                None => {
                    log::trace!("skipping malformed define `{fragment}`");
                    self.skip = true;
                    ""
                }
            }
        };

        // A block comment left open ends the define and goes back for
        // re-probing so the comment recognizer consumes its later lines.
        let (code, comment) = match open_block_comment(text) {
            Some(i) => text.split_at(i),
            None => (text, ""),
        };
        let code = strip_comments(code);
        let code = code.trim();
        if let (Some(head), "") = (code.strip_suffix('\\'), comment) {
            self.value.push_str(head.trim());
            self.value.push(' ');
            return Feed::pending(Vec::new());
        }
        self.value.push_str(code);

        let mut edits = Vec::new();
        match self.name.take() {
            Some(name) if !self.skip => edits.push(TreeEdit::Append {
                name,
                kind: NodeKind::Define {
                    value: self.value.trim().to_string(),
                },
            }),
            Some(name) => log::trace!("skipping function-like macro `{name}`"),
            None => {}
        }
        Feed::done(edits, comment)
    }
}
