// Licensed under the Apache-2.0 license

//! Line (`//`) and block (`/* */`) comments outside other constructs.

use super::{Feed, ParseContext, Recognizer};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommentState {
    in_block: bool,
}

impl Recognizer for CommentState {
    fn matches(fragment: &str) -> bool {
        fragment.starts_with("//") || fragment.starts_with("/*")
    }

    fn feed<'a>(&mut self, fragment: &'a str, _ctx: &mut ParseContext) -> Feed<'a> {
        let mut body = fragment;
        if !self.in_block {
            if fragment.starts_with("//") {
                return Feed::done(Vec::new(), "");
            }
            body = fragment.strip_prefix("/*").unwrap_or(fragment);
            self.in_block = true;
        }
        match body.find("*/") {
            Some(end) => Feed::done(Vec::new(), &body[end + 2..]),
            None => Feed::pending(Vec::new()),
        }
    }
}
