// Licensed under the Apache-2.0 license

//! Per-construct recognizers and the parser's transition function.
//!
//! The parser is a two-state machine:
//!
//! ```text
//!            probe matches                feed: not done
//!   Idle ──────────────────────▶ Active ◀──────────────┐
//!    ▲                           (kind, construct)  ───┘
//!    └──────────────────────────────┘
//!               feed: done
//! ```
//!
//! [`Recognizers::step`] is a pure function of the current state, the text
//! fragment and the [`ParseContext`]; it returns the next state, the tree
//! edits to apply and whatever part of the fragment it did not consume.
//! Applying the edits is left to [`crate::parser`].

pub mod comment;
pub mod define;
pub mod enumeration;

use std::collections::HashMap;

use crate::tree::NodeKind;

pub use comment::CommentState;
pub use define::DefineState;
pub use enumeration::EnumState;

const ANONYMOUS_ENUM_COUNT: &str = "anonymous_enum_count";
const ALIAS_PREFIX: &str = "typedef:";

/// Values shared by every activation during one parse of one document.
#[derive(Clone, Debug, Default)]
pub struct ParseContext {
    globals: HashMap<String, String>,
}

impl ParseContext {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.globals.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.globals.insert(key.into(), value.into());
    }

    /// Name for the next enumeration declared without a tag.
    pub(crate) fn next_anonymous_enum(&mut self) -> String {
        let n: usize = self
            .get(ANONYMOUS_ENUM_COUNT)
            .and_then(|v| v.parse().ok())
            .unwrap_or(0);
        self.set(ANONYMOUS_ENUM_COUNT, (n + 1).to_string());
        format!("__anonymous_enum_{n}")
    }

    pub(crate) fn record_alias(&mut self, alias: &str, target: &str) {
        self.set(format!("{ALIAS_PREFIX}{alias}"), target);
    }

    /// Name of the enumeration a typedef alias refers to.
    pub fn alias_target(&self, alias: &str, ignore_case: bool) -> Option<&str> {
        if !ignore_case {
            return self.get(&format!("{ALIAS_PREFIX}{alias}"));
        }
        self.globals.iter().find_map(|(key, target)| {
            key.strip_prefix(ALIAS_PREFIX)
                .filter(|name| name.eq_ignore_ascii_case(alias))
                .map(|_| target.as_str())
        })
    }
}

/// A change to apply to the tree at the parser's cursor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TreeEdit {
    /// Append a child to the cursor; the cursor stays put.
    Append { name: String, kind: NodeKind },
    /// Append a child to the cursor and move the cursor onto it.
    Enter { name: String, kind: NodeKind },
    /// Move the cursor to its parent.
    Leave,
}

/// The output of feeding one fragment to an active recognizer.
#[derive(Debug, PartialEq, Eq)]
pub struct Feed<'a> {
    pub edits: Vec<TreeEdit>,
    /// The construct is complete and the recognizer should be released.
    pub done: bool,
    pub remainder: &'a str,
}

impl<'a> Feed<'a> {
    fn pending(edits: Vec<TreeEdit>) -> Self {
        Self {
            edits,
            done: false,
            remainder: "",
        }
    }

    fn done(edits: Vec<TreeEdit>, remainder: &'a str) -> Self {
        Self {
            edits,
            done: true,
            remainder,
        }
    }
}

/// A recognizer for a single construct shape. The implementing type holds
/// the per-activation scratch state and starts from its `Default`.
pub(crate) trait Recognizer: Default {
    fn matches(fragment: &str) -> bool;
    fn feed<'a>(&mut self, fragment: &'a str, ctx: &mut ParseContext) -> Feed<'a>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecognizerKind {
    Comment,
    Define,
    Enum,
}

impl RecognizerKind {
    pub fn matches(self, fragment: &str) -> bool {
        match self {
            RecognizerKind::Comment => CommentState::matches(fragment),
            RecognizerKind::Define => DefineState::matches(fragment),
            RecognizerKind::Enum => EnumState::matches(fragment),
        }
    }

    fn activate(self) -> Construct {
        match self {
            RecognizerKind::Comment => Construct::Comment(CommentState::default()),
            RecognizerKind::Define => Construct::Define(DefineState::default()),
            RecognizerKind::Enum => Construct::Enum(EnumState::default()),
        }
    }
}

/// An active recognizer together with its scratch state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Construct {
    Comment(CommentState),
    Define(DefineState),
    Enum(EnumState),
}

impl Construct {
    pub fn kind(&self) -> RecognizerKind {
        match self {
            Construct::Comment(_) => RecognizerKind::Comment,
            Construct::Define(_) => RecognizerKind::Define,
            Construct::Enum(_) => RecognizerKind::Enum,
        }
    }

    fn feed<'a>(&mut self, fragment: &'a str, ctx: &mut ParseContext) -> Feed<'a> {
        match self {
            Construct::Comment(state) => state.feed(fragment, ctx),
            Construct::Define(state) => state.feed(fragment, ctx),
            Construct::Enum(state) => state.feed(fragment, ctx),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum State {
    #[default]
    Idle,
    Active(Construct),
}

#[derive(Debug, PartialEq, Eq)]
pub struct Transition<'a> {
    pub state: State,
    pub edits: Vec<TreeEdit>,
    pub remainder: &'a str,
}

/// The ordered set of recognizers probed for each new construct.
///
/// The first recognizer whose probe matches wins, so more specific shapes
/// must be registered before more general ones.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Recognizers {
    order: Vec<RecognizerKind>,
}

impl Default for Recognizers {
    fn default() -> Self {
        Self::new(vec![
            RecognizerKind::Comment,
            RecognizerKind::Define,
            RecognizerKind::Enum,
        ])
    }
}

impl Recognizers {
    pub fn new(order: Vec<RecognizerKind>) -> Self {
        Self { order }
    }

    pub fn probe(&self, fragment: &str) -> Option<RecognizerKind> {
        self.order.iter().copied().find(|kind| kind.matches(fragment))
    }

    /// Advances the state machine over one fragment.
    ///
    /// An idle machine whose recognizers all reject the fragment discards it
    /// entirely.
    pub fn step<'a>(&self, state: State, fragment: &'a str, ctx: &mut ParseContext) -> Transition<'a> {
        let fragment = fragment.trim_start();
        let mut construct = match state {
            State::Active(construct) => construct,
            State::Idle => match self.probe(fragment) {
                Some(kind) => kind.activate(),
                None => {
                    log::trace!("skipping `{fragment}`");
                    return Transition {
                        state: State::Idle,
                        edits: Vec::new(),
                        remainder: "",
                    };
                }
            },
        };

        let feed = construct.feed(fragment, ctx);
        Transition {
            state: if feed.done {
                State::Idle
            } else {
                State::Active(construct)
            },
            edits: feed.edits,
            remainder: feed.remainder,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_order() {
        let recognizers = Recognizers::default();
        assert_eq!(recognizers.probe("// x"), Some(RecognizerKind::Comment));
        assert_eq!(recognizers.probe("#define X 1"), Some(RecognizerKind::Define));
        assert_eq!(recognizers.probe("enum E {"), Some(RecognizerKind::Enum));
        assert_eq!(recognizers.probe("typedef enum {"), Some(RecognizerKind::Enum));
        assert_eq!(recognizers.probe("typedef struct {"), None);
        assert_eq!(recognizers.probe("#include <x.h>"), None);

        let defines_only = Recognizers::new(vec![RecognizerKind::Define]);
        assert_eq!(defines_only.probe("enum E {"), None);
    }

    #[test]
    fn test_unmatched_fragment_is_discarded() {
        let mut ctx = ParseContext::default();
        let t = Recognizers::default().step(State::Idle, "int x = 5;", &mut ctx);
        assert_eq!(
            t,
            Transition {
                state: State::Idle,
                edits: vec![],
                remainder: "",
            }
        );
    }

    #[test]
    fn test_define_completes_in_one_step() {
        let mut ctx = ParseContext::default();
        let t = Recognizers::default().step(State::Idle, "  #define FOO 0x1", &mut ctx);
        assert_eq!(t.state, State::Idle);
        assert_eq!(
            t.edits,
            vec![TreeEdit::Append {
                name: "FOO".into(),
                kind: NodeKind::Define {
                    value: "0x1".into()
                },
            }]
        );
        assert_eq!(t.remainder, "");
    }

    #[test]
    fn test_enum_stays_active_across_lines() {
        let recognizers = Recognizers::default();
        let mut ctx = ParseContext::default();

        let t = recognizers.step(State::Idle, "enum E {", &mut ctx);
        assert!(matches!(t.state, State::Active(Construct::Enum(_))));
        assert_eq!(
            t.edits,
            vec![TreeEdit::Enter {
                name: "E".into(),
                kind: NodeKind::Enum
            }]
        );

        let t = recognizers.step(t.state, "A = 1,", &mut ctx);
        assert!(matches!(t.state, State::Active(_)));
        assert_eq!(t.edits.len(), 1);

        let t = recognizers.step(t.state, "}; #define AFTER 2", &mut ctx);
        assert_eq!(t.state, State::Idle);
        assert_eq!(t.edits, vec![TreeEdit::Leave]);
        assert_eq!(t.remainder, " #define AFTER 2");
    }

    #[test]
    fn test_comment_remainder_is_returned() {
        let mut ctx = ParseContext::default();
        let t = Recognizers::default().step(State::Idle, "/* note */ #define X 1", &mut ctx);
        assert_eq!(t.state, State::Idle);
        assert!(t.edits.is_empty());
        assert_eq!(t.remainder, " #define X 1");
    }

    #[test]
    fn test_context_aliases_and_counter() {
        let mut ctx = ParseContext::default();
        assert_eq!(ctx.next_anonymous_enum(), "__anonymous_enum_0");
        assert_eq!(ctx.next_anonymous_enum(), "__anonymous_enum_1");

        ctx.record_alias("NVDRS_SETTING_TYPE", "_NVDRS_SETTING_TYPE");
        assert_eq!(
            ctx.alias_target("NVDRS_SETTING_TYPE", false),
            Some("_NVDRS_SETTING_TYPE")
        );
        assert_eq!(
            ctx.alias_target("nvdrs_setting_type", true),
            Some("_NVDRS_SETTING_TYPE")
        );
        assert_eq!(ctx.alias_target("nvdrs_setting_type", false), None);
    }
}
