// Licensed under the Apache-2.0 license

use std::fs;
use std::path::Path;

use crate::error::{ParseError, TreeError};
use crate::recognizer::{ParseContext, Recognizers, State, TreeEdit};
use crate::tree::{NodeIdx, Tree};

/// A parsed header: the node tree plus whatever the recognizers recorded in
/// the shared context (typedef aliases, anonymous enum count).
#[derive(Clone, Debug, Default)]
pub struct Document {
    pub tree: Tree,
    pub context: ParseContext,
}

impl Document {
    /// Finds a root-level enumeration by name or by typedef alias.
    pub fn find_enum(&self, name: &str, ignore_case: bool) -> Option<NodeIdx> {
        let root = self.tree.root();
        let by_name = self
            .tree
            .enums()
            .find(|(_, node)| node.has_name(name, ignore_case))
            .map(|(idx, _)| idx);
        by_name.or_else(|| {
            let target = self.context.alias_target(name, ignore_case)?;
            self.tree
                .find_child(root, target, false)
                .filter(|&idx| self.tree.get(idx).is_some_and(|node| node.is_enum()))
        })
    }
}

pub fn parse(text: &str) -> Result<Document, ParseError> {
    parse_with(&Recognizers::default(), text)
}

pub fn parse_file(path: &Path) -> Result<Document, ParseError> {
    let bytes = fs::read(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&String::from_utf8_lossy(&bytes))
}

/// Runs `recognizers` over every line of `text`.
pub fn parse_with(recognizers: &Recognizers, text: &str) -> Result<Document, ParseError> {
    let mut doc = Document::default();
    let mut cursor = doc.tree.root();
    let mut state = State::Idle;

    for (i, line) in text.lines().enumerate() {
        let mut fragment = line;
        loop {
            let trimmed = fragment.trim();
            if trimmed.is_empty() && state == State::Idle {
                break;
            }
            let was_idle = state == State::Idle;
            let transition = recognizers.step(state, trimmed, &mut doc.context);
            state = transition.state;
            for edit in transition.edits {
                cursor = apply(&mut doc.tree, cursor, edit)
                    .map_err(|source| ParseError::Tree { line: i + 1, source })?;
            }

            let remainder = transition.remainder.trim();
            let consumed = remainder.len() < trimmed.len();
            if remainder.is_empty() || (!consumed && (was_idle || state != State::Idle)) {
                break;
            }
            fragment = remainder;
        }
    }

    if let State::Active(construct) = &state {
        log::debug!("header ended inside an unterminated {:?}", construct.kind());
    }
    Ok(doc)
}

fn apply(tree: &mut Tree, cursor: NodeIdx, edit: TreeEdit) -> Result<NodeIdx, TreeError> {
    match edit {
        TreeEdit::Append { name, kind } => {
            tree.append(cursor, name, kind)?;
            Ok(cursor)
        }
        TreeEdit::Enter { name, kind } => tree.append(cursor, name, kind),
        TreeEdit::Leave => Ok(tree
            .get(cursor)
            .and_then(|node| node.parent())
            .unwrap_or(tree.root())),
    }
}
