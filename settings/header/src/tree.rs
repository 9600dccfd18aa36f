// Licensed under the Apache-2.0 license

//! Node hierarchy built from a header.
//!
//! ```text
//! Tree
//! └── arena: Vec<Node>          # index 0 is the root
//!     ├── Plain                 # the root, or a caller-built container
//!     ├── Define    (value)     # #define NAME VALUE
//!     ├── Enum                  # enum NAME { ... }
//!     │   └── EnumValue (value) # NAME = VALUE
//! ```
//!
//! Nodes are appended and never removed, so indices stay valid for the
//! lifetime of the tree. Parents own the ordered list of their children;
//! children only remember their parent's index.

use crate::error::TreeError;

/// Index into the node arena.
pub type NodeIdx = usize;

/// What a node represents, along with the raw value text when it carries one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Plain,
    Define { value: String },
    Enum,
    EnumValue { value: String },
}

impl NodeKind {
    pub fn label(&self) -> &'static str {
        match self {
            NodeKind::Plain => "node",
            NodeKind::Define { .. } => "define",
            NodeKind::Enum => "enum",
            NodeKind::EnumValue { .. } => "enumerator",
        }
    }
}

#[derive(Clone, Debug)]
pub struct Node {
    name: Option<String>,
    parent: Option<NodeIdx>,
    children: Vec<NodeIdx>,
    kind: NodeKind,
}

impl Node {
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn parent(&self) -> Option<NodeIdx> {
        self.parent
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Raw value text of a define or enumerator.
    pub fn raw_value(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Define { value } | NodeKind::EnumValue { value } => Some(value),
            NodeKind::Plain | NodeKind::Enum => None,
        }
    }

    pub fn is_define(&self) -> bool {
        matches!(self.kind, NodeKind::Define { .. })
    }

    pub fn is_enum(&self) -> bool {
        matches!(self.kind, NodeKind::Enum)
    }

    pub fn has_name(&self, name: &str, ignore_case: bool) -> bool {
        match &self.name {
            Some(own) if ignore_case => own.eq_ignore_ascii_case(name),
            Some(own) => own == name,
            None => false,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Tree {
    arena: Vec<Node>,
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

impl Tree {
    pub fn new() -> Self {
        Self {
            arena: vec![Node {
                name: None,
                parent: None,
                children: Vec::new(),
                kind: NodeKind::Plain,
            }],
        }
    }

    pub fn root(&self) -> NodeIdx {
        0
    }

    pub fn get(&self, idx: NodeIdx) -> Option<&Node> {
        self.arena.get(idx)
    }

    /// Appends a named node as the last child of `parent`.
    pub fn append(
        &mut self,
        parent: NodeIdx,
        name: impl Into<String>,
        kind: NodeKind,
    ) -> Result<NodeIdx, TreeError> {
        let name = name.into();
        let parent_node = self
            .arena
            .get(parent)
            .ok_or(TreeError::UnknownNode(parent))?;
        if parent_node.is_enum() && !matches!(kind, NodeKind::EnumValue { .. }) {
            return Err(TreeError::NotAnEnumValue {
                kind: kind.label(),
                name,
                parent: parent_node.name.clone().unwrap_or_default(),
            });
        }

        let idx = self.arena.len();
        self.arena.push(Node {
            name: Some(name),
            parent: Some(parent),
            children: Vec::new(),
            kind,
        });
        self.arena[parent].children.push(idx);
        Ok(idx)
    }

    /// Children of `idx` in insertion order. Unknown indices have no children.
    pub fn children(&self, idx: NodeIdx) -> impl Iterator<Item = (NodeIdx, &Node)> + '_ {
        self.arena
            .get(idx)
            .map(|node| node.children.as_slice())
            .unwrap_or_default()
            .iter()
            .map(move |&child| (child, &self.arena[child]))
    }

    /// Nodes sharing `idx`'s parent, including `idx` itself.
    pub fn siblings(&self, idx: NodeIdx) -> impl Iterator<Item = (NodeIdx, &Node)> + '_ {
        let parent = self.arena.get(idx).and_then(|node| node.parent);
        parent
            .into_iter()
            .flat_map(move |parent| self.children(parent))
    }

    /// First child of `parent` named `name`.
    pub fn find_child(&self, parent: NodeIdx, name: &str, ignore_case: bool) -> Option<NodeIdx> {
        self.children(parent)
            .find(|(_, node)| node.has_name(name, ignore_case))
            .map(|(idx, _)| idx)
    }

    /// Root-level defines in document order.
    pub fn defines(&self) -> impl Iterator<Item = (NodeIdx, &Node)> + '_ {
        self.children(self.root()).filter(|(_, node)| node.is_define())
    }

    /// Root-level enumerations in document order.
    pub fn enums(&self) -> impl Iterator<Item = (NodeIdx, &Node)> + '_ {
        self.children(self.root()).filter(|(_, node)| node.is_enum())
    }
}
