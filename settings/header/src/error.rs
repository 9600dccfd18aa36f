// Licensed under the Apache-2.0 license

use std::path::PathBuf;
use thiserror::Error;

use crate::tree::NodeIdx;

/// Errors raised when a tree edit breaks the node hierarchy contract.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// Enumerations only hold enumerators.
    #[error("cannot insert {kind} `{name}` into enumeration `{parent}`")]
    NotAnEnumValue {
        kind: &'static str,
        name: String,
        parent: String,
    },
    #[error("node {0} does not exist")]
    UnknownNode(NodeIdx),
}

/// Errors raised while reading a header into a [`crate::Document`].
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("failed to read header {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("line {line}: {source}")]
    Tree {
        line: usize,
        #[source]
        source: TreeError,
    },
}
