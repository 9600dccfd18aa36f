// Licensed under the Apache-2.0 license

//! Line-oriented reader for the `#define` and `enum` constructs of a C header.
//!
//! The reader does not attempt to understand C. It recognizes a handful of
//! construct shapes and builds a small [`Tree`] out of them, skipping
//! everything else.
//!
//! ## Usage
//!
//! ```no_run
//! use std::path::Path;
//! use drs_settings_header::parse_file;
//!
//! let doc = parse_file(Path::new("NvApiDriverSettings.h")).unwrap();
//! let settings = doc.find_enum("ESetting", true).unwrap();
//! for (idx, node) in doc.tree.children(settings) {
//!     println!("{:?} = {:?}", node.name(), doc.tree.resolve(idx));
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`tree`]: Arena-backed node hierarchy ([`Tree`], [`Node`], [`NodeKind`])
//! - [`value`]: Literal and symbolic value resolution ([`Value`])
//! - [`recognizer`]: Per-construct recognizers and the transition function
//! - [`parser`]: Line driver applying transitions to a tree ([`Document`])

pub mod error;
pub mod parser;
pub mod recognizer;
pub mod tree;
pub mod value;

mod text;

pub use error::{ParseError, TreeError};
pub use parser::{parse, parse_file, parse_with, Document};
pub use recognizer::{ParseContext, RecognizerKind, Recognizers};
pub use tree::{Node, NodeIdx, NodeKind, Tree};
pub use value::Value;
