// Licensed under the Apache-2.0 license

//! Resolution of raw value text into typed values.
//!
//! Literals are recognized in a fixed order (wide string, hex, decimal,
//! boolean). Anything else is looked up as the name of a sibling node and
//! resolved through it; text that names nothing is kept as an opaque symbol.

use std::fmt;

use crate::tree::{NodeIdx, Tree};

/// Maximum number of symbolic hops followed before giving up.
pub const MAX_SYMBOL_DEPTH: usize = 16;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
    SignedInt(i64),
    UnsignedInt(u64),
    Text(String),
    Boolean(bool),
    /// A reference chain that could not be resolved, e.g. a cycle.
    Unrepresentable,
}

impl Value {
    /// Interprets the value as a 32-bit unsigned discriminant.
    ///
    /// Negative values that fit in an `i32` wrap the way a C enumerator
    /// stored in an unsigned 32-bit field would.
    pub fn as_u32(&self) -> Option<u32> {
        match self {
            Value::UnsignedInt(v) => u32::try_from(*v).ok(),
            Value::SignedInt(v) if *v >= 0 => u32::try_from(*v).ok(),
            Value::SignedInt(v) => i32::try_from(*v).ok().map(|v| v as u32),
            Value::Boolean(v) => Some(u32::from(*v)),
            Value::Text(_) | Value::Unrepresentable => None,
        }
    }

    pub fn as_i128(&self) -> Option<i128> {
        match self {
            Value::UnsignedInt(v) => Some(i128::from(*v)),
            Value::SignedInt(v) => Some(i128::from(*v)),
            _ => None,
        }
    }

    pub fn is_integral(&self) -> bool {
        matches!(self, Value::SignedInt(_) | Value::UnsignedInt(_))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::SignedInt(v) => write!(f, "{v}"),
            Value::UnsignedInt(v) => write!(f, "{v}"),
            Value::Text(s) => f.write_str(s),
            Value::Boolean(v) => write!(f, "{v}"),
            Value::Unrepresentable => f.write_str("<unrepresentable>"),
        }
    }
}

/// Parses the literal forms of raw value text. Returns `None` for text that
/// is not a literal (including empty text).
pub fn parse_literal(text: &str) -> Option<Value> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    if let Some(payload) = wide_string_payload(text) {
        return Some(Value::Text(payload.to_string()));
    }
    let digits = strip_integer_suffix(text);
    if let Some(hex) = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        if let Ok(v) = u64::from_str_radix(hex, 16) {
            return Some(Value::UnsignedInt(v));
        }
    }
    if let Ok(v) = digits.parse::<i64>() {
        return Some(Value::SignedInt(v));
    }
    if let Ok(v) = digits.parse::<u64>() {
        return Some(Value::UnsignedInt(v));
    }
    if text.eq_ignore_ascii_case("true") {
        return Some(Value::Boolean(true));
    }
    if text.eq_ignore_ascii_case("false") {
        return Some(Value::Boolean(false));
    }
    None
}

/// Payload of an `L"..."` literal.
fn wide_string_payload(text: &str) -> Option<&str> {
    let inner = text.strip_prefix("L\"")?.strip_suffix('"')?;
    Some(inner)
}

/// Drops a trailing C integer suffix (`u`, `l`, `ul`, `ull`, ...).
fn strip_integer_suffix(text: &str) -> &str {
    let trimmed = text.trim_end_matches(['u', 'U', 'l', 'L']);
    if trimmed.len() != text.len() && trimmed.ends_with(|c: char| c.is_ascii_hexdigit()) {
        trimmed
    } else {
        text
    }
}

impl Tree {
    /// Resolves the raw value of a define or enumerator.
    ///
    /// Returns `None` when the node carries no value or its value text is
    /// empty.
    pub fn resolve(&self, idx: NodeIdx) -> Option<Value> {
        self.resolve_with_depth(idx, 0)
    }

    fn resolve_with_depth(&self, idx: NodeIdx, depth: usize) -> Option<Value> {
        let text = self.get(idx)?.raw_value()?.trim();
        if text.is_empty() {
            return None;
        }
        if let Some(value) = parse_literal(text) {
            return Some(value);
        }

        let sibling = self
            .siblings(idx)
            .find(|(_, node)| node.has_name(text, false) && node.raw_value().is_some())
            .map(|(idx, _)| idx);
        match sibling {
            Some(_) if depth >= MAX_SYMBOL_DEPTH => {
                log::debug!("giving up on `{text}` after {depth} symbolic hops");
                Some(Value::Unrepresentable)
            }
            Some(idx) => self.resolve_with_depth(idx, depth + 1),
            None => Some(Value::Text(text.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::NodeKind;

    fn define(tree: &mut Tree, name: &str, value: &str) -> NodeIdx {
        tree.append(
            tree.root(),
            name,
            NodeKind::Define {
                value: value.to_string(),
            },
        )
        .unwrap()
    }

    #[test]
    fn test_literals() {
        assert_eq!(parse_literal("0x10"), Some(Value::UnsignedInt(16)));
        assert_eq!(parse_literal("0XFFFFFFFF"), Some(Value::UnsignedInt(0xFFFF_FFFF)));
        assert_eq!(parse_literal("42"), Some(Value::SignedInt(42)));
        assert_eq!(parse_literal("-1"), Some(Value::SignedInt(-1)));
        assert_eq!(
            parse_literal("18446744073709551615"),
            Some(Value::UnsignedInt(u64::MAX))
        );
        assert_eq!(parse_literal("TRUE"), Some(Value::Boolean(true)));
        assert_eq!(parse_literal("false"), Some(Value::Boolean(false)));
        assert_eq!(
            parse_literal("L\"Vertical Sync\""),
            Some(Value::Text("Vertical Sync".into()))
        );
        assert_eq!(parse_literal(""), None);
        assert_eq!(parse_literal("   "), None);
        assert_eq!(parse_literal("SOME_SYMBOL"), None);
    }

    #[test]
    fn test_integer_suffixes() {
        assert_eq!(parse_literal("0x10u"), Some(Value::UnsignedInt(16)));
        assert_eq!(parse_literal("0xFFFFFFFFUL"), Some(Value::UnsignedInt(0xFFFF_FFFF)));
        assert_eq!(parse_literal("7LL"), Some(Value::SignedInt(7)));
        // Symbols made of suffix letters stay symbols.
        assert_eq!(parse_literal("ALL"), None);
        assert_eq!(parse_literal("0x"), None);
    }

    #[test]
    fn test_hex_overflow_is_not_a_number() {
        assert_eq!(parse_literal("0x1_0000_0000_0000_0000"), None);
        assert_eq!(parse_literal("0x10000000000000000"), None);
    }

    #[test]
    fn test_symbolic_sibling() {
        let mut tree = Tree::new();
        define(&mut tree, "BASE", "0x20");
        let alias = define(&mut tree, "ALIAS", "BASE");
        let chained = define(&mut tree, "CHAINED", "ALIAS");
        let opaque = define(&mut tree, "OPAQUE", "NOT_DEFINED");
        let empty = define(&mut tree, "EMPTY", "");

        assert_eq!(tree.resolve(alias), Some(Value::UnsignedInt(0x20)));
        assert_eq!(tree.resolve(chained), Some(Value::UnsignedInt(0x20)));
        assert_eq!(tree.resolve(opaque), Some(Value::Text("NOT_DEFINED".into())));
        assert_eq!(tree.resolve(empty), None);
        assert_eq!(tree.resolve(tree.root()), None);
    }

    #[test]
    fn test_symbol_in_other_scope_is_opaque() {
        let mut tree = Tree::new();
        define(&mut tree, "OUTER", "5");
        let e = tree.append(tree.root(), "E", NodeKind::Enum).unwrap();
        let inner = tree
            .append(
                e,
                "INNER",
                NodeKind::EnumValue {
                    value: "OUTER".into(),
                },
            )
            .unwrap();
        let outer = define(&mut tree, "REF", "OUTER");
        assert_eq!(tree.resolve(inner), Some(Value::Text("OUTER".into())));
        assert_eq!(tree.resolve(outer), Some(Value::SignedInt(5)));
    }

    #[test]
    fn test_cycles_are_unrepresentable() {
        let mut tree = Tree::new();
        let a = define(&mut tree, "A", "B");
        define(&mut tree, "B", "A");
        let selfish = define(&mut tree, "SELF", "SELF");

        assert_eq!(tree.resolve(a), Some(Value::Unrepresentable));
        assert_eq!(tree.resolve(selfish), Some(Value::Unrepresentable));
    }

    #[test]
    fn test_as_u32() {
        assert_eq!(Value::UnsignedInt(0x2089_BF6C).as_u32(), Some(0x2089_BF6C));
        assert_eq!(Value::UnsignedInt(1 << 40).as_u32(), None);
        assert_eq!(Value::SignedInt(-1).as_u32(), Some(0xFFFF_FFFF));
        assert_eq!(Value::SignedInt(i64::MIN).as_u32(), None);
        assert_eq!(Value::Boolean(true).as_u32(), Some(1));
        assert_eq!(Value::Text("x".into()).as_u32(), None);
        assert_eq!(Value::Unrepresentable.as_u32(), None);
    }
}
