// Licensed under the Apache-2.0 license

//! Identifier and literal helpers for emitted Rust code.

/// Converts a name to snake_case.
///
/// - Leading digits get underscore prefix
/// - Punctuation and whitespace become underscores
/// - CamelCase transitions get underscore separators
/// - Rust keywords get underscore suffix
///
/// # Examples
/// ```
/// use drs_settings_generator::util::snake_case;
/// assert_eq!(snake_case("KnownSettingId"), "known_setting_id");
/// assert_eq!(snake_case("nvapi.drs"), "nvapi_drs");
/// ```
pub fn snake_case(name: &str) -> String {
    let mut result = String::new();
    if let Some(c) = name.chars().next() {
        if c.is_ascii_digit() {
            result.push('_');
        }
    }
    let mut prev = None;
    for c in name.chars() {
        if c.is_ascii_whitespace() || c.is_ascii_punctuation() {
            if prev != Some('_') {
                result.push('_');
            }
            prev = Some('_');
            continue;
        }
        if let Some(prev) = prev {
            if (prev.is_ascii_lowercase() || prev.is_ascii_digit()) && c.is_ascii_uppercase() {
                result.push('_');
            }
        }
        prev = Some(c);
        result.push(c.to_ascii_lowercase());
    }
    tweak_keywords(result.trim_end_matches('_')).to_string()
}

/// Appends underscore suffix to Rust keywords to avoid conflicts.
pub(crate) fn tweak_keywords(s: &str) -> &str {
    match s {
        "as" => "as_",
        "break" => "break_",
        "const" => "const_",
        "continue" => "continue_",
        "crate" => "crate_",
        "else" => "else_",
        "enum" => "enum_",
        "extern" => "extern_",
        "false" => "false_",
        "fn" => "fn_",
        "for" => "for_",
        "if" => "if_",
        "impl" => "impl_",
        "in" => "in_",
        "let" => "let_",
        "loop" => "loop_",
        "match" => "match_",
        "mod" => "mod_",
        "move" => "move_",
        "mut" => "mut_",
        "pub" => "pub_",
        "ref" => "ref_",
        "return" => "return_",
        "self" => "self_",
        "Self" => "Self_",
        "static" => "static_",
        "struct" => "struct_",
        "super" => "super_",
        "trait" => "trait_",
        "true" => "true_",
        "type" => "type_",
        "unsafe" => "unsafe_",
        "use" => "use_",
        "where" => "where_",
        "while" => "while_",
        "async" => "async_",
        "await" => "await_",
        "dyn" => "dyn_",
        "abstract" => "abstract_",
        "become" => "become_",
        "box" => "box_",
        "do" => "do_",
        "final" => "final_",
        "macro" => "macro_",
        "override" => "override_",
        "priv" => "priv_",
        "try" => "try_",
        "typeof" => "typeof_",
        "unsized" => "unsized_",
        "virtual" => "virtual_",
        "yield" => "yield_",
        s => s,
    }
}

/// True if `s` can be used verbatim as a Rust identifier.
pub fn is_rust_ident(s: &str) -> bool {
    let mut chars = s.chars();
    let starts_ok = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    starts_ok && chars.all(|c| c.is_ascii_alphanumeric() || c == '_') && s != "_"
}

/// Makes a normalized name usable as a symbol: names that do not start with
/// a letter get a `_` prefix and keywords get a `_` suffix. Returns `None`
/// when the result is still not an identifier.
///
/// # Examples
/// ```
/// use drs_settings_generator::util::safe_ident;
/// assert_eq!(safe_ident("3DVision").as_deref(), Some("_3DVision"));
/// assert_eq!(safe_ident("Self").as_deref(), Some("Self_"));
/// assert_eq!(safe_ident(""), None);
/// ```
pub fn safe_ident(name: &str) -> Option<String> {
    let name = if name.starts_with(|c: char| c.is_ascii_alphabetic()) {
        name.to_string()
    } else {
        format!("_{name}")
    };
    let name = tweak_keywords(&name).to_string();
    is_rust_ident(&name).then_some(name)
}

/// Formats an integer as a hex constant with underscores for readability.
///
/// # Examples
/// ```
/// use drs_settings_generator::util::hex_const;
/// assert_eq!(hex_const(5), "0x5");
/// assert_eq!(hex_const(0x2089_bf6c), "0x2089_bf6c");
/// ```
pub fn hex_const(val: u32) -> String {
    let mut x = String::new();
    for (i, c) in format!("{val:x}").chars().rev().enumerate() {
        if i % 4 == 0 && i != 0 {
            x.push('_');
        }
        x.push(c);
    }
    "0x".to_string() + &x.chars().rev().collect::<String>()
}
