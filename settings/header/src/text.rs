// Licensed under the Apache-2.0 license

//! Shared text helpers for the recognizers.

#[inline]
pub(crate) fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

#[inline]
pub(crate) fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// True if `s` is a C identifier.
pub(crate) fn is_ident(s: &str) -> bool {
    let mut chars = s.chars();
    chars.next().is_some_and(is_ident_start) && chars.all(is_ident_char)
}

/// Splits a leading identifier off `s`, returning it and the rest.
pub(crate) fn take_ident(s: &str) -> Option<(&str, &str)> {
    if !s.starts_with(is_ident_start) {
        return None;
    }
    let end = s.find(|c: char| !is_ident_char(c)).unwrap_or(s.len());
    Some(s.split_at(end))
}

/// If `s` starts with the keyword `word` as a whole token, returns the rest.
pub(crate) fn strip_keyword<'a>(s: &'a str, word: &str) -> Option<&'a str> {
    let rest = s.strip_prefix(word)?;
    if rest.starts_with(is_ident_char) {
        None
    } else {
        Some(rest)
    }
}

/// Removes `//` and `/* */` comments that sit outside string and character
/// literals. An unterminated block comment swallows the rest of the text.
pub(crate) fn strip_comments(s: &str) -> String {
    scan_comments(s).0
}

/// Byte offset of a `/*` that is still open at the end of `s`.
pub(crate) fn open_block_comment(s: &str) -> Option<usize> {
    scan_comments(s).1
}

fn scan_comments(s: &str) -> (String, Option<usize>) {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.char_indices().peekable();
    let mut quote: Option<char> = None;
    let mut escape = false;
    while let Some((i, c)) = chars.next() {
        if let Some(q) = quote {
            out.push(c);
            if escape {
                escape = false;
            } else if c == '\\' {
                escape = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }
        let next = chars.peek().map(|&(_, n)| n);
        match (c, next) {
            ('"' | '\'', _) => {
                quote = Some(c);
                out.push(c);
            }
            ('/', Some('/')) => break,
            ('/', Some('*')) => {
                chars.next();
                let mut prev = '\0';
                let mut closed = false;
                for (_, c) in chars.by_ref() {
                    if prev == '*' && c == '/' {
                        closed = true;
                        break;
                    }
                    prev = c;
                }
                if !closed {
                    return (out, Some(i));
                }
                out.push(' ');
            }
            _ => out.push(c),
        }
    }
    (out, None)
}
