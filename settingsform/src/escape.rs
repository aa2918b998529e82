//! Escaping for the two markup contexts fields write into.

use std::borrow::Cow;

/// Escape a value placed inside a quoted attribute (`value`, `placeholder`, `class`, ids).
pub fn esc_attr(value: &str) -> Cow<'_, str> {
    html_escape::encode_quoted_attribute(value)
}

/// Escape text placed between tags (labels, descriptions, textarea bodies).
pub fn esc_html(value: &str) -> Cow<'_, str> {
    html_escape::encode_safe(value)
}

/// Undo backslash-escaping applied by the storage layer.
///
/// `\x` becomes `x`, `\\` becomes `\`, `\0` becomes NUL, a trailing lone
/// backslash is dropped. Apply exactly once, before escaping for output.
pub fn stripslashes(value: &str) -> Cow<'_, str> {
    if !value.contains('\\') {
        return Cow::Borrowed(value);
    }
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('0') => out.push('\0'),
            Some(next) => out.push(next),
            None => {}
        }
    }
    Cow::Owned(out)
}
