use std::borrow::Cow;

/// Quote an argument value for RouterOS script syntax when needed.
///
/// Plain tokens (letters, digits and `._-:/,!@+*`) are returned as-is. Anything
/// else is wrapped in double quotes with `\`, `"`, `$` and `?` escaped, and
/// newlines/tabs written as `\n`/`\t`. The empty string becomes `""`.
pub fn quote_value(value: &str) -> Cow<'_, str> {
    if !value.is_empty() && value.chars().all(is_bare_char) {
        return Cow::Borrowed(value);
    }

    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '$' => out.push_str("\\$"),
            '?' => out.push_str("\\?"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            other => out.push(other),
        }
    }
    out.push('"');
    Cow::Owned(out)
}

fn is_bare_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, '.' | '_' | '-' | ':' | '/' | ',' | '!' | '@' | '+' | '*')
}
