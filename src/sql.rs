//! Text-level SQL building blocks shared by every translator.
//!
//! The output targets standard SQL; places where dialects disagree are
//! surfaced as line comments by the translators rather than resolved here.

/// Quotes an identifier: double-quote delimited, embedded `"` doubled.
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Quotes a string literal: single-quote delimited, embedded `'` doubled.
pub fn quote_str(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// Renders a single-line SQL comment.
pub fn comment(text: &str) -> String {
    format!("-- {}", text)
}

/// Result of translating a wildcard pattern into a `LIKE` pattern.
pub struct LikePattern {
    pub pattern: String,
    /// True only when pre-escaping actually changed a character, meaning the
    /// caller must append an `ESCAPE '\'` clause.
    pub escaped: bool,
}

/// Translates a wildcard pattern (`*` any-sequence, `?` any-single) into a
/// `LIKE` pattern, pre-escaping literal `%` and `_` occurring in the source.
pub fn wildcard_to_like(pattern: &str) -> LikePattern {
    let mut out = String::with_capacity(pattern.len());
    let mut escaped = false;
    for ch in pattern.chars() {
        match ch {
            '%' | '_' => {
                out.push('\\');
                out.push(ch);
                escaped = true;
            }
            '*' => out.push('%'),
            '?' => out.push('_'),
            other => out.push(other),
        }
    }
    LikePattern {
        pattern: out,
        escaped,
    }
}

/// Replaces characters that are unsafe in a generated column alias with `_`.
pub fn sanitize_alias(alias: &str) -> String {
    alias
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

/// True when the literal may be emitted unquoted: its declared cell class is
/// non-string and the value parses as a number.
pub fn is_numeric_literal(cell_class: Option<&str>, value: &str) -> bool {
    match cell_class {
        Some(class) if !class.contains("StringCell") => value.parse::<f64>().is_ok(),
        _ => false,
    }
}
