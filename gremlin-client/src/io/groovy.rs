//! Gremlin-Groovy string-literal escaping.
//!
//! A single quote inside a string argument must be escaped to `\'` unless
//! it is already escaped by an odd number of preceding backslashes.

/// Escapes every unescaped `'` in `s`, producing the body of a Groovy
/// single-quoted string literal (callers wrap the result in `'...'`).
pub fn escape_single_quotes(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(s.len());
    let mut preceding_backslashes = 0usize;

    for &c in &chars {
        if c == '\'' {
            if preceding_backslashes % 2 == 0 {
                out.push('\\');
            }
            out.push('\'');
            preceding_backslashes = 0;
        } else {
            if c == '\\' {
                preceding_backslashes += 1;
            } else {
                preceding_backslashes = 0;
            }
            out.push(c);
        }
    }
    out
}

/// Renders `s` as a full Groovy single-quoted string literal.
pub fn quote(s: &str) -> String {
    format!("'{}'", escape_single_quotes(s))
}
