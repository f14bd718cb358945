/*!
 * Content cleanup: comment stripping and whitespace normalization
 *
 * This is a language-agnostic, best-effort pass, not a tokenizer for any
 * particular grammar. It distinguishes `//` and `/*...*/` comments from
 * string and character literals using a single left-to-right scan with
 * one character of lookahead, and it never fails: malformed input
 * degrades to whatever text was emitted before the scanner got stuck.
 */

/// Scanner mode at the current position. Exactly one is active; the next
/// mode depends only on the current character, one character of lookahead
/// and the current mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScannerState {
    Normal,
    InString,
    InChar,
    InLineComment,
    InBlockComment,
}

/// Remove `//` and `/*...*/` comments from arbitrary source text.
///
/// Comment markers inside string or character literals are preserved
/// verbatim. Backslash escapes are not interpreted, so an escaped quote
/// ends its literal early. An unterminated block comment or literal
/// consumes the rest of the input; block comments do not nest.
pub fn strip_comments(content: &str) -> String {
    let chars: Vec<char> = content.chars().collect();
    let mut out = String::with_capacity(content.len());
    let mut state = ScannerState::Normal;

    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        let next = chars.get(i + 1).copied();

        match state {
            ScannerState::Normal => {
                if c == '"' {
                    state = ScannerState::InString;
                } else if c == '\'' {
                    state = ScannerState::InChar;
                } else if c == '/' && next == Some('*') {
                    state = ScannerState::InBlockComment;
                    i += 2;
                    continue;
                } else if c == '/' && next == Some('/') {
                    state = ScannerState::InLineComment;
                    i += 2;
                    continue;
                }
                out.push(c);
            }
            ScannerState::InString => {
                if c == '"' {
                    state = ScannerState::Normal;
                }
                out.push(c);
            }
            ScannerState::InChar => {
                if c == '\'' {
                    state = ScannerState::Normal;
                }
                out.push(c);
            }
            ScannerState::InLineComment => {
                // The terminating newline itself is kept
                if c == '\n' || c == '\r' {
                    state = ScannerState::Normal;
                    out.push(c);
                }
            }
            ScannerState::InBlockComment => {
                if c == '*' && next == Some('/') {
                    state = ScannerState::Normal;
                    i += 2;
                    continue;
                }
            }
        }

        i += 1;
    }

    out
}

/// Collapse every run of whitespace (tabs, CR, LF included) into a single
/// space and trim both ends.
pub fn normalize_whitespace(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    let mut pending_space = false;

    for c in content.chars() {
        if c.is_whitespace() {
            pending_space = true;
        } else {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.push(c);
        }
    }

    out
}

/// The `--cleanup` pass: comments stripped first, then whitespace
/// collapsed over the stripped text.
pub fn cleanup_content(content: &str) -> String {
    normalize_whitespace(&strip_comments(content))
}
