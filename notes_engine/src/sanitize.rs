//! Turns free text (a page title, the first line of a note) into something
//! that is safe to use as a file or folder name.

/// Sanitize `text` into a name of at most `max_length` chars.
///
/// Leading markdown heading markers are dropped, anything other than
/// alphanumerics, underscores, whitespace and hyphens is removed, and runs of
/// whitespace or underscores become a single space. Returns `fallback` when
/// nothing is left.
pub fn sanitize_name(text: &str, max_length: usize, fallback: &str) -> String {
    let text = strip_heading_marker(text);

    let mut collapsed = String::with_capacity(text.len());
    let mut in_gap = false;
    for c in text.chars().filter(|c| is_allowed(*c)) {
        if is_space(c) || c == '_' {
            if !in_gap {
                collapsed.push(' ');
                in_gap = true;
            }
        } else {
            collapsed.push(c);
            in_gap = false;
        }
    }

    let truncated: String = collapsed.trim().chars().take(max_length).collect();
    let sanitized = truncated.trim();

    if sanitized.is_empty() {
        fallback.to_string()
    } else {
        sanitized.to_string()
    }
}

fn strip_heading_marker(text: &str) -> &str {
    match text.strip_prefix('#') {
        Some(rest) => rest.trim_start_matches('#').trim_start(),
        None => text,
    }
}

fn is_allowed(c: char) -> bool {
    c.is_alphanumeric() || is_space(c) || c == '_' || c == '-'
}

/// Unicode whitespace plus the ASCII information separators U+001C..=U+001F.
fn is_space(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}
