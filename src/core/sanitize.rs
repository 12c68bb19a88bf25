// src/core/sanitize.rs

/// Collapse runs of whitespace to a single space and trim.
pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// First `n` characters of `s`, for log lines.
pub fn preview(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((i, _)) => &s[..i],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_ws_collapses_runs() {
        assert_eq!(normalize_ws("  Doe,\n\t Jane   "), "Doe, Jane");
        assert_eq!(normalize_ws(""), "");
    }

    #[test]
    fn preview_is_char_safe() {
        assert_eq!(preview("Ängström", 3), "Äng");
        assert_eq!(preview("ab", 60), "ab");
    }
}
