use unicode_width::UnicodeWidthStr;

/// Truncate to a display width, appending "…" if anything was cut.
pub fn truncate(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut out = String::new();
    let limit = max_width.saturating_sub(1);
    for c in s.chars() {
        let candidate = format!("{}{}", out, c);
        if candidate.width() > limit {
            break;
        }
        out = candidate;
    }
    out + "…"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_passthrough() {
        assert_eq!(truncate("abc", 10), "abc");
    }

    #[test]
    fn test_truncate_cuts_with_ellipsis() {
        assert_eq!(truncate("abcdefgh", 5), "abcd…");
    }

    #[test]
    fn test_truncate_counts_wide_glyphs() {
        // CJK glyphs are two columns wide
        let cut = truncate("音楽音楽", 5);
        assert!(cut.ends_with('…'));
        assert!(cut.width() <= 5);
    }
}
