use unicode_width::UnicodeWidthStr;

/// Wrap a label so no line exceeds `width` characters, joining the lines
/// with `separator`.
///
/// Lines only break at a space or hyphen: scanning backward from position
/// `width`, a hyphen stays at the end of the left line while a space is
/// dropped from both. Text with no break point in the window is returned
/// unmodified rather than split mid-word. A `width` of 0 behaves the same
/// way (no valid break point), so the function never loops or panics.
pub fn wrap(text: &str, width: usize, separator: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    if width == 0 || chars.len() <= width {
        return text.to_string();
    }

    let mut segments: Vec<String> = Vec::new();
    let mut rest: &[char] = &chars;

    while rest.len() > width {
        // Position 0 never counts as a break point.
        let mut p = width;
        while p > 0 && rest[p] != ' ' && rest[p] != '-' {
            p -= 1;
        }
        if p == 0 {
            break;
        }

        if rest[p] == '-' {
            segments.push(rest[..=p].iter().collect());
        } else {
            segments.push(rest[..p].iter().collect());
        }
        rest = &rest[p + 1..];
    }

    segments.push(rest.iter().collect());
    segments.join(separator)
}

/// Truncate a label to at most `max_chars` characters, replacing the cut
/// tail with `ellipsis`.
///
/// Text that already fits is returned unchanged; otherwise the first
/// `max_chars - 1` characters are kept and the ellipsis appended. A
/// `max_chars` of 0 is clamped to 1, which yields just the ellipsis.
pub fn truncate(text: &str, max_chars: usize, ellipsis: &str) -> String {
    let max_chars = max_chars.max(1);
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let mut kept: String = text.chars().take(max_chars - 1).collect();
    kept.push_str(ellipsis);
    kept
}

/// Width in terminal cells of the widest newline-separated line.
pub fn display_width(text: &str) -> usize {
    text.lines().map(UnicodeWidthStr::width).max().unwrap_or(0)
}
