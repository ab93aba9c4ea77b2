use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Calculate display width of a label (CJK characters count as 2)
pub fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

/// Truncate a label to fit `max_width` columns, preserving grapheme
/// boundaries and ending with `…` when anything was cut.
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if display_width(text) <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    // Reserve one column for the ellipsis
    let budget = max_width - 1;
    let mut result = String::new();
    let mut current_width = 0;

    for grapheme in text.graphemes(true) {
        let grapheme_width = UnicodeWidthStr::width(grapheme);
        if current_width + grapheme_width > budget {
            break;
        }
        result.push_str(grapheme);
        current_width += grapheme_width;
    }

    result.push('…');
    result
}

/// Escape a commit subject for use inside a Mermaid `["..."]` label.
///
/// Mermaid entity codes are used for characters that would end the label
/// or open a new shape. Control whitespace collapses to a single space.
pub fn escape_label(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '"' => escaped.push_str("#quot;"),
            '#' => escaped.push_str("#35;"),
            '[' => escaped.push_str("#91;"),
            ']' => escaped.push_str("#93;"),
            '<' => escaped.push_str("#lt;"),
            '>' => escaped.push_str("#gt;"),
            '\n' | '\r' | '\t' => {
                if !escaped.ends_with(' ') {
                    escaped.push(' ');
                }
            }
            _ => escaped.push(ch),
        }
    }
    escaped
}
