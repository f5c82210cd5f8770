//! Line-level building blocks shared by the views.

pub mod header;
pub mod indicators;
pub mod progress_bar;

use unicode_width::UnicodeWidthStr;

/// Pad `text` with trailing spaces to `width` display columns.
///
/// Text that is already wider is returned unchanged with a single trailing
/// space so adjacent columns never touch.
pub fn pad_to_width(text: &str, width: usize) -> String {
    let current = text.width();
    if current >= width {
        return format!("{text} ");
    }
    format!("{text}{}", " ".repeat(width - current))
}

/// Cut `text` to at most `width` display columns, marking the cut with `…`.
pub fn truncate_to_width(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pad_to_width_ascii() {
        assert_eq!(pad_to_width("Loyer", 8), "Loyer   ");
        assert_eq!(pad_to_width("Alimentation", 5), "Alimentation ");
    }

    #[test]
    fn test_pad_to_width_counts_display_columns() {
        // The emoji occupies two columns.
        let padded = pad_to_width("💶 Income:", 14);
        assert_eq!(padded.width(), 14);
        let accented = pad_to_width("Épargne", 10);
        assert_eq!(accented.width(), 10);
    }

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("Loyer", 10), "Loyer");
        assert_eq!(truncate_to_width("Assurance habitation", 10), "Assurance…");
        assert_eq!(truncate_to_width("Assurance habitation", 10).width(), 10);
        assert_eq!(truncate_to_width("abc", 0), "");
    }
}
