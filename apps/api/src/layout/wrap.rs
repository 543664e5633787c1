//! Greedy word wrapping against shaped widths of the bundled faces.

use crate::layout::font_metrics::{FontFamily, FontWeight};

/// Breaks `text` into lines no wider than `max_width_px`.
///
/// Explicit newlines always break. A single word wider than the line is split
/// at character boundaries so nothing overflows the column. Blank input yields
/// no lines.
pub fn wrap_text(
    text: &str,
    family: FontFamily,
    weight: FontWeight,
    size_px: f32,
    max_width_px: f32,
) -> Vec<String> {
    let space_w = family.measure_px(" ", size_px, weight);
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut current = String::new();
        let mut current_width = 0.0_f32;

        for word in paragraph.split_whitespace() {
            let word_w = family.measure_px(word, size_px, weight);

            if word_w > max_width_px {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                let mut pieces = split_long_word(word, family, weight, size_px, max_width_px);
                let last = pieces.pop().unwrap_or_default();
                lines.extend(pieces);
                current_width = family.measure_px(&last, size_px, weight);
                current = last;
                continue;
            }

            if current.is_empty() {
                current.push_str(word);
                current_width = word_w;
            } else if current_width + space_w + word_w > max_width_px {
                lines.push(std::mem::replace(&mut current, word.to_string()));
                current_width = word_w;
            } else {
                current.push(' ');
                current.push_str(word);
                current_width += space_w + word_w;
            }
        }

        if !current.is_empty() {
            lines.push(current);
        }
    }
    lines
}

fn split_long_word(
    word: &str,
    family: FontFamily,
    weight: FontWeight,
    size_px: f32,
    max_width_px: f32,
) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut piece = String::new();
    for c in word.chars() {
        let mut candidate = piece.clone();
        candidate.push(c);
        if !piece.is_empty() && family.measure_px(&candidate, size_px, weight) > max_width_px {
            pieces.push(std::mem::take(&mut piece));
            piece.push(c);
        } else {
            piece = candidate;
        }
    }
    if !piece.is_empty() {
        pieces.push(piece);
    }
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wrap(text: &str, width: f32) -> Vec<String> {
        wrap_text(text, FontFamily::JetBrainsMono, FontWeight::Regular, 10.0, width)
    }

    #[test]
    fn test_empty_text_has_no_lines() {
        assert!(wrap("", 100.0).is_empty());
        assert!(wrap("   ", 100.0).is_empty());
    }

    #[test]
    fn test_short_text_stays_on_one_line() {
        assert_eq!(wrap("hello world", 200.0), vec!["hello world"]);
    }

    #[test]
    fn test_wraps_at_word_boundaries() {
        // Mono at 10px: 6.02px per char. 60px fits 9 chars.
        assert_eq!(wrap("aaaa bbbb cccc", 60.0), vec!["aaaa bbbb", "cccc"]);
    }

    #[test]
    fn test_newlines_force_breaks() {
        assert_eq!(wrap("one\ntwo", 500.0), vec!["one", "two"]);
    }

    #[test]
    fn test_overlong_word_is_split() {
        let lines = wrap("abcdefghijkl", 31.0);
        assert_eq!(lines, vec!["abcde", "fghij", "kl"]);
    }

    #[test]
    fn test_words_after_split_continue_on_last_piece() {
        let lines = wrap("abcdefg hi", 31.0);
        assert_eq!(lines, vec!["abcde", "fg hi"]);
    }

    #[test]
    fn test_wrapped_lines_fit_when_shaped_whole() {
        let text = "Conception et développement d'une plateforme de facturation \
                    utilisée par plus de deux cents entreprises clientes";
        for family in [FontFamily::Inter, FontFamily::EbGaramond] {
            for line in wrap_text(text, family, FontWeight::Regular, 14.0, 220.0) {
                let width = family.measure_px(&line, 14.0, FontWeight::Regular);
                assert!(width <= 220.5, "{line:?} is {width}px");
            }
        }
    }
}
