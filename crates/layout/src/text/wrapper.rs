use super::measure::TextMeasurer;
use reptile_style::FontSpec;

#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub text: String,
    pub width: f32,
}

// Use a small epsilon to handle floating point inaccuracies
pub(crate) const EPSILON: f32 = 0.01;

/// Breaks `text` into lines.
///
/// Explicit newlines always break. With `max_width`, words are packed greedily
/// and a line breaks at the last space that keeps it within the width. A single
/// word wider than `max_width` is kept whole on its own line. Line widths are
/// the sum of word and space advances, so each word is measured once.
pub fn wrap_lines(
    text: &str,
    font: &FontSpec,
    max_width: Option<f32>,
    measurer: &TextMeasurer<'_>,
) -> Vec<TextLine> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let paragraph = paragraph.strip_suffix('\r').unwrap_or(paragraph);
        match max_width {
            None => lines.push(TextLine {
                text: paragraph.to_string(),
                width: measurer.advance(paragraph, font),
            }),
            Some(limit) => break_paragraph(paragraph, font, limit, measurer, &mut lines),
        }
    }
    lines
}

fn break_paragraph(
    paragraph: &str,
    font: &FontSpec,
    max_width: f32,
    measurer: &TextMeasurer<'_>,
    lines: &mut Vec<TextLine>,
) {
    let space_width = measurer.advance(" ", font);
    let mut current = String::new();
    let mut current_width = 0.0;

    for (index, word) in paragraph.split(' ').enumerate() {
        let word_width = measurer.advance(word, font);
        if index == 0 {
            current.push_str(word);
            current_width = word_width;
            continue;
        }

        let candidate_width = current_width + space_width + word_width;
        if candidate_width <= max_width + EPSILON {
            current.push(' ');
            current.push_str(word);
            current_width = candidate_width;
        } else {
            lines.push(TextLine {
                text: std::mem::replace(&mut current, word.to_string()),
                width: current_width,
            });
            current_width = word_width;
        }
    }

    lines.push(TextLine {
        text: current,
        width: current_width,
    });
}
