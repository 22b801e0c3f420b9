//! A small rich-text markup dialect.
//!
//! Supported tags: `<b>`/`<strong>`, `<i>`/`<em>`, `<u>`, `<br>` and `<p>`.
//! Entities: `&amp; &lt; &gt; &quot; &#39; &apos; &nbsp;`. Unknown tags are
//! dropped, their content kept. Runs of whitespace collapse to one space.

use super::wrapper::EPSILON;
use reptile_style::FontSpec;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct RunStyle {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

impl RunStyle {
    /// The font a run in this style is drawn with: bold and italic add to
    /// the base font's own flags.
    pub fn apply(&self, font: &FontSpec) -> FontSpec {
        FontSpec {
            bold: font.bold || self.bold,
            italic: font.italic || self.italic,
            ..font.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RichSpan {
    pub text: String,
    pub style: RunStyle,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RichItem {
    Span(RichSpan),
    LineBreak,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RichLine {
    pub runs: Vec<RichSpan>,
    pub width: f32,
}

#[derive(Default)]
struct StyleStack {
    bold: u32,
    italic: u32,
    underline: u32,
}

impl StyleStack {
    fn current(&self) -> RunStyle {
        RunStyle {
            bold: self.bold > 0,
            italic: self.italic > 0,
            underline: self.underline > 0,
        }
    }
}

struct Builder {
    items: Vec<RichItem>,
    at_line_start: bool,
    after_space: bool,
}

impl Builder {
    fn push_char(&mut self, c: char, style: RunStyle) {
        self.append(c, style);
        self.at_line_start = false;
        self.after_space = false;
    }

    fn push_space(&mut self, style: RunStyle) {
        if !self.at_line_start && !self.after_space {
            self.append(' ', style);
            self.after_space = true;
        }
    }

    fn append(&mut self, c: char, style: RunStyle) {
        if let Some(RichItem::Span(last)) = self.items.last_mut() {
            if last.style == style {
                last.text.push(c);
                return;
            }
        }
        self.items.push(RichItem::Span(RichSpan {
            text: c.to_string(),
            style,
        }));
    }

    fn line_break(&mut self) {
        self.items.push(RichItem::LineBreak);
        self.at_line_start = true;
        self.after_space = false;
    }
}

/// Parses markup into styled spans and explicit line breaks.
pub fn parse_markup(markup: &str) -> Vec<RichItem> {
    let mut styles = StyleStack::default();
    let mut out = Builder {
        items: Vec::new(),
        at_line_start: true,
        after_space: false,
    };

    let mut rest = markup;
    while let Some(c) = rest.chars().next() {
        if c == '<' {
            if let Some(end) = rest.find('>') {
                apply_tag(&rest[1..end], &mut styles, &mut out);
                rest = &rest[end + 1..];
                continue;
            }
        }
        if c == '&' {
            if let Some((decoded, consumed)) = decode_entity(rest) {
                out.push_char(decoded, styles.current());
                rest = &rest[consumed..];
                continue;
            }
        }
        if c.is_whitespace() {
            out.push_space(styles.current());
        } else {
            out.push_char(c, styles.current());
        }
        rest = &rest[c.len_utf8()..];
    }
    out.items
}

fn apply_tag(tag: &str, styles: &mut StyleStack, out: &mut Builder) {
    let tag = tag.trim();
    let (closing, body) = match tag.strip_prefix('/') {
        Some(body) => (true, body),
        None => (false, tag.trim_end_matches('/')),
    };
    let name = body
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();

    let counter = match name.as_str() {
        "b" | "strong" => &mut styles.bold,
        "i" | "em" => &mut styles.italic,
        "u" => &mut styles.underline,
        "br" => {
            out.line_break();
            return;
        }
        "p" => {
            if closing || !out.at_line_start {
                out.line_break();
            }
            return;
        }
        _ => return,
    };
    if closing {
        *counter = counter.saturating_sub(1);
    } else {
        *counter += 1;
    }
}

fn decode_entity(input: &str) -> Option<(char, usize)> {
    let end = input.char_indices().take(10).find(|(_, c)| *c == ';')?.0;
    let decoded = match &input[1..end] {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" | "#39" => '\'',
        "nbsp" => '\u{00A0}',
        _ => return None,
    };
    Some((decoded, end + 1))
}

/// The markup with tags removed and line breaks turned into `\n`.
pub fn plain_text(items: &[RichItem]) -> String {
    let mut text = String::new();
    for item in items {
        match item {
            RichItem::Span(span) => text.push_str(&span.text),
            RichItem::LineBreak => text.push('\n'),
        }
    }
    text
}

struct Word<'a> {
    text: &'a str,
    style: RunStyle,
    space_before: bool,
}

enum Token<'a> {
    Word(Word<'a>),
    Break,
}

fn tokenize(items: &[RichItem]) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut pending_space = false;
    for item in items {
        match item {
            RichItem::LineBreak => {
                tokens.push(Token::Break);
                pending_space = false;
            }
            RichItem::Span(span) => {
                for (i, piece) in span.text.split(' ').enumerate() {
                    if i > 0 {
                        pending_space = true;
                    }
                    if piece.is_empty() {
                        continue;
                    }
                    tokens.push(Token::Word(Word {
                        text: piece,
                        style: span.style,
                        space_before: pending_space,
                    }));
                    pending_space = false;
                }
            }
        }
    }
    tokens
}

impl RichLine {
    fn push(&mut self, text: &str, style: RunStyle) {
        match self.runs.last_mut() {
            Some(last) if last.style == style => last.text.push_str(text),
            _ => self.runs.push(RichSpan {
                text: text.to_string(),
                style,
            }),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }
}

/// Greedy line breaking of styled words. `measure` returns the advance of a
/// piece of text in a given style. A word is never split.
pub fn wrap_rich<F>(items: &[RichItem], max_width: Option<f32>, measure: F) -> Vec<RichLine>
where
    F: Fn(RunStyle, &str) -> f32,
{
    let mut lines = Vec::new();
    let mut line = RichLine::default();

    for token in tokenize(items) {
        let word = match token {
            Token::Break => {
                lines.push(std::mem::take(&mut line));
                continue;
            }
            Token::Word(word) => word,
        };

        let word_width = measure(word.style, word.text);
        let space_style = line.runs.last().map_or(word.style, |run| run.style);
        let space_width = if word.space_before && !line.is_empty() {
            measure(space_style, " ")
        } else {
            0.0
        };

        let overflows = max_width
            .is_some_and(|limit| line.width + space_width + word_width > limit + EPSILON);
        if overflows && !line.is_empty() {
            lines.push(std::mem::take(&mut line));
        } else if space_width > 0.0 {
            line.push(" ", space_style);
            line.width += space_width;
        }
        line.push(word.text, word.style);
        line.width += word_width;
    }

    if !line.is_empty() || lines.is_empty() {
        lines.push(line);
    }
    lines
}
