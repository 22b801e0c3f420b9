//! Mapping of font specs onto the PDF standard-14 fonts.

use once_cell::sync::Lazy;
use reptile_style::FontSpec;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Family {
    Helvetica,
    Times,
    Courier,
}

static BASE_FONTS: Lazy<HashMap<(Family, bool, bool), &'static str>> = Lazy::new(|| {
    use Family::*;
    HashMap::from([
        ((Helvetica, false, false), "Helvetica"),
        ((Helvetica, true, false), "Helvetica-Bold"),
        ((Helvetica, false, true), "Helvetica-Oblique"),
        ((Helvetica, true, true), "Helvetica-BoldOblique"),
        ((Times, false, false), "Times-Roman"),
        ((Times, true, false), "Times-Bold"),
        ((Times, false, true), "Times-Italic"),
        ((Times, true, true), "Times-BoldItalic"),
        ((Courier, false, false), "Courier"),
        ((Courier, true, false), "Courier-Bold"),
        ((Courier, false, true), "Courier-Oblique"),
        ((Courier, true, true), "Courier-BoldOblique"),
    ])
});

fn family_of(name: &str) -> Family {
    let name = name.to_lowercase();
    if name.starts_with("courier") || name.contains("mono") {
        Family::Courier
    } else if name.starts_with("times") || (name.contains("serif") && !name.contains("sans")) {
        Family::Times
    } else {
        Family::Helvetica
    }
}

/// The standard-14 PostScript name used to draw `font`. Unknown families fall
/// back to Helvetica.
pub fn base_font(font: &FontSpec) -> &'static str {
    BASE_FONTS
        .get(&(family_of(&font.family), font.bold, font.italic))
        .copied()
        .unwrap_or("Helvetica")
}

/// Encodes text for a WinAnsi simple font; characters outside Latin-1 become '?'.
pub fn to_win_ansi(s: &str) -> Vec<u8> {
    s.chars()
        .map(|c| match c {
            '\u{00A0}' => b' ',
            c if (c as u32) <= 255 => c as u8,
            _ => b'?',
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_font_selection() {
        assert_eq!(base_font(&FontSpec::default()), "Helvetica");
        assert_eq!(base_font(&FontSpec::new("Arial", 10.0).bold(true)), "Helvetica-Bold");
        assert_eq!(base_font(&FontSpec::new("Times New Roman", 10.0).italic(true)), "Times-Italic");
        assert_eq!(base_font(&FontSpec::new("DejaVu Sans Mono", 9.0)), "Courier");
        assert_eq!(base_font(&FontSpec::new("Liberation Serif", 9.0)), "Times-Roman");
        assert_eq!(base_font(&FontSpec::new("PT Sans Serif", 9.0)), "Helvetica");
    }

    #[test]
    fn test_win_ansi_encoding() {
        assert_eq!(to_win_ansi("Größe €"), vec![b'G', b'r', 0xF6, 0xDF, b'e', b' ', b'?']);
    }
}
