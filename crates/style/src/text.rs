use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum HAlign {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum VAlign {
    #[default]
    Top,
    Center,
    Bottom,
}

/// Layout flags handed to a surface together with a plain text draw call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TextFlags {
    pub h_align: HAlign,
    pub v_align: VAlign,
    pub word_wrap: bool,
}

impl TextFlags {
    pub fn new(h_align: HAlign, v_align: VAlign, word_wrap: bool) -> Self {
        Self {
            h_align,
            v_align,
            word_wrap,
        }
    }
}

/// Horizontal offset of a line of `line_width` inside a box of `box_width`.
pub fn align_offset(align: HAlign, box_width: f32, line_width: f32) -> f32 {
    let free = (box_width - line_width).max(0.0);
    match align {
        HAlign::Left | HAlign::Justify => 0.0,
        HAlign::Center => free / 2.0,
        HAlign::Right => free,
    }
}

/// Vertical offset of a text block of `block_height` inside a box of `box_height`.
pub fn valign_offset(align: VAlign, box_height: f32, block_height: f32) -> f32 {
    let free = (box_height - block_height).max(0.0);
    match align {
        VAlign::Top => 0.0,
        VAlign::Center => free / 2.0,
        VAlign::Bottom => free,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_align_offsets() {
        assert_eq!(align_offset(HAlign::Left, 100.0, 40.0), 0.0);
        assert_eq!(align_offset(HAlign::Center, 100.0, 40.0), 30.0);
        assert_eq!(align_offset(HAlign::Right, 100.0, 40.0), 60.0);
        assert_eq!(align_offset(HAlign::Right, 30.0, 40.0), 0.0);
        assert_eq!(valign_offset(VAlign::Bottom, 50.0, 20.0), 30.0);
        assert_eq!(valign_offset(VAlign::Center, 50.0, 20.0), 15.0);
    }

    #[test]
    fn test_alignment_names() {
        let h: HAlign = serde_json::from_str("\"center\"").unwrap();
        let v: VAlign = serde_json::from_str("\"bottom\"").unwrap();
        assert_eq!(h, HAlign::Center);
        assert_eq!(v, VAlign::Bottom);
    }
}
