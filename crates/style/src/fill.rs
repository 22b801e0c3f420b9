use reptile_types::Color;
use serde::{de, Deserialize, Deserializer, Serialize};

/// Texture used when a rectangle is filled.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum BrushPattern {
    None,
    #[default]
    Solid,
    Horizontal,
    Vertical,
    Cross,
    BackwardDiagonal,
    ForwardDiagonal,
    DiagonalCross,
}

impl BrushPattern {
    /// Maps the numeric brush style codes used by report designers.
    /// Codes 2..=8 are dense shades, which render as solid here.
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(BrushPattern::None),
            1..=8 => Some(BrushPattern::Solid),
            9 => Some(BrushPattern::Horizontal),
            10 => Some(BrushPattern::Vertical),
            11 => Some(BrushPattern::Cross),
            12 => Some(BrushPattern::BackwardDiagonal),
            13 => Some(BrushPattern::ForwardDiagonal),
            14 => Some(BrushPattern::DiagonalCross),
            _ => None,
        }
    }

    fn parse(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "none" | "no-brush" => Ok(BrushPattern::None),
            "solid" => Ok(BrushPattern::Solid),
            "horizontal" => Ok(BrushPattern::Horizontal),
            "vertical" => Ok(BrushPattern::Vertical),
            "cross" => Ok(BrushPattern::Cross),
            "backward-diagonal" => Ok(BrushPattern::BackwardDiagonal),
            "forward-diagonal" => Ok(BrushPattern::ForwardDiagonal),
            "diagonal-cross" => Ok(BrushPattern::DiagonalCross),
            other => Err(format!("Invalid brush pattern: '{}'", other)),
        }
    }

    pub fn is_visible(&self) -> bool {
        *self != BrushPattern::None
    }
}

impl<'de> Deserialize<'de> for BrushPattern {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum PatternDef {
            Code(u32),
            Str(String),
        }

        match PatternDef::deserialize(deserializer)? {
            PatternDef::Code(code) => BrushPattern::from_code(code)
                .ok_or_else(|| de::Error::custom(format!("Unknown brush style code {}", code))),
            PatternDef::Str(s) => BrushPattern::parse(&s).map_err(de::Error::custom),
        }
    }
}

/// A background fill: primary color plus brush pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fill {
    pub color: Color,
    #[serde(default)]
    pub pattern: BrushPattern,
}

impl Fill {
    pub fn solid(color: Color) -> Self {
        Self {
            color,
            pattern: BrushPattern::Solid,
        }
    }

    pub fn with_pattern(color: Color, pattern: BrushPattern) -> Self {
        Self { color, pattern }
    }
}
