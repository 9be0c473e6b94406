use serde::{Deserialize, Serialize};
use std::fmt;

/// One rendered glyph with its page-relative layout position. Usually a
/// single character; ligature expansions ("fi") span several.
///
/// Control characters (CR/LF) are excluded by the dump reader before any
/// glyph reaches the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PositionedGlyph {
    pub page: usize,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    #[serde(rename = "fontSize")]
    pub font_size_pt: f32,
    #[serde(rename = "char")]
    pub character: String,
}

/// Glyphs sharing one page and one quantized vertical bucket.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub page: usize,
    pub vertical_key: i32,
    pub y: f32,
    pub min_x: f32,
    pub max_x: f32,
    pub font_size_sum: f32,
    pub glyph_count: usize,
    pub text: String,
}

impl TextLine {
    pub fn avg_font_size(&self) -> f32 {
        if self.glyph_count == 0 {
            0.0
        } else {
            self.font_size_sum / self.glyph_count as f32
        }
    }
}

/// Screenplay element category assigned per line and carried by the
/// paragraph it belongs to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum Kind {
    Scene,
    Action,
    Character,
    Paren,
    Dialogue,
}

impl Kind {
    pub fn name(&self) -> &'static str {
        match self {
            Kind::Scene => "SCENE",
            Kind::Action => "ACTION",
            Kind::Character => "CHARACTER",
            Kind::Paren => "PAREN",
            Kind::Dialogue => "DIALOGUE",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Heuristic estimate that a line is a scene heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneScore {
    pub score: i32,
    pub has_scene_number: bool,
    pub sep_count: usize,
    pub block_count: usize,
    pub mostly_caps: bool,
}

impl SceneScore {
    pub fn zero() -> Self {
        Self {
            score: 0,
            has_scene_number: false,
            sep_count: 0,
            block_count: 0,
            mostly_caps: false,
        }
    }

    /// Compact flag rendering, e.g. `SCN1S2B4C1`.
    pub fn flags(&self) -> String {
        format!(
            "SCN{}S{}B{}C{}",
            u8::from(self.has_scene_number),
            self.sep_count.min(9),
            self.block_count.min(9),
            u8::from(self.mostly_caps),
        )
    }
}

/// One classified output paragraph, immutable once emitted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Paragraph {
    pub index: usize,
    pub page: usize,
    pub kind: Kind,
    pub style: String,
    pub min_x: f32,
    pub font_size: f32,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Screenplay {
    pub paragraphs: Vec<Paragraph>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn avg_font_size_of_empty_line_is_zero() {
        let line = TextLine {
            page: 0,
            vertical_key: 0,
            y: 0.0,
            min_x: 0.0,
            max_x: 0.0,
            font_size_sum: 0.0,
            glyph_count: 0,
            text: String::new(),
        };
        assert_eq!(line.avg_font_size(), 0.0);
    }

    #[test]
    fn scene_score_flags_saturate_at_nine() {
        let score = SceneScore {
            score: 8,
            has_scene_number: true,
            sep_count: 12,
            block_count: 4,
            mostly_caps: true,
        };
        assert_eq!(score.flags(), "SCN1S9B4C1");
    }

    #[test]
    fn glyph_round_trips_through_json() {
        let glyph = PositionedGlyph {
            page: 2,
            x: 40.5,
            y: 101.0,
            width: 5.2,
            font_size_pt: 12.0,
            character: "K".to_string(),
        };
        let json = serde_json::to_string(&glyph).unwrap();
        let back: PositionedGlyph = serde_json::from_str(&json).unwrap();
        assert_eq!(back, glyph);
    }
}
