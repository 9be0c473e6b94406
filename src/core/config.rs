use serde::{Deserialize, Serialize};

/// Heuristic thresholds for the whole pipeline. Every field can be
/// overridden from a JSON tuning file; the defaults are the calibrated
/// values.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Tuning {
    /// Vertical bucket granularity in layout units. Glyphs whose y rounds
    /// to the same multiple of this value land on the same line.
    pub vertical_granularity: f32,
    /// A line indented further right than this cannot be a scene heading.
    pub scene_indent_max: f32,
    /// Same-kind ACTION/DIALOGUE lines whose left margin shifts by at
    /// least this much start a new paragraph.
    pub indent_jump: f32,
    /// A mode-classified DIALOGUE line within this margin of the lowest
    /// observed ACTION indent is reclassified as ACTION.
    pub dialogue_escape_margin: f32,
    /// Paragraph break threshold as a multiple of the median baseline gap.
    pub para_break_factor: f32,
    /// Baseline gap used when fewer than two same-page gaps exist.
    pub baseline_gap_fallback: f32,
    /// A body with at least this many underscores gets the corruption label.
    pub corrupt_underscores: usize,
    /// A body with an unbroken non-whitespace run of at least this many
    /// characters gets the corruption label.
    pub corrupt_run_len: usize,
    /// Hard cap on emitted paragraphs; processing stops once reached.
    pub max_paragraphs: usize,
    /// Lines exactly equal to this literal (case-insensitive) are dropped.
    pub watermark: String,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            vertical_granularity: 0.5,
            scene_indent_max: 90.0,
            indent_jump: 35.0,
            dialogue_escape_margin: 15.0,
            para_break_factor: 1.6,
            baseline_gap_fallback: 13.0,
            corrupt_underscores: 6,
            corrupt_run_len: 35,
            max_paragraphs: 200,
            watermark: "Created using Celtx".to_string(),
        }
    }
}
