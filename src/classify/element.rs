use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::config::Tuning;
use crate::core::model::{Kind, SceneScore};

/// Minimum scene score for a line to classify as SCENE.
pub const SCENE_SCORE_MIN: i32 = 6;

/// Optional numeric marker in front of a character cue: "1.HIRT",
/// "2) HIRT", "3 - HIRT".
static CUE_NUMERIC_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*\d+\s*[.)\-]?\s*").expect("valid regex"));

/// Fixed uppercase alphabet for cues: Latin capitals plus the Turkish set,
/// with space, hyphen and `?` tolerated for encoding damage.
static CUE_CHARSET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-ZÇĞİÖŞÜ?\- ]+$").expect("valid regex"));

/// Narrow all-caps-leading-digit heading shape used only to veto cues.
static NARROW_HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+\s*\S").expect("valid regex"));

/// Maps a normalized line to its element kind. Priority is fixed and the
/// first match wins; no side effects.
pub fn classify_line(text: &str, min_x: f32, dialogue_mode: bool, score: &SceneScore, tuning: &Tuning) -> Kind {
    if score.score >= SCENE_SCORE_MIN && min_x <= tuning.scene_indent_max {
        return Kind::Scene;
    }
    if is_character_cue(text) {
        return Kind::Character;
    }
    if text.trim_start().starts_with('(') {
        return Kind::Paren;
    }
    if dialogue_mode {
        return Kind::Dialogue;
    }
    Kind::Action
}

/// A character cue is a short uppercase name, optionally prefixed by a
/// numeric marker. Anything that independently reads as a scene heading is
/// vetoed: scene detection outranks cue detection.
pub fn is_character_cue(text: &str) -> bool {
    let t = text.trim();
    let cue = CUE_NUMERIC_MARKER.replace(t, "");
    let cue = cue.trim();
    if cue.is_empty() {
        return false;
    }

    let len = cue.chars().count();
    if !(2..=30).contains(&len) {
        return false;
    }
    if cue.contains('/') {
        return false;
    }
    if !CUE_CHARSET.is_match(cue) {
        return false;
    }
    if cue.chars().filter(|c| c.is_alphabetic()).count() < 2 {
        return false;
    }
    !is_narrow_scene_heading(cue)
}

fn is_narrow_scene_heading(text: &str) -> bool {
    let t = text.trim();
    NARROW_HEADING.is_match(t) && t == t.to_uppercase()
}
