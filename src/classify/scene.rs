use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::model::SceneScore;

/// Characters treated as scene-heading separators ("INT./EXT.", "KHT - GUN").
pub const SCENE_SEPARATORS: &[char] = &['.', '/', '\\', '–', '—', '|'];

static LEADING_SCENE_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{1,4}").expect("valid regex"));

/// Scores how much a normalized line looks like a scene heading. Pure
/// function; the caller keeps the running maximum per SCENE paragraph.
pub fn score_scene(text: &str) -> SceneScore {
    let t = text.trim();
    if t.is_empty() {
        return SceneScore::zero();
    }

    let has_scene_number = LEADING_SCENE_NUMBER.is_match(t);

    let sep_count = t.chars().filter(|c| SCENE_SEPARATORS.contains(c)).count();

    let despaced: String = t
        .chars()
        .map(|c| if SCENE_SEPARATORS.contains(&c) { ' ' } else { c })
        .collect();
    let block_count = despaced.split_whitespace().count();

    let letters = t.chars().filter(|c| c.is_alphabetic()).count();
    let upper = t
        .chars()
        .filter(|c| c.is_alphabetic() && c.is_uppercase())
        .count();
    let mostly_caps = letters >= 2 && upper as f32 / letters as f32 >= 0.90;

    let mut score = 0;
    if has_scene_number {
        score += 3;
    }
    if mostly_caps {
        score += 2;
    }
    score += match sep_count {
        0 => 0,
        1 => 1,
        _ => 2,
    };
    if block_count >= 3 {
        score += 1;
    }

    SceneScore {
        score,
        has_scene_number,
        sep_count,
        block_count,
        mostly_caps,
    }
}
