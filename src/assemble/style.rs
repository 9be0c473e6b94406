use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::config::Tuning;
use crate::core::model::Kind;

/// A lone short numeric token with a closing `.` or `)` — a page-number
/// artifact, e.g. "7." or "11.".
static PAGE_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{1,3}\s*[.)]$").expect("valid regex"));

/// An all-uppercase parenthetical of at least three letters — a transition
/// marker, e.g. "(KESME)", "(CUT TO)".
static TRANSITION_PAREN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\(\s*[A-ZÇĞİÖŞÜ ]{3,}\s*\)$").expect("valid regex"));

/// One style override: a named predicate over the finalized body plus the
/// marker spliced into the label when it matches. Rules are evaluated in
/// order and a later match replaces an earlier one.
struct OverrideRule {
    name: &'static str,
    marker: &'static str,
    applies: fn(Kind, &str, &Tuning) -> bool,
}

static OVERRIDES: &[OverrideRule] = &[
    OverrideRule {
        name: "page-number",
        marker: "PG",
        applies: |_, body, _| PAGE_NUMBER.is_match(body),
    },
    OverrideRule {
        name: "transition",
        marker: "TR",
        applies: |kind, body, _| kind == Kind::Paren && TRANSITION_PAREN.is_match(body),
    },
    OverrideRule {
        name: "corrupt",
        marker: "CORR",
        applies: |_, body, tuning| looks_corrupt(body, tuning),
    },
];

/// Renders a paragraph's kind, left-margin bucket and font bucket into a
/// compact style label. Overrides only change the label; the paragraph's
/// kind and body are untouched.
pub fn encode_style(
    kind: Kind,
    max_scene_score: i32,
    min_x: f32,
    font_size: f32,
    body: &str,
    tuning: &Tuning,
) -> String {
    let x = bucket10(min_x);
    let f = bucket_font(font_size);

    let mut label = if kind == Kind::Scene {
        format!("SCENE_S{max_scene_score}_x{x}_f{f}")
    } else {
        format!("{kind}_x{x}_f{f}")
    };

    for rule in OVERRIDES {
        if (rule.applies)(kind, body, tuning) {
            label = format!("{kind}_{}_x{x}_f{f}", rule.marker);
            log::debug!("style override {} -> {label}", rule.name);
        }
    }

    label
}

/// Corruption heuristic: underscore-riddled text or an unbroken
/// non-whitespace run long enough to be an extraction artifact.
fn looks_corrupt(body: &str, tuning: &Tuning) -> bool {
    let s = body.trim();
    if s.is_empty() {
        return false;
    }

    let underscores = s.chars().filter(|&c| c == '_').count();
    if underscores >= tuning.corrupt_underscores {
        return true;
    }

    let mut max_run = 0;
    let mut run = 0;
    for c in s.chars() {
        if c.is_whitespace() {
            run = 0;
        } else {
            run += 1;
            max_run = max_run.max(run);
        }
    }
    max_run >= tuning.corrupt_run_len
}

fn bucket10(v: f32) -> i32 {
    (v / 10.0).round() as i32 * 10
}

fn bucket_font(v: f32) -> i32 {
    v.round() as i32
}
