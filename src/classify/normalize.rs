use once_cell::sync::Lazy;
use regex::Regex;

static TAB_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\t+").expect("valid regex"));
static SPACE_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r" {2,}").expect("valid regex"));

/// Whitespace cleanup plus artifact repair. Returns `None` for lines that
/// normalize to blank or match the watermark literal; those never reach
/// classification.
pub fn normalize_line(raw: &str, watermark: &str) -> Option<String> {
    let text = normalize_whitespace(raw);
    // The watermark test is exact over the trailing-trimmed line; an
    // indented occurrence is ordinary text.
    if text.trim().is_empty() || text.eq_ignore_ascii_case(watermark) {
        return None;
    }

    let text = repair_artifacts(&text);
    if text.trim().is_empty() {
        return None;
    }
    Some(text)
}

/// NBSP becomes a plain space, runs of tabs or multiple spaces collapse to
/// one space, and only trailing whitespace is stripped. Leading spacing
/// stays because indentation carries classification signal.
pub fn normalize_whitespace(raw: &str) -> String {
    let text = raw.replace('\u{00A0}', " ");
    let text = TAB_RUNS.replace_all(&text, " ");
    let text = SPACE_RUNS.replace_all(&text, " ");
    text.trim_end().to_string()
}

/// Repairs the two extraction artifacts the decoder is known to produce:
/// underscore interleaving and glyph-by-glyph letter spacing.
pub fn repair_artifacts(text: &str) -> String {
    let text = repair_underscores(text);
    repair_letter_spacing(&text)
}

/// Underscore-heavy text: drop underscores sitting directly between two
/// letters, turn the rest into spaces. Neighbors are judged against the
/// original character sequence.
fn repair_underscores(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let underscores = chars.iter().filter(|&&c| c == '_').count();
    if underscores == 0 || underscores < 2.max(chars.len() / 5) {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    for (i, &c) in chars.iter().enumerate() {
        if c != '_' {
            out.push(c);
            continue;
        }
        let between_letters = i > 0
            && chars[i - 1].is_alphabetic()
            && chars.get(i + 1).map(|n| n.is_alphabetic()).unwrap_or(false);
        if !between_letters {
            out.push(' ');
        }
    }
    out
}

/// A line extracted as isolated letters ("s a t s u m a x") is glued back
/// together when at least 8 tokens exist and at least 70% of them are a
/// single character.
fn repair_letter_spacing(text: &str) -> String {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    if tokens.len() < 8 {
        return text.to_string();
    }

    let one_char = tokens.iter().filter(|t| t.chars().count() == 1).count();
    if (one_char as f32) < tokens.len() as f32 * 0.70 {
        return text.to_string();
    }

    tokens.concat()
}
