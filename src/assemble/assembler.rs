use log::debug;

use crate::assemble::style::encode_style;
use crate::classify::element::classify_line;
use crate::classify::normalize::normalize_line;
use crate::classify::scene::score_scene;
use crate::core::config::Tuning;
use crate::core::model::{Kind, Paragraph, TextLine};

/// Accumulator for the paragraph currently being built. At most one is
/// open at a time and it is owned exclusively by the assembler state.
#[derive(Debug, Clone)]
struct OpenParagraph {
    kind: Kind,
    page: usize,
    min_x: f32,
    font_sum: f32,
    font_count: usize,
    max_scene_score: i32,
    body: String,
}

impl OpenParagraph {
    fn open(kind: Kind, line: &TextLine, text: String, scene_score: i32) -> Self {
        // The boundary line seeds the stats and then passes through the
        // same per-line update as every appended line, so its font size
        // enters the sum twice.
        let avg = line.avg_font_size();
        Self {
            kind,
            page: line.page,
            min_x: line.min_x,
            font_sum: avg * 2.0,
            font_count: 2,
            max_scene_score: if kind == Kind::Scene { scene_score } else { 0 },
            body: text,
        }
    }

    fn append(&mut self, line: &TextLine, text: &str, scene_score: i32) {
        self.body.push('\n');
        self.body.push_str(text);
        self.min_x = self.min_x.min(line.min_x);
        self.font_sum += line.avg_font_size();
        self.font_count += 1;
        if self.kind == Kind::Scene {
            self.max_scene_score = self.max_scene_score.max(scene_score);
        }
    }

    fn finalize(self, index: usize, tuning: &Tuning) -> Paragraph {
        let text = self.body.trim().to_string();
        let font_size = if self.font_count == 0 {
            0.0
        } else {
            self.font_sum / self.font_count as f32
        };
        let style = encode_style(
            self.kind,
            self.max_scene_score,
            self.min_x,
            font_size,
            &text,
            tuning,
        );
        Paragraph {
            index,
            page: self.page,
            kind: self.kind,
            style,
            min_x: self.min_x,
            font_size,
            text,
        }
    }
}

/// Mutable state threaded through the per-line step. Kept as one explicit
/// record so the machine can be driven and inspected in isolation.
#[derive(Debug)]
struct AssemblerState {
    open: Option<OpenParagraph>,
    prev: Option<(usize, f32)>,
    dialogue_mode: bool,
    seen_action_min_x: Option<f32>,
    emitted: Vec<Paragraph>,
    capped: bool,
}

impl AssemblerState {
    fn new() -> Self {
        Self {
            open: None,
            prev: None,
            dialogue_mode: false,
            seen_action_min_x: None,
            emitted: Vec::new(),
            capped: false,
        }
    }

    fn emit(&mut self, open: OpenParagraph, tuning: &Tuning) {
        let paragraph = open.finalize(self.emitted.len(), tuning);
        debug!(
            "paragraph {} page {} {} [{}]",
            paragraph.index, paragraph.page, paragraph.kind, paragraph.style
        );
        self.emitted.push(paragraph);
        if self.emitted.len() >= tuning.max_paragraphs {
            self.capped = true;
        }
    }
}

/// Sequences normalized lines into classified paragraphs. Lines are
/// re-sorted into reading order first; the caller's order is irrelevant.
pub fn assemble_paragraphs(mut lines: Vec<TextLine>, tuning: &Tuning) -> Vec<Paragraph> {
    lines.sort_by(|a, b| {
        a.page
            .cmp(&b.page)
            .then(a.y.total_cmp(&b.y))
            .then(a.min_x.total_cmp(&b.min_x))
    });

    let baseline_gap = median_baseline_gap(&lines, tuning.baseline_gap_fallback);
    let para_break_gap = baseline_gap * tuning.para_break_factor;
    debug!("baseline gap {baseline_gap:.2}, paragraph break at {para_break_gap:.2}");

    let mut state = AssemblerState::new();
    for line in &lines {
        if state.capped {
            break;
        }
        step(&mut state, line, para_break_gap, tuning);
    }

    if !state.capped {
        if let Some(open) = state.open.take() {
            state.emit(open, tuning);
        }
    }

    state.emitted
}

/// One transition of the state machine for one text line.
fn step(state: &mut AssemblerState, line: &TextLine, para_break_gap: f32, tuning: &Tuning) {
    let text = match normalize_line(&line.text, &tuning.watermark) {
        Some(text) => text,
        None => return,
    };

    let score = score_scene(&text);
    let mut kind = classify_line(&text, line.min_x, state.dialogue_mode, &score, tuning);
    if kind == Kind::Scene {
        debug!("scene heading ({}): {text}", score.flags());
    }

    // Dialogue-escape: a mode-classified DIALOGUE line sitting at (or left
    // of) the known action indent is action text the mode swallowed.
    if state.dialogue_mode && kind == Kind::Dialogue {
        if let Some(action_min_x) = state.seen_action_min_x {
            if line.min_x <= action_min_x + tuning.dialogue_escape_margin {
                kind = Kind::Action;
                state.dialogue_mode = false;
            }
        }
    }

    let mut new_para = match state.prev {
        None => true,
        Some((prev_page, prev_y)) => {
            line.page != prev_page || line.y - prev_y >= para_break_gap
        }
    };
    if matches!(kind, Kind::Scene | Kind::Character | Kind::Paren) {
        new_para = true;
    }
    if let Some(open) = &state.open {
        if open.kind != kind {
            new_para = true;
        } else if matches!(kind, Kind::Action | Kind::Dialogue)
            && (line.min_x - open.min_x).abs() >= tuning.indent_jump
        {
            new_para = true;
        }
    }

    if new_para {
        if let Some(open) = state.open.take() {
            state.emit(open, tuning);
        }
        if !state.capped {
            state.open = Some(OpenParagraph::open(kind, line, text, score.score));
        }
    } else if let Some(open) = state.open.as_mut() {
        open.append(line, &text, score.score);
    }

    state.prev = Some((line.page, line.y));

    if kind == Kind::Action {
        state.seen_action_min_x = Some(match state.seen_action_min_x {
            Some(seen) => seen.min(line.min_x),
            None => line.min_x,
        });
    }

    match kind {
        Kind::Character => state.dialogue_mode = true,
        Kind::Scene => state.dialogue_mode = false,
        _ => {}
    }
}

fn median_baseline_gap(lines: &[TextLine], fallback: f32) -> f32 {
    let mut gaps: Vec<f32> = lines
        .windows(2)
        .filter(|pair| pair[0].page == pair[1].page)
        .map(|pair| pair[1].y - pair[0].y)
        .collect();
    if gaps.len() < 2 {
        return fallback;
    }
    gaps.sort_by(f32::total_cmp);
    let mid = gaps.len() / 2;
    if gaps.len() % 2 == 0 {
        (gaps[mid - 1] + gaps[mid]) / 2.0
    } else {
        gaps[mid]
    }
}
