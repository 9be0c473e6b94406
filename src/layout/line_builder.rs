use log::debug;

use crate::core::model::{PositionedGlyph, TextLine};
use crate::extract::GlyphSink;

/// Clusters glyphs into text lines by page and quantized vertical
/// position. Collects everything it is fed, then `build` sorts by
/// `(page, vertical_key, x)` and walks the run, starting a new line
/// whenever the `(page, vertical_key)` pair changes.
#[derive(Debug)]
pub struct LineBuilder {
    glyphs: Vec<PositionedGlyph>,
    granularity: f32,
}

impl LineBuilder {
    pub fn new(granularity: f32) -> Self {
        Self {
            glyphs: Vec::new(),
            granularity,
        }
    }

    pub fn build(self) -> Vec<TextLine> {
        let granularity = self.granularity;
        let key = |y: f32| (y / granularity).round() as i32;

        let mut glyphs = self.glyphs;
        glyphs.sort_by(|a, b| {
            a.page
                .cmp(&b.page)
                .then(key(a.y).cmp(&key(b.y)))
                .then(a.x.total_cmp(&b.x))
        });

        let mut lines: Vec<TextLine> = Vec::new();
        for glyph in glyphs {
            let vertical_key = key(glyph.y);
            match lines.last_mut() {
                Some(line) if line.page == glyph.page && line.vertical_key == vertical_key => {
                    line.min_x = line.min_x.min(glyph.x);
                    line.max_x = line.max_x.max(glyph.x + glyph.width);
                    line.font_size_sum += glyph.font_size_pt;
                    line.glyph_count += 1;
                    line.text.push_str(&glyph.character);
                }
                _ => lines.push(TextLine {
                    page: glyph.page,
                    vertical_key,
                    y: glyph.y,
                    min_x: glyph.x,
                    max_x: glyph.x + glyph.width,
                    font_size_sum: glyph.font_size_pt,
                    glyph_count: 1,
                    text: glyph.character.clone(),
                }),
            }
        }

        debug!("built {} text lines", lines.len());
        lines
    }
}

impl GlyphSink for LineBuilder {
    fn on_glyph(&mut self, glyph: PositionedGlyph) {
        self.glyphs.push(glyph);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn glyph(page: usize, x: f32, y: f32, ch: &str) -> PositionedGlyph {
        PositionedGlyph {
            page,
            x,
            y,
            width: 5.0,
            font_size_pt: 12.0,
            character: ch.to_string(),
        }
    }

    #[test]
    fn clusters_by_page_and_vertical_bucket() {
        let mut builder = LineBuilder::new(0.5);
        builder.on_glyph(glyph(0, 46.0, 100.2, "b"));
        builder.on_glyph(glyph(0, 40.0, 100.0, "a"));
        builder.on_glyph(glyph(0, 40.0, 120.0, "c"));
        builder.on_glyph(glyph(1, 40.0, 100.0, "d"));

        let lines = builder.build();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].text, "ab");
        assert_eq!(lines[1].text, "c");
        assert_eq!(lines[2].page, 1);
    }

    #[test]
    fn jittered_y_lands_in_one_bucket() {
        let mut builder = LineBuilder::new(0.5);
        builder.on_glyph(glyph(0, 40.0, 100.1, "x"));
        builder.on_glyph(glyph(0, 46.0, 99.9, "y"));

        let lines = builder.build();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "xy");
    }

    #[test]
    fn accumulates_extents_and_font_stats() {
        let mut builder = LineBuilder::new(0.5);
        builder.on_glyph(glyph(0, 40.0, 100.0, "a"));
        builder.on_glyph(glyph(0, 52.0, 100.0, "b"));

        let lines = builder.build();
        assert_eq!(lines[0].min_x, 40.0);
        assert_eq!(lines[0].max_x, 57.0);
        assert_eq!(lines[0].glyph_count, 2);
        assert_eq!(lines[0].avg_font_size(), 12.0);
    }

    #[test]
    fn ligature_glyph_contributes_all_its_characters() {
        let mut builder = LineBuilder::new(0.5);
        builder.on_glyph(glyph(0, 40.0, 100.0, "fi"));
        builder.on_glyph(glyph(0, 46.0, 100.0, "l"));
        builder.on_glyph(glyph(0, 52.0, 100.0, "m"));

        let lines = builder.build();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "film");
        assert_eq!(lines[0].glyph_count, 3);
    }

    #[test]
    fn no_glyph_is_dropped_or_duplicated() {
        let mut builder = LineBuilder::new(0.5);
        let total = 37;
        for i in 0..total {
            builder.on_glyph(glyph(i % 3, (i * 7) as f32, (i * 11 % 50) as f32, "q"));
        }
        let lines = builder.build();
        let counted: usize = lines.iter().map(|l| l.glyph_count).sum();
        assert_eq!(counted, total);
    }

    #[test]
    fn empty_input_yields_no_lines() {
        let builder = LineBuilder::new(0.5);
        assert!(builder.build().is_empty());
    }
}
