pub mod dump_reader;

pub use dump_reader::read_glyph_dump;

use crate::core::model::PositionedGlyph;

/// Consumer of positioned glyphs. The external decoder (or the dump
/// reader standing in for it) pushes glyphs through this seam one at a
/// time, so nothing downstream depends on a specific extraction API.
pub trait GlyphSink {
    fn on_glyph(&mut self, glyph: PositionedGlyph);
}

impl GlyphSink for Vec<PositionedGlyph> {
    fn on_glyph(&mut self, glyph: PositionedGlyph) {
        self.push(glyph);
    }
}
