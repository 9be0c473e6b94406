use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};

use crate::core::model::PositionedGlyph;
use crate::extract::GlyphSink;

/// Reads a glyph dump produced by the external decoder: one JSON object
/// per line. Glyphs outside `[start_page, end_page]` and control
/// characters are dropped here, before anything reaches the sink.
///
/// Returns the number of glyphs fed into the sink.
pub fn read_glyph_dump(
    path: &Path,
    start_page: usize,
    end_page: usize,
    sink: &mut dyn GlyphSink,
) -> Result<usize> {
    let file = File::open(path)
        .with_context(|| format!("failed to open glyph dump: {}", path.display()))?;
    let reader = BufReader::new(file);

    let mut fed = 0;
    for (line_no, line) in reader.lines().enumerate() {
        let line = line
            .with_context(|| format!("failed to read line {} of {}", line_no + 1, path.display()))?;
        if line.trim().is_empty() {
            continue;
        }

        let glyph: PositionedGlyph = serde_json::from_str(&line).with_context(|| {
            format!("malformed glyph on line {} of {}", line_no + 1, path.display())
        })?;

        if glyph.page < start_page || glyph.page > end_page {
            continue;
        }
        if glyph.character == "\r" || glyph.character == "\n" {
            continue;
        }

        sink.on_glyph(glyph);
        fed += 1;
    }

    Ok(fed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    fn write_dump(lines: &[&str]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        for line in lines {
            writeln!(file, "{line}").unwrap();
        }
        file
    }

    #[test]
    fn reads_glyphs_within_page_window() {
        let dump = write_dump(&[
            r#"{"page":0,"x":40.0,"y":100.0,"width":5.0,"fontSize":12.0,"char":"A"}"#,
            r#"{"page":3,"x":40.0,"y":100.0,"width":5.0,"fontSize":12.0,"char":"B"}"#,
            "",
            r#"{"page":1,"x":46.0,"y":100.0,"width":5.0,"fontSize":12.0,"char":"C"}"#,
        ]);

        let mut glyphs: Vec<PositionedGlyph> = Vec::new();
        let fed = read_glyph_dump(dump.path(), 0, 1, &mut glyphs).unwrap();

        assert_eq!(fed, 2);
        assert_eq!(glyphs.len(), 2);
        assert_eq!(glyphs[0].character, "A");
        assert_eq!(glyphs[1].character, "C");
    }

    #[test]
    fn multi_character_ligature_entry_is_accepted() {
        let dump = write_dump(&[
            r#"{"page":0,"x":40.0,"y":100.0,"width":8.0,"fontSize":12.0,"char":"fi"}"#,
        ]);

        let mut glyphs: Vec<PositionedGlyph> = Vec::new();
        let fed = read_glyph_dump(dump.path(), 0, usize::MAX, &mut glyphs).unwrap();

        assert_eq!(fed, 1);
        assert_eq!(glyphs[0].character, "fi");
    }

    #[test]
    fn drops_control_characters() {
        let dump = write_dump(&[
            r#"{"page":0,"x":40.0,"y":100.0,"width":0.0,"fontSize":12.0,"char":"\n"}"#,
            r#"{"page":0,"x":40.0,"y":100.0,"width":5.0,"fontSize":12.0,"char":"x"}"#,
        ]);

        let mut glyphs: Vec<PositionedGlyph> = Vec::new();
        let fed = read_glyph_dump(dump.path(), 0, usize::MAX, &mut glyphs).unwrap();

        assert_eq!(fed, 1);
        assert_eq!(glyphs[0].character, "x");
    }

    #[test]
    fn malformed_line_is_an_error() {
        let dump = write_dump(&["{not json"]);
        let mut glyphs: Vec<PositionedGlyph> = Vec::new();
        let err = read_glyph_dump(dump.path(), 0, usize::MAX, &mut glyphs).unwrap_err();
        assert!(err.to_string().contains("line 1"));
    }
}
