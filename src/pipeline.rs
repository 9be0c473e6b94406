use std::path::{Path, PathBuf};

use anyhow::Result;
use log::info;

use crate::assemble::assemble_paragraphs;
use crate::core::config::Tuning;
use crate::core::model::Screenplay;
use crate::export::{Exporter, JsonExporter, ReportExporter};
use crate::extract::read_glyph_dump;
use crate::layout::LineBuilder;

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub start_page: usize,
    pub end_page: usize,
    pub tuning: Tuning,
}

impl PipelineConfig {
    pub fn new(input: PathBuf, output: PathBuf) -> Self {
        Self {
            input,
            output,
            start_page: 0,
            end_page: usize::MAX,
            tuning: Tuning::default(),
        }
    }
}

/// Runs the full glyph → line → paragraph pipeline over one dump.
pub fn build_screenplay(config: &PipelineConfig) -> Result<Screenplay> {
    let mut builder = LineBuilder::new(config.tuning.vertical_granularity);
    let glyphs = read_glyph_dump(
        &config.input,
        config.start_page,
        config.end_page,
        &mut builder,
    )?;
    info!("read {glyphs} glyphs from {}", config.input.display());

    let lines = builder.build();
    info!("clustered into {} lines", lines.len());

    let paragraphs = assemble_paragraphs(lines, &config.tuning);
    info!("assembled {} paragraphs", paragraphs.len());

    Ok(Screenplay { paragraphs })
}

pub fn export_screenplay(screenplay: &Screenplay, output: &Path) -> Result<()> {
    let json_exporter = JsonExporter::new(output.to_path_buf());
    json_exporter.export(screenplay)?;

    let report_exporter = ReportExporter::new(output.to_path_buf());
    report_exporter.export(screenplay)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::Kind;
    use std::fs;
    use std::io::Write;

    fn write_line_glyphs(file: &mut impl Write, page: usize, y: f32, x0: f32, text: &str) {
        let mut x = x0;
        for c in text.chars() {
            let encoded = serde_json::to_string(&c.to_string()).unwrap();
            writeln!(
                file,
                r#"{{"page":{page},"x":{x:.1},"y":{y:.1},"width":6.0,"fontSize":12.0,"char":{encoded}}}"#
            )
            .unwrap();
            x += 6.0;
        }
    }

    #[test]
    fn pipeline_builds_and_exports() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let dump_path = dir.path().join("dump.jsonl");
        let mut dump = fs::File::create(&dump_path)?;
        write_line_glyphs(&mut dump, 0, 100.0, 40.0, "7 KHT MUTFAK IC GUN");
        write_line_glyphs(&mut dump, 0, 150.0, 110.0, "she waits by the door");
        drop(dump);

        let out = dir.path().join("out");
        let config = PipelineConfig::new(dump_path, out.clone());
        let screenplay = build_screenplay(&config)?;

        assert_eq!(screenplay.paragraphs.len(), 2);
        assert_eq!(screenplay.paragraphs[0].kind, Kind::Scene);
        assert_eq!(screenplay.paragraphs[1].kind, Kind::Action);

        export_screenplay(&screenplay, &out)?;
        assert!(out.join("screenplay.json").exists());
        assert!(out.join("report.txt").exists());

        Ok(())
    }

    #[test]
    fn empty_dump_yields_empty_screenplay() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let dump_path = dir.path().join("empty.jsonl");
        fs::write(&dump_path, "")?;

        let config = PipelineConfig::new(dump_path, dir.path().join("out"));
        let screenplay = build_screenplay(&config)?;
        assert!(screenplay.paragraphs.is_empty());
        Ok(())
    }

    #[test]
    fn page_window_limits_input() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let dump_path = dir.path().join("dump.jsonl");
        let mut dump = fs::File::create(&dump_path)?;
        write_line_glyphs(&mut dump, 0, 100.0, 110.0, "on page zero");
        write_line_glyphs(&mut dump, 5, 100.0, 110.0, "on page five");
        drop(dump);

        let mut config = PipelineConfig::new(dump_path, dir.path().join("out"));
        config.start_page = 5;
        config.end_page = 5;

        let screenplay = build_screenplay(&config)?;
        assert_eq!(screenplay.paragraphs.len(), 1);
        assert_eq!(screenplay.paragraphs[0].page, 5);
        assert_eq!(screenplay.paragraphs[0].text, "on page five");
        Ok(())
    }
}
