use std::fs;
use std::path::PathBuf;

use anyhow::Result;

use crate::core::model::Screenplay;
use crate::export::Exporter;

/// Human-readable dump: one `PARA_{i} [{style}]` header per paragraph
/// followed by its body.
#[derive(Debug, Clone)]
pub struct ReportExporter {
    out_dir: PathBuf,
}

impl ReportExporter {
    pub fn new(out_dir: PathBuf) -> Self {
        Self { out_dir }
    }
}

impl Exporter for ReportExporter {
    fn export(&self, screenplay: &Screenplay) -> Result<()> {
        fs::create_dir_all(&self.out_dir)?;

        let mut report = String::new();
        for paragraph in &screenplay.paragraphs {
            report.push_str(&format!(
                "PARA_{} [{}] p{}\n{}\n\n",
                paragraph.index, paragraph.style, paragraph.page, paragraph.text
            ));
        }

        let path = self.out_dir.join("report.txt");
        fs::write(path, report)?;
        Ok(())
    }
}
