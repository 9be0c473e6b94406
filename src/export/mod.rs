pub mod json_export;
pub mod report_export;

use anyhow::Result;

use crate::core::model::Screenplay;

pub use json_export::JsonExporter;
pub use report_export::ReportExporter;

pub trait Exporter {
    fn export(&self, screenplay: &Screenplay) -> Result<()>;
}
