pub mod assemble;
pub mod classify;
pub mod core;
pub mod export;
pub mod extract;
pub mod layout;
pub mod pipeline;

pub use crate::core::config::Tuning;
pub use crate::core::model::{Kind, Paragraph, PositionedGlyph, Screenplay, TextLine};
