pub mod assembler;
pub mod style;

pub use assembler::assemble_paragraphs;
pub use style::encode_style;
