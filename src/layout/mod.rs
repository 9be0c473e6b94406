pub mod line_builder;

pub use line_builder::LineBuilder;
