pub mod element;
pub mod normalize;
pub mod scene;

pub use element::classify_line;
pub use normalize::normalize_line;
pub use scene::score_scene;
