pub mod schema;
pub mod svg_preview;
