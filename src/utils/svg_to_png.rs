use std::sync::Arc;

use resvg::render;
use resvg::usvg::{Options, Tree};
use tiny_skia::{Color, Pixmap};
use usvg::fontdb::Database;

use crate::config::ServerConfig;
use crate::error::RasterError;

/// Converts SVG markup into encoded PNG bytes at a fixed pixel size.
pub trait SvgBackend {
    /// `background` is composited under the drawing; `None` keeps the source transparency.
    fn svg_to_png(&self, svg_data: &str, w: u32, h: u32, background: Option<Color>) -> Result<Vec<u8>, RasterError>;
}

#[derive(Clone)]
pub struct ResvgBackend {
    fonts: Arc<Database>,
}

impl ResvgBackend {
    pub fn new(fonts: Database) -> Self {
        ResvgBackend { fonts: Arc::new(fonts) }
    }

    pub fn from_config(config: &ServerConfig) -> Self {
        let mut fonts = Database::new();
        if config.load_system_fonts {
            fonts.load_system_fonts();
        }
        if let Some(dir) = &config.font_dir {
            fonts.load_fonts_dir(dir);
        }
        log::info!("font database ready with {} faces", fonts.len());
        Self::new(fonts)
    }
}

impl Default for ResvgBackend {
    fn default() -> Self {
        Self::new(Database::new())
    }
}

impl SvgBackend for ResvgBackend {
    fn svg_to_png(&self, svg_data: &str, w: u32, h: u32, background: Option<Color>) -> Result<Vec<u8>, RasterError> {
        let opt = Options {
            fontdb: self.fonts.clone(),
            ..Options::default()
        };
        let rtree = Tree::from_str(svg_data, &opt)?;

        let size = rtree.size();
        if size.width() <= 0.0 || size.height() <= 0.0 {
            return Err(RasterError::EmptyCanvas);
        }
        let scale_x = w as f32 / size.width();
        let scale_y = h as f32 / size.height();

        let mut pixmap = Pixmap::new(w, h).ok_or(RasterError::Pixmap { width: w, height: h })?;
        if let Some(color) = background {
            pixmap.fill(color);
        }

        render(&rtree, tiny_skia::Transform::from_scale(scale_x, scale_y), &mut pixmap.as_mut());

        pixmap.encode_png().map_err(|e| RasterError::Encode(e.to_string()))
    }
}
