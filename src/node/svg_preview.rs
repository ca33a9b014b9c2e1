use serde::Serialize;
use tiny_skia::Color;

use crate::error::NodeError;
use crate::node::schema::{NodeParams, NodeSchema, ValueKind};
use crate::utils::png_to_tensor::{png_to_tensor, ColorMode};
use crate::utils::svg_to_png::{ResvgBackend, SvgBackend};
use crate::utils::ImageTensor;

/// One value produced by a node, flattened in row-major NCHW order.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct NodeOutput {
    #[serde(rename = "type")]
    pub kind: ValueKind,
    pub shape: Vec<usize>,
    pub data: Vec<f32>,
}

impl NodeOutput {
    pub fn image(tensor: &ImageTensor) -> Self {
        NodeOutput {
            kind: ValueKind::Image,
            shape: tensor.shape().to_vec(),
            data: tensor.iter().copied().collect(),
        }
    }
}

/// Rasterizes one SVG document into an image tensor.
pub struct SvgPreview<B: SvgBackend = ResvgBackend> {
    backend: B,
}

impl<B: SvgBackend> SvgPreview<B> {
    pub fn new(backend: B) -> Self {
        SvgPreview { backend }
    }

    pub fn schema() -> NodeSchema {
        NodeSchema::svg_preview()
    }

    /// Renders `svg_text` to a `(1, C, H, W)` tensor, `C` being 4 with
    /// `transparent` and 3 (composited on white) without.
    pub fn rasterize(&self, svg_text: &str, width: u32, height: u32, transparent: bool) -> Result<ImageTensor, NodeError> {
        let png = self.render_png(svg_text, width, height, transparent)?;
        png_to_tensor(&png, ColorMode::from_transparency(transparent))
    }

    /// PNG bytes for the host's thumbnail, rendered exactly like [`Self::rasterize`].
    pub fn preview_png(&self, params: &NodeParams) -> Result<Vec<u8>, NodeError> {
        self.render_png(&params.svg_input, params.width, params.height, params.transparency)
    }

    pub fn execute(&self, params: &NodeParams) -> Result<NodeOutput, NodeError> {
        let tensor = self.rasterize(&params.svg_input, params.width, params.height, params.transparency)?;
        Ok(NodeOutput::image(&tensor))
    }

    fn render_png(&self, svg_text: &str, width: u32, height: u32, transparent: bool) -> Result<Vec<u8>, NodeError> {
        if svg_text.trim().is_empty() {
            log::warn!("rejected blank SVG input");
            return Err(NodeError::InvalidInput("SVG input is empty!".to_string()));
        }
        log::debug!(
            "rasterizing {} bytes of SVG at {}x{} (transparency: {})",
            svg_text.len(),
            width,
            height,
            transparent
        );

        let background = if transparent { None } else { Some(Color::WHITE) };
        Ok(self.backend.svg_to_png(svg_text, width, height, background)?)
    }
}

impl Default for SvgPreview {
    fn default() -> Self {
        SvgPreview::new(ResvgBackend::default())
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::error::RasterError;

    const RED_SQUARE: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10"><rect width="10" height="10" fill="red"/></svg>"#;

    fn node() -> SvgPreview {
        SvgPreview::default()
    }

    struct CountingBackend {
        calls: Cell<usize>,
    }

    impl SvgBackend for CountingBackend {
        fn svg_to_png(&self, _: &str, _: u32, _: u32, _: Option<Color>) -> Result<Vec<u8>, RasterError> {
            self.calls.set(self.calls.get() + 1);
            Err(RasterError::EmptyCanvas)
        }
    }

    #[test]
    fn opaque_red_square() {
        let tensor = node().rasterize(RED_SQUARE, 10, 10, false).unwrap();
        assert_eq!(tensor.shape(), &[1, 3, 10, 10]);
        assert!((tensor[[0, 0, 0, 0]] - 1.0).abs() < 0.01);
        assert!(tensor[[0, 1, 0, 0]].abs() < 0.01);
        assert!(tensor[[0, 2, 0, 0]].abs() < 0.01);
    }

    #[test]
    fn transparent_red_square_is_fully_opaque() {
        let tensor = node().rasterize(RED_SQUARE, 10, 10, true).unwrap();
        assert_eq!(tensor.shape(), &[1, 4, 10, 10]);
        assert!(tensor.index_axis(ndarray::Axis(1), 3).iter().all(|&a| (a - 1.0).abs() < 0.01));
    }

    #[test]
    fn shape_follows_requested_size() {
        let node = node();
        for (w, h) in [(16, 16), (64, 16), (16, 200), (300, 120), (16, 2048), (2048, 2048)] {
            let tensor = node.rasterize(RED_SQUARE, w, h, true).unwrap();
            assert_eq!(tensor.shape(), &[1, 4, h as usize, w as usize]);
        }
    }

    #[test]
    fn values_stay_normalized() {
        let svg = r##"<svg xmlns="http://www.w3.org/2000/svg" width="20" height="20">
            <circle cx="10" cy="10" r="7" fill="#3a7bd5" fill-opacity="0.5"/>
        </svg>"##;
        let node = node();
        for transparent in [true, false] {
            let tensor = node.rasterize(svg, 33, 21, transparent).unwrap();
            assert!(tensor.iter().all(|v| (0.0..=1.0).contains(v)));
        }
    }

    #[test]
    fn repeated_calls_match() {
        let node = node();
        let first = node.rasterize(RED_SQUARE, 48, 32, true).unwrap();
        let second = node.rasterize(RED_SQUARE, 48, 32, true).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn blank_input_never_reaches_backend() {
        let node = SvgPreview::new(CountingBackend { calls: Cell::new(0) });
        for blank in ["", "   ", "\n\t "] {
            let err = node.rasterize(blank, 10, 10, false).unwrap_err();
            assert!(matches!(err, NodeError::InvalidInput(_)));
        }
        assert!(matches!(node.preview_png(&NodeParams::default()), Err(NodeError::InvalidInput(_))));
        assert_eq!(node.backend.calls.get(), 0);
    }

    #[test]
    fn backend_failures_propagate() {
        let node = SvgPreview::new(CountingBackend { calls: Cell::new(0) });
        let err = node.rasterize(RED_SQUARE, 10, 10, false).unwrap_err();
        assert!(matches!(err, NodeError::Rasterization(RasterError::EmptyCanvas)));
        assert_eq!(node.backend.calls.get(), 1);
    }

    #[test]
    fn malformed_svg_is_a_rasterization_failure() {
        let err = node().rasterize("<svg><g></svg>", 10, 10, true).unwrap_err();
        assert!(matches!(err, NodeError::Rasterization(RasterError::Parse(_))));
    }

    #[test]
    fn execute_wraps_a_single_image() {
        let params = NodeParams {
            svg_input: RED_SQUARE.to_string(),
            width: 2,
            height: 2,
            transparency: false,
        };
        let output = node().execute(&params).unwrap();
        assert_eq!(output.kind, ValueKind::Image);
        assert_eq!(output.shape, vec![1, 3, 2, 2]);
        assert_eq!(output.data.len(), 12);
        assert!(output.data[..4].iter().all(|&r| (r - 1.0).abs() < 0.01));
        assert!(output.data[4..].iter().all(|&gb| gb < 0.01));
    }
}
