use image::ImageFormat;
use ndarray::{Array3, Axis};

use crate::error::NodeError;
use crate::utils::ImageTensor;

/// Pixel layout requested from the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    Rgb,
    Rgba,
}

impl ColorMode {
    pub fn from_transparency(transparency: bool) -> Self {
        if transparency {
            ColorMode::Rgba
        } else {
            ColorMode::Rgb
        }
    }

    pub fn channels(self) -> usize {
        match self {
            ColorMode::Rgb => 3,
            ColorMode::Rgba => 4,
        }
    }
}

/// Decodes PNG bytes into a `(1, C, H, W)` tensor with values in `[0, 1]`.
///
/// Grayscale or palette images are widened to `mode` by the decoder, so the
/// interleaved buffer is always `H * W * C` long.
pub fn png_to_tensor(png: &[u8], mode: ColorMode) -> Result<ImageTensor, NodeError> {
    let decoded = image::load_from_memory_with_format(png, ImageFormat::Png)?;
    let (width, height) = (decoded.width() as usize, decoded.height() as usize);
    let raw = match mode {
        ColorMode::Rgb => decoded.into_rgb8().into_raw(),
        ColorMode::Rgba => decoded.into_rgba8().into_raw(),
    };

    let hwc = Array3::from_shape_vec((height, width, mode.channels()), raw)?;
    let chw = hwc.mapv(|v| v as f32 / 255.0).permuted_axes([2, 0, 1]);

    Ok(chw.insert_axis(Axis(0)).as_standard_layout().into_owned())
}
