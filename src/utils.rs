use ndarray::Array4;

pub mod png_to_tensor;
pub mod svg_to_png;

/// Image tensor in NCHW layout (batch, channels, height, width), values in `[0, 1]`.
pub type ImageTensor = Array4<f32>;
