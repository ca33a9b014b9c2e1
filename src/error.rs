use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

/// Failures raised while turning SVG markup into encoded PNG bytes.
#[derive(Error, Debug)]
pub enum RasterError {
    #[error("failed to parse SVG: {0}")]
    Parse(#[from] usvg::Error),

    #[error("cannot allocate a {width}x{height} pixmap")]
    Pixmap { width: u32, height: u32 },

    #[error("SVG has an empty canvas")]
    EmptyCanvas,

    #[error("failed to encode PNG: {0}")]
    Encode(String),
}

#[derive(Error, Debug)]
pub enum NodeError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("rasterization failed: {0}")]
    Rasterization(#[from] RasterError),

    #[error("failed to decode rasterized image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("unexpected pixel buffer shape: {0}")]
    Shape(#[from] ndarray::ShapeError),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl ResponseError for NodeError {
    fn status_code(&self) -> StatusCode {
        match self {
            NodeError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            NodeError::Rasterization(RasterError::Parse(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.to_string(),
        })
    }
}
