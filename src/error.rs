use thiserror::Error;

use crate::object_table::ObjectId;

/// Errors produced by canvas operations.
///
/// None of these are fatal: callers log them and leave the document untouched.
#[derive(Error, Debug)]
pub enum CanvasError {
    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Pixel buffer has {actual} bytes, expected {expected}")]
    PixelBufferMismatch { expected: usize, actual: usize },

    #[error("Invalid image dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("Text content is empty")]
    EmptyText,

    #[error("No object with id {0}")]
    UnknownObject(ObjectId),

    #[error("Cannot {operation} a {element_type} object")]
    Unsupported {
        operation: &'static str,
        element_type: &'static str,
    },
}

pub type CanvasResult<T> = Result<T, CanvasError>;
