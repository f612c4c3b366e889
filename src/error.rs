//! Error type shared by the mask session and renderer

/// Errors surfaced at the session boundary
///
/// None of these are fatal: a failed load or export leaves the session
/// exactly as it was before the call.
#[derive(Debug, thiserror::Error)]
pub enum MaskError {
    /// The uploaded bytes could not be decoded as a raster image
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    /// The bytes are a valid image of a format the surface does not accept
    #[error("unsupported image format: {0}")]
    UnsupportedFormat(String),

    /// The decoded image reports a zero width or height
    #[error("image has zero width or height")]
    EmptyImage,

    /// No image is loaded yet, or a decode is still pending
    #[error("no image loaded")]
    NotReady,

    /// The rendered buffer could not be encoded
    #[error("failed to encode image: {0}")]
    Encode(#[from] png::EncodingError),

    /// The background decode task panicked or was cancelled
    #[error("decode task failed: {0}")]
    DecodeTask(String),
}

impl MaskError {
    /// Whether this error means the upload itself was rejected
    pub fn is_decode_error(&self) -> bool {
        matches!(
            self,
            MaskError::Decode(_) | MaskError::UnsupportedFormat(_) | MaskError::EmptyImage
        )
    }
}

pub type Result<T> = std::result::Result<T, MaskError>;
