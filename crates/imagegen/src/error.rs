/// Errors from building image URLs or loading images.
#[derive(Debug, thiserror::Error)]
pub enum ImageGenError {
    /// The configured base URL cannot carry a path.
    #[error("Invalid image base URL '{0}'")]
    InvalidBaseUrl(String),

    /// The HTTP request itself failed (network, DNS, TLS, body read).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The image host returned a non-2xx status code.
    #[error("Image host returned HTTP {status}")]
    ApiError { status: u16 },

    /// The payload could not be read as an image.
    #[error("Failed to read image bytes: {0}")]
    Read(#[from] std::io::Error),

    /// The payload is not a decodable PNG, JPEG or WebP image.
    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    /// The blocking decode task panicked or was cancelled.
    #[error("Decode task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}
