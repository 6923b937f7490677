//! Fetch-and-decode image preloading.
//!
//! Mirrors a browser image element: the load only counts as successful once
//! the bytes have been fetched with a 2xx status and decode as an image.

use std::io::Cursor;

use image::ImageReader;

use crate::error::ImageGenError;

/// Pixel size of a decoded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageDimensions {
    pub width: u32,
    pub height: u32,
}

/// HTTP image loader.
pub struct ImagePreloader {
    client: reqwest::Client,
}

impl ImagePreloader {
    /// Preloader with a fresh [`reqwest::Client`].
    pub fn new() -> Self {
        Self::with_client(reqwest::Client::new())
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Fetch `url` and decode the body. Any failure fails the preload.
    pub async fn preload(&self, url: &str) -> Result<ImageDimensions, ImageGenError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ImageGenError::ApiError {
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await?;
        tracing::trace!(len = bytes.len(), "Image bytes received");

        tokio::task::spawn_blocking(move || decode_dimensions(&bytes)).await?
    }
}

impl Default for ImagePreloader {
    fn default() -> Self {
        Self::new()
    }
}

/// Decode a full image and report its size.
pub fn decode_dimensions(bytes: &[u8]) -> Result<ImageDimensions, ImageGenError> {
    let decoded = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()?
        .decode()?;
    Ok(ImageDimensions {
        width: decoded.width(),
        height: decoded.height(),
    })
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use axum::http::{header, StatusCode};
    use axum::routing::get;
    use axum::Router;
    use image::{ImageFormat, Rgb, RgbImage};

    use super::*;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::from_pixel(width, height, Rgb([134, 239, 172]));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    async fn spawn(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    async fn image_host() -> String {
        let png = png_bytes(8, 6);
        let router = Router::new()
            .route(
                "/ok.png",
                get(move || {
                    let png = png.clone();
                    async move { ([(header::CONTENT_TYPE, "image/png")], png) }
                }),
            )
            .route("/garbage", get(|| async { "definitely not an image" }))
            .route(
                "/missing",
                get(|| async { (StatusCode::NOT_FOUND, "nope") }),
            );
        spawn(router).await
    }

    #[test]
    fn decode_reports_dimensions() {
        assert_eq!(
            decode_dimensions(&png_bytes(3, 2)).unwrap(),
            ImageDimensions { width: 3, height: 2 }
        );
    }

    #[test]
    fn decode_rejects_empty_payload() {
        assert!(decode_dimensions(&[]).is_err());
    }

    #[tokio::test]
    async fn preload_succeeds_for_decodable_image() {
        let base = image_host().await;
        let dims = ImagePreloader::new()
            .preload(&format!("{base}/ok.png"))
            .await
            .unwrap();
        assert_eq!(dims, ImageDimensions { width: 8, height: 6 });
    }

    #[tokio::test]
    async fn preload_fails_on_http_error() {
        let base = image_host().await;
        let err = ImagePreloader::new()
            .preload(&format!("{base}/missing"))
            .await
            .unwrap_err();
        assert_matches!(err, ImageGenError::ApiError { status: 404 });
    }

    #[tokio::test]
    async fn preload_fails_on_undecodable_body() {
        let base = image_host().await;
        let err = ImagePreloader::new()
            .preload(&format!("{base}/garbage"))
            .await
            .unwrap_err();
        assert_matches!(err, ImageGenError::Decode(_));
    }

    #[tokio::test]
    async fn preload_fails_when_host_is_down() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = ImagePreloader::new()
            .preload(&format!("http://{addr}/ok.png"))
            .await
            .unwrap_err();
        assert_matches!(err, ImageGenError::Request(_));
    }
}
