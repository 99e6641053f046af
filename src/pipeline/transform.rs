//! Decode, resize, and re-encode of image payloads.
//!
//! Decoding and encoding are CPU-bound, so the whole transform runs
//! under `spawn_blocking` and the async caller only awaits the result.

use crate::pipeline::image_type::ImageType;
use crate::pipeline::scaling::{self, BoundingBox};
use crate::pipeline::PipelineError;
use bytes::Bytes;
use image::imageops::FilterType;
use image::GenericImageView;
use std::io::Cursor;

/// Result of one transform: the re-encoded payload plus the sizes it
/// was derived from.
#[derive(Debug)]
pub struct TransformedImage {
    pub body: Bytes,
    pub source_dimensions: (u32, u32),
    pub scaled_dimensions: (u32, u32),
}

/// Probe the payload's natural size, fit it into `bbox`, and re-encode
/// at the scaled size in the original encoding.
pub async fn resize_to_fit(
    body: Bytes,
    image_type: ImageType,
    bbox: BoundingBox,
) -> Result<TransformedImage, PipelineError> {
    tokio::task::spawn_blocking(move || resize_to_fit_sync(&body, image_type, bbox))
        .await
        .map_err(|err| PipelineError::Encoding {
            message: format!("transform task failed: {err}"),
        })?
}

fn resize_to_fit_sync(
    body: &[u8],
    image_type: ImageType,
    bbox: BoundingBox,
) -> Result<TransformedImage, PipelineError> {
    let decoded = image::ImageReader::with_format(Cursor::new(body), image_type.format())
        .decode()
        .map_err(|err| PipelineError::Encoding {
            message: format!("decode failed: {err}"),
        })?;

    let source = decoded.dimensions();
    let scaled = scaling::fit_within(source, bbox)?;

    let thumbnail = decoded.resize_exact(scaled.0, scaled.1, FilterType::Lanczos3);
    let mut buffer = Cursor::new(Vec::new());
    thumbnail
        .write_to(&mut buffer, image_type.format())
        .map_err(|err| PipelineError::Encoding {
            message: format!("encode failed: {err}"),
        })?;

    Ok(TransformedImage {
        body: Bytes::from(buffer.into_inner()),
        source_dimensions: source,
        scaled_dimensions: scaled,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageFormat};

    fn png_bytes(width: u32, height: u32) -> Bytes {
        let img = DynamicImage::new_rgb8(width, height);
        let mut buffer = Cursor::new(Vec::new());
        img.write_to(&mut buffer, ImageFormat::Png).unwrap();
        Bytes::from(buffer.into_inner())
    }

    #[tokio::test]
    async fn resizes_into_default_box() {
        let out = resize_to_fit(png_bytes(800, 600), ImageType::Png, BoundingBox::default())
            .await
            .unwrap();
        assert_eq!(out.source_dimensions, (800, 600));
        assert_eq!(out.scaled_dimensions, (200, 150));

        let round_trip = image::load_from_memory(&out.body).unwrap();
        assert_eq!(round_trip.dimensions(), (200, 150));
    }

    #[tokio::test]
    async fn garbage_payload_is_an_encoding_error() {
        let res = resize_to_fit(
            Bytes::from_static(b"definitely not a png"),
            ImageType::Png,
            BoundingBox::default(),
        )
        .await;
        assert!(matches!(res, Err(PipelineError::Encoding { .. })));
    }
}
