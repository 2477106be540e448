//! Immutable template image sources.

use std::path::{Path, PathBuf};

use image::DynamicImage;

use crate::error::{LocatorError, LocatorResult};

/// An encoded template image, loaded once and shared read-only across
/// searches.
///
/// Decoding is deferred until the first search so that building a resource
/// from an in-memory buffer can never fail; corrupt bytes surface as a
/// decode error when the template is actually used.
#[derive(Debug, Clone)]
pub struct ImageResource {
    bytes: Vec<u8>,
    path: Option<PathBuf>,
}

impl ImageResource {
    /// Read an encoded image file.
    pub async fn load(path: impl AsRef<Path>) -> LocatorResult<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| LocatorError::TemplateRead {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(Self {
            bytes,
            path: Some(path.to_path_buf()),
        })
    }

    /// Blocking equivalent of [`ImageResource::load`].
    pub fn load_sync(path: impl AsRef<Path>) -> LocatorResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| LocatorError::TemplateRead {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self {
            bytes,
            path: Some(path.to_path_buf()),
        })
    }

    /// Wrap an already encoded image buffer. No origin path is recorded.
    pub fn from_buffer(bytes: Vec<u8>) -> Self {
        Self { bytes, path: None }
    }

    /// Origin path, when the resource was loaded from a file.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub(crate) fn decode(&self) -> LocatorResult<DynamicImage> {
        let image = image::load_from_memory(&self.bytes)?;
        log::debug!(
            "decoded {}x{} template{}",
            image.width(),
            image.height(),
            self.path
                .as_ref()
                .map(|p| format!(" from {}", p.display()))
                .unwrap_or_default()
        );
        Ok(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, RgbaImage};
    use std::io::Cursor;

    fn encoded_png() -> Vec<u8> {
        let image = RgbaImage::from_pixel(4, 4, image::Rgba([10, 20, 30, 255]));
        let mut buffer = Cursor::new(Vec::new());
        image.write_to(&mut buffer, ImageFormat::Png).unwrap();
        buffer.into_inner()
    }

    #[test]
    fn from_buffer_records_no_path() {
        let resource = ImageResource::from_buffer(encoded_png());
        assert!(resource.path().is_none());
        assert!(!resource.as_bytes().is_empty());
    }

    #[test]
    fn decode_round_trips_dimensions() {
        let resource = ImageResource::from_buffer(encoded_png());
        let image = resource.decode().unwrap();
        assert_eq!((image.width(), image.height()), (4, 4));
    }

    #[test]
    fn corrupt_bytes_fail_at_decode_not_construction() {
        let resource = ImageResource::from_buffer(vec![0xde, 0xad, 0xbe, 0xef]);
        let err = resource.decode().unwrap_err();
        assert!(matches!(err, LocatorError::TemplateDecode { .. }));
    }

    #[tokio::test]
    async fn load_missing_file_reports_read_error() {
        let err = ImageResource::load("/nonexistent/template.png")
            .await
            .unwrap_err();
        assert!(matches!(err, LocatorError::TemplateRead { .. }));
    }

    #[test]
    fn load_sync_missing_file_reports_read_error() {
        let err = ImageResource::load_sync("/nonexistent/template.png").unwrap_err();
        assert!(matches!(err, LocatorError::TemplateRead { .. }));
    }
}
