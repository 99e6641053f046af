//! Image type resolution from object keys.
//!
//! The pipeline only re-encodes into the encoding the source arrived
//! in, so the type must be resolvable from the key before any I/O is
//! issued.

use crate::pipeline::PipelineError;
use image::ImageFormat;

/// The two encodings the pipeline supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageType {
    Jpg,
    Png,
}

impl ImageType {
    /// Resolve the type from the extension following the last `.` in
    /// the key. Matching is exact and case-sensitive.
    pub fn from_key(key: &str) -> Result<Self, PipelineError> {
        let ext = match key.rsplit_once('.') {
            Some((_, ext)) if !ext.is_empty() => ext,
            _ => {
                return Err(PipelineError::UnresolvedType {
                    key: key.to_string(),
                });
            }
        };

        match ext {
            "jpg" => Ok(Self::Jpg),
            "png" => Ok(Self::Png),
            other => Err(PipelineError::UnsupportedType {
                extension: other.to_string(),
            }),
        }
    }

    pub fn format(self) -> ImageFormat {
        match self {
            Self::Jpg => ImageFormat::Jpeg,
            Self::Png => ImageFormat::Png,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_supported_extensions() {
        assert_eq!(ImageType::from_key("photos/cat.jpg").unwrap(), ImageType::Jpg);
        assert_eq!(ImageType::from_key("a.png").unwrap(), ImageType::Png);
        assert_eq!(ImageType::from_key("a.b.c.png").unwrap(), ImageType::Png);
    }

    #[test]
    fn key_without_extension_is_unresolved() {
        assert!(matches!(
            ImageType::from_key("photos/cat"),
            Err(PipelineError::UnresolvedType { .. })
        ));
        assert!(matches!(
            ImageType::from_key("trailing-dot."),
            Err(PipelineError::UnresolvedType { .. })
        ));
    }

    #[test]
    fn unknown_extension_is_unsupported() {
        assert!(matches!(
            ImageType::from_key("docs/report.pdf"),
            Err(PipelineError::UnsupportedType { .. })
        ));
        // Matching is case-sensitive.
        assert!(matches!(
            ImageType::from_key("photos/cat.JPG"),
            Err(PipelineError::UnsupportedType { .. })
        ));
        assert!(matches!(
            ImageType::from_key("photos/cat.jpeg"),
            Err(PipelineError::UnsupportedType { .. })
        ));
    }
}
