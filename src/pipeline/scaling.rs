//! Pure fit-within-box scaling calculations.
//!
//! No I/O here; everything is testable with plain numbers.

use crate::pipeline::PipelineError;
use std::collections::HashMap;

/// Default box a thumbnail must fit within when the source object
/// carries no usable `width`/`height` metadata.
pub const DEFAULT_MAX_WIDTH: u32 = 200;
pub const DEFAULT_MAX_HEIGHT: u32 = 200;

/// Maximum width/height pair a thumbnail must fit within.
///
/// Both sides are always positive: metadata values that are missing,
/// non-numeric, or zero fall back to the defaults per side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub max_width: u32,
    pub max_height: u32,
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self {
            max_width: DEFAULT_MAX_WIDTH,
            max_height: DEFAULT_MAX_HEIGHT,
        }
    }
}

impl BoundingBox {
    /// Resolve the box from object metadata.
    ///
    /// Reads the `width` and `height` keys as positive integers; each
    /// side independently falls back to its default when the key is
    /// missing or unparsable.
    pub fn from_metadata(metadata: &HashMap<String, String>) -> Self {
        Self {
            max_width: parse_side(metadata.get("width")).unwrap_or(DEFAULT_MAX_WIDTH),
            max_height: parse_side(metadata.get("height")).unwrap_or(DEFAULT_MAX_HEIGHT),
        }
    }
}

fn parse_side(value: Option<&String>) -> Option<u32> {
    value.and_then(|v| v.parse::<u32>().ok()).filter(|v| *v > 0)
}

/// Compute target dimensions that fit entirely within `bbox` while
/// preserving the source aspect ratio.
///
/// A single scaling factor min(maxW/srcW, maxH/srcH) is applied to both
/// sides, rounded to the nearest pixel with a floor of 1px per side.
/// Fails when a source dimension is zero (size probing failed or the
/// payload is degenerate).
pub fn fit_within(
    source: (u32, u32),
    bbox: BoundingBox,
) -> Result<(u32, u32), PipelineError> {
    let (src_w, src_h) = source;
    if src_w == 0 || src_h == 0 {
        return Err(PipelineError::InvalidDimensions {
            width: src_w,
            height: src_h,
        });
    }

    let factor = f64::min(
        bbox.max_width as f64 / src_w as f64,
        bbox.max_height as f64 / src_h as f64,
    );

    let width = ((src_w as f64 * factor).round() as u32).max(1);
    let height = ((src_h as f64 * factor).round() as u32).max(1);
    Ok((width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn landscape_into_default_box() {
        // 800x600 into 200x200: factor 0.25
        let dims = fit_within((800, 600), BoundingBox::default()).unwrap();
        assert_eq!(dims, (200, 150));
    }

    #[test]
    fn tall_source_into_square_box() {
        // 50x200 into 100x100: factor min(2.0, 0.5) = 0.5
        let bbox = BoundingBox {
            max_width: 100,
            max_height: 100,
        };
        assert_eq!(fit_within((50, 200), bbox).unwrap(), (25, 100));
    }

    #[test]
    fn zero_source_dimension_fails() {
        assert!(matches!(
            fit_within((0, 600), BoundingBox::default()),
            Err(PipelineError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            fit_within((800, 0), BoundingBox::default()),
            Err(PipelineError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn never_exceeds_box_and_keeps_ratio() {
        let sources = [(1, 1), (3, 7), (199, 200), (201, 200), (4000, 50), (33, 4097)];
        let boxes = [(200, 200), (1, 1), (64, 480), (1000, 3)];
        for &(w, h) in &sources {
            for &(bw, bh) in &boxes {
                let bbox = BoundingBox {
                    max_width: bw,
                    max_height: bh,
                };
                let (tw, th) = fit_within((w, h), bbox).unwrap();
                assert!(tw >= 1 && th >= 1);
                assert!(tw <= bw, "{}x{} in {}x{} gave {}x{}", w, h, bw, bh, tw, th);
                assert!(th <= bh, "{}x{} in {}x{} gave {}x{}", w, h, bw, bh, tw, th);

                // Aspect ratio within one-pixel rounding tolerance on
                // either side, except where the 1px floor kicked in.
                let factor = f64::min(bw as f64 / w as f64, bh as f64 / h as f64);
                if (w as f64 * factor).round() >= 1.0 && (h as f64 * factor).round() >= 1.0 {
                    assert!((tw as f64 - w as f64 * factor).abs() <= 0.5 + f64::EPSILON);
                    assert!((th as f64 - h as f64 * factor).abs() <= 0.5 + f64::EPSILON);
                }
            }
        }
    }

    #[test]
    fn tiny_source_scales_up_to_fill_box() {
        // The single-factor policy also scales up small sources.
        let dims = fit_within((10, 20), BoundingBox::default()).unwrap();
        assert_eq!(dims, (100, 200));
    }

    #[test]
    fn bounding_box_from_metadata_defaults() {
        assert_eq!(BoundingBox::from_metadata(&HashMap::new()), BoundingBox::default());
    }

    #[test]
    fn bounding_box_reads_width_and_height_keys() {
        let mut meta = HashMap::new();
        meta.insert("width".to_string(), "100".to_string());
        meta.insert("height".to_string(), "50".to_string());
        assert_eq!(
            BoundingBox::from_metadata(&meta),
            BoundingBox {
                max_width: 100,
                max_height: 50
            }
        );
    }

    #[test]
    fn malformed_or_zero_sides_fall_back_independently() {
        let mut meta = HashMap::new();
        meta.insert("width".to_string(), "not-a-number".to_string());
        meta.insert("height".to_string(), "300".to_string());
        assert_eq!(
            BoundingBox::from_metadata(&meta),
            BoundingBox {
                max_width: DEFAULT_MAX_WIDTH,
                max_height: 300
            }
        );

        meta.insert("height".to_string(), "0".to_string());
        assert_eq!(BoundingBox::from_metadata(&meta), BoundingBox::default());

        meta.insert("height".to_string(), "-20".to_string());
        assert_eq!(BoundingBox::from_metadata(&meta), BoundingBox::default());
    }
}
