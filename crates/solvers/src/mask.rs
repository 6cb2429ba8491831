//! Mass masks from raster images.
//!
//! This module is feature-gated behind `png` (default on) so that library
//! users who only pass grids do not pull in the `image` crate.

use gravfield_core::{FieldError, Mask};
use image::{DynamicImage, GenericImageView};
use std::path::Path;

/// Converts an image into a mask, one cell per pixel.
///
/// Images with an alpha channel use it as the intensity, so a shape drawn on
/// a transparent background becomes the mass. Opaque images use their luma.
/// Image rows map to grid rows.
pub fn mask_from_image(img: &DynamicImage) -> Result<Mask, FieldError> {
    let (width, height) = img.dimensions();
    let (rows, cols) = (height as usize, width as usize);
    let data = if img.color().has_alpha() {
        img.to_luma_alpha8().pixels().map(|p| p.0[1]).collect::<Vec<u8>>()
    } else {
        img.to_luma8().into_raw()
    };
    Mask::from_data(rows, cols, data)
}

/// Reads an image file and converts it with [`mask_from_image`].
///
/// Returns `FieldError::Io` if the file cannot be opened or decoded.
pub fn load_mask(path: &Path) -> Result<Mask, FieldError> {
    let img = image::open(path).map_err(|e| FieldError::Io(e.to_string()))?;
    log::debug!(
        "loaded mask {}: {:?}, {:?}",
        path.display(),
        img.dimensions(),
        img.color()
    );
    mask_from_image(&img)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgba, RgbaImage};

    #[test]
    fn opaque_image_uses_luma() {
        let img = GrayImage::from_fn(4, 3, |x, y| Luma([if x == 1 && y == 2 { 255 } else { 0 }]));
        let mask = mask_from_image(&DynamicImage::ImageLuma8(img)).unwrap();
        assert_eq!((mask.rows(), mask.cols()), (3, 4));
        assert_eq!(mask.data()[2 * 4 + 1], 255);
        assert_eq!(mask.data().iter().filter(|&&v| v != 0).count(), 1);
    }

    #[test]
    fn alpha_channel_takes_precedence() {
        // White everywhere; only the alpha channel marks the shape.
        let img = RgbaImage::from_fn(3, 3, |x, y| {
            Rgba([255, 255, 255, if x == y { 255 } else { 0 }])
        });
        let mask = mask_from_image(&DynamicImage::ImageRgba8(img)).unwrap();
        let grid = mask.to_grid().unwrap();
        for r in 0..3 {
            for c in 0..3 {
                let expected = if r == c { 1.0 } else { 0.0 };
                assert_eq!(grid.get(r, c), expected, "cell ({r}, {c})");
            }
        }
    }

    #[test]
    fn load_mask_round_trip() {
        let img = GrayImage::from_fn(8, 5, |x, _| Luma([if x < 4 { 255 } else { 0 }]));
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mask.png");
        img.save(&path).unwrap();

        let mask = load_mask(&path).unwrap();
        assert_eq!((mask.rows(), mask.cols()), (5, 8));
        assert_eq!(mask.data(), img.as_raw().as_slice());
    }

    #[test]
    fn load_mask_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_mask(&dir.path().join("missing.png"));
        assert!(matches!(result, Err(FieldError::Io(_))));
    }
}
