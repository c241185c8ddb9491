//! Drawing helpers over [`image::RgbImage`] plus the grayscale/threshold step
//! that turns a maze picture back into the boolean bitmap
//! [`RasterGraph`](crate::raster::RasterGraph) consumes.

use std::io::Cursor;

use image::{ImageFormat, Rgb, RgbImage};
use tracing::debug;

use crate::error::{MazeError, Result};

pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
pub const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

/// Pixels brighter than this are path, everything else is wall.
pub const PATH_THRESHOLD: u8 = 128;

/// Filled rectangle between two corners, both included. Pixels outside the
/// image are clipped.
pub fn fill_rect(
    img: &mut RgbImage,
    (x1, y1): (u32, u32),
    (x2, y2): (u32, u32),
    color: Rgb<u8>,
) {
    let (width, height) = img.dimensions();
    for y in y1.min(y2)..=y1.max(y2) {
        for x in x1.min(x2)..=x1.max(x2) {
            if x < width && y < height {
                img.put_pixel(x, y, color);
            }
        }
    }
}

/// Horizontal or vertical line, both endpoints included.
pub fn line(img: &mut RgbImage, from: (u32, u32), to: (u32, u32), color: Rgb<u8>) {
    debug_assert!(
        from.0 == to.0 || from.1 == to.1,
        "only axis-aligned lines are supported"
    );
    fill_rect(img, from, to, color);
}

/// ITU-R 601-2 luma, the same weights PIL's `convert("L")` uses.
pub fn luma(Rgb([r, g, b]): Rgb<u8>) -> u8 {
    ((r as u32 * 299 + g as u32 * 587 + b as u32 * 114) / 1000) as u8
}

/// Row-major boolean bitmap: `true` where luma is above `threshold`.
pub fn binarize(img: &RgbImage, threshold: u8) -> Vec<Vec<bool>> {
    let (width, height) = img.dimensions();
    (0..height)
        .map(|y| {
            (0..width)
                .map(|x| luma(*img.get_pixel(x, y)) > threshold)
                .collect()
        })
        .collect()
}

/// Decodes any format the `image` crate recognises from its magic bytes.
pub fn decode(bytes: &[u8]) -> Result<RgbImage> {
    let img = image::load_from_memory(bytes).map_err(|e| MazeError::MalformedImage {
        reason: e.to_string(),
    })?;
    debug!(
        width = img.width(),
        height = img.height(),
        color = ?img.color(),
        "image decoded"
    );
    Ok(img.to_rgb8())
}

pub fn encode(img: &RgbImage, format: ImageFormat) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), format)
        .map_err(|e| MazeError::MalformedImage {
            reason: e.to_string(),
        })?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_include_both_endpoints() {
        let mut img = RgbImage::from_pixel(5, 4, WHITE);
        line(&mut img, (1, 2), (3, 2), BLACK);
        assert_eq!(*img.get_pixel(0, 2), WHITE);
        assert_eq!(*img.get_pixel(1, 2), BLACK);
        assert_eq!(*img.get_pixel(3, 2), BLACK);
        assert_eq!(*img.get_pixel(4, 2), WHITE);

        line(&mut img, (4, 3), (4, 0), BLACK);
        assert!((0..4).all(|y| *img.get_pixel(4, y) == BLACK));
    }

    #[test]
    fn drawing_past_the_edge_is_clipped() {
        let mut img = RgbImage::from_pixel(3, 3, WHITE);
        fill_rect(&mut img, (2, 2), (9, 9), BLACK);
        assert_eq!(*img.get_pixel(2, 2), BLACK);
        assert_eq!(*img.get_pixel(1, 1), WHITE);
    }

    #[test]
    fn binarize_uses_strict_threshold() {
        let mut img = RgbImage::from_pixel(3, 1, WHITE);
        img.put_pixel(0, 0, Rgb([128, 128, 128]));
        img.put_pixel(1, 0, Rgb([129, 129, 129]));
        img.put_pixel(2, 0, Rgb([0, 255, 0]));
        assert_eq!(luma(Rgb([0, 255, 0])), 149);
        assert_eq!(binarize(&img, PATH_THRESHOLD), vec![vec![false, true, true]]);
    }

    #[test]
    fn png_round_trips() {
        let mut img = RgbImage::from_pixel(3, 2, WHITE);
        img.put_pixel(1, 1, Rgb([10, 20, 30]));
        let bytes = encode(&img, ImageFormat::Png).unwrap();
        assert_eq!(decode(&bytes).unwrap(), img);
    }

    #[test]
    fn decodes_graymap() {
        let mut bytes = b"P5\n2 2\n255\n".to_vec();
        bytes.extend_from_slice(&[0, 255, 200, 7]);
        let img = decode(&bytes).unwrap();
        assert_eq!(img.dimensions(), (2, 2));
        assert_eq!(*img.get_pixel(1, 0), WHITE);
        assert_eq!(*img.get_pixel(1, 1), Rgb([7, 7, 7]));
    }

    #[test]
    fn oversized_header_is_an_error_not_a_panic() {
        let result = decode(b"P6\n4294967296 4294967296\n255\n\x00");
        assert!(matches!(result, Err(MazeError::MalformedImage { .. })));
    }

    #[test]
    fn rejects_garbage_and_short_data() {
        assert!(matches!(
            decode(b"not an image"),
            Err(MazeError::MalformedImage { .. })
        ));
        assert!(matches!(
            decode(b"P6\n2 2\n255\n\x00\x00"),
            Err(MazeError::MalformedImage { .. })
        ));
        assert!(decode(b"").is_err());
    }
}
