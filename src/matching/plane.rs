//! Normalized float pixel planes used by the matcher.

use image::DynamicImage;

/// Pixel samples lifted to `f32` in `[0, 1]`, interleaved per pixel.
///
/// Either three RGB channels, or a single luminance channel when grayscale
/// comparison is requested. Haystack and template must be built with the
/// same mode so their samples stay comparable.
#[derive(Debug, Clone)]
pub(crate) struct ChannelPlanes {
    pub width: u32,
    pub height: u32,
    pub channels: usize,
    samples: Vec<f32>,
}

impl ChannelPlanes {
    pub(crate) fn from_image(image: &DynamicImage, grayscale: bool) -> Self {
        let rgb = image.to_rgb8();
        let (width, height) = rgb.dimensions();

        if grayscale {
            let samples = rgb
                .pixels()
                .map(|p| {
                    (0.299 * p[0] as f32 + 0.587 * p[1] as f32 + 0.114 * p[2] as f32) / 255.0
                })
                .collect();
            Self {
                width,
                height,
                channels: 1,
                samples,
            }
        } else {
            let samples = rgb
                .pixels()
                .flat_map(|p| p.0.into_iter().map(|c| c as f32 / 255.0))
                .collect();
            Self {
                width,
                height,
                channels: 3,
                samples,
            }
        }
    }

    /// Samples of one row segment starting at `(x, y)`, `len` pixels wide.
    #[inline]
    pub(crate) fn row_segment(&self, x: u32, y: u32, len: u32) -> &[f32] {
        let start = (y as usize * self.width as usize + x as usize) * self.channels;
        let end = start + len as usize * self.channels;
        &self.samples[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use image::{Rgba, RgbaImage};

    fn two_pixel_image() -> DynamicImage {
        let mut img = RgbaImage::new(2, 1);
        img.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        img.put_pixel(1, 0, Rgba([0, 255, 0, 255]));
        DynamicImage::ImageRgba8(img)
    }

    #[test]
    fn rgb_planes_interleave_three_channels() {
        let planes = ChannelPlanes::from_image(&two_pixel_image(), false);
        assert_eq!(planes.channels, 3);

        let row = planes.row_segment(0, 0, 2);
        assert_relative_eq!(row[0], 1.0);
        assert_relative_eq!(row[1], 0.0);
        assert_relative_eq!(row[2], 0.0);
        assert_relative_eq!(row[3], 0.0);
        assert_relative_eq!(row[4], 1.0);
    }

    #[test]
    fn luminance_weights_red_and_green_differently() {
        let planes = ChannelPlanes::from_image(&two_pixel_image(), true);
        assert_eq!(planes.channels, 1);

        let row = planes.row_segment(0, 0, 2);
        assert_relative_eq!(row[0], 0.299, max_relative = 1e-5);
        assert_relative_eq!(row[1], 0.587, max_relative = 1e-5);
    }
}
