use image::{DynamicImage, GrayAlphaImage, GrayImage, Luma, LumaA};

use crate::config::GrayscaleMethod;

/// Luminance plus alpha with ITU-R 601-2 weights (`L = R*299/1000 +
/// G*587/1000 + B*114/1000`), in 16-bit fixed point. Opaque inputs get a
/// fully opaque alpha channel.
pub fn luma_alpha(img: &DynamicImage) -> DynamicImage {
    let rgba = img.to_rgba8();
    let gray = GrayAlphaImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        let [r, g, b, a] = rgba.get_pixel(x, y).0;
        let l = u32::from(r) * 19595 + u32::from(g) * 38470 + u32::from(b) * 7471 + 0x8000;
        LumaA([(l >> 16) as u8, a])
    });
    DynamicImage::ImageLumaA8(gray)
}

/// Mean of the red, green and blue channels, rounded to the nearest level.
/// Alpha does not contribute.
pub fn channel_average(img: &DynamicImage) -> DynamicImage {
    let rgb = img.to_rgb8();
    let gray = GrayImage::from_fn(rgb.width(), rgb.height(), |x, y| {
        let [r, g, b] = rgb.get_pixel(x, y).0;
        let sum = u16::from(r) + u16::from(g) + u16::from(b);
        Luma([((sum + 1) / 3) as u8])
    });
    DynamicImage::ImageLuma8(gray)
}

pub fn to_grayscale(img: &DynamicImage, method: GrayscaleMethod) -> DynamicImage {
    match method {
        GrayscaleMethod::LumaAlpha => luma_alpha(img),
        GrayscaleMethod::ChannelAverage => channel_average(img),
    }
}

/// Flatten an 8-bit grayscale image into row-major, channel-interleaved samples.
pub fn samples(gray: &DynamicImage) -> Vec<f64> {
    gray.as_bytes().iter().map(|&b| f64::from(b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, ImageBuffer, Rgb, Rgba};

    #[test]
    fn test_luma_alpha_keeps_dimensions() {
        let img = DynamicImage::ImageRgb8(ImageBuffer::from_pixel(7, 3, Rgb([10, 200, 30])));
        let gray = luma_alpha(&img);

        assert_eq!(gray.dimensions(), (7, 3));
        assert_eq!(gray.color().channel_count(), 2);
    }

    #[test]
    fn test_luma_alpha_opaque_source() {
        let img = DynamicImage::ImageRgb8(ImageBuffer::from_pixel(2, 2, Rgb([0, 0, 0])));
        let values = samples(&luma_alpha(&img));

        assert_eq!(values, vec![0.0, 255.0, 0.0, 255.0, 0.0, 255.0, 0.0, 255.0]);
    }

    #[test]
    fn test_luma_alpha_white() {
        let img = DynamicImage::ImageRgb8(ImageBuffer::from_pixel(1, 1, Rgb([255, 255, 255])));
        assert_eq!(samples(&luma_alpha(&img)), vec![255.0, 255.0]);
    }

    #[test]
    fn test_luma_alpha_weights() {
        let pixel = |rgb: [u8; 3]| {
            let img = DynamicImage::ImageRgb8(ImageBuffer::from_pixel(1, 1, Rgb(rgb)));
            samples(&luma_alpha(&img))
        };

        assert_eq!(pixel([255, 0, 0]), vec![76.0, 255.0]);
        assert_eq!(pixel([0, 255, 0]), vec![150.0, 255.0]);
        assert_eq!(pixel([0, 0, 255]), vec![29.0, 255.0]);
    }

    #[test]
    fn test_luma_alpha_keeps_source_alpha() {
        let img = DynamicImage::ImageRgba8(ImageBuffer::from_pixel(1, 1, Rgba([255, 255, 255, 40])));
        assert_eq!(samples(&luma_alpha(&img)), vec![255.0, 40.0]);
    }

    #[test]
    fn test_channel_average() {
        let img = DynamicImage::ImageRgb8(ImageBuffer::from_pixel(3, 2, Rgb([30, 60, 90])));
        let gray = channel_average(&img);

        assert_eq!(gray.dimensions(), (3, 2));
        assert_eq!(samples(&gray), vec![60.0; 6]);
    }

    #[test]
    fn test_channel_average_ignores_alpha() {
        let img = DynamicImage::ImageRgba8(ImageBuffer::from_pixel(1, 1, Rgba([90, 90, 90, 0])));
        assert_eq!(samples(&channel_average(&img)), vec![90.0]);
    }

    #[test]
    fn test_to_grayscale_dispatch() {
        let img = DynamicImage::ImageRgb8(ImageBuffer::from_pixel(4, 4, Rgb([1, 2, 3])));

        let la = to_grayscale(&img, GrayscaleMethod::LumaAlpha);
        let avg = to_grayscale(&img, GrayscaleMethod::ChannelAverage);

        assert_eq!(samples(&la).len(), 32);
        assert_eq!(samples(&avg).len(), 16);
    }
}
