//! Label image preparation for OCR.

use image::{DynamicImage, GrayImage, Luma, imageops};
use tracing::debug;

use crate::config::PreprocessConfig;

/// Sharpen kernel used on label photos after denoising.
const SHARPEN_KERNEL: [f32; 9] = [0.0, -1.0, 0.0, -1.0, 5.0, -1.0, 0.0, -1.0, 0.0];

/// Prepares label photos for OCR: grayscale, denoise, sharpen, binarize.
pub struct ImagePreprocessor {
    /// Gaussian blur sigma. Zero disables denoising.
    denoise_sigma: f32,
    /// Whether to run the sharpen kernel.
    sharpen: bool,
    /// Window size for the local-mean threshold.
    threshold_block_size: u32,
    /// Offset subtracted from the local mean.
    threshold_offset: i32,
}

impl ImagePreprocessor {
    /// Create a preprocessor with default settings.
    pub fn new() -> Self {
        Self::from_config(&PreprocessConfig::default())
    }

    /// Create a preprocessor from configuration.
    pub fn from_config(config: &PreprocessConfig) -> Self {
        Self {
            denoise_sigma: config.denoise_sigma,
            sharpen: config.sharpen,
            threshold_block_size: config.threshold_block_size.max(3),
            threshold_offset: config.threshold_offset,
        }
    }

    /// Set the denoise sigma.
    pub fn with_denoise_sigma(mut self, sigma: f32) -> Self {
        self.denoise_sigma = sigma;
        self
    }

    /// Set the threshold window size.
    pub fn with_threshold_block_size(mut self, size: u32) -> Self {
        self.threshold_block_size = size.max(3);
        self
    }

    /// Prepare a label photo for OCR.
    ///
    /// Uneven lighting is the common failure mode on curved packaging, so the
    /// final step is a local adaptive threshold rather than a global one.
    pub fn prepare(&self, image: &DynamicImage) -> GrayImage {
        let gray = image.to_luma8();
        debug!("preparing {}x{} label image", gray.width(), gray.height());

        let denoised = if self.denoise_sigma > 0.0 {
            imageops::blur(&gray, self.denoise_sigma)
        } else {
            gray
        };

        let sharpened = if self.sharpen {
            imageops::filter3x3(&denoised, &SHARPEN_KERNEL)
        } else {
            denoised
        };

        self.adaptive_threshold(&sharpened)
    }

    /// Binarize against the local mean computed over an integral image.
    fn adaptive_threshold(&self, image: &GrayImage) -> GrayImage {
        let (width, height) = image.dimensions();
        let mut result = GrayImage::new(width, height);
        if width == 0 || height == 0 {
            return result;
        }

        // Summed-area table with a zero row/column of padding.
        let w = width as usize;
        let h = height as usize;
        let mut integral = vec![0u64; (w + 1) * (h + 1)];
        for y in 0..h {
            let mut row_sum = 0u64;
            for x in 0..w {
                row_sum += image.get_pixel(x as u32, y as u32)[0] as u64;
                integral[(y + 1) * (w + 1) + (x + 1)] = integral[y * (w + 1) + (x + 1)] + row_sum;
            }
        }

        let half = (self.threshold_block_size / 2) as usize;
        for y in 0..h {
            let y0 = y.saturating_sub(half);
            let y1 = (y + half + 1).min(h);
            for x in 0..w {
                let x0 = x.saturating_sub(half);
                let x1 = (x + half + 1).min(w);

                let sum = integral[y1 * (w + 1) + x1]
                    + integral[y0 * (w + 1) + x0]
                    - integral[y0 * (w + 1) + x1]
                    - integral[y1 * (w + 1) + x0];
                let count = ((y1 - y0) * (x1 - x0)) as u64;
                let mean = (sum / count) as i32;

                let pixel = image.get_pixel(x as u32, y as u32)[0] as i32;
                let value = if pixel > mean - self.threshold_offset { 255 } else { 0 };
                result.put_pixel(x as u32, y as u32, Luma([value]));
            }
        }

        result
    }
}

impl Default for ImagePreprocessor {
    fn default() -> Self {
        Self::new()
    }
}

/// Scale pixel intensities by `gain`, clamping to the u8 range.
///
/// Used for the extra high-contrast OCR pass on faint prints.
pub fn boost_contrast(image: &GrayImage, gain: f32) -> GrayImage {
    let mut boosted = image.clone();
    for pixel in boosted.pixels_mut() {
        let value = (pixel[0] as f32 * gain).round().clamp(0.0, 255.0);
        *pixel = Luma([value as u8]);
    }
    boosted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform(width: u32, height: u32, value: u8) -> GrayImage {
        GrayImage::from_pixel(width, height, Luma([value]))
    }

    #[test]
    fn test_threshold_splits_light_and_dark() {
        // Dark text block on a light background.
        let mut img = uniform(32, 32, 220);
        for y in 10..20 {
            for x in 10..20 {
                img.put_pixel(x, y, Luma([30]));
            }
        }

        let preprocessor = ImagePreprocessor::new()
            .with_denoise_sigma(0.0)
            .with_threshold_block_size(21);
        let out = preprocessor.prepare(&DynamicImage::ImageLuma8(img));

        assert_eq!(out.get_pixel(15, 15)[0], 0);
        assert_eq!(out.get_pixel(2, 2)[0], 255);
    }

    #[test]
    fn test_threshold_output_is_binary() {
        let mut img = uniform(16, 16, 128);
        img.put_pixel(4, 4, Luma([10]));
        img.put_pixel(11, 11, Luma([250]));

        let preprocessor = ImagePreprocessor::new().with_denoise_sigma(0.0);
        let out = preprocessor.prepare(&DynamicImage::ImageLuma8(img));

        assert!(out.pixels().all(|p| p[0] == 0 || p[0] == 255));
    }

    #[test]
    fn test_boost_contrast_clamps() {
        let img = uniform(4, 4, 200);
        let boosted = boost_contrast(&img, 1.6);
        assert!(boosted.pixels().all(|p| p[0] == 255));

        let mid = uniform(4, 4, 100);
        let boosted = boost_contrast(&mid, 1.6);
        assert!(boosted.pixels().all(|p| p[0] == 160));
    }
}
