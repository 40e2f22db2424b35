use image::imageops::{self, FilterType};
use image::GrayImage;

/// Stretch `image` to `width`x`height` with nearest-neighbor sampling.
///
/// No new intensities are introduced, so thresholding afterwards gives the
/// same result as thresholding the sampled source pixels.
pub fn stretch(image: &GrayImage, width: u32, height: u32) -> GrayImage {
    imageops::resize(image, width, height, FilterType::Nearest)
}
