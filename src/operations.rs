//! Pixel transforms applied between decode and encode.

use image::imageops::FilterType;

use crate::image::PressImage;

/// Scales both dimensions by `factor`, flooring to whole pixels. Factors
/// outside (0, 1) and factors that would collapse a dimension to zero leave
/// the image untouched.
pub fn scale_by_factor(image: &mut PressImage, factor: f64) {
    if !(factor > 0.0 && factor < 1.0) {
        return;
    }
    let Some((width, height)) =
        scaled_dimensions(image.pixels.width(), image.pixels.height(), factor)
    else {
        return;
    };
    image.pixels = image
        .pixels
        .resize_exact(width, height, FilterType::Lanczos3);
}

/// `floor(dimension * factor)` on both axes; `None` unless both results are
/// positive.
pub fn scaled_dimensions(width: u32, height: u32, factor: f64) -> Option<(u32, u32)> {
    let scaled_width = (width as f64 * factor).floor() as u32;
    let scaled_height = (height as f64 * factor).floor() as u32;
    (scaled_width > 0 && scaled_height > 0).then_some((scaled_width, scaled_height))
}
