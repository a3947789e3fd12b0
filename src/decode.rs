use std::path::Path;

use image::{DynamicImage, ImageDecoder, ImageReader, ImageResult};

use crate::image::PressImage;

/// Decodes a file, guessing the format from its contents rather than the
/// extension, and keeps the raw Exif and ICC blobs around for re-embedding.
pub fn decode(path: &Path) -> ImageResult<PressImage> {
    let reader = ImageReader::open(path)?.with_guessed_format()?;
    let mut decoder = reader.into_decoder()?;
    let exif = decoder.exif_metadata()?;
    let icc = decoder.icc_profile()?;
    let pixels = DynamicImage::from_decoder(decoder)?;
    Ok(PressImage { exif, icc, pixels })
}
