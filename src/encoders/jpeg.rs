use std::io::Write;

use image::DynamicImage;
use jpeg_encoder::{ColorType, Encoder};

use crate::{error::PressError, image::PressImage, ip_err, ip_try, options::ExportOptions};

/// Exif blobs travel in an APP1 segment behind this identifier.
const EXIF_APP_SEGMENT: u8 = 1;
const EXIF_HEADER: &[u8] = b"Exif\0\0";

pub fn encode<W: Write>(
    image: &PressImage,
    writer: &mut W,
    options: &ExportOptions,
) -> Result<(), PressError> {
    // JPEG has no alpha or palette support, so everything that is not plain
    // 8-bit RGB gets flattened first.
    let converted;
    let rgb = match &image.pixels {
        DynamicImage::ImageRgb8(pixels) => pixels,
        pixels => {
            converted = pixels.to_rgb8();
            &converted
        }
    };

    let width = u16::try_from(rgb.width())
        .map_err(|_| ip_err!("image is too wide for JPEG: {} px", rgb.width()))?;
    let height = u16::try_from(rgb.height())
        .map_err(|_| ip_err!("image is too tall for JPEG: {} px", rgb.height()))?;

    let mut buf = Vec::new();
    let mut encoder = Encoder::new(&mut buf, options.quality.clamp(1, 100));
    encoder.set_progressive(options.progressive_loading);
    encoder.set_optimized_huffman_tables(options.optimized_encoding);
    if let Some(icc) = &image.icc {
        let _ = encoder.add_icc_profile(icc); // oversized profiles are dropped, not fatal
    }
    if let Some(exif) = &image.exif {
        let mut segment = Vec::with_capacity(EXIF_HEADER.len() + exif.len());
        segment.extend_from_slice(EXIF_HEADER);
        segment.extend_from_slice(exif);
        let _ = encoder.add_app_segment(EXIF_APP_SEGMENT, &segment);
    }
    ip_try!(encoder.encode(rgb.as_raw(), width, height, ColorType::Rgb));

    Ok(ip_try!(writer.write_all(&buf)))
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use image::{GenericImageView, ImageReader, Rgba, RgbaImage};

    use crate::options::OutputFormat;

    use super::*;

    fn options() -> ExportOptions {
        ExportOptions {
            output_format: OutputFormat::Jpg,
            ..Default::default()
        }
    }

    fn translucent_image(width: u32, height: u32) -> PressImage {
        let mut pixels = RgbaImage::new(width, height);
        for (x, y, pixel) in pixels.enumerate_pixels_mut() {
            *pixel = Rgba([(x * 7 % 256) as u8, (y * 13 % 256) as u8, 90, 128]);
        }
        PressImage {
            exif: None,
            icc: None,
            pixels: DynamicImage::ImageRgba8(pixels),
        }
    }

    fn roundtrip(image: &PressImage, options: &ExportOptions) -> DynamicImage {
        let mut out = Vec::new();
        encode(image, &mut out, options).unwrap();
        ImageReader::new(Cursor::new(out))
            .with_guessed_format()
            .unwrap()
            .decode()
            .unwrap()
    }

    #[test]
    fn alpha_is_flattened_to_rgb() {
        let decoded = roundtrip(&translucent_image(12, 9), &options());
        assert_eq!(decoded.dimensions(), (12, 9));
        assert!(!decoded.color().has_alpha());
    }

    #[test]
    fn progressive_and_optimized_output_stays_decodable() {
        let options = ExportOptions {
            progressive_loading: true,
            optimized_encoding: true,
            ..options()
        };
        let decoded = roundtrip(&translucent_image(33, 17), &options);
        assert_eq!(decoded.dimensions(), (33, 17));
    }

    #[test]
    fn lower_quality_means_fewer_bytes() {
        let image = translucent_image(64, 64);
        let mut high = Vec::new();
        let mut low = Vec::new();
        encode(
            &image,
            &mut high,
            &ExportOptions {
                quality: 95,
                ..options()
            },
        )
        .unwrap();
        encode(
            &image,
            &mut low,
            &ExportOptions {
                quality: 10,
                ..options()
            },
        )
        .unwrap();
        assert!(low.len() < high.len());
    }
}
