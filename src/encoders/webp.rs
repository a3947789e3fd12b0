use std::io::Write;

use image::DynamicImage;
use webp::{Encoder, WebPMemory};

use crate::{error::PressError, image::PressImage, ip_err, ip_try, options::ExportOptions};

pub fn encode<W: Write>(
    image: &PressImage,
    writer: &mut W,
    options: &ExportOptions,
) -> Result<(), PressError> {
    // the encoder accepts only 8-bit RGB and RGBA layouts
    let converted;
    let pixels = match &image.pixels {
        pixels @ (DynamicImage::ImageRgb8(_) | DynamicImage::ImageRgba8(_)) => pixels,
        pixels if pixels.color().has_alpha() => {
            converted = DynamicImage::ImageRgba8(pixels.to_rgba8());
            &converted
        }
        pixels => {
            converted = DynamicImage::ImageRgb8(pixels.to_rgb8());
            &converted
        }
    };

    let encoder = Encoder::from_image(pixels).map_err(|e| ip_err!("WebP encoding failed: {e}"))?;
    let quality = options.quality.clamp(1, 100) as f32;
    let webp: WebPMemory = encoder
        .encode_simple(false, quality)
        .map_err(|e| ip_err!("WebP encoding failed: {e:?}"))?;
    // the `webp` crate cannot embed ICC profiles or Exif, so carried
    // metadata is silently left out here
    Ok(ip_try!(writer.write_all(&webp)))
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use image::{GenericImageView, ImageReader, Luma};

    use crate::options::OutputFormat;

    use super::*;

    fn options() -> ExportOptions {
        ExportOptions {
            output_format: OutputFormat::Webp,
            ..Default::default()
        }
    }

    #[test]
    fn grayscale_input_roundtrips() {
        let pixels = image::GrayImage::from_fn(20, 10, |x, y| Luma([(x + y) as u8]));
        let image = PressImage {
            exif: None,
            icc: None,
            pixels: DynamicImage::ImageLuma8(pixels),
        };
        let mut out = Vec::new();
        encode(&image, &mut out, &options()).unwrap();

        let decoded = ImageReader::new(Cursor::new(out))
            .with_guessed_format()
            .unwrap()
            .decode()
            .unwrap();
        assert_eq!(decoded.dimensions(), (20, 10));
    }

    #[test]
    fn alpha_survives_webp() {
        let pixels = image::RgbaImage::from_pixel(16, 16, image::Rgba([10, 20, 30, 128]));
        let image = PressImage {
            exif: None,
            icc: None,
            pixels: DynamicImage::ImageRgba8(pixels),
        };
        let mut out = Vec::new();
        encode(&image, &mut out, &options()).unwrap();

        let decoded = ImageReader::new(Cursor::new(out))
            .with_guessed_format()
            .unwrap()
            .decode()
            .unwrap();
        assert!(decoded.color().has_alpha());
    }
}
