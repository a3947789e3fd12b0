//! Format-specific encoders and the shared dispatch around them.

pub mod jpeg;
pub mod webp;

use std::io::Write;

use crate::{error::PressError, image::PressImage, options::ExportOptions};

/// Encodes the image with the format and parameters from `options`.
///
/// This wrapper clears metadata when stripping is requested. Correctly
/// stripping metadata is a privacy concern: unstripped images may reveal the
/// user's location when phone cameras embed GPS coordinates. It is done here
/// once and for all, without trusting any individual format handler.
pub fn encode<W: Write>(
    image: &mut PressImage,
    writer: &mut W,
    options: &ExportOptions,
) -> Result<(), PressError> {
    let mut exif = None;
    let mut icc = None;
    if options.strip_metadata {
        exif = std::mem::take(&mut image.exif);
        icc = std::mem::take(&mut image.icc);
    }

    let result = encode_inner(image, writer, options);

    // restore, so a later run over the same catalog entry can keep its metadata
    if exif.is_some() {
        image.exif = exif;
    }
    if icc.is_some() {
        image.icc = icc;
    }

    result
}

fn encode_inner<W: Write>(
    image: &PressImage,
    writer: &mut W,
    options: &ExportOptions,
) -> Result<(), PressError> {
    if options.output_format.is_jpeg() {
        jpeg::encode(image, writer, options)
    } else {
        webp::encode(image, writer, options)
    }
}
