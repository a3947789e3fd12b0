use image::DynamicImage;

/// A decoded image together with the metadata blobs we carry through
/// re-encoding. Stripping happens centrally in the encode dispatch, so the
/// blobs stay attached to the pixels until the very last moment.
#[derive(Debug, Clone)]
pub struct PressImage {
    pub exif: Option<Vec<u8>>,
    pub icc: Option<Vec<u8>>,
    pub pixels: DynamicImage,
}
