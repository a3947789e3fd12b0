use strum::{EnumString, IntoStaticStr, VariantArray};

/// Target encoding for exported images. `Jpg` and `Jpeg` select the same
/// encoder and differ only in the file extension they produce.
#[derive(EnumString, IntoStaticStr, VariantArray, Debug, Clone, Copy, PartialEq, Eq)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum OutputFormat {
    Jpg,
    Jpeg,
    Webp,
}

impl OutputFormat {
    /// Lowercase file extension, without the dot.
    pub fn extension(&self) -> &'static str {
        self.into()
    }

    pub fn is_jpeg(&self) -> bool {
        matches!(self, OutputFormat::Jpg | OutputFormat::Jpeg)
    }
}

/// Everything the export runner needs to know about one run.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Encoder quality, 1-100.
    pub quality: u8,
    /// Multiplies both dimensions; only values in (0, 1) shrink the image.
    pub resize_factor: f64,
    pub output_format: OutputFormat,
    /// Append a fixed suffix to output file names.
    pub add_suffix: bool,
    /// Bundle all outputs into a single zip archive instead of loose files.
    pub use_archive: bool,
    /// Remove each source file after its item exports successfully.
    pub delete_originals: bool,
    /// Request an optimized-Huffman encoding pass.
    pub optimized_encoding: bool,
    /// Progressive scan ordering. Only honored by the JPEG encoder.
    pub progressive_loading: bool,
    /// Discard embedded Exif and ICC data instead of re-embedding it.
    pub strip_metadata: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            quality: 80,
            resize_factor: 1.0,
            output_format: OutputFormat::Jpg,
            add_suffix: false,
            use_archive: false,
            delete_originals: false,
            optimized_encoding: false,
            progressive_loading: false,
            strip_metadata: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_names_parse_case_insensitively() {
        assert_eq!(OutputFormat::try_from("jpg"), Ok(OutputFormat::Jpg));
        assert_eq!(OutputFormat::try_from("JPEG"), Ok(OutputFormat::Jpeg));
        assert_eq!(OutputFormat::try_from("WebP"), Ok(OutputFormat::Webp));
        assert!(OutputFormat::try_from("png").is_err());
        assert!(OutputFormat::try_from("").is_err());
    }

    #[test]
    fn jpg_and_jpeg_share_an_encoder_but_not_an_extension() {
        assert!(OutputFormat::Jpg.is_jpeg());
        assert!(OutputFormat::Jpeg.is_jpeg());
        assert!(!OutputFormat::Webp.is_jpeg());
        assert_eq!(OutputFormat::Jpg.extension(), "jpg");
        assert_eq!(OutputFormat::Jpeg.extension(), "jpeg");
        assert_eq!(OutputFormat::Webp.extension(), "webp");
    }
}
