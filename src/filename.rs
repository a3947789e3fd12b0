use crate::options::ExportOptions;

/// Appended to output names when `add_suffix` is set.
pub const NAME_SUFFIX: &str = "_compressed";

/// Output file name for a source stem: stem, optional suffix, lowercase
/// extension of the chosen format.
pub fn output_file_name(stem: &str, options: &ExportOptions) -> String {
    let suffix = if options.add_suffix { NAME_SUFFIX } else { "" };
    format!("{stem}{suffix}.{}", options.output_format.extension())
}
