//! Command-line parsing.
//!
//! Options are single-dash prefixed; everything else on the command line is
//! an input file. The option set is small enough that a hand-rolled parser
//! over a `strum` enum stays clearer than an argument parsing library.

use std::ffi::{OsStr, OsString};
use std::path::PathBuf;
use std::str::FromStr;

use strum::{EnumString, IntoStaticStr, VariantArray};

use crate::options::OutputFormat;
use crate::{error::PressError, ip_err, options::ExportOptions};

#[derive(EnumString, IntoStaticStr, VariantArray, Debug, Clone, Copy, PartialEq, Eq)]
#[strum(serialize_all = "kebab-case")]
pub enum Arg {
    Quality,
    Resize,
    Format,
    Suffix,
    Archive,
    DeleteOriginals,
    Optimize,
    Progressive,
    Strip,
    Output,
}

impl Arg {
    pub fn needs_value(&self) -> bool {
        matches!(self, Arg::Quality | Arg::Resize | Arg::Format | Arg::Output)
    }

    pub fn help_text(&self) -> &'static str {
        match self {
            Arg::Quality => "encoder quality, 1-100",
            Arg::Resize => "scale factor in (0, 1]; 1.0 keeps dimensions",
            Arg::Format => "output format: jpg, jpeg or webp",
            Arg::Suffix => "append \"_compressed\" to output names",
            Arg::Archive => "bundle all outputs into a single zip archive",
            Arg::DeleteOriginals => "remove each source file after it exports",
            Arg::Optimize => "request an optimized encoding pass",
            Arg::Progressive => "progressive scan ordering (JPEG only)",
            Arg::Strip => "discard embedded metadata such as Exif",
            Arg::Output => "export directory (persisted for later runs)",
        }
    }
}

/// Everything one invocation carries: the files to load, the export
/// options, and an optional new export directory.
#[derive(Debug, Default)]
pub struct Invocation {
    pub files: Vec<PathBuf>,
    pub options: ExportOptions,
    pub output_dir: Option<PathBuf>,
}

pub fn parse_args(args: Vec<OsString>) -> Result<Invocation, PressError> {
    let mut invocation = Invocation::default();

    let mut iter = args.into_iter().skip(1); // skip argv[0], path to our binary
    while let Some(raw_arg) = iter.next() {
        if starts_with_dash(&raw_arg) {
            let name = arg_name(raw_arg)?;
            let arg = Arg::try_from(name.as_str())
                .map_err(|_| ip_err!("unrecognized option `{name}'"))?;
            let value = if arg.needs_value() {
                Some(
                    iter.next()
                        .ok_or_else(|| ip_err!("argument requires a value: -{name}"))?,
                )
            } else {
                None
            };
            apply_arg(&mut invocation, arg, value.as_deref())?;
        } else {
            invocation.files.push(PathBuf::from(raw_arg));
        }
    }

    Ok(invocation)
}

fn apply_arg(
    invocation: &mut Invocation,
    arg: Arg,
    value: Option<&OsStr>,
) -> Result<(), PressError> {
    let options = &mut invocation.options;
    match arg {
        Arg::Quality => {
            let quality: u8 = parse_value(arg, value)?;
            if !(1..=100).contains(&quality) {
                return Err(ip_err!("quality must be between 1 and 100, got {quality}"));
            }
            options.quality = quality;
        }
        Arg::Resize => {
            let factor: f64 = parse_value(arg, value)?;
            if !(factor > 0.0 && factor <= 1.0) {
                return Err(ip_err!("resize factor must be in (0, 1], got {factor}"));
            }
            options.resize_factor = factor;
        }
        Arg::Format => {
            let raw: String = parse_value(arg, value)?;
            options.output_format = OutputFormat::try_from(raw.as_str())
                .map_err(|_| ip_err!("unsupported output format: {raw}"))?;
        }
        Arg::Suffix => options.add_suffix = true,
        Arg::Archive => options.use_archive = true,
        Arg::DeleteOriginals => options.delete_originals = true,
        Arg::Optimize => options.optimized_encoding = true,
        Arg::Progressive => options.progressive_loading = true,
        Arg::Strip => options.strip_metadata = true,
        Arg::Output => {
            // paths need no UTF-8 round-trip
            invocation.output_dir = Some(PathBuf::from(value.unwrap_or_default()));
        }
    }
    Ok(())
}

fn parse_value<T: FromStr>(arg: Arg, value: Option<&OsStr>) -> Result<T, PressError>
where
    T::Err: std::fmt::Display,
{
    let name: &'static str = arg.into();
    let value = value.ok_or_else(|| ip_err!("argument requires a value: -{name}"))?;
    let utf8 = value
        .to_str()
        .ok_or_else(|| ip_err!("invalid value for -{name}"))?;
    utf8.parse()
        .map_err(|e| ip_err!("invalid value for -{name}: {e}"))
}

fn starts_with_dash(arg: &OsStr) -> bool {
    arg.as_encoded_bytes().first() == Some(&b'-')
}

fn arg_name(raw_arg: OsString) -> Result<String, PressError> {
    let mut string = raw_arg
        .into_string()
        .map_err(|s| ip_err!("unrecognized option `{}'", s.to_string_lossy()))?;
    string.remove(0);
    Ok(string)
}
