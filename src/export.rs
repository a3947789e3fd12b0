//! The export runner: one synchronous pass over the catalog.

use std::fs::{self, File};
use std::path::Path;

use crate::archive::ArchiveWriter;
use crate::catalog::{Catalog, CatalogEntry};
use crate::image::PressImage;
use crate::options::ExportOptions;
use crate::stats::ExportStats;
use crate::{encoders, error::PressError, filename, ip_err, ip_try, operations};

/// Outcome of a run in which at least one item succeeded. Every
/// zero-success outcome is reported as an error instead.
#[derive(Debug)]
pub struct ExportReport {
    pub success_count: usize,
    pub stats: ExportStats,
}

/// Re-encodes every catalog entry into `export_dir` according to `options`.
///
/// Items are processed independently: one item's failure is logged and does
/// not abort the run. Precondition violations (empty catalog, missing
/// export directory, archive creation failure) abort before any item is
/// touched.
pub fn run(
    catalog: &mut Catalog,
    options: &ExportOptions,
    export_dir: &Path,
) -> Result<ExportReport, PressError> {
    if catalog.is_empty() {
        return Err(ip_err!("no images loaded, nothing to export"));
    }
    if !export_dir.is_dir() {
        return Err(ip_err!(
            "export directory '{}' does not exist",
            export_dir.display()
        ));
    }

    let mut archive = if options.use_archive {
        Some(ArchiveWriter::create(export_dir)?)
    } else {
        None
    };

    let mut total_old: u64 = 0;
    let mut total_new: u64 = 0;
    let mut success_count = 0usize;

    for entry in catalog.entries_mut() {
        // A stale handle is refreshed before any size accounting, so an
        // unreadable source contributes nothing to the totals.
        let source = match entry.refresh() {
            Ok(image) => image.clone(),
            Err(e) => {
                log::error!("failed to export {}: {e}", entry.original_path.display());
                continue;
            }
        };

        // Accumulated up front: an item that fails later in the pipeline
        // keeps its share of this total, so the reported gain is measured
        // against everything that was attempted.
        total_old += entry.original_byte_size;

        match export_entry(entry, source, options, export_dir, archive.as_mut()) {
            Ok(written) => {
                entry.new_byte_size = written;
                total_new += written;
                success_count += 1;
            }
            Err(e) => {
                log::error!("failed to export {}: {e}", entry.original_path.display());
            }
        }
    }

    if let Some(archive) = archive {
        // Once everything is bundled, the archive itself is the meaningful
        // output size; per-item sizes stay advisory.
        total_new = archive.finish()?;
    }

    if success_count == 0 {
        return Err(ip_err!("no image was processed successfully"));
    }

    Ok(ExportReport {
        success_count,
        stats: ExportStats::from_totals(total_old, total_new, export_dir.to_path_buf()),
    })
}

/// Transforms, encodes and writes a single entry, returning the written
/// byte count.
fn export_entry(
    entry: &mut CatalogEntry,
    mut image: PressImage,
    options: &ExportOptions,
    export_dir: &Path,
    archive: Option<&mut ArchiveWriter>,
) -> Result<u64, PressError> {
    operations::scale_by_factor(&mut image, options.resize_factor);

    let file_name = filename::output_file_name(&entry.original_name, options);

    let written = match archive {
        Some(archive) => {
            // encoded to a temporary file first; dropping it removes the
            // loose on-disk copy once the bytes are in the archive
            let mut temp = ip_try!(tempfile::NamedTempFile::new_in(export_dir));
            encoders::encode(&mut image, temp.as_file_mut(), options)?;
            let written = ip_try!(temp.as_file().metadata()).len();
            archive.append(&file_name, temp.as_file_mut())?;
            written
        }
        None => write_loose_file(&mut image, &export_dir.join(&file_name), options)?,
    };

    if options.delete_originals {
        entry.invalidate();
        ip_try!(fs::remove_file(&entry.original_path));
        log::info!("deleted original '{}'", entry.original_path.display());
    }

    Ok(written)
}

fn write_loose_file(
    image: &mut PressImage,
    path: &Path,
    options: &ExportOptions,
) -> Result<u64, PressError> {
    let result = try_write_loose_file(image, path, options);
    if result.is_err() {
        // do not leave a partially written output behind
        let _ = fs::remove_file(path);
    }
    result
}

fn try_write_loose_file(
    image: &mut PressImage,
    path: &Path,
    options: &ExportOptions,
) -> Result<u64, PressError> {
    let mut file = File::create(path)
        .map_err(|e| ip_err!("unable to create '{}': {e}", path.display()))?;
    encoders::encode(image, &mut file, options)?;
    Ok(ip_try!(file.metadata()).len())
}
