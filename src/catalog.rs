use std::fs;
use std::path::{Path, PathBuf};

use crate::{decode, error::PressError, image::PressImage, ip_err, ip_try};

/// Decoded-image slot of a catalog entry. Invalidation stands in for closing
/// a handle: it is explicit, idempotent, and releasing can never fail.
#[derive(Debug)]
enum Handle {
    Decoded(PressImage),
    Invalidated,
}

/// One imported source image and its bookkeeping.
#[derive(Debug)]
pub struct CatalogEntry {
    /// 1-based, dense over successfully loaded items, in input order.
    pub id: u32,
    pub original_path: PathBuf,
    /// File stem of the source, used to derive the output name.
    pub original_name: String,
    pub original_extension: String,
    pub original_byte_size: u64,
    /// Written size of the last successful export of this item; 0 until then.
    pub new_byte_size: u64,
    handle: Handle,
}

impl CatalogEntry {
    /// Returns the decoded image, re-opening the source when the handle was
    /// invalidated by an earlier deletion.
    pub fn refresh(&mut self) -> Result<&PressImage, PressError> {
        if matches!(self.handle, Handle::Invalidated) {
            let image = ip_try!(decode::decode(&self.original_path));
            self.handle = Handle::Decoded(image);
        }
        match &self.handle {
            Handle::Decoded(image) => Ok(image),
            Handle::Invalidated => Err(ip_err!(
                "no decoded image for '{}'",
                self.original_path.display()
            )),
        }
    }

    pub fn invalidate(&mut self) {
        self.handle = Handle::Invalidated;
    }

    pub fn is_invalidated(&self) -> bool {
        matches!(self.handle, Handle::Invalidated)
    }
}

/// Caller-owned registry of the images selected for one session.
#[derive(Debug, Default)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the given files, replacing whatever was loaded before — also
    /// when the new selection is empty. Files that cannot be opened as
    /// images, or not at all, are logged and skipped; the survivors get
    /// dense 1-based ids in input order. Returns the number of images
    /// loaded.
    pub fn import(&mut self, paths: &[PathBuf]) -> usize {
        self.reset();
        for path in paths {
            let image = match decode::decode(path) {
                Ok(image) => image,
                Err(e) => {
                    log::error!("failed to load image {}: {e}", path.display());
                    continue;
                }
            };
            let original_byte_size = match fs::metadata(path) {
                Ok(metadata) => metadata.len(),
                Err(e) => {
                    log::error!("failed to load image {}: {e}", path.display());
                    continue;
                }
            };
            self.entries.push(CatalogEntry {
                id: self.entries.len() as u32 + 1,
                original_name: file_stem(path),
                original_extension: file_extension(path),
                original_path: path.clone(),
                original_byte_size,
                new_byte_size: 0,
                handle: Handle::Decoded(image),
            });
        }
        self.entries.len()
    }

    /// Releases every decoded image and empties the catalog. Safe to call
    /// any number of times.
    pub fn reset(&mut self) {
        for entry in &mut self.entries {
            entry.invalidate();
        }
        self.entries.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn entries_mut(&mut self) -> impl Iterator<Item = &mut CatalogEntry> {
        self.entries.iter_mut()
    }
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn file_extension(path: &Path) -> String {
    path.extension()
        .map(|ext| ext.to_string_lossy().into_owned())
        .unwrap_or_default()
}
