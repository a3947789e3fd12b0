use std::fs::File;
use std::io::{BufWriter, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::{error::PressError, ip_err, ip_try};

/// Deflate-compressed zip bundle holding all outputs of one archived run.
/// The file name is randomly generated to avoid collisions in the export
/// directory.
pub struct ArchiveWriter {
    zip: ZipWriter<BufWriter<File>>,
    path: PathBuf,
}

impl ArchiveWriter {
    /// Creates the archive in `export_dir` before any item is processed, so
    /// a failure here aborts the run up front.
    pub fn create(export_dir: &Path) -> Result<Self, PressError> {
        let temp = tempfile::Builder::new()
            .prefix("imgpress-")
            .suffix(".zip")
            .tempfile_in(export_dir)
            .map_err(|e| {
                ip_err!("unable to create archive in '{}': {e}", export_dir.display())
            })?;
        let (file, path) = temp.keep().map_err(|e| {
            ip_err!(
                "unable to create archive '{}': {}",
                e.file.path().display(),
                e.error
            )
        })?;
        Ok(Self {
            zip: ZipWriter::new(BufWriter::new(file)),
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends an already-encoded file under the given entry name.
    pub fn append(&mut self, name: &str, file: &mut File) -> Result<(), PressError> {
        let options =
            SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        ip_try!(self.zip.start_file(name, options));
        ip_try!(file.seek(SeekFrom::Start(0)));
        ip_try!(std::io::copy(file, &mut self.zip));
        Ok(())
    }

    /// Closes the archive and returns its on-disk size.
    pub fn finish(self) -> Result<u64, PressError> {
        let mut inner = ip_try!(self.zip.finish());
        ip_try!(inner.flush());
        Ok(ip_try!(std::fs::metadata(&self.path)).len())
    }
}
