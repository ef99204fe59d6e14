//! Per-job output files.
//!
//! Each job writes to `<dir>/<id>.<ext>.part` and is renamed to `<dir>/<id>.<ext>`
//! only after the transfer succeeded, so a failed or abandoned job never leaves
//! a truncated output behind. The output directory must already exist.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::job::JobId;

/// Temporary file suffix used before atomic rename.
pub const TEMP_SUFFIX: &str = ".part";

/// Path for the temp file: appends `.part` to the final path (e.g. `3.jpg` → `3.jpg.part`).
pub fn temp_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    PathBuf::from(o)
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("output directory does not exist or is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
    #[error("failed to create {}", .path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to finalize {}", .path.display())]
    Finalize {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Pre-existing directory that receives one output file per job.
#[derive(Debug, Clone)]
pub struct OutputDir {
    dir: PathBuf,
    extension: String,
}

impl OutputDir {
    /// Opens `dir` as the output destination. Does not create it.
    /// `extension` may be empty, in which case outputs are named by id alone.
    pub fn open(dir: impl Into<PathBuf>, extension: impl Into<String>) -> Result<Self, StorageError> {
        let dir = dir.into();
        if !dir.is_dir() {
            return Err(StorageError::NotADirectory(dir));
        }
        let extension = extension.into().trim_start_matches('.').to_string();
        Ok(Self { dir, extension })
    }

    /// Final output path for a job: `<dir>/<id>.<ext>`.
    pub fn path_for(&self, id: JobId) -> PathBuf {
        if self.extension.is_empty() {
            self.dir.join(id.to_string())
        } else {
            self.dir.join(format!("{}.{}", id, self.extension))
        }
    }

    /// Creates (truncating) the temp file for `id`.
    pub fn create(&self, id: JobId) -> Result<PartFile, StorageError> {
        let final_path = self.path_for(id);
        let temp = temp_path(&final_path);
        let file = File::options()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp)
            .map_err(|source| StorageError::Create {
                path: temp.clone(),
                source,
            })?;
        Ok(PartFile {
            writer: Some(BufWriter::new(file)),
            temp_path: temp,
            final_path,
        })
    }
}

/// Output being written for one job. Dropping it without calling
/// [`PartFile::finalize`] removes the temp file.
#[derive(Debug)]
pub struct PartFile {
    writer: Option<BufWriter<File>>,
    temp_path: PathBuf,
    final_path: PathBuf,
}

impl PartFile {
    pub fn temp_path(&self) -> &Path {
        &self.temp_path
    }

    /// Flushes, closes, and renames the temp file to its final name.
    pub fn finalize(mut self) -> Result<PathBuf, StorageError> {
        let finalize_err = |source| StorageError::Finalize {
            path: self.final_path.clone(),
            source,
        };
        if let Some(writer) = self.writer.take() {
            let file = writer.into_inner().map_err(|e| finalize_err(e.into_error()))?;
            file.sync_all().map_err(finalize_err)?;
        }
        std::fs::rename(&self.temp_path, &self.final_path).map_err(finalize_err)?;
        Ok(std::mem::take(&mut self.final_path))
    }
}

impl Write for PartFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self.writer.as_mut() {
            Some(w) => w.write(buf),
            None => Err(io::Error::new(io::ErrorKind::Other, "output already closed")),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.writer.as_mut() {
            Some(w) => w.flush(),
            None => Ok(()),
        }
    }
}

impl Drop for PartFile {
    fn drop(&mut self) {
        // Emptied by a successful finalize.
        if self.final_path.as_os_str().is_empty() {
            return;
        }
        drop(self.writer.take());
        match std::fs::remove_file(&self.temp_path) {
            Ok(()) => tracing::debug!(path = %self.temp_path.display(), "removed partial output"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(
                path = %self.temp_path.display(),
                "could not remove partial output: {}",
                e
            ),
        }
    }
}
