//! Archive extraction into fresh, self-cleaning temporary directories.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use log::debug;
use tempfile::TempDir;

use crate::locator::ResolvedLocation;
use crate::{Result, StubError};

/// The unpacked contents of one stub archive.
///
/// The receiver owns the directory exclusively: dropping the bundle removes
/// it best-effort, [`close`](Self::close) disposes of it explicitly, and
/// [`keep`](Self::keep) detaches it for callers that want the files to
/// outlive the bundle.
#[derive(Debug)]
pub struct ExtractedBundle {
    dir: TempDir,
}

impl ExtractedBundle {
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Remove the directory now, reporting any failure.
    pub fn close(self) -> io::Result<()> {
        self.dir.close()
    }

    /// Detach the directory from cleanup and return its path.
    pub fn keep(self) -> PathBuf {
        self.dir.keep()
    }
}

/// Unpacks a single zip archive addressed by a resolved location.
pub struct ArchiveExtractor;

impl ArchiveExtractor {
    /// Extract the archive at `location` into a brand-new uniquely named
    /// temporary directory, preserving each entry's relative path.
    ///
    /// An unreadable or corrupt archive is a hard failure; partially
    /// extracted entries are not rolled back since the directory is
    /// disposable either way.
    pub fn extract(location: &ResolvedLocation) -> Result<ExtractedBundle> {
        let archive = location
            .to_file_path()
            .ok_or_else(|| StubError::UnsupportedLocation(location.uri.to_string()))?;

        let dir = tempfile::Builder::new().prefix("stubfetch-").tempdir()?;
        Self::unpack_zip(&archive, dir.path())?;
        debug!("extracted {} into {}", archive.display(), dir.path().display());
        Ok(ExtractedBundle { dir })
    }

    fn unpack_zip(archive_path: &Path, dest_dir: &Path) -> Result<()> {
        let corrupt = |reason: String| StubError::CorruptArchive {
            archive: archive_path.display().to_string(),
            reason,
        };

        let file = File::open(archive_path).map_err(|e| corrupt(e.to_string()))?;
        let mut archive =
            zip::ZipArchive::new(BufReader::new(file)).map_err(|e| corrupt(e.to_string()))?;

        for index in 0..archive.len() {
            let mut entry = archive.by_index(index).map_err(|e| corrupt(e.to_string()))?;

            // enclosed_name rejects absolute paths and `..` traversal.
            let relative = entry
                .enclosed_name()
                .ok_or_else(|| corrupt(format!("unsafe entry path: {}", entry.name())))?;
            let outpath = dest_dir.join(relative);

            if entry.is_dir() {
                std::fs::create_dir_all(&outpath)?;
                continue;
            }

            if let Some(parent) = outpath.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let mut outfile = File::create(&outpath)?;
            io::copy(&mut entry, &mut outfile)?;

            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                if let Some(mode) = entry.unix_mode() {
                    std::fs::set_permissions(&outpath, std::fs::Permissions::from_mode(mode))?;
                }
            }
        }

        Ok(())
    }
}
