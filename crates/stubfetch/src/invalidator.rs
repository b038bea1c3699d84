//! Removal of cached version metadata after a remote-backed resolution.

use std::fs;
use std::path::Path;

use log::{debug, warn};

use crate::cache::METADATA_SUFFIX;
use crate::locator::ResolvedLocation;

/// Deletes the cached version-metadata files for a resolved artifact's
/// owning module, so that the next lookup re-evaluates "latest" against the
/// remote source instead of serving a stale cached pointer.
///
/// Best-effort by contract: partial failures are logged and never escalate,
/// and the artifact files themselves are never touched. Must only run after
/// a successful remote-backed resolution; the purely local path has no
/// remote to re-evaluate against.
pub struct FreshnessInvalidator;

impl FreshnessInvalidator {
    pub fn invalidate(location: &ResolvedLocation) {
        let Some(artifact) = location.to_file_path() else {
            debug!("not a local artifact, nothing to invalidate: {}", location.uri);
            return;
        };

        // <cache>/<group…>/<module>/<version>/<artifact> -> module dir.
        let Some(module_dir) = artifact.parent().and_then(Path::parent) else {
            debug!("no module directory above {}", artifact.display());
            return;
        };

        let entries = match fs::read_dir(module_dir) {
            Ok(entries) => entries,
            Err(err) => {
                warn!("cannot scan {} for metadata: {}", module_dir.display(), err);
                return;
            }
        };

        for entry in entries.flatten() {
            let name = entry.file_name();
            if !name.to_string_lossy().ends_with(METADATA_SUFFIX) {
                continue;
            }
            match fs::remove_file(entry.path()) {
                Ok(()) => debug!("removed stale metadata {}", entry.path().display()),
                Err(err) => warn!(
                    "cannot remove stale metadata {}: {}",
                    entry.path().display(),
                    err
                ),
            }
        }
    }
}
