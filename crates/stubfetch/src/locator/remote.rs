//! Transport to a remote repository root (`http(s)://` or `file://`).
//!
//! Deliberately minimal: fetch a module's metadata document, or pull one
//! artifact into the cache. Status/transport errors map onto
//! [`LocateError`]; a missing document is `Ok(None)`/`Ok(false)`, not an
//! error, so callers can fall through to other sources.

use std::fs;
use std::io;
use std::path::Path;

use log::{debug, warn};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use tempfile::NamedTempFile;
use url::Url;

use crate::cache;
use crate::metadata::ModuleMetadata;

use super::engine::LocateError;

pub struct RemoteSource<'a> {
    root: &'a Url,
    http: &'a Client,
}

impl<'a> RemoteSource<'a> {
    pub fn new(root: &'a Url, http: &'a Client) -> Self {
        Self { root, http }
    }

    /// Fetch the repository's metadata document for a module.
    ///
    /// `Ok(None)` means the repository is reachable but publishes no
    /// metadata for this module (or publishes an unusable document).
    pub fn fetch_metadata(
        &self,
        group: &str,
        module: &str,
    ) -> Result<Option<ModuleMetadata>, LocateError> {
        let metadata_file = cache::repository_metadata_file(module);

        if self.root.scheme() == "file" {
            let root_dir = self.file_root()?;
            let path = cache::module_dir(&root_dir, group, module).join(&metadata_file);
            if !path.is_file() {
                return Ok(None);
            }
            return Ok(ModuleMetadata::load(&path));
        }

        let url = self.join(group, module, &[&metadata_file])?;
        let response = self
            .http
            .get(url.as_str())
            .send()
            .map_err(|e| LocateError::unreachable(self.root, e))?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => match response.json::<ModuleMetadata>() {
                Ok(meta) => Ok(Some(meta)),
                Err(err) => {
                    warn!("unusable metadata document at {url}: {err}");
                    Ok(None)
                }
            },
            status => Err(LocateError::unreachable(self.root, format!("HTTP {status}"))),
        }
    }

    /// Download one version's archive to `dest`. Returns `false` when the
    /// repository does not have that version.
    ///
    /// The body is staged into a temporary file beside `dest` and only
    /// persisted once complete; an interrupted transfer must never leave a
    /// partial artifact at the cached path, where later resolutions would
    /// treat it as authoritative.
    pub fn download_artifact(
        &self,
        group: &str,
        module: &str,
        version: &str,
        dest: &Path,
    ) -> Result<bool, LocateError> {
        let file_name = cache::artifact_file_name(module, version);

        if self.root.scheme() == "file" {
            let root_dir = self.file_root()?;
            let source = cache::artifact_path(&root_dir, group, module, version);
            if !source.is_file() {
                return Ok(false);
            }
            let staging = staging_file(dest)?;
            fs::copy(&source, staging.path())?;
            persist(staging, dest)?;
            debug!("copied {} to {}", source.display(), dest.display());
            return Ok(true);
        }

        let url = self.join(group, module, &[version, &file_name])?;
        let mut response = self
            .http
            .get(url.as_str())
            .send()
            .map_err(|e| LocateError::unreachable(self.root, e))?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(false),
            status if status.is_success() => {
                let mut staging = staging_file(dest)?;
                response
                    .copy_to(staging.as_file_mut())
                    .map_err(|e| LocateError::unreachable(self.root, e))?;
                persist(staging, dest)?;
                debug!("downloaded {url} to {}", dest.display());
                Ok(true)
            }
            status => Err(LocateError::unreachable(self.root, format!("HTTP {status}"))),
        }
    }

    /// The repository root as a directory, for `file://` roots. A root that
    /// does not exist on disk is unreachable, matching the transport-error
    /// classification of the HTTP path.
    fn file_root(&self) -> Result<std::path::PathBuf, LocateError> {
        let dir = self
            .root
            .to_file_path()
            .map_err(|()| LocateError::unreachable(self.root, "not a valid file path"))?;
        if !dir.is_dir() {
            return Err(LocateError::unreachable(self.root, "no such directory"));
        }
        Ok(dir)
    }

    /// `<root>/<group dirs>/<module>/<tail...>`.
    fn join(&self, group: &str, module: &str, tail: &[&str]) -> Result<Url, LocateError> {
        let mut url = self.root.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| LocateError::unreachable(self.root, "root is not a base URL"))?;
            segments.pop_if_empty();
            segments.extend(group.split('.'));
            segments.push(module);
            segments.extend(tail.iter().copied());
        }
        Ok(url)
    }
}

/// Temporary file in `dest`'s directory, so the later rename stays on one
/// filesystem. Dropped (and deleted) automatically if the transfer fails.
fn staging_file(dest: &Path) -> io::Result<NamedTempFile> {
    let dir = dest.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir)?;
    NamedTempFile::new_in(dir)
}

fn persist(staging: NamedTempFile, dest: &Path) -> Result<(), LocateError> {
    staging
        .persist(dest)
        .map(|_| ())
        .map_err(|e| LocateError::Io(e.error))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source_url(root: &str, f: impl FnOnce(&RemoteSource<'_>) -> Url) -> Url {
        let root = Url::parse(root).unwrap();
        let http = Client::new();
        let source = RemoteSource::new(&root, &http);
        f(&source)
    }

    #[test]
    fn joins_group_segments_under_the_root() {
        let url = source_url("https://repo.example.com/stubs", |s| {
            s.join("com.acme", "contracts", &["1.0", "contracts-1.0.zip"])
                .unwrap()
        });
        assert_eq!(
            url.as_str(),
            "https://repo.example.com/stubs/com/acme/contracts/1.0/contracts-1.0.zip"
        );
    }

    #[test]
    fn trailing_slash_on_the_root_does_not_double() {
        let url = source_url("https://repo.example.com/stubs/", |s| {
            s.join("acme", "contracts", &["contracts.metadata.json"]).unwrap()
        });
        assert_eq!(
            url.as_str(),
            "https://repo.example.com/stubs/acme/contracts/contracts.metadata.json"
        );
    }

    #[test]
    fn missing_file_root_is_a_connectivity_failure() {
        let root = Url::parse("file:///definitely/not/here").unwrap();
        let http = Client::new();
        let source = RemoteSource::new(&root, &http);
        let err = source.fetch_metadata("com.acme", "contracts").unwrap_err();
        assert!(err.is_connectivity());
    }

    #[test]
    fn successful_download_leaves_only_the_artifact() {
        let remote_dir = tempfile::tempdir().unwrap();
        let cache_dir = tempfile::tempdir().unwrap();
        let published =
            cache::artifact_path(remote_dir.path(), "com.acme", "contracts", "1.0.0");
        fs::create_dir_all(published.parent().unwrap()).unwrap();
        fs::write(&published, b"archive bytes").unwrap();

        let root = Url::from_directory_path(remote_dir.path()).unwrap();
        let http = Client::new();
        let dest = cache::artifact_path(cache_dir.path(), "com.acme", "contracts", "1.0.0");
        let downloaded = RemoteSource::new(&root, &http)
            .download_artifact("com.acme", "contracts", "1.0.0", &dest)
            .unwrap();

        assert!(downloaded);
        assert_eq!(fs::read(&dest).unwrap(), b"archive bytes");

        // The staging file was persisted, not left behind.
        let siblings = fs::read_dir(dest.parent().unwrap()).unwrap().count();
        assert_eq!(siblings, 1);
    }

    #[test]
    fn file_root_without_module_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let root = Url::from_directory_path(dir.path()).unwrap();
        let http = Client::new();
        let source = RemoteSource::new(&root, &http);
        assert!(source.fetch_metadata("com.acme", "contracts").unwrap().is_none());
        let dest = dir.path().join("dest.zip");
        assert!(!source
            .download_artifact("com.acme", "contracts", "1.0", &dest)
            .unwrap());
    }
}
