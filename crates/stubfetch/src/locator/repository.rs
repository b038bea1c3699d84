//! Default resolution engine over the shared repository/cache layout.

use std::path::PathBuf;
use std::time::Duration;

use log::{debug, warn};
use reqwest::blocking::Client;

use crate::cache;
use crate::coordinates::{StubCoordinates, VersionSelector};
use crate::metadata::ModuleMetadata;
use crate::{Result, StubError};

use super::engine::{LocateError, ResolutionEngine, ResolvedLocation};
use super::remote::RemoteSource;
use super::LookupSources;

const USER_AGENT: &str = concat!("stubfetch/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Resolves coordinates against the local cache and any remote roots in the
/// lookup sources; downloaded artifacts and fetched metadata land in the
/// cache, and every successful resolution points at a cached file.
///
/// For the `Latest` selector a cached copy of a remote's metadata is
/// authoritative until it is deleted; only a cache miss triggers a network
/// fetch. A stale cached "latest" pointer is therefore served as-is, which
/// is exactly what the resolvers' invalidate-and-relocate protocol exists
/// to defeat.
pub struct RepositoryEngine {
    http: Client,
}

impl RepositoryEngine {
    pub fn new() -> Result<Self> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(StubError::Http)?;
        Ok(Self { http })
    }

    fn resolve_exact(
        &self,
        sources: &LookupSources,
        coordinates: &StubCoordinates,
        version: &str,
    ) -> std::result::Result<ResolvedLocation, LocateError> {
        let cached = cache::artifact_path(
            sources.local_cache(),
            &coordinates.group,
            &coordinates.module,
            version,
        );
        if cached.is_file() {
            debug!("{coordinates} already cached at {}", cached.display());
            return location(cached);
        }

        for remote in sources.remotes() {
            let source = RemoteSource::new(remote, &self.http);
            if source.download_artifact(&coordinates.group, &coordinates.module, version, &cached)? {
                return location(cached);
            }
            debug!("{coordinates} not present in {remote}");
        }

        Err(LocateError::not_found(coordinates))
    }

    fn resolve_latest(
        &self,
        sources: &LookupSources,
        coordinates: &StubCoordinates,
    ) -> std::result::Result<ResolvedLocation, LocateError> {
        let module_dir = cache::module_dir(
            sources.local_cache(),
            &coordinates.group,
            &coordinates.module,
        );

        let mut merged =
            ModuleMetadata::new(coordinates.group.clone(), coordinates.module.clone());

        if let Some(local) = ModuleMetadata::load(&cache::local_metadata_path(&module_dir)) {
            merged.merge_versions(&local);
        }

        for remote in sources.remotes() {
            if let Some(meta) = self.remote_metadata(remote, coordinates, &module_dir)? {
                merged.merge_versions(&meta);
            }
        }

        let highest = merged
            .highest_version()
            .ok_or_else(|| LocateError::not_found(coordinates))?;
        debug!("{coordinates} selects version {highest}");

        let cached = cache::artifact_path(
            sources.local_cache(),
            &coordinates.group,
            &coordinates.module,
            &highest,
        );
        if cached.is_file() {
            return location(cached);
        }

        if !sources.has_remotes() {
            // Purely local lookup: the pointer may outlive the artifact, so
            // fall back to the highest version actually present on disk.
            for version in merged.versions_descending() {
                let candidate = cache::artifact_path(
                    sources.local_cache(),
                    &coordinates.group,
                    &coordinates.module,
                    version,
                );
                if candidate.is_file() {
                    return location(candidate);
                }
            }
            return Err(LocateError::not_found(coordinates));
        }

        for remote in sources.remotes() {
            let source = RemoteSource::new(remote, &self.http);
            if source.download_artifact(&coordinates.group, &coordinates.module, &highest, &cached)?
            {
                return location(cached);
            }
        }

        Err(LocateError::not_found(coordinates))
    }

    /// Metadata for one remote: the cached copy when present, otherwise
    /// fetched from the remote and written back beside the artifacts.
    fn remote_metadata(
        &self,
        remote: &url::Url,
        coordinates: &StubCoordinates,
        module_dir: &std::path::Path,
    ) -> std::result::Result<Option<ModuleMetadata>, LocateError> {
        let cached_path = cache::remote_metadata_path(module_dir, remote);
        if let Some(cached) = ModuleMetadata::load(&cached_path) {
            debug!(
                "using cached metadata for {coordinates} from {}",
                cached_path.display()
            );
            return Ok(Some(cached));
        }

        let source = RemoteSource::new(remote, &self.http);
        let fetched = source.fetch_metadata(&coordinates.group, &coordinates.module)?;
        if let Some(meta) = &fetched {
            if let Err(err) = meta.clone().stamped().store(&cached_path) {
                warn!(
                    "cannot cache metadata for {coordinates} at {}: {err}",
                    cached_path.display()
                );
            }
        }
        Ok(fetched)
    }
}

impl ResolutionEngine for RepositoryEngine {
    fn resolve(
        &self,
        sources: &LookupSources,
        coordinates: &StubCoordinates,
    ) -> std::result::Result<ResolvedLocation, LocateError> {
        if coordinates.group.is_empty() || coordinates.module.is_empty() {
            return Err(LocateError::InvalidCoordinates(coordinates.to_string()));
        }

        match &coordinates.version {
            VersionSelector::Exact(version) => self.resolve_exact(sources, coordinates, version),
            VersionSelector::Latest => self.resolve_latest(sources, coordinates),
        }
    }
}

fn location(path: PathBuf) -> std::result::Result<ResolvedLocation, LocateError> {
    ResolvedLocation::from_path(&path).ok_or_else(|| {
        LocateError::Io(std::io::Error::other(format!(
            "cannot express {} as a file URI",
            path.display()
        )))
    })
}
