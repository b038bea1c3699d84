use log::{debug, warn};
use url::Url;

use crate::coordinates::StubCoordinates;
use crate::locator::{ArtifactLocator, ResolvedLocation};

use super::DependencyResolver;

/// Resolves against the local artifact cache exclusively. A failure is
/// reported and final: no retry, no remote fallback.
pub struct LocalOnlyResolver {
    locator: ArtifactLocator,
}

impl LocalOnlyResolver {
    pub fn new(locator: ArtifactLocator) -> Self {
        Self { locator }
    }
}

impl DependencyResolver for LocalOnlyResolver {
    fn resolve(
        &self,
        _repository_root: &Url,
        coordinates: &StubCoordinates,
    ) -> Option<ResolvedLocation> {
        match self.locator.locate(None, coordinates) {
            Ok(location) => {
                debug!("resolved {coordinates} from the local cache");
                Some(location)
            }
            Err(err) => {
                warn!("local resolution of {coordinates} failed: {err}");
                None
            }
        }
    }
}
