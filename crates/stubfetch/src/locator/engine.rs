use std::path::{Path, PathBuf};

use thiserror::Error;
use url::Url;

use crate::coordinates::StubCoordinates;

use super::LookupSources;

/// Where a resolved artifact lives. Always a `file://` URI into the local
/// cache once resolution has succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLocation {
    pub uri: Url,
}

impl ResolvedLocation {
    pub fn new(uri: Url) -> Self {
        Self { uri }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        Url::from_file_path(path).ok().map(Self::new)
    }

    pub fn to_file_path(&self) -> Option<PathBuf> {
        self.uri.to_file_path().ok()
    }
}

/// Why a locate attempt produced no location. These are ordinary fallback
/// triggers for the resolver layer, never faults.
#[derive(Debug, Error)]
pub enum LocateError {
    #[error("no matching artifact for {coordinates}")]
    NotFound { coordinates: String },

    #[error("repository {url} unreachable: {reason}")]
    Unreachable { url: String, reason: String },

    #[error("invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl LocateError {
    pub fn not_found(coordinates: &StubCoordinates) -> Self {
        LocateError::NotFound {
            coordinates: coordinates.to_string(),
        }
    }

    pub fn unreachable(url: &Url, reason: impl ToString) -> Self {
        LocateError::Unreachable {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Connectivity failures are logged at error level by the resolvers;
    /// everything else is an expected not-found.
    pub fn is_connectivity(&self) -> bool {
        matches!(self, LocateError::Unreachable { .. })
    }
}

/// The coordinate-to-location resolution engine.
///
/// Given lookup sources and coordinates it either produces the location of
/// the artifact (materialized in the local cache) or a [`LocateError`].
/// For the `Latest` selector the engine owns the "highest version wins"
/// contract. The trait is the substitution seam for test doubles.
pub trait ResolutionEngine: Send + Sync {
    fn resolve(
        &self,
        sources: &LookupSources,
        coordinates: &StubCoordinates,
    ) -> Result<ResolvedLocation, LocateError>;
}
