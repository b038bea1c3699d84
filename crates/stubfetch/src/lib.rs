//! Contract-stub retrieval.
//!
//! This crate resolves a logical dependency reference (group, module and a
//! version selector with a "latest" marker) against a local artifact cache
//! and/or a remote artifact repository, then unpacks the resolved archive
//! into a fresh temporary directory for a contract-stub consumer.
//!
//! The policy lives here: lookup ordering between the local cache and the
//! remote repository, fallback on failure, invalidation of stale cached
//! "latest" metadata, and cleaned-up materialization of archive contents.
//! Everything else (version comparison, HTTP transport, archive format) is
//! delegated to its respective library.

pub mod cache;
pub mod config;
pub mod coordinates;
pub mod error;
pub mod extractor;
pub mod fetcher;
pub mod invalidator;
pub mod locator;
pub mod metadata;
pub mod resolver;

pub use config::{default_cache_dir, RepositorySpec};
pub use coordinates::{StubCoordinates, VersionSelector};
pub use error::{Result, StubError};
pub use extractor::{ArchiveExtractor, ExtractedBundle};
pub use fetcher::StubFetcher;
pub use invalidator::FreshnessInvalidator;
pub use locator::{
    ArtifactLocator, LocateError, LookupSources, RepositoryEngine, ResolutionEngine,
    ResolvedLocation,
};
pub use metadata::ModuleMetadata;
pub use resolver::{
    DependencyResolver, LocalFirstThenRemoteResolver, LocalOnlyResolver, RemoteOnlyResolver,
};
