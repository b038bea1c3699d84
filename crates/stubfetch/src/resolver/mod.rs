//! Lookup-order strategies over the artifact locator.

mod local;
mod local_first;
mod remote;

pub use local::LocalOnlyResolver;
pub use local_first::LocalFirstThenRemoteResolver;
pub use remote::RemoteOnlyResolver;

use log::{error, warn};
use url::Url;

use crate::coordinates::StubCoordinates;
use crate::locator::{LocateError, ResolvedLocation};

/// A state-free lookup strategy: given a repository root and coordinates,
/// either a resolved location or absence. Every failure is absorbed here;
/// callers never see a transport error, only `None`.
pub trait DependencyResolver {
    fn resolve(
        &self,
        repository_root: &Url,
        coordinates: &StubCoordinates,
    ) -> Option<ResolvedLocation>;
}

/// Connectivity failures log at error level with their cause; a plain
/// not-found is an expected outcome and logs at warning level.
pub(crate) fn log_locate_failure(root: &Url, coordinates: &StubCoordinates, err: &LocateError) {
    if err.is_connectivity() {
        error!("cannot reach {root} while resolving {coordinates}: {err}");
    } else {
        warn!("remote resolution of {coordinates} against {root} failed: {err}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};

    use crate::locator::{ArtifactLocator, LookupSources, ResolutionEngine};

    /// Engine double recording the lookup sources of every resolve call.
    pub(super) struct RecordingEngine {
        pub calls: Mutex<Vec<Vec<Url>>>,
        /// Outcome per call, popped front to back; `true` resolves, `false`
        /// reports not-found.
        pub script: Mutex<Vec<ScriptedOutcome>>,
        pub cache_dir: PathBuf,
    }

    pub(super) enum ScriptedOutcome {
        Resolve(&'static str),
        NotFound,
        Unreachable,
    }

    impl RecordingEngine {
        pub fn new(cache_dir: PathBuf, script: Vec<ScriptedOutcome>) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                script: Mutex::new(script),
                cache_dir,
            }
        }

        pub fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }

        pub fn remotes_of_call(&self, index: usize) -> Vec<Url> {
            self.calls.lock().unwrap()[index].clone()
        }
    }

    impl ResolutionEngine for RecordingEngine {
        fn resolve(
            &self,
            sources: &LookupSources,
            coordinates: &StubCoordinates,
        ) -> Result<ResolvedLocation, LocateError> {
            self.calls
                .lock()
                .unwrap()
                .push(sources.remotes().to_vec());

            match self.script.lock().unwrap().remove(0) {
                ScriptedOutcome::Resolve(version) => {
                    let path = crate::cache::artifact_path(
                        &self.cache_dir,
                        &coordinates.group,
                        &coordinates.module,
                        version,
                    );
                    Ok(ResolvedLocation::from_path(&path).unwrap())
                }
                ScriptedOutcome::NotFound => Err(LocateError::not_found(coordinates)),
                ScriptedOutcome::Unreachable => Err(LocateError::Unreachable {
                    url: "https://repo.example.com".into(),
                    reason: "connection refused".into(),
                }),
            }
        }
    }

    fn locator(engine: &Arc<RecordingEngine>) -> ArtifactLocator {
        let shared: Arc<dyn ResolutionEngine> = engine.clone();
        ArtifactLocator::new(shared, engine.cache_dir.clone())
    }

    fn coords() -> StubCoordinates {
        StubCoordinates::latest("com.acme", "contracts")
    }

    fn root() -> Url {
        Url::parse("https://repo.example.com/stubs").unwrap()
    }

    #[test]
    fn local_only_issues_a_single_call_without_remotes() {
        let engine = Arc::new(RecordingEngine::new(
            PathBuf::from("/cache"),
            vec![ScriptedOutcome::Resolve("1.0.0")],
        ));
        let resolver = LocalOnlyResolver::new(locator(&engine));

        let resolved = resolver.resolve(&root(), &coords());

        assert!(resolved.is_some());
        assert_eq!(engine.call_count(), 1);
        assert!(engine.remotes_of_call(0).is_empty());
    }

    #[test]
    fn local_only_does_not_retry_on_failure() {
        let engine = Arc::new(RecordingEngine::new(
            PathBuf::from("/cache"),
            vec![ScriptedOutcome::NotFound],
        ));
        let resolver = LocalOnlyResolver::new(locator(&engine));

        assert!(resolver.resolve(&root(), &coords()).is_none());
        assert_eq!(engine.call_count(), 1);
    }

    #[test]
    fn local_success_never_touches_the_remote() {
        let engine = Arc::new(RecordingEngine::new(
            PathBuf::from("/cache"),
            vec![ScriptedOutcome::Resolve("1.0.0")],
        ));
        let resolver = LocalFirstThenRemoteResolver::new(locator(&engine));

        let resolved = resolver.resolve(&root(), &coords());

        assert!(resolved.is_some());
        assert_eq!(engine.call_count(), 1);
        assert!(engine.remotes_of_call(0).is_empty());
    }

    #[test]
    fn local_failure_triggers_two_remote_backed_locates_in_order() {
        let cache = tempfile::tempdir().unwrap();
        let engine = Arc::new(RecordingEngine::new(
            cache.path().to_path_buf(),
            vec![
                ScriptedOutcome::NotFound,
                ScriptedOutcome::Resolve("1.0.0"),
                ScriptedOutcome::Resolve("2.0.0"),
            ],
        ));
        let resolver = LocalFirstThenRemoteResolver::new(locator(&engine));

        let resolved = resolver.resolve(&root(), &coords()).unwrap();

        // One local attempt, then two locates carrying the remote root.
        assert_eq!(engine.call_count(), 3);
        assert!(engine.remotes_of_call(0).is_empty());
        assert_eq!(engine.remotes_of_call(1), vec![root()]);
        assert_eq!(engine.remotes_of_call(2), vec![root()]);

        // The second remote locate's result is the one returned.
        assert!(resolved.to_file_path().unwrap().ends_with("2.0.0/contracts-2.0.0.zip"));
    }

    #[test]
    fn remote_only_skips_the_local_attempt() {
        let cache = tempfile::tempdir().unwrap();
        let engine = Arc::new(RecordingEngine::new(
            cache.path().to_path_buf(),
            vec![
                ScriptedOutcome::Resolve("1.0.0"),
                ScriptedOutcome::Resolve("1.0.0"),
            ],
        ));
        let resolver = RemoteOnlyResolver::new(locator(&engine));

        assert!(resolver.resolve(&root(), &coords()).is_some());
        assert_eq!(engine.call_count(), 2);
        assert_eq!(engine.remotes_of_call(0), vec![root()]);
        assert_eq!(engine.remotes_of_call(1), vec![root()]);
    }

    #[test]
    fn first_remote_failure_is_terminal() {
        let engine = Arc::new(RecordingEngine::new(
            PathBuf::from("/cache"),
            vec![ScriptedOutcome::Unreachable],
        ));
        let resolver = RemoteOnlyResolver::new(locator(&engine));

        assert!(resolver.resolve(&root(), &coords()).is_none());
        assert_eq!(engine.call_count(), 1);
    }

    #[test]
    fn invalidation_runs_between_the_two_remote_locates() {
        let cache = tempfile::tempdir().unwrap();
        let module_dir = crate::cache::module_dir(cache.path(), "com.acme", "contracts");
        let stale = module_dir.join("remote-repo-example-com.metadata.json");
        std::fs::create_dir_all(&module_dir).unwrap();
        std::fs::write(&stale, b"{}").unwrap();

        let engine = Arc::new(RecordingEngine::new(
            cache.path().to_path_buf(),
            vec![
                ScriptedOutcome::Resolve("1.0.0"),
                ScriptedOutcome::Resolve("2.0.0"),
            ],
        ));
        let resolver = RemoteOnlyResolver::new(locator(&engine));

        let resolved = resolver.resolve(&root(), &coords()).unwrap();

        assert!(!stale.exists(), "stale metadata must be gone");
        assert!(resolved.to_file_path().unwrap().ends_with("2.0.0/contracts-2.0.0.zip"));
    }
}
