//! Filesystem layout shared by the local cache and repository roots.
//!
//! Both sides use the same tree:
//!
//! ```text
//! <root>/<group dots as dirs>/<module>/<version>/<module>-<version>.zip
//! <root>/<group dots as dirs>/<module>/<module>.metadata.json
//! ```
//!
//! The local cache additionally stores `local.metadata.json` (locally
//! installed versions) and one `remote-<host>.metadata.json` per remote it
//! has fetched metadata from. The invalidator recognizes metadata files by
//! the [`METADATA_SUFFIX`] alone.

use std::path::{Path, PathBuf};

use url::Url;

/// Suffix shared by every version-metadata file.
pub const METADATA_SUFFIX: &str = ".metadata.json";

/// Name of the locally-installed-versions metadata file.
pub const LOCAL_METADATA: &str = "local.metadata.json";

/// Group identifier as a relative directory path (`com.acme` -> `com/acme`).
pub fn group_path(group: &str) -> PathBuf {
    group.split('.').collect()
}

/// Directory holding all of a module's versions and metadata.
pub fn module_dir(root: &Path, group: &str, module: &str) -> PathBuf {
    root.join(group_path(group)).join(module)
}

/// File name of the archive for one version of a module.
pub fn artifact_file_name(module: &str, version: &str) -> String {
    format!("{module}-{version}.zip")
}

/// Full path of the archive for one version of a module.
pub fn artifact_path(root: &Path, group: &str, module: &str, version: &str) -> PathBuf {
    module_dir(root, group, module)
        .join(version)
        .join(artifact_file_name(module, version))
}

/// Name of the metadata document a repository publishes for a module.
pub fn repository_metadata_file(module: &str) -> String {
    format!("{module}{METADATA_SUFFIX}")
}

pub fn local_metadata_path(module_dir: &Path) -> PathBuf {
    module_dir.join(LOCAL_METADATA)
}

/// Cache-side path of the cached copy of `remote`'s metadata for a module.
pub fn remote_metadata_path(module_dir: &Path, remote: &Url) -> PathBuf {
    module_dir.join(format!("remote-{}{}", sanitize_remote(remote), METADATA_SUFFIX))
}

/// Sanitize a remote URL into a directory-name-safe identifier.
///
/// Host (plus port) when the URL has one, the path otherwise (`file://`
/// roots have no host).
pub fn sanitize_remote(url: &Url) -> String {
    let raw = match url.host_str() {
        Some(host) => match url.port() {
            Some(port) => format!("{host}-{port}"),
            None => host.to_string(),
        },
        None => url.path().to_string(),
    };

    raw.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect()
}
