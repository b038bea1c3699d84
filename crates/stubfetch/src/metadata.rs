//! Version-metadata documents stored beside cached artifacts.

use std::fs;
use std::io;
use std::path::Path;

use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};

/// The known versions of one module, as published by a repository or as
/// cached locally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleMetadata {
    pub group: String,
    pub module: String,
    #[serde(default)]
    pub versions: Vec<String>,
    /// When a cached copy of remote metadata was fetched. Absent on the
    /// repository side and in local-install metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fetched_at: Option<DateTime<Utc>>,
}

impl ModuleMetadata {
    pub fn new(group: impl Into<String>, module: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            module: module.into(),
            versions: Vec::new(),
            fetched_at: None,
        }
    }

    pub fn with_versions<I, S>(mut self, versions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.versions = versions.into_iter().map(Into::into).collect();
        self
    }

    /// Load a metadata document, treating a missing or unparsable file as
    /// absent. A corrupt document must never fail resolution; it is simply
    /// not usable as a version source.
    pub fn load(path: &Path) -> Option<Self> {
        let raw = match fs::read(path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return None,
            Err(err) => {
                debug!("cannot read metadata {}: {}", path.display(), err);
                return None;
            }
        };

        match serde_json::from_slice(&raw) {
            Ok(meta) => Some(meta),
            Err(err) => {
                debug!("ignoring unparsable metadata {}: {}", path.display(), err);
                None
            }
        }
    }

    /// Write the document, creating parent directories as needed.
    pub fn store(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_vec_pretty(self).map_err(io::Error::other)?;
        fs::write(path, raw)
    }

    /// Merge another document's versions into this one, deduplicated.
    pub fn merge_versions(&mut self, other: &ModuleMetadata) {
        for version in &other.versions {
            if !self.versions.contains(version) {
                self.versions.push(version.clone());
            }
        }
    }

    /// Highest known version under standard version-string ordering.
    pub fn highest_version(&self) -> Option<String> {
        stubfetch_version::highest(self.versions.iter().map(String::as_str))
            .map(|v| v.as_str().to_string())
    }

    /// Known versions, highest first.
    pub fn versions_descending(&self) -> Vec<&str> {
        let mut parsed: Vec<(stubfetch_version::Version, &str)> = self
            .versions
            .iter()
            .filter_map(|v| stubfetch_version::Version::parse(v).ok().map(|p| (p, v.as_str())))
            .collect();
        parsed.sort_by(|a, b| b.0.cmp(&a.0));
        parsed.into_iter().map(|(_, raw)| raw).collect()
    }

    /// Stamp the document as fetched right now.
    pub fn stamped(mut self) -> Self {
        self.fetched_at = Some(Utc::now());
        self
    }
}
