//! Dependency coordinates identifying one logical artifact family.

use std::fmt;
use std::str::FromStr;

use crate::StubError;

/// Marker accepted (and printed) for the "highest available version".
pub const LATEST_MARKER: &str = "+";

/// Which version of an artifact family to resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionSelector {
    Exact(String),
    Latest,
}

impl VersionSelector {
    pub fn is_latest(&self) -> bool {
        matches!(self, VersionSelector::Latest)
    }
}

impl fmt::Display for VersionSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionSelector::Exact(version) => f.write_str(version),
            VersionSelector::Latest => f.write_str(LATEST_MARKER),
        }
    }
}

/// Immutable (group, module, version selector) triple.
///
/// The textual notation is `group:module:version`, with `+` or `latest` as
/// the latest-version marker; the version part may be omitted entirely and
/// then defaults to latest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StubCoordinates {
    pub group: String,
    pub module: String,
    pub version: VersionSelector,
}

impl StubCoordinates {
    pub fn new(
        group: impl Into<String>,
        module: impl Into<String>,
        version: VersionSelector,
    ) -> Self {
        Self {
            group: group.into(),
            module: module.into(),
            version,
        }
    }

    pub fn latest(group: impl Into<String>, module: impl Into<String>) -> Self {
        Self::new(group, module, VersionSelector::Latest)
    }

    pub fn exact(
        group: impl Into<String>,
        module: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self::new(group, module, VersionSelector::Exact(version.into()))
    }
}

impl fmt::Display for StubCoordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group, self.module, self.version)
    }
}

impl FromStr for StubCoordinates {
    type Err = StubError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = input.split(':').collect();
        let (group, module, version) = match parts.as_slice() {
            [group, module] => (*group, *module, None),
            [group, module, version] => (*group, *module, Some(*version)),
            _ => return Err(StubError::InvalidCoordinates(input.to_string())),
        };

        if group.is_empty() || module.is_empty() {
            return Err(StubError::InvalidCoordinates(input.to_string()));
        }

        let selector = match version {
            None => VersionSelector::Latest,
            Some(v) if v.is_empty() || v == LATEST_MARKER || v.eq_ignore_ascii_case("latest") => {
                VersionSelector::Latest
            }
            Some(v) => VersionSelector::Exact(v.to_string()),
        };

        Ok(StubCoordinates::new(group, module, selector))
    }
}
