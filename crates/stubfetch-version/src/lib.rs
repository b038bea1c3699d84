//! Version-string ordering for stub artifact selection.
//!
//! Repositories expose plain version strings; when a consumer asks for the
//! "latest" artifact we have to rank them. Numeric segments compare
//! numerically, textual qualifiers rank below releases
//! (`snapshot < alpha < beta < milestone < rc < release`), and a missing
//! segment counts as a release, so `1.0` sorts above `1.0-rc` but below
//! `1.0.1`.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VersionError {
    #[error("empty version string")]
    Empty,
}

/// A single dot- or dash-separated part of a version string.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Number(u64),
    Qualifier(String),
}

impl Segment {
    fn rank(&self) -> u8 {
        match self {
            // Numbers outrank every qualifier, including "release".
            Segment::Number(_) => 7,
            Segment::Qualifier(q) => qualifier_rank(q),
        }
    }
}

/// Rank of the implicit segment used to pad the shorter version.
const RELEASE_RANK: u8 = 5;

fn qualifier_rank(qualifier: &str) -> u8 {
    match qualifier {
        "snapshot" => 0,
        "alpha" | "a" => 1,
        "beta" | "b" => 2,
        "milestone" | "m" => 3,
        "rc" | "cr" => 4,
        "" | "release" | "final" | "ga" => RELEASE_RANK,
        _ => 6,
    }
}

/// A parsed, orderable version string.
///
/// Ordering is total; equality follows ordering, so `1.0` and `1.0.0`
/// compare equal while keeping their original spelling for display.
#[derive(Debug, Clone)]
pub struct Version {
    original: String,
    segments: Vec<Segment>,
}

impl Version {
    pub fn parse(input: &str) -> Result<Self, VersionError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(VersionError::Empty);
        }

        let segments = trimmed
            .split(['.', '-', '_'])
            .filter(|part| !part.is_empty())
            .map(|part| match part.parse::<u64>() {
                Ok(n) => Segment::Number(n),
                Err(_) => Segment::Qualifier(part.to_ascii_lowercase()),
            })
            .collect();

        Ok(Self {
            original: trimmed.to_string(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.original
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Version::parse(s)
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.segments.len().max(other.segments.len());
        for i in 0..len {
            let ordering = match (self.segments.get(i), other.segments.get(i)) {
                (Some(a), Some(b)) => compare_segments(a, b),
                (Some(a), None) => compare_padded(a),
                (None, Some(b)) => compare_padded(b).reverse(),
                (None, None) => Ordering::Equal,
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    }
}

fn compare_segments(a: &Segment, b: &Segment) -> Ordering {
    match (a, b) {
        (Segment::Number(x), Segment::Number(y)) => x.cmp(y),
        (Segment::Qualifier(x), Segment::Qualifier(y)) => {
            let (rx, ry) = (qualifier_rank(x), qualifier_rank(y));
            if rx != ry {
                rx.cmp(&ry)
            } else {
                x.cmp(y)
            }
        }
        _ => a.rank().cmp(&b.rank()),
    }
}

/// Compare a present segment against the implicit release padding of the
/// shorter version: `1.0.1 > 1.0`, but `1.0-rc < 1.0`.
fn compare_padded(present: &Segment) -> Ordering {
    match present {
        Segment::Number(0) => Ordering::Equal,
        Segment::Number(_) => Ordering::Greater,
        Segment::Qualifier(q) => qualifier_rank(q).cmp(&RELEASE_RANK),
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

/// Pick the highest version among `candidates`, skipping unparsable entries.
pub fn highest<'a, I>(candidates: I) -> Option<Version>
where
    I: IntoIterator<Item = &'a str>,
{
    candidates
        .into_iter()
        .filter_map(|c| Version::parse(c).ok())
        .max()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> Version {
        Version::parse(s).unwrap()
    }

    #[test]
    fn numeric_segments_compare_numerically() {
        assert!(v("1.10.0") > v("1.9.0"));
        assert!(v("2.0") > v("1.999"));
        assert!(v("0.1") < v("0.2"));
    }

    #[test]
    fn missing_segments_count_as_release() {
        assert_eq!(v("1.0"), v("1.0.0"));
        assert!(v("1.0.1") > v("1.0"));
        assert!(v("1.0") > v("1.0-rc"));
        assert!(v("1.0") > v("1.0-snapshot"));
    }

    #[test]
    fn qualifier_ordering() {
        assert!(v("1.0-snapshot") < v("1.0-alpha"));
        assert!(v("1.0-alpha") < v("1.0-beta"));
        assert!(v("1.0-beta") < v("1.0-milestone"));
        assert!(v("1.0-milestone") < v("1.0-rc"));
        assert!(v("1.0-rc") < v("1.0"));
        assert_eq!(v("1.0-ga"), v("1.0"));
    }

    #[test]
    fn qualifiers_are_case_insensitive() {
        assert_eq!(v("1.0-SNAPSHOT"), v("1.0-snapshot"));
        assert!(v("1.0-RC") < v("1.0"));
    }

    #[test]
    fn numbers_outrank_qualifiers() {
        assert!(v("1.0.1") > v("1.0-rc"));
    }

    #[test]
    fn unknown_qualifiers_sort_after_release_lexically() {
        assert!(v("1.0-zeta") > v("1.0"));
        assert!(v("1.0-patched") < v("1.0-zeta"));
    }

    #[test]
    fn empty_input_is_rejected() {
        assert_eq!(Version::parse(""), Err(VersionError::Empty));
        assert_eq!(Version::parse("   "), Err(VersionError::Empty));
    }

    #[test]
    fn display_preserves_original_spelling() {
        assert_eq!(v("1.0.0-RC").to_string(), "1.0.0-RC");
    }

    #[test]
    fn highest_picks_the_maximum() {
        let picked = highest(["1.0.0", "2.0.0", "2.0.0-rc", "0.9"]).unwrap();
        assert_eq!(picked.as_str(), "2.0.0");
    }

    #[test]
    fn highest_skips_unparsable_candidates() {
        let picked = highest(["", "1.5.0"]).unwrap();
        assert_eq!(picked.as_str(), "1.5.0");
    }

    #[test]
    fn highest_of_nothing_is_none() {
        assert!(highest([]).is_none());
    }
}
