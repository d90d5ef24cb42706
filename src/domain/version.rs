use crate::error::{GitSemverError, Result};
use std::cmp::Ordering;
use std::fmt;

/// Semantic version as found in a release tag.
///
/// Wraps a strict [`semver::Version`] and remembers whether the text it was
/// read from carried a leading `v`, so the tag written for the next release
/// keeps the same shape.
///
/// Equality and ordering follow semver precedence: the numeric triple first,
/// then the pre-release (a release sorts above any of its pre-releases).
/// Build metadata and the `v` prefix never take part in comparisons.
#[derive(Debug, Clone)]
pub struct Version {
    inner: semver::Version,
    v_prefix: bool,
}

impl Version {
    /// Create a plain release version
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Version {
            inner: semver::Version::new(major, minor, patch),
            v_prefix: false,
        }
    }

    /// Parse `[v]MAJOR.MINOR.PATCH[-pre][+build]`
    pub fn parse(text: &str) -> Result<Self> {
        let (v_prefix, rest) = match text.strip_prefix('v') {
            Some(rest) => (true, rest),
            None => (false, text),
        };

        let inner = semver::Version::parse(rest)
            .map_err(|e| GitSemverError::invalid_version(format!("'{}': {}", text, e)))?;

        Ok(Version { inner, v_prefix })
    }

    pub fn major(&self) -> u64 {
        self.inner.major
    }

    pub fn minor(&self) -> u64 {
        self.inner.minor
    }

    pub fn patch(&self) -> u64 {
        self.inner.patch
    }

    pub fn pre_release(&self) -> &str {
        self.inner.pre.as_str()
    }

    pub fn build(&self) -> &str {
        self.inner.build.as_str()
    }

    pub fn has_v_prefix(&self) -> bool {
        self.v_prefix
    }

    /// Same version, rendered with or without a leading `v`
    pub fn with_v_prefix(mut self, v_prefix: bool) -> Self {
        self.v_prefix = v_prefix;
        self
    }

    /// The version text without any `v` prefix, as it appears in manifests
    pub fn semver_text(&self) -> String {
        self.inner.to_string()
    }

    /// Apply an increment. Pre-release and build metadata are cleared by
    /// every real increment; `Increment::None` hands back the same version.
    pub fn bump(&self, increment: Increment) -> Self {
        let (major, minor, patch) = match increment {
            Increment::None => return self.clone(),
            Increment::Major => (self.inner.major + 1, 0, 0),
            Increment::Minor => (self.inner.major, self.inner.minor + 1, 0),
            Increment::Patch => (self.inner.major, self.inner.minor, self.inner.patch + 1),
        };

        Version {
            inner: semver::Version::new(major, minor, patch),
            v_prefix: self.v_prefix,
        }
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.inner.major, self.inner.minor, self.inner.patch)
            .cmp(&(other.inner.major, other.inner.minor, other.inner.patch))
            .then_with(|| self.inner.pre.cmp(&other.inner.pre))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.v_prefix {
            write!(f, "v{}", self.inner)
        } else {
            write!(f, "{}", self.inner)
        }
    }
}

/// Magnitude of a version bump.
///
/// Variants are declared in ascending order so the dominant increment of a
/// set of commits is simply their maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Increment {
    #[default]
    None,
    Patch,
    Minor,
    Major,
}

impl fmt::Display for Increment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Increment::None => "none",
            Increment::Patch => "patch",
            Increment::Minor => "minor",
            Increment::Major => "major",
        };
        write!(f, "{}", name)
    }
}
