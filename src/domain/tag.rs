use crate::domain::Version;
use crate::error::{GitSemverError, Result};
use regex::Regex;

/// Semver text inside a tag name: optional `v`, three numeric components,
/// optional pre-release and build. Components are deliberately looser than
/// semver (leading zeros are accepted) so that malformed release tags are
/// caught by the strict parse instead of silently ignored.
pub const SEMVER_PATTERN: &str = r"v?\d+\.\d+\.\d+(?:-[0-9A-Za-z-]+(?:\.[0-9A-Za-z-]+)*)?(?:\+[0-9A-Za-z-]+(?:\.[0-9A-Za-z-]+)*)?";

/// Which tags belong to a project.
///
/// A project at the repository root owns bare version tags (`1.2.3`,
/// `v1.2.3`); a sub-project owns `<dir>/<version>` tags only.
#[derive(Debug, Clone)]
pub struct TagScope {
    dir: Option<String>,
    regex: Regex,
}

impl TagScope {
    /// Build the scope for a sub-directory. An empty dir, `.` or `/` means
    /// the repository root.
    pub fn new(dir: &str) -> Result<Self> {
        let dir = normalize_dir(dir);

        let pattern = match &dir {
            Some(dir) => format!("^{}/({})$", regex::escape(dir), SEMVER_PATTERN),
            None => format!("^({})$", SEMVER_PATTERN),
        };

        let regex =
            Regex::new(&pattern).map_err(|e| GitSemverError::InvalidTagPattern(e.to_string()))?;

        Ok(TagScope { dir, regex })
    }

    /// Sub-directory this scope is bound to, `None` at the root
    pub fn dir(&self) -> Option<&str> {
        self.dir.as_deref()
    }

    pub fn is_sub_project(&self) -> bool {
        self.dir.is_some()
    }

    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    /// Whether the tag belongs to this scope
    pub fn matches(&self, tag: &str) -> bool {
        self.regex.is_match(tag)
    }

    /// Version text of a tag in this scope (`packages/api/v1.0.0` -> `v1.0.0`)
    pub fn version_text<'a>(&self, tag: &'a str) -> Option<&'a str> {
        self.regex
            .captures(tag)
            .and_then(|captures| captures.get(1))
            .map(|m| m.as_str())
    }

    /// Parse the version a tag in this scope refers to.
    ///
    /// Returns `Ok(None)` for tags outside the scope and an `InvalidVersion`
    /// error for tags inside it whose version text is not valid semver.
    pub fn parse_tag(&self, tag: &str) -> Result<Option<Version>> {
        match self.version_text(tag) {
            Some(text) => Version::parse(text)
                .map(Some)
                .map_err(|e| GitSemverError::invalid_version(format!("tag '{}': {}", tag, e))),
            None => Ok(None),
        }
    }

    /// Tag name a release of `version` gets in this scope
    pub fn tag_name(&self, version: &Version) -> String {
        match &self.dir {
            Some(dir) => format!("{}/{}", dir, version),
            None => version.to_string(),
        }
    }
}

fn normalize_dir(dir: &str) -> Option<String> {
    let trimmed = dir.trim().trim_start_matches("./").trim_matches('/');
    if trimmed.is_empty() || trimmed == "." {
        None
    } else {
        Some(trimmed.to_string())
    }
}
