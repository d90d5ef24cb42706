use crate::domain::Version;
use crate::error::{GitSemverError, Result};
use regex::Regex;
use std::fmt;
use std::str::FromStr;

/// A file holding a version string and the key that precedes it,
/// written on the command line as `filename:key`
/// (e.g. `package.json:"version"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionFile {
    pub filename: String,
    pub key: String,
}

impl VersionFile {
    pub fn new(filename: impl Into<String>, key: impl Into<String>) -> Self {
        VersionFile {
            filename: filename.into(),
            key: key.into(),
        }
    }

    /// Replace the first `current` version found after `key` on the same
    /// line with `next`.
    ///
    /// The version must stand on its own: `1.0.0` does not match inside
    /// `11.0.0`, `21.0.0` or `1.0.0-rc.1`. Versions are written without any
    /// `v` prefix; a `v` already present in the file is left where it is.
    pub fn rewrite(&self, contents: &str, current: &Version, next: &Version) -> Result<String> {
        let current_text = current.semver_text();
        let pattern = format!(
            r"(?m){}(?:[^\n]*?[^0-9A-Za-z.\n])?v?({})(?:$|[^0-9A-Za-z.+-])",
            regex::escape(&self.key),
            regex::escape(&current_text)
        );
        let regex = Regex::new(&pattern).map_err(|e| {
            GitSemverError::MalformedVersionFileSpec(format!("{} ({})", self, e))
        })?;

        let version = regex
            .captures(contents)
            .and_then(|captures| captures.get(1))
            .ok_or_else(|| GitSemverError::VersionNotFound {
                file: self.filename.clone(),
                key: self.key.clone(),
                version: current_text.clone(),
            })?;

        let mut rewritten = String::with_capacity(contents.len() + 8);
        rewritten.push_str(&contents[..version.start()]);
        rewritten.push_str(&next.semver_text());
        rewritten.push_str(&contents[version.end()..]);

        Ok(rewritten)
    }
}

impl FromStr for VersionFile {
    type Err = GitSemverError;

    /// Split on the first `:`. Both halves must be non-empty; the key may
    /// itself contain colons.
    fn from_str(s: &str) -> Result<Self> {
        match s.split_once(':') {
            Some((filename, key)) if !filename.is_empty() && !key.is_empty() => {
                Ok(VersionFile::new(filename, key))
            }
            _ => Err(GitSemverError::MalformedVersionFileSpec(s.to_string())),
        }
    }
}

impl fmt::Display for VersionFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.filename, self.key)
    }
}
