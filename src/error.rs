use thiserror::Error;

/// Unified error type for git-semver operations
#[derive(Error, Debug)]
pub enum GitSemverError {
    #[error("Not a git repository: {0}")]
    NotARepository(String),

    #[error("Invalid version: {0}")]
    InvalidVersion(String),

    #[error("Malformed version file descriptor '{0}': expected `filename:key`")]
    MalformedVersionFileSpec(String),

    #[error("No released versions found{}", scope_suffix(.0))]
    NoReleasedVersions(Option<String>),

    #[error("No changes detected since {0}: nothing to release")]
    NoChangesDetected(String),

    #[error("Version {version} not found after key {key} in {file}")]
    VersionNotFound {
        file: String,
        key: String,
        version: String,
    },

    #[error("File I/O error on {file}: {source}")]
    FileIo {
        file: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Git operation failed: {0}")]
    GitOperation(String),

    #[error("Invalid tag pattern: {0}")]
    InvalidTagPattern(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

fn scope_suffix(scope: &Option<String>) -> String {
    match scope {
        Some(dir) => format!(" for project '{}'", dir),
        None => String::new(),
    }
}

/// Convenience type alias for Results in git-semver
pub type Result<T> = std::result::Result<T, GitSemverError>;

impl From<git2::Error> for GitSemverError {
    fn from(err: git2::Error) -> Self {
        GitSemverError::GitOperation(err.message().to_string())
    }
}

impl GitSemverError {
    /// Create an invalid version error with context
    pub fn invalid_version(msg: impl Into<String>) -> Self {
        GitSemverError::InvalidVersion(msg.into())
    }

    /// Create a git operation error with context
    pub fn git(msg: impl Into<String>) -> Self {
        GitSemverError::GitOperation(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        GitSemverError::Config(msg.into())
    }

    /// Wrap an I/O error with the file it happened on
    pub fn file_io(file: impl Into<String>, source: std::io::Error) -> Self {
        GitSemverError::FileIo {
            file: file.into(),
            source,
        }
    }
}
