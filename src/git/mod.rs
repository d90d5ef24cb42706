//! Git operations abstraction layer
//!
//! This module provides a trait-based abstraction over the handful of Git
//! operations git-semver needs, so the version logic can run against a real
//! repository or an in-memory mock.
//!
//! # Overview
//!
//! - [repository::Git2Repository]: A real implementation using the `git2` crate
//! - [mock::MockRepository]: A mock implementation for testing
//!
//! # Usage
//!
//! ```rust
//! # use git_semver::git::Repository;
//! # fn example<R: Repository>(repo: &R) -> git_semver::Result<()> {
//! let tags = repo.list_tags()?;
//! let commits = repo.list_commits_in_range("refs/tags/1.0.0", "HEAD")?;
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::error::Result;

/// Commit information for analysis
#[derive(Debug, Clone, PartialEq)]
pub struct CommitInfo {
    /// The commit hash
    pub hash: String,
    /// The full commit message
    pub message: String,
    /// The commit author
    pub author: String,
}

/// Credentials used when pushing to a remote
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Credential {
    /// Rely on ssh-agent, ssh keys or git credential helpers
    #[default]
    None,
    /// HTTP basic authentication
    Basic { username: String, password: String },
}

impl Credential {
    /// Basic auth when a username is given, otherwise no explicit credential
    pub fn from_parts(username: Option<String>, password: Option<String>) -> Self {
        match username {
            Some(username) => Credential::Basic {
                username,
                password: password.unwrap_or_default(),
            },
            None => Credential::None,
        }
    }
}

/// Common git operation trait for abstraction
///
/// ## Error Handling
///
/// All methods return [crate::error::Result<T>]. Implementations map
/// underlying failures to [crate::error::GitSemverError::GitOperation].
pub trait Repository {
    /// Get all tag names in the repository
    fn list_tags(&self) -> Result<Vec<String>>;

    /// Every commit reachable from HEAD, most recent first
    fn list_all_commits(&self) -> Result<Vec<CommitInfo>>;

    /// Commits reachable from `to_ref` but not from `from_ref`,
    /// most recent first
    ///
    /// # Arguments
    /// * `from_ref` - Starting revision (exclusive)
    /// * `to_ref` - Ending revision (inclusive)
    fn list_commits_in_range(&self, from_ref: &str, to_ref: &str) -> Result<Vec<CommitInfo>>;

    /// Stage every working-tree change and commit it on top of HEAD.
    ///
    /// Returns the new commit id.
    fn create_commit(&self, message: &str) -> Result<String>;

    /// Create an annotated tag pointing at HEAD
    fn create_tag(&self, name: &str, message: &str) -> Result<()>;

    /// Name of the branch HEAD points to, `None` when detached
    fn current_branch(&self) -> Result<Option<String>>;

    /// Whether a remote with this name is configured
    fn has_remote(&self, remote: &str) -> Result<bool>;

    /// Push refs (`refs/tags/...`, `refs/heads/...`) to a remote
    fn push(&self, remote: &str, refs: &[String], credential: &Credential) -> Result<()>;
}
