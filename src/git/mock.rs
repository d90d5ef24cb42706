use crate::error::{GitSemverError, Result};
use crate::git::{CommitInfo, Credential, Repository};
use std::cell::RefCell;
use std::collections::HashMap;

/// A push recorded by the mock
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedPush {
    pub remote: String,
    pub refs: Vec<String>,
    pub credential: Credential,
}

/// Mock repository for testing without actual git operations.
///
/// History is linear: commits are appended oldest first and a tag marks the
/// commit that was HEAD when it was added. Writes (commits, tags, pushes)
/// are recorded so tests can assert on them.
pub struct MockRepository {
    commits: RefCell<Vec<CommitInfo>>,
    tags: RefCell<HashMap<String, usize>>,
    tag_messages: RefCell<HashMap<String, String>>,
    remotes: Vec<String>,
    branch: Option<String>,
    pushes: RefCell<Vec<RecordedPush>>,
    fail_push: bool,
}

impl MockRepository {
    /// Create a new empty mock repository on branch `main`
    pub fn new() -> Self {
        MockRepository {
            commits: RefCell::new(Vec::new()),
            tags: RefCell::new(HashMap::new()),
            tag_messages: RefCell::new(HashMap::new()),
            remotes: Vec::new(),
            branch: Some("main".to_string()),
            pushes: RefCell::new(Vec::new()),
            fail_push: false,
        }
    }

    /// Append a commit on top of HEAD
    pub fn add_commit(&mut self, message: impl Into<String>) -> &mut Self {
        let commits = self.commits.get_mut();
        let hash = format!("{:040x}", commits.len() + 1);
        commits.push(CommitInfo {
            hash,
            message: message.into(),
            author: "Mock Author".to_string(),
        });
        self
    }

    /// Tag the current HEAD (lightweight, no message)
    pub fn add_tag(&mut self, name: impl Into<String>) -> &mut Self {
        let head = self.commits.get_mut().len();
        self.tags.get_mut().insert(name.into(), head);
        self
    }

    pub fn add_remote(&mut self, name: impl Into<String>) -> &mut Self {
        self.remotes.push(name.into());
        self
    }

    /// Make every push fail
    pub fn fail_pushes(&mut self) -> &mut Self {
        self.fail_push = true;
        self
    }

    pub fn detach_head(&mut self) -> &mut Self {
        self.branch = None;
        self
    }

    /// Commits in creation order, oldest first
    pub fn commits(&self) -> Vec<CommitInfo> {
        self.commits.borrow().clone()
    }

    /// Message of an annotated tag created through the trait
    pub fn tag_message(&self, name: &str) -> Option<String> {
        self.tag_messages.borrow().get(name).cloned()
    }

    /// Whether `name` points at the current HEAD
    pub fn tag_points_at_head(&self, name: &str) -> bool {
        self.tags.borrow().get(name).copied() == Some(self.commits.borrow().len())
    }

    pub fn pushes(&self) -> Vec<RecordedPush> {
        self.pushes.borrow().clone()
    }

    fn position_of(&self, reference: &str) -> Result<usize> {
        if reference == "HEAD" {
            return Ok(self.commits.borrow().len());
        }

        let name = reference.strip_prefix("refs/tags/").unwrap_or(reference);
        self.tags
            .borrow()
            .get(name)
            .copied()
            .ok_or_else(|| GitSemverError::git(format!("cannot resolve '{}'", reference)))
    }

    fn newest_first(&self, from: usize, to: usize) -> Vec<CommitInfo> {
        let commits = self.commits.borrow();
        let to = to.min(commits.len());
        let from = from.min(to);
        commits[from..to].iter().rev().cloned().collect()
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn list_tags(&self) -> Result<Vec<String>> {
        let mut tags: Vec<String> = self.tags.borrow().keys().cloned().collect();
        tags.sort();
        Ok(tags)
    }

    fn list_all_commits(&self) -> Result<Vec<CommitInfo>> {
        Ok(self.newest_first(0, self.commits.borrow().len()))
    }

    fn list_commits_in_range(&self, from_ref: &str, to_ref: &str) -> Result<Vec<CommitInfo>> {
        let from = self.position_of(from_ref)?;
        let to = self.position_of(to_ref)?;
        Ok(self.newest_first(from, to))
    }

    fn create_commit(&self, message: &str) -> Result<String> {
        let mut commits = self.commits.borrow_mut();
        let hash = format!("{:040x}", commits.len() + 1);
        commits.push(CommitInfo {
            hash: hash.clone(),
            message: message.to_string(),
            author: "Mock Author".to_string(),
        });
        Ok(hash)
    }

    fn create_tag(&self, name: &str, message: &str) -> Result<()> {
        let head = self.commits.borrow().len();
        let mut tags = self.tags.borrow_mut();
        if tags.contains_key(name) {
            return Err(GitSemverError::git(format!("tag '{}' already exists", name)));
        }
        tags.insert(name.to_string(), head);
        self.tag_messages
            .borrow_mut()
            .insert(name.to_string(), message.to_string());
        Ok(())
    }

    fn current_branch(&self) -> Result<Option<String>> {
        Ok(self.branch.clone())
    }

    fn has_remote(&self, remote: &str) -> Result<bool> {
        Ok(self.remotes.iter().any(|r| r == remote))
    }

    fn push(&self, remote: &str, refs: &[String], credential: &Credential) -> Result<()> {
        if self.fail_push {
            return Err(GitSemverError::git("push rejected"));
        }
        if !self.has_remote(remote)? {
            return Err(GitSemverError::git(format!("cannot find remote '{}'", remote)));
        }

        self.pushes.borrow_mut().push(RecordedPush {
            remote: remote.to_string(),
            refs: refs.to_vec(),
            credential: credential.clone(),
        });
        Ok(())
    }
}
