use crate::error::{GitSemverError, Result};
use crate::git::{CommitInfo, Credential};
use git2::{
    Cred, CredentialType, ErrorClass, ErrorCode, IndexAddOption, Oid, PushOptions,
    RemoteCallbacks, Repository as Git2Repo, RepositoryOpenFlags, Sort,
};
use std::env;
use std::path::{Path, PathBuf};

/// Environment variable git uses to bound repository discovery
const CEILING_DIRECTORIES_VAR: &str = "GIT_CEILING_DIRECTORIES";

/// Credential callback attempts before giving up on a push
const MAX_CREDENTIAL_ATTEMPTS: usize = 3;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open the repository containing `path`, searching parent directories
    /// up to the ones listed in `GIT_CEILING_DIRECTORIES`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let ceilings: Vec<PathBuf> = env::var_os(CEILING_DIRECTORIES_VAR)
            .map(|value| env::split_paths(&value).collect())
            .unwrap_or_default();
        Self::open_with_ceilings(path, &ceilings)
    }

    /// Open the repository containing `path`; the search never enters a
    /// ceiling directory or its parents
    pub fn open_with_ceilings<P: AsRef<Path>>(path: P, ceilings: &[PathBuf]) -> Result<Self> {
        let path = path.as_ref();
        let repo = Git2Repo::open_ext(path, RepositoryOpenFlags::empty(), ceilings)
            .map_err(|e| match e.code() {
                ErrorCode::NotFound => {
                    GitSemverError::NotARepository(path.display().to_string())
                }
                _ => GitSemverError::from(e),
            })?;

        Ok(Git2Repository { repo })
    }

    fn walk(&self, push: Oid, hide: Option<Oid>) -> Result<Vec<CommitInfo>> {
        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
        revwalk.push(push)?;
        if let Some(hide) = hide {
            revwalk.hide(hide)?;
        }

        let mut commits = Vec::new();
        for oid in revwalk {
            let commit = self.repo.find_commit(oid?)?;
            commits.push(CommitInfo {
                hash: commit.id().to_string(),
                message: String::from_utf8_lossy(commit.message_bytes()).into_owned(),
                author: String::from_utf8_lossy(commit.author().name_bytes()).into_owned(),
            });
        }

        Ok(commits)
    }

    fn resolve_commit(&self, revision: &str) -> Result<Oid> {
        let object = self.repo.revparse_single(revision).map_err(|e| {
            GitSemverError::git(format!("cannot resolve '{}': {}", revision, e.message()))
        })?;
        Ok(object.peel_to_commit()?.id())
    }
}

impl super::Repository for Git2Repository {
    fn list_tags(&self) -> Result<Vec<String>> {
        let tags = self.repo.tag_names(None)?;

        Ok(tags.iter().flatten().map(|s| s.to_string()).collect())
    }

    fn list_all_commits(&self) -> Result<Vec<CommitInfo>> {
        let head = self.resolve_commit("HEAD")?;
        self.walk(head, None)
    }

    fn list_commits_in_range(&self, from_ref: &str, to_ref: &str) -> Result<Vec<CommitInfo>> {
        let from = self.resolve_commit(from_ref)?;
        let to = self.resolve_commit(to_ref)?;
        self.walk(to, Some(from))
    }

    fn create_commit(&self, message: &str) -> Result<String> {
        let mut index = self.repo.index()?;
        index.add_all(["*"], IndexAddOption::DEFAULT, None)?;
        index.update_all(["*"], None)?;
        index.write()?;

        let tree_id = index.write_tree()?;
        let tree = self.repo.find_tree(tree_id)?;
        let signature = self.repo.signature()?;
        let parent = self.repo.head()?.peel_to_commit()?;

        let oid = self.repo.commit(
            Some("HEAD"),
            &signature,
            &signature,
            message,
            &tree,
            &[&parent],
        )?;

        Ok(oid.to_string())
    }

    fn create_tag(&self, name: &str, message: &str) -> Result<()> {
        let head = self.repo.head()?.peel_to_commit()?;
        let signature = self.repo.signature()?;

        self.repo
            .tag(name, head.as_object(), &signature, message, false)
            .map_err(|e| GitSemverError::git(format!("cannot create tag '{}': {}", name, e.message())))?;

        Ok(())
    }

    fn current_branch(&self) -> Result<Option<String>> {
        let head = self.repo.head()?;
        if head.is_branch() {
            Ok(head.shorthand().map(|s| s.to_string()))
        } else {
            Ok(None)
        }
    }

    fn has_remote(&self, remote: &str) -> Result<bool> {
        match self.repo.find_remote(remote) {
            Ok(_) => Ok(true),
            Err(e) if e.code() == ErrorCode::NotFound || e.class() == ErrorClass::Config => {
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn push(&self, remote_name: &str, refs: &[String], credential: &Credential) -> Result<()> {
        let mut remote = self.repo.find_remote(remote_name).map_err(|e| {
            GitSemverError::git(format!("cannot find remote '{}': {}", remote_name, e.message()))
        })?;

        let mut callbacks = RemoteCallbacks::new();
        let mut attempts = 0;
        callbacks.credentials(move |_url, username_from_url, allowed_types| {
            attempts += 1;
            if attempts > MAX_CREDENTIAL_ATTEMPTS {
                return Err(git2::Error::from_str("authentication failed"));
            }

            if let Credential::Basic { username, password } = credential {
                if allowed_types.contains(CredentialType::USER_PASS_PLAINTEXT) {
                    return Cred::userpass_plaintext(username, password);
                }
            }

            if allowed_types.contains(CredentialType::SSH_KEY) {
                return Cred::ssh_key_from_agent(username_from_url.unwrap_or("git"));
            }

            Cred::default()
        });

        callbacks.push_update_reference(|refname, status| match status {
            Some(status) => Err(git2::Error::from_str(&format!(
                "remote rejected {}: {}",
                refname, status
            ))),
            None => Ok(()),
        });

        let mut push_options = PushOptions::new();
        push_options.remote_callbacks(callbacks);

        let refspecs: Vec<String> = refs.iter().map(|r| format!("{}:{}", r, r)).collect();
        let refspec_strs: Vec<&str> = refspecs.iter().map(|s| s.as_str()).collect();

        remote
            .push(&refspec_strs, Some(&mut push_options))
            .map_err(|e| match e.class() {
                ErrorClass::Net => GitSemverError::git(format!("network error during push: {}", e.message())),
                ErrorClass::Reference => {
                    GitSemverError::git(format!("reference error during push: {}", e.message()))
                }
                _ => GitSemverError::git(format!(
                    "failed to push to '{}': {}",
                    remote_name,
                    e.message()
                )),
            })
    }
}
