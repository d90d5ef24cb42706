//! Release discovery and the bump workflow for one project
//!
//! A [`Project`] is a repository plus an optional sub-directory scope. The
//! scope decides which tags count as releases of the project and how the
//! next release tag is named. Everything else (latest version, commits since
//! that release, the next version) derives from those tags.

use std::fs;
use std::path::{Path, PathBuf};

use crate::analyzer::IncrementAnalyzer;
use crate::boundary::BoundaryWarning;
use crate::domain::{Increment, TagScope, Version, VersionFile};
use crate::error::{GitSemverError, Result};
use crate::git::{CommitInfo, Credential, Git2Repository, Repository};

/// A release tag together with the version it carries
#[derive(Debug, Clone, PartialEq)]
pub struct Release {
    pub tag: String,
    pub version: Version,
}

/// Everything needed to decide the next version
#[derive(Debug, Clone)]
pub struct ReleasePlan {
    /// Latest release, `None` when the project was never released
    pub latest: Option<Release>,
    /// Version the increment applies to: the latest release or `0.0.0`
    pub base: Version,
    /// Commits since the latest release (all commits when unreleased)
    pub commits: Vec<CommitInfo>,
    pub increment: Increment,
    pub next: Version,
}

/// Options of the `bump` workflow
#[derive(Debug, Clone)]
pub struct BumpOptions {
    pub version_files: Vec<VersionFile>,
    /// Directory version files are resolved against
    pub base_dir: PathBuf,
    pub v_prefix: bool,
    /// Rewrite and commit, but do not tag (nor push a tag)
    pub skip_tag: bool,
    pub push: bool,
    pub remote: String,
    pub credential: Credential,
}

impl Default for BumpOptions {
    fn default() -> Self {
        BumpOptions {
            version_files: Vec::new(),
            base_dir: PathBuf::from("."),
            v_prefix: false,
            skip_tag: false,
            push: true,
            remote: "origin".to_string(),
            credential: Credential::None,
        }
    }
}

/// What a successful bump did
#[derive(Debug, Clone)]
pub struct BumpOutcome {
    pub previous: Version,
    pub next: Version,
    pub increment: Increment,
    pub rewritten_files: Vec<PathBuf>,
    pub commit: Option<String>,
    pub tag: Option<String>,
    pub pushed_refs: Vec<String>,
    pub warnings: Vec<BoundaryWarning>,
}

/// A repository, or a sub-directory of one, that is versioned on its own
pub struct Project<R: Repository> {
    repo: R,
    scope: TagScope,
    analyzer: IncrementAnalyzer,
}

impl Project<Git2Repository> {
    /// Open the repository containing `root` and scope it to `dir`
    /// (empty for the repository root)
    pub fn open<P: AsRef<Path>>(root: P, dir: &str) -> Result<Self> {
        let repo = Git2Repository::open(root)?;
        Project::new(repo, dir)
    }
}

impl<R: Repository> Project<R> {
    pub fn new(repo: R, dir: &str) -> Result<Self> {
        Ok(Project {
            repo,
            scope: TagScope::new(dir)?,
            analyzer: IncrementAnalyzer::default(),
        })
    }

    /// Replace the default conventional-commit rules
    pub fn with_analyzer(mut self, analyzer: IncrementAnalyzer) -> Self {
        self.analyzer = analyzer;
        self
    }

    pub fn repo(&self) -> &R {
        &self.repo
    }

    pub fn scope(&self) -> &TagScope {
        &self.scope
    }

    pub fn is_sub_project(&self) -> bool {
        self.scope.is_sub_project()
    }

    /// Sub-directory of the project, `.` for the repository root
    pub fn display_name(&self) -> &str {
        self.scope.dir().unwrap_or(".")
    }

    /// Tag names that belong to this project, in repository order
    pub fn tags(&self) -> Result<Vec<String>> {
        let tags: Vec<String> = self
            .repo
            .list_tags()?
            .into_iter()
            .filter(|tag| self.scope.matches(tag))
            .collect();

        tracing::debug!(
            project = self.display_name(),
            pattern = self.scope.pattern(),
            count = tags.len(),
            "matched release tags"
        );
        Ok(tags)
    }

    /// Releases of this project sorted by ascending version.
    ///
    /// A tag that belongs to the project but does not hold a valid version
    /// fails the whole discovery.
    pub fn releases(&self) -> Result<Vec<Release>> {
        let mut releases = Vec::new();
        for tag in self.tags()? {
            if let Some(version) = self.scope.parse_tag(&tag)? {
                releases.push(Release { tag, version });
            }
        }

        releases.sort_by(|a, b| a.version.cmp(&b.version));
        Ok(releases)
    }

    /// Versions of this project, ascending
    pub fn versions(&self) -> Result<Vec<Version>> {
        Ok(self.releases()?.into_iter().map(|r| r.version).collect())
    }

    /// Latest release, `None` when the project was never released
    pub fn latest_release(&self) -> Result<Option<Release>> {
        Ok(self.releases()?.pop())
    }

    pub fn latest_version(&self) -> Result<Option<Version>> {
        Ok(self.latest_release()?.map(|r| r.version))
    }

    /// Commits since the latest release, or the whole history when the
    /// project was never released
    pub fn commits_since(&self, latest: Option<&Release>) -> Result<Vec<CommitInfo>> {
        match latest {
            Some(release) => self
                .repo
                .list_commits_in_range(&format!("refs/tags/{}", release.tag), "HEAD"),
            None => self.repo.list_all_commits(),
        }
    }

    /// Work out the next version without touching the repository
    pub fn plan(&self, v_prefix: bool) -> Result<ReleasePlan> {
        let latest = self.latest_release()?;
        let base = match &latest {
            Some(release) => release.version.clone(),
            None => Version::new(0, 0, 0).with_v_prefix(v_prefix),
        };

        let commits = self.commits_since(latest.as_ref())?;
        let increment = self.analyzer.resolve(&commits);

        let next = match increment {
            Increment::None => base.clone(),
            increment => {
                let prefixed = base.has_v_prefix() || v_prefix;
                base.bump(increment).with_v_prefix(prefixed)
            }
        };

        tracing::info!(
            project = self.display_name(),
            latest = %base,
            commits = commits.len(),
            %increment,
            %next,
            "planned release"
        );

        Ok(ReleasePlan {
            latest,
            base,
            commits,
            increment,
            next,
        })
    }

    pub fn next_increment(&self) -> Result<Increment> {
        Ok(self.plan(false)?.increment)
    }

    /// Next version; the latest one when nothing asks for a bump
    pub fn next_version(&self, v_prefix: bool) -> Result<Version> {
        Ok(self.plan(v_prefix)?.next)
    }

    /// Tag name a release of `version` gets in this project
    pub fn tag_name(&self, version: &Version) -> String {
        self.scope.tag_name(version)
    }

    /// Release the next version.
    ///
    /// Phases run in order and stop at the first error: rewrite version
    /// files, commit them, tag HEAD, push. Side effects of completed phases
    /// are not rolled back. All version files are checked before the first
    /// one is written.
    pub fn bump(&self, options: &BumpOptions) -> Result<BumpOutcome> {
        let plan = self.plan(options.v_prefix)?;
        let mut warnings = Vec::new();

        if plan.latest.is_none() {
            warnings.push(BoundaryWarning::Unreleased {
                project: self.display_name().to_string(),
                base_version: plan.base.to_string(),
            });
        }

        if plan.increment == Increment::None {
            let since = match &plan.latest {
                Some(release) => release.tag.clone(),
                None => "the first commit".to_string(),
            };
            return Err(GitSemverError::NoChangesDetected(since));
        }

        let rewritten_files = self.rewrite_version_files(options, &plan.base, &plan.next)?;

        let commit = if rewritten_files.is_empty() {
            None
        } else {
            let message = format!(
                "bump: {} -> {}",
                plan.base.semver_text(),
                plan.next.semver_text()
            );
            let id = self.repo.create_commit(&message)?;
            tracing::info!(commit = %id, %message, "created bump commit");
            Some(id)
        };

        let tag = if options.skip_tag {
            tracing::info!("skipping tag creation");
            None
        } else {
            let name = self.tag_name(&plan.next);
            self.repo.create_tag(&name, &format!("Release {}", name))?;
            tracing::info!(tag = %name, "created release tag");
            Some(name)
        };

        let pushed_refs = self.push_release(options, commit.is_some(), tag.as_deref(), &mut warnings)?;

        Ok(BumpOutcome {
            previous: plan.base,
            next: plan.next,
            increment: plan.increment,
            rewritten_files,
            commit,
            tag,
            pushed_refs,
            warnings,
        })
    }

    fn rewrite_version_files(
        &self,
        options: &BumpOptions,
        current: &Version,
        next: &Version,
    ) -> Result<Vec<PathBuf>> {
        let mut pending = Vec::with_capacity(options.version_files.len());

        for version_file in &options.version_files {
            let path = options.base_dir.join(&version_file.filename);
            let contents = fs::read_to_string(&path)
                .map_err(|e| GitSemverError::file_io(path.display().to_string(), e))?;
            let rewritten = version_file.rewrite(&contents, current, next)?;
            pending.push((path, rewritten));
        }

        let mut written = Vec::with_capacity(pending.len());
        for (path, contents) in pending {
            fs::write(&path, contents)
                .map_err(|e| GitSemverError::file_io(path.display().to_string(), e))?;
            tracing::info!(file = %path.display(), "rewrote version file");
            written.push(path);
        }

        Ok(written)
    }

    fn push_release(
        &self,
        options: &BumpOptions,
        committed: bool,
        tag: Option<&str>,
        warnings: &mut Vec<BoundaryWarning>,
    ) -> Result<Vec<String>> {
        let mut refs = Vec::new();
        if committed {
            match self.repo.current_branch()? {
                Some(branch) => refs.push(format!("refs/heads/{}", branch)),
                None => tracing::warn!("HEAD is detached, bump commit will not be pushed"),
            }
        }
        if let Some(tag) = tag {
            refs.push(format!("refs/tags/{}", tag));
        }

        if refs.is_empty() || !options.push {
            tracing::info!("nothing to push");
            return Ok(Vec::new());
        }

        if !self.repo.has_remote(&options.remote)? {
            let warning = BoundaryWarning::PushSkippedNoRemote {
                remote: options.remote.clone(),
                refs,
            };
            tracing::warn!("{}", warning);
            warnings.push(warning);
            return Ok(Vec::new());
        }

        self.repo.push(&options.remote, &refs, &options.credential)?;
        tracing::info!(remote = %options.remote, refs = ?refs, "pushed release");
        Ok(refs)
    }
}
