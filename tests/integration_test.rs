// tests/integration_test.rs
use std::fs;
use std::path::Path;
use std::process::Command;

use git2::{Oid, Repository, Signature};
use git_semver::boundary::BoundaryWarning;
use git_semver::domain::{Version, VersionFile};
use git_semver::git::Git2Repository;
use git_semver::project::{BumpOptions, Project};
use git_semver::GitSemverError;
use tempfile::TempDir;

fn init_repo(dir: &Path) -> Repository {
    let repo = Repository::init(dir).unwrap();
    let mut config = repo.config().unwrap();
    config.set_str("user.name", "Test User").unwrap();
    config.set_str("user.email", "test@example.com").unwrap();
    repo
}

fn commit_file(repo: &Repository, name: &str, contents: &str, message: &str) -> Oid {
    let workdir = repo.workdir().unwrap();
    fs::write(workdir.join(name), contents).unwrap();

    let mut index = repo.index().unwrap();
    index.add_path(Path::new(name)).unwrap();
    index.write().unwrap();
    let tree = repo.find_tree(index.write_tree().unwrap()).unwrap();

    let signature = Signature::now("Test User", "test@example.com").unwrap();
    let parents = match repo.head() {
        Ok(head) => vec![head.peel_to_commit().unwrap()],
        Err(_) => Vec::new(),
    };
    let parent_refs: Vec<_> = parents.iter().collect();

    repo.commit(
        Some("HEAD"),
        &signature,
        &signature,
        message,
        &tree,
        &parent_refs,
    )
    .unwrap()
}

fn tag_head(repo: &Repository, name: &str) {
    let head = repo.head().unwrap().peel_to_commit().unwrap();
    repo.tag_lightweight(name, head.as_object(), false).unwrap();
}

/// initial commit tagged 1.0.0, then a feature and a fix
fn released_repo() -> (TempDir, Repository) {
    let dir = TempDir::new().unwrap();
    let repo = init_repo(dir.path());
    commit_file(&repo, "VERSION", "version=1.0.0\n", "chore: initial");
    tag_head(&repo, "1.0.0");
    commit_file(&repo, "login.txt", "login", "feat: add login");
    commit_file(&repo, "typo.txt", "typo", "fix: typo");
    (dir, repo)
}

fn head_id(repo: &Repository) -> Oid {
    repo.head().unwrap().peel_to_commit().unwrap().id()
}

#[test]
fn test_latest_and_next_on_real_repository() {
    let (dir, _repo) = released_repo();
    let project = Project::open(dir.path(), "").unwrap();

    assert_eq!(
        project.latest_version().unwrap(),
        Some(Version::new(1, 0, 0))
    );
    assert_eq!(project.next_version(false).unwrap().to_string(), "1.1.0");
}

#[test]
fn test_breaking_footer_on_real_repository() {
    let (dir, repo) = released_repo();
    commit_file(
        &repo,
        "api.txt",
        "v2",
        "refactor: drop legacy api\n\nBREAKING CHANGE: old endpoints removed",
    );

    let project = Project::open(dir.path(), "").unwrap();
    assert_eq!(project.next_version(false).unwrap().to_string(), "2.0.0");
}

#[test]
fn test_bump_creates_annotated_tag_at_head() {
    let (dir, repo) = released_repo();
    let project = Project::open(dir.path(), "").unwrap();

    let outcome = project.bump(&BumpOptions::default()).unwrap();
    assert_eq!(outcome.tag.as_deref(), Some("1.1.0"));

    let tag_ref = repo.find_reference("refs/tags/1.1.0").unwrap();
    let tag = tag_ref.peel_to_tag().unwrap();
    assert_eq!(tag.message().map(str::trim), Some("Release 1.1.0"));
    assert_eq!(tag.target_id(), head_id(&repo));

    // nothing to push to, the tag stays local
    assert!(matches!(
        outcome.warnings.as_slice(),
        [BoundaryWarning::PushSkippedNoRemote { .. }]
    ));
}

#[test]
fn test_scoped_project_on_real_repository() {
    let dir = TempDir::new().unwrap();
    let repo = init_repo(dir.path());
    commit_file(&repo, "README", "monorepo", "chore: initial");
    tag_head(&repo, "packages/api/1.0.0");
    tag_head(&repo, "2.0.0");
    commit_file(&repo, "api.txt", "users", "fix(api): list users");

    let project = Project::open(dir.path(), "packages/api").unwrap();
    assert_eq!(project.tags().unwrap(), vec!["packages/api/1.0.0"]);

    let outcome = project.bump(&BumpOptions::default()).unwrap();
    assert_eq!(outcome.tag.as_deref(), Some("packages/api/1.0.1"));
    assert!(repo.find_reference("refs/tags/packages/api/1.0.1").is_ok());
}

#[test]
fn test_bump_rewrites_version_file_and_commits() {
    let (dir, repo) = released_repo();
    let before = head_id(&repo);
    let project = Project::open(dir.path(), "").unwrap();

    let options = BumpOptions {
        version_files: vec![VersionFile::new("VERSION", "version")],
        base_dir: dir.path().to_path_buf(),
        ..BumpOptions::default()
    };
    let outcome = project.bump(&options).unwrap();

    assert_eq!(
        fs::read_to_string(dir.path().join("VERSION")).unwrap(),
        "version=1.1.0\n"
    );

    let head = repo.head().unwrap().peel_to_commit().unwrap();
    assert_eq!(head.message(), Some("bump: 1.0.0 -> 1.1.0"));
    assert_eq!(head.parent_id(0).unwrap(), before);
    assert_eq!(outcome.commit, Some(head.id().to_string()));

    let tagged = repo
        .revparse_single("refs/tags/1.1.0")
        .unwrap()
        .peel_to_commit()
        .unwrap();
    assert_eq!(tagged.id(), head.id());

    // the bump commit itself does not ask for another release
    assert_eq!(project.next_version(false).unwrap().to_string(), "1.1.0");
}

#[test]
fn test_bump_pushes_to_remote() {
    let (dir, repo) = released_repo();
    let remote_dir = TempDir::new().unwrap();
    let bare = Repository::init_bare(remote_dir.path()).unwrap();
    repo.remote("origin", remote_dir.path().to_str().unwrap())
        .unwrap();

    let project = Project::open(dir.path(), "").unwrap();
    let options = BumpOptions {
        version_files: vec![VersionFile::new("VERSION", "version")],
        base_dir: dir.path().to_path_buf(),
        ..BumpOptions::default()
    };
    let outcome = project.bump(&options).unwrap();

    assert_eq!(outcome.pushed_refs.len(), 2);
    assert!(outcome.warnings.is_empty());
    assert!(bare.find_reference("refs/tags/1.1.0").is_ok());

    let branch = repo.head().unwrap().name().unwrap().to_string();
    let remote_head = bare
        .find_reference(&branch)
        .unwrap()
        .peel_to_commit()
        .unwrap();
    assert_eq!(remote_head.id(), head_id(&repo));
}

#[test]
fn test_bump_without_changes_leaves_repository_untouched() {
    let (dir, repo) = released_repo();
    commit_file(&repo, "notes.txt", "notes", "docs: notes");
    tag_head(&repo, "1.1.0");
    commit_file(&repo, "more.txt", "more", "chore: tidy");

    let project = Project::open(dir.path(), "").unwrap();
    let before = head_id(&repo);

    let err = project.bump(&BumpOptions::default()).unwrap_err();
    assert!(matches!(err, GitSemverError::NoChangesDetected(_)));
    assert_eq!(head_id(&repo), before);
    assert_eq!(repo.tag_names(None).unwrap().len(), 2);
}

/// Commit with a hand-written object so the message can carry a legacy encoding
fn commit_raw_message(repo: &Repository, encoding: &str, message: &[u8]) -> Oid {
    let head = repo.head().unwrap();
    let branch = head.name().unwrap().to_string();
    let parent = head.peel_to_commit().unwrap();

    let mut object = format!(
        "tree {}\nparent {}\nauthor Test User <test@example.com> 1700000000 +0000\n\
         committer Test User <test@example.com> 1700000000 +0000\nencoding {}\n\n",
        parent.tree_id(),
        parent.id(),
        encoding
    )
    .into_bytes();
    object.extend_from_slice(message);

    let oid = repo
        .odb()
        .unwrap()
        .write(git2::ObjectType::Commit, &object)
        .unwrap();
    repo.reference(&branch, oid, true, "raw commit").unwrap();
    oid
}

#[test]
fn test_non_utf8_commit_message_is_still_classified() {
    let dir = TempDir::new().unwrap();
    let repo = init_repo(dir.path());
    commit_file(&repo, "README", "hello", "chore: initial");
    tag_head(&repo, "1.0.0");
    commit_raw_message(&repo, "ISO-8859-1", b"feat: caf\xe9\n");

    let project = Project::open(dir.path(), "").unwrap();
    assert_eq!(project.next_version(false).unwrap().to_string(), "1.1.0");
}

#[test]
fn test_malformed_release_tag_is_reported() {
    let (dir, repo) = released_repo();
    tag_head(&repo, "01.2.0");

    let project = Project::open(dir.path(), "").unwrap();
    assert!(matches!(
        project.latest_version(),
        Err(GitSemverError::InvalidVersion(_))
    ));
}

#[test]
fn test_git2_repository_current_branch() {
    use git_semver::git::Repository as _;

    let (dir, _repo) = released_repo();
    let repo = Git2Repository::open(dir.path()).unwrap();
    assert!(repo.current_branch().unwrap().is_some());
    assert_eq!(repo.list_all_commits().unwrap().len(), 3);
    assert_eq!(
        repo.list_commits_in_range("refs/tags/1.0.0", "HEAD")
            .unwrap()
            .len(),
        2
    );
}

fn run_cli(dir: &Path, args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_git-semver"))
        .args(args)
        .current_dir(dir)
        .env_remove("GIT_SEMVER_LOG")
        .output()
        .expect("Failed to execute git-semver")
}

#[test]
fn test_cli_latest_and_next() {
    let (dir, _repo) = released_repo();

    let latest = run_cli(dir.path(), &["latest"]);
    assert!(latest.status.success());
    assert_eq!(String::from_utf8_lossy(&latest.stdout), "1.0.0\n");

    let next = run_cli(dir.path(), &["next", "--v-prefix"]);
    assert!(next.status.success());
    assert_eq!(String::from_utf8_lossy(&next.stdout), "v1.1.0\n");
}

#[test]
fn test_cli_bump_prints_summary() {
    let (dir, repo) = released_repo();

    let output = run_cli(dir.path(), &["bump", "-f", "VERSION:version"]);
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "bump . from 1.0.0 to 1.1.0\n"
    );
    assert!(repo.find_reference("refs/tags/1.1.0").is_ok());
}

#[test]
fn test_cli_latest_without_tags_fails() {
    let dir = TempDir::new().unwrap();
    let repo = init_repo(dir.path());
    commit_file(&repo, "README", "hello", "feat: first");

    let output = run_cli(dir.path(), &["latest"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("No released versions found"));
}

#[test]
fn test_cli_outside_repository_fails() {
    let dir = TempDir::new().unwrap();
    let nested = dir.path().join("nested");
    fs::create_dir(&nested).unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_git-semver"))
        .arg("latest")
        .current_dir(&nested)
        .env("GIT_CEILING_DIRECTORIES", dir.path())
        .env_remove("GIT_SEMVER_LOG")
        .output()
        .expect("Failed to execute git-semver");

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Not a git repository"));
}

#[test]
fn test_cli_help() {
    let output = run_cli(Path::new("."), &["--help"]);
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("git-semver"));
    assert!(stdout.contains("bump"));
}
