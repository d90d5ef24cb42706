use std::fmt;

/// Non-fatal conditions met while computing or publishing a release.
/// These are reported to the user but do not fail the command.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// No tag matches the project, versioning starts from the base version
    Unreleased {
        project: String,
        base_version: String,
    },
    /// No commit since the latest release asks for a bump
    NoReleasableCommits { latest: String, commit_count: usize },
    /// The push phase was skipped because the remote is not configured
    PushSkippedNoRemote { remote: String, refs: Vec<String> },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::Unreleased {
                project,
                base_version,
            } => {
                write!(
                    f,
                    "No released versions found for '{}', starting from {}",
                    project, base_version
                )
            }
            BoundaryWarning::NoReleasableCommits {
                latest,
                commit_count,
            } => {
                write!(
                    f,
                    "None of the {} commit(s) since {} triggers a release",
                    commit_count, latest
                )
            }
            BoundaryWarning::PushSkippedNoRemote { remote, refs } => {
                write!(
                    f,
                    "No remote named '{}', skipping push of {}",
                    remote,
                    refs.join(", ")
                )
            }
        }
    }
}
