//! Workflows behind each subcommand
//!
//! Each workflow takes an already opened [`Project`], so it can run against
//! a real repository or the in-memory mock, and returns what the command
//! prints. [`run`] wires parsed arguments and configuration to them.

use std::path::Path;

use crate::analyzer::IncrementAnalyzer;
use crate::boundary::BoundaryWarning;
use crate::cli::{Cli, Command};
use crate::config::Config;
use crate::domain::{Increment, Version, VersionFile};
use crate::error::{GitSemverError, Result};
use crate::git::{Credential, Repository};
use crate::project::{BumpOptions, BumpOutcome, Project};
use crate::ui;

/// Arguments of the bump workflow, decoupled from clap
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BumpWorkflowArgs {
    /// `filename:key` descriptors; replace the configured list when non-empty
    pub version_files: Vec<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub v_prefix: bool,
    pub skip_tag: bool,
    pub no_push: bool,
}

/// Result of the next workflow
#[derive(Debug, Clone)]
pub struct NextReport {
    pub version: Version,
    pub warnings: Vec<BoundaryWarning>,
}

/// Latest released version, failing when there is none
pub fn latest_workflow<R: Repository>(project: &Project<R>) -> Result<Version> {
    project.latest_version()?.ok_or_else(|| {
        GitSemverError::NoReleasedVersions(project.scope().dir().map(str::to_string))
    })
}

/// Version the next bump would release
pub fn next_workflow<R: Repository>(project: &Project<R>, v_prefix: bool) -> Result<NextReport> {
    let plan = project.plan(v_prefix)?;
    let mut warnings = Vec::new();

    match &plan.latest {
        None => warnings.push(BoundaryWarning::Unreleased {
            project: project.display_name().to_string(),
            base_version: plan.base.to_string(),
        }),
        Some(release) if plan.increment == Increment::None => {
            warnings.push(BoundaryWarning::NoReleasableCommits {
                latest: release.tag.clone(),
                commit_count: plan.commits.len(),
            })
        }
        Some(_) => {}
    }

    Ok(NextReport {
        version: plan.next,
        warnings,
    })
}

/// Merge command-line arguments over the `[bump]` configuration
pub fn bump_options(args: &BumpWorkflowArgs, config: &Config, base_dir: &Path) -> Result<BumpOptions> {
    let descriptors = if args.version_files.is_empty() {
        &config.bump.version_files
    } else {
        &args.version_files
    };

    let version_files = descriptors
        .iter()
        .map(|descriptor| descriptor.parse::<VersionFile>())
        .collect::<Result<Vec<_>>>()?;

    Ok(BumpOptions {
        version_files,
        base_dir: base_dir.to_path_buf(),
        v_prefix: args.v_prefix || config.bump.v_prefix,
        skip_tag: args.skip_tag,
        push: config.bump.push && !args.no_push,
        remote: config.bump.remote.clone(),
        credential: Credential::from_parts(args.username.clone(), args.password.clone()),
    })
}

/// Release the next version
pub fn bump_workflow<R: Repository>(
    project: &Project<R>,
    args: &BumpWorkflowArgs,
    config: &Config,
    base_dir: &Path,
) -> Result<BumpOutcome> {
    let options = bump_options(args, config, base_dir)?;
    project.bump(&options)
}

/// Open the project under `root` and run the parsed command
pub fn run(cli: &Cli, config: &Config, root: &Path) -> Result<()> {
    let project = Project::open(root, &cli.project)?
        .with_analyzer(IncrementAnalyzer::new(config.commits.clone()));

    match &cli.command {
        Command::Latest => {
            let version = latest_workflow(&project)?;
            ui::display_result(&version.to_string());
        }
        Command::Next { v_prefix } => {
            let report = next_workflow(&project, *v_prefix || config.bump.v_prefix)?;
            for warning in &report.warnings {
                ui::display_boundary_warning(warning);
            }
            ui::display_result(&report.version.to_string());
        }
        Command::Bump {
            version_files,
            username,
            password,
            v_prefix,
            skip_tag,
            no_push,
        } => {
            let args = BumpWorkflowArgs {
                version_files: version_files.clone(),
                username: username.clone(),
                password: password.clone(),
                v_prefix: *v_prefix,
                skip_tag: *skip_tag,
                no_push: *no_push,
            };
            let outcome = bump_workflow(&project, &args, config, root)?;
            ui::display_bump_details(&outcome);
            ui::display_result(&ui::format_bump_summary(project.display_name(), &outcome));
        }
    }

    Ok(())
}
