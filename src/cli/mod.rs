//! Command-line interface
//!
//! Argument parsing lives here; [`orchestration`] turns parsed arguments
//! plus configuration into calls on a [`crate::project::Project`].

pub mod orchestration;

use clap::{Parser, Subcommand};

use crate::logging::LogLevel;

#[derive(Debug, Parser)]
#[command(
    name = "git-semver",
    version,
    about = "Compute and tag the next semantic version from conventional commits"
)]
pub struct Cli {
    #[arg(
        short,
        long,
        global = true,
        default_value = "",
        help = "Sub-directory of the repository versioned on its own"
    )]
    pub project: String,

    #[arg(short, long, global = true, help = "Custom configuration file path")]
    pub config: Option<String>,

    #[arg(
        long,
        global = true,
        value_enum,
        default_value_t = LogLevel::Warn,
        help = "Diagnostic verbosity on stderr"
    )]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand, PartialEq)]
pub enum Command {
    /// Print the latest released version
    Latest,

    /// Print the version the next bump would release
    Next {
        #[arg(long, help = "Prefix the version with 'v'")]
        v_prefix: bool,
    },

    /// Release the next version: rewrite files, commit, tag and push
    Bump {
        #[arg(
            short = 'f',
            long = "version-file",
            value_name = "FILE:KEY",
            help = "File whose version following KEY is rewritten (repeatable)"
        )]
        version_files: Vec<String>,

        #[arg(short, long, help = "Username for pushing over HTTP")]
        username: Option<String>,

        #[arg(short = 'P', long, help = "Password or token for pushing over HTTP")]
        password: Option<String>,

        #[arg(long, help = "Prefix the version with 'v'")]
        v_prefix: bool,

        #[arg(long, help = "Do not create a tag")]
        skip_tag: bool,

        #[arg(long, help = "Do not push to the remote")]
        no_push: bool,
    },
}
