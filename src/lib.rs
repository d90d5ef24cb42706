//! Semantic versioning driven by git tags and conventional commits.
//!
//! The latest release of a project is the highest version among its tags;
//! the next one follows from the conventional-commit messages since then.

pub mod analyzer;
pub mod boundary;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod logging;
pub mod project;
pub mod ui;

pub use error::{GitSemverError, Result};
