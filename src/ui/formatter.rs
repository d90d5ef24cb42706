//! Formatting functions for terminal output.
//!
//! Command results (a version, a bump summary) go to stdout so they can be
//! captured by scripts. Everything else goes to stderr.

use console::style;

use crate::boundary::BoundaryWarning;
use crate::project::BumpOutcome;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    eprintln!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    eprintln!("{} {}", style("→").yellow(), message);
}

/// Display a boundary warning to the user.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// Print a command result on stdout, unstyled
pub fn display_result(line: &str) {
    println!("{}", line);
}

/// Summary line of a bump, e.g. `bump packages/api from 1.0.0 to 1.1.0`
pub fn format_bump_summary(project: &str, outcome: &BumpOutcome) -> String {
    format!(
        "bump {} from {} to {}",
        project, outcome.previous, outcome.next
    )
}

/// Report the side effects of a bump on stderr
pub fn display_bump_details(outcome: &BumpOutcome) {
    for file in &outcome.rewritten_files {
        display_status(&format!("updated {}", file.display()));
    }
    if let Some(commit) = &outcome.commit {
        let short = commit.get(..7).unwrap_or(commit);
        display_status(&format!("committed {}", style(short).cyan()));
    }
    if let Some(tag) = &outcome.tag {
        display_success(&format!("tagged {}", style(tag).green().bold()));
    }
    if !outcome.pushed_refs.is_empty() {
        display_success(&format!("pushed {}", outcome.pushed_refs.join(", ")));
    }
    for warning in &outcome.warnings {
        display_boundary_warning(warning);
    }
}
