use regex::Regex;
use std::sync::OnceLock;

/// Header of a conventional commit: `type(scope)!: description`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommit {
    /// Commit type, lowercased
    pub r#type: String,
    pub scope: Option<String>,
    pub description: String,
    /// `!` right before the colon
    pub breaking_marker: bool,
}

const HEADER_PATTERN: &str = r"^(\w+)(?:\(([^)]*)\))?(!)?:\s*(.*)$";

fn header_regex() -> Option<&'static Regex> {
    static HEADER: OnceLock<Option<Regex>> = OnceLock::new();
    HEADER.get_or_init(|| Regex::new(HEADER_PATTERN).ok()).as_ref()
}

impl ParsedCommit {
    /// Parse the first line of a commit message.
    ///
    /// Supports formats:
    /// - type(scope)!: description
    /// - type(scope): description
    /// - type!: description
    /// - type: description
    ///
    /// Returns `None` for anything else (missing colon, free text).
    pub fn parse(message: &str) -> Option<Self> {
        let subject = message.trim_start().lines().next()?;
        let captures = header_regex()?.captures(subject)?;

        Some(ParsedCommit {
            r#type: captures[1].to_lowercase(),
            scope: captures.get(2).map(|m| m.as_str().to_string()),
            breaking_marker: captures.get(3).is_some(),
            description: captures
                .get(4)
                .map(|m| m.as_str().trim_end().to_string())
                .unwrap_or_default(),
        })
    }
}

/// Whether any line of `message` starts with one of the breaking-change
/// indicators followed by a colon. Matching ignores case.
pub fn has_breaking_footer(message: &str, indicators: &[String]) -> bool {
    message.lines().any(|line| {
        let line = line.trim_start().to_lowercase();
        indicators.iter().any(|indicator| {
            let indicator = indicator.trim_end_matches(':').to_lowercase();
            line.strip_prefix(indicator.as_str())
                .is_some_and(|rest| rest.starts_with(':'))
        })
    })
}
