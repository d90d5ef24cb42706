use crate::config::CommitRulesConfig;
use crate::domain::{has_breaking_footer, Increment, ParsedCommit};
use crate::git::CommitInfo;

/// Classifies commit messages and reduces them to a single increment
#[derive(Debug, Clone, Default)]
pub struct IncrementAnalyzer {
    config: CommitRulesConfig,
}

impl IncrementAnalyzer {
    /// Create a new analyzer from commit rules
    pub fn new(config: CommitRulesConfig) -> Self {
        IncrementAnalyzer { config }
    }

    /// Increment a single commit message asks for.
    ///
    /// Every rule is evaluated and the highest increment wins, so a `chore`
    /// subject with a breaking-change footer is still a major change.
    pub fn classify(&self, message: &str) -> Increment {
        let mut increment = Increment::None;

        if has_breaking_footer(message, &self.config.breaking_change_indicators) {
            increment = Increment::Major;
        }

        if let Some(parsed) = ParsedCommit::parse(message) {
            let from_header = if parsed.breaking_marker {
                Increment::Major
            } else if is_type(&parsed.r#type, &self.config.minor_types) {
                Increment::Minor
            } else if is_type(&parsed.r#type, &self.config.patch_types) {
                Increment::Patch
            } else {
                Increment::None
            };
            increment = increment.max(from_header);
        }

        increment
    }

    /// Dominant increment over a set of commits; `None` when empty.
    /// Order does not matter.
    pub fn resolve(&self, commits: &[CommitInfo]) -> Increment {
        commits
            .iter()
            .map(|commit| {
                let increment = self.classify(&commit.message);
                let short = commit.hash.get(..7).unwrap_or(&commit.hash);
                tracing::trace!(commit = short, %increment, "classified commit");
                increment
            })
            .max()
            .unwrap_or_default()
    }

    /// Same as [`IncrementAnalyzer::resolve`] over bare messages
    pub fn resolve_messages<'a, I>(&self, messages: I) -> Increment
    where
        I: IntoIterator<Item = &'a str>,
    {
        messages
            .into_iter()
            .map(|message| self.classify(message))
            .max()
            .unwrap_or_default()
    }
}

fn is_type(commit_type: &str, types: &[String]) -> bool {
    types.iter().any(|t| t.eq_ignore_ascii_case(commit_type))
}

/// Classify a message with the default conventional-commit rules
pub fn classify(message: &str) -> Increment {
    IncrementAnalyzer::default().classify(message)
}

/// Resolve commits with the default conventional-commit rules
pub fn resolve(commits: &[CommitInfo]) -> Increment {
    IncrementAnalyzer::default().resolve(commits)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn commit(message: &str) -> CommitInfo {
        CommitInfo {
            hash: "0000000".to_string(),
            message: message.to_string(),
            author: "Test Author".to_string(),
        }
    }

    #[test]
    fn test_classify_literal_scenarios() {
        assert_eq!(classify("feat: x"), Increment::Minor);
        assert_eq!(classify("fix: x"), Increment::Patch);
        assert_eq!(classify("feat!: x"), Increment::Major);
        assert_eq!(classify("docs: x"), Increment::None);
        assert_eq!(classify("refactor!: x"), Increment::Major);
        assert_eq!(classify("fix(api): x"), Increment::Patch);
        assert_eq!(
            classify("chore: cleanup\n\nbreaking change: remove endpoint"),
            Increment::Major
        );
    }

    #[test]
    fn test_classify_major() {
        assert_eq!(classify("fix!: test"), Increment::Major);
        assert_eq!(classify("any!: test"), Increment::Major);
        assert_eq!(classify("breaking change: test"), Increment::Major);
        assert_eq!(classify("BREAKING CHANGE: test"), Increment::Major);
        assert_eq!(
            classify("some comment\nbreaking change: test\n  "),
            Increment::Major
        );
        assert_eq!(classify("feat(login)!: test"), Increment::Major);
    }

    #[test]
    fn test_classify_with_scope() {
        assert_eq!(classify("docs(README): test"), Increment::None);
        assert_eq!(classify("feat(users): test"), Increment::Minor);
        assert_eq!(classify("fix(orders): test"), Increment::Patch);
    }

    #[test]
    fn test_classify_case_insensitive() {
        assert_eq!(classify("FEAT: loud"), Increment::Minor);
        assert_eq!(classify("Fix(Api): typo"), Increment::Patch);
    }

    #[test]
    fn test_classify_none() {
        assert_eq!(classify("rand: test"), Increment::None);
        assert_eq!(classify("rand: with feat: inside"), Increment::None);
        assert_eq!(classify("Update README"), Increment::None);
        assert_eq!(classify("feat add login"), Increment::None);
        assert_eq!(classify(""), Increment::None);
    }

    #[test]
    fn test_classify_takes_highest_rule() {
        let message = "feat(api): new endpoint\n\nBREAKING CHANGE: old one removed";
        assert_eq!(classify(message), Increment::Major);
    }

    #[test]
    fn test_resolve_empty() {
        assert_eq!(resolve(&[]), Increment::None);
    }

    #[test]
    fn test_resolve_is_max_over_commits() {
        let commits = vec![
            commit("feat(api): add endpoint"),
            commit("fix(ui): button color"),
            commit("docs: update readme"),
        ];
        assert_eq!(resolve(&commits), Increment::Minor);
    }

    #[test]
    fn test_resolve_ignores_order() {
        let mut commits = vec![
            commit("fix: bug 1"),
            commit("feat(core)!: rewrite core engine"),
            commit("feat: new search feature"),
            commit("chore: bump deps"),
        ];
        let forward = resolve(&commits);
        commits.reverse();
        assert_eq!(forward, Increment::Major);
        assert_eq!(resolve(&commits), forward);
    }

    #[test]
    fn test_resolve_only_non_release_commits() {
        let commits = vec![
            commit("docs: add faq"),
            commit("style: format code"),
            commit("test: add unit tests"),
        ];
        assert_eq!(resolve(&commits), Increment::None);
    }

    #[test]
    fn test_custom_rules() {
        let analyzer = IncrementAnalyzer::new(CommitRulesConfig {
            minor_types: vec!["feat".to_string(), "feature".to_string()],
            patch_types: vec!["fix".to_string(), "perf".to_string()],
            breaking_change_indicators: vec!["BREAKING".to_string()],
        });

        assert_eq!(analyzer.classify("perf: cache results"), Increment::Patch);
        assert_eq!(analyzer.classify("feature: search"), Increment::Minor);
        assert_eq!(analyzer.classify("fix: a\n\nBREAKING: b"), Increment::Major);
        assert_eq!(
            analyzer.resolve_messages(["docs: a", "perf: b"]),
            Increment::Patch
        );
    }
}
