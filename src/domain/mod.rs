//! Domain logic - pure business rules independent of git operations

pub mod commit;
pub mod tag;
pub mod version;
pub mod version_file;

pub use commit::{has_breaking_footer, ParsedCommit};
pub use tag::{TagScope, SEMVER_PATTERN};
pub use version::{Increment, Version};
pub use version_file::VersionFile;
