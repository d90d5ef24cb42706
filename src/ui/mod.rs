//! User interface module - terminal formatting.

pub mod formatter;

pub use formatter::{
    display_boundary_warning, display_bump_details, display_error, display_result,
    display_status, display_success, format_bump_summary,
};
