//! CLI presentation: text and json formatters per command.

mod check;
mod init;
mod shared;
mod status;
mod version;

pub use check::{format_check_json, format_check_text};
pub use init::format_init_summary;
pub use shared::{format_section_heading, use_color};
pub use status::{format_status_json, format_status_text};
pub use version::format_version_report;
