/*!
 * CodeStruct - Copy a project's source structure and contents to the
 * clipboard for LLM context
 *
 * This library scans a directory tree breadth-first, selects source
 * files by extension, optionally strips comments and collapses
 * whitespace in their content, and assembles one deterministic text
 * artifact describing the project.
 */

pub mod cleaner;
pub mod clipboard;
pub mod config;
pub mod error;
pub mod scanner;
pub mod types;
pub mod utils;
pub mod writer;

#[cfg(test)]
mod tests;

// Re-export main components for easier access
pub use cleaner::{cleanup_content, normalize_whitespace, strip_comments};
pub use config::{Args, Config, ScanConfig};
pub use error::{CodeStructError, Result};
pub use scanner::Scanner;
pub use types::{FileRecord, Mode, ScanEvent, WorkItem};
pub use utils::{count_files, format_file_size};
pub use writer::ArtifactWriter;

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
