/*!
 * Core types and data structures for the CodeStruct application
 */

use std::io;
use std::path::PathBuf;

/// Artifact flavour produced by one run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Relative path plus fenced content for every matched file
    FullDump,
    /// Directory headers with their matched file names beneath
    StructureWithFiles,
    /// Directory headers only
    StructureDirsOnly,
}

/// One pending directory in the breadth-first queue
#[derive(Debug, Clone)]
pub struct WorkItem {
    /// Absolute path of the directory to list
    pub dir: PathBuf,
    /// Accumulated relative segments joined by `/`; empty at the root,
    /// trailing `/` otherwise
    pub prefix: String,
}

/// A matched file discovered during the scan
#[derive(Debug, Clone)]
pub struct FileRecord {
    /// Display prefix plus file base name
    pub display_path: String,
    /// Full text of the file, read at scan time; `None` in the
    /// structure modes where content is never emitted
    pub content: Option<String>,
}

/// Events produced by the scanner, in breadth-first order
#[derive(Debug)]
pub enum ScanEvent {
    /// A directory was dequeued; `display_path` is empty for the root
    Directory { display_path: String },
    /// A matched file inside the current directory
    File(FileRecord),
    /// A single entry could not be read; the walk continues past it
    Error { path: PathBuf, error: io::Error },
}
