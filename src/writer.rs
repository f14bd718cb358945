/*!
 * Artifact assembly
 */

use std::collections::BTreeMap;
use std::io;
use std::path::Path;
use std::sync::Arc;

use indicatif::ProgressBar;

use crate::cleaner;
use crate::config::Config;
use crate::types::{Mode, ScanEvent};

/// Assembles the scanner's event stream into the final text artifact.
///
/// Error events are reported through the progress bar and the offending
/// entry is skipped; assembly itself always completes. The returned
/// string has trailing whitespace trimmed in every mode.
pub struct ArtifactWriter {
    config: Config,
    progress: Arc<ProgressBar>,
}

impl ArtifactWriter {
    /// Create a new artifact writer
    pub fn new(config: Config, progress: Arc<ProgressBar>) -> Self {
        Self { config, progress }
    }

    /// Consume the event stream and build one artifact string
    pub fn assemble<I>(&self, events: I) -> String
    where
        I: IntoIterator<Item = ScanEvent>,
    {
        match self.config.mode {
            Mode::FullDump => self.assemble_dump(events),
            Mode::StructureWithFiles => self.assemble_structure(events, true),
            Mode::StructureDirsOnly => self.assemble_structure(events, false),
        }
    }

    /// Full dump: `<path>`, a fence, the (optionally cleaned) content and
    /// a closing fence per file, concatenated in traversal order.
    fn assemble_dump<I>(&self, events: I) -> String
    where
        I: IntoIterator<Item = ScanEvent>,
    {
        let mut out = String::new();

        for event in events {
            match event {
                ScanEvent::File(record) => {
                    let content = record.content.unwrap_or_default();
                    let content = if self.config.cleanup {
                        cleaner::cleanup_content(&content)
                    } else {
                        content
                    };

                    out.push_str(&record.display_path);
                    out.push_str("\n```\n");
                    out.push_str(&content);
                    out.push_str("\n```\n");
                }
                ScanEvent::Directory { .. } => {}
                ScanEvent::Error { path, error } => self.report(&path, &error),
            }
        }

        out.trim_end().to_string()
    }

    /// Structure listing: one `-<directory>` header per visited directory
    /// (bare `-` for the root), sorted by path, with the matched file
    /// names beneath unless `with_files` is off, and a blank line between
    /// groups.
    fn assemble_structure<I>(&self, events: I, with_files: bool) -> String
    where
        I: IntoIterator<Item = ScanEvent>,
    {
        let mut groups: BTreeMap<String, Vec<String>> = BTreeMap::new();

        for event in events {
            match event {
                ScanEvent::Directory { display_path } => {
                    groups.entry(display_path).or_default();
                }
                ScanEvent::File(record) => {
                    let (dir, name) = match record.display_path.rsplit_once('/') {
                        Some((dir, name)) => (dir.to_string(), name.to_string()),
                        None => (String::new(), record.display_path.clone()),
                    };
                    groups.entry(dir).or_default().push(name);
                }
                ScanEvent::Error { path, error } => self.report(&path, &error),
            }
        }

        let mut sections = Vec::with_capacity(groups.len());
        for (dir, mut names) in groups {
            let mut section = format!("-{}\n", dir);
            if with_files {
                names.sort();
                for name in names {
                    section.push_str(&name);
                    section.push('\n');
                }
            }
            sections.push(section);
        }

        sections.join("\n").trim_end().to_string()
    }

    fn report(&self, path: &Path, error: &io::Error) {
        self.progress
            .println(format!("Error processing {}: {}", path.display(), error));
    }
}
