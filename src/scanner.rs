/*!
 * Breadth-first directory traversal
 */

use std::collections::VecDeque;
use std::fs;
use std::sync::Arc;

use indicatif::ProgressBar;
use rayon::prelude::*;

use crate::config::Config;
use crate::types::{FileRecord, Mode, ScanEvent, WorkItem};

/// Breadth-first scanner over the target tree.
///
/// Owns an explicit FIFO queue of pending directories and yields events
/// lazily through `Iterator`. Each dequeued directory contributes a
/// directory event, then its matched files sorted by name, then its
/// surviving subdirectories (sorted by name) are enqueued with an
/// extended display prefix. The queue keeps deep trees off the call
/// stack, and the sorted per-directory emission makes the event order --
/// and therefore the artifact -- reproducible across runs.
///
/// Symlinked directories are followed without cycle detection; a cyclic
/// link loops. Unreadable entries become `ScanEvent::Error` and the walk
/// continues with their siblings.
pub struct Scanner {
    config: Config,
    progress: Arc<ProgressBar>,
    queue: VecDeque<WorkItem>,
    pending: VecDeque<ScanEvent>,
}

impl Scanner {
    /// Create a scanner with its queue seeded at the target directory
    pub fn new(config: Config, progress: Arc<ProgressBar>) -> Self {
        let mut queue = VecDeque::new();
        queue.push_back(WorkItem {
            dir: config.target_dir.clone(),
            prefix: String::new(),
        });

        Self {
            config,
            progress,
            queue,
            pending: VecDeque::new(),
        }
    }

    /// List one dequeued directory: files first, subdirectories after
    fn visit(&mut self, item: WorkItem) {
        self.pending.push_back(ScanEvent::Directory {
            display_path: item.prefix.trim_end_matches('/').to_string(),
        });

        let entries = match fs::read_dir(&item.dir) {
            Ok(entries) => entries,
            Err(error) => {
                self.pending.push_back(ScanEvent::Error {
                    path: item.dir,
                    error,
                });
                return;
            }
        };

        let mut files = Vec::new();
        let mut dirs = Vec::new();
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(error) => {
                    self.pending.push_back(ScanEvent::Error {
                        path: item.dir.clone(),
                        error,
                    });
                    continue;
                }
            };
            let name = entry.file_name().to_string_lossy().to_string();
            // is_dir follows symlinks, matching the no-cycle-detection policy
            if entry.path().is_dir() {
                dirs.push(name);
            } else {
                files.push(name);
            }
        }
        files.sort();
        dirs.sort();

        if self.config.mode != Mode::StructureDirsOnly {
            self.emit_files(&item, &files);
        }

        for name in dirs {
            if self.config.scan.ignores_dir(&name) {
                continue;
            }
            self.queue.push_back(WorkItem {
                dir: item.dir.join(&name),
                prefix: format!("{}{}/", item.prefix, name),
            });
        }
    }

    /// Emit one file event per allowed file, in sorted order.
    ///
    /// In full-dump mode the file bodies are read in parallel, but the
    /// events are emitted in the sorted input order, never in completion
    /// order.
    fn emit_files(&mut self, item: &WorkItem, files: &[String]) {
        let matched: Vec<&String> = files
            .iter()
            .filter(|name| self.config.scan.allows_file(name))
            .collect();

        let contents: Vec<Option<std::io::Result<String>>> =
            if self.config.mode == Mode::FullDump {
                matched
                    .par_iter()
                    .map(|name| Some(fs::read_to_string(item.dir.join(name.as_str()))))
                    .collect()
            } else {
                matched.iter().map(|_| None).collect()
            };

        for (name, content) in matched.into_iter().zip(contents) {
            let display_path = format!("{}{}", item.prefix, name);
            self.progress.inc(1);
            self.progress.set_message(format!("Source: {}", display_path));

            match content {
                Some(Err(error)) => self.pending.push_back(ScanEvent::Error {
                    path: item.dir.join(name.as_str()),
                    error,
                }),
                Some(Ok(content)) => self.pending.push_back(ScanEvent::File(FileRecord {
                    display_path,
                    content: Some(content),
                })),
                None => self.pending.push_back(ScanEvent::File(FileRecord {
                    display_path,
                    content: None,
                })),
            }
        }
    }
}

impl Iterator for Scanner {
    type Item = ScanEvent;

    fn next(&mut self) -> Option<ScanEvent> {
        loop {
            if let Some(event) = self.pending.pop_front() {
                return Some(event);
            }
            // Every visit pushes at least the directory event
            let item = self.queue.pop_front()?;
            self.visit(item);
        }
    }
}
