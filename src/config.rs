/*!
 * Configuration handling for CodeStruct
 */

use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use clap::Parser;
use clap_complete::Shell;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::types::Mode;

/// Extensions included until a config file says otherwise
pub static DEFAULT_EXTENSIONS: Lazy<BTreeSet<String>> = Lazy::new(|| {
    [
        "c", "h", "cpp", "hpp", "cs", "csproj", "cshtml", "csx", "csharp", "vb", "java",
        "kotlin", "py", "php", "js", "ts", "html", "css", "go", "ruby", "pl", "r", "groovy",
        "swift", "asm", "bat", "cmd", "ps1",
    ]
    .iter()
    .map(|s| (*s).to_string())
    .collect()
});

/// Directory names skipped during traversal until a config file says otherwise
pub static DEFAULT_IGNORED_DIRS: Lazy<BTreeSet<String>> = Lazy::new(|| {
    [
        "node_modules", ".git", ".svn", ".run", ".idea", "bin", "obj", ".vs", ".vscode",
        ".metadata", ".recommenders", ".settings", ".angular", ".keep", ".venv",
        ".virtualenv", "_builds", "_notes", "Build", "Debug", "release", "tmp", "temp",
    ]
    .iter()
    .map(|s| (*s).to_string())
    .collect()
});

/// Command-line arguments for CodeStruct
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "codestruct",
    version = env!("CARGO_PKG_VERSION"),
    about = "Copy a project's source structure and contents to the clipboard for LLM context",
    long_about = "Scans the current working directory, selects source files by extension, \
                  and copies one concatenated text artifact to the clipboard (or stdout) \
                  for use as LLM context."
)]
pub struct Args {
    /// Output to console instead of clipboard
    #[clap(short, long)]
    pub console: bool,

    /// Clean up file content (strip comments, collapse whitespace)
    #[clap(long)]
    pub cleanup: bool,

    /// Generate the file and directory structure without content
    #[clap(short, long, conflicts_with = "directories")]
    pub structure: bool,

    /// Generate the directory structure without files
    #[clap(short, long)]
    pub directories: bool,

    /// Check whether the codestruct executable is on PATH
    #[clap(long)]
    pub set_path: bool,

    /// Generate shell completions
    #[clap(long = "generate", value_enum)]
    pub generate: Option<Shell>,
}

/// Allow/ignore sets, persisted as JSON in the user config directory.
///
/// `BTreeSet` keeps the banner listing and the serialized file stable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Lower-case file extensions eligible for inclusion
    pub allowed_extensions: BTreeSet<String>,
    /// Directory base names excluded from descent (exact, case-sensitive)
    pub ignored_directories: BTreeSet<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            allowed_extensions: DEFAULT_EXTENSIONS.clone(),
            ignored_directories: DEFAULT_IGNORED_DIRS.clone(),
        }
    }
}

impl ScanConfig {
    /// Extension filter: the substring after the last `.`, lower-cased,
    /// must be in the allow set. Files with no extension never match.
    pub fn allows_file(&self, file_name: &str) -> bool {
        match file_name.rsplit_once('.') {
            Some((_, ext)) if !ext.is_empty() => {
                self.allowed_extensions.contains(&ext.to_lowercase())
            }
            _ => false,
        }
    }

    /// Ignore matcher: exact, case-sensitive match on the base name only.
    pub fn ignores_dir(&self, dir_name: &str) -> bool {
        self.ignored_directories.contains(dir_name)
    }

    /// Location of the persisted configuration file
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("codestruct").join("config.json"))
    }

    /// Load the persisted sets. A missing or unreadable file falls back to
    /// the built-in defaults and writes them to disk for the next run.
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };

        match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                eprintln!(
                    "Warning: invalid config file {}: {}. Using defaults",
                    path.display(),
                    e
                );
                Self::persist_defaults(&path)
            }),
            Err(_) => Self::persist_defaults(&path),
        }
    }

    fn persist_defaults(path: &Path) -> Self {
        let config = Self::default();
        if let Err(e) = config.save(path) {
            eprintln!(
                "Warning: failed to write default config {}: {}",
                path.display(),
                e
            );
        }
        config
    }

    /// Write the sets to `path`, creating parent directories as needed
    pub fn save(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(self)?;
        fs::write(path, raw)
    }
}

/// Application configuration for one run
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory the scan starts from
    pub target_dir: PathBuf,

    /// Artifact flavour
    pub mode: Mode,

    /// Strip comments and collapse whitespace in file content
    pub cleanup: bool,

    /// Print the artifact to stdout instead of copying it to the clipboard
    pub console: bool,

    /// Allow/ignore sets
    pub scan: ScanConfig,
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args(args: &Args, target_dir: PathBuf, scan: ScanConfig) -> Self {
        let mode = if args.directories {
            Mode::StructureDirsOnly
        } else if args.structure {
            Mode::StructureWithFiles
        } else {
            Mode::FullDump
        };

        Self {
            target_dir,
            mode,
            cleanup: args.cleanup,
            console: args.console,
            scan,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> io::Result<()> {
        if !self.target_dir.exists() || !self.target_dir.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("Target directory not found: {}", self.target_dir.display()),
            ));
        }

        Ok(())
    }
}
