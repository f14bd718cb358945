/*!
 * Tests for CodeStruct functionality
 */

use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use indicatif::ProgressBar;
use tempfile::tempdir;

use crate::cleaner::{cleanup_content, normalize_whitespace, strip_comments};
use crate::config::{Config, ScanConfig, DEFAULT_EXTENSIONS, DEFAULT_IGNORED_DIRS};
use crate::scanner::Scanner;
use crate::types::{Mode, ScanEvent};
use crate::utils::count_files;
use crate::writer::ArtifactWriter;

// Helper to build allow/ignore sets from literals
fn scan_config(extensions: &[&str], ignored: &[&str]) -> ScanConfig {
    ScanConfig {
        allowed_extensions: extensions.iter().map(|s| (*s).to_string()).collect(),
        ignored_directories: ignored.iter().map(|s| (*s).to_string()).collect(),
    }
}

fn test_config(target_dir: PathBuf, mode: Mode) -> Config {
    Config {
        target_dir,
        mode,
        cleanup: false,
        console: true,
        scan: scan_config(&["py", "js"], &["node_modules"]),
    }
}

fn assemble(config: Config) -> String {
    let progress = Arc::new(ProgressBar::hidden());
    let scanner = Scanner::new(config.clone(), Arc::clone(&progress));
    ArtifactWriter::new(config, progress).assemble(scanner)
}

// Helper to create the reference tree:
// root/{a.py, b.txt, sub/c.js, node_modules/d.js}
fn setup_test_directory() -> io::Result<tempfile::TempDir> {
    let temp_dir = tempdir()?;

    fs::write(temp_dir.path().join("a.py"), "print('a')")?;
    fs::write(temp_dir.path().join("b.txt"), "not source")?;

    fs::create_dir(temp_dir.path().join("sub"))?;
    fs::write(temp_dir.path().join("sub").join("c.js"), "let c = 1;")?;

    fs::create_dir(temp_dir.path().join("node_modules"))?;
    fs::write(
        temp_dir.path().join("node_modules").join("d.js"),
        "let d = 2;",
    )?;

    Ok(temp_dir)
}

//--------------------------------------------------------------------
// Comment stripping
//--------------------------------------------------------------------

#[test]
fn test_strip_comments_identity_on_plain_text() {
    let text = "fn main() {\n    let x = 1;\n}\n";
    assert_eq!(strip_comments(text), text);
}

#[test]
fn test_strip_comments_idempotent() {
    let text = "let a = 1; // one\n/* block */ let b = 2;\n";
    let once = strip_comments(text);
    assert_eq!(strip_comments(&once), once);
}

#[test]
fn test_strip_line_comment_keeps_newline() {
    assert_eq!(strip_comments("code // comment\nmore"), "code \nmore");
}

#[test]
fn test_strip_block_comment() {
    assert_eq!(strip_comments("a/* gone */b"), "ab");
    assert_eq!(strip_comments("a /* one */ b /* two */ c"), "a  b  c");
}

#[test]
fn test_comment_marker_inside_string_preserved() {
    let text = "let s = \"a // not a comment\";";
    assert_eq!(strip_comments(text), text);

    let text = "let s = \"/* also not */\";";
    assert_eq!(strip_comments(text), text);
}

#[test]
fn test_comment_marker_inside_char_literal_preserved() {
    let text = "let c = '/'; let d = '/';";
    assert_eq!(strip_comments(text), text);
}

#[test]
fn test_line_comment_at_end_of_input() {
    // No trailing newline: the comment is discarded, nothing panics
    assert_eq!(strip_comments("x = 1 // trailing"), "x = 1 ");
}

#[test]
fn test_unterminated_block_comment_drops_remainder() {
    assert_eq!(strip_comments("before /* never closes"), "before ");
}

#[test]
fn test_unterminated_string_consumes_remainder() {
    let text = "let s = \"open // still literal";
    assert_eq!(strip_comments(text), text);
}

#[test]
fn test_escaped_quote_is_not_special() {
    // A backslash does not escape the quote, so the string state ends at
    // the second quote and reopens at the third; the comment marker ends
    // up inside a literal and is kept. Long-standing behavior.
    let text = r#""a\"b" // tail"#;
    assert_eq!(strip_comments(text), text);
}

#[test]
fn test_normalize_whitespace() {
    assert_eq!(normalize_whitespace("a\t\tb\r\nc   d"), "a b c d");
    assert_eq!(normalize_whitespace("  padded  "), "padded");
    assert_eq!(normalize_whitespace(""), "");
    assert_eq!(normalize_whitespace(" \t\r\n "), "");
}

#[test]
fn test_cleanup_content_strips_then_collapses() {
    let text = "int x; // note\nint\ty;";
    assert_eq!(cleanup_content(text), "int x; int y;");
}

//--------------------------------------------------------------------
// Filters
//--------------------------------------------------------------------

#[test]
fn test_extension_filter_case_insensitive() {
    let config = scan_config(&["py", "js"], &[]);

    assert!(config.allows_file("a.py"));
    assert!(config.allows_file("A.PY"));
    assert!(config.allows_file("minified.tar.js"));
    assert!(!config.allows_file("a.txt"));
}

#[test]
fn test_files_without_extension_never_allowed() {
    let config = scan_config(&["py", "js"], &[]);

    assert!(!config.allows_file("Makefile"));
    assert!(!config.allows_file("trailing."));
}

#[test]
fn test_ignore_matcher_exact_and_case_sensitive() {
    let config = scan_config(&[], &["node_modules", "Build"]);

    assert!(config.ignores_dir("node_modules"));
    assert!(config.ignores_dir("Build"));
    assert!(!config.ignores_dir("Node_Modules"));
    assert!(!config.ignores_dir("build"));
    assert!(!config.ignores_dir("node_modules2"));
}

//--------------------------------------------------------------------
// Scanner
//--------------------------------------------------------------------

#[test]
fn test_scanner_event_order_is_breadth_first() -> io::Result<()> {
    let temp_dir = setup_test_directory()?;
    let config = test_config(temp_dir.path().to_path_buf(), Mode::FullDump);

    let scanner = Scanner::new(config, Arc::new(ProgressBar::hidden()));
    let events: Vec<ScanEvent> = scanner.collect();

    let summary: Vec<String> = events
        .iter()
        .map(|event| match event {
            ScanEvent::Directory { display_path } => format!("dir:{}", display_path),
            ScanEvent::File(record) => format!("file:{}", record.display_path),
            ScanEvent::Error { path, .. } => format!("err:{}", path.display()),
        })
        .collect();

    // Root files come before anything under sub/; node_modules never shows
    assert_eq!(
        summary,
        vec!["dir:", "file:a.py", "dir:sub", "file:sub/c.js"]
    );

    Ok(())
}

#[test]
fn test_scanner_reads_content_only_in_full_dump() -> io::Result<()> {
    let temp_dir = setup_test_directory()?;

    let full = test_config(temp_dir.path().to_path_buf(), Mode::FullDump);
    let scanner = Scanner::new(full, Arc::new(ProgressBar::hidden()));
    for event in scanner {
        if let ScanEvent::File(record) = event {
            assert!(record.content.is_some());
        }
    }

    let structure = test_config(temp_dir.path().to_path_buf(), Mode::StructureWithFiles);
    let scanner = Scanner::new(structure, Arc::new(ProgressBar::hidden()));
    for event in scanner {
        if let ScanEvent::File(record) = event {
            assert!(record.content.is_none());
        }
    }

    Ok(())
}

#[cfg(unix)]
#[test]
fn test_unreadable_directory_does_not_abort_scan() -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = setup_test_directory()?;
    let locked = temp_dir.path().join("locked");
    fs::create_dir(&locked)?;
    fs::write(locked.join("e.py"), "print('e')")?;
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000))?;

    let config = test_config(temp_dir.path().to_path_buf(), Mode::FullDump);
    let scanner = Scanner::new(config, Arc::new(ProgressBar::hidden()));
    let events: Vec<ScanEvent> = scanner.collect();

    let errors = events
        .iter()
        .filter(|e| matches!(e, ScanEvent::Error { .. }))
        .count();
    let files: Vec<&str> = events
        .iter()
        .filter_map(|e| match e {
            ScanEvent::File(record) => Some(record.display_path.as_str()),
            _ => None,
        })
        .collect();

    assert_eq!(errors, 1);
    assert_eq!(files, vec!["a.py", "sub/c.js"]);

    // Restore permissions so the tempdir can be removed
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755))?;
    Ok(())
}

//--------------------------------------------------------------------
// Artifacts
//--------------------------------------------------------------------

#[test]
fn test_full_dump_artifact() -> io::Result<()> {
    let temp_dir = setup_test_directory()?;
    let artifact = assemble(test_config(temp_dir.path().to_path_buf(), Mode::FullDump));

    assert_eq!(
        artifact,
        "a.py\n```\nprint('a')\n```\nsub/c.js\n```\nlet c = 1;\n```"
    );

    Ok(())
}

#[test]
fn test_full_dump_excludes_filtered_and_ignored() -> io::Result<()> {
    let temp_dir = setup_test_directory()?;
    let artifact = assemble(test_config(temp_dir.path().to_path_buf(), Mode::FullDump));

    assert!(!artifact.contains("b.txt"));
    assert!(!artifact.contains("d.js"));
    assert!(!artifact.contains("node_modules"));

    Ok(())
}

#[test]
fn test_full_dump_with_cleanup() -> io::Result<()> {
    let temp_dir = tempdir()?;
    fs::write(
        temp_dir.path().join("a.js"),
        "let a = 1; // one\nlet b = 2;",
    )?;

    let mut config = test_config(temp_dir.path().to_path_buf(), Mode::FullDump);
    config.cleanup = true;
    let artifact = assemble(config);

    assert_eq!(artifact, "a.js\n```\nlet a = 1; let b = 2;\n```");

    Ok(())
}

#[test]
fn test_structure_with_files_artifact() -> io::Result<()> {
    let temp_dir = setup_test_directory()?;
    let artifact = assemble(test_config(
        temp_dir.path().to_path_buf(),
        Mode::StructureWithFiles,
    ));

    assert_eq!(artifact, "-\na.py\n\n-sub\nc.js");

    Ok(())
}

#[test]
fn test_structure_dirs_only_artifact() -> io::Result<()> {
    let temp_dir = setup_test_directory()?;
    let artifact = assemble(test_config(
        temp_dir.path().to_path_buf(),
        Mode::StructureDirsOnly,
    ));

    assert_eq!(artifact, "-\n\n-sub");

    Ok(())
}

#[test]
fn test_artifact_is_deterministic() -> io::Result<()> {
    let temp_dir = setup_test_directory()?;

    let first = assemble(test_config(temp_dir.path().to_path_buf(), Mode::FullDump));
    let second = assemble(test_config(temp_dir.path().to_path_buf(), Mode::FullDump));
    assert_eq!(first, second);

    Ok(())
}

#[test]
fn test_empty_scan_produces_empty_artifact() -> io::Result<()> {
    let temp_dir = tempdir()?;
    let artifact = assemble(test_config(temp_dir.path().to_path_buf(), Mode::FullDump));
    assert_eq!(artifact, "");

    Ok(())
}

//--------------------------------------------------------------------
// Configuration
//--------------------------------------------------------------------

#[test]
fn test_scan_config_round_trip() -> io::Result<()> {
    let temp_dir = tempdir()?;
    let path = temp_dir.path().join("nested").join("config.json");

    let config = scan_config(&["rs", "toml"], &["target"]);
    config.save(&path)?;

    let raw = fs::read_to_string(&path)?;
    let loaded: ScanConfig = serde_json::from_str(&raw)?;
    assert_eq!(loaded, config);

    Ok(())
}

#[test]
fn test_default_sets() {
    assert!(DEFAULT_EXTENSIONS.contains("py"));
    assert!(DEFAULT_EXTENSIONS.contains("cs"));
    assert!(DEFAULT_IGNORED_DIRS.contains(".git"));
    assert!(DEFAULT_IGNORED_DIRS.contains("node_modules"));

    let config = ScanConfig::default();
    assert!(config.allows_file("main.go"));
    assert!(config.ignores_dir(".idea"));
}

#[test]
fn test_validate_rejects_missing_target() {
    let config = test_config(PathBuf::from("/definitely/not/a/real/dir"), Mode::FullDump);
    assert!(config.validate().is_err());
}

//--------------------------------------------------------------------
// Utilities
//--------------------------------------------------------------------

#[test]
fn test_count_files_matches_scan() -> io::Result<()> {
    let temp_dir = setup_test_directory()?;

    let config = test_config(temp_dir.path().to_path_buf(), Mode::FullDump);
    assert_eq!(count_files(temp_dir.path(), &config)?, 2);

    let dirs_only = test_config(temp_dir.path().to_path_buf(), Mode::StructureDirsOnly);
    assert_eq!(count_files(temp_dir.path(), &dirs_only)?, 0);

    Ok(())
}

#[test]
fn test_format_file_size() {
    use crate::utils::format_file_size;

    assert_eq!(format_file_size(512), "512 bytes");
    assert_eq!(format_file_size(2048), "2.00 KB");
    assert_eq!(format_file_size(5 * 1024 * 1024), "5.00 MB");
}
