/*!
 * Utility functions for CodeStruct
 */

use std::env;
use std::io;
use std::path::Path;

use walkdir::WalkDir;

use crate::config::Config;
use crate::types::Mode;

/// Count the files one scan will emit, for progress tracking.
///
/// Applies the same allow/ignore filters as the scanner; the traversal
/// order does not matter here, only the total.
pub fn count_files(dir: &Path, config: &Config) -> io::Result<u64> {
    if config.mode == Mode::StructureDirsOnly {
        return Ok(0);
    }

    let walker = WalkDir::new(dir).into_iter().filter_entry(|entry| {
        !(entry.file_type().is_dir()
            && entry.depth() > 0
            && config.scan.ignores_dir(&entry.file_name().to_string_lossy()))
    });

    let mut count = 0;
    for entry in walker.filter_map(Result::ok) {
        if entry.file_type().is_file()
            && config.scan.allows_file(&entry.file_name().to_string_lossy())
        {
            count += 1;
        }
    }

    Ok(count)
}

/// Format a human-readable file size
pub fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{} bytes", size)
    }
}

/// Report whether the running executable's directory is on `PATH`.
///
/// Never mutates the environment; when the directory is missing it
/// prints the line to add instead.
pub fn check_path() -> io::Result<()> {
    let exe = env::current_exe()?;
    let Some(exe_dir) = exe.parent() else {
        return Ok(());
    };

    let on_path = env::var_os("PATH")
        .map(|paths| env::split_paths(&paths).any(|dir| dir == exe_dir))
        .unwrap_or(false);

    if on_path {
        println!(
            "codestruct is already on PATH ({})",
            exe_dir.display()
        );
    } else {
        println!("codestruct is not on PATH. Add it with:");
        println!("  export PATH=\"{}:$PATH\"", exe_dir.display());
    }

    Ok(())
}
