/*!
 * Command-line interface for CodeStruct
 */

use std::env;
use std::io;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Instant;

use clap::{CommandFactory, Parser};
use indicatif::{ProgressBar, ProgressStyle};

use codestruct::clipboard;
use codestruct::config::{Args, Config, ScanConfig};
use codestruct::error::Result;
use codestruct::scanner::Scanner;
use codestruct::utils::{check_path, count_files, format_file_size};
use codestruct::writer::ArtifactWriter;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    if let Some(shell) = args.generate {
        clap_complete::generate(shell, &mut Args::command(), "codestruct", &mut io::stdout());
        return Ok(());
    }

    if args.set_path {
        check_path()?;
        return Ok(());
    }

    // Load persisted allow/ignore sets (defaults are written on first run)
    let scan = ScanConfig::load();
    print_banner(&scan);

    let target_dir = env::current_dir()?;
    eprintln!("Working directory: {}", target_dir.display());

    // Create and validate configuration
    let config = Config::from_args(&args, target_dir, scan);
    config.validate()?;

    // Progress bar fed by a counting pre-pass
    let progress = ProgressBar::new(0);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} {wide_msg:.dim.white} {pos}/{len} ({percent}%)")
            .unwrap(),
    );
    progress.enable_steady_tick(std::time::Duration::from_millis(100));
    progress.set_prefix("Scanning");

    let total_files = match count_files(&config.target_dir, &config) {
        Ok(count) => count,
        Err(e) => {
            progress.println(format!("Warning: failed to count files: {}", e));
            0
        }
    };
    progress.set_length(total_files);
    let progress = Arc::new(progress);

    // Scan and assemble
    let start_time = Instant::now();
    let scanner = Scanner::new(config.clone(), Arc::clone(&progress));
    let writer = ArtifactWriter::new(config.clone(), Arc::clone(&progress));
    let artifact = writer.assemble(scanner);
    let duration = start_time.elapsed();

    progress.finish_and_clear();

    // Hand the artifact to the selected sink
    if config.console {
        println!("{}", artifact);
    } else {
        clipboard::copy_to_clipboard(&artifact)?;
        eprintln!("Structure has been copied to the clipboard");
    }

    eprintln!(
        "Done in {:.2?}, artifact size {}",
        duration,
        format_file_size(artifact.len() as u64)
    );

    Ok(())
}

/// Startup banner: version, active sets and config location.
///
/// Goes to stderr so `--console` output stays a clean artifact.
fn print_banner(scan: &ScanConfig) {
    let extensions: Vec<&str> = scan.allowed_extensions.iter().map(String::as_str).collect();
    let directories: Vec<&str> = scan
        .ignored_directories
        .iter()
        .map(String::as_str)
        .collect();

    eprintln!("CodeStruct {}", codestruct::VERSION);
    eprintln!("  Allowed extensions: {}", extensions.join(", "));
    eprintln!("  Ignored directories: {}", directories.join(", "));
    if let Some(path) = ScanConfig::config_path() {
        eprintln!("  Configuration file: {}", path.display());
    }
    eprintln!();
}
