/*!
 * Clipboard sink
 *
 * Copies the artifact to the system clipboard by probing for an
 * available clipboard command and piping the text through it.
 */

use std::env;
use std::io::{self, Write};
use std::process::{Command, Stdio};

use thiserror::Error;

/// Error type for clipboard operations
#[derive(Error, Debug)]
pub enum ClipboardError {
    /// Failed to execute the clipboard command
    #[error("Command failed: {0}")]
    CommandFailed(String),

    /// No suitable clipboard mechanism was found
    #[error("No suitable clipboard mechanism found")]
    NoClipboardFound,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for clipboard operations
pub type Result<T> = std::result::Result<T, ClipboardError>;

/// Known clipboard commands
#[derive(Debug, Clone, Copy)]
enum Provider {
    Tmux,
    Wayland,
    Xsel,
    Xclip,
    MacOs,
    Windows,
    Termux,
}

impl Provider {
    const fn command(self) -> (&'static str, &'static [&'static str]) {
        match self {
            Self::Tmux => ("tmux", &["load-buffer", "-w", "-"]),
            Self::Wayland => ("wl-copy", &[]),
            Self::Xsel => ("xsel", &["-b", "-i"]),
            Self::Xclip => ("xclip", &["-selection", "clipboard", "-in"]),
            Self::MacOs => ("pbcopy", &[]),
            Self::Windows => ("clip.exe", &[]),
            Self::Termux => ("termux-clipboard-set", &[]),
        }
    }
}

/// Copy text to the system clipboard.
///
/// Probes the platform-appropriate providers in order of preference and
/// uses the first whose command is on `PATH`.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    for provider in candidates() {
        let (cmd, args) = provider.command();
        if command_exists(cmd) {
            return pipe_through(cmd, args, text);
        }
    }

    Err(ClipboardError::NoClipboardFound)
}

/// Check whether a command can be found on `PATH`
pub fn command_exists(command: &str) -> bool {
    env::var_os("PATH")
        .map(|paths| env::split_paths(&paths).any(|dir| dir.join(command).is_file()))
        .unwrap_or(false)
}

/// Providers to try, in order of preference
fn candidates() -> Vec<Provider> {
    let mut providers = Vec::new();

    // A running tmux session wins over everything else
    if env::var("TMUX").is_ok() {
        providers.push(Provider::Tmux);
    }

    if cfg!(target_os = "macos") {
        providers.push(Provider::MacOs);
    } else if cfg!(target_os = "windows") || env::var("WSL_DISTRO_NAME").is_ok() {
        providers.push(Provider::Windows);
    } else if cfg!(target_os = "android") {
        providers.push(Provider::Termux);
    } else {
        providers.extend([Provider::Wayland, Provider::Xsel, Provider::Xclip]);
    }

    providers
}

/// Spawn `cmd`, write `text` to its stdin and wait for it to finish
fn pipe_through(cmd: &str, args: &[&str], text: &str) -> Result<()> {
    let mut child = Command::new(cmd)
        .args(args)
        .stdin(Stdio::piped())
        .spawn()
        .map_err(|e| ClipboardError::CommandFailed(format!("failed to spawn {}: {}", cmd, e)))?;

    child
        .stdin
        .as_mut()
        .ok_or_else(|| ClipboardError::CommandFailed(format!("failed to open stdin for {}", cmd)))?
        .write_all(text.as_bytes())?;

    let status = child.wait()?;
    if status.success() {
        Ok(())
    } else {
        Err(ClipboardError::CommandFailed(format!(
            "{} exited with status: {}",
            cmd, status
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_exists() {
        // These commands should exist on most systems
        assert!(command_exists("ls"));
        assert!(command_exists("echo"));

        assert!(!command_exists("nonexistentcommandxyz"));
    }

    #[test]
    fn test_candidates_not_empty_on_desktop_platforms() {
        // Whatever the platform, probing must yield at least one provider
        // to try (availability is checked later, at copy time).
        assert!(!candidates().is_empty());
    }
}
