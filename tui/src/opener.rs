//! Share Link Opener
//!
//! Hands a share URL to the desktop's default browser. Opening is fire and
//! forget: a failure becomes a status line message, never a crash.

use std::io;
use std::process::{Command, Stdio};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OpenError {
    #[error("failed to launch '{program}': {source}")]
    Spawn {
        program: &'static str,
        #[source]
        source: io::Error,
    },

    #[error("opening links is disabled")]
    Disabled,
}

/// Opens URLs outside the terminal
pub trait LinkOpener: Send {
    /// Start opening `url`; returns once the request is handed off
    fn open(&mut self, url: &str) -> Result<(), OpenError>;
}

/// Platform opener: `xdg-open`, `open`, or `cmd /C start`
#[derive(Debug, Default)]
pub struct SystemOpener;

impl SystemOpener {
    #[cfg(target_os = "windows")]
    fn command(url: &str) -> (&'static str, Command) {
        let mut cmd = Command::new("cmd");
        // the empty string is the window title `start` expects first
        cmd.args(["/C", "start", ""]).arg(url);
        ("cmd", cmd)
    }

    #[cfg(target_os = "macos")]
    fn command(url: &str) -> (&'static str, Command) {
        let mut cmd = Command::new("open");
        cmd.arg(url);
        ("open", cmd)
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    fn command(url: &str) -> (&'static str, Command) {
        let mut cmd = Command::new("xdg-open");
        cmd.arg(url);
        ("xdg-open", cmd)
    }
}

impl LinkOpener for SystemOpener {
    fn open(&mut self, url: &str) -> Result<(), OpenError> {
        let (program, mut cmd) = Self::command(url);

        // Keep the child off the alternate screen
        let mut child = cmd
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| OpenError::Spawn { program, source })?;

        tracing::debug!(program, pid = child.id(), "Launched link opener");

        // Reap the child without blocking the frame loop
        std::thread::spawn(move || match child.wait() {
            Ok(status) if !status.success() => {
                tracing::warn!(program, %status, "Link opener exited with failure");
            }
            Ok(_) => {}
            Err(e) => tracing::warn!(program, error = %e, "Failed to wait for link opener"),
        });

        Ok(())
    }
}

/// Opener for `--no-open`: links are only shown on the status line
#[derive(Debug, Default)]
pub struct DisabledOpener;

impl LinkOpener for DisabledOpener {
    fn open(&mut self, _url: &str) -> Result<(), OpenError> {
        Err(OpenError::Disabled)
    }
}
