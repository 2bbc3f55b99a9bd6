//! System clipboard with fallbacks for headless environments.

use std::io::Write;
use std::process::{Command, Stdio};

use crate::core::host::Clipboard;
use crate::error::ScaffoldError;

/// Backed by `arboard`; falls back to platform clipboard executables when the
/// native clipboard cannot be opened.
pub struct SystemClipboard {
    primary: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        let primary = arboard::Clipboard::new().ok();
        Self { primary }
    }
}

impl Default for SystemClipboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Clipboard for SystemClipboard {
    fn read_text(&mut self) -> Result<String, ScaffoldError> {
        if let Some(primary) = self.primary.as_mut() {
            match primary.get_text() {
                Ok(text) => return Ok(text),
                Err(arboard::Error::ContentNotAvailable) => return Ok(String::new()),
                Err(_) => self.primary = None,
            }
        }
        fallback_paste()
    }

    fn write_text(&mut self, text: &str) -> Result<(), ScaffoldError> {
        if let Some(primary) = self.primary.as_mut()
            && primary.set_text(text.to_owned()).is_ok()
        {
            return Ok(());
        }

        self.primary = None;
        fallback_copy(text)
    }
}

fn fallback_copy(text: &str) -> Result<(), ScaffoldError> {
    for command in copy_commands() {
        if try_command_copy(command, text).is_ok() {
            return Ok(());
        }
    }

    Err(ScaffoldError::Clipboard(
        "failed to copy text using available backends".into(),
    ))
}

fn fallback_paste() -> Result<String, ScaffoldError> {
    for command in paste_commands() {
        if let Ok(text) = try_command_paste(command) {
            return Ok(text);
        }
    }

    Err(ScaffoldError::Clipboard(
        "failed to read text using available backends".into(),
    ))
}

fn try_command_copy(command: &[&str], text: &str) -> Result<(), ScaffoldError> {
    let (program, args) = command
        .split_first()
        .ok_or_else(|| ScaffoldError::Clipboard("clipboard command missing program".into()))?;

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .spawn()?;

    if let Some(stdin) = child.stdin.as_mut() {
        stdin.write_all(text.as_bytes())?;
    }

    let status = child.wait()?;
    if status.success() {
        Ok(())
    } else {
        Err(ScaffoldError::Clipboard(format!(
            "{program} exited with status {status}"
        )))
    }
}

fn try_command_paste(command: &[&str]) -> Result<String, ScaffoldError> {
    let (program, args) = command
        .split_first()
        .ok_or_else(|| ScaffoldError::Clipboard("clipboard command missing program".into()))?;

    let output = Command::new(program)
        .args(args)
        .stderr(Stdio::null())
        .output()?;
    if !output.status.success() {
        return Err(ScaffoldError::Clipboard(format!(
            "{program} exited with status {}",
            output.status
        )));
    }

    let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
    // PowerShell terminates its output with a newline
    if cfg!(target_os = "windows") && text.ends_with("\r\n") {
        text.truncate(text.len() - 2);
    }
    Ok(text)
}

#[cfg(target_os = "macos")]
fn copy_commands() -> Vec<&'static [&'static str]> {
    vec![&["pbcopy"]]
}

#[cfg(target_os = "macos")]
fn paste_commands() -> Vec<&'static [&'static str]> {
    vec![&["pbpaste"]]
}

#[cfg(all(unix, not(target_os = "macos")))]
fn copy_commands() -> Vec<&'static [&'static str]> {
    vec![&["xclip", "-selection", "clipboard"], &["wl-copy"]]
}

#[cfg(all(unix, not(target_os = "macos")))]
fn paste_commands() -> Vec<&'static [&'static str]> {
    vec![&["xclip", "-selection", "clipboard", "-o"], &["wl-paste", "--no-newline"]]
}

#[cfg(target_os = "windows")]
fn copy_commands() -> Vec<&'static [&'static str]> {
    vec![&["powershell.exe", "-NoProfile", "-Command", "Set-Clipboard"]]
}

#[cfg(target_os = "windows")]
fn paste_commands() -> Vec<&'static [&'static str]> {
    vec![&["powershell.exe", "-NoProfile", "-Command", "Get-Clipboard"]]
}

#[cfg(not(any(unix, target_os = "windows")))]
fn copy_commands() -> Vec<&'static [&'static str]> {
    Vec::new()
}

#[cfg(not(any(unix, target_os = "windows")))]
fn paste_commands() -> Vec<&'static [&'static str]> {
    Vec::new()
}
