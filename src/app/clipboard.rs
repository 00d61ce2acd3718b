//! Clipboard transport.
//!
//! Publishing goes to the system clipboard through the terminal (OSC 52, or
//! `pbcopy` on macOS). Terminals rarely allow reading the clipboard back, so
//! [`TerminalClipboard`] answers requests with the last text it published;
//! text pasted from elsewhere arrives as a bracketed paste event instead.

use std::io::{Write, stdout};

use base64::Engine;

pub trait Clipboard {
    /// Make `text` available to other applications.
    fn publish(&mut self, text: &str) -> std::io::Result<()>;

    /// The current clipboard text, if known.
    fn request(&self) -> Option<String>;
}

/// In-process clipboard.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    text: Option<String>,
}

impl Clipboard for MemoryClipboard {
    fn publish(&mut self, text: &str) -> std::io::Result<()> {
        self.text = Some(text.to_string());
        Ok(())
    }

    fn request(&self) -> Option<String> {
        self.text.clone()
    }
}

/// System clipboard via the controlling terminal.
#[derive(Debug, Clone, Default)]
pub struct TerminalClipboard {
    last: MemoryClipboard,
}

impl Clipboard for TerminalClipboard {
    fn publish(&mut self, text: &str) -> std::io::Result<()> {
        self.last.publish(text)?;
        copy_to_system(text)
    }

    fn request(&self) -> Option<String> {
        self.last.request()
    }
}

fn copy_to_system(text: &str) -> std::io::Result<()> {
    #[cfg(target_os = "macos")]
    {
        if copy_to_pbcopy(text).is_ok() {
            return Ok(());
        }
    }
    copy_to_clipboard_osc52(text)
}

#[cfg(target_os = "macos")]
fn copy_to_pbcopy(text: &str) -> std::io::Result<()> {
    use std::process::{Command, Stdio};

    let child = Command::new("pbcopy").stdin(Stdio::piped()).spawn()?;
    feed_and_wait(child, text)
}

/// Write `text` to the child's stdin and reap it, even when the write fails.
#[cfg(any(target_os = "macos", test))]
fn feed_and_wait(mut child: std::process::Child, text: &str) -> std::io::Result<()> {
    // Dropping stdin closes the pipe so the child can exit.
    let written = child
        .stdin
        .take()
        .map_or(Ok(()), |mut stdin| stdin.write_all(text.as_bytes()));
    let status = child.wait()?;
    written?;
    if status.success() {
        Ok(())
    } else {
        Err(std::io::Error::other(format!("clipboard helper exited with {status}")))
    }
}

fn copy_to_clipboard_osc52(text: &str) -> std::io::Result<()> {
    let mut out = stdout();
    out.write_all(osc52_sequence(text).as_bytes())?;
    out.flush()
}

fn osc52_sequence(text: &str) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(text.as_bytes());
    format!("\x1b]52;c;{encoded}\x07")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_osc52_sequence_encodes_text() {
        assert_eq!(osc52_sequence("hi"), "\x1b]52;c;aGk=\x07");
    }

    #[test]
    fn test_memory_clipboard_returns_last_published() {
        let mut clipboard = MemoryClipboard::default();
        assert_eq!(clipboard.request(), None);
        clipboard.publish("one").unwrap();
        clipboard.publish("two").unwrap();
        assert_eq!(clipboard.request().as_deref(), Some("two"));
    }

    #[cfg(unix)]
    #[test]
    fn test_feed_and_wait_reaps_child() {
        use std::process::{Command, Stdio};

        let child = Command::new("cat")
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .spawn()
            .unwrap();
        feed_and_wait(child, "copied").unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn test_feed_and_wait_reaps_child_when_write_fails() {
        use std::process::{Command, Stdio};

        // `true` never reads, so a write larger than the pipe buffer breaks.
        let child = Command::new("true").stdin(Stdio::piped()).spawn().unwrap();
        let id = child.id();
        let err = feed_and_wait(child, &"x".repeat(1 << 20)).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::BrokenPipe);
        if cfg!(target_os = "linux") {
            assert!(!std::path::Path::new(&format!("/proc/{id}")).exists());
        }
    }
}
