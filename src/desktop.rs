//! Side effects that leave the process: launching the browser and writing
//! the clipboard. Both are fire-and-forget from the caller's point of view.

use anyhow::{Context, Result};
use std::process::{Command, Stdio};

pub trait Desktop {
    fn open_url(&mut self, url: &str) -> Result<()>;
    fn copy_text(&mut self, text: &str) -> Result<()>;
}

/// The real desktop: the platform URL opener and the system clipboard.
#[derive(Default)]
pub struct SystemDesktop {
    clipboard: Option<arboard::Clipboard>,
}

impl SystemDesktop {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Desktop for SystemDesktop {
    fn open_url(&mut self, url: &str) -> Result<()> {
        let mut command = if cfg!(target_os = "macos") {
            Command::new("open")
        } else if cfg!(target_os = "windows") {
            let mut command = Command::new("cmd");
            command.args(["/C", "start", ""]);
            command
        } else {
            Command::new("xdg-open")
        };

        command
            .arg(url)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .context("Failed to launch browser")?;

        Ok(())
    }

    fn copy_text(&mut self, text: &str) -> Result<()> {
        // The clipboard handle is kept open: on X11 the contents vanish when
        // the owning handle is dropped.
        if self.clipboard.is_none() {
            self.clipboard = Some(arboard::Clipboard::new().context("Clipboard unavailable")?);
        }

        if let Some(clipboard) = self.clipboard.as_mut() {
            clipboard
                .set_text(text.to_string())
                .context("Failed to write clipboard")?;
        }

        Ok(())
    }
}
