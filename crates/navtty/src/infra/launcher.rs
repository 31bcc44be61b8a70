//! External editor hand-off: detached folder windows and attached file
//! editing.

use std::future::Future;
use std::io;
use std::path::PathBuf;
use std::pin::Pin;
use std::process::Stdio;

/// Boxed async result used by [`EditorLauncher`] trait methods.
pub type LaunchFuture<T> = Pin<Box<dyn Future<Output = T> + Send>>;

/// Window placement for the external-editor folder hand-off.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum WindowMode {
    NewWindow,
    ReuseWindow,
}

impl WindowMode {
    /// Returns the CLI flag understood by VS Code-compatible editors.
    pub fn flag(self) -> &'static str {
        match self {
            WindowMode::NewWindow => "--new-window",
            WindowMode::ReuseWindow => "--reuse-window",
        }
    }
}

/// Process-launching boundary for editor hand-offs.
#[cfg_attr(test, mockall::automock)]
pub trait EditorLauncher: Send + Sync {
    /// Spawns the configured external editor on `folder`, detached from
    /// the terminal.
    ///
    /// # Errors
    /// Returns the spawn error, typically a missing or misconfigured
    /// executable.
    fn open_folder(&self, folder: PathBuf, window: WindowMode) -> LaunchFuture<io::Result<()>>;

    /// Opens `path` in a terminal editor attached to the current
    /// terminal, blocking until the editor exits. Must only be called
    /// after the TUI has released the terminal.
    ///
    /// # Errors
    /// Returns an error when the editor cannot be spawned or exits with a
    /// failure status.
    fn open_file(&self, path: PathBuf) -> io::Result<()>;
}

/// Process-spawning [`EditorLauncher`] implementation.
pub struct RealEditorLauncher {
    editor_command: String,
}

impl RealEditorLauncher {
    /// Creates a launcher that hands folders to `editor_command`.
    pub fn new(editor_command: String) -> Self {
        Self { editor_command }
    }
}

impl EditorLauncher for RealEditorLauncher {
    fn open_folder(&self, folder: PathBuf, window: WindowMode) -> LaunchFuture<io::Result<()>> {
        let command = self.editor_command.clone();

        Box::pin(async move {
            tracing::info!("launching {command} {} {}", window.flag(), folder.display());

            tokio::process::Command::new(&command)
                .arg(window.flag())
                .arg(&folder)
                .stdin(Stdio::null())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .spawn()
                .map(|_| ())
        })
    }

    fn open_file(&self, path: PathBuf) -> io::Result<()> {
        let editor = terminal_editor();
        let status = std::process::Command::new(&editor).arg(&path).status()?;
        if !status.success() {
            return Err(io::Error::other(format!("{editor} exited with {status}")));
        }

        Ok(())
    }
}

/// Returns the terminal editor used for opening files: `$VISUAL`, then
/// `$EDITOR`, then a platform default.
fn terminal_editor() -> String {
    std::env::var("VISUAL")
        .or_else(|_| std::env::var("EDITOR"))
        .unwrap_or_else(|_| default_editor().to_string())
}

fn default_editor() -> &'static str {
    if cfg!(windows) { "notepad" } else { "vi" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_mode_maps_to_editor_flags() {
        // Arrange & Act & Assert
        assert_eq!(WindowMode::NewWindow.flag(), "--new-window");
        assert_eq!(WindowMode::ReuseWindow.flag(), "--reuse-window");
    }

    #[tokio::test]
    async fn test_open_folder_reports_missing_executables() {
        // Arrange
        let launcher = RealEditorLauncher::new("navtty-no-such-editor".to_string());

        // Act
        let result = launcher
            .open_folder(PathBuf::from("/"), WindowMode::NewWindow)
            .await;

        // Assert
        assert!(result.is_err());
    }
}
