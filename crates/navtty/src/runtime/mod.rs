//! Terminal session runtime: owns terminal setup/teardown and wires the
//! TUI prompt service to the navigator.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc;

use crate::app::{Navigator, NavigatorServices, SessionEnd};
use crate::config::Config;
use crate::infra::drives::{DriveLister, RealDriveLister};
use crate::infra::fs::RealFileSystem;
use crate::infra::launcher::RealEditorLauncher;

mod confirm;
mod event;
mod input;
mod picker;
mod terminal;
mod tui_prompt;

pub(crate) type TuiTerminal = Terminal<CrosstermBackend<io::Stdout>>;

/// Runs one interactive navigation session in the terminal.
///
/// Drive probing happens before the terminal is taken over so the menu
/// knows whether to offer the Change-drive command at all.
///
/// # Errors
/// Returns an error if terminal setup fails; every failure after that is
/// converted into a user-visible message by the navigator.
pub async fn run(config: Config, start_dir: PathBuf) -> io::Result<SessionEnd> {
    let drives: Arc<dyn DriveLister> = Arc::new(RealDriveLister);
    let multiple_drives = match drives.list_drives().await {
        Ok(found) => found.len() > 1,
        Err(_) => false,
    };

    let _terminal_guard = terminal::TerminalGuard;
    let tui = terminal::setup_terminal()?;

    let (event_tx, event_rx) = mpsc::unbounded_channel();
    event::spawn_event_reader(event_tx);

    let editor_command = config.external_editor.command().to_string();
    let services = NavigatorServices {
        drives,
        fs: Arc::new(RealFileSystem),
        launcher: Arc::new(RealEditorLauncher::new(editor_command)),
        prompt: Arc::new(tui_prompt::TuiPrompt::new(tui, event_rx)),
    };
    let mut navigator = Navigator::new(config, multiple_drives, services);

    Ok(navigator.run(start_dir).await)
}
