//! Operation handlers dispatched from the navigation menu.
//!
//! Every handler starts from the snapshot produced by the last listing and
//! finishes by handing control back to the loop: `Flow::Stay` re-lists the
//! current directory, `Flow::Enter` moves the cursor. Any prompt dismissal
//! aborts the operation without touching the filesystem.

use std::path::{Path, PathBuf};

use crate::config::{CONFIG_FILE, navtty_home};
use crate::domain::clipboard::TransferMode;
use crate::domain::command::CommandId;
use crate::domain::entry::DirEntry;
use crate::infra::drives::DriveLister;
use crate::infra::fs::FileSystem;
use crate::infra::launcher::{EditorLauncher, WindowMode};
use crate::infra::prompt::{Confirmation, Prompt};

use super::{Flow, Navigator, SessionEnd};

/// Characters that cannot appear in a filesystem name on any supported
/// platform.
const ILLEGAL_NAME_CHARS: &[char] = &['/', '?', '*', ':', '"', '<', '>', '|', '\\'];

const OPEN_HERE_LABEL: &str = "Open in this window";
const OPEN_NEW_LABEL: &str = "Open in a new window";

impl Navigator {
    /// Routes one selected command to its handler.
    pub(super) async fn dispatch(&mut self, id: CommandId) -> Flow {
        match id {
            CommandId::Up => self.go_up(),
            CommandId::NewFile => self.new_file().await,
            CommandId::NewFolder => self.new_folder().await,
            CommandId::Rename => self.rename().await,
            CommandId::Duplicate => self.duplicate().await,
            CommandId::Delete => self.delete().await,
            CommandId::Copy => self.fill_clipboard(TransferMode::Copy).await,
            CommandId::Cut => self.fill_clipboard(TransferMode::Cut).await,
            CommandId::Paste => self.paste().await,
            CommandId::ChangeDrive => self.change_drive().await,
            CommandId::OpenFolder => self.open_folder().await,
            CommandId::Bookmarks => self.jump_to_bookmark().await,
        }
    }

    /// Moves the cursor to the parent directory; the root stays put.
    pub(super) fn go_up(&self) -> Flow {
        let cwd = self.current_dir();
        match cwd.parent() {
            Some(parent) => Flow::Enter(parent.to_path_buf()),
            None => Flow::Enter(cwd),
        }
    }

    /// Creates an empty file named by the user in the current directory.
    async fn new_file(&mut self) -> Flow {
        let base = self.current_dir();
        let Some(path) = self.prompt_new_path("Enter your new file name", &base).await else {
            return Flow::Stay;
        };

        if let Err(error) = self.services.fs.create_file(path.clone()).await {
            self.report(format!("Failed to create {}: {error}", path.display()))
                .await;
        }

        Flow::Stay
    }

    /// Creates a directory named by the user in the current directory.
    async fn new_folder(&mut self) -> Flow {
        let base = self.current_dir();
        let Some(path) = self
            .prompt_new_path("Enter your new folder name", &base)
            .await
        else {
            return Flow::Stay;
        };

        if let Err(error) = self.services.fs.create_dir(path.clone()).await {
            self.report(format!("Failed to create {}: {error}", path.display()))
                .await;
        }

        Flow::Stay
    }

    /// Renames one picked entry to a new, non-colliding name.
    async fn rename(&mut self) -> Flow {
        let Some(entry) = self.pick_entry("Pick the entry to rename").await else {
            return Flow::Stay;
        };
        let base = self.current_dir();
        let Some(new_path) = self.prompt_new_path("Enter a new name", &base).await else {
            return Flow::Stay;
        };

        if let Err(error) = self
            .services
            .fs
            .rename(entry.path.clone(), new_path)
            .await
        {
            self.report(format!("Failed to rename {}: {error}", entry.name))
                .await;
        }

        Flow::Stay
    }

    /// Copies one picked entry to a new name in the current directory.
    async fn duplicate(&mut self) -> Flow {
        let Some(entry) = self.pick_entry("Pick the entry to duplicate").await else {
            return Flow::Stay;
        };
        let base = self.current_dir();
        let Some(new_path) = self
            .prompt_new_path("Enter a name for the duplicate", &base)
            .await
        else {
            return Flow::Stay;
        };

        if let Err(error) = self
            .services
            .fs
            .copy_recursive(entry.path.clone(), new_path)
            .await
        {
            self.report(format!("Failed to duplicate {}: {error}", entry.name))
                .await;
        }

        Flow::Stay
    }

    /// Deletes one picked entry after a mandatory confirmation.
    async fn delete(&mut self) -> Flow {
        let Some(entry) = self.pick_entry("Pick the entry to delete").await else {
            return Flow::Stay;
        };

        let noun = if entry.is_dir() { "folder" } else { "file" };
        let question = format!("Are you sure you want to delete the \"{}\" {noun}?", entry.name);
        if self.services.prompt.pick_yes_no(question).await != Some(Confirmation::Yes) {
            // Declining is a normal path, not an error.
            return Flow::Stay;
        }

        if let Err(error) = self.services.fs.remove_recursive(entry.path.clone()).await {
            self.report(format!("Failed to delete {}: {error}", entry.name))
                .await;
        }

        Flow::Stay
    }

    /// Remembers one picked entry for a later paste.
    async fn fill_clipboard(&mut self, mode: TransferMode) -> Flow {
        let placeholder = format!("Pick the entry to {}", mode.label_word());
        let Some(entry) = self.pick_entry(&placeholder).await else {
            return Flow::Stay;
        };

        self.clipboard.set(entry, mode);

        Flow::Stay
    }

    /// Pastes the clipboard entry into the current directory.
    ///
    /// A colliding target goes through the shared retry loop. The slot is
    /// consumed the moment a filesystem operation is attempted, success
    /// or not; cancelling before that point keeps it.
    async fn paste(&mut self) -> Flow {
        let Some(item) = self.clipboard.peek().cloned() else {
            return Flow::Stay;
        };

        let base = self.current_dir();
        let mut target = base.join(&item.entry.name);
        if self.services.fs.exists(target.clone()).await {
            let message = format!(
                "\"{}\" already exists, enter another name",
                item.entry.name
            );
            let Some(fresh) = self.prompt_new_path(&message, &base).await else {
                return Flow::Stay;
            };
            target = fresh;
        }

        let Some(item) = self.clipboard.take() else {
            return Flow::Stay;
        };
        let outcome = match item.mode {
            TransferMode::Copy => {
                self.services
                    .fs
                    .copy_recursive(item.entry.path.clone(), target)
                    .await
            }
            TransferMode::Cut => {
                self.services
                    .fs
                    .move_path(item.entry.path.clone(), target)
                    .await
            }
        };
        if let Err(error) = outcome {
            self.report(format!("Failed to paste {}: {error}", item.entry.name))
                .await;
        }

        Flow::Stay
    }

    /// Switches the cursor to another drive root.
    async fn change_drive(&mut self) -> Flow {
        let drives = match self.services.drives.list_drives().await {
            Ok(drives) => drives,
            Err(error) => {
                self.report(format!("Failed to enumerate drives: {error}"))
                    .await;

                return Flow::End(SessionEnd::Dismissed);
            }
        };

        let labels: Vec<String> = drives
            .iter()
            .map(|drive| format!("{} ({})", drive.name, drive.description))
            .collect();
        let Some(choice) = self
            .services
            .prompt
            .pick_one(labels.clone(), "Pick a drive".to_string())
            .await
        else {
            return Flow::Stay;
        };
        let picked = labels
            .iter()
            .position(|label| *label == choice)
            .and_then(|index| drives.get(index));
        let Some(drive) = picked else {
            return Flow::Stay;
        };

        Flow::Enter(drive.root.clone())
    }

    /// Hands the current directory to the external editor.
    async fn open_folder(&mut self) -> Flow {
        let options = vec![OPEN_HERE_LABEL.to_string(), OPEN_NEW_LABEL.to_string()];
        let Some(choice) = self
            .services
            .prompt
            .pick_one(options, "Where should the folder open?".to_string())
            .await
        else {
            return Flow::Stay;
        };

        let window = if choice == OPEN_NEW_LABEL {
            WindowMode::NewWindow
        } else {
            WindowMode::ReuseWindow
        };
        if let Err(error) = self
            .services
            .launcher
            .open_folder(self.current_dir(), window)
            .await
        {
            self.report(format!(
                "Failed to launch the external editor: {error}. Check external_editor in {}",
                navtty_home().join(CONFIG_FILE).display()
            ))
            .await;
        }

        Flow::Stay
    }

    /// Jumps to one of the configured bookmarks that still exists.
    async fn jump_to_bookmark(&mut self) -> Flow {
        let mut bookmarks = Vec::new();
        for (label, path) in self.config.expanded_bookmarks() {
            if self.services.fs.exists(path.clone()).await {
                bookmarks.push((label, path));
            }
        }

        let labels: Vec<String> = bookmarks.iter().map(|(label, _)| label.clone()).collect();
        let Some(choice) = self
            .services
            .prompt
            .pick_one(labels, "Pick a bookmark".to_string())
            .await
        else {
            return Flow::Stay;
        };

        match bookmarks.into_iter().find(|(label, _)| *label == choice) {
            Some((_, path)) => Flow::Enter(path),
            None => Flow::Stay,
        }
    }

    /// Asks for a new, non-colliding name under `base` and returns the
    /// joined path.
    ///
    /// Illegal filename characters are stripped from the input; a name
    /// that still collides re-prompts with an "already exists" message
    /// until the user cancels or the candidate is unique. `None` means
    /// the whole operation is abandoned.
    async fn prompt_new_path(&self, placeholder: &str, base: &Path) -> Option<PathBuf> {
        let mut message = placeholder.to_string();

        loop {
            let input = self.services.prompt.prompt_text(message).await?;
            let name = sanitize_name(&input);
            if name.is_empty() {
                return None;
            }

            let candidate = base.join(&name);
            if !self.services.fs.exists(candidate.clone()).await {
                return Some(candidate);
            }

            message = format!("\"{name}\" already exists, enter another name");
        }
    }

    /// Asks the user to pick one entry from the current listing.
    async fn pick_entry(&self, placeholder: &str) -> Option<DirEntry> {
        let labels: Vec<String> = self
            .entries
            .iter()
            .map(|entry| entry.name.clone())
            .collect();
        let choice = self
            .services
            .prompt
            .pick_one(labels, placeholder.to_string())
            .await?;

        self.entries
            .iter()
            .find(|entry| entry.name == choice)
            .cloned()
    }

    /// Returns the committed current directory.
    ///
    /// Handlers only run after a successful refresh, so the cursor is set
    /// here; an unset cursor falls back to the filesystem root.
    fn current_dir(&self) -> PathBuf {
        self.cwd.clone().unwrap_or_else(|| PathBuf::from("/"))
    }

    /// Reports a failure through the prompt's error channel.
    async fn report(&self, message: String) {
        tracing::warn!("{message}");
        self.services.prompt.show_error(message).await;
    }
}

/// Strips illegal filename characters; an empty result means "treat the
/// input as cancelled".
fn sanitize_name(input: &str) -> String {
    input
        .chars()
        .filter(|ch| !ILLEGAL_NAME_CHARS.contains(ch))
        .collect::<String>()
        .trim()
        .to_string()
}
