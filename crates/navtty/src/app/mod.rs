//! Navigation core: the directory cursor, the listing loop, and menu
//! composition.
//!
//! This module owns the only mutable session state (current directory,
//! listing snapshot, clipboard) and routes every menu selection either
//! into a directory change or to an operation handler in [`ops`].

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::Config;
use crate::domain::clipboard::Clipboard;
use crate::domain::command::{self, CommandId, MenuContext, MenuPosition};
use crate::domain::entry::{DirEntry, EntryKind};
use crate::infra::drives::DriveLister;
use crate::infra::fs::FileSystem;
use crate::infra::launcher::EditorLauncher;
use crate::infra::prompt::Prompt;

mod ops;

/// How the interactive session finished.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SessionEnd {
    /// The user dismissed a listing without selecting anything.
    Dismissed,
    /// The user selected a file; the caller opens it once the terminal is
    /// restored.
    OpenFile(PathBuf),
}

/// Next step after one listing round or one operation handler.
enum Flow {
    /// Show the stored current directory again.
    Stay,
    /// Move the cursor into the given directory and list it.
    Enter(PathBuf),
    /// Finish the session.
    End(SessionEnd),
}

/// One row of the composed menu: a fresh label plus the tagged item it
/// stands for. Dispatch matches on the tag, never on the label text.
struct MenuRow {
    item: MenuItem,
    label: String,
}

#[derive(Clone, Copy)]
enum MenuItem {
    Command(CommandId),
    Entry(usize),
}

/// Collaborators injected into a [`Navigator`].
pub struct NavigatorServices {
    pub drives: Arc<dyn DriveLister>,
    pub fs: Arc<dyn FileSystem>,
    pub launcher: Arc<dyn EditorLauncher>,
    pub prompt: Arc<dyn Prompt>,
}

/// Interactive directory navigator: one modal menu loop over one mutable
/// current-directory cursor and one clipboard slot.
pub struct Navigator {
    clipboard: Clipboard,
    config: Config,
    cwd: Option<PathBuf>,
    entries: Vec<DirEntry>,
    multiple_drives: bool,
    services: NavigatorServices,
}

impl Navigator {
    /// Creates a navigator with an uninitialized directory cursor.
    pub fn new(config: Config, multiple_drives: bool, services: NavigatorServices) -> Self {
        Self {
            clipboard: Clipboard::default(),
            config,
            cwd: None,
            entries: Vec::new(),
            multiple_drives,
            services,
        }
    }

    /// Runs the navigation loop starting at `start` until the user
    /// dismisses a listing or selects a file.
    ///
    /// Every failure inside the loop is converted into a user-visible
    /// message followed by a refreshed listing or a clean session end;
    /// nothing escapes as an error.
    pub async fn run(&mut self, start: PathBuf) -> SessionEnd {
        let mut target = Some(start);

        loop {
            match self.show_listing(target.take()).await {
                Flow::Stay => {}
                Flow::Enter(dir) => target = Some(dir),
                Flow::End(end) => return end,
            }
        }
    }

    /// Lists one directory and resolves one selection.
    async fn show_listing(&mut self, target: Option<PathBuf>) -> Flow {
        let Some(dir) = target.or_else(|| self.cwd.clone()) else {
            return Flow::End(SessionEnd::Dismissed);
        };

        if let Err(message) = self.validate_directory(&dir).await {
            self.services.prompt.show_error(message).await;

            return Flow::End(SessionEnd::Dismissed);
        }

        // Commit point: the cursor moves only after validation.
        self.cwd = Some(dir.clone());
        self.entries = match self.read_entries(&dir).await {
            Ok(entries) => entries,
            Err(error) => {
                self.services
                    .prompt
                    .show_error(format!("Cannot read {}: {error}", dir.display()))
                    .await;

                return Flow::End(SessionEnd::Dismissed);
            }
        };
        tracing::debug!("listed {} ({} entries)", dir.display(), self.entries.len());

        let rows = self.compose_menu();
        let labels: Vec<String> = rows.iter().map(|row| row.label.clone()).collect();
        let Some(choice) = self
            .services
            .prompt
            .pick_one(labels, dir.display().to_string())
            .await
        else {
            return Flow::End(SessionEnd::Dismissed);
        };

        match resolve_selection(&rows, &choice) {
            Some(MenuItem::Command(id)) => self.dispatch(id).await,
            Some(MenuItem::Entry(index)) => self.enter_entry(index),
            None => Flow::Stay,
        }
    }

    /// Validates that `dir` exists and is a directory.
    async fn validate_directory(&self, dir: &Path) -> Result<(), String> {
        match self.services.fs.stat(dir.to_path_buf()).await {
            Ok(kind) if kind.is_dir => Ok(()),
            Ok(_) => Err(format!("{} is not a directory", dir.display())),
            Err(error) => Err(format!("Cannot open {}: {error}", dir.display())),
        }
    }

    /// Reads and classifies the contents of `dir` in enumeration order,
    /// dropping anything that fails to stat or is neither a file nor a
    /// directory.
    async fn read_entries(&self, dir: &Path) -> std::io::Result<Vec<DirEntry>> {
        let names = self.services.fs.list_names(dir.to_path_buf()).await?;

        let mut entries = Vec::new();
        for name in names {
            let path = dir.join(&name);
            let Ok(stat) = self.services.fs.stat(path.clone()).await else {
                continue;
            };
            let kind = if stat.is_dir {
                EntryKind::Directory
            } else if stat.is_file {
                EntryKind::File
            } else {
                continue;
            };

            entries.push(DirEntry { kind, name, path });
        }

        Ok(entries)
    }

    /// Composes the menu: Top commands, then entries, then visible Bottom
    /// commands. Labels are rendered fresh on every call so dynamic
    /// labels can never go stale.
    fn compose_menu(&self) -> Vec<MenuRow> {
        let ctx = self.menu_context();
        let mut rows = Vec::new();
        for id in command::visible_commands(MenuPosition::Top, &ctx) {
            rows.push(MenuRow {
                item: MenuItem::Command(id),
                label: command::command_label(id, &ctx),
            });
        }
        for (index, entry) in self.entries.iter().enumerate() {
            rows.push(MenuRow {
                item: MenuItem::Entry(index),
                label: entry.name.clone(),
            });
        }
        for id in command::visible_commands(MenuPosition::Bottom, &ctx) {
            rows.push(MenuRow {
                item: MenuItem::Command(id),
                label: command::command_label(id, &ctx),
            });
        }

        rows
    }

    fn menu_context(&self) -> MenuContext<'_> {
        MenuContext {
            clipboard: self.clipboard.peek(),
            multiple_drives: self.multiple_drives,
        }
    }

    /// Enters a directory entry, or finishes the session on a file entry.
    fn enter_entry(&self, index: usize) -> Flow {
        let Some(entry) = self.entries.get(index) else {
            return Flow::Stay;
        };

        if entry.is_dir() {
            Flow::Enter(entry.path.clone())
        } else {
            Flow::End(SessionEnd::OpenFile(entry.path.clone()))
        }
    }
}

/// Maps the picked label back to its menu row, trying command rows before
/// entry rows so an entry can never shadow a command with the same text.
fn resolve_selection(rows: &[MenuRow], choice: &str) -> Option<MenuItem> {
    rows.iter()
        .filter(|row| matches!(row.item, MenuItem::Command(_)))
        .chain(rows.iter().filter(|row| matches!(row.item, MenuItem::Entry(_))))
        .find(|row| row.label == choice)
        .map(|row| row.item)
}
