//! The static command table: identifiers, menu placement, visibility, and
//! label rendering.
//!
//! Dispatch works on [`CommandId`] tags, never on display text, so dynamic
//! labels (Paste embeds the remembered entry's name) stay a pure
//! presentation concern.

use super::clipboard::ClipboardItem;

/// Identity of a menu command, independent of its display label.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CommandId {
    Up,
    NewFile,
    NewFolder,
    Rename,
    Duplicate,
    Delete,
    Copy,
    Cut,
    Paste,
    ChangeDrive,
    OpenFolder,
    Bookmarks,
}

/// Where a command row appears relative to the directory entries.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MenuPosition {
    Top,
    Bottom,
}

/// Read-only snapshot consulted by visibility predicates and label
/// rendering. Built fresh for every menu composition.
pub struct MenuContext<'a> {
    /// Clipboard slot content, if any.
    pub clipboard: Option<&'a ClipboardItem>,
    /// Whether more than one drive root exists on this machine.
    pub multiple_drives: bool,
}

/// Declares one command row: identity, placement, and visibility.
struct CommandDescriptor {
    id: CommandId,
    position: MenuPosition,
    visible: fn(&MenuContext<'_>) -> bool,
}

fn always(_: &MenuContext<'_>) -> bool {
    true
}

fn clipboard_occupied(ctx: &MenuContext<'_>) -> bool {
    ctx.clipboard.is_some()
}

fn multiple_drives(ctx: &MenuContext<'_>) -> bool {
    ctx.multiple_drives
}

/// The command table in declaration (display) order.
const COMMANDS: &[CommandDescriptor] = &[
    CommandDescriptor {
        id: CommandId::Up,
        position: MenuPosition::Top,
        visible: always,
    },
    CommandDescriptor {
        id: CommandId::NewFile,
        position: MenuPosition::Bottom,
        visible: always,
    },
    CommandDescriptor {
        id: CommandId::NewFolder,
        position: MenuPosition::Bottom,
        visible: always,
    },
    CommandDescriptor {
        id: CommandId::Rename,
        position: MenuPosition::Bottom,
        visible: always,
    },
    CommandDescriptor {
        id: CommandId::Duplicate,
        position: MenuPosition::Bottom,
        visible: always,
    },
    CommandDescriptor {
        id: CommandId::Delete,
        position: MenuPosition::Bottom,
        visible: always,
    },
    CommandDescriptor {
        id: CommandId::Copy,
        position: MenuPosition::Bottom,
        visible: always,
    },
    CommandDescriptor {
        id: CommandId::Cut,
        position: MenuPosition::Bottom,
        visible: always,
    },
    CommandDescriptor {
        id: CommandId::Paste,
        position: MenuPosition::Bottom,
        visible: clipboard_occupied,
    },
    CommandDescriptor {
        id: CommandId::ChangeDrive,
        position: MenuPosition::Bottom,
        visible: multiple_drives,
    },
    CommandDescriptor {
        id: CommandId::OpenFolder,
        position: MenuPosition::Bottom,
        visible: always,
    },
    CommandDescriptor {
        id: CommandId::Bookmarks,
        position: MenuPosition::Bottom,
        visible: always,
    },
];

/// Returns the identifiers of all visible commands for `position`, in
/// table order.
pub fn visible_commands(position: MenuPosition, ctx: &MenuContext<'_>) -> Vec<CommandId> {
    COMMANDS
        .iter()
        .filter(|descriptor| descriptor.position == position && (descriptor.visible)(ctx))
        .map(|descriptor| descriptor.id)
        .collect()
}

/// Renders the display label for `id` under `ctx`.
///
/// Labels are derived fresh for every composition so the dynamic Paste
/// label can never go stale across refreshes. The `> ` prefix keeps
/// command rows distinguishable from entry names.
pub fn command_label(id: CommandId, ctx: &MenuContext<'_>) -> String {
    match id {
        CommandId::Up => "..".to_string(),
        CommandId::NewFile => "> New file".to_string(),
        CommandId::NewFolder => "> New folder".to_string(),
        CommandId::Rename => "> Rename".to_string(),
        CommandId::Duplicate => "> Duplicate".to_string(),
        CommandId::Delete => "> Delete".to_string(),
        CommandId::Copy => "> Copy".to_string(),
        CommandId::Cut => "> Cut".to_string(),
        CommandId::Paste => paste_label(ctx),
        CommandId::ChangeDrive => "> Change drive".to_string(),
        CommandId::OpenFolder => "> Open folder".to_string(),
        CommandId::Bookmarks => "> Bookmarks".to_string(),
    }
}

/// Builds the Paste label, embedding the remembered entry's name and
/// transfer mode.
fn paste_label(ctx: &MenuContext<'_>) -> String {
    match ctx.clipboard {
        Some(item) => format!("> Paste ({}: {})", item.mode.label_word(), item.entry.name),
        None => "> Paste".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::domain::clipboard::TransferMode;
    use crate::domain::entry::{DirEntry, EntryKind};

    fn clipboard_item(name: &str, mode: TransferMode) -> ClipboardItem {
        ClipboardItem {
            entry: DirEntry {
                kind: EntryKind::File,
                name: name.to_string(),
                path: PathBuf::from("/proj").join(name),
            },
            mode,
        }
    }

    #[test]
    fn test_visible_commands_hide_paste_while_clipboard_is_empty() {
        // Arrange
        let ctx = MenuContext {
            clipboard: None,
            multiple_drives: false,
        };

        // Act
        let bottom = visible_commands(MenuPosition::Bottom, &ctx);

        // Assert
        assert!(!bottom.contains(&CommandId::Paste));
    }

    #[test]
    fn test_visible_commands_offer_paste_while_clipboard_is_occupied() {
        // Arrange
        let item = clipboard_item("x", TransferMode::Copy);
        let ctx = MenuContext {
            clipboard: Some(&item),
            multiple_drives: false,
        };

        // Act
        let bottom = visible_commands(MenuPosition::Bottom, &ctx);

        // Assert
        assert!(bottom.contains(&CommandId::Paste));
    }

    #[test]
    fn test_visible_commands_preserve_table_order() {
        // Arrange
        let ctx = MenuContext {
            clipboard: None,
            multiple_drives: true,
        };

        // Act
        let bottom = visible_commands(MenuPosition::Bottom, &ctx);

        // Assert
        assert_eq!(
            bottom,
            vec![
                CommandId::NewFile,
                CommandId::NewFolder,
                CommandId::Rename,
                CommandId::Duplicate,
                CommandId::Delete,
                CommandId::Copy,
                CommandId::Cut,
                CommandId::ChangeDrive,
                CommandId::OpenFolder,
                CommandId::Bookmarks,
            ]
        );
    }

    #[test]
    fn test_visible_commands_hide_change_drive_on_single_root_machines() {
        // Arrange
        let ctx = MenuContext {
            clipboard: None,
            multiple_drives: false,
        };

        // Act
        let bottom = visible_commands(MenuPosition::Bottom, &ctx);

        // Assert
        assert!(!bottom.contains(&CommandId::ChangeDrive));
    }

    #[test]
    fn test_command_label_embeds_cut_entry_name_in_paste() {
        // Arrange
        let item = clipboard_item("notes.md", TransferMode::Cut);
        let ctx = MenuContext {
            clipboard: Some(&item),
            multiple_drives: false,
        };

        // Act
        let label = command_label(CommandId::Paste, &ctx);

        // Assert
        assert_eq!(label, "> Paste (cut: notes.md)");
    }

    #[test]
    fn test_command_label_places_up_entry_without_prefix() {
        // Arrange
        let ctx = MenuContext {
            clipboard: None,
            multiple_drives: false,
        };

        // Act & Assert
        assert_eq!(command_label(CommandId::Up, &ctx), "..");
        assert_eq!(
            visible_commands(MenuPosition::Top, &ctx),
            vec![CommandId::Up]
        );
    }
}
