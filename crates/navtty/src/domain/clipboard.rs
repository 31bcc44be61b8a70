use super::entry::DirEntry;

/// How a clipboard entry will be applied on paste.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TransferMode {
    Copy,
    Cut,
}

impl TransferMode {
    /// Returns the lowercase word embedded in the dynamic Paste label.
    pub fn label_word(self) -> &'static str {
        match self {
            TransferMode::Copy => "copy",
            TransferMode::Cut => "cut",
        }
    }
}

/// One remembered copy/cut target awaiting paste.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClipboardItem {
    pub entry: DirEntry,
    pub mode: TransferMode,
}

/// Single-slot clipboard shared across the whole navigation session.
///
/// A later copy or cut overwrites the slot; paste consumes it. The slot
/// survives directory changes until consumed or overwritten.
#[derive(Default)]
pub struct Clipboard {
    slot: Option<ClipboardItem>,
}

impl Clipboard {
    /// Fills the slot, forgetting any previously remembered entry.
    pub fn set(&mut self, entry: DirEntry, mode: TransferMode) {
        self.slot = Some(ClipboardItem { entry, mode });
    }

    /// Returns the remembered item without consuming it.
    pub fn peek(&self) -> Option<&ClipboardItem> {
        self.slot.as_ref()
    }

    /// Consumes and returns the remembered item.
    pub fn take(&mut self) -> Option<ClipboardItem> {
        self.slot.take()
    }

    /// Returns whether the slot is empty.
    pub fn is_empty(&self) -> bool {
        self.slot.is_none()
    }
}
