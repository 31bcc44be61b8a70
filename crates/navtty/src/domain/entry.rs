use std::path::PathBuf;

/// Classification of a listed filesystem entry.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EntryKind {
    Directory,
    File,
}

/// A single file or directory row in the navigation menu.
///
/// Entries are produced fresh on every directory refresh and never mutated;
/// anything whose type cannot be determined at listing time is excluded
/// before a `DirEntry` is built.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DirEntry {
    /// Entry kind as classified at listing time.
    pub kind: EntryKind,
    /// Bare name shown as the menu label.
    pub name: String,
    /// Absolute path of the entry.
    pub path: PathBuf,
}

impl DirEntry {
    /// Returns whether the entry is a directory.
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}
