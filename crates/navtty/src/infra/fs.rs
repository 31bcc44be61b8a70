//! Async filesystem boundary used by navigation and the operation
//! handlers.

use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};
use std::pin::Pin;

/// Boxed async result used by [`FileSystem`] trait methods.
pub type FsFuture<T> = Pin<Box<dyn Future<Output = T> + Send>>;

/// Stat result reduced to the two kinds the navigator lists. Anything
/// that is neither is dropped from listings.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PathKind {
    pub is_dir: bool,
    pub is_file: bool,
}

/// Filesystem operations behind the navigation core.
///
/// Production uses [`RealFileSystem`]; tests can inject `MockFileSystem`
/// to script failures without touching the disk.
#[cfg_attr(test, mockall::automock)]
pub trait FileSystem: Send + Sync {
    /// Stats `path`, following symlinks.
    ///
    /// # Errors
    /// Returns the underlying I/O error when the path does not exist or
    /// cannot be inspected.
    fn stat(&self, path: PathBuf) -> FsFuture<io::Result<PathKind>>;

    /// Lists the names inside directory `dir` in enumeration order.
    ///
    /// # Errors
    /// Returns the underlying I/O error when the directory cannot be read.
    fn list_names(&self, dir: PathBuf) -> FsFuture<io::Result<Vec<String>>>;

    /// Returns whether anything exists at `path`.
    fn exists(&self, path: PathBuf) -> FsFuture<bool>;

    /// Creates an empty file at `path`, failing if the path already
    /// exists.
    ///
    /// # Errors
    /// Returns the underlying I/O error, including `AlreadyExists`.
    fn create_file(&self, path: PathBuf) -> FsFuture<io::Result<()>>;

    /// Creates a directory at `path`.
    ///
    /// # Errors
    /// Returns the underlying I/O error.
    fn create_dir(&self, path: PathBuf) -> FsFuture<io::Result<()>>;

    /// Renames `from` to `to`.
    ///
    /// # Errors
    /// Returns the underlying I/O error.
    fn rename(&self, from: PathBuf, to: PathBuf) -> FsFuture<io::Result<()>>;

    /// Copies a file or a whole directory tree from `from` to `to`.
    ///
    /// # Errors
    /// Returns the first I/O error hit while walking the tree.
    fn copy_recursive(&self, from: PathBuf, to: PathBuf) -> FsFuture<io::Result<()>>;

    /// Moves `from` to `to`, degrading to copy + remove when the rename
    /// crosses filesystem boundaries.
    ///
    /// # Errors
    /// Returns the underlying I/O error.
    fn move_path(&self, from: PathBuf, to: PathBuf) -> FsFuture<io::Result<()>>;

    /// Removes a file, or a directory together with all of its contents.
    ///
    /// # Errors
    /// Returns the underlying I/O error.
    fn remove_recursive(&self, path: PathBuf) -> FsFuture<io::Result<()>>;
}

/// Tokio-backed [`FileSystem`] implementation. Directory-tree copies run
/// on the blocking pool so the terminal task is never starved.
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn stat(&self, path: PathBuf) -> FsFuture<io::Result<PathKind>> {
        Box::pin(async move {
            let metadata = tokio::fs::metadata(&path).await?;

            Ok(PathKind {
                is_dir: metadata.is_dir(),
                is_file: metadata.is_file(),
            })
        })
    }

    fn list_names(&self, dir: PathBuf) -> FsFuture<io::Result<Vec<String>>> {
        Box::pin(async move {
            let mut reader = tokio::fs::read_dir(&dir).await?;
            let mut names = Vec::new();
            while let Some(item) = reader.next_entry().await? {
                names.push(item.file_name().to_string_lossy().to_string());
            }

            Ok(names)
        })
    }

    fn exists(&self, path: PathBuf) -> FsFuture<bool> {
        Box::pin(async move { tokio::fs::try_exists(&path).await.unwrap_or(false) })
    }

    fn create_file(&self, path: PathBuf) -> FsFuture<io::Result<()>> {
        Box::pin(async move {
            tokio::fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
                .map(|_| ())
        })
    }

    fn create_dir(&self, path: PathBuf) -> FsFuture<io::Result<()>> {
        Box::pin(async move { tokio::fs::create_dir(&path).await })
    }

    fn rename(&self, from: PathBuf, to: PathBuf) -> FsFuture<io::Result<()>> {
        Box::pin(async move { tokio::fs::rename(&from, &to).await })
    }

    fn copy_recursive(&self, from: PathBuf, to: PathBuf) -> FsFuture<io::Result<()>> {
        Box::pin(async move {
            let metadata = tokio::fs::metadata(&from).await?;
            if metadata.is_dir() {
                tokio::task::spawn_blocking(move || copy_dir_tree(&from, &to))
                    .await
                    .map_err(io::Error::other)?
            } else {
                tokio::fs::copy(&from, &to).await.map(|_| ())
            }
        })
    }

    fn move_path(&self, from: PathBuf, to: PathBuf) -> FsFuture<io::Result<()>> {
        Box::pin(async move {
            let rename_error = match tokio::fs::rename(&from, &to).await {
                Ok(()) => return Ok(()),
                Err(error) => error,
            };
            if !is_cross_device(&rename_error) {
                return Err(rename_error);
            }

            let metadata = tokio::fs::metadata(&from).await?;
            if metadata.is_dir() {
                let copy_from = from.clone();
                tokio::task::spawn_blocking(move || copy_dir_tree(&copy_from, &to))
                    .await
                    .map_err(io::Error::other)??;

                tokio::fs::remove_dir_all(&from).await
            } else {
                tokio::fs::copy(&from, &to).await?;

                tokio::fs::remove_file(&from).await
            }
        })
    }

    fn remove_recursive(&self, path: PathBuf) -> FsFuture<io::Result<()>> {
        Box::pin(async move {
            let metadata = tokio::fs::metadata(&path).await?;
            if metadata.is_dir() {
                tokio::fs::remove_dir_all(&path).await
            } else {
                tokio::fs::remove_file(&path).await
            }
        })
    }
}

/// Returns whether `error` reports a rename across filesystem boundaries.
fn is_cross_device(error: &io::Error) -> bool {
    error.kind() == io::ErrorKind::CrossesDevices || error.raw_os_error() == Some(18)
}

/// Recursively copies the directory tree at `from` into `to`.
fn copy_dir_tree(from: &Path, to: &Path) -> io::Result<()> {
    std::fs::create_dir_all(to)?;
    for item in std::fs::read_dir(from)? {
        let item = item?;
        let target = to.join(item.file_name());
        if item.file_type()?.is_dir() {
            copy_dir_tree(&item.path(), &target)?;
        } else {
            std::fs::copy(item.path(), &target)?;
        }
    }

    Ok(())
}
