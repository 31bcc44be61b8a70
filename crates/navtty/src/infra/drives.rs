//! Drive-root discovery for the Change-drive command.

use std::future::Future;
use std::io;
use std::path::PathBuf;
use std::pin::Pin;

/// Boxed async result used by [`DriveLister`] trait methods.
pub type DriveFuture<T> = Pin<Box<dyn Future<Output = T> + Send>>;

/// One selectable drive root.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Drive {
    /// Human hint shown next to the name.
    pub description: String,
    /// Short display name (`C:` or a volume name).
    pub name: String,
    /// Directory the navigator jumps to when the drive is picked.
    pub root: PathBuf,
}

/// Drive discovery boundary.
#[cfg_attr(test, mockall::automock)]
pub trait DriveLister: Send + Sync {
    /// Lists the drive roots available on this machine.
    ///
    /// # Errors
    /// Returns an error when probing cannot run at all; an empty result is
    /// not an error.
    fn list_drives(&self) -> DriveFuture<io::Result<Vec<Drive>>>;
}

/// Platform-probing [`DriveLister`] implementation.
///
/// Windows probes letter roots; Unix reports `/` plus volumes found under
/// the conventional mount directories.
pub struct RealDriveLister;

impl DriveLister for RealDriveLister {
    fn list_drives(&self) -> DriveFuture<io::Result<Vec<Drive>>> {
        Box::pin(async move {
            tokio::task::spawn_blocking(probe_drives)
                .await
                .map_err(io::Error::other)
        })
    }
}

#[cfg(windows)]
fn probe_drives() -> Vec<Drive> {
    ('A'..='Z')
        .filter_map(|letter| {
            let root = PathBuf::from(format!("{letter}:\\"));
            root.is_dir().then(|| Drive {
                description: format!("Drive {letter}:"),
                name: format!("{letter}:"),
                root,
            })
        })
        .collect()
}

#[cfg(not(windows))]
fn probe_drives() -> Vec<Drive> {
    use std::path::Path;

    let mut drives = vec![Drive {
        description: "Filesystem root".to_string(),
        name: "/".to_string(),
        root: PathBuf::from("/"),
    }];

    // Volumes mount directly under these.
    for base in ["/mnt", "/Volumes"] {
        collect_volumes(Path::new(base), &mut drives);
    }
    // These hold one per-user level above the volumes.
    for base in ["/media", "/run/media"] {
        let Ok(reader) = std::fs::read_dir(base) else {
            continue;
        };
        for user_dir in reader.flatten() {
            collect_volumes(&user_dir.path(), &mut drives);
        }
    }

    drives
}

/// Appends every directory directly under `base` as a drive.
#[cfg(not(windows))]
fn collect_volumes(base: &std::path::Path, drives: &mut Vec<Drive>) {
    let Ok(reader) = std::fs::read_dir(base) else {
        return;
    };

    for item in reader.flatten() {
        let root = item.path();
        if !root.is_dir() {
            continue;
        }

        drives.push(Drive {
            description: format!("Mounted at {}", root.display()),
            name: item.file_name().to_string_lossy().to_string(),
            root,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[cfg(not(windows))]
    async fn test_list_drives_reports_the_filesystem_root_first() {
        // Arrange & Act
        let drives = RealDriveLister
            .list_drives()
            .await
            .expect("probing failed");

        // Assert
        assert!(!drives.is_empty());
        assert_eq!(drives[0].root, PathBuf::from("/"));
        assert_eq!(drives[0].name, "/");
    }
}
