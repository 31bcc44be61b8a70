//! Startup configuration: seed-directory fallbacks, bookmarks, and the
//! external editor used for the folder hand-off.
//!
//! The config lives at `~/.navtty/config.json` and is read once at startup.
//! A missing file yields the defaults; a malformed file is a startup error
//! so a typo never silently loses bookmarks.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;

/// File name of the JSON config under the navtty home directory.
pub const CONFIG_FILE: &str = "config.json";

/// Returns the navtty home directory (`~/.navtty`).
pub fn navtty_home() -> PathBuf {
    if let Some(home_dir) = dirs::home_dir() {
        return home_dir.join(".navtty");
    }

    PathBuf::from(".navtty")
}

/// One labeled bookmark jump target. The path may start with the
/// `${home}` placeholder.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub struct Bookmark {
    pub label: String,
    pub path: String,
}

/// Per-OS executable used to open a folder in another editor window.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub struct ExternalEditor {
    pub linux: String,
    pub macos: String,
    pub windows: String,
}

impl Default for ExternalEditor {
    fn default() -> Self {
        Self {
            linux: "code".to_string(),
            macos: "code".to_string(),
            windows: "code.cmd".to_string(),
        }
    }
}

impl ExternalEditor {
    /// Returns the executable configured for the current platform.
    pub fn command(&self) -> &str {
        if cfg!(target_os = "windows") {
            &self.windows
        } else if cfg!(target_os = "macos") {
            &self.macos
        } else {
            &self.linux
        }
    }
}

/// Parsed contents of `~/.navtty/config.json`.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Ordered bookmark list shown by the Bookmarks command.
    pub bookmarks: Vec<Bookmark>,
    /// Pipe-delimited seed-directory fallback list. Entries are literal
    /// paths or the sentinels `${cwd}` and `${home}`.
    pub default_folder: Option<String>,
    /// External editor used by the Open-folder command.
    pub external_editor: ExternalEditor,
}

impl Config {
    /// Loads the config from `path`.
    ///
    /// # Errors
    /// Returns an error when the file exists but cannot be read or parsed.
    /// A missing file is not an error and yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(error) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source: error,
                });
            }
        };

        serde_json::from_str(&raw).map_err(|error| ConfigError::Parse {
            path: path.to_path_buf(),
            source: error,
        })
    }

    /// Returns the bookmarks with `${home}` expanded, in config order.
    /// Existence filtering happens at jump time against the filesystem
    /// boundary.
    pub fn expanded_bookmarks(&self) -> Vec<(String, PathBuf)> {
        self.bookmarks
            .iter()
            .map(|bookmark| (bookmark.label.clone(), expand_home(&bookmark.path)))
            .collect()
    }
}

/// Expands the `${home}` placeholder at the start of `path`.
pub fn expand_home(path: &str) -> PathBuf {
    let Some(rest) = path.strip_prefix("${home}") else {
        return PathBuf::from(path);
    };

    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("/"));

    home.join(rest.trim_start_matches(['/', '\\']))
}

/// Picks the starting directory for a session.
///
/// The explicit CLI argument wins, then each `default_folder` fallback in
/// order (first one that is an existing directory), then the home
/// directory.
pub fn resolve_start_dir(cli_arg: Option<&str>, config: &Config, invocation_dir: &Path) -> PathBuf {
    if let Some(arg) = cli_arg {
        let candidate = expand_home(arg);
        if candidate.is_dir() {
            return candidate;
        }
    }

    for fallback in config.default_folder.as_deref().unwrap_or_default().split('|') {
        let fallback = fallback.trim();
        if fallback.is_empty() {
            continue;
        }

        let candidate = if fallback == "${cwd}" {
            invocation_dir.to_path_buf()
        } else {
            expand_home(fallback)
        };
        if candidate.is_dir() {
            return candidate;
        }
    }

    dirs::home_dir().unwrap_or_else(|| invocation_dir.to_path_buf())
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_load_returns_defaults_for_missing_file() {
        // Arrange
        let dir = tempdir().expect("failed to create temp dir");
        let path = dir.path().join(CONFIG_FILE);

        // Act
        let config = Config::load(&path).expect("load failed");

        // Assert
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_parses_bookmarks_and_fallbacks() {
        // Arrange
        let dir = tempdir().expect("failed to create temp dir");
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(
            &path,
            r#"{
                "default_folder": "${cwd}|${home}/src",
                "bookmarks": [
                    {"label": "Projects", "path": "${home}/projects"},
                    {"label": "Temp", "path": "/tmp"}
                ],
                "external_editor": {"linux": "codium"}
            }"#,
        )
        .expect("failed to write config");

        // Act
        let config = Config::load(&path).expect("load failed");

        // Assert
        assert_eq!(
            config.default_folder.as_deref(),
            Some("${cwd}|${home}/src")
        );
        assert_eq!(config.bookmarks.len(), 2);
        assert_eq!(config.external_editor.linux, "codium");
        assert_eq!(config.external_editor.macos, "code");
    }

    #[test]
    fn test_load_rejects_malformed_json() {
        // Arrange
        let dir = tempdir().expect("failed to create temp dir");
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "{not json").expect("failed to write config");

        // Act
        let result = Config::load(&path);

        // Assert
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_expand_home_keeps_literal_paths_untouched() {
        // Arrange & Act
        let expanded = expand_home("/var/data");

        // Assert
        assert_eq!(expanded, PathBuf::from("/var/data"));
    }

    #[test]
    fn test_expand_home_replaces_placeholder() {
        // Arrange
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("/"));

        // Act
        let expanded = expand_home("${home}/projects");

        // Assert
        assert_eq!(expanded, home.join("projects"));
    }

    #[test]
    fn test_resolve_start_dir_prefers_cli_argument() {
        // Arrange
        let dir = tempdir().expect("failed to create temp dir");
        let config = Config::default();
        let arg = dir.path().to_string_lossy().to_string();

        // Act
        let start = resolve_start_dir(Some(&arg), &config, Path::new("/nonexistent"));

        // Assert
        assert_eq!(start, dir.path());
    }

    #[test]
    fn test_resolve_start_dir_walks_fallback_list_in_order() {
        // Arrange
        let dir = tempdir().expect("failed to create temp dir");
        let existing = dir.path().join("real");
        std::fs::create_dir(&existing).expect("failed to create dir");
        let config = Config {
            default_folder: Some(format!(
                "/definitely/missing|{}",
                existing.to_string_lossy()
            )),
            ..Config::default()
        };

        // Act
        let start = resolve_start_dir(None, &config, Path::new("/nonexistent"));

        // Assert
        assert_eq!(start, existing);
    }

    #[test]
    fn test_resolve_start_dir_expands_cwd_sentinel() {
        // Arrange
        let dir = tempdir().expect("failed to create temp dir");
        let config = Config {
            default_folder: Some("${cwd}".to_string()),
            ..Config::default()
        };

        // Act
        let start = resolve_start_dir(None, &config, dir.path());

        // Assert
        assert_eq!(start, dir.path());
    }
}
