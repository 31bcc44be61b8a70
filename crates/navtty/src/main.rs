use std::io;
use std::path::{Path, PathBuf};

use navtty::app::SessionEnd;
use navtty::config::{self, Config};
use navtty::infra::launcher::{EditorLauncher, RealEditorLauncher};

#[tokio::main]
async fn main() -> io::Result<()> {
    let home = config::navtty_home();
    init_logging(&home);

    let config_path = home.join(config::CONFIG_FILE);
    let config = Config::load(&config_path).map_err(io::Error::other)?;

    let invocation_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("/"));
    let cli_dir = std::env::args().nth(1);
    let start_dir = config::resolve_start_dir(cli_dir.as_deref(), &config, &invocation_dir);

    let editor_command = config.external_editor.command().to_string();
    let end = navtty::runtime::run(config, start_dir).await?;

    // The terminal is restored by now; an attached editor can take over.
    if let SessionEnd::OpenFile(path) = end {
        RealEditorLauncher::new(editor_command).open_file(path)?;
    }

    Ok(())
}

/// Routes tracing output to `~/.navtty/log`; the terminal belongs to the
/// TUI. Logging is best-effort and silently disabled when the file cannot
/// be opened. `NAVTTY_LOG` selects the filter.
fn init_logging(home: &Path) {
    if std::fs::create_dir_all(home).is_err() {
        return;
    }
    let Ok(log_file) = std::fs::OpenOptions::new()
        .append(true)
        .create(true)
        .open(home.join("log"))
    else {
        return;
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("NAVTTY_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::sync::Mutex::new(log_file))
        .with_ansi(false)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}
