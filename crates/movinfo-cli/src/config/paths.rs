//! Config file location.

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};

/// Config file name inside the config directory.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Application directory name under the user config root.
const APP_DIR_NAME: &str = "movinfo";

/// Resolves the config file path.
///
/// Lookup order:
/// 1. `{dir}/config.toml` when `--dir` is given.
/// 2. `$XDG_CONFIG_HOME/movinfo/config.toml` when set and non-empty.
/// 3. `$HOME/.config/movinfo/config.toml`.
///
/// # Errors
///
/// Returns an error if none of the above can be determined.
pub fn resolve_config_path(dir: Option<&PathBuf>) -> Result<PathBuf> {
    let xdg = std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from);
    let home = std::env::var_os("HOME").map(PathBuf::from);
    match config_path_from(dir.map(PathBuf::as_path), xdg.as_deref(), home.as_deref()) {
        Some(path) => Ok(path),
        None => bail!("neither XDG_CONFIG_HOME nor HOME is set"),
    }
}

/// Picks the config path from the given roots.
fn config_path_from(dir: Option<&Path>, xdg: Option<&Path>, home: Option<&Path>) -> Option<PathBuf> {
    if let Some(d) = dir {
        return Some(d.join(CONFIG_FILE_NAME));
    }
    if let Some(root) = xdg.filter(|p| !p.as_os_str().is_empty()) {
        return Some(root.join(APP_DIR_NAME).join(CONFIG_FILE_NAME));
    }
    home.map(|h| h.join(".config").join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
}
