//! Application directory helpers for the triage core.
//!
//! The rules override and log files live under one per-user directory,
//! resolved from the OS config root. A `TRIAGEM_CONFIG_HOME` environment
//! variable (or the in-process override used by tests) relocates everything
//! for portable or sandboxed setups.

use std::{
    path::PathBuf,
    sync::{LazyLock, Mutex},
};

use directories::ProjectDirs;
use thiserror::Error;

static BASE_OVERRIDE: LazyLock<Mutex<Option<PathBuf>>> = LazyLock::new(|| Mutex::new(None));

/// Errors that can occur while resolving or preparing application directories.
#[derive(Debug, Error)]
pub enum AppDirError {
    /// No per-user config location could be resolved on this platform.
    #[error("No suitable config directory available for application files")]
    NoBaseDir,
    /// Failed to create a directory under the application root.
    #[error("Failed to create application directory at {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Return the application root directory, creating it if needed.
pub fn app_root_dir() -> Result<PathBuf, AppDirError> {
    let root = resolve_root().ok_or(AppDirError::NoBaseDir)?;
    ensure_dir(root)
}

/// Return the logs directory inside the application root, creating it if
/// needed.
pub fn logs_dir() -> Result<PathBuf, AppDirError> {
    ensure_dir(app_root_dir()?.join("logs"))
}

fn resolve_root() -> Option<PathBuf> {
    if let Some(path) = BASE_OVERRIDE.lock().ok().and_then(|guard| guard.clone()) {
        return Some(path.join("triagem"));
    }
    if let Ok(path) = std::env::var("TRIAGEM_CONFIG_HOME") {
        return Some(PathBuf::from(path).join("triagem"));
    }
    ProjectDirs::from("", "", "triagem").map(|dirs| dirs.config_dir().to_path_buf())
}

fn ensure_dir(path: PathBuf) -> Result<PathBuf, AppDirError> {
    std::fs::create_dir_all(&path).map_err(|source| AppDirError::CreateDir {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

#[cfg(test)]
pub(crate) fn set_base_override(path: PathBuf) {
    let mut guard = BASE_OVERRIDE.lock().expect("base override mutex poisoned");
    *guard = Some(path);
}

#[cfg(test)]
pub(crate) fn clear_base_override() {
    let mut guard = BASE_OVERRIDE.lock().expect("base override mutex poisoned");
    *guard = None;
}
