//! Path helpers for XDG directories.

use std::env;
use std::path::PathBuf;

const DEFAULT_DATA_HOME: &str = ".local/share";
const DEFAULT_DATA_DIRS: &str = "/usr/local/share:/usr/share";

const FLATPAK_USER_APPS: &str = ".local/share/flatpak/exports/share/applications";
const FLATPAK_SYSTEM_APPS: &str = "/var/lib/flatpak/exports/share/applications";
const SNAP_APPS: &str = "/var/lib/snapd/desktop/applications";

/// Snapshot of the environment that decides where applications live.
///
/// Empty variables count as unset, as the XDG Base Directory spec asks.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct XdgEnv {
    pub home: PathBuf,
    pub data_home: Option<PathBuf>,
    pub data_dirs: Option<String>,
}

impl XdgEnv {
    /// Capture `HOME`, `XDG_DATA_HOME` and `XDG_DATA_DIRS` from the process.
    pub fn from_env() -> Self {
        Self {
            home: dirs::home_dir().unwrap_or_default(),
            data_home: non_empty_var("XDG_DATA_HOME").map(PathBuf::from),
            data_dirs: non_empty_var("XDG_DATA_DIRS"),
        }
    }

    /// `$XDG_DATA_HOME`, or `~/.local/share`.
    pub fn data_home(&self) -> PathBuf {
        self.data_home
            .clone()
            .unwrap_or_else(|| self.home.join(DEFAULT_DATA_HOME))
    }

    /// `$XDG_DATA_DIRS` in listed order, or the `/usr/local/share:/usr/share` default.
    pub fn data_dirs(&self) -> Vec<PathBuf> {
        self.data_dirs
            .as_deref()
            .unwrap_or(DEFAULT_DATA_DIRS)
            .split(':')
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from)
            .collect()
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.is_empty())
}

/// Get all application .desktop file directories, highest priority first.
pub fn application_directories(env: &XdgEnv) -> Vec<PathBuf> {
    let mut dirs = Vec::new();

    dirs.push(env.data_home().join("applications"));

    for data_dir in env.data_dirs() {
        dirs.push(data_dir.join("applications"));
    }

    // App formats (flatpak, snap)
    dirs.push(env.home.join(FLATPAK_USER_APPS));
    dirs.push(PathBuf::from(FLATPAK_SYSTEM_APPS));
    dirs.push(PathBuf::from(SNAP_APPS));

    dirs
}

/// Application directories that exist right now. Missing roots are the
/// common case and are simply left out.
pub fn search_roots(env: &XdgEnv) -> Vec<PathBuf> {
    application_directories(env)
        .into_iter()
        .filter(|dir| dir.is_dir())
        .collect()
}
