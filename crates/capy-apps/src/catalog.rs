//! App Catalog implementation.

use crate::desktop_entry::{AppRecord, EntryOutcome, parse_desktop_file};
use log::{debug, info, warn};

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const DESKTOP_SUFFIX: &str = ".desktop";

/// Identifiers claimed so far during one scan.
#[derive(Debug, Default)]
pub struct SeenSet {
    ids: HashSet<String>,
}

impl SeenSet {
    /// Claim `id`. Returns false if an earlier root already owns it.
    pub fn claim(&mut self, id: &str) -> bool {
        self.ids.insert(id.to_string())
    }
}

/// Everything the scanner runs into, in visiting order.
#[derive(Debug)]
pub enum Discovery {
    /// First file seen for this identifier.
    Entry {
        id: String,
        path: PathBuf,
        outcome: EntryOutcome,
    },
    /// A lower-priority duplicate of an identifier already claimed.
    Shadowed { id: String, path: PathBuf },
    /// The root could not be listed; it contributes nothing.
    RootUnreadable { root: PathBuf, error: io::Error },
}

/// Identifier for a desktop file: its name without the `.desktop` suffix.
/// Hidden files are not entries.
pub fn desktop_id(path: &Path) -> Option<String> {
    let name = path.file_name()?.to_str()?;
    if name.starts_with('.') {
        return None;
    }
    let id = name.strip_suffix(DESKTOP_SUFFIX)?;
    (!id.is_empty()).then(|| id.to_string())
}

/// Scan one directory (non-recursive) in listing order.
///
/// The identifier is claimed before the file is parsed, so a broken or
/// filtered entry still hides same-named entries from later roots.
pub fn scan_root<F>(root: &Path, seen: &mut SeenSet, visit: &mut F)
where
    F: FnMut(Discovery),
{
    let read_dir = match fs::read_dir(root) {
        Ok(read_dir) => read_dir,
        Err(error) => {
            visit(Discovery::RootUnreadable {
                root: root.to_path_buf(),
                error,
            });
            return;
        }
    };

    debug!("Scanning desktop files in {:?}", root);

    for entry in read_dir.flatten() {
        let path = entry.path();
        let Some(id) = desktop_id(&path) else {
            continue;
        };

        // Follows symlinks; dangling links are not regular files.
        if !fs::metadata(&path).is_ok_and(|meta| meta.is_file()) {
            continue;
        }

        if !seen.claim(&id) {
            visit(Discovery::Shadowed { id, path });
            continue;
        }

        let outcome = parse_desktop_file(&id, &path);
        visit(Discovery::Entry { id, path, outcome });
    }
}

/// Scan every root in priority order with a fresh [`SeenSet`].
pub fn scan_roots<F>(roots: &[PathBuf], mut visit: F)
where
    F: FnMut(Discovery),
{
    let mut seen = SeenSet::default();
    for root in roots {
        scan_root(root, &mut seen, &mut visit);
    }
}

/// Log a discovery and hand back the record if it was accepted.
pub fn accepted(discovery: Discovery) -> Option<AppRecord> {
    match discovery {
        Discovery::Entry {
            outcome: EntryOutcome::Accepted(app),
            ..
        } => Some(app),
        Discovery::Entry {
            path,
            outcome: EntryOutcome::Filtered(reason),
            ..
        } => {
            debug!("Skipping {:?}: {:?}", path, reason);
            None
        }
        Discovery::Entry {
            path,
            outcome: EntryOutcome::Failed(e),
            ..
        } => {
            debug!("Failed to parse {:?}: {}", path, e);
            None
        }
        Discovery::Shadowed { id, path } => {
            debug!("{:?} shadowed by an earlier '{}'", path, id);
            None
        }
        Discovery::RootUnreadable { root, error } => {
            warn!("Cannot list {:?}: {}", root, error);
            None
        }
    }
}

/// The applications found by one scan, in acceptance order.
#[derive(Clone, Debug, Default)]
pub struct AppCatalog {
    apps: Vec<AppRecord>,
}

impl AppCatalog {
    /// Scan the given roots, highest priority first.
    pub fn scan(roots: &[PathBuf]) -> Self {
        let mut apps = Vec::new();
        scan_roots(roots, |discovery| apps.extend(accepted(discovery)));
        info!("App catalog scan complete: {} apps", apps.len());
        Self { apps }
    }

    pub fn apps(&self) -> &[AppRecord] {
        &self.apps
    }

    /// Get app details by ID.
    pub fn get(&self, id: &str) -> Option<&AppRecord> {
        self.apps.iter().find(|app| app.id() == id)
    }

    pub fn len(&self) -> usize {
        self.apps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.apps.is_empty()
    }
}
