//! capy-apps: Desktop application discovery for Linux desktops.
//!
//! Provides:
//! - XDG, Flatpak and Snap application directory resolution
//! - Desktop entry parsing and validation per the Desktop Entry Specification
//! - First-seen-wins deduplication across directories

mod catalog;
mod desktop_entry;
mod paths;

pub use catalog::{AppCatalog, Discovery, SeenSet, accepted, desktop_id, scan_root, scan_roots};
pub use desktop_entry::{
    AppRecord, DesktopEntry, EntryError, EntryOutcome, FilterReason, parse_desktop_file, validate,
};
pub use paths::{XdgEnv, application_directories, search_roots};
