//! Desktop entry parsing.

use serde::{Serialize, Serializer};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

const DESKTOP_ENTRY_GROUP: &str = "Desktop Entry";
const CATEGORY_SEPARATOR: char = ';';

/// Why a file could not be read as a desktop entry.
#[derive(Debug, thiserror::Error)]
pub enum EntryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("not valid UTF-8: {0}")]
    Decode(#[from] std::string::FromUtf8Error),

    #[error("line {line}: key outside of any group")]
    MissingGroupHeader { line: usize },

    #[error("line {line}: expected `key=value`, a group header or a comment")]
    Malformed { line: usize },

    #[error("group [{group}] appears more than once")]
    DuplicateGroup { group: String },

    #[error("line {line}: duplicate key `{key}`")]
    DuplicateKey { key: String, line: usize },
}

/// Why a well-formed entry is not surfaced as an application.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FilterReason {
    MissingGroup,
    NotApplication(Option<String>),
    NoDisplay,
    Hidden,
    MissingName,
    MissingExec,
}

/// Result of looking at a single candidate file.
#[derive(Debug)]
pub enum EntryOutcome {
    Accepted(AppRecord),
    Filtered(FilterReason),
    Failed(EntryError),
}

/// Key/value pairs of the `[Desktop Entry]` group. Values are kept raw:
/// field codes and `$VARS` are not expanded.
///
/// Keys are stored lowercased and split from their value at the first `=`
/// or `:`. Lines starting with `#` or `;` are comments.
#[derive(Clone, Debug, Default)]
pub struct DesktopEntry {
    entries: HashMap<String, String>,
}

impl DesktopEntry {
    /// Parse desktop entry text. `Ok(None)` means the text is well formed
    /// but has no `[Desktop Entry]` group.
    pub fn parse(content: &str) -> Result<Option<DesktopEntry>, EntryError> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        let mut groups = HashSet::new();
        let mut current: Option<String> = None;
        let mut entries: Option<HashMap<String, String>> = None;

        for (idx, line) in content.lines().enumerate() {
            let line_no = idx + 1;
            let line = line.trim();
            if line.is_empty() || line.starts_with(['#', ';']) {
                continue;
            }

            if line.starts_with('[') && line.ends_with(']') {
                let group = line[1..line.len() - 1].to_string();
                if !groups.insert(group.clone()) {
                    return Err(EntryError::DuplicateGroup { group });
                }
                if group == DESKTOP_ENTRY_GROUP {
                    entries = Some(HashMap::new());
                }
                current = Some(group);
                continue;
            }

            let Some((key, value)) = line.split_once(['=', ':']) else {
                return Err(EntryError::Malformed { line: line_no });
            };
            let key = key.trim().to_lowercase();
            if key.is_empty() {
                return Err(EntryError::Malformed { line: line_no });
            }

            let Some(group) = current.as_deref() else {
                return Err(EntryError::MissingGroupHeader { line: line_no });
            };
            if group != DESKTOP_ENTRY_GROUP {
                // Other groups (actions, vendor extensions) are checked for
                // shape only.
                continue;
            }

            if let Some(map) = entries.as_mut() {
                if map.contains_key(&key) {
                    return Err(EntryError::DuplicateKey { key, line: line_no });
                }
                map.insert(key, value.trim().to_string());
            }
        }

        Ok(entries.map(|entries| DesktopEntry { entries }))
    }

    /// Keys are matched case-insensitively.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(&key.to_lowercase()).map(String::as_str)
    }

    /// Trimmed value, or an empty string when the key is absent.
    pub fn string_or_default(&self, key: &str) -> String {
        self.get(key).map(str::trim).unwrap_or_default().to_string()
    }

    /// Only a case-insensitive `true` counts; `1`, `yes` and absence are false.
    pub fn flag(&self, key: &str) -> bool {
        self.get(key)
            .is_some_and(|value| value.trim().eq_ignore_ascii_case("true"))
    }
}

/// An application surfaced to the shell. Built once by [`validate`], read-only afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppRecord {
    id: String,
    name: String,
    generic_name: String,
    comment: String,
    icon: String,
    exec: String,
    terminal: bool,
    categories: String,
    #[serde(serialize_with = "serialize_lossy_path")]
    file_path: PathBuf,
}

fn serialize_lossy_path<S: Serializer>(path: &Path, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&path.to_string_lossy())
}

impl AppRecord {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn generic_name(&self) -> &str {
        &self.generic_name
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    pub fn icon(&self) -> &str {
        &self.icon
    }

    pub fn exec(&self) -> &str {
        &self.exec
    }

    pub fn terminal(&self) -> bool {
        self.terminal
    }

    pub fn categories(&self) -> &str {
        &self.categories
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }
}

/// Apply the Desktop Entry visibility rules. The first failing rule wins.
pub fn validate(id: &str, path: &Path, entry: &DesktopEntry) -> Result<AppRecord, FilterReason> {
    match entry.get("Type") {
        Some("Application") => {}
        other => return Err(FilterReason::NotApplication(other.map(String::from))),
    }

    if entry.flag("NoDisplay") {
        return Err(FilterReason::NoDisplay);
    }
    if entry.flag("Hidden") {
        return Err(FilterReason::Hidden);
    }

    let name = entry.string_or_default("Name");
    if name.is_empty() {
        return Err(FilterReason::MissingName);
    }
    let exec = entry.string_or_default("Exec");
    if exec.is_empty() {
        return Err(FilterReason::MissingExec);
    }

    let categories = entry.string_or_default("Categories");
    let categories = categories
        .strip_suffix(CATEGORY_SEPARATOR)
        .unwrap_or(&categories)
        .to_string();

    Ok(AppRecord {
        id: id.to_string(),
        name,
        generic_name: entry.string_or_default("GenericName"),
        comment: entry.string_or_default("Comment"),
        icon: entry.string_or_default("Icon"),
        exec,
        terminal: entry.flag("Terminal"),
        categories,
        file_path: path.to_path_buf(),
    })
}

fn read_entry_text(path: &Path) -> Result<String, EntryError> {
    let bytes = fs::read(path)?;
    Ok(String::from_utf8(bytes)?)
}

/// Parse a .desktop file into an [`EntryOutcome`]. Never fails outright.
pub fn parse_desktop_file(id: &str, path: &Path) -> EntryOutcome {
    let content = match read_entry_text(path) {
        Ok(content) => content,
        Err(e) => return EntryOutcome::Failed(e),
    };

    match DesktopEntry::parse(&content) {
        Ok(Some(entry)) => match validate(id, path, &entry) {
            Ok(app) => EntryOutcome::Accepted(app),
            Err(reason) => EntryOutcome::Filtered(reason),
        },
        Ok(None) => EntryOutcome::Filtered(FilterReason::MissingGroup),
        Err(e) => EntryOutcome::Failed(e),
    }
}
