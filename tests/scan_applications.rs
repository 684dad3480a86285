use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

const KEYS: [&str; 9] = [
    "categories",
    "comment",
    "exec",
    "filePath",
    "genericName",
    "icon",
    "id",
    "name",
    "terminal",
];

fn cmd(tmp: &TempDir, data_dirs: &[&Path]) -> assert_cmd::Command {
    let data_dirs: Vec<String> = data_dirs.iter().map(|d| d.display().to_string()).collect();

    let mut cmd = assert_cmd::Command::from(Command::new(env!("CARGO_BIN_EXE_scan-applications")));
    cmd.env("HOME", tmp.path())
        .env("XDG_DATA_HOME", tmp.path().join("data"))
        .env("XDG_DATA_DIRS", data_dirs.join(":"))
        .env_remove("RUST_LOG");
    cmd
}

fn write_entry(root: &Path, file: &str, content: &str) {
    let apps = root.join("applications");
    fs::create_dir_all(&apps).unwrap();
    fs::write(apps.join(file), content).unwrap();
}

fn app(name: &str) -> String {
    format!("[Desktop Entry]\nType=Application\nName={name}\nExec={name} %U\nCategories=Utility;System;\n")
}

/// Parse stdout and keep only the apps that came from the fixture tree;
/// the host may have Flatpak or Snap apps of its own.
fn fixture_apps(stdout: &[u8], tmp: &TempDir) -> Vec<Map<String, Value>> {
    let text = std::str::from_utf8(stdout).unwrap();
    assert_eq!(text.lines().count(), 1, "expected a single line: {text}");

    let value: Value = serde_json::from_str(text).unwrap();
    let apps = value.as_array().expect("stdout is a JSON array");

    apps.iter()
        .map(|app| {
            let object = app.as_object().expect("every item is an object").clone();
            let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
            keys.sort_unstable();
            assert_eq!(keys, KEYS);
            object
        })
        .filter(|app| {
            PathBuf::from(app["filePath"].as_str().unwrap()).starts_with(tmp.path())
        })
        .collect()
}

#[test]
fn lists_valid_apps_with_all_fields() {
    let tmp = TempDir::new().unwrap();
    let data = tmp.path().join("data");
    write_entry(&data, "editor.desktop", &app("editor"));

    let assert = cmd(&tmp, &[]).assert().success();
    let apps = fixture_apps(&assert.get_output().stdout, &tmp);

    assert_eq!(apps.len(), 1);
    assert_eq!(apps[0]["id"], "editor");
    assert_eq!(apps[0]["name"], "editor");
    assert_eq!(apps[0]["exec"], "editor %U");
    assert_eq!(apps[0]["terminal"], Value::Bool(false));
    assert_eq!(apps[0]["categories"], "Utility;System");
    assert_eq!(apps[0]["genericName"], "");
}

#[test]
fn user_directory_shadows_system_directories() {
    let tmp = TempDir::new().unwrap();
    let data = tmp.path().join("data");
    let sys_a = tmp.path().join("sys-a");
    let sys_b = tmp.path().join("sys-b");

    write_entry(&data, "broken.desktop", "");
    write_entry(&sys_a, "broken.desktop", &app("broken"));
    write_entry(&sys_a, "shared.desktop", &app("from-a"));
    write_entry(&sys_b, "shared.desktop", &app("from-b"));
    write_entry(&sys_b, "only-b.desktop", &app("only-b"));

    let assert = cmd(&tmp, &[sys_a.as_path(), sys_b.as_path()]).assert().success();
    let apps = fixture_apps(&assert.get_output().stdout, &tmp);

    let mut ids: Vec<&str> = apps.iter().map(|a| a["id"].as_str().unwrap()).collect();
    ids.sort_unstable();
    assert_eq!(ids, vec!["only-b", "shared"]);

    let shared = apps.iter().find(|a| a["id"] == "shared").unwrap();
    assert_eq!(shared["name"], "from-a");
}

#[test]
fn filtered_entries_never_appear() {
    let tmp = TempDir::new().unwrap();
    let data = tmp.path().join("data");
    write_entry(&data, "hidden.desktop", &format!("{}Hidden=true\n", app("hidden")));
    write_entry(&data, "nodisplay.desktop", &format!("{}NoDisplay=True\n", app("nodisplay")));
    write_entry(&data, "dir.desktop", "[Desktop Entry]\nType=Directory\nName=Dir\n");
    write_entry(&data, "noname.desktop", "[Desktop Entry]\nType=Application\nExec=x\n");

    let assert = cmd(&tmp, &[]).assert().success();
    assert!(fixture_apps(&assert.get_output().stdout, &tmp).is_empty());
}

#[test]
fn missing_roots_still_succeed() {
    let tmp = TempDir::new().unwrap();
    let missing = tmp.path().join("missing");

    let assert = cmd(&tmp, &[missing.as_path()]).assert().success();
    assert!(fixture_apps(&assert.get_output().stdout, &tmp).is_empty());
}

#[test]
fn stream_mode_writes_objects_per_line() {
    let tmp = TempDir::new().unwrap();
    let data = tmp.path().join("data");
    write_entry(&data, "one.desktop", &app("one"));
    write_entry(&data, "two.desktop", &app("two"));

    let assert = cmd(&tmp, &[]).arg("--stream").assert().success();
    let text = String::from_utf8(assert.get_output().stdout.clone()).unwrap();

    let ids: Vec<String> = text
        .lines()
        .map(|line| serde_json::from_str::<Value>(line).unwrap())
        .filter(|app| app["filePath"].as_str().unwrap().starts_with(&*tmp.path().to_string_lossy()))
        .map(|app| app["id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(ids.len(), 2);
    assert!(ids.contains(&"one".to_string()));
    assert!(ids.contains(&"two".to_string()));
}
