//! Avatar lookup.

use std::path::{Path, PathBuf};

const ACCOUNTS_SERVICE_ICONS: &str = "/var/lib/AccountsService/icons";
const ACCOUNTS_SERVICE_EXTENSIONS: [&str; 6] = ["", ".png", ".jpg", ".jpeg", ".gif", ".svg"];

/// Places a user avatar may live, in lookup order.
pub fn avatar_candidates(home: &Path, username: &str) -> Vec<PathBuf> {
    let faces = home.join(".local/share/pixmaps/faces");
    let mut paths = vec![
        home.join(".face"),
        home.join(".face.icon"),
        faces.join(format!("{username}.png")),
        faces.join(format!("{username}.jpg")),
    ];

    let accounts_service = Path::new(ACCOUNTS_SERVICE_ICONS);
    for ext in ACCOUNTS_SERVICE_EXTENSIONS {
        paths.push(accounts_service.join(format!("{username}{ext}")));
    }

    paths
}

/// First candidate that is a regular file.
pub fn find_avatar(candidates: &[PathBuf]) -> Option<PathBuf> {
    candidates.iter().find(|path| path.is_file()).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_candidate_order() {
        let candidates = avatar_candidates(Path::new("/home/capy"), "capy");

        assert_eq!(
            candidates,
            vec![
                PathBuf::from("/home/capy/.face"),
                PathBuf::from("/home/capy/.face.icon"),
                PathBuf::from("/home/capy/.local/share/pixmaps/faces/capy.png"),
                PathBuf::from("/home/capy/.local/share/pixmaps/faces/capy.jpg"),
                PathBuf::from("/var/lib/AccountsService/icons/capy"),
                PathBuf::from("/var/lib/AccountsService/icons/capy.png"),
                PathBuf::from("/var/lib/AccountsService/icons/capy.jpg"),
                PathBuf::from("/var/lib/AccountsService/icons/capy.jpeg"),
                PathBuf::from("/var/lib/AccountsService/icons/capy.gif"),
                PathBuf::from("/var/lib/AccountsService/icons/capy.svg"),
            ]
        );
    }

    #[test]
    fn test_first_regular_file_wins() {
        let tmp = tempfile::tempdir().unwrap();
        let home = tmp.path();
        let faces = home.join(".local/share/pixmaps/faces");
        fs::create_dir_all(&faces).unwrap();
        // A directory is not an avatar.
        fs::create_dir(home.join(".face")).unwrap();
        fs::write(faces.join("capy.png"), b"png").unwrap();
        fs::write(faces.join("capy.jpg"), b"jpg").unwrap();

        let found = find_avatar(&avatar_candidates(home, "capy"));
        assert_eq!(found, Some(faces.join("capy.png")));
    }

    #[test]
    fn test_no_avatar() {
        let tmp = tempfile::tempdir().unwrap();
        let candidates = vec![tmp.path().join(".face"), tmp.path().join(".face.icon")];

        assert_eq!(find_avatar(&candidates), None);
    }
}
