//! Account lookup for the current user.

use crate::avatar::{avatar_candidates, find_avatar};
use crate::error::UserError;
use log::debug;
use nix::unistd::User;
use serde::Serialize;
use std::env;
use std::path::Path;

/// Account details shown by the shell's user widget.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub username: String,
    pub full_name: String,
    pub home: String,
    pub shell: String,
    pub uid: u32,
    pub gid: u32,
    /// Empty when no avatar was found.
    pub avatar_path: String,
}

impl UserInfo {
    fn from_account(username: &str, account: &User) -> Self {
        let gecos = account.gecos.to_string_lossy();
        let avatar = find_avatar(&avatar_candidates(&account.dir, username));

        Self {
            username: username.to_string(),
            full_name: gecos_full_name(&gecos, username),
            home: account.dir.to_string_lossy().into_owned(),
            shell: account.shell.to_string_lossy().into_owned(),
            uid: account.uid.as_raw(),
            gid: account.gid.as_raw(),
            avatar_path: avatar
                .as_deref()
                .map(Path::to_string_lossy)
                .unwrap_or_default()
                .into_owned(),
        }
    }
}

/// Either the user's details or `{"error": "..."}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum UserReport {
    Found(UserInfo),
    Error { error: String },
}

impl UserReport {
    /// Look up the invoking user, folding failures into the error shape.
    pub fn current() -> Self {
        current_user().into()
    }
}

impl From<Result<UserInfo, UserError>> for UserReport {
    fn from(result: Result<UserInfo, UserError>) -> Self {
        match result {
            Ok(info) => UserReport::Found(info),
            Err(e) => UserReport::Error {
                error: e.to_string(),
            },
        }
    }
}

/// Username from `USER`, or `USERNAME` when `USER` is unset.
/// A set but empty `USER` means no username.
pub fn current_username<F>(lookup: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup("USER")
        .or_else(|| lookup("USERNAME"))
        .filter(|name| !name.is_empty())
}

/// Display name is the first GECOS field, or the username when that is empty.
pub fn gecos_full_name(gecos: &str, username: &str) -> String {
    match gecos.split(',').next() {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => username.to_string(),
    }
}

/// Read one account from the passwd database.
pub fn lookup_user(username: &str) -> Result<UserInfo, UserError> {
    let account =
        User::from_name(username)?.ok_or_else(|| UserError::NotFound(username.to_string()))?;
    debug!("Found account {} (uid {})", username, account.uid);

    Ok(UserInfo::from_account(username, &account))
}

/// Look up the user named by the environment.
pub fn current_user() -> Result<UserInfo, UserError> {
    let username = current_username(|key| env::var(key).ok()).ok_or(UserError::NoUsername)?;
    lookup_user(&username)
}
