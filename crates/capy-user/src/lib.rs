//! capy-user - Current user account info for the shell UI
//!
//! Features:
//! - Account data from the system passwd database
//! - Display name from the GECOS field
//! - Avatar discovery across the usual face/AccountsService locations

pub mod account;
pub mod avatar;
pub mod error;

pub use account::{UserInfo, UserReport, current_user, current_username, lookup_user};
pub use avatar::{avatar_candidates, find_avatar};
pub use error::UserError;
