//! Error types for capy-user

/// User lookup errors
#[derive(Debug, thiserror::Error)]
pub enum UserError {
    #[error("Could not determine username")]
    NoUsername,

    #[error("User '{0}' not found")]
    NotFound(String),

    #[error("{0}")]
    Lookup(#[from] nix::Error),
}
