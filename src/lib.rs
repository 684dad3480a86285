//! Shared plumbing for the CapyShell service helpers.
//!
//! Each binary prints exactly one JSON document on stdout; logs go to stderr.

pub mod logging;
pub mod output;
