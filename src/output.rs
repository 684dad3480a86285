//! JSON emission on stdout.

use capy_apps::{AppCatalog, accepted, scan_roots};
use log::info;
use serde::Serialize;
use std::io::{self, Write};
use std::path::PathBuf;

/// How discovered applications are written.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputMode {
    /// One JSON array, written once the scan is finished.
    #[default]
    Array,
    /// Newline-delimited JSON, one object per app, flushed as each is accepted.
    Stream,
}

/// Write `value` as compact JSON followed by a newline, then flush.
/// Non-ASCII text is written as-is.
pub fn write_json_line<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> io::Result<()> {
    serde_json::to_writer(&mut *out, value)?;
    out.write_all(b"\n")?;
    out.flush()
}

/// Scan `roots` and write the accepted apps. Returns how many were written.
pub fn write_apps<W: Write>(roots: &[PathBuf], mode: OutputMode, mut out: W) -> io::Result<usize> {
    match mode {
        OutputMode::Array => {
            let catalog = AppCatalog::scan(roots);
            write_json_line(&mut out, catalog.apps())?;
            Ok(catalog.len())
        }
        OutputMode::Stream => {
            let mut written = 0;
            let mut failed = None;

            scan_roots(roots, |discovery| {
                if failed.is_some() {
                    return;
                }
                if let Some(app) = accepted(discovery) {
                    match write_json_line(&mut out, &app) {
                        Ok(()) => written += 1,
                        Err(e) => failed = Some(e),
                    }
                }
            });

            match failed {
                Some(e) => Err(e),
                None => {
                    info!("Streamed {} apps", written);
                    Ok(written)
                }
            }
        }
    }
}
