//! Filesystem validity checking for harvest input files
//!
//! One checkpoint, positioned at configuration-build time, that fuses the
//! missing-file, empty-file, and permission error classes so a single bad
//! file aborts the harvest before any extraction work starts.

use crate::{Error, Result};
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

fn disallowed_chars() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"[^A-Za-z0-9._/\-]").expect("disallowed character class is a valid pattern")
    })
}

/// Ensure that a path is well-formed, references an existing regular file
/// with data in it, and is readable by the current process.
///
/// Must be called before any attempt to open the file for reading.
pub fn require_readable_file(path: &Path) -> Result<()> {
    let display = path.display().to_string();

    let text = path
        .to_str()
        .ok_or_else(|| Error::invalid_path(&display, "path is not valid UTF-8"))?;

    if let Some(found) = disallowed_chars().find(text) {
        return Err(Error::invalid_path(
            &display,
            format!(
                "disallowed character '{}' - only a-z A-Z 0-9 and . _ / - are accepted",
                found.as_str()
            ),
        ));
    }

    if !path.is_file() {
        return Err(Error::invalid_path(
            &display,
            "does not reference an existing regular file",
        ));
    }

    let metadata = fs::metadata(path)
        .map_err(|err| Error::invalid_path(&display, format!("could not stat file: {err}")))?;
    if metadata.len() == 0 {
        return Err(Error::invalid_path(&display, "file is empty"));
    }

    fs::File::open(path)
        .map_err(|err| Error::invalid_path(&display, format!("file is not readable: {err}")))?;

    Ok(())
}
