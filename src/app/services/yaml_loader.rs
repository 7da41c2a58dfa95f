//! YAML configuration loading
//!
//! Loads a single-document YAML file into a `serde_yaml::Value`, expanding
//! `${VAR}` environment variable references found inside string scalars.
//! References that do not resolve are left untouched.

use crate::app::adapters::filesystem;
use crate::{Error, Result};
use regex::{Captures, Regex};
use serde::Deserialize;
use std::borrow::Cow;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;
use tracing::debug;

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}")
            .expect("environment variable reference is a valid pattern")
    })
}

/// Load a YAML configuration file.
///
/// The file must pass the filesystem validity check and contain exactly one
/// YAML document.
pub fn load_yaml_file(path: &Path) -> Result<serde_yaml::Value> {
    filesystem::require_readable_file(path)?;
    let path_display = path.display().to_string();

    let text = fs::read_to_string(path)
        .map_err(|err| Error::io(format!("could not read YAML file '{path_display}'"), err))?;

    let mut documents = Vec::new();
    for document in serde_yaml::Deserializer::from_str(&text) {
        let value = serde_yaml::Value::deserialize(document)
            .map_err(|err| Error::yaml_parsing(&path_display, format!("cannot parse document: {err}")))?;
        documents.push(value);
    }

    if documents.len() != 1 {
        return Err(Error::yaml_parsing(
            &path_display,
            format!(
                "expected exactly one YAML document, found {}",
                documents.len()
            ),
        ));
    }

    debug!("loaded YAML configuration from {}", path_display);

    let mut value = documents.remove(0);
    expand_env_vars(&mut value);
    Ok(value)
}

/// Expand `${VAR}` references in every string scalar of the value tree.
fn expand_env_vars(value: &mut serde_yaml::Value) {
    match value {
        serde_yaml::Value::String(text) => {
            let expanded = env_var_pattern().replace_all(text, |caps: &Captures<'_>| {
                std::env::var(&caps[1]).unwrap_or_else(|_| caps[0].to_string())
            });
            if let Cow::Owned(new_text) = expanded {
                *text = new_text;
            }
        }
        serde_yaml::Value::Sequence(items) => {
            for item in items.iter_mut() {
                expand_env_vars(item);
            }
        }
        serde_yaml::Value::Mapping(mapping) => {
            for (_, entry) in mapping.iter_mut() {
                expand_env_vars(entry);
            }
        }
        _ => {}
    }
}
