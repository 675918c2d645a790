//! Case discovery
//!
//! A suite is a flat directory. Every regular file in it belongs to the case named by its base name, so
//! `add.jl`, `add.input` and `add.output` all collapse into the single case `add`.

use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::config::{BAD_DIR, EXTENSIONS_DIR, GOOD_DIR, RunnerConfig};
use crate::errors::SuiteError;

/// How the cases of a suite are scored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuiteKind {
    /// Stdout must match `<case>.output`
    Good,
    /// The subject must reject the source with the rejection exit code
    Bad,
}

/// A directory of cases sharing a kind and file convention
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suite {
    pub kind: SuiteKind,
    /// Path relative to the suite root, e.g. `good` or `extensions/arrays1`
    pub label: String,
    pub dir: PathBuf,
}

impl Suite {
    pub fn new(kind: SuiteKind, label: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            label: label.into(),
            dir: dir.into(),
        }
    }

    pub fn good(config: &RunnerConfig) -> Self {
        Self::new(SuiteKind::Good, GOOD_DIR, config.good_dir())
    }

    pub fn bad(config: &RunnerConfig) -> Self {
        Self::new(SuiteKind::Bad, BAD_DIR, config.bad_dir())
    }

    /// Case names in this suite, see [`discover_cases`]
    pub fn cases(&self) -> Result<Vec<String>, SuiteError> {
        discover_cases(&self.dir)
    }
}

/// Return the sorted, deduplicated base names of the regular files directly inside `dir`.
///
/// Only the last extension is stripped (`a.b.jl` is case `a.b`), and leading dots never start an extension
/// (`.hidden` and `..x` are kept whole). Subdirectories are not descended into. An empty directory yields no cases.
///
/// ## Errors
///
/// Returns [`SuiteError::SuiteNotFound`] if `dir` is missing or cannot be listed.
#[tracing::instrument(skip_all, fields(dir = %dir.display()))]
pub fn discover_cases(dir: &Path) -> Result<Vec<String>, SuiteError> {
    let not_found = |source: io::Error| SuiteError::SuiteNotFound {
        path: dir.to_path_buf(),
        source,
    };

    let mut names = BTreeSet::new();
    for entry in fs::read_dir(dir).map_err(not_found)? {
        let path = entry.map_err(not_found)?.path();
        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name() else {
            continue;
        };
        match file_name.to_str() {
            Some(file_name) => {
                names.insert(case_name(file_name).to_string());
            }
            None => tracing::warn!(path = %path.display(), "skipping file with non UTF-8 name"),
        }
    }

    tracing::debug!(cases = names.len(), "discovered cases");
    Ok(names.into_iter().collect())
}

/// Strip the last extension of `file_name`, if any.
///
/// The dot only separates an extension when something other than dots precedes it.
fn case_name(file_name: &str) -> &str {
    match file_name.rfind('.') {
        Some(dot) if file_name[..dot].bytes().any(|b| b != b'.') => &file_name[..dot],
        _ => file_name,
    }
}

/// Good suites nested under `extensions/`, one per subdirectory, in sorted order.
///
/// A missing `extensions` directory means there are no extension suites.
pub fn extension_suites(config: &RunnerConfig) -> Result<Vec<Suite>, SuiteError> {
    let dir = config.extensions_dir();
    let entries = match fs::read_dir(&dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => return Err(SuiteError::SuiteNotFound { path: dir, source }),
    };

    let mut names = BTreeSet::new();
    for entry in entries {
        let path = entry
            .map_err(|source| SuiteError::SuiteNotFound {
                path: dir.clone(),
                source,
            })?
            .path();
        if !path.is_dir() {
            continue;
        }
        match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => {
                names.insert(name.to_string());
            }
            None => tracing::warn!(path = %path.display(), "skipping extension suite with non UTF-8 name"),
        }
    }

    Ok(names
        .into_iter()
        .map(|name| Suite::new(SuiteKind::Good, format!("{EXTENSIONS_DIR}/{name}"), dir.join(&name)))
        .collect())
}
