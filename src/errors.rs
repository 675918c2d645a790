//! Infrastructure errors
//!
//! These mean the run itself is misconfigured (missing directories, unreadable fixtures, a subject that cannot be
//! launched). They are never test failures: a case that hits one is reported as errored, not as `FAIL`.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors scoped to a whole suite directory
#[derive(Debug, Error)]
pub enum SuiteError {
    #[error("suite directory '{}' not found or unreadable: {source}", path.display())]
    SuiteNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Errors scoped to a single case
#[derive(Debug, Error)]
pub enum CaseError {
    #[error("missing source file '{}'", path.display())]
    MissingSource { path: PathBuf },

    #[error("cannot read expected output '{}': {source}", path.display())]
    ExpectedOutput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot read input '{}': {source}", path.display())]
    Input {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Subject(#[from] SubjectError),
}

/// Errors raised while invoking the subject executable
#[derive(Debug, Error)]
pub enum SubjectError {
    #[error("cannot launch subject '{}': {source}", program.display())]
    Launch {
        program: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("I/O error while running subject '{}': {source}", program.display())]
    Io {
        program: PathBuf,
        #[source]
        source: io::Error,
    },
}
