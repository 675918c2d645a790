//! Verdict engine
//!
//! Scores one discovered case: resolve its files, load fixtures, run the subject once, compare. Each case moves
//! through `Discovered -> Loaded -> Executed -> Verdicted` with nothing shared between cases, so an infrastructure
//! error in one case leaves the others untouched.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::config::{INPUT_EXTENSION, OUTPUT_EXTENSION, REJECTED_EXIT_CODE};
use crate::discovery::{Suite, SuiteKind};
use crate::errors::CaseError;
use crate::subject::Subject;

/// Pass/fail result of scoring a case
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Ok,
    Fail,
}

impl Verdict {
    fn from_bool(passed: bool) -> Self {
        if passed { Verdict::Ok } else { Verdict::Fail }
    }

    pub fn is_ok(self) -> bool {
        self == Verdict::Ok
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Ok => f.write_str("OK"),
            Verdict::Fail => f.write_str("FAIL"),
        }
    }
}

/// What a case expects from the subject
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expectation {
    /// Stdout must equal the contents of `expected_output`
    Stdout { expected_output: PathBuf, input: PathBuf },
    /// The subject must exit with the rejection code
    Rejection,
}

/// A case name resolved to the files it consists of
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCase {
    pub name: String,
    pub source: PathBuf,
    pub expectation: Expectation,
}

impl TestCase {
    /// Resolve `name` within `suite` by the fixed file convention
    pub fn resolve(suite: &Suite, name: &str, source_extension: &str) -> Self {
        let file = |extension: &str| suite.dir.join(format!("{name}.{extension}"));
        let expectation = match suite.kind {
            SuiteKind::Good => Expectation::Stdout {
                expected_output: file(OUTPUT_EXTENSION),
                input: file(INPUT_EXTENSION),
            },
            SuiteKind::Bad => Expectation::Rejection,
        };
        Self {
            name: name.to_string(),
            source: file(source_extension),
            expectation,
        }
    }
}

/// Result of evaluating a single case
#[derive(Debug)]
pub enum CaseOutcome {
    Good {
        verdict: Verdict,
        /// Expected and actual stdout, kept only on failure for diagnostics
        mismatch: Option<Mismatch>,
    },
    Bad {
        verdict: Verdict,
        exit_code: i32,
    },
    /// The case could not be scored
    Errored(CaseError),
}

impl CaseOutcome {
    /// The verdict, or `None` if the case errored
    pub fn verdict(&self) -> Option<Verdict> {
        match self {
            CaseOutcome::Good { verdict, .. } | CaseOutcome::Bad { verdict, .. } => Some(*verdict),
            CaseOutcome::Errored(_) => None,
        }
    }
}

/// Expected versus actual stdout of a failed good case
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    pub expected: Vec<u8>,
    pub actual: Vec<u8>,
}

/// Fixtures of a case, loaded
enum Loaded {
    Stdout { expected: Vec<u8>, input: Option<Vec<u8>> },
    Rejection,
}

/// Evaluate one case: resolve, load, run the subject once, and score.
///
/// Infrastructure failures are returned as [`CaseOutcome::Errored`], never as [`Verdict::Fail`].
#[tracing::instrument(skip_all, fields(suite = %suite.label, case = name))]
pub fn evaluate_case(subject: &dyn Subject, suite: &Suite, name: &str, source_extension: &str) -> CaseOutcome {
    let case = TestCase::resolve(suite, name, source_extension);
    match score(subject, &case) {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!(error = %e, "case could not be scored");
            CaseOutcome::Errored(e)
        }
    }
}

fn score(subject: &dyn Subject, case: &TestCase) -> Result<CaseOutcome, CaseError> {
    let loaded = load(case)?;
    tracing::debug!(source = %case.source.display(), "running subject");

    match loaded {
        Loaded::Stdout { expected, input } => {
            let result = subject.run(&case.source, input.as_deref())?;
            let verdict = Verdict::from_bool(result.stdout == expected);
            let mismatch = (!verdict.is_ok()).then(|| Mismatch {
                expected,
                actual: result.stdout,
            });
            Ok(CaseOutcome::Good { verdict, mismatch })
        }
        Loaded::Rejection => {
            let result = subject.run(&case.source, None)?;
            Ok(CaseOutcome::Bad {
                verdict: Verdict::from_bool(result.exit_code == REJECTED_EXIT_CODE),
                exit_code: result.exit_code,
            })
        }
    }
}

fn load(case: &TestCase) -> Result<Loaded, CaseError> {
    if !case.source.is_file() {
        return Err(CaseError::MissingSource {
            path: case.source.clone(),
        });
    }

    match &case.expectation {
        Expectation::Stdout { expected_output, input } => {
            let expected = fs::read(expected_output).map_err(|source| CaseError::ExpectedOutput {
                path: expected_output.clone(),
                source,
            })?;
            let input = read_optional(input).map_err(|source| CaseError::Input {
                path: input.clone(),
                source,
            })?;
            Ok(Loaded::Stdout { expected, input })
        }
        Expectation::Rejection => Ok(Loaded::Rejection),
    }
}

/// Read a file that may legitimately be absent
fn read_optional(path: &Path) -> io::Result<Option<Vec<u8>>> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}
