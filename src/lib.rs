#![forbid(unsafe_code)]
//! jltest: a conformance test runner for language implementations
//!
//! The runner treats the implementation under test (the *subject*) as an opaque executable. Test cases live in
//! suite directories; each case is a group of files sharing a base name:
//!
//! - `good/` and `extensions/<name>/`: `<case>.jl` is run and its stdout must equal `<case>.output` exactly,
//!   with `<case>.input` (if present) piped to stdin.
//! - `bad/`: `<case>.jl` must be rejected by the subject with exit code 1.
//!
//! ## Layout
//!
//! - [`discovery`] - groups files into named cases
//! - [`verdict`] - resolves, runs and scores a single case
//! - [`subject`] - process invocation of the subject executable
//! - [`cli`] - argument parsing, suite orchestration and the console report
//!
//! ## Panic Policy
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module enforces
//!   `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.

pub mod cli;
pub mod config;
pub mod discovery;
pub mod errors;
pub mod subject;
pub mod verdict;

pub use config::RunnerConfig;
pub use discovery::{Suite, SuiteKind, discover_cases};
pub use errors::{CaseError, SubjectError, SuiteError};
pub use subject::{ExecutionResult, ProcessSubject, Subject};
pub use verdict::{CaseOutcome, TestCase, Verdict, evaluate_case};
