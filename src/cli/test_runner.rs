//! Suite orchestration and the console report
//!
//! ## Reporter Trait
//!
//! Execution and presentation are separated by the `Reporter` trait. The runner calls it once per suite and once
//! per case, strictly in run order: `good`, each `extensions/<name>` suite in sorted order, then `bad`; within a
//! suite, cases in sorted name order.
//!
//! ## Report format
//!
//! ```text
//! Test add : OK
//! Test add : FAIL
//! Test bad1 : OK (exit code 1)
//! Test orphan : ERROR (cannot read expected output 'good/orphan.output': ...)
//! Suite bad : ERROR (suite directory 'bad' not found or unreadable: ...)
//! ```

use std::io::{self, Write};

use crate::config::{EXTENSIONS_DIR, RunnerConfig};
use crate::discovery::{Suite, extension_suites};
use crate::errors::SuiteError;
use crate::subject::Subject;
use crate::verdict::{CaseOutcome, Mismatch, Verdict, evaluate_case};

// ============================================================================
// Reporter Trait
// ============================================================================

/// Trait for reporting suite and case results.
pub trait Reporter {
    /// Called before the cases of a suite run
    fn on_suite_start(&mut self, _suite: &Suite, _case_count: usize) -> io::Result<()> {
        Ok(())
    }

    /// Called when a suite directory cannot be listed
    fn on_suite_error(&mut self, label: &str, error: &SuiteError) -> io::Result<()>;

    /// Called after each case has been scored (or failed to be)
    fn on_case_complete(&mut self, suite: &Suite, name: &str, outcome: &CaseOutcome) -> io::Result<()>;

    /// Called when every suite has been processed
    fn on_run_complete(&mut self, _summary: &RunSummary) -> io::Result<()> {
        Ok(())
    }
}

/// Counts for a whole run. Logged, never printed to the report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub passed: usize,
    pub failed: usize,
    pub errored: usize,
    pub suites_errored: usize,
}

impl RunSummary {
    fn record(&mut self, outcome: &CaseOutcome) {
        match outcome.verdict() {
            Some(Verdict::Ok) => self.passed += 1,
            Some(Verdict::Fail) => self.failed += 1,
            None => self.errored += 1,
        }
    }
}

/// Plain-text reporter, one line per case on `out`; verbose failure details go to `diag`
pub struct ConsoleReporter<W: Write, E: Write> {
    out: W,
    diag: E,
    pub verbose: bool,
}

impl<W: Write, E: Write> ConsoleReporter<W, E> {
    pub fn new(out: W, diag: E, verbose: bool) -> Self {
        Self { out, diag, verbose }
    }

    /// Give back the report and diagnostics writers
    pub fn into_inner(self) -> (W, E) {
        (self.out, self.diag)
    }

    fn write_mismatch(&mut self, name: &str, mismatch: &Mismatch) -> io::Result<()> {
        writeln!(self.diag, "--- {} expected", name)?;
        writeln!(self.diag, "{}", String::from_utf8_lossy(&mismatch.expected))?;
        writeln!(self.diag, "+++ {} actual", name)?;
        writeln!(self.diag, "{}", String::from_utf8_lossy(&mismatch.actual))
    }
}

impl<W: Write, E: Write> Reporter for ConsoleReporter<W, E> {
    fn on_suite_error(&mut self, label: &str, error: &SuiteError) -> io::Result<()> {
        writeln!(self.out, "Suite {} : ERROR ({})", label, error)
    }

    fn on_case_complete(&mut self, _suite: &Suite, name: &str, outcome: &CaseOutcome) -> io::Result<()> {
        writeln!(self.out, "{}", case_line(name, outcome))?;

        if self.verbose
            && let CaseOutcome::Good {
                mismatch: Some(mismatch),
                ..
            } = outcome
        {
            self.write_mismatch(name, mismatch)?;
        }
        Ok(())
    }

    fn on_run_complete(&mut self, _summary: &RunSummary) -> io::Result<()> {
        self.out.flush()?;
        self.diag.flush()
    }
}

/// Format the report line for one case
pub fn case_line(name: &str, outcome: &CaseOutcome) -> String {
    match outcome {
        CaseOutcome::Good { verdict, .. } => format!("Test {} : {}", name, verdict),
        CaseOutcome::Bad { verdict, exit_code } => format!("Test {} : {} (exit code {})", name, verdict, exit_code),
        CaseOutcome::Errored(error) => format!("Test {} : ERROR ({})", name, error),
    }
}

// ============================================================================
// Orchestration
// ============================================================================

/// Run every registered suite against `subject`, reporting as it goes.
///
/// Suite and case infrastructure errors are reported and skipped over; only a failure to write the report itself
/// aborts the run.
pub fn run_suites(config: &RunnerConfig, subject: &dyn Subject, reporter: &mut dyn Reporter) -> io::Result<RunSummary> {
    let mut summary = RunSummary::default();

    run_suite(&Suite::good(config), config, subject, reporter, &mut summary)?;

    match extension_suites(config) {
        Ok(suites) => {
            for suite in &suites {
                run_suite(suite, config, subject, reporter, &mut summary)?;
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "cannot list extension suites");
            summary.suites_errored += 1;
            reporter.on_suite_error(EXTENSIONS_DIR, &e)?;
        }
    }

    run_suite(&Suite::bad(config), config, subject, reporter, &mut summary)?;

    tracing::info!(
        passed = summary.passed,
        failed = summary.failed,
        errored = summary.errored,
        suites_errored = summary.suites_errored,
        "run complete"
    );
    reporter.on_run_complete(&summary)?;
    Ok(summary)
}

fn run_suite(
    suite: &Suite,
    config: &RunnerConfig,
    subject: &dyn Subject,
    reporter: &mut dyn Reporter,
    summary: &mut RunSummary,
) -> io::Result<()> {
    let names = match suite.cases() {
        Ok(names) => names,
        Err(e) => {
            tracing::error!(suite = %suite.label, error = %e, "cannot discover cases");
            summary.suites_errored += 1;
            return reporter.on_suite_error(&suite.label, &e);
        }
    };

    tracing::info!(suite = %suite.label, cases = names.len(), "running suite");
    reporter.on_suite_start(suite, names.len())?;

    for name in &names {
        let outcome = evaluate_case(subject, suite, name, &config.source_extension);
        summary.record(&outcome);
        reporter.on_case_complete(suite, name, &outcome)?;
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
