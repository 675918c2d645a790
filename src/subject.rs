//! Invocation of the executable under test
//!
//! [`Subject`] is the seam between scoring and process execution. [`ProcessSubject`] is the real implementation;
//! tests substitute their own.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use std::thread;

use crate::errors::SubjectError;

/// Everything observed from one run of the subject
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
    /// Exit code; termination by signal `N` is reported as `-N`
    pub exit_code: i32,
}

/// Something that can run a case source and report what happened.
pub trait Subject {
    /// Run `source`, feeding `input` on stdin when present.
    ///
    /// `None` means no stdin at all, which is different from an empty input file.
    fn run(&self, source: &Path, input: Option<&[u8]>) -> Result<ExecutionResult, SubjectError>;
}

/// Runs an external executable as `program <source>`.
#[derive(Debug, Clone)]
pub struct ProcessSubject {
    program: PathBuf,
}

impl ProcessSubject {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn io_error(&self, source: io::Error) -> SubjectError {
        SubjectError::Io {
            program: self.program.clone(),
            source,
        }
    }
}

impl Subject for ProcessSubject {
    #[tracing::instrument(skip_all, fields(program = %self.program.display(), source = %source.display()))]
    fn run(&self, source: &Path, input: Option<&[u8]>) -> Result<ExecutionResult, SubjectError> {
        let stdin = if input.is_some() { Stdio::piped() } else { Stdio::null() };

        let mut child = Command::new(&self.program)
            .arg(source)
            .stdin(stdin)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| SubjectError::Launch {
                program: self.program.clone(),
                source,
            })?;

        // Feed stdin from a helper thread while the output pipes are drained, so neither side can block the other
        let (output, written) = thread::scope(|scope| {
            let writer = child
                .stdin
                .take()
                .zip(input)
                .map(|(mut pipe, bytes)| scope.spawn(move || write_input(&mut pipe, bytes)));

            let output = child.wait_with_output();
            let written = match writer {
                Some(handle) => handle
                    .join()
                    .unwrap_or_else(|_| Err(io::Error::other("stdin writer panicked"))),
                None => Ok(()),
            };
            (output, written)
        });

        let output = output.map_err(|e| self.io_error(e))?;
        written.map_err(|e| self.io_error(e))?;

        let exit_code = exit_code(output.status);
        tracing::debug!(exit_code, stdout_len = output.stdout.len(), "subject exited");

        Ok(ExecutionResult {
            stdout: output.stdout,
            stderr: output.stderr,
            exit_code,
        })
    }
}

/// Write all of `bytes` and close the pipe. A subject that exits without reading its input is not an error.
fn write_input(pipe: &mut impl Write, bytes: &[u8]) -> io::Result<()> {
    match pipe.write_all(bytes) {
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}

fn exit_code(status: ExitStatus) -> i32 {
    status.code().unwrap_or_else(|| signal_exit_code(status))
}

#[cfg(unix)]
fn signal_exit_code(status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;
    status.signal().map_or(-1, |signal| -signal)
}

#[cfg(not(unix))]
fn signal_exit_code(_status: ExitStatus) -> i32 {
    -1
}

#[cfg(all(test, unix))]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    /// `/bin/sh` as the subject: case sources are shell scripts.
    fn sh() -> ProcessSubject {
        ProcessSubject::new("/bin/sh")
    }

    fn script(dir: &TempDir, name: &str, body: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn test_captures_stdout_stderr_and_exit_code() {
        let tmp = TempDir::new().unwrap();
        let source = script(&tmp, "mixed.jl", "printf out; printf err >&2; exit 3\n");

        let result = sh().run(&source, None).unwrap();
        assert_eq!(result.stdout, b"out");
        assert_eq!(result.stderr, b"err");
        assert_eq!(result.exit_code, 3);
    }

    #[test]
    fn test_pipes_input_to_stdin() {
        let tmp = TempDir::new().unwrap();
        let source = script(&tmp, "add.jl", "read a b\necho $((a + b))\n");

        let result = sh().run(&source, Some(b"2 3\n")).unwrap();
        assert_eq!(result.stdout, b"5\n");
        assert_eq!(result.exit_code, 0);
    }

    #[test]
    fn test_no_input_means_empty_stdin() {
        let tmp = TempDir::new().unwrap();
        let source = script(&tmp, "count.jl", "wc -c | tr -d ' '\n");

        let result = sh().run(&source, None).unwrap();
        assert_eq!(result.stdout, b"0\n");
    }

    #[test]
    fn test_large_input_and_output_do_not_deadlock() {
        let tmp = TempDir::new().unwrap();
        let source = script(&tmp, "echo.jl", "cat\n");
        let input = vec![b'x'; 1 << 20];

        let result = sh().run(&source, Some(&input)).unwrap();
        assert_eq!(result.stdout.len(), input.len());
    }

    #[test]
    fn test_subject_ignoring_input_is_not_an_error() {
        let tmp = TempDir::new().unwrap();
        let source = script(&tmp, "quit.jl", "exit 0\n");
        let input = vec![b'x'; 1 << 20];

        let result = sh().run(&source, Some(&input)).unwrap();
        assert_eq!(result.exit_code, 0);
    }

    #[test]
    fn test_signal_is_negative_exit_code() {
        let tmp = TempDir::new().unwrap();
        let source = script(&tmp, "killed.jl", "kill -9 $$\n");

        let result = sh().run(&source, None).unwrap();
        assert_eq!(result.exit_code, -9);
    }

    #[test]
    fn test_missing_program_is_launch_error() {
        let tmp = TempDir::new().unwrap();
        let source = script(&tmp, "any.jl", "");
        let subject = ProcessSubject::new(tmp.path().join("no-such-interpreter"));

        let err = subject.run(&source, None).unwrap_err();
        assert!(matches!(err, SubjectError::Launch { .. }));
    }
}
