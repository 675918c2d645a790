//! Runner configuration and the fixed suite layout
//!
//! The directory and file naming conventions are not configurable; only the subject, the suite root and the
//! source extension vary between runs.

use std::path::PathBuf;

/// Suite of flat good cases under the root.
pub const GOOD_DIR: &str = "good";
/// Suite of flat bad cases under the root.
pub const BAD_DIR: &str = "bad";
/// Directory whose subdirectories are additional good suites.
pub const EXTENSIONS_DIR: &str = "extensions";

/// Extension of the expected-output fixture of a good case.
pub const OUTPUT_EXTENSION: &str = "output";
/// Extension of the optional stdin fixture of a good case.
pub const INPUT_EXTENSION: &str = "input";
/// Extension of case sources unless overridden.
pub const DEFAULT_SOURCE_EXTENSION: &str = "jl";

/// Exit code the subject uses to reject a program.
pub const REJECTED_EXIT_CODE: i32 = 1;

/// Runner configuration
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Executable under test
    pub subject: PathBuf,
    /// Directory containing the suite directories
    pub root: PathBuf,
    /// Extension of case source files (without the dot)
    pub source_extension: String,
    /// Print expected/actual output of failing good cases to stderr
    pub verbose: bool,
}

impl RunnerConfig {
    /// Create a config for `subject` rooted at `root`, with default settings otherwise
    pub fn new(subject: impl Into<PathBuf>, root: impl Into<PathBuf>) -> Self {
        Self {
            subject: subject.into(),
            root: root.into(),
            source_extension: DEFAULT_SOURCE_EXTENSION.to_string(),
            verbose: false,
        }
    }

    /// Set the source file extension. A leading dot is ignored.
    pub fn with_source_extension(mut self, extension: impl Into<String>) -> Self {
        let extension = extension.into();
        self.source_extension = extension.strip_prefix('.').map(str::to_string).unwrap_or(extension);
        self
    }

    /// Enable or disable verbose failure details
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn good_dir(&self) -> PathBuf {
        self.root.join(GOOD_DIR)
    }

    pub fn bad_dir(&self) -> PathBuf {
        self.root.join(BAD_DIR)
    }

    pub fn extensions_dir(&self) -> PathBuf {
        self.root.join(EXTENSIONS_DIR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_new_uses_default_extension() {
        let config = RunnerConfig::new("./interp", "suites");
        assert_eq!(config.source_extension, "jl");
        assert!(!config.verbose);
    }

    #[test]
    fn test_with_source_extension_strips_dot() {
        let config = RunnerConfig::new("./interp", ".").with_source_extension(".lox");
        assert_eq!(config.source_extension, "lox");

        let config = RunnerConfig::new("./interp", ".").with_source_extension("py");
        assert_eq!(config.source_extension, "py");
    }

    #[test]
    fn test_suite_dirs_are_under_root() {
        let config = RunnerConfig::new("./interp", "/tmp/suites");
        assert_eq!(config.good_dir(), Path::new("/tmp/suites/good"));
        assert_eq!(config.bad_dir(), Path::new("/tmp/suites/bad"));
        assert_eq!(config.extensions_dir(), Path::new("/tmp/suites/extensions"));
    }

    #[test]
    fn test_with_verbose() {
        let config = RunnerConfig::new("./interp", ".").with_verbose(true);
        assert!(config.verbose);
        assert_eq!(config.subject, Path::new("./interp"));
    }
}
