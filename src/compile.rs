//! External compiler invocation
//!
//! Rendering a document is delegated to the `pillar` executable. We only
//! build the command line, collect its standard output and report whether
//! it exited cleanly. The output file is replaced only after a clean exit.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::error::{PillarError, Result};

/// Export formats understood by the compiler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    Latex,
    #[default]
    Html,
    Markdown,
}

impl Format {
    /// Name passed to the compiler
    pub fn name(&self) -> &'static str {
        match self {
            Format::Latex => "latex",
            Format::Html => "html",
            Format::Markdown => "markdown",
        }
    }

    /// Parse a format name (case insensitive)
    pub fn from_name(name: &str) -> Result<Self> {
        match name.to_lowercase().as_str() {
            "latex" => Ok(Format::Latex),
            "html" => Ok(Format::Html),
            "markdown" => Ok(Format::Markdown),
            _ => Err(PillarError::UnknownFormat(name.to_string())),
        }
    }

    /// File extension of the exported document
    pub fn extension(&self) -> &'static str {
        match self {
            Format::Latex => "tex",
            Format::Html => "html",
            Format::Markdown => "md",
        }
    }
}

/// One run of the external compiler
#[derive(Debug, Clone)]
pub struct CompileJob {
    pub executable: String,
    pub input: PathBuf,
    pub output: PathBuf,
    pub format: Format,
}

impl CompileJob {
    /// Job writing next to `input`, with the format's extension
    pub fn new(executable: &str, input: &Path, format: Format) -> Self {
        Self {
            executable: executable.to_string(),
            input: input.to_path_buf(),
            output: input.with_extension(format.extension()),
            format,
        }
    }

    /// Builder: write to another output file
    pub fn output(mut self, output: &Path) -> Self {
        self.output = output.to_path_buf();
        self
    }

    /// Arguments passed to the executable
    pub fn args(&self) -> Vec<String> {
        vec![
            "export".to_string(),
            format!("--to={}", self.format.name()),
            self.input.to_string_lossy().into_owned(),
        ]
    }

    /// Whether the output path names the input document
    fn writes_over_input(&self) -> bool {
        if self.output == self.input {
            return true;
        }
        match (fs::canonicalize(&self.input), fs::canonicalize(&self.output)) {
            (Ok(input), Ok(output)) => input == output,
            _ => false,
        }
    }

    /// Run the compiler, blocking until it exits
    ///
    /// Standard output goes to a temporary file next to the output, which
    /// is renamed over it on success. A failed run leaves any previous
    /// output untouched.
    pub fn run(&self) -> Result<()> {
        if self.writes_over_input() {
            return Err(PillarError::OutputIsInput(self.output.clone()));
        }

        let dir = match self.output.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let staging = tempfile::NamedTempFile::new_in(dir)?;
        log::debug!(
            "running {} {:?} > {}",
            self.executable,
            self.args(),
            self.output.display()
        );

        let status = Command::new(&self.executable)
            .args(self.args())
            .stdin(Stdio::null())
            .stdout(staging.reopen()?)
            .status()?;

        if !status.success() {
            return Err(PillarError::Io(std::io::Error::other(format!(
                "{} exited with {status}",
                self.executable
            ))));
        }

        staging.persist(&self.output).map_err(|e| e.error)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_names() {
        for format in [Format::Latex, Format::Html, Format::Markdown] {
            assert_eq!(Format::from_name(format.name()).unwrap(), format);
        }
        assert_eq!(Format::from_name("HTML").unwrap(), Format::Html);
        assert!(matches!(
            Format::from_name("pdf"),
            Err(PillarError::UnknownFormat(name)) if name == "pdf"
        ));
    }

    #[test]
    fn test_job_paths_and_args() {
        let job = CompileJob::new("pillar", Path::new("book/intro.pillar"), Format::Latex);
        assert_eq!(job.output, PathBuf::from("book/intro.tex"));
        assert_eq!(job.args(), vec!["export", "--to=latex", "book/intro.pillar"]);

        let job = job.output(Path::new("out.tex"));
        assert_eq!(job.output, PathBuf::from("out.tex"));
    }

    #[test]
    fn test_missing_executable() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("doc.pillar");
        fs::write(&input, "!Title").unwrap();

        let job = CompileJob::new("pillar-mode-no-such-executable", &input, Format::Html);
        assert!(matches!(job.run(), Err(PillarError::Io(_))));
    }

    #[test]
    fn test_failed_run_keeps_previous_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("doc.pillar");
        let output = dir.path().join("doc.html");
        fs::write(&input, "!Title").unwrap();
        fs::write(&output, "previous export").unwrap();

        let job = CompileJob::new("pillar-mode-no-such-executable", &input, Format::Html);
        assert!(job.run().is_err());
        assert_eq!(fs::read_to_string(&output).unwrap(), "previous export");
        // no staging files left behind
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 2);
    }

    #[test]
    fn test_output_same_as_input_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("doc.html");
        fs::write(&input, "!Title").unwrap();

        // the default output swaps in the format's extension, here the same one
        let job = CompileJob::new("echo", &input, Format::Html);
        assert!(matches!(job.run(), Err(PillarError::OutputIsInput(_))));

        let job = CompileJob::new("echo", &input, Format::Latex)
            .output(&dir.path().join(".").join("doc.html"));
        assert!(matches!(job.run(), Err(PillarError::OutputIsInput(_))));
        assert_eq!(fs::read_to_string(&input).unwrap(), "!Title");
    }

    #[cfg(unix)]
    #[test]
    fn test_output_redirected() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("doc.pillar");
        let output = dir.path().join("doc.md");
        fs::write(&input, "!Title").unwrap();
        fs::write(&output, "stale").unwrap();

        // echo prints its arguments, standing in for the compiler
        let job = CompileJob::new("echo", &input, Format::Markdown);
        job.run().unwrap();

        let written = fs::read_to_string(&output).unwrap();
        assert!(written.starts_with("export --to=markdown "));
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_compiler_keeps_previous_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("doc.pillar");
        let output = dir.path().join("doc.tex");
        fs::write(&input, "!Title").unwrap();
        fs::write(&output, "previous export").unwrap();

        // `false` exits non-zero whatever its arguments
        let job = CompileJob::new("false", &input, Format::Latex);
        assert!(matches!(job.run(), Err(PillarError::Io(_))));
        assert_eq!(fs::read_to_string(&output).unwrap(), "previous export");
    }
}
