//! Git command runner.
//!
//! Every git invocation made by the sync tool goes through the [`GitRunner`]
//! trait. Inspection commands (status, rev-list, ls-remote, ...) use
//! [`GitRunner::run`], which never fails: a non-zero exit simply comes back
//! in [`GitOutput::code`] and callers treat it as "unknown". Commands that
//! must succeed use [`GitRunner::run_checked`], which maps a non-zero exit to
//! [`ToolError::GitError`].

use crate::error::{Result, ToolError};
use std::path::Path;
use std::process::{Command, Output};

/// Captured result of a git command, successful or not.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GitOutput {
    /// Process exit code, `None` if git could not be spawned or was killed.
    pub code: Option<i32>,
    /// Standard output from the command (trimmed).
    pub stdout: String,
    /// Standard error from the command (trimmed).
    pub stderr: String,
}

impl GitOutput {
    /// Create a new GitOutput from raw output bytes.
    fn from_output(output: &Output) -> Self {
        Self {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        }
    }

    /// Output for a git process that could not be started at all.
    pub fn spawn_failure(message: impl Into<String>) -> Self {
        Self {
            code: None,
            stdout: String::new(),
            stderr: message.into(),
        }
    }

    /// Returns true if the command exited with status 0.
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Returns true if stdout is empty.
    pub fn is_empty(&self) -> bool {
        self.stdout.is_empty()
    }

    /// Returns stdout lines as a vector.
    pub fn lines(&self) -> Vec<&str> {
        if self.stdout.is_empty() {
            Vec::new()
        } else {
            self.stdout.lines().collect()
        }
    }

    /// Best error text for a failed command: stderr, else stdout.
    pub fn error_text(&self) -> &str {
        if self.stderr.is_empty() {
            &self.stdout
        } else {
            &self.stderr
        }
    }
}

/// Narrow interface over the git command-line tool.
pub trait GitRunner {
    /// Run `git <args>` in `cwd` and capture its output. Never fails.
    fn run(&self, cwd: &Path, args: &[&str]) -> GitOutput;

    /// Run `git <args>` in `cwd`, turning a non-zero exit into an error.
    fn run_checked(&self, cwd: &Path, args: &[&str]) -> Result<GitOutput> {
        let output = self.run(cwd, args);
        if output.success() {
            return Ok(output);
        }

        let exit_code = output
            .code
            .map(|c| c.to_string())
            .unwrap_or_else(|| "none".to_string());
        Err(ToolError::GitError(format!(
            "git {} failed (exit code {}): {}",
            args.first().unwrap_or(&""),
            exit_code,
            output.error_text()
        )))
    }
}

/// [`GitRunner`] backed by the `git` executable on `PATH`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemGit;

impl GitRunner for SystemGit {
    fn run(&self, cwd: &Path, args: &[&str]) -> GitOutput {
        tracing::debug!(cwd = %cwd.display(), "git {}", args.join(" "));

        let output = Command::new("git")
            .current_dir(cwd)
            .args(args)
            // Never block on an interactive credential prompt.
            .env("GIT_TERMINAL_PROMPT", "0")
            .output();

        match output {
            Ok(output) => {
                let git_output = GitOutput::from_output(&output);
                if !git_output.success() {
                    tracing::debug!(
                        code = ?git_output.code,
                        stderr = %git_output.stderr,
                        "git {} exited non-zero",
                        args.first().unwrap_or(&"")
                    );
                }
                git_output
            }
            Err(e) => GitOutput::spawn_failure(format!(
                "failed to execute git {}: {} (is git installed?)",
                args.first().unwrap_or(&""),
                e
            )),
        }
    }
}

/// Render a git command line for display, quoting arguments as a shell would.
pub fn display_command(cwd: Option<&Path>, args: &[&str]) -> String {
    let mut words: Vec<String> = vec!["git".to_string()];
    if let Some(cwd) = cwd {
        words.push("-C".to_string());
        words.push(cwd.display().to_string());
    }
    words.extend(args.iter().map(|a| a.to_string()));
    shell_words::join(words)
}
