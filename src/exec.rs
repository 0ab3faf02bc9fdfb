//! External command execution.
//!
//! Packaging and deployment lean on system binaries (`tar`, `scp`, `ssh`)
//! instead of reimplementing archive formats and transport. This module is
//! the one place a child process is spawned: a small builder that captures
//! output and turns a non-zero exit into an error carrying the command's
//! stderr.

use std::process::{Command, Output};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExecError {
    #[error("failed to run `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("`{program}` exited with {status}: {stderr}")]
    Failed {
        program: String,
        status: std::process::ExitStatus,
        stderr: String,
    },
}

/// Command builder for external process execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cmd {
    program: String,
    args: Vec<String>,
}

impl Cmd {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Build from a full argv, program first. Panics on an empty argv;
    /// plans are assembled in-crate and always carry a program.
    pub fn from_argv(argv: &[String]) -> Self {
        let (program, args) = argv.split_first().expect("argv must not be empty");
        Self {
            program: program.clone(),
            args: args.to_vec(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Run to completion, capturing output. Non-zero exit is an error.
    pub fn run(&self) -> Result<Output, ExecError> {
        let output = Command::new(&self.program)
            .args(&self.args)
            .output()
            .map_err(|source| ExecError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(ExecError::Failed {
                program: self.program.clone(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_collects_args() {
        let cmd = Cmd::new("echo").arg("hello").args(["wide", "world"]);
        assert_eq!(cmd.program, "echo");
        assert_eq!(cmd.args, vec!["hello", "wide", "world"]);
    }

    #[test]
    fn from_argv_splits_program() {
        let argv: Vec<String> = ["tar", "-czf", "out.tar.gz"]
            .into_iter()
            .map(String::from)
            .collect();
        let cmd = Cmd::from_argv(&argv);
        assert_eq!(cmd, Cmd::new("tar").args(["-czf", "out.tar.gz"]));
    }

    #[test]
    fn run_captures_stdout() {
        let output = Cmd::new("echo").arg("hello").run().unwrap();
        assert!(String::from_utf8_lossy(&output.stdout).contains("hello"));
    }

    #[test]
    fn missing_program_is_spawn_error() {
        let result = Cmd::new("definitely-not-a-real-binary").run();
        assert!(matches!(result, Err(ExecError::Spawn { .. })));
    }

    #[test]
    fn nonzero_exit_is_failed_error() {
        let result = Cmd::new("cat").arg("/nonexistent/path").run();
        match result {
            Err(ExecError::Failed { stderr, .. }) => assert!(!stderr.is_empty()),
            other => panic!("expected Failed, got {other:?}"),
        }
    }
}
