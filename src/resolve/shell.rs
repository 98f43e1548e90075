//! Shell command runner for variable resolution.
//!
//! Each variable command is handed to a shell as a single argument
//! (`sh -c "<command>"` by default) so pipes, `$(...)` and quoting behave as
//! written in the config. Stdout and stderr are captured and trimmed.

use crate::env::CommandEnv;
use crate::error::{DraftError, Result};
use std::fmt;
use std::io::ErrorKind;
use std::process::{Command, Stdio};

/// Sentinel prefix for commands that ran and exited non-zero.
pub const EXEC_ERROR_SENTINEL: &str = "ERROR_EXECUTING_COMMAND";

/// Sentinel for commands whose executable could not be found.
pub const NOT_FOUND_SENTINEL: &str = "ERROR_COMMAND_NOT_FOUND";

/// Exit status a shell reports when the command itself does not exist.
#[cfg(not(windows))]
const SHELL_NOT_FOUND_CODES: &[i32] = &[127];
#[cfg(windows)]
const SHELL_NOT_FOUND_CODES: &[i32] = &[9009];

/// Why a variable command failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandFailure {
    /// The command ran and exited with a non-zero status (or was killed).
    NonZeroExit {
        /// Exit code, `None` if terminated by a signal.
        code: Option<i32>,
        /// Trimmed stderr.
        stderr: String,
    },
    /// The command (or the shell) could not be found.
    NotFound {
        /// Shell diagnostics or the spawn error.
        detail: String,
    },
    /// The shell could not be started for another reason (not executable,
    /// wrong format). Renders like `NotFound`: nothing ran.
    Spawn {
        /// The spawn error.
        detail: String,
    },
}

impl CommandFailure {
    /// The string placed in the rendering context in place of a value.
    ///
    /// Always starts with `ERROR_` so it cannot be mistaken for real output.
    pub fn sentinel(&self) -> String {
        match self {
            CommandFailure::NonZeroExit { code, stderr } => {
                if stderr.is_empty() {
                    format!("{}: {}", EXEC_ERROR_SENTINEL, describe_code(*code))
                } else {
                    format!("{}: {}", EXEC_ERROR_SENTINEL, stderr)
                }
            }
            CommandFailure::NotFound { .. } | CommandFailure::Spawn { .. } => {
                NOT_FOUND_SENTINEL.to_string()
            }
        }
    }
}

impl fmt::Display for CommandFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandFailure::NonZeroExit { code, stderr } if stderr.is_empty() => {
                write!(f, "command failed ({})", describe_code(*code))
            }
            CommandFailure::NonZeroExit { code, stderr } => {
                write!(f, "command failed ({}): {}", describe_code(*code), stderr)
            }
            CommandFailure::NotFound { detail } => write!(f, "command not found: {}", detail),
            CommandFailure::Spawn { detail } => write!(f, "failed to start shell: {}", detail),
        }
    }
}

fn describe_code(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "terminated by signal".to_string(),
    }
}

/// The shell used to run variable commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shell {
    program: String,
    args: Vec<String>,
}

impl Shell {
    /// The platform shell: `sh -c` on Unix, `cmd /C` on Windows.
    pub fn system() -> Self {
        #[cfg(windows)]
        let (program, args) = ("cmd", vec!["/C".to_string()]);
        #[cfg(not(windows))]
        let (program, args) = ("sh", vec!["-c".to_string()]);

        Self {
            program: program.to_string(),
            args,
        }
    }

    /// Parse a shell prefix such as `bash -eo pipefail -c`.
    ///
    /// The command string is appended as the final argument when run.
    pub fn parse(spec: &str) -> Result<Self> {
        let mut words = shell_words::split(spec).map_err(|e| {
            DraftError::Config(format!(
                "failed to parse shell '{}': {}\n\
                 Fix: check for unmatched quotes or invalid escape sequences.",
                spec, e
            ))
        })?;

        if words.is_empty() {
            return Err(DraftError::Config(format!(
                "shell is empty after parsing: '{}'",
                spec
            )));
        }

        let program = words.remove(0);
        Ok(Self {
            program,
            args: words,
        })
    }

    /// The configured shell, or the system shell when none is configured.
    pub fn from_config(spec: Option<&str>) -> Result<Self> {
        match spec {
            Some(spec) => Self::parse(spec),
            None => Ok(Self::system()),
        }
    }

    /// The shell prefix as a single command line.
    pub fn command_line(&self) -> String {
        let mut words = Vec::with_capacity(self.args.len() + 1);
        words.push(self.program.as_str());
        words.extend(self.args.iter().map(String::as_str));
        shell_words::join(words)
    }

    /// Run `command` with exactly the variables in `env`.
    ///
    /// Blocks until the command exits; there is no timeout.
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - Trimmed stdout on exit code 0
    /// * `Err(CommandFailure)` - Non-zero exit, missing command, or spawn failure
    pub fn run(
        &self,
        command: &str,
        env: &CommandEnv,
    ) -> std::result::Result<String, CommandFailure> {
        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(command)
            .env_clear()
            .envs(env.iter())
            .stdin(Stdio::null())
            .output()
            .map_err(|e| {
                let detail = format!("{}: {}", self.program, e);
                if e.kind() == ErrorKind::NotFound {
                    CommandFailure::NotFound { detail }
                } else {
                    CommandFailure::Spawn { detail }
                }
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();

        if output.status.success() {
            return Ok(stdout);
        }

        match output.status.code() {
            Some(code) if SHELL_NOT_FOUND_CODES.contains(&code) => {
                Err(CommandFailure::NotFound { detail: stderr })
            }
            code => Err(CommandFailure::NonZeroExit { code, stderr }),
        }
    }
}

impl Default for Shell {
    fn default() -> Self {
        Self::system()
    }
}
