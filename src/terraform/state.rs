//! Invocations of the terraform binary's `state` subcommands.

use std::io;
use std::path::PathBuf;
use std::process::{Command, ExitStatus, Stdio};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StateError {
    #[error("failed to invoke `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("`{command}` failed: {stderr}")]
    Failed { command: String, stderr: String },

    #[error("`{command}` exited with {status}")]
    Exited { command: String, status: ExitStatus },
}

/// Thin client around the terraform binary. Commands are spawned with a
/// direct argument vector, so resource addresses are never interpreted by a
/// shell.
#[derive(Debug, Clone)]
pub struct TerraformCli {
    binary: PathBuf,
    working_dir: PathBuf,
}

impl TerraformCli {
    pub fn new(binary: impl Into<PathBuf>, working_dir: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            working_dir: working_dir.into(),
        }
    }

    /// Enumerate the resource addresses tracked in the state, one trimmed
    /// address per non-empty line of `terraform state list` output.
    pub fn state_list(&self) -> Result<Vec<String>, StateError> {
        let command = self.render_command(&["state", "list"]);
        let output = self
            .command(&["state", "list"])
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|source| StateError::Spawn {
                command: command.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(StateError::Failed {
                command,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let addresses = String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
        Ok(addresses)
    }

    /// Remove one resource address from the state. Terraform's own output
    /// goes straight to the operator's terminal; a non-zero exit is returned
    /// as an error for the caller to report.
    pub fn state_rm(&self, address: &str) -> Result<(), StateError> {
        let command = self.render_command(&["state", "rm", address]);
        let status = self
            .command(&["state", "rm", address])
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|source| StateError::Spawn {
                command: command.clone(),
                source,
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(StateError::Exited { command, status })
        }
    }

    /// Render an invocation as a printable command line, for announcing
    /// before execution.
    pub fn render_command(&self, args: &[&str]) -> String {
        let mut rendered = self.binary.display().to_string();
        for arg in args {
            rendered.push(' ');
            rendered.push_str(arg);
        }
        rendered
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut command = Command::new(&self.binary);
        command.args(args).current_dir(&self.working_dir);
        command
    }
}
