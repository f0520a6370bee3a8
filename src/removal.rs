//! Confirmation and execution of state removals.

use std::io::{self, BufRead, Write};

use crate::terraform::{StateError, TerraformCli};

/// Runtime options for the removal loop, passed in explicitly rather than
/// read from ambient state.
#[derive(Debug, Clone, Copy, Default)]
pub struct RemovalConfig {
    /// Skip the per-resource confirmation prompt.
    pub force: bool,
}

/// Outcome of interpreting one line of operator input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Confirmed,
    Denied,
    Invalid,
}

/// Interpret a confirmation answer. Only the exact strings `y` and `n`
/// (after trimming surrounding whitespace) advance the prompt; anything
/// else re-prompts.
pub fn parse_answer(line: &str) -> Answer {
    match line.trim() {
        "y" => Answer::Confirmed,
        "n" => Answer::Denied,
        _ => Answer::Invalid,
    }
}

/// Detaches one resource address from the Terraform state.
pub trait StateRemover {
    fn remove(&self, address: &str) -> Result<(), StateError>;

    /// The command line `remove` runs, announced before execution.
    fn describe(&self, address: &str) -> String;
}

impl StateRemover for TerraformCli {
    fn remove(&self, address: &str) -> Result<(), StateError> {
        self.state_rm(address)
    }

    fn describe(&self, address: &str) -> String {
        self.render_command(&["state", "rm", address])
    }
}

/// Walks the selected addresses, confirming and removing each in turn.
pub struct RemovalExecutor<'a, R> {
    remover: &'a R,
    config: RemovalConfig,
}

impl<'a, R: StateRemover> RemovalExecutor<'a, R> {
    pub fn new(remover: &'a R, config: RemovalConfig) -> Self {
        Self { remover, config }
    }

    /// Process every selected address. A failed removal is reported and the
    /// loop moves on to the next address; an empty selection is a no-op.
    ///
    /// Input and output are capability parameters so the confirmation loop
    /// runs against any reader and writer, not just a terminal.
    pub fn run<I: BufRead, O: Write>(
        &self,
        addresses: &[String],
        mut input: I,
        mut output: O,
    ) -> io::Result<()> {
        for address in addresses {
            if !self.confirm(address, &mut input, &mut output)? {
                continue;
            }
            writeln!(output, "Executing: {}", self.remover.describe(address))?;
            output.flush()?;
            if let Err(err) = self.remover.remove(address) {
                tracing::warn!(resource = %address, error = %err, "state removal failed");
            }
        }
        Ok(())
    }

    fn confirm<I: BufRead, O: Write>(
        &self,
        address: &str,
        input: &mut I,
        output: &mut O,
    ) -> io::Result<bool> {
        if self.config.force {
            return Ok(true);
        }
        loop {
            writeln!(output, "Remove {address} from terraform state? [y/n]")?;
            output.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "input closed while awaiting confirmation",
                ));
            }
            match parse_answer(&line) {
                Answer::Confirmed => return Ok(true),
                Answer::Denied => return Ok(false),
                Answer::Invalid => {
                    writeln!(output, "Invalid selection. Please select [y/n]")?;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct FakeRemover {
        calls: RefCell<Vec<String>>,
        fail_on: Option<String>,
    }

    impl FakeRemover {
        fn new() -> Self {
            Self {
                calls: RefCell::new(Vec::new()),
                fail_on: None,
            }
        }

        fn failing_on(address: &str) -> Self {
            Self {
                calls: RefCell::new(Vec::new()),
                fail_on: Some(address.to_string()),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }
    }

    impl StateRemover for FakeRemover {
        fn remove(&self, address: &str) -> Result<(), StateError> {
            self.calls.borrow_mut().push(address.to_string());
            if self.fail_on.as_deref() == Some(address) {
                return Err(StateError::Failed {
                    command: format!("terraform state rm {address}"),
                    stderr: "state is locked".to_string(),
                });
            }
            Ok(())
        }

        fn describe(&self, address: &str) -> String {
            format!("terraform state rm {address}")
        }
    }

    fn addresses(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    fn run(
        remover: &FakeRemover,
        config: RemovalConfig,
        selected: &[&str],
        input: &str,
    ) -> io::Result<String> {
        let executor = RemovalExecutor::new(remover, config);
        let mut output = Vec::new();
        executor.run(&addresses(selected), input.as_bytes(), &mut output)?;
        Ok(String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_parse_answer_accepts_exactly_y_and_n() {
        assert_eq!(parse_answer("y\n"), Answer::Confirmed);
        assert_eq!(parse_answer("  y  "), Answer::Confirmed);
        assert_eq!(parse_answer("n\n"), Answer::Denied);
        assert_eq!(parse_answer("Y"), Answer::Invalid);
        assert_eq!(parse_answer("N"), Answer::Invalid);
        assert_eq!(parse_answer("yes"), Answer::Invalid);
        assert_eq!(parse_answer(""), Answer::Invalid);
    }

    #[test]
    fn test_confirmed_removal_is_announced_and_executed() {
        let remover = FakeRemover::new();
        let output = run(
            &remover,
            RemovalConfig::default(),
            &["aws_s3_bucket.logs"],
            "y\n",
        )
        .unwrap();

        assert_eq!(remover.calls(), vec!["aws_s3_bucket.logs"]);
        assert!(output.contains("Remove aws_s3_bucket.logs from terraform state? [y/n]"));
        assert!(output.contains("Executing: terraform state rm aws_s3_bucket.logs"));
    }

    #[test]
    fn test_denied_removal_is_skipped() {
        let remover = FakeRemover::new();
        let output = run(
            &remover,
            RemovalConfig::default(),
            &["aws_s3_bucket.logs", "aws_instance.web"],
            "n\ny\n",
        )
        .unwrap();

        assert_eq!(remover.calls(), vec!["aws_instance.web"]);
        assert!(!output.contains("Executing: terraform state rm aws_s3_bucket.logs"));
        assert!(output.contains("Executing: terraform state rm aws_instance.web"));
    }

    #[test]
    fn test_invalid_answers_reprompt_without_advancing() {
        let remover = FakeRemover::new();
        let output = run(
            &remover,
            RemovalConfig::default(),
            &["aws_instance.web"],
            "maybe\nYes\ny\n",
        )
        .unwrap();

        assert_eq!(remover.calls(), vec!["aws_instance.web"]);
        assert_eq!(
            output
                .matches("Remove aws_instance.web from terraform state? [y/n]")
                .count(),
            3
        );
        assert_eq!(
            output.matches("Invalid selection. Please select [y/n]").count(),
            2
        );
    }

    #[test]
    fn test_force_mode_never_prompts() {
        let remover = FakeRemover::new();
        let output = run(
            &remover,
            RemovalConfig { force: true },
            &["aws_s3_bucket.logs", "aws_instance.web"],
            "",
        )
        .unwrap();

        assert_eq!(remover.calls(), vec!["aws_s3_bucket.logs", "aws_instance.web"]);
        assert!(!output.contains("[y/n]"));
        assert_eq!(output.matches("Executing:").count(), 2);
    }

    #[test]
    fn test_one_failure_does_not_stop_the_loop() {
        let remover = FakeRemover::failing_on("aws_s3_bucket.logs");
        run(
            &remover,
            RemovalConfig { force: true },
            &["aws_s3_bucket.logs", "aws_instance.web"],
            "",
        )
        .unwrap();

        assert_eq!(remover.calls(), vec!["aws_s3_bucket.logs", "aws_instance.web"]);
    }

    #[test]
    fn test_empty_selection_is_a_noop() {
        let remover = FakeRemover::new();
        let output = run(&remover, RemovalConfig::default(), &[], "").unwrap();
        assert!(remover.calls().is_empty());
        assert!(output.is_empty());
    }

    #[test]
    fn test_eof_while_awaiting_confirmation_is_an_error() {
        let remover = FakeRemover::new();
        let err = run(
            &remover,
            RemovalConfig::default(),
            &["aws_instance.web"],
            "",
        )
        .unwrap_err();

        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
        assert!(remover.calls().is_empty());
    }
}
