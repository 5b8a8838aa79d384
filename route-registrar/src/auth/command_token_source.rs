use std::process::Command;

use itertools::Itertools;

use super::{AccessToken, TokenSource};
use crate::error::RouteRegistrationError;

/// runs an external command (by default
/// `gcloud auth application-default print-access-token`) and reads the
/// token from its stdout.
#[derive(Clone, Debug)]
pub struct CommandTokenSource {
    program: String,
    args: Vec<String>,
}

impl CommandTokenSource {
    /// splits a command line on whitespace into program and arguments.
    pub fn new(command: &str) -> Result<Self, RouteRegistrationError> {
        let mut parts = command.split_whitespace().map(String::from);
        let program = parts.next().ok_or_else(|| {
            RouteRegistrationError::InvalidConfig(String::from("auth command is empty"))
        })?;
        Ok(Self {
            program,
            args: parts.collect_vec(),
        })
    }

    fn command_line(&self) -> String {
        std::iter::once(&self.program).chain(&self.args).join(" ")
    }
}

impl TokenSource for CommandTokenSource {
    fn fetch_token(&self) -> Result<AccessToken, RouteRegistrationError> {
        let output = Command::new(&self.program)
            .args(&self.args)
            .output()
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => RouteRegistrationError::TokenGenerationError(
                    format!(
                        "'{}' command not found. ensure it is installed and on your PATH",
                        self.program
                    ),
                ),
                _ => RouteRegistrationError::TokenGenerationError(format!(
                    "failed to run '{}': {e}",
                    self.command_line()
                )),
            })?;

        if !output.status.success() {
            let code = output
                .status
                .code()
                .map(|c| c.to_string())
                .unwrap_or_else(|| String::from("<terminated by signal>"));
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(RouteRegistrationError::TokenGenerationError(format!(
                "'{}' failed with return code {code}. stderr: {}",
                self.command_line(),
                stderr.trim()
            )));
        }

        let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if token.is_empty() {
            return Err(RouteRegistrationError::TokenGenerationError(format!(
                "'{}' ran but produced an empty token",
                self.command_line()
            )));
        }
        Ok(AccessToken::new(token))
    }

    fn describe(&self) -> String {
        self.command_line()
    }
}
