//! External command execution. Every OS interaction in the codebase goes
//! through the [`CommandExec`] trait defined here.

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;

use crate::types::CommandResult;

/// Bound on any external command invocation.
pub const COMMAND_TIMEOUT: Duration = Duration::from_secs(30);

#[async_trait]
pub trait CommandExec: Send + Sync {
	async fn run(&self, argv: &[String]) -> CommandResult;

	/// Run a full shell line via `sh -c`. This is the only place shell
	/// interpretation happens; interpolated values must go through
	/// [`sh_quote`]. Trust boundary.
	async fn run_shell(&self, line: &str) -> CommandResult {
		self.run(&argv(&["sh", "-c", line])).await
	}
}

pub struct OsRunner {
	timeout: Duration,
}

impl OsRunner {
	pub fn new() -> Self {
		Self { timeout: COMMAND_TIMEOUT }
	}

	pub fn with_timeout(timeout: Duration) -> Self {
		Self { timeout }
	}
}

impl Default for OsRunner {
	fn default() -> Self {
		Self::new()
	}
}

#[async_trait]
impl CommandExec for OsRunner {
	async fn run(&self, argv: &[String]) -> CommandResult {
		let Some((program, args)) = argv.split_first() else {
			return CommandResult::failure("empty command");
		};

		let mut cmd = Command::new(program);
		cmd.args(args).stdin(Stdio::null()).kill_on_drop(true);

		match tokio::time::timeout(self.timeout, cmd.output()).await {
			Ok(Ok(output)) => CommandResult {
				success: output.status.success(),
				stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
				stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
			},
			Ok(Err(e)) => {
				tracing::debug!("{}: {}", program, e);
				CommandResult::failure(e.to_string())
			}
			Err(_) => {
				tracing::warn!("{}: no result after {}s", program, self.timeout.as_secs());
				CommandResult::failure("Command timeout")
			}
		}
	}
}

pub fn argv(words: &[&str]) -> Vec<String> {
	words.iter().map(|w| w.to_string()).collect()
}

/// Single-quote a value for interpolation into a `run_shell` line.
pub fn sh_quote(value: &str) -> String {
	format!("'{}'", value.replace('\'', "'\\''"))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn quote_plain_word() {
		assert_eq!(sh_quote("alice"), "'alice'");
	}

	#[test]
	fn quote_embedded_single_quote() {
		assert_eq!(sh_quote("o'brien"), "'o'\\''brien'");
	}

	#[test]
	fn argv_builds_owned_vector() {
		assert_eq!(argv(&["lpstat", "-p"]), vec!["lpstat".to_string(), "-p".to_string()]);
	}
}
