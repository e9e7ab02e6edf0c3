use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PrinterRecord {
	pub name: String,
	pub status: PrinterStatus,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PrinterStatus {
	Idle,
	Busy,
}

impl PrinterStatus {
	pub fn is_idle(&self) -> bool {
		matches!(self, PrinterStatus::Idle)
	}
}

/// A queued job as reported by the print daemon. All fields are textual
/// projections of `lpstat -o` output; nothing here is authoritative.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PrintJobRecord {
	pub id: String,
	pub printer: String,
	pub user: String,
	pub size: String,
	pub status: String,
}

/// Outcome of one external command invocation. Failure (non-zero exit,
/// timeout, unspawnable binary) is a value, never an error.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandResult {
	pub success: bool,
	pub stdout: String,
	pub stderr: String,
}

impl CommandResult {
	pub fn failure(message: impl Into<String>) -> Self {
		Self {
			success: false,
			stdout: String::new(),
			stderr: message.into(),
		}
	}

	pub fn ok(stdout: impl Into<String>) -> Self {
		Self {
			success: true,
			stdout: stdout.into(),
			stderr: String::new(),
		}
	}
}
