pub mod command;
pub mod config;
pub mod parse;
pub mod types;

pub use command::{argv, sh_quote, CommandExec, OsRunner, COMMAND_TIMEOUT};
pub use config::AddonConfig;
pub use types::{CommandResult, PrintJobRecord, PrinterRecord, PrinterStatus};
