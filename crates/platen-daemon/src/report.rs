//! Point-in-time projections of daemon and system state. Nothing is cached;
//! every call re-runs the underlying tools.

use std::time::{SystemTime, UNIX_EPOCH};

use platen_core::{argv, parse, CommandExec, PrintJobRecord, PrinterRecord};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct StatusReport {
	pub status: &'static str,
	pub cups_daemon: bool,
	pub management_api: bool,
	pub timestamp: u64,
}

pub async fn status(runner: &dyn CommandExec) -> StatusReport {
	let cups = runner.run(&argv(&["pgrep", "cupsd"])).await;
	StatusReport {
		status: "running",
		cups_daemon: cups.success,
		management_api: true,
		timestamp: epoch_secs(),
	}
}

pub async fn printers(runner: &dyn CommandExec) -> Vec<PrinterRecord> {
	let result = runner.run(&argv(&["lpstat", "-p"])).await;
	if !result.success {
		return Vec::new();
	}
	parse::parse_printers(&result.stdout)
}

pub async fn jobs(runner: &dyn CommandExec) -> Vec<PrintJobRecord> {
	let result = runner.run(&argv(&["lpstat", "-o"])).await;
	if !result.success {
		return Vec::new();
	}
	parse::parse_jobs(&result.stdout)
}

const LOG_SOURCES: &[(&str, &[&str])] = &[
	("cups error_log", &["tail", "-n", "40", "/var/log/cups/error_log"]),
	("cups access_log", &["tail", "-n", "40", "/var/log/cups/access_log"]),
	("system journal", &["journalctl", "-n", "40", "--no-pager"]),
];

pub async fn logs(runner: &dyn CommandExec) -> String {
	concat_sources(runner, LOG_SOURCES).await
}

const SYSTEM_SOURCES: &[(&str, &[&str])] = &[
	("uptime", &["uptime"]),
	("memory", &["free", "-m"]),
	("disk", &["df", "-h"]),
	("printing", &["lpstat", "-t"]),
];

pub async fn system_info(runner: &dyn CommandExec) -> String {
	concat_sources(runner, SYSTEM_SOURCES).await
}

async fn concat_sources(runner: &dyn CommandExec, sources: &[(&str, &[&str])]) -> String {
	let mut out = String::new();
	for (label, cmd) in sources {
		if !out.is_empty() {
			out.push('\n');
		}
		out.push_str(&format!("--- {} ---\n", label));
		let result = runner.run(&argv(cmd)).await;
		if result.success {
			out.push_str(&result.stdout);
		} else {
			out.push_str(&format!("{} unavailable: {}\n", label, result.stderr.trim()));
		}
	}
	out
}

fn epoch_secs() -> u64 {
	SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.map(|d| d.as_secs())
		.unwrap_or(0)
}
