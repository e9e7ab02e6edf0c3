//! Line scrapers for `lpstat` output. The format assumption lives entirely
//! in this module; output drift produces skipped or misaligned records, not
//! parse errors.

use crate::types::{PrintJobRecord, PrinterRecord, PrinterStatus};

/// One record per `lpstat -p` line that starts with `printer`. The second
/// whitespace token is the name; `idle` anywhere in the line means idle.
pub fn parse_printers(output: &str) -> Vec<PrinterRecord> {
	let mut printers = Vec::new();
	for line in output.lines() {
		if !line.starts_with("printer") {
			continue;
		}
		let parts: Vec<&str> = line.split_whitespace().collect();
		if parts.len() < 2 {
			continue;
		}
		printers.push(PrinterRecord {
			name: parts[1].to_string(),
			status: if line.contains("idle") {
				PrinterStatus::Idle
			} else {
				PrinterStatus::Busy
			},
		});
	}
	printers
}

/// One record per non-blank `lpstat -o` line with at least four tokens:
/// `<printer>-<id> <user> <size> <status...>`.
pub fn parse_jobs(output: &str) -> Vec<PrintJobRecord> {
	let mut jobs = Vec::new();
	for line in output.lines() {
		if line.trim().is_empty() {
			continue;
		}
		let parts: Vec<&str> = line.split_whitespace().collect();
		if parts.len() < 4 {
			continue;
		}
		let (printer, id) = split_job_token(parts[0]);
		jobs.push(PrintJobRecord {
			id,
			printer,
			user: parts[1].to_string(),
			size: parts[2].to_string(),
			status: parts[3..].join(" "),
		});
	}
	jobs
}

/// `Office_Laser-103` → (`Office_Laser`, `103`): printer is the text before
/// the first hyphen, id the text after the last one. A token with no hyphen
/// is all id, printer unknown.
fn split_job_token(token: &str) -> (String, String) {
	if !token.contains('-') {
		return ("unknown".to_string(), token.to_string());
	}
	let printer = token.split('-').next().unwrap_or(token);
	let id = token.rsplit('-').next().unwrap_or(token);
	(printer.to_string(), id.to_string())
}

#[cfg(test)]
mod tests {
	use super::*;

	const LPSTAT_P: &str = "\
printer Office_Laser is idle.  enabled since Tue 14 Jan 2026 09:12:44
printer Label_Writer now printing Label_Writer-42.  enabled since Tue 14 Jan 2026 08:01:02
system default destination: Office_Laser
";

	#[test]
	fn printers_one_record_per_printer_line() {
		let printers = parse_printers(LPSTAT_P);
		assert_eq!(printers.len(), 2);
		assert_eq!(printers[0].name, "Office_Laser");
		assert_eq!(printers[1].name, "Label_Writer");
	}

	#[test]
	fn printer_status_follows_idle_substring() {
		let printers = parse_printers(LPSTAT_P);
		assert_eq!(printers[0].status, PrinterStatus::Idle);
		assert_eq!(printers[1].status, PrinterStatus::Busy);
	}

	#[test]
	fn printers_skip_short_lines() {
		assert!(parse_printers("printer\n").is_empty());
		assert!(parse_printers("").is_empty());
	}

	const LPSTAT_O: &str = "\
Office_Laser-103        alice           2048   Tue 14 Jan 2026 09:12:44 UTC
Label_Writer-42         bob             512    Tue 14 Jan 2026 08:01:02 UTC
";

	#[test]
	fn jobs_split_printer_and_id_on_hyphen() {
		let jobs = parse_jobs(LPSTAT_O);
		assert_eq!(jobs.len(), 2);
		assert_eq!(jobs[0].printer, "Office_Laser");
		assert_eq!(jobs[0].id, "103");
		assert_eq!(jobs[0].user, "alice");
		assert_eq!(jobs[0].size, "2048");
		assert_eq!(jobs[0].status, "Tue 14 Jan 2026 09:12:44 UTC");
	}

	#[test]
	fn job_token_without_hyphen_is_all_id() {
		let jobs = parse_jobs("103 alice 2048 pending\n");
		assert_eq!(jobs[0].printer, "unknown");
		assert_eq!(jobs[0].id, "103");
	}

	#[test]
	fn hyphenated_printer_name_keeps_first_segment() {
		// Office-Laser-103: printer is the text before the first hyphen,
		// id the text after the last one.
		let jobs = parse_jobs("Office-Laser-103 alice 2048 pending\n");
		assert_eq!(jobs[0].printer, "Office");
		assert_eq!(jobs[0].id, "103");
	}

	#[test]
	fn jobs_skip_blank_and_short_lines() {
		let jobs = parse_jobs("\n\nOffice_Laser-1 alice 10\n");
		assert!(jobs.is_empty());
	}

	#[test]
	fn job_status_joins_trailing_tokens() {
		let jobs = parse_jobs("p-1 u 9 held since morning\n");
		assert_eq!(jobs[0].status, "held since morning");
	}
}
