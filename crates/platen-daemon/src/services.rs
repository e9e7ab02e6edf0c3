use std::sync::Arc;
use std::time::Duration;

use platen_core::{argv, CommandExec};

/// Pause between the stop and start halves of a restart.
pub const RESTART_DELAY: Duration = Duration::from_secs(2);

const READINESS_ATTEMPTS: u32 = 10;
const READINESS_DELAY: Duration = Duration::from_millis(300);

const RUNTIME_DIRS: &[&str] = &["/run/dbus", "/run/avahi-daemon", "/run/cups"];

struct DaemonSpec {
	/// Process name as seen by pgrep/killall.
	name: &'static str,
	launch: &'static [&'static str],
}

/// Launch order: the bus first, then discovery, then the print daemon.
const START_ORDER: &[DaemonSpec] = &[
	DaemonSpec { name: "dbus-daemon", launch: &["dbus-daemon", "--system"] },
	DaemonSpec { name: "avahi-daemon", launch: &["avahi-daemon", "-D"] },
	DaemonSpec { name: "cupsd", launch: &["cupsd"] },
];

/// Stop order: the print daemon and discovery. The bus stays up; other
/// system services share it.
const STOP_ORDER: &[&str] = &["cupsd", "avahi-daemon"];

pub struct ServiceController {
	runner: Arc<dyn CommandExec>,
	restart_delay: Duration,
	readiness_delay: Duration,
}

impl ServiceController {
	pub fn new(runner: Arc<dyn CommandExec>) -> Self {
		Self {
			runner,
			restart_delay: RESTART_DELAY,
			readiness_delay: READINESS_DELAY,
		}
	}

	pub fn with_delays(
		runner: Arc<dyn CommandExec>,
		restart_delay: Duration,
		readiness_delay: Duration,
	) -> Self {
		Self { runner, restart_delay, readiness_delay }
	}

	pub async fn dispatch(&self, action: &str) -> Result<String, String> {
		match action {
			"start" => Ok(self.start().await),
			"stop" => Ok(self.stop().await),
			"restart" => Ok(self.restart().await),
			other => Err(format!("unknown action: {}", other)),
		}
	}

	/// Launch each daemon in order, confirming with a bounded pgrep poll
	/// before moving on. A daemon that fails to confirm is named in the
	/// message; later daemons are still launched.
	pub async fn start(&self) -> String {
		for dir in RUNTIME_DIRS {
			let _ = std::fs::create_dir_all(dir);
		}

		let mut unconfirmed = Vec::new();
		for spec in START_ORDER {
			let result = self.runner.run(&argv(spec.launch)).await;
			if !result.success {
				tracing::warn!("{}: launch failed: {}", spec.name, result.stderr.trim());
			}
			if self.confirm_running(spec.name).await {
				tracing::info!("{}: running", spec.name);
			} else {
				unconfirmed.push(spec.name);
			}
		}

		if unconfirmed.is_empty() {
			"print services started".to_string()
		} else {
			format!("print services started, not confirmed: {}", unconfirmed.join(", "))
		}
	}

	pub async fn stop(&self) -> String {
		for &name in STOP_ORDER {
			let result = self.runner.run(&argv(&["killall", name])).await;
			if !result.success {
				// already stopped, most likely
				tracing::debug!("killall {}: {}", name, result.stderr.trim());
			}
		}
		"print services stopped".to_string()
	}

	pub async fn restart(&self) -> String {
		let stopped = self.stop().await;
		tokio::time::sleep(self.restart_delay).await;
		let started = self.start().await;
		format!("{}; {}", stopped, started)
	}

	async fn confirm_running(&self, name: &str) -> bool {
		for _ in 0..READINESS_ATTEMPTS {
			let check = self.runner.run(&argv(&["pgrep", name])).await;
			if check.success {
				return true;
			}
			tokio::time::sleep(self.readiness_delay).await;
		}
		false
	}
}
