//! OS account provisioning for the print user. Privileged side effect of a
//! config update; runs through the same command choke point as everything
//! else.

use platen_core::{argv, sh_quote, CommandExec};

pub async fn ensure_account(runner: &dyn CommandExec, username: &str, password: &str) {
	let added = runner
		.run(&argv(&["useradd", "-M", "-s", "/usr/sbin/nologin", "-G", "lpadmin", username]))
		.await;
	if !added.success {
		// user already exists on re-provision
		tracing::debug!("useradd {}: {}", username, added.stderr.trim());
	}

	// chpasswd only reads user:pass pairs from stdin, hence the one shell
	// line in the codebase. Both values are quoted.
	let line = format!(
		"printf '%s:%s\\n' {} {} | chpasswd",
		sh_quote(username),
		sh_quote(password)
	);
	let set = runner.run_shell(&line).await;
	if set.success {
		tracing::info!("updated print credentials for {}", username);
	} else {
		tracing::warn!("chpasswd for {}: {}", username, set.stderr.trim());
	}
}
