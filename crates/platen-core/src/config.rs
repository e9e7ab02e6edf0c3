use std::path::Path;

use serde::{Deserialize, Serialize};

// ── Addon config (/data/options.json) ───────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AddonConfig {
	#[serde(default = "default_username")]
	pub cups_username: String,
	#[serde(default = "default_password")]
	pub cups_password: String,
	#[serde(default = "default_cups_port")]
	pub cups_port: u16,
	#[serde(default = "default_management_port")]
	pub management_port: u16,
	#[serde(default = "default_server_name")]
	pub server_name: String,
	#[serde(default = "default_log_level")]
	pub log_level: String,
	#[serde(default = "default_max_jobs")]
	pub max_jobs: u32,
	#[serde(default)]
	pub ssl_enabled: bool,
}

fn default_username() -> String { "print".to_string() }
fn default_password() -> String { "print".to_string() }
fn default_cups_port() -> u16 { 631 }
fn default_management_port() -> u16 { 8080 }
fn default_server_name() -> String { "platen".to_string() }
fn default_log_level() -> String { "info".to_string() }
fn default_max_jobs() -> u32 { 100 }

impl Default for AddonConfig {
	fn default() -> Self {
		Self {
			cups_username: default_username(),
			cups_password: default_password(),
			cups_port: default_cups_port(),
			management_port: default_management_port(),
			server_name: default_server_name(),
			log_level: default_log_level(),
			max_jobs: default_max_jobs(),
			ssl_enabled: false,
		}
	}
}

impl AddonConfig {
	/// Read the config file, overlaying file keys on the defaults. Any read
	/// or parse failure falls back to the full default map.
	pub fn load(path: &Path) -> AddonConfig {
		if path.exists() {
			match std::fs::read_to_string(path) {
				Ok(content) => match serde_json::from_str(&content) {
					Ok(config) => return config,
					Err(e) => tracing::warn!("failed to parse {}: {}", path.display(), e),
				},
				Err(e) => tracing::warn!("failed to read {}: {}", path.display(), e),
			}
		}
		AddonConfig::default()
	}

	/// Persist the whole document. Last write wins; a crash mid-write can
	/// leave a torn file.
	pub fn save(&self, path: &Path) -> bool {
		if let Some(parent) = path.parent() {
			let _ = std::fs::create_dir_all(parent);
		}
		let json = match serde_json::to_string_pretty(self) {
			Ok(j) => j,
			Err(_) => return false,
		};
		std::fs::write(path, json).is_ok()
	}

	/// Overlay `patch` keys onto this config, key by key. Unknown keys are
	/// ignored; a value of the wrong type rejects the whole patch.
	pub fn merged(&self, patch: &serde_json::Map<String, serde_json::Value>) -> Option<AddonConfig> {
		let mut doc = match serde_json::to_value(self) {
			Ok(serde_json::Value::Object(map)) => map,
			_ => return None,
		};
		for (key, value) in patch {
			if doc.contains_key(key) {
				doc.insert(key.clone(), value.clone());
			}
		}
		serde_json::from_value(serde_json::Value::Object(doc)).ok()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn patch(json: &str) -> serde_json::Map<String, serde_json::Value> {
		match serde_json::from_str(json) {
			Ok(serde_json::Value::Object(map)) => map,
			_ => panic!("test patch must be a JSON object"),
		}
	}

	#[test]
	fn load_missing_file_gives_defaults() {
		let dir = tempfile::tempdir().unwrap();
		let config = AddonConfig::load(&dir.path().join("options.json"));
		assert_eq!(config, AddonConfig::default());
		assert_eq!(config.cups_username, "print");
		assert_eq!(config.management_port, 8080);
	}

	#[test]
	fn load_corrupt_file_gives_defaults() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("options.json");
		std::fs::write(&path, "{not json at all").unwrap();
		assert_eq!(AddonConfig::load(&path), AddonConfig::default());
	}

	#[test]
	fn load_overlays_file_keys_on_defaults() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("options.json");
		std::fs::write(&path, r#"{"cups_username": "alice", "management_port": 9100}"#).unwrap();

		let config = AddonConfig::load(&path);
		assert_eq!(config.cups_username, "alice");
		assert_eq!(config.management_port, 9100);
		// untouched keys keep their defaults
		assert_eq!(config.cups_password, "print");
		assert_eq!(config.cups_port, 631);
	}

	#[test]
	fn save_creates_parent_and_round_trips() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("nested").join("options.json");

		let config = AddonConfig {
			server_name: "office".to_string(),
			..AddonConfig::default()
		};
		assert!(config.save(&path));
		assert_eq!(AddonConfig::load(&path), config);
	}

	#[test]
	fn save_to_unwritable_path_returns_false() {
		let config = AddonConfig::default();
		assert!(!config.save(Path::new("/proc/platen/options.json")));
	}

	#[test]
	fn merged_overlays_known_keys() {
		let config = AddonConfig::default();
		let updated = config
			.merged(&patch(r#"{"cups_username": "alice", "max_jobs": 5}"#))
			.unwrap();
		assert_eq!(updated.cups_username, "alice");
		assert_eq!(updated.max_jobs, 5);
		assert_eq!(updated.cups_password, "print");
	}

	#[test]
	fn merged_ignores_unknown_keys() {
		let config = AddonConfig::default();
		let updated = config.merged(&patch(r#"{"no_such_key": true}"#)).unwrap();
		assert_eq!(updated, config);
	}

	#[test]
	fn merged_rejects_wrong_value_type() {
		let config = AddonConfig::default();
		assert!(config.merged(&patch(r#"{"management_port": "not a number"}"#)).is_none());
	}
}
