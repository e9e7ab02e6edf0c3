use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{header, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use rust_embed::RustEmbed;
use serde::Serialize;
use serde_json::Value;
use tower_http::cors::CorsLayer;

use platen_core::{AddonConfig, CommandExec, PrintJobRecord, PrinterRecord};

use crate::provision;
use crate::report;
use crate::services::ServiceController;

#[derive(RustEmbed)]
#[folder = "assets/"]
struct UiAssets;

/// Server context, built once in main. No mutable fields; all per-request
/// state is re-read from disk or the OS.
#[derive(Clone)]
pub struct AppState {
	pub runner: Arc<dyn CommandExec>,
	pub controller: Arc<ServiceController>,
	pub config_path: PathBuf,
}

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/api/status", get(api_status))
		.route("/api/printers", get(api_printers))
		.route("/api/jobs", get(api_jobs))
		.route("/api/service/{action}", post(api_service))
		.route("/api/config", get(api_config_get).post(api_config_post))
		.route("/api/logs", get(api_logs))
		.route("/api/system-info", get(api_system_info))
		.fallback(static_handler)
		.layer(CorsLayer::permissive())
		.with_state(state)
}

#[derive(Serialize)]
struct PrinterList {
	printers: Vec<PrinterRecord>,
}

#[derive(Serialize)]
struct JobList {
	jobs: Vec<PrintJobRecord>,
}

#[derive(Serialize)]
struct ConfigReply {
	status: &'static str,
	message: String,
}

async fn api_status(State(state): State<AppState>) -> Json<report::StatusReport> {
	Json(report::status(state.runner.as_ref()).await)
}

async fn api_printers(State(state): State<AppState>) -> Json<PrinterList> {
	Json(PrinterList {
		printers: report::printers(state.runner.as_ref()).await,
	})
}

async fn api_jobs(State(state): State<AppState>) -> Json<JobList> {
	Json(JobList {
		jobs: report::jobs(state.runner.as_ref()).await,
	})
}

/// Plain-text reply, HTTP 200 whatever happened; an unknown action gets the
/// error text in the body, not a status code.
async fn api_service(State(state): State<AppState>, Path(action): Path<String>) -> String {
	match state.controller.dispatch(&action).await {
		Ok(message) => {
			tracing::info!("service {}: {}", action, message);
			message
		}
		Err(message) => message,
	}
}

async fn api_config_get(State(state): State<AppState>) -> Json<AddonConfig> {
	Json(AddonConfig::load(&state.config_path))
}

async fn api_config_post(
	State(state): State<AppState>,
	body: String,
) -> (StatusCode, Json<ConfigReply>) {
	let patch = match serde_json::from_str::<Value>(&body) {
		Ok(Value::Object(map)) => map,
		Ok(_) => return config_error("config update must be a JSON object"),
		Err(e) => return config_error(&format!("invalid JSON: {}", e)),
	};

	let current = AddonConfig::load(&state.config_path);
	let Some(updated) = current.merged(&patch) else {
		return config_error("config update has the wrong shape");
	};

	if !updated.save(&state.config_path) {
		return config_error(&format!("failed to write {}", state.config_path.display()));
	}

	let credentials_touched =
		patch.contains_key("cups_username") || patch.contains_key("cups_password");
	if credentials_touched && !updated.cups_password.is_empty() {
		provision::ensure_account(
			state.runner.as_ref(),
			&updated.cups_username,
			&updated.cups_password,
		)
		.await;
	}

	(
		StatusCode::OK,
		Json(ConfigReply {
			status: "ok",
			message: "configuration updated".to_string(),
		}),
	)
}

fn config_error(message: &str) -> (StatusCode, Json<ConfigReply>) {
	(
		StatusCode::INTERNAL_SERVER_ERROR,
		Json(ConfigReply {
			status: "error",
			message: message.to_string(),
		}),
	)
}

async fn api_logs(State(state): State<AppState>) -> String {
	report::logs(state.runner.as_ref()).await
}

async fn api_system_info(State(state): State<AppState>) -> String {
	report::system_info(state.runner.as_ref()).await
}

async fn static_handler(uri: Uri) -> impl IntoResponse {
	let path = uri.path().trim_start_matches('/');
	let path = if path.is_empty() { "index.html" } else { path };

	if let Some(content) = UiAssets::get(path) {
		return serve_asset(path, content);
	}

	Response::builder()
		.status(StatusCode::NOT_FOUND)
		.body("Not Found".into())
		.unwrap()
}

fn serve_asset(path: &str, content: rust_embed::EmbeddedFile) -> Response {
	let mime = mime_guess::from_path(path).first_or_octet_stream();

	Response::builder()
		.status(StatusCode::OK)
		.header(header::CONTENT_TYPE, mime.as_ref())
		.body(content.data.into())
		.unwrap()
}
