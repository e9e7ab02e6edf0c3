use std::path::PathBuf;
use std::sync::Arc;

use platen_core::{AddonConfig, CommandExec, OsRunner};
use platen_daemon::{api, services};

const DEFAULT_CONFIG_PATH: &str = "/data/options.json";

#[tokio::main]
async fn main() {
	let args: Vec<String> = std::env::args().skip(1).collect();
	let config_path = config_path_from_args(&args);

	let config = AddonConfig::load(&config_path);
	init_tracing(&config.log_level);

	let runner: Arc<dyn CommandExec> = Arc::new(OsRunner::new());
	let controller = Arc::new(services::ServiceController::new(Arc::clone(&runner)));

	let state = api::AppState {
		runner,
		controller,
		config_path,
	};

	let app = api::router(state);
	let addr = std::net::SocketAddr::from(([0, 0, 0, 0], config.management_port));
	let listener = match tokio::net::TcpListener::bind(addr).await {
		Ok(l) => l,
		Err(e) => {
			tracing::error!("failed to bind {}: {}", addr, e);
			std::process::exit(1);
		}
	};

	tracing::info!("{} management API on {}", config.server_name, addr);

	tokio::select! {
		result = async { axum::serve(listener, app).await } => {
			if let Err(e) = result {
				tracing::error!("server error: {}", e);
			}
		}
		_ = tokio::signal::ctrl_c() => {
			tracing::info!("shutting down");
		}
	}
}

fn config_path_from_args(args: &[String]) -> PathBuf {
	let mut iter = args.iter();
	while let Some(arg) = iter.next() {
		if arg == "--config" {
			if let Some(path) = iter.next() {
				return PathBuf::from(path);
			}
		}
	}
	PathBuf::from(DEFAULT_CONFIG_PATH)
}

fn init_tracing(level: &str) {
	use tracing_subscriber::filter::LevelFilter;

	let level = match level {
		"trace" => LevelFilter::TRACE,
		"debug" => LevelFilter::DEBUG,
		"warning" | "warn" => LevelFilter::WARN,
		"error" => LevelFilter::ERROR,
		_ => LevelFilter::INFO,
	};
	tracing_subscriber::fmt().with_max_level(level).init();
}
