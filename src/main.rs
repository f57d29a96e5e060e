use std::sync::{Arc, Mutex};
use tracing::info;
use tracing_subscriber::EnvFilter;

use socialsift::infrastructure::config::AppConfig;
use socialsift::infrastructure::storage::ensure_dir;
use socialsift::interfaces::http::{add_log, start_server};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("socialsift=info")),
        )
        .init();

    let config = AppConfig::load()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()))?;
    ensure_dir(&config.data_dir)?;

    let logs = Arc::new(Mutex::new(Vec::new()));
    add_log(&logs, "INFO", "Main", "Starting API server");

    info!(host = %config.host, port = config.port, "Listening");
    start_server(&config, logs)?.await
}
