// # dns01d - Dynadot DNS-01 Challenge Webhook Daemon
//
// The daemon is responsible for:
// 1. Reading configuration from environment variables
// 2. Initializing tracing and the tokio runtime
// 3. Constructing the Dynadot provider and the challenge engine
// 4. Serving the webhook endpoints until SIGTERM/SIGINT
//
// ## Configuration
//
// All configuration is done via environment variables:
//
// - `DYNADOT_API_KEY`: Dynadot API key (required)
// - `PORT`: TCP port to listen on (default 3000)
// - `LOG_LEVEL`: trace, debug, info, warn or error (default info)
//
// Verbosity toggles, each enabled by the literal value `true`:
//
// - `LOG_REQ_BODY`: log inbound request bodies
// - `LOG_TXT_VALUES`: log fetched and reconciled record sets
// - `LOG_API_URL`: log the outbound push URL (contains the API key)
// - `LOG_DYNAREQ_URL`: log the outbound fetch URL (contains the API key)
//
// ## Example
//
// ```bash
// export DYNADOT_API_KEY=your_key
// export PORT=3000
//
// dns01d
// ```

use std::env;
use std::net::SocketAddr;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

use dns01_core::{ChallengeEngine, LogOptions, WebhookConfig};
use dns01_provider_dynadot::DynadotProvider;
use dns01d::server;

/// Exit codes for different termination scenarios
///
/// These codes follow systemd conventions:
/// - 0: Clean shutdown
/// - 1: Configuration or startup error
/// - 2: Runtime error (unexpected)
#[derive(Debug, Clone, Copy)]
enum DaemonExitCode {
    /// Clean shutdown (normal exit)
    CleanShutdown = 0,
    /// Configuration error or startup failure
    ConfigError = 1,
    /// Runtime error (unexpected failure)
    RuntimeError = 2,
}

impl From<DaemonExitCode> for ExitCode {
    fn from(code: DaemonExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Load configuration from environment variables
fn load_config() -> Result<WebhookConfig> {
    let api_key = env::var("DYNADOT_API_KEY").map_err(|_| {
        anyhow::anyhow!(
            "DYNADOT_API_KEY is required. \
            Set it via: export DYNADOT_API_KEY=your_key"
        )
    })?;

    let port = match env::var("PORT") {
        Ok(raw) => raw
            .parse()
            .map_err(|_| anyhow::anyhow!("PORT must be a TCP port number. Got: {raw}"))?,
        Err(_) => 3000,
    };

    Ok(WebhookConfig {
        api_key,
        port,
        log: LogOptions {
            request_body: env_flag("LOG_REQ_BODY"),
            provider_state: env_flag("LOG_TXT_VALUES"),
            api_url: env_flag("LOG_API_URL"),
            provider_request_url: env_flag("LOG_DYNAREQ_URL"),
        },
    })
}

fn env_flag(name: &str) -> bool {
    env::var(name).is_ok_and(|v| v == "true")
}

fn main() -> ExitCode {
    // Load and validate configuration
    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            return DaemonExitCode::ConfigError.into();
        }
    };

    if let Err(e) = config.validate() {
        eprintln!("Configuration validation error: {e}");
        return DaemonExitCode::ConfigError.into();
    }

    // Initialize tracing
    let log_level = match env::var("LOG_LEVEL").unwrap_or_default().to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder().with_max_level(log_level).finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {e}");
        return DaemonExitCode::ConfigError.into();
    }

    info!("Dynadot DNS-01 Challenge Handler initialized.");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));
    info!("Dynadot API Key: ***");

    // Enter tokio runtime
    let rt = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {e}");
            return DaemonExitCode::RuntimeError.into();
        }
    };

    rt.block_on(async {
        if let Err(e) = run_daemon(config).await {
            error!("Daemon error: {e}");
            DaemonExitCode::RuntimeError
        } else {
            DaemonExitCode::CleanShutdown
        }
    })
    .into()
}

/// Run the daemon
async fn run_daemon(config: WebhookConfig) -> Result<()> {
    let provider = DynadotProvider::new(config.api_key.clone(), config.log)?;
    let engine = Arc::new(ChallengeEngine::new(Arc::new(provider), config.log));

    let app = server::create_router(engine, config.log);
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));

    server::run_server(addr, app).await?;

    info!("Shutting down daemon");
    Ok(())
}
