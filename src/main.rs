use std::sync::Arc;

use clap::Parser;
use tracing::error;

use distbank::account::Account;
use distbank::api::{ApiServer, ApiState};
use distbank::audit::LogAuditSink;
use distbank::auth::ApiTokenAuthenticator;
use distbank::config::BankConfig;
use distbank::store::InMemoryRepo;

#[derive(Parser)]
#[command(name = "distbank", about = "Bank-account API with token-based optimistic locking")]
struct Cli {
    /// Path to the TOML config file
    #[arg(long, default_value = "distbank.toml")]
    config: String,

    /// Override the configured listen port
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let config = BankConfig::load_or_default(&cli.config);

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.server.log_level)),
        )
        .init();

    let state = ApiState {
        accounts: Arc::new(InMemoryRepo::<Account>::new()),
        auth: Arc::new(ApiTokenAuthenticator::new(config.auth.api_token)),
        audit: Arc::new(LogAuditSink),
        seed: config.seed,
    };

    let port = cli.port.unwrap_or(config.server.port);
    let server = ApiServer::new(state, port);

    if let Err(e) = server.start().await {
        error!("server failed: {}", e);
        std::process::exit(1);
    }
}
