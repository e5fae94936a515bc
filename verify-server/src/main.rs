//! # Groth16 Verify Server
//!
//! Gateway between snarkjs Groth16 proofs and a Soroban verifier contract.
//!
//! ## Features
//!
//! - Canonical BLS12-381 encoding of snarkjs proofs and public signals
//! - Proof generation for the multiplier circuit through snarkjs
//! - Read-only contract verification via transaction simulation
//!
//! ## Usage
//!
//! ```bash
//! CONTRACT_ID=C... SOURCE_PUBLIC_KEY=G... cargo run -p verify-server
//!
//! # Local RPC node
//! RPC_URL=http://localhost:8000/soroban/rpc \
//! NETWORK_PASSPHRASE="Standalone Network ; February 2017" cargo run -p verify-server
//! ```
//!
//! ## API Endpoints
//!
//! - `GET /health` - Health check
//! - `GET /status` - Detailed server status
//! - `POST /api/v1/proof/encode` - Encode snarkjs output to canonical hex
//! - `POST /api/v1/session/generate` - Generate a proof for the session inputs
//! - `POST /api/v1/session/corrupt-proof` - Mutate the proof's last byte
//! - `POST /api/v1/session/corrupt-public` - Mutate the public inputs' last byte
//! - `POST /api/v1/session/verify` - Verify the session against the contract

use std::sync::Arc;

use axum::http::{header, HeaderValue, Method};
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use verify_server::config::Config;
use verify_server::services::SorobanRpcClient;
use verify_server::{create_routes, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::load()?;

    // Initialize logging
    init_logging(&config);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        rpc_url = %config.rpc_url,
        network = %config.network_passphrase,
        contract_id = config.contract_id.as_deref().unwrap_or("<unset>"),
        "Starting Groth16 Verify Server"
    );

    if config.contract_id.is_none() {
        warn!("No CONTRACT_ID configured, verify requests must name a contract");
    }
    if config.source_secret.is_none() && config.source_public_key.is_none() {
        warn!("No source identity configured, verify requests must supply one");
    }

    let rpc = SorobanRpcClient::new(&config.rpc_url)?;
    let state = AppState::from_config(&config, Arc::new(rpc));

    // Build router
    let app = create_routes(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(cors_layer(&config)),
    );

    // Start server
    let addr = config.socket_addr()?;
    info!(%addr, "Server listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Build CORS layer from the configured origins
fn cors_layer(config: &Config) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    if config.cors_origins.iter().any(|o| o == "*") {
        return cors.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    cors.allow_origin(AllowOrigin::list(origins))
}

/// Initialize logging based on configuration
fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    if config.json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_level(true)
                    .with_ansi(true),
            )
            .init();
    }
}
