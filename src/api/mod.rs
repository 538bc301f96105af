pub mod handlers;
pub mod middleware;
pub mod types;

use axum::routing::{get, post};
use axum::{middleware as axum_middleware, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::account::Account;
use crate::audit::AuditSink;
use crate::auth::Authenticator;
use crate::config::SeedConfig;
use crate::store::Repository;

/// Shared application state. Every dependency is injected here and handed
/// to handlers through the router, so there is no ambient global store.
#[derive(Clone)]
pub struct ApiState {
    pub accounts: Arc<dyn Repository<Account>>,
    pub auth: Arc<dyn Authenticator>,
    pub audit: Arc<dyn AuditSink>,
    pub seed: SeedConfig,
}

pub struct ApiServer {
    state: ApiState,
    bind_addr: String,
}

impl ApiServer {
    pub fn new(state: ApiState, port: u16) -> Self {
        Self {
            state,
            bind_addr: format!("0.0.0.0:{}", port),
        }
    }

    /// Builds the full route table with the gate chain composed in its
    /// fixed order. Layers wrap outward, so the registration order below
    /// yields transaction_log(with_account(require_auth(handler))).
    pub fn router(state: ApiState) -> Router {
        let account_routes = Router::new()
            .route("/accounts/:id/lock", post(handlers::post_lock))
            .route("/accounts/:id/unlock", post(handlers::post_unlock))
            .route(
                "/accounts/:id",
                get(handlers::get_account).put(handlers::put_account),
            )
            .layer(axum_middleware::from_fn_with_state(
                state.clone(),
                middleware::require_auth,
            ))
            .layer(axum_middleware::from_fn_with_state(
                state.clone(),
                middleware::with_account,
            ))
            .layer(axum_middleware::from_fn_with_state(
                state.clone(),
                middleware::transaction_log,
            ));

        // Administrative routes skip resolution and audit.
        let admin_routes = Router::new()
            .route("/accounts/_seed", post(handlers::post_seed))
            .route("/accounts/_clear", post(handlers::post_clear))
            .layer(axum_middleware::from_fn_with_state(
                state.clone(),
                middleware::require_auth,
            ));

        Router::new()
            .merge(account_routes)
            .merge(admin_routes)
            .layer(CorsLayer::permissive())
            .with_state(state)
    }

    pub async fn start(self) -> std::io::Result<()> {
        let app = Self::router(self.state);

        let listener = tokio::net::TcpListener::bind(&self.bind_addr).await?;
        info!("API server listening on {}", self.bind_addr);
        axum::serve(listener, app).await
    }
}
