use crate::config::LedgerConfig;
use crate::handlers;
use crate::services::{LedgerService, LedgerStore, MongoDb};
use axum::{
    middleware::from_fn,
    routing::{delete, get, post, put},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{metrics_middleware, request_id_middleware};
use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub config: LedgerConfig,
    pub ledger: LedgerService,
}

impl AppState {
    pub fn new(config: LedgerConfig, store: Arc<dyn LedgerStore>) -> Self {
        let ledger = LedgerService::new(store, config.read_timeout);
        Self { config, ledger }
    }
}

/// All HTTP routes with their middleware stack.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/metrics", get(handlers::metrics_endpoint))
        .route("/parties", post(handlers::create_party))
        .route("/parties/:party_id", delete(handlers::delete_party))
        .route("/parties/:party_id/ledger", get(handlers::get_ledger))
        .route(
            "/parties/:party_id/balance/recompute",
            post(handlers::recompute_balance),
        )
        .route(
            "/parties/:party_id/opening-balance",
            put(handlers::update_opening_balance),
        )
        .route(
            "/parties/:party_id/transactions",
            post(handlers::record_transaction),
        )
        .route(
            "/transactions/:transaction_id",
            put(handlers::update_transaction).delete(handlers::delete_transaction),
        )
        .route_layer(from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

pub struct Application {
    port: u16,
    server: Box<dyn std::future::Future<Output = std::io::Result<()>> + Send + Unpin>,
}

impl Application {
    pub async fn build(config: LedgerConfig) -> Result<Self, AppError> {
        let db = MongoDb::connect(&config.mongodb.uri, &config.mongodb.database)
            .await
            .map_err(|e| {
                tracing::error!("Failed to connect to MongoDB: {}", e);
                e
            })?;
        db.initialize_indexes().await.map_err(|e| {
            tracing::error!("Failed to initialize database indexes: {}", e);
            e
        })?;

        let state = AppState::new(config.clone(), Arc::new(db));
        Self::serve(config.common.port, state).await
    }

    /// Bind and serve `state` on `port` (0 picks a free port).
    pub async fn serve(port: u16, state: AppState) -> Result<Self, AppError> {
        let app = build_router(state);

        let addr = SocketAddr::from(([0, 0, 0, 0], port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Listening on {}", port);

        let server = axum::serve(listener, app);

        Ok(Self {
            port,
            server: Box::new(server.into_future()),
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        self.server.await
    }
}
