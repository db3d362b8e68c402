mod auth;
mod cors;
mod health;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use capgen_auth::AuthService;
use capgen_config::Config;
use capgen_usage::UsageLedger;
use tower_http::trace::TraceLayer;

/// Assembled server with all routes and middleware
pub struct Server {
    router: Router,
    listen_address: SocketAddr,
}

impl Server {
    /// Build the server from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the store connection or a subsystem
    /// initialization fails
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let listen_address = config
            .server
            .listen_address
            .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 4000)));

        let store = match &config.database {
            Some(database_config) => Some(capgen_store::connect(database_config).await?),
            None => None,
        };

        // Build base router with feature routes
        let mut app = Router::new();

        // Health check
        if config.server.health.enabled {
            let health_state = health::HealthState { store: store.clone() };
            app = app.route(
                &config.server.health.path,
                axum::routing::get(health::health_handler).with_state(health_state),
            );
        }

        // Auth and quota routes
        let auth_service = if let Some(ref auth_config) = config.auth {
            let store = store
                .clone()
                .ok_or_else(|| anyhow::anyhow!("[auth] requires a configured [database]"))?;

            let auth_service = Arc::new(AuthService::new(auth_config, Arc::clone(&store))?);
            let ledger = Arc::new(UsageLedger::new(store));

            app = app.merge(capgen_auth::endpoint_router().with_state(Arc::clone(&auth_service)));
            app = app.merge(capgen_usage::endpoint_router().with_state(ledger));

            Some(auth_service)
        } else {
            None
        };

        // Caption routes
        if let Some(ref captions_config) = config.captions {
            let captions_state = capgen_captions::build_server(captions_config)?;
            app = app.merge(capgen_captions::endpoint_router().with_state(captions_state));
        }

        // Apply middleware layers (innermost first)

        // Tracing
        app = app.layer(TraceLayer::new_for_http());

        // CORS
        if let Some(ref cors_config) = config.server.cors {
            app = app.layer(cors::cors_layer(cors_config));
        }

        // Bearer authentication
        if let Some(auth_service) = auth_service {
            let public_paths = config
                .auth
                .as_ref()
                .map(|auth_config| auth_config.public_paths.clone())
                .unwrap_or_default();

            app = app.layer(axum::middleware::from_fn(move |req, next| {
                let service = Arc::clone(&auth_service);
                let public_paths = public_paths.clone();
                async move { auth::bearer_auth_middleware(service, public_paths, req, next).await }
            }));
        }

        Ok(Self {
            router: app,
            listen_address,
        })
    }

    /// Get the configured listen address
    #[must_use]
    pub const fn listen_address(&self) -> SocketAddr {
        self.listen_address
    }

    /// Consume the server and return the inner router
    ///
    /// Useful for testing when the caller manages the listener
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Start serving requests
    ///
    /// Blocks until the cancellation token is triggered.
    ///
    /// # Errors
    ///
    /// Returns an error if binding the TCP listener or serving fails
    pub async fn serve(self, shutdown: tokio_util::sync::CancellationToken) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.listen_address).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!(%local_addr, "server listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.cancelled().await;
                tracing::info!("graceful shutdown initiated");
            })
            .await?;

        Ok(())
    }
}
