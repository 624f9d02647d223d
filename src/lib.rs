// Todo Vault Gateway - Main Library
//
// Fronts the Todo Vault web app: serves the root shell metadata and, when
// enabled, transparently forwards /api/* to the backend service.
// Also ships a SQLite smoke-check for the local todo.db file.

pub mod config;
pub mod database;
pub mod error;
pub mod proxy;
pub mod rewrite;
pub mod shell;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub use config::{resolve_backend_url, ConfigError, GatewayConfig, ProxySettings};
pub use database::{run_smoke_check, DatabaseError, SmokeCheckReport};
pub use error::GatewayError;
pub use proxy::{build_router, start_server};
pub use rewrite::RewriteRule;

/// Install the global tracing subscriber, honouring `RUST_LOG`.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todo_vault_gateway=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
