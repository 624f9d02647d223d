use std::process::ExitCode;

use todo_vault_gateway::{init_tracing, start_server, GatewayConfig};
use tracing::error;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = match GatewayConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Environment misconfigured: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = start_server(config).await {
        error!("Gateway error: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
