use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use sd_prompt_generator::{api, config, Vocabulary};

#[tokio::main]
async fn main() {
    // Load configuration
    config::Config::dotenv_load();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match config::Config::new() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };
    config.log_effective();

    let vocabulary = match &config.vocabulary_path {
        Some(path) => match Vocabulary::load_from_file(path).await {
            Ok(v) => v,
            Err(e) => {
                tracing::error!("{}", e);
                std::process::exit(1);
            }
        },
        None => Vocabulary::builtin(),
    };

    let state = Arc::new(api::AppState::new(&config, vocabulary));
    let app = api::create_app(state);

    // Run our application with safe parsing
    let socket_address = config.socket_addr();
    tracing::info!("listening on {}", socket_address);
    let server = match axum::Server::try_bind(&socket_address) {
        Ok(builder) => builder,
        Err(e) => {
            tracing::error!("Failed to bind {}: {}", socket_address, e);
            std::process::exit(1);
        }
    };
    if let Err(e) = server.serve(app.into_make_service()).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
