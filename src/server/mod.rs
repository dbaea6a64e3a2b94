pub mod handlers;
pub mod response;
pub mod routes;

pub use routes::{build_router, AppState};

use crate::analysis::ToothAnalyzer;
use crate::config::Configuration;
use crate::error::{AppError, ServerError};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// Build the analyzer from configuration and serve the API until the process
/// is stopped.
pub async fn serve(configuration: Configuration) -> Result<(), AppError> {
    let analyzer = ToothAnalyzer::new(configuration.analyzer_config())?;
    info!(
        "Analyzer initialized with metrics: {:?}",
        analyzer.info().metrics
    );

    let state = AppState {
        analyzer: Arc::new(analyzer),
    };
    let app = build_router(state, &configuration);

    let address = format!("{}:{}", configuration.host, configuration.port);
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|e| ServerError::Bind(e, address.clone()))?;
    info!("Listening on http://{}", address);

    axum::serve(listener, app)
        .await
        .map_err(ServerError::Serve)?;

    Ok(())
}
