use dentascan::config::Configuration;
use dentascan::error::AppError;
use dentascan::server;
use tracing::Level;

fn init_logging() {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    init_logging();
    let configuration = Configuration::load()?;
    server::serve(configuration).await
}
