use kintai::commands::Cli;
use kintai::libs::messages::macros::is_debug_mode;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    if is_debug_mode() {
        fmt()
            .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("kintai=debug")))
            .init();
    }

    Cli::menu().await
}
