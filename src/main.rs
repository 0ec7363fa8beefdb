use pmt::commands::Cli;
use pmt::msg_error;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry().with(fmt::layer().with_target(false)).with(filter).init();

    if let Err(err) = Cli::menu().await {
        msg_error!(err);
        std::process::exit(1);
    }
}
