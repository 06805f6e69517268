use lifescope::commands::Cli;
use lifescope::libs::messages::macros::is_debug_mode;
use lifescope::msg_error;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    let filter = if is_debug_mode() {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("lifescope=debug"))
    } else {
        EnvFilter::new("off")
    };
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    if let Err(e) = Cli::menu().await {
        msg_error!(e);
        std::process::exit(1);
    }
}
