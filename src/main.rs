// Main entry point
use clap::Parser;
use folp::infrastructure::config::{self, Config, Logging};
use folp::infrastructure::storage::spawn_sweeper;
use folp::interfaces::cli::Cli;
use folp::interfaces::http;
use folp::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.generate_config {
        let path = config::generate_config_sample(cli.config.as_deref())?;
        println!("Generated config file at: {}", path.display());
        return Ok(());
    }

    let mut config = config::load_config(cli.config.as_deref())?;

    // Initialize logging before env overrides so their warnings are kept
    if config.logging.enable {
        init_logging(&config.logging)?;
    }

    config.apply_env(|name| std::env::var(name).ok());
    if let Some(host) = cli.host {
        config.host = host;
    }
    if let Some(port) = cli.port {
        config.port = port;
    }

    if cli.print_config {
        print!("{}", toml::to_string_pretty(&config.masked())?);
        return Ok(());
    }

    report_credentials(&config);

    let addr = config.bind_addr()?;
    let check_period = config.cache.check_period();
    let state = AppState::new(config)?;
    let sweeper = spawn_sweeper(state.cache.clone(), check_period);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "folp backend running");

    http::serve(listener, state, shutdown_signal()).await?;

    sweeper.abort();
    tracing::info!("folp backend stopped");
    Ok(())
}

/// Resolve on Ctrl-C
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        // Without a signal handler keep serving until the process is killed
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received, draining connections");
}

/// Log which credentials are present, never their values
fn report_credentials(config: &Config) {
    let state = |v: &Option<String>| if v.is_some() { "set" } else { "missing" };
    let credentials = &config.credentials;
    tracing::info!(
        stack_key = state(&credentials.stack_key),
        wolfram_appid = state(&credentials.wolfram_appid),
        wolfram_key = state(&credentials.wolfram_key),
        "environment keys check"
    );
}

/// Initialize logging with path and level configuration
fn init_logging(logging: &Logging) -> anyhow::Result<()> {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(logging.filter_directive()));

    if let Some(path) = &logging.path {
        if !path.is_empty() {
            // Log to file
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(file)
                .with_ansi(false)
                .init();
            return Ok(());
        }
    }

    // Log to stderr (default)
    tracing_subscriber::fmt().with_env_filter(filter).init();

    Ok(())
}
