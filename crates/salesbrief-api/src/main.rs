//! salesbrief CLI and web form entry point.
//!
//! Binary name: `sbrief`
//!
//! Parses CLI arguments, resolves configuration and the provider
//! credential, then runs a one-shot brief or serves the form.

mod cli;
mod http;
mod state;

use clap::Parser;
use clap_complete::generate;

use cli::{Cli, Commands};
use salesbrief_infra::credentials::load_dotenv;
use salesbrief_observe::tracing_setup::{init_tracing, shutdown_tracing, TracingOptions};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Shell completions don't need tracing or config
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "sbrief", &mut std::io::stdout());
        return Ok(());
    }

    let mut tracing_options = TracingOptions::from_verbosity(cli.verbose, cli.quiet);
    tracing_options.json = cli.json_logs;
    tracing_options.otel = cli.otel;
    init_tracing(&tracing_options)
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    if let Some(path) = load_dotenv() {
        tracing::debug!(path = %path.display(), "loaded .env");
    }

    let outcome = dispatch(cli).await;
    shutdown_tracing();
    outcome
}

async fn dispatch(cli: Cli) -> anyhow::Result<()> {
    let config = cli.resolve_config().await?;

    match cli.command {
        Commands::Serve { host, port } => {
            let mut config = config;
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            let addr = format!("{}:{}", config.host, config.port);

            let state = AppState::init(config)?;
            let listener = tokio::net::TcpListener::bind(&addr).await?;

            let invoker = state.brief_service.invoker();
            tracing::info!(
                %addr,
                provider = invoker.provider_name(),
                model = invoker.model(),
                "sales assistant listening"
            );
            if !cli.quiet {
                println!(
                    "  {} Sales Assistant listening on {}",
                    console::style("⚡").bold(),
                    console::style(format!("http://{addr}")).cyan()
                );
                println!("  {}", console::style("Press Ctrl+C to stop").dim());
            }

            let router = http::router::build_router(state);

            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await?;

            if !cli.quiet {
                println!("\n  Server stopped.");
            }
        }

        Commands::Run(args) => {
            let state = AppState::init(config)?;
            cli::run::run_brief(&state, args).await?;
        }

        Commands::Prompt { fields, file } => {
            cli::run::print_prompt(fields, file).await?;
        }

        Commands::Completions { .. } => {}
    }

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
