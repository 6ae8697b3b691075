//! NexChat CLI and REST API entry point.
//!
//! Binary name: `nexchat`
//!
//! Parses CLI arguments, loads configuration, initializes database and
//! services, then dispatches to the appropriate command handler or starts the
//! REST API server.

mod cli;
mod http;
mod state;

use clap::Parser;
use clap_complete::generate;
use tokio_util::sync::CancellationToken;

use cli::{Cli, Commands};
use nexchat_core::schedule::SweepScheduler;
use nexchat_infra::config::{load_config, resolve_config_path};
use nexchat_observe::tracing_setup::{init_tracing, otel_requested, shutdown_tracing};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Serving logs request activity by default; other commands stay quiet.
    let filter = match (&cli.command, cli.verbose) {
        (Commands::Serve { .. }, 0) if !cli.quiet => "info",
        _ => cli.log_filter(),
    };
    init_tracing(filter, otel_requested()).map_err(|e| anyhow::anyhow!(e))?;

    // Shell completions don't need app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "nexchat", &mut std::io::stdout());
        return Ok(());
    }

    let config_path = resolve_config_path(cli.config.as_deref());
    let config = load_config(&config_path).await;

    let state = AppState::init(config).await?;

    let result = match cli.command {
        Commands::Serve { port, host } => serve(state.clone(), host, port, cli.quiet).await,
        Commands::List { page, page_size } => {
            cli::chat::list_chats(&state, page, page_size, cli.json).await
        }
        Commands::Create { name, url } => cli::chat::create_chat(&state, name, url, cli.json).await,
        Commands::Rename { secret_key, name } => {
            cli::chat::rename_chat(&state, secret_key, name, cli.json).await
        }
        Commands::Delete { secret_key, force } => {
            cli::chat::delete_chat(&state, secret_key, force, cli.json).await
        }
        Commands::Sweep => cli::sweep::run_sweep(&state, cli.json, cli.quiet).await,
        Commands::Completions { .. } => Ok(()),
    };

    state.db_pool.close().await;
    shutdown_tracing();
    result
}

/// Run the HTTP server until Ctrl+C or SIGTERM, with the sweep schedule if configured.
async fn serve(
    state: AppState,
    host: Option<String>,
    port: Option<u16>,
    quiet: bool,
) -> anyhow::Result<()> {
    let host = host.unwrap_or_else(|| state.config.server.host.clone());
    let port = port.unwrap_or(state.config.server.port);
    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    let scheduler = match state.config.sweep.schedule.as_deref() {
        Some(schedule) => {
            let sweeper = state.sweeper.clone();
            let scheduler = SweepScheduler::start(schedule, move || {
                let sweeper = sweeper.clone();
                async move {
                    // Failures are logged by the sweeper itself.
                    let _ = sweeper.sweep().await;
                }
            })
            .await?;
            Some(scheduler)
        }
        None => None,
    };

    if !quiet {
        println!(
            "  {} NexChat directory ({}) listening on {}",
            console::style("⚡").bold(),
            state.config.environment,
            console::style(format!("http://{addr}")).cyan()
        );
        if let Some(scheduler) = &scheduler {
            println!(
                "  {} Sweeping on schedule {}",
                console::style("⏱").bold(),
                console::style(scheduler.cron_expr()).yellow()
            );
        }
        println!("  {}", console::style("Press Ctrl+C to stop").dim());
    }
    tracing::info!(%addr, environment = %state.config.environment, "server started");

    let shutdown = CancellationToken::new();
    tokio::spawn(shutdown_signal(shutdown.clone()));

    let router = http::router::build_router(state);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown.cancelled_owned())
        .await?;

    if let Some(scheduler) = scheduler {
        scheduler.shutdown().await?;
    }

    if !quiet {
        println!("\n  Server stopped.");
    }
    Ok(())
}

/// Cancel `token` on Ctrl+C or SIGTERM.
async fn shutdown_signal(token: CancellationToken) {
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
    tracing::info!("shutdown signal received");
    token.cancel();
}
