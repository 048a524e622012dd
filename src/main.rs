//! Emotional Companion - mood tracking and AI companion chat backend
//!
//! - REST API under /api (users, mood log, AI answers, chat sessions)
//! - SQLite persistence
//! - OpenAI-compatible model with pre-written fallback replies

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt};

use companion::{
    CONFIG, CompanionConfig, ReplyContext,
    api::create_router,
    state::{build_provider, build_resolver, create_app_state},
    store::db,
};

#[derive(Parser)]
#[command(name = "companion")]
#[command(about = "Mood tracking and AI companion chat backend", version)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server (default)
    Serve {
        /// Bind host (overrides COMPANION_HOST)
        #[arg(long)]
        host: Option<String>,

        /// Bind port (overrides COMPANION_PORT)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Print the system prompt for a mood and intensity
    Prompt {
        mood: String,
        #[arg(allow_negative_numbers = true)]
        intensity: i32,
    },

    /// Print the companion's reply without touching the database
    Reply {
        mood: String,
        #[arg(allow_negative_numbers = true)]
        intensity: i32,

        /// Free-text message from the user
        #[arg(long, short = 'm')]
        message: Option<String>,

        /// Answer as a turn inside a chat session
        #[arg(long)]
        chat: bool,

        /// Skip the model and use the fallback tables
        #[arg(long)]
        offline: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config: CompanionConfig = CONFIG.clone();

    // Initialize logging: RUST_LOG wins over COMPANION_LOG_LEVEL
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    match args.command.unwrap_or(Command::Serve { host: None, port: None }) {
        Command::Serve { host, port } => serve(config, host, port).await,
        Command::Prompt { mood, intensity } => {
            let resolver = build_resolver(&config, None)?;
            println!("{}", resolver.build_system_prompt(&mood, intensity));
            Ok(())
        }
        Command::Reply { mood, intensity, message, chat, offline } => {
            let provider = if offline { None } else { build_provider(&config)? };
            let resolver = build_resolver(&config, provider)?;
            let context = if chat {
                ReplyContext::Chat { history: &[] }
            } else {
                ReplyContext::CheckIn
            };

            let resolution = resolver
                .resolve(&mood, intensity, message.as_deref(), context)
                .await;
            info!("Reply source: {:?}", resolution.source);
            println!("{}", resolution.text);
            Ok(())
        }
    }
}

async fn serve(mut config: CompanionConfig, host: Option<String>, port: Option<u16>) -> Result<()> {
    if let Some(host) = host {
        config.host = host;
    }
    if let Some(port) = port {
        config.port = port;
    }

    info!("Starting Emotional Companion v{}", env!("CARGO_PKG_VERSION"));
    info!("Database: {}", config.database_url);

    let pool = db::connect(&config.database_url, config.sqlite_max_connections).await?;

    let bind_address = config.bind_address();
    let app_state = create_app_state(config, pool.clone())?;
    let app = create_router(app_state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!("HTTP server listening on http://{}/api", bind_address);

    let server = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal());

    if let Err(e) = server.await {
        error!("Server error: {}", e);
    }

    pool.close().await;
    info!("Database pool closed, bye");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_subcommands() {
        let args = Args::try_parse_from(["companion", "reply", "sad", "8", "--chat", "--offline"]).unwrap();
        match args.command {
            Some(Command::Reply { mood, intensity, chat, offline, message }) => {
                assert_eq!(mood, "sad");
                assert_eq!(intensity, 8);
                assert!(chat && offline);
                assert!(message.is_none());
            }
            _ => panic!("expected reply subcommand"),
        }

        let args = Args::try_parse_from(["companion"]).unwrap();
        assert!(args.command.is_none());
    }

    #[test]
    fn test_cli_accepts_serve_overrides() {
        let args = Args::try_parse_from(["companion", "serve", "--port", "9000"]).unwrap();
        assert!(matches!(args.command, Some(Command::Serve { port: Some(9000), .. })));
    }
}
