use std::time::Duration;

use clap::Parser;
use skirmish::prelude::*;
use tracing_subscriber::EnvFilter;

/// Turn-based duel server.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Address to bind to
    #[arg(short = 'H', long, default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Seconds without activity before an idle tick is logged
    #[arg(long, default_value_t = DEFAULT_IDLE_TIMEOUT.as_secs())]
    idle_secs: u64,

    /// Seed the dice for reproducible matches
    #[arg(long)]
    seed: Option<u64>,

    /// Enable the cheat hook: chat lines containing this token grant power moves
    #[arg(long)]
    cheat_token: Option<String>,

    /// Power moves granted by the cheat hook
    #[arg(long, default_value_t = DEFAULT_CHEAT_POWER_MOVES)]
    cheat_power_moves: u32,
}

#[tokio::main]
async fn main() -> Result<(), SkirmishError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let config = ArenaConfig {
        cheat: args.cheat_token.map(|token| CheatHook {
            token,
            power_moves: args.cheat_power_moves,
        }),
        ..ArenaConfig::default()
    };

    let mut builder = SkirmishServer::builder()
        .bind(&format!("{}:{}", args.host, args.port))
        .idle_timeout(Duration::from_secs(args.idle_secs))
        .arena_config(config);
    if let Some(seed) = args.seed {
        builder = builder.seed(seed);
    }
    let server = builder.build().await?;

    tokio::select! {
        result = server.run() => result,
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("shutting down");
            Ok(())
        }
    }
}
