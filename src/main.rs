use std::net::IpAddr;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use reality_check::api::{self, DEFAULT_PORT, ServerConfig};
use reality_check::core::{ConcernKind, Round};

#[derive(Parser, Debug)]
#[command(
    name = "reality-check",
    about = "Student finance reality check: deal a plan, project ten years, find what does not add up"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the JSON API
    Serve {
        #[arg(long, env = "REALITY_CHECK_BIND", default_value = "0.0.0.0")]
        bind: IpAddr,
        #[arg(long, env = "REALITY_CHECK_PORT", default_value_t = DEFAULT_PORT)]
        port: u16,
    },
    /// Deal one round and print the scenario, projection and checklist
    Deal {
        #[arg(long, help = "Seed for a reproducible round; random when omitted")]
        seed: Option<u64>,
    },
    /// Grade a diagnosis for the round dealt from SEED
    Grade {
        #[arg(long)]
        seed: u64,
        #[arg(long = "select", value_name = "CONCERN_ID")]
        selected: Vec<ConcernKind>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Serve { bind, port } => {
            api::run_http_server(ServerConfig { bind, port })
                .await
                .with_context(|| format!("failed to serve on {bind}:{port}"))?;
        }
        Command::Deal { seed } => {
            let round = Round::deal(seed.unwrap_or_else(rand::random));
            let body = serde_json::json!({
                "seed": round.seed,
                "scenario": round.scenario,
                "projection": round.projection,
                "snapshot": round.snapshot(),
                "checklist": round.checklist(),
            });
            println!(
                "{}",
                serde_json::to_string_pretty(&body).context("failed to render round")?
            );
        }
        Command::Grade { seed, selected } => {
            let round = Round::deal(seed);
            let feedback = round.submit(&selected);
            println!(
                "{}",
                serde_json::to_string_pretty(&feedback).context("failed to render feedback")?
            );
        }
    }
    Ok(())
}
