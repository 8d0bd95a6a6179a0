//! hostfacts - Host System Facts Binary
//!
//! A standalone binary that prints the probed host facts once or keeps
//! re-fetching them at an interval.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use futures_util::StreamExt;
use hostfacts::{SystemFacts, SystemInfoProbe, DEFAULT_WATCH_INTERVAL_MS};
use std::time::Duration;
use tracing::{error, info, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "hostfacts")]
#[command(about = "Host system facts probe")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = "Gathers hostname, distro, CPU, memory and temperature \
facts from shell utilities and system files, with per-fact fallbacks")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the facts once and print them (default)
    Show(ShowArgs),

    /// Re-fetch at an interval and print each new snapshot
    Watch(WatchArgs),
}

#[derive(Args)]
struct ShowArgs {
    /// Output format: json or pretty
    #[arg(short, long, default_value = "pretty")]
    format: String,
}

#[derive(Args)]
struct WatchArgs {
    /// Re-fetch interval in milliseconds
    #[arg(short, long, default_value_t = DEFAULT_WATCH_INTERVAL_MS)]
    interval: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(&cli)?;

    match &cli.command {
        Some(Commands::Show(args)) => show_command(args).await?,
        Some(Commands::Watch(args)) => watch_command(args).await?,
        None => {
            show_command(&ShowArgs {
                format: "pretty".to_string(),
            })
            .await?;
        }
    }

    Ok(())
}

fn init_logging(cli: &Cli) -> Result<()> {
    let level = if cli.debug {
        Level::DEBUG
    } else if cli.verbose {
        Level::INFO
    } else {
        Level::WARN
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}

async fn show_command(args: &ShowArgs) -> Result<()> {
    let probe = SystemInfoProbe::init().await;
    let facts = probe.facts();

    match args.format.as_str() {
        "json" => {
            let json = serde_json::to_string_pretty(&facts)?;
            println!("{}", json);
        }
        "pretty" => {
            print_facts(&facts);
        }
        _ => {
            error!("Unsupported format: {}. Use 'json' or 'pretty'", args.format);
            std::process::exit(1);
        }
    }

    Ok(())
}

async fn watch_command(args: &WatchArgs) -> Result<()> {
    info!("watching host facts every {}ms", args.interval);

    let probe = SystemInfoProbe::new();
    let mut changes = probe.changes();

    let mut ticker = tokio::time::interval(Duration::from_millis(args.interval));
    loop {
        ticker.tick().await;
        probe.refresh().await;
        if let Some(facts) = changes.next().await {
            print_facts(&facts);
            println!();
        }
    }
}

fn print_facts(facts: &SystemFacts) {
    println!(
        "Host Facts ({})",
        facts.fetched_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!("==========================================");
    println!("  Hostname: {}", facts.hostname);
    println!("  Distro:   {}", facts.distro);
    println!("  CPU:      {}", facts.cpu_model);
    println!("  RAM:      {} / {}", facts.ram_used, facts.ram_total);
    println!("  Temp:     {}", facts.cpu_temp);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from(["hostfacts", "watch", "--interval", "1000"]).unwrap();
        match cli.command {
            Some(Commands::Watch(args)) => assert_eq!(args.interval, 1000),
            _ => panic!("expected watch command"),
        }
    }

    #[test]
    fn test_default_values() {
        let cli = Cli::try_parse_from(["hostfacts"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.verbose);

        let cli = Cli::try_parse_from(["hostfacts", "watch"]).unwrap();
        match cli.command {
            Some(Commands::Watch(args)) => {
                assert_eq!(args.interval, DEFAULT_WATCH_INTERVAL_MS);
            }
            _ => panic!("expected watch command"),
        }
    }
}
