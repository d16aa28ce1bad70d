//! # homedash — terminal smart-home dashboard
//!
//! Reads commands from stdin, applies them to the dashboard and redraws it on
//! stdout. Logs go to stderr.

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::EnvFilter;

use homedash::command::{Command, CommandError};
use homedash::config::Config;
use homedash::dashboard::{Dashboard, Outcome};
use homedash::events::log_events;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.logging.filter).unwrap_or_else(|err| {
            eprintln!("invalid log filter {:?}: {err}", config.logging.filter);
            EnvFilter::new("info")
        }))
        .with_writer(std::io::stderr)
        .init();

    let dashboard = Dashboard::from_config(&config).context("failed to build dashboard")?;
    tokio::spawn(log_events(dashboard.events().stream()));

    tracing::info!(
        room = %dashboard.store().selected_room(),
        city = %config.dashboard.city,
        policy = ?dashboard.weather_policy(),
        "homedash started"
    );
    dashboard.start().await.context("failed to start dashboard")?;

    run(&dashboard).await
}

async fn run(dashboard: &Dashboard) -> anyhow::Result<()> {
    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut weather = dashboard.weather_updates();

    print(&mut stdout, &dashboard.render()).await?;
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let text = match line.parse::<Command>() {
                    Ok(command) => match dashboard.execute(command).await {
                        Ok(Outcome::Quit) => break,
                        Ok(Outcome::Message(text)) => text,
                        Ok(Outcome::Render | Outcome::Fetching(_)) => dashboard.render(),
                        Err(err) => {
                            tracing::warn!(%err, "command rejected");
                            format!("error: {err}")
                        }
                    },
                    Err(CommandError::Empty) => continue,
                    Err(err) => format!("error: {err}"),
                };
                print(&mut stdout, &text).await?;
            }
            Ok(()) = weather.changed() => {
                let loading = weather.borrow_and_update().loading;
                if !loading {
                    print(&mut stdout, &dashboard.render()).await?;
                }
            }
        }
    }

    tracing::info!("homedash stopped");
    Ok(())
}

async fn print(stdout: &mut tokio::io::Stdout, text: &str) -> std::io::Result<()> {
    stdout.write_all(text.as_bytes()).await?;
    if !text.ends_with('\n') {
        stdout.write_all(b"\n").await?;
    }
    stdout.write_all(b"> ").await?;
    stdout.flush().await
}
