// Terminal front-end for the assistant link client.
//
// Reads visitor turns from stdin and streams the assistant's replies to stdout.
// `/suggest <n>` sends a configured starter question, `/quit` exits.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use assistant_link::{AssistantLinkClient, MemoryPage, SendOutcome, WidgetConfig, WidgetEvent};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Debug, Parser)]
#[command(name = "assistant-link", version, about = "Chat with a remote assistant service")]
struct Args {
    /// JSON widget configuration (camelCase keys, all optional)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Assistant endpoint, overrides `serverUrl` from the config file
    #[arg(long, env = "ASSISTANT_LINK_SERVER_URL")]
    server_url: Option<String>,

    /// Fixed reconnect delay in milliseconds, overrides `reconnectDelay`
    #[arg(long)]
    reconnect_delay: Option<u64>,
}

fn load_config(args: &Args) -> Result<WidgetConfig> {
    let mut config = match &args.config {
        Some(path) => WidgetConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => WidgetConfig::default(),
    };
    if let Some(url) = &args.server_url {
        config.server_url.clone_from(url);
    }
    if let Some(delay) = args.reconnect_delay {
        config.reconnect_delay_ms = delay;
    }
    config.validate()?;
    Ok(config)
}

fn handle_line(client: &AssistantLinkClient, line: &str) -> Result<()> {
    let outcome = if let Some(index) = line.strip_prefix("/suggest ") {
        let index: usize = index.trim().parse().context("usage: /suggest <n>")?;
        client.send_suggestion(index.saturating_sub(1))?
    } else {
        client.set_input(line);
        client.submit_input()?
    };

    match outcome {
        SendOutcome::Sent | SendOutcome::Empty => {}
        SendOutcome::NotConnected => log::warn!("Not connected yet, message dropped"),
        SendOutcome::Busy => log::warn!("Still answering, message dropped"),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = load_config(&args)?;

    println!("{} - {}", config.agent_name, config.agent_tagline);
    println!("{}\n{}", config.welcome_title, config.welcome_message);
    for (i, question) in config.suggested_questions.iter().enumerate() {
        println!("  /suggest {} -> {question}", i + 1);
    }

    let mut page = MemoryPage::new();
    let mut client = AssistantLinkClient::initialize(config, &mut page)?;
    client.open();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut printed = 0usize;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let line = line.trim();
                if line == "/quit" {
                    break;
                }
                if let Err(e) = handle_line(&client, line) {
                    log::error!("{e:#}");
                }
            }
            event = client.next_event() => {
                let Some(event) = event else { break };
                match event {
                    WidgetEvent::ConnectionChanged(state) => log::info!("Status: {state}"),
                    WidgetEvent::ReplyStarted => {
                        printed = 0;
                        print!("{}: ", client.config().avatar_text);
                    }
                    WidgetEvent::ReplyUpdated { text, .. } => {
                        print!("{}", text.get(printed..).unwrap_or_default());
                        printed = text.len();
                    }
                    WidgetEvent::ReplyCompleted { .. } => println!(),
                }
                std::io::stdout().flush()?;
                client.paint(&mut page);
            }
        }
    }

    client.shutdown().await;
    Ok(())
}
