// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Pickpause-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Pickpause and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Pickpause CLI entrypoint.
//!
//! `serve` runs the backend message endpoint, `layout` prints a solved grid as JSON and
//! `send` posts one raw chooser message to a backend.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use pickpause::broker::{self, MessageBroker};
use pickpause::layout::{solve_layout, LayoutRequest};
use pickpause::protocol::{HttpTransport, Payload, RoutingId, Transport, WireMessage};
use pickpause::ChooserConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_PORT: u16 = 8188;

#[derive(Debug, Parser)]
#[command(name = "pickpause", version, about = "Pipeline checkpoint image chooser")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Serve the chooser message endpoint.
    Serve(ServeArgs),
    /// Solve a grid layout and print it as JSON.
    Layout(LayoutArgs),
    /// Post one chooser message to a backend.
    Send(SendArgs),
}

#[derive(Debug, Parser)]
struct ServeArgs {
    #[arg(long, default_value = "127.0.0.1")]
    host: String,
    #[arg(long, default_value_t = DEFAULT_PORT)]
    port: u16,
}

#[derive(Debug, Parser)]
struct LayoutArgs {
    #[arg(long)]
    width: f64,
    #[arg(long)]
    height: f64,
    #[arg(long)]
    count: usize,
    #[arg(long, default_value_t = 1.0)]
    aspect: f64,
    #[arg(long)]
    user_resized: bool,
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Parser)]
struct SendArgs {
    /// Routing id; `-1` or empty for broadcast.
    #[arg(long, default_value = "-1", allow_hyphen_values = true)]
    id: String,
    /// `__cancel__`, `__start__` or an encoded selection such as `0,2,-1,1`.
    #[arg(long, allow_hyphen_values = true)]
    message: String,
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() {
    init_tracing();
    if let Err(err) = run() {
        eprintln!("pickpause: {err:#}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_env("PICKPAUSE_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Serve(args) => run_serve(args),
        Command::Layout(args) => run_layout(args),
        Command::Send(args) => run_send(args),
    }
}

fn load_config(path: Option<&Path>) -> Result<ChooserConfig> {
    let config = match path {
        Some(path) => ChooserConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ChooserConfig::default(),
    };
    let issues = config.validate();
    if !issues.is_empty() {
        bail!("invalid config: {}", issues.join("; "));
    }
    Ok(config)
}

fn run_serve(args: ServeArgs) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread().enable_all().build()?;
    runtime.block_on(async move {
        let listener = tokio::net::TcpListener::bind((args.host.as_str(), args.port))
            .await
            .with_context(|| format!("binding {}:{}", args.host, args.port))?;
        let broker = Arc::new(MessageBroker::new());
        broker::serve(listener, broker, async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutting down");
        })
        .await?;
        Ok(())
    })
}

fn run_layout(args: LayoutArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let request = LayoutRequest::new(args.width, args.height, args.count, args.aspect)
        .with_user_resized(args.user_resized);
    let geometry = solve_layout(&request, &config.layout);
    println!("{}", serde_json::to_string_pretty(&geometry)?);
    Ok(())
}

fn run_send(args: SendArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let payload = Payload::parse(&args.message).context("parsing message")?;
    let message = WireMessage::new(RoutingId::from_wire(&args.id), payload);
    let transport = HttpTransport::from_config(&config.backend)?;

    let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
    runtime.block_on(transport.send(&message))?;
    info!(url = transport.url(), %message, "message sent");
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::{Cli, Command};

    #[test]
    fn parses_layout_arguments() {
        let cli = Cli::try_parse_from([
            "pickpause", "layout", "--width", "800", "--height", "600", "--count", "5",
        ])
        .expect("parse");
        let Command::Layout(args) = cli.command else {
            panic!("expected layout command");
        };
        assert_eq!(args.count, 5);
        assert!((args.aspect - 1.0).abs() < f64::EPSILON);
        assert!(!args.user_resized);
    }

    #[test]
    fn send_accepts_negative_separator_in_message() {
        let cli = Cli::try_parse_from(["pickpause", "send", "--id", "-1", "--message", "-1,0"])
            .expect("parse");
        let Command::Send(args) = cli.command else {
            panic!("expected send command");
        };
        assert_eq!(args.id, "-1");
        assert_eq!(args.message, "-1,0");
    }

    #[test]
    fn serve_defaults_to_loopback() {
        let cli = Cli::try_parse_from(["pickpause", "serve"]).expect("parse");
        let Command::Serve(args) = cli.command else {
            panic!("expected serve command");
        };
        assert_eq!(args.host, "127.0.0.1");
        assert_eq!(args.port, 8188);
    }
}
