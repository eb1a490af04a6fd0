//! report-relay — report template relay.
//!
//! Entry point and error handling boundary. Uses `anyhow` for
//! ergonomic error propagation and user-facing messages.

mod cli;

use report_relay::binder::Binder;
use report_relay::client::http::HttpReportApi;
use report_relay::config::Config;
use report_relay::constants;
use report_relay::env::Env;
use report_relay::logging;
use report_relay::reports::ReportService;
use report_relay::server;
use report_relay::templates::TemplateStore;

use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use cli::args::{Cli, Command, ReportArgs, ServeArgs};

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {err:#}");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match cli.command {
        Command::Serve(args) => run_serve(cli.config.as_deref(), args).await,
        Command::Fetch(args) => run_fetch(cli.config.as_deref(), args).await,
        Command::Preview(args) => run_preview(cli.config.as_deref(), args).await,
        Command::Version => run_version(),
    }
}

/// Print detailed version and build information.
fn run_version() -> Result<()> {
    use colored::Colorize;

    println!(
        "{} {}",
        constants::APP_NAME.bold(),
        constants::VERSION.green().bold()
    );
    println!("{}     {}", "target:".dimmed(), constants::TARGET);
    Ok(())
}

/// Load layered configuration relative to the working directory.
fn load_config(explicit: Option<&Path>, template_dir: Option<PathBuf>) -> Result<Config> {
    let cwd = std::env::current_dir().context("could not determine working directory")?;
    let mut config =
        Config::load(explicit, &cwd, &Env::real()).context("failed to load configuration")?;
    if let Some(dir) = template_dir {
        config.templates.dir = dir;
    }
    Ok(config)
}

/// Build the report pipeline from configuration.
fn build_service(config: &Config) -> Result<ReportService> {
    let remote = config.remote().context("remote API is not configured")?;
    let api = HttpReportApi::new(&remote.api_url).context("failed to create API client")?;
    tracing::debug!(?remote, templates = %config.templates.dir.display(), "pipeline configured");

    Ok(ReportService::new(
        remote,
        TemplateStore::new(config.templates.dir.clone()),
        Binder::new(&config.binding),
        Arc::new(api),
    ))
}

/// Run the HTTP dispatcher.
async fn run_serve(config_path: Option<&Path>, args: ServeArgs) -> Result<()> {
    let mut config = load_config(config_path, args.template_dir)?;
    if let Some(port) = args.port {
        config.configs.port = Some(port);
    }
    if let Some(host) = args.host {
        config.server.host = host;
    }

    let service = Arc::new(build_service(&config)?);
    if !service.store().dir().is_dir() {
        tracing::warn!(
            dir = %service.store().dir().display(),
            "template directory does not exist; every report type will be unsupported"
        );
    }

    let addr = format!("{}:{}", config.server.host, config.port());
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    server::serve(listener, service).await
}

/// Run one report and print the normalized result.
async fn run_fetch(config_path: Option<&Path>, args: ReportArgs) -> Result<()> {
    let config = load_config(config_path, args.template_dir.clone())?;
    let service = build_service(&config)?;

    let data = service
        .get_report(&args.report_type, &args.to_request())
        .await
        .with_context(|| format!("report '{}' failed", args.report_type))?;

    println!("{}", serde_json::to_string_pretty(&data)?);
    Ok(())
}

/// Fill and sign a template, printing the envelope instead of sending it.
async fn run_preview(config_path: Option<&Path>, args: ReportArgs) -> Result<()> {
    let config = load_config(config_path, args.template_dir.clone())?;
    let service = build_service(&config)?;

    let prepared = service
        .prepare(&args.report_type, &args.to_request())
        .await
        .with_context(|| format!("report '{}' could not be prepared", args.report_type))?;

    cli::print_preview(&prepared)?;
    Ok(())
}
