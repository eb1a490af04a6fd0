//! Clap argument types.

use clap::Parser;
use std::path::PathBuf;

use report_relay::models::ReportRequest;

/// Report template relay.
#[derive(Parser, Debug)]
#[command(
    name = "report-relay",
    version = report_relay::constants::VERSION,
    about = "Fill report templates, sign them and relay them to the reporting API",
)]
pub struct Cli {
    /// Config file to use instead of ./report-relay.toml.
    #[arg(long, global = true, env = "RELAY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP dispatcher (POST /reports/:type).
    Serve(ServeArgs),

    /// Run one report and print the normalized result as JSON.
    Fetch(ReportArgs),

    /// Fill and sign a template without calling the API.
    Preview(ReportArgs),

    /// Print version and build information.
    Version,
}

/// Arguments for the `serve` subcommand.
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Listen port (overrides PORT).
    #[arg(long)]
    pub port: Option<u16>,

    /// Bind address (overrides RELAY_HOST).
    #[arg(long)]
    pub host: Option<String>,

    /// Directory holding `<type>.txt` templates.
    #[arg(long)]
    pub template_dir: Option<PathBuf>,
}

/// Arguments shared by `fetch` and `preview`.
#[derive(Parser, Debug)]
pub struct ReportArgs {
    /// Report type (template file name without `.txt`).
    pub report_type: String,

    /// Client identifier for templates with a client slot.
    #[arg(long)]
    pub client_number: Option<String>,

    /// Range start (MM/DD/YYYY); defaults to today.
    #[arg(long)]
    pub date_from: Option<String>,

    /// Range end (MM/DD/YYYY); defaults to today.
    #[arg(long)]
    pub date_to: Option<String>,

    /// Invoice number for the invoice report.
    #[arg(long)]
    pub invoice_number: Option<String>,

    /// Directory holding `<type>.txt` templates.
    #[arg(long)]
    pub template_dir: Option<PathBuf>,
}

impl ReportArgs {
    /// Build the request payload the dispatcher would receive.
    pub fn to_request(&self) -> ReportRequest {
        let clean = |v: &Option<String>| {
            v.as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };
        ReportRequest {
            client_number: clean(&self.client_number),
            date_from: clean(&self.date_from),
            date_to: clean(&self.date_to),
            invoice_number: clean(&self.invoice_number),
        }
    }
}
