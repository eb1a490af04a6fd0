//! CLI command definitions and terminal output.
//!
//! Uses clap derive macros for argument definitions.

pub mod args;

use std::io::{self, Write};

use report_relay::reports::PreparedReport;

/// Print a prepared report for the `preview` command.
///
/// The envelope goes to stdout as JSON so it can be piped; the labels go to
/// stderr.
pub fn print_preview(prepared: &PreparedReport) -> io::Result<()> {
    write_preview(prepared, &mut io::stdout().lock(), &mut io::stderr().lock())
}

/// Write the preview: envelope JSON to `out`, summary labels to `labels`.
fn write_preview(
    prepared: &PreparedReport,
    out: &mut impl Write,
    labels: &mut impl Write,
) -> io::Result<()> {
    use colored::Colorize;

    let envelope = serde_json::to_string_pretty(&prepared.envelope)?;

    writeln!(
        labels,
        "  {} {}",
        "report:".cyan(),
        prepared.report_type.bold()
    )?;
    writeln!(labels, "  {} {}", "signature:".cyan(), prepared.signature())?;
    writeln!(
        labels,
        "  {} {} bytes",
        "pluginData:".cyan(),
        prepared.plugin_data().len()
    )?;
    writeln!(labels)?;
    labels.flush()?;

    writeln!(out, "{envelope}")?;
    out.flush()
}
