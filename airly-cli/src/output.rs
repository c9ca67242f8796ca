//! Human-friendly output formatting.

use airly_core::{
    AirlyError, ChartStyle, Report,
    report::{GUIDELINE_HEADER, GUIDELINES, READ_MORE},
};
use colored::Colorize;
use std::io::{self, Write};

pub fn print_report<W: Write>(out: &mut W, report: &Report) -> io::Result<()> {
    writeln!(out, "{}", report.render(&ChartStyle::default()))?;

    if report.is_empty() {
        tracing::warn!(installation = %report.installation.id, "nothing to chart");
        writeln!(out, "\nThis installation reports no particulate matter values right now.")?;
    }

    writeln!(out, "\n{GUIDELINE_HEADER}\n")?;
    for line in GUIDELINES {
        writeln!(out, "{} {line}", "›".cyan())?;
    }
    writeln!(out, "\n{READ_MORE}")?;

    Ok(())
}

/// One failure line plus the error kind's summary; the full chain only goes to the debug log.
pub fn write_failure<W: Write>(out: &mut W, err: &anyhow::Error) -> io::Result<()> {
    tracing::debug!(error = ?err, "invocation failed");

    writeln!(out, "{} Something went wrong :(", "✖".red())?;
    if let Some(known) = err.downcast_ref::<AirlyError>() {
        writeln!(out, "{known}")?;
    }

    Ok(())
}

pub fn print_failure(err: &anyhow::Error) {
    // Nothing sensible left to do if stderr itself is gone.
    let _ = write_failure(&mut io::stderr().lock(), err);
}
