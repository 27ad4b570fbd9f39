//! Error and status rendering for the terminal or for JSON consumers.
//!
//! GS1 specification errors are shown as ariadne reports on the offending
//! line. Everything else is a plain `error:` line with the anyhow chain, or
//! a JSON envelope on stdout under `--output json`.

use std::io::{self, IsTerminal};

use ariadne::{Color, Config, Label, Report, ReportKind, Source};
use zint_tools_gs1_lint::LintError;

/// How results and failures are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Format {
    /// Generated text on stdout, human-readable status and errors on stderr.
    Pretty,
    /// Machine-readable results and error envelopes on stdout.
    Json,
}

impl Format {
    /// JSON only when asked for. Generated headers are usually redirected
    /// into a file, so a non-terminal stdout says nothing about the caller.
    pub(crate) fn resolve(explicit: Option<&str>) -> Self {
        match explicit {
            Some("json") => Format::Json,
            _ => Format::Pretty,
        }
    }
}

/// Source-annotated report for a bad specification line.
///
/// Only the offending line is shown, labelled with its real line number.
fn render_lint_error_pretty(source_name: &str, err: &LintError) {
    let line = err.line();
    let span = err.span();
    let start = span.start.min(line.len());
    let end = span.end.min(line.len()).max(start);
    // Pad with blank lines so ariadne numbers the line as in the input file.
    let padded = format!("{}{line}\n", "\n".repeat(err.line_no().saturating_sub(1)));
    let offset = padded.len() - line.len() - 1;

    let mut cache = (source_name, Source::from(padded.as_str()));
    let report = Report::build(ReportKind::Error, (source_name, offset + start..offset + end))
        .with_message(err.to_string())
        .with_config(Config::default().with_color(io::stderr().is_terminal()))
        .with_label(
            Label::new((source_name, offset + start..offset + end))
                .with_message(match err {
                    LintError::Validator { .. } => "expected [NXC]<len>[,checker...]",
                    LintError::Range { .. } => "range end is below its start",
                    LintError::Ai { .. } => "AIs have 2 to 4 digits",
                    _ => "expected `AI[-AI] [*] SPEC [# comment]`",
                })
                .with_color(Color::Red),
        )
        .finish();
    if report.eprint(&mut cache).is_err() {
        eprintln!("error: {err}");
    }
}

/// Report a failed command.
pub(crate) fn render_error(err: &anyhow::Error, format: Format, lint_source: Option<&str>) {
    let lint = err.downcast_ref::<LintError>();
    match format {
        Format::Json => {
            let mut out = serde_json::json!({
                "success": false,
                "error": if lint.is_some() { "parse_failed" } else { "command_failed" },
                "message": format!("{err:#}"),
            });
            if let Some(lint) = lint {
                out["line"] = lint.line_no().into();
            }
            match serde_json::to_string_pretty(&out) {
                Ok(text) => println!("{text}"),
                Err(_) => eprintln!("error: {err:#}"),
            }
        }
        Format::Pretty => match lint {
            Some(lint) => render_lint_error_pretty(lint_source.unwrap_or("<input>"), lint),
            None => eprintln!("error: {err:#}"),
        },
    }
}

/// A one-line status note on stderr (pretty only).
pub(crate) fn status(format: Format, message: &str) {
    if format == Format::Pretty {
        use ariadne::Fmt;
        eprintln!("{}: {message}", "ok".fg(Color::Green));
    }
}
