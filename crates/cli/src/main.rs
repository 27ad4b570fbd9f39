//! `zint-tools`: command-line front end for the zint build-time generators.

mod render;

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use zint_tools_charset::remap::{GB2312_FILTER, RemapFilter, SJIS_FILTER};
use zint_tools_charset::{DEFAULT_YEAR, EciConfig, generate_and_write};
use zint_tools_codegen::{EmitConfig, Source, write_output};
use zint_tools_gs1_lint::{DEFAULT_SPEC_URL, LintConfig, compile};
use zint_tools_tables::{iso3166, pwr928, qr_masks};
use zint_tools_version::{REMINDER, Version, bump};

use crate::render::{Format, render_error, status};

// ── CLI definition ──────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "zint-tools",
    version,
    about = "Build-time generators for zint: charset tables, lookup tables, GS1 lint and version bumps"
)]
struct Cli {
    /// Output mode: "pretty" (default) sends status lines and errors to
    /// stderr, "json" prints results and error envelopes on stdout.
    #[arg(long, global = true, value_parser = ["pretty", "json"])]
    output: Option<String>,

    #[command(subcommand)]
    cmd: Cmd,
}

/// Header layout switches shared by the configurable generators.
#[derive(clap::Args, Debug)]
struct EmitArgs {
    /// Leave out the copyright block.
    #[arg(long)]
    no_copyright: bool,
    /// Leave out the `#ifndef` include guard.
    #[arg(long)]
    no_guard: bool,
    /// Indent unit for generated code.
    #[arg(short = 't', long, default_value = "    ")]
    tab: String,
}

impl EmitArgs {
    fn config(&self) -> EmitConfig {
        EmitConfig {
            tab: self.tab.clone(),
            copyright: !self.no_copyright,
            guard: !self.no_guard,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Cmd {
    // ── Charset tables ───────────────────────────────────────────────
    /// Generate big5.h, ksx1001.h, sjis.h, gb2312.h, gbk.h and gb18030.h.
    EciMb {
        /// Directory holding the reference mapping files. Missing files are
        /// fetched from their upstream URL where one is known.
        #[arg(short = 'd', long, default_value = "data")]
        data_dir: PathBuf,
        /// Directory receiving the headers.
        #[arg(short = 'o', long, default_value = ".")]
        out_dir: PathBuf,
        /// Final copyright year.
        #[arg(long, default_value_t = DEFAULT_YEAR)]
        year: u32,
    },
    /// Rewrite JIS X 0208 values in a mapping file to Shift JIS.
    CnvSjis {
        /// Input file; stdin when omitted.
        input: Option<PathBuf>,
        /// Output file; stdout when omitted.
        #[arg(short = 'o', long)]
        out: Option<PathBuf>,
    },
    /// Rewrite GB 2312 values in a mapping file to EUC-CN.
    CnvGb2312 {
        /// Input file; stdin when omitted.
        input: Option<PathBuf>,
        /// Output file; stdout when omitted.
        #[arg(short = 'o', long)]
        out: Option<PathBuf>,
    },

    // ── Lookup tables ────────────────────────────────────────────────
    /// Generate the ISO 3166 country code checkers.
    Iso3166 {
        /// Output file; stdout when omitted.
        #[arg(short = 'o', long)]
        out: Option<PathBuf>,
        #[command(flatten)]
        emit: EmitArgs,
    },
    /// Generate the pre-computed QR and Micro QR mask tiles.
    QrMasks {
        /// Output file; stdout when omitted.
        #[arg(short = 'o', long)]
        out: Option<PathBuf>,
    },
    /// Generate the powers of 928 table for PDF417 numeric compaction.
    Pwr928 {
        /// Output file; stdout when omitted.
        #[arg(short = 'o', long)]
        out: Option<PathBuf>,
    },

    // ── GS1 ──────────────────────────────────────────────────────────
    /// Compile the GS1 AI format specification into gs1_lint.h.
    Gs1Lint {
        /// Specification file or URL.
        #[arg(short = 'f', long, default_value = DEFAULT_SPEC_URL)]
        file: String,
        /// Output file; stdout when omitted.
        #[arg(short = 'o', long)]
        out: Option<PathBuf>,
        /// Skip the length-only checker pass.
        #[arg(long)]
        no_length_only: bool,
        #[command(flatten)]
        emit: EmitArgs,
    },

    // ── Release ──────────────────────────────────────────────────────
    /// Set the version in every file of a zint source tree.
    UpdateVersion {
        major: u32,
        minor: u32,
        release: u32,
        /// 0 for a release, 9 for a development build.
        #[arg(default_value_t = 0)]
        build: u32,
        /// Root of the zint source tree.
        #[arg(long, default_value = ".")]
        root: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .init();
    let format = Format::resolve(cli.output.as_deref());

    let lint_source = match &cli.cmd {
        Cmd::Gs1Lint { file, .. } => Some(file.clone()),
        _ => None,
    };
    let result = match cli.cmd {
        Cmd::EciMb {
            data_dir,
            out_dir,
            year,
        } => cmd_eci_mb(data_dir, out_dir, year, format),
        Cmd::CnvSjis { input, out } => cmd_filter(&SJIS_FILTER, input.as_deref(), out.as_deref()),
        Cmd::CnvGb2312 { input, out } => cmd_filter(&GB2312_FILTER, input.as_deref(), out.as_deref()),
        Cmd::Iso3166 { out, emit } => cmd_iso3166(out.as_deref(), &emit, format),
        Cmd::QrMasks { out } => emit_table("qr.h", &qr_masks::render(), out.as_deref(), format),
        Cmd::Pwr928 { out } => emit_table("pdf417_tabs.h", &pwr928::render(), out.as_deref(), format),
        Cmd::Gs1Lint {
            file,
            out,
            no_length_only,
            emit,
        } => cmd_gs1_lint(&file, out.as_deref(), no_length_only, &emit, format),
        Cmd::UpdateVersion {
            major,
            minor,
            release,
            build,
            root,
        } => cmd_update_version(&root, major, minor, release, build, format),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            render_error(&e, format, lint_source.as_deref());
            ExitCode::FAILURE
        }
    }
}

// ── Command implementations ─────────────────────────────────────────────

fn cmd_eci_mb(data_dir: PathBuf, out_dir: PathBuf, year: u32, format: Format) -> Result<()> {
    let config = EciConfig {
        data_dir,
        out_dir,
        year,
        ..EciConfig::default()
    };
    let headers = generate_and_write(&config)?;
    match format {
        Format::Json => {
            let out = serde_json::json!({ "ok": true, "headers": headers });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Format::Pretty => {
            for h in &headers {
                status(
                    format,
                    &format!(
                        "{} ({} codepoints, {} multibyte) from {}",
                        h.file, h.u_entries, h.mb_entries, h.source
                    ),
                );
            }
        }
    }
    Ok(())
}

fn cmd_filter(filter: &RemapFilter, input: Option<&Path>, out: Option<&Path>) -> Result<()> {
    let text = match input {
        Some(path) => {
            let bytes = fs::read(path).with_context(|| format!("could not read \"{}\"", path.display()))?;
            String::from_utf8_lossy(&bytes).into_owned()
        }
        None => {
            let mut buf = Vec::new();
            io::stdin().read_to_end(&mut buf).context("could not read stdin")?;
            String::from_utf8_lossy(&buf).into_owned()
        }
    };
    let rewritten = filter.apply(&text);
    if rewritten.is_empty() {
        log::warn!("no line contains \"{}\"; output is empty", filter.marker);
    }
    write_output(out, &rewritten).context("could not write output")?;
    Ok(())
}

fn cmd_iso3166(out: Option<&Path>, emit: &EmitArgs, format: Format) -> Result<()> {
    let text = iso3166::render(&emit.config(), "zint-tools iso3166");
    emit_table("iso3166.h", &text, out, format)
}

fn cmd_gs1_lint(file: &str, out: Option<&Path>, no_length_only: bool, emit: &EmitArgs, format: Format) -> Result<()> {
    let source = Source::parse(file);
    let text = source.read_to_string()?;
    let config = LintConfig {
        emit: emit.config(),
        length_only: !no_length_only,
        ..LintConfig::default()
    };
    let header = compile(&text, &source.to_string(), &config)?;
    emit_table("gs1_lint.h", &header, out, format)
}

fn cmd_update_version(root: &Path, major: u32, minor: u32, release: u32, build: u32, format: Format) -> Result<()> {
    let version = Version::new(major, minor, release, build)?;
    bump(root, &version)?;
    match format {
        Format::Json => {
            let out = serde_json::json!({ "ok": true, "version": version.to_string() });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Format::Pretty => status(format, &format!("version set to {version}")),
    }
    eprintln!("{REMINDER}");
    Ok(())
}

/// Write a generated header to `out`, or to stdout when no file is given.
fn emit_table(name: &str, text: &str, out: Option<&Path>, format: Format) -> Result<()> {
    write_output(out, text).with_context(|| format!("could not write {name}"))?;
    if let Some(path) = out {
        status(format, &format!("wrote {name} to {}", path.display()));
    }
    Ok(())
}
