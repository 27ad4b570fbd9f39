//! Unicode to multibyte table generator for the ECI encodings.
//!
//! Reads the reference mapping files for Big5, KS X 1001, Shift JIS,
//! GB 2312, GBK and GB 18030 and writes one C header per encoding with
//! sorted codepoint/multibyte arrays, URO bitmaps and block indexes. Also
//! hosts the two stand-alone filters that rebase third-party charset arrays
//! (see [`remap`]). This is a build-time tool, not a runtime dependency.

pub mod encodings;
pub mod mapping;
pub mod remap;
pub mod render;
pub mod table;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use zint_tools_codegen::{Source, write_output};

use crate::encodings::Encoding;
use crate::table::{CharsetTables, SortedTable};

/// Copyright year written into generated headers unless overridden.
pub const DEFAULT_YEAR: u32 = 2022;

/// Options for a full `eci-mb` run.
#[derive(Debug, Clone)]
pub struct EciConfig {
    /// Directory searched for the reference `.TXT` files.
    pub data_dir: PathBuf,
    /// Directory receiving the generated headers.
    pub out_dir: PathBuf,
    /// Final copyright year.
    pub year: u32,
    /// Generator name recorded in each header's first line.
    pub generator: String,
}

impl Default for EciConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            out_dir: PathBuf::from("."),
            year: DEFAULT_YEAR,
            generator: "zint-tools eci-mb".to_string(),
        }
    }
}

/// What was written for one encoding.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct HeaderSummary {
    /// Header file name, e.g. `big5.h`.
    pub file: String,
    /// Where the mapping file was read from.
    pub source: String,
    /// Entries in the (spliced) codepoint array.
    pub u_entries: usize,
    /// Entries in the multibyte array.
    pub mb_entries: usize,
    /// URO bitmap rows, 0 when the header has none.
    pub uro_rows: usize,
    /// Block-index entries, 0 when the header has none.
    pub u_ind_entries: usize,
}

/// Headers generated in memory, in [`Encoding::ALL`] order.
pub struct Generated {
    /// `(encoding, header text, summary)` per encoding.
    pub headers: Vec<(Encoding, String, HeaderSummary)>,
}

fn read_mapping(enc: Encoding, data_dir: &Path) -> Result<(String, String)> {
    let source = Source::local_or_url(data_dir, enc.file_name(), enc.url());
    let text = source
        .read_to_string()
        .with_context(|| format!("could not read mapping file for {}", enc.name()))?;
    Ok((text, source.to_string()))
}

fn summarize(enc: Encoding, source: String, tables: &CharsetTables) -> HeaderSummary {
    HeaderSummary {
        file: format!("{}.h", enc.name()),
        source,
        u_entries: tables.u.len(),
        mb_entries: tables.mb.len(),
        uro_rows: tables.uro.as_ref().map_or(0, |u| u.used.len()),
        u_ind_entries: tables.u_ind.as_ref().map_or(0, Vec::len),
    }
}

fn build(enc: Encoding, table: &SortedTable, source: String, config: &EciConfig) -> (Encoding, String, HeaderSummary) {
    let tables = CharsetTables::build(table, enc.uro_last(), enc.has_block_index());
    if let Some(uro) = &tables.uro {
        log::debug!(
            "{}: URO entries {}..{} spliced out of {}_u[]",
            enc.name(),
            uro.spliced.start,
            uro.spliced.end,
            enc.name()
        );
    }
    let text = render::render_tables(enc, &tables, &config.generator, config.year);
    (enc, text, summarize(enc, source, &tables))
}

/// Read all six mapping files and render their headers.
///
/// Any unreadable file aborts the run before anything is written.
pub fn generate(config: &EciConfig) -> Result<Generated> {
    let mut headers = Vec::with_capacity(Encoding::ALL.len());

    let (text, src) = read_mapping(Encoding::Big5, &config.data_dir)?;
    headers.push(build(Encoding::Big5, &encodings::big5(&text), src, config));

    let (text, src) = read_mapping(Encoding::Ksx1001, &config.data_dir)?;
    headers.push(build(Encoding::Ksx1001, &encodings::ksx1001(&text), src, config));

    let (text, src) = read_mapping(Encoding::Sjis, &config.data_dir)?;
    headers.push(build(Encoding::Sjis, &encodings::sjis(&text), src, config));

    let (text, src) = read_mapping(Encoding::Gb2312, &config.data_dir)?;
    let gb2312 = encodings::gb2312(&text);
    headers.push(build(Encoding::Gb2312, &gb2312, src, config));

    let (text, src) = read_mapping(Encoding::Gbk, &config.data_dir)?;
    let gbk = encodings::gbk(&text, &gb2312);
    headers.push(build(Encoding::Gbk, &gbk.table, src, config));

    let (text, src) = read_mapping(Encoding::Gb18030, &config.data_dir)?;
    let gb18030 = encodings::gb18030(&text, &gbk.covered);
    let rendered = render::render_gb18030(&gb18030, &config.generator, config.year);
    headers.push((
        Encoding::Gb18030,
        rendered,
        HeaderSummary {
            file: "gb18030.h".to_string(),
            source: src,
            u_entries: gb18030.two_byte.len(),
            mb_entries: gb18030.two_byte.len(),
            uro_rows: 0,
            u_ind_entries: 0,
        },
    ));

    for (_, _, summary) in &headers {
        log::debug!(
            "{}: {} codepoints, {} multibyte values",
            summary.file,
            summary.u_entries,
            summary.mb_entries
        );
    }
    Ok(Generated { headers })
}

/// Generate and write all headers into `config.out_dir`.
pub fn generate_and_write(config: &EciConfig) -> Result<Vec<HeaderSummary>> {
    let generated = generate(config)?;
    let mut summaries = Vec::with_capacity(generated.headers.len());
    for (_, text, summary) in generated.headers {
        let path = config.out_dir.join(&summary.file);
        write_output(Some(&path), &text)
            .with_context(|| format!("could not write \"{}\"", path.display()))?;
        log::info!("wrote {}", path.display());
        summaries.push(summary);
    }
    Ok(summaries)
}
