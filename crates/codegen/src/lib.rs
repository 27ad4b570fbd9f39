//! Shared emission helpers for the zint table generators.
//!
//! Every generator produces C source text that the barcode library includes
//! verbatim, so the banner text, header guards and table-entry layout live
//! here in one place:
//! - [`EmitConfig`]: tab string, copyright banner and header guard switches
//! - [`libzint_copyright`]: the BSD-3-Clause licence block
//! - [`push_tab_entries`]: 8-per-line `static const` array bodies
//! - [`write_output`]: write to a file or stdout

pub mod source;

use std::fs;
use std::io::{self, Write};
use std::path::Path;

pub use source::{Source, SourceError};

/// Name and address carried in every generated copyright line.
pub const COPYRIGHT_HOLDER: &str = "Robin Stuart <rstuart114@gmail.com>";

/// First line of the libzint licence block.
pub const LIBRARY_LINE: &str = "libzint - the open source barcode library";

/// BSD-3-Clause body, each line indented four spaces, without the closing ` */`.
pub const BSD_3_CLAUSE_BODY: &[&str] = &[
    "    Redistribution and use in source and binary forms, with or without",
    "    modification, are permitted provided that the following conditions",
    "    are met:",
    "",
    "    1. Redistributions of source code must retain the above copyright",
    "       notice, this list of conditions and the following disclaimer.",
    "    2. Redistributions in binary form must reproduce the above copyright",
    "       notice, this list of conditions and the following disclaimer in the",
    "       documentation and/or other materials provided with the distribution.",
    "    3. Neither the name of the project nor the names of its contributors",
    "       may be used to endorse or promote products derived from this software",
    "       without specific prior written permission.",
    "",
    "    THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS \"AS IS\" AND",
    "    ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE",
    "    IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE",
    "    ARE DISCLAIMED.  IN NO EVENT SHALL THE COPYRIGHT OWNER OR CONTRIBUTORS BE LIABLE",
    "    FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL",
    "    DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS",
    "    OR SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION)",
    "    HOWEVER CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT",
    "    LIABILITY, OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY",
    "    OUT OF THE USE OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF",
    "    SUCH DAMAGE.",
];

// ── Configuration ───────────────────────────────────────────────────────

/// Layout switches shared by the generators that print a single header.
#[derive(Debug, Clone)]
pub struct EmitConfig {
    /// One level of indentation in generated code.
    pub tab: String,
    /// Print the libzint copyright banner.
    pub copyright: bool,
    /// Wrap the output in `#ifndef`/`#define`/`#endif`.
    pub guard: bool,
}

impl Default for EmitConfig {
    fn default() -> Self {
        Self {
            tab: "    ".to_string(),
            copyright: true,
            guard: true,
        }
    }
}

impl EmitConfig {
    /// `n` copies of the configured tab.
    pub fn tabs(&self, n: usize) -> String {
        self.tab.repeat(n)
    }
}

// ── Banners ─────────────────────────────────────────────────────────────

/// The libzint licence block as lines, from `/*` through ` */`.
///
/// `years` is printed as-is after `Copyright (C)`, e.g. `"2021"` or
/// `"2009-2022"`.
pub fn libzint_copyright_lines(years: &str) -> Vec<String> {
    let mut lines = Vec::with_capacity(BSD_3_CLAUSE_BODY.len() + 5);
    lines.push("/*".to_string());
    lines.push(format!("    {LIBRARY_LINE}"));
    lines.push(format!("    Copyright (C) {years} {COPYRIGHT_HOLDER}"));
    lines.push(String::new());
    lines.extend(BSD_3_CLAUSE_BODY.iter().map(|l| (*l).to_string()));
    lines.push(" */".to_string());
    lines
}

/// The libzint licence block as text ending in a newline.
pub fn libzint_copyright(years: &str) -> String {
    let mut text = libzint_copyright_lines(years).join("\n");
    text.push('\n');
    text
}

/// Copyright year span: a single year, or `start-end` when they differ.
pub fn year_span(start: Option<u32>, end: u32) -> String {
    match start {
        Some(s) if s != end => format!("{s}-{end}"),
        _ => end.to_string(),
    }
}

// ── Table entries ───────────────────────────────────────────────────────

/// Number formatting for array entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryStyle {
    /// ` 0x%04X,`
    Hex,
    /// ` %5d,`
    Decimal,
}

/// Append `values` as array-body lines, eight entries per line, each line
/// prefixed with three spaces.
pub fn push_tab_entries(out: &mut Vec<String>, values: &[u32], style: EntryStyle) {
    for chunk in values.chunks(8) {
        let mut line = String::from("   ");
        for v in chunk {
            match style {
                EntryStyle::Hex => line.push_str(&format!(" 0x{v:04X},")),
                EntryStyle::Decimal => line.push_str(&format!(" {v:5},")),
            }
        }
        out.push(line);
    }
}

// ── Output ──────────────────────────────────────────────────────────────

/// Write generated text to `path`, or to stdout when `path` is `None`.
///
/// Parent directories are created as needed. The file is overwritten whole.
pub fn write_output(path: Option<&Path>, text: &str) -> io::Result<()> {
    match path {
        Some(p) => {
            if let Some(parent) = p.parent()
                && !parent.as_os_str().is_empty()
            {
                fs::create_dir_all(parent)?;
            }
            fs::write(p, text)?;
            log::debug!("wrote {} ({} bytes)", p.display(), text.len());
            Ok(())
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            stdout.flush()
        }
    }
}
