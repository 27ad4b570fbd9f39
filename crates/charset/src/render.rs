//! C header text for the generated tables.

use zint_tools_codegen::{EntryStyle, libzint_copyright_lines, push_tab_entries, year_span};

use crate::encodings::{Encoding, Gb18030Tables};
use crate::table::{CharsetTables, UroBlock};

fn push_header(out: &mut Vec<String>, enc: Encoding, generator: &str, year: u32) {
    let name = enc.name();
    out.push(format!(
        "/*  {name}.h - tables for Unicode to {}, generated by \"{generator}\"",
        enc.description()
    ));
    match enc.provenance_note() {
        Some(note) => {
            out.push(format!("    from \"{}\"", enc.provenance()));
            out.push(format!("    {note} */"));
        }
        None => out.push(format!("    from \"{}\" */", enc.provenance())),
    }
    out.extend(libzint_copyright_lines(&year_span(enc.start_year(), year)));
    out.push("/* SPDX-License-Identifier: BSD-3-Clause */".to_string());
    out.push(String::new());
    let caps = name.to_ascii_uppercase();
    out.push(format!("#ifndef Z_{caps}_H"));
    out.push(format!("#define Z_{caps}_H"));
}

fn push_footer(out: &mut Vec<String>, enc: Encoding) {
    out.push(String::new());
    out.push(format!("#endif /* Z_{}_H */", enc.name().to_ascii_uppercase()));
}

fn push_array(
    out: &mut Vec<String>,
    comment: &[&str],
    decl: &str,
    values: &[u32],
    style: EntryStyle,
) {
    out.push(String::new());
    match comment {
        [single] => out.push(format!("/* {single} */")),
        [first, rest @ ..] => {
            out.push(format!("/* {first}"));
            for (i, line) in rest.iter().enumerate() {
                if i + 1 == rest.len() {
                    out.push(format!("   {line} */"));
                } else {
                    out.push(format!("   {line}"));
                }
            }
        }
        [] => {}
    }
    out.push(format!("static const unsigned short {decl}[{}] = {{", values.len()));
    push_tab_entries(out, values, style);
    out.push("};".to_string());
}

fn push_uro(out: &mut Vec<String>, name: &str, uro: &UroBlock) {
    push_array(
        out,
        &["Unicode usage bit-flags for URO (U+4E00-U+9FFF) block"],
        &format!("{name}_uro_u"),
        &uro.used,
        EntryStyle::Hex,
    );
    push_array(
        out,
        &["Multibyte indexes for URO (U+4E00-U+9FFF) block"],
        &format!("{name}_uro_mb_ind"),
        &uro.mb_ind,
        EntryStyle::Decimal,
    );
}

fn push_sorted(out: &mut Vec<String>, name: &str, u: &[u32], mb: &[u32], u_ind: Option<&[u32]>) {
    push_array(
        out,
        &["Unicode codepoints sorted"],
        &format!("{name}_u"),
        u,
        EntryStyle::Hex,
    );
    if !mb.is_empty() {
        push_array(
            out,
            &["Multibyte values sorted in Unicode order"],
            &format!("{name}_mb"),
            mb,
            EntryStyle::Hex,
        );
    }
    if let Some(ind) = u_ind {
        let comment = format!("Indexes into Unicode `{name}_u[]` array in blocks of 0x100");
        push_array(
            out,
            &[comment.as_str()],
            &format!("{name}_u_ind"),
            ind,
            EntryStyle::Decimal,
        );
    }
}

fn finish(out: Vec<String>) -> String {
    let mut text = out.join("\n");
    text.push('\n');
    text
}

/// Header for one of the URO-carrying encodings (everything but GB 18030).
pub fn render_tables(enc: Encoding, tables: &CharsetTables, generator: &str, year: u32) -> String {
    let mut out = Vec::new();
    push_header(&mut out, enc, generator, year);
    if let Some(uro) = &tables.uro {
        push_uro(&mut out, enc.name(), uro);
    }
    push_sorted(
        &mut out,
        enc.name(),
        &tables.u,
        &tables.mb,
        tables.u_ind.as_deref(),
    );
    push_footer(&mut out, enc);
    finish(out)
}

/// The GB 18030 header: 2-byte table, then the 4-byte range end points and
/// their cumulative gaps. Range start points are not needed by the lookup.
pub fn render_gb18030(tables: &Gb18030Tables, generator: &str, year: u32) -> String {
    let enc = Encoding::Gb18030;
    let mut out = Vec::new();
    push_header(&mut out, enc, generator, year);
    push_sorted(
        &mut out,
        "gb18030_2",
        &tables.two_byte.codepoints(),
        &tables.two_byte.multibytes(),
        None,
    );
    push_array(
        &mut out,
        &["End Unicode codepoints of blocks mapping consecutively to 4-byte multibyte blocks"],
        "gb18030_4_u_e",
        &tables.four_byte.end,
        EntryStyle::Hex,
    );
    push_array(
        &mut out,
        &[
            "Cumulative gaps between Unicode blocks mapping consecutively to 4-byte multibyte blocks,",
            "used to adjust multibyte offsets",
        ],
        "gb18030_4_mb_o",
        &tables.four_byte.mb_offset,
        EntryStyle::Decimal,
    );
    push_footer(&mut out, enc);
    finish(out)
}
