//! Reader for Unicode Consortium style mapping files.
//!
//! Data lines look like `0x8140<TAB>0x3000<TAB># IDEOGRAPHIC SPACE`. Commentary,
//! blank lines and `*** NO MAPPING ***` lines are skipped, as are lines that do
//! not match the two-column shape. Codepoints outside the BMP (five or more hex
//! digits) never match.

use std::ops::RangeInclusive;
use std::sync::LazyLock;

use regex::Regex;

static MAPPING_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^0x([0-9A-Fa-f]{2,8})[ \t]+0x([0-9A-Fa-f]{4})(?:[ \t]|$)")
        .unwrap_or_else(|e| panic!("mapping line regex: {e}"))
});

/// One (multibyte, codepoint) pair read from a mapping file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Mapping {
    /// Unicode codepoint (BMP only).
    pub u: u32,
    /// Value in the source encoding, as written in the file.
    pub mb: u32,
}

/// Parse every data line of `text`.
///
/// `mb_digits` bounds the number of hex digits accepted in the first column;
/// lines outside it are skipped like any other non-matching line.
pub fn parse_mappings(text: &str, mb_digits: RangeInclusive<usize>) -> Vec<Mapping> {
    let mut out = Vec::new();
    for raw in text.lines() {
        let line = raw.trim();
        if !line.starts_with("0x") || line.contains("*** NO MAPPING ***") {
            continue;
        }
        let Some(caps) = MAPPING_LINE.captures(line) else {
            continue;
        };
        let mb_hex = &caps[1];
        if !mb_digits.contains(&mb_hex.len()) {
            continue;
        }
        // Both captures are bounded hex strings, so parsing cannot overflow u32.
        let (Ok(mb), Ok(u)) = (
            u32::from_str_radix(mb_hex, 16),
            u32::from_str_radix(&caps[2], 16),
        ) else {
            continue;
        };
        out.push(Mapping { u, mb });
    }
    out
}
