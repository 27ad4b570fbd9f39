//! Filters that rebase a third-party charset array in place.
//!
//! The input is a C header fragment (libiconv's `jisx0208.h` or `gb2312.h`).
//! Everything before the line declaring the target array is dropped; that
//! line is echoed, every lowercase `0xhhhh` literal after it is rewritten,
//! and output ends with the first line starting `};`. The start marker is a
//! plain substring match.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::encodings::EUC_OFFSET;

static HEX4: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"0x([0-9a-f]{4})").unwrap_or_else(|e| panic!("hex regex: {e}")));

/// One filter: where the array starts and how each value is rebased.
#[derive(Debug, Clone, Copy)]
pub struct RemapFilter {
    /// Substring identifying the array declaration line.
    pub marker: &'static str,
    /// Value transform.
    pub map: fn(u32) -> u32,
}

/// JIS X 0208 row/cell values to Shift JIS.
pub const SJIS_FILTER: RemapFilter = RemapFilter {
    marker: "jisx0208_2charset",
    map: jis_to_sjis,
};

/// GB 2312 row/cell values to EUC-CN.
pub const GB2312_FILTER: RemapFilter = RemapFilter {
    marker: "short gb2312_2charset",
    map: gb2312_to_euc_cn,
};

/// Standard JIS X 0208 to Shift JIS arithmetic.
///
/// Values whose row or cell byte is below 0x21 are not JIS X 0208 and are
/// returned unchanged.
pub fn jis_to_sjis(jis: u32) -> u32 {
    let c1 = jis >> 8;
    let c2 = jis & 0xFF;
    if c1 < 0x21 || c2 < 0x21 {
        return jis;
    }
    let t1 = (c1 - 0x21) >> 1;
    let t2 = if (c1 - 0x21) & 1 == 1 { 0x5E } else { 0 } + (c2 - 0x21);
    let lead = if t1 < 0x1F { t1 + 0x81 } else { t1 + 0xC1 };
    let trail = if t2 < 0x3F { t2 + 0x40 } else { t2 + 0x41 };
    (lead << 8) | trail
}

/// GB 2312 to EUC-CN: set the high bit of both bytes.
pub fn gb2312_to_euc_cn(gb: u32) -> u32 {
    gb + EUC_OFFSET
}

impl RemapFilter {
    /// Apply the filter to a whole header fragment.
    ///
    /// Returns an empty string if the marker never appears.
    pub fn apply(&self, input: &str) -> String {
        let mut out = String::new();
        let mut inside = false;
        for line in input.split_inclusive('\n') {
            if inside {
                if line.starts_with("};") {
                    out.push_str(line);
                    return out;
                }
                let rewritten = HEX4.replace_all(line, |caps: &Captures<'_>| {
                    // Four hex digits always fit.
                    let value = u32::from_str_radix(&caps[1], 16).unwrap_or_default();
                    format!("0x{:x}", (self.map)(value))
                });
                out.push_str(&rewritten);
            } else if line.contains(self.marker) {
                out.push_str(line);
                inside = true;
            }
        }
        if !inside {
            log::warn!("marker \"{}\" not found; no output", self.marker);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jis_rows_map_to_sjis() {
        assert_eq!(jis_to_sjis(0x2121), 0x8140);
        assert_eq!(jis_to_sjis(0x2221), 0x819F);
        assert_eq!(jis_to_sjis(0x2160), 0x8180);
        assert_eq!(jis_to_sjis(0x5D21), 0x9F40);
        assert_eq!(jis_to_sjis(0x5E21), 0x9F9F);
        assert_eq!(jis_to_sjis(0x5F21), 0xE040);
        assert_eq!(jis_to_sjis(0x7426), 0xEAA4);
    }

    #[test]
    fn out_of_range_values_pass_through() {
        assert_eq!(jis_to_sjis(0x0000), 0x0000);
        assert_eq!(jis_to_sjis(0x2100), 0x2100);
    }

    #[test]
    fn sjis_filter_rewrites_only_the_array() {
        let input = "\
static const unsigned short jisx0208_2uni_page21[690] = {
  0x3000, 0x3001,
};
static const unsigned short jisx0208_2charset[6879] = {
  0x2140, 0x2141, 0x2121, 0x213f,
};
trailing
";
        let out = SJIS_FILTER.apply(input);
        assert_eq!(
            out,
            "static const unsigned short jisx0208_2charset[6879] = {\n  0x815f, 0x8160, 0x8140, 0x815e,\n};\n"
        );
    }

    #[test]
    fn gb2312_filter_adds_euc_offset() {
        let input = "static const unsigned short gb2312_2charset[7445] = {\n  0x2168, 0x216c,\n};\n";
        let out = GB2312_FILTER.apply(input);
        assert!(out.contains("  0xa1e8, 0xa1ec,\n"));
    }

    #[test]
    fn missing_marker_yields_nothing() {
        assert_eq!(GB2312_FILTER.apply("0x2121\n};\n"), "");
    }
}
