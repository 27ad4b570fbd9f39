//! Per-encoding rules: which lines of each reference file are kept, how the
//! values are rebased, and which derived tables each header carries.

use std::collections::HashSet;

use crate::mapping::{Mapping, parse_mappings};
use crate::table::{FourByteRanges, SortedTable};

/// Offset from a raw GB 2312 / KS X 1001 row-cell value to EUC.
pub const EUC_OFFSET: u32 = 0x8080;

/// The six multibyte encodings with generated tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Encoding {
    /// Big5 (Traditional Chinese).
    Big5,
    /// EUC-KR (KS X 1001).
    Ksx1001,
    /// Shift JIS.
    Sjis,
    /// GB 2312-1980 as EUC-CN.
    Gb2312,
    /// GBK, excluding mappings already in GB 2312.
    Gbk,
    /// GB 18030-2005, excluding mappings already in GBK.
    Gb18030,
}

impl Encoding {
    /// All encodings in generation order. GBK depends on GB 2312 and
    /// GB 18030 on GBK, so the order matters.
    pub const ALL: [Encoding; 6] = [
        Encoding::Big5,
        Encoding::Ksx1001,
        Encoding::Sjis,
        Encoding::Gb2312,
        Encoding::Gbk,
        Encoding::Gb18030,
    ];

    /// Array and header stem, e.g. `big5` for `big5.h` and `big5_u[]`.
    pub const fn name(self) -> &'static str {
        match self {
            Encoding::Big5 => "big5",
            Encoding::Ksx1001 => "ksx1001",
            Encoding::Sjis => "sjis",
            Encoding::Gb2312 => "gb2312",
            Encoding::Gbk => "gbk",
            Encoding::Gb18030 => "gb18030",
        }
    }

    /// Description used in the header's first line.
    pub const fn description(self) -> &'static str {
        match self {
            Encoding::Big5 => "Big5",
            Encoding::Ksx1001 => "EUC-KR (KS X 1001)",
            Encoding::Sjis => "Shift JIS",
            Encoding::Gb2312 => "GB 2312-1980 (EUC-CN)",
            Encoding::Gbk => "GBK, excluding mappings in GB 2312",
            Encoding::Gb18030 => "GB 18030-2005",
        }
    }

    /// Reference file name looked up in the data directory.
    pub const fn file_name(self) -> &'static str {
        match self {
            Encoding::Big5 => "BIG5.TXT",
            Encoding::Ksx1001 => "KSX1001.TXT",
            Encoding::Sjis => "SHIFTJIS.TXT",
            Encoding::Gb2312 => "GB2312.TXT",
            Encoding::Gbk => "CP936.TXT",
            Encoding::Gb18030 => "GB18030.TXT",
        }
    }

    /// Download location. GB 2312 and GB 18030 come from tarballs and must be
    /// provided locally.
    pub const fn url(self) -> Option<&'static str> {
        match self {
            Encoding::Big5 => Some("https://unicode.org/Public/MAPPINGS/OBSOLETE/EASTASIA/OTHER/BIG5.TXT"),
            Encoding::Ksx1001 => Some("https://unicode.org/Public/MAPPINGS/OBSOLETE/EASTASIA/KSC/KSX1001.TXT"),
            Encoding::Sjis => Some("https://unicode.org/Public/MAPPINGS/OBSOLETE/EASTASIA/JIS/SHIFTJIS.TXT"),
            Encoding::Gbk => Some("https://unicode.org/Public/MAPPINGS/VENDORS/MICSFT/WINDOWS/CP936.TXT"),
            Encoding::Gb2312 | Encoding::Gb18030 => None,
        }
    }

    /// Provenance printed in the header. Fixed per encoding so output does
    /// not depend on where the file was read from.
    pub const fn provenance(self) -> &'static str {
        match self {
            Encoding::Gb2312 => "unicode.org-mappings/EASTASIA/GB/GB2312.TXT",
            Encoding::Gb18030 => "jdk-1.4.2/GB18030.TXT",
            other => match other.url() {
                Some(u) => u,
                None => "",
            },
        }
    }

    /// Extra provenance line, for files taken out of a tarball.
    pub const fn provenance_note(self) -> Option<&'static str> {
        match self {
            Encoding::Gb2312 => Some("(see https://haible.de/bruno/charsets/conversion-tables/GB2312.tar.bz2)"),
            Encoding::Gb18030 => Some("(see https://haible.de/bruno/charsets/conversion-tables/GB18030.tar.bz2)"),
            _ => None,
        }
    }

    /// First copyright year of the header.
    pub const fn start_year(self) -> Option<u32> {
        match self {
            Encoding::Big5 | Encoding::Ksx1001 => Some(2021),
            Encoding::Sjis | Encoding::Gb2312 => Some(2009),
            Encoding::Gb18030 => Some(2016),
            Encoding::Gbk => None,
        }
    }

    /// Last codepoint covered by the URO bitmap, matching each source's
    /// actual coverage of the block.
    pub const fn uro_last(self) -> Option<u32> {
        match self {
            Encoding::Big5 | Encoding::Sjis | Encoding::Gbk => Some(0x9FAF),
            Encoding::Ksx1001 => Some(0x9F9F),
            Encoding::Gb2312 => Some(0x9CEF),
            Encoding::Gb18030 => None,
        }
    }

    /// Whether the header carries a `_u_ind[]` block index.
    pub const fn has_block_index(self) -> bool {
        matches!(self, Encoding::Ksx1001 | Encoding::Gb2312)
    }
}

/// Big5: values as-is.
pub fn big5(text: &str) -> SortedTable {
    SortedTable::new(parse_mappings(text, 4..=4))
}

/// KS X 1001 rebased to EUC-KR, plus characters added after the mapping
/// file was published.
pub fn ksx1001(text: &str) -> SortedTable {
    let mut mappings: Vec<Mapping> = parse_mappings(text, 4..=4)
        .into_iter()
        .map(|m| Mapping {
            mb: m.mb + EUC_OFFSET,
            ..m
        })
        .collect();
    mappings.extend([
        // Euro sign, KS X 1001:1998
        Mapping { u: 0x20AC, mb: 0x2266 + EUC_OFFSET },
        // Registered sign, KS X 1001:1998
        Mapping { u: 0xAE, mb: 0x2267 + EUC_OFFSET },
        // Korean postal code mark, KS X 1001:2002
        Mapping { u: 0x327E, mb: 0x2268 + EUC_OFFSET },
    ]);
    SortedTable::new(mappings)
}

/// Shift JIS: single bytes other than 0x5C and 0x7E are ASCII and dropped;
/// the user-defined PUA range U+E000..U+E757 is computed at lookup time.
pub fn sjis(text: &str) -> SortedTable {
    let mappings = parse_mappings(text, 2..=4)
        .into_iter()
        .filter(|m| m.mb >= 0x80 || m.mb == 0x5C || m.mb == 0x7E)
        .filter(|m| !(0xE000..=0xE757).contains(&m.u))
        .collect();
    SortedTable::new(mappings)
}

/// GB 2312 rebased to EUC-CN.
pub fn gb2312(text: &str) -> SortedTable {
    let mappings = parse_mappings(text, 2..=4)
        .into_iter()
        .filter(|m| m.mb >= 0x80)
        .map(|m| Mapping {
            mb: m.mb + EUC_OFFSET,
            ..m
        })
        .collect();
    SortedTable::new(mappings)
}

/// GBK table and the full set of codepoints GBK maps.
#[derive(Debug, Clone, Default)]
pub struct GbkTables {
    /// Mappings not already provided by GB 2312.
    pub table: SortedTable,
    /// Every codepoint CP936 maps with a double-byte value, including the
    /// ones shared with GB 2312.
    pub covered: HashSet<u32>,
}

/// GBK from CP936, dropping the stray 0x80 euro mapping and anything GB 2312
/// already covers. U+2015 is kept since GBK maps it differently.
pub fn gbk(text: &str, gb2312: &SortedTable) -> GbkTables {
    let mut covered = HashSet::new();
    let mut mappings = Vec::new();
    for m in parse_mappings(text, 2..=4) {
        if m.mb <= 0x80 {
            continue;
        }
        covered.insert(m.u);
        if m.u != 0x2015 && gb2312.contains(m.u) {
            continue;
        }
        mappings.push(m);
    }
    GbkTables {
        table: SortedTable::new(mappings),
        covered,
    }
}

/// GB 18030 2-byte extension table and 4-byte ranges.
#[derive(Debug, Clone, Default)]
pub struct Gb18030Tables {
    /// 2-byte mappings not in GBK.
    pub two_byte: SortedTable,
    /// BMP codepoints with 4-byte mappings, as consecutive runs.
    pub four_byte: FourByteRanges,
}

/// 2-byte mappings that became standard in GB 18030-2005 but are PUA in the
/// reference file (Lunde, CJKV Information Processing 2nd ed., tables 3-37
/// and 3-39).
const GB18030_2005_ADDITIONS: [(u32, u32); 19] = [
    (0x1E3F, 0xA8BC),
    (0x9FB4, 0xFE59),
    (0x9FB5, 0xFE61),
    (0x9FB6, 0xFE66),
    (0x9FB7, 0xFE67),
    (0x9FB8, 0xFE6D),
    (0x9FB9, 0xFE7E),
    (0x9FBA, 0xFE90),
    (0x9FBB, 0xFEA0),
    (0xFE10, 0xA6D9),
    (0xFE11, 0xA6DB),
    (0xFE12, 0xA6DA),
    (0xFE13, 0xA6DC),
    (0xFE14, 0xA6DD),
    (0xFE15, 0xA6DE),
    (0xFE16, 0xA6DF),
    (0xFE17, 0xA6EC),
    (0xFE18, 0xA6ED),
    (0xFE19, 0xA6F3),
];

/// GB 18030 from the JDK mapping file.
///
/// U+E7C7 (a 4-byte PUA mapping) and the user-defined 2-byte PUA range
/// U+E000..U+E765 are handled at lookup time and left out.
pub fn gb18030(text: &str, gbk_covered: &HashSet<u32>) -> Gb18030Tables {
    let mut two = Vec::new();
    let mut four = Vec::new();
    for m in parse_mappings(text, 2..=8) {
        if m.mb < 0x80 || m.u == 0xE7C7 {
            continue;
        }
        if m.mb < 0x10000 {
            if gbk_covered.contains(&m.u) || (0xE000..=0xE765).contains(&m.u) {
                continue;
            }
            two.push(m);
        } else {
            four.push(m.u);
        }
    }
    two.extend(
        GB18030_2005_ADDITIONS
            .iter()
            .map(|&(u, mb)| Mapping { u, mb }),
    );
    four.sort_unstable();
    four.dedup();
    Gb18030Tables {
        two_byte: SortedTable::new(two),
        four_byte: FourByteRanges::from_codepoints(&four),
    }
}
