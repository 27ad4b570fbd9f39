//! Sorted Unicode tables and the structures derived from them.
//!
//! A table starts as a list of [`Mapping`]s sorted by codepoint. From there:
//! - the URO block (U+4E00 onwards) can be pulled out into a 16-codepoint-per-row
//!   bitmap, splicing those entries out of the codepoint array while leaving the
//!   multibyte array whole so the bitmap's indexes stay valid;
//! - a block index gives the first array position of every 0x100 block;
//! - GB 18030 4-byte mappings collapse into consecutive codepoint ranges.

use std::ops::Range;

use crate::mapping::Mapping;

/// First codepoint of the URO (CJK Unified Ideographs) block.
pub const URO_START: u32 = 0x4E00;

/// Codepoints per URO bitmap row.
pub const URO_ROW: u32 = 16;

/// Codepoints per block-index entry.
pub const BLOCK_SIZE: u32 = 0x100;

/// Mappings sorted by codepoint, one entry per codepoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortedTable {
    entries: Vec<Mapping>,
}

impl SortedTable {
    /// Sort `mappings` by codepoint (ties by multibyte value) and keep the
    /// first mapping of each codepoint.
    pub fn new(mut mappings: Vec<Mapping>) -> Self {
        mappings.sort_unstable();
        let before = mappings.len();
        mappings.dedup_by_key(|m| m.u);
        if mappings.len() != before {
            log::warn!(
                "dropped {} duplicate codepoint mapping(s)",
                before - mappings.len()
            );
        }
        Self { entries: mappings }
    }

    /// The sorted entries.
    pub fn entries(&self) -> &[Mapping] {
        &self.entries
    }

    /// Codepoints in ascending order.
    pub fn codepoints(&self) -> Vec<u32> {
        self.entries.iter().map(|m| m.u).collect()
    }

    /// Multibyte values in codepoint order.
    pub fn multibytes(&self) -> Vec<u32> {
        self.entries.iter().map(|m| m.mb).collect()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `u` has a mapping.
    pub fn contains(&self, u: u32) -> bool {
        self.entries.binary_search_by_key(&u, |m| m.u).is_ok()
    }
}

/// URO bitmap rows plus the multibyte index of each row's first entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UroBlock {
    /// Bit `j` of row `r` is set iff codepoint `0x4E00 + 16 * r + j` is mapped.
    pub used: Vec<u32>,
    /// Index into the full multibyte array of the first mapped codepoint at or
    /// after the start of each row.
    pub mb_ind: Vec<u32>,
    /// Positions of the URO entries in the sorted table; these are spliced out
    /// of the codepoint array.
    pub spliced: Range<usize>,
}

impl UroBlock {
    /// Build the bitmap over rows `0x4E00..=last`, `last` being the final
    /// codepoint of the last row (e.g. `0x9FAF`).
    pub fn extract(codepoints: &[u32], last: u32) -> Self {
        let start = codepoints.partition_point(|&u| u < URO_START);
        let rows = (last + 1).saturating_sub(URO_START).div_ceil(URO_ROW) as usize;
        let mut used = Vec::with_capacity(rows);
        let mut mb_ind = Vec::with_capacity(rows);
        let mut i = start;
        for row in 0..rows as u32 {
            let base = URO_START + row * URO_ROW;
            mb_ind.push(i as u32);
            let mut bits = 0u32;
            while i < codepoints.len() && codepoints[i] < base + URO_ROW {
                bits |= 1 << (codepoints[i] - base);
                i += 1;
            }
            used.push(bits);
        }
        Self {
            used,
            mb_ind,
            spliced: start..i,
        }
    }

    /// Whether codepoint `u` has its bit set.
    pub fn is_set(&self, u: u32) -> bool {
        if u < URO_START {
            return false;
        }
        let off = u - URO_START;
        self.used
            .get((off / URO_ROW) as usize)
            .is_some_and(|bits| bits & (1 << (off % URO_ROW)) != 0)
    }
}

/// The arrays emitted for one encoding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharsetTables {
    /// Codepoints ascending, URO entries removed when `uro` is present.
    pub u: Vec<u32>,
    /// Multibyte values in full codepoint order (URO entries included).
    pub mb: Vec<u32>,
    /// URO bitmap, when the encoding has one.
    pub uro: Option<UroBlock>,
    /// Block index over `u`, when the encoding has one.
    pub u_ind: Option<Vec<u32>>,
}

impl CharsetTables {
    /// Derive the emitted arrays from `table`.
    ///
    /// `uro_last` selects URO extraction and its upper bound; `with_index`
    /// adds the block index, computed after the splice.
    pub fn build(table: &SortedTable, uro_last: Option<u32>, with_index: bool) -> Self {
        let mut u = table.codepoints();
        let mb = table.multibytes();
        let uro = uro_last.map(|last| {
            let block = UroBlock::extract(&u, last);
            u.drain(block.spliced.clone());
            block
        });
        let u_ind = with_index.then(|| block_index(&u));
        Self { u, mb, uro, u_ind }
    }

    /// Look up the multibyte value of `u` the way a consumer of the emitted
    /// arrays would: bitmap first, then binary search of the spliced array.
    pub fn lookup(&self, u: u32) -> Option<u32> {
        if let Some(uro) = &self.uro
            && u >= URO_START
        {
            let off = u - URO_START;
            let row = (off / URO_ROW) as usize;
            if let Some(&bits) = uro.used.get(row) {
                let bit = off % URO_ROW;
                if bits & (1 << bit) == 0 {
                    return None;
                }
                let below = (bits & ((1 << bit) - 1)).count_ones();
                return self.mb.get((uro.mb_ind[row] + below) as usize).copied();
            }
        }
        let i = self.u.binary_search(&u).ok()?;
        let shift = match &self.uro {
            Some(uro) if i >= uro.spliced.start => uro.spliced.len(),
            _ => 0,
        };
        self.mb.get(i + shift).copied()
    }
}

/// `ind[k]` is the first index in `u` whose codepoint is at least `k * 0x100`.
///
/// The index has `(max >> 8) + 1` entries, is non-decreasing, and every entry
/// `i` satisfies `ind[u[i] >> 8] <= i`, with `i < ind[(u[i] >> 8) + 1]` when
/// that entry exists.
pub fn block_index(u: &[u32]) -> Vec<u32> {
    let Some(&max) = u.last() else {
        return Vec::new();
    };
    (0..=max / BLOCK_SIZE)
        .map(|k| u.partition_point(|&c| c < k * BLOCK_SIZE) as u32)
        .collect()
}

/// GB 18030 4-byte mappings as runs of consecutive codepoints.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FourByteRanges {
    /// First codepoint of each run.
    pub begin: Vec<u32>,
    /// Last codepoint of each run.
    pub end: Vec<u32>,
    /// Running total of the codepoints skipped between runs; subtracting it
    /// from `u - begin[0]` gives the linear 4-byte offset.
    pub mb_offset: Vec<u32>,
}

impl FourByteRanges {
    /// Collapse sorted, unique `codepoints` into runs.
    pub fn from_codepoints(codepoints: &[u32]) -> Self {
        let mut ranges = Self::default();
        let Some((&first, rest)) = codepoints.split_first() else {
            return ranges;
        };
        let (mut begin, mut prev) = (first, first);
        for &u in rest {
            if u == prev + 1 {
                prev = u;
                continue;
            }
            ranges.begin.push(begin);
            ranges.end.push(prev);
            begin = u;
            prev = u;
        }
        ranges.begin.push(begin);
        ranges.end.push(prev);

        ranges.mb_offset.push(0);
        for i in 1..ranges.begin.len() {
            let gap = ranges.begin[i] - (ranges.end[i - 1] + 1);
            let total = ranges.mb_offset[i - 1] + gap;
            ranges.mb_offset.push(total);
        }
        ranges
    }

    /// Linear offset of `u` from the first 4-byte codepoint, if mapped.
    pub fn linear_offset(&self, u: u32) -> Option<u32> {
        let i = self.end.partition_point(|&e| e < u);
        if i >= self.end.len() || u < self.begin[i] {
            return None;
        }
        Some(u - self.begin[0] - self.mb_offset[i])
    }
}
