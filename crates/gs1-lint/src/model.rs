//! Deduplicated spec model built from the parsed lines.
//!
//! AIs whose spec text is identical share one [`Spec`] and therefore one
//! generated function. Specs keep first-seen order, and each batch of 100
//! AIs lists the specs it dispatches in first-seen order too.

use std::collections::BTreeMap;

use indexmap::{IndexMap, IndexSet};

use crate::grammar::{AiLine, AiSpan, Part};

/// AIs per dispatcher batch.
pub const BATCH_SIZE: u32 = 100;

/// Comments shown in a function banner before eliding with `...`.
pub const MAX_BANNER_COMMENTS: usize = 4;

/// One unique validator chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spec {
    /// Normalized spec text.
    pub text: String,
    /// Generated C function name.
    pub func: String,
    /// Components in order.
    pub parts: Vec<Part>,
    /// Sum of component minimum lengths.
    pub total_min: u32,
    /// Sum of component maximum lengths.
    pub total_max: u32,
    /// AIs using this spec, sorted and consolidated.
    pub ais: Vec<AiSpan>,
    /// Distinct comments of the defining lines, first-seen order.
    pub comments: Vec<String>,
}

/// `N14,csum` becomes `n14_csum`.
pub fn function_name(spec: &str) -> String {
    spec.to_lowercase().replace([' ', '.', ','], "_")
}

/// Sort, then merge runs of consecutive AIs into ranges; a range covering
/// exactly two AIs is split back into two singles.
pub fn consolidate(mut ais: Vec<AiSpan>) -> Vec<AiSpan> {
    ais.sort_by_key(|a| (a.start(), a.end()));
    let mut merged: Vec<AiSpan> = Vec::with_capacity(ais.len());
    for ai in ais {
        match merged.last_mut() {
            Some(prev) if ai.start() == prev.end() + 1 => *prev = AiSpan::Range(prev.start(), ai.end()),
            _ => merged.push(ai),
        }
    }
    let mut out = Vec::with_capacity(merged.len());
    for ai in merged {
        match ai {
            AiSpan::Range(s, e) if e == s + 1 => {
                out.push(AiSpan::Single(s));
                out.push(AiSpan::Single(e));
            }
            other => out.push(other),
        }
    }
    out
}

/// All specs plus the batch index for the dispatcher.
#[derive(Debug, Clone, Default)]
pub struct LintModel {
    /// Specs keyed by normalized text.
    pub specs: IndexMap<String, Spec>,
    /// Batch number (`ai / 100`) to the spec keys it dispatches.
    pub batches: BTreeMap<u32, IndexSet<String>>,
}

impl LintModel {
    /// Build the model from parsed lines, in file order.
    pub fn build(lines: Vec<AiLine>) -> Self {
        let mut model = Self::default();
        let mut raw_ais: IndexMap<String, Vec<AiSpan>> = IndexMap::new();

        for line in lines {
            for batch in line.ais.start() / BATCH_SIZE..=line.ais.end() / BATCH_SIZE {
                model.batches.entry(batch).or_default().insert(line.spec.clone());
            }
            raw_ais.entry(line.spec.clone()).or_default().push(line.ais);

            let spec = model.specs.entry(line.spec.clone()).or_insert_with(|| Spec {
                func: function_name(&line.spec),
                text: line.spec.clone(),
                parts: Vec::new(),
                total_min: 0,
                total_max: 0,
                ais: Vec::new(),
                comments: Vec::new(),
            });
            if let Some(comment) = line.comment
                && !spec.comments.contains(&comment)
            {
                spec.comments.push(comment);
            }
            spec.total_min = line.parts.iter().map(|p| p.min).sum();
            spec.total_max = line.parts.iter().map(|p| p.max).sum();
            spec.parts = line.parts;
        }

        for (key, ais) in raw_ais {
            if let Some(spec) = model.specs.get_mut(&key) {
                spec.ais = consolidate(ais);
            }
        }
        log::debug!("{} specs across {} batches", model.specs.len(), model.batches.len());
        model
    }
}
