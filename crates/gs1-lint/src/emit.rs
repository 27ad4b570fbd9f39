//! `gs1_lint.h` text.
//!
//! One static function per spec checks the total data length and then runs
//! each component's class validator and checkers at its offset. The
//! `gs1_lint()` entry point narrows by batch of 100 AIs first, then by the
//! AIs of each spec in the batch.

use zint_tools_codegen::{EmitConfig, libzint_copyright};

use crate::grammar::AiSpan;
use crate::model::{BATCH_SIZE, LintModel, MAX_BANNER_COMMENTS, Spec};

/// Dispatcher lines are wrapped before passing this column.
pub const WRAP_COLUMN: usize = 118;

/// Output options for the lint header.
#[derive(Debug, Clone)]
pub struct LintConfig {
    /// Tab, copyright and header guard switches.
    pub emit: EmitConfig,
    /// Run every checker in length-only mode before the full pass.
    pub length_only: bool,
    /// Generator name recorded in the first comment.
    pub generator: String,
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            emit: EmitConfig::default(),
            length_only: true,
            generator: "zint-tools gs1-lint".to_string(),
        }
    }
}

fn banner_comment(spec: &Spec) -> String {
    if spec.comments.is_empty() {
        return String::new();
    }
    let mut s = String::from(" (Used by ");
    for (i, c) in spec.comments.iter().enumerate() {
        if i == MAX_BANNER_COMMENTS {
            s.push_str("...");
            break;
        }
        if i > 0 {
            s.push_str(", ");
        }
        s.push_str(c);
    }
    s.push(')');
    s
}

fn push_spec_function(out: &mut String, spec: &Spec, config: &LintConfig) {
    let tab = &config.emit.tab;
    let tab3 = config.emit.tabs(3);
    out.push_str(&format!(
        "/* {}{} */\nstatic int {}(const unsigned char *data, const int data_len,\n\
         {tab3}int *p_err_no, int *p_err_posn, char err_msg[50]) {{\n{tab}return ",
        spec.text,
        banner_comment(spec),
        spec.func
    ));
    if spec.total_min == spec.total_max {
        out.push_str(&format!("data_len == {}", spec.total_max));
    } else {
        out.push_str(&format!("data_len >= {} && data_len <= {}", spec.total_min, spec.total_max));
    }

    if config.length_only {
        let mut offset = 0;
        for part in &spec.parts {
            for checker in &part.checkers {
                out.push_str(&format!(
                    "\n{tab3}&& {checker}(data, data_len, {offset}, {}, {}, p_err_no, p_err_posn, err_msg, 1 /*length_only*/)",
                    part.min, part.max
                ));
            }
            offset += part.max;
        }
    }

    let length_only_arg = if config.length_only { ", 0" } else { "" };
    let mut offset = 0;
    for part in &spec.parts {
        out.push_str(&format!(
            "\n{tab3}&& {}(data, data_len, {offset}, {}, {}, p_err_no, p_err_posn, err_msg)",
            part.class.validator(),
            part.min,
            part.max
        ));
        for checker in &part.checkers {
            out.push_str(&format!(
                "\n{tab3}&& {checker}(data, data_len, {offset}, {}, {}, p_err_no, p_err_posn, err_msg{length_only_arg})",
                part.min, part.max
            ));
        }
        offset += part.max;
    }
    out.push_str(";\n}\n\n");
}

/// One AI condition within a batch `lo..hi`.
///
/// A range bound already implied by the enclosing `if`/`else if` is left
/// out: the lower bound when the range starts where the previous batch
/// ended, the upper bound when it ends with this batch.
fn ai_condition(ai: AiSpan, hi: u32, prev_hi: Option<u32>, several: bool) -> String {
    match ai {
        AiSpan::Single(ai) => format!("ai == {ai}"),
        AiSpan::Range(s, e) => {
            if prev_hi == Some(s) {
                format!("ai <= {e}")
            } else if e + 1 == hi {
                format!("ai >= {s}")
            } else if several {
                format!("(ai >= {s} && ai <= {e})")
            } else {
                format!("ai >= {s} && ai <= {e}")
            }
        }
    }
}

fn push_dispatch_entry(out: &mut String, spec: &Spec, lo: u32, hi: u32, prev_hi: Option<u32>, config: &LintConfig) {
    let tab2 = config.emit.tabs(2);
    let head = format!("{tab2}if (");
    let mut width = head.len();
    out.push_str(&head);

    let ais: Vec<AiSpan> = spec.ais.iter().copied().filter(|a| a.intersects(lo, hi)).collect();
    let several = ais.len() > 1;
    for (i, ai) in ais.into_iter().enumerate() {
        let mut s = String::new();
        if i > 0 {
            s.push_str(" || ");
        }
        s.push_str(&ai_condition(ai, hi, prev_hi, several));
        if width + s.len() > WRAP_COLUMN {
            let cont = format!("{}   ", config.emit.tabs(3));
            out.push('\n');
            out.push_str(&cont);
            width = cont.len();
        }
        out.push_str(&s);
        width += s.len();
    }
    out.push_str(&format!(
        ") {{\n{}return {}(data, data_len, p_err_no, p_err_posn, err_msg);\n{tab2}}}\n",
        config.emit.tabs(3),
        spec.func
    ));
}

fn push_dispatcher(out: &mut String, model: &LintModel, config: &LintConfig) {
    let tab = &config.emit.tab;
    out.push_str(&format!(
        "/* Entry point. Returns 1 on success, 0 on failure: `*p_err_no` set to 1 if unknown AI, 2 if bad data length */\n\
         static int gs1_lint(const int ai, const unsigned char *data, const int data_len, int *p_err_no, int *p_err_posn,\n\
         {}char err_msg[50]) {{\n\n{tab}/* Assume data length failure */\n{tab}*p_err_no = 2;\n",
        config.emit.tabs(3)
    ));

    let mut prev_hi: Option<u32> = None;
    for (&batch, keys) in &model.batches {
        let lo = batch * BATCH_SIZE;
        let hi = lo + BATCH_SIZE;
        if prev_hi.is_some() {
            out.push_str(&format!("\n{tab}}} else if (ai < {hi}) {{\n\n"));
        } else {
            out.push_str(&format!("\n{tab}if (ai < {hi}) {{\n\n"));
        }
        for key in keys {
            if let Some(spec) = model.specs.get(key) {
                push_dispatch_entry(out, spec, lo, hi, prev_hi, config);
            }
        }
        prev_hi = Some(hi);
    }
    if prev_hi.is_some() {
        out.push_str(&format!("{tab}}}\n"));
    }
    out.push_str(&format!("\n{tab}/* Unknown AI */\n{tab}*p_err_no = 1;\n{tab}return 0;\n}}\n"));
}

/// Render the complete header. `source` names the specification file or
/// URL in the banner.
pub fn render(model: &LintModel, source: &str, config: &LintConfig) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "/*\n * GS1 AI checker generated by \"{}\" from\n * {source}\n */\n",
        config.generator
    ));
    if config.emit.copyright {
        out.push_str(&libzint_copyright("2021"));
        out.push('\n');
    }
    if config.emit.guard {
        out.push_str("#ifndef GS1_LINT_H\n#define GS1_LINT_H\n\n");
    }
    for spec in model.specs.values() {
        push_spec_function(&mut out, spec, config);
    }
    push_dispatcher(&mut out, model, config);
    if config.emit.guard {
        out.push_str("\n#endif /* GS1_LINT_H */\n");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::parse;

    fn render_text(text: &str, config: &LintConfig) -> String {
        render(&LintModel::build(parse(text).expect("parses")), "test.txt", config)
    }

    fn bare() -> LintConfig {
        LintConfig {
            emit: EmitConfig {
                copyright: false,
                guard: false,
                ..EmitConfig::default()
            },
            ..LintConfig::default()
        }
    }

    #[test]
    fn single_fixed_spec() {
        let text = render_text("01 N14\n", &bare());
        assert_eq!(
            text,
            "/*\n * GS1 AI checker generated by \"zint-tools gs1-lint\" from\n * test.txt\n */\n\
             /* N14 */\n\
             static int n14(const unsigned char *data, const int data_len,\n\
             \x20           int *p_err_no, int *p_err_posn, char err_msg[50]) {\n\
             \x20   return data_len == 14\n\
             \x20           && numeric(data, data_len, 0, 14, 14, p_err_no, p_err_posn, err_msg);\n\
             }\n\n\
             /* Entry point. Returns 1 on success, 0 on failure: `*p_err_no` set to 1 if unknown AI, 2 if bad data length */\n\
             static int gs1_lint(const int ai, const unsigned char *data, const int data_len, int *p_err_no, int *p_err_posn,\n\
             \x20           char err_msg[50]) {\n\n\
             \x20   /* Assume data length failure */\n\
             \x20   *p_err_no = 2;\n\n\
             \x20   if (ai < 100) {\n\n\
             \x20       if (ai == 1) {\n\
             \x20           return n14(data, data_len, p_err_no, p_err_posn, err_msg);\n\
             \x20       }\n\
             \x20   }\n\n\
             \x20   /* Unknown AI */\n\
             \x20   *p_err_no = 1;\n\
             \x20   return 0;\n\
             }\n"
        );
    }

    #[test]
    fn checkers_run_length_only_first() {
        let text = render_text("8007 X..34,iban # IBAN\n", &bare());
        assert!(text.contains(
            "    return data_len >= 1 && data_len <= 34\n\
             \x20           && iban(data, data_len, 0, 1, 34, p_err_no, p_err_posn, err_msg, 1 /*length_only*/)\n\
             \x20           && cset82(data, data_len, 0, 1, 34, p_err_no, p_err_posn, err_msg)\n\
             \x20           && iban(data, data_len, 0, 1, 34, p_err_no, p_err_posn, err_msg, 0);\n"
        ));
        assert!(text.contains("/* X..34,iban (Used by IBAN) */\nstatic int x__34_iban("));
    }

    #[test]
    fn without_length_only_pass() {
        let config = LintConfig {
            length_only: false,
            ..bare()
        };
        let text = render_text("7030-7039 N3,iso3166999 X..27\n", &config);
        assert!(!text.contains("length_only"));
        assert!(text.contains("&& iso3166999(data, data_len, 0, 3, 3, p_err_no, p_err_posn, err_msg)\n"));
        assert!(text.contains("&& cset82(data, data_len, 3, 1, 27, p_err_no, p_err_posn, err_msg);"));
    }

    #[test]
    fn two_element_range_becomes_singles() {
        let text = render_text("20-21 N2\n", &bare());
        assert!(text.contains("        if (ai == 20 || ai == 21) {\n"));
    }

    #[test]
    fn range_bounds_implied_by_batch_are_elided() {
        let text = render_text("01 N14\n100-199 N3\n250-260 N3\n", &bare());
        assert!(text.contains("    } else if (ai < 200) {\n\n        if (ai <= 199) {\n"));
        assert!(text.contains("    } else if (ai < 300) {\n\n        if (ai >= 250 && ai <= 260) {\n"));

        let text = render_text("150-199 N3\n", &bare());
        assert!(text.contains("        if (ai >= 150) {\n"));

        let text = render_text("10-19 N3\n30-39 N3\n", &bare());
        assert!(text.contains("if ((ai >= 10 && ai <= 19) || (ai >= 30 && ai <= 39)) {"));
    }

    #[test]
    fn banner_lists_four_comments_then_elides() {
        let text = render_text("11 N6 # A\n12 N6 # B\n13 N6 # C\n15 N6 # D\n17 N6 # E\n", &bare());
        assert!(text.contains("/* N6 (Used by A, B, C, D...) */\n"));
        assert!(text.contains("if ((ai >= 11 && ai <= 13) || ai == 15 || ai == 17) {"));
    }

    #[test]
    fn long_dispatch_lines_wrap() {
        let defs: String = (0..40).map(|i| format!("{} N4\n", i * 2)).collect();
        let text = render_text(&defs, &bare());
        assert!(text.lines().all(|l| l.len() <= WRAP_COLUMN));
        assert!(text.contains("\n                || ai == "));
    }

    #[test]
    fn guard_and_copyright_wrap_the_body() {
        let text = render_text("01 N14\n", &LintConfig::default());
        assert!(text.contains(" */\n/*\n    libzint - the open source barcode library\n    Copyright (C) 2021 Robin Stuart"));
        assert!(text.contains("    SUCH DAMAGE.\n */\n\n#ifndef GS1_LINT_H\n#define GS1_LINT_H\n\n/* N14 */\n"));
        assert!(text.ends_with("    return 0;\n}\n\n#endif /* GS1_LINT_H */\n"));
    }

    #[test]
    fn empty_input_keeps_braces_balanced() {
        let text = render_text("# nothing\n", &bare());
        assert_eq!(text.matches('{').count(), text.matches('}').count());
        assert!(text.contains("    *p_err_no = 2;\n\n    /* Unknown AI */\n"));
    }

    #[test]
    fn custom_tab() {
        let config = LintConfig {
            emit: EmitConfig {
                tab: "\t".to_string(),
                ..bare().emit
            },
            ..bare()
        };
        let text = render_text("01 N14\n", &config);
        assert!(text.contains("\n\t\t\tint *p_err_no, int *p_err_posn, char err_msg[50]) {\n\treturn data_len == 14\n"));
        assert!(text.contains("\t\tif (ai == 1) {\n\t\t\treturn n14("));
    }

    #[test]
    fn range_crossing_a_batch_is_bounded_on_both_sides_in_each_batch() {
        let text = render_text("150-250 N3\n", &bare());
        let call = "        if (ai >= 150 && ai <= 250) {\n            return n3(data, data_len, p_err_no, p_err_posn, err_msg);\n        }\n";
        assert!(text.contains(&format!("    if (ai < 200) {{\n\n{call}")));
        assert!(text.contains(&format!("    }} else if (ai < 300) {{\n\n{call}    }}\n")));
        assert_eq!(text.matches("ai >= 150 && ai <= 250").count(), 2);
    }

    #[test]
    fn range_starting_at_batch_start_drops_the_implied_lower_bound() {
        let text = render_text("150 N1\n200-250 N2\n", &bare());
        assert!(text.contains("    } else if (ai < 300) {\n\n        if (ai <= 250) {\n"));
    }
}
