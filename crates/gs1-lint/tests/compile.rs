use zint_tools_codegen::EmitConfig;
use zint_tools_gs1_lint::{LintConfig, LintError, compile};

const SAMPLE: &str = "\
# GS1 AI format specification (excerpt)

00     *  N18,csum,keyoff1                                       dlpkey  # SSCC
01     *  N14,csum,keyoff1                                       dlpkey=22,10,21|235  # GTIN
02     *  N14,csum,keyoff1                                               # CONTENT
10        X..20                                                            # BATCH/LOT
11     *  N6,yymmd0                                                        # PROD DATE
12     *  N6,yymmd0                                                        # DUE DATE
13     *  N6,yymmd0                                                        # PACK DATE
15     *  N6,yymmd0                                                        # BEST BEFORE or BEST BY
16     *  N6,yymmd0                                                        # SELL BY
17     *  N6,yymmd0                                                        # USE BY or EXPIRY
20     *  N2                                                               # VARIANT
21        X..20                                                            # SERIAL
3100-3105 * N6                                                             # NET WEIGHT (kg)
3110-3115 * N6                                                             # LENGTH (m)
7007      N6..12,yymmdd
";

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
fn shared_specs_emit_one_function_each() {
    let text = compile(SAMPLE, "sample.txt", &bare()).expect("compiles");
    assert_eq!(text.matches("static int n14_csum_keyoff1(").count(), 1);
    assert_eq!(text.matches("static int n6_yymmd0(").count(), 1);
    assert_eq!(text.matches("static int x__20(").count(), 1);
    assert!(text.contains("/* N14,csum,keyoff1 (Used by GTIN, CONTENT) */"));
    assert!(text.contains("/* N6,yymmd0 (Used by PROD DATE, DUE DATE, PACK DATE, BEST BEFORE or BEST BY...) */"));
    assert!(text.contains("        if (ai == 1 || ai == 2) {\n            return n14_csum_keyoff1("));
    assert!(text.contains("        if ((ai >= 11 && ai <= 13) || (ai >= 15 && ai <= 17)) {\n"));
    assert!(text.contains("        if (ai == 10 || ai == 21) {\n            return x__20("));
}

#[test]
fn functions_keep_first_seen_order() {
    let text = compile(SAMPLE, "sample.txt", &bare()).expect("compiles");
    let sscc = text.find("static int n18_csum_keyoff1(").expect("sscc");
    let gtin = text.find("static int n14_csum_keyoff1(").expect("gtin");
    let lot = text.find("static int x__20(").expect("lot");
    let date = text.find("static int n6_yymmd0(").expect("date");
    assert!(sscc < gtin && gtin < lot && lot < date);
}

#[test]
fn batches_chain_as_else_if() {
    let text = compile(SAMPLE, "sample.txt", &bare()).expect("compiles");
    let first = text.find("    if (ai < 100) {").expect("batch 0");
    let second = text.find("    } else if (ai < 3200) {").expect("batch 31");
    let third = text.find("    } else if (ai < 7100) {").expect("batch 70");
    assert!(first < second && second < third);
    // 3100-3105 and 3110-3115 share N6 but are not contiguous.
    assert!(text.contains("        if ((ai >= 3100 && ai <= 3105) || (ai >= 3110 && ai <= 3115)) {\n"));
}

#[test]
fn multi_part_offsets_and_lengths() {
    let text = compile(SAMPLE, "sample.txt", &bare()).expect("compiles");
    assert!(text.contains(
        "    return data_len >= 6 && data_len <= 12\n\
         \x20           && yymmdd(data, data_len, 0, 6, 12, p_err_no, p_err_posn, err_msg, 1 /*length_only*/)\n\
         \x20           && numeric(data, data_len, 0, 6, 12, p_err_no, p_err_posn, err_msg)\n\
         \x20           && yymmdd(data, data_len, 0, 6, 12, p_err_no, p_err_posn, err_msg, 0);\n"
    ));
}

#[test]
fn full_header_is_guarded() {
    let text = compile(SAMPLE, "sample.txt", &LintConfig::default()).expect("compiles");
    assert!(text.starts_with("/*\n * GS1 AI checker generated by \"zint-tools gs1-lint\" from\n * sample.txt\n */\n/*\n"));
    assert!(text.contains("#ifndef GS1_LINT_H\n#define GS1_LINT_H\n"));
    assert!(text.ends_with("#endif /* GS1_LINT_H */\n"));
}

#[test]
fn malformed_line_stops_compilation() {
    let err = compile("01 N14\n02 Q14\n", "bad.txt", &bare()).unwrap_err();
    assert!(matches!(err, LintError::Line { line_no: 2, .. }));
    assert_eq!(err.to_string(), "could not parse line 2");
}

#[test]
fn oversized_ai_is_an_error_not_a_panic() {
    let err = compile("01 N14\n4294967295 N1\n", "bad.txt", &bare()).unwrap_err();
    assert!(matches!(err, LintError::Ai { line_no: 2, .. }));

    let err = compile("12345 N1\n", "bad.txt", &bare()).unwrap_err();
    assert_eq!(err.to_string(), "AI \"12345\" is not 2 to 4 digits, line 1");
}
