//! Every file that carries the zint version, and how to rewrite it.
//!
//! Templates are expanded before use as a regex replacement, so `${1}`
//! refers to a group of the rule's `pattern`. Placeholders:
//! `{base}` (`M.m.r`), `{full}` (`M.m.r` or `M.m.r.9`), `{rc}`
//! (`M,m,r,b`) and `{component}`: the version component named by the
//! matcher's first capture group (`MAJOR`, `MINOR`, `RELEASE` or `BUILD`).

/// One way of rewriting a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRule {
    /// Selects the lines to rewrite.
    pub matcher: &'static str,
    /// Replaced once per selected line.
    pub pattern: &'static str,
    /// Replacement template.
    pub template: &'static str,
}

/// A file pass: each line is offered to the rules in order and the first
/// whose matcher hits is applied. The pass stops after `expected` rewrites.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Target {
    /// Path relative to the project root.
    pub file: &'static str,
    /// Candidate rules, first match wins.
    pub rules: &'static [LineRule],
    /// Exact number of lines that must be rewritten.
    pub expected: usize,
}

const RC: &[LineRule] = &[LineRule {
    matcher: r"#define[ \t]+VER_FILEVERSION",
    pattern: r"[0-9,]+",
    template: "{rc}",
}];

const MINGW: &[LineRule] = &[LineRule {
    matcher: r"^ZINT_VERSION:=-DZINT_VERSION=",
    pattern: r"[0-9.]+",
    template: "{full}",
}];

const QUOTED_DEFINE: &[LineRule] = &[LineRule {
    matcher: r#"ZINT_VERSION=""#,
    pattern: r#"ZINT_VERSION="[0-9.]+""#,
    template: r#"ZINT_VERSION="{full}""#,
}];

const ESCAPED_DEFINE: &[LineRule] = &[LineRule {
    matcher: r#"ZINT_VERSION="\\""#,
    pattern: r#"ZINT_VERSION="\\"[0-9.]+\\"""#,
    template: r#"ZINT_VERSION="\"{full}\"""#,
}];

const VC6_DEFINE: &[LineRule] = &[LineRule {
    matcher: r#"ZINT_VERSION=""#,
    pattern: r#"ZINT_VERSION="\\"[0-9.]+\\"""#,
    template: r#"ZINT_VERSION="\"{full}\"""#,
}];

const QUOT_ENTITY_DEFINE: &[LineRule] = &[LineRule {
    matcher: r"ZINT_VERSION=&quot;",
    pattern: r"&quot;[0-9.]+",
    template: "&quot;{full}",
}];

const QT_VERSION: &[LineRule] = &[LineRule {
    matcher: r"^VERSION[ \t]*=",
    pattern: r"[0-9.]+",
    template: "{full}",
}];

const fn target(file: &'static str, rules: &'static [LineRule], expected: usize) -> Target {
    Target { file, rules, expected }
}

/// All passes, in the order they are applied.
pub const TARGETS: &[Target] = &[
    target(
        "CMakeLists.txt",
        &[LineRule {
            matcher: r"\(ZINT_VERSION_(MAJOR|MINOR|RELEASE|BUILD)",
            pattern: r"[0-9]+\)",
            template: "{component})",
        }],
        4,
    ),
    target(
        "zint.spec",
        &[LineRule {
            matcher: r"^Version:",
            pattern: r"[0-9.]+",
            template: "{base}",
        }],
        1,
    ),
    target(
        "zint.nsi",
        &[LineRule {
            matcher: r"^!define +PRODUCT_VERSION",
            pattern: r#""[0-9.]+""#,
            template: r#""{full}""#,
        }],
        1,
    ),
    target("backend/libzint.rc", RC, 2),
    target(
        "backend/zintconfig.h",
        &[
            LineRule {
                matcher: r"define[ \t]+ZINT_VERSION_(MAJOR|MINOR|RELEASE)[ \t]+",
                pattern: r"[0-9]+",
                template: "{component}",
            },
            LineRule {
                matcher: r"define[ \t]+ZINT_VERSION_(BUILD)[ \t]+",
                pattern: r"(BUILD[ \t]+)[0-9]+",
                template: "${1}{component}",
            },
        ],
        4,
    ),
    target("backend/Makefile.mingw", MINGW, 1),
    target(
        "backend_tcl/configure.in",
        &[LineRule {
            matcher: r"^AC_INIT\(\[zint\],[ \t]*\[",
            pattern: r"[0-9.]+",
            template: "{base}",
        }],
        1,
    ),
    target("backend_tcl/zint_tcl.dsp", ESCAPED_DEFINE, 2),
    target(
        "backend_tcl/lib/zint/pkgIndex.tcl",
        &[LineRule {
            matcher: r"zint ",
            pattern: r"zint [0-9.]+",
            template: "zint {base}",
        }],
        1,
    ),
    target("frontend/zint.rc", RC, 2),
    target("frontend/Makefile.mingw", MINGW, 1),
    target("backend_qt/backend_vc8.pro", QT_VERSION, 1),
    target(
        "backend_qt/backend_qt.pro",
        &[LineRule {
            matcher: r#"ZINT_VERSION=""#,
            pattern: r"[0-9.]+",
            template: "{full}",
        }],
        1,
    ),
    target("backend_qt/backend_qt.pro", QT_VERSION, 1),
    target(
        "docs/manual.txt",
        &[LineRule {
            matcher: r"^The current version of Zint",
            pattern: r"[0-9]+\.[0-9]+\.[0-9]+(\.[0-9]+)?",
            template: "{full}",
        }],
        1,
    ),
    target("frontend_qt/res/qtZint.rc", RC, 2),
    target("win32/libzint.vcxproj", QUOTED_DEFINE, 2),
    target("win32/zint.vcxproj", QUOTED_DEFINE, 2),
    target("win32/zint_cmdline_vc6/zint.rc", RC, 2),
    target("win32/zint_cmdline_vc6/zint_cmdline_vc6.dsp", VC6_DEFINE, 2),
    target("win32/vs2008/libzint.vcproj", QUOT_ENTITY_DEFINE, 3),
    target("win32/vs2008/zint.vcproj", QUOT_ENTITY_DEFINE, 3),
    target("win32/vs2015/libzint.vcxproj", QUOTED_DEFINE, 6),
    target("win32/vs2015/zint.vcxproj", QUOTED_DEFINE, 6),
    target("win32/vs2015/vsx/libzintMD.vcxproj", QUOTED_DEFINE, 1),
    target("win32/vs2019/libzint.vcxproj", QUOTED_DEFINE, 2),
    target("win32/vs2019/zint.vcxproj", QUOTED_DEFINE, 2),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_rule_compiles() {
        for t in TARGETS {
            assert!(t.expected > 0, "{}", t.file);
            for r in t.rules {
                regex::Regex::new(r.matcher).unwrap_or_else(|e| panic!("{}: {e}", t.file));
                regex::Regex::new(r.pattern).unwrap_or_else(|e| panic!("{}: {e}", t.file));
            }
        }
    }

    #[test]
    fn component_rules_capture_a_name() {
        for t in TARGETS {
            for r in t.rules.iter().filter(|r| r.template.contains("{component}")) {
                let re = regex::Regex::new(r.matcher).expect("compiles");
                assert_eq!(re.captures_len(), 2, "{}", t.file);
            }
        }
    }
}
