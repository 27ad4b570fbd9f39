//! Line grammar of the GS1 AI format specification.
//!
//! Each non-blank, non-`#` line reads
//!
//! ```text
//! AI[-AI]  [*]  SPEC  [# comment]
//! ```
//!
//! where `*` flags a predefined (fixed) length and SPEC is one or more
//! space-separated components `[NXC]<len>[,checker...]`. A length is `n`
//! (exactly n), `n..m` or `..m` (1 to m). Digital Link primary-key
//! annotations (` dlpkey...`) are not part of the AI format and are stripped.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::LintError;

static AI_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]+(?:-[0-9]+)?) +(?:(\*) +)?([NXC][0-9.][ NXC0-9.,a-z=|]*?) *(?:#\s*(.*))?$")
        .unwrap_or_else(|e| panic!("AI line regex: {e}"))
});

static DLPKEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" +dlpkey[=0-9,|]*").unwrap_or_else(|e| panic!("dlpkey regex: {e}")));

static VALIDATOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([NXC])([0-9]+)?(?:\.\.([0-9|]+))?$").unwrap_or_else(|e| panic!("validator regex: {e}"))
});

/// Character class checked by the component's primary validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    /// `N`: digits.
    Numeric,
    /// `X`: GS1 AI encodable character set 82.
    Cset82,
    /// `C`: GS1 AI encodable character set 39.
    Cset39,
}

impl CharClass {
    fn from_letter(c: &str) -> Option<Self> {
        match c {
            "N" => Some(Self::Numeric),
            "X" => Some(Self::Cset82),
            "C" => Some(Self::Cset39),
            _ => None,
        }
    }

    /// Name of the C validator function for this class.
    pub fn validator(self) -> &'static str {
        match self {
            Self::Numeric => "numeric",
            Self::Cset82 => "cset82",
            Self::Cset39 => "cset39",
        }
    }
}

/// One space-separated component of a spec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Part {
    /// Minimum length.
    pub min: u32,
    /// Maximum length.
    pub max: u32,
    /// Character class.
    pub class: CharClass,
    /// Extra checker function names, in order.
    pub checkers: Vec<String>,
}

/// A single AI or an inclusive AI range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum AiSpan {
    /// One AI.
    Single(u32),
    /// `start..=end`.
    Range(u32, u32),
}

impl AiSpan {
    /// First AI covered.
    pub fn start(self) -> u32 {
        match self {
            Self::Single(ai) | Self::Range(ai, _) => ai,
        }
    }

    /// Last AI covered.
    pub fn end(self) -> u32 {
        match self {
            Self::Single(ai) | Self::Range(_, ai) => ai,
        }
    }

    /// Whether any AI of the span falls in `lo..hi`.
    pub fn intersects(self, lo: u32, hi: u32) -> bool {
        self.end() >= lo && self.start() < hi
    }
}

/// A parsed definition line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AiLine {
    /// 1-based line number.
    pub line_no: usize,
    /// The AI or AI range defined.
    pub ais: AiSpan,
    /// `*` flag: the AI has a predefined length.
    pub fixed: bool,
    /// Normalized spec text, the deduplication key.
    pub spec: String,
    /// Parsed components of `spec`.
    pub parts: Vec<Part>,
    /// Trailing comment, if non-empty.
    pub comment: Option<String>,
}

fn parse_ai(text: &str, line_no: usize, line: &str) -> Result<AiSpan, LintError> {
    let number = |s: &str| {
        if !(2..=4).contains(&s.len()) {
            return Err(LintError::Ai {
                ai: s.to_string(),
                line_no,
                line: line.to_string(),
            });
        }
        s.parse::<u32>().map_err(|_| LintError::Line {
            line_no,
            line: line.to_string(),
        })
    };
    match text.split_once('-') {
        None => Ok(AiSpan::Single(number(text)?)),
        Some((s, e)) => {
            let (s, e) = (number(s)?, number(e)?);
            if e < s {
                return Err(LintError::Range {
                    range: text.to_string(),
                    line_no,
                    line: line.to_string(),
                });
            }
            Ok(AiSpan::Range(s, e))
        }
    }
}

/// Leading decimal digits of `s`, e.g. `"20|30"` gives 20.
fn leading_number(s: &str) -> Option<u32> {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    s[..end].parse().ok()
}

fn parse_part(component: &str) -> Option<Part> {
    let mut pieces = component.split(',');
    let validator = pieces.next()?;
    let caps = VALIDATOR.captures(validator)?;
    let class = CharClass::from_letter(&caps[1])?;
    let fixed = caps.get(2).and_then(|m| m.as_str().parse::<u32>().ok());
    let (min, max) = match caps.get(3) {
        Some(upper) => (fixed.unwrap_or(1), leading_number(upper.as_str())?),
        None => (fixed?, fixed?),
    };
    if min > max {
        return None;
    }
    let checkers: Vec<String> = pieces.map(str::to_string).collect();
    if checkers.iter().any(String::is_empty) {
        return None;
    }
    Some(Part {
        min,
        max,
        class,
        checkers,
    })
}

/// Parse one line. Blank and `#` lines give `Ok(None)`.
pub fn parse_line(line_no: usize, line: &str) -> Result<Option<AiLine>, LintError> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let Some(caps) = AI_LINE.captures(line) else {
        return Err(LintError::Line {
            line_no,
            line: line.to_string(),
        });
    };
    let ais = parse_ai(&caps[1], line_no, line)?;
    let fixed = caps.get(2).is_some();
    let spec_match = caps.get(3).map_or(0..0, |m| m.range());
    let spec = DLPKEY.replace_all(line[spec_match.clone()].trim(), "").into_owned();
    let comment = caps
        .get(4)
        .map(|m| m.as_str().trim().to_string())
        .filter(|c| !c.is_empty());

    let mut parts = Vec::new();
    let mut search_from = spec_match.start;
    for component in spec.split(' ') {
        let start = line[search_from..].find(component).map_or(spec_match.start, |i| search_from + i);
        let span = start..start + component.len();
        search_from = span.end.min(line.len());
        match parse_part(component) {
            Some(part) => parts.push(part),
            None => {
                return Err(LintError::Validator {
                    validator: component.to_string(),
                    line_no,
                    line: line.to_string(),
                    span,
                });
            }
        }
    }

    Ok(Some(AiLine {
        line_no,
        ais,
        fixed,
        spec,
        parts,
        comment,
    }))
}

/// Parse a whole specification file, stopping at the first bad line.
pub fn parse(text: &str) -> Result<Vec<AiLine>, LintError> {
    let mut out = Vec::new();
    for (i, line) in text.split('\n').enumerate() {
        if let Some(parsed) = parse_line(i + 1, line)? {
            out.push(parsed);
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one(line: &str) -> AiLine {
        parse_line(1, line)
            .expect("parses")
            .expect("definition line")
    }

    #[test]
    fn bare_line_without_flag() {
        let l = one("01 N14");
        assert_eq!(l.ais, AiSpan::Single(1));
        assert!(!l.fixed);
        assert_eq!(l.spec, "N14");
        assert_eq!(
            l.parts,
            vec![Part {
                min: 14,
                max: 14,
                class: CharClass::Numeric,
                checkers: vec![],
            }]
        );
        assert_eq!(l.comment, None);
    }

    #[test]
    fn flag_checkers_dlpkey_and_comment() {
        let l = one("01     *  N14,csum,key dlpkey=22,10,21|235  # GTIN");
        assert!(l.fixed);
        assert_eq!(l.spec, "N14,csum,key");
        assert_eq!(l.parts[0].checkers, vec!["csum", "key"]);
        assert_eq!(l.comment.as_deref(), Some("GTIN"));
    }

    #[test]
    fn variable_lengths() {
        let l = one("8007 X..34,iban # IBAN");
        assert_eq!((l.parts[0].min, l.parts[0].max), (1, 34));
        assert_eq!(l.parts[0].class, CharClass::Cset82);

        let l = one("7030-7039 N3,iso3166999 X..27");
        assert_eq!(l.ais, AiSpan::Range(7030, 7039));
        assert_eq!(l.parts.len(), 2);
        assert_eq!(l.parts[1].max, 27);

        let l = one("401 C4..30|40");
        assert_eq!((l.parts[0].min, l.parts[0].max), (4, 30));
        assert_eq!(l.parts[0].class, CharClass::Cset39);
    }

    #[test]
    fn comments_and_blank_lines_are_skipped() {
        let lines = parse("# header\n\n01 N14\r\n").expect("parses");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].line_no, 3);
    }

    #[test]
    fn bad_line_reports_number() {
        let err = parse("01 N14\nhello world\n").unwrap_err();
        assert_eq!(err.line_no(), 2);
        assert_eq!(err.line(), "hello world");
        assert!(matches!(err, LintError::Line { .. }));
    }

    #[test]
    fn bad_validator_reports_span() {
        let err = parse_line(7, "10 X..20 N").unwrap_err();
        match &err {
            LintError::Validator { validator, span, .. } => {
                assert_eq!(validator, "N");
                assert_eq!(*span, 9..10);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(err.to_string(), "could not parse validator \"N\" line 7");
    }

    #[test]
    fn reversed_range_is_rejected() {
        let err = parse_line(1, "21-20 N2").unwrap_err();
        assert!(matches!(err, LintError::Range { .. }));
        assert_eq!(err.span(), 0..5);
    }

    #[test]
    fn ai_must_have_two_to_four_digits() {
        let err = parse_line(3, "12345 N1").unwrap_err();
        assert!(matches!(err, LintError::Ai { ref ai, .. } if ai == "12345"));
        assert_eq!(err.line_no(), 3);
        assert_eq!(err.span(), 0..5);

        let err = parse_line(4, "4294967295 N1").unwrap_err();
        assert!(matches!(err, LintError::Ai { .. }));

        let err = parse_line(5, "9990-10000 N2").unwrap_err();
        assert!(matches!(err, LintError::Ai { ref ai, .. } if ai == "10000"));

        assert!(matches!(parse_line(6, "1 N1").unwrap_err(), LintError::Ai { .. }));
        assert_eq!(one("9999 N1").ais, AiSpan::Single(9999));
    }

    #[test]
    fn span_intersection() {
        assert!(AiSpan::Range(90, 110).intersects(100, 200));
        assert!(!AiSpan::Single(99).intersects(100, 200));
        assert!(!AiSpan::Single(200).intersects(100, 200));
    }
}
