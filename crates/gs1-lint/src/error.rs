use std::ops::Range;

/// A malformed line in the AI format specification.
///
/// Every variant carries the 1-based line number and the full line text so
/// callers can point at the offending input.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LintError {
    /// The line does not have the `AI[-AI] [*] SPEC [# comment]` shape.
    #[error("could not parse line {line_no}")]
    Line {
        /// 1-based line number.
        line_no: usize,
        /// The offending line.
        line: String,
    },
    /// An AI that is not written with 2 to 4 digits.
    #[error("AI \"{ai}\" is not 2 to 4 digits, line {line_no}")]
    Ai {
        /// The AI as written.
        ai: String,
        /// 1-based line number.
        line_no: usize,
        /// The offending line.
        line: String,
    },
    /// An AI range whose end is below its start.
    #[error("AI range \"{range}\" is reversed, line {line_no}")]
    Range {
        /// The range as written.
        range: String,
        /// 1-based line number.
        line_no: usize,
        /// The offending line.
        line: String,
    },
    /// One component of the spec is not a valid `[NXC]min..max,checker...`.
    #[error("could not parse validator \"{validator}\" line {line_no}")]
    Validator {
        /// The component as written, checkers included.
        validator: String,
        /// 1-based line number.
        line_no: usize,
        /// The offending line.
        line: String,
        /// Byte range of the component within `line`.
        span: Range<usize>,
    },
}

impl LintError {
    /// 1-based line number of the offending line.
    pub fn line_no(&self) -> usize {
        match self {
            Self::Line { line_no, .. }
            | Self::Ai { line_no, .. }
            | Self::Range { line_no, .. }
            | Self::Validator { line_no, .. } => *line_no,
        }
    }

    /// The offending line.
    pub fn line(&self) -> &str {
        match self {
            Self::Line { line, .. } | Self::Ai { line, .. } | Self::Range { line, .. } | Self::Validator { line, .. } => line,
        }
    }

    /// Byte range within [`line`](Self::line) to highlight.
    pub fn span(&self) -> Range<usize> {
        match self {
            Self::Validator { span, .. } => span.clone(),
            Self::Range { range: text, line, .. } | Self::Ai { ai: text, line, .. } => {
                line.find(text.as_str()).map_or(0..line.len(), |s| s..s + text.len())
            }
            Self::Line { line, .. } => 0..line.len(),
        }
    }
}
