//! GS1 Application Identifier validator compiler.
//!
//! Turns the line-oriented GS1 AI format specification (as maintained in
//! BWIPP's `gs1-format-spec.txt`) into `gs1_lint.h`: one length-and-content
//! checker per unique spec plus a `gs1_lint()` dispatcher keyed on the AI.
//!
//! ```
//! use zint_tools_gs1_lint::{LintConfig, compile};
//!
//! let header = compile("01 N14\n", "inline", &LintConfig::default()).unwrap();
//! assert!(header.contains("return data_len == 14"));
//! assert!(header.contains("if (ai == 1) {"));
//! ```

pub mod emit;
pub mod error;
pub mod grammar;
pub mod model;

pub use emit::{LintConfig, render};
pub use error::LintError;
pub use model::{LintModel, Spec};

/// Upstream location of the format specification.
pub const DEFAULT_SPEC_URL: &str =
    "https://raw.githubusercontent.com/bwipp/postscriptbarcode/master/contrib/development/gs1-format-spec.txt";

/// Parse `text` and render the header. `source` is the file name or URL
/// shown in the generated banner.
pub fn compile(text: &str, source: &str, config: &LintConfig) -> Result<String, LintError> {
    let lines = grammar::parse(text)?;
    log::debug!("{} AI definitions in {source}", lines.len());
    let model = LintModel::build(lines);
    Ok(render(&model, source, config))
}
