//! Version bumper for the zint source tree.
//!
//! Each [`Target`] is a pass over one file: matching lines are rewritten
//! in memory, the rewrite count is checked against the target's expected
//! count, and only then is the file written back. Targets are processed
//! in order with no rollback, so a failure leaves earlier files already
//! updated.

pub mod targets;

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use regex::Regex;

pub use targets::{LineRule, TARGETS, Target};

/// Errors from validating a version or rewriting a file.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum VersionError {
    /// The major component is zero.
    #[error("ZINT_VERSION_MAJOR zero")]
    MajorZero,
    /// The build component is neither 0 nor 9.
    #[error("ZINT_VERSION_BUILD not 9 (got {0})")]
    Build(u32),
    /// A target file could not be read.
    #[error("could not read file \"{}\"", path.display())]
    Read {
        /// The file.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// A target file could not be written.
    #[error("could not write file \"{}\"", path.display())]
    Write {
        /// The file.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// A rule pattern does not compile.
    #[error("invalid pattern \"{pattern}\"")]
    Pattern {
        /// The pattern.
        pattern: String,
        /// The regex error.
        #[source]
        source: regex::Error,
    },
    /// A selected line did not contain the replacement pattern.
    #[error("could not replace \"{pattern}\" in file \"{}\" line {line_no}", file.display())]
    Replace {
        /// The file.
        file: PathBuf,
        /// The line's matcher.
        pattern: String,
        /// 1-based line number.
        line_no: usize,
    },
    /// Fewer lines were rewritten than the target expects.
    #[error("only did {done} replacements of {expected} in file \"{}\"", file.display())]
    Count {
        /// The file.
        file: PathBuf,
        /// Lines rewritten.
        done: usize,
        /// Lines expected.
        expected: usize,
    },
}

/// A validated zint version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Version {
    /// Major, never zero.
    pub major: u32,
    /// Minor.
    pub minor: u32,
    /// Release.
    pub release: u32,
    /// 0 for a release, 9 for post-release development.
    pub build: u32,
}

impl Version {
    /// Validate the components.
    pub fn new(major: u32, minor: u32, release: u32, build: u32) -> Result<Self, VersionError> {
        if major == 0 {
            return Err(VersionError::MajorZero);
        }
        if build != 0 && build != 9 {
            return Err(VersionError::Build(build));
        }
        Ok(Self {
            major,
            minor,
            release,
            build,
        })
    }

    /// `M.m.r`.
    pub fn base(&self) -> String {
        format!("{}.{}.{}", self.major, self.minor, self.release)
    }

    /// `M.m.r`, with `.b` appended when the build is nonzero.
    pub fn full(&self) -> String {
        if self.build == 0 {
            self.base()
        } else {
            format!("{}.{}", self.base(), self.build)
        }
    }

    /// `M,m,r,b` as used by Windows resource files.
    pub fn rc(&self) -> String {
        format!("{},{},{},{}", self.major, self.minor, self.release, self.build)
    }

    /// Value of a named component (`MAJOR`, `MINOR`, `RELEASE`, `BUILD`).
    pub fn component(&self, name: &str) -> Option<u32> {
        match name {
            "MAJOR" => Some(self.major),
            "MINOR" => Some(self.minor),
            "RELEASE" => Some(self.release),
            "BUILD" => Some(self.build),
            _ => None,
        }
    }

    fn expand(&self, template: &str, component: Option<u32>) -> String {
        let mut s = template
            .replace("{base}", &self.base())
            .replace("{full}", &self.full())
            .replace("{rc}", &self.rc());
        if let Some(c) = component {
            s = s.replace("{component}", &c.to_string());
        }
        s
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full())
    }
}

struct CompiledRule {
    matcher: Regex,
    pattern: Regex,
    template: &'static str,
}

fn compile(re: &str) -> Result<Regex, VersionError> {
    Regex::new(re).map_err(|source| VersionError::Pattern {
        pattern: re.to_string(),
        source,
    })
}

fn compile_rules(rules: &[LineRule]) -> Result<Vec<CompiledRule>, VersionError> {
    rules
        .iter()
        .map(|r| {
            Ok(CompiledRule {
                matcher: compile(r.matcher)?,
                pattern: compile(r.pattern)?,
                template: r.template,
            })
        })
        .collect()
}

/// Rewrite `text` for one target, returning the new text.
///
/// `file` is only used in errors.
pub fn rewrite(text: &str, target: &Target, version: &Version, file: &Path) -> Result<String, VersionError> {
    let rules = compile_rules(target.rules)?;
    let mut lines: Vec<String> = text.split('\n').map(str::to_string).collect();
    let mut done = 0;
    for (i, line) in lines.iter_mut().enumerate() {
        if done == target.expected {
            break;
        }
        let Some((rule, name)) = rules.iter().find_map(|r| {
            r.matcher
                .captures(line)
                .map(|c| (r, c.get(1).map(|m| m.as_str().to_string())))
        }) else {
            continue;
        };
        let component = name.as_deref().and_then(|n| version.component(n));
        let replacement = version.expand(rule.template, component);
        let replace_error = || VersionError::Replace {
            file: file.to_path_buf(),
            pattern: rule.matcher.as_str().to_string(),
            line_no: i + 1,
        };
        if replacement.contains("{component}") || !rule.pattern.is_match(line) {
            return Err(replace_error());
        }
        *line = rule.pattern.replacen(line, 1, replacement.as_str()).into_owned();
        done += 1;
    }
    if done != target.expected {
        return Err(VersionError::Count {
            file: file.to_path_buf(),
            done,
            expected: target.expected,
        });
    }
    Ok(lines.join("\n"))
}

/// Apply one target under `root`. The file is left untouched on error.
pub fn apply(root: &Path, target: &Target, version: &Version) -> Result<(), VersionError> {
    let path = root.join(target.file);
    let text = fs::read_to_string(&path).map_err(|source| VersionError::Read {
        path: path.clone(),
        source,
    })?;
    let updated = rewrite(&text, target, version, &path)?;
    fs::write(&path, updated).map_err(|source| VersionError::Write {
        path: path.clone(),
        source,
    })?;
    log::info!("updated {} ({} lines)", path.display(), target.expected);
    Ok(())
}

/// Apply every entry of [`TARGETS`] in order, stopping at the first failure.
pub fn bump(root: &Path, version: &Version) -> Result<(), VersionError> {
    for target in TARGETS {
        apply(root, target, version)?;
    }
    Ok(())
}

/// Follow-up steps printed after a successful bump.
pub const REMINDER: &str = "\n\
!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!\n\
!!!  REMEMBER: run \"autoconf\" and \"./configure\" in \"backend_tcl/\" !!!\n\
!!!  REMEMBER: update version and date in \"ChangeLog\"             !!!\n\
!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!\n\n";
