//! Input sources: a local file, or a URL fetched once with a blocking GET.
//!
//! There is no retry and no timeout policy; a failed read is reported to the
//! caller and the generator stops.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Errors raised while reading a reference file.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// A local file could not be read.
    #[error("could not read file \"{}\"", path.display())]
    Read {
        /// The file that was attempted.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The HTTP request failed or returned an error status.
    #[cfg(feature = "fetch")]
    #[error("could not fetch \"{url}\"")]
    Fetch {
        /// The URL that was requested.
        url: String,
        /// The underlying transport or status error.
        #[source]
        source: Box<ureq::Error>,
    },

    /// The response body could not be read as text.
    #[error("could not read response body from \"{url}\"")]
    Body {
        /// The URL that was requested.
        url: String,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A URL was given but this build has no HTTP support.
    #[error("cannot fetch \"{0}\": built without the `fetch` feature")]
    FetchDisabled(String),
}

/// Where a reference file comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// A file on the local filesystem.
    Path(PathBuf),
    /// An `http://` or `https://` URL.
    Url(String),
}

impl Source {
    /// Classify a command-line argument: anything starting with `http://` or
    /// `https://` is a URL, everything else a path.
    pub fn parse(arg: &str) -> Self {
        if arg.starts_with("http://") || arg.starts_with("https://") {
            Source::Url(arg.to_string())
        } else {
            Source::Path(PathBuf::from(arg))
        }
    }

    /// Prefer `dir/file_name` when it exists, otherwise fall back to `url`.
    ///
    /// Without a URL the local path is returned regardless, so a missing file
    /// surfaces as a [`SourceError::Read`].
    pub fn local_or_url(dir: &Path, file_name: &str, url: Option<&str>) -> Self {
        let local = dir.join(file_name);
        match url {
            Some(u) if !local.is_file() => Source::Url(u.to_string()),
            _ => Source::Path(local),
        }
    }

    /// Read the whole source as UTF-8 text (lossy for local files, so stray
    /// bytes in comment columns do not abort a run).
    pub fn read_to_string(&self) -> Result<String, SourceError> {
        match self {
            Source::Path(path) => {
                let bytes = std::fs::read(path).map_err(|source| SourceError::Read {
                    path: path.clone(),
                    source,
                })?;
                log::debug!("read {} ({} bytes)", path.display(), bytes.len());
                Ok(String::from_utf8_lossy(&bytes).into_owned())
            }
            Source::Url(url) => fetch(url),
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Path(p) => write!(f, "{}", p.display()),
            Source::Url(u) => f.write_str(u),
        }
    }
}

#[cfg(feature = "fetch")]
fn fetch(url: &str) -> Result<String, SourceError> {
    log::info!("fetching {url}");
    let response = ureq::get(url).call().map_err(|e| SourceError::Fetch {
        url: url.to_string(),
        source: Box::new(e),
    })?;
    response.into_string().map_err(|source| SourceError::Body {
        url: url.to_string(),
        source,
    })
}

#[cfg(not(feature = "fetch"))]
fn fetch(url: &str) -> Result<String, SourceError> {
    Err(SourceError::FetchDisabled(url.to_string()))
}
