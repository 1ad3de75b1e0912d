//! Error types for the distribution pipeline and the runtime wrapper
//!
//! Fatal conditions (bad release tag, unmapped platform token, missing
//! bundled binary) get their own variants so callers can react without
//! string matching, and each variant carries enough context to print an
//! actionable hint.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Non-success response from the release API or an asset download
    #[error("HTTP {status} from {url}")]
    Http { url: String, status: u16 },

    /// Transport-level failure before a status line was received
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Asset platform token with no entry in the classification table
    #[error("no platform classification for token '{token}'")]
    UnmappedPlatform { token: String },

    /// A config file `init` would create already exists
    #[error("config file already exists: {}", path.display())]
    ConfigFileExists { path: PathBuf },

    /// The underlying `init` subprocess failed
    #[error("tailwind init failed")]
    Init {
        #[source]
        source: Box<Error>,
    },

    /// No bundled binary installed for the running platform
    #[error("tailwind binary '{name}' not found")]
    BinaryNotFound { name: String },

    /// Non-zero exit from the wrapped binary, stderr preserved verbatim
    #[error("tailwindcss exited with status {status}: {stderr}")]
    CommandFailed { status: i32, stderr: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("archive error: {0}")]
    Zip(#[from] zip::result::ZipError),
}

impl Error {
    /// Suggestion for resolving the error, when one exists
    pub fn hint(&self) -> Option<String> {
        match self {
            Error::Http { url, .. } => Some(format!(
                "Check that the release tag exists upstream and that {} is reachable.",
                url
            )),
            Error::UnmappedPlatform { .. } => Some(
                "The platform table is out of date relative to upstream asset naming. \
                 Update the classification table before packaging."
                    .to_string(),
            ),
            Error::ConfigFileExists { path } => Some(format!(
                "Remove or rename {} and run init again.",
                path.display()
            )),
            Error::BinaryNotFound { name } => Some(format!(
                "Install the tailwind package for this platform, or point the \
                 TAILWIND_BIN environment variable at a {} executable.",
                name
            )),
            _ => None,
        }
    }

    /// Print the error and its hint to stderr with formatting
    pub fn display_with_hints(&self) {
        use console::style;

        eprintln!("{} {}", style("ERROR:").red().bold(), self);

        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            eprintln!("{} {}", style("CAUSED BY:").red(), cause);
            source = cause.source();
        }

        if let Some(hint) = self.hint() {
            eprintln!("{} {}", style("HINT:").yellow().bold(), hint);
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
