use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for dtsup-config operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// The text of one `dtsup.toml` and its display name.
///
/// Builds errors that point back into the text, locating keys and values
/// with a lexical search.
#[derive(Debug, Clone)]
pub(crate) struct SourceContext {
    src: String,
    filename: String,
}

impl SourceContext {
    pub fn new(src: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            filename: filename.into(),
        }
    }

    fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.filename, self.src.clone())
    }

    pub fn parse_error(&self, source: toml::de::Error) -> Box<Error> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::Parse {
            src: self.named_source(),
            span,
            source,
        })
    }

    /// Validation error labelled at the first occurrence of `key`.
    pub fn error_at_key(&self, key: &str, message: impl Into<String>) -> Box<Error> {
        self.validation(find_key_span(&self.src, key), message.into())
    }

    /// Validation error labelled at the last occurrence of the string `value`.
    pub fn error_at_value(&self, value: &str, message: impl Into<String>) -> Box<Error> {
        self.validation(find_value_span(&self.src, value), message.into())
    }

    pub fn invalid_output_name(&self, name: &str, reason: &str) -> Box<Error> {
        Box::new(Error::InvalidOutputName {
            src: self.named_source(),
            span: find_key_span(&self.src, name),
            name: name.to_string(),
            reason: reason.to_string(),
        })
    }

    fn validation(&self, span: Option<SourceSpan>, message: String) -> Box<Error> {
        Box::new(Error::Validation {
            src: self.named_source(),
            span,
            message,
        })
    }
}

/// Find the span of a key in TOML source.
fn find_key_span(src: &str, key: &str) -> Option<SourceSpan> {
    let patterns = [
        format!("{} =", key),   // key = value
        format!("{}=", key),    // key=value
        format!(".{}]", key),   // [table.key]
        format!("[{}]", key),   // [key]
        format!("\"{}\"", key), // "quoted key" = value
    ];

    for pattern in &patterns {
        if let Some(pos) = src.find(pattern.as_str()) {
            let start = pos + pattern.find(key).unwrap_or(0);
            return Some(SourceSpan::from((start, key.len())));
        }
    }

    None
}

/// Find the span of a quoted string value in TOML source.
fn find_value_span(src: &str, value: &str) -> Option<SourceSpan> {
    let quoted = format!("\"{}\"", value);
    src.rfind(&quoted)
        .map(|pos| SourceSpan::from((pos + 1, value.len())))
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(help("create a dtsup.toml in the project root or pass --config"))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse dtsup.toml")]
    #[diagnostic(code(dtsup::parse_error))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },

    #[error("{message}")]
    #[diagnostic(code(dtsup::validation_error))]
    Validation {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: Option<SourceSpan>,
        message: String,
    },

    #[error("invalid output name '{name}'")]
    #[diagnostic(
        code(dtsup::invalid_output_name),
        help("{reason}. Output names are relative paths such as 'index' or 'cli/main'.")
    )]
    InvalidOutputName {
        #[source_code]
        src: NamedSource<String>,
        #[label("invalid output name")]
        span: Option<SourceSpan>,
        name: String,
        reason: String,
    },
}
