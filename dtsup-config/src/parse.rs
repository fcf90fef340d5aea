//! Config parsing from files and strings.

use std::{path::Path, str::FromStr};

use crate::{Config, Error, Result, error::SourceContext, validate::validate_config};

impl FromStr for Config {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_config(s, "dtsup.toml")
    }
}

impl Config {
    /// Parse a dtsup.toml file from the given path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        parse_config(&content, &path.display().to_string())
    }

    /// Parse a dtsup.toml from a string with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        parse_config(content, filename)
    }
}

/// Parse a config from content with the given filename for error reporting.
pub fn parse_config(content: &str, filename: &str) -> Result<Config> {
    let source_ctx = SourceContext::new(content, filename);
    let config: Config = toml::from_str(content).map_err(|e| source_ctx.parse_error(e))?;
    validate_config(&config, &source_ctx)?;
    Ok(config)
}
