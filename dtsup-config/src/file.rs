use std::path::{Path, PathBuf};

use crate::{BuildOptions, Config, Result};

/// Represents a dtsup.toml file with both raw content and parsed config.
pub struct DtsupToml {
    path: PathBuf,
    content: String,
    config: Config,
}

impl DtsupToml {
    /// Open and parse a dtsup.toml file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let content = std::fs::read_to_string(&path).map_err(|e| {
            Box::new(crate::Error::Io {
                path: path.clone(),
                source: e,
            })
        })?;
        let filename = path.display().to_string();
        let config = Config::from_str_with_filename(&content, &filename)?;

        Ok(Self {
            path,
            content,
            config,
        })
    }

    /// Get the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the raw content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Get the parsed config.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Directory containing the file; relative paths in the config resolve against it.
    pub fn root(&self) -> PathBuf {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    /// Resolve the config into build options rooted at the file's directory.
    ///
    /// `cwd` anchors a relative config path.
    pub fn build_options(&self, cwd: &Path) -> BuildOptions {
        let root = dtsup_core::to_absolute_path(self.root(), cwd);
        self.config.resolve(&root)
    }
}
