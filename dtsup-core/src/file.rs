use std::path::{Path, PathBuf};

use eyre::{Context, Result};

/// A value rendered to one file on disk.
pub trait GeneratedFile {
    /// Where the file goes under `base`.
    fn path(&self, base: &Path) -> PathBuf;

    fn render(&self) -> Result<String>;

    /// Render and write the file, replacing any previous content.
    ///
    /// Nothing is written when rendering fails. Returns the written path.
    fn write(&self, base: &Path) -> Result<PathBuf> {
        let path = self.path(base);
        let content = self.render()?;
        write_file(&path, &content)?;
        Ok(path)
    }
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .wrap_err_with(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(path, content).wrap_err_with(|| format!("failed to write {}", path.display()))
}
