//! Build options: the raw `dtsup.toml` shape and its normalized form.

use std::path::{Path, PathBuf};

use dtsup_core::{DEFAULT_SCRATCH_DIR, Format, to_absolute_path};
use serde::{
    Deserialize,
    de::{self, Deserializer, MapAccess, Visitor},
};

use crate::EntrySpec;

/// Root of a `dtsup.toml` file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Entries of the main build.
    pub entry: Option<EntrySpec>,

    /// Output formats, processed in order.
    #[serde(default = "default_formats")]
    pub format: Vec<Format>,

    /// Output directory, relative to the project root.
    #[serde(default = "default_out_dir")]
    pub out_dir: PathBuf,

    /// Remove stale declaration files from `out_dir` before rollup.
    #[serde(default)]
    pub clean: bool,

    /// The project's own tsconfig, handed to the flattening engine.
    #[serde(default = "default_tsconfig")]
    pub tsconfig: PathBuf,

    /// Where the compiler emits per-file declaration stubs.
    #[serde(default = "default_scratch_dir")]
    pub scratch_dir: PathBuf,

    /// Declaration rollup settings.
    #[serde(default)]
    pub dts: DtsOption,
}

fn default_formats() -> Vec<Format> {
    vec![Format::Cjs]
}

fn default_out_dir() -> PathBuf {
    PathBuf::from("dist")
}

fn default_tsconfig() -> PathBuf {
    PathBuf::from("tsconfig.json")
}

fn default_scratch_dir() -> PathBuf {
    PathBuf::from(DEFAULT_SCRATCH_DIR)
}

/// `dts = true | false` or a `[dts]` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DtsOption {
    Enabled(bool),
    Table(DtsTable),
}

impl Default for DtsOption {
    fn default() -> Self {
        DtsOption::Enabled(false)
    }
}

/// Uses manual Visitor so that errors inside the table keep their own message
impl<'de> Deserialize<'de> for DtsOption {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct DtsVisitor;

        impl<'de> Visitor<'de> for DtsVisitor {
            type Value = DtsOption;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("a boolean or a [dts] table")
            }

            fn visit_bool<E>(self, value: bool) -> std::result::Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(DtsOption::Enabled(value))
            }

            fn visit_map<M>(self, map: M) -> std::result::Result<Self::Value, M::Error>
            where
                M: MapAccess<'de>,
            {
                DtsTable::deserialize(de::value::MapAccessDeserializer::new(map))
                    .map(DtsOption::Table)
            }
        }

        deserializer.deserialize_any(DtsVisitor)
    }
}

/// The `[dts]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DtsTable {
    /// Declaration entries, independent from the main build's entries.
    pub entry: Option<EntrySpec>,
}

/// What the declaration rollup was asked to do.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeclarationRequest {
    /// Entries to roll up; `None` reuses the main build's entries.
    pub entry: Option<EntrySpec>,
}

impl DtsOption {
    /// Normalize into a request, or `None` when rollup is disabled.
    pub fn request(&self) -> Option<DeclarationRequest> {
        match self {
            DtsOption::Enabled(false) => None,
            DtsOption::Enabled(true) => Some(DeclarationRequest::default()),
            DtsOption::Table(table) => Some(DeclarationRequest {
                entry: table.entry.clone(),
            }),
        }
    }
}

/// Normalized per-build options with every path made absolute.
///
/// Built once per invocation and read-only afterwards.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Project root; relative paths and globs are resolved against it.
    pub root: PathBuf,
    /// Entries of the main build.
    pub entry: Option<EntrySpec>,
    /// Output formats, processed in order.
    pub formats: Vec<Format>,
    /// Absolute output directory.
    pub out_dir: PathBuf,
    /// Remove stale declaration files before rollup.
    pub clean: bool,
    /// Absolute path of the project's tsconfig.
    pub tsconfig: PathBuf,
    /// Absolute scratch directory holding the intermediate stubs.
    pub scratch_dir: PathBuf,
    /// Declaration rollup request, `None` when disabled.
    pub dts: Option<DeclarationRequest>,
}

impl Config {
    /// Resolve this configuration against the project root.
    pub fn resolve(&self, root: &Path) -> BuildOptions {
        BuildOptions {
            root: root.to_path_buf(),
            entry: self.entry.clone(),
            formats: self.format.clone(),
            out_dir: to_absolute_path(&self.out_dir, root),
            clean: self.clean,
            tsconfig: to_absolute_path(&self.tsconfig, root),
            scratch_dir: to_absolute_path(&self.scratch_dir, root),
            dts: self.dts.request(),
        }
    }
}

impl BuildOptions {
    /// Options for `root` with every setting at its default and rollup enabled.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            entry: None,
            formats: default_formats(),
            out_dir: to_absolute_path(default_out_dir(), &root),
            clean: false,
            tsconfig: to_absolute_path(default_tsconfig(), &root),
            scratch_dir: to_absolute_path(default_scratch_dir(), &root),
            dts: Some(DeclarationRequest::default()),
            root,
        }
    }

    pub fn with_entry(mut self, entry: EntrySpec) -> Self {
        self.entry = Some(entry);
        self
    }

    pub fn with_dts(mut self, dts: Option<DeclarationRequest>) -> Self {
        self.dts = dts;
        self
    }

    pub fn with_formats(mut self, formats: Vec<Format>) -> Self {
        self.formats = formats;
        self
    }

    /// Override the output directory (resolved against the root).
    pub fn with_out_dir(mut self, out_dir: impl AsRef<Path>) -> Self {
        self.out_dir = to_absolute_path(out_dir, &self.root);
        self
    }

    pub fn with_clean(mut self, clean: bool) -> Self {
        self.clean = clean;
        self
    }

    /// Override the scratch directory (resolved against the root).
    pub fn with_scratch_dir(mut self, scratch_dir: impl AsRef<Path>) -> Self {
        self.scratch_dir = to_absolute_path(scratch_dir, &self.root);
        self
    }
}
