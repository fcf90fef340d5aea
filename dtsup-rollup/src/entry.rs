//! Entry resolution: from an [`EntrySpec`] to `{ output name -> source file }`.

use std::path::{Component, Path, PathBuf};

use dtsup_config::{DeclarationRequest, EntrySpec, is_glob};
use dtsup_core::to_absolute_path;
use globset::GlobBuilder;
use indexmap::IndexMap;
use walkdir::{DirEntry, WalkDir};

use crate::{Result, RollupError};

/// Output name to absolute source path, in a deterministic order.
pub type EntryMap = IndexMap<String, PathBuf>;

/// Source extensions that can be entries.
const SOURCE_EXTENSIONS: &[&str] = &["ts", "tsx", "mts", "cts"];

/// Resolve the entries declaration files are rolled up for.
///
/// Without an entry of its own the request reuses the main build's entries
/// unchanged. With one, that spec is resolved independently.
pub fn resolve_declaration_entries(
    request: &DeclarationRequest,
    main: &EntryMap,
    root: &Path,
) -> Result<EntryMap> {
    let entries = match &request.entry {
        Some(spec) => resolve_entries(spec, root)?,
        None => main.clone(),
    };

    if entries.is_empty() {
        return Err(RollupError::Configuration(
            "declaration rollup is enabled but no exports could be determined".to_string(),
        ));
    }
    Ok(entries)
}

/// Normalize an entry spec against the project root.
pub fn resolve_entries(spec: &EntrySpec, root: &Path) -> Result<EntryMap> {
    match spec {
        EntrySpec::Single(path) => resolve_single(path, root),
        EntrySpec::Glob(pattern) => resolve_list(std::slice::from_ref(pattern), root),
        EntrySpec::List(items) => resolve_list(items, root),
        EntrySpec::Named(map) => resolve_named(map, root),
    }
}

fn resolve_single(path: &str, root: &Path) -> Result<EntryMap> {
    let file = resolve_literal(path, root)?;
    let name = file_stem(&file)?;
    Ok(EntryMap::from([(name, file)]))
}

fn resolve_list(items: &[String], root: &Path) -> Result<EntryMap> {
    let mut files: Vec<PathBuf> = Vec::new();
    for item in items {
        for file in expand(item, root)? {
            if !files.contains(&file) {
                files.push(file);
            }
        }
    }

    let Some(base) = common_base(&files) else {
        return Ok(EntryMap::new());
    };

    let mut entries = EntryMap::new();
    for file in files {
        let name = output_name(&file, &base)?;
        if let Some(existing) = entries.get(&name) {
            return Err(RollupError::Configuration(format!(
                "entries '{}' and '{}' both produce output '{}'",
                existing.display(),
                file.display(),
                name
            )));
        }
        entries.insert(name, file);
    }
    Ok(entries)
}

fn resolve_named(map: &IndexMap<String, String>, root: &Path) -> Result<EntryMap> {
    let mut entries = EntryMap::new();
    for (name, pattern) in map {
        let mut files = expand(pattern, root)?;
        let file = match files.len() {
            1 => files.remove(0),
            0 => {
                return Err(RollupError::Configuration(format!(
                    "entry '{}' ('{}') matches no source file",
                    name, pattern
                )));
            }
            n => {
                return Err(RollupError::Configuration(format!(
                    "entry '{}' ('{}') is ambiguous: it matches {} files",
                    name, pattern, n
                )));
            }
        };
        entries.insert(name.clone(), file);
    }
    Ok(entries)
}

/// Expand a path or glob pattern into absolute source files.
fn expand(pattern: &str, root: &Path) -> Result<Vec<PathBuf>> {
    if is_glob(pattern) {
        expand_glob(pattern, root)
    } else {
        Ok(vec![resolve_literal(pattern, root)?])
    }
}

fn resolve_literal(path: &str, root: &Path) -> Result<PathBuf> {
    let file = to_absolute_path(path, root);
    if !file.is_file() {
        return Err(RollupError::Configuration(format!(
            "entry '{}' does not exist",
            path
        )));
    }
    Ok(file)
}

/// Match `pattern` against source files under `root`, sorted.
///
/// `node_modules` and dot-directories are never searched.
pub fn expand_glob(pattern: &str, root: &Path) -> Result<Vec<PathBuf>> {
    let relative = relative_pattern(pattern, root)?;
    let matcher = GlobBuilder::new(&relative)
        .literal_separator(true)
        .build()
        .map_err(|e| RollupError::Configuration(format!("invalid glob '{}': {}", pattern, e)))?
        .compile_matcher();

    let mut files = Vec::new();
    let walker = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_skipped_dir(entry));
    for entry in walker.filter_map(|entry| entry.ok()) {
        if !entry.file_type().is_file() || !is_source_file(entry.path()) {
            continue;
        }
        let Ok(rel) = entry.path().strip_prefix(root) else {
            continue;
        };
        if matcher.is_match(rel) {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}

fn relative_pattern(pattern: &str, root: &Path) -> Result<String> {
    let pattern = pattern.replace('\\', "/");
    if Path::new(&pattern).is_absolute() {
        let root = root.to_string_lossy().replace('\\', "/");
        return match pattern.strip_prefix(&format!("{}/", root.trim_end_matches('/'))) {
            Some(rest) => Ok(rest.to_string()),
            None => Err(RollupError::Configuration(format!(
                "glob '{}' points outside the project root",
                pattern
            ))),
        };
    }
    Ok(pattern.trim_start_matches("./").to_string())
}

fn is_skipped_dir(entry: &DirEntry) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    name == "node_modules" || name.starts_with('.')
}

fn is_source_file(path: &Path) -> bool {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
    if name.contains(".d.") {
        return false;
    }
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext))
}

/// Lowest common ancestor directory of `files`.
fn common_base(files: &[PathBuf]) -> Option<PathBuf> {
    let mut iter = files.iter();
    let mut base = iter.next()?.parent()?.to_path_buf();
    for file in iter {
        while !file.starts_with(&base) {
            if !base.pop() {
                return None;
            }
        }
    }
    Some(base)
}

/// Output name of `file` relative to `base`: extension stripped, `/`-separated.
fn output_name(file: &Path, base: &Path) -> Result<String> {
    let rel = file.strip_prefix(base).map_err(|_| {
        RollupError::Internal(format!(
            "'{}' is not below '{}'",
            file.display(),
            base.display()
        ))
    })?;
    let mut segments: Vec<String> = rel
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    if let Some(last) = segments.pop() {
        segments.push(strip_extension(&last).to_string());
    }
    Ok(segments.join("/"))
}

fn file_stem(file: &Path) -> Result<String> {
    file.file_name()
        .and_then(|n| n.to_str())
        .map(|n| strip_extension(n).to_string())
        .ok_or_else(|| {
            RollupError::Configuration(format!("entry '{}' has no file name", file.display()))
        })
}

fn strip_extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(pos) if pos > 0 => &name[..pos],
        _ => name,
    }
}
