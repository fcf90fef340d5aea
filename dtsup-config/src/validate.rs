//! Post-parse validation of `dtsup.toml`.

use std::collections::HashSet;

use crate::{Config, DtsOption, EntrySpec, Result, error::SourceContext};

/// Validate a parsed configuration against its source text.
pub(crate) fn validate_config(config: &Config, ctx: &SourceContext) -> Result<()> {
    if config.format.is_empty() {
        return Err(ctx.error_at_key("format", "format must list at least one output format"));
    }

    let mut seen = HashSet::new();
    for format in &config.format {
        if !seen.insert(*format) {
            return Err(ctx.error_at_value(
                format.as_str(),
                format!("format '{}' is listed more than once", format),
            ));
        }
    }

    if let Some(entry) = &config.entry {
        validate_entry(entry, "entry", ctx)?;
    }
    if let DtsOption::Table(table) = &config.dts {
        if let Some(entry) = &table.entry {
            validate_entry(entry, "dts.entry", ctx)?;
        }
    }

    Ok(())
}

fn validate_entry(entry: &EntrySpec, key: &str, ctx: &SourceContext) -> Result<()> {
    match entry {
        EntrySpec::List(items) if items.is_empty() => {
            return Err(ctx.error_at_key(leaf(key), format!("{} must not be an empty list", key)));
        }
        EntrySpec::Named(map) if map.is_empty() => {
            return Err(ctx.error_at_key(leaf(key), format!("{} must not be an empty table", key)));
        }
        EntrySpec::Named(map) => {
            for name in map.keys() {
                if let Some(reason) = invalid_output_name(name) {
                    return Err(ctx.invalid_output_name(name, reason));
                }
            }
        }
        _ => {}
    }

    for pattern in entry.patterns() {
        if pattern.trim().is_empty() {
            return Err(ctx.error_at_key(leaf(key), format!("{} contains an empty path", key)));
        }
    }

    Ok(())
}

fn leaf(key: &str) -> &str {
    key.rsplit('.').next().unwrap_or(key)
}

/// Check whether `name` is usable as an output name.
///
/// Returns a reason if invalid, None if valid.
pub(crate) fn invalid_output_name(name: &str) -> Option<&'static str> {
    if name.is_empty() {
        return Some("output name cannot be empty");
    }
    if name.starts_with('/') || name.starts_with('\\') || name.contains(':') {
        return Some("output name must be a relative path");
    }
    if name.split(['/', '\\']).any(|segment| segment == "..") {
        return Some("output name must stay inside the output directory");
    }
    if name.split(['/', '\\']).any(str::is_empty) {
        return Some("output name contains an empty path segment");
    }
    None
}
