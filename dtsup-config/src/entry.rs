//! Entry specifications as written by the user.

use indexmap::IndexMap;
use serde::Deserialize;

/// An entry specification, before any expansion against the filesystem.
///
/// In `dtsup.toml` a string becomes [`EntrySpec::Single`] or
/// [`EntrySpec::Glob`] depending on whether it contains glob
/// metacharacters, an array becomes [`EntrySpec::List`] and a table becomes
/// [`EntrySpec::Named`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawEntry")]
pub enum EntrySpec {
    /// One source path, e.g. `"src/index.ts"`.
    Single(String),
    /// One glob pattern, e.g. `"src/**/*.ts"`.
    Glob(String),
    /// Paths and/or glob patterns; output names are derived from file paths.
    List(Vec<String>),
    /// Output name to path or glob; keys are used verbatim as output names.
    Named(IndexMap<String, String>),
}

impl EntrySpec {
    /// Build the variant matching a single string.
    pub fn from_pattern(pattern: impl Into<String>) -> Self {
        let pattern = pattern.into();
        if is_glob(&pattern) {
            EntrySpec::Glob(pattern)
        } else {
            EntrySpec::Single(pattern)
        }
    }

    /// Every path or pattern string referenced by this spec.
    pub fn patterns(&self) -> Vec<&str> {
        match self {
            EntrySpec::Single(path) | EntrySpec::Glob(path) => vec![path.as_str()],
            EntrySpec::List(items) => items.iter().map(String::as_str).collect(),
            EntrySpec::Named(map) => map.values().map(String::as_str).collect(),
        }
    }

    /// Short variant name for messages.
    pub fn kind(&self) -> &'static str {
        match self {
            EntrySpec::Single(_) => "path",
            EntrySpec::Glob(_) => "glob",
            EntrySpec::List(_) => "list",
            EntrySpec::Named(_) => "named",
        }
    }
}

/// Whether `pattern` contains glob metacharacters.
pub fn is_glob(pattern: &str) -> bool {
    pattern.contains(['*', '?', '[', '{'])
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawEntry {
    One(String),
    Many(Vec<String>),
    Named(IndexMap<String, String>),
}

impl From<RawEntry> for EntrySpec {
    fn from(raw: RawEntry) -> Self {
        match raw {
            RawEntry::One(pattern) => EntrySpec::from_pattern(pattern),
            RawEntry::Many(items) => EntrySpec::List(items),
            RawEntry::Named(map) => EntrySpec::Named(map),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Holder {
        entry: EntrySpec,
    }

    fn parse(src: &str) -> EntrySpec {
        toml::from_str::<Holder>(src).unwrap().entry
    }

    #[test]
    fn test_single_path() {
        assert_eq!(
            parse(r#"entry = "src/index.ts""#),
            EntrySpec::Single("src/index.ts".into())
        );
    }

    #[test]
    fn test_glob_string() {
        assert_eq!(
            parse(r#"entry = "src/**/*.ts""#),
            EntrySpec::Glob("src/**/*.ts".into())
        );
    }

    #[test]
    fn test_list() {
        assert_eq!(
            parse(r#"entry = ["src/index.ts", "src/cli/*.ts"]"#),
            EntrySpec::List(vec!["src/index.ts".into(), "src/cli/*.ts".into()])
        );
    }

    #[test]
    fn test_named_keeps_order() {
        let spec = parse(
            r#"
            [entry]
            index = "src/index.ts"
            cli = "src/cli.ts"
            "#,
        );
        let EntrySpec::Named(map) = spec else {
            panic!("expected named entry");
        };
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["index", "cli"]);
    }

    #[test]
    fn test_is_glob() {
        assert!(is_glob("src/*.ts"));
        assert!(is_glob("src/?.ts"));
        assert!(is_glob("src/[ab].ts"));
        assert!(is_glob("src/{a,b}.ts"));
        assert!(!is_glob("src/index.ts"));
    }

    #[test]
    fn test_patterns() {
        let spec = EntrySpec::List(vec!["a.ts".into(), "b/*.ts".into()]);
        assert_eq!(spec.patterns(), vec!["a.ts", "b/*.ts"]);
        assert_eq!(spec.kind(), "list");
    }
}
