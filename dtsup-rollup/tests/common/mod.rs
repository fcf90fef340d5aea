//! Shared fixtures for rollup integration tests.

#![allow(dead_code)]

use std::{
    fs,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use dtsup_config::BuildOptions;
use dtsup_core::DEFAULT_SCRATCH_DIR;
use dtsup_rollup::{EngineReport, EntryMap, FlattenEngine, FlattenJob, Result};
use tempfile::TempDir;

/// A throwaway project: sources, `package.json` and compiler-emitted stubs.
pub struct Project {
    dir: TempDir,
}

impl Project {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    /// A project whose `package.json` declares `"type"`.
    pub fn with_type(kind: &str) -> Self {
        let project = Self::new();
        project.write(
            "package.json",
            &format!("{{\n  \"name\": \"fixture\",\n  \"type\": \"{kind}\"\n}}\n"),
        );
        project
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, rel: &str) -> PathBuf {
        self.root().join(rel)
    }

    pub fn write(&self, rel: &str, content: &str) {
        let path = self.path(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    pub fn read(&self, rel: &str) -> String {
        fs::read_to_string(self.path(rel))
            .unwrap_or_else(|e| panic!("Failed to read {rel}: {e}"))
    }

    pub fn exists(&self, rel: &str) -> bool {
        self.path(rel).exists()
    }

    /// Write `src/<name>.ts` and the stub the compiler would emit for it.
    pub fn module(&self, name: &str, source: &str, stub: &str) {
        self.write(&format!("src/{name}.ts"), source);
        self.stub(&format!("{name}.d.ts"), stub);
    }

    /// Write a stub into the scratch directory.
    pub fn stub(&self, file_name: &str, content: &str) {
        self.write(&format!("{DEFAULT_SCRATCH_DIR}/{file_name}"), content);
    }

    pub fn options(&self) -> BuildOptions {
        BuildOptions::new(self.root())
    }

    /// Main-build entries `{ name -> src/<name>.ts }`.
    pub fn exports(&self, names: &[&str]) -> EntryMap {
        names
            .iter()
            .map(|name| (name.to_string(), self.path(&format!("src/{name}.ts"))))
            .collect()
    }

    /// Every file under `dir`, relative and sorted.
    pub fn files(&self, dir: &str) -> Vec<String> {
        let base = self.path(dir);
        let mut files: Vec<String> = walkdir::WalkDir::new(&base)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| {
                e.path()
                    .strip_prefix(&base)
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect();
        files.sort();
        files
    }
}

/// Deterministic stand-in for API Extractor.
///
/// Inlines `export ... from './x'` re-exports from sibling stubs, drops empty
/// `export {};` markers and ends every file with `export { }`.
#[derive(Clone, Default)]
pub struct FakeEngine {
    jobs: Arc<Mutex<Vec<FlattenJob>>>,
}

impl FakeEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Jobs run so far, in order.
    pub fn jobs(&self) -> Vec<FlattenJob> {
        self.jobs.lock().unwrap().clone()
    }
}

impl FlattenEngine for FakeEngine {
    fn name(&self) -> &'static str {
        "fake"
    }

    fn flatten(&self, job: &FlattenJob) -> Result<EngineReport> {
        assert!(job.config_path.is_file(), "config must exist during the job");
        self.jobs.lock().unwrap().push(job.clone());

        let mut body = Vec::new();
        inline(&job.input, &mut body);
        let mut content = body.join("\n");
        content.push_str("\n\nexport { }\n");
        fs::write(&job.output, content)?;
        Ok(EngineReport::success())
    }
}

fn inline(stub: &Path, out: &mut Vec<String>) {
    let content = fs::read_to_string(stub)
        .unwrap_or_else(|e| panic!("Failed to read stub {}: {e}", stub.display()));
    let dir = stub.parent().unwrap();
    for line in content.lines() {
        let line = line.trim_end();
        if line.is_empty() || line == "export {};" {
            continue;
        }
        match reexport_target(line) {
            Some(target) => inline(&dir.join(format!("{target}.d.ts")), out),
            None => out.push(line.to_string()),
        }
    }
}

fn reexport_target(line: &str) -> Option<&str> {
    if !line.starts_with("export ") {
        return None;
    }
    let (_, spec) = line.split_once(" from ")?;
    spec.trim_end_matches(';')
        .trim_matches(|c| c == '\'' || c == '"')
        .strip_prefix("./")
}

/// An engine that reports errors for every job.
#[derive(Clone, Default)]
pub struct FailingEngine {
    calls: Arc<Mutex<usize>>,
}

impl FailingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

impl FlattenEngine for FailingEngine {
    fn name(&self) -> &'static str {
        "failing"
    }

    fn flatten(&self, _job: &FlattenJob) -> Result<EngineReport> {
        *self.calls.lock().unwrap() += 1;
        Ok(EngineReport {
            succeeded: false,
            error_count: 1,
            warning_count: 0,
            messages: vec!["Error: ae-forgotten-export".to_string()],
        })
    }
}
