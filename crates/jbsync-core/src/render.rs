// Rust guideline compliant 2026-02-06

//! Target renderers: persist converted issues and epics under `.beads/`.
//!
//! Two layouts are supported:
//! - JSONL: `.beads/issues.jsonl` and `.beads/epics.jsonl`, one entity per line
//! - YAML: `.beads/issues/<id>.yaml` and `.beads/epics/<id>.yaml`
//!
//! All writes go through a temp file and a rename so a failed run never
//! leaves a half-written file behind.

use crate::config::OutputFormat;
use crate::ids::is_file_safe;
use crate::{Entity, Epic, Error, Export, Issue, Result};
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

/// Name of the beads directory under the output root.
pub const BEADS_DIR: &str = ".beads";

/// Counts of entities written by one render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RenderSummary {
    /// Issues written.
    pub issues: usize,
    /// Epics written.
    pub epics: usize,
}

/// Persists target entities.
pub trait Renderer {
    /// Accepts one entity.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is invalid or cannot be written.
    fn render(&mut self, entity: &Entity) -> Result<()>;

    /// Flushes anything buffered by [`Renderer::render`].
    ///
    /// # Errors
    ///
    /// Returns an error if the output cannot be written.
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }

    /// Adds a repository to the `repositories` metadata of a rendered issue.
    ///
    /// # Errors
    ///
    /// Returns:
    /// - `NotFound` if no rendered issue has this id
    /// - `AnnotationConflict` if the repository is already recorded
    fn annotate_repository(&self, id: &str, repository: &str) -> Result<()>;
}

/// Renders every entity of `export`, epics first, then finishes.
///
/// # Errors
///
/// Returns the first render error. Earlier YAML files may already exist.
pub fn render_export(renderer: &mut dyn Renderer, export: &Export) -> Result<RenderSummary> {
    for entity in export.entities() {
        renderer.render(&entity)?;
    }
    renderer.finish()?;

    Ok(RenderSummary {
        issues: export.issues.len(),
        epics: export.epics.len(),
    })
}

/// Creates the renderer for `format` rooted at `output_dir`.
pub fn renderer_for(format: OutputFormat, output_dir: &Path) -> Box<dyn Renderer> {
    match format {
        OutputFormat::Yaml => Box::new(YamlRenderer::new(output_dir)),
        OutputFormat::Jsonl => Box::new(JsonlRenderer::new(output_dir)),
    }
}

/// Writes `bytes` to `path` through a sibling temp file.
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let mut temp_name = path.as_os_str().to_owned();
    temp_name.push(".tmp");
    let temp_path = PathBuf::from(temp_name);

    {
        let mut file = File::create(&temp_path)?;
        file.write_all(bytes)?;
        file.sync_all()?;
    }

    std::fs::rename(&temp_path, path)?;
    Ok(())
}

fn to_jsonl<T: Serialize>(items: &[T]) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    for item in items {
        serde_json::to_writer(&mut out, item)?;
        out.push(b'\n');
    }
    Ok(out)
}

/// Renders entities as two JSONL files.
///
/// Entities are buffered and written on [`Renderer::finish`], replacing any
/// previous files.
pub struct JsonlRenderer {
    beads_dir: PathBuf,
    issues: Vec<Issue>,
    epics: Vec<Epic>,
}

impl JsonlRenderer {
    /// Creates a renderer writing under `output_dir/.beads`.
    pub fn new(output_dir: &Path) -> Self {
        Self {
            beads_dir: output_dir.join(BEADS_DIR),
            issues: Vec::new(),
            epics: Vec::new(),
        }
    }

    /// Path of the issues file.
    pub fn issues_path(&self) -> PathBuf {
        self.beads_dir.join("issues.jsonl")
    }

    /// Path of the epics file.
    pub fn epics_path(&self) -> PathBuf {
        self.beads_dir.join("epics.jsonl")
    }

    /// Loads every issue from the issues file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or a line is not a valid issue.
    pub fn load_issues(&self) -> Result<Vec<Issue>> {
        let path = self.issues_path();
        if !path.exists() {
            return Ok(Vec::new());
        }

        let reader = BufReader::new(File::open(&path)?);
        let mut issues = Vec::new();
        for result in serde_json::Deserializer::from_reader(reader).into_iter::<Issue>() {
            issues.push(result?);
        }
        Ok(issues)
    }

    /// Executes a closure with an exclusive lock on the beads directory.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The lock cannot be acquired
    /// - The closure returns an error
    pub fn with_lock<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce() -> Result<T>,
    {
        use fs2::FileExt;

        std::fs::create_dir_all(&self.beads_dir)?;
        let lock_path = self.beads_dir.join("jsonl.lock");
        let lock_file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&lock_path)?;

        lock_file.try_lock_exclusive().map_err(|e| {
            Error::Io(std::io::Error::new(
                std::io::ErrorKind::WouldBlock,
                format!("Failed to acquire lock on {}: {}", lock_path.display(), e),
            ))
        })?;

        let result = f();
        let _ = lock_file.unlock();
        result
    }
}

impl Renderer for JsonlRenderer {
    fn render(&mut self, entity: &Entity) -> Result<()> {
        entity.validate()?;
        match entity {
            Entity::Issue(issue) => self.issues.push(issue.clone()),
            Entity::Epic(epic) => self.epics.push(epic.clone()),
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.with_lock(|| {
            write_atomic(&self.issues_path(), &to_jsonl(&self.issues)?)?;
            if !self.epics.is_empty() {
                write_atomic(&self.epics_path(), &to_jsonl(&self.epics)?)?;
            }
            Ok(())
        })?;

        tracing::info!(
            issues = self.issues.len(),
            epics = self.epics.len(),
            dir = %self.beads_dir.display(),
            "Wrote JSONL"
        );
        self.issues.clear();
        self.epics.clear();
        Ok(())
    }

    fn annotate_repository(&self, id: &str, repository: &str) -> Result<()> {
        self.with_lock(|| {
            let mut issues = self.load_issues()?;
            let issue = issues
                .iter_mut()
                .find(|issue| issue.id == id)
                .ok_or_else(|| Error::NotFound {
                    id: id.to_string(),
                    path: self.issues_path(),
                })?;

            if !issue.metadata.add_repository(repository) {
                return Err(Error::AnnotationConflict {
                    id: id.to_string(),
                    repository: repository.to_string(),
                });
            }

            write_atomic(&self.issues_path(), &to_jsonl(&issues)?)
        })
    }
}

/// Renders each entity to its own YAML file.
pub struct YamlRenderer {
    beads_dir: PathBuf,
}

impl YamlRenderer {
    /// Creates a renderer writing under `output_dir/.beads`.
    pub fn new(output_dir: &Path) -> Self {
        Self {
            beads_dir: output_dir.join(BEADS_DIR),
        }
    }

    /// Path of the YAML file for issue `id`.
    pub fn issue_path(&self, id: &str) -> PathBuf {
        self.beads_dir.join("issues").join(format!("{}.yaml", id))
    }

    /// Path of the YAML file for epic `id`.
    pub fn epic_path(&self, id: &str) -> PathBuf {
        self.beads_dir.join("epics").join(format!("{}.yaml", id))
    }

    /// Reads a rendered issue.
    ///
    /// # Errors
    ///
    /// Returns `ValidationFailure` if `id` cannot name a file under
    /// `.beads/`, `NotFound` if the file is missing, or a parse error.
    pub fn load_issue(&self, id: &str) -> Result<Issue> {
        if !is_file_safe(id) {
            return Err(Error::ValidationFailure {
                key: id.to_string(),
                reason: "id contains a path separator or '..'".to_string(),
            });
        }

        let path = self.issue_path(id);
        if !path.exists() {
            return Err(Error::NotFound {
                id: id.to_string(),
                path,
            });
        }
        let content = std::fs::read_to_string(&path)?;
        Ok(serde_yaml::from_str(&content)?)
    }

    fn write<T: Serialize>(path: &Path, value: &T) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let yaml = serde_yaml::to_string(value)?;
        write_atomic(path, yaml.as_bytes())
    }
}

impl Renderer for YamlRenderer {
    fn render(&mut self, entity: &Entity) -> Result<()> {
        entity.validate()?;
        match entity {
            Entity::Issue(issue) => Self::write(&self.issue_path(&issue.id), issue)?,
            Entity::Epic(epic) => Self::write(&self.epic_path(&epic.id), epic)?,
        }
        tracing::debug!(id = %entity.id(), "Wrote YAML");
        Ok(())
    }

    fn annotate_repository(&self, id: &str, repository: &str) -> Result<()> {
        let mut issue = self.load_issue(id)?;
        if !issue.metadata.add_repository(repository) {
            return Err(Error::AnnotationConflict {
                id: id.to_string(),
                repository: repository.to_string(),
            });
        }
        Self::write(&self.issue_path(id), &issue)
    }
}
