//! Project persistence
//!
//! A project is a single JSON document holding the format version, a
//! modification timestamp and the [`MaskLayout`]. Explicit saves go to the
//! project file; autosaves go to a sibling `.autosave.json` file so a crash
//! mid-session never clobbers the last deliberate save.
//!
//! The editor talks to storage only through [`ProjectStorage`], and only at
//! transform boundaries or after discrete commands.

use crate::document::MaskLayout;
use crate::error::{MaskEditorError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// File format version
pub const PROJECT_VERSION: &str = "1.0.0";

/// Complete project structure for serialization
#[derive(Serialize, Deserialize)]
pub struct MaskProject {
    /// File format version
    pub version: String,

    /// Last modified timestamp (RFC 3339)
    pub modified: String,

    pub layout: MaskLayout,
}

impl MaskProject {
    pub fn new(layout: MaskLayout) -> Self {
        Self {
            version: PROJECT_VERSION.to_string(),
            modified: chrono::Utc::now().to_rfc3339(),
            layout,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a project, rejecting files from an incompatible major version
    pub fn from_json(json: &str) -> Result<Self> {
        let project: MaskProject = serde_json::from_str(json)?;
        if major_version(&project.version) != major_version(PROJECT_VERSION) {
            return Err(MaskEditorError::UnsupportedVersion(project.version));
        }
        Ok(project)
    }
}

fn major_version(version: &str) -> &str {
    version.split('.').next().unwrap_or(version)
}

/// Persistence collaborator
pub trait ProjectStorage {
    /// Restore the object graph and canvases
    fn load(&mut self) -> Result<MaskLayout>;

    /// Serialize the object graph; autosaves may be written elsewhere
    fn save(&mut self, layout: &MaskLayout, is_autosave: bool) -> Result<()>;
}

/// Stores the project as JSON on disk
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Where autosaves for this project are written
    pub fn autosave_path(&self) -> PathBuf {
        self.path.with_extension("autosave.json")
    }
}

impl ProjectStorage for JsonFileStorage {
    /// Load the project file, falling back to the autosave if there is none
    fn load(&mut self) -> Result<MaskLayout> {
        let source = if self.path.exists() {
            self.path.clone()
        } else {
            let autosave = self.autosave_path();
            if !autosave.exists() {
                return Err(MaskEditorError::NoProjectFile(self.path.clone()));
            }
            log::warn!("No project file, recovering from {}", autosave.display());
            autosave
        };

        let contents = std::fs::read_to_string(&source)?;
        let project = MaskProject::from_json(&contents)?;
        log::info!(
            "Loaded {} frame(s) from {}",
            project.layout.frame_count(),
            source.display()
        );
        Ok(project.layout)
    }

    fn save(&mut self, layout: &MaskLayout, is_autosave: bool) -> Result<()> {
        let target = if is_autosave {
            self.autosave_path()
        } else {
            self.path.clone()
        };
        let json = MaskProject::new(layout.clone()).to_json()?;
        write_atomic(&target, &json)?;

        if is_autosave {
            log::debug!("Autosaved to {}", target.display());
        } else {
            log::info!("Saved {} frame(s) to {}", layout.frame_count(), target.display());
        }
        Ok(())
    }
}

/// Write to a temp file and rename over the target
fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let temp_path = path.with_extension("json.tmp");
    std::fs::write(&temp_path, contents)?;
    std::fs::rename(temp_path, path)?;
    Ok(())
}

/// Keeps projects in memory; for tests and headless use
#[derive(Default)]
pub struct MemoryStorage {
    saved: Option<String>,
    autosaved: Option<String>,
    save_count: usize,
    autosave_count: usize,
    fail_writes: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent save fail with an I/O error
    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    pub fn save_count(&self) -> usize {
        self.save_count
    }

    pub fn autosave_count(&self) -> usize {
        self.autosave_count
    }
}

impl ProjectStorage for MemoryStorage {
    fn load(&mut self) -> Result<MaskLayout> {
        let json = self
            .saved
            .as_ref()
            .or(self.autosaved.as_ref())
            .ok_or(MaskEditorError::NothingSaved)?;
        Ok(MaskProject::from_json(json)?.layout)
    }

    fn save(&mut self, layout: &MaskLayout, is_autosave: bool) -> Result<()> {
        if self.fail_writes {
            return Err(std::io::Error::other("storage is read-only").into());
        }
        let json = MaskProject::new(layout.clone()).to_json()?;
        if is_autosave {
            self.autosaved = Some(json);
            self.autosave_count += 1;
        } else {
            self.saved = Some(json);
            self.save_count += 1;
        }
        Ok(())
    }
}

/// Debounces autosaves to at most one per interval
///
/// A request inside the interval is remembered and reported by `poll` once
/// the interval has passed.
pub struct Autosaver {
    interval: Duration,
    last_save: Option<Instant>,
    pending: bool,
}

impl Autosaver {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_save: None,
            pending: false,
        }
    }

    /// Ask for an autosave; returns true if it should happen now
    pub fn request(&mut self) -> bool {
        self.request_at(Instant::now())
    }

    pub fn request_at(&mut self, now: Instant) -> bool {
        if self.due_at(now) {
            self.mark_saved(now);
            true
        } else {
            self.pending = true;
            false
        }
    }

    /// Returns true if a deferred autosave is now due
    pub fn poll(&mut self) -> bool {
        self.poll_at(Instant::now())
    }

    pub fn poll_at(&mut self, now: Instant) -> bool {
        if self.pending && self.due_at(now) {
            self.mark_saved(now);
            true
        } else {
            false
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Clear and return the pending flag regardless of the interval
    pub fn take_pending(&mut self) -> bool {
        let pending = self.pending;
        if pending {
            self.mark_saved(Instant::now());
        }
        pending
    }

    fn due_at(&self, now: Instant) -> bool {
        match self.last_save {
            Some(last) => now.saturating_duration_since(last) >= self.interval,
            None => true,
        }
    }

    fn mark_saved(&mut self, now: Instant) {
        self.last_save = Some(now);
        self.pending = false;
    }
}
