//! Filesystem writer
//!
//! Atomic writes go through a uniquely named temp file next to the
//! destination, which is synced and then persisted over it. Concurrent
//! writers of the same destination never share a temp file.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use token_emit::PlatformTarget;

/// Output errors
#[derive(Debug, Error)]
pub enum OutputError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme id or target location is not a plain relative path
    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}

/// Result type for output operations
pub type Result<T> = std::result::Result<T, OutputError>;

/// Writer configuration
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Build directory
    pub root: PathBuf,
    /// Enable atomic writes with temp files
    pub atomic_writes: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("build"),
            atomic_writes: true,
        }
    }
}

impl OutputConfig {
    /// Create a new configuration
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Default::default()
        }
    }

    /// Enable or disable atomic writes
    pub fn atomic_writes(mut self, enabled: bool) -> Self {
        self.atomic_writes = enabled;
        self
    }
}

/// A file that was written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenArtifact {
    /// Destination path
    pub path: PathBuf,
    /// Bytes written
    pub bytes: usize,
}

/// Destination for emitted artifacts
#[async_trait]
pub trait ArtifactSink: Send + Sync {
    /// Write one artifact, replacing any previous version
    async fn write(
        &self,
        theme: &str,
        target: &PlatformTarget,
        contents: &str,
    ) -> Result<WrittenArtifact>;
}

/// Writes artifacts under a build directory
#[derive(Debug, Clone)]
pub struct FsWriter {
    config: OutputConfig,
}

impl FsWriter {
    /// Create a writer
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    /// Destination path for a theme and target
    pub fn output_path(&self, theme: &str, target: &PlatformTarget) -> Result<PathBuf> {
        check_segment(theme, "theme id")?;
        check_segment(&target.file_name, "file name")?;

        let mut path = self.config.root.join(theme);
        for segment in target.directory.split('/') {
            check_segment(segment, "target directory")?;
            path.push(segment);
        }
        path.push(&target.file_name);

        Ok(path)
    }

    /// Write atomically using temp file + rename
    async fn write_atomic(&self, path: &Path, contents: &str) -> Result<()> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| OutputError::InvalidPath(path.display().to_string()))?;
        let parent = path
            .parent()
            .ok_or_else(|| OutputError::InvalidPath(path.display().to_string()))?;

        let temp = tempfile::Builder::new()
            .prefix(&format!(".{}.", file_name))
            .suffix(".tmp")
            .tempfile_in(parent)?;
        // Dropping `temp_path` removes the file if anything below fails
        let (file, temp_path) = temp.into_parts();

        let mut file = fs::File::from_std(file);
        file.write_all(contents.as_bytes()).await?;
        file.sync_all().await?;
        drop(file);

        temp_path.persist(path).map_err(|e| OutputError::Io(e.error))?;
        Ok(())
    }
}

#[async_trait]
impl ArtifactSink for FsWriter {
    async fn write(
        &self,
        theme: &str,
        target: &PlatformTarget,
        contents: &str,
    ) -> Result<WrittenArtifact> {
        let path = self.output_path(theme, target)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        if self.config.atomic_writes {
            self.write_atomic(&path, contents).await?;
        } else {
            fs::write(&path, contents).await?;
        }

        tracing::debug!("Wrote {} ({} bytes)", path.display(), contents.len());

        Ok(WrittenArtifact {
            path,
            bytes: contents.len(),
        })
    }
}

fn check_segment(segment: &str, what: &str) -> Result<()> {
    let invalid = segment.is_empty()
        || segment == "."
        || segment == ".."
        || segment.contains(|c| matches!(c, '/' | '\\' | '\0'))
        || Path::new(segment).is_absolute();

    if invalid {
        return Err(OutputError::InvalidPath(format!("{} '{}'", what, segment)));
    }
    Ok(())
}
