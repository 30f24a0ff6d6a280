//! Discovery and parsing of API documents on disk

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

use crate::config::SpecSettings;
use crate::domain::{ApiDocument, SpecDocument};

#[derive(Debug, Error)]
pub enum SpecLoadError {
    #[error("Failed to read spec file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON spec: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid YAML spec: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Failed to read glob entry: {0}")]
    Glob(#[from] glob::GlobError),

    #[error("Invalid spec file pattern: {0}")]
    Pattern(#[from] glob::PatternError),
}

/// Finds API documents in a directory by glob pattern and parses them
pub struct SpecLoader {
    dir: PathBuf,
    patterns: Vec<String>,
}

impl SpecLoader {
    pub fn new(dir: impl Into<PathBuf>, patterns: Vec<String>) -> Self {
        Self {
            dir: dir.into(),
            patterns,
        }
    }

    pub fn from_settings(settings: &SpecSettings) -> Self {
        Self::new(&settings.dir, settings.patterns.clone())
    }

    /// Matching files, sorted by path
    pub fn discover(&self) -> Result<Vec<PathBuf>, SpecLoadError> {
        let mut files = Vec::new();
        for pattern in &self.patterns {
            let full = self.dir.join(pattern);
            for entry in glob::glob(&full.to_string_lossy())? {
                match entry {
                    Ok(path) if path.is_file() => files.push(path),
                    Ok(_) => {}
                    Err(e) => warn!("Failed to read glob entry: {}", e),
                }
            }
        }
        files.sort();
        files.dedup();
        Ok(files)
    }

    /// Every document that parses; the rest are logged and skipped
    pub fn load_all(&self) -> Result<Vec<SpecDocument>, SpecLoadError> {
        let mut documents = Vec::new();
        for path in self.discover()? {
            match Self::load_file(&path) {
                Ok(document) => {
                    info!(spec = %document.name, path = %path.display(), "Loaded API document");
                    documents.push(document);
                }
                Err(e) => warn!(path = %path.display(), "Skipping API document: {}", e),
            }
        }
        Ok(documents)
    }

    /// Parse one file, as JSON for `.json` and YAML otherwise. The document is
    /// named after the file stem.
    pub fn load_file(path: &Path) -> Result<SpecDocument, SpecLoadError> {
        let content = std::fs::read_to_string(path)?;
        let document = match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ApiDocument::from_json_str(&content)?,
            _ => ApiDocument::from_yaml_str(&content)?,
        };
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(SpecDocument::new(name, document))
    }
}
