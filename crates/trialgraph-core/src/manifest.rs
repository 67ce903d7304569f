//! Run manifest: records settings, counts and artifact hashes of a pipeline run

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// File name of the manifest inside the output directory
pub const MANIFEST_FILE: &str = "manifest.json";

/// Hash a file's contents with blake3.
pub fn hash_file(path: &Path) -> io::Result<blake3::Hash> {
    let mut hasher = blake3::Hasher::new();
    hasher.update_mmap(path)?;
    Ok(hasher.finalize())
}

/// Manifest stored alongside the artifacts of one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunManifest {
    /// When the run finished.
    pub created_at: chrono::DateTime<chrono::Utc>,
    /// Settings that shaped the output (search term, scopes, format).
    pub settings: BTreeMap<String, String>,
    /// Row counts per stage and per relation.
    pub counts: BTreeMap<String, usize>,
    /// Artifact file name → blake3 hex hash.
    pub file_hashes: BTreeMap<String, String>,
}

impl Default for RunManifest {
    fn default() -> Self {
        Self::new()
    }
}

impl RunManifest {
    pub fn new() -> Self {
        Self {
            created_at: chrono::Utc::now(),
            settings: BTreeMap::new(),
            counts: BTreeMap::new(),
            file_hashes: BTreeMap::new(),
        }
    }

    pub fn setting(&mut self, key: &str, value: impl ToString) {
        self.settings.insert(key.to_string(), value.to_string());
    }

    pub fn count(&mut self, key: &str, value: usize) {
        self.counts.insert(key.to_string(), value);
    }

    /// Hash an artifact and record it under its file name.
    pub fn record_file(&mut self, path: &Path) -> Result<()> {
        let hash =
            hash_file(path).with_context(|| format!("failed to hash {}", path.display()))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        self.file_hashes.insert(name, hash.to_hex().to_string());
        Ok(())
    }

    /// Write manifest to dir/manifest.json
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(MANIFEST_FILE);
        let json = serde_json::to_string_pretty(self).context("failed to serialize manifest")?;
        std::fs::write(&path, json)
            .with_context(|| format!("failed to write {}", path.display()))?;
        Ok(path)
    }

    /// Read manifest from dir/manifest.json
    pub fn read_from(dir: &Path) -> Result<Self> {
        let path = dir.join(MANIFEST_FILE);
        let json = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        serde_json::from_str(&json).with_context(|| format!("failed to parse {MANIFEST_FILE}"))
    }
}
