//! Configuration loading from TOML files

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use trialgraph_core::TableFormat;
use trialgraph_kg::{DrugTarget, EnrichOptions, KnowledgeBase};

/// Global configuration for trialgraph
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub output: OutputConfig,
    pub registry: RegistryConfig,
    pub enrich: EnrichOptions,
    pub knowledge: KnowledgeConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub default_dir: PathBuf,
    pub format: TableFormat,
    pub compression_level: i32,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_dir: PathBuf::from("./data"),
            format: TableFormat::Csv,
            compression_level: 3,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    pub base_url: String,
    pub search_term: String,
    pub max_trials: usize,
    pub page_size: usize,
    pub max_retries: u32,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        let defaults = trialgraph_registry::Config::default();
        Self {
            base_url: defaults.base_url,
            search_term: defaults.search_term,
            max_trials: defaults.max_trials,
            page_size: defaults.page_size,
            max_retries: defaults.max_retries,
        }
    }
}

/// Optional replacement for the builtin drug→gene map
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct KnowledgeConfig {
    pub drug_targets: Vec<DrugTarget>,
}

impl Config {
    /// Load configuration from default locations
    ///
    /// Search order:
    /// 1. ./trialgraph.toml (current directory)
    /// 2. ~/.config/trialgraph/config.toml
    ///
    /// If no config file found, returns default config.
    pub fn load() -> Result<Self> {
        let local_config = PathBuf::from("trialgraph.toml");
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        if let Some(config_dir) = directories::ProjectDirs::from("", "", "trialgraph") {
            let user_config = config_dir.config_dir().join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        log::debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Registry settings with an optional retry override
    pub fn registry(&self, max_retries: Option<u32>) -> trialgraph_registry::Config {
        trialgraph_registry::Config {
            base_url: self.registry.base_url.clone(),
            search_term: self.registry.search_term.clone(),
            max_trials: self.registry.max_trials,
            page_size: self.registry.page_size,
            max_retries: max_retries.unwrap_or(self.registry.max_retries),
        }
    }

    /// Builtin knowledge base, or one using the configured drug map
    pub fn knowledge_base(&self) -> KnowledgeBase {
        if self.knowledge.drug_targets.is_empty() {
            KnowledgeBase::builtin().clone()
        } else {
            KnowledgeBase::from_drug_targets(self.knowledge.drug_targets.clone())
        }
    }
}
