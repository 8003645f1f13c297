use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

use crate::scanner::DEFAULT_WORKERS;

/// Configuration for the comic cataloger
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory scan settings
    pub scan: ScanConfig,

    /// Skip list and known canonical titles
    pub titles: TitleConfig,

    /// Worker pool settings
    pub performance: PerformanceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// File extension accepted by the scanner
    pub extension: String,

    /// Stop after this many files (None = scan everything)
    pub max_to_scan: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TitleConfig {
    /// Series rejected outright by the episode filter
    pub skip_series: Vec<String>,

    /// Canonical series titles: parsed series snap onto these, and the
    /// sanitizer never renames them away
    pub known_titles: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceConfig {
    /// Maximum concurrent scan workers
    pub max_workers: usize,
}

impl Config {
    /// Load configuration from file, falling back to environment variables
    pub fn load() -> Result<Self> {
        let config_paths = [
            "comic-cataloger.toml",
            "config/comic-cataloger.toml",
            "~/.config/comic-cataloger/config.toml",
            "/etc/comic-cataloger/config.toml",
        ];

        for path in &config_paths {
            if let Ok(config_str) = std::fs::read_to_string(path) {
                match toml::from_str(&config_str) {
                    Ok(config) => {
                        tracing::info!("📄 Loaded configuration from: {}", path);
                        return Ok(config);
                    }
                    Err(e) => {
                        tracing::warn!("Failed to parse config file {}: {}", path, e);
                    }
                }
            }
        }

        Self::from_env()
    }

    /// Build configuration from COMIC_CATALOGER_* environment variables
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        let mut found = false;

        if let Ok(workers) = std::env::var("COMIC_CATALOGER_WORKERS") {
            config.performance.max_workers = workers.parse().unwrap_or(DEFAULT_WORKERS);
            found = true;
        }

        if let Ok(max) = std::env::var("COMIC_CATALOGER_MAX_FILES") {
            config.scan.max_to_scan = max.parse().ok();
            found = true;
        }

        if let Ok(skip) = std::env::var("COMIC_CATALOGER_SKIP_SERIES") {
            config.titles.skip_series = split_list(&skip);
            found = true;
        }

        if let Ok(known) = std::env::var("COMIC_CATALOGER_KNOWN_TITLES") {
            config.titles.known_titles = split_list(&known);
            found = true;
        }

        if found {
            Ok(config)
        } else {
            Err(anyhow!("No configuration file found"))
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.performance.max_workers == 0 {
            return Err(anyhow!("max_workers must be greater than 0"));
        }
        if self.scan.extension.is_empty() {
            return Err(anyhow!("scan extension must not be empty"));
        }
        Ok(())
    }

    /// Get runtime configuration summary
    pub fn summary(&self) -> String {
        format!(
            "Comic Cataloger Configuration:\n\
            - Workers: {}\n\
            - Extension: {}\n\
            - Max files: {}\n\
            - Skip series: {}\n\
            - Known titles: {}",
            self.performance.max_workers,
            self.scan.extension,
            self.scan
                .max_to_scan
                .map(|n| n.to_string())
                .unwrap_or_else(|| "unlimited".to_string()),
            self.titles.skip_series.len(),
            self.titles.known_titles.len(),
        )
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scan: ScanConfig {
                extension: "pdf".to_string(),
                max_to_scan: None,
            },
            titles: TitleConfig {
                skip_series: Vec::new(),
                known_titles: Vec::new(),
            },
            performance: PerformanceConfig {
                max_workers: num_cpus::get().min(DEFAULT_WORKERS),
            },
        }
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}
