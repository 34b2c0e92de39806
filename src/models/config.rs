use cover_palette::sample::{DEFAULT_MAX_DIMENSION, DEFAULT_STRIDE};
use cover_palette::{CanvasSize, CoverAnalyzer};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Application configuration loaded from config.yaml
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct AppConfig {
    /// Cover sampling parameters
    #[serde(default)]
    pub sampling: SamplingConfig,

    /// Canvas used when a request does not specify one
    #[serde(default)]
    pub canvas: CanvasConfig,

    /// Palette cache sizing
    #[serde(default)]
    pub cache: CacheConfig,

    /// Remote cover fetching
    #[serde(default)]
    pub fetch: FetchConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SamplingConfig {
    /// Long side of the downscaled cover
    #[serde(default = "default_max_dimension")]
    pub max_dimension: u32,

    /// Row/column step over the downscaled cover
    #[serde(default = "default_stride")]
    pub stride: u32,
}

fn default_max_dimension() -> u32 {
    DEFAULT_MAX_DIMENSION
}

fn default_stride() -> u32 {
    DEFAULT_STRIDE
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            max_dimension: default_max_dimension(),
            stride: default_stride(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CanvasConfig {
    #[serde(default = "default_canvas_width")]
    pub width: f64,

    #[serde(default = "default_canvas_height")]
    pub height: f64,
}

fn default_canvas_width() -> f64 {
    390.0
}

fn default_canvas_height() -> f64 {
    844.0
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: default_canvas_width(),
            height: default_canvas_height(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CacheConfig {
    /// Maximum cached analyses before the oldest is evicted
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
}

fn default_max_entries() -> usize {
    128
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: default_max_entries(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct FetchConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Largest cover body accepted, in bytes
    #[serde(default = "default_max_bytes")]
    pub max_bytes: usize,

    /// Hosts covers may be fetched from; subdomains are included and an
    /// empty list allows any host
    #[serde(default)]
    pub allowed_hosts: Vec<String>,
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_max_bytes() -> usize {
    10 * 1024 * 1024
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            max_bytes: default_max_bytes(),
            allowed_hosts: Vec::new(),
        }
    }
}

impl FetchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl AppConfig {
    /// Load from the file named by `CONFIG_FILE`, or defaults when unset.
    pub fn from_env() -> Self {
        match std::env::var("CONFIG_FILE").ok().map(PathBuf::from) {
            Some(path) => Self::load(&path),
            None => {
                tracing::info!("CONFIG_FILE not set, using default configuration");
                Self::default()
            }
        }
    }

    /// Load configuration from a YAML file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match Self::parse(&content) {
                Ok(config) => {
                    tracing::info!(
                        path = %path.display(),
                        max_dimension = config.sampling.max_dimension,
                        cache_entries = config.cache.max_entries,
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, path = %path.display(), "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, path = %path.display(), "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    pub fn parse(content: &str) -> Result<Self, serde_yaml::Error> {
        // An empty document deserializes as unit, not as an empty map
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }

    /// Analyzer configured from the sampling section
    pub fn analyzer(&self) -> CoverAnalyzer {
        CoverAnalyzer::new()
            .max_dimension(self.sampling.max_dimension)
            .stride(self.sampling.stride)
    }

    pub fn default_canvas(&self) -> CanvasSize {
        CanvasSize::new(self.canvas.width, self.canvas.height)
    }
}
