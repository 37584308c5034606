//! Configuration loading and management.
//!
//! The default configuration file is `oxidized-provenance.toml` in the
//! current working directory. Every key is optional; omitted keys fall back to
//! the built-in defaults.
//!
//! ```toml
//! [scan]
//! file_patterns = ["*.py", "*.rs"]
//! exclude_patterns = [".git", "target"]
//! ```
//!
//! ```rust,no_run
//! use oxidized_provenance::config::Config;
//!
//! let config = Config::load(None).expect("failed to load config");
//! assert!(config.scan.matches_file_name("main.py"));
//! ```

use std::path::{Path, PathBuf};

/// Name of the configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "oxidized-provenance.toml";

const DEFAULT_FILE_PATTERNS: &[&str] = &[
    "*.py", "*.js", "*.jsx", "*.ts", "*.tsx", "*.java", "*.cpp", "*.c", "*.h", "*.hpp", "*.cs",
    "*.go", "*.rb", "*.php", "*.swift", "*.kt",
];

const DEFAULT_EXCLUDE_PATTERNS: &[&str] = &[
    ".git",
    ".gitignore",
    "__pycache__",
    "node_modules",
    ".venv",
    "venv",
    "env",
    "build",
    "dist",
    ".egg-info",
    "out",
    ".vscode",
    ".idea",
];

/// Errors raised while loading a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Main configuration for a validation run.
#[derive(Debug, Clone, Default, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct Config {
    /// Which files are discovered under the scan root.
    pub scan: ScanConfig,
}

/// File discovery patterns.
///
/// # Examples
///
/// ```toml
/// [scan]
/// file_patterns = ["*.rs"]     # only Rust sources
/// exclude_patterns = ["target"]
/// ```
#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct ScanConfig {
    /// File-name patterns to include: `*`, `*.ext`, or an exact name.
    pub file_patterns: Vec<String>,
    /// Directory or file names to skip wherever they appear below the root.
    pub exclude_patterns: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        ScanConfig {
            file_patterns: DEFAULT_FILE_PATTERNS.iter().map(|s| s.to_string()).collect(),
            exclude_patterns: DEFAULT_EXCLUDE_PATTERNS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl ScanConfig {
    /// Returns `true` if `name` matches any include pattern.
    ///
    /// # Examples
    ///
    /// ```
    /// use oxidized_provenance::config::ScanConfig;
    ///
    /// let scan = ScanConfig::default();
    /// assert!(scan.matches_file_name("app.ts"));
    /// assert!(!scan.matches_file_name("README.md"));
    /// ```
    pub fn matches_file_name(&self, name: &str) -> bool {
        self.file_patterns
            .iter()
            .any(|pattern| pattern_matches(pattern, name))
    }

    /// Returns `true` if `name` (one path component) is excluded.
    pub fn is_excluded(&self, name: &str) -> bool {
        self.exclude_patterns.iter().any(|p| p == name)
    }
}

/// `*` matches everything, `*.ext` matches a `.ext` suffix, anything else
/// must equal the file name exactly.
fn pattern_matches(pattern: &str, name: &str) -> bool {
    if pattern == "*" {
        return true;
    }
    match pattern.strip_prefix("*.") {
        Some(ext) => name
            .strip_suffix(ext)
            .is_some_and(|stem| stem.ends_with('.')),
        None => name == pattern,
    }
}

impl Config {
    /// Loads configuration from a TOML file.
    ///
    /// Resolution order:
    /// 1. If `path` is `Some`, load from that file (error if missing).
    /// 2. If `path` is `None`, try [`DEFAULT_CONFIG_FILE`] in the current directory.
    /// 3. If that file does not exist either, return [`Config::default()`].
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when the explicit path does not exist, the
    /// file cannot be read, or its TOML fails to parse.
    pub fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
        let config_path = match path {
            Some(p) if p.exists() => Some(p.to_path_buf()),
            Some(p) => return Err(ConfigError::NotFound(p.to_path_buf())),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                default_path.exists().then(|| default_path.to_path_buf())
            }
        };

        let Some(path) = config_path else {
            return Ok(Config::default());
        };

        let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        let config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.clone(),
                source,
            })?;
        tracing::debug!(config = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Replaces the configured patterns with command-line values, when given.
    ///
    /// Empty entries (e.g. from a trailing comma) are dropped; an override
    /// that ends up empty leaves the configured list untouched.
    pub fn apply_overrides(
        &mut self,
        file_patterns: Option<Vec<String>>,
        exclude_patterns: Option<Vec<String>>,
    ) {
        if let Some(patterns) = file_patterns.and_then(clean_patterns) {
            self.scan.file_patterns = patterns;
        }
        if let Some(patterns) = exclude_patterns.and_then(clean_patterns) {
            self.scan.exclude_patterns = patterns;
        }
    }
}

fn clean_patterns(patterns: Vec<String>) -> Option<Vec<String>> {
    let cleaned: Vec<String> = patterns
        .into_iter()
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .collect();
    (!cleaned.is_empty()).then_some(cleaned)
}
