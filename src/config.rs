//! Configuration loading for Thicket.
//!
//! Configuration follows a precedence chain:
//! 1. Environment variables (highest priority)
//! 2. Project config (`.thicket/config.toml`)
//! 3. User config (`~/.thicket/config.toml`)
//! 4. Defaults (lowest priority)
//!
//! All configuration is optional. The system runs with sensible defaults
//! when no config exists.

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::DocumentType;
use crate::error::{Result, ThicketError};

/// Name of the per-project and per-user data directory.
pub const THICKET_DIR: &str = ".thicket";

/// Main configuration struct for Thicket.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Interactive search configuration.
    pub search: SearchConfig,
    /// Automatic context injection configuration.
    pub injection: InjectionConfig,
    /// Alias dictionary location.
    pub aliases: AliasesConfig,
    /// Log output configuration.
    pub logging: LoggingConfig,
}

/// Interactive search configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SearchConfig {
    /// Number of results returned when the caller gives no limit.
    pub default_limit: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { default_limit: 10 }
    }
}

/// Automatic context injection configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct InjectionConfig {
    /// Whether the prompt hook injects context at all.
    pub enabled: bool,
    /// Prompts shorter than this many chars are not searched.
    pub min_input_chars: usize,
    /// Prompts are cut to this many chars before searching.
    pub max_input_chars: usize,
    /// Minimum total score for a match to be injected.
    ///
    /// The default of 10 requires at least an exact body hit or a substring
    /// title/tag hit; lone fuzzy or body-substring hits stay out.
    pub relevance_floor: u32,
    /// Maximum number of matches rendered into the block.
    pub max_matches: usize,
    /// Document types eligible for injection.
    pub allowed_types: Vec<DocumentType>,
}

impl Default for InjectionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            min_input_chars: 8,
            max_input_chars: 200,
            relevance_floor: 10,
            max_matches: 3,
            allowed_types: vec![
                DocumentType::Decision,
                DocumentType::Pattern,
                DocumentType::Rule,
            ],
        }
    }
}

impl InjectionConfig {
    /// Check if a max_input_chars value is valid (must be >= 1).
    pub fn is_valid_max_input_chars(value: usize) -> bool {
        value >= 1
    }
}

/// Alias dictionary location.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AliasesConfig {
    /// Explicit dictionary path. When unset, `.thicket/tags.toml` in the
    /// project is used if it exists.
    pub path: Option<PathBuf>,
}

/// Log output configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing` filter directive (e.g. "warn", "thicket=debug").
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl Config {
    /// Load configuration with full precedence chain.
    ///
    /// Precedence (highest to lowest):
    /// 1. Environment variables
    /// 2. Project config (`.thicket/config.toml` in the project root)
    /// 3. User config (`~/.thicket/config.toml`)
    /// 4. Defaults
    pub fn load() -> Self {
        match env::current_dir() {
            Ok(cwd) => Self::load_from_cwd(&cwd),
            Err(_) => {
                let mut config = Config::default();
                if let Some(user_config) = Self::load_user_config() {
                    config = config.merge(user_config);
                }
                config.apply_env_overrides();
                config
            }
        }
    }

    /// Load configuration with a specific working directory.
    pub fn load_from_cwd(cwd: &Path) -> Self {
        let mut config = Config::default();

        if let Some(user_config) = Self::load_user_config() {
            config = config.merge(user_config);
        }

        if let Some(project_config) = Self::load_project_config(cwd) {
            config = config.merge(project_config);
        }

        config.apply_env_overrides();

        config
    }

    /// Load user config from `~/.thicket/config.toml`.
    fn load_user_config() -> Option<Config> {
        let home = thicket_home()?;
        Self::load_optional(&home.join("config.toml"))
    }

    /// Load project config from `.thicket/config.toml` under the project root.
    fn load_project_config(cwd: &Path) -> Option<Config> {
        Self::load_optional(&project_thicket_dir(cwd).join("config.toml"))
    }

    /// Load a config file that may not exist; parse failures are reported.
    fn load_optional(path: &Path) -> Option<Config> {
        if !path.exists() {
            return None;
        }
        match Self::load_from_file(path) {
            Ok(config) => Some(config),
            Err(e) => {
                eprintln!("Warning: ignoring {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Load config from a specific file path.
    fn load_from_file(path: &Path) -> Result<Config> {
        let content = fs::read_to_string(path).map_err(|e| ThicketError::storage(path, e))?;
        toml::from_str(&content).map_err(|e| ThicketError::config(e.to_string()))
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        // THICKET_SEARCH_LIMIT
        if let Ok(val) = env::var("THICKET_SEARCH_LIMIT") {
            match val.parse::<usize>() {
                Ok(n) if n > 0 => self.search.default_limit = n,
                _ => eprintln!(
                    "Warning: Invalid THICKET_SEARCH_LIMIT value '{}'. \
                    Expected a positive integer. Using default '{}'.",
                    val, self.search.default_limit
                ),
            }
        }

        // THICKET_INJECT_ENABLED
        if let Ok(val) = env::var("THICKET_INJECT_ENABLED") {
            self.injection.enabled = val == "true" || val == "1";
        }

        // THICKET_RELEVANCE_FLOOR
        if let Ok(val) = env::var("THICKET_RELEVANCE_FLOOR") {
            match val.parse::<u32>() {
                Ok(n) => self.injection.relevance_floor = n,
                Err(_) => eprintln!(
                    "Warning: Invalid THICKET_RELEVANCE_FLOOR value '{}'. \
                    Expected a non-negative integer. Using default '{}'.",
                    val, self.injection.relevance_floor
                ),
            }
        }

        // THICKET_INJECT_MAX_MATCHES
        if let Ok(val) = env::var("THICKET_INJECT_MAX_MATCHES") {
            match val.parse::<usize>() {
                Ok(n) => self.injection.max_matches = n,
                Err(_) => eprintln!(
                    "Warning: Invalid THICKET_INJECT_MAX_MATCHES value '{}'. \
                    Expected a non-negative integer. Using default '{}'.",
                    val, self.injection.max_matches
                ),
            }
        }

        // THICKET_INJECT_MIN_CHARS
        if let Ok(val) = env::var("THICKET_INJECT_MIN_CHARS") {
            match val.parse::<usize>() {
                Ok(n) => self.injection.min_input_chars = n,
                Err(_) => eprintln!(
                    "Warning: Invalid THICKET_INJECT_MIN_CHARS value '{}'. \
                    Expected a non-negative integer. Using default '{}'.",
                    val, self.injection.min_input_chars
                ),
            }
        }

        // THICKET_INJECT_MAX_CHARS
        if let Ok(val) = env::var("THICKET_INJECT_MAX_CHARS") {
            match val.parse::<usize>() {
                Ok(n) if InjectionConfig::is_valid_max_input_chars(n) => {
                    self.injection.max_input_chars = n
                }
                _ => eprintln!(
                    "Warning: Invalid THICKET_INJECT_MAX_CHARS value '{}'. \
                    Expected a positive integer. Using default '{}'.",
                    val, self.injection.max_input_chars
                ),
            }
        }

        // THICKET_INJECT_TYPES
        if let Ok(val) = env::var("THICKET_INJECT_TYPES") {
            let parsed: Option<Vec<DocumentType>> = val
                .split(',')
                .filter(|s| !s.trim().is_empty())
                .map(DocumentType::parse)
                .collect();
            match parsed {
                Some(types) => self.injection.allowed_types = types,
                None => eprintln!(
                    "Warning: Invalid THICKET_INJECT_TYPES value '{}'. \
                    Valid values: session, decision, pattern, rule. Using default '{:?}'.",
                    val, self.injection.allowed_types
                ),
            }
        }

        // THICKET_TAGS_PATH
        if let Ok(val) = env::var("THICKET_TAGS_PATH") {
            if val.trim().is_empty() {
                eprintln!("Warning: THICKET_TAGS_PATH is empty, ignoring.");
            } else {
                self.aliases.path = Some(PathBuf::from(val));
            }
        }

        // THICKET_LOG
        if let Ok(val) = env::var("THICKET_LOG") {
            if !val.trim().is_empty() {
                self.logging.level = val;
            }
        }
    }

    /// Merge another config into this one.
    ///
    /// The `other` config takes precedence field by field: every value of
    /// `other` that differs from the default replaces the value in `self`.
    ///
    /// # Limitation
    ///
    /// A layer cannot reset a value back to its default if a lower layer
    /// changed it, because "not set" and "set to the default" look the same.
    fn merge(mut self, other: Config) -> Self {
        let default_search = SearchConfig::default();
        if other.search.default_limit != default_search.default_limit {
            self.search.default_limit = other.search.default_limit;
        }

        let default_injection = InjectionConfig::default();
        if other.injection.enabled != default_injection.enabled {
            self.injection.enabled = other.injection.enabled;
        }
        if other.injection.min_input_chars != default_injection.min_input_chars {
            self.injection.min_input_chars = other.injection.min_input_chars;
        }
        if other.injection.max_input_chars != default_injection.max_input_chars {
            self.injection.max_input_chars = other.injection.max_input_chars;
        }
        if other.injection.relevance_floor != default_injection.relevance_floor {
            self.injection.relevance_floor = other.injection.relevance_floor;
        }
        if other.injection.max_matches != default_injection.max_matches {
            self.injection.max_matches = other.injection.max_matches;
        }
        if other.injection.allowed_types != default_injection.allowed_types {
            self.injection.allowed_types = other.injection.allowed_types;
        }

        if other.aliases.path.is_some() {
            self.aliases.path = other.aliases.path;
        }

        if other.logging.level != LoggingConfig::default().level {
            self.logging.level = other.logging.level;
        }

        self
    }

    /// Resolve the alias dictionary path for a project.
    ///
    /// Returns the path and whether it was configured explicitly. An explicit
    /// path must exist; the project default may be absent.
    pub fn tags_path(&self, cwd: &Path) -> (PathBuf, bool) {
        match &self.aliases.path {
            Some(path) if path.is_absolute() => (path.clone(), true),
            Some(path) => (find_project_root(cwd).join(path), true),
            None => (project_tags_path(cwd), false),
        }
    }
}

/// Get the Thicket home directory.
///
/// Checks `THICKET_HOME` first, then falls back to `~/.thicket`.
pub fn thicket_home() -> Option<PathBuf> {
    if let Ok(home) = env::var("THICKET_HOME") {
        if home.is_empty() {
            tracing::warn!("THICKET_HOME is empty, using default");
        } else {
            let path = PathBuf::from(&home);
            if path.is_absolute() {
                return Some(path);
            }
            if let Ok(canonical) = path.canonicalize() {
                return Some(canonical);
            }
            tracing::warn!("THICKET_HOME is relative and doesn't exist, using as-is");
            return Some(path);
        }
    }

    if let Some(home) = dirs::home_dir() {
        return Some(home.join(THICKET_DIR));
    }

    let fallback_path = fallback_thicket_home();
    tracing::warn!(
        "HOME not set, using fallback location: {}",
        fallback_path.display()
    );
    Some(fallback_path)
}

/// Get fallback home path when HOME is unavailable.
#[cfg(unix)]
fn fallback_thicket_home() -> PathBuf {
    use std::os::unix::fs::MetadataExt;
    let uid = std::fs::metadata("/").map(|m| m.uid()).unwrap_or(0);
    PathBuf::from(format!("/tmp/thicket-{}", uid))
}

/// Get fallback home path when HOME is unavailable.
#[cfg(not(unix))]
fn fallback_thicket_home() -> PathBuf {
    std::env::temp_dir().join("thicket")
}

/// Find the project root for a given working directory.
///
/// Precedence:
/// 1. Nearest ancestor (or `cwd` itself) containing a `.thicket/` directory
/// 2. The git repository root (`git rev-parse --show-toplevel`)
/// 3. `cwd`
pub fn find_project_root(cwd: &Path) -> PathBuf {
    for ancestor in cwd.ancestors() {
        if ancestor.join(THICKET_DIR).is_dir() {
            return ancestor.to_path_buf();
        }
    }

    if let Ok(output) = std::process::Command::new("git")
        .args(["rev-parse", "--show-toplevel"])
        .current_dir(cwd)
        .output()
    {
        if output.status.success() {
            if let Ok(path) = String::from_utf8(output.stdout) {
                let trimmed = path.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
        }
    }

    cwd.to_path_buf()
}

/// Get the project data directory: `<project_root>/.thicket/`.
pub fn project_thicket_dir(cwd: &Path) -> PathBuf {
    find_project_root(cwd).join(THICKET_DIR)
}

/// Get the default alias dictionary path: `<project_root>/.thicket/tags.toml`.
pub fn project_tags_path(cwd: &Path) -> PathBuf {
    project_thicket_dir(cwd).join("tags.toml")
}
