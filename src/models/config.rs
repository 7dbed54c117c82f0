//! Configuration for the client.
//!
//! Settings are merged from `/etc/acore/config.toml`, then the user config
//! (respecting XDG_CONFIG_HOME), then environment overrides. The base URL of
//! the analysis service is injected explicitly everywhere it is needed; there
//! is no implicit global.

use serde::{Deserialize, Serialize};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,

    pub refresh: RefreshConfig,

    pub display: DisplayConfig,

    pub behavior: BehaviorConfig,
}

/// Connection settings for the analysis service.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Base URL of the AnalytiCore REST API.
    pub url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:5000".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RefreshConfig {
    /// Jobs list refresh interval in seconds (TUI background refresh)
    pub jobs_interval: u64,

    /// Status poll interval in seconds after a submission
    pub poll_interval: u64,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            jobs_interval: 10,
            poll_interval: 2,
        }
    }
}

/// Minimum allowed interval in seconds (prevents tight polling loops)
const MIN_INTERVAL: u64 = 1;

/// Fields in RefreshConfig that require interval validation.
#[derive(Clone, Copy)]
enum RefreshField {
    JobsInterval,
    PollInterval,
}

impl RefreshField {
    const fn as_str(self) -> &'static str {
        match self {
            Self::JobsInterval => "jobs_interval",
            Self::PollInterval => "poll_interval",
        }
    }
}

/// Validate that an interval value meets the minimum requirement.
/// In non-strict mode, corrects invalid values to the default and adds a warning.
/// In strict mode, returns an error for invalid values.
fn validate_interval(
    value: &mut u64,
    field: RefreshField,
    default: u64,
    strict: bool,
    warnings: &mut Vec<String>,
) -> Result<(), String> {
    if *value < MIN_INTERVAL {
        let field_name = field.as_str();
        let msg = format!(
            "refresh.{field_name} must be at least {MIN_INTERVAL} second(s), got {value}",
        );
        if strict {
            return Err(msg);
        }
        warnings.push(format!("{msg} - using default ({default})"));
        *value = default;
    }
    Ok(())
}

impl RefreshConfig {
    /// Validate refresh configuration values.
    /// Returns a list of warnings for invalid values that were corrected to defaults.
    /// If `strict` is true, returns Err instead of correcting values.
    pub fn validate(&mut self, strict: bool) -> Result<Vec<String>, String> {
        let mut warnings = Vec::new();
        let defaults = Self::default();

        validate_interval(
            &mut self.jobs_interval,
            RefreshField::JobsInterval,
            defaults.jobs_interval,
            strict,
            &mut warnings,
        )?;

        validate_interval(
            &mut self.poll_interval,
            RefreshField::PollInterval,
            defaults.poll_interval,
            strict,
            &mut warnings,
        )?;

        Ok(warnings)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Theme name: "dark" or "light"
    pub theme: String,

    /// Maximum length for submitted-text previews in tables (default: 40)
    pub text_preview_length: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
            text_preview_length: 40,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Require confirmation before deleting jobs
    pub confirm_delete: bool,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            confirm_delete: true,
        }
    }
}

impl AppConfig {
    /// Get the user config file path, respecting XDG_CONFIG_HOME
    ///
    /// Resolution order:
    /// 1. $XDG_CONFIG_HOME/acore/config.toml (if XDG_CONFIG_HOME is set)
    /// 2. $HOME/.config/acore/config.toml (if HOME is set)
    /// 3. dirs::config_dir()/acore/config.toml (fallback using dirs crate)
    /// 4. None if no config directory can be determined
    #[must_use]
    pub fn user_config_path() -> Option<std::path::PathBuf> {
        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME")
            && !xdg_config.is_empty()
        {
            return Some(std::path::PathBuf::from(xdg_config).join("acore/config.toml"));
        }

        if let Some(home) = std::env::var_os("HOME") {
            return Some(std::path::PathBuf::from(home).join(".config/acore/config.toml"));
        }

        dirs::config_dir().map(|dir| dir.join("acore/config.toml"))
    }

    /// Load configuration from files and environment.
    /// Returns the config and any warnings encountered during loading.
    pub fn load() -> (Self, Vec<String>) {
        let mut config = Self::default();
        let mut warnings = Vec::new();
        let strict = Self::is_strict_mode();

        Self::load_config_file(&mut config, "/etc/acore/config.toml", &mut warnings);

        if let Some(user_path) = Self::user_config_path() {
            Self::load_config_file(&mut config, &user_path.to_string_lossy(), &mut warnings);
        }

        config.apply_env_overrides();

        match config.refresh.validate(strict) {
            Ok(validation_warnings) => warnings.extend(validation_warnings),
            Err(err) => {
                eprintln!("Error: {}", err);
                eprintln!("(ACORE_STRICT_CONFIG is set - config errors are fatal)");
                std::process::exit(1);
            }
        }

        (config, warnings)
    }

    /// Check if strict config mode is enabled via ACORE_STRICT_CONFIG
    fn is_strict_mode() -> bool {
        std::env::var("ACORE_STRICT_CONFIG")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    }

    /// Load a config file, collecting warnings on parse errors but not on missing files.
    /// If ACORE_STRICT_CONFIG=1 is set, parse errors cause immediate exit.
    fn load_config_file(config: &mut Self, path: &str, warnings: &mut Vec<String>) {
        let strict = Self::is_strict_mode();

        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str::<AppConfig>(&content) {
                Ok(parsed) => config.merge(parsed),
                Err(e) => {
                    if strict {
                        eprintln!("Error: Failed to parse config file '{}': {}", path, e);
                        eprintln!("(ACORE_STRICT_CONFIG is set - config errors are fatal)");
                        std::process::exit(1);
                    } else {
                        warnings.push(format!("Config parse error in '{}': {}", path, e));
                    }
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                // Missing config files are expected
            }
            Err(e) => {
                if strict {
                    eprintln!("Error: Could not read config file '{}': {}", path, e);
                    eprintln!("(ACORE_STRICT_CONFIG is set - config errors are fatal)");
                    std::process::exit(1);
                } else {
                    warnings.push(format!("Could not read config '{}': {}", path, e));
                }
            }
        }
    }

    fn merge(&mut self, other: AppConfig) {
        self.server = other.server;
        self.refresh = other.refresh;
        self.display = other.display;
        self.behavior = other.behavior;
    }

    /// Apply environment variable overrides (highest precedence below CLI flags).
    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("ACORE_URL")
            && !url.is_empty()
        {
            self.server.url = url;
        }

        if let Ok(theme) = std::env::var("ACORE_THEME")
            && !theme.is_empty()
        {
            self.display.theme = theme;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.url, "http://localhost:5000");
        assert_eq!(config.refresh.poll_interval, 2);
        assert_eq!(config.refresh.jobs_interval, 10);
        assert!(config.behavior.confirm_delete);
    }

    #[test]
    fn test_validate_corrects_zero_intervals() {
        let mut refresh = RefreshConfig {
            jobs_interval: 0,
            poll_interval: 0,
        };

        let warnings = refresh.validate(false).unwrap();
        assert_eq!(warnings.len(), 2);
        assert_eq!(refresh.jobs_interval, 10);
        assert_eq!(refresh.poll_interval, 2);
    }

    #[test]
    fn test_validate_strict_rejects_zero_intervals() {
        let mut refresh = RefreshConfig {
            jobs_interval: 0,
            poll_interval: 2,
        };

        let err = refresh.validate(true).unwrap_err();
        assert!(err.contains("jobs_interval"));
    }

    #[test]
    fn test_parse_partial_config() {
        let parsed: AppConfig = toml::from_str(
            r#"
            [server]
            url = "https://analyticore.example.com"

            [behavior]
            confirm_delete = false
            "#,
        )
        .unwrap();

        assert_eq!(parsed.server.url, "https://analyticore.example.com");
        assert!(!parsed.behavior.confirm_delete);
        // Unspecified sections keep defaults
        assert_eq!(parsed.refresh.poll_interval, 2);
    }
}
