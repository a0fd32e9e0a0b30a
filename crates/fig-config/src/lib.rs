//! Configuration management for fig.
//!
//! Parses `fig.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String values in the `[site]` section support `${VAR}` and
//! `${VAR:-default}` expansion before paths are resolved.

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override page source directory.
    pub source_dir: Option<PathBuf>,
    /// Override output directory.
    pub output_dir: Option<PathBuf>,
    /// Override number of render threads.
    pub threads: Option<usize>,
}

/// Configuration filename to search for.
pub const CONFIG_FILENAME: &str = "fig.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Site layout (paths are relative strings from TOML).
    site: SiteConfigRaw,
    /// Page rendering options.
    pub render: RenderConfig,

    /// Resolved site configuration (set after loading).
    #[serde(skip)]
    pub site_resolved: SiteConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw site configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct SiteConfigRaw {
    source_dir: Option<String>,
    output_dir: Option<String>,
    extension: Option<String>,
}

/// Resolved site configuration with absolute paths.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    /// Directory containing page sources.
    pub source_dir: PathBuf,
    /// Directory rendered pages are written to.
    pub output_dir: PathBuf,
    /// Page file extension, without the leading dot.
    pub extension: String,
}

/// Page rendering options.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct RenderConfig {
    /// Enable GitHub Flavored Markdown.
    pub gfm: bool,
    /// Use the first H1 as the page title.
    pub extract_title: bool,
    /// Render threads (rayon's default when unset).
    pub threads: Option<usize>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            gfm: true,
            extract_title: true,
            threads: None,
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`site.output_dir`").
        field: String,
        /// Error message (e.g., "${`FIG_OUT`} not set").
        message: String,
    },
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `fig.toml` in current directory and parents,
    /// falling back to defaults relative to the current directory.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, or if parsing,
    /// expansion, or validation fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = std::env::current_dir()
            .ok()
            .and_then(|cwd| Self::discover_from(&cwd))
        {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(source_dir) = &settings.source_dir {
            self.site_resolved.source_dir.clone_from(source_dir);
        }
        if let Some(output_dir) = &settings.output_dir {
            self.site_resolved.output_dir.clone_from(output_dir);
        }
        if let Some(threads) = settings.threads {
            self.render.threads = Some(threads);
        }
    }

    /// Search for a config file in `start` and its parents.
    fn discover_from(start: &Path) -> Option<PathBuf> {
        start
            .ancestors()
            .map(|dir| dir.join(CONFIG_FILENAME))
            .find(|candidate| candidate.is_file())
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            site: SiteConfigRaw::default(),
            render: RenderConfig::default(),
            site_resolved: SiteConfig {
                source_dir: base.join("docs"),
                output_dir: base.join("site"),
                extension: "md".to_owned(),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any check fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let site = &self.site_resolved;

        if site.extension.is_empty() {
            return Err(ConfigError::Validation(
                "site.extension cannot be empty".to_owned(),
            ));
        }
        if site.source_dir == site.output_dir {
            return Err(ConfigError::Validation(
                "site.output_dir must differ from site.source_dir".to_owned(),
            ));
        }
        if self.render.threads == Some(0) {
            return Err(ConfigError::Validation(
                "render.threads must be greater than 0".to_owned(),
            ));
        }

        Ok(())
    }

    /// Expand environment variable references in `[site]` strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        let site = &mut self.site;
        for (value, field) in [
            (&mut site.source_dir, "site.source_dir"),
            (&mut site.output_dir, "site.output_dir"),
            (&mut site.extension, "site.extension"),
        ] {
            if let Some(raw) = value.as_deref() {
                *value = Some(expand::expand_env(raw, field)?);
            }
        }
        Ok(())
    }

    /// Resolve relative paths against the config file's directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.site_resolved = SiteConfig {
            source_dir: resolve(self.site.source_dir.as_deref(), "docs"),
            output_dir: resolve(self.site.output_dir.as_deref(), "site"),
            extension: self
                .site
                .extension
                .as_deref()
                .unwrap_or("md")
                .trim_start_matches('.')
                .to_owned(),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn write_config(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join(CONFIG_FILENAME);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));
        assert_eq!(
            config.site_resolved,
            SiteConfig {
                source_dir: PathBuf::from("/test/docs"),
                output_dir: PathBuf::from("/test/site"),
                extension: "md".to_owned(),
            }
        );
        assert!(config.render.gfm);
        assert!(config.render.extract_title);
        assert_eq!(config.render.threads, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.render, RenderConfig::default());
    }

    #[test]
    fn test_parse_render_config() {
        let toml = r"
[render]
gfm = false
extract_title = false
threads = 4
";
        let config: Config = toml::from_str(toml).unwrap();
        assert!(!config.render.gfm);
        assert!(!config.render.extract_title);
        assert_eq!(config.render.threads, Some(4));
    }

    #[test]
    fn test_load_resolves_paths_relative_to_config() {
        let temp = tempfile::tempdir().unwrap();
        let path = write_config(
            temp.path(),
            r#"
[site]
source_dir = "content"
output_dir = "public"
extension = ".markdown"
"#,
        );

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(config.site_resolved.source_dir, temp.path().join("content"));
        assert_eq!(config.site_resolved.output_dir, temp.path().join("public"));
        assert_eq!(config.site_resolved.extension, "markdown");
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let err = Config::load(Some(Path::new("/nonexistent/fig.toml")), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_invalid_toml() {
        let temp = tempfile::tempdir().unwrap();
        let path = write_config(temp.path(), "[site\n");

        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_expands_env_vars() {
        let temp = tempfile::tempdir().unwrap();
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::set_var("FIG_CONFIG_TEST_OUT", "build");
        }
        let path = write_config(
            temp.path(),
            r#"
[site]
output_dir = "${FIG_CONFIG_TEST_OUT}/html"
source_dir = "${FIG_CONFIG_TEST_UNSET_SRC:-pages}"
"#,
        );

        let config = Config::load(Some(&path), None).unwrap();
        unsafe {
            std::env::remove_var("FIG_CONFIG_TEST_OUT");
        }

        assert_eq!(config.site_resolved.output_dir, temp.path().join("build/html"));
        assert_eq!(config.site_resolved.source_dir, temp.path().join("pages"));
    }

    #[test]
    fn test_load_missing_env_var() {
        let temp = tempfile::tempdir().unwrap();
        let path = write_config(
            temp.path(),
            r#"
[site]
output_dir = "${FIG_CONFIG_TEST_DEFINITELY_UNSET}"
"#,
        );

        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(err.to_string().contains("site.output_dir"));
    }

    #[test]
    fn test_validate_same_source_and_output() {
        let temp = tempfile::tempdir().unwrap();
        let path = write_config(
            temp.path(),
            r#"
[site]
source_dir = "docs"
output_dir = "docs"
"#,
        );

        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_validate_zero_threads() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.render.threads = Some(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_apply_cli_settings() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.apply_cli_settings(&CliSettings {
            source_dir: Some(PathBuf::from("/other/src")),
            output_dir: None,
            threads: Some(2),
        });

        assert_eq!(config.site_resolved.source_dir, PathBuf::from("/other/src"));
        assert_eq!(config.site_resolved.output_dir, PathBuf::from("/test/site"));
        assert_eq!(config.render.threads, Some(2));
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.apply_cli_settings(&CliSettings::default());
        assert_eq!(config.site_resolved.source_dir, PathBuf::from("/test/docs"));
    }

    #[test]
    fn test_discover_from_parent() {
        let temp = tempfile::tempdir().unwrap();
        let path = write_config(temp.path(), "");
        let nested = temp.path().join("a/b");
        std::fs::create_dir_all(&nested).unwrap();

        assert_eq!(Config::discover_from(&nested), Some(path));
    }
}
