use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

pub const DEFAULT_BEGIN_PREFIX: &str = "### [BEGIN ";
pub const DEFAULT_BEGIN_SUFFIX: &str = "]\n";
pub const DEFAULT_END_PREFIX: &str = "### [END ";
pub const DEFAULT_END_SUFFIX: &str = "]\n";
pub const DEFAULT_SECTION_SEPARATOR: &str = " ";

const SUPPORTED_VERSION: &str = "1.0";

/// The four strings that make up a marker line.
///
/// A begin marker for `name` is `begin_prefix + name + begin_suffix`, and the
/// same goes for end markers. Both suffixes end with `\n` because markers are
/// compared as whole lines.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct SectionDelimiters {
    pub begin_prefix: String,
    pub begin_suffix: String,
    pub end_prefix: String,
    pub end_suffix: String,
}

impl Default for SectionDelimiters {
    fn default() -> Self {
        Self {
            begin_prefix: DEFAULT_BEGIN_PREFIX.to_string(),
            begin_suffix: DEFAULT_BEGIN_SUFFIX.to_string(),
            end_prefix: DEFAULT_END_PREFIX.to_string(),
            end_suffix: DEFAULT_END_SUFFIX.to_string(),
        }
    }
}

impl SectionDelimiters {
    /// Builds a delimiter set, rejecting suffixes that do not end the line.
    pub fn new(
        begin_prefix: impl Into<String>,
        begin_suffix: impl Into<String>,
        end_prefix: impl Into<String>,
        end_suffix: impl Into<String>,
    ) -> Result<Self> {
        let delimiters = Self {
            begin_prefix: begin_prefix.into(),
            begin_suffix: begin_suffix.into(),
            end_prefix: end_prefix.into(),
            end_suffix: end_suffix.into(),
        };
        delimiters.validate()?;
        Ok(delimiters)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.begin_suffix.ends_with('\n') {
            anyhow::bail!(
                "Begin suffix {:?} must end with a newline character",
                self.begin_suffix
            );
        }
        if !self.end_suffix.ends_with('\n') {
            anyhow::bail!(
                "End suffix {:?} must end with a newline character",
                self.end_suffix
            );
        }
        Ok(())
    }
}

/// Appends the line terminator to a suffix typed on the command line, where a
/// literal newline is awkward to pass.
pub fn normalize_suffix(suffix: &str) -> String {
    if suffix.ends_with('\n') {
        suffix.to_string()
    } else {
        format!("{suffix}\n")
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct RcManagerConfig {
    pub version: String,
    pub section_separator: String,
    pub delimiters: SectionDelimiters,
}

impl Default for RcManagerConfig {
    fn default() -> Self {
        Self {
            version: SUPPORTED_VERSION.to_string(),
            section_separator: DEFAULT_SECTION_SEPARATOR.to_string(),
            delimiters: SectionDelimiters::default(),
        }
    }
}

impl RcManagerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != SUPPORTED_VERSION {
            anyhow::bail!("Unsupported config version: {}", self.version);
        }
        if self.section_separator.is_empty() {
            anyhow::bail!("Section separator cannot be empty");
        }
        self.delimiters.validate()
    }

    /// Splits a `--sections` argument into names using the configured separator.
    ///
    /// Every segment is kept, so a doubled or trailing separator yields an
    /// empty name that later fails to resolve.
    pub fn split_sections(&self, sections: &str) -> Vec<String> {
        sections
            .split(self.section_separator.as_str())
            .map(str::to_string)
            .collect()
    }
}

/// Values given on the command line. `None` means "not given", so the
/// configuration file or the built-in default applies.
#[derive(Debug, Default, Clone)]
pub struct ConfigOverrides {
    pub section_separator: Option<String>,
    pub begin_prefix: Option<String>,
    pub begin_suffix: Option<String>,
    pub end_prefix: Option<String>,
    pub end_suffix: Option<String>,
}

pub trait ConfigProvider {
    fn load_config(&self) -> Result<RcManagerConfig>;
}

/// Resolves the effective configuration: command-line flags first, then the
/// optional TOML file, then the defaults.
pub struct ConfigManager {
    config_path: Option<PathBuf>,
}

impl ConfigManager {
    pub fn new(config_path: Option<PathBuf>) -> Self {
        Self { config_path }
    }

    pub fn resolve(&self, overrides: ConfigOverrides) -> Result<RcManagerConfig> {
        let mut config = self.load_config()?;

        if let Some(separator) = overrides.section_separator {
            config.section_separator = separator;
        }
        if let Some(prefix) = overrides.begin_prefix {
            config.delimiters.begin_prefix = prefix;
        }
        if let Some(suffix) = overrides.begin_suffix {
            config.delimiters.begin_suffix = normalize_suffix(&suffix);
        }
        if let Some(prefix) = overrides.end_prefix {
            config.delimiters.end_prefix = prefix;
        }
        if let Some(suffix) = overrides.end_suffix {
            config.delimiters.end_suffix = normalize_suffix(&suffix);
        }

        config.validate()?;
        log::debug!("Effective configuration: {config:?}");
        Ok(config)
    }
}

impl ConfigProvider for ConfigManager {
    fn load_config(&self) -> Result<RcManagerConfig> {
        let Some(path) = &self.config_path else {
            return Ok(RcManagerConfig::default());
        };

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_match_hash_bracket_markers() {
        let delimiters = SectionDelimiters::default();
        assert_eq!(delimiters.begin_prefix, "### [BEGIN ");
        assert_eq!(delimiters.begin_suffix, "]\n");
        assert_eq!(delimiters.end_prefix, "### [END ");
        assert_eq!(delimiters.end_suffix, "]\n");
        assert!(delimiters.validate().is_ok());
    }

    #[test]
    fn test_suffix_without_newline_is_rejected() {
        assert!(SectionDelimiters::new("<", ">", "</", ">\n").is_err());
        assert!(SectionDelimiters::new("<", ">\n", "</", ">").is_err());
        assert!(SectionDelimiters::new("<", ">\n", "</", ">\n").is_ok());
    }

    #[test]
    fn test_normalize_suffix() {
        assert_eq!(normalize_suffix("]"), "]\n");
        assert_eq!(normalize_suffix("]\n"), "]\n");
    }

    #[test]
    fn test_split_sections_keeps_empty_segments() {
        let config = RcManagerConfig::default();
        assert_eq!(config.split_sections("foo bar"), vec!["foo", "bar"]);
        assert_eq!(config.split_sections("foo  bar"), vec!["foo", "", "bar"]);
        assert_eq!(config.split_sections("foo "), vec!["foo", ""]);
        assert_eq!(config.split_sections(""), vec![""]);

        let config = RcManagerConfig {
            section_separator: ",".to_string(),
            ..RcManagerConfig::default()
        };
        assert_eq!(
            config.split_sections("my aliases,prompt"),
            vec!["my aliases", "prompt"]
        );
    }

    #[test]
    fn test_resolve_without_file_uses_defaults() {
        let manager = ConfigManager::new(None);
        let config = manager.resolve(ConfigOverrides::default()).unwrap();
        assert_eq!(config, RcManagerConfig::default());
    }

    #[test]
    fn test_cli_overrides_beat_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "section_separator = \",\"\n\n[delimiters]\nbegin_prefix = \"# >>> \"\nbegin_suffix = \"\\n\"\nend_prefix = \"# <<< \"\nend_suffix = \"\\n\""
        )
        .unwrap();

        let manager = ConfigManager::new(Some(file.path().to_path_buf()));
        let from_file = manager.resolve(ConfigOverrides::default()).unwrap();
        assert_eq!(from_file.section_separator, ",");
        assert_eq!(from_file.delimiters.begin_prefix, "# >>> ");
        assert_eq!(from_file.delimiters.end_suffix, "\n");

        let overridden = manager
            .resolve(ConfigOverrides {
                begin_prefix: Some("#{".to_string()),
                begin_suffix: Some("}".to_string()),
                ..ConfigOverrides::default()
            })
            .unwrap();
        assert_eq!(overridden.delimiters.begin_prefix, "#{");
        assert_eq!(overridden.delimiters.begin_suffix, "}\n");
        assert_eq!(overridden.delimiters.end_prefix, "# <<< ");
    }

    #[test]
    fn test_unsupported_version_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "version = \"2.0\"").unwrap();

        let manager = ConfigManager::new(Some(file.path().to_path_buf()));
        let err = manager.resolve(ConfigOverrides::default()).unwrap_err();
        assert!(err.to_string().contains("Unsupported config version"));
    }

    #[test]
    fn test_empty_separator_is_rejected() {
        let manager = ConfigManager::new(None);
        let result = manager.resolve(ConfigOverrides {
            section_separator: Some(String::new()),
            ..ConfigOverrides::default()
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let manager = ConfigManager::new(Some(PathBuf::from("/definitely/not/here.toml")));
        let err = manager.load_config().unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
