use echoline_compiler::{CompilerConfig, ConfigError, TypewritingScheme};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to read settings file at {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse settings file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("Failed to write settings file at {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to encode settings: {0}")]
    Encode(#[from] serde_yaml::Error),

    #[error("Invalid settings in {path}: {source}")]
    Invalid { path: PathBuf, source: ConfigError },
}

/// Operator settings persisted between runs.
///
/// Keys missing from the file take their defaults. Older key names
/// (`print_speed`, `typewriting`, `autopause`, `autopausestr`,
/// `autopausetime`) are still read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub command_prefix: String,
    pub username: String,
    #[serde(alias = "print_speed")]
    pub print_speed_ms: u32,
    #[serde(alias = "typewriting")]
    pub typewriting_enabled: bool,
    pub typewriting_scheme: String,
    #[serde(alias = "autopause")]
    pub autopause_enabled: bool,
    #[serde(alias = "autopausestr")]
    pub autopause_trigger_chars: String,
    #[serde(alias = "autopausetime")]
    pub autopause_multiplier: u32,
    pub auto_quotes: bool,
    pub auto_parentheses: bool,
    pub username_brackets: bool,
    pub auto_suffix: bool,
    pub auto_suffix_value: String,
    pub start_paragraph: bool,
}

impl Default for Settings {
    fn default() -> Self {
        let compiler = CompilerConfig::default();
        Self {
            command_prefix: compiler.command_prefix,
            username: "Someone".to_string(),
            print_speed_ms: compiler.print_speed_ms,
            typewriting_enabled: compiler.typewriting_enabled,
            typewriting_scheme: compiler.typewriting_scheme.to_string(),
            autopause_enabled: compiler.autopause_enabled,
            autopause_trigger_chars: compiler.autopause_trigger_chars,
            autopause_multiplier: compiler.autopause_multiplier,
            auto_quotes: compiler.auto_quotes,
            auto_parentheses: compiler.auto_parentheses,
            username_brackets: compiler.username_brackets,
            auto_suffix: compiler.auto_suffix,
            auto_suffix_value: compiler.auto_suffix_value,
            start_paragraph: compiler.start_paragraph,
        }
    }
}

impl Settings {
    /// Loads settings from `path`, creating the file with defaults when it
    /// does not exist. Keys missing from an existing file are filled in and
    /// written back.
    pub fn load_or_init<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if !path.exists() {
            log::info!("No settings at {}, creating defaults", path.display());
            let settings = Self::default();
            settings.save_to_path(path)?;
            return Ok(settings);
        }

        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_yaml(&content).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        settings
            .validate()
            .map_err(|source| SettingsError::Invalid {
                path: path.to_path_buf(),
                source,
            })?;

        if has_missing_keys(&content)? {
            log::info!("Filling missing keys in {}", path.display());
            settings.save_to_path(path)?;
        }
        log::debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Parses YAML settings. An empty document yields the defaults.
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, path: P) -> Result<(), SettingsError> {
        let path = path.as_ref();
        let write_error = |source| SettingsError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(write_error)?;
        }
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content).map_err(write_error)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.scheme()?;
        if self.print_speed_ms == 0 {
            return Err(ConfigError::ZeroPrintSpeed);
        }
        Ok(())
    }

    pub fn scheme(&self) -> Result<TypewritingScheme, ConfigError> {
        self.typewriting_scheme.parse()
    }

    /// The immutable compiler configuration for the next message.
    pub fn snapshot(&self, parentheses_once: bool) -> Result<CompilerConfig, ConfigError> {
        let config = CompilerConfig {
            command_prefix: self.command_prefix.clone(),
            print_speed_ms: self.print_speed_ms,
            auto_quotes: self.auto_quotes,
            auto_parentheses: self.auto_parentheses,
            auto_parentheses_once: parentheses_once,
            username_brackets: self.username_brackets,
            auto_suffix: self.auto_suffix,
            auto_suffix_value: self.auto_suffix_value.clone(),
            typewriting_enabled: self.typewriting_enabled,
            typewriting_scheme: self.scheme()?,
            autopause_enabled: self.autopause_enabled,
            autopause_trigger_chars: self.autopause_trigger_chars.clone(),
            autopause_multiplier: self.autopause_multiplier,
            start_paragraph: self.start_paragraph,
        };
        config.validate()?;
        Ok(config)
    }

    /// Default settings location, `~/.config/echoline/config.yaml`.
    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/echoline");
        PathBuf::from(config_dir.as_ref()).join("config.yaml")
    }
}

/// Expands `~` and environment variables in a user-supplied path. Paths that
/// fail to expand are returned unchanged.
pub fn expand_path(path: &Path) -> PathBuf {
    let path_str = path.to_string_lossy();
    match shellexpand::full(&path_str) {
        Ok(expanded) => PathBuf::from(expanded.as_ref()),
        Err(_) => path.to_path_buf(),
    }
}

/// Whether `content` lacks any key that [`Settings`] writes.
fn has_missing_keys(content: &str) -> Result<bool, SettingsError> {
    let present: serde_yaml::Value = if content.trim().is_empty() {
        serde_yaml::Value::Null
    } else {
        serde_yaml::from_str(content)?
    };
    let expected = serde_yaml::to_value(Settings::default())?;

    let serde_yaml::Value::Mapping(expected) = expected else {
        return Ok(false);
    };
    let Some(present) = present.as_mapping() else {
        return Ok(true);
    };
    Ok(expected.keys().any(|key| !present.contains_key(key)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_config_path() {
        let config_path = Settings::config_path();
        let path_str = config_path.to_string_lossy();

        assert!(!path_str.starts_with('~'));
        assert!(path_str.ends_with(".config/echoline/config.yaml"));
    }

    #[test]
    fn test_missing_file_is_created_with_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested/config.yaml");

        let settings = Settings::load_or_init(&path).unwrap();

        assert_eq!(settings, Settings::default());
        assert!(path.exists(), "Settings file should be created");
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.yaml");
        let settings = Settings {
            username: "月".to_string(),
            print_speed_ms: 25,
            typewriting_scheme: "zhuyin".to_string(),
            auto_suffix: true,
            ..Default::default()
        };

        settings.save_to_path(&path).unwrap();
        let loaded = Settings::load_or_init(&path).unwrap();

        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_missing_keys_are_filled_and_written_back() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.yaml");
        std::fs::write(&path, "username: Alice\n").unwrap();

        let settings = Settings::load_or_init(&path).unwrap();
        assert_eq!(settings.username, "Alice");
        assert_eq!(settings.print_speed_ms, 10);

        let rewritten = std::fs::read_to_string(&path).unwrap();
        assert!(rewritten.contains("auto_suffix_value"));
        assert!(rewritten.contains("Alice"));
    }

    #[test]
    fn test_complete_file_is_left_alone() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.yaml");
        let mut content = serde_yaml::to_string(&Settings::default()).unwrap();
        content.push_str("# operator notes\n");
        std::fs::write(&path, &content).unwrap();

        Settings::load_or_init(&path).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), content);
    }

    #[test]
    fn test_legacy_keys_are_accepted() {
        let settings = Settings::from_yaml(
            r#"
print_speed: 40
typewriting: false
autopause: true
autopausestr: "!?"
autopausetime: 3
host: 127.0.0.1
"#,
        )
        .unwrap();

        assert_eq!(settings.print_speed_ms, 40);
        assert!(!settings.typewriting_enabled);
        assert!(settings.autopause_enabled);
        assert_eq!(settings.autopause_trigger_chars, "!?");
        assert_eq!(settings.autopause_multiplier, 3);
    }

    #[test]
    fn test_empty_document_is_default() {
        assert_eq!(Settings::from_yaml("\n").unwrap(), Settings::default());
    }

    #[rstest]
    #[case("print_speed_ms: 0\n", ConfigError::ZeroPrintSpeed)]
    #[case(
        "typewriting_scheme: romaji\n",
        ConfigError::UnknownScheme("romaji".to_string())
    )]
    fn test_invalid_settings_are_rejected(#[case] content: &str, #[case] expected: ConfigError) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.yaml");
        std::fs::write(&path, content).unwrap();

        match Settings::load_or_init(&path) {
            Err(SettingsError::Invalid { source, .. }) => assert_eq!(source, expected),
            other => panic!("expected invalid settings, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_yaml_reports_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.yaml");
        std::fs::write(&path, "print_speed_ms: [fast\n").unwrap();

        let err = Settings::load_or_init(&path).unwrap_err();
        assert!(matches!(err, SettingsError::Parse { .. }));
        assert!(err.to_string().contains("config.yaml"));
    }

    #[test]
    fn test_snapshot_carries_fields_and_once_flag() {
        let settings = Settings {
            typewriting_scheme: "Zhuyin".to_string(),
            auto_parentheses: false,
            start_paragraph: true,
            ..Default::default()
        };

        let config = settings.snapshot(true).unwrap();

        assert_eq!(config.typewriting_scheme, TypewritingScheme::Zhuyin);
        assert!(config.auto_parentheses_once);
        assert!(config.start_paragraph);
        assert!(!settings.snapshot(false).unwrap().auto_parentheses_once);
    }

    #[test]
    fn test_expand_path_with_env_var() {
        unsafe {
            env::set_var("ECHOLINE_TEST_DIR", "/test/env/path");
        }

        let expanded = expand_path(Path::new("$ECHOLINE_TEST_DIR/config.yaml"));
        assert_eq!(expanded, PathBuf::from("/test/env/path/config.yaml"));

        unsafe {
            env::remove_var("ECHOLINE_TEST_DIR");
        }
    }

    #[test]
    fn test_expand_path_with_tilde() {
        let expanded = expand_path(Path::new("~/lines.txt"));
        assert!(!expanded.to_string_lossy().starts_with('~'));
        assert!(expanded.to_string_lossy().ends_with("lines.txt"));
    }
}
