use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Contract violations in a [`CompilerConfig`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("print speed must be greater than zero")]
    ZeroPrintSpeed,

    #[error("unknown typewriting scheme `{0}` (expected `pinyin` or `zhuyin`)")]
    UnknownScheme(String),
}

/// Phonetic alphabet used for the typewriting effect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypewritingScheme {
    #[default]
    Pinyin,
    Zhuyin,
}

impl TypewritingScheme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pinyin => "pinyin",
            Self::Zhuyin => "zhuyin",
        }
    }

    /// The other scheme.
    pub fn toggled(self) -> Self {
        match self {
            Self::Pinyin => Self::Zhuyin,
            Self::Zhuyin => Self::Pinyin,
        }
    }
}

impl fmt::Display for TypewritingScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TypewritingScheme {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pinyin" => Ok(Self::Pinyin),
            "zhuyin" => Ok(Self::Zhuyin),
            _ => Err(ConfigError::UnknownScheme(s.to_string())),
        }
    }
}

/// Immutable configuration snapshot for one compile call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompilerConfig {
    pub command_prefix: String,
    /// Milliseconds per printed character. Must be positive.
    pub print_speed_ms: u32,
    pub auto_quotes: bool,
    pub auto_parentheses: bool,
    /// One-shot parenthesis override; the caller clears it after use.
    pub auto_parentheses_once: bool,
    pub username_brackets: bool,
    pub auto_suffix: bool,
    pub auto_suffix_value: String,
    pub typewriting_enabled: bool,
    pub typewriting_scheme: TypewritingScheme,
    pub autopause_enabled: bool,
    pub autopause_trigger_chars: String,
    /// Pause length in print intervals.
    pub autopause_multiplier: u32,
    pub start_paragraph: bool,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            command_prefix: "/".to_string(),
            print_speed_ms: 10,
            auto_quotes: true,
            auto_parentheses: false,
            auto_parentheses_once: false,
            username_brackets: true,
            auto_suffix: false,
            auto_suffix_value: "喵".to_string(),
            typewriting_enabled: true,
            typewriting_scheme: TypewritingScheme::Pinyin,
            autopause_enabled: false,
            autopause_trigger_chars: ",，.。;；:：!！".to_string(),
            autopause_multiplier: 10,
            start_paragraph: false,
        }
    }
}

impl CompilerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.print_speed_ms == 0 {
            return Err(ConfigError::ZeroPrintSpeed);
        }
        Ok(())
    }

    /// Whether parentheses apply to the next message.
    pub fn wants_parentheses(&self) -> bool {
        self.auto_parentheses || self.auto_parentheses_once
    }

    /// Whether `c` triggers an automatic pause.
    pub fn is_pause_trigger(&self, c: char) -> bool {
        self.autopause_trigger_chars.contains(c)
    }
}
