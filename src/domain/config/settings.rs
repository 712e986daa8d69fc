// Copyright 2025 JiangLong.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Resolution of the runtime settings from flags, environment and file.

use super::file::ConfigFile;
use crate::infrastructure::constants::{
    API_KEY_ENV, DEFAULT_CONFIG_FILE, DEFAULT_PER_PAGE, MAX_PER_PAGE,
};
use crate::shared::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Output selector; `Table` when `--output` is empty or absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Yaml,
}

impl FromStr for OutputFormat {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            "yaml" => Ok(Self::Yaml),
            other => Err(CliError::usage(format!(
                "unsupported output format '{}', expected json, yaml or empty for a table",
                other
            ))),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Table => f.write_str(""),
            Self::Json => f.write_str("json"),
            Self::Yaml => f.write_str("yaml"),
        }
    }
}

/// Pick the first value that is set: flag, then environment, then file,
/// then the built-in default.
pub fn resolve<T>(flag: Option<T>, env: Option<T>, file: Option<T>, default: T) -> T {
    flag.or(env).or(file).unwrap_or(default)
}

/// Values taken from global command line flags.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub api_key: Option<String>,
    pub output: Option<String>,
    pub config: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_key: String,
    pub output: OutputFormat,
    pub per_page: u32,
    pub config_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            output: OutputFormat::Table,
            per_page: DEFAULT_PER_PAGE,
            config_path: None,
        }
    }
}

impl Settings {
    /// The API key exported in `VULTR_API_KEY`, if non-empty.
    pub fn env_api_key() -> Option<String> {
        std::env::var(API_KEY_ENV).ok().filter(|k| !k.is_empty())
    }

    /// Resolve settings for this process from the flags, the given
    /// environment key and the configuration file.
    pub fn load(overrides: &Overrides, env_api_key: Option<String>) -> Result<Self> {
        let config_path = overrides.config.clone().or_else(default_config_path);
        let file = match &config_path {
            Some(path) => ConfigFile::from(path)?,
            None => ConfigFile::default(),
        };

        let mut settings = Self::from_sources(overrides, env_api_key, file)?;
        settings.config_path = config_path;
        Ok(settings)
    }

    pub fn from_sources(
        overrides: &Overrides,
        env_api_key: Option<String>,
        file: ConfigFile,
    ) -> Result<Self> {
        let api_key = resolve(
            overrides.api_key.clone(),
            env_api_key,
            file.api_key,
            String::new(),
        );
        let output = resolve(overrides.output.clone(), None, file.output, String::new())
            .parse::<OutputFormat>()?;
        let per_page = resolve(None, None, file.per_page, DEFAULT_PER_PAGE).clamp(1, MAX_PER_PAGE);

        tracing::debug!(
            output = %output,
            per_page,
            has_key = !api_key.is_empty(),
            "resolved settings"
        );

        Ok(Self {
            api_key,
            output,
            per_page,
            config_path: overrides.config.clone(),
        })
    }

    pub fn has_auth(&self) -> bool {
        !self.api_key.is_empty()
    }
}

fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(DEFAULT_CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(api_key: Option<&str>, output: Option<&str>, per_page: Option<u32>) -> ConfigFile {
        ConfigFile {
            api_key: api_key.map(String::from),
            output: output.map(String::from),
            per_page,
        }
    }

    #[test]
    fn test_resolve_precedence() {
        assert_eq!(resolve(Some(1), Some(2), Some(3), 4), 1);
        assert_eq!(resolve(None, Some(2), Some(3), 4), 2);
        assert_eq!(resolve(None, None, Some(3), 4), 3);
        assert_eq!(resolve::<i32>(None, None, None, 4), 4);
    }

    #[test]
    fn test_api_key_precedence() {
        let flag = Overrides {
            api_key: Some("flag".into()),
            ..Default::default()
        };
        let s = Settings::from_sources(&flag, Some("env".into()), file(Some("file"), None, None))
            .unwrap();
        assert_eq!(s.api_key, "flag");

        let none = Overrides::default();
        let s = Settings::from_sources(&none, Some("env".into()), file(Some("file"), None, None))
            .unwrap();
        assert_eq!(s.api_key, "env");

        let s = Settings::from_sources(&none, None, file(Some("file"), None, None)).unwrap();
        assert_eq!(s.api_key, "file");

        let s = Settings::from_sources(&none, None, ConfigFile::default()).unwrap();
        assert!(!s.has_auth());
    }

    #[test]
    fn test_output_precedence() {
        let flag = Overrides {
            output: Some("yaml".into()),
            ..Default::default()
        };
        let s = Settings::from_sources(&flag, None, file(None, Some("json"), None)).unwrap();
        assert_eq!(s.output, OutputFormat::Yaml);

        let s = Settings::from_sources(&Overrides::default(), None, file(None, Some("json"), None))
            .unwrap();
        assert_eq!(s.output, OutputFormat::Json);

        let s = Settings::from_sources(&Overrides::default(), None, ConfigFile::default()).unwrap();
        assert_eq!(s.output, OutputFormat::Table);
    }

    #[test]
    fn test_invalid_output_is_usage_error() {
        let flag = Overrides {
            output: Some("xml".into()),
            ..Default::default()
        };
        let err = Settings::from_sources(&flag, None, ConfigFile::default()).unwrap_err();
        assert!(matches!(err, CliError::Usage(_)));
        assert!(err.to_string().contains("xml"));
    }

    #[test]
    fn test_per_page_default_and_cap() {
        let s = Settings::from_sources(&Overrides::default(), None, ConfigFile::default()).unwrap();
        assert_eq!(s.per_page, 100);

        let s = Settings::from_sources(&Overrides::default(), None, file(None, None, Some(900)))
            .unwrap();
        assert_eq!(s.per_page, 500);

        let s = Settings::from_sources(&Overrides::default(), None, file(None, None, Some(0)))
            .unwrap();
        assert_eq!(s.per_page, 1);
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!("".parse::<OutputFormat>().unwrap(), OutputFormat::Table);
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("yaml".parse::<OutputFormat>().unwrap(), OutputFormat::Yaml);
        assert!("table-ish".parse::<OutputFormat>().is_err());
    }
}
