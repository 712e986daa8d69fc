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

//! On-disk configuration file (`~/.vultr-cli.yaml` by default).

use crate::shared::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::fs::read_to_string;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ConfigFile {
    pub api_key: Option<String>,
    pub output: Option<String>,
    pub per_page: Option<u32>,
}

impl ConfigFile {
    /// Load a configuration file. A file that cannot be read is treated as
    /// empty; a file that cannot be parsed is an error.
    pub fn from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = match read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                tracing::debug!("config file {} not loaded: {}", path.display(), e);
                return Ok(Self::default());
            }
        };

        Self::parse(&content, is_toml(path)).map_err(|e| {
            CliError::config_error(format!("unable to parse {}: {}", path.display(), e))
        })
    }

    fn parse(content: &str, toml: bool) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        if toml {
            Ok(toml::from_str(content)?)
        } else {
            Ok(serde_yaml::from_str(content)?)
        }
    }
}

fn is_toml(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("toml"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let conf = ConfigFile::from(dir.path().join("absent.yaml")).unwrap();
        assert_eq!(conf, ConfigFile::default());
    }

    #[test]
    fn test_yaml_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "api-key: abc123\noutput: json\nper-page: 25").unwrap();

        let conf = ConfigFile::from(file.path()).unwrap();
        assert_eq!(conf.api_key.as_deref(), Some("abc123"));
        assert_eq!(conf.output.as_deref(), Some("json"));
        assert_eq!(conf.per_page, Some(25));
    }

    #[test]
    fn test_toml_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "api-key = \"abc123\"\noutput = \"yaml\"").unwrap();

        let conf = ConfigFile::from(file.path()).unwrap();
        assert_eq!(conf.api_key.as_deref(), Some("abc123"));
        assert_eq!(conf.output.as_deref(), Some("yaml"));
        assert_eq!(conf.per_page, None);
    }

    #[test]
    fn test_unparseable_file_is_config_error() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "api-key: [unterminated").unwrap();

        let err = ConfigFile::from(file.path()).unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
    }

    #[test]
    fn test_empty_file() {
        let file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        assert_eq!(ConfigFile::from(file.path()).unwrap(), ConfigFile::default());
    }
}
