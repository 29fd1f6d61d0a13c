use log::debug;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::auth::Token;
use crate::error::{AzdoError, Result};

pub const ORGANIZATION_VAR: &str = "ORGANIZATION";
pub const PAT_VAR: &str = "PAT";

/// Configuration file structure for azdo.
///
/// Holds the settings a user would otherwise repeat on every invocation.
/// Values given on the command line or in the environment take precedence.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    /// Default Azure DevOps organization
    pub organization: Option<String>,

    /// Default personal access token
    pub pat: Option<String>,

    /// Azure DevOps service root
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Output format preferences
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,

    #[serde(default)]
    pub pretty: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Table,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            organization: None,
            pat: None,
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            output: OutputConfig::default(),
        }
    }
}

fn default_base_url() -> String {
    "https://dev.azure.com".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Config {
    /// Load configuration from a file.
    ///
    /// Searches for configuration files in this order:
    /// 1. Specified path
    /// 2. ./azdo.toml
    /// 3. ./azdo.json
    /// 4. ./azdo.yaml
    /// 5. ./azdo.yml
    ///
    /// Returns default configuration if no file is found. A path given
    /// explicitly must exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load_from_path(path);
        }

        let candidates = ["azdo.toml", "azdo.json", "azdo.yaml", "azdo.yml"];

        for candidate in &candidates {
            let path = Path::new(candidate);
            if path.exists() {
                return Self::load_from_path(path);
            }
        }

        Ok(Self::default())
    }

    fn load_from_path(path: &Path) -> Result<Self> {
        debug!("Loading configuration from {}", path.display());

        let contents = std::fs::read_to_string(path).map_err(|e| {
            AzdoError::Config(format!("Failed to read config file {}: {e}", path.display()))
        })?;

        let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or("");

        let parsed = match extension {
            "toml" => toml::from_str(&contents).map_err(|e| e.to_string()),
            "json" => serde_json::from_str(&contents).map_err(|e| e.to_string()),
            "yaml" | "yml" => serde_yaml::from_str(&contents).map_err(|e| e.to_string()),
            _ => toml::from_str(&contents)
                .map_err(|e| e.to_string())
                .or_else(|_| serde_json::from_str(&contents).map_err(|e| e.to_string()))
                .or_else(|_| serde_yaml::from_str(&contents).map_err(|e| e.to_string())),
        };

        parsed.map_err(|e| {
            AzdoError::Config(format!("Failed to parse config file {}: {e}", path.display()))
        })
    }
}

/// Process-wide defaults for the organization and token.
///
/// Captured once at start-up and handed to [`resolve`]; nothing below the
/// CLI layer reads the environment.
#[derive(Debug, Clone, Default)]
pub struct Defaults {
    pub organization: Option<String>,
    pub pat: Option<Token>,
}

impl Defaults {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            organization: non_blank(lookup(ORGANIZATION_VAR)),
            pat: non_blank(lookup(PAT_VAR)).map(Token::from),
        }
    }

    /// Fills values that are still missing from the configuration file.
    pub fn with_fallback(mut self, config: &Config) -> Self {
        if self.organization.is_none() {
            self.organization = non_blank(config.organization.clone());
        }
        if self.pat.is_none() {
            self.pat = non_blank(config.pat.clone()).map(Token::from);
        }
        self
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Fully resolved organization and token for one call.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub organization: String,
    pub token: Token,
}

/// Merges explicit arguments with `defaults`.
///
/// A blank explicit value counts as omitted. Fails with
/// [`AzdoError::MissingCredential`] when either value is still absent, and
/// with [`AzdoError::InvalidArgument`] when the organization is not a single
/// path segment (it contains `/`, `?` or `#`, or is `.` or `..`).
pub fn resolve(
    organization: Option<&str>,
    pat: Option<&str>,
    defaults: &Defaults,
) -> Result<Credentials> {
    let organization = non_blank(organization.map(str::to_string))
        .or_else(|| defaults.organization.clone())
        .ok_or(AzdoError::MissingCredential("organization"))?;

    if organization.contains(['/', '?', '#']) || matches!(organization.as_str(), "." | "..") {
        return Err(AzdoError::InvalidArgument(format!(
            "organization must be a single name, got '{organization}'"
        )));
    }

    let token = non_blank(pat.map(str::to_string))
        .map(Token::from)
        .or_else(|| defaults.pat.clone())
        .filter(|token| !token.is_blank())
        .ok_or(AzdoError::MissingCredential("pat"))?;

    debug!("Resolved organization '{organization}' with token {token}");

    Ok(Credentials {
        organization,
        token,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn env(pairs: &[(&str, &str)]) -> Defaults {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        Defaults::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.base_url, "https://dev.azure.com");
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.output.format, OutputFormat::Json);
        assert!(!config.output.pretty);
    }

    #[test]
    fn test_load_toml_config() {
        let mut temp_file = NamedTempFile::with_suffix(".toml").unwrap();
        let toml_content = r#"
organization = "contoso"
pat = "file-pat"
base-url = "https://ado.contoso.local/tfs"
timeout-secs = 5

[output]
format = "table"
pretty = true
"#;
        write!(temp_file, "{toml_content}").unwrap();

        let config = Config::load(Some(temp_file.path())).unwrap();
        assert_eq!(config.organization.as_deref(), Some("contoso"));
        assert_eq!(config.pat.as_deref(), Some("file-pat"));
        assert_eq!(config.base_url, "https://ado.contoso.local/tfs");
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.output.format, OutputFormat::Table);
        assert!(config.output.pretty);
    }

    #[test]
    fn test_load_json_config() {
        let mut temp_file = NamedTempFile::with_suffix(".json").unwrap();
        write!(temp_file, r#"{{"organization": "fabrikam", "output": {{"pretty": true}}}}"#).unwrap();

        let config = Config::load(Some(temp_file.path())).unwrap();
        assert_eq!(config.organization.as_deref(), Some("fabrikam"));
        assert_eq!(config.base_url, "https://dev.azure.com");
        assert!(config.output.pretty);
    }

    #[test]
    fn test_load_yaml_config() {
        let mut temp_file = NamedTempFile::with_suffix(".yml").unwrap();
        write!(temp_file, "organization: fabrikam\ntimeout-secs: 12\n").unwrap();

        let config = Config::load(Some(temp_file.path())).unwrap();
        assert_eq!(config.organization.as_deref(), Some("fabrikam"));
        assert_eq!(config.timeout_secs, 12);
    }

    #[test]
    fn test_load_missing_explicit_path_fails() {
        let result = Config::load(Some(Path::new("definitely-not-here.toml")));
        assert!(matches!(result, Err(AzdoError::Config(_))));
    }

    #[test]
    fn test_load_malformed_config_fails() {
        let mut temp_file = NamedTempFile::with_suffix(".toml").unwrap();
        write!(temp_file, "timeout-secs = \"soon\"").unwrap();

        let result = Config::load(Some(temp_file.path()));
        assert!(matches!(result, Err(AzdoError::Config(_))));
    }

    #[test]
    fn test_explicit_values_win_over_defaults() {
        let defaults = env(&[("ORGANIZATION", "env-org"), ("PAT", "env-pat")]);

        let creds = resolve(Some("cli-org"), Some("cli-pat"), &defaults).unwrap();
        assert_eq!(creds.organization, "cli-org");
        assert_eq!(
            creds.token.basic_auth_header().unwrap(),
            Token::from("cli-pat").basic_auth_header().unwrap()
        );
    }

    #[test]
    fn test_defaults_used_when_omitted_or_blank() {
        let defaults = env(&[("ORGANIZATION", "env-org"), ("PAT", "env-pat")]);

        let creds = resolve(None, Some("   "), &defaults).unwrap();
        assert_eq!(creds.organization, "env-org");
        assert_eq!(
            creds.token.basic_auth_header().unwrap(),
            Token::from("env-pat").basic_auth_header().unwrap()
        );
    }

    #[test]
    fn test_missing_organization() {
        let defaults = env(&[("PAT", "env-pat")]);
        let err = resolve(Some("  "), None, &defaults).unwrap_err();
        assert!(matches!(err, AzdoError::MissingCredential("organization")));
    }

    #[test]
    fn test_missing_pat() {
        let defaults = env(&[("ORGANIZATION", "env-org"), ("PAT", "\t")]);
        let err = resolve(None, None, &defaults).unwrap_err();
        assert!(matches!(err, AzdoError::MissingCredential("pat")));
    }

    #[test]
    fn test_both_missing_reports_organization_first() {
        let err = resolve(None, None, &Defaults::default()).unwrap_err();
        assert!(matches!(err, AzdoError::MissingCredential("organization")));
    }

    #[test]
    fn test_organization_with_slash_is_invalid() {
        let err = resolve(Some("org/project"), Some("pat"), &Defaults::default()).unwrap_err();
        assert!(matches!(err, AzdoError::InvalidArgument(_)));
    }

    #[test]
    fn test_dot_segment_organization_is_invalid() {
        for organization in [".", "..", " .. "] {
            let err = resolve(Some(organization), Some("pat"), &Defaults::default()).unwrap_err();
            assert!(
                matches!(err, AzdoError::InvalidArgument(_)),
                "{organization:?} should be rejected"
            );
        }

        let err = resolve(None, None, &env(&[("ORGANIZATION", ".."), ("PAT", "pat")])).unwrap_err();
        assert!(matches!(err, AzdoError::InvalidArgument(_)));
    }

    #[test]
    fn test_config_file_fills_missing_defaults_only() {
        let config = Config {
            organization: Some("file-org".to_string()),
            pat: Some("file-pat".to_string()),
            ..Config::default()
        };

        let defaults = env(&[("ORGANIZATION", "env-org")]).with_fallback(&config);
        let creds = resolve(None, None, &defaults).unwrap();

        assert_eq!(creds.organization, "env-org");
        assert_eq!(
            creds.token.basic_auth_header().unwrap(),
            Token::from("file-pat").basic_auth_header().unwrap()
        );
    }

    #[test]
    fn test_resolved_credentials_debug_hides_token() {
        let creds = resolve(Some("org"), Some("super-secret"), &Defaults::default()).unwrap();
        let debug = format!("{creds:?}");
        assert!(debug.contains("org"));
        assert!(!debug.contains("super-secret"));
    }
}
