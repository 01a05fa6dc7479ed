/*
[INPUT]:  YAML configuration file and command line overrides
[OUTPUT]: Client configuration and the request spec to send
[POS]:    Configuration layer - CLI setup
[UPDATE]: When adding new configuration options
*/

use std::collections::BTreeMap;

use anyhow::{Context, bail};
use mws_adapter::{ClientConfig, RequestSpec};
use serde::Deserialize;

/// Top-level configuration file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CliConfig {
    /// Endpoint and credentials
    #[serde(default)]
    pub client: ClientConfig,
    /// Request values applied before command line overrides
    #[serde(default)]
    pub defaults: RequestDefaults,
}

/// Request values shared by every invocation
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RequestDefaults {
    pub path: Option<String>,
    #[serde(default)]
    pub params: BTreeMap<String, String>,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
}

impl CliConfig {
    /// Load configuration from YAML file
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> anyhow::Result<Self> {
        let config: Self = serde_yaml::from_str(content)?;
        Ok(config)
    }

    /// Start a request spec from the configured defaults
    pub fn request_spec(&self) -> RequestSpec {
        RequestSpec {
            path: self.defaults.path.clone(),
            query: self.defaults.params.clone(),
            headers: self.defaults.headers.clone(),
            ..RequestSpec::default()
        }
    }
}

/// Split a `KEY=VALUE` argument. The value may itself contain `=`.
pub fn parse_key_value(arg: &str) -> anyhow::Result<(String, String)> {
    let (key, value) = arg
        .split_once('=')
        .with_context(|| format!("expected KEY=VALUE, got {arg:?}"))?;
    if key.is_empty() {
        bail!("empty key in {arg:?}");
    }
    Ok((key.to_string(), value.to_string()))
}
