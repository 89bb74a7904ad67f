//! Gateway configuration
//!
//! Every value has a built-in default, so an empty or partial `config.json`
//! still yields a working setup. Only `backend.app_id` must be supplied.

use crate::gateway::errors::{GatewayError, GatewayResult};
use anyhow::{anyhow, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_TOLL_EVENT_ENDPOINT: &str =
    "https://9l3xkh0e2a.execute-api.us-east-1.amazonaws.com/prod/toll-event";
pub const DEFAULT_BACKEND_URL: &str = "https://base44.app";
pub const DEFAULT_ROUTER_FUNCTION: &str = "invokeLambda";
pub const DEFAULT_TOLL_CROSSING_FUNCTION: &str = "lambdaProcessTollCrossing";
pub const DEFAULT_PAYMENT_FUNCTION: &str = "lambdaProcessPayment";

#[derive(Debug, Clone)]
pub struct ConfigPaths {
    pub base_dir: PathBuf,
    pub config_file: PathBuf,
}

impl ConfigPaths {
    pub fn new() -> Result<Self> {
        let project_dirs = ProjectDirs::from("com", "TollGateway", "TollGateway")
            .ok_or_else(|| anyhow!("Unable to determine configuration directory"))?;

        let base_dir = project_dirs.config_dir().to_path_buf();
        let config_file = base_dir.join("config.json");

        Ok(Self {
            base_dir,
            config_file,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TollEventConfig {
    /// API Gateway endpoint receiving toll events
    pub endpoint: String,
}

impl Default for TollEventConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_TOLL_EVENT_ENDPOINT.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub base_url: String,
    pub app_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BACKEND_URL.to_string(),
            app_id: String::new(),
            access_token: None,
        }
    }
}

impl BackendConfig {
    pub fn validate(&self) -> GatewayResult<()> {
        validate_url("backend.base_url", &self.base_url)?;
        if self.app_id.trim().is_empty() {
            return Err(GatewayError::config("backend.app_id must be set"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LambdaConfig {
    /// Backend function that routes envelopes to Lambda
    pub router_function: String,
    pub toll_crossing_function: String,
    pub payment_function: String,
}

impl Default for LambdaConfig {
    fn default() -> Self {
        Self {
            router_function: DEFAULT_ROUTER_FUNCTION.to_string(),
            toll_crossing_function: DEFAULT_TOLL_CROSSING_FUNCTION.to_string(),
            payment_function: DEFAULT_PAYMENT_FUNCTION.to_string(),
        }
    }
}

impl LambdaConfig {
    pub fn validate(&self) -> GatewayResult<()> {
        for (field, value) in [
            ("lambda.router_function", &self.router_function),
            ("lambda.toll_crossing_function", &self.toll_crossing_function),
            ("lambda.payment_function", &self.payment_function),
        ] {
            if value.trim().is_empty() {
                return Err(GatewayError::config(format!("{} must not be empty", field)));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    pub toll_events: TollEventConfig,
    pub backend: BackendConfig,
    pub lambda: LambdaConfig,
}

impl GatewayConfig {
    /// Load from the platform config directory, falling back to defaults
    pub fn load() -> Result<Self> {
        let paths = ConfigPaths::new()?;
        if !paths.config_file.exists() {
            log::info!(
                "No gateway config at {:?}, using defaults",
                paths.config_file
            );
            return Ok(Self::default());
        }
        Self::load_from(&paths.config_file)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| anyhow!("Failed to read config {:?}: {}", path, e))?;
        let config: GatewayConfig = serde_json::from_str(&content)?;
        log::info!("Loaded gateway config from {:?}", path);
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        log::info!("Saved gateway config to {:?}", path);
        Ok(())
    }

    pub fn validate(&self) -> GatewayResult<()> {
        validate_url("toll_events.endpoint", &self.toll_events.endpoint)?;
        self.backend.validate()?;
        self.lambda.validate()
    }
}

fn validate_url(field: &str, value: &str) -> GatewayResult<()> {
    let url = reqwest::Url::parse(value)
        .map_err(|e| GatewayError::config(format!("{} is not a valid URL: {}", field, e)))?;

    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(GatewayError::config(format!(
            "{} must use http or https, got {}",
            field, scheme
        ))),
    }
}
