use crate::adapters::google::{ProviderSettings, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECONDS};
use crate::core::proximity::{DEFAULT_PLACE_TYPES, DEFAULT_RADIUS_METERS};
use crate::domain::model::PhotoSize;
use crate::domain::ports::{AnchorStrategy, ConfigProvider};
use crate::utils::error::{Result, SearchError};
use crate::utils::validation::{
    validate_non_empty_list, validate_positive_number, validate_range, validate_required_field,
    validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const API_KEY_ENV: &str = "GOOGLE_MAPS_API_KEY";

// Places 網路服務本身的上限
const MAX_RADIUS_METERS: f64 = 50_000.0;
const MAX_PHOTO_DIMENSION: u32 = 1600;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub enrichment: EnrichmentConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub timeout_seconds: u64,
    pub language: Option<String>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            language: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub radius: f64,
    pub types: Vec<String>,
    pub anchor: AnchorStrategy,
    pub concurrent_requests: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            radius: DEFAULT_RADIUS_METERS,
            types: DEFAULT_PLACE_TYPES.iter().map(|t| t.to_string()).collect(),
            anchor: AnchorStrategy::default(),
            concurrent_requests: 5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnrichmentConfig {
    pub photo_max_width: u32,
    pub photo_max_height: u32,
    /// Unbounded when absent.
    pub cache_capacity: Option<usize>,
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        let size = PhotoSize::default();
        Self {
            photo_max_width: size.max_width,
            photo_max_height: size.max_height,
            cache_capacity: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub json: bool,
    pub verbose: bool,
}

impl TomlConfig {
    /// 讀取設定檔
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SearchError::Io)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置 (先替換 ${VAR} 環境變數)
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| SearchError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    // 未設定的變數保留原樣，交由驗證回報
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| SearchError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 取得 API 金鑰，檔案未設定時改讀 `GOOGLE_MAPS_API_KEY`
    pub fn api_key(&self) -> Option<String> {
        self.provider
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty() && !key.starts_with("${"))
            .or_else(|| std::env::var(API_KEY_ENV).ok())
            .filter(|key| !key.trim().is_empty())
    }

    pub fn provider_settings(&self) -> Result<ProviderSettings> {
        let api_key = self.api_key();
        let api_key = validate_required_field("provider.api_key", &api_key)?.clone();
        Ok(ProviderSettings {
            base_url: self.provider.base_url.clone(),
            api_key,
            timeout: Duration::from_secs(self.provider.timeout_seconds),
            language: self.provider.language.clone(),
        })
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_url("provider.base_url", &self.provider.base_url)?;
        validate_required_field("provider.api_key", &self.api_key())?;
        validate_range("provider.timeout_seconds", self.provider.timeout_seconds, 1, 300)?;

        validate_range("search.radius", self.search.radius, 1.0, MAX_RADIUS_METERS)?;
        validate_non_empty_list("search.types", &self.search.types)?;
        validate_range("search.concurrent_requests", self.search.concurrent_requests, 1, 100)?;

        validate_range(
            "enrichment.photo_max_width",
            self.enrichment.photo_max_width,
            1,
            MAX_PHOTO_DIMENSION,
        )?;
        validate_range(
            "enrichment.photo_max_height",
            self.enrichment.photo_max_height,
            1,
            MAX_PHOTO_DIMENSION,
        )?;
        if let Some(capacity) = self.enrichment.cache_capacity {
            validate_positive_number("enrichment.cache_capacity", capacity, 1)?;
        }

        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    fn search_radius(&self) -> f64 {
        self.search.radius
    }

    fn place_types(&self) -> &[String] {
        &self.search.types
    }

    fn concurrent_requests(&self) -> usize {
        self.search.concurrent_requests
    }

    fn photo_size(&self) -> PhotoSize {
        PhotoSize {
            max_width: self.enrichment.photo_max_width,
            max_height: self.enrichment.photo_max_height,
        }
    }

    fn anchor_strategy(&self) -> AnchorStrategy {
        self.search.anchor
    }

    fn cache_capacity(&self) -> Option<usize> {
        self.enrichment.cache_capacity
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
