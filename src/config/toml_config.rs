use crate::adapters::DEFAULT_CATALOG_ENDPOINT;
use crate::core::favorites::DEFAULT_TOP_K;
use crate::core::ConfigProvider;
use crate::utils::error::{CouponError, Result};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_DEADLINE_SECONDS: u64 = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub catalog: CatalogConfig,
    pub favorites: Option<FavoritesConfig>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub endpoint: Option<String>,
    pub deadline_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavoritesConfig {
    pub marks_path: Option<String>,
    pub top_k: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub verbose: Option<bool>,
    pub json: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CouponError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| CouponError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${CATALOG_ENDPOINT})
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| CouponError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        crate::utils::validation::validate_url("catalog.endpoint", self.catalog_endpoint())?;

        crate::utils::validation::validate_range(
            "catalog.deadline_seconds",
            self.deadline_seconds(),
            1,
            300,
        )?;

        if let Some(favorites) = &self.favorites {
            if let Some(top_k) = favorites.top_k {
                crate::utils::validation::validate_positive_number("favorites.top_k", top_k, 1)?;
            }
            if let Some(marks_path) = &favorites.marks_path {
                crate::utils::validation::validate_path("favorites.marks_path", marks_path)?;
                crate::utils::validation::validate_file_extension(
                    "favorites.marks_path",
                    marks_path,
                    &["csv"],
                )?;
            }
        }

        Ok(())
    }

    pub fn deadline_seconds(&self) -> u64 {
        self.catalog
            .deadline_seconds
            .unwrap_or(DEFAULT_DEADLINE_SECONDS)
    }

    pub fn verbose(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.verbose)
            .unwrap_or(false)
    }

    pub fn json_logs(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn catalog_endpoint(&self) -> &str {
        self.catalog
            .endpoint
            .as_deref()
            .unwrap_or(DEFAULT_CATALOG_ENDPOINT)
    }

    fn batch_deadline(&self) -> Duration {
        Duration::from_secs(self.deadline_seconds())
    }

    fn favorites_path(&self) -> Option<&str> {
        self.favorites.as_ref().and_then(|f| f.marks_path.as_deref())
    }

    fn top_k(&self) -> usize {
        self.favorites
            .as_ref()
            .and_then(|f| f.top_k)
            .unwrap_or(DEFAULT_TOP_K)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
