use crate::domain::model::ItemId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CouponError {
    #[error("Item(s) not found: {}", join_ids(.ids))]
    ItemResolutionError { ids: Vec<ItemId> },

    #[error("No items available to apply the coupon")]
    EmptyCatalogError,

    #[error("No favorites recorded")]
    NoFavoritesError,

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Input was well-formed but the data needed to answer is missing.
    Domain,
    Network,
    Configuration,
    Internal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

fn join_ids(ids: &[ItemId]) -> String {
    ids.iter()
        .map(ItemId::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

impl CouponError {
    pub fn item_resolution(id: ItemId) -> Self {
        CouponError::ItemResolutionError { ids: vec![id] }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            CouponError::ItemResolutionError { .. }
            | CouponError::EmptyCatalogError
            | CouponError::NoFavoritesError => ErrorCategory::Domain,
            CouponError::ApiError(_) => ErrorCategory::Network,
            CouponError::ConfigError { .. }
            | CouponError::ConfigValidationError { .. }
            | CouponError::InvalidConfigValueError { .. }
            | CouponError::MissingConfigError { .. }
            | CouponError::ValidationError { .. } => ErrorCategory::Configuration,
            CouponError::CsvError(_)
            | CouponError::IoError(_)
            | CouponError::SerializationError(_) => ErrorCategory::Internal,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Domain => ErrorSeverity::Low,
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Internal => ErrorSeverity::Critical,
        }
    }

    pub fn is_domain_error(&self) -> bool {
        self.category() == ErrorCategory::Domain
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            CouponError::ItemResolutionError { ids } => format!(
                "Check that the item ids exist in the catalog: {}",
                join_ids(ids)
            ),
            CouponError::EmptyCatalogError => {
                "Provide at least one item id to apply the coupon to".to_string()
            }
            CouponError::NoFavoritesError => {
                "Record favorite marks before requesting the ranking".to_string()
            }
            CouponError::ApiError(_) => {
                "Check network connectivity and the catalog endpoint, then retry".to_string()
            }
            CouponError::CsvError(_) => {
                "Make sure the favorites file has a 'user_id,item_id' header".to_string()
            }
            CouponError::IoError(_) => "Check file paths and permissions".to_string(),
            CouponError::SerializationError(_) => {
                "The data could not be encoded or decoded as JSON".to_string()
            }
            CouponError::ConfigError { .. } | CouponError::ConfigValidationError { .. } => {
                "Review the configuration file syntax".to_string()
            }
            CouponError::InvalidConfigValueError { field, .. } => {
                format!("Fix the value of '{}'", field)
            }
            CouponError::MissingConfigError { field } => {
                format!("Set '{}' in the configuration or on the command line", field)
            }
            CouponError::ValidationError { .. } => "Correct the request and retry".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            CouponError::ItemResolutionError { ids } => {
                format!("Item(s) not found: {}", join_ids(ids))
            }
            CouponError::EmptyCatalogError => {
                "Coupon not applicable: no items available".to_string()
            }
            CouponError::NoFavoritesError => "No favorites recorded yet".to_string(),
            other if other.category() == ErrorCategory::Configuration => {
                format!("Configuration problem: {}", other)
            }
            other => format!("Unexpected failure: {}", other),
        }
    }
}

pub type Result<T> = std::result::Result<T, CouponError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_errors_are_distinguished_from_internal() {
        let missing = CouponError::ItemResolutionError {
            ids: vec![ItemId::from("a"), ItemId::from("b")],
        };
        assert!(missing.is_domain_error());
        assert_eq!(missing.to_string(), "Item(s) not found: a, b");
        assert!(CouponError::EmptyCatalogError.is_domain_error());
        assert!(CouponError::NoFavoritesError.is_domain_error());

        let io = CouponError::IoError(std::io::Error::new(
            std::io::ErrorKind::Other,
            "disk",
        ));
        assert!(!io.is_domain_error());
        assert_eq!(io.severity(), ErrorSeverity::Critical);
        assert!(io.user_friendly_message().starts_with("Unexpected failure"));
    }

    #[test]
    fn test_config_errors_have_high_severity() {
        let err = CouponError::MissingConfigError {
            field: "favorites.marks_path".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.recovery_suggestion().contains("favorites.marks_path"));
    }

    #[tokio::test]
    async fn test_transport_failures_are_network_errors() {
        // nothing listens on port 1
        let transport = reqwest::Client::new()
            .get("http://127.0.0.1:1/")
            .send()
            .await
            .unwrap_err();

        let err = CouponError::from(transport);

        assert!(matches!(err, CouponError::ApiError(_)));
        assert_eq!(err.category(), ErrorCategory::Network);
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert!(!err.is_domain_error());
    }
}
