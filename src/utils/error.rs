use crate::domain::model::PlaceId;
use crate::domain::ports::ProviderStatus;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Geocoding failed with status {status}")]
    Geocoding { status: ProviderStatus },

    #[error("Nearby search failed with status {status}")]
    ProximitySearch { status: ProviderStatus },

    #[error("Place details for {place_id} failed with status {status}")]
    Enrichment {
        place_id: PlaceId,
        status: ProviderStatus,
    },

    #[error("Provider request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Upstream,
    Network,
    Configuration,
    Input,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl SearchError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            SearchError::Geocoding { .. }
            | SearchError::ProximitySearch { .. }
            | SearchError::Enrichment { .. } => ErrorCategory::Upstream,
            SearchError::Transport(_) => ErrorCategory::Network,
            SearchError::ConfigValidationError { .. }
            | SearchError::MissingConfigError { .. }
            | SearchError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            SearchError::ValidationError { .. } => ErrorCategory::Input,
            SearchError::Serialization(_) | SearchError::Io(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 單一地點失敗不會中止搜尋
            SearchError::Enrichment { .. } => ErrorSeverity::Low,
            SearchError::Geocoding { status } | SearchError::ProximitySearch { status }
                if status.is_transient() =>
            {
                ErrorSeverity::Medium
            }
            SearchError::Transport(_) => ErrorSeverity::Medium,
            SearchError::Geocoding { .. }
            | SearchError::ProximitySearch { .. }
            | SearchError::ValidationError { .. }
            | SearchError::ConfigValidationError { .. }
            | SearchError::MissingConfigError { .. }
            | SearchError::InvalidConfigValueError { .. } => ErrorSeverity::High,
            SearchError::Serialization(_) | SearchError::Io(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            SearchError::Geocoding { status } | SearchError::ProximitySearch { status } => {
                match status {
                    ProviderStatus::RequestDenied => {
                        "Check that the API key is valid and the Places/Geocoding APIs are enabled"
                            .to_string()
                    }
                    ProviderStatus::OverQueryLimit => {
                        "The provider quota is exhausted; wait before searching again".to_string()
                    }
                    ProviderStatus::ZeroResults => {
                        "Nothing matched; try a wider radius or a more specific address"
                            .to_string()
                    }
                    _ => "Try the search again with a different address".to_string(),
                }
            }
            SearchError::Enrichment { place_id, .. } => {
                format!("Place {} could not be loaded and was skipped", place_id)
            }
            SearchError::Transport(_) => {
                "Check the network connection and the provider base URL".to_string()
            }
            SearchError::ConfigValidationError { field, .. }
            | SearchError::InvalidConfigValueError { field, .. } => {
                format!("Fix the '{}' setting in the configuration", field)
            }
            SearchError::MissingConfigError { field } => {
                format!("Provide a value for '{}'", field)
            }
            SearchError::ValidationError { .. } => "Check the search input".to_string(),
            SearchError::Serialization(_) => {
                "The provider returned an unexpected payload".to_string()
            }
            SearchError::Io(_) => "Check file paths and permissions".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Upstream => format!("The places provider rejected the search ({})", self),
            ErrorCategory::Network => "Could not reach the places provider".to_string(),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::Input => format!("Invalid input: {}", self),
            ErrorCategory::System => format!("Internal error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, SearchError>;
