use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScriptError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("BCS encoding error: {0}")]
    BcsError(#[from] bcs::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("RPC error {code}: {message}")]
    RpcError { code: i64, message: String },

    #[error("Unexpected RPC response: {message}")]
    ResponseError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field} (set {env_var})")]
    MissingConfig { field: String, env_var: String },

    #[error("Invalid value for {field}: '{value}' - {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Key error: {message}")]
    KeyError { message: String },

    #[error("Object {object_id} not found")]
    ObjectNotFound { object_id: String },

    #[error("{field} not found")]
    FieldNotFound { field: String },

    #[error("Insufficient gas: {message}")]
    InsufficientGas { message: String },

    #[error("Transaction failed: {message}")]
    TransactionFailed { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Configuration,
    Signing,
    OnChain,
    Data,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ScriptError {
    pub fn config(message: impl Into<String>) -> Self {
        ScriptError::ConfigError {
            message: message.into(),
        }
    }

    pub fn response(message: impl Into<String>) -> Self {
        ScriptError::ResponseError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            ScriptError::HttpError(_)
            | ScriptError::RpcError { .. }
            | ScriptError::ResponseError { .. } => ErrorCategory::Network,
            ScriptError::IoError(_)
            | ScriptError::TomlError(_)
            | ScriptError::ConfigError { .. }
            | ScriptError::MissingConfig { .. }
            | ScriptError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            ScriptError::KeyError { .. } => ErrorCategory::Signing,
            ScriptError::ObjectNotFound { .. }
            | ScriptError::InsufficientGas { .. }
            | ScriptError::TransactionFailed { .. } => ErrorCategory::OnChain,
            ScriptError::SerializationError(_)
            | ScriptError::BcsError(_)
            | ScriptError::FieldNotFound { .. } => ErrorCategory::Data,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // The node may just be unavailable; rerunning can succeed.
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::OnChain | ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::Configuration | ErrorCategory::Signing => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            ScriptError::HttpError(_) | ScriptError::ResponseError { .. } => {
                "Check the fullnode URL (Network / SUI_RPC_URL) and your connectivity".to_string()
            }
            ScriptError::RpcError { .. } => {
                "The fullnode rejected the request; verify package and object ids".to_string()
            }
            ScriptError::MissingConfig { env_var, .. } => {
                format!("Add {} to your .env file or profile", env_var)
            }
            ScriptError::InvalidConfigValueError { field, .. } => {
                format!("Fix the value of {}", field)
            }
            ScriptError::ConfigError { .. }
            | ScriptError::TomlError(_)
            | ScriptError::IoError(_) => "Check the configuration file and .env".to_string(),
            ScriptError::KeyError { .. } => {
                "Check SECRET_KEY_ED25519_1_MNEMONICS is a valid BIP-39 phrase".to_string()
            }
            ScriptError::ObjectNotFound { .. } => {
                "Make sure the object exists on the selected network".to_string()
            }
            ScriptError::FieldNotFound { .. } => {
                "Check the parent object id and field name".to_string()
            }
            ScriptError::InsufficientGas { .. } => {
                "Fund the signer address or lower GAS_BUDGET".to_string()
            }
            ScriptError::TransactionFailed { .. } => {
                "Inspect the abort code against the Move module".to_string()
            }
            ScriptError::SerializationError(_) | ScriptError::BcsError(_) => {
                "The fullnode returned data in an unexpected shape".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => format!("Could not talk to the fullnode: {}", self),
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Signing => format!("Could not load the signing key: {}", self),
            ErrorCategory::OnChain => format!("On-chain operation failed: {}", self),
            ErrorCategory::Data => format!("Unexpected data: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, ScriptError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_not_found_message() {
        let err = ScriptError::FieldNotFound {
            field: "user_datas".to_string(),
        };
        assert_eq!(err.to_string(), "user_datas not found");
        assert_eq!(err.category(), ErrorCategory::Data);
    }

    #[test]
    fn test_severity_by_category() {
        let rpc = ScriptError::RpcError {
            code: -32602,
            message: "bad params".to_string(),
        };
        assert_eq!(rpc.severity(), ErrorSeverity::Medium);

        let missing = ScriptError::MissingConfig {
            field: "ark package".to_string(),
            env_var: "MoveArkPackageId".to_string(),
        };
        assert_eq!(missing.severity(), ErrorSeverity::Critical);
        assert!(missing.recovery_suggestion().contains("MoveArkPackageId"));
    }
}
