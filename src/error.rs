//! Error types and handling for opencode-config
//!
//! Uses `thiserror` for error definitions and `miette` for diagnostics.

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for registry operations
#[derive(Error, Diagnostic, Debug)]
pub enum RegistryError {
    // Registry errors
    #[error("Could not find registry")]
    #[diagnostic(
        code(opencode_config::registry::not_found),
        help(
            "Run from the registry directory or set the path with 'opencode-config config --registry /path/to/registry'"
        )
    )]
    RegistryNotFound,

    #[error("Package directory not found: {path}")]
    #[diagnostic(code(opencode_config::registry::package_not_found))]
    PackageNotFound { path: String },

    #[error("Bundle '{name}' not found at {path}")]
    #[diagnostic(
        code(opencode_config::bundle::not_found),
        help("Bundles live under <registry>/bundles/<name>.yaml")
    )]
    BundleNotFound { name: String, path: String },

    #[error("Component '{id}' not found")]
    #[diagnostic(
        code(opencode_config::component::not_found),
        help("Run 'opencode-config list' to see all available components")
    )]
    ComponentNotFound { id: String },

    #[error("Component '{id}' is not installed")]
    #[diagnostic(
        code(opencode_config::component::not_installed),
        help("Run 'opencode-config status' to see installed components")
    )]
    ComponentNotInstalled { id: String },

    #[error("Component '{id}' is already installed")]
    #[diagnostic(
        code(opencode_config::component::already_installed),
        help("Use 'opencode-config update' to update it")
    )]
    AlreadyInstalled { id: String },

    #[error("Invalid component type: {value}")]
    #[diagnostic(
        code(opencode_config::component::invalid_type),
        help("Must be agent, subagent, skill, or command")
    )]
    InvalidComponentType { value: String },

    // Model tier errors
    #[error("Tier '{tier}' is not configured and fallback 'medium' is not configured")]
    #[diagnostic(
        code(opencode_config::tier::not_configured),
        help("Set it with 'opencode-config models --set {tier} <model>'")
    )]
    TierNotConfigured { tier: String },

    #[error("Model tiers are not fully configured (missing: {})", .missing.join(", "))]
    #[diagnostic(code(opencode_config::tier::incomplete), help("{hint}"))]
    TiersNotConfigured { missing: Vec<String>, hint: String },

    #[error("Invalid tier '{tier}'")]
    #[diagnostic(
        code(opencode_config::tier::invalid),
        help("Must be one of: high, medium, low, free")
    )]
    InvalidTier { tier: String },

    // Version errors
    #[error("Invalid semantic version: {version}")]
    #[diagnostic(code(opencode_config::version::parse_failed))]
    VersionParse { version: String },

    // Configuration errors
    #[error("Failed to parse configuration file: {path}")]
    #[diagnostic(code(opencode_config::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(opencode_config::config::invalid))]
    ConfigInvalid { message: String },

    // File system errors
    #[error("Failed to read file: {path}")]
    #[diagnostic(code(opencode_config::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("Failed to write file: {path}")]
    #[diagnostic(code(opencode_config::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(opencode_config::fs::io_error))]
    IoError { message: String },

    // Backend errors
    #[error("Error using stow: {stderr}")]
    #[diagnostic(code(opencode_config::backend::link_tool_failed))]
    LinkToolFailed { stderr: String },

    #[error("Feature not supported: {feature}")]
    #[diagnostic(code(opencode_config::feature::not_supported), help("{hint}"))]
    NotSupported { feature: String, hint: String },

    #[error("Operation cancelled")]
    #[diagnostic(code(opencode_config::cancelled))]
    Cancelled,
}

impl From<std::io::Error> for RegistryError {
    fn from(err: std::io::Error) -> Self {
        RegistryError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for RegistryError {
    fn from(err: serde_yaml::Error) -> Self {
        RegistryError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for RegistryError {
    fn from(err: serde_json::Error) -> Self {
        RegistryError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<inquire::InquireError> for RegistryError {
    fn from(err: inquire::InquireError) -> Self {
        match err {
            inquire::InquireError::OperationCanceled
            | inquire::InquireError::OperationInterrupted => RegistryError::Cancelled,
            other => RegistryError::IoError {
                message: other.to_string(),
            },
        }
    }
}

/// Build a `FileReadFailed` error for a path
pub fn read_failed(path: &std::path::Path, err: &std::io::Error) -> RegistryError {
    RegistryError::FileReadFailed {
        path: path.display().to_string(),
        reason: err.to_string(),
    }
}

/// Build a `FileWriteFailed` error for a path
pub fn write_failed(path: &std::path::Path, err: &std::io::Error) -> RegistryError {
    RegistryError::FileWriteFailed {
        path: path.display().to_string(),
        reason: err.to_string(),
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, RegistryError>;
