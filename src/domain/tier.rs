//! Model tiers

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RegistryError;

/// A named complexity bucket mapped to a concrete model identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelTier {
    High,
    Medium,
    Low,
    Free,
}

impl ModelTier {
    pub const ALL: [ModelTier; 4] = [
        ModelTier::High,
        ModelTier::Medium,
        ModelTier::Low,
        ModelTier::Free,
    ];

    /// Tier names that template resolution treats as tier references.
    ///
    /// `free` is configurable but is not in this set: a bare `free` passed to
    /// model resolution is returned as a literal model string.
    pub const RESOLVABLE: [&'static str; 3] = ["high", "medium", "low"];

    pub fn as_str(self) -> &'static str {
        match self {
            ModelTier::High => "high",
            ModelTier::Medium => "medium",
            ModelTier::Low => "low",
            ModelTier::Free => "free",
        }
    }

    /// Short description of what the tier is meant for
    pub fn use_case(self) -> &'static str {
        match self {
            ModelTier::High => "Complex reasoning (architecture, design)",
            ModelTier::Medium => "General coding (implementation, review)",
            ModelTier::Low => "Simple tasks (docs, commits)",
            ModelTier::Free => "Lightweight tasks on free models",
        }
    }

    /// Example model shown in configuration hints
    pub fn example_model(self) -> &'static str {
        match self {
            ModelTier::High => "github-copilot/claude-sonnet-4.5",
            ModelTier::Medium => "github-copilot/claude-sonnet-4",
            ModelTier::Low => "github-copilot/claude-haiku-4.5",
            ModelTier::Free => "github-copilot/gpt-4o-mini",
        }
    }
}

impl fmt::Display for ModelTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for ModelTier {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| RegistryError::InvalidTier {
                tier: s.to_string(),
            })
    }
}
