//! Model placeholder resolution for component content
//!
//! Component files refer to models indirectly, either through a tier name
//! (`{{tier:high}}`) or a literal (`{{model:vendor/name}}`). The engine turns
//! both into concrete model identifiers using the configured tier mapping.

use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::config::Config;
use crate::domain::ModelTier;
use crate::error::{RegistryError, Result};

/// Model used when neither the requested nor the fallback tier is configured
pub const FALLBACK_MODEL: &str = "github-copilot/claude-sonnet-4";

#[allow(clippy::expect_used)]
static TIER_PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{tier:(\w+)\}\}").expect("valid tier pattern"));

#[allow(clippy::expect_used)]
static MODEL_PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{model:([^\}]+)\}\}").expect("valid model pattern"));

/// Resolves tier references against a configuration
#[derive(Debug, Clone, Copy)]
pub struct TemplateEngine<'a> {
    config: &'a Config,
}

impl<'a> TemplateEngine<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    fn configured(&self, tier: &str) -> Option<String> {
        tier.parse::<ModelTier>()
            .ok()
            .and_then(|t| self.config.get_model_for_tier(t))
    }

    /// Resolve a tier name or literal model string.
    ///
    /// - Empty or absent input resolves `default_tier`, then `medium`, then
    ///   [`FALLBACK_MODEL`].
    /// - `high`, `medium` and `low` resolve from the configuration, falling back
    ///   to `default_tier`; when neither is configured this is an error.
    /// - Anything else, `free` included, is returned unchanged as a literal.
    pub fn resolve_model(&self, tier_or_model: Option<&str>, default_tier: ModelTier) -> Result<String> {
        let value = tier_or_model.unwrap_or_default();

        if value.is_empty() {
            return Ok(self
                .configured(default_tier.as_str())
                .or_else(|| self.configured(ModelTier::Medium.as_str()))
                .unwrap_or_else(|| FALLBACK_MODEL.to_string()));
        }

        if ModelTier::RESOLVABLE.contains(&value) {
            return self
                .configured(value)
                .or_else(|| self.configured(default_tier.as_str()))
                .ok_or_else(|| RegistryError::TierNotConfigured {
                    tier: value.to_string(),
                });
        }

        Ok(value.to_string())
    }

    /// Replace `{{tier:X}}` and `{{model:X}}` placeholders.
    ///
    /// Tier placeholders check `overrides` first, then the configuration, then
    /// the `medium` tier, and fail when none of them has a model.
    pub fn process_content(&self, content: &str, overrides: &HashMap<String, String>) -> Result<String> {
        let mut resolved = String::with_capacity(content.len());
        let mut last = 0;
        for caps in TIER_PLACEHOLDER.captures_iter(content) {
            let (Some(whole), Some(tier)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            let tier = tier.as_str();
            let model = overrides
                .get(tier)
                .cloned()
                .or_else(|| self.configured(tier))
                .or_else(|| self.configured(ModelTier::Medium.as_str()))
                .ok_or_else(|| RegistryError::TierNotConfigured {
                    tier: tier.to_string(),
                })?;
            resolved.push_str(&content[last..whole.start()]);
            resolved.push_str(&model);
            last = whole.end();
        }
        resolved.push_str(&content[last..]);

        Ok(MODEL_PLACEHOLDER
            .replace_all(&resolved, |caps: &Captures<'_>| caps[1].to_string())
            .into_owned())
    }

    /// Only markdown component files carry placeholders
    pub fn should_process_file(path: &Path) -> bool {
        path.file_name()
            .is_some_and(|name| name.to_string_lossy().ends_with(".md"))
    }
}
