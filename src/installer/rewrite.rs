//! Frontmatter model rewriting
//!
//! Registry files declare a tier (`model_tier: high`); installed files must
//! carry a concrete `model:` instead. The rewrite only touches top-level keys
//! inside the frontmatter block and leaves the body alone, so a
//! `model_tier:` line in prose or in a code sample is never altered.

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::ModelTier;
use crate::frontmatter::frontmatter_span;
use crate::template::TemplateEngine;

#[allow(clippy::expect_used)]
static TIER_DECLARATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^model_tier:\s*["']?(\w+)["']?\s*$"#).expect("valid tier declaration pattern")
});

const MODEL_KEY: &str = "model:";

/// Result of rewriting one file's content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    pub content: String,
    /// Problems that left the declaration untouched
    pub warnings: Vec<String>,
}

fn tier_declaration(line: &str) -> Option<&str> {
    TIER_DECLARATION
        .captures(line.trim_end_matches(['\r', '\n']))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

fn is_model_line(line: &str) -> bool {
    line.starts_with(MODEL_KEY)
}

/// Replace the tier declaration with a concrete model.
///
/// With `model_override`, the override becomes the model whether or not a tier
/// is declared. Otherwise the first declared tier is resolved through `engine`.
/// The result has a single top-level `model:` line placed where the tier
/// declaration (or the previous `model:` line) was, or right after the opening
/// marker when neither existed. Content without frontmatter is returned as is.
pub fn rewrite_model(content: &str, model_override: Option<&str>, engine: &TemplateEngine<'_>) -> Rewrite {
    let unchanged = |warnings| Rewrite {
        content: content.to_string(),
        warnings,
    };

    let Some(span) = frontmatter_span(content) else {
        return unchanged(Vec::new());
    };
    let block: Vec<&str> = content[span.clone()].split_inclusive('\n').collect();

    let tier_line = block.iter().position(|line| tier_declaration(line).is_some());
    let model_line = block.iter().position(|line| is_model_line(line));

    let model = match (model_override, tier_line) {
        (Some(model), _) => model.to_string(),
        (None, Some(index)) => {
            let tier = tier_declaration(block[index]).unwrap_or_default();
            match engine.resolve_model(Some(tier), ModelTier::Medium) {
                Ok(model) => model,
                Err(e) => return unchanged(vec![e.to_string()]),
            }
        }
        (None, None) => return unchanged(Vec::new()),
    };

    let eol = if content[..span.start].ends_with("\r\n") { "\r\n" } else { "\n" };
    let model_entry = format!("{MODEL_KEY} {model}{eol}");
    let anchor = tier_line.or(model_line);

    let mut rewritten = String::with_capacity(content.len() + model_entry.len());
    rewritten.push_str(&content[..span.start]);
    if anchor.is_none() {
        rewritten.push_str(&model_entry);
    }
    for (index, line) in block.iter().enumerate() {
        if Some(index) == anchor {
            rewritten.push_str(&model_entry);
        } else if tier_declaration(line).is_none() && !is_model_line(line) {
            rewritten.push_str(line);
        }
    }
    rewritten.push_str(&content[span.end..]);

    Rewrite {
        content: rewritten,
        warnings: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use tempfile::TempDir;

    fn config(temp: &TempDir, tiers: &[(ModelTier, &str)]) -> Config {
        let mut config = Config::load(temp.path().join("config.json")).unwrap();
        for (tier, model) in tiers {
            config.set_model_tier(*tier, Some(model)).unwrap();
        }
        config
    }

    #[test]
    fn test_tier_declaration_becomes_model() {
        let temp = TempDir::new().unwrap();
        let config = config(&temp, &[(ModelTier::Low, "vendorA/cheap")]);
        let engine = TemplateEngine::new(&config);

        let out = rewrite_model("---\nmodel_tier: \"low\"\n---\n# X\n", None, &engine);
        assert_eq!(out.content, "---\nmodel: vendorA/cheap\n---\n# X\n");
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_duplicate_declarations_collapse() {
        let temp = TempDir::new().unwrap();
        let config = config(&temp, &[(ModelTier::High, "a/high"), (ModelTier::Low, "a/low")]);
        let engine = TemplateEngine::new(&config);

        let content = "---\nname: x\nmodel_tier: high\nmodel: old/model\nmodel_tier: low\n---\nbody\n";
        let out = rewrite_model(content, None, &engine);
        assert_eq!(out.content, "---\nname: x\nmodel: a/high\n---\nbody\n");
    }

    #[test]
    fn test_override_replaces_declaration() {
        let temp = TempDir::new().unwrap();
        let config = config(&temp, &[]);
        let engine = TemplateEngine::new(&config);

        let out = rewrite_model("---\nname: x\nmodel_tier: high\n---\n", Some("custom/m"), &engine);
        assert_eq!(out.content, "---\nname: x\nmodel: custom/m\n---\n");
    }

    #[test]
    fn test_override_injected_after_marker() {
        let temp = TempDir::new().unwrap();
        let config = config(&temp, &[]);
        let engine = TemplateEngine::new(&config);

        let out = rewrite_model("---\nname: x\n---\nbody\n", Some("custom/m"), &engine);
        assert_eq!(out.content, "---\nmodel: custom/m\nname: x\n---\nbody\n");
    }

    #[test]
    fn test_override_replaces_existing_model() {
        let temp = TempDir::new().unwrap();
        let config = config(&temp, &[]);
        let engine = TemplateEngine::new(&config);

        let out = rewrite_model("---\nmodel: old/m\nname: x\n---\n", Some("custom/m"), &engine);
        assert_eq!(out.content, "---\nmodel: custom/m\nname: x\n---\n");
    }

    #[test]
    fn test_body_and_nested_keys_untouched() {
        let temp = TempDir::new().unwrap();
        let config = config(&temp, &[(ModelTier::High, "a/high")]);
        let engine = TemplateEngine::new(&config);

        let content = "---\nmodel_tier: high\nextra:\n  model_tier: low\n---\nmodel_tier: low\n";
        let out = rewrite_model(content, None, &engine);
        assert_eq!(
            out.content,
            "---\nmodel: a/high\nextra:\n  model_tier: low\n---\nmodel_tier: low\n"
        );
    }

    #[test]
    fn test_unresolvable_tier_is_warning() {
        let temp = TempDir::new().unwrap();
        let config = config(&temp, &[]);
        let engine = TemplateEngine::new(&config);

        let content = "---\nmodel_tier: high\n---\n";
        let out = rewrite_model(content, None, &engine);
        assert_eq!(out.content, content);
        assert_eq!(out.warnings.len(), 1);
    }

    #[test]
    fn test_without_frontmatter_unchanged() {
        let temp = TempDir::new().unwrap();
        let config = config(&temp, &[]);
        let engine = TemplateEngine::new(&config);

        let content = "# Title\nmodel_tier: high\n";
        assert_eq!(rewrite_model(content, Some("custom/m"), &engine).content, content);
    }

    #[test]
    fn test_free_tier_is_literal() {
        let temp = TempDir::new().unwrap();
        let config = config(&temp, &[(ModelTier::Free, "vendorB/free")]);
        let engine = TemplateEngine::new(&config);

        let out = rewrite_model("---\nmodel_tier: free\n---\n", None, &engine);
        assert_eq!(out.content, "---\nmodel: free\n---\n");
    }

    #[test]
    fn test_crlf_preserved() {
        let temp = TempDir::new().unwrap();
        let config = config(&temp, &[(ModelTier::Medium, "a/mid")]);
        let engine = TemplateEngine::new(&config);

        let out = rewrite_model("---\r\nmodel_tier: medium\r\n---\r\n", None, &engine);
        assert_eq!(out.content, "---\r\nmodel: a/mid\r\n---\r\n");
    }
}
