//! Category bucketing rules
//!
//! An explicit ordered rule list: each rule pairs a bucket name with the
//! keywords that select it. Rules are evaluated top-to-bottom against the
//! lowercased gender field and the first match wins, so precedence is what
//! the config says rather than an accident of map iteration order. Records
//! nothing matches land in the default bucket.

use crate::config::FeedConfig;

struct Rule {
    name: String,
    keywords: Vec<String>,
}

/// Ordered (keywords -> bucket) rules with a default bucket
pub struct CategoryRules {
    rules: Vec<Rule>,
    default_bucket: String,
}

impl CategoryRules {
    /// Builds the rule list from config, lowercasing keywords once
    pub fn from_config(config: &FeedConfig) -> Self {
        let rules = config
            .categories
            .iter()
            .map(|rule| Rule {
                name: rule.name.clone(),
                keywords: rule.keywords.iter().map(|k| k.to_lowercase()).collect(),
            })
            .collect();

        Self {
            rules,
            default_bucket: config.default_category.clone(),
        }
    }

    /// Returns the bucket for a gender value, first matching rule wins
    pub fn bucket_for(&self, gender: &str) -> &str {
        let gender = gender.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.keywords.iter().any(|k| gender.contains(k.as_str())))
            .map(|rule| rule.name.as_str())
            .unwrap_or(&self.default_bucket)
    }

    /// All bucket names in evaluation order, default last
    pub fn bucket_names(&self) -> Vec<&str> {
        self.rules
            .iter()
            .map(|rule| rule.name.as_str())
            .chain(std::iter::once(self.default_bucket.as_str()))
            .collect()
    }
}
