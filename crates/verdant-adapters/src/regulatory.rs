// crates/verdant-adapters/src/regulatory.rs
// ============================================================================
// Module: Verdant Regulatory Registry
// Description: In-memory regulatory article base and compliance vectors.
// Purpose: Answer jurist queries and classify actions by risk level.
// Dependencies: verdant-core
// ============================================================================

//! ## Overview
//! The registry holds a small in-memory article base shaped after AI-governance
//! regulation: prohibition, high-risk classification, risk management,
//! transparency, and human oversight. Compliance vectors map risk levels onto
//! article sets; only the `unacceptable` level is outright non-compliant, and
//! high-risk actions always demand human oversight.

// ============================================================================
// SECTION: Imports
// ============================================================================

use verdant_core::AdapterError;
use verdant_core::Article;
use verdant_core::ArticleRef;
use verdant_core::ComplianceCheck;
use verdant_core::RegulatoryQueryResult;
use verdant_core::RegulatoryRegistry;

// ============================================================================
// SECTION: Registry
// ============================================================================

/// Maximum articles returned by one query.
const QUERY_CAP: usize = 10;

/// In-memory regulatory registry.
#[derive(Debug)]
pub struct InMemoryRegulatoryRegistry {
    /// Article base searched by queries.
    articles: Vec<Article>,
}

impl Default for InMemoryRegulatoryRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRegulatoryRegistry {
    /// Creates a registry with the built-in article base.
    #[must_use]
    pub fn new() -> Self {
        Self {
            articles: default_articles(),
        }
    }

    /// Creates a registry over a custom article base.
    #[must_use]
    pub fn with_articles(articles: Vec<Article>) -> Self {
        Self {
            articles,
        }
    }

    /// Returns the article sections relevant to a risk level.
    fn relevant_sections(risk_level: &str) -> &'static [&'static str] {
        match risk_level {
            "unacceptable" => &["Article 5"],
            "high" => &["Article 6", "Article 9", "Article 13", "Article 14", "Article 52"],
            "limited" => &["Article 52"],
            _ => &[],
        }
    }
}

impl RegulatoryRegistry for InMemoryRegulatoryRegistry {
    fn query(
        &self,
        section: Option<&str>,
        keyword: Option<&str>,
    ) -> Result<RegulatoryQueryResult, AdapterError> {
        let matches: Vec<Article> = self
            .articles
            .iter()
            .filter(|article| {
                let section_match = section.is_some_and(|wanted| {
                    article.section.to_lowercase().contains(&wanted.to_lowercase())
                });
                let keyword_match = keyword.is_some_and(|wanted| {
                    let needle = wanted.to_lowercase();
                    let haystack = format!(
                        "{} {} {}",
                        article.title,
                        article.text,
                        article.keywords.join(" ")
                    )
                    .to_lowercase();
                    haystack.contains(&needle)
                });
                let unfiltered = section.is_none() && keyword.is_none();
                section_match || keyword_match || unfiltered
            })
            .cloned()
            .collect();

        let result_count = u32::try_from(matches.len()).unwrap_or(u32::MAX);
        Ok(RegulatoryQueryResult {
            result_count,
            articles: matches.into_iter().take(QUERY_CAP).collect(),
        })
    }

    fn check_compliance_vector(
        &self,
        action_description: &str,
        risk_level: &str,
    ) -> Result<ComplianceCheck, AdapterError> {
        let level = risk_level.to_lowercase();
        let sections = Self::relevant_sections(&level);
        let relevant: Vec<ArticleRef> = self
            .articles
            .iter()
            .filter(|article| {
                sections
                    .iter()
                    .any(|section| article.section.to_lowercase().contains(&section.to_lowercase()))
            })
            .map(|article| ArticleRef {
                section: article.section.clone(),
                title: article.title.clone(),
            })
            .collect();

        let requires_human_oversight = matches!(level.as_str(), "high" | "unacceptable");
        let requires_transparency = matches!(level.as_str(), "high" | "limited");

        let mut compliant = true;
        let mut reasoning_parts = Vec::new();
        match level.as_str() {
            "unacceptable" => {
                compliant = false;
                reasoning_parts.push(
                    "Action classified as unacceptable risk under Article 5; prohibited."
                        .to_string(),
                );
            }
            "high" => {
                reasoning_parts.push(
                    "Action classified as a high-risk system. Must satisfy Articles 6, 9 (risk \
                     management), 13 (transparency), 14 (human oversight), and 52 (transparency \
                     obligations)."
                        .to_string(),
                );
                if action_description.to_lowercase().contains("autonomous") {
                    reasoning_parts.push(
                        "Autonomous decision-making detected; human oversight (Article 14) is \
                         mandatory before execution."
                            .to_string(),
                    );
                }
            }
            "limited" => {
                reasoning_parts.push(
                    "Limited risk classification. Transparency obligations apply (Article 52)."
                        .to_string(),
                );
            }
            _ => {
                reasoning_parts
                    .push("Minimal risk; no specific obligations apply.".to_string());
            }
        }

        Ok(ComplianceCheck {
            compliant,
            risk_classification: risk_level.to_string(),
            requires_human_oversight,
            requires_transparency,
            relevant_articles: relevant,
            reasoning: reasoning_parts.join(" "),
            action_evaluated: action_description.to_string(),
        })
    }
}

// ============================================================================
// SECTION: Article Base
// ============================================================================

/// Builds the built-in regulation article base.
fn default_articles() -> Vec<Article> {
    vec![
        Article {
            section: "Article 5".to_string(),
            title: "Prohibited Practices".to_string(),
            text: "Systems deploying subliminal manipulation or exploiting vulnerabilities are \
                   prohibited from being placed on the market or put into service."
                .to_string(),
            keywords: vec!["prohibition".to_string(), "unacceptable risk".to_string()],
        },
        Article {
            section: "Article 6".to_string(),
            title: "Classification of High-Risk Systems".to_string(),
            text: "A system is high-risk when it is a safety component of critical \
                   infrastructure, including the management of energy and water supply."
                .to_string(),
            keywords: vec![
                "classification".to_string(),
                "high-risk".to_string(),
                "critical infrastructure".to_string(),
            ],
        },
        Article {
            section: "Article 9".to_string(),
            title: "Risk Management System".to_string(),
            text: "A risk management system shall be established, implemented, documented and \
                   maintained as a continuous iterative process across the lifecycle."
                .to_string(),
            keywords: vec!["risk management".to_string(), "lifecycle".to_string()],
        },
        Article {
            section: "Article 13".to_string(),
            title: "Transparency and Provision of Information".to_string(),
            text: "High-risk systems shall be designed so their operation is sufficiently \
                   transparent to enable users to interpret output and use it appropriately."
                .to_string(),
            keywords: vec!["transparency".to_string(), "information".to_string()],
        },
        Article {
            section: "Article 14".to_string(),
            title: "Human Oversight".to_string(),
            text: "High-risk systems shall be designed so they can be effectively overseen by \
                   natural persons, including the ability to intervene or interrupt operation."
                .to_string(),
            keywords: vec![
                "human oversight".to_string(),
                "intervention".to_string(),
                "interrupt".to_string(),
            ],
        },
        Article {
            section: "Article 52".to_string(),
            title: "Transparency Obligations".to_string(),
            text: "Persons interacting with an automated system shall be informed they are \
                   interacting with a system unless obvious from context."
                .to_string(),
            keywords: vec!["transparency".to_string(), "disclosure".to_string()],
        },
        Article {
            section: "Article 71".to_string(),
            title: "Auditing and Record Keeping".to_string(),
            text: "Providers shall keep logs automatically generated by high-risk systems to \
                   support post-market auditing of decisions."
                .to_string(),
            keywords: vec!["auditing".to_string(), "records".to_string(), "logs".to_string()],
        },
    ]
}
