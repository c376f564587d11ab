//! Pipeline orchestrator.
//!
//! Composes the classifier and the rule engines into one decision record
//! per submitted complaint. Stages run strictly in order:
//! Idle -> Validating -> Classifying -> Enriching -> Assembled -> Handoff.
//! Validation failures halt before the classifier is ever invoked; after
//! Assembled the record is immutable and ownership passes to the caller,
//! which hands it to the store and report collaborators.

use crate::classifier::ModelHandle;
use crate::config::Config;
use crate::error::{RedressError, Result};
use crate::sentiment::SentimentAnalyzer;
use crate::types::{ComplaintInput, DecisionRecord, STATUS_PENDING};
use crate::{department, keywords, priority, resolution, ticket_id};
use chrono::Utc;
use tracing::{debug, info};

/// Processing stage, for tracing and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    Validating,
    Classifying,
    Enriching,
    Assembled,
    Handoff,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Idle => "idle",
            Self::Validating => "validating",
            Self::Classifying => "classifying",
            Self::Enriching => "enriching",
            Self::Assembled => "assembled",
            Self::Handoff => "handoff",
        };
        write!(f, "{s}")
    }
}

/// One-per-process pipeline holding the loaded model and lexicon.
///
/// `process` takes `&self` and shares no mutable state, so concurrent
/// submissions are safe.
pub struct Pipeline {
    model: ModelHandle,
    sentiment: SentimentAnalyzer,
    keyword_top_n: usize,
}

impl Pipeline {
    pub fn new(model: ModelHandle, sentiment: SentimentAnalyzer, keyword_top_n: usize) -> Self {
        Self {
            model,
            sentiment,
            keyword_top_n,
        }
    }

    /// Wire up from configuration: model handle on the configured artifact
    /// path, sentiment lexicon self-initialized at its configured path.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            ModelHandle::new(config.model_path.clone()),
            SentimentAnalyzer::load(&config.lexicon_path),
            config.keyword_top_n,
        )
    }

    pub fn model(&self) -> &ModelHandle {
        &self.model
    }

    /// Run one complaint through the full pipeline.
    pub fn process(&self, input: &ComplaintInput) -> Result<DecisionRecord> {
        advance(Stage::Idle, Stage::Validating);
        validate(input)?;

        advance(Stage::Validating, Stage::Classifying);
        let category = self.model.predict_or_default(&input.text);

        advance(Stage::Classifying, Stage::Enriching);
        let priority = priority::classify(&input.text);
        let department = department::department_for(&category).to_string();
        let sentiment = self.sentiment.analyze(&input.text);
        let keywords = keywords::extract(&input.text, self.keyword_top_n);
        // Resolution needs both category and priority already computed.
        let resolution_estimate = resolution::estimate(&category, priority);
        let ticket_id = ticket_id::generate();

        advance(Stage::Enriching, Stage::Assembled);
        let record = DecisionRecord {
            ticket_id,
            citizen_name: input.name.trim().to_string(),
            citizen_email: input.email.trim().to_string(),
            complaint_text: input.text.trim().to_string(),
            category,
            priority,
            department,
            sentiment,
            keywords,
            resolution_estimate,
            submitted_at: Utc::now(),
            status: STATUS_PENDING.to_string(),
        };

        advance(Stage::Assembled, Stage::Handoff);
        info!(
            "Complaint {} -> {} / {} / {}",
            record.ticket_id, record.category, record.priority, record.department
        );
        Ok(record)
    }
}

fn advance(from: Stage, to: Stage) {
    debug!("Pipeline stage: {from} -> {to}");
}

fn validate(input: &ComplaintInput) -> Result<()> {
    if input.name.trim().is_empty() {
        return Err(RedressError::Validation("name is required".to_string()));
    }
    if input.email.trim().is_empty() {
        return Err(RedressError::Validation("email is required".to_string()));
    }
    if input.text.trim().is_empty() {
        return Err(RedressError::Validation(
            "complaint text is required".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Category, PriorityLevel};

    fn pipeline_without_model() -> Pipeline {
        Pipeline::new(
            ModelHandle::new("/nonexistent/classifier.json"),
            SentimentAnalyzer::embedded(),
            5,
        )
    }

    fn input(text: &str) -> ComplaintInput {
        ComplaintInput {
            name: "Asha Rao".to_string(),
            email: "asha@example.com".to_string(),
            text: text.to_string(),
        }
    }

    #[test]
    fn empty_complaint_halts_before_classifying() {
        let pipeline = pipeline_without_model();
        let err = pipeline.process(&input("   ")).unwrap_err();
        assert!(matches!(err, RedressError::Validation(_)));
        // The classifier was never consulted: no load happened.
        assert_eq!(pipeline.model().load_count(), 0);
    }

    #[test]
    fn missing_identity_fields_are_rejected() {
        let pipeline = pipeline_without_model();
        let mut no_name = input("Sewage overflow on the main road");
        no_name.name = String::new();
        assert!(pipeline.process(&no_name).is_err());

        let mut no_email = input("Sewage overflow on the main road");
        no_email.email = "  ".to_string();
        assert!(pipeline.process(&no_email).is_err());
    }

    #[test]
    fn record_is_fully_populated() {
        let pipeline = pipeline_without_model();
        let record = pipeline
            .process(&input("Sewage overflow near the hospital is causing a terrible smell"))
            .unwrap();

        // No model on disk: serving path degrades to the fallback category.
        assert_eq!(record.category, Category::Administration);
        assert_eq!(record.priority, PriorityLevel::High); // "sewage", "hospital"
        assert_eq!(record.department, "District Administration Office");
        assert_eq!(record.status, "Pending");
        assert!(!record.keywords.is_empty());
        assert!(record.ticket_id.starts_with("GRV-"));
        assert!(!record.resolution_estimate.is_empty());
    }

    #[test]
    fn deterministic_fields_repeat_across_runs() {
        let pipeline = pipeline_without_model();
        let text = "Street light broken and the road is unsafe at night";
        let first = pipeline.process(&input(text)).unwrap();
        let second = pipeline.process(&input(text)).unwrap();

        assert_eq!(first.category, second.category);
        assert_eq!(first.priority, second.priority);
        assert_eq!(first.department, second.department);
        assert_eq!(first.resolution_estimate, second.resolution_estimate);
        assert_eq!(first.keywords, second.keywords);
        assert_eq!(first.sentiment, second.sentiment);
        // Only the ticket id and timestamp may differ.
    }

    #[test]
    fn stage_display_names() {
        assert_eq!(Stage::Validating.to_string(), "validating");
        assert_eq!(Stage::Handoff.to_string(), "handoff");
    }
}
