//! Core types for the grievance decision pipeline.
//!
//! Every submitted complaint becomes one immutable [`DecisionRecord`]
//! assembled by the pipeline orchestrator and handed to the store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Status a record is created with; downstream case management owns
/// later transitions.
pub const STATUS_PENDING: &str = "Pending";

/// Complaint subject area assigned by the trained classifier.
///
/// The label set is closed for the shipped training corpus, but the
/// classifier may emit labels outside it when retrained; those round-trip
/// through `Other` instead of failing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum Category {
    Sanitation,
    Utilities,
    Healthcare,
    PublicSafety,
    Infrastructure,
    Administration,
    /// Label outside the known set (e.g. "General" from a retrained model).
    Other(String),
}

impl Category {
    /// Parse a classifier label. Unknown labels are preserved, not rejected.
    pub fn from_label(label: &str) -> Self {
        match label {
            "Sanitation" => Self::Sanitation,
            "Utilities" => Self::Utilities,
            "Healthcare" => Self::Healthcare,
            "Public Safety" => Self::PublicSafety,
            "Infrastructure" => Self::Infrastructure,
            "Administration" => Self::Administration,
            other => Self::Other(other.to_string()),
        }
    }

    /// Display label, matching the training-corpus spelling.
    pub fn label(&self) -> &str {
        match self {
            Self::Sanitation => "Sanitation",
            Self::Utilities => "Utilities",
            Self::Healthcare => "Healthcare",
            Self::PublicSafety => "Public Safety",
            Self::Infrastructure => "Infrastructure",
            Self::Administration => "Administration",
            Self::Other(label) => label,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl From<String> for Category {
    fn from(label: String) -> Self {
        Self::from_label(&label)
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.label().to_string()
    }
}

/// Urgency tier assigned by the priority keyword engine.
///
/// Ordering puts the most urgent tier first, so sorting a batch of
/// records by priority surfaces critical complaints at the top.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum PriorityLevel {
    /// Life-threatening or immediate danger.
    Critical,
    /// Health/safety risk or major disruption.
    High,
    /// Service quality or maintenance issue.
    Medium,
    /// Nothing urgent matched.
    #[default]
    Low,
}

impl PriorityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "Critical",
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "critical" => Some(Self::Critical),
            "high" => Some(Self::High),
            "medium" => Some(Self::Medium),
            "low" => Some(Self::Low),
            _ => None,
        }
    }
}

impl std::fmt::Display for PriorityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Polarity label derived from the compound sentiment score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SentimentLabel {
    Positive,
    #[default]
    Neutral,
    Negative,
}

impl SentimentLabel {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "positive" => Some(Self::Positive),
            "neutral" => Some(Self::Neutral),
            "negative" => Some(Self::Negative),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "Positive",
            Self::Neutral => "Neutral",
            Self::Negative => "Negative",
        }
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of lexicon-based sentiment scoring for one complaint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    pub label: SentimentLabel,
    /// Aggregate polarity in [-1.0, 1.0], 3-decimal rounded.
    pub compound: f64,
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
}

impl SentimentResult {
    /// Neutral zero result used whenever scoring cannot run.
    pub fn neutral() -> Self {
        Self {
            label: SentimentLabel::Neutral,
            compound: 0.0,
            positive: 0.0,
            negative: 0.0,
            neutral: 0.0,
        }
    }
}

impl Default for SentimentResult {
    fn default() -> Self {
        Self::neutral()
    }
}

/// Identity fields accompanying a complaint submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplaintInput {
    pub name: String,
    pub email: String,
    pub text: String,
}

/// The immutable aggregate produced for one processed complaint.
///
/// Constructed once by the orchestrator; after hand-off the store owns the
/// persisted lifecycle. Only `status` is intended to change downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionRecord {
    /// `GRV-<14-digit-timestamp>-<4-digit-random>` lookup key.
    pub ticket_id: String,
    pub citizen_name: String,
    pub citizen_email: String,
    pub complaint_text: String,
    pub category: Category,
    pub priority: PriorityLevel,
    /// Responsible department, resolved from the category.
    pub department: String,
    pub sentiment: SentimentResult,
    /// Up to N salient terms, most frequent first.
    pub keywords: Vec<String>,
    /// Human-readable duration, e.g. "6 hours" or "3 days".
    pub resolution_estimate: String,
    pub submitted_at: DateTime<Utc>,
    pub status: String,
}
