//! Grievance report documents.
//!
//! Reporting collaborator: renders one decision record to a plain-text
//! document under the configured reports directory and returns its path.
//! Layout is deliberately simple; the core contract is only
//! "produce a document for this ticket".

use crate::department::contact_for;
use crate::error::Result;
use crate::types::DecisionRecord;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

const HEADER_TITLE: &str = "GRIEVANCE REDRESSAL SYSTEM";
const FOOTER: &str = "National Redressal Framework";

/// Write the report document for `record`, returning the file path.
pub fn write_report(record: &DecisionRecord, reports_dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(reports_dir)?;
    let path = reports_dir.join(format!("Grievance_{}.txt", record.ticket_id));
    fs::write(&path, render(record))?;
    info!("Report written to {}", path.display());
    Ok(path)
}

/// Render the document body.
pub fn render(record: &DecisionRecord) -> String {
    let contact = contact_for(&record.department);
    let rule = "=".repeat(64);

    let mut doc = String::new();
    doc.push_str(&rule);
    doc.push('\n');
    doc.push_str(&format!("{HEADER_TITLE:^64}\n"));
    doc.push_str(&rule);
    doc.push_str("\n\n");

    doc.push_str(&format!("Ticket ID           : {}\n", record.ticket_id));
    doc.push_str(&format!(
        "Submitted At        : {}\n",
        record.submitted_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    doc.push_str(&format!("Status              : {}\n\n", record.status));

    doc.push_str(&format!("Citizen Name        : {}\n", record.citizen_name));
    doc.push_str(&format!("Citizen Email       : {}\n\n", record.citizen_email));

    doc.push_str(&format!("Category            : {}\n", record.category));
    doc.push_str(&format!("Priority            : {}\n", record.priority));
    doc.push_str(&format!("Assigned Department : {}\n", record.department));
    doc.push_str(&format!(
        "Estimated Resolution: {}\n",
        record.resolution_estimate
    ));
    doc.push_str(&format!(
        "Sentiment           : {} ({:.3})\n",
        record.sentiment.label, record.sentiment.compound
    ));
    doc.push_str(&format!(
        "Keywords            : {}\n\n",
        if record.keywords.is_empty() {
            "-".to_string()
        } else {
            record.keywords.join(", ")
        }
    ));

    doc.push_str("Complaint:\n");
    doc.push_str(&format!("  {}\n\n", record.complaint_text));

    doc.push_str("Department Contact:\n");
    doc.push_str(&format!("  Phone        : {}\n", contact.phone));
    doc.push_str(&format!("  Email        : {}\n", contact.email));
    doc.push_str(&format!("  Office Hours : {}\n\n", contact.office_hours));

    doc.push_str(&rule);
    doc.push('\n');
    doc.push_str(&format!("{FOOTER:^64}\n"));
    doc.push_str(&rule);
    doc.push('\n');
    doc
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        Category, PriorityLevel, SentimentLabel, SentimentResult, STATUS_PENDING,
    };
    use chrono::Utc;

    fn sample() -> DecisionRecord {
        DecisionRecord {
            ticket_id: "GRV-20260101120000-1234".to_string(),
            citizen_name: "Asha Rao".to_string(),
            citizen_email: "asha@example.com".to_string(),
            complaint_text: "Sewage overflow on the main road".to_string(),
            category: Category::Sanitation,
            priority: PriorityLevel::High,
            department: "Municipal Sanitation Department".to_string(),
            sentiment: SentimentResult {
                label: SentimentLabel::Negative,
                compound: -0.51,
                positive: 0.0,
                negative: 0.4,
                neutral: 0.6,
            },
            keywords: vec!["sewage".to_string(), "overflow".to_string()],
            resolution_estimate: "12 hours".to_string(),
            submitted_at: Utc::now(),
            status: STATUS_PENDING.to_string(),
        }
    }

    #[test]
    fn render_includes_every_decision_field() {
        let record = sample();
        let doc = render(&record);
        assert!(doc.contains(&record.ticket_id));
        assert!(doc.contains("Sanitation"));
        assert!(doc.contains("High"));
        assert!(doc.contains("Municipal Sanitation Department"));
        assert!(doc.contains("12 hours"));
        assert!(doc.contains("sewage, overflow"));
        assert!(doc.contains("sanitation@municipality.gov.in"));
    }

    #[test]
    fn write_report_creates_file_named_by_ticket() {
        let dir = tempfile::tempdir().unwrap();
        let record = sample();
        let path = write_report(&record, dir.path()).unwrap();
        assert!(path.ends_with("Grievance_GRV-20260101120000-1234.txt"));
        assert!(path.exists());
    }

    #[test]
    fn empty_keywords_render_as_dash() {
        let mut record = sample();
        record.keywords.clear();
        let doc = render(&record);
        assert!(doc.contains("Keywords            : -"));
    }
}
