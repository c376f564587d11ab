//! Command implementations for redressctl.

use anyhow::{bail, Context, Result};
use owo_colors::OwoColorize;
use redress_core::classifier::{load_training_csv, TrainOptions, TrainedModel};
use redress_core::config::Config;
use redress_core::department::contact_for;
use redress_core::pipeline::Pipeline;
use redress_core::report;
use redress_core::store::ComplaintStore;
use redress_core::types::{ComplaintInput, DecisionRecord, PriorityLevel};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Train the classifier from a labeled CSV and save the artifact.
pub fn train(data: &Path, out: Option<PathBuf>) -> Result<()> {
    let config = Config::load();
    let out = out.unwrap_or(config.model_path);

    let examples = load_training_csv(data)
        .with_context(|| format!("reading training data from {}", data.display()))?;

    let mut label_counts: BTreeMap<&str, usize> = BTreeMap::new();
    for example in &examples {
        *label_counts.entry(example.label.as_str()).or_insert(0) += 1;
    }

    println!("Training on {} examples:", examples.len());
    for (label, count) in &label_counts {
        println!("  {label:<16} {count}");
    }

    let options = TrainOptions {
        max_iterations: config.max_train_iterations,
        learning_rate: config.learning_rate,
    };
    let model = TrainedModel::train(&examples, options).context("training classifier")?;
    model.save(&out).context("saving model artifact")?;

    println!(
        "{} model with {} labels saved to {}",
        "OK".green().bold(),
        model.labels().len(),
        out.display()
    );
    Ok(())
}

/// Run one complaint through the pipeline, store it, and write its report.
pub fn submit(name: String, email: String, text: String) -> Result<()> {
    let config = Config::load();
    let pipeline = Pipeline::from_config(&config);
    let store = ComplaintStore::open_at(&config.db_path)?;

    let record = pipeline.process(&ComplaintInput { name, email, text })?;
    store.add(&record)?;
    let report_path = report::write_report(&record, &config.reports_dir)?;

    print_record(&record);
    println!("\nReport: {}", report_path.display());
    Ok(())
}

/// Show one stored complaint.
pub fn show(ticket_id: &str, json: bool) -> Result<()> {
    let config = Config::load();
    let store = ComplaintStore::open_at(&config.db_path)?;

    match store.get_by_id(ticket_id)? {
        Some(record) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&record)?);
            } else {
                print_record(&record);
            }
            Ok(())
        }
        None => bail!("no complaint with ticket id {ticket_id}"),
    }
}

/// List stored complaints, most urgent first.
pub fn list(priority: Option<String>) -> Result<()> {
    let config = Config::load();
    let store = ComplaintStore::open_at(&config.db_path)?;

    let filter = match priority {
        Some(raw) => match PriorityLevel::parse(&raw) {
            Some(level) => Some(level),
            None => bail!("unknown priority level: {raw}"),
        },
        None => None,
    };

    let mut records = store.get_all()?;
    records.sort_by_key(|r| r.priority);
    if let Some(level) = filter {
        records.retain(|r| r.priority == level);
    }

    if records.is_empty() {
        println!("No complaints stored.");
        return Ok(());
    }

    for record in &records {
        println!(
            "{}  {}  {:<14}  {}",
            record.ticket_id,
            colored_priority(record.priority),
            record.category.label(),
            truncate(&record.complaint_text, 48),
        );
    }
    Ok(())
}

/// Regenerate the report document for a stored ticket.
pub fn report(ticket_id: &str) -> Result<()> {
    let config = Config::load();
    let store = ComplaintStore::open_at(&config.db_path)?;

    let Some(record) = store.get_by_id(ticket_id)? else {
        bail!("no complaint with ticket id {ticket_id}");
    };
    let path = report::write_report(&record, &config.reports_dir)?;
    println!("Report written to {}", path.display());
    Ok(())
}

fn print_record(record: &DecisionRecord) {
    let contact = contact_for(&record.department);

    println!("{}", "Analysis Result".bold());
    println!("  Ticket ID   : {}", record.ticket_id.bold());
    println!("  Category    : {}", record.category);
    println!("  Priority    : {}", colored_priority(record.priority));
    println!("  Department  : {}", record.department);
    println!("  Resolution  : {}", record.resolution_estimate);
    println!(
        "  Sentiment   : {} ({:.3})",
        record.sentiment.label, record.sentiment.compound
    );
    println!("  Keywords    : {}", record.keywords.join(", "));
    println!("  Status      : {}", record.status);
    println!("  Contact     : {} | {}", contact.phone, contact.email);
}

fn colored_priority(priority: PriorityLevel) -> String {
    match priority {
        PriorityLevel::Critical => priority.as_str().red().bold().to_string(),
        PriorityLevel::High => priority.as_str().red().to_string(),
        PriorityLevel::Medium => priority.as_str().yellow().to_string(),
        PriorityLevel::Low => priority.as_str().green().to_string(),
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{cut}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_keeps_short_text() {
        assert_eq!(truncate("short", 10), "short");
    }

    #[test]
    fn truncate_appends_ellipsis() {
        let long = "a complaint that goes on and on about everything";
        let out = truncate(long, 20);
        assert!(out.ends_with("..."));
        assert!(out.chars().count() <= 20);
    }
}
