//! End-to-end pipeline flow tests.
//!
//! Train a small model, run complaints through the full pipeline, and
//! verify the assembled records against the store and report
//! collaborators.

use redress_core::classifier::{ModelHandle, TrainOptions, TrainedModel, TrainingExample};
use redress_core::pipeline::Pipeline;
use redress_core::report;
use redress_core::sentiment::SentimentAnalyzer;
use redress_core::store::ComplaintStore;
use redress_core::types::{Category, ComplaintInput, PriorityLevel};
use redress_core::RedressError;
use std::path::Path;

fn train_model_at(path: &Path) {
    let rows = [
        ("Garbage not collected and waste piling up", "Sanitation"),
        ("Overflowing dustbins and trash on the street", "Sanitation"),
        ("Power outage every evening in our area", "Utilities"),
        ("No water supply since two days", "Utilities"),
        ("Ambulance delayed and clinic understaffed", "Healthcare"),
        ("Hospital has no doctors on duty", "Healthcare"),
        ("Street crime and theft increasing", "Public Safety"),
        ("No police patrolling after dark", "Public Safety"),
        ("Potholes on the highway causing accidents", "Infrastructure"),
        ("Streetlights broken on the main road", "Infrastructure"),
        ("Ration card application pending for months", "Administration"),
        ("No response to my certificate request", "Administration"),
    ];
    let examples: Vec<TrainingExample> = rows
        .iter()
        .map(|(text, label)| TrainingExample {
            text: text.to_string(),
            label: label.to_string(),
        })
        .collect();
    TrainedModel::train(&examples, TrainOptions::default())
        .unwrap()
        .save(path)
        .unwrap();
}

fn pipeline_at(dir: &Path) -> Pipeline {
    let model_path = dir.join("classifier.json");
    train_model_at(&model_path);
    Pipeline::new(
        ModelHandle::new(model_path),
        SentimentAnalyzer::load(&dir.join("lexicon.tsv")),
        5,
    )
}

fn submission(text: &str) -> ComplaintInput {
    ComplaintInput {
        name: "Ravi Kumar".to_string(),
        email: "ravi@example.com".to_string(),
        text: text.to_string(),
    }
}

#[test]
fn complaint_flows_to_stored_record() {
    let dir = tempfile::tempdir().unwrap();
    let pipeline = pipeline_at(dir.path());
    let store = ComplaintStore::open_at(dir.path().join("complaints.db")).unwrap();

    let record = pipeline
        .process(&submission(
            "Garbage and waste overflowing from dustbins, creating nuisance",
        ))
        .unwrap();

    assert_eq!(record.category, Category::Sanitation);
    assert_eq!(record.priority, PriorityLevel::High); // "overflow" substring
    assert_eq!(record.department, "Municipal Sanitation Department");
    assert_eq!(record.status, "Pending");

    store.add(&record).unwrap();
    let loaded = store.get_by_id(&record.ticket_id).unwrap().unwrap();
    assert_eq!(loaded, record);
}

#[test]
fn report_document_is_produced_for_stored_ticket() {
    let dir = tempfile::tempdir().unwrap();
    let pipeline = pipeline_at(dir.path());

    let record = pipeline
        .process(&submission("No water supply since two days in our colony"))
        .unwrap();
    let path = report::write_report(&record, &dir.path().join("reports")).unwrap();

    let doc = std::fs::read_to_string(path).unwrap();
    assert!(doc.contains(&record.ticket_id));
    assert!(doc.contains(record.category.label()));
}

#[test]
fn validation_failure_never_touches_the_model() {
    let dir = tempfile::tempdir().unwrap();
    let pipeline = pipeline_at(dir.path());

    let err = pipeline.process(&submission("   ")).unwrap_err();
    assert!(matches!(err, RedressError::Validation(_)));
    assert_eq!(pipeline.model().load_count(), 0);
}

#[test]
fn concurrent_submissions_share_one_model_load() {
    let dir = tempfile::tempdir().unwrap();
    let pipeline = pipeline_at(dir.path());

    std::thread::scope(|scope| {
        for _ in 0..8 {
            scope.spawn(|| {
                for _ in 0..5 {
                    let record = pipeline
                        .process(&submission("Streetlights broken on the main road"))
                        .unwrap();
                    assert_eq!(record.category, Category::Infrastructure);
                }
            });
        }
    });

    assert_eq!(pipeline.model().load_count(), 1);
}

#[test]
fn same_text_yields_identical_decision_fields() {
    let dir = tempfile::tempdir().unwrap();
    let pipeline = pipeline_at(dir.path());
    let text = "Potholes on the highway causing accidents near the school";

    let first = pipeline.process(&submission(text)).unwrap();
    let second = pipeline.process(&submission(text)).unwrap();

    assert_eq!(first.category, second.category);
    assert_eq!(first.priority, second.priority);
    assert_eq!(first.department, second.department);
    assert_eq!(first.resolution_estimate, second.resolution_estimate);
}

#[test]
fn priority_and_resolution_compose() {
    let dir = tempfile::tempdir().unwrap();
    let pipeline = pipeline_at(dir.path());

    // "fire" puts this in the Critical tier regardless of category.
    let record = pipeline
        .process(&submission("Fire hazard from exposed wiring near the transformer"))
        .unwrap();
    assert_eq!(record.priority, PriorityLevel::Critical);
    // Estimator saw the same category/priority pair the record carries.
    assert_eq!(
        record.resolution_estimate,
        redress_core::resolution::estimate(&record.category, record.priority)
    );
}
