//! Category classifier: TF-IDF features over the complaint corpus with a
//! multinomial logistic-regression head.
//!
//! Training happens offline from a labeled CSV; the fitted vectorizer and
//! weights are serialized together as one JSON artifact so inference never
//! needs the corpus. The artifact is loaded at most once per process via
//! [`ModelHandle`] and is immutable afterwards, so concurrent predictions
//! need no coordination.
//!
//! Failure policy is split by context: the training/offline path treats a
//! missing or corrupt artifact as fatal, while the serving path degrades
//! to the Administration category.

use crate::error::{RedressError, Result};
use crate::types::Category;
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, info, warn};

/// Category emitted on the serving path when no model is available.
pub const FALLBACK_CATEGORY: Category = Category::Administration;

/// English function words excluded from the feature space.
const ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any", "are",
    "as", "at", "be", "because", "been", "before", "being", "below", "between", "both", "but",
    "by", "can", "cannot", "could", "did", "do", "does", "doing", "down", "during", "each",
    "few", "for", "from", "further", "had", "has", "have", "having", "he", "her", "here",
    "hers", "herself", "him", "himself", "his", "how", "i", "if", "in", "into", "is", "it",
    "its", "itself", "just", "me", "more", "most", "my", "myself", "no", "nor", "not", "now",
    "of", "off", "on", "once", "only", "or", "other", "our", "ours", "ourselves", "out",
    "over", "own", "same", "she", "should", "so", "some", "such", "than", "that", "the",
    "their", "theirs", "them", "themselves", "then", "there", "these", "they", "this",
    "those", "through", "too", "under", "until", "up", "very", "was", "we", "were", "what",
    "when", "where", "which", "while", "who", "whom", "why", "will", "with", "would", "you",
    "your", "yours", "yourself", "yourselves",
];

/// One labeled training example.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingExample {
    pub text: String,
    pub label: String,
}

/// Knobs for the gradient-descent fit.
#[derive(Debug, Clone, Copy)]
pub struct TrainOptions {
    /// Iteration cap; high enough to converge on typical corpus sizes.
    pub max_iterations: usize,
    pub learning_rate: f64,
}

impl Default for TrainOptions {
    fn default() -> Self {
        Self {
            max_iterations: 1000,
            learning_rate: 0.5,
        }
    }
}

fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.len() >= 2 && !ENGLISH_STOP_WORDS.contains(t))
        .map(str::to_string)
        .collect()
}

/// Frozen TF-IDF vocabulary and document frequencies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
}

impl Vectorizer {
    /// Fit vocabulary and smoothed IDF over tokenized documents.
    fn fit(documents: &[Vec<String>]) -> Self {
        let mut vocabulary: HashMap<String, usize> = HashMap::new();
        let mut document_frequency: Vec<usize> = Vec::new();

        for tokens in documents {
            let mut seen: Vec<usize> = Vec::new();
            for token in tokens {
                let index = match vocabulary.get(token) {
                    Some(&index) => index,
                    None => {
                        let index = vocabulary.len();
                        vocabulary.insert(token.clone(), index);
                        document_frequency.push(0);
                        index
                    }
                };
                if !seen.contains(&index) {
                    seen.push(index);
                    document_frequency[index] += 1;
                }
            }
        }

        let n_docs = documents.len() as f64;
        let idf = document_frequency
            .iter()
            .map(|&df| ((1.0 + n_docs) / (1.0 + df as f64)).ln() + 1.0)
            .collect();

        Self { vocabulary, idf }
    }

    /// Sparse L2-normalized TF-IDF row for one document. Tokens outside
    /// the frozen vocabulary are ignored.
    fn transform(&self, tokens: &[String]) -> Vec<(usize, f64)> {
        let mut term_counts: HashMap<usize, f64> = HashMap::new();
        for token in tokens {
            if let Some(&index) = self.vocabulary.get(token) {
                *term_counts.entry(index).or_insert(0.0) += 1.0;
            }
        }

        let mut row: Vec<(usize, f64)> = term_counts
            .into_iter()
            .map(|(index, tf)| (index, tf * self.idf[index]))
            .collect();

        let norm: f64 = row.iter().map(|(_, v)| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, v) in row.iter_mut() {
                *v /= norm;
            }
        }
        row.sort_by_key(|&(index, _)| index);
        row
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }
}

/// Serialized classifier artifact: vectorizer + weights + label list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainedModel {
    vectorizer: Vectorizer,
    labels: Vec<String>,
    /// Per-class weight rows over the vectorizer's feature space.
    weights: Vec<Vec<f64>>,
    bias: Vec<f64>,
}

impl TrainedModel {
    /// Fit the full pipeline on labeled examples.
    pub fn train(examples: &[TrainingExample], options: TrainOptions) -> Result<Self> {
        if examples.is_empty() {
            return Err(RedressError::Training("no training examples".to_string()));
        }

        let documents: Vec<Vec<String>> = examples.iter().map(|e| tokenize(&e.text)).collect();
        let vectorizer = Vectorizer::fit(&documents);
        if vectorizer.vocabulary_size() == 0 {
            return Err(RedressError::Training(
                "training corpus has no usable tokens".to_string(),
            ));
        }

        let mut labels: Vec<String> = Vec::new();
        let targets: Vec<usize> = examples
            .iter()
            .map(|e| match labels.iter().position(|l| l == &e.label) {
                Some(index) => index,
                None => {
                    labels.push(e.label.clone());
                    labels.len() - 1
                }
            })
            .collect();

        let rows: Vec<Vec<(usize, f64)>> =
            documents.iter().map(|d| vectorizer.transform(d)).collect();

        let n_classes = labels.len();
        let n_features = vectorizer.vocabulary_size();
        let n_docs = rows.len() as f64;
        let mut weights = vec![vec![0.0; n_features]; n_classes];
        let mut bias = vec![0.0; n_classes];

        info!(
            "Training classifier: {} examples, {} classes, {} features, cap {} iterations",
            examples.len(),
            n_classes,
            n_features,
            options.max_iterations
        );

        let mut previous_loss = f64::INFINITY;
        for iteration in 0..options.max_iterations {
            let mut weight_grad = vec![vec![0.0; n_features]; n_classes];
            let mut bias_grad = vec![0.0; n_classes];
            let mut loss = 0.0;

            for (row, &target) in rows.iter().zip(&targets) {
                let probabilities = softmax(&scores(row, &weights, &bias));
                loss -= probabilities[target].max(1e-12).ln();

                for class in 0..n_classes {
                    let delta = probabilities[class] - if class == target { 1.0 } else { 0.0 };
                    bias_grad[class] += delta;
                    for &(index, value) in row {
                        weight_grad[class][index] += delta * value;
                    }
                }
            }

            for class in 0..n_classes {
                bias[class] -= options.learning_rate * bias_grad[class] / n_docs;
                for index in 0..n_features {
                    weights[class][index] -=
                        options.learning_rate * weight_grad[class][index] / n_docs;
                }
            }

            let loss = loss / n_docs;
            if (previous_loss - loss).abs() < 1e-7 {
                debug!("Converged after {} iterations (loss {:.6})", iteration + 1, loss);
                break;
            }
            previous_loss = loss;
        }

        Ok(Self {
            vectorizer,
            labels,
            weights,
            bias,
        })
    }

    /// Predict the single highest-probability category for `text`.
    pub fn predict(&self, text: &str) -> Category {
        Category::from_label(&self.predict_label(text))
    }

    /// Raw label prediction, exposed for evaluation tooling.
    pub fn predict_label(&self, text: &str) -> String {
        let row = self.vectorizer.transform(&tokenize(text));
        let scores = scores(&row, &self.weights, &self.bias);
        let best = scores
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(index, _)| index)
            .unwrap_or(0);
        self.labels[best].clone()
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Serialize the whole artifact as one JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string(self)?;
        fs::write(path, raw)?;
        info!("Model artifact saved to {}", path.display());
        Ok(())
    }

    /// Load an artifact. Missing or corrupt files are hard errors here;
    /// serving callers go through [`ModelHandle::predict_or_default`].
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|e| {
            RedressError::ModelUnavailable(format!("{}: {e}", path.display()))
        })?;
        serde_json::from_str(&raw)
            .map_err(|e| RedressError::ModelUnavailable(format!("{}: {e}", path.display())))
    }
}

fn scores(row: &[(usize, f64)], weights: &[Vec<f64>], bias: &[f64]) -> Vec<f64> {
    weights
        .iter()
        .zip(bias)
        .map(|(class_weights, b)| {
            row.iter()
                .map(|&(index, value)| class_weights[index] * value)
                .sum::<f64>()
                + b
        })
        .collect()
}

fn softmax(scores: &[f64]) -> Vec<f64> {
    let max = scores.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}

/// Process-wide memoized model loader.
///
/// The artifact is read at most once per handle lifetime regardless of how
/// many threads call in; after that every `predict_or_default` runs against
/// the same immutable model.
#[derive(Debug)]
pub struct ModelHandle {
    path: PathBuf,
    cell: OnceCell<Option<TrainedModel>>,
    load_count: AtomicUsize,
}

impl ModelHandle {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            cell: OnceCell::new(),
            load_count: AtomicUsize::new(0),
        }
    }

    /// The loaded model, or `None` when the artifact is unavailable.
    pub fn model(&self) -> Option<&TrainedModel> {
        self.cell
            .get_or_init(|| {
                self.load_count.fetch_add(1, Ordering::SeqCst);
                match TrainedModel::load(&self.path) {
                    Ok(model) => {
                        info!(
                            "Model loaded from {} ({} labels)",
                            self.path.display(),
                            model.labels().len()
                        );
                        Some(model)
                    }
                    Err(err) => {
                        warn!("Model unavailable ({err}), serving fallback category");
                        None
                    }
                }
            })
            .as_ref()
    }

    /// Offline/training semantics: a missing artifact is fatal.
    pub fn require(&self) -> Result<&TrainedModel> {
        self.model().ok_or_else(|| {
            RedressError::ModelUnavailable(self.path.display().to_string())
        })
    }

    /// Serving semantics: degrade to the fallback category instead of
    /// failing the request.
    pub fn predict_or_default(&self, text: &str) -> Category {
        match self.model() {
            Some(model) => model.predict(text),
            None => FALLBACK_CATEGORY,
        }
    }

    /// How many times the artifact load actually ran.
    pub fn load_count(&self) -> usize {
        self.load_count.load(Ordering::SeqCst)
    }
}

/// Read `text,label` training rows from a CSV file with a header line.
/// Quoted fields with embedded commas and doubled quotes are handled.
pub fn load_training_csv(path: &Path) -> Result<Vec<TrainingExample>> {
    let raw = fs::read_to_string(path)?;
    let mut lines = raw.lines();
    let Some(_header) = lines.next() else {
        return Err(RedressError::Training(format!(
            "{}: empty training file",
            path.display()
        )));
    };

    let mut examples = Vec::new();
    for (line_number, line) in lines.enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let fields = split_csv_line(line);
        if fields.len() < 2 {
            return Err(RedressError::Training(format!(
                "{}: line {}: expected text,label",
                path.display(),
                line_number + 2
            )));
        }
        examples.push(TrainingExample {
            text: fields[0].clone(),
            label: fields[1].clone(),
        });
    }
    Ok(examples)
}

fn split_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' => in_quotes = true,
            ',' if !in_quotes => {
                fields.push(field.trim().to_string());
                field = String::new();
            }
            _ => field.push(c),
        }
    }
    fields.push(field.trim().to_string());
    fields
}
