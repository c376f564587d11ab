//! Lexicon-based sentiment scoring.
//!
//! Valence-aware, rule-based scorer in the VADER family: per-token
//! valences from a lexicon, booster words amplifying or dampening the
//! following term, and negations inside a three-token window flipping
//! sign. The compound score is the normalized valence sum; labels use the
//! standard +/-0.05 thresholds.
//!
//! The lexicon lives on disk so retuned valences can ship without a
//! rebuild. On first use the embedded copy is written out (atomic rename,
//! idempotent under racing first calls). Any init or parse failure
//! degrades scoring to the neutral zero result instead of failing the
//! request.

use crate::types::{SentimentLabel, SentimentResult};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Compound score at or above this is Positive.
pub const POSITIVE_THRESHOLD: f64 = 0.05;
/// Compound score at or below this is Negative.
pub const NEGATIVE_THRESHOLD: f64 = -0.05;

/// VADER's normalization constant: compound = sum / sqrt(sum^2 + ALPHA).
const ALPHA: f64 = 15.0;

/// Valence adjustment contributed by a booster word.
const BOOST_STEP: f64 = 0.293;

/// Sign damping applied when a negation flips a valence.
const NEGATION_FACTOR: f64 = -0.74;

/// How many preceding tokens a negation reaches across.
const NEGATION_WINDOW: usize = 3;

/// Embedded valence lexicon, written to disk on first use.
/// Format: one `word<TAB>valence` pair per line, valence in [-4.0, 4.0].
const EMBEDDED_LEXICON: &str = "\
good\t1.9
great\t3.1
excellent\t2.7
amazing\t2.8
wonderful\t2.7
fantastic\t2.6
happy\t2.7
glad\t2.0
pleased\t1.9
satisfied\t2.0
love\t3.2
like\t1.5
thank\t1.5
thanks\t1.9
grateful\t2.3
appreciate\t2.0
helpful\t1.9
kind\t2.4
friendly\t2.2
polite\t1.8
prompt\t1.4
quick\t1.3
fast\t1.2
efficient\t1.8
effective\t1.6
reliable\t1.9
clean\t1.7
safe\t1.8
secure\t1.4
improved\t1.9
improvement\t1.7
better\t1.9
best\t3.2
resolved\t1.4
fixed\t1.2
working\t0.8
smooth\t1.3
comfortable\t1.6
impressed\t2.2
impressive\t2.3
bad\t-2.5
terrible\t-2.1
horrible\t-2.5
awful\t-2.0
disgusting\t-2.4
poor\t-2.1
worst\t-3.1
worse\t-2.1
hate\t-2.7
angry\t-2.3
furious\t-2.7
upset\t-1.6
sad\t-2.1
unhappy\t-1.8
disappointed\t-2.1
disappointing\t-2.2
frustrated\t-2.3
frustrating\t-2.0
annoying\t-1.8
annoyed\t-1.7
irritating\t-1.8
useless\t-1.8
hopeless\t-2.2
helpless\t-2.0
neglected\t-1.9
ignored\t-1.5
rude\t-2.0
unsafe\t-1.9
dangerous\t-2.4
danger\t-2.4
threat\t-2.1
fear\t-2.2
afraid\t-2.2
scared\t-2.2
worried\t-1.6
worry\t-1.6
panic\t-2.4
crisis\t-1.9
emergency\t-1.6
suffering\t-2.4
suffer\t-2.0
pain\t-2.3
painful\t-2.2
sick\t-1.8
disease\t-1.7
infection\t-1.7
death\t-2.9
dead\t-2.4
dying\t-2.6
injured\t-1.9
injury\t-1.8
broken\t-1.6
damaged\t-1.5
destroyed\t-2.4
dirty\t-1.8
filthy\t-2.5
stink\t-1.9
stinking\t-2.0
smelly\t-1.7
leaking\t-1.1
overflowing\t-1.3
blocked\t-1.0
failed\t-2.0
failure\t-2.0
fail\t-1.9
problem\t-1.1
problems\t-1.3
issue\t-0.9
issues\t-1.0
complaint\t-1.0
delayed\t-1.2
delay\t-1.1
slow\t-0.9
pathetic\t-2.4
shame\t-1.9
shameful\t-2.1
disgrace\t-2.2
corrupt\t-2.4
corruption\t-2.3
unbearable\t-2.3
miserable\t-2.4
nightmare\t-2.5
";

/// Words amplifying the following term.
const AMPLIFIERS: &[&str] = &[
    "very",
    "extremely",
    "really",
    "absolutely",
    "completely",
    "highly",
    "incredibly",
    "totally",
    "utterly",
    "so",
];

/// Words dampening the following term.
const DAMPENERS: &[&str] = &["slightly", "somewhat", "barely", "marginally", "hardly", "kinda"];

const NEGATIONS: &[&str] = &[
    "not", "no", "never", "none", "cannot", "cant", "dont", "doesnt", "didnt", "isnt", "wasnt",
    "wont", "wouldnt", "shouldnt", "couldnt", "hasnt", "havent", "neither", "nor", "nothing",
    "nobody", "without",
];

/// Parsed valence lexicon.
#[derive(Debug, Clone)]
pub struct Lexicon {
    valences: HashMap<String, f64>,
}

impl Lexicon {
    fn parse(raw: &str) -> Self {
        let mut valences = HashMap::new();
        for line in raw.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut parts = line.split('\t');
            let (Some(word), Some(valence)) = (parts.next(), parts.next()) else {
                continue;
            };
            if let Ok(valence) = valence.parse::<f64>() {
                valences.insert(word.to_string(), valence);
            }
        }
        Self { valences }
    }

    /// Built-in lexicon, used directly by tests and as the init payload.
    pub fn embedded() -> Self {
        Self::parse(EMBEDDED_LEXICON)
    }

    pub fn len(&self) -> usize {
        self.valences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.valences.is_empty()
    }

    fn valence(&self, word: &str) -> Option<f64> {
        self.valences.get(word).copied()
    }
}

/// Write the embedded lexicon to `path` if absent.
///
/// Temp-file-then-rename keeps racing first calls from observing a
/// partially written lexicon.
pub fn ensure_lexicon(path: &Path) -> std::io::Result<()> {
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let tmp = path.with_extension("tsv.tmp");
    fs::write(&tmp, EMBEDDED_LEXICON)?;
    match fs::rename(&tmp, path) {
        Ok(()) => Ok(()),
        // A concurrent initializer may have won the rename.
        Err(_) if path.exists() => {
            let _ = fs::remove_file(&tmp);
            Ok(())
        }
        Err(err) => Err(err),
    }
}

/// Sentiment scorer holding a loaded lexicon.
///
/// Constructed once per process alongside the pipeline; `analyze` is pure
/// and safe to call concurrently.
#[derive(Debug, Clone)]
pub struct SentimentAnalyzer {
    lexicon: Option<Lexicon>,
}

impl SentimentAnalyzer {
    /// Load the lexicon from `path`, initializing the file on first use.
    /// Never fails: a missing or unreadable lexicon degrades every
    /// `analyze` call to the neutral result.
    pub fn load(path: &Path) -> Self {
        if let Err(err) = ensure_lexicon(path) {
            warn!("Sentiment lexicon init failed ({err}), degrading to neutral");
            return Self { lexicon: None };
        }
        match fs::read_to_string(path) {
            Ok(raw) => {
                let lexicon = Lexicon::parse(&raw);
                debug!("Sentiment lexicon loaded: {} entries", lexicon.len());
                Self {
                    lexicon: Some(lexicon),
                }
            }
            Err(err) => {
                warn!("Sentiment lexicon unreadable ({err}), degrading to neutral");
                Self { lexicon: None }
            }
        }
    }

    /// Analyzer backed by the embedded lexicon, no disk involved.
    pub fn embedded() -> Self {
        Self {
            lexicon: Some(Lexicon::embedded()),
        }
    }

    /// Score one text. Blank input and the degraded (no-lexicon) state
    /// both yield the neutral zero result.
    pub fn analyze(&self, text: &str) -> SentimentResult {
        if text.trim().is_empty() {
            return SentimentResult::neutral();
        }
        let Some(lexicon) = &self.lexicon else {
            return SentimentResult::neutral();
        };

        let tokens: Vec<String> = text
            .to_lowercase()
            .split(|c: char| !c.is_alphabetic())
            .filter(|t| !t.is_empty())
            .map(|t| t.to_string())
            .collect();
        if tokens.is_empty() {
            return SentimentResult::neutral();
        }

        let mut pos_sum = 0.0;
        let mut neg_sum = 0.0;
        let mut neu_count = 0usize;
        let mut total = 0.0;

        for (i, token) in tokens.iter().enumerate() {
            let Some(mut valence) = lexicon.valence(token) else {
                if !is_modifier(token) {
                    neu_count += 1;
                }
                continue;
            };

            // Booster immediately before the term scales its valence.
            if i > 0 {
                let prev = tokens[i - 1].as_str();
                if AMPLIFIERS.contains(&prev) {
                    valence += BOOST_STEP * valence.signum();
                } else if DAMPENERS.contains(&prev) {
                    valence -= BOOST_STEP * valence.signum();
                }
            }

            // Negation anywhere in the preceding window flips the sign.
            let window_start = i.saturating_sub(NEGATION_WINDOW);
            if tokens[window_start..i]
                .iter()
                .any(|t| NEGATIONS.contains(&t.as_str()))
            {
                valence *= NEGATION_FACTOR;
            }

            total += valence;
            if valence > 0.0 {
                pos_sum += valence + 1.0;
            } else if valence < 0.0 {
                neg_sum += valence - 1.0;
            } else {
                neu_count += 1;
            }
        }

        let compound = (total / (total * total + ALPHA).sqrt()).clamp(-1.0, 1.0);
        let label = if compound >= POSITIVE_THRESHOLD {
            SentimentLabel::Positive
        } else if compound <= NEGATIVE_THRESHOLD {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        };

        let norm = pos_sum + neg_sum.abs() + neu_count as f64;
        let (positive, negative, neutral) = if norm > 0.0 {
            (pos_sum / norm, neg_sum.abs() / norm, neu_count as f64 / norm)
        } else {
            (0.0, 0.0, 0.0)
        };

        SentimentResult {
            label,
            compound: round3(compound),
            positive: round3(positive),
            negative: round3(negative),
            neutral: round3(neutral),
        }
    }
}

fn is_modifier(token: &str) -> bool {
    AMPLIFIERS.contains(&token) || DAMPENERS.contains(&token) || NEGATIONS.contains(&token)
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
