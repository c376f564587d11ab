//! Decision pipeline for the grievance redressal system.
//!
//! Raw complaint text goes in; one immutable [`types::DecisionRecord`]
//! comes out, carrying the classified category, keyword-derived priority,
//! responsible department, sentiment, salient keywords, resolution
//! estimate and ticket id. The [`pipeline::Pipeline`] orchestrates the
//! trained classifier and the deterministic rule engines; the store and
//! report modules are the persistence and reporting collaborators the
//! assembled record is handed to.

pub mod classifier;
pub mod config;
pub mod department;
pub mod error;
pub mod keywords;
pub mod pipeline;
pub mod priority;
pub mod report;
pub mod resolution;
pub mod sentiment;
pub mod store;
pub mod ticket_id;
pub mod types;

pub use error::{RedressError, Result};
pub use pipeline::Pipeline;
pub use types::{Category, ComplaintInput, DecisionRecord, PriorityLevel};
