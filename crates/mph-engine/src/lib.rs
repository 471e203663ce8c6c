//! # mph-engine
//!
//! Multiple primary and histology classification.
//!
//! Given two tumor records for one patient, the engine decides whether they
//! are a single primary or multiple primaries. Each tumor is routed to a
//! rule group by site, histology, behavior and diagnosis year; when both
//! tumors land in the same group, the group's ordered rules are evaluated
//! until one decides.
//!
//! ## Modules
//!
//! - [`temporal`]: partial diagnosis dates and their comparison
//! - [`histology`]: histology table row matching
//! - [`hemato`]: hematopoietic relationship lookups
//! - [`rule`] and [`group`]: rule chains and their applicability
//! - [`engine`]: the engine itself; [`global`] holds a process-wide instance
//!
//! ## Usage
//!
//! ```rust
//! use mph_engine::MphEngine;
//! use mph_types::{ComputeOptions, MpResult, TumorRecord};
//!
//! let engine = MphEngine::embedded().unwrap();
//! let t1 = TumorRecord::new("C649", "8960", "3", "1", "2019");
//! let t2 = TumorRecord::new("C649", "8961", "3", "2", "2019");
//!
//! let outcome = engine.compute_primaries(&t1, &t2, &ComputeOptions::default());
//! assert_eq!(outcome.result, MpResult::MultiplePrimaries);
//! assert_eq!(outcome.step.as_deref(), Some("M6"));
//! ```

#![warn(missing_docs)]

pub mod engine;
pub mod error;
pub mod global;
pub mod group;
mod groups;
pub mod hemato;
pub mod histology;
pub mod rule;
pub mod selector;
pub mod temporal;
pub mod validate;

pub use engine::{EngineConfig, MphEngine};
pub use error::{EngineError, EngineResult};
pub use group::{Applicability, RuleGroup};
pub use groups::default_groups;
pub use rule::{Rule, RuleContext, RuleResult, TumorPair, Verdict};
pub use selector::GroupSelector;
pub use temporal::{DateComparison, PartialDate, Separation};
pub use validate::{InvalidField, ParsedTumor};

// Re-export the data crates for convenience
pub use mph_loader;
pub use mph_types;
