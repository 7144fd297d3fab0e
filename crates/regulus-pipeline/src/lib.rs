//! Regulus Pipeline
//!
//! Orchestration of data-quality passes: fetch the record collection from
//! storage, hand it to the quality engine, serve reports through the cache,
//! and persist accepted remediations back to storage.
//!
//! # Overview
//!
//! - [`QualityPass`]: one fetch-report-(remediate) cycle. Report generation
//!   degrades to an empty report on storage failure; remediation propagates
//!   storage errors.
//! - [`PassWorker`]: runs passes on a tokio interval until Ctrl+C, with
//!   optional automatic remediation.
//! - [`PassMetrics`]: counters across passes for operator visibility.
//!
//! This is the only crate that sees both the quality engine and the cache;
//! each stays independent of the other.
//!
//! # Usage
//!
//! ## One-off cached report
//!
//! ```no_run
//! use regulus_cache::TtlCache;
//! use regulus_pipeline::{PassConfig, QualityPass};
//! # struct SomeStore;
//! # impl regulus_domain::RecordStore for SomeStore {
//! #     type Error = String;
//! #     fn get_all(&self) -> Result<Vec<regulus_domain::Record>, String> { Ok(vec![]) }
//! #     fn get(&self, _: regulus_domain::RecordId) -> Result<Option<regulus_domain::Record>, String> { Ok(None) }
//! #     fn update(&mut self, _: regulus_domain::Record) -> Result<(), String> { Ok(()) }
//! #     fn delete(&mut self, _: regulus_domain::RecordId) -> Result<(), String> { Ok(()) }
//! # }
//!
//! let store = SomeStore;
//! let cache = TtlCache::default_config();
//! let pass = QualityPass::new(PassConfig::default());
//!
//! // Served fresh once, then from the cache for the next five minutes
//! let report = pass.run_cached(&store, &cache, "quality-report:tenant-a");
//! let again = pass.run_cached(&store, &cache, "quality-report:tenant-a");
//! # let _ = (report, again);
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod metrics;
mod pass;
mod worker;

pub use config::PassConfig;
pub use error::PipelineError;
pub use metrics::PassMetrics;
pub use pass::{QualityPass, RemediationSummary};
pub use worker::PassWorker;
