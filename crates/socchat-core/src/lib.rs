//! Domain layer of the SOC chat enrichment pipeline.
//!
//! Analyst input is classified (`ioc`), optionally looked up against a
//! threat-intelligence provider (`enrichment`) and merged into an append-only
//! conversation (`session`). Orchestration of those steps lives in
//! `socchat-application`.

pub mod config;
pub mod enrichment;
pub mod error;
pub mod ioc;
pub mod session;

pub use config::ChatConfig;
pub use error::ChatError;
