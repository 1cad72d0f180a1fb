//! Noble documentation version tracker
//!
//! Detects when the mainnet upgrades table lists a release newer than the
//! one last acknowledged, and reports what changed in the Noble repository
//! between the two tags, overall and per module.
//!
//! # Modules
//!
//! - [`version`]: Release version parsing and ordering
//! - [`parser`]: Upgrades table and go.mod parsers
//! - [`tracker`]: Persisted last-tracked version
//! - [`remote`]: GitHub comparison and manifest access
//! - [`modules`]: Module registry and per-module attribution
//! - [`check`]: The check workflow and its console report
//! - [`config`]: Defaults and the JSON config file

pub mod check;
pub mod config;
pub mod modules;
pub mod parser;
pub mod remote;
pub mod tracker;
pub mod version;
