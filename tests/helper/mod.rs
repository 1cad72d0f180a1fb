//! Shared test utilities

#![allow(dead_code)]

pub mod host;
pub mod workspace;
