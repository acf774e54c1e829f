//! Data models for parsed order sheets and pipeline configuration.

pub mod config;
pub mod sheet;
