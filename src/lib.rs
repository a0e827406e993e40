//! Next-action labelling for Todoist.
//!
//! This module exports the core components for testing and integration.

pub mod classify;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod reconcile;
pub mod snapshot;
pub mod todoist;
pub mod types;
pub mod visibility;
