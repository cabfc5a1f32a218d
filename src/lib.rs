#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

//! # streamreg
//!
//! Command-line host for schema and topic reconciliation.
//!
//! The binary loads a [`config::ProviderConfig`], reads a record, runs one
//! lifecycle phase through `streamreg-reconciler` and prints the result.

pub use streamreg_client;
pub use streamreg_reconciler;

pub mod cli;
pub mod commands;
pub mod config;
