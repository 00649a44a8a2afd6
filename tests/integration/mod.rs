//! Integration test suite for ctxdocs
//!
//! End-to-end tests that run the `ctxdocs` binary against temporary
//! projects. Remote endpoints are local stub servers.
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **config**: global configuration command
//! - **errors**: structural failures and their messages
//! - **index**: rebuilding the host document block
//! - **init**: project initialization
//! - **outdated**: registry freshness check
//! - **status**: offline status report
//! - **sync**: full reconciliation passes
//! - **templates**: template listing and project overrides

#[path = "../common/mod.rs"]
mod common;

mod config;
mod errors;
mod index;
mod init;
mod outdated;
mod status;
mod sync;
mod templates;
