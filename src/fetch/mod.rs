//! Remote lookups: documentation content, package versions, and the
//! coordinator that runs batches of either under a concurrency cap.
//!
//! Clients are explicit, caller-owned handles. Each memoizes its answers for
//! the life of the handle and exposes `reset()`; nothing is cached in
//! module-level state.

pub mod coordinator;
pub mod docs;
pub mod registry;

pub use coordinator::FetchCoordinator;
pub use docs::{DocSource, DocsClient, FetchOutcome};
pub use registry::{NpmRegistry, VersionSource, encode_package_name};
