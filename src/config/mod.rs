//! Configuration management for ctxdocs.
//!
//! Two layers:
//!
//! 1. **Project configuration** (`ctxdocs.toml`): layout, size limits, and
//!    the recorded state of every documented framework. Committed with the
//!    project.
//! 2. **Global configuration** (`~/.ctxdocs/config.toml`): network endpoints
//!    and the documentation API key. Never committed.
//!
//! The dependency manifest (`package.json`) is input, not configuration; see
//! [`crate::manifest`].

pub mod global;
pub mod project;

pub use global::{GlobalConfig, NetworkConfig};
pub use project::{
    FrameworkSource, FrameworkState, Limits, Project, ProjectConfig, find_project_root,
};
