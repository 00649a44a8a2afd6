//! Core types and error handling for ctxdocs
//!
//! This module holds the pieces every other module depends on: the typed
//! error enum ([`CtxdocsError`]), the user-facing error wrapper
//! ([`ErrorContext`]) and the conversion used by the binary to report a
//! failure once, precisely ([`user_friendly_error`]).

pub mod error;

pub use error::{CtxdocsError, ErrorContext, user_friendly_error};
