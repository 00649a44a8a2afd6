//! Error handling for ctxdocs
//!
//! This module provides the typed errors raised by ctxdocs and the user-facing
//! reporting layer used by the CLI. Two principles drive the design:
//! 1. **Strongly-typed errors** for the structural failures a command must stop on
//! 2. **One precise message** per failure, naming the missing precondition
//!
//! # Error Categories
//!
//! - **Absence**: a package or template that does not exist is modelled as
//!   `Option::None` by the lookups themselves and never reaches this module.
//! - **Transient external failures**: [`CtxdocsError::RegistryHttp`],
//!   [`CtxdocsError::NetworkError`]. Batch operations isolate these per item;
//!   single lookups surface them to the caller.
//! - **Structural errors**: [`CtxdocsError::ConfigNotFound`],
//!   [`CtxdocsError::PackageManifestNotFound`], parse errors. These abort the
//!   command before anything is written.
//!
//! Marker malformation in the host document is not an error at all: the
//! splice falls back to appending a fresh block.
//!
//! # Examples
//!
//! ```rust,no_run
//! use ctxdocs_cli::core::{CtxdocsError, ErrorContext};
//!
//! let context = ErrorContext::new(CtxdocsError::ConfigNotFound {
//!     path: "ctxdocs.toml".to_string(),
//! })
//! .with_suggestion("Run 'ctxdocs init' to create one");
//!
//! context.display();
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for ctxdocs operations.
#[derive(Error, Debug)]
pub enum CtxdocsError {
    /// The project configuration file is missing.
    #[error("No ctxdocs configuration found at {path}")]
    ConfigNotFound {
        /// Path where `ctxdocs.toml` was expected
        path: String,
    },

    /// A configuration file exists but could not be parsed.
    #[error("Invalid configuration in {file}: {reason}")]
    ConfigParseError {
        /// Path of the configuration file
        file: String,
        /// Parser message
        reason: String,
    },

    /// A configuration file already exists where `init` would create one.
    #[error("Configuration already exists at {path}")]
    ConfigAlreadyExists {
        /// Path of the existing configuration
        path: String,
    },

    /// The project has no `package.json`.
    #[error("No manifest found: {path} does not exist")]
    PackageManifestNotFound {
        /// Path where `package.json` was expected
        path: String,
    },

    /// `package.json` exists but is not valid JSON or has the wrong shape.
    #[error("Invalid package manifest {file}: {reason}")]
    PackageManifestParseError {
        /// Path of the manifest
        file: String,
        /// Parser message
        reason: String,
    },

    /// A documentation template file could not be parsed.
    #[error("Invalid template {file}: {reason}")]
    TemplateParseError {
        /// Template file or built-in name
        file: String,
        /// Parser message
        reason: String,
    },

    /// A framework was requested by name but no template provides it.
    #[error("No documentation template for '{name}'")]
    TemplateNotFound {
        /// Requested framework name
        name: String,
    },

    /// The package registry answered with a non-success status other than 404.
    #[error("Registry request for '{package}' failed with HTTP {status}")]
    RegistryHttp {
        /// Package that was looked up
        package: String,
        /// HTTP status code returned by the registry
        status: u16,
    },

    /// The documentation source answered with a non-success status.
    #[error("Documentation request for '{library}' ({topic}) failed with HTTP {status}")]
    DocsHttp {
        /// Library identifier that was requested
        library: String,
        /// Topic string of the request
        topic: String,
        /// HTTP status code returned by the source
        status: u16,
    },

    /// Transport-level network failure.
    #[error("Network error during {operation}: {reason}")]
    NetworkError {
        /// The network operation that failed
        operation: String,
        /// Reason for the failure
        reason: String,
    },

    /// File system error
    #[error("File system error: {operation}")]
    FileSystemError {
        /// The file system operation that failed
        operation: String,
        /// Path where the error occurred
        path: String,
    },

    /// TOML serialization error
    #[error("TOML serialization error: {0}")]
    TomlSerError(#[from] toml::ser::Error),

    /// Other error
    #[error("{message}")]
    Other {
        /// Generic error message
        message: String,
    },
}

/// Error context wrapper that provides user-friendly error information
///
/// `ErrorContext` wraps a [`CtxdocsError`] and adds optional details and a
/// suggestion for resolving it. This is how the CLI presents failures.
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: CtxdocsError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no suggestion or details.
    #[must_use]
    pub const fn new(error: CtxdocsError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add details explaining the error.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error to stderr: error in red, details in yellow, suggestion in green.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error to a user-friendly [`ErrorContext`].
///
/// Typed [`CtxdocsError`]s anywhere in the chain get tailored suggestions; IO
/// and TOML errors get generic guidance; everything else is reported with its
/// full cause chain.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    for cause in error.chain() {
        if let Some(ctx_error) = cause.downcast_ref::<CtxdocsError>() {
            return create_error_context(clone_error(ctx_error));
        }
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        match io_error.kind() {
            std::io::ErrorKind::PermissionDenied => {
                return ErrorContext::new(CtxdocsError::FileSystemError {
                    operation: "file access".to_string(),
                    path: "unknown".to_string(),
                })
                .with_suggestion("Check file ownership and permissions in the project directory");
            }
            std::io::ErrorKind::NotFound => {
                return ErrorContext::new(CtxdocsError::FileSystemError {
                    operation: "file access".to_string(),
                    path: "unknown".to_string(),
                })
                .with_suggestion("Check that the file or directory exists and the path is correct");
            }
            _ => {}
        }
    }

    if let Some(toml_error) = error.downcast_ref::<toml::de::Error>() {
        return ErrorContext::new(CtxdocsError::ConfigParseError {
            file: "ctxdocs.toml".to_string(),
            reason: toml_error.to_string(),
        })
        .with_suggestion("Check the TOML syntax in ctxdocs.toml");
    }

    let mut message = error.to_string();
    let chain: Vec<String> = error.chain().skip(1).map(ToString::to_string).collect();
    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    ErrorContext::new(CtxdocsError::Other {
        message,
    })
}

// Errors wrapping foreign sources cannot be cloned; they collapse to `Other`.
fn clone_error(error: &CtxdocsError) -> CtxdocsError {
    match error {
        CtxdocsError::ConfigNotFound {
            path,
        } => CtxdocsError::ConfigNotFound {
            path: path.clone(),
        },
        CtxdocsError::ConfigParseError {
            file,
            reason,
        } => CtxdocsError::ConfigParseError {
            file: file.clone(),
            reason: reason.clone(),
        },
        CtxdocsError::ConfigAlreadyExists {
            path,
        } => CtxdocsError::ConfigAlreadyExists {
            path: path.clone(),
        },
        CtxdocsError::PackageManifestNotFound {
            path,
        } => CtxdocsError::PackageManifestNotFound {
            path: path.clone(),
        },
        CtxdocsError::PackageManifestParseError {
            file,
            reason,
        } => CtxdocsError::PackageManifestParseError {
            file: file.clone(),
            reason: reason.clone(),
        },
        CtxdocsError::TemplateParseError {
            file,
            reason,
        } => CtxdocsError::TemplateParseError {
            file: file.clone(),
            reason: reason.clone(),
        },
        CtxdocsError::TemplateNotFound {
            name,
        } => CtxdocsError::TemplateNotFound {
            name: name.clone(),
        },
        CtxdocsError::RegistryHttp {
            package,
            status,
        } => CtxdocsError::RegistryHttp {
            package: package.clone(),
            status: *status,
        },
        CtxdocsError::DocsHttp {
            library,
            topic,
            status,
        } => CtxdocsError::DocsHttp {
            library: library.clone(),
            topic: topic.clone(),
            status: *status,
        },
        CtxdocsError::NetworkError {
            operation,
            reason,
        } => CtxdocsError::NetworkError {
            operation: operation.clone(),
            reason: reason.clone(),
        },
        CtxdocsError::FileSystemError {
            operation,
            path,
        } => CtxdocsError::FileSystemError {
            operation: operation.clone(),
            path: path.clone(),
        },
        CtxdocsError::TomlSerError(e) => CtxdocsError::Other {
            message: format!("TOML serialization error: {e}"),
        },
        CtxdocsError::Other {
            message,
        } => CtxdocsError::Other {
            message: message.clone(),
        },
    }
}

fn create_error_context(error: CtxdocsError) -> ErrorContext {
    match &error {
        CtxdocsError::ConfigNotFound {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Run 'ctxdocs init' in the project root to create ctxdocs.toml"),
        CtxdocsError::ConfigParseError {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Fix the TOML syntax, or delete the file and run 'ctxdocs init'"),
        CtxdocsError::ConfigAlreadyExists {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Use 'ctxdocs sync' to refresh, or 'ctxdocs init --force' to start over"),
        CtxdocsError::PackageManifestNotFound {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Run ctxdocs from a directory containing package.json, or pass --project-dir")
            .with_details("Declared dependencies are read from package.json"),
        CtxdocsError::PackageManifestParseError {
            ..
        } => ErrorContext::new(error).with_suggestion("Check package.json for JSON syntax errors"),
        CtxdocsError::TemplateParseError {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Check the template TOML in .ctxdocs/templates/"),
        CtxdocsError::TemplateNotFound {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Run 'ctxdocs templates' to list the available templates"),
        CtxdocsError::RegistryHttp {
            ..
        }
        | CtxdocsError::DocsHttp {
            ..
        }
        | CtxdocsError::NetworkError {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Check your network connection and the URLs in ~/.ctxdocs/config.toml"),
        _ => ErrorContext::new(error),
    }
}
