//! Version normalization for documentation tracking.
//!
//! Documentation is cached per *major* line of a framework, not per exact
//! release. This module reduces a dependency version specifier from
//! `package.json` (for example `^4.3.0` or `~0.44.1`) to the canonical major
//! token used for comparison:
//!
//! | Specifier | Token |
//! |-----------|-------|
//! | `^4.3.0`  | `4.x` |
//! | `>=18`    | `18.x` |
//! | `~0.44.1` | `0.44` |
//! | `0`       | `0.x` |
//! | `latest`  | `unknown` |
//!
//! Zero-major versions keep their minor component because `0.x` releases are
//! not interchangeable across minors. Anything whose first segment is not an
//! integer has no token; [`normalize_major`] reports it as
//! [`UNKNOWN_VERSION`] and callers treat that as "version unknown", never as a
//! failure.
//!
//! No range resolution happens here: `^4.3.0 || ^5` yields the token of the
//! first comparator only.

use crate::constants::UNKNOWN_VERSION;
use std::cmp::Ordering;

const RANGE_OPERATORS: [char; 5] = ['^', '~', '>', '=', '<'];

/// Extract the major token of a version specifier, if it has one.
///
/// # Examples
///
/// ```rust
/// use ctxdocs_cli::version::major_token;
///
/// assert_eq!(major_token("^4.3.0").as_deref(), Some("4.x"));
/// assert_eq!(major_token("~0.44.1").as_deref(), Some("0.44"));
/// assert_eq!(major_token("workspace:*"), None);
/// ```
#[must_use]
pub fn major_token(spec: &str) -> Option<String> {
    let stripped = spec.trim().trim_start_matches(RANGE_OPERATORS).trim_start();
    let mut segments = stripped.split('.');

    let major: u64 = segments.next()?.trim().parse().ok()?;

    if major == 0
        && let Some(minor) = segments.next()
    {
        return Some(format!("0.{minor}"));
    }

    Some(format!("{major}.x"))
}

/// Normalize a version specifier, mapping unparseable input to [`UNKNOWN_VERSION`].
#[must_use]
pub fn normalize_major(spec: &str) -> String {
    major_token(spec).unwrap_or_else(|| UNKNOWN_VERSION.to_string())
}

/// Whether a token is the "version unknown" sentinel.
#[must_use]
pub fn is_unknown(token: &str) -> bool {
    token == UNKNOWN_VERSION
}

/// Major token of an exact release version as published by a registry.
///
/// Registry versions are full semver (`5.0.2`, `1.0.0-beta.3`), so they are
/// parsed strictly first; anything semver rejects goes through
/// [`major_token`].
#[must_use]
pub fn release_token(version: &str) -> Option<String> {
    match semver::Version::parse(version.trim()) {
        Ok(parsed) if parsed.major == 0 => Some(format!("0.{}", parsed.minor)),
        Ok(parsed) => Some(format!("{}.x", parsed.major)),
        Err(_) => major_token(version),
    }
}

/// Order two major tokens.
///
/// Returns `None` when either token is unknown or malformed. `4.x` and `4.x`
/// are equal; `0.44` is older than `0.45` and older than `1.x`.
#[must_use]
pub fn compare_tokens(left: &str, right: &str) -> Option<Ordering> {
    let left = parse_token(left)?;
    let right = parse_token(right)?;
    Some(left.cmp(&right))
}

fn parse_token(token: &str) -> Option<(u64, u64)> {
    let (major, minor) = token.split_once('.')?;
    let major: u64 = major.parse().ok()?;
    if major == 0 {
        let minor: u64 = minor.parse().ok()?;
        Some((0, minor))
    } else if minor == "x" {
        Some((major, 0))
    } else {
        None
    }
}
