//! Progress indicators for long-running operations.
//!
//! Thin wrapper over `indicatif` with consistent styling. Indicators are
//! hidden (all calls become no-ops) when:
//!
//! - the caller passes `--no-progress`
//! - `CTXDOCS_NO_PROGRESS` is set to any value
//! - stderr is not a terminal

use indicatif::{ProgressBar as IndicatifBar, ProgressStyle};
use std::io::IsTerminal;

/// Environment variable disabling progress output.
pub const NO_PROGRESS_ENV: &str = "CTXDOCS_NO_PROGRESS";

fn is_progress_disabled() -> bool {
    std::env::var_os(NO_PROGRESS_ENV).is_some() || !std::io::stderr().is_terminal()
}

/// A progress bar with ctxdocs styling.
#[derive(Clone)]
pub struct ProgressBar {
    inner: IndicatifBar,
}

impl ProgressBar {
    /// A bar over `len` units; hidden unless `show` and the environment allow it.
    #[must_use]
    pub fn new(len: u64, show: bool) -> Self {
        let inner = if show && !is_progress_disabled() {
            let bar = IndicatifBar::new(len);
            bar.set_style(bar_style());
            bar
        } else {
            IndicatifBar::hidden()
        };
        Self {
            inner,
        }
    }

    /// A progress bar that never draws.
    #[must_use]
    pub fn hidden() -> Self {
        Self {
            inner: IndicatifBar::hidden(),
        }
    }

    pub fn set_message(&self, msg: impl Into<String>) {
        self.inner.set_message(msg.into());
    }

    pub fn inc(&self, delta: u64) {
        self.inner.inc(delta);
    }

    pub fn finish_with_message(&self, msg: impl Into<String>) {
        self.inner.finish_with_message(msg.into());
    }

    pub fn finish_and_clear(&self) {
        self.inner.finish_and_clear();
    }

    /// Whether this indicator draws anything.
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.inner.is_hidden()
    }
}

fn bar_style() -> ProgressStyle {
    ProgressStyle::default_bar()
        .template("{spinner:.cyan} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("━╸━")
}
