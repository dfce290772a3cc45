//! Terminal progress bars for long scans and cuts

use indicatif::{ProgressBar, ProgressStyle};

const BAR_TEMPLATE: &str = "{spinner:.green} {prefix:>12} {bar:40.cyan/blue} {pos}/{len} {msg}";

/// Hands out progress bars, hidden ones when progress output is off
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressFactory {
    enabled: bool,
}

impl ProgressFactory {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Factory whose bars never draw
    pub fn hidden() -> Self {
        Self::new(false)
    }

    /// Bar counting up to `len` items, labelled with `prefix`
    pub fn bar(&self, len: u64, prefix: &str) -> ProgressBar {
        if !self.enabled {
            return ProgressBar::hidden();
        }
        let bar = ProgressBar::new(len);
        if let Ok(style) = ProgressStyle::with_template(BAR_TEMPLATE) {
            bar.set_style(style.progress_chars("##-"));
        }
        bar.set_prefix(prefix.to_string());
        bar
    }
}

impl Default for ProgressFactory {
    fn default() -> Self {
        Self::hidden()
    }
}
