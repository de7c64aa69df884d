//! Display surface abstraction.
//!
//! The reader publishes status text, escaped markup for the text region,
//! and control enablement through this trait. The binary provides a
//! terminal implementation; tests substitute a recording one.

use crate::reader::Controls;

pub trait Surface: Send + Sync {
    /// Update the status region.
    fn set_status(&self, status: &str);

    /// Replace the text region with escaped markup.
    fn set_markup(&self, markup: &str);

    /// Update which controls are enabled.
    fn set_controls(&self, controls: Controls);
}

/// Terminal surface: status lines to stderr, markup optionally echoed to
/// stdout.
pub struct TermSurface {
    echo_text: bool,
}

impl TermSurface {
    pub fn new(echo_text: bool) -> Self {
        Self { echo_text }
    }
}

impl Surface for TermSurface {
    fn set_status(&self, status: &str) {
        eprintln!("{}", status);
    }

    fn set_markup(&self, markup: &str) {
        if self.echo_text {
            println!("{}", markup);
        }
    }

    fn set_controls(&self, controls: Controls) {
        log::debug!("controls: {:?}", controls);
    }
}
