//! One-shot page initialization.
//!
//! Runs every behavior once against a parsed document. The behaviors share
//! nothing but the DOM, so their order does not matter and a failure in one
//! is logged without stopping the rest.

#[cfg(test)]
#[path = "boot_test.rs"]
mod boot_test;

use std::rc::Rc;

use crate::config::Config;
use crate::dom::Dom;
use crate::error::InitError;
use crate::reveal::{self, RevealSummary};
use crate::store::{ColorScheme, PreferenceStore};
use crate::theme::{self, Theme, ThemePreference};
use crate::{nav, scroll, styles};

/// Outcome of [`boot`], one entry per behavior.
#[derive(Debug, Clone, PartialEq)]
pub struct BootReport {
    /// Theme applied at startup.
    pub theme: Result<Theme, InitError>,
    /// Whether a mobile drawer was found and wired.
    pub nav: Result<bool, InitError>,
    /// Number of in-page links wired for smooth scrolling.
    pub anchors: usize,
    /// Sections observed for reveal and skill items staggered.
    pub reveal: RevealSummary,
}

impl BootReport {
    /// Whether every behavior initialized without error.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.theme.is_ok() && self.nav.is_ok()
    }
}

/// Initialize all page behaviors.
pub fn boot<D, S, C>(dom: &Rc<D>, config: &Config, preference: ThemePreference<S, C>) -> BootReport
where
    D: Dom + 'static,
    S: PreferenceStore + 'static,
    C: ColorScheme + 'static,
{
    if config.inject_styles {
        styles::install(&**dom, config);
    }

    let theme = theme::install(dom, &config.theme, preference);
    if let Err(err) = &theme {
        log::warn!("{err}");
    }

    let nav = nav::install(dom, &config.nav).map(|nav| nav.is_some());
    if let Err(err) = &nav {
        log::warn!("{err}");
    }

    let anchors = scroll::install(dom, &config.scroll);
    let reveal = reveal::install(dom, &config.reveal);

    log::info!("portfolio initialized");
    BootReport { theme, nav, anchors, reveal }
}
