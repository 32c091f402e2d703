//! Selectors, class names and tuning constants for the page behaviors.
//!
//! Every field has a default matching the portfolio markup, so an empty
//! JSON object (or no config block at all) yields a working page. A page
//! can override any subset by embedding
//! `<script id="portfolio-config" type="application/json">{...}</script>`.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::dom::{Dom, ObserverOptions};
use crate::error::ConfigError;

/// Id of the optional element holding JSON overrides.
pub const CONFIG_ELEMENT_ID: &str = "portfolio-config";

/// Top-level page configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub theme: ThemeConfig,
    pub nav: NavConfig,
    pub scroll: ScrollConfig,
    pub reveal: RevealConfig,
    /// Append the animation and menu stylesheet to `<head>` at startup.
    pub inject_styles: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: ThemeConfig::default(),
            nav: NavConfig::default(),
            scroll: ScrollConfig::default(),
            reveal: RevealConfig::default(),
            inject_styles: true,
        }
    }
}

impl Config {
    /// Parse a (possibly partial) JSON override.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] if `raw` is not valid JSON or a field
    /// has the wrong type.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Read overrides from the page's config element, falling back to
    /// defaults when it is absent, empty or malformed.
    #[must_use]
    pub fn load<D: Dom>(dom: &D) -> Self {
        let Some(raw) = dom.element_by_id(CONFIG_ELEMENT_ID).and_then(|node| dom.text(&node)) else {
            return Self::default();
        };
        if raw.trim().is_empty() {
            return Self::default();
        }
        match Self::from_json(&raw) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("{err}; using defaults");
                Self::default()
            }
        }
    }
}

/// Theme toggle wiring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Id of the checkbox that switches dark mode on and off.
    pub toggle_id: String,
    /// Selector for the icon inside the toggle's label.
    pub icon_selector: String,
    /// Key of the persisted preference slot.
    pub storage_key: String,
    /// Attribute set to `"dark"` on the document root in dark mode.
    pub marker_attribute: String,
    /// Icon classes shown while dark mode is on.
    pub dark_icon_class: String,
    /// Icon classes shown while light mode is on.
    pub light_icon_class: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            toggle_id: "checkbox".into(),
            icon_selector: ".theme-label i".into(),
            storage_key: "theme".into(),
            marker_attribute: "data-theme".into(),
            dark_icon_class: "fas fa-sun".into(),
            light_icon_class: "fas fa-moon".into(),
        }
    }
}

/// Mobile navigation drawer wiring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    pub toggle_selector: String,
    pub links_selector: String,
    /// Selector for the links that close the drawer when clicked.
    pub link_item_selector: String,
    /// Selector for the icon bars inside the toggle.
    pub bar_selector: String,
    pub active_class: String,
    /// Body class that locks page scroll while the drawer is open.
    pub body_open_class: String,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            toggle_selector: ".mobile-menu-toggle".into(),
            links_selector: ".nav-links".into(),
            link_item_selector: ".nav-links a".into(),
            bar_selector: ".bar".into(),
            active_class: "active".into(),
            body_open_class: "menu-open".into(),
        }
    }
}

/// In-page anchor scrolling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    pub link_selector: String,
    /// Clearance left above the target for the fixed header, in CSS pixels.
    pub header_offset: f64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self { link_selector: "a[href^=\"#\"]".into(), header_offset: 80.0 }
    }
}

/// Scroll-triggered reveal and skill cascade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    pub section_selector: String,
    pub skill_selector: String,
    pub fade_class: String,
    pub visible_class: String,
    /// Visible fraction that counts as "in view".
    pub threshold: f64,
    /// Viewport margin in CSS pixels; negative means inside the edge.
    pub root_margin_px: i32,
    /// Animation delay added per skill item, in milliseconds.
    pub stagger_ms: u32,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            section_selector: ".section-container".into(),
            skill_selector: ".skill-item".into(),
            fade_class: "fade-in".into(),
            visible_class: "visible".into(),
            threshold: 0.1,
            root_margin_px: -50,
            stagger_ms: 100,
        }
    }
}

impl RevealConfig {
    #[must_use]
    pub fn observer_options(&self) -> ObserverOptions {
        ObserverOptions { threshold: self.threshold, root_margin_px: self.root_margin_px }
    }
}
