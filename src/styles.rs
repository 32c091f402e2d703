//! Stylesheet for the reveal animations and the mobile drawer.
//!
//! The behaviors only flip classes; these rules turn those classes into
//! motion. Class names come from the active [`Config`] so overrides stay in
//! sync with the CSS.

#[cfg(test)]
#[path = "styles_test.rs"]
mod styles_test;

use crate::config::Config;
use crate::dom::Dom;

/// Render the stylesheet for `config`.
#[must_use]
pub fn stylesheet(config: &Config) -> String {
    let fade = &config.reveal.fade_class;
    let visible = &config.reveal.visible_class;
    let skill = &config.reveal.skill_selector;
    let open = &config.nav.body_open_class;
    let toggle = &config.nav.toggle_selector;
    let bar = &config.nav.bar_selector;
    let active = &config.nav.active_class;
    format!(
        "\
.{fade} {{
    opacity: 0;
    transform: translateY(20px);
    transition: opacity 0.6s ease-out, transform 0.6s ease-out;
}}
.{fade}.{visible} {{
    opacity: 1;
    transform: translateY(0);
}}
{skill} {{
    animation: fadeInUp 0.5s ease-out forwards;
    opacity: 0;
}}
@keyframes fadeInUp {{
    from {{ opacity: 0; transform: translateY(20px); }}
    to {{ opacity: 1; transform: translateY(0); }}
}}
body.{open} {{
    overflow: hidden;
}}
{toggle} {bar}.{active}:nth-child(1) {{
    transform: translateY(8px) rotate(45deg);
}}
{toggle} {bar}.{active}:nth-child(2) {{
    opacity: 0;
}}
{toggle} {bar}.{active}:nth-child(3) {{
    transform: translateY(-8px) rotate(-45deg);
}}
"
    )
}

/// Append the stylesheet to the document head.
pub fn install<D: Dom>(dom: &D, config: &Config) {
    dom.append_style(&stylesheet(config));
}
