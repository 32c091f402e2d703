//! Scroll-triggered section reveal and the skill badge cascade.
//!
//! Sections start hidden under a `fade-in` class and gain `visible` the first
//! time enough of them enters the viewport. They are never unobserved, but
//! adding a class that is already present changes nothing, so the reveal
//! happens once. Skill items get a staggered `animation-delay` up front; the
//! keyframe animation itself lives in CSS.

#[cfg(test)]
#[path = "reveal_test.rs"]
mod reveal_test;

use std::rc::Rc;

use crate::config::RevealConfig;
use crate::dom::{Dom, Intersection};

/// What [`install`] wired up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RevealSummary {
    pub sections: usize,
    pub skills: usize,
}

/// Whether an intersection change should reveal its target.
///
/// The observer only reports threshold crossings and intersection changes,
/// so the ratio is not checked again here. A section too tall to ever reach
/// the threshold ratio still reveals once it intersects.
#[must_use]
pub fn should_reveal<N>(entry: &Intersection<N>) -> bool {
    entry.is_intersecting
}

/// CSS `animation-delay` for the skill item at `index`, e.g. `0.3s`.
///
/// Computed in whole milliseconds so the value is exact.
#[must_use]
pub fn stagger_delay(index: usize, step_ms: u32) -> String {
    let index = u64::try_from(index).unwrap_or(u64::MAX);
    let total_ms = index.saturating_mul(u64::from(step_ms));
    let (secs, millis) = (total_ms / 1000, total_ms % 1000);
    if millis == 0 {
        return format!("{secs}s");
    }
    let frac = format!("{millis:03}");
    format!("{secs}.{}s", frac.trim_end_matches('0'))
}

/// Add the visible class to every entry that crossed the threshold.
pub fn on_intersections<D: Dom>(dom: &D, config: &RevealConfig, entries: &[Intersection<D::Node>]) {
    for entry in entries.iter().filter(|e| should_reveal(e)) {
        dom.add_class(&entry.target, &config.visible_class);
    }
}

/// Hide sections until revealed, start observing them, and stagger the
/// skill items.
pub fn install<D: Dom + 'static>(dom: &Rc<D>, config: &RevealConfig) -> RevealSummary {
    let sections = dom.query_all(&config.section_selector);
    for section in &sections {
        dom.add_class(section, &config.fade_class);
    }
    if !sections.is_empty() {
        let (dom_cb, config_cb) = (Rc::clone(dom), config.clone());
        dom.observe(
            &sections,
            config.observer_options(),
            Box::new(move |entries: &[Intersection<D::Node>]| {
                on_intersections(&*dom_cb, &config_cb, entries);
            }),
        );
    }

    let skills = dom.query_all(&config.skill_selector);
    for (index, item) in skills.iter().enumerate() {
        dom.set_style_property(item, "animation-delay", &stagger_delay(index, config.stagger_ms));
    }

    log::debug!("reveal: {} sections, {} skill items", sections.len(), skills.len());
    RevealSummary { sections: sections.len(), skills: skills.len() }
}
