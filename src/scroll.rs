//! Smooth scrolling for same-page anchor links.
//!
//! Every `href="#..."` link has its default jump suppressed and instead
//! scrolls smoothly so the target lands just below the fixed header. A bare
//! `#` link scrolls nowhere.

#[cfg(test)]
#[path = "scroll_test.rs"]
mod scroll_test;

use std::rc::Rc;

use crate::config::ScrollConfig;
use crate::dom::{Dispatch, Dom, EventKind};

/// Absolute scroll position that puts an element `viewport_top` pixels below
/// the viewport top at `header_offset` pixels below it instead.
#[must_use]
pub fn scroll_target(viewport_top: f64, scroll_y: f64, header_offset: f64) -> f64 {
    viewport_top + scroll_y - header_offset
}

/// Id referenced by an in-page `href`, or `None` for a bare `#` or a
/// non-fragment reference.
#[must_use]
pub fn fragment_id(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

/// Scroll position for activating a link with `href`, or `None` when no
/// scroll should happen.
#[must_use]
pub fn target_for<D: Dom>(dom: &D, href: &str, header_offset: f64) -> Option<f64> {
    let id = fragment_id(href)?;
    let Some(target) = dom.element_by_id(id) else {
        log::debug!("scroll: no element with id {id:?}");
        return None;
    };
    Some(scroll_target(dom.viewport_top(&target), dom.scroll_y(), header_offset))
}

/// Handle a click on an anchor link. Always suppresses the default jump.
pub fn on_anchor_click<D: Dom>(dom: &D, link: &D::Node, header_offset: f64) -> Dispatch {
    let href = dom.attribute(link, "href").unwrap_or_default();
    if let Some(top) = target_for(dom, &href, header_offset) {
        dom.scroll_to(top);
    }
    Dispatch::PreventDefault
}

/// Wire every in-page link. Returns how many links were wired.
pub fn install<D: Dom + 'static>(dom: &Rc<D>, config: &ScrollConfig) -> usize {
    let links = dom.query_all(&config.link_selector);
    for link in &links {
        let (dom_cb, link_cb, offset) = (Rc::clone(dom), link.clone(), config.header_offset);
        dom.listen(
            link,
            EventKind::Click,
            Box::new(move || on_anchor_click(&*dom_cb, &link_cb, offset)),
        );
    }
    log::debug!("scroll: wired {} anchor links", links.len());
    links.len()
}
