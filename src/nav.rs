//! Mobile navigation drawer.
//!
//! The hamburger toggle opens and closes the drawer by flipping an `active`
//! class on the links container and on each icon bar, and a `menu-open`
//! class on the body that locks page scroll. Clicking any navigation link
//! closes the drawer unconditionally.
//!
//! Pages without a mobile toggle get no listeners at all.

#[cfg(test)]
#[path = "nav_test.rs"]
mod nav_test;

use std::rc::Rc;

use crate::config::NavConfig;
use crate::dom::{Dispatch, Dom, EventKind};
use crate::error::InitError;

/// Elements of a mounted drawer.
#[derive(Debug, Clone)]
pub struct MobileNav<N> {
    pub toggle: N,
    pub links: N,
    pub body: Option<N>,
}

impl<N: Clone + 'static> MobileNav<N> {
    /// Open a closed drawer or close an open one.
    pub fn toggle<D: Dom<Node = N>>(&self, dom: &D, config: &NavConfig) {
        dom.toggle_class(&self.links, &config.active_class);
        for bar in dom.query_within(&self.toggle, &config.bar_selector) {
            dom.toggle_class(&bar, &config.active_class);
        }
        if let Some(body) = &self.body {
            dom.toggle_class(body, &config.body_open_class);
        }
    }

    /// Close the drawer whatever its current state.
    pub fn close<D: Dom<Node = N>>(&self, dom: &D, config: &NavConfig) {
        dom.remove_class(&self.links, &config.active_class);
        if let Some(body) = &self.body {
            dom.remove_class(body, &config.body_open_class);
        }
        for bar in dom.query_within(&self.toggle, &config.bar_selector) {
            dom.remove_class(&bar, &config.active_class);
        }
    }
}

/// Wire the drawer toggle and the closing link listeners.
///
/// Returns `Ok(None)` when the page has no mobile toggle.
///
/// # Errors
///
/// Returns [`InitError::MissingRequiredElement`] if the toggle exists but
/// the links container does not.
pub fn install<D: Dom + 'static>(
    dom: &Rc<D>,
    config: &NavConfig,
) -> Result<Option<Rc<MobileNav<D::Node>>>, InitError> {
    let Some(toggle) = dom.query(&config.toggle_selector) else {
        log::debug!("nav: no {} on this page", config.toggle_selector);
        return Ok(None);
    };
    let links = dom
        .query(&config.links_selector)
        .ok_or_else(|| InitError::missing("nav", config.links_selector.as_str()))?;
    let nav = Rc::new(MobileNav { toggle, links, body: dom.body() });

    let (dom_cb, nav_cb, config_cb) = (Rc::clone(dom), Rc::clone(&nav), config.clone());
    dom.listen(
        &nav.toggle,
        EventKind::Click,
        Box::new(move || {
            nav_cb.toggle(&*dom_cb, &config_cb);
            Dispatch::Default
        }),
    );

    let items = dom.query_all(&config.link_item_selector);
    for item in &items {
        let (dom_cb, nav_cb, config_cb) = (Rc::clone(dom), Rc::clone(&nav), config.clone());
        dom.listen(
            item,
            EventKind::Click,
            Box::new(move || {
                nav_cb.close(&*dom_cb, &config_cb);
                Dispatch::Default
            }),
        );
    }
    log::debug!("nav: wired toggle and {} links", items.len());
    Ok(Some(nav))
}
