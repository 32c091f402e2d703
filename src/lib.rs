//! Client-side behaviors for a static portfolio page.
//!
//! This crate is compiled to WebAssembly and booted once the page has been
//! parsed. It owns four independent behaviors that share nothing but the
//! document: a persisted light/dark theme toggle, the mobile navigation
//! drawer, smooth scrolling for in-page anchors, and scroll-triggered
//! reveal animations. All logic runs against the [`dom::Dom`] seam so it can
//! be tested natively; the browser adapter lives behind the `hydrate`
//! feature.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`boot`] | One-shot initialization of every behavior |
//! | [`theme`] | Theme preference resolution and the toggle control |
//! | [`nav`] | Mobile navigation drawer |
//! | [`scroll`] | Offset smooth scrolling for `#fragment` links |
//! | [`reveal`] | Fade-in on first view and the skill badge cascade |
//! | [`styles`] | Stylesheet backing the class-driven animations |
//! | [`dom`] | Document access and event wiring trait |
//! | [`store`] | Preference storage and color-scheme signal |
//! | [`config`] | Selectors, class names and constants |
//! | [`error`] | Initialization, storage and config errors |
//! | `web` | Browser implementation (`hydrate` feature) |

pub mod boot;
pub mod config;
pub mod dom;
pub mod error;
pub mod nav;
pub mod reveal;
pub mod scroll;
pub mod store;
pub mod styles;
pub mod theme;

#[cfg(feature = "hydrate")]
pub mod web;

#[cfg(test)]
mod fake_dom;
