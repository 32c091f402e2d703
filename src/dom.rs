//! Document access seam shared by every page behavior.
//!
//! DESIGN
//! ======
//! Behaviors never touch `web_sys` directly. They query and mutate the page
//! through [`Dom`], which the browser adapter (`web` module, `hydrate`
//! feature) implements over the live document and tests implement with a
//! recording fake. Mutations are infallible here: a failed host call is a
//! cosmetic glitch, so the adapter logs it and moves on.
//!
//! Event wiring is part of the same trait. A listener is a plain closure
//! that reports whether the host should suppress the default action, which
//! keeps handlers callable directly from tests.

/// DOM event kinds the page behaviors listen for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Click,
    Change,
}

impl EventKind {
    /// Event type name as passed to `addEventListener`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::Change => "change",
        }
    }
}

/// What the host should do with the event after a listener ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dispatch {
    /// Let the browser perform its default action.
    #[default]
    Default,
    /// Call `preventDefault()` on the event.
    PreventDefault,
}

/// Event listener registered through [`Dom::listen`].
pub type Listener = Box<dyn Fn() -> Dispatch>;

/// Callback registered through [`Dom::observe`], invoked with each batch of
/// intersection changes.
pub type IntersectionCallback<N> = Box<dyn Fn(&[Intersection<N>])>;

/// One intersection change reported by a viewport observer.
#[derive(Debug, Clone, PartialEq)]
pub struct Intersection<N> {
    pub target: N,
    pub is_intersecting: bool,
    /// Visible fraction of the target, `0.0..=1.0`.
    pub ratio: f64,
}

/// Viewport observer configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObserverOptions {
    /// Visible fraction at which the observer reports.
    pub threshold: f64,
    /// Margin applied to the viewport edges in CSS pixels. Negative values
    /// shrink the effective viewport.
    pub root_margin_px: i32,
}

impl ObserverOptions {
    /// The margin as the CSS length string `IntersectionObserver` expects.
    #[must_use]
    pub fn root_margin(&self) -> String {
        format!("{}px", self.root_margin_px)
    }
}

/// Read/write access to the page document.
pub trait Dom {
    /// Handle to one element.
    type Node: Clone + 'static;

    // --- Queries ---

    /// The document root (`<html>`).
    fn root(&self) -> Option<Self::Node>;
    /// The document body.
    fn body(&self) -> Option<Self::Node>;
    /// First element matching `selector`.
    fn query(&self, selector: &str) -> Option<Self::Node>;
    /// Every element matching `selector`, in document order.
    fn query_all(&self, selector: &str) -> Vec<Self::Node>;
    /// Every descendant of `scope` matching `selector`, in document order.
    fn query_within(&self, scope: &Self::Node, selector: &str) -> Vec<Self::Node>;
    fn element_by_id(&self, id: &str) -> Option<Self::Node>;
    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;
    /// Text content of `node`.
    fn text(&self, node: &Self::Node) -> Option<String>;
    /// Checked state of a checkbox-like control. Non-inputs report `false`.
    fn is_checked(&self, node: &Self::Node) -> bool;
    /// Top edge of `node` relative to the viewport.
    fn viewport_top(&self, node: &Self::Node) -> f64;
    /// Current vertical scroll position of the window.
    fn scroll_y(&self) -> f64;

    // --- Mutations ---

    fn set_attribute(&self, node: &Self::Node, name: &str, value: &str);
    fn remove_attribute(&self, node: &Self::Node, name: &str);
    /// Replace the full class list of `node`.
    fn set_class_name(&self, node: &Self::Node, value: &str);
    fn add_class(&self, node: &Self::Node, class: &str);
    fn remove_class(&self, node: &Self::Node, class: &str);
    fn toggle_class(&self, node: &Self::Node, class: &str);
    fn set_checked(&self, node: &Self::Node, checked: bool);
    fn set_style_property(&self, node: &Self::Node, property: &str, value: &str);
    /// Smoothly scroll the window to the vertical position `top`.
    fn scroll_to(&self, top: f64);
    /// Append a `<style>` block to the document head.
    fn append_style(&self, css: &str);

    // --- Events ---

    fn listen(&self, node: &Self::Node, kind: EventKind, listener: Listener);
    /// Watch `targets` for viewport intersection changes. Targets stay
    /// observed for the lifetime of the page.
    fn observe(
        &self,
        targets: &[Self::Node],
        options: ObserverOptions,
        callback: IntersectionCallback<Self::Node>,
    );
}
