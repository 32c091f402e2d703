//! Recording in-memory [`Dom`] for behavior tests.
//!
//! Selector matching is by registration: each element is created with the
//! exact selector strings it should answer to, so tests describe the markup
//! without a CSS engine. Events are dispatched synchronously to whatever the
//! behaviors registered.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::dom::{Dispatch, Dom, EventKind, Intersection, IntersectionCallback, Listener, ObserverOptions};

/// Handle to a fake element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Default)]
struct FakeNode {
    id: Option<String>,
    selectors: Vec<String>,
    parent: Option<NodeId>,
    classes: Vec<String>,
    attrs: BTreeMap<String, String>,
    style: BTreeMap<String, String>,
    text: Option<String>,
    checked: bool,
    top: f64,
}

struct FakeObserver {
    options: ObserverOptions,
    targets: Vec<NodeId>,
    callback: Rc<dyn Fn(&[Intersection<NodeId>])>,
}

pub struct FakeDom {
    nodes: RefCell<Vec<FakeNode>>,
    root: Option<NodeId>,
    body: Option<NodeId>,
    listeners: RefCell<Vec<(NodeId, EventKind, Rc<dyn Fn() -> Dispatch>)>>,
    observers: RefCell<Vec<FakeObserver>>,
    scroll_y: Cell<f64>,
    scrolls: RefCell<Vec<f64>>,
    styles: RefCell<Vec<String>>,
}

impl FakeDom {
    /// A document with `<html>` and `<body>`.
    pub fn new() -> Self {
        let mut dom = Self::empty();
        let root = dom.push(FakeNode { selectors: vec!["html".into()], ..FakeNode::default() });
        let body = dom.push(FakeNode {
            selectors: vec!["body".into()],
            parent: Some(root),
            ..FakeNode::default()
        });
        dom.root = Some(root);
        dom.body = Some(body);
        dom
    }

    /// A document with no root or body at all.
    pub fn empty() -> Self {
        Self {
            nodes: RefCell::new(Vec::new()),
            root: None,
            body: None,
            listeners: RefCell::new(Vec::new()),
            observers: RefCell::new(Vec::new()),
            scroll_y: Cell::new(0.0),
            scrolls: RefCell::new(Vec::new()),
            styles: RefCell::new(Vec::new()),
        }
    }

    fn push(&self, node: FakeNode) -> NodeId {
        let mut nodes = self.nodes.borrow_mut();
        nodes.push(node);
        NodeId(nodes.len() - 1)
    }

    fn read<R>(&self, id: NodeId, f: impl FnOnce(&FakeNode) -> R) -> Option<R> {
        self.nodes.borrow().get(id.0).map(f)
    }

    fn write(&self, id: NodeId, f: impl FnOnce(&mut FakeNode)) {
        if let Some(node) = self.nodes.borrow_mut().get_mut(id.0) {
            f(node);
        }
    }

    // --- Building ---

    /// Add an element under the body answering to `selectors`. A selector
    /// of the form `#name` also sets the element id.
    pub fn element(&self, selectors: &[&str]) -> NodeId {
        self.add(self.body, selectors)
    }

    /// Add an element nested inside `parent`.
    pub fn child(&self, parent: NodeId, selectors: &[&str]) -> NodeId {
        self.add(Some(parent), selectors)
    }

    fn add(&self, parent: Option<NodeId>, selectors: &[&str]) -> NodeId {
        let id = selectors
            .iter()
            .find_map(|s| s.strip_prefix('#'))
            .map(str::to_owned);
        self.push(FakeNode {
            id,
            selectors: selectors.iter().map(|s| (*s).to_owned()).collect(),
            parent,
            ..FakeNode::default()
        })
    }

    pub fn set_attr(&self, node: NodeId, name: &str, value: &str) {
        self.write(node, |n| {
            n.attrs.insert(name.to_owned(), value.to_owned());
        });
    }

    pub fn set_text(&self, node: NodeId, text: &str) {
        self.write(node, |n| n.text = Some(text.to_owned()));
    }

    /// Position `node` so its top edge sits `top` pixels below the viewport top.
    pub fn place(&self, node: NodeId, top: f64) {
        self.write(node, |n| n.top = top);
    }

    pub fn set_scroll_y(&self, y: f64) {
        self.scroll_y.set(y);
    }

    // --- Inspection ---

    pub fn root_id(&self) -> Option<NodeId> {
        self.root
    }

    pub fn body_id(&self) -> Option<NodeId> {
        self.body
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.read(node, |n| n.classes.iter().any(|c| c == class)).unwrap_or(false)
    }

    pub fn class_name(&self, node: NodeId) -> String {
        self.read(node, |n| n.classes.join(" ")).unwrap_or_default()
    }

    pub fn attr(&self, node: NodeId, name: &str) -> Option<String> {
        self.read(node, |n| n.attrs.get(name).cloned()).flatten()
    }

    pub fn style(&self, node: NodeId, property: &str) -> Option<String> {
        self.read(node, |n| n.style.get(property).cloned()).flatten()
    }

    pub fn checked(&self, node: NodeId) -> bool {
        self.read(node, |n| n.checked).unwrap_or(false)
    }

    /// Every position passed to `scroll_to`, in order.
    pub fn scrolls(&self) -> Vec<f64> {
        self.scrolls.borrow().clone()
    }

    /// Every stylesheet appended to the head, in order.
    pub fn styles(&self) -> Vec<String> {
        self.styles.borrow().clone()
    }

    pub fn listener_count(&self, node: NodeId, kind: EventKind) -> usize {
        self.listeners
            .borrow()
            .iter()
            .filter(|(n, k, _)| *n == node && *k == kind)
            .count()
    }

    /// Options and targets of each registered observer.
    pub fn observers(&self) -> Vec<(ObserverOptions, Vec<NodeId>)> {
        self.observers
            .borrow()
            .iter()
            .map(|o| (o.options, o.targets.clone()))
            .collect()
    }

    // --- Dispatch ---

    fn dispatch(&self, node: NodeId, kind: EventKind) -> Vec<Dispatch> {
        let listeners = self
            .listeners
            .borrow()
            .iter()
            .filter(|(n, k, _)| *n == node && *k == kind)
            .map(|(_, _, l)| Rc::clone(l))
            .collect::<Vec<_>>();
        listeners.iter().map(|l| l()).collect()
    }

    /// Click `node`; returns each listener's dispatch decision.
    pub fn click(&self, node: NodeId) -> Vec<Dispatch> {
        self.dispatch(node, EventKind::Click)
    }

    /// Set a checkbox the way a user would, then fire `change`.
    pub fn change(&self, node: NodeId, checked: bool) -> Vec<Dispatch> {
        self.write(node, |n| n.checked = checked);
        self.dispatch(node, EventKind::Change)
    }

    /// Deliver intersection entries to every observer watching their targets.
    pub fn intersect(&self, entries: &[Intersection<NodeId>]) {
        let batches = self
            .observers
            .borrow()
            .iter()
            .map(|o| {
                let batch = entries
                    .iter()
                    .filter(|e| o.targets.contains(&e.target))
                    .cloned()
                    .collect::<Vec<_>>();
                (Rc::clone(&o.callback), batch)
            })
            .collect::<Vec<_>>();
        for (callback, batch) in batches {
            if !batch.is_empty() {
                callback(batch.as_slice());
            }
        }
    }

    fn is_descendant(&self, node: NodeId, scope: NodeId) -> bool {
        let mut current = self.read(node, |n| n.parent).flatten();
        while let Some(id) = current {
            if id == scope {
                return true;
            }
            current = self.read(id, |n| n.parent).flatten();
        }
        false
    }

    fn matching(&self, selector: &str) -> Vec<NodeId> {
        self.nodes
            .borrow()
            .iter()
            .enumerate()
            .filter(|(_, n)| n.selectors.iter().any(|s| s == selector))
            .map(|(i, _)| NodeId(i))
            .collect()
    }
}

impl Dom for FakeDom {
    type Node = NodeId;

    fn root(&self) -> Option<NodeId> {
        self.root
    }

    fn body(&self) -> Option<NodeId> {
        self.body
    }

    fn query(&self, selector: &str) -> Option<NodeId> {
        self.matching(selector).into_iter().next()
    }

    fn query_all(&self, selector: &str) -> Vec<NodeId> {
        self.matching(selector)
    }

    fn query_within(&self, scope: &NodeId, selector: &str) -> Vec<NodeId> {
        self.matching(selector)
            .into_iter()
            .filter(|n| self.is_descendant(*n, *scope))
            .collect()
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.nodes
            .borrow()
            .iter()
            .position(|n| n.id.as_deref() == Some(id))
            .map(NodeId)
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        self.attr(*node, name)
    }

    fn text(&self, node: &NodeId) -> Option<String> {
        self.read(*node, |n| n.text.clone()).flatten()
    }

    fn is_checked(&self, node: &NodeId) -> bool {
        self.checked(*node)
    }

    fn viewport_top(&self, node: &NodeId) -> f64 {
        self.read(*node, |n| n.top).unwrap_or(0.0)
    }

    fn scroll_y(&self) -> f64 {
        self.scroll_y.get()
    }

    fn set_attribute(&self, node: &NodeId, name: &str, value: &str) {
        self.set_attr(*node, name, value);
    }

    fn remove_attribute(&self, node: &NodeId, name: &str) {
        self.write(*node, |n| {
            n.attrs.remove(name);
        });
    }

    fn set_class_name(&self, node: &NodeId, value: &str) {
        self.write(*node, |n| n.classes = value.split_whitespace().map(str::to_owned).collect());
    }

    fn add_class(&self, node: &NodeId, class: &str) {
        self.write(*node, |n| {
            if !n.classes.iter().any(|c| c == class) {
                n.classes.push(class.to_owned());
            }
        });
    }

    fn remove_class(&self, node: &NodeId, class: &str) {
        self.write(*node, |n| n.classes.retain(|c| c != class));
    }

    fn toggle_class(&self, node: &NodeId, class: &str) {
        if self.has_class(*node, class) {
            self.remove_class(node, class);
        } else {
            self.add_class(node, class);
        }
    }

    fn set_checked(&self, node: &NodeId, checked: bool) {
        self.write(*node, |n| n.checked = checked);
    }

    fn set_style_property(&self, node: &NodeId, property: &str, value: &str) {
        self.write(*node, |n| {
            n.style.insert(property.to_owned(), value.to_owned());
        });
    }

    fn scroll_to(&self, top: f64) {
        self.scrolls.borrow_mut().push(top);
    }

    fn append_style(&self, css: &str) {
        self.styles.borrow_mut().push(css.to_owned());
    }

    fn listen(&self, node: &NodeId, kind: EventKind, listener: Listener) {
        self.listeners.borrow_mut().push((*node, kind, Rc::from(listener)));
    }

    fn observe(&self, targets: &[NodeId], options: ObserverOptions, callback: IntersectionCallback<NodeId>) {
        self.observers.borrow_mut().push(FakeObserver {
            options,
            targets: targets.to_vec(),
            callback: Rc::from(callback),
        });
    }
}

/// Entry for `target` at `ratio` visibility.
pub fn entry(target: NodeId, ratio: f64) -> Intersection<NodeId> {
    Intersection { target, is_intersecting: ratio > 0.0, ratio }
}
