//! Browser adapter: [`Dom`] over the live document, `localStorage`, and the
//! `prefers-color-scheme` media query. Requires the `hydrate` feature.
//!
//! SYSTEM CONTEXT
//! ==============
//! This is the only module that touches `web_sys`. Host calls that fail are
//! logged at `warn` and skipped; the page stays usable without its effects.
//! Listener closures are leaked on purpose since they live as long as the
//! page does.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Array;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::wasm_bindgen;
use web_sys::{
    Document, Element, HtmlElement, HtmlInputElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, ScrollBehavior, ScrollToOptions, Storage, Window,
};

use crate::boot::boot;
use crate::config::Config;
use crate::dom::{Dispatch, Dom, EventKind, Intersection, IntersectionCallback, Listener, ObserverOptions};
use crate::error::StorageError;
use crate::store::{ColorScheme, PreferenceStore};
use crate::theme::ThemePreference;

const DARK_SCHEME_QUERY: &str = "(prefers-color-scheme: dark)";

fn warn_on_err<T>(result: Result<T, JsValue>, what: &str) {
    if let Err(err) = result {
        log::warn!("{what} failed: {err:?}");
    }
}

/// The live document.
pub struct WebDom {
    window: Window,
    document: Document,
    observers: RefCell<Vec<IntersectionObserver>>,
}

impl WebDom {
    #[must_use]
    pub fn new(window: Window, document: Document) -> Self {
        Self { window, document, observers: RefCell::new(Vec::new()) }
    }

    fn collect(list: Result<web_sys::NodeList, JsValue>, selector: &str) -> Vec<Element> {
        let list = match list {
            Ok(list) => list,
            Err(err) => {
                log::warn!("querySelectorAll({selector}) failed: {err:?}");
                return Vec::new();
            }
        };
        let mut elements = Vec::new();
        for i in 0..list.length() {
            if let Some(node) = list.item(i)
                && let Ok(el) = node.dyn_into::<Element>()
            {
                elements.push(el);
            }
        }
        elements
    }
}

impl Dom for WebDom {
    type Node = Element;

    fn root(&self) -> Option<Element> {
        self.document.document_element()
    }

    fn body(&self) -> Option<Element> {
        self.document.body().map(Element::from)
    }

    fn query(&self, selector: &str) -> Option<Element> {
        match self.document.query_selector(selector) {
            Ok(found) => found,
            Err(err) => {
                log::warn!("querySelector({selector}) failed: {err:?}");
                None
            }
        }
    }

    fn query_all(&self, selector: &str) -> Vec<Element> {
        Self::collect(self.document.query_selector_all(selector), selector)
    }

    fn query_within(&self, scope: &Element, selector: &str) -> Vec<Element> {
        Self::collect(scope.query_selector_all(selector), selector)
    }

    fn element_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn attribute(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn text(&self, node: &Element) -> Option<String> {
        node.text_content()
    }

    fn is_checked(&self, node: &Element) -> bool {
        node.dyn_ref::<HtmlInputElement>().is_some_and(HtmlInputElement::checked)
    }

    fn viewport_top(&self, node: &Element) -> f64 {
        node.get_bounding_client_rect().top()
    }

    fn scroll_y(&self) -> f64 {
        match self.window.scroll_y() {
            Ok(y) => y,
            Err(err) => {
                log::warn!("scrollY failed: {err:?}");
                0.0
            }
        }
    }

    fn set_attribute(&self, node: &Element, name: &str, value: &str) {
        warn_on_err(node.set_attribute(name, value), "setAttribute");
    }

    fn remove_attribute(&self, node: &Element, name: &str) {
        warn_on_err(node.remove_attribute(name), "removeAttribute");
    }

    fn set_class_name(&self, node: &Element, value: &str) {
        node.set_class_name(value);
    }

    fn add_class(&self, node: &Element, class: &str) {
        warn_on_err(node.class_list().add_1(class), "classList.add");
    }

    fn remove_class(&self, node: &Element, class: &str) {
        warn_on_err(node.class_list().remove_1(class), "classList.remove");
    }

    fn toggle_class(&self, node: &Element, class: &str) {
        warn_on_err(node.class_list().toggle(class), "classList.toggle");
    }

    fn set_checked(&self, node: &Element, checked: bool) {
        if let Some(input) = node.dyn_ref::<HtmlInputElement>() {
            input.set_checked(checked);
        }
    }

    fn set_style_property(&self, node: &Element, property: &str, value: &str) {
        if let Some(el) = node.dyn_ref::<HtmlElement>() {
            warn_on_err(el.style().set_property(property, value), "style.setProperty");
        }
    }

    fn scroll_to(&self, top: f64) {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(ScrollBehavior::Smooth);
        self.window.scroll_to_with_scroll_to_options(&options);
    }

    fn append_style(&self, css: &str) {
        let Some(head) = self.document.head() else {
            log::warn!("document has no <head>; styles not injected");
            return;
        };
        warn_on_err(head.insert_adjacent_html("beforeend", &format!("<style>{css}</style>")), "insertAdjacentHTML");
    }

    fn listen(&self, node: &Element, kind: EventKind, listener: Listener) {
        let cb = Closure::<dyn FnMut(web_sys::Event)>::new(move |event: web_sys::Event| {
            if listener() == Dispatch::PreventDefault {
                event.prevent_default();
            }
        });
        warn_on_err(
            node.add_event_listener_with_callback(kind.as_str(), cb.as_ref().unchecked_ref()),
            "addEventListener",
        );
        cb.forget();
    }

    fn observe(&self, targets: &[Element], options: ObserverOptions, callback: IntersectionCallback<Element>) {
        let cb = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
            move |entries: Array, _observer: IntersectionObserver| {
                let mut batch = Vec::new();
                for value in entries.iter() {
                    if let Ok(entry) = value.dyn_into::<IntersectionObserverEntry>() {
                        batch.push(Intersection {
                            target: entry.target(),
                            is_intersecting: entry.is_intersecting(),
                            ratio: entry.intersection_ratio(),
                        });
                    }
                }
                callback(batch.as_slice());
            },
        );

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(options.threshold));
        init.set_root_margin(&options.root_margin());
        match IntersectionObserver::new_with_options(cb.as_ref().unchecked_ref(), &init) {
            Ok(observer) => {
                for target in targets {
                    observer.observe(target);
                }
                self.observers.borrow_mut().push(observer);
            }
            Err(err) => log::warn!("IntersectionObserver unavailable: {err:?}"),
        }
        cb.forget();
    }
}

/// `localStorage`-backed preference store.
pub struct LocalStore {
    window: Window,
}

impl LocalStore {
    #[must_use]
    pub fn new(window: Window) -> Self {
        Self { window }
    }

    fn storage(&self) -> Result<Storage, StorageError> {
        match self.window.local_storage() {
            Ok(Some(storage)) => Ok(storage),
            Ok(None) => Err(StorageError::Unavailable("localStorage is not available".into())),
            Err(err) => Err(StorageError::Unavailable(format!("{err:?}"))),
        }
    }
}

impl PreferenceStore for LocalStore {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage()?
            .get_item(key)
            .map_err(|err| StorageError::Unavailable(format!("{err:?}")))
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage()?
            .set_item(key, value)
            .map_err(|err| StorageError::Unavailable(format!("{err:?}")))
    }
}

/// `prefers-color-scheme` media query.
pub struct MediaScheme {
    window: Window,
}

impl MediaScheme {
    #[must_use]
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl ColorScheme for MediaScheme {
    fn prefers_dark(&self) -> bool {
        match self.window.match_media(DARK_SCHEME_QUERY) {
            Ok(Some(query)) => query.matches(),
            Ok(None) => false,
            Err(err) => {
                log::debug!("matchMedia failed: {err:?}");
                false
            }
        }
    }
}

fn run(window: Window, document: Document) {
    let dom = Rc::new(WebDom::new(window.clone(), document));
    let config = Config::load(&*dom);
    let preference = ThemePreference::new(
        LocalStore::new(window.clone()),
        MediaScheme::new(window),
        config.theme.storage_key.as_str(),
    );
    let report = boot(&dom, &config, preference);
    log::debug!("boot report: {report:?}");
}

/// WASM entry point. Boots once the document has been parsed.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::warn_1(&JsValue::from_str(&err.to_string()));
    }

    let Some(window) = web_sys::window() else {
        log::warn!("no window; page behaviors disabled");
        return;
    };
    let Some(document) = window.document() else {
        log::warn!("no document; page behaviors disabled");
        return;
    };

    if document.ready_state() != "loading" {
        run(window, document);
        return;
    }

    let (window_cb, document_cb) = (window.clone(), document.clone());
    let ready = Closure::once(move || run(window_cb, document_cb));
    warn_on_err(
        document.add_event_listener_with_callback("DOMContentLoaded", ready.as_ref().unchecked_ref()),
        "addEventListener(DOMContentLoaded)",
    );
    ready.forget();
}
