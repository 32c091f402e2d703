//! Light/dark theme preference and the theme toggle control.
//!
//! Reads the user's persisted choice, falling back to the environment's
//! `prefers-color-scheme`, and reflects it onto the document root, the
//! toggle checkbox and its icon. Flipping the checkbox writes the new choice
//! back to storage.
//!
//! TRADE-OFFS
//! ==========
//! Persistence is best-effort. A blocked or failing store never stops the
//! theme from being applied; it only means the choice is not remembered.

#[cfg(test)]
#[path = "theme_test.rs"]
mod theme_test;

use std::rc::Rc;

use crate::config::ThemeConfig;
use crate::dom::{Dispatch, Dom, EventKind};
use crate::error::InitError;
use crate::store::{ColorScheme, PreferenceStore};

const BEHAVIOR: &str = "theme";

/// The two page themes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// The literal persisted in storage.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    /// Theme selected by a checkbox state: checked means dark.
    #[must_use]
    pub fn from_checked(checked: bool) -> Self {
        if checked { Self::Dark } else { Self::Light }
    }

    #[must_use]
    pub fn is_dark(self) -> bool {
        self == Self::Dark
    }
}

/// Persisted theme choice backed by an injectable store and environment
/// signal.
pub struct ThemePreference<S, C> {
    store: S,
    scheme: C,
    key: String,
}

impl<S: PreferenceStore, C: ColorScheme> ThemePreference<S, C> {
    pub fn new(store: S, scheme: C, key: impl Into<String>) -> Self {
        Self { store, scheme, key: key.into() }
    }

    /// Effective theme at startup.
    ///
    /// A stored value wins; only the literal `"dark"` selects dark, any other
    /// non-empty value selects light. With nothing stored (or storage
    /// unavailable) the environment's color-scheme preference decides.
    #[must_use]
    pub fn resolve(&self) -> Theme {
        match self.store.load(&self.key) {
            Ok(Some(raw)) if !raw.is_empty() => {
                return Theme::parse(&raw).unwrap_or_else(|| {
                    log::debug!("unrecognized stored theme {raw:?}; using light");
                    Theme::Light
                });
            }
            Ok(_) => {}
            Err(err) => log::warn!("{err}; falling back to color-scheme preference"),
        }
        Theme::from_checked(self.scheme.prefers_dark())
    }

    /// Remember `theme`. Failures are logged and otherwise ignored.
    pub fn persist(&self, theme: Theme) {
        if let Err(err) = self.store.save(&self.key, theme.as_str()) {
            log::warn!("{err}; theme choice not saved");
        }
    }
}

/// Elements the theme behavior drives.
#[derive(Debug, Clone)]
pub struct ThemeControls<N> {
    pub root: N,
    pub toggle: N,
    pub icon: N,
}

impl<N: Clone + 'static> ThemeControls<N> {
    /// Locate the root, toggle and icon.
    ///
    /// # Errors
    ///
    /// Returns [`InitError::MissingRequiredElement`] naming the first element
    /// that could not be found.
    pub fn locate<D: Dom<Node = N>>(dom: &D, config: &ThemeConfig) -> Result<Self, InitError> {
        let root = dom.root().ok_or_else(|| InitError::missing(BEHAVIOR, ":root"))?;
        let toggle = dom
            .element_by_id(&config.toggle_id)
            .ok_or_else(|| InitError::missing(BEHAVIOR, format!("#{}", config.toggle_id)))?;
        let icon = dom
            .query(&config.icon_selector)
            .ok_or_else(|| InitError::missing(BEHAVIOR, config.icon_selector.as_str()))?;
        Ok(Self { root, toggle, icon })
    }

    /// Reflect `theme` onto the document: marker attribute, checkbox and icon
    /// always change together.
    pub fn apply<D: Dom<Node = N>>(&self, dom: &D, config: &ThemeConfig, theme: Theme) {
        match theme {
            Theme::Dark => {
                dom.set_attribute(&self.root, &config.marker_attribute, Theme::Dark.as_str());
                dom.set_class_name(&self.icon, &config.dark_icon_class);
            }
            Theme::Light => {
                dom.remove_attribute(&self.root, &config.marker_attribute);
                dom.set_class_name(&self.icon, &config.light_icon_class);
            }
        }
        dom.set_checked(&self.toggle, theme.is_dark());
    }
}

/// Apply the resolved theme and wire the toggle's change listener.
///
/// Returns the theme applied at startup.
///
/// # Errors
///
/// Returns [`InitError::MissingRequiredElement`] if the document root, the
/// toggle or its icon is absent. Nothing is mutated in that case.
pub fn install<D, S, C>(
    dom: &Rc<D>,
    config: &ThemeConfig,
    preference: ThemePreference<S, C>,
) -> Result<Theme, InitError>
where
    D: Dom + 'static,
    S: PreferenceStore + 'static,
    C: ColorScheme + 'static,
{
    let controls = ThemeControls::locate(&**dom, config)?;
    let initial = preference.resolve();
    controls.apply(&**dom, config, initial);
    log::debug!("theme: applied {}", initial.as_str());

    let toggle = controls.toggle.clone();
    let dom_cb = Rc::clone(dom);
    let config_cb = config.clone();
    dom.listen(
        &toggle,
        EventKind::Change,
        Box::new(move || {
            let theme = Theme::from_checked(dom_cb.is_checked(&controls.toggle));
            controls.apply(&*dom_cb, &config_cb, theme);
            preference.persist(theme);
            Dispatch::Default
        }),
    );
    Ok(initial)
}
