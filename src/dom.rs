use std::cell::RefCell;
use std::rc::Rc;

use js_sys::{Array, Function, Reflect};
use serde_json::json;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    window, Document, Element, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, ScrollBehavior, ScrollToOptions, Storage,
};
use yew::NodeRef;

use crate::error::{PageError, PageResult};
use crate::logging::{log_event, LogLevel};
use crate::pointer::Bounds;
use crate::reveal::{reveal_key, RevealChange, RevealTracker};
use crate::starfield::DecorativeStar;
use crate::theme::{PreferenceStore, Theme, ThemeRoot};

const REVEAL_SELECTOR: &str = "[data-reveal]";
const VISIBLE_CLASS: &str = "visible";

fn local_storage() -> PageResult<Storage> {
    window()
        .and_then(|w| w.local_storage().ok().flatten())
        .ok_or(PageError::StorageUnavailable)
}

pub struct LocalStorage;

impl PreferenceStore for LocalStorage {
    fn read(&self, key: &str) -> PageResult<Option<String>> {
        Ok(local_storage()?.get_item(key).ok().flatten())
    }

    fn write(&self, key: &str, value: &str) -> PageResult<()> {
        local_storage()?
            .set_item(key, value)
            .map_err(|_| PageError::StorageWrite {
                key: key.to_string(),
            })
    }
}

fn media_matches(query: &'static str) -> PageResult<bool> {
    window()
        .and_then(|w| w.match_media(query).ok().flatten())
        .map(|mq| mq.matches())
        .ok_or(PageError::MediaQueryUnavailable(query))
}

pub fn system_prefers_dark() -> Option<bool> {
    media_matches("(prefers-color-scheme: dark)").ok()
}

fn prefers_reduced_motion() -> bool {
    media_matches("(prefers-reduced-motion: reduce)").unwrap_or(false)
}

/// Sets the `dark` class and `data-theme` attribute on `<html>`.
pub fn apply_theme(theme: Theme) {
    let Some(root) = window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element())
    else {
        return;
    };

    let _ = root.class_list().toggle_with_force("dark", theme.is_dark());
    let _ = root.set_attribute("data-theme", theme.as_str());
}

fn apply_theme_with_transition(theme: Theme) {
    if prefers_reduced_motion() {
        apply_theme(theme);
        return;
    }

    let Some(document) = window().and_then(|w| w.document()) else {
        apply_theme(theme);
        return;
    };

    let document_js: JsValue = document.into();
    let start_view_transition =
        Reflect::get(&document_js, &JsValue::from_str("startViewTransition")).ok();
    let Some(start_view_transition) = start_view_transition
        .as_ref()
        .and_then(|value| value.dyn_ref::<Function>())
    else {
        apply_theme(theme);
        return;
    };

    // The browser invokes the callback later, so ownership moves to JS.
    let callback = Closure::once_into_js(move || apply_theme(theme));
    if start_view_transition.call1(&document_js, &callback).is_err() {
        apply_theme(theme);
    }
}

pub struct DocumentRoot;

impl ThemeRoot for DocumentRoot {
    fn apply(&self, theme: Theme) {
        apply_theme_with_transition(theme);
    }
}

pub fn viewport_size() -> (f64, f64) {
    let Some(win) = window() else {
        return (1280.0, 720.0);
    };

    let width = win
        .inner_width()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(1280.0);
    let height = win
        .inner_height()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(720.0);

    (width, height)
}

/// Writes one inline style property. Returns `false` when the node is not
/// mounted, which callers treat as a no-op.
pub fn set_style(node: &NodeRef, property: &str, value: &str) -> bool {
    let Some(element) = node.cast::<HtmlElement>() else {
        return false;
    };

    element.style().set_property(property, value).is_ok()
}

pub fn element_bounds(node: &NodeRef) -> PageResult<Bounds> {
    let element = node
        .cast::<Element>()
        .ok_or(PageError::ElementNotMounted("pointer target"))?;
    let rect = element.get_bounding_client_rect();

    Ok(Bounds {
        left: rect.left(),
        top: rect.top(),
        width: rect.width(),
        height: rect.height(),
    })
}

pub fn document() -> PageResult<Document> {
    window()
        .and_then(|w| w.document())
        .ok_or(PageError::ElementNotMounted("document"))
}

/// Creates a `span.star` for `star` and appends it to `container`.
pub fn attach_star(
    document: &Document,
    container: &HtmlElement,
    star: &DecorativeStar,
) -> PageResult<Element> {
    let element = document.create_element("span")?;
    element.set_class_name("star");
    element.set_attribute("style", &star.style())?;
    container.append_child(&element)?;
    Ok(element)
}

pub fn scroll_to_top() {
    if let Some(win) = window() {
        let options = ScrollToOptions::new();
        options.set_top(0.0);
        options.set_behavior(ScrollBehavior::Smooth);
        win.scroll_to_with_scroll_to_options(&options);
    }
}

fn target_key(element: &Element) -> Option<String> {
    reveal_key(element.get_attribute("data-reveal"), element.id())
}

fn mark_visible(element: &Element) {
    let _ = element.class_list().add_1(VISIBLE_CLASS);
}

fn reveal_targets() -> Vec<Element> {
    let Some(nodes) = window()
        .and_then(|w| w.document())
        .and_then(|d| d.query_selector_all(REVEAL_SELECTOR).ok())
    else {
        return Vec::new();
    };

    (0..nodes.length())
        .filter_map(|index| nodes.get(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Watches every `[data-reveal]` element and latches it visible on first
/// intersection. Dropping the observer disconnects it.
pub struct RevealObserver {
    observer: Option<IntersectionObserver>,
    _callback: Option<Closure<dyn FnMut(Array, IntersectionObserver)>>,
}

impl RevealObserver {
    pub fn attach(threshold: f64, tracker: Rc<RefCell<RevealTracker>>) -> Self {
        // Keyless targets cannot be latched, so they are shown straight away.
        let (targets, keyless): (Vec<Element>, Vec<Element>) = reveal_targets()
            .into_iter()
            .partition(|target| target_key(target).is_some());
        for target in &keyless {
            mark_visible(target);
        }

        let callback_tracker = tracker.clone();
        let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
            move |entries: Array, observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                        continue;
                    };
                    let target = entry.target();
                    let Some(key) = target_key(&target) else {
                        continue;
                    };
                    let mut tracker = callback_tracker.borrow_mut();
                    let change = tracker.observe(
                        &key,
                        entry.is_intersecting(),
                        entry.intersection_ratio(),
                    );
                    if change == RevealChange::Revealed {
                        mark_visible(&target);
                        observer.unobserve(&target);
                        log_event(
                            LogLevel::Debug,
                            "section_revealed",
                            json!({ "key": key, "visible": tracker.visible_count() }),
                        );
                    }
                }
            },
        );

        let options = IntersectionObserverInit::new();
        options.set_threshold(&JsValue::from_f64(threshold));

        match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options) {
            Ok(observer) => {
                for target in &targets {
                    observer.observe(target);
                }
                log_event(
                    LogLevel::Debug,
                    "reveal_observer_attached",
                    json!({
                        "targets": targets.len(),
                        "keyless": keyless.len(),
                        "threshold": threshold,
                    }),
                );
                Self {
                    observer: Some(observer),
                    _callback: Some(callback),
                }
            }
            Err(_) => {
                let mut tracker = tracker.borrow_mut();
                for target in &targets {
                    if let Some(key) = target_key(target) {
                        tracker.reveal(&key);
                    }
                    mark_visible(target);
                }
                log_event(
                    LogLevel::Warn,
                    "reveal_observer_unavailable",
                    json!({ "revealed": targets.len() + keyless.len() }),
                );
                Self {
                    observer: None,
                    _callback: None,
                }
            }
        }
    }
}

impl Drop for RevealObserver {
    fn drop(&mut self) {
        if let Some(observer) = self.observer.take() {
            observer.disconnect();
        }
    }
}
