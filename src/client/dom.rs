//! Minimal document model: elements with classes and attributes, and a document
//! that fans every click out to the listeners bound on it.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    classes: Vec<String>,
    attributes: HashMap<String, String>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        let class = class.into();
        if !self.classes.contains(&class) {
            self.classes.push(class);
        }
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

/// A click as seen by a delegated listener. `target` is the element that was
/// actually clicked, not the one the listener is bound to.
#[derive(Debug, Clone)]
pub struct ClickEvent {
    pub target: Element,
}

impl ClickEvent {
    pub fn on(target: Element) -> Self {
        Self { target }
    }
}

type ClickListener = Arc<dyn Fn(&ClickEvent) + Send + Sync>;

#[derive(Clone, Default)]
pub struct Document {
    listeners: Arc<RwLock<Vec<ClickListener>>>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_click_listener<F>(&self, listener: F)
    where
        F: Fn(&ClickEvent) + Send + Sync + 'static,
    {
        let mut listeners = self
            .listeners
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        listeners.push(Arc::new(listener));
    }

    /// Bubbles a click up to the document. Listeners are cloned out first so a
    /// listener may register further listeners without deadlocking.
    pub fn dispatch_click(&self, event: &ClickEvent) {
        let listeners: Vec<ClickListener> = self
            .listeners
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone();
        for listener in listeners {
            listener(event);
        }
    }
}
