//! In-memory document for native use and tests.

use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use crate::Document;

/// A [`Document`] that records every write instead of touching a DOM.
///
/// Tests drive the pipeline against this and then assert on the recorded
/// state: which custom properties were written, whether the overlay is
/// up, and how many times it was removed.
#[derive(Debug, Default)]
pub struct MemoryDocument {
    prefers_dark: AtomicBool,
    css_properties: RwLock<HashMap<String, String>>,
    style_blocks: RwLock<BTreeMap<String, String>>,
    root_background: RwLock<Option<String>>,
    overlay: RwLock<Option<String>>,
    overlay_removals: AtomicU64,
    meta_theme_color: RwLock<Option<String>>,
    storage: RwLock<HashMap<String, String>>,
}

impl MemoryDocument {
    /// A document whose OS signal prefers light mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// A document with an explicit OS dark-mode signal.
    pub fn with_prefers_dark(prefers_dark: bool) -> Self {
        let doc = Self::default();
        doc.prefers_dark.store(prefers_dark, Ordering::Relaxed);
        doc
    }

    /// Flip the OS dark-mode signal (simulates a system setting change).
    pub fn set_prefers_dark(&self, prefers_dark: bool) {
        self.prefers_dark.store(prefers_dark, Ordering::Relaxed);
    }

    /// The recorded value of one CSS custom property.
    pub fn css_property(&self, name: &str) -> Option<String> {
        self.css_properties
            .read()
            .expect("document lock poisoned")
            .get(name)
            .cloned()
    }

    /// Number of custom properties written so far.
    pub fn css_property_count(&self) -> usize {
        self.css_properties
            .read()
            .expect("document lock poisoned")
            .len()
    }

    /// The CSS text of an injected style block.
    pub fn style_block(&self, id: &str) -> Option<String> {
        self.style_blocks
            .read()
            .expect("document lock poisoned")
            .get(id)
            .cloned()
    }

    /// Number of distinct style blocks present.
    pub fn style_block_count(&self) -> usize {
        self.style_blocks
            .read()
            .expect("document lock poisoned")
            .len()
    }

    /// The last direct root background write.
    pub fn root_background(&self) -> Option<String> {
        self.root_background
            .read()
            .expect("document lock poisoned")
            .clone()
    }

    /// Whether the loading overlay is currently shown.
    pub fn has_overlay(&self) -> bool {
        self.overlay
            .read()
            .expect("document lock poisoned")
            .is_some()
    }

    /// The overlay title, when shown.
    pub fn overlay_title(&self) -> Option<String> {
        self.overlay.read().expect("document lock poisoned").clone()
    }

    /// How many times [`Document::remove_overlay`] has been called.
    pub fn overlay_removals(&self) -> u64 {
        self.overlay_removals.load(Ordering::Relaxed)
    }

    /// The recorded meta theme-color content.
    pub fn meta_theme_color(&self) -> Option<String> {
        self.meta_theme_color
            .read()
            .expect("document lock poisoned")
            .clone()
    }
}

impl Document for MemoryDocument {
    fn prefers_dark(&self) -> bool {
        self.prefers_dark.load(Ordering::Relaxed)
    }

    fn inject_style(&self, id: &str, css: &str) {
        self.style_blocks
            .write()
            .expect("document lock poisoned")
            .insert(id.to_string(), css.to_string());
    }

    fn set_css_property(&self, name: &str, value: &str) {
        self.css_properties
            .write()
            .expect("document lock poisoned")
            .insert(name.to_string(), value.to_string());
    }

    fn set_root_background(&self, color: &str) {
        *self.root_background.write().expect("document lock poisoned") =
            Some(color.to_string());
    }

    fn show_overlay(&self, title: &str) {
        *self.overlay.write().expect("document lock poisoned") = Some(title.to_string());
    }

    fn remove_overlay(&self) {
        self.overlay_removals.fetch_add(1, Ordering::Relaxed);
        *self.overlay.write().expect("document lock poisoned") = None;
    }

    fn set_meta_theme_color(&self, color: &str) {
        *self.meta_theme_color.write().expect("document lock poisoned") =
            Some(color.to_string());
    }

    fn storage_get(&self, key: &str) -> Option<String> {
        self.storage
            .read()
            .expect("document lock poisoned")
            .get(key)
            .cloned()
    }

    fn storage_set(&self, key: &str, value: &str) {
        self.storage
            .write()
            .expect("document lock poisoned")
            .insert(key.to_string(), value.to_string());
    }
}
