//! Browser document backed by web-sys.
//!
//! Only available with the `web` feature. `WebDocument` holds no JS
//! handles of its own (those are not thread-safe); every call re-acquires
//! `window`/`document`, which keeps the type trivially `Send + Sync` and
//! safe to share with the async resolver.

use wasm_bindgen::JsCast;
use tracing::warn;

use crate::Document;

const OVERLAY_ID: &str = "daub-loading-overlay";

/// A [`Document`] writing to the real browser DOM.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebDocument;

impl WebDocument {
    /// Create a new browser document handle.
    pub const fn new() -> Self {
        Self
    }
}

fn dom() -> Option<web_sys::Document> {
    web_sys::window().and_then(|win| win.document())
}

fn root() -> Option<web_sys::HtmlElement> {
    let element = dom()?.document_element()?;
    element.dyn_into::<web_sys::HtmlElement>().ok()
}

fn storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

impl Document for WebDocument {
    fn prefers_dark(&self) -> bool {
        web_sys::window()
            .and_then(|win| win.match_media("(prefers-color-scheme: dark)").ok())
            .flatten()
            .is_some_and(|mql| mql.matches())
    }

    fn inject_style(&self, id: &str, css: &str) {
        let Some(doc) = dom() else {
            warn!(dom.op = "inject_style", "No document available");
            return;
        };

        // Same id replaces the existing block instead of duplicating it.
        if let Some(existing) = doc.get_element_by_id(id) {
            existing.set_text_content(Some(css));
            return;
        }

        let Ok(style) = doc.create_element("style") else {
            warn!(dom.op = "inject_style", "Failed to create style element");
            return;
        };
        style.set_id(id);
        style.set_text_content(Some(css));

        let Some(head) = doc.head() else {
            warn!(dom.op = "inject_style", "Document has no head");
            return;
        };
        if head.append_child(&style).is_err() {
            warn!(dom.op = "inject_style", "Failed to append style block");
        }
    }

    fn set_css_property(&self, name: &str, value: &str) {
        let Some(root) = root() else {
            warn!(dom.op = "set_css_property", "No root element available");
            return;
        };
        if root.style().set_property(name, value).is_err() {
            warn!(dom.op = "set_css_property", css.name = name, "Write failed");
        }
    }

    fn set_root_background(&self, color: &str) {
        let Some(root) = root() else {
            return;
        };
        if root.style().set_property("background-color", color).is_err() {
            warn!(dom.op = "set_root_background", "Write failed");
        }
    }

    fn show_overlay(&self, title: &str) {
        let Some(doc) = dom() else {
            return;
        };
        if doc.get_element_by_id(OVERLAY_ID).is_some() {
            return;
        }
        let Ok(overlay) = doc.create_element("div") else {
            return;
        };
        overlay.set_id(OVERLAY_ID);
        overlay.set_inner_html(&format!(
            "<div class=\"daub-spinner\"></div><p>{title}</p>"
        ));
        if overlay
            .set_attribute(
                "style",
                "position:fixed;inset:0;display:flex;flex-direction:column;\
                 align-items:center;justify-content:center;gap:12px;\
                 background:hsl(var(--background));color:hsl(var(--foreground));\
                 z-index:9999",
            )
            .is_err()
        {
            warn!(dom.op = "show_overlay", "Failed to style overlay");
        }
        if let Some(body) = doc.body() {
            if body.append_child(&overlay).is_err() {
                warn!(dom.op = "show_overlay", "Failed to append overlay");
            }
        }
    }

    fn remove_overlay(&self) {
        if let Some(overlay) = dom().and_then(|doc| doc.get_element_by_id(OVERLAY_ID)) {
            overlay.remove();
        }
    }

    fn set_meta_theme_color(&self, color: &str) {
        let Some(doc) = dom() else {
            return;
        };
        let existing = doc
            .query_selector("meta[name=\"theme-color\"]")
            .ok()
            .flatten();
        if let Some(meta) = existing {
            if meta.set_attribute("content", color).is_err() {
                warn!(dom.op = "set_meta_theme_color", "Write failed");
            }
            return;
        }

        let Ok(meta) = doc.create_element("meta") else {
            return;
        };
        if meta.set_attribute("name", "theme-color").is_err()
            || meta.set_attribute("content", color).is_err()
        {
            warn!(dom.op = "set_meta_theme_color", "Failed to build meta tag");
            return;
        }
        if let Some(head) = doc.head() {
            if head.append_child(&meta).is_err() {
                warn!(dom.op = "set_meta_theme_color", "Failed to append meta tag");
            }
        }
    }

    fn storage_get(&self, key: &str) -> Option<String> {
        storage()?.get_item(key).ok().flatten()
    }

    fn storage_set(&self, key: &str, value: &str) {
        if let Some(storage) = storage() {
            if storage.set_item(key, value).is_err() {
                warn!(dom.op = "storage_set", storage.key = key, "Write failed");
            }
        }
    }
}
