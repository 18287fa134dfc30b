#![forbid(unsafe_code)]
// Allow pedantic lints for early-stage API ergonomics.
#![allow(clippy::nursery)]
#![allow(clippy::pedantic)]

//! # Vanity
//!
//! The page/document abstraction the daub pipeline paints onto.
//!
//! Every write the theme pipeline performs against a live page goes through
//! the [`Document`] trait: CSS custom properties on the root element,
//! injected style blocks, the transient loading overlay, the
//! `<meta name="theme-color">` tag, and the persisted mode key. This keeps
//! the injector, applier, and resolver free of any direct DOM dependency:
//! - [`MemoryDocument`] backs native use and tests, with inspection
//!   accessors for every observable effect
//! - `WebDocument` (feature `web`) maps the same calls onto the real
//!   browser DOM via `web-sys`
//!
//! ## Example
//!
//! ```rust
//! use vanity::{Document, MemoryDocument};
//!
//! let doc = MemoryDocument::new();
//! doc.set_css_property("--background", "0 0% 100%");
//! assert_eq!(doc.css_property("--background").as_deref(), Some("0 0% 100%"));
//! ```

/// In-memory document for native use and tests.
pub mod memory;
/// Browser document backed by web-sys.
#[cfg(feature = "web")]
pub mod web;

pub use memory::MemoryDocument;
#[cfg(feature = "web")]
pub use web::WebDocument;

/// The mutable page surface the theme pipeline writes to.
///
/// Implementations use interior mutability: the resolver and applier share
/// one document reference across suspension points. All methods are
/// best-effort; a missing DOM node degrades with a warning rather than a
/// panic, because a cosmetic subsystem must never take the page down.
pub trait Document: Send + Sync {
    /// The OS/browser dark-mode preference, read synchronously.
    fn prefers_dark(&self) -> bool;

    /// Inject (or replace) a style block under a fixed element id.
    ///
    /// Re-injecting the same id replaces the block; it is never duplicated.
    fn inject_style(&self, id: &str, css: &str);

    /// Set one CSS custom property on the document root.
    fn set_css_property(&self, name: &str, value: &str);

    /// Set the root element's background color directly (paint hint).
    fn set_root_background(&self, color: &str);

    /// Show the transient loading overlay (spinner plus app name).
    fn show_overlay(&self, title: &str);

    /// Remove the loading overlay, if present.
    fn remove_overlay(&self);

    /// Update the `<meta name="theme-color">` tag for mobile chrome.
    fn set_meta_theme_color(&self, color: &str);

    /// Read a persisted key from browser-local storage.
    fn storage_get(&self, key: &str) -> Option<String>;

    /// Persist a key to browser-local storage.
    fn storage_set(&self, key: &str, value: &str);
}
