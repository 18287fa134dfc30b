#![forbid(unsafe_code)]
// Allow pedantic lints for early-stage API ergonomics.
#![allow(clippy::nursery)]
#![allow(clippy::pedantic)]

//! # Primer
//!
//! The critical first paint: decide a palette and get it on screen before
//! the application framework has mounted and before any network work is
//! scheduled.
//!
//! The injector uses only synchronously available information — the
//! persisted mode key and the OS dark-mode signal — and the pre-converted
//! HSL table from [`swatch::defaults`], so the hot path never touches the
//! color converter. It paints an approximate theme, disables CSS
//! transitions globally (so the resolved theme can supersede this guess
//! without a visible color animation), and raises the loading overlay the
//! resolver later tears down.
//!
//! ## Example
//!
//! ```rust
//! use primer::CriticalInjector;
//! use vanity::MemoryDocument;
//!
//! let doc = MemoryDocument::with_prefers_dark(true);
//! let mode = CriticalInjector::new("Ledger").inject(&doc);
//! assert_eq!(mode, swatch::Mode::Dark);
//! assert!(doc.has_overlay());
//! ```

use swatch::{MODE_STORAGE_KEY, Mode, default_hsl, default_theme};
use tracing::debug;
use vanity::Document;

/// Element id of the injected critical style block.
///
/// Re-running the injector replaces the block under this id; it is never
/// duplicated.
pub const CRITICAL_STYLE_ID: &str = "daub-critical-theme";

/// Paints the approximate theme synchronously at document load.
#[derive(Debug, Clone)]
pub struct CriticalInjector {
    app_name: String,
}

impl CriticalInjector {
    /// Create an injector; `app_name` is shown on the loading overlay.
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
        }
    }

    /// Run the critical paint. Idempotent; returns the mode it painted.
    ///
    /// Mode selection: the persisted mode key wins when present and
    /// parseable; otherwise the OS dark-mode signal decides.
    pub fn inject<D: Document>(&self, doc: &D) -> Mode {
        let stored = doc
            .storage_get(MODE_STORAGE_KEY)
            .and_then(|raw| raw.parse::<Mode>().ok());
        let mode = stored.unwrap_or_else(|| {
            if doc.prefers_dark() {
                Mode::Dark
            } else {
                Mode::Light
            }
        });

        doc.inject_style(CRITICAL_STYLE_ID, &critical_css(mode));
        // Redundant paint hint: some engines paint the root before
        // applying the injected block.
        doc.set_root_background(&default_theme(mode).background.to_string());
        doc.show_overlay(&self.app_name);

        debug!(
            theme.mode = %mode,
            theme.from_storage = stored.is_some(),
            "Critical theme painted"
        );
        mode
    }
}

/// The critical style block for a mode: every role as a CSS custom
/// property from the pre-converted HSL table, plus a global
/// transition-disable rule.
pub fn critical_css(mode: Mode) -> String {
    let mut css = String::from(":root {\n");
    for (role, hsl) in default_hsl(mode) {
        css.push_str("  ");
        css.push_str(role.css_var());
        css.push_str(": ");
        css.push_str(hsl);
        css.push_str(";\n");
    }
    css.push_str("}\n");
    css.push_str("*, *::before, *::after { transition: none !important; }\n");
    css
}

#[cfg(test)]
mod tests {
    use super::*;
    use vanity::MemoryDocument;

    #[test]
    fn test_os_signal_selects_mode() {
        let doc = MemoryDocument::with_prefers_dark(true);
        assert_eq!(CriticalInjector::new("Ledger").inject(&doc), Mode::Dark);

        let doc = MemoryDocument::with_prefers_dark(false);
        assert_eq!(CriticalInjector::new("Ledger").inject(&doc), Mode::Light);
    }

    #[test]
    fn test_stored_mode_beats_os_signal() {
        let doc = MemoryDocument::with_prefers_dark(true);
        doc.storage_set(MODE_STORAGE_KEY, "light");
        assert_eq!(CriticalInjector::new("Ledger").inject(&doc), Mode::Light);
    }

    #[test]
    fn test_garbage_stored_mode_falls_back_to_os_signal() {
        let doc = MemoryDocument::with_prefers_dark(true);
        doc.storage_set(MODE_STORAGE_KEY, "sepia");
        assert_eq!(CriticalInjector::new("Ledger").inject(&doc), Mode::Dark);
    }

    #[test]
    fn test_injection_is_idempotent() {
        let doc = MemoryDocument::new();
        let injector = CriticalInjector::new("Ledger");
        injector.inject(&doc);
        injector.inject(&doc);

        assert_eq!(doc.style_block_count(), 1);
    }

    #[test]
    fn test_css_covers_every_role_and_disables_transitions() {
        let css = critical_css(Mode::Dark);
        for role in swatch::Role::ALL {
            assert!(css.contains(role.css_var()), "missing {role}");
        }
        assert!(css.contains("--background: 0 0% 6%;"));
        assert!(css.contains("transition: none !important"));
    }

    #[test]
    fn test_paint_hints_and_overlay() {
        let doc = MemoryDocument::with_prefers_dark(true);
        CriticalInjector::new("Ledger").inject(&doc);

        assert_eq!(doc.root_background().as_deref(), Some("#0f0f0f"));
        assert_eq!(doc.overlay_title().as_deref(), Some("Ledger"));
        assert!(doc.style_block(CRITICAL_STYLE_ID).is_some());
    }
}
